use std::path::PathBuf;
use std::process::{Command, Output};

/// Creates an empty home directory unique to this test.
fn temp_home(name: &str) -> PathBuf {
    let home = std::env::temp_dir().join(format!("ghostwin-cli-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&home);
    std::fs::create_dir_all(&home).expect("failed to create temp home");
    home
}

fn run(home: &PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ghostwin"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute ghostwin")
}

#[test]
fn help_exits_successfully() {
    // Arrange
    let home = temp_home("help");

    // Act
    let output = run(&home, &["--help"]);

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("window switcher"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let home = temp_home("version");

    // Act
    let output = run(&home, &["--version"]);

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ghostwin"));
}

#[test]
fn shortcuts_show_defaults_without_config() {
    // Arrange
    let home = temp_home("shortcuts-default");

    // Act
    let output = run(&home, &["shortcuts"]);

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ctrl+Alt+J"));
    assert!(stdout.contains("Ctrl+Alt+K"));
    assert!(stdout.contains("Press Ctrl+Alt+J to hide a window"));
}

#[test]
fn shortcuts_read_glib_accelerators_from_config() {
    // Arrange
    let home = temp_home("shortcuts-glib");
    let dir = home.join(".config").join("ghostwin");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "[shortcuts]\nhide = \"<Super>h\"\nrestore = \"<Control><Alt>k\"\n",
    )
    .unwrap();

    // Act
    let output = run(&home, &["shortcuts"]);

    // Assert
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Super+H"));
    assert!(stdout.contains("Ctrl+Alt+K"));
}

#[test]
fn init_writes_config_once() {
    // Arrange
    let home = temp_home("init");
    let path = home.join(".config").join("ghostwin").join("config.toml");

    // Act
    let first = run(&home, &["init"]);
    std::fs::write(&path, "# edited\n").unwrap();
    let second = run(&home, &["init"]);

    // Assert
    assert!(first.status.success());
    assert!(String::from_utf8_lossy(&first.stdout).contains("Created"));
    assert!(String::from_utf8_lossy(&second.stdout).contains("Already exists"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# edited\n");
}

#[test]
fn doctor_flags_bad_accelerator() {
    // Arrange
    let home = temp_home("doctor");
    let dir = home.join(".config").join("ghostwin");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[shortcuts]\nhide = \"Hyper+Q\"\n").unwrap();

    // Act
    let output = run(&home, &["doctor"]);

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("config.toml is valid"));
    assert!(stdout.contains("hide shortcut: invalid accelerator"));
    assert!(stdout.contains("restore shortcut: Ctrl+Alt+K"));
}
