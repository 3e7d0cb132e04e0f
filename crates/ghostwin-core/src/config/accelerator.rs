use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Super,
}

impl Modifier {
    fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "primary" => Some(Self::Ctrl),
            "alt" | "mod1" => Some(Self::Alt),
            "shift" => Some(Self::Shift),
            "super" | "win" | "meta" | "mod4" => Some(Self::Super),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Ctrl => "Ctrl",
            Self::Alt => "Alt",
            Self::Shift => "Shift",
            Self::Super => "Super",
        }
    }
}

/// A parsed key combination such as `Ctrl+Alt+J`.
///
/// Two spellings are accepted: plus-separated (`Ctrl+Alt+J`) and the
/// GLib accelerator form (`<Control><Alt>j`). Both parse to the same
/// value and display in the plus-separated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accelerator {
    /// Modifiers in canonical order, without duplicates.
    pub modifiers: Vec<Modifier>,
    /// Key name. Single letters are upper case.
    pub key: String,
}

impl Accelerator {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let text = text.trim();
        let invalid = |reason| ConfigError::InvalidAccelerator {
            accelerator: text.to_string(),
            reason,
        };
        if text.is_empty() {
            return Err(invalid("empty"));
        }

        let (names, key) = if text.starts_with('<') {
            split_glib(text).ok_or_else(|| invalid("malformed <modifier>"))?
        } else {
            split_plus(text)
        };

        let mut modifiers = Vec::new();
        for name in names {
            let modifier = Modifier::parse(name).ok_or_else(|| invalid("unknown modifier"))?;
            if !modifiers.contains(&modifier) {
                modifiers.push(modifier);
            }
        }
        modifiers.sort();

        if key.is_empty() {
            return Err(invalid("missing key"));
        }
        if key.contains(char::is_whitespace) || Modifier::parse(key).is_some() {
            return Err(invalid("key must be a single non-modifier key"));
        }

        Ok(Self {
            modifiers,
            key: normalize_key(key),
        })
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.modifiers {
            write!(f, "{}+", m.label())?;
        }
        f.write_str(&self.key)
    }
}

/// Splits `<Control><Alt>j` into (["Control", "Alt"], "j").
fn split_glib(text: &str) -> Option<(Vec<&str>, &str)> {
    let mut names = Vec::new();
    let mut rest = text;
    while let Some(after) = rest.strip_prefix('<') {
        let end = after.find('>')?;
        names.push(&after[..end]);
        rest = &after[end + 1..];
    }
    if rest.contains(['<', '>']) {
        return None;
    }
    Some((names, rest.trim()))
}

/// Splits `Ctrl+Alt+J` into (["Ctrl", "Alt"], "J").
///
/// A trailing `+` is the plus key itself (`Ctrl++`).
fn split_plus(text: &str) -> (Vec<&str>, &str) {
    let (head, key) = match text.strip_suffix("++") {
        Some(head) => (head, "+"),
        None => match text.rsplit_once('+') {
            Some((head, key)) => (head, key.trim()),
            None => return (Vec::new(), text),
        },
    };
    let names = head.split('+').map(str::trim).filter(|s| !s.is_empty()).collect();
    (names, key)
}

fn normalize_key(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_ascii_uppercase().to_string(),
        _ => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plus_form() {
        let accel = Accelerator::parse("Ctrl+Alt+J").unwrap();
        assert_eq!(accel.modifiers, vec![Modifier::Ctrl, Modifier::Alt]);
        assert_eq!(accel.key, "J");
    }

    #[test]
    fn parses_glib_form() {
        let accel = Accelerator::parse("<Control><Alt>j").unwrap();
        assert_eq!(accel, Accelerator::parse("ctrl+alt+j").unwrap());
        assert_eq!(accel.to_string(), "Ctrl+Alt+J");
    }

    #[test]
    fn named_keys_keep_their_spelling() {
        let accel = Accelerator::parse("<Super><Shift>grave").unwrap();
        assert_eq!(accel.to_string(), "Shift+Super+grave");
    }

    #[test]
    fn modifier_order_is_canonical() {
        let a = Accelerator::parse("Alt+Ctrl+K").unwrap();
        let b = Accelerator::parse("Ctrl+Alt+K").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn plus_key_is_allowed() {
        let accel = Accelerator::parse("Ctrl++").unwrap();
        assert_eq!(accel.key, "+");
    }

    #[test]
    fn rejects_bad_accelerators() {
        assert!(Accelerator::parse("").is_err());
        assert!(Accelerator::parse("Ctrl+").is_err());
        assert!(Accelerator::parse("Hyper+J").is_err());
        assert!(Accelerator::parse("<Control>").is_err());
        assert!(Accelerator::parse("<Control j").is_err());
        assert!(Accelerator::parse("Ctrl+Alt").is_err());
    }

    #[test]
    fn rejects_modifier_after_key() {
        assert!(Accelerator::parse("<Control>j<Alt>").is_err());
        assert!(Accelerator::parse("<Control>j>").is_err());
        assert!(Accelerator::parse("<Control>>").is_err());
    }
}
