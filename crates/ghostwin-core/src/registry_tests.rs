use std::sync::mpsc::{self, Receiver};

use super::*;
use crate::testing::FakeWindow;

fn sink() -> (EventSink, Receiver<Event>) {
    let (tx, rx) = mpsc::channel();
    (EventSink::new(tx), rx)
}

fn ids(registry: &HiddenRegistry<FakeWindow>) -> Vec<u64> {
    registry.query().iter().map(|h| h.window.id().0).collect()
}

#[test]
fn hide_minimizes_and_tracks() {
    // Arrange
    let (sink, _rx) = sink();
    let mut registry = HiddenRegistry::new();
    let window = FakeWindow::new(1).titled("Inbox");

    // Act
    let outcome = registry.hide(window.clone(), |_| Some("Mail".into()), &sink);

    // Assert
    assert_eq!(outcome, Ok(HideOutcome::Hidden));
    assert!(window.is_minimized());
    assert!(registry.is_hidden(WindowId(1)));
    assert!(registry.hidden_set().contains(WindowId(1)));
    assert_eq!(registry.query()[0].app_name, "Mail");
    assert_eq!(registry.query()[0].title, "Inbox");
    assert_eq!(window.handler_count(WindowSignal::Unmanaged), 1);
    assert_eq!(window.handler_count(WindowSignal::Unminimized), 1);
}

#[test]
fn hiding_twice_is_rejected() {
    let (sink, _rx) = sink();
    let mut registry = HiddenRegistry::new();
    let window = FakeWindow::new(1);

    registry.hide(window.clone(), |_| None, &sink).unwrap();
    let second = registry.hide(window.clone(), |_| None, &sink);

    assert_eq!(second, Err(RegistryError::AlreadyHidden(WindowId(1))));
    assert_eq!(registry.count(), 1);
    assert_eq!(window.handler_count(WindowSignal::Unmanaged), 1);
}

#[test]
fn excluded_types_are_skipped() {
    // Arrange
    let (sink, _rx) = sink();
    let mut registry = HiddenRegistry::new();
    let dialog = FakeWindow::with_type(7, WindowType::ModalDialog);

    // Act
    let outcome = registry.hide(dialog.clone(), |_| None, &sink);

    // Assert
    assert_eq!(outcome, Ok(HideOutcome::Skipped(WindowType::ModalDialog)));
    assert!(registry.is_empty());
    assert!(!dialog.is_minimized());
    assert!(dialog.calls().is_empty());
}

#[test]
fn app_name_falls_back_to_class_then_placeholder() {
    let (sink, _rx) = sink();
    let mut registry = HiddenRegistry::new();

    registry
        .hide(FakeWindow::new(1).classed("org.gnome.Terminal"), |_| None, &sink)
        .unwrap();
    registry
        .hide(FakeWindow::new(2), |_| Some(String::new()), &sink)
        .unwrap();

    let hidden = registry.query();
    assert_eq!(hidden[0].app_name, "org.gnome.Terminal");
    assert_eq!(hidden[1].app_name, FALLBACK_APP_NAME);
}

#[test]
fn restore_unminimizes_before_activating() {
    // Arrange
    let (sink, rx) = sink();
    let mut registry = HiddenRegistry::new();
    let window = FakeWindow::new(3);
    registry.hide(window.clone(), |_| None, &sink).unwrap();

    // Act
    let restored = registry.restore(WindowId(3), 4242).unwrap();

    // Assert
    assert_eq!(restored.window.id(), WindowId(3));
    assert!(!window.is_minimized());
    assert_eq!(window.activated_at(), Some(4242));
    let calls = window.calls();
    let unminimize = calls.iter().position(|c| *c == "unminimize").unwrap();
    let activate = calls.iter().position(|c| *c == "activate").unwrap();
    assert!(unminimize < activate);
    assert_eq!(window.handler_count(WindowSignal::Unmanaged), 0);
    assert_eq!(window.handler_count(WindowSignal::Unminimized), 0);
    assert!(registry.is_empty());
    // Handlers were gone before the unminimize, so nothing was queued.
    assert!(rx.try_recv().is_err());
}

#[test]
fn restore_of_unknown_window_is_not_found() {
    let mut registry: HiddenRegistry<FakeWindow> = HiddenRegistry::new();

    assert_eq!(
        registry.restore(WindowId(9), 0).unwrap_err(),
        RegistryError::NotFound(WindowId(9))
    );
}

#[test]
fn restore_all_survives_failing_windows() {
    // Arrange
    let (sink, _rx) = sink();
    let mut registry = HiddenRegistry::new();
    let (a, b, c) = (FakeWindow::new(1), FakeWindow::new(2), FakeWindow::new(3));
    for w in [&a, &b, &c] {
        registry.hide(w.clone(), |_| None, &sink).unwrap();
    }
    b.set_failing(true);

    // Act
    let restored = registry.restore_all(77);

    // Assert
    assert_eq!(restored, 3);
    assert!(registry.is_empty());
    assert!(registry.hidden_set().is_empty());
    assert_eq!(a.activated_at(), Some(77));
    assert_eq!(c.activated_at(), Some(77));
}

#[test]
fn external_destroy_drops_only_that_record() {
    // Arrange
    let (sink, rx) = sink();
    let mut registry = HiddenRegistry::new();
    let (a, b) = (FakeWindow::new(1), FakeWindow::new(2));
    registry.hide(a.clone(), |_| None, &sink).unwrap();
    registry.hide(b.clone(), |_| None, &sink).unwrap();

    // Act
    a.destroy();
    let event = rx.try_recv().unwrap();
    assert!(matches!(event, Event::Unmanaged(token) if token.window == WindowId(1)));
    let dropped = registry.on_external_destroy(WindowId(1));

    // Assert
    assert!(dropped.is_some());
    assert_eq!(ids(&registry), vec![2]);
    assert!(!a.calls().contains(&"disconnect"));
    assert!(!a.calls().contains(&"unminimize"));
}

#[test]
fn destroy_of_untracked_window_is_noop() {
    let (sink, _rx) = sink();
    let mut registry = HiddenRegistry::new();
    registry.hide(FakeWindow::new(1), |_| None, &sink).unwrap();

    assert!(registry.on_external_destroy(WindowId(5)).is_none());
    assert_eq!(ids(&registry), vec![1]);
}

#[test]
fn external_unminimize_untracks_window() {
    // Arrange
    let (sink, rx) = sink();
    let mut registry = HiddenRegistry::new();
    let window = FakeWindow::new(4);
    registry.hide(window.clone(), |_| None, &sink).unwrap();

    // Act
    window.unminimize_externally();
    let event = rx.try_recv().unwrap();
    assert!(matches!(event, Event::Unminimized(token) if token.window == WindowId(4)));
    registry.on_external_unminimize(WindowId(4));

    // Assert
    assert!(registry.is_empty());
    assert_eq!(window.handler_count(WindowSignal::Unminimized), 0);
    assert_eq!(window.activated_at(), None);
}

#[test]
fn close_releases_before_closing() {
    // Arrange
    let (sink, rx) = sink();
    let mut registry = HiddenRegistry::new();
    let window = FakeWindow::new(6);
    registry.hide(window.clone(), |_| None, &sink).unwrap();

    // Act
    registry.close(WindowId(6), 10).unwrap();

    // Assert
    assert!(window.is_closed());
    assert!(registry.is_empty());
    assert!(rx.try_recv().is_err());
}

#[test]
fn query_keeps_hide_order_after_removal() {
    let (sink, _rx) = sink();
    let mut registry = HiddenRegistry::new();
    for id in [5, 3, 8, 1] {
        registry.hide(FakeWindow::new(id), |_| None, &sink).unwrap();
    }

    registry.restore(WindowId(3), 0).unwrap();

    assert_eq!(ids(&registry), vec![5, 8, 1]);
    assert_eq!(registry.window(WindowId(8)).map(|w| w.id()), Some(WindowId(8)));
}

#[test]
fn clear_disconnects_without_restoring() {
    let (sink, _rx) = sink();
    let mut registry = HiddenRegistry::new();
    let window = FakeWindow::new(2);
    registry.hide(window.clone(), |_| None, &sink).unwrap();

    registry.clear();

    assert!(registry.is_empty());
    assert!(window.is_minimized());
    assert_eq!(window.handler_count(WindowSignal::Unmanaged), 0);
}

#[test]
fn hide_of_failing_window_still_tracks_it() {
    // Arrange
    let (sink, _rx) = sink();
    let mut registry = HiddenRegistry::new();
    let window = FakeWindow::new(3).titled("Draft").classed("Editor");
    window.set_failing(true);

    // Act
    let outcome = registry.hide(window.clone(), |_| None, &sink);

    // Assert
    assert_eq!(outcome.unwrap(), HideOutcome::Hidden);
    let hidden = registry.get(WindowId(3)).unwrap();
    assert_eq!(hidden.title, "");
    assert_eq!(hidden.app_name, FALLBACK_APP_NAME);
    assert_eq!(window.handler_count(WindowSignal::Unmanaged), 0);
    assert_eq!(window.handler_count(WindowSignal::Unminimized), 0);
    assert!(registry.restore(WindowId(3), 0).is_ok());
    assert!(registry.is_empty());
}

#[test]
fn tokens_from_an_earlier_hide_are_stale() {
    // Arrange
    let (sink, rx) = sink();
    let mut registry = HiddenRegistry::new();
    let window = FakeWindow::new(8);
    registry.hide(window.clone(), |_| None, &sink).unwrap();
    window.unminimize_externally();
    let Event::Unminimized(old) = rx.try_recv().unwrap() else {
        panic!("expected an unminimize event");
    };

    // Act
    registry.restore(WindowId(8), 0).unwrap();
    registry.hide(window.clone(), |_| None, &sink).unwrap();
    window.destroy();
    let Event::Unmanaged(new) = rx.try_recv().unwrap() else {
        panic!("expected an unmanaged event");
    };

    // Assert
    assert_eq!(old.window, new.window);
    assert!(!registry.is_current(old));
    assert!(registry.is_current(new));
}
