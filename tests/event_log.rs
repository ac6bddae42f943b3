//! Host-side diagnostics: forwards a [`Diagnostics`] sink into `tracing` and
//! checks that focus, hover, theme and resize changes are reported.

use std::sync::{Arc, Mutex, Once};

use tessera::element::{Container, ElementBuilder};
use tessera::widgets::{Button, Text};
use tessera::{Diagnostics, FocusManager, HoverManager, LogLevel, Renderer, Theme};
use tracing::{debug, info};

type Events = Arc<Mutex<Vec<(String, String)>>>;

fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// A sink that logs through `tracing` and records what it saw.
fn traced_sink() -> (Diagnostics, Events, Arc<Mutex<Vec<String>>>) {
    let events: Events = Arc::default();
    let logs: Arc<Mutex<Vec<String>>> = Arc::default();
    let event_sink = Arc::clone(&events);
    let log_sink = Arc::clone(&logs);
    let diagnostics = Diagnostics::new()
        .with_event_callback(move |name, data| {
            info!(name, data, "tessera event");
            event_sink.lock().unwrap().push((name.to_string(), data.to_string()));
        })
        .with_log_callback(move |level, message| {
            match level {
                LogLevel::Debug => debug!(message),
                LogLevel::Info => info!(message),
                LogLevel::Warn => tracing::warn!(message),
                LogLevel::Error => tracing::error!(message),
            }
            log_sink.lock().unwrap().push(message.to_string());
        });
    (diagnostics, events, logs)
}

fn event(name: &str, data: &str) -> (String, String) {
    (name.to_string(), data.to_string())
}

fn screen() -> Container {
    Container::vstack()
        .child(Text::new("header"))
        .child(Button::new("one"))
        .child(Button::new("two"))
}

#[test]
fn renderer_reports_theme_and_resize() {
    setup_test_logging();
    let (diagnostics, events, logs) = traced_sink();

    let mut root = screen();
    let mut renderer = Renderer::new(20, 4).unwrap();
    renderer.set_diagnostics(diagnostics);
    renderer.render(&mut root).unwrap();
    renderer.set_theme(Theme::new("plain"));
    renderer.resize(30, 5).unwrap();
    renderer.render(&mut root).unwrap();

    let events = events.lock().unwrap().clone();
    debug!(?events, "captured");
    assert!(events.contains(&event("theme_changed", "plain")));
    assert!(events.contains(&event("resize", "30x5")));

    let logs = logs.lock().unwrap();
    assert!(logs.iter().any(|m| m.contains("-> plain")));
    assert!(logs.iter().any(|m| m.contains("full redraw")));
}

#[test]
fn managers_report_focus_and_hover() {
    setup_test_logging();
    let (diagnostics, events, logs) = traced_sink();

    let mut root = screen();
    let mut focus = FocusManager::new().with_diagnostics(diagnostics.clone());
    focus.set_elements(&mut root);
    focus.focus_next(&mut root);
    assert!(!focus.focus_element(&mut root, &[0]));

    let mut hover = HoverManager::new().with_diagnostics(diagnostics);
    assert!(hover.hover(&mut root, Some(vec![1])));
    assert!(hover.hover(&mut root, None));

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            event("focus_changed", "1"),
            event("focus_changed", "2"),
            event("hover_changed", "1"),
            event("hover_changed", ""),
        ]
    );
    assert_eq!(*logs.lock().unwrap(), vec!["focus target 0 not managed"]);
}

#[test]
fn default_sink_is_silent() {
    let (_, events, _) = traced_sink();
    let mut root = screen();
    let mut focus = FocusManager::new();
    focus.set_elements(&mut root);
    let mut renderer = Renderer::new(10, 2).unwrap();
    renderer.resize(12, 3).unwrap();
    assert!(events.lock().unwrap().is_empty());
}
