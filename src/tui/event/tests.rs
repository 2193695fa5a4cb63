use super::*;
use crate::data::DashboardData;
use crate::layout::LayoutStore;
use crate::storage::MemoryStorage;
use crate::tui::app::TuiSettings;
use crate::tui::drag::KeyboardGrab;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::layout::Rect;
use std::sync::Arc;

fn make_key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn press(app: &mut App, code: KeyCode) -> Action {
    handle_key_event(app, make_key(code, KeyModifiers::NONE))
}

/// Default layout with 5-row grid units (20 content rows) under an 80x10
/// viewport, so the bottom row needs scrolling.
fn make_app() -> App {
    let store = LayoutStore::load(Arc::new(MemoryStorage::new()), Duration::from_millis(50));
    let settings = TuiSettings {
        row_height: 5,
        ..TuiSettings::default()
    };
    let mut app = App::new(DashboardData::sample(), settings);
    app.sync_layout(&store);
    app.grid_area = Rect::new(0, 1, 80, 10);
    app
}

#[test]
fn test_should_quit_on_q() {
    assert!(should_quit(make_key(KeyCode::Char('q'), KeyModifiers::NONE)));
}

#[test]
fn test_should_quit_on_ctrl_c() {
    assert!(should_quit(make_key(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL
    )));
}

#[test]
fn test_should_not_quit_on_other_keys() {
    assert!(!should_quit(make_key(KeyCode::Char('c'), KeyModifiers::NONE)));
    assert!(!should_quit(make_key(KeyCode::Enter, KeyModifiers::NONE)));
    assert!(!should_quit(make_key(KeyCode::Esc, KeyModifiers::NONE)));
}

#[test]
fn test_event_handler_creation() {
    let handler = EventHandler::new(Duration::from_millis(250));
    assert_eq!(handler.tick_rate, Duration::from_millis(250));
}

#[test]
fn test_event_resize_variant() {
    let event = Event::Resize(80, 24);
    match event {
        Event::Resize(w, h) => {
            assert_eq!(w, 80);
            assert_eq!(h, 24);
        }
        _ => panic!("expected Resize variant"),
    }
}

// --- handle_key_event ---

#[test]
fn test_q_quits_even_while_carrying() {
    let mut app = make_app();
    app.grab = Some(KeyboardGrab::new(0));
    assert_eq!(press(&mut app, KeyCode::Char('q')), Action::Quit);
}

#[test]
fn test_key_release_is_ignored() {
    let mut app = make_app();
    let mut key = make_key(KeyCode::Char('q'), KeyModifiers::NONE);
    key.kind = KeyEventKind::Release;
    assert_eq!(handle_key_event(&mut app, key), Action::None);
}

#[test]
fn test_right_focuses_first_then_wraps() {
    let mut app = make_app();
    assert_eq!(app.focused, None);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.focused, Some(0));
    for _ in 0..4 {
        press(&mut app, KeyCode::Char('l'));
    }
    assert_eq!(app.focused, Some(0));
}

#[test]
fn test_left_from_nothing_focuses_last() {
    let mut app = make_app();
    press(&mut app, KeyCode::Left);
    assert_eq!(app.focused, Some(3));
}

#[test]
fn test_focus_scrolls_slot_into_view() {
    let mut app = make_app();
    // Module status spans content rows 15..20; viewport is 10 rows.
    app.focused = Some(1);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.focused, Some(2));
    assert_eq!(app.scroll, 10);
    press(&mut app, KeyCode::Left);
    press(&mut app, KeyCode::Left);
    assert_eq!(app.focused, Some(0));
    assert_eq!(app.scroll, 0);
}

#[test]
fn test_down_and_up_scroll_within_bounds() {
    let mut app = make_app();
    press(&mut app, KeyCode::Up);
    assert_eq!(app.scroll, 0);
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.scroll, 1);
    press(&mut app, KeyCode::PageDown);
    assert_eq!(app.scroll, 10, "clamped to content height minus viewport");
    press(&mut app, KeyCode::Home);
    assert_eq!(app.scroll, 0);
}

#[test]
fn test_number_keys_toggle_widgets_in_order() {
    let mut app = make_app();
    assert_eq!(
        press(&mut app, KeyCode::Char('1')),
        Action::Toggle(WidgetKind::Alerts)
    );
    assert_eq!(
        press(&mut app, KeyCode::Char('4')),
        Action::Toggle(WidgetKind::RealtimeActivity)
    );
    assert_eq!(press(&mut app, KeyCode::Char('5')), Action::None);
}

#[test]
fn test_r_resets() {
    let mut app = make_app();
    assert_eq!(press(&mut app, KeyCode::Char('r')), Action::Reset);
}

#[test]
fn test_help_toggles_and_swallows_next_key() {
    let mut app = make_app();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.show_help);
    assert_eq!(press(&mut app, KeyCode::Char('r')), Action::None);
    assert!(!app.show_help);
}

#[test]
fn test_space_without_focus_sets_hint() {
    let mut app = make_app();
    press(&mut app, KeyCode::Char(' '));
    assert!(app.grab.is_none());
    assert!(app.status_message.is_some());
}

#[test]
fn test_keyboard_move_round_trip() {
    let mut app = make_app();
    app.focused = Some(3);
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.grab, Some(KeyboardGrab::new(3)));

    for _ in 0..5 {
        press(&mut app, KeyCode::Left);
    }
    assert_eq!(app.grab.map(|g| g.target), Some(0));
    assert_eq!(app.focused, Some(0));

    assert_eq!(
        press(&mut app, KeyCode::Enter),
        Action::Move { from: 3, to: 0 }
    );
    assert!(app.grab.is_none());
}

#[test]
fn test_keyboard_drop_in_place_is_noop() {
    let mut app = make_app();
    app.focused = Some(1);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Up);
    assert_eq!(press(&mut app, KeyCode::Char(' ')), Action::None);
    assert!(app.grab.is_none());
    assert_eq!(app.focused, Some(1));
}

#[test]
fn test_esc_cancels_keyboard_move() {
    let mut app = make_app();
    app.focused = Some(2);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Right);
    assert_eq!(press(&mut app, KeyCode::Esc), Action::None);
    assert!(app.grab.is_none());
    assert_eq!(app.focused, Some(2));
}

#[test]
fn test_number_keys_ignored_while_carrying() {
    let mut app = make_app();
    app.focused = Some(0);
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(press(&mut app, KeyCode::Char('2')), Action::None);
    assert!(app.grab.is_some());
}

#[test]
fn test_esc_clears_focus() {
    let mut app = make_app();
    app.focused = Some(1);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.focused, None);
}
