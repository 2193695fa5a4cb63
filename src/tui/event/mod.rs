//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant for periodic refresh.

use crate::layout::WidgetKind;
use crate::tui::app::App;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick.
    Tick,
}

/// Merges terminal input events with periodic ticks.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Waits for the next terminal event or tick, whichever comes first.
    pub async fn next(&self, reader: &mut EventStream) -> std::io::Result<Event> {
        let mut tick = interval(self.tick_rate);
        // First tick completes immediately.
        tick.tick().await;

        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) => return Ok(Event::Key(key)),
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Focus and paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by an input event, applied by [`App::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to apply to the layout.
    None,
    /// Quit the application.
    Quit,
    /// Show or hide a widget.
    Toggle(WidgetKind),
    /// Restore the default layout.
    Reset,
    /// Move the widget at visual position `from` to `to`.
    Move { from: usize, to: usize },
}

/// Handles a key press.
///
/// View state (focus, scroll, keyboard grab, help) is updated in place;
/// layout mutations are returned as an [`Action`].
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }
    if should_quit(key) {
        return Action::Quit;
    }

    if app.show_help {
        app.show_help = false;
        return Action::None;
    }

    if app.grab.is_some() {
        return handle_grab_key(app, key);
    }

    match key.code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            app.focus_next();
            Action::None
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
            app.focus_previous();
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_by(1);
            Action::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_by(-1);
            Action::None
        }
        KeyCode::PageDown => {
            app.scroll_page(1);
            Action::None
        }
        KeyCode::PageUp => {
            app.scroll_page(-1);
            Action::None
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.scroll = 0;
            Action::None
        }
        KeyCode::Char(' ') => {
            app.pick_up();
            Action::None
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = (c as u8 - b'1') as usize;
            Action::Toggle(WidgetKind::ALL[index])
        }
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('?') => {
            app.show_help = true;
            Action::None
        }
        KeyCode::Esc => {
            app.focused = None;
            Action::None
        }
        _ => Action::None,
    }
}

/// Keys while a widget is picked up: arrows choose the drop position,
/// space/enter drop, esc puts it back.
fn handle_grab_key(app: &mut App, key: KeyEvent) -> Action {
    let len = app.grid.slots.len();
    let Some(grab) = app.grab.as_mut() else {
        return Action::None;
    };
    match key.code {
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
            grab.shift(-1, len);
            let target = grab.target;
            app.focused = Some(target);
            app.ensure_focused_visible();
            Action::None
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
            grab.shift(1, len);
            let target = grab.target;
            app.focused = Some(target);
            app.ensure_focused_visible();
            Action::None
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            let grab = *grab;
            app.grab = None;
            match grab.drop_move() {
                Some((from, to)) => Action::Move { from, to },
                None => {
                    app.focused = Some(grab.origin);
                    Action::None
                }
            }
        }
        KeyCode::Esc => {
            let origin = grab.origin;
            app.grab = None;
            app.focused = Some(origin);
            app.set_status("Move cancelled");
            Action::None
        }
        _ => Action::None,
    }
}

/// Returns true if the key event should quit the application.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c')))
}

#[cfg(test)]
mod tests;
