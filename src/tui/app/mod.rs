//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, the panic hook, and the render loop.
//! The layout itself lives in the [`LayoutProvider`] passed to [`App::run`];
//! `App` only keeps view state derived from it.

mod update;

use crate::config::error::ConfigError;
use crate::config::schema::TuiConfig;
use crate::data::DashboardData;
use crate::layout::{LayoutProvider, LayoutStore};
use crate::tui::drag::{KeyboardGrab, PointerDrag, Release};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::grid::{self, GridLayout};
use crate::tui::resolver::WidgetResolver;
use crate::tui::ui::render_dashboard;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::{Position, Rect};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

/// How long footer status messages stay up.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(2);

/// Rows scrolled per mouse wheel notch.
const WHEEL_SCROLL_ROWS: i32 = 3;

/// Runtime knobs from the `[tui]` config section, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuiSettings {
    pub tick_rate: Duration,
    /// Chebyshev distance in cells before a press becomes a drag.
    pub drag_threshold: u16,
    /// Rows below the viewport at which widgets mount.
    pub visibility_margin: u16,
    /// Terminal rows per grid row unit.
    pub row_height: u16,
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            drag_threshold: 2,
            visibility_margin: 4,
            row_height: 8,
        }
    }
}

impl TuiSettings {
    pub fn from_config(config: &TuiConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            tick_rate: config.tick_rate()?,
            drag_threshold: config.drag_threshold,
            visibility_margin: config.visibility_margin,
            row_height: config.row_height.max(1),
        })
    }
}

/// Core application state for the TUI.
#[derive(Debug)]
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed.
    pub tick_count: u64,
    /// Content shown by the widgets.
    pub data: DashboardData,
    pub settings: TuiSettings,
    /// Packed enabled widgets, rebuilt after every layout change.
    pub grid: GridLayout,
    /// Focused visual position.
    pub focused: Option<usize>,
    /// First content row shown in the viewport.
    pub scroll: u16,
    /// Screen area of the grid viewport.
    ///
    /// Updated during each render pass; mouse hit-testing maps screen
    /// coordinates through it.
    pub grid_area: Rect,
    pub drag: PointerDrag,
    /// Widget picked up with the keyboard.
    pub grab: Option<KeyboardGrab>,
    pub resolver: WidgetResolver,
    /// Temporary footer message with its expiry time.
    pub status_message: Option<(String, Instant)>,
    /// Whether the key help overlay is open.
    pub show_help: bool,
}

impl App {
    pub fn new(data: DashboardData, settings: TuiSettings) -> Self {
        Self {
            should_quit: false,
            tick_count: 0,
            data,
            settings,
            grid: GridLayout::default(),
            focused: None,
            scroll: 0,
            grid_area: Rect::default(),
            drag: PointerDrag::Idle,
            grab: None,
            resolver: WidgetResolver::new(settings.visibility_margin),
            status_message: None,
            show_help: false,
        }
    }

    /// Rebuilds the grid from the store's enabled widgets.
    ///
    /// Any gesture in progress refers to stale positions and is dropped.
    pub fn sync_layout(&mut self, store: &LayoutStore) {
        self.grid = grid::pack(&store.enabled_widgets());
        self.drag.cancel();
        self.grab = None;
        let len = self.grid.slots.len();
        self.focused = match self.focused {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
        self.clamp_scroll();
    }

    /// Moves focus to the next visual position, wrapping around.
    pub fn focus_next(&mut self) {
        let len = self.grid.slots.len();
        if len == 0 {
            return;
        }
        self.focused = Some(self.focused.map_or(0, |i| (i + 1) % len));
        self.ensure_focused_visible();
    }

    /// Moves focus to the previous visual position, wrapping around.
    pub fn focus_previous(&mut self) {
        let len = self.grid.slots.len();
        if len == 0 {
            return;
        }
        self.focused = Some(self.focused.map_or(len - 1, |i| (i + len - 1) % len));
        self.ensure_focused_visible();
    }

    /// Picks up the focused widget for a keyboard move.
    pub fn pick_up(&mut self) {
        let Some(index) = self.focused else {
            self.set_status("Focus a widget first (←/→)");
            return;
        };
        if let Some(slot) = self.grid.slot(index) {
            tracing::debug!(widget = %slot.id, index, "picked up widget");
            self.grab = Some(KeyboardGrab::new(index));
        }
    }

    /// Total grid height in terminal rows.
    pub fn content_height(&self) -> u16 {
        self.grid.content_height(self.settings.row_height)
    }

    fn max_scroll(&self) -> u16 {
        self.content_height().saturating_sub(self.grid_area.height)
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.scroll = u16::try_from(next).unwrap_or(0);
    }

    /// Scrolls by whole viewports; `pages` may be negative.
    pub fn scroll_page(&mut self, pages: i32) {
        let page = i32::from(self.grid_area.height.max(1));
        self.scroll_by(page * pages);
    }

    pub fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Scrolls so the focused slot is in view, top edge first.
    pub fn ensure_focused_visible(&mut self) {
        let Some(slot) = self.focused.and_then(|i| self.grid.slot(i)) else {
            return;
        };
        let rect = self
            .grid
            .slot_rect(slot, self.grid_area.width, self.settings.row_height);
        let viewport = self.grid_area.height;
        if rect.y < self.scroll {
            self.scroll = rect.y;
        } else if rect.bottom() > self.scroll.saturating_add(viewport) {
            self.scroll = rect.bottom().saturating_sub(viewport).min(rect.y);
        }
    }

    /// Visual position of the slot under screen cell `(column, row)`.
    pub fn slot_at_screen(&self, column: u16, row: u16) -> Option<usize> {
        if !self.grid_area.contains(Position::new(column, row)) {
            return None;
        }
        let x = column - self.grid_area.x;
        let y = (row - self.grid_area.y).saturating_add(self.scroll);
        self.grid
            .slot_at(x, y, self.grid_area.width, self.settings.row_height)
            .map(|slot| slot.index)
    }

    /// Handles a mouse event: click to focus, drag to reorder, wheel to scroll.
    pub(crate) fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Action {
        let slot = self.slot_at_screen(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.grab = None;
                self.drag.press(slot, mouse.column, mouse.row);
                Action::None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag.motion(
                    slot,
                    mouse.column,
                    mouse.row,
                    self.settings.drag_threshold,
                );
                Action::None
            }
            MouseEventKind::Up(MouseButton::Left) => match self.drag.release(slot) {
                Release::Click(index) => {
                    self.focused = Some(index);
                    Action::None
                }
                Release::Move { from, to } => Action::Move { from, to },
                Release::None => Action::None,
            },
            MouseEventKind::ScrollDown => {
                self.scroll_by(WHEEL_SCROLL_ROWS);
                Action::None
            }
            MouseEventKind::ScrollUp => {
                self.scroll_by(-WHEEL_SCROLL_ROWS);
                Action::None
            }
            _ => Action::None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now() + STATUS_MESSAGE_TTL));
    }

    /// Clears the status message if it has expired. Returns `true` if it did.
    pub fn expire_status_message(&mut self) -> bool {
        if let Some((_, expiry)) = &self.status_message {
            if Instant::now() >= *expiry {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Runs the TUI: sets up the terminal, enters the event loop, restores on
    /// exit. A pending layout write is flushed before returning.
    pub async fn run(&mut self, layout: &mut LayoutProvider) -> io::Result<()> {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop(layout).await;

        layout.store_mut().flush();
        restore_terminal()?;
        result
    }

    async fn event_loop(&mut self, layout: &mut LayoutProvider) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let event_handler = EventHandler::new(self.settings.tick_rate);
        let mut reader = EventStream::new();

        self.sync_layout(layout.store());
        terminal.draw(|frame| render_dashboard(frame, self))?;

        loop {
            let event = event_handler.next(&mut reader).await?;
            let should_render = match event {
                Event::Key(key) => {
                    let action = handle_key_event(self, key);
                    self.apply(action, layout.store_mut());
                    true
                }
                Event::Mouse(mouse) => {
                    let action = self.handle_mouse_event(mouse);
                    self.apply(action, layout.store_mut());
                    true
                }
                Event::Tick => {
                    self.tick_count += 1;
                    self.expire_status_message()
                }
                Event::Resize(_, _) => true,
            };

            if self.should_quit {
                return Ok(());
            }
            if should_render {
                terminal.draw(|frame| render_dashboard(frame, self))?;
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

#[cfg(test)]
mod tests;
