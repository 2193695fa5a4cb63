//! Dashboard widgets.
//!
//! Each [`WidgetKind`] is backed by a type implementing [`Widget`]. The
//! mapping is the exhaustive match in [`create`], so every kind a layout can
//! name has a renderer and no lookup can miss.
//!
//! Widgets are stateless renderers over a [`WidgetContext`]: they turn the
//! current [`DashboardData`](crate::data::DashboardData) into styled lines for
//! the inner area of their grid cell and never fetch anything themselves.

pub mod alerts;
pub mod context;
pub mod financial_overview;
pub mod module_status;
pub mod realtime_activity;

pub use context::WidgetContext;

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::layout::WidgetKind;

/// A dashboard panel renderer.
///
/// Implementations must be `Send + Sync` so mounted units can be held by
/// the resolver across await points.
pub trait Widget: Send + Sync {
    /// Renders the panel body for an inner area `width` columns wide.
    ///
    /// Returns at most `context.max_lines` lines.
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>>;

    /// The kind this unit renders.
    fn kind(&self) -> WidgetKind;

    /// Minimum inner width for useful output.
    fn min_width(&self) -> u16;
}

/// Constructs the render unit for `kind`.
pub fn create(kind: WidgetKind) -> Box<dyn Widget> {
    match kind {
        WidgetKind::Alerts => Box::new(alerts::AlertsWidget),
        WidgetKind::FinancialOverview => Box::new(financial_overview::FinancialOverviewWidget),
        WidgetKind::ModuleStatus => Box::new(module_status::ModuleStatusWidget),
        WidgetKind::RealtimeActivity => Box::new(realtime_activity::RealtimeActivityWidget),
    }
}

/// Placeholder body shown until a slot has been scrolled near.
///
/// Dim bars of varying length, one per line, filling `height` lines.
pub fn skeleton(width: u16, height: u16) -> Vec<Line<'static>> {
    const SHAPE: [u16; 4] = [70, 90, 50, 80];
    let style = Style::default().fg(Color::DarkGray);
    (0..height)
        .map(|i| {
            if i % 2 == 1 {
                return Line::raw("");
            }
            let percent = SHAPE[(i as usize / 2) % SHAPE.len()];
            let len = (width as u32 * percent as u32 / 100) as usize;
            Line::from(Span::styled("░".repeat(len), style))
        })
        .collect()
}

/// Dim single line used when a widget's data section is empty.
pub(crate) fn empty_state(message: &str) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::DarkGray),
    ))]
}

/// Cuts `text` to `width` characters, marking the cut with `…`.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Formats a whole amount with thousands separators: `48250.0` -> `"48,250"`.
pub(crate) fn format_amount(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
