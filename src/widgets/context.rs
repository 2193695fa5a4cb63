//! Widget context providing shared state for widget rendering.

use crate::data::DashboardData;

/// Shared context passed to widgets during rendering.
///
/// Borrowed so the data is not cloned on every frame.
#[derive(Debug, Clone, Copy)]
pub struct WidgetContext<'a> {
    /// Content snapshot.
    pub data: &'a DashboardData,
    /// Lines available in the widget's inner area.
    pub max_lines: u16,
}

impl<'a> WidgetContext<'a> {
    /// Creates a context with no practical line limit.
    pub fn new(data: &'a DashboardData) -> Self {
        Self {
            data,
            max_lines: u16::MAX,
        }
    }

    /// Sets the line limit.
    pub fn with_max_lines(mut self, max_lines: u16) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub(crate) fn line_budget(&self) -> usize {
        self.max_lines as usize
    }
}
