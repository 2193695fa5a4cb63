//! Module status widget.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::{empty_state, truncate, Widget, WidgetContext};
use crate::data::ModuleStatus;
use crate::layout::WidgetKind;

/// Renders [`DashboardData::modules`](crate::data::DashboardData::modules):
/// a summary line, then one line per module.
pub struct ModuleStatusWidget;

impl Widget for ModuleStatusWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let modules = &context.data.modules;
        if modules.is_empty() {
            return empty_state("No modules configured");
        }

        let active = modules.iter().filter(|m| m.active).count();
        let mut lines = vec![Line::from(Span::styled(
            format!("{active}/{} modules active", modules.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        lines.extend(modules.iter().map(|m| module_line(m, width)));
        lines.truncate(context.line_budget());
        lines
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::ModuleStatus
    }

    fn min_width(&self) -> u16 {
        18
    }
}

fn module_line(module: &ModuleStatus, width: u16) -> Line<'static> {
    let (marker, color, detail) = if module.active {
        ("● ", Color::Green, format!("{} schools", module.schools))
    } else {
        ("○ ", Color::DarkGray, "inactive".to_string())
    };
    let name_width = (width as usize).saturating_sub(2 + 1 + detail.chars().count());
    let name = truncate(&module.name, name_width);
    let padding = name_width.saturating_sub(name.chars().count());

    Line::from(vec![
        Span::styled(marker, Style::default().fg(color)),
        Span::raw(name),
        Span::raw(" ".repeat(padding + 1)),
        Span::styled(detail, Style::default().fg(color)),
    ])
}
