//! Alert feed widget.
//!
//! One line per alert, most severe first:
//!
//! ```text
//! ● CRIT 3 invoices overdue by more than 30 days · Lincoln Primary
//! ● WARN Subscription expires in 7 days · Riverside Academy
//! ```

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::{empty_state, truncate, Widget, WidgetContext};
use crate::data::{Alert, Severity};
use crate::layout::WidgetKind;

/// Renders [`DashboardData::alerts`](crate::data::DashboardData::alerts).
pub struct AlertsWidget;

impl Widget for AlertsWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let alerts = &context.data.alerts;
        if alerts.is_empty() {
            return empty_state("No open alerts");
        }

        let mut sorted: Vec<&Alert> = alerts.iter().collect();
        sorted.sort_by(|a, b| b.severity.cmp(&a.severity));

        sorted
            .into_iter()
            .take(context.line_budget())
            .map(|alert| render_alert(alert, width))
            .collect()
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Alerts
    }

    fn min_width(&self) -> u16 {
        16
    }
}

fn render_alert(alert: &Alert, width: u16) -> Line<'static> {
    let color = severity_color(alert.severity);
    let text = match &alert.school {
        Some(school) => format!("{} · {}", alert.message, school),
        None => alert.message.clone(),
    };
    // "● " + tag + " "
    let prefix = 2 + 4 + 1;
    Line::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(
            severity_tag(alert.severity),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(truncate(&text, (width as usize).saturating_sub(prefix))),
    ])
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "CRIT",
        Severity::Warning => "WARN",
        Severity::Info => "INFO",
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}
