//! Realtime activity widget: `HH:MM actor action`, newest first.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use super::{empty_state, truncate, Widget, WidgetContext};
use crate::data::ActivityEvent;
use crate::layout::WidgetKind;

/// Renders [`DashboardData::activity`](crate::data::DashboardData::activity).
pub struct RealtimeActivityWidget;

impl Widget for RealtimeActivityWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let events = &context.data.activity;
        if events.is_empty() {
            return empty_state("No recent activity");
        }
        events
            .iter()
            .take(context.line_budget())
            .map(|e| event_line(e, width))
            .collect()
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::RealtimeActivity
    }

    fn min_width(&self) -> u16 {
        20
    }
}

fn event_line(event: &ActivityEvent, width: u16) -> Line<'static> {
    let time = format!("{} ", event.time);
    let actor = format!("{} ", event.actor);
    let used = time.chars().count() + actor.chars().count();
    let action = truncate(&event.action, (width as usize).saturating_sub(used));
    Line::from(vec![
        Span::styled(time, Style::default().fg(Color::DarkGray)),
        Span::styled(actor, Style::default().fg(Color::Cyan)),
        Span::raw(action),
    ])
}
