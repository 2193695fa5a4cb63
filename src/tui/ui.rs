//! Rendering for the dashboard: header, scrollable widget grid, footer.
//!
//! The grid is drawn into an off-screen buffer the size of the whole content,
//! then the rows under the viewport are copied onto the frame. Slot geometry
//! therefore never depends on the scroll offset.

use crate::layout::WidgetKind;
use crate::tui::app::App;
use crate::tui::resolver::SlotVisibility;
use crate::widgets::{self, WidgetContext};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget as _},
    Frame,
};
use std::time::Instant;

/// Header text displayed at the top of the dashboard.
const HEADER_TEXT: &str = "School Console";

/// Footer text showing available keybindings.
const FOOTER_TEXT: &str =
    "[←/→] Focus  [↑/↓] Scroll  [Space] Move  [1-4] Show/hide  [r] Reset  [?] Help  [q] Quit";

/// Body of a mounted widget whose slot is below its minimum width.
const NARROW_TEXT: &str = "too narrow";

/// Shown in place of the grid when every widget is hidden.
const EMPTY_GRID_TEXT: &str = "All widgets are hidden. Press 1-4 to show one.";

/// Renders the full dashboard.
///
/// Updates `app.grid_area` with the viewport rectangle for mouse hit-testing,
/// and latches visibility for every slot that comes near the viewport.
pub fn render_dashboard(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),    // grid viewport
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_grid(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);

    if app.show_help {
        render_help(frame, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let count = format!(
        "{}/{} widgets",
        app.grid.slots.len(),
        WidgetKind::ALL.len()
    );
    let padding = (area.width as usize)
        .saturating_sub(HEADER_TEXT.chars().count())
        .saturating_sub(count.chars().count());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            HEADER_TEXT,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(padding)),
        Span::styled(count, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, area);
}

fn render_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    app.grid_area = area;
    app.clamp_scroll();

    if app.grid.slots.is_empty() {
        let message = Paragraph::new(EMPTY_GRID_TEXT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        let middle = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        frame.render_widget(message, middle.intersection(area));
        return;
    }

    let row_height = app.settings.row_height;
    let mut content = Buffer::empty(Rect::new(0, 0, area.width, app.content_height()));
    let carried = app.grab.map(|g| g.origin).or(app.drag.dragging());
    let drop_target = app.grab.map(|g| g.target).or(app.drag.drop_target());

    for slot in &app.grid.slots {
        let rect = app.grid.slot_rect(slot, area.width, row_height);
        let visibility =
            app.resolver
                .observe(slot.id, rect.y, rect.height, app.scroll, area.height);

        let mut title = format!(" {} ", slot.id.title());
        if carried == Some(slot.index) {
            title.push_str("(moving) ");
        }
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title)
            .border_style(slot_border_style(
                slot.index,
                app.focused,
                carried,
                drop_target,
            ));
        let inner = block.inner(rect);
        block.render(rect, &mut content);

        let body = match (visibility, app.resolver.unit(slot.id)) {
            (SlotVisibility::Visible, Some(unit)) if inner.width < unit.min_width() => {
                vec![Line::styled(NARROW_TEXT, Style::default().fg(Color::DarkGray))]
            }
            (SlotVisibility::Visible, Some(unit)) => {
                let context = WidgetContext::new(&app.data).with_max_lines(inner.height);
                unit.render(inner.width, &context)
            }
            _ => widgets::skeleton(inner.width, inner.height),
        };
        Paragraph::new(body).render(inner, &mut content);
    }

    blit(&content, app.scroll, frame.buffer_mut(), area);
}

/// Copies content rows `scroll..scroll + area.height` onto `target` at `area`.
fn blit(content: &Buffer, scroll: u16, target: &mut Buffer, area: Rect) {
    for dy in 0..area.height {
        let cy = scroll.saturating_add(dy);
        if cy >= content.area.height {
            break;
        }
        for dx in 0..area.width {
            let Some(src) = content.cell((dx, cy)) else {
                continue;
            };
            if let Some(dst) = target.cell_mut((area.x + dx, area.y + dy)) {
                *dst = src.clone();
            }
        }
    }
}

/// Drop target beats the carried widget, which beats focus.
fn slot_border_style(
    index: usize,
    focused: Option<usize>,
    carried: Option<usize>,
    drop_target: Option<usize>,
) -> Style {
    if drop_target == Some(index) && carried != Some(index) {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else if carried == Some(index) {
        Style::default().fg(Color::Cyan)
    } else if focused == Some(index) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status_message {
        Some((msg, expiry)) if Instant::now() < *expiry => {
            Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)))
        }
        _ => footer_hints(app),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn footer_hints(app: &App) -> Line<'static> {
    if let Some(grab) = app.grab {
        let title = app
            .grid
            .slot(grab.origin)
            .map(|s| s.id.title())
            .unwrap_or_default();
        return Line::from(vec![
            Span::styled(
                format!("Moving {title} to position {}  ", grab.target + 1),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                "[←/→] Choose  [Space] Drop  [Esc] Cancel",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
    }
    if let Some(origin) = app.drag.dragging() {
        let title = app
            .grid
            .slot(origin)
            .map(|s| s.id.title())
            .unwrap_or_default();
        return Line::from(Span::styled(
            format!("Dragging {title}: release over another widget to drop"),
            Style::default().fg(Color::Cyan),
        ));
    }
    Line::from(Span::styled(FOOTER_TEXT, Style::default().fg(Color::DarkGray)))
}

fn render_help(frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw("←/→  h/l    focus previous / next widget"),
        Line::raw("↑/↓  j/k    scroll one row"),
        Line::raw("PgUp/PgDn   scroll one page"),
        Line::raw("Space       pick up focused widget"),
        Line::raw("            then ←/→ and Space to drop"),
        Line::raw("r           reset layout"),
        Line::raw("q           quit"),
        Line::raw(""),
    ];
    for (i, kind) in WidgetKind::ALL.iter().enumerate() {
        lines.push(Line::raw(format!("{}           show/hide {}", i + 1, kind.title())));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("Drag a widget with the mouse to reorder."));

    let width = 46.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        popup,
    );
}
