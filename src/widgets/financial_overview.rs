//! Financial overview widget.
//!
//! Totals first, then one text bar per month scaled to the best month's
//! revenue:
//!
//! ```text
//! Revenue      48,250 EUR
//! Expenses     31,900 EUR
//! Net         +16,350 EUR
//! Outstanding   6,420 EUR
//!
//! Jan ██████████████░░░░  7,200
//! ```

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use super::{empty_state, format_amount, Widget, WidgetContext};
use crate::data::{FinanceSummary, MonthlyFigure};
use crate::layout::WidgetKind;

const LABEL_WIDTH: usize = 12;
const AMOUNT_WIDTH: usize = 7;

/// Renders [`DashboardData::finance`](crate::data::DashboardData::finance).
pub struct FinancialOverviewWidget;

impl Widget for FinancialOverviewWidget {
    fn render(&self, width: u16, context: &WidgetContext) -> Vec<Line<'static>> {
        let finance = &context.data.finance;
        if finance.is_empty() {
            return empty_state("No financial data");
        }

        let mut lines = totals(finance);
        if !finance.monthly.is_empty() {
            lines.push(Line::raw(""));
            let peak = finance
                .monthly
                .iter()
                .map(|m| m.revenue)
                .fold(0.0_f64, f64::max);
            lines.extend(finance.monthly.iter().map(|m| month_bar(m, peak, width)));
        }
        lines.truncate(context.line_budget());
        lines
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::FinancialOverview
    }

    fn min_width(&self) -> u16 {
        24
    }
}

fn totals(finance: &FinanceSummary) -> Vec<Line<'static>> {
    let net = finance.net();
    let net_color = if net >= 0.0 { Color::Green } else { Color::Red };
    let net_text = if net >= 0.0 {
        format!("+{}", format_amount(net))
    } else {
        format_amount(net)
    };

    vec![
        amount_line("Revenue", format_amount(finance.revenue), &finance.currency, Style::default()),
        amount_line("Expenses", format_amount(finance.expenses), &finance.currency, Style::default()),
        amount_line("Net", net_text, &finance.currency, Style::default().fg(net_color)),
        amount_line(
            "Outstanding",
            format_amount(finance.outstanding),
            &finance.currency,
            Style::default().fg(Color::Yellow),
        ),
    ]
}

fn amount_line(label: &str, amount: String, currency: &str, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<LABEL_WIDTH$}"),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!("{amount:>AMOUNT_WIDTH$}"), style),
        Span::raw(format!(" {currency}")),
    ])
}

/// `Mon ████░░░  7,200`, bar filling whatever width remains.
fn month_bar(month: &MonthlyFigure, peak: f64, width: u16) -> Line<'static> {
    let label: String = month.month.chars().take(3).collect();
    let bar_width = (width as usize).saturating_sub(3 + 1 + 1 + AMOUNT_WIDTH);
    let filled = if peak > 0.0 {
        ((month.revenue / peak) * bar_width as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(bar_width);
    let bar_color = if month.revenue >= month.expenses {
        Color::Green
    } else {
        Color::Red
    };

    Line::from(vec![
        Span::raw(format!("{label:<3} ")),
        Span::styled("█".repeat(filled), Style::default().fg(bar_color)),
        Span::styled(
            "░".repeat(bar_width - filled),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!(" {:>AMOUNT_WIDTH$}", format_amount(month.revenue))),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DashboardData;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn figure(month: &str, revenue: f64, expenses: f64) -> MonthlyFigure {
        MonthlyFigure {
            month: month.to_string(),
            revenue,
            expenses,
        }
    }

    #[test]
    fn totals_show_net_with_sign() {
        let data = DashboardData {
            finance: FinanceSummary {
                revenue: 1_000.0,
                expenses: 1_500.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let lines = FinancialOverviewWidget.render(40, &WidgetContext::new(&data));
        assert_eq!(lines.len(), 4, "no monthly section without figures");
        assert!(text(&lines[2]).contains("-500"));
        assert_eq!(lines[2].spans[1].style.fg, Some(Color::Red));
    }

    #[test]
    fn peak_month_fills_bar() {
        let data = DashboardData {
            finance: FinanceSummary {
                revenue: 300.0,
                monthly: vec![figure("Jan", 100.0, 50.0), figure("Feb", 200.0, 50.0)],
                ..Default::default()
            },
            ..Default::default()
        };
        let width = 32;
        let lines = FinancialOverviewWidget.render(width, &WidgetContext::new(&data));
        // 4 totals + blank + 2 months
        assert_eq!(lines.len(), 7);
        let bar_width = width as usize - 12;
        let feb = &lines[6];
        assert_eq!(feb.spans[1].content.chars().count(), bar_width);
        assert_eq!(feb.spans[2].content.chars().count(), 0);
        let jan = &lines[5];
        assert_eq!(jan.spans[1].content.chars().count(), bar_width / 2);
        assert_eq!(feb.width(), width as usize);
    }

    #[test]
    fn loss_month_bar_is_red() {
        let data = DashboardData {
            finance: FinanceSummary {
                monthly: vec![figure("Mar", 100.0, 150.0)],
                ..Default::default()
            },
            ..Default::default()
        };
        let lines = FinancialOverviewWidget.render(30, &WidgetContext::new(&data));
        let bar = lines.last().expect("month line");
        assert_eq!(bar.spans[1].style.fg, Some(Color::Red));
    }

    #[test]
    fn narrow_width_does_not_panic() {
        let data = DashboardData::sample();
        let lines = FinancialOverviewWidget.render(4, &WidgetContext::new(&data));
        assert!(!lines.is_empty());
    }
}
