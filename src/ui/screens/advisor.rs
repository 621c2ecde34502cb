use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),    // Insights
            Constraint::Length(8), // Active alerts
        ])
        .split(area);

    render_insights(f, chunks[0], app);
    render_alerts(f, chunks[1], app);
}

fn render_insights(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", app.advice.summary),
            Style::default()
                .fg(theme::tier_color(app.advice.tier))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for suggestion in &app.advice.suggestions {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(theme::ACCENT)),
            Span::styled(suggestion.clone(), theme::normal_style()),
        ]));
        lines.push(Line::from(""));
    }

    let panel = Paragraph::new(lines)
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    " Spending Insights ",
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(panel, area);
}

fn render_alerts(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = if app.alerts.is_empty() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "  All categories are within their limits",
                theme::dim_style(),
            )),
        ]
    } else {
        app.alerts
            .iter()
            .take(area.height.saturating_sub(2) as usize)
            .map(|alert| {
                let color = theme::severity_color(Some(alert.severity));
                Line::from(vec![
                    Span::styled(
                        format!("  [{}] ", alert.severity),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(
                            "{}: {} of {} ({}%)",
                            alert.category,
                            format_amount(alert.spent),
                            format_amount(alert.limit),
                            alert.percent_used
                        ),
                        Style::default().fg(color),
                    ),
                ])
            })
            .collect()
    };

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Budget Alerts ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(panel, area);
}
