use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.limit_rows.is_empty() {
        render_empty(f, area);
        return;
    }

    let items: Vec<ListItem> = app
        .limit_rows
        .iter()
        .enumerate()
        .skip(app.limit_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, row)| {
            let color = theme::severity_color(row.severity);

            let style = if i == app.limit_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let ratio = (row.percent_used.max(0) as f64 / 100.0).min(1.0);
            let bar = progress_bar(ratio, 20);
            let display_name = truncate(row.category.as_str(), 15);

            ListItem::new(Line::from(vec![
                Span::styled(format!("{display_name:<16}"), style),
                Span::styled(
                    format!(
                        "{}/{} ",
                        format_amount(row.spent),
                        format_amount(row.limit)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {}%", row.percent_used),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Budget Limits ({}) ", app.limit_rows.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No budget limits configured", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Use :limit <category> <amount> to set a spending limit",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Budget Limits ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
