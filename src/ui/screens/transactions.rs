use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, sanitize};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.transactions.is_empty() {
        let msg = if !app.search_input.is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No transactions matching '{}'", app.search_input),
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to clear the search",
                    theme::dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("No transactions recorded", theme::dim_style())),
                Line::from(""),
                Line::from(Span::styled(
                    "Add one with :income or :expense <category> <amount> <description>",
                    theme::dim_style(),
                )),
            ]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Transactions (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let sign = if txn.is_income() { "+" } else { "-" };
            let amount_str = format!("{sign}{}", format_amount(txn.amount));

            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(txn.date()),
                Cell::from(sanitize(&txn.description, 40)),
                Cell::from(txn.category.as_str()),
                Cell::from(Span::styled(amount_str, amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(16),
    ];

    let search_note = if !app.search_input.is_empty() {
        format!("search: '{}' ", app.search_input)
    } else {
        String::new()
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Transactions ({}) {}", app.transactions.len(), search_note),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
