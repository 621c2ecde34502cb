use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Category chart
            Constraint::Length(3), // Insight line
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_category_chart(f, chunks[1], app);
    render_insight(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let income_count = app.transactions.iter().filter(|t| t.is_income()).count();
    let expense_count = app.transactions.iter().filter(|t| t.is_expense()).count();

    render_card(
        f,
        cards[0],
        "Income",
        format_amount(app.totals.income),
        theme::GREEN,
        Some(format!("{income_count} txns")),
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        format_amount(app.totals.expense),
        theme::RED,
        Some(format!("{expense_count} txns")),
    );
    render_card(
        f,
        cards[2],
        "Balance",
        format_amount(app.totals.balance),
        if app.totals.balance >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        None,
    );
    render_card(
        f,
        cards[3],
        "Savings Rate",
        format!("{}%", app.totals.savings_rate),
        theme::tier_color(app.advice.tier),
        None,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            subtitle.unwrap_or_default(),
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    if app.category_totals.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Spending by Category ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses recorded yet. Add one with :expense <category> <amount> <description>",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .category_totals
        .iter()
        .take(12)
        .map(|(category, amount)| {
            let val = amount.to_u64().unwrap_or(0);
            let label = truncate(category.as_str(), 10);
            Bar::default()
                .value(val)
                .label(Line::from(label))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    " Spending by Category ",
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_insight(f: &mut Frame, area: Rect, app: &App) {
    let insight = Paragraph::new(Line::from(Span::styled(
        app.advice.summary.clone(),
        Style::default().fg(theme::tier_color(app.advice.tier)),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Insight ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(insight, area);
}
