use ratatui::style::{Color, Modifier, Style};

use crate::advice::Tier;
use crate::alerts::Severity;

pub(crate) const HEADER_BG: Color = Color::Rgb(26, 27, 38);
pub(crate) const HEADER_FG: Color = Color::Rgb(192, 202, 245);
pub(crate) const ACCENT: Color = Color::Rgb(122, 162, 247);
pub(crate) const GREEN: Color = Color::Rgb(158, 206, 106);
pub(crate) const RED: Color = Color::Rgb(247, 118, 142);
pub(crate) const YELLOW: Color = Color::Rgb(224, 175, 104);
pub(crate) const SURFACE: Color = Color::Rgb(41, 46, 66);
pub(crate) const TEXT: Color = Color::Rgb(192, 202, 245);
pub(crate) const TEXT_DIM: Color = Color::Rgb(86, 95, 137);
pub(crate) const OVERLAY: Color = Color::Rgb(59, 66, 97);
pub(crate) const COMMAND_BG: Color = Color::Rgb(22, 22, 30);

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn income_style() -> Style {
    Style::default().fg(GREEN)
}

pub(crate) fn expense_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

/// Color for a limit row or alert line: green while comfortably under,
/// then the alert severity takes over.
pub(crate) fn severity_color(severity: Option<Severity>) -> Color {
    match severity {
        None => GREEN,
        Some(Severity::Warning) => YELLOW,
        Some(Severity::Critical) => RED,
    }
}

pub(crate) fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Empty => TEXT_DIM,
        Tier::OverBudget => RED,
        Tier::Excellent => GREEN,
        Tier::Moderate => ACCENT,
        Tier::Low => YELLOW,
    }
}
