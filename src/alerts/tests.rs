#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::LimitTable;

fn limits(entries: &[(Category, rust_decimal::Decimal)]) -> LimitTable {
    let mut table = LimitTable::empty();
    for &(category, limit) in entries {
        table.set(category, limit);
    }
    table
}

#[test]
fn test_no_alerts_on_empty_totals() {
    let table = limits(&[(Category::Food, dec!(100))]);
    assert!(evaluate(&[], &table).is_empty());
}

#[test]
fn test_no_alert_without_configured_limit() {
    let table = LimitTable::empty();
    let totals = vec![(Category::Food, dec!(999999))];
    assert!(evaluate(&totals, &table).is_empty());
}

#[test]
fn test_no_alert_below_warning_threshold() {
    // 5000 / 15000 = 33%
    let table = limits(&[(Category::Food, dec!(15000))]);
    let totals = vec![(Category::Food, dec!(5000))];
    assert!(evaluate(&totals, &table).is_empty());
}

#[test]
fn test_warning_at_exactly_eighty_percent() {
    let table = limits(&[(Category::Food, dec!(100))]);
    let totals = vec![(Category::Food, dec!(80))];
    let alerts = evaluate(&totals, &table);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, Severity::Warning);
    assert_eq!(alerts[0].percent_used, 80);
}

#[test]
fn test_warning_just_below_limit() {
    let table = limits(&[(Category::Food, dec!(100))]);
    let totals = vec![(Category::Food, dec!(99))];
    let alerts = evaluate(&totals, &table);
    assert_eq!(alerts[0].severity, Severity::Warning);
    assert_eq!(alerts[0].percent_used, 99);
}

#[test]
fn test_rounding_feeds_the_threshold() {
    // 79.5% rounds to 80, which is enough to warn.
    let table = limits(&[(Category::Food, dec!(100))]);
    let totals = vec![(Category::Food, dec!(79.50))];
    let alerts = evaluate(&totals, &table);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].percent_used, 80);
}

#[test]
fn test_critical_at_exactly_the_limit() {
    let table = limits(&[(Category::Food, dec!(100))]);
    let totals = vec![(Category::Food, dec!(100))];
    let alerts = evaluate(&totals, &table);
    assert_eq!(alerts[0].severity, Severity::Critical);
    assert_eq!(alerts[0].percent_used, 100);
}

#[test]
fn test_critical_over_the_limit() {
    // 16000 / 15000 = 107%
    let table = limits(&[(Category::Food, dec!(15000))]);
    let totals = vec![(Category::Food, dec!(16000))];
    let alerts = evaluate(&totals, &table);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, Severity::Critical);
    assert_eq!(alerts[0].percent_used, 107);
    assert_eq!(alerts[0].spent, dec!(16000));
    assert_eq!(alerts[0].limit, dec!(15000));
}

#[test]
fn test_alert_order_is_deterministic() {
    let table = limits(&[
        (Category::Food, dec!(100)),
        (Category::Transport, dec!(100)),
        (Category::Shopping, dec!(100)),
    ]);
    // Input already in canonical order, as category_totals produces it.
    let totals = vec![
        (Category::Food, dec!(90)),
        (Category::Transport, dec!(120)),
        (Category::Shopping, dec!(85)),
    ];
    let alerts = evaluate(&totals, &table);
    let order: Vec<Category> = alerts.iter().map(|a| a.category).collect();
    assert_eq!(
        order,
        vec![Category::Food, Category::Transport, Category::Shopping]
    );
}

#[test]
fn test_severity_labels() {
    assert_eq!(Severity::Warning.as_str(), "warning");
    assert_eq!(format!("{}", Severity::Critical), "critical");
}
