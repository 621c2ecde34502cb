#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::Kind;

fn txn(kind: Kind, category: Category, amount: Decimal) -> Transaction {
    Transaction {
        id: format!("{category:?}-{kind:?}-{amount}"),
        description: "entry".into(),
        amount,
        category,
        kind,
        timestamp: 1_700_000_000_000,
    }
}

fn income(amount: Decimal) -> Transaction {
    txn(Kind::Income, Category::Salary, amount)
}

fn expense(category: Category, amount: Decimal) -> Transaction {
    txn(Kind::Expense, category, amount)
}

fn limits(entries: &[(Category, Decimal)]) -> LimitTable {
    let mut table = LimitTable::empty();
    for &(category, limit) in entries {
        table.set(category, limit);
    }
    table
}

// ── Empty ledger ──────────────────────────────────────────────

#[test]
fn test_empty_ledger_short_circuits() {
    let advice = generate(&[], &LimitTable::with_defaults());
    assert_eq!(advice.tier, Tier::Empty);
    assert_eq!(
        advice.summary,
        "Nothing to analyze yet. Add income and expenses to get insights."
    );
    assert!(advice.suggestions.is_empty());
}

// ── Tier selection ────────────────────────────────────────────

#[test]
fn test_tier_over_budget_when_rate_negative() {
    let txns = vec![income(dec!(100)), expense(Category::Food, dec!(150))];
    let advice = generate(&txns, &LimitTable::empty());
    assert_eq!(advice.tier, Tier::OverBudget);
    assert!(advice.summary.contains("more than you earned"));
}

#[test]
fn test_tier_excellent_at_thirty() {
    // (10 - 7) / 10 = 30%
    let txns = vec![income(dec!(10)), expense(Category::Food, dec!(7))];
    let advice = generate(&txns, &LimitTable::empty());
    assert_eq!(advice.tier, Tier::Excellent);
    assert!(advice.summary.contains("30%"));
}

#[test]
fn test_tier_moderate_at_ten() {
    // (10 - 9) / 10 = 10%
    let txns = vec![income(dec!(10)), expense(Category::Food, dec!(9))];
    let advice = generate(&txns, &LimitTable::empty());
    assert_eq!(advice.tier, Tier::Moderate);
}

#[test]
fn test_tier_low_below_ten() {
    // (10 - 9.60) / 10 = 4%
    let txns = vec![income(dec!(10)), expense(Category::Food, dec!(9.60))];
    let advice = generate(&txns, &LimitTable::empty());
    assert_eq!(advice.tier, Tier::Low);
    assert!(advice.summary.contains("4%"));
}

#[test]
fn test_zero_income_is_low_not_a_failure() {
    let txns = vec![expense(Category::Food, dec!(500))];
    let advice = generate(&txns, &LimitTable::empty());
    assert_eq!(advice.tier, Tier::Low);
    assert_eq!(advice.suggestions.len(), 2);
}

// ── Suggestion slots ──────────────────────────────────────────

#[test]
fn test_always_exactly_two_suggestions() {
    let cases: Vec<Vec<Transaction>> = vec![
        vec![income(dec!(1000))],
        vec![expense(Category::Food, dec!(10))],
        vec![income(dec!(1000)), expense(Category::Food, dec!(999))],
        vec![income(dec!(1000)), expense(Category::Food, dec!(2000))],
    ];
    for txns in cases {
        let advice = generate(&txns, &LimitTable::with_defaults());
        assert_eq!(advice.suggestions.len(), 2);
    }
}

#[test]
fn test_top_category_suggestion_names_biggest_spender() {
    let txns = vec![
        income(dec!(20000)),
        expense(Category::Food, dec!(500)),
        expense(Category::Shopping, dec!(4000)),
    ];
    let advice = generate(&txns, &LimitTable::empty());
    assert!(advice.suggestions[0].contains("Shopping"));
    assert!(advice.suggestions[0].contains("$4000.00"));
}

#[test]
fn test_top_category_tie_breaks_to_canonical_order() {
    // Food and Shopping tie; Food is declared first.
    let txns = vec![
        expense(Category::Shopping, dec!(100)),
        expense(Category::Food, dec!(100)),
    ];
    let advice = generate(&txns, &LimitTable::empty());
    assert!(advice.suggestions[0].contains("Food"));
}

#[test]
fn test_no_top_category_suggestion_without_expenses() {
    let advice = generate(&[income(dec!(1000))], &LimitTable::empty());
    assert_eq!(advice.suggestions.len(), 2);
    assert!(advice
        .suggestions
        .iter()
        .all(|s| !s.contains("biggest spending")));
}

#[test]
fn test_over_budget_listing_takes_priority() {
    let table = limits(&[(Category::Food, dec!(15000))]);
    let txns = vec![income(dec!(100000)), expense(Category::Food, dec!(16000))];
    let advice = generate(&txns, &table);
    assert!(advice.suggestions[1].contains("Over budget in: Food"));
}

#[test]
fn test_spending_exactly_the_limit_is_not_over_budget() {
    let table = limits(&[(Category::Food, dec!(15000))]);
    let txns = vec![income(dec!(100000)), expense(Category::Food, dec!(15000))];
    let advice = generate(&txns, &table);
    assert!(advice.suggestions.iter().all(|s| !s.contains("Over budget")));
}

#[test]
fn test_unlimited_category_never_listed_over_budget() {
    let txns = vec![income(dec!(10)), expense(Category::Food, dec!(1000000))];
    let advice = generate(&txns, &LimitTable::empty());
    assert!(advice.suggestions.iter().all(|s| !s.contains("Over budget")));
}

#[test]
fn test_savings_target_when_rate_low_and_income_present() {
    // Rate 10%, nothing over budget: recommend 20% of income.
    let txns = vec![income(dec!(1000)), expense(Category::Food, dec!(900))];
    let advice = generate(&txns, &LimitTable::empty());
    assert!(advice.suggestions[1].contains("20% of your income"));
    assert!(advice.suggestions[1].contains("$200.00"));
}

#[test]
fn test_emergency_fund_fallback() {
    // Rate 75%, nothing over budget: fall back to three months of spending.
    let txns = vec![income(dec!(20000)), expense(Category::Food, dec!(5000))];
    let advice = generate(&txns, &LimitTable::empty());
    assert!(advice.suggestions[1].contains("emergency fund"));
    assert!(advice.suggestions[1].contains("$15000.00"));
}

#[test]
fn test_no_savings_target_without_income() {
    let txns = vec![expense(Category::Food, dec!(500))];
    let advice = generate(&txns, &LimitTable::empty());
    assert!(advice
        .suggestions
        .iter()
        .all(|s| !s.contains("20% of your income")));
}
