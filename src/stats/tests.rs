#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, Kind, Transaction};

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

// ── totals ────────────────────────────────────────────────────

#[test]
fn test_totals_empty() {
    let t = totals(&[]);
    assert_eq!(t.income, Decimal::ZERO);
    assert_eq!(t.expense, Decimal::ZERO);
    assert_eq!(t.balance, Decimal::ZERO);
    assert_eq!(t.savings_rate, 0);
}

#[test]
fn test_totals_income_and_expense() {
    let txns = vec![
        expense(Category::Food, dec!(5000)),
        income(dec!(20000)),
    ];
    let t = totals(&txns);
    assert_eq!(t.income, dec!(20000));
    assert_eq!(t.expense, dec!(5000));
    assert_eq!(t.balance, dec!(15000));
    assert_eq!(t.savings_rate, 75);
}

#[test]
fn test_totals_balance_invariant() {
    let txns = vec![
        income(dec!(1234.56)),
        income(dec!(0.44)),
        expense(Category::Food, dec!(200.10)),
        expense(Category::Transport, dec!(34.90)),
    ];
    let t = totals(&txns);
    assert_eq!(t.income - t.expense, t.balance);
}

#[test]
fn test_savings_rate_zero_income_is_exactly_zero() {
    // Expenses with no income must not divide by zero.
    let txns = vec![expense(Category::Food, dec!(500))];
    let t = totals(&txns);
    assert_eq!(t.savings_rate, 0);
    assert_eq!(t.balance, dec!(-500));
}

#[test]
fn test_savings_rate_rounds_half_away_from_zero() {
    // (8 - 7) / 8 = 12.5% -> 13
    let t = totals(&[income(dec!(8)), expense(Category::Food, dec!(7))]);
    assert_eq!(t.savings_rate, 13);

    // (8 - 9) / 8 = -12.5% -> -13
    let t = totals(&[income(dec!(8)), expense(Category::Food, dec!(9))]);
    assert_eq!(t.savings_rate, -13);
}

#[test]
fn test_savings_rate_negative_when_overspent() {
    let t = totals(&[income(dec!(100)), expense(Category::Food, dec!(250))]);
    assert_eq!(t.savings_rate, -150);
}

#[test]
fn test_savings_rate_income_only() {
    let t = totals(&[income(dec!(3000))]);
    assert_eq!(t.savings_rate, 100);
}

// ── category_totals ───────────────────────────────────────────

#[test]
fn test_category_totals_empty() {
    assert!(category_totals(&[]).is_empty());
}

#[test]
fn test_category_totals_excludes_income() {
    let txns = vec![
        income(dec!(20000)),
        expense(Category::Food, dec!(100)),
    ];
    let sums = category_totals(&txns);
    assert_eq!(sums, vec![(Category::Food, dec!(100))]);
}

#[test]
fn test_category_totals_sums_per_category() {
    let txns = vec![
        expense(Category::Food, dec!(10.50)),
        expense(Category::Food, dec!(4.50)),
        expense(Category::Transport, dec!(20)),
    ];
    let sums = category_totals(&txns);
    assert_eq!(
        sums,
        vec![
            (Category::Food, dec!(15.00)),
            (Category::Transport, dec!(20)),
        ]
    );
}

#[test]
fn test_category_totals_canonical_order() {
    // Inserted out of order; output follows the category declaration order.
    let txns = vec![
        expense(Category::Shopping, dec!(1)),
        expense(Category::Food, dec!(2)),
        expense(Category::Transport, dec!(3)),
    ];
    let order: Vec<Category> = category_totals(&txns).iter().map(|(c, _)| *c).collect();
    assert_eq!(
        order,
        vec![Category::Food, Category::Transport, Category::Shopping]
    );
}

#[test]
fn test_category_totals_no_zero_entries() {
    let txns = vec![expense(Category::Food, dec!(1))];
    let sums = category_totals(&txns);
    assert!(sums.iter().all(|(_, sum)| *sum > Decimal::ZERO));
    assert_eq!(sums.len(), 1);
}

// ── ratio_percent ─────────────────────────────────────────────

#[test]
fn test_ratio_percent_basic() {
    assert_eq!(ratio_percent(dec!(5000), dec!(15000)), 33);
    assert_eq!(ratio_percent(dec!(16000), dec!(15000)), 107);
    assert_eq!(ratio_percent(dec!(1), dec!(1)), 100);
}

#[test]
fn test_ratio_percent_half_away_from_zero() {
    assert_eq!(ratio_percent(dec!(1), dec!(8)), 13);
    assert_eq!(ratio_percent(dec!(-1), dec!(8)), -13);
}

#[test]
fn test_ratio_percent_non_positive_denominator() {
    assert_eq!(ratio_percent(dec!(50), Decimal::ZERO), 0);
    assert_eq!(ratio_percent(dec!(50), dec!(-10)), 0);
}
