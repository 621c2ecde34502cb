use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Category, Transaction};

/// Derived snapshot of the whole ledger. Recomputed on demand, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    /// income - expense
    pub balance: Decimal,
    /// Whole percent of income not spent. Exactly 0 when income is 0.
    pub savings_rate: i64,
}

pub(crate) fn totals(txns: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for txn in txns {
        if txn.is_income() {
            income += txn.amount;
        } else {
            expense += txn.amount;
        }
    }
    let balance = income - expense;
    Totals {
        income,
        expense,
        balance,
        savings_rate: ratio_percent(balance, income),
    }
}

/// Expense sums per category, in canonical category order. Categories with
/// no expense entries are absent, and income entries never contribute.
pub(crate) fn category_totals(txns: &[Transaction]) -> Vec<(Category, Decimal)> {
    let mut sums = Vec::new();
    for &category in Category::all() {
        let sum: Decimal = txns
            .iter()
            .filter(|t| t.is_expense() && t.category == category)
            .map(|t| t.amount)
            .sum();
        if sum > Decimal::ZERO {
            sums.push((category, sum));
        }
    }
    sums
}

/// Whole-percent ratio, rounded half away from zero. Returns 0 for a
/// non-positive denominator and on arithmetic overflow, so callers never
/// see a panic or a non-finite value.
pub(crate) fn ratio_percent(numerator: Decimal, denominator: Decimal) -> i64 {
    if denominator <= Decimal::ZERO {
        return 0;
    }
    numerator
        .checked_div(denominator)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .map(|r| r.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|r| r.to_i64())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests;
