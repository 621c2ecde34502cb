use rust_decimal::Decimal;

use crate::models::{Category, LimitTable};
use crate::stats;

pub(crate) const WARNING_PERCENT: i64 = 80;
pub(crate) const CRITICAL_PERCENT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Warning,
    Critical,
}

impl Severity {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A category running hot against its configured limit. Ephemeral:
/// recomputed on every evaluation, never stored.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Alert {
    pub category: Category,
    pub spent: Decimal,
    pub limit: Decimal,
    pub percent_used: i64,
    pub severity: Severity,
}

/// Compare per-category spending against the limit table. Categories with
/// no configured limit are skipped. Output follows the canonical category
/// order of the input.
pub(crate) fn evaluate(category_totals: &[(Category, Decimal)], limits: &LimitTable) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for &(category, spent) in category_totals {
        let Some(limit) = limits.get(category) else {
            continue;
        };
        let percent_used = stats::ratio_percent(spent, limit);
        if percent_used < WARNING_PERCENT {
            continue;
        }
        let severity = if percent_used >= CRITICAL_PERCENT {
            Severity::Critical
        } else {
            Severity::Warning
        };
        alerts.push(Alert {
            category,
            spent,
            limit,
            percent_used,
            severity,
        });
    }
    alerts
}

#[cfg(test)]
mod tests;
