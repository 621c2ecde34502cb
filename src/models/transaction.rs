use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn parse(s: &str) -> Option<Kind> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense entry. Immutable once created; the ledger
/// only ever appends, removes, or clears.
///
/// The serde field names are the on-disk JSON format, so a round-trip
/// through the gateway reproduces the record exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: Kind,
    /// Creation instant, epoch milliseconds.
    pub timestamp: i64,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == Kind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == Kind::Expense
    }

    /// Calendar date of the creation instant, `YYYY-MM-DD`.
    pub fn date(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// User intent for a new entry, before validation stamps it with an
/// identifier and timestamp.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    pub kind: Kind,
}
