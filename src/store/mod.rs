mod gateway;

use anyhow::Context;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::advice::{self, Advice};
use crate::alerts::{self, Alert};
use crate::models::{Category, LimitTable, Transaction, TransactionDraft};
use crate::stats::{self, Totals};

pub(crate) use gateway::{Gateway, SqliteGateway};

pub(crate) const TRANSACTIONS_KEY: &str = "transactions";
pub(crate) const LIMITS_KEY: &str = "limits";

/// Hard ceiling on a single entry's amount.
pub(crate) const MAX_AMOUNT: i64 = 10_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("description cannot be empty")]
    EmptyDescription,
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("amount cannot exceed {}", MAX_AMOUNT)]
    AmountTooLarge,
    #[error("limit must be greater than zero")]
    NonPositiveLimit,
}

#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The mutation was applied in memory but could not be written out,
    /// so it will not survive a restart.
    #[error("failed to save: {0}")]
    Persistence(String),
}

/// The single source of truth: an ordered, append/remove-only collection
/// of transactions plus the configured limit table. Every mutation is
/// followed by a synchronous gateway write.
pub(crate) struct Ledger {
    gateway: Box<dyn Gateway>,
    entries: Vec<Transaction>,
    limits: LimitTable,
    load_warnings: Vec<String>,
}

impl Ledger {
    /// Load from the gateway. Corrupt or unreadable data falls back to an
    /// empty ledger (or default limits) with a recorded warning; opening
    /// never fails.
    pub(crate) fn open(gateway: impl Gateway + 'static) -> Self {
        let mut load_warnings = Vec::new();

        let entries = match gateway.get(TRANSACTIONS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    load_warnings
                        .push(format!("Stored transactions are unreadable, starting empty: {e}"));
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                load_warnings
                    .push(format!("Could not read stored transactions, starting empty: {e}"));
                Vec::new()
            }
        };

        let limits = match gateway.get(LIMITS_KEY) {
            Ok(Some(raw)) => match LimitTable::from_json(&raw) {
                Ok(limits) => limits,
                Err(e) => {
                    load_warnings
                        .push(format!("Stored limits are unreadable, using defaults: {e}"));
                    LimitTable::with_defaults()
                }
            },
            Ok(None) => LimitTable::with_defaults(),
            Err(e) => {
                load_warnings.push(format!("Could not read stored limits, using defaults: {e}"));
                LimitTable::with_defaults()
            }
        };

        Self {
            gateway: Box::new(gateway),
            entries,
            limits,
            load_warnings,
        }
    }

    /// Warnings recorded while loading, for the presentation layer to
    /// surface once.
    pub(crate) fn take_load_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.load_warnings)
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Validate, stamp, append, persist. The description is stored
    /// verbatim; display sanitization belongs to the presentation layer.
    pub(crate) fn add(&mut self, draft: TransactionDraft) -> Result<Transaction, LedgerError> {
        validate(&draft)?;
        let txn = Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            description: draft.description,
            amount: draft.amount,
            category: draft.category,
            kind: draft.kind,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        self.entries.push(txn.clone());
        self.persist_transactions()?;
        Ok(txn)
    }

    /// Delete by identifier. Absence is a no-op reported through the
    /// return value, not an error.
    pub(crate) fn remove(&mut self, id: &str) -> Result<bool, LedgerError> {
        let before = self.entries.len();
        self.entries.retain(|t| t.id != id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist_transactions()?;
        Ok(true)
    }

    pub(crate) fn clear(&mut self) -> Result<(), LedgerError> {
        self.entries.clear();
        self.persist_transactions()
    }

    pub(crate) fn set_limit(&mut self, category: Category, limit: Decimal) -> Result<(), LedgerError> {
        if limit <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveLimit.into());
        }
        self.limits.set(category, limit);
        self.persist_limits()
    }

    pub(crate) fn clear_limit(&mut self, category: Category) -> Result<bool, LedgerError> {
        if !self.limits.clear(category) {
            return Ok(false);
        }
        self.persist_limits()?;
        Ok(true)
    }

    // ── Queries ───────────────────────────────────────────────

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.entries
    }

    pub(crate) fn limits(&self) -> &LimitTable {
        &self.limits
    }

    pub(crate) fn totals(&self) -> Totals {
        stats::totals(&self.entries)
    }

    pub(crate) fn category_totals(&self) -> Vec<(Category, Decimal)> {
        stats::category_totals(&self.entries)
    }

    pub(crate) fn alerts(&self) -> Vec<Alert> {
        alerts::evaluate(&self.category_totals(), &self.limits)
    }

    pub(crate) fn advice(&self) -> Advice {
        advice::generate(&self.entries, &self.limits)
    }

    /// Write all entries as CSV. Returns the number of rows written.
    pub(crate) fn export_csv(&self, path: &str) -> anyhow::Result<usize> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create export file: {path}"))?;
        writer.write_record(["date", "description", "category", "type", "amount"])?;
        for txn in &self.entries {
            writer.write_record([
                txn.date(),
                txn.description.clone(),
                txn.category.as_str().to_string(),
                txn.kind.as_str().to_string(),
                txn.amount.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(self.entries.len())
    }

    // ── Persistence ───────────────────────────────────────────

    fn persist_transactions(&mut self) -> Result<(), LedgerError> {
        let raw = serde_json::to_string(&self.entries)
            .map_err(|e| LedgerError::Persistence(e.to_string()))?;
        self.gateway
            .set(TRANSACTIONS_KEY, &raw)
            .map_err(|e| LedgerError::Persistence(e.to_string()))
    }

    fn persist_limits(&mut self) -> Result<(), LedgerError> {
        let raw = self
            .limits
            .to_json()
            .map_err(|e| LedgerError::Persistence(e.to_string()))?;
        self.gateway
            .set(LIMITS_KEY, &raw)
            .map_err(|e| LedgerError::Persistence(e.to_string()))
    }
}

fn validate(draft: &TransactionDraft) -> Result<(), ValidationError> {
    if draft.description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if draft.amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if draft.amount > Decimal::from(MAX_AMOUNT) {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod tests;
