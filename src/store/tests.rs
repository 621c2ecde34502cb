#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use anyhow::anyhow;
use rust_decimal_macros::dec;

use super::*;
use crate::alerts::Severity;
use crate::models::Kind;

/// In-memory gateway with switchable failure modes.
struct MemoryGateway {
    map: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryGateway {
    fn new() -> Self {
        Self {
            map: HashMap::new(),
            fail_reads: false,
            fail_writes: false,
        }
    }

    fn seeded(key: &str, value: &str) -> Self {
        let mut gw = Self::new();
        gw.map.insert(key.into(), value.into());
        gw
    }
}

impl Gateway for MemoryGateway {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        if self.fail_reads {
            return Err(anyhow!("storage unavailable"));
        }
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_writes {
            return Err(anyhow!("disk full"));
        }
        self.map.insert(key.into(), value.into());
        Ok(())
    }
}

// ── Gateway ───────────────────────────────────────────────────

#[test]
fn test_sqlite_gateway_get_set_overwrite() {
    let mut gw = SqliteGateway::open_in_memory().unwrap();
    assert_eq!(gw.get("missing").unwrap(), None);

    gw.set("k", "v1").unwrap();
    gw.set("k", "v2").unwrap();
    assert_eq!(gw.get("k").unwrap().as_deref(), Some("v2"));
}

fn draft(kind: Kind, category: Category, amount: rust_decimal::Decimal) -> TransactionDraft {
    TransactionDraft {
        description: "Test entry".into(),
        amount,
        category,
        kind,
    }
}

// ── Open / load ───────────────────────────────────────────────

#[test]
fn test_open_fresh_store() {
    let mut ledger = Ledger::open(MemoryGateway::new());
    assert!(ledger.transactions().is_empty());
    assert!(ledger.take_load_warnings().is_empty());
    // Fresh stores get the default limit table seeded.
    assert_eq!(ledger.limits().get(Category::Food), Some(dec!(15000)));
}

#[test]
fn test_open_corrupt_transactions_falls_back_to_empty() {
    let gw = MemoryGateway::seeded(TRANSACTIONS_KEY, "{definitely not json");
    let mut ledger = Ledger::open(gw);
    assert!(ledger.transactions().is_empty());
    let warnings = ledger.take_load_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("unreadable"));
    // Drained after the first take.
    assert!(ledger.take_load_warnings().is_empty());
}

#[test]
fn test_open_unreadable_gateway_falls_back_to_empty() {
    let mut gw = MemoryGateway::new();
    gw.fail_reads = true;
    let mut ledger = Ledger::open(gw);
    assert!(ledger.transactions().is_empty());
    // One warning per key that could not be read.
    assert_eq!(ledger.take_load_warnings().len(), 2);
}

#[test]
fn test_open_corrupt_limits_falls_back_to_defaults() {
    let gw = MemoryGateway::seeded(LIMITS_KEY, "[[[");
    let mut ledger = Ledger::open(gw);
    assert_eq!(ledger.limits().get(Category::Food), Some(dec!(15000)));
    assert_eq!(ledger.take_load_warnings().len(), 1);
}

#[test]
fn test_open_stored_limits_replace_defaults() {
    let gw = MemoryGateway::seeded(LIMITS_KEY, r#"{"Food": 42}"#);
    let ledger = Ledger::open(gw);
    assert_eq!(ledger.limits().get(Category::Food), Some(dec!(42)));
    assert!(ledger.limits().get(Category::Transport).is_none());
}

// ── add ───────────────────────────────────────────────────────

#[test]
fn test_add_stamps_id_and_timestamp() {
    let mut ledger = Ledger::open(MemoryGateway::new());
    let txn = ledger
        .add(draft(Kind::Income, Category::Salary, dec!(3000)))
        .unwrap();
    assert!(!txn.id.is_empty());
    assert!(txn.timestamp > 0);
    assert_eq!(ledger.transactions(), &[txn]);
}

#[test]
fn test_add_rejects_empty_description() {
    let mut ledger = Ledger::open(MemoryGateway::new());
    let mut d = draft(Kind::Expense, Category::Food, dec!(10));
    d.description = "   ".into();
    let err = ledger.add(d).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Invalid(ValidationError::EmptyDescription)
    ));
    assert!(ledger.transactions().is_empty());
}

#[test]
fn test_add_rejects_non_positive_amounts() {
    let mut ledger = Ledger::open(MemoryGateway::new());
    for amount in [dec!(0), dec!(-50)] {
        let err = ledger.add(draft(Kind::Expense, Category::Food, amount)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Invalid(ValidationError::NonPositiveAmount)
        ));
    }
    assert!(ledger.transactions().is_empty());
}

#[test]
fn test_add_rejects_amount_over_ceiling() {
    let mut ledger = Ledger::open(MemoryGateway::new());
    let err = ledger
        .add(draft(Kind::Income, Category::Salary, dec!(10000001)))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Invalid(ValidationError::AmountTooLarge)
    ));
    assert!(ledger.transactions().is_empty());

    // The ceiling itself is allowed.
    assert!(ledger
        .add(draft(Kind::Income, Category::Salary, dec!(10000000)))
        .is_ok());
}

#[test]
fn test_add_keeps_description_verbatim() {
    // Sanitization is a display concern; storage keeps the raw text.
    let mut ledger = Ledger::open(MemoryGateway::new());
    let mut d = draft(Kind::Expense, Category::Food, dec!(1));
    d.description = "  <b>dinner</b>\u{1b}[31m  ".into();
    let txn = ledger.add(d).unwrap();
    assert_eq!(txn.description, "  <b>dinner</b>\u{1b}[31m  ");
}

#[test]
fn test_add_ids_unique_under_rapid_creation() {
    let mut ledger = Ledger::open(MemoryGateway::new());
    let mut ids = std::collections::HashSet::new();
    for _ in 0..100 {
        let txn = ledger
            .add(draft(Kind::Expense, Category::Food, dec!(1)))
            .unwrap();
        ids.insert(txn.id);
    }
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_add_with_failing_writes_keeps_memory_authoritative() {
    let mut gw = MemoryGateway::new();
    gw.fail_writes = true;
    let mut ledger = Ledger::open(gw);
    let err = ledger
        .add(draft(Kind::Income, Category::Salary, dec!(100)))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Persistence(_)));
    // The entry is still there for the rest of the session.
    assert_eq!(ledger.transactions().len(), 1);
}

// ── remove / clear ────────────────────────────────────────────

#[test]
fn test_remove_existing() {
    let mut ledger = Ledger::open(MemoryGateway::new());
    let txn = ledger
        .add(draft(Kind::Expense, Category::Food, dec!(5)))
        .unwrap();
    assert!(ledger.remove(&txn.id).unwrap());
    assert!(ledger.transactions().is_empty());
}

#[test]
fn test_remove_absent_is_a_noop() {
    let mut ledger = Ledger::open(MemoryGateway::new());
    ledger
        .add(draft(Kind::Expense, Category::Food, dec!(5)))
        .unwrap();
    assert!(!ledger.remove("no-such-id").unwrap());
    assert_eq!(ledger.transactions().len(), 1);
}

#[test]
fn test_clear_empties_the_store() {
    let mut ledger = Ledger::open(MemoryGateway::new());
    for _ in 0..3 {
        ledger
            .add(draft(Kind::Expense, Category::Food, dec!(5)))
            .unwrap();
    }
    ledger.clear().unwrap();
    assert!(ledger.transactions().is_empty());
}

// ── Persistence round-trips ───────────────────────────────────

#[test]
fn test_reload_preserves_entries_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");

    let mut ledger = Ledger::open(SqliteGateway::open(&path).unwrap());
    ledger
        .add(draft(Kind::Income, Category::Salary, dec!(3000.25)))
        .unwrap();
    ledger
        .add(draft(Kind::Expense, Category::Food, dec!(42.50)))
        .unwrap();
    ledger
        .add(draft(Kind::Expense, Category::Transport, dec!(9.99)))
        .unwrap();
    let before = ledger.transactions().to_vec();
    drop(ledger);

    let reloaded = Ledger::open(SqliteGateway::open(&path).unwrap());
    assert_eq!(reloaded.transactions(), before.as_slice());
}

#[test]
fn test_reload_after_remove_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");

    let mut ledger = Ledger::open(SqliteGateway::open(&path).unwrap());
    let keep = ledger
        .add(draft(Kind::Income, Category::Salary, dec!(100)))
        .unwrap();
    let gone = ledger
        .add(draft(Kind::Expense, Category::Food, dec!(50)))
        .unwrap();
    ledger.remove(&gone.id).unwrap();
    drop(ledger);

    let mut reloaded = Ledger::open(SqliteGateway::open(&path).unwrap());
    assert_eq!(reloaded.transactions(), &[keep]);

    reloaded.clear().unwrap();
    drop(reloaded);

    let empty = Ledger::open(SqliteGateway::open(&path).unwrap());
    assert!(empty.transactions().is_empty());
}

#[test]
fn test_limits_persist_across_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");

    let mut ledger = Ledger::open(SqliteGateway::open(&path).unwrap());
    ledger.set_limit(Category::Food, dec!(777)).unwrap();
    ledger.clear_limit(Category::Transport).unwrap();
    drop(ledger);

    let reloaded = Ledger::open(SqliteGateway::open(&path).unwrap());
    assert_eq!(reloaded.limits().get(Category::Food), Some(dec!(777)));
    assert!(reloaded.limits().get(Category::Transport).is_none());
}

// ── Limits ────────────────────────────────────────────────────

#[test]
fn test_set_limit_rejects_non_positive() {
    let mut ledger = Ledger::open(MemoryGateway::new());
    let err = ledger.set_limit(Category::Food, dec!(0)).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Invalid(ValidationError::NonPositiveLimit)
    ));
}

#[test]
fn test_clear_limit_reports_presence() {
    let mut ledger = Ledger::open(MemoryGateway::new());
    assert!(ledger.clear_limit(Category::Food).unwrap());
    assert!(!ledger.clear_limit(Category::Food).unwrap());
}

// ── Queries ───────────────────────────────────────────────────

#[test]
fn test_query_surface_end_to_end() {
    let mut ledger = Ledger::open(MemoryGateway::new());
    ledger
        .add(draft(Kind::Income, Category::Salary, dec!(20000)))
        .unwrap();
    ledger
        .add(draft(Kind::Expense, Category::Food, dec!(16000)))
        .unwrap();

    let totals = ledger.totals();
    assert_eq!(totals.income, dec!(20000));
    assert_eq!(totals.expense, dec!(16000));
    assert_eq!(totals.balance, dec!(4000));
    assert_eq!(totals.savings_rate, 20);

    assert_eq!(ledger.category_totals(), vec![(Category::Food, dec!(16000))]);

    // Default Food limit is 15000, so 16000 spent is critical.
    let alerts = ledger.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, Severity::Critical);
    assert_eq!(alerts[0].percent_used, 107);

    let advice = ledger.advice();
    assert!(advice
        .suggestions
        .iter()
        .any(|s| s.contains("Over budget in: Food")));
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("export.csv");

    let mut ledger = Ledger::open(MemoryGateway::new());
    ledger
        .add(draft(Kind::Income, Category::Salary, dec!(3000)))
        .unwrap();
    ledger
        .add(draft(Kind::Expense, Category::Food, dec!(42.50)))
        .unwrap();

    let count = ledger.export_csv(&out.display().to_string()).unwrap();
    assert_eq!(count, 2);

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "date,description,category,type,amount");
    assert!(lines[1].contains("Salary"));
    assert!(lines[2].contains("42.50"));
}
