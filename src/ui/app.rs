use rust_decimal::Decimal;

use crate::advice::{Advice, Tier};
use crate::alerts::{Alert, Severity};
use crate::models::{Category, Transaction};
use crate::stats::{self, Totals};
use crate::store::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Limits,
    Advisor,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Limits,
            Self::Advisor,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Limits => write!(f, "Limits"),
            Self::Advisor => write!(f, "Advisor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, description: String },
    ClearAll,
}

/// One row of the Limits screen: a configured limit joined with current
/// spending and its alert state.
#[derive(Debug, Clone)]
pub(crate) struct LimitRow {
    pub(crate) category: Category,
    pub(crate) limit: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) percent_used: i64,
    pub(crate) severity: Option<Severity>,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Cached query results, re-read from the ledger after every mutation
    pub(crate) totals: Totals,
    pub(crate) category_totals: Vec<(Category, Decimal)>,
    pub(crate) alerts: Vec<Alert>,
    pub(crate) advice: Advice,

    // Transactions view: newest first, filtered by the live search
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_count: usize,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Limits view
    pub(crate) limit_rows: Vec<LimitRow>,
    pub(crate) limit_index: usize,
    pub(crate) limit_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            status_message: String::new(),
            show_help: false,

            totals: Totals {
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
                balance: Decimal::ZERO,
                savings_rate: 0,
            },
            category_totals: Vec::new(),
            alerts: Vec::new(),
            advice: Advice {
                tier: Tier::Empty,
                summary: String::new(),
                suggestions: Vec::new(),
            },

            transactions: Vec::new(),
            transaction_count: 0,
            transaction_index: 0,
            transaction_scroll: 0,

            limit_rows: Vec::new(),
            limit_index: 0,
            limit_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Re-query everything the screens display. Called once at startup and
    /// after every ledger mutation.
    pub(crate) fn refresh(&mut self, ledger: &Ledger) {
        let all = ledger.transactions();
        self.transaction_count = all.len();

        let filter = self.search_input.to_lowercase();
        self.transactions = all
            .iter()
            .rev()
            .filter(|t| {
                filter.is_empty()
                    || t.description.to_lowercase().contains(&filter)
                    || t.category.as_str().to_lowercase().contains(&filter)
            })
            .cloned()
            .collect();
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }

        self.totals = ledger.totals();
        self.category_totals = ledger.category_totals();
        self.alerts = ledger.alerts();
        self.advice = ledger.advice();

        self.limit_rows = ledger
            .limits()
            .iter()
            .map(|(category, limit)| {
                let spent = self
                    .category_totals
                    .iter()
                    .find(|(c, _)| *c == category)
                    .map(|(_, s)| *s)
                    .unwrap_or(Decimal::ZERO);
                let severity = self
                    .alerts
                    .iter()
                    .find(|a| a.category == category)
                    .map(|a| a.severity);
                LimitRow {
                    category,
                    limit,
                    spent,
                    percent_used: stats::ratio_percent(spent, limit),
                    severity,
                }
            })
            .collect();
        if self.limit_index >= self.limit_rows.len() {
            self.limit_index = self.limit_rows.len().saturating_sub(1);
        }
        if self.limit_scroll > self.limit_index {
            self.limit_scroll = self.limit_index;
        }
    }

    /// Transaction under the cursor, if any.
    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
