use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::format_amount;
use crate::models::{Category, Kind, TransactionDraft};
use crate::store::{Ledger, LedgerError};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit LedgerTUI", cmd_quit, r);
    register_command!("quit", "Quit LedgerTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("l", "Go to Limits", cmd_limits, r);
    register_command!("limits", "Go to Limits", cmd_limits, r);
    register_command!("a", "Go to Advisor", cmd_advisor, r);
    register_command!("advisor", "Go to Advisor", cmd_advisor, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "income",
        "Record income (e.g. :income Salary 3000 July paycheck)",
        cmd_income,
        r
    );
    register_command!(
        "expense",
        "Record expense (e.g. :expense Food 42.50 Groceries)",
        cmd_expense,
        r
    );
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!("clear", "Delete ALL transactions", cmd_clear, r);
    register_command!(
        "limit",
        "Set budget limit (e.g. :limit Food 15000)",
        cmd_limit,
        r
    );
    register_command!(
        "unlimit",
        "Remove budget limit (e.g. :unlimit Food)",
        cmd_unlimit,
        r
    );
    register_command!(
        "search",
        "Search transactions (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search transactions (e.g. :s coffee)", cmd_search, r);
    register_command!(
        "export",
        "Export entries to CSV (e.g. :export ~/ledger.csv)",
        cmd_export,
        r
    );
    register_command!("categories", "List known categories", cmd_categories, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn switch(app: &mut App, ledger: &mut Ledger, screen: Screen) {
    app.screen = screen;
    app.refresh(ledger);
}

fn cmd_dashboard(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    switch(app, ledger, Screen::Dashboard);
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    switch(app, ledger, Screen::Transactions);
    Ok(())
}

fn cmd_limits(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    switch(app, ledger, Screen::Limits);
    Ok(())
}

fn cmd_advisor(_args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    switch(app, ledger, Screen::Advisor);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_income(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    add_entry(Kind::Income, args, app, ledger)
}

fn cmd_expense(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    add_entry(Kind::Expense, args, app, ledger)
}

fn add_entry(kind: Kind, args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let mut parts = args.splitn(3, ' ');
    let (Some(category_arg), Some(amount_arg)) = (parts.next(), parts.next()) else {
        app.set_status(format!(
            "Usage: :{} <category> <amount> <description>",
            kind.as_str()
        ));
        return Ok(());
    };

    let category = Category::parse(category_arg);
    let Ok(amount) = Decimal::from_str(amount_arg) else {
        app.set_status(format!("'{amount_arg}' is not a valid amount"));
        return Ok(());
    };
    let description = parts.next().unwrap_or("").to_string();

    match ledger.add(TransactionDraft {
        description,
        amount,
        category,
        kind,
    }) {
        Ok(txn) => {
            app.refresh(ledger);
            app.set_status(format!(
                "Recorded {} of {} in {}",
                txn.kind,
                format_amount(txn.amount),
                txn.category
            ));
        }
        Err(err @ LedgerError::Invalid(_)) => {
            app.set_status(format!("Not recorded: {err}"));
        }
        Err(LedgerError::Persistence(e)) => {
            app.refresh(ledger);
            app.set_status(format!("Recorded, but saving failed: {e}"));
        }
    }
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions {
        app.set_status("Switch to the Transactions screen to delete an entry");
        return Ok(());
    }
    let Some((id, description)) = app
        .selected_transaction()
        .map(|t| (t.id.clone(), t.description.clone()))
    else {
        app.set_status("No transaction selected");
        return Ok(());
    };
    app.confirm_message = format!("Delete '{}'?", super::util::sanitize(&description, 40));
    app.pending_action = Some(PendingAction::DeleteTransaction { id, description });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.transaction_count == 0 {
        app.set_status("Nothing to clear");
        return Ok(());
    }
    app.confirm_message = format!("Delete all {} transactions?", app.transaction_count);
    app.pending_action = Some(PendingAction::ClearAll);
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_limit(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let mut parts = args.split_whitespace();
    let (Some(category_arg), Some(amount_arg)) = (parts.next(), parts.next()) else {
        app.set_status("Usage: :limit <category> <amount>");
        return Ok(());
    };
    let category = Category::parse(category_arg);
    let Ok(amount) = Decimal::from_str(amount_arg) else {
        app.set_status(format!("'{amount_arg}' is not a valid amount"));
        return Ok(());
    };
    match ledger.set_limit(category, amount) {
        Ok(()) => {
            app.refresh(ledger);
            app.set_status(format!(
                "Limit for {category} set to {}",
                format_amount(amount)
            ));
        }
        Err(err @ LedgerError::Invalid(_)) => app.set_status(format!("Not set: {err}")),
        Err(LedgerError::Persistence(e)) => {
            app.refresh(ledger);
            app.set_status(format!("Limit set, but saving failed: {e}"));
        }
    }
    Ok(())
}

fn cmd_unlimit(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let name = args.trim();
    if name.is_empty() {
        app.set_status("Usage: :unlimit <category>");
        return Ok(());
    }
    let category = Category::parse(name);
    match ledger.clear_limit(category) {
        Ok(true) => {
            app.refresh(ledger);
            app.set_status(format!("Limit for {category} removed"));
        }
        Ok(false) => app.set_status(format!("No limit was set for {category}")),
        Err(e) => {
            app.refresh(ledger);
            app.set_status(format!("Limit removed, but saving failed: {e}"));
        }
    }
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Transactions;
    app.transaction_index = 0;
    app.transaction_scroll = 0;
    app.refresh(ledger);
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/ledgertui-export.csv")
    } else {
        crate::run::cli::shellexpand(args)
    };
    match ledger.export_csv(&path) {
        Ok(count) => app.set_status(format!("Exported {count} entries to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e}")),
    }
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
    app.set_status(format!("Categories: {}", names.join(", ")));
    Ok(())
}
