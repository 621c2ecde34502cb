use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Category, Kind, TransactionDraft};
use crate::store::{Ledger, LedgerError};
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger) -> Result<()> {
    for warning in ledger.take_load_warnings() {
        eprintln!("Warning: {warning}");
    }

    match args[1].as_str() {
        "summary" | "s" => cli_summary(ledger),
        "list" | "ls" => cli_list(ledger),
        "add" => cli_add(&args[2..], ledger),
        "limits" => cli_limits(ledger),
        "limit" => cli_set_limit(&args[2..], ledger),
        "unlimit" => cli_clear_limit(&args[2..], ledger),
        "advice" => cli_advice(ledger),
        "export" => cli_export(&args[2..], ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("ledgertui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("LedgerTUI — local-only income/expense tracker");
    println!();
    println!("Usage: ledgertui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                  Launch interactive TUI");
    println!("  summary                                 Print totals, savings rate, and alerts");
    println!("  list                                    Print all recorded entries");
    println!("  add <income|expense> <category> <amount> <description...>");
    println!("                                          Record an entry");
    println!("  limits                                  Show budget limits and usage");
    println!("  limit <category> <amount>               Set a budget limit");
    println!("  unlimit <category>                      Remove a budget limit");
    println!("  advice                                  Print spending insights");
    println!("  export [path]                           Export entries to CSV");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
}

fn cli_summary(ledger: &mut Ledger) -> Result<()> {
    let totals = ledger.totals();

    println!("LedgerTUI");
    println!("{}", "─".repeat(44));
    println!("  Income:        {}", format_amount(totals.income));
    println!("  Expenses:      {}", format_amount(totals.expense));
    println!("  Balance:       {}", format_amount(totals.balance));
    println!("  Savings rate:  {}%", totals.savings_rate);
    println!("  Entries:       {}", ledger.transactions().len());

    let spending = ledger.category_totals();
    if !spending.is_empty() {
        println!();
        println!("Spending by Category:");
        for (category, amount) in &spending {
            println!("  {:<16} {}", category.as_str(), format_amount(*amount));
        }
    }

    let alerts = ledger.alerts();
    if !alerts.is_empty() {
        println!();
        println!("Budget alerts:");
        for alert in &alerts {
            println!(
                "  [{}] {}: {} of {} ({}%)",
                alert.severity,
                alert.category,
                format_amount(alert.spent),
                format_amount(alert.limit),
                alert.percent_used,
            );
        }
    }

    Ok(())
}

fn cli_list(ledger: &mut Ledger) -> Result<()> {
    let txns = ledger.transactions();
    if txns.is_empty() {
        println!("No entries recorded");
        return Ok(());
    }

    println!(
        "{:<12} {:<32} {:<14} {:<9} Amount",
        "Date", "Description", "Category", "Type"
    );
    println!("{}", "─".repeat(82));
    for txn in txns.iter().rev() {
        let sign = if txn.is_income() { "+" } else { "-" };
        println!(
            "{:<12} {:<32} {:<14} {:<9} {sign}{}",
            txn.date(),
            crate::ui::util::sanitize(&txn.description, 32),
            txn.category.as_str(),
            txn.kind.as_str(),
            format_amount(txn.amount),
        );
    }
    Ok(())
}

fn cli_add(args: &[String], ledger: &mut Ledger) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: ledgertui add <income|expense> <category> <amount> <description...>");
    }

    let kind = Kind::parse(&args[0])
        .ok_or_else(|| anyhow::anyhow!("Type must be 'income' or 'expense', got '{}'", args[0]))?;
    let category = Category::parse(&args[1]);
    let amount = Decimal::from_str(&args[2])
        .map_err(|_| anyhow::anyhow!("'{}' is not a valid amount", args[2]))?;
    let description = args[3..].join(" ");

    match ledger.add(TransactionDraft {
        description,
        amount,
        category,
        kind,
    }) {
        Ok(txn) => {
            println!(
                "Recorded {} of {} in {}",
                txn.kind,
                format_amount(txn.amount),
                txn.category
            );
            Ok(())
        }
        Err(err @ LedgerError::Invalid(_)) => Err(err.into()),
        Err(LedgerError::Persistence(e)) => {
            eprintln!("Recorded in this session, but saving failed: {e}");
            Ok(())
        }
    }
}

fn cli_limits(ledger: &mut Ledger) -> Result<()> {
    let limits = ledger.limits();
    if limits.is_empty() {
        println!("No budget limits configured");
        return Ok(());
    }

    let spending = ledger.category_totals();
    println!("{:<16} {:<14} {:<14} Used", "Category", "Limit", "Spent");
    println!("{}", "─".repeat(54));
    for (category, limit) in limits.iter() {
        let spent = spending
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, s)| *s)
            .unwrap_or(Decimal::ZERO);
        let percent = crate::stats::ratio_percent(spent, limit);
        println!(
            "{:<16} {:<14} {:<14} {percent}%",
            category.as_str(),
            format_amount(limit),
            format_amount(spent),
        );
    }
    Ok(())
}

fn cli_set_limit(args: &[String], ledger: &mut Ledger) -> Result<()> {
    if args.len() != 2 {
        anyhow::bail!("Usage: ledgertui limit <category> <amount>");
    }
    let category = Category::parse(&args[0]);
    let amount = Decimal::from_str(&args[1])
        .map_err(|_| anyhow::anyhow!("'{}' is not a valid amount", args[1]))?;
    ledger.set_limit(category, amount)?;
    println!("Limit for {} set to {}", category, format_amount(amount));
    Ok(())
}

fn cli_clear_limit(args: &[String], ledger: &mut Ledger) -> Result<()> {
    if args.len() != 1 {
        anyhow::bail!("Usage: ledgertui unlimit <category>");
    }
    let category = Category::parse(&args[0]);
    if ledger.clear_limit(category)? {
        println!("Limit for {category} removed");
    } else {
        println!("No limit was set for {category}");
    }
    Ok(())
}

fn cli_advice(ledger: &mut Ledger) -> Result<()> {
    let advice = ledger.advice();
    println!("{}", advice.summary);
    for suggestion in &advice.suggestions {
        println!("  • {suggestion}");
    }
    Ok(())
}

fn cli_export(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let output_path = args
        .first()
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/ledgertui-export.csv")
        });

    let count = ledger.export_csv(&output_path)?;
    if count == 0 {
        println!("No entries to export");
    } else {
        println!("Exported {count} entries to {output_path}");
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
