use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use crate::db::{Database, TransactionFilter};
use crate::error::LedgerError;
use crate::export::{suggested_file_name, ExportFormat};
use crate::models::{NewTransaction, TransactionType};
use crate::period::Period;
use crate::report::{budget_status, summarize};
use crate::util::{format_amount, truncate};

const FLAGS_WITH_VALUES: &[&str] = &["--date", "--desc", "--category", "--out"];

pub(super) fn add(args: &[String], db: &Database, out: &mut impl Write) -> Result<()> {
    let positional = positional(args);
    let [kind, category, amount] = positional.as_slice() else {
        anyhow::bail!(
            "Usage: finledger add <income|expense> <category> <amount> [--date YYYY-MM-DD] [--desc TEXT]"
        );
    };

    let kind = TransactionType::parse(kind).ok_or_else(|| {
        LedgerError::validation("type", format!("expected income or expense, got \"{kind}\""))
    })?;
    let mut new = NewTransaction::new(kind, *category, parse_amount("amount", amount)?);
    if let Some(date) = flag(args, "--date") {
        new = new.on(date);
    }
    if let Some(description) = flag(args, "--desc") {
        new = new.described(description);
    }

    let id = db.add_transaction(new)?;
    writeln!(out, "Added transaction #{id}")?;
    Ok(())
}

pub(super) fn list(args: &[String], db: &Database, out: &mut impl Write) -> Result<()> {
    let period = period_arg(args, 0)?;
    let mut filter = TransactionFilter::for_period(&period)?;
    if let Some(category) = flag(args, "--category") {
        filter = filter.with_category(category.trim());
    }

    let txns = db.list_transactions(&filter)?;
    if txns.is_empty() {
        writeln!(out, "No transactions for {period}")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<5} {:<10} {:<8} {:<20} {:>12}  Description",
        "ID", "Date", "Type", "Category", "Amount"
    )?;
    writeln!(out, "{}", "─".repeat(72))?;
    for txn in &txns {
        writeln!(
            out,
            "{:<5} {:<10} {:<8} {:<20} {:>12}  {}",
            txn.id.unwrap_or(0),
            txn.date_string(),
            txn.kind,
            truncate(&txn.category, 20),
            format_amount(txn.signed_amount()),
            truncate(&txn.description, 40),
        )?;
    }
    Ok(())
}

pub(super) fn stats(args: &[String], db: &Database, out: &mut impl Write) -> Result<()> {
    let period = period_arg(args, 0)?;
    let txns = db.list_transactions(&TransactionFilter::for_period(&period)?)?;
    let summary = summarize(&txns);

    writeln!(out, "Statistics for {period}")?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Income:   {:>14}", format_amount(summary.total_income))?;
    writeln!(out, "  Expenses: {:>14}", format_amount(summary.total_expense))?;
    writeln!(out, "  Balance:  {:>14}", format_amount(summary.balance()))?;
    writeln!(
        out,
        "  Records:  {:>14}",
        format!("{} of {}", txns.len(), db.transaction_count()?)
    )?;
    writeln!(out)?;

    if summary.is_empty() {
        writeln!(out, "No data to display")?;
        return Ok(());
    }

    writeln!(out, "{:<8} {:<24} {:>14}", "Type", "Category", "Total")?;
    for group in summary.groups() {
        writeln!(
            out,
            "{:<8} {:<24} {:>14}",
            group.kind,
            truncate(&group.category, 24),
            format_amount(group.total)
        )?;
    }
    Ok(())
}

pub(super) fn report(args: &[String], db: &Database, out: &mut impl Write) -> Result<()> {
    let Some(month) = positional(args).first().copied() else {
        anyhow::bail!("Usage: finledger report <YYYY-MM>");
    };
    let period = Period::from_str(month)?;
    if !matches!(period, Period::Month(..)) {
        return Err(LedgerError::InvalidPeriod(format!(
            "report needs a month as YYYY-MM, got \"{month}\""
        ))
        .into());
    }

    let summary = summarize(&db.list_transactions(&TransactionFilter::for_period(&period)?)?);
    writeln!(out, "Report for {period}:")?;
    writeln!(out, "  Income:   {}", format_amount(summary.total_income))?;
    writeln!(out, "  Expenses: {}", format_amount(summary.total_expense))?;
    writeln!(out, "  Balance:  {}", format_amount(summary.balance()))?;
    Ok(())
}

pub(super) fn budget(args: &[String], db: &Database, out: &mut impl Write) -> Result<()> {
    if args.first().map(String::as_str) == Some("set") {
        let positional = positional(&args[1..]);
        let [category, limit] = positional.as_slice() else {
            anyhow::bail!("Usage: finledger budget set <category> <limit>");
        };
        let limit = parse_amount("limit_amount", limit)?;
        db.upsert_budget_limit(category, limit)?;
        writeln!(out, "Budget for {} set to {}", category.trim(), format_amount(limit))?;
        return Ok(());
    }

    let limits = db.list_budget_limits()?;
    if limits.is_empty() {
        writeln!(out, "No budget limits. Add one with: finledger budget set <category> <limit>")?;
        return Ok(());
    }

    let period = match positional(args).first() {
        Some(p) => Period::from_str(p)?,
        None => current_month(),
    };
    let txns = db.list_transactions(&TransactionFilter::for_period(&period)?)?;
    let statuses = budget_status(&summarize(&txns), &limits);

    writeln!(out, "Budgets for {period}")?;
    writeln!(
        out,
        "{:<24} {:>12} {:>12} {:>12}",
        "Category", "Limit", "Spent", "Remaining"
    )?;
    writeln!(out, "{}", "─".repeat(63))?;
    for status in &statuses {
        let marker = if status.over_budget() { "  over" } else { "" };
        writeln!(
            out,
            "{:<24} {:>12} {:>12} {:>12}{marker}",
            truncate(&status.category, 24),
            format_amount(status.limit),
            format_amount(status.spent),
            format_amount(status.remaining),
        )?;
    }
    Ok(())
}

pub(super) fn export(args: &[String], db: &Database, out: &mut impl Write) -> Result<()> {
    let positional = positional(args);
    let Some(format) = positional.first() else {
        anyhow::bail!("Usage: finledger export <csv|json> [PERIOD] [--out PATH]");
    };
    let format = ExportFormat::from_str(format)?;
    let period = match positional.get(1) {
        Some(p) => Period::from_str(p)?,
        None => Period::AllTime,
    };

    let txns = db.list_transactions(&TransactionFilter::for_period(&period)?)?;
    if txns.is_empty() {
        writeln!(out, "No data to export for {period}")?;
        return Ok(());
    }

    let data = format.render(&txns)?;
    let path = flag(args, "--out")
        .map(|p| PathBuf::from(shellexpand(p)))
        .unwrap_or_else(|| PathBuf::from(suggested_file_name(&period, format)));
    std::fs::write(&path, data)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    tracing::info!(count = txns.len(), path = %path.display(), %format, "exported transactions");
    writeln!(
        out,
        "Exported {} transactions as {format} to {}",
        txns.len(),
        path.display()
    )?;
    Ok(())
}

pub(super) fn years(db: &Database, out: &mut impl Write) -> Result<()> {
    let years = db.list_years()?;
    if years.is_empty() {
        writeln!(out, "No transactions")?;
    }
    for year in years {
        writeln!(out, "{year}")?;
    }
    Ok(())
}

// ── Argument helpers ─────────────────────────────────────────

/// Value following `name`, e.g. `--date 2024-01-05`.
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// Fail on any `--name` this CLI does not know, so its value is not taken
/// for a positional argument.
pub(super) fn reject_unknown_flags(args: &[String]) -> Result<()> {
    if let Some(unknown) = args
        .iter()
        .find(|a| a.starts_with("--") && !FLAGS_WITH_VALUES.contains(&a.as_str()))
    {
        anyhow::bail!("Unknown option: {unknown} (expected one of {})", FLAGS_WITH_VALUES.join(", "));
    }
    Ok(())
}

/// Arguments that are neither flags nor flag values.
fn positional(args: &[String]) -> Vec<&str> {
    let mut result = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if FLAGS_WITH_VALUES.contains(&arg.as_str()) {
            iter.next();
        } else {
            result.push(arg.as_str());
        }
    }
    result
}

fn period_arg(args: &[String], index: usize) -> Result<Period, LedgerError> {
    positional(args)
        .get(index)
        .map_or(Ok(Period::AllTime), |p| Period::from_str(p))
}

fn parse_amount(field: &'static str, text: &str) -> Result<Decimal, LedgerError> {
    Decimal::from_str(text.trim())
        .map_err(|_| LedgerError::validation(field, format!("\"{text}\" is not a number")))
}

fn current_month() -> Period {
    use chrono::Datelike;
    let today = chrono::Local::now().date_naive();
    Period::Month(today.year(), today.month())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
