mod cli;

use anyhow::Result;
use std::io::Write;

use crate::db::Database;
use crate::error::LedgerError;

/// Dispatch one command line. `args[0]` is the program name.
pub(crate) fn as_cli(args: &[String], db: &Database, out: &mut impl Write) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage(out)?;
        return Ok(());
    };
    let rest = &args[2..];
    if !matches!(command.as_str(), "--help" | "-h" | "help" | "--version" | "-V" | "version") {
        cli::reject_unknown_flags(rest)?;
    }

    let result = match command.as_str() {
        "add" | "a" => cli::add(rest, db, out),
        "list" | "ls" => cli::list(rest, db, out),
        "stats" | "s" => cli::stats(rest, db, out),
        "report" => cli::report(rest, db, out),
        "budget" | "b" => cli::budget(rest, db, out),
        "export" => cli::export(rest, db, out),
        "years" => cli::years(db, out),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "finledger {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    };

    // An incomplete period is a prompt, not a failure.
    match result {
        Err(e)
            if e.downcast_ref::<LedgerError>()
                .is_some_and(LedgerError::is_pending_input) =>
        {
            writeln!(out, "{e}")?;
            writeln!(out, "Use all, YYYY, YYYY-MM or YYYY-MM-DD..YYYY-MM-DD")?;
            Ok(())
        }
        other => other,
    }
}

fn print_usage(out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "finledger: local income/expense ledger

Usage: finledger <command>

Commands:
  add <income|expense> <category> <amount>   Record a transaction
    --date <YYYY-MM-DD>                       Transaction date (default: today)
    --desc <text>                             Description
  list [PERIOD]                               List transactions
    --category <name>                         Only this category
  stats [PERIOD]                              Totals and per-category sums
  report <YYYY-MM>                            Income, expenses and balance for a month
  budget set <category> <limit>               Set or replace a category limit
  budget [PERIOD]                             Limits against spending (default: this month)
  export <csv|json> [PERIOD]                  Export transactions to a file
    --out <path>                              Output file (default: transactions_<period>.<ext>)
  years                                       Years that have transactions
  --help, -h                                  Show this help
  --version, -V                               Show version

PERIOD is all (default), YYYY, YYYY-MM or YYYY-MM-DD..YYYY-MM-DD."
    )?;
    Ok(())
}
