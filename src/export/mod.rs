use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::models::Transaction;
use crate::period::Period;

pub const CSV_HEADER: [&str; 6] = ["ID", "Date", "Type", "Category", "Amount", "Description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn render(&self, transactions: &[Transaction]) -> Result<String, LedgerError> {
        match self {
            Self::Csv => to_csv(transactions),
            Self::Json => to_json(transactions),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "CSV"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(LedgerError::validation(
                "format",
                format!("expected csv or json, got \"{other}\""),
            )),
        }
    }
}

/// Render transactions as CSV with a header row.
///
/// Amounts always carry two fraction digits. Fields containing a comma,
/// quote or line break are quoted.
pub fn to_csv(transactions: &[Transaction]) -> Result<String, LedgerError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;
    for txn in transactions {
        let id = txn.id.map(|id| id.to_string()).unwrap_or_default();
        wtr.write_record([
            id.as_str(),
            txn.date_string().as_str(),
            txn.kind.as_str(),
            txn.category.as_str(),
            two_places(txn.amount).as_str(),
            txn.description.as_str(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| LedgerError::Serialization(e.error().to_string()))?;
    String::from_utf8(bytes).map_err(|e| LedgerError::Serialization(e.to_string()))
}

/// `amount` with exactly two fraction digits, halves rounded away from zero.
pub fn two_places(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Render transactions as a pretty-printed JSON array.
pub fn to_json(transactions: &[Transaction]) -> Result<String, LedgerError> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

/// Default file name for an export, e.g. `transactions_2024_01.csv`.
pub fn suggested_file_name(period: &Period, format: ExportFormat) -> String {
    format!("transactions_{}.{}", period.file_stem(), format.extension())
}
