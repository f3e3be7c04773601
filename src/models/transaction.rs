use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Contribution of this transaction to a balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// The stored `YYYY-MM-DD` form of the date.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// User-entered values for a transaction that has not been checked yet.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// `None` or blank means today.
    pub date: Option<String>,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub kind: TransactionType,
}

impl NewTransaction {
    pub fn new(kind: TransactionType, category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date: None,
            category: category.into(),
            amount,
            description: String::new(),
            kind,
        }
    }

    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check every field and produce the row to persist.
    ///
    /// Dates must be well-formed `YYYY-MM-DD`; an absent or blank date
    /// becomes today's local date.
    pub fn validate(self) -> Result<Transaction, LedgerError> {
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::validation(
                "amount",
                format!("must be greater than zero, got {}", self.amount),
            ));
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(LedgerError::validation("category", "must not be empty"));
        }

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => chrono::Local::now().date_naive(),
            Some(text) => parse_date(text).ok_or_else(|| {
                LedgerError::validation("date", format!("\"{text}\" is not a YYYY-MM-DD date"))
            })?,
        };

        Ok(Transaction {
            id: None,
            date,
            category: category.to_string(),
            amount: self.amount,
            description: self.description.trim().to_string(),
            kind: self.kind,
        })
    }
}

/// Strict `YYYY-MM-DD` parsing.
///
/// chrono accepts unpadded fields such as `2024-1-5`, which would break the
/// string ordering the store filters on, so the length is checked as well.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}
