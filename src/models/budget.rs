use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerError;

/// Spending ceiling for one category. At most one per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLimit {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub limit_amount: Decimal,
}

impl BudgetLimit {
    pub fn new(category: &str, limit_amount: Decimal) -> Result<Self, LedgerError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::validation("category", "must not be empty"));
        }
        if limit_amount <= Decimal::ZERO {
            return Err(LedgerError::validation(
                "limit_amount",
                format!("must be greater than zero, got {limit_amount}"),
            ));
        }
        Ok(Self {
            category: category.to_string(),
            limit_amount,
        })
    }
}
