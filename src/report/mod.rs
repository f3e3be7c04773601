use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{BudgetLimit, Transaction, TransactionType};

/// Totals for a set of transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub by_type_and_category: BTreeMap<(TransactionType, String), Decimal>,
}

/// One row of the grouped statistics table.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub kind: TransactionType,
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    /// Negative once the limit is exceeded.
    pub remaining: Decimal,
}

impl BudgetStatus {
    pub fn over_budget(&self) -> bool {
        self.spent > self.limit
    }
}

/// Sum amounts per type and per (type, category).
///
/// Every row of a type adds to that type's total; an empty slice gives an
/// all-zero summary.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary::default();
    for txn in transactions {
        match txn.kind {
            TransactionType::Income => summary.total_income += txn.amount,
            TransactionType::Expense => summary.total_expense += txn.amount,
        }
        *summary
            .by_type_and_category
            .entry((txn.kind, txn.category.clone()))
            .or_insert(Decimal::ZERO) += txn.amount;
    }
    summary
}

impl Summary {
    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }

    pub fn is_empty(&self) -> bool {
        self.by_type_and_category.is_empty()
    }

    /// Groups in display order: income before expense, then largest total
    /// first, then category name.
    pub fn groups(&self) -> Vec<CategoryTotal> {
        let mut groups: Vec<CategoryTotal> = self
            .by_type_and_category
            .iter()
            .map(|((kind, category), total)| CategoryTotal {
                kind: *kind,
                category: category.clone(),
                total: *total,
            })
            .collect();
        groups.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| b.total.cmp(&a.total))
                .then_with(|| a.category.cmp(&b.category))
        });
        groups
    }

    /// Expense total for one category, zero if it has none.
    pub fn spent_on(&self, category: &str) -> Decimal {
        self.by_type_and_category
            .get(&(TransactionType::Expense, category.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Compare each budget limit with the expenses recorded in `summary`.
pub fn budget_status(summary: &Summary, limits: &[BudgetLimit]) -> Vec<BudgetStatus> {
    let mut statuses: Vec<BudgetStatus> = limits
        .iter()
        .map(|limit| {
            let spent = summary.spent_on(&limit.category);
            BudgetStatus {
                category: limit.category.clone(),
                limit: limit.limit_amount,
                spent,
                remaining: limit.limit_amount - spent,
            }
        })
        .collect();
    statuses.sort_by(|a, b| a.category.cmp(&b.category));
    statuses
}

#[cfg(test)]
mod tests;
