mod budget;
mod transaction;

pub use budget::BudgetLimit;
pub use transaction::{parse_date, NewTransaction, Transaction, TransactionType, DATE_FORMAT};

#[cfg(test)]
mod tests;
