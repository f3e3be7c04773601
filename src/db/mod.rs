mod schema;

use rusqlite::types::ToSql;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::models::*;
use crate::period::{DateRange, Period};

type Result<T> = std::result::Result<T, LedgerError>;

/// Restricts [Database::list_transactions]. The default matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub range: Option<DateRange>,
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn for_period(period: &Period) -> Result<Self> {
        Ok(Self {
            range: period.resolve()?,
            category: None,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.range.map_or(true, |range| range.contains(txn.date))
            && self.category.as_ref().map_or(true, |c| *c == txn.category)
    }
}

/// The ledger store: one SQLite connection holding transactions and budget
/// limits.
///
/// The connection is not `Sync`. Callers that share a `Database` between
/// threads must put it behind a `Mutex`, which also serializes writes.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(LedgerError::persistence("open database"))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(LedgerError::persistence("set database pragmas"))?;
        tracing::debug!(path = %path.display(), "opened ledger database");
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(LedgerError::persistence("open database"))?;
        let db = Self { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    /// Create both tables if they are missing. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(schema::SCHEMA)
            .map_err(LedgerError::persistence("create ledger tables"))
    }

    // ── Transactions ──────────────────────────────────────────

    /// Validate and append one transaction, returning its new id.
    pub fn add_transaction(&self, new: NewTransaction) -> Result<i64> {
        let txn = new.validate()?;
        let amount = storable_amount("amount", txn.amount)?;

        self.conn
            .execute(
                "INSERT INTO transactions (date, category, amount, description, type)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    txn.date_string(),
                    txn.category,
                    amount,
                    txn.description,
                    txn.kind.as_str(),
                ],
            )
            .map_err(LedgerError::persistence("add transaction"))?;

        let id = self.conn.last_insert_rowid();
        tracing::info!(
            id,
            date = %txn.date,
            kind = %txn.kind,
            category = %txn.category,
            amount = %txn.amount,
            "added transaction"
        );
        Ok(id)
    }

    /// Transactions matching `filter`, oldest first.
    ///
    /// Rows that cannot be decoded are logged and left out rather than
    /// failing the whole listing.
    pub fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut sql = format!(
            "SELECT {} FROM transactions WHERE 1=1",
            schema::TRANSACTION_COLUMNS
        );
        let mut param_values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(range) = &filter.range {
            let (start, end) = range.bounds();
            sql.push_str(&format!(
                " AND date BETWEEN ?{} AND ?{}",
                param_values.len() + 1,
                param_values.len() + 2
            ));
            param_values.push(Box::new(start));
            param_values.push(Box::new(end));
        }
        if let Some(category) = &filter.category {
            sql.push_str(&format!(" AND category = ?{}", param_values.len() + 1));
            param_values.push(Box::new(category.clone()));
        }

        sql.push_str(" ORDER BY date ASC, id ASC");

        let params_ref: Vec<&dyn ToSql> = param_values.iter().map(|p| p.as_ref()).collect();

        let operation = "list transactions";
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(LedgerError::persistence(operation))?;
        let rows = stmt
            .query_map(params_ref.as_slice(), |row| {
                Ok(RawTransaction {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    category: row.get(2)?,
                    amount: row.get(3)?,
                    description: row.get(4)?,
                    kind: row.get(5)?,
                })
            })
            .map_err(LedgerError::persistence(operation))?;

        let mut transactions = Vec::new();
        for row in rows {
            let decoded = row
                .map_err(|e| e.to_string())
                .and_then(RawTransaction::decode);
            match decoded {
                Ok(txn) if filter.matches(&txn) => transactions.push(txn),
                Ok(txn) => tracing::warn!(id = ?txn.id, date = %txn.date, "skipping row outside filter"),
                Err(reason) => tracing::warn!(%reason, "skipping unreadable transaction row"),
            }
        }
        tracing::debug!(count = transactions.len(), ?filter, "listed transactions");
        Ok(transactions)
    }

    pub fn transaction_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
            .map_err(LedgerError::persistence("count transactions"))
    }

    /// Distinct years that have transactions, newest first.
    pub fn list_years(&self) -> Result<Vec<i32>> {
        let operation = "list transaction years";
        let mut stmt = self
            .conn
            .prepare(
                "SELECT DISTINCT substr(date, 1, 4) FROM transactions
                 WHERE date IS NOT NULL
                 ORDER BY 1 DESC",
            )
            .map_err(LedgerError::persistence(operation))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(LedgerError::persistence(operation))?;

        let mut years = Vec::new();
        for row in rows {
            let year = row
                .map_err(|e| e.to_string())
                .and_then(|text| text.parse::<i32>().map_err(|e| format!("\"{text}\": {e}")));
            match year {
                Ok(year) => years.push(year),
                Err(reason) => tracing::warn!(%reason, "skipping unreadable transaction year"),
            }
        }
        Ok(years)
    }

    // ── Budget limits ─────────────────────────────────────────

    /// Set the limit for a category, replacing any existing one.
    pub fn upsert_budget_limit(&self, category: &str, limit_amount: Decimal) -> Result<()> {
        let limit = BudgetLimit::new(category, limit_amount)?;
        let amount = storable_amount("limit_amount", limit.limit_amount)?;

        self.conn
            .execute(
                "INSERT INTO budget_limits (category, limit_amount)
                 VALUES (?1, ?2)
                 ON CONFLICT(category) DO UPDATE SET limit_amount = excluded.limit_amount",
                params![limit.category, amount],
            )
            .map_err(LedgerError::persistence("save budget limit"))?;

        tracing::info!(category = %limit.category, limit = %limit.limit_amount, "saved budget limit");
        Ok(())
    }

    pub fn list_budget_limits(&self) -> Result<Vec<BudgetLimit>> {
        let operation = "list budget limits";
        let mut stmt = self
            .conn
            .prepare("SELECT category, limit_amount FROM budget_limits ORDER BY category")
            .map_err(LedgerError::persistence(operation))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<f64>>(1)?,
                ))
            })
            .map_err(LedgerError::persistence(operation))?;

        let mut limits = Vec::new();
        for row in rows {
            let decoded = row.map_err(|e| e.to_string()).and_then(|(category, amount)| {
                let category = category.ok_or("category is NULL")?;
                let amount = decimal_from_f64(amount.ok_or("limit_amount is NULL")?)?;
                BudgetLimit::new(&category, amount).map_err(|e| e.to_string())
            });
            match decoded {
                Ok(limit) => limits.push(limit),
                Err(reason) => tracing::warn!(%reason, "skipping unreadable budget limit row"),
            }
        }
        Ok(limits)
    }
}

/// A `transactions` row before its columns have been checked.
struct RawTransaction {
    id: i64,
    date: Option<String>,
    category: Option<String>,
    amount: Option<f64>,
    description: Option<String>,
    kind: Option<String>,
}

impl RawTransaction {
    fn decode(self) -> std::result::Result<Transaction, String> {
        let id = self.id;
        let fail = |what: &str| format!("row {id}: {what}");

        let date_text = self.date.ok_or_else(|| fail("date is NULL"))?;
        let date =
            parse_date(&date_text).ok_or_else(|| fail(&format!("bad date \"{date_text}\"")))?;

        let category = self
            .category
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| fail("category is empty"))?;

        let amount = self.amount.ok_or_else(|| fail("amount is NULL"))?;
        let amount = decimal_from_f64(amount).map_err(|e| fail(&e))?;
        if amount <= Decimal::ZERO {
            return Err(fail(&format!("non-positive amount {amount}")));
        }

        let kind_text = self.kind.ok_or_else(|| fail("type is NULL"))?;
        let kind = TransactionType::parse(&kind_text)
            .ok_or_else(|| fail(&format!("unknown type \"{kind_text}\"")))?;

        Ok(Transaction {
            id: Some(id),
            date,
            category,
            amount,
            description: self.description.unwrap_or_default(),
            kind,
        })
    }
}

/// The `f64` written to a REAL column, refused when reading it back would
/// not give `value` again.
fn storable_amount(field: &'static str, value: Decimal) -> Result<f64> {
    let stored = f64::from_str(&value.to_string())
        .map_err(|e| LedgerError::validation(field, format!("{value}: {e}")))?;
    match decimal_from_f64(stored) {
        Ok(read_back) if read_back == value => Ok(stored),
        _ => Err(LedgerError::validation(
            field,
            format!("{value} has more precision than the store keeps"),
        )),
    }
}

/// REAL columns come back as `f64`; go through the shortest decimal text so
/// `20.1` reads back as `20.1` rather than its binary expansion.
fn decimal_from_f64(value: f64) -> std::result::Result<Decimal, String> {
    Decimal::from_str(&value.to_string()).map_err(|e| format!("bad amount {value}: {e}"))
}
