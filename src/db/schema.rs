pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    date        TEXT,
    category    TEXT,
    amount      REAL,
    description TEXT,
    type        TEXT
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

CREATE TABLE IF NOT EXISTS budget_limits (
    category     TEXT PRIMARY KEY,
    limit_amount REAL
);
"#;

pub(crate) const TRANSACTION_COLUMNS: &str = "id, date, category, amount, description, type";
