#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::LedgerError;

// ── Transaction ───────────────────────────────────────────────

fn make_txn(kind: TransactionType, amount: Decimal) -> Transaction {
    Transaction {
        id: None,
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        category: "Test".into(),
        amount,
        description: String::new(),
        kind,
    }
}

#[test]
fn test_income() {
    let txn = make_txn(TransactionType::Income, dec!(100.00));
    assert_eq!(txn.signed_amount(), dec!(100.00));
}

#[test]
fn test_expense_sign_comes_from_type() {
    let txn = make_txn(TransactionType::Expense, dec!(50.00));
    assert_eq!(txn.amount, dec!(50.00));
    assert_eq!(txn.signed_amount(), dec!(-50.00));
}

#[test]
fn test_date_string_is_zero_padded() {
    let mut txn = make_txn(TransactionType::Income, dec!(1));
    txn.date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    assert_eq!(txn.date_string(), "2024-03-07");
}

// ── TransactionType ───────────────────────────────────────────

#[test]
fn test_transaction_type_parse() {
    assert_eq!(TransactionType::parse("income"), Some(TransactionType::Income));
    assert_eq!(TransactionType::parse("INCOME"), Some(TransactionType::Income));
    assert_eq!(TransactionType::parse(" Expense "), Some(TransactionType::Expense));
    assert_eq!(TransactionType::parse("out"), Some(TransactionType::Expense));
    assert_eq!(TransactionType::parse("transfer"), None);
    assert_eq!(TransactionType::parse(""), None);
}

#[test]
fn test_transaction_type_roundtrip() {
    for t in [TransactionType::Income, TransactionType::Expense] {
        let s = t.as_str();
        assert_eq!(TransactionType::parse(s), Some(t), "Roundtrip failed for {s}");
    }
}

#[test]
fn test_income_sorts_before_expense() {
    assert!(TransactionType::Income < TransactionType::Expense);
}

#[test]
fn test_transaction_type_display() {
    assert_eq!(format!("{}", TransactionType::Expense), "Expense");
}

// ── NewTransaction ────────────────────────────────────────────

#[test]
fn test_validate_keeps_fields() {
    let txn = NewTransaction::new(TransactionType::Expense, "Food", dec!(20.00))
        .on("2024-01-05")
        .described("groceries")
        .validate()
        .unwrap();
    assert!(txn.id.is_none());
    assert_eq!(txn.date_string(), "2024-01-05");
    assert_eq!(txn.category, "Food");
    assert_eq!(txn.amount, dec!(20.00));
    assert_eq!(txn.description, "groceries");
    assert_eq!(txn.kind, TransactionType::Expense);
}

#[test]
fn test_validate_trims_text() {
    let txn = NewTransaction::new(TransactionType::Income, "  Salary ", dec!(1))
        .on("2024-01-05")
        .described(" pay ")
        .validate()
        .unwrap();
    assert_eq!(txn.category, "Salary");
    assert_eq!(txn.description, "pay");
}

#[test]
fn test_validate_defaults_date_to_today() {
    let today = chrono::Local::now().date_naive();
    let txn = NewTransaction::new(TransactionType::Income, "Gift", dec!(5))
        .validate()
        .unwrap();
    // Allow for the test straddling midnight.
    assert!(txn.date >= today);

    let blank = NewTransaction::new(TransactionType::Income, "Gift", dec!(5))
        .on("   ")
        .validate()
        .unwrap();
    assert!(blank.date >= today);
}

#[test]
fn test_validate_rejects_non_positive_amount() {
    for amount in [Decimal::ZERO, dec!(-0.01), dec!(-100)] {
        let err = NewTransaction::new(TransactionType::Expense, "Food", amount)
            .on("2024-01-05")
            .validate()
            .unwrap_err();
        assert!(
            matches!(err, LedgerError::Validation { field: "amount", .. }),
            "unexpected error for {amount}: {err}"
        );
    }
}

#[test]
fn test_validate_rejects_empty_category() {
    let err = NewTransaction::new(TransactionType::Expense, "  ", dec!(1))
        .validate()
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { field: "category", .. }));
}

#[test]
fn test_validate_rejects_malformed_date() {
    for date in ["2024-1-5", "05/01/2024", "2024-02-30", "yesterday"] {
        let err = NewTransaction::new(TransactionType::Expense, "Food", dec!(1))
            .on(date)
            .validate()
            .unwrap_err();
        assert!(
            matches!(err, LedgerError::Validation { field: "date", .. }),
            "unexpected error for {date}: {err}"
        );
        assert!(err.to_string().contains(date));
    }
}

#[test]
fn test_parse_date() {
    assert_eq!(parse_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
    assert_eq!(parse_date("2023-02-29"), None);
    assert_eq!(parse_date("2024-2-9"), None);
    assert_eq!(parse_date(""), None);
}

// ── BudgetLimit ───────────────────────────────────────────────

#[test]
fn test_budget_limit_new() {
    let limit = BudgetLimit::new(" Food ", dec!(100)).unwrap();
    assert_eq!(limit.category, "Food");
    assert_eq!(limit.limit_amount, dec!(100));
}

#[test]
fn test_budget_limit_rejects_non_positive() {
    let err = BudgetLimit::new("Food", Decimal::ZERO).unwrap_err();
    assert!(matches!(err, LedgerError::Validation { field: "limit_amount", .. }));
    assert!(BudgetLimit::new("Food", dec!(-5)).is_err());
}

#[test]
fn test_budget_limit_rejects_empty_category() {
    let err = BudgetLimit::new("", dec!(10)).unwrap_err();
    assert!(matches!(err, LedgerError::Validation { field: "category", .. }));
}
