#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{BudgetLimit, Transaction, TransactionType};

fn txn(date: &str, category: &str, amount: Decimal, kind: TransactionType) -> Transaction {
    Transaction {
        id: None,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        category: category.into(),
        amount,
        description: String::new(),
        kind,
    }
}

fn scenario() -> Vec<Transaction> {
    vec![
        txn("2024-01-05", "Food", dec!(20.00), TransactionType::Expense),
        txn("2024-01-20", "Salary", dec!(1000.00), TransactionType::Income),
        txn("2024-02-01", "Food", dec!(15.00), TransactionType::Expense),
    ]
}

fn key(kind: TransactionType, category: &str) -> (TransactionType, String) {
    (kind, category.to_string())
}

// ── summarize ─────────────────────────────────────────────────

#[test]
fn test_summarize_empty() {
    let summary = summarize(&[]);
    assert_eq!(summary.total_income, Decimal::ZERO);
    assert_eq!(summary.total_expense, Decimal::ZERO);
    assert_eq!(summary.balance(), Decimal::ZERO);
    assert!(summary.by_type_and_category.is_empty());
    assert!(summary.is_empty());
    assert!(summary.groups().is_empty());
}

#[test]
fn test_summarize_january() {
    let jan: Vec<Transaction> = scenario()
        .into_iter()
        .filter(|t| t.date_string().starts_with("2024-01"))
        .collect();
    let summary = summarize(&jan);

    assert_eq!(summary.total_income, dec!(1000.00));
    assert_eq!(summary.total_expense, dec!(20.00));
    assert_eq!(summary.balance(), dec!(980.00));
    assert_eq!(summary.by_type_and_category.len(), 2);
    assert_eq!(
        summary.by_type_and_category[&key(TransactionType::Expense, "Food")],
        dec!(20.00)
    );
    assert_eq!(
        summary.by_type_and_category[&key(TransactionType::Income, "Salary")],
        dec!(1000.00)
    );
}

#[test]
fn test_summarize_adds_every_group_of_a_type() {
    let txns = vec![
        txn("2024-01-01", "Salary", dec!(1000), TransactionType::Income),
        txn("2024-01-02", "Freelance", dec!(250), TransactionType::Income),
        txn("2024-01-03", "Food", dec!(30), TransactionType::Expense),
        txn("2024-01-04", "Rent", dec!(500), TransactionType::Expense),
        txn("2024-01-05", "Food", dec!(12.50), TransactionType::Expense),
    ];
    let summary = summarize(&txns);
    assert_eq!(summary.total_income, dec!(1250));
    assert_eq!(summary.total_expense, dec!(542.50));
    assert_eq!(
        summary.by_type_and_category[&key(TransactionType::Expense, "Food")],
        dec!(42.50)
    );
}

#[test]
fn test_balance_matches_signed_sum() {
    let txns = scenario();
    let summary = summarize(&txns);
    let signed: Decimal = txns.iter().map(|t| t.signed_amount()).sum();
    assert_eq!(summary.balance(), signed);
    assert_eq!(summary.balance(), dec!(965.00));
}

#[test]
fn test_same_category_under_both_types_is_separate() {
    let txns = vec![
        txn("2024-01-01", "Gifts", dec!(40), TransactionType::Income),
        txn("2024-01-02", "Gifts", dec!(25), TransactionType::Expense),
    ];
    let summary = summarize(&txns);
    assert_eq!(summary.by_type_and_category.len(), 2);
    assert_eq!(summary.spent_on("Gifts"), dec!(25));
}

// ── groups ────────────────────────────────────────────────────

#[test]
fn test_groups_order() {
    let txns = vec![
        txn("2024-01-01", "Food", dec!(30), TransactionType::Expense),
        txn("2024-01-01", "Rent", dec!(500), TransactionType::Expense),
        txn("2024-01-01", "Bonus", dec!(100), TransactionType::Income),
        txn("2024-01-01", "Salary", dec!(1000), TransactionType::Income),
        txn("2024-01-01", "Books", dec!(30), TransactionType::Expense),
    ];
    let order: Vec<(TransactionType, String)> = summarize(&txns)
        .groups()
        .into_iter()
        .map(|g| (g.kind, g.category))
        .collect();
    assert_eq!(
        order,
        vec![
            key(TransactionType::Income, "Salary"),
            key(TransactionType::Income, "Bonus"),
            key(TransactionType::Expense, "Rent"),
            // Tie on 30 falls back to category name.
            key(TransactionType::Expense, "Books"),
            key(TransactionType::Expense, "Food"),
        ]
    );
}

// ── budget_status ─────────────────────────────────────────────

#[test]
fn test_budget_status() {
    let summary = summarize(&scenario());
    let limits = vec![
        BudgetLimit::new("Transport", dec!(50)).unwrap(),
        BudgetLimit::new("Food", dec!(30)).unwrap(),
    ];
    let statuses = budget_status(&summary, &limits);

    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].category, "Food");
    assert_eq!(statuses[0].spent, dec!(35.00));
    assert_eq!(statuses[0].remaining, dec!(-5.00));
    assert!(statuses[0].over_budget());

    assert_eq!(statuses[1].category, "Transport");
    assert_eq!(statuses[1].spent, Decimal::ZERO);
    assert_eq!(statuses[1].remaining, dec!(50));
    assert!(!statuses[1].over_budget());
}

#[test]
fn test_budget_status_ignores_income() {
    let txns = vec![txn("2024-01-01", "Food", dec!(80), TransactionType::Income)];
    let limits = vec![BudgetLimit::new("Food", dec!(30)).unwrap()];
    let statuses = budget_status(&summarize(&txns), &limits);
    assert_eq!(statuses[0].spent, Decimal::ZERO);
}
