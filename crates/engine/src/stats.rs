//! Aggregation over an already-fetched transaction set.
//!
//! Everything in this module is pure and deterministic: no store access,
//! so the invariants can be unit tested without a database.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use std::collections::HashMap;

use crate::settings::CategoryLimit;
use crate::transactions::{Transaction, TransactionKind};

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardStats {
    pub balance: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub category_spending: HashMap<String, f64>,
    pub transaction_count: usize,
    pub recent_transactions: Vec<Transaction>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LimitWarning {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LimitReport {
    pub category_spending: HashMap<String, f64>,
    pub warnings: Vec<LimitWarning>,
}

/// Totals, per-category expense sums and the five most recent
/// transactions (date descending, stable on ties).
pub fn dashboard(transactions: &[Transaction]) -> DashboardStats {
    let (total_income, total_expenses) =
        transactions.iter().fold((0.0, 0.0), |acc, tx| match tx.kind {
            TransactionKind::Income => (acc.0 + tx.amount, acc.1),
            TransactionKind::Expense => (acc.0, acc.1 + tx.amount),
        });

    let mut category_spending: HashMap<String, f64> = HashMap::new();
    for tx in transactions {
        if tx.kind == TransactionKind::Expense {
            *category_spending.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
        }
    }

    let mut recent = transactions.to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(5);

    DashboardStats {
        balance: total_income - total_expenses,
        total_income,
        total_expenses,
        category_spending,
        transaction_count: transactions.len(),
        recent_transactions: recent,
    }
}

/// Expense totals grouped by mood tag.
///
/// Transactions without a mood are excluded entirely, even though
/// display-side summaries would label them "neutral".
pub fn mood_spending(transactions: &[Transaction]) -> HashMap<String, f64> {
    let mut spending: HashMap<String, f64> = HashMap::new();
    for tx in transactions {
        if tx.kind != TransactionKind::Expense {
            continue;
        }
        if let Some(mood) = &tx.mood {
            *spending.entry(mood.clone()).or_insert(0.0) += tx.amount;
        }
    }
    spending
}

/// First instant of the UTC calendar month containing `reference`.
fn month_start(reference: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(reference.year(), reference.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(reference)
}

/// Month-to-date expense sums per category, plus a warning for every
/// configured ceiling that has been reached.
///
/// A zero limit reports `percentage = 0` instead of dividing by zero.
/// Categories with spending but no configured limit never warn.
pub fn check_limits(
    transactions: &[Transaction],
    limits: &[CategoryLimit],
    reference: DateTime<Utc>,
) -> LimitReport {
    let from = month_start(reference);

    let mut category_spending: HashMap<String, f64> = HashMap::new();
    for tx in transactions {
        if tx.kind == TransactionKind::Expense && tx.date >= from {
            *category_spending.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
        }
    }

    let mut warnings = Vec::new();
    for limit in limits {
        let spent = category_spending.get(&limit.category).copied().unwrap_or(0.0);
        if spent >= limit.limit {
            let percentage = if limit.limit > 0.0 {
                spent / limit.limit * 100.0
            } else {
                0.0
            };
            warnings.push(LimitWarning {
                category: limit.category.clone(),
                limit: limit.limit,
                spent,
                percentage,
            });
        }
    }

    LimitReport {
        category_spending,
        warnings,
    }
}
