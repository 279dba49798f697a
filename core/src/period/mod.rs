//! Pure month-membership and budget-consumption derivations.
//!
//! Month membership compares calendar month only; the year is deliberately
//! not part of the comparison, matching the shipped behavior (a June 2023
//! transaction matches "Junho" in 2024). Inherited ambiguity, kept until
//! product says otherwise.

use chrono::{Datelike, Local};

use crate::http::models::{Budget, Transaction};

/// Display month names, January first.
pub const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Zero-based index for a display month name.
pub fn month_index(name: &str) -> Option<usize> {
    MONTHS.iter().position(|m| *m == name)
}

pub fn month_name(index: usize) -> Option<&'static str> {
    MONTHS.get(index).copied()
}

/// True when the transaction's local calendar month equals `index`
/// (zero-based). Year is ignored.
pub fn is_in_month(tx: &Transaction, index: usize) -> bool {
    tx.created_at.with_timezone(&Local).month0() as usize == index
}

/// Transactions belonging to the selected display month. An unknown month
/// name selects nothing.
pub fn transactions_of_month<'a>(
    transactions: &'a [Transaction],
    month: &str,
) -> Vec<&'a Transaction> {
    match month_index(month) {
        Some(index) => transactions
            .iter()
            .filter(|tx| is_in_month(tx, index))
            .collect(),
        None => Vec::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Normal,
    Warning,
    Exceeded,
}

/// Derived consumption view: display percentage (rounded, clamped to
/// 0..=100) plus the classification. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetUsage {
    pub percent_used: u8,
    pub status: BudgetStatus,
}

/// Classify consumption against a limit. The exceeded test uses the raw
/// ratio, so a budget at 101% classifies as exceeded even though the
/// display percentage clamps at 100. A zero limit or unknown consumption
/// reads as 0% / normal.
pub fn classify_budget(limit: f64, total_used: Option<f64>) -> BudgetUsage {
    let used = match total_used {
        Some(used) if limit > 0.0 => used,
        _ => {
            return BudgetUsage {
                percent_used: 0,
                status: BudgetStatus::Normal,
            }
        }
    };

    let ratio = used / limit * 100.0;
    let percent_used = ratio.round().clamp(0.0, 100.0) as u8;
    let status = if ratio >= 100.0 {
        BudgetStatus::Exceeded
    } else if percent_used >= 80 {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Normal
    };

    BudgetUsage {
        percent_used,
        status,
    }
}

pub fn budget_usage(budget: &Budget) -> BudgetUsage {
    classify_budget(budget.limit, budget.total_used)
}

/// Status label as the budgets screen renders it.
pub fn usage_label(usage: &BudgetUsage) -> String {
    match usage.status {
        BudgetStatus::Exceeded => "Estourou".to_string(),
        _ => format!("{}% usado", usage.percent_used),
    }
}
