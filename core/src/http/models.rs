//! Wire types. The backend speaks camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Token pair returned by `/auth/register` and `/auth/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Income.
    Entrada,
    /// Expense.
    Saida,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category_id: String,
}

/// Partial update for PUT /transactions/{id}; absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// Aggregate returned by GET /transactions/summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    /// Monthly spending limit for the category.
    pub limit: f64,
    /// Calendar year-month, "YYYY-MM".
    pub period: String,
    /// Backend-computed consumption. Advisory; classification is derived
    /// from it at display time, never stored.
    #[serde(default)]
    pub total_used: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInput {
    pub category_id: String,
    pub limit: f64,
    pub period: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Optional read scope, e.g. `month = "2024-06"`. Serialized as query
/// parameters.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodFilter {
    pub month: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn transaction_wire_format_is_camel_case() {
        let json = r#"{
            "id": "t1",
            "title": "Mercado",
            "amount": 120.5,
            "type": "saida",
            "categoryId": "c2",
            "createdAt": "2024-06-15T12:00:00Z"
        }"#;
        let tx: Transaction = serde_json::from_str(json).expect("parse");
        assert_eq!(tx.kind, TransactionKind::Saida);
        assert_eq!(tx.category_id, "c2");

        let back = serde_json::to_value(&tx).expect("serialize");
        assert_eq!(back["type"], "saida");
        assert_eq!(back["categoryId"], "c2");
    }

    #[test]
    fn patch_skips_absent_fields() {
        let patch = TransactionPatch {
            amount: Some(99.0),
            ..Default::default()
        };
        let v = serde_json::to_value(&patch).expect("serialize");
        assert_eq!(v, serde_json::json!({ "amount": 99.0 }));
    }

    #[test]
    fn budget_total_used_is_optional() {
        let json = r#"{ "id": "b1", "categoryId": "c1", "limit": 600.0, "period": "2024-06" }"#;
        let b: Budget = serde_json::from_str(json).expect("parse");
        assert_eq!(b.total_used, None);
    }
}
