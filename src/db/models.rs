// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly. The serde renames match the column headers of the
// original dashboard export, with lowercase aliases accepted on import.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single spend event at a merchant. Immutable, sourced externally;
/// the engine only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "User_ID", alias = "user_id")]
    pub user_id: String,
    #[serde(rename = "Merchant", alias = "merchant")]
    pub merchant: String,
    /// Signed spend amount — refunds come through as negatives.
    #[serde(rename = "Amount", alias = "amount")]
    pub amount: f64,
    #[serde(rename = "Date", alias = "date")]
    pub date: NaiveDate,
    #[serde(rename = "Category", alias = "category")]
    pub category: String,
    #[serde(rename = "City", alias = "city")]
    pub city: String,
}

/// Per-user spend aggregate for the summary view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: String,
    pub transaction_count: i64,
    pub total_spend: f64,
    pub mean_spend: f64,
}
