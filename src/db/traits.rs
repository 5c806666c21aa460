// Database trait — backend-agnostic async interface for all DB operations.
//
// The single implementor today is SqliteDatabase (wraps rusqlite). Methods
// are async so a native async backend could sit behind the same interface
// without touching callers.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use super::models::{Transaction, UserSummary};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Transactions ---

    /// Insert a batch of transactions; returns the number inserted.
    async fn insert_transactions(&self, transactions: &[Transaction]) -> Result<u64>;

    /// Load the full transaction history, oldest first.
    async fn get_transactions(&self) -> Result<Vec<Transaction>>;

    // --- Store statistics ---

    async fn transaction_count(&self) -> Result<i64>;

    async fn user_count(&self) -> Result<i64>;

    async fn merchant_count(&self) -> Result<i64>;

    /// Earliest and latest transaction dates, None when empty.
    async fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>>;

    /// Per-user spend aggregates, ranked by total spend descending.
    async fn user_summaries(&self) -> Result<Vec<UserSummary>>;

    /// Merchants ranked by transaction count descending.
    async fn top_merchants(&self, limit: u32) -> Result<Vec<(String, i64)>>;
}
