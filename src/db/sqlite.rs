// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Send.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points — Rust enforces this because
// MutexGuard is !Send.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{Transaction, UserSummary};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_transactions(&self, transactions: &[Transaction]) -> Result<u64> {
        let conn = self.conn.lock().await;
        super::queries::insert_transactions(&conn, transactions)
    }

    async fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn.lock().await;
        super::queries::get_transactions(&conn)
    }

    async fn transaction_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::transaction_count(&conn)
    }

    async fn user_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::user_count(&conn)
    }

    async fn merchant_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::merchant_count(&conn)
    }

    async fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let conn = self.conn.lock().await;
        super::queries::date_range(&conn)
    }

    async fn user_summaries(&self) -> Result<Vec<UserSummary>> {
        let conn = self.conn.lock().await;
        super::queries::user_summaries(&conn)
    }

    async fn top_merchants(&self, limit: u32) -> Result<Vec<(String, i64)>> {
        let conn = self.conn.lock().await;
        super::queries::top_merchants(&conn, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    async fn test_db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteDatabase::new(conn)
    }

    fn tx(user: &str, merchant: &str, amount: f64) -> Transaction {
        Transaction {
            user_id: user.to_string(),
            merchant: merchant.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            category: "Dining".to_string(),
            city: "Denver".to_string(),
        }
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let db = test_db().await;
        assert_eq!(db.table_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_trait_insert_and_load() {
        let db = test_db().await;
        assert_eq!(db.transaction_count().await.unwrap(), 0);

        let inserted = db
            .insert_transactions(&[tx("U1", "Cafe", 9.0), tx("U2", "Cafe", 11.0)])
            .await
            .unwrap();
        assert_eq!(inserted, 2);

        let loaded = db.get_transactions().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(db.user_count().await.unwrap(), 2);
        assert_eq!(db.merchant_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_trait_summaries_and_merchants() {
        let db = test_db().await;
        db.insert_transactions(&[
            tx("U1", "Cafe", 9.0),
            tx("U1", "Grocer", 41.0),
            tx("U2", "Cafe", 100.0),
        ])
        .await
        .unwrap();

        let summaries = db.user_summaries().await.unwrap();
        assert_eq!(summaries[0].user_id, "U2");

        let merchants = db.top_merchants(5).await.unwrap();
        assert_eq!(merchants[0].0, "Cafe");
    }
}
