// Database queries — all SQL for the transaction store.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust
// interfaces.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Transaction, UserSummary};

// --- Transactions ---

/// Insert a batch of transactions inside a single SQL transaction.
/// Returns the number of rows inserted.
pub fn insert_transactions(conn: &Connection, transactions: &[Transaction]) -> Result<u64> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions (user_id, merchant, amount, date, category, city)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for t in transactions {
            stmt.execute(params![
                t.user_id, t.merchant, t.amount, t.date, t.category, t.city
            ])?;
        }
    }
    tx.commit()?;
    Ok(transactions.len() as u64)
}

/// Load the full transaction history, oldest first.
///
/// This is the snapshot the recommendation pipeline works from — the
/// matrices are rebuilt from it on every request.
pub fn get_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, merchant, amount, date, category, city
         FROM transactions ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Transaction {
            user_id: row.get(0)?,
            merchant: row.get(1)?,
            amount: row.get(2)?,
            date: row.get(3)?,
            category: row.get(4)?,
            city: row.get(5)?,
        })
    })?;

    let mut transactions = Vec::new();
    for row in rows {
        transactions.push(row?);
    }
    Ok(transactions)
}

// --- Store statistics ---

pub fn transaction_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
    Ok(count)
}

pub fn user_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT user_id) FROM transactions",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn merchant_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT merchant) FROM transactions",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Earliest and latest transaction dates, or None when the store is empty.
pub fn date_range(conn: &Connection) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let mut stmt = conn.prepare("SELECT MIN(date), MAX(date) FROM transactions")?;
    let result: Option<(Option<NaiveDate>, Option<NaiveDate>)> = stmt
        .query_row([], |row| Ok((row.get(0)?, row.get(1)?)))
        .optional()?;

    match result {
        Some((Some(min), Some(max))) => Ok(Some((min, max))),
        _ => Ok(None),
    }
}

/// Per-user transaction count, total spend, and mean spend, ranked by
/// total spend descending.
pub fn user_summaries(conn: &Connection) -> Result<Vec<UserSummary>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, COUNT(*), SUM(amount), AVG(amount)
         FROM transactions
         GROUP BY user_id
         ORDER BY SUM(amount) DESC, user_id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(UserSummary {
            user_id: row.get(0)?,
            transaction_count: row.get(1)?,
            total_spend: row.get(2)?,
            mean_spend: row.get(3)?,
        })
    })?;

    let mut summaries = Vec::new();
    for row in rows {
        summaries.push(row?);
    }
    Ok(summaries)
}

/// Merchants ranked by transaction count descending.
pub fn top_merchants(conn: &Connection, limit: u32) -> Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT merchant, COUNT(*) AS n
         FROM transactions
         GROUP BY merchant
         ORDER BY n DESC, merchant
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut merchants = Vec::new();
    for row in rows {
        merchants.push(row?);
    }
    Ok(merchants)
}
