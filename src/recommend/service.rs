// Query interface — the one entry point external callers use.
//
// Validates arguments, then runs the full pipeline over an immutable
// transaction snapshot: aggregate to a SpendMatrix, derive the
// SimilarityMatrix, rank with the engine. No module-level state — callers
// decide when to re-load transactions and how long to keep results.

use anyhow::Result;
use tracing::debug;

use crate::db::models::Transaction;
use crate::matrix::{compute_similarity, SpendMatrix};

use super::engine;
use super::Recommendation;

/// Recommend up to `top_n` unvisited merchants for `user_id`.
///
/// Unknown users and users with no peer signal get an empty list; a
/// non-positive `top_n` or blank user id is an error.
pub fn recommend_for_user(
    transactions: &[Transaction],
    user_id: &str,
    top_n: usize,
) -> Result<Vec<Recommendation>> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        anyhow::bail!("user id must not be empty");
    }

    let spend = SpendMatrix::build(transactions);
    debug!(
        users = spend.user_count(),
        merchants = spend.merchant_count(),
        "Built spend matrix"
    );

    let similarity = compute_similarity(&spend);
    debug!(users = similarity.users().len(), "Computed similarity matrix");

    engine::recommend(user_id, &spend, &similarity, top_n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(user: &str, merchant: &str, amount: f64) -> Transaction {
        Transaction {
            user_id: user.to_string(),
            merchant: merchant.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            category: "Dining".to_string(),
            city: "Chicago".to_string(),
        }
    }

    #[test]
    fn test_blank_user_id_is_rejected() {
        let err = recommend_for_user(&[], "  ", 5).unwrap_err();
        assert!(err.to_string().contains("user id"));
    }

    #[test]
    fn test_user_id_is_trimmed() {
        let txs = vec![
            tx("U1", "Cafe", 10.0),
            tx("U2", "Cafe", 10.0),
            tx("U2", "Grocer", 25.0),
        ];
        let recs = recommend_for_user(&txs, " U1 ", 5).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].merchant, "Grocer");
    }

    #[test]
    fn test_empty_history_gives_empty_list() {
        let recs = recommend_for_user(&[], "U1", 5).unwrap();
        assert!(recs.is_empty());
    }
}
