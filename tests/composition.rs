// Composition tests — verifying that the pipeline stages chain together:
//   CSV ingest -> store -> SpendMatrix -> SimilarityMatrix -> recommend
//
// Uses an in-memory SQLite store where storage is involved; everything
// else is pure.

use chrono::NaiveDate;
use rusqlite::Connection;
use tally::db::models::Transaction;
use tally::db::schema::create_tables;
use tally::db::sqlite::SqliteDatabase;
use tally::db::Database;
use tally::ingest::load_transactions_csv;
use tally::matrix::{compute_similarity, SpendMatrix};
use tally::output::format_amount;
use tally::recommend::{recommend_for_user, Recommendation};

fn tx(user: &str, merchant: &str, amount: f64) -> Transaction {
    Transaction {
        user_id: user.to_string(),
        merchant: merchant.to_string(),
        amount,
        date: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
        category: "Dining".to_string(),
        city: "Phoenix".to_string(),
    }
}

// ============================================================
// Chain: CSV -> service -> recommendations
// ============================================================

#[test]
fn csv_to_recommendations_end_to_end() {
    let csv = "User_ID,Merchant,Amount,Date,Category,City\n\
               U1,A,10.00,2024-01-01,Dining,Austin\n\
               U2,A,10.00,2024-01-02,Dining,Austin\n\
               U2,B,20.00,2024-01-03,Dining,Austin\n\
               U3,A,3.00,2024-01-04,Dining,Austin\n\
               U3,A,-3.00,2024-01-05,Dining,Austin\n";

    let path = std::env::temp_dir().join(format!("tally-composition-{}.csv", std::process::id()));
    std::fs::write(&path, csv).unwrap();
    let transactions = load_transactions_csv(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(transactions.len(), 5);

    let recs = recommend_for_user(&transactions, "U1", 1).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].merchant, "B");
    assert!((recs[0].estimated_spend - 20.0).abs() < 1e-9);
}

// ============================================================
// Chain: store roundtrip -> service
// ============================================================

#[tokio::test]
async fn store_roundtrip_feeds_the_pipeline() {
    let conn = Connection::open_in_memory().unwrap();
    create_tables(&conn).unwrap();
    let db = SqliteDatabase::new(conn);

    db.insert_transactions(&[
        tx("U1", "Cafe", 10.0),
        tx("U2", "Cafe", 10.0),
        tx("U2", "Grocer", 35.0),
    ])
    .await
    .unwrap();

    let snapshot = db.get_transactions().await.unwrap();
    let recs = recommend_for_user(&snapshot, "U1", 5).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].merchant, "Grocer");
    assert!((recs[0].estimated_spend - 35.0).abs() < 1e-9);
}

// ============================================================
// Snapshot sharing: one pair of matrices, many requests
// ============================================================

#[test]
fn one_snapshot_serves_many_requests_identically() {
    let transactions = vec![
        tx("U1", "Cafe", 10.0),
        tx("U2", "Cafe", 9.0),
        tx("U2", "Grocer", 18.0),
        tx("U3", "Cafe", 4.0),
        tx("U3", "Bakery", 7.0),
    ];
    let spend = SpendMatrix::build(&transactions);
    let sim = compute_similarity(&spend);

    // Immutable snapshots: every caller sees the same answers
    for _ in 0..3 {
        let u1 = tally::recommend::recommend("U1", &spend, &sim, 5).unwrap();
        let again = tally::recommend::recommend("U1", &spend, &sim, 5).unwrap();
        assert_eq!(u1, again);
    }

    // Different users against the same snapshot
    let u2 = tally::recommend::recommend("U2", &spend, &sim, 5).unwrap();
    assert!(!u2.iter().any(|r| r.merchant == "Cafe" || r.merchant == "Grocer"));
}

// ============================================================
// Chain: recommendations -> serialization / display formatting
// ============================================================

#[test]
fn recommendations_serialize_to_json() {
    let transactions = vec![
        tx("U1", "Cafe", 10.0),
        tx("U2", "Cafe", 10.0),
        tx("U2", "Grocer", 42.5),
    ];
    let recs = recommend_for_user(&transactions, "U1", 5).unwrap();

    let json = serde_json::to_string(&recs).unwrap();
    let parsed: Vec<Recommendation> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, recs);
    assert!(json.contains("\"merchant\":\"Grocer\""));
}

#[test]
fn estimates_format_for_display() {
    let transactions = vec![
        tx("U1", "Cafe", 10.0),
        tx("U2", "Cafe", 10.0),
        tx("U2", "Grocer", 1234.567),
    ];
    let recs = recommend_for_user(&transactions, "U1", 5).unwrap();
    // Internal value keeps full precision; only the string is rounded
    assert!((recs[0].estimated_spend - 1234.567).abs() < 1e-9);
    assert_eq!(format_amount(recs[0].estimated_spend), "1,234.57");
}
