// System status display — shows DB stats and top merchants.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::db::Database;

/// Display store status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_path: &str) -> Result<()> {
    if !Path::new(db_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `tally init` to set up the database.");
        return Ok(());
    }

    let file_size = std::fs::metadata(db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {db_path} ({file_size})");

    let transactions = db.transaction_count().await?;
    if transactions == 0 {
        println!("Transactions: none imported yet");
        println!("  Run `tally import <file.csv>` to load transaction history");
        return Ok(());
    }

    println!(
        "Transactions: {} across {} users and {} merchants",
        transactions,
        db.user_count().await?,
        db.merchant_count().await?,
    );

    if let Some((from, to)) = db.date_range().await? {
        println!("Date range: {from} to {to}");
    }

    let top = db.top_merchants(5).await?;
    if !top.is_empty() {
        println!("Top merchants by transaction count:");
        for (merchant, count) in &top {
            println!("  {merchant} ({count})");
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
