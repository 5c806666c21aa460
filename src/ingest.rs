// Transaction CSV import.
//
// Expects the column headers the dashboard's data files use
// (User_ID, Merchant, Amount, Date, Category, City — lowercase accepted),
// with dates as YYYY-MM-DD. Parsing is strict: a malformed row fails the
// whole import with the row number in the error.

use std::path::Path;

use anyhow::{Context, Result};

use crate::db::models::Transaction;

/// Load transactions from a CSV file.
pub fn load_transactions_csv(path: &Path) -> Result<Vec<Transaction>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV at {}", path.display()))?;

    let mut transactions = Vec::new();
    for (i, record) in reader.deserialize::<Transaction>().enumerate() {
        // Row 1 is the header, so data rows start at 2
        let transaction = record.with_context(|| format!("Failed to parse CSV row {}", i + 2))?;
        transactions.push(transaction);
    }

    Ok(transactions)
}
