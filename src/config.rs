use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Path to the SQLite transaction store (TALLY_DB_PATH, default ./tally.db)
    pub db_path: String,
    /// Fallback recommendation count when --top-n is not given
    /// (TALLY_TOP_N, default 5)
    pub default_top_n: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let default_top_n = match env::var("TALLY_TOP_N") {
            Ok(raw) => raw.parse::<u32>().map_err(|_| {
                anyhow::anyhow!("TALLY_TOP_N must be a positive integer, got {raw:?}")
            })?,
            Err(_) => 5,
        };

        if default_top_n == 0 {
            anyhow::bail!("TALLY_TOP_N must be a positive integer, got 0");
        }

        Ok(Self {
            db_path: env::var("TALLY_DB_PATH").unwrap_or_else(|_| "./tally.db".to_string()),
            default_top_n,
        })
    }
}
