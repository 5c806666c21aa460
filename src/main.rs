use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use tally::config::Config;
use tally::db::Database;

/// Tally: merchant recommendations from transaction history.
///
/// Estimates which merchants a user hasn't visited yet but is most likely
/// to spend at, by borrowing signal from users with a similar spend profile.
#[derive(Parser)]
#[command(name = "tally", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the transaction database
    Init,

    /// Import transactions from a CSV file
    Import {
        /// CSV file with User_ID, Merchant, Amount, Date, Category, City columns
        file: PathBuf,
    },

    /// Recommend unvisited merchants for a user
    Recommend {
        /// The user to recommend for (e.g. U1042)
        user: String,

        /// Number of merchants to return (default: TALLY_TOP_N or 5)
        #[arg(long)]
        top_n: Option<u32>,

        /// Emit the recommendation list as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the users most similar to a given user
    Similar {
        /// The user to compare against
        user: String,

        /// Number of peers to show
        #[arg(long, default_value = "10")]
        limit: u32,
    },

    /// Show per-user spend summary (count, total, mean)
    Summary,

    /// Show store status (transaction counts, date range, top merchants)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tally=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Tally database...");
            let config = Config::load()?;
            let db = tally::db::initialize_sqlite(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext step: import transaction history");
            println!("  tally import transactions.csv");
        }

        Commands::Import { file } => {
            let config = Config::load()?;
            let db = open_database(&config)?;

            println!("Importing transactions from {}...", file.display());
            let transactions = tally::ingest::load_transactions_csv(&file)?;
            info!(rows = transactions.len(), "Parsed transaction CSV");

            if transactions.is_empty() {
                println!("No rows found in {}.", file.display());
                return Ok(());
            }

            let pb = ProgressBar::new(transactions.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Import [{bar:30}] {pos}/{len} ({eta})")
                    .unwrap(),
            );

            let mut imported = 0u64;
            for chunk in transactions.chunks(500) {
                imported += db.insert_transactions(chunk).await?;
                pb.inc(chunk.len() as u64);
            }
            pb.finish_and_clear();

            println!("{}", format!("Imported {imported} transactions.").bold());
            println!(
                "Store now holds {} transactions across {} users.",
                db.transaction_count().await?,
                db.user_count().await?,
            );
        }

        Commands::Recommend { user, top_n, json } => {
            let config = Config::load()?;
            let db = open_database(&config)?;
            let top_n = top_n.unwrap_or(config.default_top_n) as usize;

            let transactions = db.get_transactions().await?;
            info!(
                transactions = transactions.len(),
                user, top_n, "Computing recommendations"
            );

            let recommendations =
                tally::recommend::recommend_for_user(&transactions, &user, top_n)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&recommendations)?);
            } else {
                tally::output::terminal::display_recommendations(user.trim(), &recommendations);
            }
        }

        Commands::Similar { user, limit } => {
            let config = Config::load()?;
            let db = open_database(&config)?;

            let transactions = db.get_transactions().await?;
            let spend = tally::matrix::SpendMatrix::build(&transactions);
            let user = user.trim().to_string();

            if !spend.contains_user(&user) {
                println!("User {user} has no transaction history.");
                return Ok(());
            }

            let similarity = tally::matrix::compute_similarity(&spend);
            let peers = similarity.top_peers(&user, limit as usize);
            tally::output::terminal::display_similar_users(&user, &peers);
        }

        Commands::Summary => {
            let config = Config::load()?;
            let db = open_database(&config)?;
            let summaries = db.user_summaries().await?;
            tally::output::terminal::display_user_summaries(&summaries);
        }

        Commands::Status => {
            let config = Config::load()?;
            let db = open_database(&config)?;
            tally::status::show(&db, &config.db_path).await?;
        }
    }

    Ok(())
}

/// Open the database, failing with a hint if `tally init` hasn't run yet.
fn open_database(config: &Config) -> Result<Arc<dyn Database>> {
    tally::db::open_sqlite(&config.db_path)
}
