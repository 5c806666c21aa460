// Colored terminal output for recommendations, peers, and summaries.
//
// This module handles all terminal-specific formatting: colors and tables.
// The main.rs command handlers delegate here.

use colored::Colorize;

use crate::db::models::UserSummary;
use crate::recommend::Recommendation;

use super::format_amount;

/// Display a ranked recommendation list for a user.
pub fn display_recommendations(user_id: &str, recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!("No recommendations for {user_id}.");
        println!(
            "{}",
            "The user is unknown, has no peer signal, or has visited every merchant.".dimmed()
        );
        return;
    }

    println!(
        "\n{}",
        format!("=== Recommended merchants for {user_id} ===").bold()
    );
    println!();
    println!(
        "  {:>4}  {:<32} {:>14}",
        "Rank".dimmed(),
        "Merchant".dimmed(),
        "Est. Spend ($)".dimmed(),
    );
    println!("  {}", "-".repeat(54).dimmed());

    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "  {:>4}. {:<32} {:>14}",
            i + 1,
            rec.merchant,
            format_amount(rec.estimated_spend).green(),
        );
    }
    println!();
}

/// Display a user's nearest peers by cosine similarity.
pub fn display_similar_users(user_id: &str, peers: &[(String, f64)]) {
    if peers.is_empty() {
        println!("No peers found for {user_id}.");
        return;
    }

    println!("\n{}", format!("=== Users similar to {user_id} ===").bold());
    println!();
    println!(
        "  {:>4}  {:<32} {:>10}",
        "Rank".dimmed(),
        "User".dimmed(),
        "Similarity".dimmed(),
    );
    println!("  {}", "-".repeat(50).dimmed());

    for (i, (peer, similarity)) in peers.iter().enumerate() {
        let score = format!("{similarity:>10.4}");
        let colored_score = if *similarity > 0.0 {
            score.green()
        } else if *similarity < 0.0 {
            score.red()
        } else {
            score.dimmed()
        };
        println!("  {:>4}. {:<32} {}", i + 1, peer, colored_score);
    }
    println!();
}

/// Display the per-user spend summary table.
pub fn display_user_summaries(summaries: &[UserSummary]) {
    if summaries.is_empty() {
        println!("No transactions imported yet. Run `tally import <file.csv>` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== User spend summary ({} users) ===", summaries.len()).bold()
    );
    println!();
    println!(
        "  {:<16} {:>8} {:>16} {:>14}",
        "User".dimmed(),
        "Txns".dimmed(),
        "Total ($)".dimmed(),
        "Mean ($)".dimmed(),
    );
    println!("  {}", "-".repeat(58).dimmed());

    for summary in summaries {
        println!(
            "  {:<16} {:>8} {:>16} {:>14}",
            summary.user_id,
            summary.transaction_count,
            format_amount(summary.total_spend),
            format_amount(summary.mean_spend),
        );
    }
    println!();
}
