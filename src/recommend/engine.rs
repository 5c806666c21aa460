// Similarity-weighted recommendation over peer spend.
//
// For a target user, every peer's similarity becomes a weight
// (raw similarity / raw sum — negatives are not clipped, so anti-correlated
// peers pull estimates down), and each unvisited merchant is scored by the
// weighted sum of peer spend there. "Unvisited" means the target's own
// matrix cell is 0.0.

use std::fmt;

use anyhow::Result;

use crate::matrix::{SimilarityMatrix, SpendMatrix};

use super::Recommendation;

/// `top_n` was not a positive integer — a caller contract violation,
/// unlike the unknown-user and no-peer cases which yield empty results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTopN(pub usize);

impl fmt::Display for InvalidTopN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "top_n must be a positive integer, got {}", self.0)
    }
}

impl std::error::Error for InvalidTopN {}

/// Rank unvisited merchants for `user_id` by estimated spend.
///
/// Returns an empty list (not an error) when the user has no row in the
/// spend matrix, or when the total peer similarity is zero — a weighted
/// average over zero total weight is undefined, so there is nothing to
/// rank. Output is sorted by estimated spend descending, ties broken by
/// merchant ascending, and truncated to `top_n`.
pub fn recommend(
    user_id: &str,
    spend: &SpendMatrix,
    similarity: &SimilarityMatrix,
    top_n: usize,
) -> Result<Vec<Recommendation>> {
    if top_n == 0 {
        return Err(InvalidTopN(top_n).into());
    }

    // Unknown user: no history, no recommendations
    let Some(own_row) = spend.row(user_id) else {
        return Ok(Vec::new());
    };
    let Some(sim_row) = similarity.row(user_id) else {
        return Ok(Vec::new());
    };

    // Peers and their raw similarities (self excluded)
    let peers: Vec<(&str, f64)> = similarity
        .users()
        .iter()
        .zip(sim_row.iter())
        .filter(|(peer, _)| peer.as_str() != user_id)
        .map(|(peer, &sim)| (peer.as_str(), sim))
        .collect();

    let total: f64 = peers.iter().map(|(_, sim)| sim).sum();
    if total.abs() < f64::EPSILON {
        // No peer signal — isolated user or no peers at all
        return Ok(Vec::new());
    }

    // Weighted sum of peer spend per merchant, weights summing to 1
    let mut estimates = vec![0.0; spend.merchant_count()];
    for (peer, sim) in &peers {
        let weight = sim / total;
        let Some(peer_row) = spend.row(peer) else {
            continue;
        };
        for (estimate, amount) in estimates.iter_mut().zip(peer_row.iter()) {
            *estimate += amount * weight;
        }
    }

    // Keep only merchants the target hasn't visited
    let mut recommendations: Vec<Recommendation> = spend
        .merchants()
        .iter()
        .zip(own_row.iter().zip(estimates.iter()))
        .filter(|(_, (&visited, _))| visited == 0.0)
        .map(|(merchant, (_, &estimated_spend))| Recommendation {
            merchant: merchant.clone(),
            estimated_spend,
        })
        .collect();

    recommendations.sort_by(|a, b| {
        b.estimated_spend
            .partial_cmp(&a.estimated_spend)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.merchant.cmp(&b.merchant))
    });
    recommendations.truncate(top_n);

    Ok(recommendations)
}
