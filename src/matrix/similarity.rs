// Pairwise cosine similarity between user spend rows.
//
// Cosine compares the direction of two spend vectors, not their magnitude:
// two users with the same relative distribution across merchants score 1.0
// even if one spends ten times more. Scores live in [-1, 1] — amounts are
// signed, so anti-correlated users can go negative.
//
// Each unordered pair is computed once and mirrored, so similarity(a, b)
// and similarity(b, a) are the same f64 bit-for-bit.

use std::collections::HashMap;

use super::spend::SpendMatrix;

/// Symmetric user-by-user similarity scores.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    users: Vec<String>,
    user_index: HashMap<String, usize>,
    scores: Vec<Vec<f64>>,
}

/// Compute the full similarity matrix from a spend matrix.
///
/// A user with an all-zero spend row has no direction to compare, so their
/// similarity to everyone — including themselves — is 0. Everyone else gets
/// a diagonal of exactly 1.
///
/// This is O(U² · M) for U users and M merchants and is the dominant cost
/// of a recommendation request; plan capacity around it.
pub fn compute_similarity(matrix: &SpendMatrix) -> SimilarityMatrix {
    let users = matrix.users().to_vec();
    let n = users.len();
    let mut scores = vec![vec![0.0; n]; n];

    let rows: Vec<&[f64]> = users
        .iter()
        .map(|u| matrix.row(u).expect("user came from the matrix"))
        .collect();
    let zero_row: Vec<bool> = rows
        .iter()
        .map(|r| magnitude(r) < f64::EPSILON)
        .collect();

    for i in 0..n {
        if zero_row[i] {
            continue;
        }
        scores[i][i] = 1.0;
        for j in (i + 1)..n {
            if zero_row[j] {
                continue;
            }
            let sim = cosine(rows[i], rows[j]);
            scores[i][j] = sim;
            scores[j][i] = sim;
        }
    }

    let user_index = users
        .iter()
        .enumerate()
        .map(|(i, u)| (u.clone(), i))
        .collect();

    SimilarityMatrix {
        users,
        user_index,
        scores,
    }
}

/// Cosine of the angle between two equal-length vectors, in [-1, 1].
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let denom = magnitude(a) * magnitude(b);

    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

impl SimilarityMatrix {
    /// User ids in the same sorted order as the source spend matrix.
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// The similarity row for a user, aligned with `users()`.
    pub fn row(&self, user_id: &str) -> Option<&[f64]> {
        self.user_index
            .get(user_id)
            .map(|&i| self.scores[i].as_slice())
    }

    /// Similarity between two users, None when either id is unknown.
    pub fn score(&self, a: &str, b: &str) -> Option<f64> {
        let i = *self.user_index.get(a)?;
        let j = *self.user_index.get(b)?;
        Some(self.scores[i][j])
    }

    /// A user's peers ranked by similarity descending, ties by user id
    /// ascending. The user themselves is excluded. Empty when the user is
    /// unknown.
    pub fn top_peers(&self, user_id: &str, limit: usize) -> Vec<(String, f64)> {
        let Some(row) = self.row(user_id) else {
            return Vec::new();
        };

        let mut peers: Vec<(String, f64)> = self
            .users
            .iter()
            .zip(row.iter())
            .filter(|(u, _)| u.as_str() != user_id)
            .map(|(u, &s)| (u.clone(), s))
            .collect();

        peers.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        peers.truncate(limit);
        peers
    }
}
