// Matrix construction — the two immutable snapshots the recommender
// works from.
//
// `spend` reduces the raw transaction history into a dense user-by-merchant
// matrix of mean spend. `similarity` derives the symmetric user-by-user
// cosine similarity matrix from it. Both are pure functions of their input
// and are rebuilt per request; once built they are never mutated, so
// concurrent readers can share them freely.

pub mod similarity;
pub mod spend;

pub use similarity::{compute_similarity, SimilarityMatrix};
pub use spend::SpendMatrix;
