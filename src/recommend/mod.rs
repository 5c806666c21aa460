// Merchant recommendation — the collaborative-filtering core.
//
// `engine` ranks unvisited merchants for a user by a similarity-weighted
// average of peer spend. `service` is the thin entry point callers use:
// argument validation plus the aggregate → similarity → recommend pipeline
// over a transaction snapshot.

pub mod engine;
pub mod service;

pub use engine::{recommend, InvalidTopN};
pub use service::recommend_for_user;

use serde::{Deserialize, Serialize};

/// One recommended merchant with its estimated spend.
///
/// Ephemeral — computed per request, never persisted. The estimate is kept
/// at full precision; rounding happens only at display time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub merchant: String,
    pub estimated_spend: f64,
}
