// Tally: merchant recommendations from transaction history.
//
// This is the library root. Each module corresponds to a stage of the
// recommendation pipeline: storage, ingest, matrix construction,
// recommendation, and display.

pub mod config;
pub mod db;
pub mod ingest;
pub mod matrix;
pub mod output;
pub mod recommend;
pub mod status;
