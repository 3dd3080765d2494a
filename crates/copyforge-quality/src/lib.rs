//! Heuristic quality scoring — six independent metrics over a text snapshot.
//!
//! Every metric is normalized to 0–100; the overall score is the rounded
//! arithmetic mean. Scoring is deterministic: the optional jitter that
//! simulates external-service variance is an explicit seeded parameter,
//! never ambient randomness.

pub mod lexicon;
mod metrics;
mod scorer;

pub use metrics::QualityMetrics;
pub use scorer::{Jitter, QualityScorer};
