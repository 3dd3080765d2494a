//! Quality metrics produced by the scorer.

use serde::{Deserialize, Serialize};

/// Six independent heuristic scores, each in [0, 100], plus the rounded mean
/// and human-readable suggestions. Computed fresh from a text snapshot; not
/// persisted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub uniqueness: u32,
    pub readability: u32,
    pub seo: u32,
    pub keyword_density: u32,
    pub sentiment: u32,
    pub structure: u32,
    pub overall: u32,
    pub suggestions: Vec<String>,
}

impl QualityMetrics {
    /// All six metric values, in rubric order.
    pub fn values(&self) -> [u32; 6] {
        [
            self.uniqueness,
            self.readability,
            self.seo,
            self.keyword_density,
            self.sentiment,
            self.structure,
        ]
    }
}
