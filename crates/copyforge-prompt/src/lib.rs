//! Prompt construction: keyword extraction and template resolution.
//!
//! The builder resolves the active template for an order's service type and
//! substitutes `{{placeholder}}` tokens. When no template is configured it
//! degrades to a deterministic fallback prompt — a handled case, not an error.

pub mod builder;
pub mod keywords;

pub use builder::{service_name, PromptBuilder};
pub use keywords::extract;
