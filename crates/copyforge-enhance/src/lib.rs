//! LSI keyword suggestion.
//!
//! Asks the generation backend for semantically related keywords and falls
//! back to deterministic derivations when the backend fails or returns
//! unusable output. The suggester never errors: callers always get a
//! keyword list, tagged with how it was produced.

mod parse;
mod suggester;

pub use parse::parse_keywords;
pub use suggester::{LsiSuggester, DEFAULT_MAX_SUGGESTIONS};
