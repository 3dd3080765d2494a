//! Request types for the chat-completion backend.

use serde::{Deserialize, Serialize};

/// Model identifier used when the caller does not override it.
pub const DEFAULT_MODEL: &str = "text-generation-default";

/// Chat message sent to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Per-call generation options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2048,
        }
    }
}
