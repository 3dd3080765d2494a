//! Generation backend client.
//!
//! One operation — prompt in, text out, or a typed failure. Retries are an
//! orchestration policy of the caller, never hidden here.

pub mod client;
pub mod config;
mod types;

pub use client::{GenerationClient, HttpGenerationClient};
pub use config::BackendConfig;
pub use types::{ChatMessage, GenerationOptions, DEFAULT_MODEL};
