//! Error types for Copyforge.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Generation backend error ({status}): {message}")]
    Generation { status: u16, message: String },

    #[error("Generation timed out after {0}s")]
    GenerationTimeout(u64),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
