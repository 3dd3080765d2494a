//! Copyforge Core — error taxonomy, configuration, domain types.

pub mod config;
pub mod degrade;
pub mod error;
pub mod types;

pub use config::{CopyforgeConfig, DataPaths};
pub use degrade::Degradable;
pub use error::{Error, Result};
pub use types::{
    GeneratedContent, KeywordCategory, LsiKeyword, NewGeneratedContent, Order, OrderPatch,
    OrderStatus, PromptTemplate,
};
