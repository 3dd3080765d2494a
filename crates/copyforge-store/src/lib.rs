//! Order, template, and generated-content persistence.
//!
//! The pipeline only sees the narrow repository traits; `SqliteStore` is the
//! production implementation, `MemoryStore` backs tests and embedded hosts.

pub mod memory;
pub mod schema;
pub mod sqlite;
mod traits;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{ContentStore, NewTemplate, OrderStore, TemplateStore};
