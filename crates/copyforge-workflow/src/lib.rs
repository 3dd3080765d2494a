//! Order processing pipeline.
//!
//! Wires the stores, prompt builder, generation client, quality scorer, and
//! notifier into one `process(order_id)` operation with fixed step order and
//! retry-safe failure states.

mod notify;
mod workflow;

pub use notify::{LogNotifier, Notification, Notifier, WebhookNotifier};
pub use workflow::{OrderWorkflow, WorkflowReport};
