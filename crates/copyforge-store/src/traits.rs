//! Repository traits — the capability set the workflow is allowed to use.

use copyforge_core::{
    GeneratedContent, NewGeneratedContent, Order, OrderPatch, PromptTemplate, Result,
};

/// Point lookup and field update over orders.
pub trait OrderStore: Send + Sync {
    fn get_order(&self, id: &str) -> Result<Option<Order>>;

    fn insert_order(&self, order: &Order) -> Result<()>;

    /// Apply a partial update. Returns false if the order does not exist.
    fn update_order(&self, id: &str, patch: &OrderPatch) -> Result<bool>;
}

/// Point lookup of the active prompt template for a service slug.
pub trait TemplateStore: Send + Sync {
    /// The active template for a slug, or None — absence is a normal case.
    fn active_template(&self, service_type: &str) -> Result<Option<PromptTemplate>>;

    /// Add a template. When `active` is set, any previously active template
    /// for the same slug is deactivated.
    fn add_template(&self, template: NewTemplate) -> Result<i64>;

    fn list_templates(&self) -> Result<Vec<PromptTemplate>>;
}

/// Append-only sink for generated content.
pub trait ContentStore: Send + Sync {
    fn add_content(&self, content: &NewGeneratedContent) -> Result<i64>;

    fn contents_for_order(&self, order_id: &str) -> Result<Vec<GeneratedContent>>;
}

/// Fields for inserting a prompt template.
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub name: String,
    pub service_type: String,
    pub template: String,
    pub version: i64,
    pub active: bool,
}
