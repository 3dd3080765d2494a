//! Domain types for orders, templates, generated content, and LSI keywords.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Lifecycle of an order. Mutated only by the order workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Received,
    Processing,
    Completed,
    Failed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Received => write!(f, "received"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "received" => Ok(OrderStatus::Received),
            "processing" => Ok(OrderStatus::Processing),
            "completed" => Ok(OrderStatus::Completed),
            "failed" => Ok(OrderStatus::Failed),
            other => Err(crate::Error::Storage(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// A unit of requested content work. Created by an external intake system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Service type slug, e.g. "seo-article".
    pub service_type: String,
    /// Free-text requirements.
    pub details: String,
    /// Structured service options (arbitrary key → value).
    #[serde(default)]
    pub service_options: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_requirements: Option<String>,
    pub contact_name: String,
    /// Contact identity for notification (email, phone, messenger handle).
    pub contact: String,
    pub status: OrderStatus,
    /// The resolved prompt, persisted by the workflow before generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl Order {
    /// Create a new order in the `received` state.
    pub fn new(
        service_type: impl Into<String>,
        details: impl Into<String>,
        contact_name: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            service_type: service_type.into(),
            details: details.into(),
            service_options: HashMap::new(),
            additional_requirements: None,
            contact_name: contact_name.into(),
            contact: contact.into(),
            status: OrderStatus::Received,
            prompt: None,
            created_at: chrono::Utc::now().timestamp_millis(),
            completed_at: None,
        }
    }
}

/// A partial update applied to an order by the workflow.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub prompt: Option<String>,
    pub completed_at: Option<i64>,
}

/// A named, versioned prompt template bound to one service-type slug.
///
/// Only one active template per slug is consulted. Absence of an active
/// template is a normal, handled case: the builder degrades to its
/// deterministic fallback prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: i64,
    pub name: String,
    pub service_type: String,
    /// Template string with `{{placeholder}}` tokens.
    pub template: String,
    pub version: i64,
    pub active: bool,
}

/// An immutable generated-content record. Append-only: regeneration adds a
/// new record rather than overwriting, preserving version history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub id: i64,
    pub order_id: String,
    pub content: String,
    /// Content type — the service slug of the originating order.
    pub content_type: String,
    /// The exact prompt sent to the backend, for provenance.
    pub prompt_used: String,
    /// Identifier of the backend model that produced the text.
    pub model_used: String,
    /// sha256 of the content, hex-encoded.
    pub content_hash: String,
    pub created_at: i64,
}

/// Fields for appending a new generated-content record.
#[derive(Debug, Clone)]
pub struct NewGeneratedContent {
    pub order_id: String,
    pub content: String,
    pub content_type: String,
    pub prompt_used: String,
    pub model_used: String,
    pub content_hash: String,
}

/// LSI keyword category. Serialized to the Russian labels the content
/// tooling expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordCategory {
    #[serde(rename = "основные")]
    Core,
    #[serde(rename = "синонимы")]
    Synonyms,
    #[serde(rename = "смежные")]
    Related,
    #[serde(rename = "технические")]
    Technical,
    #[serde(rename = "коммерческие")]
    Commercial,
}

/// A semantically related keyword with a relevance weight in [0.5, 1.0].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LsiKeyword {
    pub keyword: String,
    pub relevance: f64,
    pub category: KeywordCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::Received,
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Failed,
        ] {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_new_order_defaults() {
        let order = Order::new("seo-article", "статья про кофеварки", "Анна", "anna@example.com");
        assert_eq!(order.status, OrderStatus::Received);
        assert!(order.prompt.is_none());
        assert!(order.service_options.is_empty());
        assert!(!order.id.is_empty());
    }

    #[test]
    fn test_keyword_category_serde() {
        let kw = LsiKeyword {
            keyword: "кофеварка цена".into(),
            relevance: 0.8,
            category: KeywordCategory::Commercial,
        };
        let json = serde_json::to_string(&kw).unwrap();
        assert!(json.contains("коммерческие"));
        let back: LsiKeyword = serde_json::from_str(&json).unwrap();
        assert_eq!(back.category, KeywordCategory::Commercial);
    }
}
