//! The order pipeline: prompt, generation, persistence, scoring, notification.

use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use copyforge_core::{Error, NewGeneratedContent, Order, OrderPatch, OrderStatus, Result};
use copyforge_generate::{GenerationClient, GenerationOptions};
use copyforge_prompt::{service_name, PromptBuilder};
use copyforge_quality::{QualityMetrics, QualityScorer};
use copyforge_store::{ContentStore, OrderStore};

use crate::notify::{Notification, Notifier};

/// Outcome of one processing run.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowReport {
    pub success: bool,
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Drives an order from `received` to `completed`.
///
/// Step order is fixed: load, resolve prompt, mark processing, generate,
/// persist content, mark completed, notify. A generation failure leaves the
/// order in `processing` with its prompt persisted, so a retry resumes from
/// a consistent state. Notification failures are logged, never fatal.
pub struct OrderWorkflow {
    orders: Arc<dyn OrderStore>,
    contents: Arc<dyn ContentStore>,
    prompts: PromptBuilder,
    client: Arc<dyn GenerationClient>,
    notifier: Arc<dyn Notifier>,
    scorer: Option<QualityScorer>,
    options: GenerationOptions,
}

impl OrderWorkflow {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        contents: Arc<dyn ContentStore>,
        prompts: PromptBuilder,
        client: Arc<dyn GenerationClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            orders,
            contents,
            prompts,
            client,
            notifier,
            scorer: Some(QualityScorer::new()),
            options: GenerationOptions::default(),
        }
    }

    /// Replace the default scorer, or disable scoring with `None`.
    pub fn with_scorer(mut self, scorer: Option<QualityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Process one order end to end.
    ///
    /// An unknown id is an error. A generation failure is reported in the
    /// returned [`WorkflowReport`], not as an error, because the order state
    /// remains valid for retry.
    pub async fn process(&self, order_id: &str) -> Result<WorkflowReport> {
        let order = self
            .orders
            .get_order(order_id)?
            .ok_or_else(|| Error::OrderNotFound(order_id.to_string()))?;

        let prompt = self.prompts.build(&order)?;
        self.orders.update_order(
            order_id,
            &OrderPatch {
                status: Some(OrderStatus::Processing),
                prompt: Some(prompt.clone()),
                completed_at: None,
            },
        )?;
        info!("Order {} moved to processing", order_id);

        let content = match self.client.complete(&prompt, &self.options).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Generation failed for order {}: {}", order_id, e);
                return Ok(WorkflowReport {
                    success: false,
                    order_id: order_id.to_string(),
                    content_id: None,
                    quality: None,
                    error: Some(e.to_string()),
                });
            }
        };

        let content_id = self.contents.add_content(&NewGeneratedContent {
            order_id: order_id.to_string(),
            content: content.clone(),
            content_type: order.service_type.clone(),
            prompt_used: prompt,
            model_used: self.options.model.clone(),
            content_hash: content_hash(&content),
        })?;

        let quality = self.scorer.as_ref().map(|s| s.score(&content));

        self.orders.update_order(
            order_id,
            &OrderPatch {
                status: Some(OrderStatus::Completed),
                prompt: None,
                completed_at: Some(chrono::Utc::now().timestamp_millis()),
            },
        )?;
        info!("Order {} completed, content record {}", order_id, content_id);

        if let Err(e) = self.notifier.notify(&completion_notification(&order)).await {
            warn!("Notification failed for order {}: {}", order_id, e);
        }

        Ok(WorkflowReport {
            success: true,
            order_id: order_id.to_string(),
            content_id: Some(content_id),
            quality,
            error: None,
        })
    }
}

/// sha256 of the content, hex-encoded.
fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

fn completion_notification(order: &Order) -> Notification {
    Notification {
        contact: order.contact.clone(),
        title: "Ваш заказ готов".to_string(),
        message: format!(
            "{}, текст ({}) по заказу {} готов и доступен для просмотра.",
            order.contact_name,
            service_name(&order.service_type),
            order.id
        ),
    }
}
