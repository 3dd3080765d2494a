//! In-memory store for tests and embedded hosts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::RwLock;

use crate::traits::{ContentStore, NewTemplate, OrderStore, TemplateStore};
use copyforge_core::{
    GeneratedContent, NewGeneratedContent, Order, OrderPatch, PromptTemplate, Result,
};

/// HashMap-backed implementation of all three repository traits.
#[derive(Default)]
pub struct MemoryStore {
    orders: RwLock<HashMap<String, Order>>,
    templates: RwLock<Vec<PromptTemplate>>,
    contents: RwLock<Vec<GeneratedContent>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    fn alloc_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

impl OrderStore for MemoryStore {
    fn get_order(&self, id: &str) -> Result<Option<Order>> {
        Ok(self.orders.read().get(id).cloned())
    }

    fn insert_order(&self, order: &Order) -> Result<()> {
        self.orders.write().insert(order.id.clone(), order.clone());
        Ok(())
    }

    fn update_order(&self, id: &str, patch: &OrderPatch) -> Result<bool> {
        let mut orders = self.orders.write();
        match orders.get_mut(id) {
            Some(order) => {
                if let Some(status) = patch.status {
                    order.status = status;
                }
                if let Some(prompt) = &patch.prompt {
                    order.prompt = Some(prompt.clone());
                }
                if let Some(completed_at) = patch.completed_at {
                    order.completed_at = Some(completed_at);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl TemplateStore for MemoryStore {
    fn active_template(&self, service_type: &str) -> Result<Option<PromptTemplate>> {
        Ok(self
            .templates
            .read()
            .iter()
            .filter(|t| t.service_type == service_type && t.active)
            .max_by_key(|t| t.version)
            .cloned())
    }

    fn add_template(&self, template: NewTemplate) -> Result<i64> {
        let mut templates = self.templates.write();
        if template.active {
            for t in templates
                .iter_mut()
                .filter(|t| t.service_type == template.service_type)
            {
                t.active = false;
            }
        }
        let id = self.alloc_id();
        templates.push(PromptTemplate {
            id,
            name: template.name,
            service_type: template.service_type,
            template: template.template,
            version: template.version,
            active: template.active,
        });
        Ok(id)
    }

    fn list_templates(&self) -> Result<Vec<PromptTemplate>> {
        Ok(self.templates.read().clone())
    }
}

impl ContentStore for MemoryStore {
    fn add_content(&self, content: &NewGeneratedContent) -> Result<i64> {
        let id = self.alloc_id();
        self.contents.write().push(GeneratedContent {
            id,
            order_id: content.order_id.clone(),
            content: content.content.clone(),
            content_type: content.content_type.clone(),
            prompt_used: content.prompt_used.clone(),
            model_used: content.model_used.clone(),
            content_hash: content.content_hash.clone(),
            created_at: chrono::Utc::now().timestamp_millis(),
        });
        Ok(id)
    }

    fn contents_for_order(&self, order_id: &str) -> Result<Vec<GeneratedContent>> {
        Ok(self
            .contents
            .read()
            .iter()
            .filter(|c| c.order_id == order_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copyforge_core::OrderStatus;

    #[test]
    fn test_order_patch() {
        let store = MemoryStore::new();
        let order = Order::new("seo-article", "текст", "Анна", "anna@x.ru");
        store.insert_order(&order).unwrap();

        store
            .update_order(
                &order.id,
                &OrderPatch {
                    status: Some(OrderStatus::Completed),
                    prompt: None,
                    completed_at: Some(123),
                },
            )
            .unwrap();

        let loaded = store.get_order(&order.id).unwrap().unwrap();
        assert_eq!(loaded.status, OrderStatus::Completed);
        assert_eq!(loaded.completed_at, Some(123));
        assert!(loaded.prompt.is_none());
    }

    #[test]
    fn test_active_template_highest_version_wins() {
        let store = MemoryStore::new();
        store
            .add_template(NewTemplate {
                name: "v1".into(),
                service_type: "landing".into(),
                template: "a".into(),
                version: 1,
                active: true,
            })
            .unwrap();
        store
            .add_template(NewTemplate {
                name: "v2".into(),
                service_type: "landing".into(),
                template: "b".into(),
                version: 2,
                active: true,
            })
            .unwrap();

        let tpl = store.active_template("landing").unwrap().unwrap();
        assert_eq!(tpl.name, "v2");
    }
}
