//! Prompt builder: template resolution and placeholder substitution.

use std::sync::Arc;

use tracing::debug;

use copyforge_core::{Order, PromptTemplate, Result};
use copyforge_store::TemplateStore;

use crate::keywords;

/// Display names for the known service slugs. Unknown slugs fall back to the
/// slug itself.
pub fn service_name(slug: &str) -> &str {
    match slug {
        "seo-article" => "SEO-статья",
        "landing" => "Текст для лендинга",
        "product-description" => "Описание товара",
        "social-media" => "Пост для соцсетей",
        "email-campaign" => "Текст email-рассылки",
        other => other,
    }
}

/// Builds generation prompts for orders.
///
/// Pure apart from the template lookup: for a fixed order and template state,
/// `build` always returns the same string.
pub struct PromptBuilder {
    templates: Arc<dyn TemplateStore>,
}

impl PromptBuilder {
    pub fn new(templates: Arc<dyn TemplateStore>) -> Self {
        Self { templates }
    }

    /// Resolve the prompt for an order.
    ///
    /// Uses the active template for the order's service type when one exists;
    /// otherwise synthesizes the deterministic fallback prompt. Only storage
    /// failures are errors — a missing template is not.
    pub fn build(&self, order: &Order) -> Result<String> {
        let keywords = extract_order_keywords(order);

        match self.templates.active_template(&order.service_type)? {
            Some(template) => {
                debug!(
                    "Using template '{}' v{} for service '{}'",
                    template.name, template.version, order.service_type
                );
                Ok(render(&template, order, &keywords))
            }
            None => {
                debug!(
                    "No active template for service '{}', using fallback prompt",
                    order.service_type
                );
                Ok(fallback_prompt(order, &keywords))
            }
        }
    }
}

/// Extract keywords from the order's combined requirement text.
fn extract_order_keywords(order: &Order) -> Vec<String> {
    let combined = match &order.additional_requirements {
        Some(extra) => format!("{} {}", order.details, extra),
        None => order.details.clone(),
    };
    keywords::extract(&combined)
}

/// Literal substitution of `{{field}}` tokens.
///
/// Unresolved placeholders are left verbatim: a partially configured template
/// degrades to a visible artifact instead of failing the order.
fn render(template: &PromptTemplate, order: &Order, keywords: &[String]) -> String {
    let mut out = template.template.clone();

    out = out.replace("{{service_name}}", service_name(&order.service_type));
    out = out.replace("{{details}}", &order.details);
    out = out.replace(
        "{{additional_requirements}}",
        order.additional_requirements.as_deref().unwrap_or(""),
    );
    out = out.replace("{{contact_name}}", &order.contact_name);

    for (key, value) in &order.service_options {
        out = out.replace(&format!("{{{{{}}}}}", key), value);
    }

    out = out.replace("{{keywords}}", &keywords.join(", "));

    out
}

/// Deterministic fallback prompt used when no template is configured.
fn fallback_prompt(order: &Order, keywords: &[String]) -> String {
    let mut parts = vec![format!(
        "Напиши {} на тему: {}.",
        service_name(&order.service_type),
        order.details
    )];

    if let Some(extra) = &order.additional_requirements {
        if !extra.trim().is_empty() {
            parts.push(format!("Дополнительные требования: {}.", extra));
        }
    }

    if !keywords.is_empty() {
        parts.push(format!("Ключевые слова: {}.", keywords.join(", ")));
    }

    parts.push(
        "Текст должен быть написан профессиональным тоном, быть уникальным и \
         SEO-оптимизированным, содержать призыв к действию."
            .to_string(),
    );
    parts.push("Объем текста: 1500-2000 символов".to_string());

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use copyforge_store::{MemoryStore, NewTemplate};

    fn order_with(service_type: &str, details: &str) -> Order {
        Order::new(service_type, details, "Анна", "anna@example.com")
    }

    fn builder_with_template(template: &str, service_type: &str) -> PromptBuilder {
        let store = MemoryStore::new();
        store
            .add_template(NewTemplate {
                name: "test".into(),
                service_type: service_type.into(),
                template: template.into(),
                version: 1,
                active: true,
            })
            .unwrap();
        PromptBuilder::new(Arc::new(store))
    }

    #[test]
    fn test_build_is_idempotent() {
        let builder = builder_with_template(
            "Тема: {{details}}. Ключевые слова: {{keywords}}.",
            "seo-article",
        );
        let order = order_with("seo-article", "статья про кофеварки");

        let first = builder.build(&order).unwrap();
        let second = builder.build(&order).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("статья про кофеварки"));
        assert!(first.contains("кофеварки"));
    }

    #[test]
    fn test_substitutes_core_fields_and_options() {
        let builder = builder_with_template(
            "{{service_name}} для {{contact_name}}: {{details}} ({{length}} знаков)",
            "seo-article",
        );
        let mut order = order_with("seo-article", "обзор турок");
        order.service_options.insert("length".into(), "3000".into());

        let prompt = builder.build(&order).unwrap();
        assert_eq!(prompt, "SEO-статья для Анна: обзор турок (3000 знаков)");
    }

    #[test]
    fn test_unknown_placeholder_left_verbatim() {
        let builder =
            builder_with_template("{{details}} + {{unknown_field}}", "seo-article");
        let order = order_with("seo-article", "текст");

        let prompt = builder.build(&order).unwrap();
        assert_eq!(prompt, "текст + {{unknown_field}}");
    }

    #[test]
    fn test_fallback_when_no_active_template() {
        // Scenario A: no active template for the slug
        let builder = PromptBuilder::new(Arc::new(MemoryStore::new()));
        let order = order_with("seo-article", "статья про кофеварки");

        let prompt = builder.build(&order).unwrap();
        assert!(prompt.contains("статья про кофеварки"));
        assert!(prompt.contains("кофеварки"));
        assert!(prompt.ends_with("1500-2000 символов"));
    }

    #[test]
    fn test_fallback_includes_additional_requirements() {
        let builder = PromptBuilder::new(Arc::new(MemoryStore::new()));
        let mut order = order_with("landing", "лендинг кофейни");
        order.additional_requirements = Some("упомянуть доставку".into());

        let prompt = builder.build(&order).unwrap();
        assert!(prompt.contains("упомянуть доставку"));
        assert!(prompt.contains("Текст для лендинга"));
    }

    #[test]
    fn test_inactive_template_ignored() {
        let store = MemoryStore::new();
        store
            .add_template(NewTemplate {
                name: "off".into(),
                service_type: "seo-article".into(),
                template: "из шаблона: {{details}}".into(),
                version: 1,
                active: false,
            })
            .unwrap();
        let builder = PromptBuilder::new(Arc::new(store));
        let order = order_with("seo-article", "статья");

        let prompt = builder.build(&order).unwrap();
        assert!(!prompt.starts_with("из шаблона"));
        assert!(prompt.ends_with("1500-2000 символов"));
    }
}
