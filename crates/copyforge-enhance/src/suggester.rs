//! Backend-assisted keyword suggestion with a deterministic fallback.

use std::sync::Arc;

use tracing::warn;

use copyforge_core::{Degradable, KeywordCategory, LsiKeyword};
use copyforge_generate::{GenerationClient, GenerationOptions};

/// Default cap on the number of suggestions returned.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 15;

/// The offline fallback never derives more than this many keywords.
const FALLBACK_LIMIT: usize = 10;

/// Suggests LSI keywords for a topic. Primary path is the generation
/// backend; any failure degrades to local derivations from the seed
/// keywords instead of surfacing an error.
pub struct LsiSuggester {
    client: Arc<dyn GenerationClient>,
    options: GenerationOptions,
}

impl LsiSuggester {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(client: Arc<dyn GenerationClient>, options: GenerationOptions) -> Self {
        Self { client, options }
    }

    /// Suggest up to `max` keywords for a topic, using the seed keywords as
    /// anchors. Never fails: backend or parse trouble yields the fallback
    /// set, tagged with the reason.
    pub async fn suggest(
        &self,
        topic: &str,
        seeds: &[String],
        max: usize,
    ) -> Degradable<Vec<LsiKeyword>> {
        let prompt = build_prompt(topic, seeds, max);

        let reason = match self.client.complete(&prompt, &self.options).await {
            Ok(reply) => match crate::parse::parse_keywords(&reply) {
                Some(mut keywords) => {
                    keywords.truncate(max);
                    return Degradable::Full(keywords);
                }
                None => "backend reply had no usable keyword array".to_string(),
            },
            Err(e) => format!("backend request failed: {e}"),
        };

        warn!("LSI suggestion degraded for topic '{}': {}", topic, reason);
        Degradable::Degraded(fallback_keywords(topic, seeds, max), reason)
    }
}

fn build_prompt(topic: &str, seeds: &[String], max: usize) -> String {
    let mut prompt = format!(
        "Подбери LSI-ключевые слова для темы: {topic}.\n\
         Верни только JSON-массив объектов с полями keyword, relevance \
         (число от 0.5 до 1.0) и category (одно из: основные, синонимы, \
         смежные, технические, коммерческие). Не более {max} элементов."
    );
    if !seeds.is_empty() {
        prompt.push_str("\nИсходные ключевые слова: ");
        prompt.push_str(&seeds.join(", "));
        prompt.push('.');
    }
    prompt
}

/// Deterministic derivations used when the backend is unavailable: a
/// commercial and a question form per seed, plus two topic-level fillers.
/// Capped at [`FALLBACK_LIMIT`] regardless of the caller's `max`.
fn fallback_keywords(topic: &str, seeds: &[String], max: usize) -> Vec<LsiKeyword> {
    let mut keywords = Vec::new();

    for seed in seeds {
        keywords.push(LsiKeyword {
            keyword: format!("{seed} цена"),
            relevance: 0.75,
            category: KeywordCategory::Commercial,
        });
        keywords.push(LsiKeyword {
            keyword: format!("как {seed}"),
            relevance: 0.7,
            category: KeywordCategory::Related,
        });
    }

    let topic = topic.trim();
    if !topic.is_empty() {
        keywords.push(LsiKeyword {
            keyword: format!("{topic} обзор"),
            relevance: 0.65,
            category: KeywordCategory::Core,
        });
        keywords.push(LsiKeyword {
            keyword: format!("{topic} рекомендации"),
            relevance: 0.6,
            category: KeywordCategory::Related,
        });
    }

    keywords.truncate(FALLBACK_LIMIT.min(max));
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use copyforge_core::{Error, Result};

    struct FixedClient(String);

    #[async_trait]
    impl GenerationClient for FixedClient {
        async fn complete(&self, _prompt: &str, _options: &GenerationOptions) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl GenerationClient for FailingClient {
        async fn complete(&self, _prompt: &str, _options: &GenerationOptions) -> Result<String> {
            Err(Error::Generation {
                status: 503,
                message: "backend down".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_backend_reply_is_full() {
        let reply = r#"[
            {"keyword": "кофеварка рожковая", "relevance": 0.9, "category": "основные"},
            {"keyword": "кофеварка купить", "relevance": 0.85, "category": "коммерческие"}
        ]"#;
        let suggester = LsiSuggester::new(Arc::new(FixedClient(reply.to_string())));
        let result = suggester
            .suggest("кофеварка", &["кофеварка".into()], DEFAULT_MAX_SUGGESTIONS)
            .await;

        assert!(!result.is_degraded());
        assert_eq!(result.value().len(), 2);
    }

    #[tokio::test]
    async fn test_backend_failure_degrades_to_fallback() {
        let suggester = LsiSuggester::new(Arc::new(FailingClient));
        let result = suggester
            .suggest("кофеварка", &["кофеварка".into()], DEFAULT_MAX_SUGGESTIONS)
            .await;

        assert!(result.is_degraded());
        assert!(result.reason().unwrap().contains("backend request failed"));

        let keywords = result.value();
        let commercial = keywords
            .iter()
            .find(|k| k.category == KeywordCategory::Commercial)
            .unwrap();
        assert_eq!(commercial.keyword, "кофеварка цена");
        assert!(keywords.iter().any(|k| k.keyword == "как кофеварка"));
        assert!(keywords.iter().any(|k| k.keyword == "кофеварка обзор"));
    }

    #[tokio::test]
    async fn test_unusable_reply_degrades() {
        let suggester =
            LsiSuggester::new(Arc::new(FixedClient("не могу ответить".to_string())));
        let result = suggester
            .suggest("лендинг", &[], DEFAULT_MAX_SUGGESTIONS)
            .await;

        assert!(result.is_degraded());
        // topic-only fallback still produces suggestions
        assert_eq!(result.value().len(), 2);
    }

    #[tokio::test]
    async fn test_fallback_capped_below_caller_max() {
        let seeds: Vec<String> = (0..12).map(|i| format!("слово{i}")).collect();
        let keywords = fallback_keywords("тема", &seeds, DEFAULT_MAX_SUGGESTIONS);
        // fallback derivations stay capped at 10 even when max allows more
        assert_eq!(keywords.len(), FALLBACK_LIMIT);

        let few = fallback_keywords("тема", &seeds, 4);
        assert_eq!(few.len(), 4);
    }

    #[tokio::test]
    async fn test_backend_reply_respects_caller_max() {
        let entries: Vec<String> = (0..20)
            .map(|i| format!(r#"{{"keyword": "кв{i}", "relevance": 0.8, "category": "смежные"}}"#))
            .collect();
        let reply = format!("[{}]", entries.join(","));

        let suggester = LsiSuggester::new(Arc::new(FixedClient(reply.clone())));
        let result = suggester
            .suggest("тема", &[], DEFAULT_MAX_SUGGESTIONS)
            .await;
        assert_eq!(result.value().len(), DEFAULT_MAX_SUGGESTIONS);

        let suggester = LsiSuggester::new(Arc::new(FixedClient(reply)));
        let result = suggester.suggest("тема", &[], 3).await;
        assert_eq!(result.value().len(), 3);
    }
}
