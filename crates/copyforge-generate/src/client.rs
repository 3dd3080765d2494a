//! HTTP chat-completion client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use copyforge_core::{Error, Result};

use crate::types::{ChatMessage, GenerationOptions};

/// Fixed system instruction for content generation.
const SYSTEM_PROMPT: &str = "Ты профессиональный копирайтер. Создавай уникальные \
    тексты, точно соответствующие брифу заказчика.";

/// Text-completion backend: prompt in, text out, or a typed failure.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn complete(&self, prompt: &str, options: &GenerationOptions) -> Result<String>;
}

/// reqwest-backed client for an OpenAI-compatible chat-completion endpoint.
pub struct HttpGenerationClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl HttpGenerationClient {
    /// Build the client. The request timeout is set here; a builder failure
    /// is a configuration error, not a fallback to an untimed client.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
            timeout_secs,
        })
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn complete(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let messages = [
            ChatMessage {
                role: "system".into(),
                content: SYSTEM_PROMPT.into(),
            },
            ChatMessage {
                role: "user".into(),
                content: prompt.to_string(),
            },
        ];
        let body = json!({
            "model": options.model,
            "messages": messages,
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        });

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!("Requesting completion from {} with model {}", url, options.model);

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::GenerationTimeout(self.timeout_secs)
            } else {
                Error::Generation {
                    status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                    message: format!("request failed: {}", e),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Generation {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: serde_json::Value = response.json().await.map_err(|e| Error::Generation {
            status: status.as_u16(),
            message: format!("invalid response body: {}", e),
        })?;

        match extract_content(&parsed) {
            Some(text) => Ok(text.to_string()),
            None => Err(Error::Generation {
                status: status.as_u16(),
                message: "response has no message content".into(),
            }),
        }
    }
}

/// Pull the completion text out of a chat-completion response body.
fn extract_content(response: &serde_json::Value) -> Option<&str> {
    response["choices"][0]["message"]["content"].as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "Готовый текст."}}]
        });
        assert_eq!(extract_content(&body), Some("Готовый текст."));
    }

    #[test]
    fn test_extract_content_missing() {
        assert_eq!(extract_content(&json!({"choices": []})), None);
        assert_eq!(extract_content(&json!({})), None);
    }

    #[test]
    fn test_client_construction_with_timeout() {
        let client = HttpGenerationClient::new("http://localhost:9999/v1", None, 30);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().timeout_secs, 30);
    }

    #[test]
    fn test_error_kinds_are_distinct() {
        let timeout = Error::GenerationTimeout(120);
        let backend = Error::Generation {
            status: 500,
            message: "boom".into(),
        };
        assert!(timeout.to_string().contains("timed out"));
        assert!(backend.to_string().contains("500"));
    }
}
