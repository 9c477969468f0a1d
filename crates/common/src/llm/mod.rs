//! LLM rewriter abstraction
//!
//! Provides a unified interface over chat-completion providers used to
//! rewrite queued feed articles into original content. A single request
//! is made per item; failures propagate to the caller, which records
//! them on the queue item instead of retrying here.

use crate::errors::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Trait for article rewriting
#[async_trait]
pub trait Rewriter: Send + Sync {
    /// Send a rewrite prompt and return the raw completion text
    async fn rewrite(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// OpenAI chat-completions client
pub struct OpenAiRewriter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiRewriter {
    /// Create a new OpenAI rewriter
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout_secs: u64,
        max_tokens: u32,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| crate::DEFAULT_LLM_MODEL.to_string()),
            max_tokens,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
        })
    }
}

#[async_trait]
impl Rewriter for OpenAiRewriter {
    async fn rewrite(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt.to_string(),
                },
            ],
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::LlmError {
                message: format!("Request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::LlmError {
                message: format!("API error {}: {}", status, body),
            });
        }

        let result: ChatResponse = response.json().await.map_err(|e| AppError::LlmError {
            message: format!("Failed to parse response: {}", e),
        })?;

        result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AppError::LlmResponseError {
                message: "Completion contained no choices".to_string(),
            })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Mock rewriter for testing
pub struct MockRewriter {
    response: String,
}

impl MockRewriter {
    pub fn new() -> Self {
        Self {
            response: serde_json::json!({
                "title": "Mock Rewritten Title",
                "body": "Mock rewritten body about technology.",
                "excerpt": "Mock excerpt.",
                "category": "technology",
                "topics": ["technology"],
                "source_urls": [],
                "image_gen_prompts": []
            })
            .to_string(),
        }
    }

    /// Fix the response to a specific completion text
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl Default for MockRewriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rewriter for MockRewriter {
    async fn rewrite(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-rewriter"
    }
}

/// Create a rewriter based on configuration
pub fn create_rewriter(config: &crate::config::LlmConfig) -> Result<Arc<dyn Rewriter>> {
    match config.provider.as_str() {
        "openai" => {
            let key = config
                .api_key
                .clone()
                .ok_or_else(|| AppError::Configuration {
                    message: "OpenAI API key required".to_string(),
                })?;
            Ok(Arc::new(OpenAiRewriter::new(
                key,
                Some(config.model.clone()),
                config.api_base.clone(),
                config.timeout_secs,
                config.max_tokens,
            )?))
        }
        "mock" => Ok(Arc::new(MockRewriter::new())),
        other => {
            tracing::warn!(provider = other, "Unknown LLM provider, using mock");
            Ok(Arc::new(MockRewriter::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_rewriter_returns_canned_json() {
        let rewriter = MockRewriter::new();
        let out = rewriter.rewrite("system", "user").await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["category"], "technology");
    }

    #[tokio::test]
    async fn test_mock_rewriter_custom_response() {
        let rewriter = MockRewriter::with_response("not json at all");
        let out = rewriter.rewrite("system", "user").await.unwrap();
        assert_eq!(out, "not json at all");
    }

    #[tokio::test]
    async fn test_openai_rewriter_returns_first_choice_content() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    {"message": {"content": "{\"title\": \"Rewritten\"}"}}
                ]
            })))
            .mount(&server)
            .await;

        let rewriter =
            OpenAiRewriter::new("test-key".to_string(), None, Some(server.uri()), 5, 1024)
                .unwrap();

        let out = rewriter.rewrite("system", "user").await.unwrap();
        assert_eq!(out, "{\"title\": \"Rewritten\"}");
    }

    #[tokio::test]
    async fn test_openai_rewriter_surfaces_api_errors() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let rewriter =
            OpenAiRewriter::new("test-key".to_string(), None, Some(server.uri()), 5, 1024)
                .unwrap();

        let err = rewriter.rewrite("system", "user").await.unwrap_err();
        assert!(err.to_string().contains("429"), "got: {err}");
    }

    #[tokio::test]
    async fn test_openai_rewriter_empty_choices_is_error() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let rewriter =
            OpenAiRewriter::new("test-key".to_string(), None, Some(server.uri()), 5, 1024)
                .unwrap();

        assert!(rewriter.rewrite("system", "user").await.is_err());
    }

    #[test]
    fn test_create_rewriter_requires_key_for_openai() {
        let config = crate::config::LlmConfig {
            provider: "openai".to_string(),
            api_key: None,
            api_base: None,
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 60,
            max_tokens: 4096,
        };
        assert!(create_rewriter(&config).is_err());
    }
}
