use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Usage};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Content used when the completion carries no choice or no text
const EMPTY_COMPLETION: &str = "[]";

/// OpenAI chat completions provider
#[derive(Debug)]
pub struct OpenAiProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": model,
            "messages": request.messages,
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: OpenAiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse response: {}", e))
        })?;

        let choice = response.choices.into_iter().next();

        let content = choice
            .as_ref()
            .and_then(|c| c.message.content.as_deref())
            .filter(|text| !text.is_empty())
            .unwrap_or(EMPTY_COMPLETION);

        let mut llm_response = LlmResponse::new(content, response.model);

        if let Some(reason) = choice.and_then(|c| c.finish_reason) {
            llm_response = llm_response.with_finish_reason(FinishReason::from_wire(&reason));
        }

        if let Some(usage) = response.usage {
            llm_response = llm_response.with_usage(Usage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
            });
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OpenAiProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(model, &request);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

// OpenAI API types

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://api.openai.com/v1/chat/completions";

    fn completion(content: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o-mini",
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 8, "total_tokens": 18 }
        })
    }

    #[tokio::test]
    async fn test_openai_chat() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            completion(serde_json::json!(r#"[{"item":"2x4","quantity":3}]"#)),
        );
        let provider = OpenAiProvider::new(client, "test-api-key");

        let request = LlmRequest::instructed("Return only JSON", "Frame a wall");
        let response = provider.chat("gpt-4o-mini", request).await.unwrap();

        assert_eq!(response.model, "gpt-4o-mini");
        assert_eq!(response.content(), r#"[{"item":"2x4","quantity":3}]"#);
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));

        assert_eq!(
            response.usage,
            Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 8
            })
        );
    }

    #[tokio::test]
    async fn test_request_body_and_headers() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion("[]".into()));
        let provider = OpenAiProvider::new(client, "sk-test");

        let request =
            LlmRequest::instructed("Return only JSON", "Build a deck").with_temperature(0.2);
        provider.chat("gpt-4o-mini", request).await.unwrap();

        let recorded = provider.client.requests();
        assert_eq!(recorded.len(), 1);

        let body = recorded[0].body.as_ref().unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Build a deck");
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);

        assert!(
            recorded[0]
                .headers
                .contains(&("Authorization".to_string(), "Bearer sk-test".to_string()))
        );
    }

    #[tokio::test]
    async fn test_missing_choices_yield_empty_list() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            serde_json::json!({ "id": "chatcmpl-1", "model": "gpt-4o-mini", "choices": [] }),
        );
        let provider = OpenAiProvider::new(client, "test-key");

        let response = provider
            .chat("gpt-4o-mini", LlmRequest::instructed("", "x"))
            .await
            .unwrap();

        assert_eq!(response.content(), "[]");
        assert_eq!(response.finish_reason, None);
    }

    #[tokio::test]
    async fn test_null_content_yields_empty_list() {
        let client =
            MockHttpClient::new().with_response(TEST_URL, completion(serde_json::Value::Null));
        let provider = OpenAiProvider::new(client, "test-key");

        let response = provider
            .chat("gpt-4o-mini", LlmRequest::instructed("", "x"))
            .await
            .unwrap();

        assert_eq!(response.content(), "[]");
    }

    #[tokio::test]
    async fn test_openai_error_handling() {
        let client = MockHttpClient::new().with_error(TEST_URL, "API key invalid");
        let provider = OpenAiProvider::new(client, "invalid-key");

        let request = LlmRequest::instructed("", "Hello!");

        let result = provider.chat("gpt-4o-mini", request).await;
        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_openai_custom_base_url() {
        let custom_url = "http://localhost:8080/v1/chat/completions";
        let client = MockHttpClient::new().with_response(custom_url, completion("[]".into()));
        let provider = OpenAiProvider::with_base_url(client, "test-key", "http://localhost:8080/");

        let request = LlmRequest::instructed("", "Test");
        let response = provider.chat("gpt-4o-mini", request).await.unwrap();

        assert_eq!(response.content(), "[]");
    }

    #[tokio::test]
    async fn test_length_finish_is_truncated() {
        let mut body = completion(serde_json::json!(r#"[{"item":"2x4","quan"#));
        body["choices"][0]["finish_reason"] = "length".into();
        let client = MockHttpClient::new().with_response(TEST_URL, body);
        let provider = OpenAiProvider::new(client, "test-key");

        let response = provider
            .chat("gpt-4o-mini", LlmRequest::instructed("", "x"))
            .await
            .unwrap();

        assert!(response.is_truncated());
    }
}
