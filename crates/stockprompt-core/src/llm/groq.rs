//! Groq provider.
//!
//! Does not go through the session path: it sends its own explicit
//! system/user message pair with fixed sampling settings to Groq's
//! OpenAI-compatible Chat Completions endpoint.

use super::provider::{non_empty, send_json, LlmProvider, SYSTEM_PERSONA};
use crate::error::GenerationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "groq";
const TEMPERATURE: f32 = 0.8;
const MAX_TOKENS: u32 = 2000;

/// Groq provider using the OpenAI-compatible Chat Completions API.
pub struct GroqProvider {
    endpoint: String,
    client: reqwest::Client,
}

impl GroqProvider {
    pub fn new(endpoint: &str, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client,
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

// --- Response types ---

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn invoke(
        &self,
        model: &str,
        api_key: &str,
        instruction: &str,
    ) -> Result<String, GenerationError> {
        let body = CompletionRequest {
            model,
            messages: [
                Message {
                    role: "system",
                    content: SYSTEM_PERSONA,
                },
                Message {
                    role: "user",
                    content: instruction,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let request = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {api_key}"));

        let result = send_json::<_, CompletionResponse>(PROVIDER, request, &body)
            .await
            .and_then(|resp| {
                let text = resp.choices.into_iter().next().and_then(|c| c.message.content);
                non_empty(PROVIDER, text)
            });

        if let Err(e) = &result {
            tracing::error!("{e}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_groq_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("authorization", "Bearer gsk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "1. foo\n2. bar"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let provider = GroqProvider::new(
            &format!("{}/openai/v1/chat/completions", server.uri()),
            reqwest::Client::new(),
        );

        let text = provider
            .invoke("llama-3.3-70b-versatile", "gsk-test", "Generate 2 prompts")
            .await
            .unwrap();
        assert_eq!(text, "1. foo\n2. bar");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = requests[0].body_json().unwrap();
        assert_eq!(body["model"], "llama-3.3-70b-versatile");
        assert_eq!(body["max_tokens"], 2000);
        assert!((body["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PERSONA);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Generate 2 prompts");
        assert!(body.get("user").is_none());
    }

    #[tokio::test]
    async fn test_groq_server_error_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(json!({"error": {"message": "over capacity"}})),
            )
            .expect(1)
            .mount(&server)
            .await;
        let provider = GroqProvider::new(
            &format!("{}/openai/v1/chat/completions", server.uri()),
            reqwest::Client::new(),
        );

        let err = provider
            .invoke("llama-3.3-70b-versatile", "gsk-test", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Provider { status_code: Some(503), .. }));
    }
}
