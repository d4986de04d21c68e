//! Claude backend for the session path, using the Anthropic Messages API.

use super::provider::{non_empty, send_json};
use super::session::ChatSession;
use crate::error::GenerationError;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "claude";

/// The Messages API requires an explicit output cap.
const MAX_TOKENS: u32 = 4096;

// --- Request types ---

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
    metadata: Metadata<'a>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct Metadata<'a> {
    user_id: &'a str,
}

// --- Response types ---

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    text: Option<String>,
}

/// Send the instruction as the single user message of a Messages request.
pub(crate) async fn send(
    client: &reqwest::Client,
    endpoint: &str,
    api_version: &str,
    session: &ChatSession,
    model: &str,
    api_key: &str,
    instruction: &str,
) -> Result<String, GenerationError> {
    let body = MessagesRequest {
        model,
        max_tokens: MAX_TOKENS,
        system: session.system_message(),
        messages: vec![Message {
            role: "user",
            content: instruction,
        }],
        metadata: Metadata {
            user_id: session.id(),
        },
    };

    let request = client
        .post(endpoint)
        .header("x-api-key", api_key)
        .header("anthropic-version", api_version);
    let resp: MessagesResponse = send_json(PROVIDER, request, &body).await?;

    let text = resp
        .content
        .into_iter()
        .filter_map(|c| c.text)
        .collect::<Vec<_>>()
        .join("");
    non_empty(PROVIDER, Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::SYSTEM_PERSONA;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_claude_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "ak-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [
                    {"type": "text", "text": "[\"one\","},
                    {"type": "text", "text": "\"two\"]"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let session = ChatSession::open(SYSTEM_PERSONA);

        let text = send(
            &reqwest::Client::new(),
            &format!("{}/v1/messages", server.uri()),
            "2023-06-01",
            &session,
            "claude-sonnet-4-20250514",
            "ak-test",
            "Generate 2 prompts",
        )
        .await
        .unwrap();
        assert_eq!(text, "[\"one\",\"two\"]");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = requests[0].body_json().unwrap();
        assert_eq!(body["system"], SYSTEM_PERSONA);
        assert_eq!(body["max_tokens"], 4096);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["content"], "Generate 2 prompts");
        assert_eq!(body["metadata"]["user_id"], session.id());
    }

    #[tokio::test]
    async fn test_claude_auth_failure_carries_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = send(
            &reqwest::Client::new(),
            &format!("{}/v1/messages", server.uri()),
            "2023-06-01",
            &ChatSession::open(SYSTEM_PERSONA),
            "claude-sonnet-4-20250514",
            "ak-bad",
            "hi",
        )
        .await
        .unwrap_err();

        match err {
            GenerationError::Provider {
                provider,
                message,
                status_code,
            } => {
                assert_eq!(provider, "claude");
                assert_eq!(status_code, Some(401));
                assert!(message.contains("invalid x-api-key"));
                assert!(!message.contains("ak-bad"));
            }
            other => panic!("Expected Provider error, got {other:?}"),
        }
    }
}
