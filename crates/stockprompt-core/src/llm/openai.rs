//! OpenAI backend for the session path, using the Chat Completions API.

use super::provider::{non_empty, send_json};
use super::session::ChatSession;
use crate::error::GenerationError;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "openai";

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    /// End-user identifier; carries the session id
    user: &'a str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
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

/// Send the session's system message plus `instruction` as one chat completion.
pub(crate) async fn send(
    client: &reqwest::Client,
    endpoint: &str,
    session: &ChatSession,
    model: &str,
    api_key: &str,
    instruction: &str,
) -> Result<String, GenerationError> {
    let body = ChatRequest {
        model,
        user: session.id(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: session.system_message(),
            },
            ChatMessage {
                role: "user",
                content: instruction,
            },
        ],
    };

    let request = client
        .post(endpoint)
        .header("Authorization", format!("Bearer {api_key}"));
    let resp: ChatResponse = send_json(PROVIDER, request, &body).await?;

    let text = resp.choices.into_iter().next().and_then(|c| c.message.content);
    non_empty(PROVIDER, text)
}
