//! Gemini backend for the session path, using `generateContent`.
//!
//! The key goes in the `x-goog-api-key` header rather than the query string
//! so it never shows up in a URL inside an error message.

use super::provider::{non_empty, send_json};
use super::session::ChatSession;
use crate::error::GenerationError;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "gemini";

// --- Request types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

// --- Response types ---

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Send the instruction as the single user turn of a `generateContent` call.
pub(crate) async fn send(
    client: &reqwest::Client,
    endpoint: &str,
    session: &ChatSession,
    model: &str,
    api_key: &str,
    instruction: &str,
) -> Result<String, GenerationError> {
    let url = format!("{endpoint}/models/{model}:generateContent");
    let body = GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: session.system_message(),
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: instruction }],
        }],
    };

    let request = client.post(&url).header("x-goog-api-key", api_key);
    let resp: GenerateResponse = send_json(PROVIDER, request, &body).await?;

    let text = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        });
    non_empty(PROVIDER, text)
}
