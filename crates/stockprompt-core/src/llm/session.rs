//! Shared session-based invocation path for OpenAI, Claude and Gemini.
//!
//! Every call opens a throwaway [`ChatSession`] with its own identifier and
//! the fixed expert persona as system instruction, then sends the rendered
//! instruction as the only user turn. The backends differ only in wire format.

use super::provider::{LlmProvider, SYSTEM_PERSONA};
use super::{anthropic, gemini, openai};
use crate::error::GenerationError;
use crate::types::ProviderKind;
use async_trait::async_trait;
use tracing::Instrument;

/// A single-use chat session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: String,
    system_message: String,
}

impl ChatSession {
    /// Open a session with a fresh `prompt-gen-<uuid>` identifier.
    pub fn open(system_message: &str) -> Self {
        Self {
            id: format!("prompt-gen-{}", uuid::Uuid::new_v4()),
            system_message: system_message.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn system_message(&self) -> &str {
        &self.system_message
    }
}

/// Wire format used by a session provider.
#[derive(Debug, Clone)]
pub enum ChatBackend {
    OpenAi { endpoint: String },
    Claude { endpoint: String, api_version: String },
    Gemini { endpoint: String },
}

impl ChatBackend {
    pub fn openai(endpoint: &str) -> Self {
        Self::OpenAi {
            endpoint: endpoint.to_string(),
        }
    }

    pub fn claude(endpoint: &str, api_version: &str) -> Self {
        Self::Claude {
            endpoint: endpoint.to_string(),
            api_version: api_version.to_string(),
        }
    }

    pub fn gemini(endpoint: &str) -> Self {
        Self::Gemini {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

/// Provider that talks to its backend through a per-call [`ChatSession`].
pub struct SessionProvider {
    kind: ProviderKind,
    backend: ChatBackend,
    client: reqwest::Client,
}

impl SessionProvider {
    pub fn new(kind: ProviderKind, backend: ChatBackend, client: reqwest::Client) -> Self {
        Self {
            kind,
            backend,
            client,
        }
    }
}

#[async_trait]
impl LlmProvider for SessionProvider {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    async fn invoke(
        &self,
        model: &str,
        api_key: &str,
        instruction: &str,
    ) -> Result<String, GenerationError> {
        let session = ChatSession::open(SYSTEM_PERSONA);
        let span = tracing::debug_span!("chat_session", provider = self.name(), session = session.id());

        let result = async {
            tracing::debug!("Sending instruction ({} chars)", instruction.len());
            match &self.backend {
                ChatBackend::OpenAi { endpoint } => {
                    openai::send(&self.client, endpoint, &session, model, api_key, instruction)
                        .await
                }
                ChatBackend::Claude {
                    endpoint,
                    api_version,
                } => {
                    anthropic::send(
                        &self.client,
                        endpoint,
                        api_version,
                        &session,
                        model,
                        api_key,
                        instruction,
                    )
                    .await
                }
                ChatBackend::Gemini { endpoint } => {
                    gemini::send(&self.client, endpoint, &session, model, api_key, instruction)
                        .await
                }
            }
        }
        .instrument(span)
        .await;

        if let Err(e) = &result {
            tracing::error!("{e}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_get_fresh_ids() {
        let a = ChatSession::open(SYSTEM_PERSONA);
        let b = ChatSession::open(SYSTEM_PERSONA);
        assert!(a.id().starts_with("prompt-gen-"));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.system_message(), SYSTEM_PERSONA);
    }

    #[test]
    fn test_gemini_backend_trims_trailing_slash() {
        match ChatBackend::gemini("http://localhost:1234/v1beta/") {
            ChatBackend::Gemini { endpoint } => {
                assert_eq!(endpoint, "http://localhost:1234/v1beta")
            }
            other => panic!("Expected Gemini backend, got {other:?}"),
        }
    }

    #[test]
    fn test_session_provider_name_follows_kind() {
        let provider = SessionProvider::new(
            ProviderKind::Claude,
            ChatBackend::claude("http://localhost", "2023-06-01"),
            reqwest::Client::new(),
        );
        assert_eq!(provider.name(), "claude");
    }
}
