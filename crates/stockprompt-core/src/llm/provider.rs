//! LLM provider trait, shared HTTP plumbing, and the provider registry.
//!
//! Defines the interface that all providers implement, plus the factory and
//! registry that map a [`ProviderKind`] to a live provider.

use crate::config::LlmConfig;
use crate::error::{ConfigError, GenerationError};
use crate::types::ProviderKind;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Persona given to the model as its system instruction.
pub const SYSTEM_PERSONA: &str = "You are an expert at creating detailed, professional prompts \
    for microstock platforms like Shutterstock, Adobe Stock, and Getty Images. Generate prompts \
    that are descriptive, keyword-rich, and optimized for discoverability.";

/// Trait that all LLM providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Arc<dyn LlmProvider>` for dynamic dispatch).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging and error messages (e.g., "claude", "groq").
    fn name(&self) -> &str;

    /// Send `instruction` to `model` and return the raw reply text.
    ///
    /// Makes exactly one outbound request. Failures of any kind come back as
    /// [`GenerationError::Provider`].
    async fn invoke(
        &self,
        model: &str,
        api_key: &str,
        instruction: &str,
    ) -> Result<String, GenerationError>;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Send a prepared JSON request and decode the JSON reply.
///
/// Non-2xx statuses become provider errors carrying the status code and the
/// response body.
pub(crate) async fn send_json<B, R>(
    provider: &str,
    request: reqwest::RequestBuilder,
    body: &B,
) -> Result<R, GenerationError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let resp = request
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| GenerationError::provider(provider, format!("request failed: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Err(GenerationError::Provider {
            provider: provider.to_string(),
            message: format!("HTTP {status}: {text}"),
            status_code: Some(status.as_u16()),
        });
    }

    resp.json::<R>()
        .await
        .map_err(|e| GenerationError::provider(provider, format!("failed to parse response: {e}")))
}

/// Reject an empty completion; otherwise return it untouched.
pub(crate) fn non_empty(provider: &str, text: Option<String>) -> Result<String, GenerationError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(GenerationError::provider(
            provider,
            "empty response, no content generated",
        )),
    }
}

/// Factory that creates the provider for a given [`ProviderKind`].
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create a provider from its config section, sharing `client`.
    pub fn create(
        kind: ProviderKind,
        config: &LlmConfig,
        client: reqwest::Client,
    ) -> Arc<dyn LlmProvider> {
        use super::session::{ChatBackend, SessionProvider};

        match kind {
            ProviderKind::Openai => {
                let cfg = config.openai.clone().unwrap_or_default();
                Arc::new(SessionProvider::new(
                    kind,
                    ChatBackend::openai(&cfg.endpoint),
                    client,
                ))
            }
            ProviderKind::Claude => {
                let cfg = config.claude.clone().unwrap_or_default();
                Arc::new(SessionProvider::new(
                    kind,
                    ChatBackend::claude(&cfg.endpoint, &cfg.api_version),
                    client,
                ))
            }
            ProviderKind::Gemini => {
                let cfg = config.gemini.clone().unwrap_or_default();
                Arc::new(SessionProvider::new(
                    kind,
                    ChatBackend::gemini(&cfg.endpoint),
                    client,
                ))
            }
            ProviderKind::Groq => {
                let cfg = config.groq.clone().unwrap_or_default();
                Arc::new(super::groq::GroqProvider::new(&cfg.endpoint, client))
            }
        }
    }
}

/// Lookup table from provider kind to a ready provider.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn LlmProvider>>,
}

impl ProviderRegistry {
    /// An empty registry; register providers with [`Self::with_provider`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Build all supported providers from config.
    ///
    /// `timeout` is applied by the HTTP client to every provider request.
    pub fn from_config(config: &LlmConfig, timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::ValidationError(format!("failed to build HTTP client: {e}")))?;

        let mut registry = Self::new();
        for kind in ProviderKind::ALL {
            let provider = LlmProviderFactory::create(kind, config, client.clone());
            registry = registry.with_provider(kind, provider);
        }
        Ok(registry)
    }

    /// Register (or replace) the provider for `kind`.
    pub fn with_provider(mut self, kind: ProviderKind, provider: Arc<dyn LlmProvider>) -> Self {
        self.providers.insert(kind, provider);
        self
    }

    /// Look up the provider for `kind`.
    pub fn get(&self, kind: ProviderKind) -> Result<Arc<dyn LlmProvider>, GenerationError> {
        self.providers
            .get(&kind)
            .cloned()
            .ok_or_else(|| GenerationError::InvalidProvider(kind.to_string()))
    }
}
