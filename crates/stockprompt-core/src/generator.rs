//! The generation pipeline.
//!
//! ```text
//! request → credential → instruction → provider → normalize → record → store
//! ```

use crate::config::Config;
use crate::credential::{resolve_key, SharedKey};
use crate::error::GenerationError;
use crate::library::PromptLibrary;
use crate::llm::ProviderRegistry;
use crate::normalize::normalize_response;
use crate::template::render_instruction;
use crate::types::{GenerationRequest, PromptGeneration};
use chrono::Utc;
use std::time::Duration;

/// Runs generation requests end to end.
pub struct PromptGenerator {
    providers: ProviderRegistry,
    shared_key: SharedKey,
    library: PromptLibrary,
}

impl PromptGenerator {
    pub fn new(providers: ProviderRegistry, shared_key: SharedKey, library: PromptLibrary) -> Self {
        Self {
            providers,
            shared_key,
            library,
        }
    }

    /// Build providers, the shared key, and the store from configuration.
    pub async fn from_config(config: &Config) -> crate::Result<Self> {
        let timeout = Duration::from_millis(config.limits.request_timeout_ms);
        let providers = ProviderRegistry::from_config(&config.llm, timeout)?;
        let shared_key = SharedKey::from_config(&config.shared_key);
        if !shared_key.is_configured() {
            tracing::debug!("No shared key configured");
        }
        let library = PromptLibrary::from_config(config).await?;
        Ok(Self::new(providers, shared_key, library))
    }

    pub fn library(&self) -> &PromptLibrary {
        &self.library
    }

    /// Generate, normalize, and store one batch of prompts.
    ///
    /// Credentials are resolved before any network call. The provider is
    /// called once; there are no retries. The stored record is returned.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<PromptGeneration, GenerationError> {
        validate(request)?;
        let api_key = resolve_key(
            request.use_shared_key,
            request.api_key.as_deref(),
            &self.shared_key,
        )?;
        let provider = self.providers.get(request.provider)?;

        let instruction = render_instruction(&request.keyword, request.style, request.quantity);
        tracing::info!(
            "Generating {} {} prompts for \"{}\" with {}/{}",
            request.quantity,
            request.style,
            request.keyword,
            provider.name(),
            request.model
        );

        let raw = provider
            .invoke(&request.model, &api_key, &instruction)
            .await?;
        let prompts = normalize_response(&raw);
        if prompts.len() != request.quantity as usize {
            tracing::debug!(
                "Requested {} prompts, provider returned {}",
                request.quantity,
                prompts.len()
            );
        }

        let generation = build_record(request, prompts);
        self.library
            .record_generation(&generation)
            .await
            .map_err(|e| {
                tracing::error!("Failed to store generation {}: {e}", generation.id);
                GenerationError::Persistence(e.to_string())
            })?;

        tracing::info!(
            "Stored generation {} with {} prompts",
            generation.id,
            generation.prompts.len()
        );
        Ok(generation)
    }
}

fn validate(request: &GenerationRequest) -> Result<(), GenerationError> {
    if request.keyword.trim().is_empty() {
        return Err(GenerationError::InvalidRequest(
            "keyword must not be empty".into(),
        ));
    }
    if request.quantity == 0 {
        return Err(GenerationError::InvalidRequest(
            "quantity must be at least 1".into(),
        ));
    }
    Ok(())
}

/// Assemble the stored record from the request echo and the normalized prompts.
pub fn build_record(request: &GenerationRequest, prompts: Vec<String>) -> PromptGeneration {
    PromptGeneration {
        id: uuid::Uuid::new_v4().to_string(),
        keyword: request.keyword.clone(),
        style: request.style,
        provider: request.provider,
        model: request.model.clone(),
        quantity: request.quantity,
        prompts,
        output_format: request.output_format,
        created_at: Utc::now(),
    }
}
