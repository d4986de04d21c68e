//! API key resolution: shared platform key or the caller's own key.

use crate::config::SharedKeyConfig;
use crate::error::GenerationError;
use crate::llm::provider::resolve_env_var;
use std::fmt;

/// The platform-wide key, resolved once from configuration.
///
/// Passed explicitly into [`resolve_key`] so nothing reads the environment
/// at request time.
#[derive(Clone, Default)]
pub struct SharedKey(Option<String>);

impl SharedKey {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        if key.trim().is_empty() {
            Self(None)
        } else {
            Self(Some(key))
        }
    }

    /// No shared key configured.
    pub fn none() -> Self {
        Self(None)
    }

    /// Resolve the configured value, following `${ENV_VAR}` indirection.
    pub fn from_config(config: &SharedKeyConfig) -> Self {
        Self(resolve_env_var(&config.api_key).filter(|k| !k.trim().is_empty()))
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("SharedKey(<redacted>)"),
            None => f.write_str("SharedKey(None)"),
        }
    }
}

/// Decide which API key a request should use.
///
/// `use_shared_key` wins outright: if it is set and no shared key is
/// configured, the caller's key is not consulted.
pub fn resolve_key(
    use_shared_key: bool,
    caller_key: Option<&str>,
    shared: &SharedKey,
) -> Result<String, GenerationError> {
    if use_shared_key {
        return shared.get().map(str::to_string).ok_or_else(|| {
            GenerationError::MissingCredential("shared key not configured".to_string())
        });
    }

    match caller_key {
        Some(key) if !key.trim().is_empty() => Ok(key.to_string()),
        _ => Err(GenerationError::MissingCredential(
            "no key supplied".to_string(),
        )),
    }
}
