//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::store::DEFAULT_FIND_LIMIT;
use crate::types::ProviderKind;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.request_timeout_ms must be > 0".into(),
            ));
        }
        if self.storage.list_limit == 0 || self.storage.list_limit > DEFAULT_FIND_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "storage.list_limit must be between 1 and {DEFAULT_FIND_LIMIT}"
            )));
        }
        for provider in ProviderKind::ALL {
            if self.llm.endpoint(provider).trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "llm.{provider}.endpoint must not be empty"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroqConfig;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.limits.request_timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("request_timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_zero_list_limit() {
        let mut config = Config::default();
        config.storage.list_limit = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("list_limit"));
    }

    #[test]
    fn test_validate_rejects_list_limit_over_cap() {
        let mut config = Config::default();
        config.storage.list_limit = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("list_limit"));

        config.storage.list_limit = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        let mut config = Config::default();
        config.llm.groq = Some(GroqConfig {
            endpoint: "  ".to_string(),
            ..GroqConfig::default()
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("llm.groq.endpoint"));
    }
}
