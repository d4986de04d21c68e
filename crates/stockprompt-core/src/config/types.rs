//! Sub-configuration structs with their defaults.

use crate::types::ProviderKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory where generations and favorites are stored
    pub data_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("~/.stockprompt/data"),
        }
    }
}

/// Which document store backs history and favorites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite database file under `general.data_dir`
    #[default]
    Sqlite,
    /// Process-local, lost on exit
    Memory,
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Store implementation
    pub backend: StorageBackend,

    /// Maximum records returned by history and favorites listings (at most 100)
    pub list_limit: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            list_limit: 100,
        }
    }
}

/// Transport limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Provider HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 60000,
        }
    }
}

/// Platform-wide key offered to callers who opt into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedKeyConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,
}

impl Default for SharedKeyConfig {
    fn default() -> Self {
        Self {
            api_key: "${STOCKPROMPT_SHARED_KEY}".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// LLM provider configurations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI configuration
    pub openai: Option<OpenAiConfig>,

    /// Anthropic Claude configuration
    pub claude: Option<ClaudeConfig>,

    /// Google Gemini configuration
    pub gemini: Option<GeminiConfig>,

    /// Groq configuration
    pub groq: Option<GroqConfig>,
}

impl LlmConfig {
    /// Model used when the caller does not name one.
    pub fn default_model(&self, provider: ProviderKind) -> String {
        match provider {
            ProviderKind::Openai => self.openai.clone().unwrap_or_default().model,
            ProviderKind::Claude => self.claude.clone().unwrap_or_default().model,
            ProviderKind::Gemini => self.gemini.clone().unwrap_or_default().model,
            ProviderKind::Groq => self.groq.clone().unwrap_or_default().model,
        }
    }

    /// Configured endpoint for a provider.
    pub fn endpoint(&self, provider: ProviderKind) -> String {
        match provider {
            ProviderKind::Openai => self.openai.clone().unwrap_or_default().endpoint,
            ProviderKind::Claude => self.claude.clone().unwrap_or_default().endpoint,
            ProviderKind::Gemini => self.gemini.clone().unwrap_or_default().endpoint,
            ProviderKind::Groq => self.groq.clone().unwrap_or_default().endpoint,
        }
    }
}

/// OpenAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Chat Completions endpoint
    pub endpoint: String,

    /// Default model name
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

/// Anthropic Claude configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaudeConfig {
    /// Messages API endpoint
    pub endpoint: String,

    /// Default model name
    pub model: String,

    /// Value of the `anthropic-version` header
    pub api_version: String,
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            api_version: "2023-06-01".to_string(),
        }
    }
}

/// Google Gemini configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API base; `/models/{model}:generateContent` is appended
    pub endpoint: String,

    /// Default model name
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
        }
    }
}

/// Groq configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroqConfig {
    /// OpenAI-compatible Chat Completions endpoint
    pub endpoint: String,

    /// Default model name
    pub model: String,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
        }
    }
}
