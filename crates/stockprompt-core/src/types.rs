//! Core data types: generation requests and the records they produce.

use crate::error::GenerationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual style the generated prompts should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Photo,
    Illustration,
    Vector,
    Logo,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Photo => "photo",
            Style::Illustration => "illustration",
            Style::Vector => "vector",
            Style::Logo => "logo",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Openai,
    Claude,
    Gemini,
    Groq,
}

impl ProviderKind {
    /// All providers, in the order they are listed to users.
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Openai,
        ProviderKind::Claude,
        ProviderKind::Gemini,
        ProviderKind::Groq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Openai => "openai",
            ProviderKind::Claude => "claude",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Groq => "groq",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GenerationError::InvalidProvider(s.to_string()))
    }
}

/// Output format the caller asked for. Echoed into the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON record
    #[default]
    Json,
    /// Plain prompt list, one per line
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Text => f.write_str("text"),
        }
    }
}

/// A caller's request to generate a batch of prompts.
///
/// Lives only for the duration of one `generate` call.
#[derive(Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub keyword: String,
    pub style: Style,
    pub provider: ProviderKind,
    pub model: String,
    pub quantity: u32,
    pub output_format: OutputFormat,
    /// Caller-supplied key, used when `use_shared_key` is false
    #[serde(default)]
    pub api_key: Option<String>,
    /// Use the platform's shared key instead of `api_key`
    #[serde(default)]
    pub use_shared_key: bool,
}

// Hand-written so the caller's key never reaches a log line.
impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("keyword", &self.keyword)
            .field("style", &self.style)
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("quantity", &self.quantity)
            .field("output_format", &self.output_format)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("use_shared_key", &self.use_shared_key)
            .finish()
    }
}

/// A stored batch of generated prompts.
///
/// Created once per successful generation and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptGeneration {
    pub id: String,
    pub keyword: String,
    pub style: Style,
    pub provider: ProviderKind,
    pub model: String,
    pub quantity: u32,
    /// Prompts in provider output order; duplicates are kept
    pub prompts: Vec<String>,
    pub output_format: OutputFormat,
    pub created_at: DateTime<Utc>,
}

/// A single prompt the user saved for later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritePrompt {
    pub id: String,
    /// Generation this prompt came from. Not checked; may dangle.
    pub prompt_generation_id: String,
    pub prompt_text: String,
    pub keyword: String,
    pub style: String,
    pub saved_at: DateTime<Utc>,
}

/// Input for saving a favorite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFavoriteRequest {
    pub prompt_generation_id: String,
    pub prompt_text: String,
    pub keyword: String,
    pub style: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::Openai);
        assert_eq!("Claude".parse::<ProviderKind>().unwrap(), ProviderKind::Claude);
        assert_eq!(" groq ".parse::<ProviderKind>().unwrap(), ProviderKind::Groq);
    }

    #[test]
    fn test_provider_kind_rejects_unknown() {
        let err = "mistral".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, GenerationError::InvalidProvider(ref p) if p == "mistral"));
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let json = r#"{
            "keyword": "sunset beach",
            "style": "photo",
            "provider": "gemini",
            "model": "gemini-2.0-flash",
            "quantity": 3,
            "output_format": "text"
        }"#;
        let request: GenerationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.style, Style::Photo);
        assert_eq!(request.provider, ProviderKind::Gemini);
        assert_eq!(request.output_format, OutputFormat::Text);
        assert!(request.api_key.is_none());
        assert!(!request.use_shared_key);
    }

    #[test]
    fn test_request_debug_redacts_key() {
        let request = GenerationRequest {
            keyword: "forest".into(),
            style: Style::Vector,
            provider: ProviderKind::Groq,
            model: "llama-3.3-70b-versatile".into(),
            quantity: 1,
            output_format: OutputFormat::Json,
            api_key: Some("sk-very-secret".into()),
            use_shared_key: false,
        };
        let debug = format!("{request:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_generation_timestamp_serializes_as_iso8601() {
        let generation = PromptGeneration {
            id: "gen-1".into(),
            keyword: "city".into(),
            style: Style::Illustration,
            provider: ProviderKind::Openai,
            model: "gpt-4o-mini".into(),
            quantity: 1,
            prompts: vec!["Neon skyline".into()],
            output_format: OutputFormat::Json,
            created_at: "2025-03-01T12:30:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&generation).unwrap();
        assert_eq!(json["created_at"], "2025-03-01T12:30:00Z");
        assert_eq!(json["style"], "illustration");

        let parsed: PromptGeneration = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, generation);
    }
}
