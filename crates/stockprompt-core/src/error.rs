//! Error types for stockprompt.
//!
//! Errors are organized by concern so that each failure can be classified as
//! something the caller can fix (client error), a missing record, or a
//! server-side failure the caller cannot do anything about.

use thiserror::Error;

/// Top-level error type for stockprompt operations.
#[derive(Error, Debug)]
pub enum StockPromptError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generation pipeline errors
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Prompt library (history and favorites) errors
    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    /// Document store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Failures of the generation pipeline, one variant per stage that can fail.
///
/// Response normalization has no variant: it degrades instead of failing.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// No usable API key could be resolved
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Provider name outside the supported set
    #[error("Invalid provider: {0}")]
    InvalidProvider(String),

    /// Request fields that cannot produce a sensible instruction
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The provider rejected the call or the transport failed
    #[error("Error generating with {provider}: {message}")]
    Provider {
        provider: String,
        message: String,
        status_code: Option<u16>,
    },

    /// Writing the generated record failed
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Errors from the typed history/favorites layer.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// No record with the given identifier exists
    #[error("Favorite not found: {0}")]
    NotFound(String),

    /// The underlying store failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

/// Errors raised by a [`crate::store::DocumentStore`] implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Preparing the backing directory failed
    #[error("Store IO error for collection '{collection}': {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be encoded or decoded
    #[error("Store encoding error for collection '{collection}': {source}")]
    Encoding {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    /// The database rejected a statement
    #[error("Store database error for collection '{collection}': {source}")]
    Database {
        collection: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Only JSON objects can be stored
    #[error("Document for collection '{0}' is not a JSON object")]
    NotAnObject(String),

    /// Collection and field names are limited to ASCII letters, digits and `_`
    #[error("Invalid collection or field name: '{0}'")]
    InvalidName(String),

    /// The blocking database task panicked or was cancelled
    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// How an error should be surfaced to whoever made the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller can fix it (bad input, missing key)
    Client,
    /// The addressed record does not exist
    NotFound,
    /// Provider, persistence, or anything else the caller cannot fix
    Server,
}

impl GenerationError {
    /// Classify this error for the caller.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingCredential(_) | Self::InvalidProvider(_) | Self::InvalidRequest(_) => {
                ErrorClass::Client
            }
            Self::Provider { .. } | Self::Persistence(_) => ErrorClass::Server,
        }
    }

    /// Build a provider error without an HTTP status.
    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.into(),
            status_code: None,
        }
    }
}

impl LibraryError {
    /// Classify this error for the caller.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound(_) => ErrorClass::NotFound,
            Self::Persistence(_) => ErrorClass::Server,
        }
    }
}

impl StockPromptError {
    /// Classify this error for the caller.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Generation(e) => e.class(),
            Self::Library(e) => e.class(),
            Self::Config(_) | Self::Store(_) => ErrorClass::Server,
        }
    }
}

/// Convenience type alias for stockprompt results.
pub type Result<T> = std::result::Result<T, StockPromptError>;
