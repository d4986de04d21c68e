//! StockPrompt Core - microstock prompt generation library.
//!
//! Turns a keyword, a visual style and a quantity into a list of ready-to-use
//! image-generation prompts by asking one of several LLM providers, then keeps
//! a history of every batch and a list of favorite prompts.
//!
//! # Architecture
//!
//! ```text
//! Request → Credential → Instruction → Provider → Normalize → Record → Store
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use stockprompt_core::{
//!     Config, GenerationRequest, OutputFormat, PromptGenerator, ProviderKind, Style,
//! };
//!
//! #[tokio::main]
//! async fn main() -> stockprompt_core::Result<()> {
//!     let config = Config::load()?;
//!     let generator = PromptGenerator::from_config(&config).await?;
//!
//!     let request = GenerationRequest {
//!         keyword: "sunset beach".into(),
//!         style: Style::Photo,
//!         provider: ProviderKind::Claude,
//!         model: "claude-sonnet-4-20250514".into(),
//!         quantity: 5,
//!         output_format: OutputFormat::Json,
//!         api_key: None,
//!         use_shared_key: true,
//!     };
//!     let generation = generator.generate(&request).await?;
//!     println!("Prompts: {:?}", generation.prompts);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod credential;
pub mod error;
pub mod generator;
pub mod library;
pub mod llm;
pub mod normalize;
pub mod output;
pub mod store;
pub mod template;
pub mod types;

pub use config::Config;
pub use credential::{resolve_key, SharedKey};
pub use error::{
    ConfigError, ErrorClass, GenerationError, LibraryError, Result, StockPromptError,
    StoreError,
};
pub use generator::PromptGenerator;
pub use library::PromptLibrary;
pub use llm::{LlmProvider, ProviderRegistry};
pub use normalize::normalize_response;
pub use output::OutputWriter;
pub use store::{DocumentStore, MemoryStore, SqliteStore};
pub use template::render_instruction;
pub use types::{
    FavoritePrompt, GenerationRequest, OutputFormat, PromptGeneration, ProviderKind,
    SaveFavoriteRequest, Style,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
