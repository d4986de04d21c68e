//! LLM integration for prompt generation.
//!
//! Provides one provider abstraction over four backends. OpenAI, Claude and
//! Gemini share a session-based path; Groq has its own request shape.

pub(crate) mod anthropic;
pub(crate) mod gemini;
pub(crate) mod groq;
pub(crate) mod openai;
pub(crate) mod provider;
pub(crate) mod session;

pub use groq::GroqProvider;
pub use provider::{LlmProvider, LlmProviderFactory, ProviderRegistry, SYSTEM_PERSONA};
pub use session::{ChatBackend, ChatSession, SessionProvider};
