//! Aether - a terminal Life Operating System
//!
//! Vigil, an AI chief of staff, turns free text into structured plans:
//! goal breakdowns, daily briefings, weighted decision analyses, friction
//! audits and black swan simulations. Every result opens a chat session
//! seeded with the request that produced it, for follow-up questions.
//!
//! # Modules
//!
//! - [`llm`] - Model gateway and the Gemini REST client
//! - [`schema`] - Response schemas sent with structured requests
//! - [`prompts`] - Prompt templates, embedded and overridable
//! - [`router`] - Free-text command routing via function calling
//! - [`features`] - The five features and their local state
//! - [`navigation`] - Active feature, command bar and pending seeds
//! - [`chat`] - Streaming follow-up transcripts
//! - [`shell`] - Interactive terminal surface
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod chat;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod features;
pub mod ids;
pub mod llm;
pub mod navigation;
pub mod prompts;
pub mod render;
pub mod router;
pub mod schema;
pub mod shell;

// Re-export commonly used types
pub use chat::{ChatMessage, ChatState, ChatTranscript};
pub use config::{Config, LlmConfig, PromptsConfig};
pub use context::Context;
pub use error::{Action, OrchestratorError};
pub use features::{FeaturePanel, FeatureRun, StructuredFeature};
pub use ids::LocalId;
pub use llm::{ChatSession, GeminiClient, LlmClient, LlmError, ModelGateway, ModelTier};
pub use navigation::{CommandBarResult, Feature, Navigator};
pub use prompts::{PromptContext, PromptLoader};
pub use router::CommandRouter;
