//! Model gateway for Aether
//!
//! The only part of the crate that touches the network. Provides the
//! provider-agnostic [`LlmClient`] trait, the Gemini implementation, and the
//! lazily-initialized [`ModelGateway`] used by the router and every feature.

pub mod client;
mod error;
mod gateway;
mod gemini;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use gateway::{ChatSession, ModelGateway};
pub use gemini::GeminiClient;
pub use types::{
    FinishReason, FunctionCall, FunctionDeclaration, GenerateRequest, GenerateResponse, Message, ModelTier, Role,
    StreamChunk, TokenUsage,
};
