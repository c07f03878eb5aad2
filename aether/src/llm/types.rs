//! Model request/response types
//!
//! These types model the Generative Language `generateContent` API closely
//! enough to build requests directly from them, while staying independent of
//! the HTTP client that sends them.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which model class a request should run on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Larger model used for structured feature output and chat
    Pro,
    /// Faster model used for routing, briefings and suggestions
    Flash,
}

/// A generation request - everything needed for one model call
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Provider model name (resolved from a [`ModelTier`] by the gateway)
    pub model: String,

    /// System instruction (persona or routing rules)
    pub system_instruction: Option<String>,

    /// Conversation turns, oldest first
    pub contents: Vec<Message>,

    /// When set, the model must answer with JSON matching this schema
    pub response_schema: Option<serde_json::Value>,

    /// Callable functions offered to the model
    pub functions: Vec<FunctionDeclaration>,
}

impl GenerateRequest {
    /// Create a single-turn request for the given model
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: None,
            contents: vec![Message::user(prompt)],
            response_schema: None,
            functions: vec![],
        }
    }

    /// Attach a system instruction
    pub fn with_system(mut self, system_instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(system_instruction.into());
        self
    }

    /// Require JSON output matching the given schema
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Offer callable functions to the model
    pub fn with_functions(mut self, functions: Vec<FunctionDeclaration>) -> Self {
        self.functions = functions;
        self
    }
}

/// A turn in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Create a model turn
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Role name on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// Response from a generation request
#[derive(Debug, Clone, Default)]
pub struct GenerateResponse {
    /// Concatenated text parts of the first candidate (if any)
    pub text: Option<String>,

    /// Function calls requested by the model, in emission order
    pub function_calls: Vec<FunctionCall>,

    /// Why the model stopped
    pub finish_reason: FinishReason,

    /// Token usage reported by the provider
    pub usage: TokenUsage,
}

/// A function call selected by the model
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: serde_json::Value,
}

impl FunctionCall {
    /// Get a string argument, treating blank strings as absent
    pub fn string_arg(&self, key: &str) -> Option<String> {
        debug!(name = %self.name, %key, "FunctionCall::string_arg: called");
        self.args
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FinishReason {
    #[default]
    Stop,
    MaxTokens,
    Safety,
    Other(String),
}

impl FinishReason {
    /// Parse from the provider's `finishReason` string
    pub fn from_provider(s: &str) -> Self {
        match s {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::MaxTokens,
            "SAFETY" => FinishReason::Safety,
            other => FinishReason::Other(other.to_string()),
        }
    }
}

/// Token usage for one call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Function declaration offered to the model
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

impl FunctionDeclaration {
    /// Create a new function declaration
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: serde_json::Value) -> Self {
        let name = name.into();
        debug!(%name, "FunctionDeclaration::new: called");
        Self {
            name,
            description: description.into(),
            parameters,
        }
    }
}

/// Streaming chunk delivered while a reply is generated
#[derive(Debug, Clone)]
pub enum StreamChunk {
    /// Text fragment, in emission order
    TextDelta(String),

    /// Reply complete
    Done { finish_reason: FinishReason, usage: TokenUsage },

    /// Error during streaming
    Error(String),
}
