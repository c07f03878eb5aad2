//! LlmClient trait definition

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{GenerateRequest, GenerateResponse, LlmError, StreamChunk};

/// Stateless model client - each call is independent
///
/// Conversation state lives in the caller (see
/// [`ChatSession`](super::ChatSession)); every request carries the full
/// history it needs.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single generation request and wait for the whole response
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;

    /// Streaming generation
    ///
    /// Sends text fragments to the provided channel in emission order and
    /// returns the assembled response once the model ends its turn.
    async fn stream(
        &self,
        request: GenerateRequest,
        chunk_tx: mpsc::Sender<StreamChunk>,
    ) -> Result<GenerateResponse, LlmError>;
}
