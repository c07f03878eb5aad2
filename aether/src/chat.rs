//! Chat continuation
//!
//! Follow-up conversation over an open [`ChatSession`]. Each send appends a
//! user message and an empty model placeholder, then appends streamed
//! fragments to the placeholder in the order they arrive.

use std::future::Future;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::OrchestratorError;
use crate::llm::{ChatSession, LlmError, StreamChunk};

/// One visible turn: user or model
pub use crate::llm::Message as ChatMessage;

/// Text that replaces a reply whose stream failed
pub const APOLOGY: &str = "Sorry, I encountered an error.";

const CHUNK_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingReply,
}

/// Visible messages of one chat session
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    state: ChatState,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Submit guard: non-blank text and no reply in flight
    pub fn can_submit(&self, text: &str) -> bool {
        self.state == ChatState::Idle && !text.trim().is_empty()
    }

    /// Send `text` and stream the reply into the transcript
    ///
    /// `on_fragment` sees every fragment as it is appended. Returns whether
    /// the reply completed; a failed stream leaves the apology in place of
    /// the reply and the session usable.
    pub async fn send(
        &mut self,
        session: &mut ChatSession,
        text: &str,
        on_fragment: impl FnMut(&str),
    ) -> Result<bool, OrchestratorError> {
        if !self.can_submit(text) {
            return Err(OrchestratorError::invalid_input("Cannot send this message now."));
        }
        debug!(session_id = %session.id(), "send: called");

        self.messages.push(ChatMessage::user(text));
        let (tx, rx) = mpsc::channel(CHUNK_BUFFER);
        Ok(self
            .collect_reply(session.send_message_stream(text, tx), rx, on_fragment)
            .await)
    }

    /// Stream the model's answer to the session's seed prompt
    pub async fn prime(&mut self, session: &mut ChatSession, on_fragment: impl FnMut(&str)) -> bool {
        debug!(session_id = %session.id(), "prime: called");
        let (tx, rx) = mpsc::channel(CHUNK_BUFFER);
        self.collect_reply(session.prime_stream(tx), rx, on_fragment).await
    }

    async fn collect_reply<F>(
        &mut self,
        reply: F,
        mut rx: mpsc::Receiver<StreamChunk>,
        mut on_fragment: impl FnMut(&str),
    ) -> bool
    where
        F: Future<Output = Result<String, LlmError>>,
    {
        self.messages.push(ChatMessage::model(""));
        self.state = ChatState::AwaitingReply;
        let index = self.messages.len() - 1;

        let placeholder = &mut self.messages[index];
        let drain = async {
            while let Some(chunk) = rx.recv().await {
                if let StreamChunk::TextDelta(fragment) = chunk {
                    placeholder.text.push_str(&fragment);
                    on_fragment(&fragment);
                }
            }
        };
        let (result, ()) = tokio::join!(reply, drain);

        let ok = match result {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "collect_reply: stream failed");
                self.messages[index].text = APOLOGY.to_string();
                false
            }
        };
        self.state = ChatState::Idle;
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ModelGateway;
    use crate::llm::client::mock::{MockLlmClient, MockReply};
    use std::sync::Arc;

    async fn session(replies: Vec<MockReply>) -> ChatSession {
        let mock = Arc::new(MockLlmClient::new(replies));
        let gateway = ModelGateway::with_client(Default::default(), mock);
        gateway.create_chat_session("seed", "persona").await.unwrap()
    }

    #[tokio::test]
    async fn test_fragments_append_in_order() {
        let mut session = session(vec![MockReply::Stream(vec!["Hel".to_string(), "lo".to_string()])]).await;
        let mut transcript = ChatTranscript::new();
        let mut seen = Vec::new();

        let ok = transcript
            .send(&mut session, "Say hello", |f| seen.push(f.to_string()))
            .await
            .unwrap();

        assert!(ok);
        assert_eq!(seen, vec!["Hel".to_string(), "lo".to_string()]);
        assert_eq!(
            transcript.messages(),
            &[ChatMessage::user("Say hello"), ChatMessage::model("Hello")]
        );
        assert_eq!(transcript.state(), ChatState::Idle);
    }

    #[tokio::test]
    async fn test_stream_failure_becomes_apology() {
        let mut session = session(vec![
            MockReply::StreamFail(vec!["Par".to_string()]),
            MockReply::Stream(vec!["Recovered".to_string()]),
        ])
        .await;
        let mut transcript = ChatTranscript::new();

        let ok = transcript.send(&mut session, "First", |_| {}).await.unwrap();
        assert!(!ok);
        assert_eq!(transcript.last().unwrap().text, APOLOGY);
        assert_eq!(transcript.state(), ChatState::Idle);

        // The session stays usable
        let ok = transcript.send(&mut session, "Second", |_| {}).await.unwrap();
        assert!(ok);
        assert_eq!(transcript.messages().len(), 4);
        assert_eq!(transcript.last().unwrap().text, "Recovered");
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let mut session = session(vec![]).await;
        let mut transcript = ChatTranscript::new();

        assert!(!transcript.can_submit("   "));
        assert!(transcript.send(&mut session, " ", |_| {}).await.is_err());
        assert!(transcript.messages().is_empty());
    }

    #[tokio::test]
    async fn test_prime_answers_seed() {
        let mut session = session(vec![MockReply::Stream(vec!["Ready.".to_string()])]).await;
        let mut transcript = ChatTranscript::new();

        assert!(transcript.prime(&mut session, |_| {}).await);
        assert_eq!(transcript.messages(), &[ChatMessage::model("Ready.")]);
    }
}
