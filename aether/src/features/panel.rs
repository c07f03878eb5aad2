//! Per-feature interaction state

use tracing::debug;

use super::FeatureRun;
use crate::chat::ChatTranscript;
use crate::error::OrchestratorError;
use crate::llm::ChatSession;

/// Result, chat and error for one feature surface
///
/// A new run clears whatever the previous run left behind, so a failed run
/// never shows a stale result.
#[derive(Debug)]
pub struct FeaturePanel<T> {
    result: Option<T>,
    chat: Option<ChatSession>,
    transcript: ChatTranscript,
    error: Option<String>,
    loading: bool,
}

impl<T> Default for FeaturePanel<T> {
    fn default() -> Self {
        Self {
            result: None,
            chat: None,
            transcript: ChatTranscript::new(),
            error: None,
            loading: false,
        }
    }
}

impl<T> FeaturePanel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run: clear result, chat and error
    pub fn begin(&mut self) {
        debug!("FeaturePanel::begin: called");
        self.result = None;
        self.chat = None;
        self.transcript = ChatTranscript::new();
        self.error = None;
        self.loading = true;
    }

    /// Store the outcome of a run
    pub fn finish(&mut self, outcome: Result<FeatureRun<T>, OrchestratorError>) {
        self.loading = false;
        match outcome {
            Ok(run) => {
                self.result = Some(run.result);
                self.chat = Some(run.chat);
            }
            Err(e) => {
                debug!(error = %e, "FeaturePanel::finish: run failed");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Record a failure from a side action (e.g. factor suggestion) without
    /// touching the current result
    pub fn fail(&mut self, error: &OrchestratorError) {
        self.error = Some(error.to_string());
    }

    /// Back to the empty state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn result_mut(&mut self) -> Option<&mut T> {
        self.result.as_mut()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_chat(&self) -> bool {
        self.chat.is_some()
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    /// The open chat and its transcript, borrowed together for a send
    pub fn chat_mut(&mut self) -> Option<(&mut ChatSession, &mut ChatTranscript)> {
        let chat = self.chat.as_mut()?;
        Some((chat, &mut self.transcript))
    }
}
