//! ModelGateway - the single entry point to the model provider
//!
//! The gateway owns the configuration and builds the provider client lazily:
//! a missing credential is reported the first time any model call is
//! attempted, never at startup. Every operation goes through the same lazy
//! initializer.

use std::sync::Arc;

use tokio::sync::{OnceCell, mpsc};
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    FunctionCall, FunctionDeclaration, GeminiClient, GenerateRequest, LlmClient, LlmError, Message, ModelTier,
    StreamChunk,
};
use crate::config::LlmConfig;

/// Lazily-initialized access to the model provider
pub struct ModelGateway {
    config: LlmConfig,
    client: OnceCell<Arc<dyn LlmClient>>,
}

impl ModelGateway {
    /// Create a gateway; nothing is read from the environment yet
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// Create a gateway around an existing client (tests, alternative providers)
    pub fn with_client(config: LlmConfig, client: Arc<dyn LlmClient>) -> Self {
        Self {
            config,
            client: OnceCell::new_with(Some(client)),
        }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Resolve the provider model name for a tier
    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Pro => &self.config.pro_model,
            ModelTier::Flash => &self.config.flash_model,
        }
    }

    /// Get the client, building it on first use
    pub async fn client(&self) -> Result<Arc<dyn LlmClient>, LlmError> {
        let client = self
            .client
            .get_or_try_init(|| async {
                debug!("client: initializing provider client");
                let api_key = self.config.api_key()?;
                let client: Arc<dyn LlmClient> = Arc::new(GeminiClient::from_config(&self.config, api_key)?);
                Ok::<_, LlmError>(client)
            })
            .await?;
        Ok(Arc::clone(client))
    }

    /// Generate JSON for `prompt` constrained by `schema`
    ///
    /// The provider is trusted to honour the schema; the returned value is
    /// only checked for being valid JSON.
    pub async fn generate_structured(
        &self,
        prompt: &str,
        schema: serde_json::Value,
        system_instruction: &str,
        tier: ModelTier,
    ) -> Result<serde_json::Value, LlmError> {
        debug!(?tier, prompt_len = prompt.len(), "generate_structured: called");
        let client = self.client().await?;
        let request = GenerateRequest::new(self.model_for(tier), prompt)
            .with_system(system_instruction)
            .with_schema(schema);

        let response = client.generate(request).await?;
        let text = response
            .text
            .ok_or_else(|| LlmError::InvalidResponse("response contained no text".to_string()))?;
        let value = serde_json::from_str(&text)?;
        info!(?tier, "generate_structured: parsed response");
        Ok(value)
    }

    /// Generate free text for `prompt`
    pub async fn generate_text(
        &self,
        prompt: &str,
        system_instruction: &str,
        tier: ModelTier,
    ) -> Result<String, LlmError> {
        debug!(?tier, prompt_len = prompt.len(), "generate_text: called");
        let client = self.client().await?;
        let request = GenerateRequest::new(self.model_for(tier), prompt).with_system(system_instruction);

        let response = client.generate(request).await?;
        response
            .text
            .ok_or_else(|| LlmError::InvalidResponse("response contained no text".to_string()))
    }

    /// Offer `functions` to the model and return the first call it makes
    pub async fn call_function(
        &self,
        prompt: &str,
        functions: Vec<FunctionDeclaration>,
        system_instruction: &str,
        tier: ModelTier,
    ) -> Result<Option<FunctionCall>, LlmError> {
        debug!(?tier, function_count = functions.len(), "call_function: called");
        let client = self.client().await?;
        let request = GenerateRequest::new(self.model_for(tier), prompt)
            .with_system(system_instruction)
            .with_functions(functions);

        let response = client.generate(request).await?;
        Ok(response.function_calls.into_iter().next())
    }

    /// Open a chat session whose history starts with `seed_prompt`
    pub async fn create_chat_session(&self, seed_prompt: &str, system_instruction: &str) -> Result<ChatSession, LlmError> {
        let client = self.client().await?;
        let session = ChatSession {
            id: Uuid::now_v7(),
            client,
            model: self.config.pro_model.clone(),
            system_instruction: system_instruction.to_string(),
            history: vec![Message::user(seed_prompt)],
        };
        debug!(session_id = %session.id, "create_chat_session: opened");
        Ok(session)
    }
}

/// A provider conversation carrying its own history
pub struct ChatSession {
    id: Uuid,
    client: Arc<dyn LlmClient>,
    model: String,
    system_instruction: String,
    history: Vec<Message>,
}

impl ChatSession {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Turns exchanged so far, starting with the seed prompt
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Send `message` and stream the reply as text fragments
    ///
    /// The user turn and the reply are added to history only when the stream
    /// completes successfully.
    pub async fn send_message_stream(
        &mut self,
        message: &str,
        chunk_tx: mpsc::Sender<StreamChunk>,
    ) -> Result<String, LlmError> {
        debug!(session_id = %self.id, message_len = message.len(), "send_message_stream: called");
        let mut contents = self.history.clone();
        contents.push(Message::user(message));

        let request = GenerateRequest {
            model: self.model.clone(),
            system_instruction: Some(self.system_instruction.clone()),
            contents,
            response_schema: None,
            functions: vec![],
        };

        let response = self.client.stream(request, chunk_tx).await?;
        let reply = response.text.unwrap_or_default();
        self.history.push(Message::user(message));
        self.history.push(Message::model(reply.clone()));
        info!(session_id = %self.id, turns = self.history.len(), "send_message_stream: reply complete");
        Ok(reply)
    }

    /// Ask the model to answer the seeded history without a new user message
    pub async fn prime_stream(&mut self, chunk_tx: mpsc::Sender<StreamChunk>) -> Result<String, LlmError> {
        debug!(session_id = %self.id, "prime_stream: called");
        let request = GenerateRequest {
            model: self.model.clone(),
            system_instruction: Some(self.system_instruction.clone()),
            contents: self.history.clone(),
            response_schema: None,
            functions: vec![],
        };

        let response = self.client.stream(request, chunk_tx).await?;
        let reply = response.text.unwrap_or_default();
        self.history.push(Message::model(reply.clone()));
        Ok(reply)
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("model", &self.model)
            .field("turns", &self.history.len())
            .finish()
    }
}
