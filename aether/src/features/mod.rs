//! Feature orchestrators
//!
//! Every feature follows the same path: render the instruction template,
//! request structured output under the feature's schema, post-process the
//! parsed value, then open a chat session seeded with the same prompt. The
//! shared path lives in [`run_structured`]; each feature only supplies its
//! template, schema and post-processing through [`StructuredFeature`].

pub mod briefing;
pub mod decision;
pub mod friction;
pub mod goal;
mod panel;
pub mod simulation;

pub use panel::FeaturePanel;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::context::Context;
use crate::error::{Action, OrchestratorError};
use crate::llm::{ChatSession, LlmError, ModelTier};
use crate::prompts::PromptContext;
use crate::schema::SchemaNode;

/// One structured-generation request shape
pub trait StructuredFeature {
    /// Instruction template name
    const TEMPLATE: &'static str;

    /// Action reported when the request fails
    const ACTION: Action;

    const TIER: ModelTier = ModelTier::Pro;

    /// The shape the model returns
    type Raw: DeserializeOwned;

    /// The shape handed to callers
    type Output;

    fn schema() -> SchemaNode;

    fn post_process(raw: Self::Raw) -> Self::Output;
}

/// Result of one feature run plus its follow-up chat
#[derive(Debug)]
pub struct FeatureRun<T> {
    pub result: T,
    pub chat: ChatSession,
}

/// Render, generate, parse and post-process without opening a chat
pub async fn fetch_structured<F: StructuredFeature>(
    ctx: &Context,
    prompt: &str,
    system: &str,
) -> Result<F::Output, OrchestratorError> {
    debug!(template = F::TEMPLATE, "fetch_structured: called");
    let value = ctx
        .gateway()
        .generate_structured(prompt, F::schema().to_json(), system, F::TIER)
        .await
        .map_err(|e| OrchestratorError::from_llm(F::ACTION, e))?;

    let raw: F::Raw =
        serde_json::from_value(value).map_err(|e| OrchestratorError::from_llm(F::ACTION, LlmError::Json(e)))?;
    Ok(F::post_process(raw))
}

/// Run a feature end to end
///
/// Any failure aborts the whole run; no partial result is returned.
pub async fn run_structured<F: StructuredFeature>(
    ctx: &Context,
    input: &PromptContext,
) -> Result<FeatureRun<F::Output>, OrchestratorError> {
    let prompt = ctx.render(F::TEMPLATE, input)?;
    let system = ctx.persona()?;

    let result = fetch_structured::<F>(ctx, &prompt, &system).await?;
    let chat = open_chat(ctx, F::ACTION, &prompt, &system).await?;

    info!(template = F::TEMPLATE, session_id = %chat.id(), "run_structured: complete");
    Ok(FeatureRun { result, chat })
}

pub(crate) async fn open_chat(
    ctx: &Context,
    action: Action,
    prompt: &str,
    system: &str,
) -> Result<ChatSession, OrchestratorError> {
    ctx.gateway()
        .create_chat_session(prompt, system)
        .await
        .map_err(|e| OrchestratorError::from_llm(action, e))
}

/// Reject blank user text before any model call
pub(crate) fn require_text(value: &str, what: &str) -> Result<(), OrchestratorError> {
    if value.trim().is_empty() {
        return Err(OrchestratorError::invalid_input(format!("Enter a {} first.", what)));
    }
    Ok(())
}
