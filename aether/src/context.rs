//! Shared services for the router and the feature orchestrators

use std::sync::Arc;

use crate::config::Config;
use crate::error::OrchestratorError;
use crate::llm::{LlmClient, ModelGateway};
use crate::prompts::{PromptContext, PromptLoader};

/// The model gateway plus the instruction templates
pub struct Context {
    gateway: ModelGateway,
    prompts: PromptLoader,
}

impl Context {
    pub fn new(gateway: ModelGateway, prompts: PromptLoader) -> Self {
        Self { gateway, prompts }
    }

    /// Build from loaded configuration; no credential is read here
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ModelGateway::new(config.llm.clone()),
            PromptLoader::from_config(&config.prompts),
        )
    }

    /// Embedded templates and an existing client
    pub fn with_client(client: Arc<dyn LlmClient>) -> Self {
        Self::new(
            ModelGateway::with_client(Default::default(), client),
            PromptLoader::embedded_only(),
        )
    }

    pub fn gateway(&self) -> &ModelGateway {
        &self.gateway
    }

    pub fn prompts(&self) -> &PromptLoader {
        &self.prompts
    }

    /// Render the named template
    pub fn render(&self, template: &str, context: &PromptContext) -> Result<String, OrchestratorError> {
        Ok(self.prompts.render(template, context)?)
    }

    /// The persona system instruction
    pub fn persona(&self) -> Result<String, OrchestratorError> {
        Ok(self.prompts.persona()?)
    }
}
