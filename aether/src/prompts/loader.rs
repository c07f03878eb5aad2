//! Prompt Loader
//!
//! Loads instruction templates from an override directory or falls back to
//! embedded defaults, and renders them with Handlebars.

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::embedded;
use crate::config::PromptsConfig;

/// Errors raised while loading or rendering a template
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt template not found: {0}")]
    NotFound(String),

    #[error("Failed to read prompt {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// Values substituted into instruction templates
///
/// Unused fields serialize as null and are ignored by templates that do not
/// reference them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromptContext {
    pub command: Option<String>,
    pub goal: Option<String>,
    pub objective: Option<String>,
    pub plan_goal: Option<String>,
    pub decision: Option<String>,
    pub factors_json: Option<String>,
    pub workflow: Option<String>,
    pub scenario: Option<String>,
}

impl PromptContext {
    pub fn command(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            ..Default::default()
        }
    }

    pub fn goal(goal: impl Into<String>) -> Self {
        Self {
            goal: Some(goal.into()),
            ..Default::default()
        }
    }

    pub fn objective(objective: impl Into<String>, plan_goal: Option<String>) -> Self {
        Self {
            objective: Some(objective.into()),
            plan_goal,
            ..Default::default()
        }
    }

    pub fn decision(decision: impl Into<String>) -> Self {
        Self {
            decision: Some(decision.into()),
            ..Default::default()
        }
    }

    pub fn with_factors_json(mut self, factors_json: impl Into<String>) -> Self {
        self.factors_json = Some(factors_json.into());
        self
    }

    pub fn workflow(workflow: impl Into<String>) -> Self {
        Self {
            workflow: Some(workflow.into()),
            ..Default::default()
        }
    }

    pub fn scenario(scenario: impl Into<String>) -> Self {
        Self {
            scenario: Some(scenario.into()),
            ..Default::default()
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Override directory (e.g., `~/.config/aether/prompts/`)
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that checks `override_dir` before the embedded templates
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        let override_dir = override_dir.filter(|dir| dir.exists());
        if let Some(dir) = &override_dir {
            debug!(dir = %dir.display(), "PromptLoader::new: using override directory");
        }

        Self {
            hbs: Self::engine(),
            override_dir,
        }
    }

    pub fn from_config(config: &PromptsConfig) -> Self {
        Self::new(config.dir.clone())
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self {
            hbs: Self::engine(),
            override_dir: None,
        }
    }

    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        // Prompts are plain text; user input must reach the model verbatim
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. Override: `{override_dir}/{name}.pmt`
    /// 2. Embedded fallback
    pub fn load_template(&self, name: &str) -> Result<String, PromptError> {
        if let Some(dir) = &self.override_dir {
            let path = override_path(dir, name);
            if path.exists() {
                debug!("Loading prompt from override: {:?}", path);
                return std::fs::read_to_string(&path).map_err(|source| PromptError::Read { path, source });
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(PromptError::NotFound(name.to_string()))
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &PromptContext) -> Result<String, PromptError> {
        let template = self.load_template(template_name)?;
        debug!(template = %template_name, "render: called");

        self.hbs
            .render_template(&template, context)
            .map_err(|source| PromptError::Render {
                name: template_name.to_string(),
                source: Box::new(source),
            })
    }

    /// The persona system instruction
    pub fn persona(&self) -> Result<String, PromptError> {
        self.load_template("persona")
    }
}

fn override_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.pmt", name))
}
