//! Orchestrator error taxonomy
//!
//! Every user-initiated action fails with exactly one [`OrchestratorError`].
//! Provider, network and parse failures collapse into the action's fixed
//! human-readable message; a missing credential is reported as-is.

use std::fmt;

use thiserror::Error;

use crate::llm::LlmError;
use crate::prompts::PromptError;

/// The user-initiated action that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GoalBreakdown,
    DailyBriefing,
    DecisionAnalysis,
    SuggestFactors,
    FrictionAudit,
    Simulation,
    RouteCommand,
}

impl Action {
    /// Message shown to the user when this action fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Action::GoalBreakdown => "Failed to generate goal breakdown from AI.",
            Action::DailyBriefing => "Failed to generate daily briefing from AI.",
            Action::DecisionAnalysis => "Failed to analyze decision with AI.",
            Action::SuggestFactors => "Failed to suggest decision factors from AI.",
            Action::FrictionAudit => "Failed to generate friction audit from AI.",
            Action::Simulation => "Failed to run simulation with AI.",
            Action::RouteCommand => "Vigil could not understand the command.",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::GoalBreakdown => "goal-breakdown",
            Action::DailyBriefing => "daily-briefing",
            Action::DecisionAnalysis => "decision-analysis",
            Action::SuggestFactors => "suggest-factors",
            Action::FrictionAudit => "friction-audit",
            Action::Simulation => "simulation",
            Action::RouteCommand => "route-command",
        };
        write!(f, "{}", name)
    }
}

/// Errors raised by the router and the feature orchestrators
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Missing credential or unusable client configuration
    #[error("{0}")]
    Configuration(#[source] LlmError),

    /// The model call (or parsing its response) failed
    #[error("{}", action.failure_message())]
    Failed {
        action: Action,
        #[source]
        source: LlmError,
    },

    /// Rejected before any model call
    #[error("{0}")]
    InvalidInput(String),

    /// An instruction template could not be loaded or rendered
    #[error("{0}")]
    Prompt(#[from] PromptError),
}

impl OrchestratorError {
    /// Classify a gateway failure for `action`
    pub fn from_llm(action: Action, err: LlmError) -> Self {
        if err.is_configuration() {
            OrchestratorError::Configuration(err)
        } else {
            OrchestratorError::Failed { action, source: err }
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        OrchestratorError::InvalidInput(message.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, OrchestratorError::Configuration(_))
    }

    /// The failed action, when the failure came from a model call
    pub fn action(&self) -> Option<Action> {
        match self {
            OrchestratorError::Failed { action, .. } => Some(*action),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_provider_failure_uses_action_message() {
        let err = OrchestratorError::from_llm(
            Action::Simulation,
            LlmError::ApiError {
                status: 500,
                message: "internal".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Failed to run simulation with AI.");
        assert_eq!(err.action(), Some(Action::Simulation));
        assert!(err.source().unwrap().to_string().contains("500"));
    }

    #[test]
    fn test_parse_failure_is_a_feature_failure() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = OrchestratorError::from_llm(Action::GoalBreakdown, LlmError::Json(json_err));
        assert_eq!(err.to_string(), "Failed to generate goal breakdown from AI.");
    }

    #[test]
    fn test_missing_credential_is_not_masked() {
        let err = OrchestratorError::from_llm(
            Action::FrictionAudit,
            LlmError::MissingCredential {
                primary: "API_KEY".to_string(),
                fallback: "GEMINI_API_KEY".to_string(),
            },
        );
        assert!(err.is_configuration());
        let text = err.to_string();
        assert!(text.contains("API_KEY"));
        assert!(text.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_every_action_has_a_message() {
        for action in [
            Action::GoalBreakdown,
            Action::DailyBriefing,
            Action::DecisionAnalysis,
            Action::SuggestFactors,
            Action::FrictionAudit,
            Action::Simulation,
            Action::RouteCommand,
        ] {
            assert!(action.failure_message().ends_with('.'));
        }
    }
}
