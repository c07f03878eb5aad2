//! Command Router
//!
//! Maps one free-text command to a feature and optional seed text using the
//! provider's function calling. The model is offered five navigation
//! functions and told to call exactly one.

use tracing::{debug, info};

use crate::context::Context;
use crate::error::{Action, OrchestratorError};
use crate::llm::{FunctionCall, FunctionDeclaration, ModelTier};
use crate::navigation::{CommandBarResult, Feature};
use crate::prompts::PromptContext;
use crate::schema::SchemaNode;

/// One navigation function offered to the model
struct Intent {
    name: &'static str,
    description: &'static str,
    feature: Feature,
    /// Optional extracted argument: (name, description)
    argument: Option<(&'static str, &'static str)>,
}

const INTENTS: &[Intent] = &[
    Intent {
        name: "navigateToDashboard",
        description: "Navigates the user to their main dashboard view.",
        feature: Feature::Dashboard,
        argument: None,
    },
    Intent {
        name: "navigateToGoalEngine",
        description: "Opens the Quantum Goal Engine. If the user specifies a goal, extract it.",
        feature: Feature::GoalEngine,
        argument: Some(("goal", "The user's stated goal, if any.")),
    },
    Intent {
        name: "startFrictionAudit",
        description: "Opens the Friction Audit feature. If the user mentions a specific workflow to analyze, extract it.",
        feature: Feature::FrictionAudit,
        argument: Some(("workflow", "The user's workflow description, if any.")),
    },
    Intent {
        name: "startDecisionMatrix",
        description: "Opens the Decision Matrix. If the user states a decision they need to make, extract it.",
        feature: Feature::DecisionMatrix,
        argument: Some(("decision", "The user's decision to analyze, if any.")),
    },
    Intent {
        name: "startBlackSwanSimulation",
        description: "Opens the Black Swan Simulator. If the user provides a scenario to simulate, extract it.",
        feature: Feature::BlackSwan,
        argument: Some(("scenario", "The \"what if\" scenario to simulate, if any.")),
    },
];

/// Function declarations for the five navigation intents
pub fn navigation_functions() -> Vec<FunctionDeclaration> {
    INTENTS
        .iter()
        .map(|intent| {
            let properties: Vec<(&str, SchemaNode)> = intent
                .argument
                .iter()
                .map(|(name, description)| (*name, SchemaNode::string().describe(*description)))
                .collect();
            FunctionDeclaration::new(intent.name, intent.description, SchemaNode::object(properties).to_json())
        })
        .collect()
}

/// Resolve the model's function call into a command bar result
///
/// No call, or a call to an unknown function, resolves to the dashboard with
/// no seed.
pub fn resolve(call: Option<&FunctionCall>) -> CommandBarResult {
    let Some(call) = call else {
        debug!("resolve: no function call, falling back to dashboard");
        return CommandBarResult::dashboard();
    };

    match INTENTS.iter().find(|intent| intent.name == call.name) {
        Some(intent) => {
            let seed = intent.argument.and_then(|(name, _)| call.string_arg(name));
            CommandBarResult::new(intent.feature, seed)
        }
        None => {
            debug!(name = %call.name, "resolve: unknown function, falling back to dashboard");
            CommandBarResult::dashboard()
        }
    }
}

/// Routes commands through the model gateway
pub struct CommandRouter<'a> {
    ctx: &'a Context,
}

impl<'a> CommandRouter<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    pub async fn route(&self, command: &str) -> Result<CommandBarResult, OrchestratorError> {
        debug!(command_len = command.len(), "route: called");
        if command.trim().is_empty() {
            return Err(OrchestratorError::invalid_input("Enter a command."));
        }

        let prompt = self.ctx.render("command-router", &PromptContext::command(command))?;
        let system = self.ctx.prompts().load_template("router-system")?;

        let call = self
            .ctx
            .gateway()
            .call_function(&prompt, navigation_functions(), &system, ModelTier::Flash)
            .await
            .map_err(|e| OrchestratorError::from_llm(Action::RouteCommand, e))?;

        let result = resolve(call.as_ref());
        info!(feature = ?result.feature, has_seed = result.seed.is_some(), "route: resolved");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockLlmClient, MockReply};
    use serde_json::json;
    use std::sync::Arc;

    fn context(replies: Vec<MockReply>) -> (Context, Arc<MockLlmClient>) {
        let mock = Arc::new(MockLlmClient::new(replies));
        (Context::with_client(mock.clone()), mock)
    }

    #[test]
    fn test_navigation_functions_declare_arguments() {
        let functions = navigation_functions();
        assert_eq!(functions.len(), 5);

        assert_eq!(functions[0].name, "navigateToDashboard");
        assert_eq!(functions[0].parameters["properties"], json!({}));

        assert_eq!(functions[1].parameters["properties"]["goal"]["type"], "STRING");
        assert_eq!(functions[4].parameters["properties"]["scenario"]["type"], "STRING");
    }

    #[test]
    fn test_resolve_known_intents() {
        let call = FunctionCall {
            name: "startDecisionMatrix".to_string(),
            args: json!({ "decision": "Should I accept the offer?" }),
        };
        assert_eq!(
            resolve(Some(&call)),
            CommandBarResult::new(Feature::DecisionMatrix, Some("Should I accept the offer?".to_string()))
        );

        let call = FunctionCall {
            name: "startFrictionAudit".to_string(),
            args: json!({}),
        };
        assert_eq!(resolve(Some(&call)), CommandBarResult::new(Feature::FrictionAudit, None));
    }

    #[test]
    fn test_resolve_falls_back_to_dashboard() {
        assert_eq!(resolve(None), CommandBarResult::dashboard());

        let call = FunctionCall {
            name: "deleteEverything".to_string(),
            args: json!({ "goal": "ignored" }),
        };
        assert_eq!(resolve(Some(&call)), CommandBarResult::dashboard());
    }

    #[tokio::test]
    async fn test_route_propagates_seed_verbatim() {
        let (ctx, mock) = context(vec![MockReply::call(
            "navigateToGoalEngine",
            json!({ "goal": "Run a marathon in under 4 hours" }),
        )]);

        let result = CommandRouter::new(&ctx)
            .route("plan how I run a marathon in under 4 hours")
            .await
            .unwrap();
        assert_eq!(result.feature, Feature::GoalEngine);
        assert_eq!(result.seed.as_deref(), Some("Run a marathon in under 4 hours"));

        let request = &mock.requests()[0];
        assert_eq!(request.model, "gemini-2.5-flash");
        assert_eq!(request.functions.len(), 5);
        assert_eq!(
            request.contents[0].text,
            "User command: \"plan how I run a marathon in under 4 hours\""
        );
        assert!(request.system_instruction.as_deref().unwrap().contains("Only call a function"));
    }

    #[tokio::test]
    async fn test_route_prose_reply_goes_to_dashboard() {
        let (ctx, _) = context(vec![MockReply::Text("Hello there".to_string())]);

        let result = CommandRouter::new(&ctx).route("tell me a joke").await.unwrap();
        assert_eq!(result, CommandBarResult::dashboard());
    }

    #[tokio::test]
    async fn test_route_provider_failure() {
        let (ctx, _) = context(vec![MockReply::Fail(503)]);

        let err = CommandRouter::new(&ctx).route("open goals").await.unwrap_err();
        assert_eq!(err.to_string(), "Vigil could not understand the command.");
    }

    #[tokio::test]
    async fn test_route_rejects_blank_command() {
        let (ctx, mock) = context(vec![]);

        let err = CommandRouter::new(&ctx).route("   ").await.unwrap_err();
        assert!(matches!(err, OrchestratorError::InvalidInput(_)));
        assert_eq!(mock.call_count(), 0);
    }
}
