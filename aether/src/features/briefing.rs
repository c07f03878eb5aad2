//! Daily briefing
//!
//! Two independent calls run concurrently: a structured task list for the
//! day and a short free-text insight. Both must succeed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FeatureRun, StructuredFeature, fetch_structured, open_chat, require_text};
use crate::context::Context;
use crate::error::{Action, OrchestratorError};
use crate::ids::LocalId;
use crate::llm::ModelTier;
use crate::prompts::PromptContext;
use crate::schema::{SchemaNode, catalog};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTask {
    pub id: LocalId,
    #[serde(rename = "task")]
    pub text: String,
    pub is_critical: bool,
    pub strategic_alignment: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBriefing {
    pub objective: String,
    pub tasks: Vec<DailyTask>,
    pub insight: String,
}

impl DailyBriefing {
    pub fn toggle_task(&mut self, id: LocalId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Completed tasks as a rounded percentage
    pub fn progress(&self) -> u8 {
        if self.tasks.is_empty() {
            return 0;
        }
        ((self.completed_count() as f64 / self.tasks.len() as f64) * 100.0).round() as u8
    }
}

#[derive(Debug, Deserialize)]
pub struct RawDailyTasks {
    tasks: Vec<RawDailyTask>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDailyTask {
    task: String,
    is_critical: bool,
    strategic_alignment: String,
}

/// Daily task list request shape
pub struct DailyTasks;

impl StructuredFeature for DailyTasks {
    const TEMPLATE: &'static str = "daily-tasks";
    const ACTION: Action = Action::DailyBriefing;
    const TIER: ModelTier = ModelTier::Flash;

    type Raw = RawDailyTasks;
    type Output = Vec<DailyTask>;

    fn schema() -> SchemaNode {
        catalog::daily_tasks()
    }

    fn post_process(raw: RawDailyTasks) -> Vec<DailyTask> {
        raw.tasks
            .into_iter()
            .map(|t| DailyTask {
                id: LocalId::next(),
                text: t.task,
                is_critical: t.is_critical,
                strategic_alignment: t.strategic_alignment,
                completed: false,
            })
            .collect()
    }
}

/// Build today's briefing for `objective`
///
/// `plan_goal` is the goal of an existing plan; when given, the task prompt
/// asks the model to weigh that plan's critical tasks.
pub async fn generate_daily_briefing(
    ctx: &Context,
    objective: &str,
    plan_goal: Option<&str>,
) -> Result<FeatureRun<DailyBriefing>, OrchestratorError> {
    debug!(objective_len = objective.len(), has_plan = plan_goal.is_some(), "generate_daily_briefing: called");
    require_text(objective, "daily objective")?;

    let plan_goal = plan_goal.map(str::trim).filter(|g| !g.is_empty()).map(str::to_string);
    let input = PromptContext::objective(objective, plan_goal);
    let task_prompt = ctx.render(DailyTasks::TEMPLATE, &input)?;
    let insight_prompt = ctx.render("daily-insight", &input)?;
    let system = ctx.persona()?;

    let insight = async {
        ctx.gateway()
            .generate_text(&insight_prompt, &system, ModelTier::Flash)
            .await
            .map_err(|e| OrchestratorError::from_llm(Action::DailyBriefing, e))
    };
    let (tasks, insight) = tokio::try_join!(fetch_structured::<DailyTasks>(ctx, &task_prompt, &system), insight)?;

    let chat = open_chat(ctx, Action::DailyBriefing, &task_prompt, &system).await?;
    Ok(FeatureRun {
        result: DailyBriefing {
            objective: objective.to_string(),
            tasks,
            insight: insight.trim().to_string(),
        },
        chat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockLlmClient, MockReply};
    use crate::llm::{GenerateRequest, GenerateResponse, LlmClient, LlmError, StreamChunk};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::{Barrier, mpsc};

    fn tasks_json() -> serde_json::Value {
        json!({
            "tasks": [
                { "task": "Draft the launch email", "isCritical": true, "strategicAlignment": "Drives signups" },
                { "task": "Review analytics", "isCritical": false, "strategicAlignment": "Informs pricing" }
            ]
        })
    }

    fn responder(request: &GenerateRequest) -> MockReply {
        if request.response_schema.is_some() {
            MockReply::json(tasks_json())
        } else {
            MockReply::Text("  Focus on the email first.\n".to_string())
        }
    }

    #[tokio::test]
    async fn test_generate_daily_briefing() {
        let mock = Arc::new(MockLlmClient::responding(responder));
        let ctx = Context::with_client(mock.clone());

        let run = generate_daily_briefing(&ctx, "Ship v2", None).await.unwrap();
        assert_eq!(run.result.tasks.len(), 2);
        assert_eq!(run.result.insight, "Focus on the email first.");
        assert_ne!(run.result.tasks[0].id, run.result.tasks[1].id);

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.model == "gemini-2.5-flash"));
        assert!(requests.iter().all(|r| !r.contents[0].text.contains("long-term goal")));
    }

    #[tokio::test]
    async fn test_plan_goal_reaches_task_prompt() {
        let mock = Arc::new(MockLlmClient::responding(responder));
        let ctx = Context::with_client(mock.clone());

        generate_daily_briefing(&ctx, "Ship v2", Some("Become profitable")).await.unwrap();

        let requests = mock.requests();
        let task_request = requests.iter().find(|r| r.response_schema.is_some()).unwrap();
        assert!(task_request.contents[0].text.contains("\"Become profitable\""));
    }

    #[tokio::test]
    async fn test_either_failure_fails_briefing() {
        let mock = Arc::new(MockLlmClient::responding(|request| {
            if request.response_schema.is_some() {
                MockReply::json(tasks_json())
            } else {
                MockReply::Fail(500)
            }
        }));
        let ctx = Context::with_client(mock);

        let err = generate_daily_briefing(&ctx, "Ship v2", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to generate daily briefing from AI.");
    }

    #[test]
    fn test_toggle_and_progress() {
        let mut briefing = DailyBriefing {
            objective: "Ship v2".to_string(),
            tasks: DailyTasks::post_process(serde_json::from_value(tasks_json()).unwrap()),
            insight: String::new(),
        };
        let id = briefing.tasks[1].id;

        assert_eq!(briefing.toggle_task(id), Some(true));
        assert_eq!(briefing.progress(), 50);
        assert_eq!(briefing.completed_count(), 1);
        assert_eq!(briefing.toggle_task(LocalId::next()), None);
    }

    /// Holds every generate call until two are in flight at once
    struct RendezvousClient {
        barrier: Barrier,
    }

    #[async_trait]
    impl LlmClient for RendezvousClient {
        async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
            self.barrier.wait().await;
            let text = if request.response_schema.is_some() {
                tasks_json().to_string()
            } else {
                "Stay focused.".to_string()
            };
            Ok(GenerateResponse {
                text: Some(text),
                ..Default::default()
            })
        }

        async fn stream(
            &self,
            _request: GenerateRequest,
            _chunk_tx: mpsc::Sender<StreamChunk>,
        ) -> Result<GenerateResponse, LlmError> {
            Ok(GenerateResponse::default())
        }
    }

    #[tokio::test]
    async fn test_calls_are_issued_concurrently() {
        let client = Arc::new(RendezvousClient {
            barrier: Barrier::new(2),
        });
        let ctx = Context::with_client(client);

        // Sequential calls would wait on the barrier forever
        let run = tokio::time::timeout(Duration::from_secs(5), generate_daily_briefing(&ctx, "Ship v2", None))
            .await
            .expect("briefing calls were not concurrent")
            .unwrap();
        assert_eq!(run.result.insight, "Stay focused.");
    }
}
