//! Goal breakdown
//!
//! Turns one goal into milestones with key results, tasks and a risk
//! analysis. Tasks get local identifiers and start incomplete; every edit
//! after that is local and never goes back to the model.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FeatureRun, StructuredFeature, require_text, run_structured};
use crate::context::Context;
use crate::error::{Action, OrchestratorError};
use crate::ids::LocalId;
use crate::prompts::PromptContext;
use crate::schema::{SchemaNode, catalog};

/// Duration label given to tasks added by hand
pub const DEFAULT_TASK_DURATION: &str = "1 day";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlan {
    pub goal: String,
    pub critical_path_summary: String,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(rename = "milestone")]
    pub name: String,
    pub key_results: Vec<String>,
    pub tasks: Vec<Task>,
    pub risk_analysis: RiskAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: LocalId,
    #[serde(rename = "task")]
    pub text: String,
    pub is_critical: bool,
    pub duration: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    pub potential_obstacles: Vec<String>,
    pub mitigation_strategies: Vec<String>,
}

/// Field changes for one task; `None` leaves the field as it is
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub text: Option<String>,
    pub duration: Option<String>,
    pub is_critical: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGoalPlan {
    goal: String,
    critical_path_summary: String,
    milestones: Vec<RawMilestone>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMilestone {
    milestone: String,
    key_results: Vec<String>,
    tasks: Vec<RawTask>,
    risk_analysis: RiskAnalysis,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    task: String,
    is_critical: bool,
    duration: String,
}

/// Goal breakdown request shape
pub struct GoalBreakdown;

impl StructuredFeature for GoalBreakdown {
    const TEMPLATE: &'static str = "goal-breakdown";
    const ACTION: Action = Action::GoalBreakdown;

    type Raw = RawGoalPlan;
    type Output = GoalPlan;

    fn schema() -> SchemaNode {
        catalog::goal_plan()
    }

    fn post_process(raw: RawGoalPlan) -> GoalPlan {
        GoalPlan {
            goal: raw.goal,
            critical_path_summary: raw.critical_path_summary,
            milestones: raw
                .milestones
                .into_iter()
                .map(|m| Milestone {
                    name: m.milestone,
                    key_results: m.key_results,
                    tasks: m
                        .tasks
                        .into_iter()
                        .map(|t| Task {
                            id: LocalId::next(),
                            text: t.task,
                            is_critical: t.is_critical,
                            duration: t.duration,
                            completed: false,
                        })
                        .collect(),
                    risk_analysis: m.risk_analysis,
                })
                .collect(),
        }
    }
}

/// Break `goal` down into a plan and open a follow-up chat
pub async fn generate_goal_breakdown(ctx: &Context, goal: &str) -> Result<FeatureRun<GoalPlan>, OrchestratorError> {
    debug!(goal_len = goal.len(), "generate_goal_breakdown: called");
    require_text(goal, "goal")?;
    run_structured::<GoalBreakdown>(ctx, &PromptContext::goal(goal)).await
}

fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u8
}

impl Milestone {
    /// Completed tasks as a rounded percentage; 0 for an empty milestone
    pub fn progress(&self) -> u8 {
        percent(self.tasks.iter().filter(|t| t.completed).count(), self.tasks.len())
    }
}

impl GoalPlan {
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.milestones.iter().flat_map(|m| m.tasks.iter())
    }

    pub fn task(&self, id: LocalId) -> Option<&Task> {
        self.tasks().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: LocalId) -> Option<&mut Task> {
        self.milestones
            .iter_mut()
            .flat_map(|m| m.tasks.iter_mut())
            .find(|t| t.id == id)
    }

    /// Overall progress across every milestone
    pub fn progress(&self) -> u8 {
        percent(self.tasks().filter(|t| t.completed).count(), self.tasks().count())
    }

    /// Flip the completion flag; returns the new value
    pub fn toggle_task(&mut self, id: LocalId) -> Option<bool> {
        let task = self.task_mut(id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Apply an edit; returns false when no task has `id`
    pub fn edit_task(&mut self, id: LocalId, edit: TaskEdit) -> bool {
        let Some(task) = self.task_mut(id) else {
            return false;
        };
        if let Some(text) = edit.text {
            task.text = text;
        }
        if let Some(duration) = edit.duration {
            task.duration = duration;
        }
        if let Some(is_critical) = edit.is_critical {
            task.is_critical = is_critical;
        }
        true
    }

    /// Append a task to the milestone at `milestone` (0-based)
    pub fn add_task(&mut self, milestone: usize, text: impl Into<String>) -> Option<LocalId> {
        let milestone = self.milestones.get_mut(milestone)?;
        let id = LocalId::next();
        milestone.tasks.push(Task {
            id,
            text: text.into(),
            is_critical: false,
            duration: DEFAULT_TASK_DURATION.to_string(),
            completed: false,
        });
        debug!(%id, "add_task: added");
        Some(id)
    }

    pub fn remove_task(&mut self, id: LocalId) -> bool {
        for milestone in &mut self.milestones {
            if let Some(pos) = milestone.tasks.iter().position(|t| t.id == id) {
                milestone.tasks.remove(pos);
                return true;
            }
        }
        false
    }
}
