//! Friction audit
//!
//! The model scores each inefficiency for impact and effort; the quadrant
//! an item lands in is derived here from those two scores alone.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FeatureRun, StructuredFeature, require_text, run_structured};
use crate::context::Context;
use crate::error::{Action, OrchestratorError};
use crate::prompts::PromptContext;
use crate::schema::{SchemaNode, catalog};

/// Scores at or above this count as high impact
const HIGH_IMPACT: i64 = 6;
/// Scores at or below this count as low effort
const LOW_EFFORT: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrictionReportItem {
    pub inefficiency: String,
    pub analysis: String,
    pub recommendation: String,
    pub impact: i64,
    pub effort: i64,
}

impl FrictionReportItem {
    pub fn quadrant(&self) -> Quadrant {
        Quadrant::classify(self.impact, self.effort)
    }
}

/// Impact/effort quadrant, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    QuickWins,
    MajorProjects,
    FillIns,
    Reconsider,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::QuickWins,
        Quadrant::MajorProjects,
        Quadrant::FillIns,
        Quadrant::Reconsider,
    ];

    pub fn classify(impact: i64, effort: i64) -> Self {
        match (impact >= HIGH_IMPACT, effort <= LOW_EFFORT) {
            (true, true) => Quadrant::QuickWins,
            (true, false) => Quadrant::MajorProjects,
            (false, true) => Quadrant::FillIns,
            (false, false) => Quadrant::Reconsider,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::QuickWins => "Quick Wins",
            Quadrant::MajorProjects => "Major Projects",
            Quadrant::FillIns => "Fill-ins",
            Quadrant::Reconsider => "Reconsider",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Quadrant::QuickWins => "High Impact, Low Effort. Prioritize these.",
            Quadrant::MajorProjects => "High Impact, High Effort. Plan carefully.",
            Quadrant::FillIns => "Low Impact, Low Effort. Do when time permits.",
            Quadrant::Reconsider => "Low Impact, High Effort. Avoid or delegate.",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Group items by quadrant in display order, keeping report order within
/// each group; empty quadrants are omitted
pub fn group_by_quadrant(report: &[FrictionReportItem]) -> Vec<(Quadrant, Vec<&FrictionReportItem>)> {
    Quadrant::ALL
        .iter()
        .map(|q| (*q, report.iter().filter(|item| item.quadrant() == *q).collect::<Vec<_>>()))
        .filter(|(_, items)| !items.is_empty())
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct RawFrictionReport {
    report: Vec<FrictionReportItem>,
}

/// Friction audit request shape
pub struct FrictionAudit;

impl StructuredFeature for FrictionAudit {
    const TEMPLATE: &'static str = "friction-audit";
    const ACTION: Action = Action::FrictionAudit;

    type Raw = RawFrictionReport;
    type Output = Vec<FrictionReportItem>;

    fn schema() -> SchemaNode {
        catalog::friction_report()
    }

    fn post_process(raw: RawFrictionReport) -> Vec<FrictionReportItem> {
        raw.report
    }
}

/// Audit the described workflow
pub async fn generate_friction_audit(
    ctx: &Context,
    workflow: &str,
) -> Result<FeatureRun<Vec<FrictionReportItem>>, OrchestratorError> {
    debug!(workflow_len = workflow.len(), "generate_friction_audit: called");
    require_text(workflow, "workflow description")?;
    run_structured::<FrictionAudit>(ctx, &PromptContext::workflow(workflow)).await
}
