//! Black swan simulation

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FeatureRun, StructuredFeature, require_text, run_structured};
use crate::context::Context;
use crate::error::{Action, OrchestratorError};
use crate::prompts::PromptContext;
use crate::schema::{SchemaNode, catalog};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub outcome: String,
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackSwanReport {
    pub best_case: SimulationOutcome,
    pub worst_case: SimulationOutcome,
    pub most_likely: SimulationOutcome,
}

impl BlackSwanReport {
    /// Outcomes with their display titles
    pub fn outcomes(&self) -> [(&'static str, &SimulationOutcome); 3] {
        [
            ("Best Case", &self.best_case),
            ("Most Likely", &self.most_likely),
            ("Worst Case", &self.worst_case),
        ]
    }
}

pub struct BlackSwanSimulation;

impl StructuredFeature for BlackSwanSimulation {
    const TEMPLATE: &'static str = "black-swan";
    const ACTION: Action = Action::Simulation;

    type Raw = BlackSwanReport;
    type Output = BlackSwanReport;

    fn schema() -> SchemaNode {
        catalog::black_swan_report()
    }

    fn post_process(raw: BlackSwanReport) -> BlackSwanReport {
        raw
    }
}

/// Simulate the ripple effects of `scenario`
pub async fn run_simulation(ctx: &Context, scenario: &str) -> Result<FeatureRun<BlackSwanReport>, OrchestratorError> {
    debug!(scenario_len = scenario.len(), "run_simulation: called");
    require_text(scenario, "scenario")?;
    run_structured::<BlackSwanSimulation>(ctx, &PromptContext::scenario(scenario)).await
}
