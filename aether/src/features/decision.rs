//! Decision matrix
//!
//! The user authors a weighted factor list; the model analyzes the decision
//! against it. Factor suggestion is a lighter sibling call whose names are
//! appended to the list at neutral weight and score.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FeatureRun, StructuredFeature, fetch_structured, require_text, run_structured};
use crate::context::Context;
use crate::error::{Action, OrchestratorError};
use crate::ids::LocalId;
use crate::llm::{LlmError, ModelTier};
use crate::prompts::PromptContext;
use crate::schema::{SchemaNode, catalog};

/// Weight and score given to new and suggested factors
pub const NEUTRAL_RATING: u8 = 5;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionFactor {
    pub id: LocalId,
    pub name: String,
    pub weight: u8,
    pub score: u8,
}

/// Field changes for one factor; `None` leaves the field as it is
#[derive(Debug, Clone, Default)]
pub struct FactorUpdate {
    pub name: Option<String>,
    pub weight: Option<u8>,
    pub score: Option<u8>,
}

fn check_rating(what: &str, value: u8) -> Result<u8, OrchestratorError> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(value)
    } else {
        Err(OrchestratorError::invalid_input(format!(
            "Factor {} must be between {} and {}, got {}.",
            what, MIN_RATING, MAX_RATING, value
        )))
    }
}

/// User-authored factors in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FactorList {
    factors: Vec<DecisionFactor>,
}

impl FactorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[DecisionFactor] {
        &self.factors
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn get(&self, id: LocalId) -> Option<&DecisionFactor> {
        self.factors.iter().find(|f| f.id == id)
    }

    /// Append a factor at neutral weight and score
    pub fn add(&mut self, name: impl Into<String>) -> LocalId {
        let id = LocalId::next();
        self.factors.push(DecisionFactor {
            id,
            name: name.into(),
            weight: NEUTRAL_RATING,
            score: NEUTRAL_RATING,
        });
        id
    }

    /// Append a factor with explicit ratings
    pub fn add_rated(&mut self, name: impl Into<String>, weight: u8, score: u8) -> Result<LocalId, OrchestratorError> {
        let weight = check_rating("weight", weight)?;
        let score = check_rating("score", score)?;
        let id = self.add(name);
        if let Some(factor) = self.factors.last_mut() {
            factor.weight = weight;
            factor.score = score;
        }
        Ok(id)
    }

    pub fn remove(&mut self, id: LocalId) -> bool {
        let before = self.factors.len();
        self.factors.retain(|f| f.id != id);
        self.factors.len() != before
    }

    /// Apply an update; `Ok(false)` when no factor has `id`
    pub fn update(&mut self, id: LocalId, update: FactorUpdate) -> Result<bool, OrchestratorError> {
        let weight = update.weight.map(|w| check_rating("weight", w)).transpose()?;
        let score = update.score.map(|s| check_rating("score", s)).transpose()?;

        let Some(factor) = self.factors.iter_mut().find(|f| f.id == id) else {
            return Ok(false);
        };
        if let Some(name) = update.name {
            factor.name = name;
        }
        if let Some(weight) = weight {
            factor.weight = weight;
        }
        if let Some(score) = score {
            factor.score = score;
        }
        Ok(true)
    }

    /// Append suggested names; existing factors are never touched
    pub fn merge_suggested<I, S>(&mut self, names: I) -> Vec<LocalId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(|name| self.add(name)).collect()
    }

    /// Ready for analysis: at least one factor, none with a blank name
    pub fn validate(&self) -> Result<(), OrchestratorError> {
        if self.factors.is_empty() {
            return Err(OrchestratorError::invalid_input("Add at least one factor first."));
        }
        if self.factors.iter().any(|f| f.name.trim().is_empty()) {
            return Err(OrchestratorError::invalid_input("Every factor needs a name."));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionAnalysis {
    pub recommendation: String,
    pub confidence_score: u8,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub potential_pitfalls: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDecisionAnalysis {
    recommendation: String,
    confidence_score: i64,
    pros: Vec<String>,
    cons: Vec<String>,
    potential_pitfalls: Vec<String>,
}

/// Decision analysis request shape
pub struct AnalyzeDecision;

impl StructuredFeature for AnalyzeDecision {
    const TEMPLATE: &'static str = "decision-analysis";
    const ACTION: Action = Action::DecisionAnalysis;

    type Raw = RawDecisionAnalysis;
    type Output = DecisionAnalysis;

    fn schema() -> SchemaNode {
        catalog::decision_analysis()
    }

    fn post_process(raw: RawDecisionAnalysis) -> DecisionAnalysis {
        DecisionAnalysis {
            recommendation: raw.recommendation,
            confidence_score: raw.confidence_score.clamp(0, 100) as u8,
            pros: raw.pros,
            cons: raw.cons,
            potential_pitfalls: raw.potential_pitfalls,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawSuggestedFactors {
    factors: Vec<RawSuggestedFactor>,
}

#[derive(Debug, Deserialize)]
struct RawSuggestedFactor {
    name: String,
}

/// Factor suggestion request shape
pub struct SuggestFactors;

impl StructuredFeature for SuggestFactors {
    const TEMPLATE: &'static str = "decision-factors";
    const ACTION: Action = Action::SuggestFactors;
    const TIER: ModelTier = ModelTier::Flash;

    type Raw = RawSuggestedFactors;
    type Output = Vec<String>;

    fn schema() -> SchemaNode {
        catalog::decision_factors()
    }

    fn post_process(raw: RawSuggestedFactors) -> Vec<String> {
        raw.factors
            .into_iter()
            .map(|f| f.name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Analyze `decision` against the weighted factors
pub async fn analyze_decision(
    ctx: &Context,
    decision: &str,
    factors: &FactorList,
) -> Result<FeatureRun<DecisionAnalysis>, OrchestratorError> {
    debug!(decision_len = decision.len(), factor_count = factors.len(), "analyze_decision: called");
    require_text(decision, "decision")?;
    factors.validate()?;

    let factors_json = serde_json::to_string(factors)
        .map_err(|e| OrchestratorError::from_llm(Action::DecisionAnalysis, LlmError::Json(e)))?;
    let input = PromptContext::decision(decision).with_factors_json(factors_json);
    run_structured::<AnalyzeDecision>(ctx, &input).await
}

/// Ask for factor names relevant to `decision`
pub async fn suggest_factors(ctx: &Context, decision: &str) -> Result<Vec<String>, OrchestratorError> {
    debug!(decision_len = decision.len(), "suggest_factors: called");
    require_text(decision, "decision")?;

    let prompt = ctx.render(SuggestFactors::TEMPLATE, &PromptContext::decision(decision))?;
    let system = ctx.persona()?;
    fetch_structured::<SuggestFactors>(ctx, &prompt, &system).await
}
