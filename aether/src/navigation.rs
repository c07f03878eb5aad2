//! Feature navigation and the command bar
//!
//! A routed command switches the active feature and may arm a one-shot
//! seed: pre-filled input that the target feature submits once when it is
//! opened. Taking the seed clears it, so it can never fire twice.

use std::fmt;

use serde::Serialize;
use tracing::debug;

/// The five navigable surfaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    #[default]
    Dashboard,
    GoalEngine,
    FrictionAudit,
    DecisionMatrix,
    BlackSwan,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Dashboard,
        Feature::GoalEngine,
        Feature::FrictionAudit,
        Feature::DecisionMatrix,
        Feature::BlackSwan,
    ];

    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            Feature::Dashboard => "Dashboard",
            Feature::GoalEngine => "Goal Engine",
            Feature::FrictionAudit => "Friction Audit",
            Feature::DecisionMatrix => "Decision Matrix",
            Feature::BlackSwan => "Black Swan Simulator",
        }
    }

    /// Parse a feature from a short name typed in the shell
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "dashboard" | "home" | "briefing" => Some(Feature::Dashboard),
            "goal" | "goals" | "goal-engine" => Some(Feature::GoalEngine),
            "audit" | "friction" | "friction-audit" => Some(Feature::FrictionAudit),
            "decide" | "decision" | "decision-matrix" => Some(Feature::DecisionMatrix),
            "simulate" | "simulation" | "black-swan" => Some(Feature::BlackSwan),
            _ => None,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Outcome of routing one command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandBarResult {
    pub feature: Feature,
    pub seed: Option<String>,
}

impl CommandBarResult {
    pub fn new(feature: Feature, seed: Option<String>) -> Self {
        Self { feature, seed }
    }

    /// The catch-all result: dashboard, no seed
    pub fn dashboard() -> Self {
        Self::default()
    }
}

/// Seed text waiting to be submitted by `feature`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSeed {
    pub feature: Feature,
    pub text: String,
}

/// Active feature, command-bar visibility and the pending seed
#[derive(Debug, Default)]
pub struct Navigator {
    active: Feature,
    command_bar_open: bool,
    pending: Option<PendingSeed>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Feature {
        self.active
    }

    pub fn is_command_bar_open(&self) -> bool {
        self.command_bar_open
    }

    /// Switch to `feature` directly; any seed armed for another feature is dropped
    pub fn open(&mut self, feature: Feature) {
        if self.pending.as_ref().is_some_and(|seed| seed.feature != feature) {
            debug!(?feature, "open: dropping seed armed for another feature");
            self.pending = None;
        }
        self.active = feature;
    }

    /// Apply a routed command
    pub fn apply(&mut self, result: CommandBarResult) {
        debug!(feature = ?result.feature, has_seed = result.seed.is_some(), "apply: called");
        self.active = result.feature;
        self.pending = result.seed.map(|text| PendingSeed {
            feature: result.feature,
            text,
        });
        self.command_bar_open = false;
    }

    /// Take the armed seed for `feature`, exactly once
    pub fn take_seed(&mut self, feature: Feature) -> Option<String> {
        match &self.pending {
            Some(seed) if seed.feature == feature => self.pending.take().map(|seed| seed.text),
            _ => None,
        }
    }

    pub fn has_pending_seed(&self) -> bool {
        self.pending.is_some()
    }

    /// Modifier+k
    pub fn toggle_command_bar(&mut self) -> bool {
        self.command_bar_open = !self.command_bar_open;
        self.command_bar_open
    }

    /// Escape
    pub fn close_command_bar(&mut self) {
        self.command_bar_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_consumed_exactly_once() {
        let mut nav = Navigator::new();
        nav.apply(CommandBarResult::new(
            Feature::GoalEngine,
            Some("Learn Spanish".to_string()),
        ));

        assert_eq!(nav.active(), Feature::GoalEngine);
        assert_eq!(nav.take_seed(Feature::GoalEngine), Some("Learn Spanish".to_string()));
        assert_eq!(nav.take_seed(Feature::GoalEngine), None);
        assert!(!nav.has_pending_seed());
    }

    #[test]
    fn test_seed_only_fires_for_its_feature() {
        let mut nav = Navigator::new();
        nav.apply(CommandBarResult::new(
            Feature::BlackSwan,
            Some("market crash".to_string()),
        ));

        assert_eq!(nav.take_seed(Feature::FrictionAudit), None);
        assert!(nav.has_pending_seed());
        assert_eq!(nav.take_seed(Feature::BlackSwan), Some("market crash".to_string()));
    }

    #[test]
    fn test_apply_without_seed_clears_previous_seed() {
        let mut nav = Navigator::new();
        nav.apply(CommandBarResult::new(Feature::GoalEngine, Some("old".to_string())));
        nav.apply(CommandBarResult::dashboard());

        assert_eq!(nav.active(), Feature::Dashboard);
        assert!(!nav.has_pending_seed());
    }

    #[test]
    fn test_open_other_feature_drops_seed() {
        let mut nav = Navigator::new();
        nav.apply(CommandBarResult::new(Feature::DecisionMatrix, Some("Hire?".to_string())));
        nav.open(Feature::GoalEngine);
        assert!(!nav.has_pending_seed());
    }

    #[test]
    fn test_command_bar_visibility() {
        let mut nav = Navigator::new();
        assert!(!nav.is_command_bar_open());
        assert!(nav.toggle_command_bar());
        assert!(!nav.toggle_command_bar());

        nav.toggle_command_bar();
        nav.close_command_bar();
        assert!(!nav.is_command_bar_open());

        nav.toggle_command_bar();
        nav.apply(CommandBarResult::dashboard());
        assert!(!nav.is_command_bar_open());
    }

    #[test]
    fn test_feature_from_name() {
        assert_eq!(Feature::from_name("Goal"), Some(Feature::GoalEngine));
        assert_eq!(Feature::from_name("black-swan"), Some(Feature::BlackSwan));
        assert_eq!(Feature::from_name("nowhere"), None);
    }
}
