//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::OrchestratorError;
use crate::features::decision::{FactorList, NEUTRAL_RATING};
use crate::ids::LocalId;

/// Aether - a terminal Life Operating System run by Vigil, the AI chief of staff
#[derive(Parser)]
#[command(
    name = "aether",
    about = "Goal plans, daily briefings, decisions, friction audits and black swan simulations",
    version,
    after_help = "Logs are written to: ~/.local/share/aether/logs/aether.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Route a free-text command to a feature (what the command bar does)
    Route {
        /// The command, e.g. "help me decide whether to move to Berlin"
        command: String,
    },

    /// Break a goal down into milestones, tasks and risks
    Goal {
        goal: String,

        /// Continue with follow-up questions afterwards
        #[arg(long)]
        chat: bool,
    },

    /// Generate today's high-impact tasks and a focus insight
    Briefing {
        objective: String,

        /// Long-term goal whose critical tasks should be considered
        #[arg(long, value_name = "GOAL")]
        plan_goal: Option<String>,

        #[arg(long)]
        chat: bool,
    },

    /// Analyze a decision against weighted factors
    Decide {
        decision: String,

        /// Factor as NAME[:WEIGHT[:SCORE]]; weight and score default to 5
        #[arg(short = 'F', long = "factor", value_name = "NAME[:WEIGHT[:SCORE]]")]
        factors: Vec<FactorSpec>,

        /// Ask Vigil to suggest additional factors first
        #[arg(long)]
        suggest: bool,

        #[arg(long)]
        chat: bool,
    },

    /// Find the inefficiencies in a workflow
    Audit {
        workflow: String,

        #[arg(long)]
        chat: bool,
    },

    /// Simulate the ripple effects of a "what if" scenario
    Simulate {
        scenario: String,

        #[arg(long)]
        chat: bool,
    },

    /// Start the interactive shell
    Shell,
}

/// Output format for one-shot commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// A decision factor given on the command line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactorSpec {
    pub name: String,
    pub weight: u8,
    pub score: u8,
}

impl FactorSpec {
    /// Add this factor to `factors`; ratings are range-checked there
    pub fn add_to(&self, factors: &mut FactorList) -> Result<LocalId, OrchestratorError> {
        factors.add_rated(self.name.clone(), self.weight, self.score)
    }
}

impl std::str::FromStr for FactorSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rating = |part: &str| {
            part.trim()
                .parse::<u8>()
                .map_err(|_| format!("Invalid rating '{}' in factor '{}'", part, s))
        };

        let parts: Vec<&str> = s.split(':').collect();
        let (name, weight, score) = match parts.as_slice() {
            [name] => (*name, NEUTRAL_RATING, NEUTRAL_RATING),
            [name, weight] => (*name, rating(*weight)?, NEUTRAL_RATING),
            [name, weight, score] => (*name, rating(*weight)?, rating(*score)?),
            _ => return Err(format!("Invalid factor '{}'. Use NAME[:WEIGHT[:SCORE]]", s)),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err("Factor name cannot be empty".to_string());
        }

        Ok(Self {
            name: name.to_string(),
            weight,
            score,
        })
    }
}
