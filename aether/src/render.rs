//! Terminal rendering for feature results
//!
//! Text output is colored for the terminal; JSON output is the result
//! serialized as-is.

use colored::Colorize;
use eyre::{Context, Result};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::features::briefing::DailyBriefing;
use crate::features::decision::{DecisionAnalysis, FactorList};
use crate::features::friction::{FrictionReportItem, group_by_quadrant};
use crate::features::goal::GoalPlan;
use crate::features::simulation::BlackSwanReport;
use crate::navigation::CommandBarResult;

/// Render `value` in the requested format
pub fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl Fn(&T) -> String) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => serde_json::to_string_pretty(value).context("Failed to serialize result"),
    }
}

fn heading(title: &str) -> String {
    title.bright_cyan().bold().to_string()
}

fn bullets(lines: &mut Vec<String>, items: &[String]) {
    for item in items {
        lines.push(format!("  - {}", item));
    }
}

pub fn route(result: &CommandBarResult) -> String {
    let mut lines = vec![format!("{} {}", "Feature:".bright_cyan(), result.feature)];
    if let Some(seed) = &result.seed {
        lines.push(format!("{} {}", "Seed:".bright_cyan(), seed));
    }
    lines.join("\n")
}

pub fn goal_plan(plan: &GoalPlan) -> String {
    let mut lines = vec![
        heading(&plan.goal),
        plan.critical_path_summary.dimmed().to_string(),
        format!("Progress: {}%", plan.progress()),
    ];

    for (i, milestone) in plan.milestones.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!(
            "{} {} ({}%)",
            format!("{}.", i + 1).bright_blue().bold(),
            milestone.name.bold(),
            milestone.progress()
        ));

        lines.push("  Key Results".green().to_string());
        for kr in &milestone.key_results {
            lines.push(format!("    ✓ {}", kr));
        }

        lines.push("  Tasks".white().to_string());
        for task in &milestone.tasks {
            let check = if task.completed { "[x]" } else { "[ ]" };
            let key = if task.is_critical { "★".yellow().to_string() } else { " ".to_string() };
            lines.push(format!(
                "    {} {} {} {}",
                check,
                key,
                task.text,
                format!("({}) #{}", task.duration, task.id).dimmed()
            ));
        }

        lines.push("  Risk Analysis".yellow().to_string());
        lines.push("    Obstacles:".to_string());
        for obstacle in &milestone.risk_analysis.potential_obstacles {
            lines.push(format!("      - {}", obstacle));
        }
        lines.push("    Mitigations:".to_string());
        for strategy in &milestone.risk_analysis.mitigation_strategies {
            lines.push(format!("      - {}", strategy));
        }
    }
    lines.join("\n")
}

pub fn briefing(briefing: &DailyBriefing) -> String {
    let mut lines = vec![heading(&format!("Daily Briefing: {}", briefing.objective))];

    for task in &briefing.tasks {
        let check = if task.completed { "[x]" } else { "[ ]" };
        let text = if task.is_critical {
            task.text.yellow().bold().to_string()
        } else {
            task.text.clone()
        };
        lines.push(format!("{} {} {}", check, text, format!("#{}", task.id).dimmed()));
        lines.push(format!("      {}", task.strategic_alignment.dimmed()));
    }

    lines.push(format!(
        "{} of {} tasks done ({}%)",
        briefing.completed_count(),
        briefing.tasks.len(),
        briefing.progress()
    ));
    if !briefing.insight.is_empty() {
        lines.push(String::new());
        lines.push(format!("{} {}", "Vigil's Insight:".bright_magenta(), briefing.insight));
    }
    lines.join("\n")
}

pub fn factors(factors: &FactorList) -> String {
    if factors.is_empty() {
        return "No factors yet.".dimmed().to_string();
    }
    factors
        .as_slice()
        .iter()
        .map(|f| {
            let name = if f.name.trim().is_empty() { "(unnamed)" } else { f.name.as_str() };
            format!("  #{} {} weight {} score {}", f.id, name, f.weight, f.score)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn decision_analysis(analysis: &DecisionAnalysis) -> String {
    let mut lines = vec![
        heading("Recommendation"),
        analysis.recommendation.clone(),
        format!("Confidence: {}%", analysis.confidence_score),
        String::new(),
        "Pros".green().bold().to_string(),
    ];
    bullets(&mut lines, &analysis.pros);
    lines.push("Cons".red().bold().to_string());
    bullets(&mut lines, &analysis.cons);
    lines.push("Potential Pitfalls".yellow().bold().to_string());
    bullets(&mut lines, &analysis.potential_pitfalls);
    lines.join("\n")
}

pub fn friction_report(report: &[FrictionReportItem]) -> String {
    let mut lines = Vec::new();
    for (quadrant, items) in group_by_quadrant(report) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(heading(quadrant.label()));
        lines.push(quadrant.description().dimmed().to_string());
        for item in items {
            lines.push(format!(
                "  {} {}",
                item.inefficiency.bold(),
                format!("(impact {}, effort {})", item.impact, item.effort).dimmed()
            ));
            lines.push(format!("    {}", item.analysis));
            lines.push(format!("    {} {}", "→".green(), item.recommendation));
        }
    }
    if lines.is_empty() {
        return "No inefficiencies reported.".dimmed().to_string();
    }
    lines.join("\n")
}

pub fn simulation(report: &BlackSwanReport) -> String {
    let mut lines = Vec::new();
    for (title, outcome) in report.outcomes() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(heading(title));
        lines.push(outcome.outcome.clone());
        lines.push("  Leading indicators:".dimmed().to_string());
        bullets(&mut lines, &outcome.indicators);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::friction::FrictionReportItem;
    use crate::features::simulation::SimulationOutcome;
    use crate::navigation::Feature;

    #[test]
    fn test_route_text() {
        let text = route(&CommandBarResult::new(Feature::BlackSwan, Some("I lose my job".to_string())));
        assert!(text.contains("Black Swan Simulator"));
        assert!(text.contains("I lose my job"));

        let text = route(&CommandBarResult::dashboard());
        assert!(!text.contains("Seed"));
    }

    #[test]
    fn test_emit_json() {
        let json = emit(OutputFormat::Json, &CommandBarResult::dashboard(), route).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["feature"], "dashboard");
        assert!(value["seed"].is_null());
    }

    #[test]
    fn test_friction_report_groups() {
        let report = vec![
            FrictionReportItem {
                inefficiency: "Status meetings".to_string(),
                analysis: "Daily and long".to_string(),
                recommendation: "Async updates".to_string(),
                impact: 7,
                effort: 2,
            },
            FrictionReportItem {
                inefficiency: "Legacy CRM".to_string(),
                analysis: "Slow".to_string(),
                recommendation: "Delegate the migration".to_string(),
                impact: 3,
                effort: 9,
            },
        ];

        let text = friction_report(&report);
        assert!(text.contains("Quick Wins"));
        assert!(text.contains("Reconsider"));
        assert!(!text.contains("Major Projects"));
        assert!(text.find("Quick Wins") < text.find("Reconsider"));
    }

    #[test]
    fn test_simulation_order() {
        let outcome = |text: &str| SimulationOutcome {
            outcome: text.to_string(),
            indicators: vec!["Runway".to_string()],
        };
        let report = BlackSwanReport {
            best_case: outcome("good"),
            worst_case: outcome("bad"),
            most_likely: outcome("meh"),
        };

        let text = simulation(&report);
        assert!(text.find("Best Case") < text.find("Most Likely"));
        assert!(text.find("Most Likely") < text.find("Worst Case"));
    }

    #[test]
    fn test_empty_factor_list() {
        assert!(factors(&FactorList::new()).contains("No factors yet."));
    }
}
