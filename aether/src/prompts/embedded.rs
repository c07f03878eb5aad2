//! Embedded fallback prompts
//!
//! These are compiled into the binary and used when no override file is found.
//! Feature templates must ask for exactly one JSON object and no prose.

/// System instruction shared by every feature call and chat session
pub const PERSONA: &str = "You are Vigil, the AI Chief of Staff for Aether, a Life Operating System. \
Your communication style is professional, concise, data-driven, and focused on execution and efficiency. \
You provide clear, actionable intelligence, not motivation. Address the user directly but maintain a formal, \
advisory tone. Avoid conversational filler, emojis, or overly friendly language. Your goal is to deliver \
precise, structured JSON output initially, and then engage in helpful, concise conversation when the user \
asks follow-up questions.";

/// System instruction for the command router
pub const ROUTER_SYSTEM: &str = "You are the routing engine for the Aether application. \
Your only job is to analyze the user's command and call the appropriate navigation function. \
Do not respond with text. Only call a function.";

pub const COMMAND_ROUTER: &str = r#"User command: "{{command}}""#;

pub const GOAL_BREAKDOWN: &str = r#"Reverse-engineer this goal into a detailed plan: "{{goal}}". For each milestone, provide key results, specific tasks, and a risk analysis identifying potential obstacles and mitigation strategies. Mark tasks on the critical path. Respond with ONLY the JSON object."#;

pub const DAILY_TASKS: &str = r#"Objective: "{{objective}}". Generate 3-4 high-impact tasks for today. For each task, provide its strategic alignment explaining WHY it supports the objective. Mark the most important task as critical.{{#if plan_goal}}
Consider the user's long-term goal: "{{plan_goal}}". Are there any critical tasks from that plan that should be prioritized today?{{/if}}"#;

pub const DAILY_INSIGHT: &str = r#"Based on the daily objective "{{objective}}", provide one concise, strategic insight or question to maintain focus. Max 2 sentences."#;

pub const DECISION_ANALYSIS: &str = r#"Analyze the following decision: "{{decision}}" based on these weighted factors: {{factors_json}}. Provide a clear recommendation, a confidence score (0-100), and detailed lists of pros, cons, and potential pitfalls. Respond with ONLY the JSON object."#;

pub const DECISION_FACTORS: &str = r#"For the decision "{{decision}}", suggest 5-7 relevant factors to consider. Examples: financial cost, time investment, strategic alignment, potential ROI, team morale. Respond with ONLY the JSON object."#;

pub const FRICTION_AUDIT: &str = r#"Analyze the user's workflow: "{{workflow}}". Identify 3-4 high-impact inefficiencies. For each, provide a concise analysis, a concrete recommendation, and score its Impact and Effort on a scale of 1-10 (where 10 is highest). Respond with ONLY the JSON object."#;

pub const BLACK_SWAN: &str = r#"Run a "Black Swan" simulation for this scenario: "{{scenario}}". Analyze ripple effects across finances, work, health, and relationships. Provide a detailed report with Best Case, Worst Case, and Most Likely outcomes. For each outcome, provide a summary and 3-4 leading indicators to monitor. Respond with ONLY the JSON object."#;

/// Get embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "persona" => Some(PERSONA),
        "router-system" => Some(ROUTER_SYSTEM),
        "command-router" => Some(COMMAND_ROUTER),
        "goal-breakdown" => Some(GOAL_BREAKDOWN),
        "daily-tasks" => Some(DAILY_TASKS),
        "daily-insight" => Some(DAILY_INSIGHT),
        "decision-analysis" => Some(DECISION_ANALYSIS),
        "decision-factors" => Some(DECISION_FACTORS),
        "friction-audit" => Some(FRICTION_AUDIT),
        "black-swan" => Some(BLACK_SWAN),
        _ => None,
    }
}

/// Names of all embedded templates
pub const TEMPLATE_NAMES: &[&str] = &[
    "persona",
    "router-system",
    "command-router",
    "goal-breakdown",
    "daily-tasks",
    "daily-insight",
    "decision-analysis",
    "decision-factors",
    "friction-audit",
    "black-swan",
];
