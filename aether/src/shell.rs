//! Interactive shell
//!
//! The terminal stand-in for the command bar and the five feature views.
//! Plain text either submits the active feature or, once a result has an
//! open chat, asks Vigil a follow-up. Slash commands route, navigate and
//! edit local state.

use std::io::{self, Write};

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::chat::{APOLOGY, ChatTranscript};
use crate::cli::FactorSpec;
use crate::context::Context;
use crate::features::FeaturePanel;
use crate::features::briefing::{DailyBriefing, generate_daily_briefing};
use crate::features::decision::{DecisionAnalysis, FactorList, analyze_decision, suggest_factors};
use crate::features::friction::{FrictionReportItem, generate_friction_audit};
use crate::features::goal::{GoalPlan, TaskEdit, generate_goal_breakdown};
use crate::features::simulation::{BlackSwanReport, run_simulation};
use crate::ids::LocalId;
use crate::llm::ChatSession;
use crate::navigation::{Feature, Navigator};
use crate::render;
use crate::router::CommandRouter;

/// One parsed line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Help,
    Quit,
    /// `/k` alone toggles the command bar
    ToggleCommandBar,
    /// `/esc`
    CloseCommandBar,
    /// `/k <command>`
    Route(String),
    Open(Feature),
    Show,
    Clear,
    /// `/run <text>`: submit the active feature even when a chat is open
    Run(String),
    /// Plain text
    Text(String),
    Toggle(LocalId),
    AddTask { milestone: usize, text: String },
    RemoveTask(LocalId),
    EditTask { id: LocalId, text: String },
    Factor(FactorSpec),
    RemoveFactor(LocalId),
    Suggest,
    /// Analyze the current decision against the factor list
    Analyze,
    Invalid(String),
}

fn parse_id(arg: &str) -> Result<LocalId, String> {
    arg.parse::<LocalId>().map_err(|_| format!("Not a task or factor id: {}", arg))
}

/// Parse one line of input
pub fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim();
    if line.is_empty() {
        return ShellCommand::Empty;
    }
    if !line.starts_with('/') {
        return ShellCommand::Text(line.to_string());
    }

    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    let parsed = match cmd {
        "/help" | "/h" => Ok(ShellCommand::Help),
        "/quit" | "/q" | "/exit" => Ok(ShellCommand::Quit),
        "/k" if rest.is_empty() => Ok(ShellCommand::ToggleCommandBar),
        "/k" => Ok(ShellCommand::Route(rest.to_string())),
        "/esc" => Ok(ShellCommand::CloseCommandBar),
        "/open" | "/o" => Feature::from_name(rest)
            .map(ShellCommand::Open)
            .ok_or_else(|| format!("Unknown feature: {}", rest)),
        "/show" => Ok(ShellCommand::Show),
        "/clear" | "/c" => Ok(ShellCommand::Clear),
        "/run" if !rest.is_empty() => Ok(ShellCommand::Run(rest.to_string())),
        "/toggle" | "/t" => parse_id(rest).map(ShellCommand::Toggle),
        "/rm" => parse_id(rest).map(ShellCommand::RemoveTask),
        "/add" => match rest.split_once(char::is_whitespace) {
            Some((n, text)) => n
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(|n| ShellCommand::AddTask {
                    milestone: n - 1,
                    text: text.trim().to_string(),
                })
                .ok_or_else(|| format!("Not a milestone number: {}", n)),
            None => Err("Usage: /add <milestone#> <task>".to_string()),
        },
        "/edit" => match rest.split_once(char::is_whitespace) {
            Some((id, text)) => parse_id(id).map(|id| ShellCommand::EditTask {
                id,
                text: text.trim().to_string(),
            }),
            None => Err("Usage: /edit <id> <task>".to_string()),
        },
        "/factor" | "/f" => rest.parse::<FactorSpec>().map(ShellCommand::Factor),
        "/unfactor" => parse_id(rest).map(ShellCommand::RemoveFactor),
        "/suggest" => Ok(ShellCommand::Suggest),
        "/analyze" => Ok(ShellCommand::Analyze),
        _ => Err(format!("Unknown command: {}", cmd)),
    };

    parsed.unwrap_or_else(ShellCommand::Invalid)
}

/// Interactive shell session
pub struct Shell {
    ctx: Context,
    nav: Navigator,
    briefing: FeaturePanel<DailyBriefing>,
    goal: FeaturePanel<GoalPlan>,
    decision: FeaturePanel<DecisionAnalysis>,
    friction: FeaturePanel<Vec<FrictionReportItem>>,
    simulation: FeaturePanel<BlackSwanReport>,
    decision_text: String,
    factors: FactorList,
}

impl Shell {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            nav: Navigator::new(),
            briefing: FeaturePanel::new(),
            goal: FeaturePanel::new(),
            decision: FeaturePanel::new(),
            friction: FeaturePanel::new(),
            simulation: FeaturePanel::new(),
            decision_text: String::new(),
            factors: FactorList::new(),
        }
    }

    /// Run the shell main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            // The next line is only read once the previous request has finished
            let prompt = if self.nav.is_command_bar_open() {
                format!("{} ", "⌘K>".bright_magenta())
            } else {
                format!("{} ", format!("{}>", self.nav.active().title()).bright_green())
            };

            match rl.readline(&prompt) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    let command = match parse_line(input) {
                        ShellCommand::Text(text) if self.nav.is_command_bar_open() => ShellCommand::Route(text),
                        other => other,
                    };

                    if !self.dispatch(command).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye.");
        Ok(())
    }

    /// Handle one command; false ends the session
    async fn dispatch(&mut self, command: ShellCommand) -> bool {
        debug!(?command, "dispatch: called");
        match command {
            ShellCommand::Empty => {}
            ShellCommand::Help => self.print_help(),
            ShellCommand::Quit => return false,
            ShellCommand::ToggleCommandBar => {
                if self.nav.toggle_command_bar() {
                    println!("{}", "Command bar open. Type a command, or /esc to close.".dimmed());
                }
            }
            ShellCommand::CloseCommandBar => self.nav.close_command_bar(),
            ShellCommand::Route(command) => self.route(&command).await,
            ShellCommand::Open(feature) => {
                self.nav.open(feature);
                self.show();
            }
            ShellCommand::Show => self.show(),
            ShellCommand::Clear => self.clear(),
            ShellCommand::Run(text) => self.submit(&text).await,
            ShellCommand::Text(text) => {
                if self.active_has_chat() {
                    self.follow_up(&text).await;
                } else {
                    self.submit(&text).await;
                }
            }
            ShellCommand::Toggle(id) => self.toggle(id),
            ShellCommand::AddTask { milestone, text } => {
                let added = self.goal.result_mut().and_then(|plan| plan.add_task(milestone, text));
                match added {
                    Some(id) => println!("Added task #{}", id),
                    None => println!("{}", "No such milestone in the current plan.".yellow()),
                }
            }
            ShellCommand::RemoveTask(id) => {
                if !self.goal.result_mut().is_some_and(|plan| plan.remove_task(id)) {
                    println!("{}", "No such task in the current plan.".yellow());
                }
            }
            ShellCommand::EditTask { id, text } => {
                let edit = TaskEdit {
                    text: Some(text),
                    ..Default::default()
                };
                if !self.goal.result_mut().is_some_and(|plan| plan.edit_task(id, edit)) {
                    println!("{}", "No such task in the current plan.".yellow());
                }
            }
            ShellCommand::Factor(spec) => match spec.add_to(&mut self.factors) {
                Ok(_) => println!("{}", render::factors(&self.factors)),
                Err(e) => println!("{}", e.to_string().red()),
            },
            ShellCommand::RemoveFactor(id) => {
                if self.factors.remove(id) {
                    println!("{}", render::factors(&self.factors));
                } else {
                    println!("{}", "No such factor.".yellow());
                }
            }
            ShellCommand::Suggest => self.suggest().await,
            ShellCommand::Analyze => self.analyze().await,
            ShellCommand::Invalid(message) => {
                println!("{} {}", "?".yellow(), message);
                println!("Type {} for available commands", "/help".yellow());
            }
        }
        true
    }

    async fn route(&mut self, command: &str) {
        match CommandRouter::new(&self.ctx).route(command).await {
            Ok(result) => {
                info!(feature = ?result.feature, "route: navigating");
                self.nav.apply(result);
                println!("{} {}", "→".bright_magenta(), self.nav.active().title().bold());

                let feature = self.nav.active();
                match self.nav.take_seed(feature) {
                    Some(seed) => {
                        println!("{} {}", ">".bright_green(), seed);
                        self.consume_seed(feature, seed).await;
                    }
                    None => self.show(),
                }
            }
            Err(e) => {
                self.nav.close_command_bar();
                println!("{}", e.to_string().red());
            }
        }
    }

    /// Feed a routed seed to its feature
    ///
    /// A decision seed only fills in the decision; analysis runs straight
    /// away only when the factor list is already usable.
    async fn consume_seed(&mut self, feature: Feature, seed: String) {
        if feature != Feature::DecisionMatrix {
            self.submit(&seed).await;
            return;
        }

        self.decision_text = seed;
        if self.factors.validate().is_ok() {
            self.analyze().await;
        } else {
            self.show();
        }
    }

    /// Run the decision analysis for the current decision text
    async fn analyze(&mut self) {
        if self.nav.active() != Feature::DecisionMatrix {
            println!("{}", "Open the decision matrix first: /open decide".yellow());
            return;
        }
        self.decision.begin();
        self.decision
            .finish(analyze_decision(&self.ctx, &self.decision_text, &self.factors).await);
        self.show();
    }

    /// Submit `text` as input to the active feature
    async fn submit(&mut self, text: &str) {
        let ctx = &self.ctx;
        match self.nav.active() {
            Feature::Dashboard => {
                let plan_goal = self.goal.result().map(|plan| plan.goal.clone());
                self.briefing.begin();
                self.briefing
                    .finish(generate_daily_briefing(ctx, text, plan_goal.as_deref()).await);
            }
            Feature::GoalEngine => {
                self.goal.begin();
                self.goal.finish(generate_goal_breakdown(ctx, text).await);
            }
            Feature::DecisionMatrix => {
                self.decision_text = text.to_string();
                self.analyze().await;
                return;
            }
            Feature::FrictionAudit => {
                self.friction.begin();
                self.friction.finish(generate_friction_audit(ctx, text).await);
            }
            Feature::BlackSwan => {
                self.simulation.begin();
                self.simulation.finish(run_simulation(ctx, text).await);
            }
        }
        self.show();
    }

    async fn suggest(&mut self) {
        if self.nav.active() != Feature::DecisionMatrix {
            println!("{}", "Open the decision matrix first: /open decide".yellow());
            return;
        }
        if self.decision_text.trim().is_empty() {
            println!("{}", "State the decision first: /run <decision>".yellow());
            return;
        }

        match suggest_factors(&self.ctx, &self.decision_text).await {
            Ok(names) => {
                self.factors.merge_suggested(names);
                println!("{}", render::factors(&self.factors));
            }
            Err(e) => {
                self.decision.fail(&e);
                println!("{}", e.to_string().red());
            }
        }
    }

    fn toggle(&mut self, id: LocalId) {
        let toggled = match self.nav.active() {
            Feature::Dashboard => self.briefing.result_mut().and_then(|b| b.toggle_task(id)),
            Feature::GoalEngine => self.goal.result_mut().and_then(|p| p.toggle_task(id)),
            _ => None,
        };
        match toggled {
            Some(done) => println!("#{} {}", id, if done { "done" } else { "open" }),
            None => println!("{}", "No such task here.".yellow()),
        }
    }

    fn active_has_chat(&self) -> bool {
        match self.nav.active() {
            Feature::Dashboard => self.briefing.has_chat(),
            Feature::GoalEngine => self.goal.has_chat(),
            Feature::DecisionMatrix => self.decision.has_chat(),
            Feature::FrictionAudit => self.friction.has_chat(),
            Feature::BlackSwan => self.simulation.has_chat(),
        }
    }

    async fn follow_up(&mut self, text: &str) {
        let chat = match self.nav.active() {
            Feature::Dashboard => self.briefing.chat_mut(),
            Feature::GoalEngine => self.goal.chat_mut(),
            Feature::DecisionMatrix => self.decision.chat_mut(),
            Feature::FrictionAudit => self.friction.chat_mut(),
            Feature::BlackSwan => self.simulation.chat_mut(),
        };
        if let Some((session, transcript)) = chat {
            stream_reply(session, transcript, text).await;
        }
    }

    fn clear(&mut self) {
        match self.nav.active() {
            Feature::Dashboard => self.briefing.clear(),
            Feature::GoalEngine => self.goal.clear(),
            Feature::DecisionMatrix => {
                self.decision.clear();
                self.decision_text.clear();
                self.factors = FactorList::new();
            }
            Feature::FrictionAudit => self.friction.clear(),
            Feature::BlackSwan => self.simulation.clear(),
        }
        println!("{}", "Cleared.".dimmed());
    }

    fn show(&self) {
        let shown = match self.nav.active() {
            Feature::Dashboard => show_panel(&self.briefing, render::briefing),
            Feature::GoalEngine => show_panel(&self.goal, render::goal_plan),
            Feature::DecisionMatrix => {
                if !self.decision_text.is_empty() {
                    println!("{} {}", "Decision:".bright_cyan(), self.decision_text);
                }
                println!("{}", render::factors(&self.factors));
                show_panel(&self.decision, render::decision_analysis)
            }
            Feature::FrictionAudit => show_panel(&self.friction, |r| render::friction_report(r)),
            Feature::BlackSwan => show_panel(&self.simulation, render::simulation),
        };
        if !shown {
            println!("{}", self.input_hint().dimmed());
        }
    }

    fn input_hint(&self) -> &'static str {
        match self.nav.active() {
            Feature::Dashboard => "What is today's primary objective?",
            Feature::GoalEngine => "What goal should be reverse-engineered?",
            Feature::DecisionMatrix if self.decision_text.is_empty() => {
                "Add factors with /factor or /suggest, then type the decision."
            }
            Feature::DecisionMatrix => "Add factors with /factor or /suggest, then /analyze.",
            Feature::FrictionAudit => "Describe a workflow to audit.",
            Feature::BlackSwan => "Describe a \"what if\" scenario.",
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Aether".bright_cyan().bold());
        println!("Vigil online. Type {} to route a command, {} for help.", "/k <command>".yellow(), "/help".yellow());
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Navigation:".bright_cyan());
        println!("  {:22} Route a command through Vigil", "/k <command>".yellow());
        println!("  {:22} Toggle the command bar", "/k".yellow());
        println!("  {:22} Close the command bar", "/esc".yellow());
        println!("  {:22} dashboard, goal, decide, audit, simulate", "/open <feature>".yellow());
        println!("  {:22} Show the current view", "/show".yellow());
        println!("  {:22} Clear the current view", "/clear".yellow());
        println!("  {:22} Exit", "/quit".yellow());
        println!();
        println!("{}", "Input:".bright_cyan());
        println!("  {:22} Submit, or ask a follow-up once a result is shown", "<text>".yellow());
        println!("  {:22} Submit again even when a chat is open", "/run <text>".yellow());
        println!();
        println!("{}", "Tasks:".bright_cyan());
        println!("  {:22} Toggle completion", "/toggle <id>".yellow());
        println!("  {:22} Add a task to a milestone", "/add <n> <task>".yellow());
        println!("  {:22} Change a task's text", "/edit <id> <task>".yellow());
        println!("  {:22} Remove a task", "/rm <id>".yellow());
        println!();
        println!("{}", "Decision factors:".bright_cyan());
        println!("  {:22} Add a factor", "/factor name[:w[:s]]".yellow());
        println!("  {:22} Remove a factor", "/unfactor <id>".yellow());
        println!("  {:22} Suggest factors for the decision", "/suggest".yellow());
        println!("  {:22} Analyze the current decision", "/analyze".yellow());
        println!();
    }
}

/// Print the panel's error or result; false when there is neither
fn show_panel<T>(panel: &FeaturePanel<T>, text: impl Fn(&T) -> String) -> bool {
    if let Some(error) = panel.error() {
        println!("{}", error.red());
        return true;
    }
    match panel.result() {
        Some(result) => {
            println!("{}", text(result));
            if panel.has_chat() {
                println!();
                println!("{}", "Refine with Vigil: type a follow-up question.".dimmed());
            }
            true
        }
        None => false,
    }
}

async fn stream_reply(session: &mut ChatSession, transcript: &mut ChatTranscript, text: &str) {
    print!("{} ", "Vigil:".bright_blue());
    let _ = io::stdout().flush();

    let result = transcript
        .send(session, text, |fragment| {
            print!("{}", fragment);
            let _ = io::stdout().flush();
        })
        .await;

    match result {
        Ok(true) => println!(),
        Ok(false) => println!("\n{}", APOLOGY.red()),
        Err(e) => println!("{}", e.to_string().yellow()),
    }
}

/// Follow-up prompt for a one-shot command's chat session
///
/// Reads questions until an empty line or end of input.
pub async fn follow_up_loop(mut session: ChatSession) -> Result<()> {
    let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
    let mut transcript = ChatTranscript::new();
    println!();
    println!("{}", "Refine with Vigil (empty line to finish)".dimmed());

    loop {
        match rl.readline(&format!("{} ", "you>".bright_green())) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    break;
                }
                let _ = rl.add_history_entry(input);
                stream_reply(&mut session, &mut transcript, input).await;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(eyre::eyre!("Readline error: {}", err)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockLlmClient, MockReply};
    use serde_json::json;
    use std::sync::Arc;

    fn shell(replies: Vec<MockReply>) -> (Shell, Arc<MockLlmClient>) {
        let mock = Arc::new(MockLlmClient::new(replies));
        (Shell::new(Context::with_client(mock.clone())), mock)
    }

    fn goal_plan_reply() -> MockReply {
        MockReply::json(json!({
            "goal": "Launch a podcast",
            "criticalPathSummary": "Record the pilot first.",
            "milestones": [{
                "milestone": "Pilot",
                "keyResults": ["Pilot recorded"],
                "tasks": [{ "task": "Buy a microphone", "isCritical": true, "duration": "1 day" }],
                "riskAnalysis": { "potentialObstacles": ["Stage fright"], "mitigationStrategies": ["Rehearse"] }
            }]
        }))
    }

    fn analysis_reply() -> MockReply {
        MockReply::json(json!({
            "recommendation": "Move.",
            "confidenceScore": 70,
            "pros": ["Career"],
            "cons": ["Cost"],
            "potentialPitfalls": ["Winter"]
        }))
    }

    fn decision_route_reply() -> MockReply {
        MockReply::call("startDecisionMatrix", json!({ "decision": "Should I move to Berlin?" }))
    }

    #[tokio::test]
    async fn test_routed_goal_seed_runs_once() {
        let (mut shell, mock) = shell(vec![
            MockReply::call("navigateToGoalEngine", json!({ "goal": "Launch a podcast" })),
            goal_plan_reply(),
        ]);

        shell.route("help me launch a podcast").await;

        assert_eq!(shell.nav.active(), Feature::GoalEngine);
        assert!(!shell.nav.has_pending_seed());
        assert_eq!(mock.call_count(), 2);
        assert!(mock.requests()[1].contents[0].text.contains("\"Launch a podcast\""));
        assert_eq!(shell.goal.result().map(|plan| plan.milestones.len()), Some(1));

        assert!(shell.dispatch(ShellCommand::Show).await);
        assert!(shell.dispatch(ShellCommand::Open(Feature::GoalEngine)).await);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_routed_decision_seed_waits_for_factors() {
        let (mut shell, mock) = shell(vec![decision_route_reply(), analysis_reply()]);

        shell.route("help me decide whether to move to Berlin").await;

        assert_eq!(shell.nav.active(), Feature::DecisionMatrix);
        assert!(!shell.nav.has_pending_seed());
        assert_eq!(shell.decision_text, "Should I move to Berlin?");
        assert!(shell.decision.error().is_none());
        assert!(shell.decision.result().is_none());
        assert_eq!(mock.call_count(), 1);

        let factor: FactorSpec = "Cost:8:3".parse().unwrap();
        assert!(shell.dispatch(ShellCommand::Factor(factor)).await);
        assert!(shell.dispatch(ShellCommand::Analyze).await);

        assert_eq!(mock.call_count(), 2);
        assert_eq!(shell.decision.result().map(|a| a.confidence_score), Some(70));
        assert!(mock.requests()[1].contents[0].text.contains("\"Should I move to Berlin?\""));
    }

    #[tokio::test]
    async fn test_routed_decision_seed_analyzes_with_ready_factors() {
        let (mut shell, mock) = shell(vec![decision_route_reply(), analysis_reply()]);
        shell.factors.add_rated("Career", 9, 8).unwrap();

        shell.route("should I move to Berlin").await;

        assert_eq!(mock.call_count(), 2);
        assert!(shell.decision.result().is_some());
        assert!(shell.decision.has_chat());
    }

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(parse_line("  Launch a podcast "), ShellCommand::Text("Launch a podcast".to_string()));
        assert_eq!(parse_line("   "), ShellCommand::Empty);
    }

    #[test]
    fn test_parse_command_bar() {
        assert_eq!(parse_line("/k"), ShellCommand::ToggleCommandBar);
        assert_eq!(
            parse_line("/k what if I lose my job"),
            ShellCommand::Route("what if I lose my job".to_string())
        );
        assert_eq!(parse_line("/esc"), ShellCommand::CloseCommandBar);
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse_line("/open goal"), ShellCommand::Open(Feature::GoalEngine));
        assert!(matches!(parse_line("/open mars"), ShellCommand::Invalid(_)));
        assert!(matches!(parse_line("/run"), ShellCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_task_edits() {
        assert_eq!(parse_line("/toggle #12"), ShellCommand::Toggle("12".parse().unwrap()));
        assert_eq!(
            parse_line("/add 2 Book the studio"),
            ShellCommand::AddTask {
                milestone: 1,
                text: "Book the studio".to_string()
            }
        );
        assert!(matches!(parse_line("/add 0 nothing"), ShellCommand::Invalid(_)));
        assert_eq!(
            parse_line("/edit 7 Record intro"),
            ShellCommand::EditTask {
                id: "7".parse().unwrap(),
                text: "Record intro".to_string()
            }
        );
        assert!(matches!(parse_line("/rm seven"), ShellCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_factors() {
        assert_eq!(
            parse_line("/factor Cost:9:2"),
            ShellCommand::Factor(FactorSpec {
                name: "Cost".to_string(),
                weight: 9,
                score: 2
            })
        );
        assert_eq!(parse_line("/suggest"), ShellCommand::Suggest);
        assert_eq!(parse_line("/analyze"), ShellCommand::Analyze);
        assert!(matches!(parse_line("/bogus"), ShellCommand::Invalid(_)));
    }
}
