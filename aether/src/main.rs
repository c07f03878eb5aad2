//! Aether - terminal Life Operating System
//!
//! CLI entry point for one-shot feature runs and the interactive shell.

use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use eyre::{Context as _, Result};
use tracing::info;

use aether::cli::{Cli, Command, FactorSpec, OutputFormat};
use aether::config::Config;
use aether::context::Context;
use aether::features::FeatureRun;
use aether::features::briefing::generate_daily_briefing;
use aether::features::decision::{FactorList, analyze_decision, suggest_factors};
use aether::features::friction::generate_friction_audit;
use aether::features::goal::generate_goal_breakdown;
use aether::features::simulation::run_simulation;
use aether::render;
use aether::router::CommandRouter;
use aether::shell::{Shell, follow_up_loop};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aether")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Log to file; stdout belongs to results
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("aether.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        "Aether loaded config: pro_model={}, flash_model={}",
        config.llm.pro_model, config.llm.flash_model
    );

    let ctx = Context::from_config(&config);
    let format = cli.format;

    match cli.command {
        Some(Command::Route { command }) => cmd_route(&ctx, &command, format).await,
        Some(Command::Goal { goal, chat }) => {
            let run = generate_goal_breakdown(&ctx, &goal).await?;
            finish(run, format, chat, render::goal_plan).await
        }
        Some(Command::Briefing {
            objective,
            plan_goal,
            chat,
        }) => {
            let run = generate_daily_briefing(&ctx, &objective, plan_goal.as_deref()).await?;
            finish(run, format, chat, render::briefing).await
        }
        Some(Command::Decide {
            decision,
            factors,
            suggest,
            chat,
        }) => cmd_decide(&ctx, &decision, &factors, suggest, chat, format).await,
        Some(Command::Audit { workflow, chat }) => {
            let run = generate_friction_audit(&ctx, &workflow).await?;
            finish(run, format, chat, |report| render::friction_report(report)).await
        }
        Some(Command::Simulate { scenario, chat }) => {
            let run = run_simulation(&ctx, &scenario).await?;
            finish(run, format, chat, render::simulation).await
        }
        Some(Command::Shell) => Shell::new(ctx).run().await,
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Print a feature result, then optionally continue in its chat
async fn finish<T: serde::Serialize>(
    run: FeatureRun<T>,
    format: OutputFormat,
    chat: bool,
    text: impl Fn(&T) -> String,
) -> Result<()> {
    println!("{}", render::emit(format, &run.result, text)?);
    if chat {
        follow_up_loop(run.chat).await?;
    }
    Ok(())
}

async fn cmd_route(ctx: &Context, command: &str, format: OutputFormat) -> Result<()> {
    let result = CommandRouter::new(ctx).route(command).await?;
    println!("{}", render::emit(format, &result, render::route)?);
    Ok(())
}

async fn cmd_decide(
    ctx: &Context,
    decision: &str,
    specs: &[FactorSpec],
    suggest: bool,
    chat: bool,
    format: OutputFormat,
) -> Result<()> {
    let mut factors = FactorList::new();
    for spec in specs {
        spec.add_to(&mut factors)?;
    }

    if suggest {
        let names = suggest_factors(ctx, decision).await?;
        info!(count = names.len(), "cmd_decide: merging suggested factors");
        factors.merge_suggested(names);
    }

    if format == OutputFormat::Text {
        println!("{}", render::factors(&factors));
        println!();
    }

    let run = analyze_decision(ctx, decision, &factors).await?;
    finish(run, format, chat, render::decision_analysis).await
}
