//! Cairn CLI Application
//!
//! Command-line interface for the cairn plan-state orchestration engine.

mod args;
mod cli;
mod hook;
mod renderer;

use anyhow::{Context, Result};
use args::{CliArgs, Commands};
use cairn_core::OrchestratorBuilder;
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let CliArgs {
        state_file,
        archive_dir,
        no_color,
        command,
    } = CliArgs::parse();

    let orchestrator = match OrchestratorBuilder::new()
        .with_state_file(state_file)
        .with_archive_dir(archive_dir)
        .build()
    {
        Ok(orchestrator) => orchestrator,
        // The hook boundary must never fail, not even on setup errors.
        Err(_) if matches!(command, Hook) => {
            println!("{{\"continue\": true, \"suppressOutput\": true}}");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to initialize orchestrator"),
    };

    // The hook boundary handles its own errors; it must never fail.
    if let Hook = command {
        hook::run_hook(&orchestrator).await;
        return Ok(());
    }

    let handler = Cli::new(orchestrator, TerminalRenderer::new(!no_color));

    info!("Cairn started");

    match command {
        Init(args) => handler.init(args).await,
        Task(args) => handler.task(args).await,
        AddPhase(args) => handler.add_phase(args).await,
        AddStep(args) => handler.add_step(args).await,
        UpdateStep(args) => handler.update_step(args).await,
        SetSpec(args) => handler.set_spec(args).await,
        Check(args) => handler.check(args).await,
        Status(args) => handler.status(args).await,
        Archive(args) => handler.archive(args).await,
        Hook => unreachable!("handled above"),
    }
}
