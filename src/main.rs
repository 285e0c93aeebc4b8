//! upadup - pre-commit additional_dependencies updater
//!
//! Exit codes:
//! - 0: done, or nothing to update
//! - 1: `--check` found pending updates
//! - 2: the run failed

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use upadup::cli::CliArgs;
use upadup::config::Settings;
use upadup::orchestrator::{Orchestrator, RunOptions};
use upadup::output::Verbosity;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let settings = Settings::load(&args.settings_dir())?;
    let verbosity = args.verbosity();

    let options = RunOptions {
        file: args.file.clone(),
        check: args.check,
        tag_mode: args.tag_mode(),
        verbosity,
        color: io::stdout().is_terminal(),
        progress: verbosity != Verbosity::Quiet && io::stderr().is_terminal(),
    };

    let mut orchestrator = Orchestrator::new(options, settings)?;
    let mut stdout = io::stdout().lock();
    let result = orchestrator.run(&mut stdout).await?;
    stdout.flush()?;

    if result.updates_pending() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
