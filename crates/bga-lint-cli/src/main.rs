//! bgalint: static checks for BGA game projects
//!
//! Usage:
//!   bgalint validate --game hearts     Lint one game of the workspace
//!   bgalint migration-status -p .      Report progress towards State classes
//!   bgalint states                     List the state machine
//!   bgalint games                      List games in the workspace

use bga_lint_cli::handlers::{
    execute_actions, execute_games, execute_migration_status, execute_states, execute_validate,
};
use bga_lint_cli::{Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);
    apply_color(config.color);

    match &cli.command {
        Commands::Validate(args) => execute_validate(&config, args),
        Commands::MigrationStatus(args) => execute_migration_status(&config, args),
        Commands::States(args) => execute_states(&config, args),
        Commands::Actions(args) => execute_actions(&config, args),
        Commands::Games => execute_games(&config),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_workspace(cli.workspace.clone())
        .with_linter_config(cli.config.clone())
}

// RUST_LOG takes precedence over -v/-q
fn init_tracing(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| verbosity.log_filter().into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn apply_color(color: ColorChoice) {
    match color {
        ColorChoice::Always => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        }
        ColorChoice::Never => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        ColorChoice::Auto => {}
    }
}
