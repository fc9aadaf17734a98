//! CLI command definitions using clap

use crate::config::WORKSPACE_ENV;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// bgalint: static checks for BGA game projects
#[derive(Parser, Debug)]
#[command(name = "bgalint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Directory containing one folder per game
    #[arg(long, env = WORKSPACE_ENV, global = true)]
    pub workspace: Option<PathBuf>,

    /// Linter configuration file (YAML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lint the state machine, actions and notifications
    Validate(ValidateArgs),

    /// Report progress of the move to State classes
    MigrationStatus(MigrationArgs),

    /// List every state with its transitions
    States(StatesArgs),

    /// List player actions
    Actions(ProjectArgs),

    /// List game projects in the workspace
    Games,
}

/// Which project to analyse
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root directory (overrides --game)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Game folder name inside the workspace
    #[arg(short, long)]
    pub game: Option<String>,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Project selection
    #[command(flatten)]
    pub target: ProjectArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Treat warnings as failures
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the migration-status command
#[derive(Parser, Debug)]
pub struct MigrationArgs {
    /// Project selection
    #[command(flatten)]
    pub target: ProjectArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

/// Arguments for the states command
#[derive(Parser, Debug)]
pub struct StatesArgs {
    /// Project selection
    #[command(flatten)]
    pub target: ProjectArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

/// Report output format
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Color argument
#[derive(ValueEnum, Debug, Clone, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
