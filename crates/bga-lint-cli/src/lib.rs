//! bgalint CLI library
//!
//! Command-line front end for [`bga_lint`]. This crate owns everything the
//! library deliberately leaves out: finding the project on disk, deciding
//! which file plays which role, reading sources, logging setup, terminal
//! output and exit codes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;
pub mod project;

pub use commands::{
    Cli, ColorArg, Commands, MigrationArgs, ProjectArgs, ReportFormat, StatesArgs, ValidateArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity, WORKSPACE_ENV};
pub use error::{CliError, CliResult};
pub use output::{verdict_message, StatusReporter};
