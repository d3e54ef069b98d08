//! CLI argument parsing and command dispatch

use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use rebrand::report::Reporter;

use crate::commands;

/// Rebrand - Customize a source tree before rebuilding it
#[derive(Parser, Debug)]
#[command(name = "rebrand")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate secrets, fetch branding assets, and apply all patches
    Run(commands::run::RunArgs),

    /// Preflight only: check secrets and manifest without touching anything
    Check(commands::check::CheckArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let reporter = Reporter::from_env_and_flag(&self.color);

        match self.command {
            Commands::Run(args) => commands::run::execute(args, &reporter),
            Commands::Check(args) => commands::check::execute(args),
        }
    }
}

/// Message-only log format on stdout; outcome lines are the user
/// interface, not diagnostics.
fn init_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .target(env_logger::Target::Stdout)
        .try_init();
}
