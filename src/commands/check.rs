//! Check command implementation
//!
//! Preflight for CI and local debugging: verifies that the required
//! secrets are present and that the manifest is well-formed (every asset
//! URL parses, every patch pattern compiles). Performs no network or
//! write operation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use rebrand::manifest::{Manifest, DEFAULT_ASSET_BASE};
use rebrand::secrets::Secrets;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to a YAML manifest overriding the built-in one
    #[arg(short, long, value_name = "PATH", env = "REBRAND_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Base URL for the built-in branding assets
    #[arg(long, value_name = "URL", env = "REBRAND_ASSET_BASE", default_value = DEFAULT_ASSET_BASE)]
    pub asset_base: String,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let secrets = Secrets::from_env()?;

    let manifest = match &args.manifest {
        Some(path) => Manifest::from_file(path)?,
        None => Manifest::builtin(&args.asset_base),
    };
    manifest.validate()?;

    if !args.quiet {
        println!(
            "Preflight passed: secrets present (server {}), {} assets, {} patches",
            secrets.rendezvous_server,
            manifest.assets.len(),
            manifest.patches.len()
        );
    }

    Ok(())
}
