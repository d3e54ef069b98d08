//! Run command implementation
//!
//! The run command executes the full pipeline:
//! 1. Load required secrets from the environment (fatal if missing)
//! 2. Resolve the manifest (built-in branding manifest or a YAML file)
//! 3. Fetch all branding assets into the target tree
//! 4. Apply all text patches in declared order
//!
//! The command exits successfully once every spec has been attempted;
//! per-item outcomes are reported but never fail the run. Use `--strict`
//! to fail the exit code when any spec did not succeed.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use rebrand::manifest::{Manifest, DEFAULT_ASSET_BASE};
use rebrand::pipeline;
use rebrand::report::Reporter;
use rebrand::secrets::Secrets;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Root of the target source tree (defaults to current directory)
    #[arg(short, long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Path to a YAML manifest overriding the built-in one
    #[arg(short, long, value_name = "PATH", env = "REBRAND_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Base URL for the built-in branding assets
    #[arg(long, value_name = "URL", env = "REBRAND_ASSET_BASE", default_value = DEFAULT_ASSET_BASE)]
    pub asset_base: String,

    /// Skip asset downloads and only apply patches
    #[arg(long)]
    pub skip_assets: bool,

    /// Exit non-zero if any spec did not succeed
    #[arg(long)]
    pub strict: bool,
}

/// Execute the run command
pub fn execute(args: RunArgs, reporter: &Reporter) -> Result<()> {
    // Hard precondition: secrets are read once, before any side effect.
    let secrets = Secrets::from_env()?;

    let manifest = match &args.manifest {
        Some(path) => Manifest::from_file(path)?,
        None => Manifest::builtin(&args.asset_base),
    };

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    let summary = pipeline::execute(manifest, &secrets, &root, reporter, args.skip_assets)?;

    let not_succeeded = summary.total() - summary.succeeded - summary.unchanged;
    if args.strict && not_succeeded > 0 {
        anyhow::bail!("{} specs did not succeed", not_succeeded);
    }

    Ok(())
}
