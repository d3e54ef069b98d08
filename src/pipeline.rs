//! Run orchestration
//!
//! Sequences one full customization run: materialize secret placeholders,
//! preflight the manifest, fetch every asset, then apply every patch, in
//! exactly that order. Execution is single-threaded and fully sequential;
//! list order is the only ordering there is, and it is observable (a later
//! patch can depend on an earlier one's effect on the same file).
//!
//! The run finishes once every spec has been attempted. Per-item outcomes
//! are reported as they happen and tallied into a [`Summary`]; they never
//! abort the batch. Only the preconditions (secrets, manifest shape) are
//! fatal, and those are checked before any side effect.

use std::path::Path;

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::manifest::Manifest;
use crate::outcome::{Outcome, Summary};
use crate::patch;
use crate::report::Reporter;
use crate::secrets::Secrets;

/// Execute one full run over the tree rooted at `root`.
///
/// `skip_assets` leaves the asset list unattempted (offline runs); the
/// patch list always runs. Secrets must already be loaded; this function
/// never touches the environment.
pub fn execute(
    mut manifest: Manifest,
    secrets: &Secrets,
    root: &Path,
    reporter: &Reporter,
    skip_assets: bool,
) -> Result<Summary> {
    manifest.materialize(secrets);
    manifest.validate()?;

    let mut outcomes: Vec<Outcome> = Vec::new();

    if !skip_assets && !manifest.assets.is_empty() {
        let fetcher = Fetcher::new()?;
        reporter.group("Downloading resources");
        for (description, outcome) in fetcher.fetch_all(&manifest.assets, root) {
            reporter.report(&description, &outcome);
            outcomes.push(outcome);
        }
        reporter.separator();
    }

    // Patches run in declared order; group headers and separators follow
    // the target file so consecutive patches to one file read as a unit.
    let mut current_target: Option<&Path> = None;
    for spec in &manifest.patches {
        if current_target != Some(spec.target.as_path()) {
            if current_target.is_some() {
                reporter.separator();
            }
            reporter.group(&spec.target.display().to_string());
            current_target = Some(spec.target.as_path());
        }

        let outcome = patch::apply_one(spec, root);
        reporter.report(&spec.description, &outcome);
        outcomes.push(outcome);
    }
    if current_target.is_some() {
        reporter.separator();
    }

    let summary = Summary::from_outcomes(&outcomes);
    reporter.summary(&summary);
    Ok(summary)
}
