//! Per-item operation outcomes
//!
//! Every fetch or patch spec produces exactly one [`Outcome`] per run.
//! Outcomes are data, not errors: a non-success outcome for one item is
//! reported and the batch continues with the next item. Only the run
//! preconditions (secrets, manifest shape) use `crate::error::Error`.

use std::fmt;

/// Result of applying one resource fetch or text patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The asset was written or the file content changed.
    Success,
    /// The target file does not exist.
    TargetNotFound,
    /// The pattern did not match anywhere in the file content.
    PatternNotMatched,
    /// The pattern matched but substitution produced identical content.
    ///
    /// Treated as success-equivalent: it means the patch was already
    /// applied in a prior run (patches are idempotent by construction).
    NoChange,
    /// A transport or I/O error, caught at the item boundary.
    Failure(String),
}

impl Outcome {
    /// Whether this outcome counts as success for automation purposes.
    ///
    /// `NoChange` is included: reapplying an already-patched tree is the
    /// expected behavior of a second run, not a fault.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success | Outcome::NoChange)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::TargetNotFound => write!(f, "target not found"),
            Outcome::PatternNotMatched => write!(f, "pattern not matched"),
            Outcome::NoChange => write!(f, "nothing to change"),
            Outcome::Failure(reason) => write!(f, "failure: {}", reason),
        }
    }
}

/// Aggregate counts over a batch of outcomes, for the end-of-run summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub unchanged: usize,
    pub missing_targets: usize,
    pub unmatched: usize,
    pub failed: usize,
}

impl Summary {
    /// Tally a batch of outcomes.
    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a Outcome>,
    {
        let mut summary = Summary::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Success => summary.succeeded += 1,
                Outcome::NoChange => summary.unchanged += 1,
                Outcome::TargetNotFound => summary.missing_targets += 1,
                Outcome::PatternNotMatched => summary.unmatched += 1,
                Outcome::Failure(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Total number of specs attempted.
    pub fn total(&self) -> usize {
        self.succeeded + self.unchanged + self.missing_targets + self.unmatched + self.failed
    }
}
