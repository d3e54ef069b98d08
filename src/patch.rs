//! Text patch application
//!
//! The substitution core ([`substitute`]) is a pure function over string
//! content, so the matching and replacement semantics are testable with no
//! file I/O. [`apply_one`] wraps it with the file handling and converts
//! every error at the item boundary into an [`Outcome`], and [`apply_all`]
//! runs a whole batch in declared order without letting one item abort the
//! rest.
//!
//! Patterns compile with `(?s)` prepended, so `.` matches newlines and a
//! single pattern can span a whole function body. All matches in the file
//! are replaced.
//!
//! A file is never partially written: the substituted content goes to a
//! sibling temporary file first and is renamed over the target, so the
//! target holds either its prior content or the full new content.

use std::fs;
use std::path::Path;

use log::debug;
use regex::Regex;

use crate::manifest::PatchSpec;
use crate::outcome::Outcome;

/// Result of running one pattern/replacement over in-memory content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substituted {
    /// The pattern matched nowhere.
    NotMatched,
    /// The pattern matched but replacement produced identical content.
    Unchanged,
    /// Replacement produced new content.
    Changed(String),
}

/// Apply one pattern/replacement to content, dot matching newlines.
///
/// The replacement may reference capture groups (`$1`, `${name}`).
pub fn substitute(
    pattern: &str,
    replacement: &str,
    content: &str,
) -> Result<Substituted, regex::Error> {
    let re = Regex::new(&format!("(?s){}", pattern))?;

    if !re.is_match(content) {
        return Ok(Substituted::NotMatched);
    }

    let new_content = re.replace_all(content, replacement);
    if new_content == content {
        Ok(Substituted::Unchanged)
    } else {
        Ok(Substituted::Changed(new_content.into_owned()))
    }
}

/// Apply one patch spec to the tree rooted at `root`.
///
/// Never returns an error: everything that goes wrong for this item is
/// folded into its [`Outcome`].
pub fn apply_one(spec: &PatchSpec, root: &Path) -> Outcome {
    let path = root.join(&spec.target);

    if !path.exists() {
        return Outcome::TargetNotFound;
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => return Outcome::Failure(e.to_string()),
    };

    match substitute(&spec.pattern, &spec.replacement, &content) {
        Ok(Substituted::NotMatched) => Outcome::PatternNotMatched,
        Ok(Substituted::Unchanged) => Outcome::NoChange,
        Ok(Substituted::Changed(new_content)) => match write_full(&path, &new_content) {
            Ok(()) => Outcome::Success,
            Err(e) => Outcome::Failure(e.to_string()),
        },
        Err(e) => Outcome::Failure(e.to_string()),
    }
}

/// Apply all patch specs in declared order.
///
/// Returns one `(description, outcome)` pair per spec. Order matters only
/// in that later specs observe earlier specs' effects on the same file.
pub fn apply_all(specs: &[PatchSpec], root: &Path) -> Vec<(String, Outcome)> {
    specs
        .iter()
        .map(|spec| {
            debug!("patching {} ({})", spec.target.display(), spec.description);
            (spec.description.clone(), apply_one(spec, root))
        })
        .collect()
}

/// Replace the file's content in full via a sibling temp file and rename.
fn write_full(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("rebrand.tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}
