//! # Rebrand Library
//!
//! This library provides the core functionality for the `rebrand`
//! command-line tool: a one-shot source-tree customization pipeline run
//! before a downstream application is rebuilt. It can also be embedded in
//! other tooling that needs data-driven, fault-isolated batch edits.
//!
//! ## Quick Example
//!
//! ```
//! use rebrand::patch::{substitute, Substituted};
//!
//! // The substitution core is pure: feed it synthetic content, no I/O.
//! let result = substitute(
//!     r#"X = "[^"]*";"#,
//!     r#"X = "new-value";"#,
//!     r#"X = "old-value";"#,
//! ).unwrap();
//! assert_eq!(result, Substituted::Changed(r#"X = "new-value";"#.to_string()));
//!
//! // Reapplying is a no-op, never a corruption.
//! let again = substitute(
//!     r#"X = "[^"]*";"#,
//!     r#"X = "new-value";"#,
//!     r#"X = "new-value";"#,
//! ).unwrap();
//! assert_eq!(again, Substituted::Unchanged);
//! ```
//!
//! ## Core Concepts
//!
//! - **Secrets (`secrets`)**: required environment values, read exactly
//!   once before any side effect; missing or empty aborts the run.
//! - **Manifest (`manifest`)**: plain data records declaring what one run
//!   does — assets to fetch ([`manifest::ResourceSpec`]) and ordered text
//!   patches ([`manifest::PatchSpec`]) — built in or loaded from YAML.
//! - **Outcomes (`outcome`)**: per-item results as data. One spec's
//!   failure is reported and the batch continues.
//! - **Fetching (`fetch`)** and **patching (`patch`)**: the two batch
//!   processors, each isolating every error at the item boundary.
//! - **Reporting (`report`)**: one structured line per item, a separator
//!   per group; purely observational.
//!
//! ## Execution Flow
//!
//! The main entry point is [`pipeline::execute`], which runs:
//!
//! 1. **Materialize**: substitute secret values into replacement templates.
//! 2. **Preflight**: compile every pattern and parse every URL; fatal
//!    before any side effect.
//! 3. **Fetch**: download each asset into the tree, creating parent
//!    directories as needed.
//! 4. **Patch**: apply each substitution in declared order; later specs
//!    observe earlier specs' effects on the same file.
//!
//! The run terminates successfully once every spec has been attempted,
//! regardless of individual outcomes.

pub mod error;
pub mod fetch;
pub mod manifest;
pub mod outcome;
pub mod patch;
pub mod pipeline;
pub mod report;
pub mod secrets;
