//! # Outcome Reporting
//!
//! One line per attempted spec, a separator per logical group, and an
//! end-of-run summary, all through the `log` facade so the backend decides
//! where the lines go. Reporting is purely observational and never affects
//! control flow or outcomes.
//!
//! ## Respecting User Preferences
//!
//! Tag coloring respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::style;
use log::info;

use crate::outcome::{Outcome, Summary};

const SEPARATOR: &str = "========================================";

/// Emits per-item outcome lines and group separators.
#[derive(Debug, Clone)]
pub struct Reporter {
    /// Whether tags should be colorized.
    use_color: bool,
}

impl Reporter {
    /// Create a reporter from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Emit one line identifying success or the specific non-success kind.
    pub fn report(&self, description: &str, outcome: &Outcome) {
        info!("{}", self.format_line(description, outcome));
    }

    /// Render the outcome line without logging it.
    pub fn format_line(&self, description: &str, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Success => format!("{} : {}", self.tag_success("SUCCESS"), description),
            Outcome::NoChange => format!(
                "{} : nothing to change to {}",
                self.tag_success("UNCHANGED"),
                description
            ),
            Outcome::TargetNotFound => format!(
                "{} : {} --- target not found",
                self.tag_error("ERROR"),
                description
            ),
            Outcome::PatternNotMatched => format!(
                "{} : pattern --- NOT FOUND --- in {}",
                self.tag_error("ERROR"),
                description
            ),
            Outcome::Failure(reason) => format!(
                "{} : {} --- {}",
                self.tag_error("ERROR"),
                description,
                reason
            ),
        }
    }

    /// Announce a logical group of specs.
    pub fn group(&self, title: &str) {
        info!("=== CUSTOM : {}", title);
    }

    /// Emit a visual delimiter after a logical group.
    pub fn separator(&self) {
        info!("{}", SEPARATOR);
        info!("");
    }

    /// Emit the end-of-run tally.
    pub fn summary(&self, summary: &Summary) {
        info!(
            "{} specs attempted: {} succeeded, {} unchanged, {} missing targets, {} unmatched, {} failed",
            summary.total(),
            summary.succeeded,
            summary.unchanged,
            summary.missing_targets,
            summary.unmatched,
            summary.failed,
        );
    }

    fn tag_success(&self, tag: &str) -> String {
        if self.use_color {
            style(tag).green().to_string()
        } else {
            tag.to_string()
        }
    }

    fn tag_error(&self, tag: &str) -> String {
        if self.use_color {
            style(tag).red().to_string()
        } else {
            tag.to_string()
        }
    }

    /// Create a reporter with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}
