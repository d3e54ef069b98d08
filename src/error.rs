//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `rebrand` application. It uses the `thiserror` library to create an
//! `Error` enum covering the *fatal* failure modes, providing clear and
//! descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum representing fatal conditions that abort
//!   the whole run: missing/empty secrets, unreadable or malformed
//!   manifests, invalid patch patterns, and HTTP-client setup failures
//!   that occur before any spec is attempted.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`,
//!   used throughout the library to simplify function signatures.
//!
//! Per-item failures during fetching or patching are deliberately *not*
//! represented here: they are data, carried as [`crate::outcome::Outcome`]
//! values, so that one failing spec never aborts the batch. Only the
//! preconditions of a run (secrets, manifest, patterns) surface as `Error`.

use thiserror::Error;

/// Fatal error type for rebrand runs
#[derive(Error, Debug)]
pub enum Error {
    /// A required secret is unset or empty in the environment.
    ///
    /// This aborts the run before any network or file operation occurs.
    #[error("Secret '{name}' is not set in the environment!")]
    MissingSecret { name: &'static str },

    /// The manifest file could not be read.
    #[error("Manifest read error for {path}: {message}")]
    ManifestRead { path: String, message: String },

    /// An error occurred while parsing a manifest file.
    ///
    /// Includes the specific parsing issue and optionally a hint about
    /// how to fix it.
    #[error("Manifest parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ManifestParse {
        message: String,
        /// Optional hint for how to fix the manifest issue
        hint: Option<String>,
    },

    /// A patch pattern failed to compile.
    #[error("Invalid pattern for '{description}': {message}")]
    Pattern {
        description: String,
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup error: {message}")]
    HttpClient { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
