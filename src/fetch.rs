//! Branding asset download
//!
//! Fetches each declared asset over HTTP and writes it into the target
//! tree, overwriting whatever is there. Destination parent directories are
//! created on demand, so a missing directory is never a failure condition.
//!
//! Requests carry a desktop-browser `User-Agent`; some origin servers
//! reject unidentified clients. Each spec is attempted exactly once, with
//! no retries, and any transport, status, or I/O error becomes a
//! [`Outcome::Failure`] for that item while the batch continues.

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::error::{Error, Result};
use crate::manifest::ResourceSpec;
use crate::outcome::Outcome;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP transport for asset downloads.
///
/// One client, one request per spec. There is no retry wrapper; a hung
/// call is bounded only by the request timeout.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build the HTTP client. Fails fatally: with no client, no spec can
    /// be attempted.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::HttpClient {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// Fetch one asset into the tree rooted at `root`.
    ///
    /// Never returns an error: everything that goes wrong for this item
    /// is folded into its [`Outcome`].
    pub fn fetch_one(&self, spec: &ResourceSpec, root: &Path) -> Outcome {
        let dest = root.join(&spec.dest);

        if let Some(parent) = dest.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return Outcome::Failure(format!(
                    "failed to create directory '{}': {}",
                    parent.display(),
                    e
                ));
            }
        }

        let response = match self.client.get(&spec.url).send() {
            Ok(response) => response,
            Err(e) => return Outcome::Failure(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return Outcome::Failure(format!("{} returned HTTP {}", spec.url, status));
        }

        let body = match response.bytes() {
            Ok(body) => body,
            Err(e) => return Outcome::Failure(e.to_string()),
        };

        match fs::write(&dest, &body) {
            Ok(()) => Outcome::Success,
            Err(e) => Outcome::Failure(format!("failed to write '{}': {}", dest.display(), e)),
        }
    }

    /// Fetch all assets, one attempt each, in declared order.
    ///
    /// Returns one `(description, outcome)` pair per spec; one asset's
    /// failure never blocks the others.
    pub fn fetch_all(&self, specs: &[ResourceSpec], root: &Path) -> Vec<(String, Outcome)> {
        specs
            .iter()
            .map(|spec| {
                debug!("fetching {} -> {}", spec.url, spec.dest.display());
                (spec.description.clone(), self.fetch_one(spec, root))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn spec(url: &str, dest: &str) -> ResourceSpec {
        ResourceSpec {
            url: url.to_string(),
            dest: PathBuf::from(dest),
            description: dest.to_string(),
        }
    }

    #[test]
    fn test_fetch_creates_parent_directories() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/icon.ico")
            .with_status(200)
            .with_body("icon-bytes")
            .create();

        let dir = TempDir::new().unwrap();
        let fetcher = Fetcher::new().unwrap();
        let outcome = fetcher.fetch_one(
            &spec(&format!("{}/icon.ico", server.url()), "res/deep/icon.ico"),
            dir.path(),
        );

        mock.assert();
        assert_eq!(outcome, Outcome::Success);
        let dest = dir.path().join("res/deep/icon.ico");
        assert!(dest.parent().unwrap().is_dir());
        assert_eq!(std::fs::read(dest).unwrap(), b"icon-bytes");
    }

    #[test]
    fn test_fetch_overwrites_existing_file() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/logo.png")
            .with_status(200)
            .with_body("new-logo")
            .create();

        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("logo.png"), "old-logo").unwrap();

        let fetcher = Fetcher::new().unwrap();
        let outcome = fetcher.fetch_one(
            &spec(&format!("{}/logo.png", server.url()), "logo.png"),
            dir.path(),
        );

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(
            std::fs::read(dir.path().join("logo.png")).unwrap(),
            b"new-logo"
        );
    }

    #[test]
    fn test_fetch_sends_user_agent() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/ua")
            .match_header("user-agent", mockito::Matcher::Regex("Mozilla/5.0".to_string()))
            .with_status(200)
            .with_body("ok")
            .create();

        let dir = TempDir::new().unwrap();
        let fetcher = Fetcher::new().unwrap();
        let outcome = fetcher.fetch_one(&spec(&format!("{}/ua", server.url()), "ua.txt"), dir.path());

        mock.assert();
        assert_eq!(outcome, Outcome::Success);
    }

    #[test]
    fn test_fetch_http_error_is_failure_outcome() {
        let mut server = mockito::Server::new();
        server.mock("GET", "/gone").with_status(404).create();

        let dir = TempDir::new().unwrap();
        let fetcher = Fetcher::new().unwrap();
        let outcome =
            fetcher.fetch_one(&spec(&format!("{}/gone", server.url()), "gone.txt"), dir.path());

        match outcome {
            Outcome::Failure(reason) => assert!(reason.contains("404")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!dir.path().join("gone.txt").exists());
    }

    #[test]
    fn test_fetch_all_isolates_failures() {
        let mut server = mockito::Server::new();
        server.mock("GET", "/bad").with_status(500).create();
        server
            .mock("GET", "/good")
            .with_status(200)
            .with_body("fine")
            .create();

        let dir = TempDir::new().unwrap();
        let fetcher = Fetcher::new().unwrap();
        let specs = vec![
            spec(&format!("{}/bad", server.url()), "bad.txt"),
            spec(&format!("{}/good", server.url()), "good.txt"),
        ];

        let outcomes = fetcher.fetch_all(&specs, dir.path());
        assert!(matches!(outcomes[0].1, Outcome::Failure(_)));
        assert_eq!(outcomes[1].1, Outcome::Success);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("good.txt")).unwrap(),
            "fine"
        );
    }

    #[test]
    fn test_fetch_connection_refused_is_failure_outcome() {
        let dir = TempDir::new().unwrap();
        let fetcher = Fetcher::new().unwrap();
        // Port 9 (discard) is not listening in the test environment.
        let outcome = fetcher.fetch_one(&spec("http://127.0.0.1:9/x", "x.txt"), dir.path());
        assert!(matches!(outcome, Outcome::Failure(_)));
    }
}
