//! Required environment secrets
//!
//! The pipeline is gated on two secrets: the rendezvous server address and
//! its public key. Both are read from the environment exactly once, at run
//! start, before any network or file operation. A missing or empty value
//! is fatal; nothing downstream ever re-reads process-wide state.

use crate::error::{Error, Result};

/// Environment variable holding the rendezvous server address.
pub const RENDEZVOUS_SERVER_VAR: &str = "RENDEZVOUS_SERVER";
/// Environment variable holding the rendezvous server public key.
pub const RS_PUB_KEY_VAR: &str = "RS_PUB_KEY";

/// Immutable secret values threaded into the components that need them.
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    pub rendezvous_server: String,
    pub rs_pub_key: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("rendezvous_server", &self.rendezvous_server)
            .field("rs_pub_key", &"[REDACTED]")
            .finish()
    }
}

impl Secrets {
    /// Load all required secrets from the process environment.
    ///
    /// Fails on the first name that is unset or empty. This is a hard
    /// precondition of the run, not a per-item failure.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            rendezvous_server: required(RENDEZVOUS_SERVER_VAR)?,
            rs_pub_key: required(RS_PUB_KEY_VAR)?,
        })
    }
}

fn required(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::MissingSecret { name }),
    }
}
