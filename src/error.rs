//! Lookup failures

use serde::{Deserialize, Serialize};

/// Everything that can go wrong between a key press and a rendered record.
///
/// Errors travel inside actions, so they carry plain strings instead of the
/// underlying `reqwest`/`serde_json` errors.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PokedexError {
    #[error("empty search input")]
    EmptyInput,
    #[error("no pokemon found for {key:?} (HTTP {status})")]
    NotFound { key: String, status: u16 },
    #[error("malformed response for {key:?}: {reason}")]
    MalformedResponse { key: String, reason: String },
    #[error("request for {key:?} failed: {reason}")]
    TransientNetwork { key: String, reason: String },
}

impl PokedexError {
    /// Lookup key the failure belongs to, if a request was attempted.
    pub fn key(&self) -> Option<&str> {
        match self {
            PokedexError::EmptyInput => None,
            PokedexError::NotFound { key, .. }
            | PokedexError::MalformedResponse { key, .. }
            | PokedexError::TransientNetwork { key, .. } => Some(key),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, PokedexError::MalformedResponse { .. })
    }
}
