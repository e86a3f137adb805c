/// Errors from the domain layer, returned by every command.
use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CloudError {
    /// A flag value was missing or not acceptable.
    #[error("{0}")]
    InvalidFlag(String),

    /// No resource matched the ID or name given.
    #[error("no {kind} matches '{search}'{}", did_you_mean(suggestions))]
    NotFound {
        /// Resource kind, e.g. "firewall".
        kind: &'static str,
        /// The ID or name that was searched.
        search: String,
        /// Names of close fuzzy matches.
        suggestions: Vec<String>,
    },

    /// More than one resource matched; cannot pick one.
    #[error("'{search}' matches more than one {kind}, use the ID instead. Candidates:\n  {}", candidates.join("\n  "))]
    AmbiguousMatch {
        /// Resource kind, e.g. "load balancer".
        kind: &'static str,
        /// The searched ID or name.
        search: String,
        /// `name (id)` of every candidate.
        candidates: Vec<String>,
    },

    /// The account has no regions to choose a default from.
    #[error("the API returned no regions for this account")]
    NoRegions,

    /// Credentials, region or config file problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing or serializing output failed.
    #[error("writing output failed: {0}")]
    Io(#[from] std::io::Error),
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

impl From<serde_json::Error> for CloudError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(err.into())
    }
}
