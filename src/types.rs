/// Structured error envelope written to stderr in JSON mode.
use serde::{Deserialize, Serialize};

use crate::cloud::CloudError;

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional list of candidates (for ambiguous match errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<String>>,
}

impl ErrorOutput {
    /// Construct from a `CloudError`.
    #[must_use]
    pub fn from_cloud_error(err: &CloudError) -> Self {
        let (code, candidates) = match err {
            CloudError::InvalidFlag(_) => ("invalid_flag", None),
            CloudError::NotFound { .. } => ("not_found", None),
            CloudError::AmbiguousMatch { candidates, .. } => {
                ("ambiguous_match", Some(candidates.clone()))
            }
            CloudError::Config(_) => ("config_error", None),
            CloudError::Api(_) | CloudError::NoRegions => ("api_error", None),
            CloudError::Io(_) => ("output_error", None),
        };
        // The human-readable message of an ambiguity already lists the
        // candidates; keep only the first line so they are not printed twice.
        let message = match err {
            CloudError::AmbiguousMatch { .. } => err
                .to_string()
                .lines()
                .next()
                .unwrap_or_default()
                .to_owned(),
            _ => err.to_string(),
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message,
                candidates,
            },
        }
    }
}
