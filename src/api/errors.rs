/// Errors from the provider HTTP layer.
use serde::Deserialize;
use thiserror::Error;

/// Typed errors from the API layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, timeout, connection reset).
    #[error("request to the Civo API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API key was rejected.
    #[error("authentication failed, check your API key (HTTP 401)")]
    Unauthorized,

    /// Any other non-success status.
    #[error("{reason} (HTTP {status}, {code})")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Provider error code, e.g. `database_firewall_not_found`.
        code: String,
        /// Human-readable reason from the error body.
        reason: String,
    },

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response from {context}: {source}")]
    Decode {
        /// Which call produced the body.
        context: String,
        /// Underlying parse error.
        source: serde_json::Error,
    },
}

/// Error body returned by the provider, e.g.
/// `{"code":"database_firewall_not_found","reason":"The firewall wasn't found"}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    reason: String,
}

/// Build an [`ApiError`] from a non-success status and its raw body.
#[must_use]
pub fn from_status(status: u16, body: &str) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }

    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let code = if parsed.code.is_empty() {
        "unknown_error".to_owned()
    } else {
        parsed.code
    };
    let reason = if !parsed.reason.is_empty() {
        parsed.reason
    } else if !body.trim().is_empty() {
        body.trim().to_owned()
    } else {
        format!("request failed with status {status}")
    };

    ApiError::Status {
        status,
        code,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_error_body() {
        let err = from_status(
            404,
            r#"{"code":"database_firewall_not_found","reason":"The firewall could not be found"}"#,
        );
        match err {
            ApiError::Status {
                status,
                code,
                reason,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, "database_firewall_not_found");
                assert_eq!(reason, "The firewall could not be found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_from_plain_body() {
        let err = from_status(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "Bad Gateway (HTTP 502, unknown_error)");
    }

    #[test]
    fn test_status_empty_body() {
        let err = from_status(500, "");
        assert_eq!(
            err.to_string(),
            "request failed with status 500 (HTTP 500, unknown_error)"
        );
    }

    #[test]
    fn test_unauthorized() {
        let err = from_status(401, r#"{"code":"authentication_invalid_key"}"#);
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
