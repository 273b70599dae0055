//! Typed error hierarchy for the ws1uem crate.
//!
//! `UemError` separates the failure categories of the request pipeline:
//!
//! - [`UemError::Api`] — the UEM service answered with a structured JSON
//!   error body (a truthy `errorCode` field). The original payload is
//!   preserved in full alongside the HTTP status.
//! - [`UemError::Network`] — transport-level failures (DNS, TCP, TLS
//!   handshake, request timeout). No remote error body exists because the
//!   exchange did not complete. Wraps `reqwest::Error`.
//! - [`UemError::Parse`] — the response advertised a JSON content type but
//!   its body could not be parsed. Never silently treated as success.
//!
//! The remaining variants cover request construction: an extra header that
//! is not a valid HTTP header, and a CA bundle file that cannot be read.

use std::path::PathBuf;

use serde_json::Value;

/// Parsed body of a structured UEM error response.
///
/// The UEM service reports failures as a JSON object with a numeric
/// `errorCode` and a human-readable `message`. Both are extracted here for
/// direct access; `raw` retains the complete payload (including fields such
/// as `activityId`) for callers that need to interpret specific error codes.
#[derive(Debug, Clone)]
pub struct ErrorBody {
    /// The `errorCode` field of the error payload, or 0 if it was present
    /// but not numeric.
    pub error_code: i64,
    /// The `message` field of the error payload, or an empty string if the
    /// service omitted it.
    pub message: String,
    /// The complete parsed error payload as returned by the service.
    pub raw: Value,
}

impl ErrorBody {
    pub(crate) fn from_value(raw: Value) -> Self {
        let error_code = raw.get("errorCode").and_then(Value::as_i64).unwrap_or(0);
        let message = raw
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        ErrorBody {
            error_code,
            message,
            raw,
        }
    }
}

/// Unified error type for all ws1uem library operations.
#[derive(Debug, thiserror::Error)]
pub enum UemError {
    /// The UEM service returned a JSON response carrying a truthy
    /// `errorCode` field.
    ///
    /// This is a *remote* error: the HTTP exchange itself succeeded, and
    /// the service used its error envelope to reject the request. `status`
    /// is the HTTP status of the response; the envelope is in `body`.
    #[error("UEM API error {}: {} (HTTP {})", .body.error_code, .body.message, .status)]
    Api {
        /// HTTP status code of the response that carried the error body.
        status: u16,
        /// The parsed error envelope.
        body: ErrorBody,
    },

    /// A network-level failure occurred (DNS resolution, TCP connection,
    /// TLS handshake, request timeout). The request did not complete, so
    /// no HTTP status or response body is available.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response advertised a JSON content type but its body failed to
    /// parse, or a JSON payload did not match the expected shape.
    #[error("failed to parse response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// A typed decode was requested but the response carried no JSON
    /// payload, only a bare HTTP status.
    #[error("expected a JSON payload, got bare HTTP status {0}")]
    NotJson(u16),

    /// A caller-supplied header name or value is not valid HTTP.
    #[error("invalid request header {name}")]
    Header {
        /// Name of the offending header.
        name: String,
    },

    /// The custom CA bundle file could not be read.
    #[error("failed to read CA bundle {}: {source}", .path.display())]
    CaBundle {
        /// Path that was passed to [`crate::client::UemClient::with_ca_bundle`].
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, UemError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error;

    #[test]
    fn api_error_displays_code_message_and_status() {
        let err = UemError::Api {
            status: 400,
            body: ErrorBody::from_value(json!({
                "errorCode": 1001,
                "message": "Invalid organization group",
            })),
        };
        let msg = err.to_string();
        assert!(msg.contains("1001"), "display should include the error code");
        assert!(
            msg.contains("Invalid organization group"),
            "display should include the remote message"
        );
        assert!(msg.contains("400"), "display should include the HTTP status");
    }

    #[test]
    fn error_body_preserves_full_payload() {
        let payload = json!({
            "errorCode": 417,
            "message": "Expectation failed",
            "activityId": "7f0e-4a",
        });
        let body = ErrorBody::from_value(payload.clone());
        assert_eq!(body.error_code, 417);
        assert_eq!(body.message, "Expectation failed");
        assert_eq!(body.raw, payload, "raw payload must survive unchanged");
    }

    #[test]
    fn error_body_tolerates_non_numeric_code_and_missing_message() {
        let body = ErrorBody::from_value(json!({"errorCode": "E-100"}));
        assert_eq!(body.error_code, 0, "non-numeric code falls back to 0");
        assert_eq!(body.message, "", "missing message falls back to empty");
        assert_eq!(body.raw["errorCode"], "E-100");
    }

    #[test]
    fn parse_error_chains_to_serde_json() {
        let json_err = serde_json::from_str::<String>("{not json").unwrap_err();
        let err = UemError::Parse(json_err);
        assert!(
            err.to_string().contains("failed to parse response body"),
            "display should indicate a parse failure"
        );
        assert!(err.source().is_some(), "source() must reach the serde error");
    }

    #[test]
    fn not_json_error_names_the_status() {
        let err = UemError::NotJson(204);
        assert!(err.to_string().contains("204"));
    }

    #[test]
    fn error_is_send_and_sync() {
        // UemError must cross async task boundaries.
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UemError>();
    }
}
