//! Response classification for the transport layer.
//!
//! Every verb (except `post_no_error_check`) funnels its HTTP response
//! through [`check_for_error`], which sorts the exchange into exactly one of
//! three shapes:
//!
//! 1. A JSON response whose body carries a truthy `errorCode` becomes
//!    [`crate::error::UemError::Api`].
//! 2. Any other JSON response (object without an error code, or a
//!    non-object value such as an array) becomes [`ResponseValue::Json`].
//! 3. A non-JSON response becomes [`ResponseValue::Status`] carrying the
//!    bare HTTP status code.
//!
//! Callers treat the return value polymorphically — payload, code, or
//! error — without ever inspecting the transport.
//!
//! Note the deliberate quirk inherited from the service contract: a 4xx/5xx
//! response *without* a JSON body classifies as `Status` success, not as an
//! error. Several UEM endpoints answer bare 202/204 statuses, and callers
//! depend on receiving those as values.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ErrorBody, UemError};

/// Content types the UEM service uses for JSON responses. Matched exactly
/// and case-sensitively against the response header.
const JSON_CONTENT_TYPES: [&str; 2] = ["application/json", "application/json; charset=utf-8"];

/// An HTTP exchange result before classification.
///
/// `post_no_error_check` returns this untouched; every other verb passes it
/// through [`check_for_error`] first.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `Content-Type` response header, if any.
    pub content_type: Option<String>,
    /// The response body bytes.
    pub body: Bytes,
}

/// Normalized outcome of a classified API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseValue {
    /// The response carried a JSON payload with no error code.
    Json(Value),
    /// The response was not JSON-typed; the bare HTTP status code stands in
    /// for a payload. This includes non-JSON 4xx/5xx responses.
    Status(u16),
}

impl ResponseValue {
    /// Returns the JSON payload, if this outcome carries one.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseValue::Json(value) => Some(value),
            ResponseValue::Status(_) => None,
        }
    }

    /// Returns the bare status code, if this outcome carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResponseValue::Json(_) => None,
            ResponseValue::Status(status) => Some(*status),
        }
    }

    /// Deserializes the JSON payload into `T`.
    ///
    /// Fails with [`UemError::NotJson`] when the outcome is a bare status,
    /// and with [`UemError::Parse`] when the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> crate::error::Result<T> {
        match self {
            ResponseValue::Json(value) => Ok(serde_json::from_value(value)?),
            ResponseValue::Status(status) => Err(UemError::NotJson(status)),
        }
    }
}

/// Classifies a raw HTTP exchange into the three-way outcome.
pub(crate) fn check_for_error(raw: RawResponse) -> crate::error::Result<ResponseValue> {
    let is_json = raw
        .content_type
        .as_deref()
        .is_some_and(|ct| JSON_CONTENT_TYPES.contains(&ct));
    if !is_json {
        return Ok(ResponseValue::Status(raw.status));
    }

    let value: Value = serde_json::from_slice(&raw.body)?;
    if value.get("errorCode").is_some_and(is_truthy) {
        tracing::debug!(status = raw.status, "UEM service returned a structured error");
        return Err(UemError::Api {
            status: raw.status,
            body: ErrorBody::from_value(value),
        });
    }
    Ok(ResponseValue::Json(value))
}

/// Truthiness in the sense the service's error envelope uses it: absent,
/// null, `false`, `0`, `""`, `[]`, and `{}` all mean "no error".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
