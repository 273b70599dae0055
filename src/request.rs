//! Per-call request descriptors for the transport layer.
//!
//! [`RequestOptions`] is a transient value built fresh for every call and
//! consumed by the verb that receives it. Nothing in here is shared between
//! calls: the empty defaults are constructed per invocation, so concurrent
//! requests can never observe each other's query parameters, headers, or
//! bodies.

use std::time::Duration;

use bytes::Bytes;
use serde_json::Value;

/// Query parameters for a single request.
#[derive(Debug, Clone)]
pub enum Query {
    /// Key/value pairs, percent-encoded by the HTTP layer. Repeat a key to
    /// send a sequence of values.
    Pairs(Vec<(String, String)>),
    /// A pre-assembled query string appended verbatim after `?`.
    Raw(String),
}

/// Request body for a single call.
///
/// The two shapes are mutually distinct: a JSON body tells the server to
/// interpret the payload as a JSON document, a raw body is sent unchanged
/// and interpreted however the endpoint sees fit. Supply at most one.
#[derive(Debug, Clone)]
pub enum Body {
    /// Structured payload sent as a JSON document.
    Json(Value),
    /// Raw bytes sent unchanged.
    Raw(Bytes),
}

/// Optional parameters for a single API call.
///
/// Built with chained setters and passed by value, so each invocation owns
/// its descriptor:
///
/// ```ignore
/// client.get(
///     "mdm",
///     "/devices/search",
///     RequestOptions::new()
///         .query(&[("platform", "Apple")])
///         .timeout(Duration::from_secs(5)),
/// )?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub(crate) version: Option<String>,
    pub(crate) query: Option<Query>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Option<Body>,
    pub(crate) timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a versioned endpoint: the URL gains a `v{version}` segment.
    /// Without this, the segment is omitted entirely — the unversioned and
    /// versioned URL forms are distinct endpoints, not equivalents.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets query parameters from key/value pairs.
    pub fn query(mut self, pairs: &[(&str, &str)]) -> Self {
        self.query = Some(Query::Pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        self
    }

    /// Sets a pre-assembled query string, sent verbatim. A leading `?` is
    /// stripped if present.
    pub fn raw_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(Query::Raw(query.into()));
        self
    }

    /// Adds an extra request header. Computed auth headers still win for
    /// `Authorization` and `aw-tenant-code`; see
    /// [`crate::client::UemClient`].
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a JSON body. Replaces any previously set body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    /// Sets a raw body. Replaces any previously set body.
    pub fn data(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(Body::Raw(body.into()));
        self
    }

    /// Overrides the connection's default timeout for this call only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
