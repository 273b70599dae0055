//! Authenticated HTTP transport for the Workspace ONE UEM API.
//!
//! `UemClient` owns the immutable connection configuration (base URL,
//! tenant API key, Basic credentials, TLS mode, default timeout) and exposes
//! the request pipeline as six verbs — `get`, `post`, `post_no_error_check`,
//! `put`, `patch`, `delete` — each in a blocking and an `_async` variant
//! with an identical contract.
//!
//! Every call flows through the same three steps:
//!
//! 1. **Prepare** — build the absolute endpoint URL
//!    (`https://{host}/api[/v{version}]/{module}[/{path}]`) and the merged
//!    header set. Caller-supplied headers are extended by the computed
//!    ones: `Authorization` and `aw-tenant-code` always overwrite a
//!    caller's value, `Accept` is only defaulted to `application/json`,
//!    and `get` additionally forces `Content-Type: application/json`.
//! 2. **Execute** — one HTTP exchange over a connection scoped to this
//!    call. The sync and async executors are thin twins over the shared
//!    preparation and classification logic; neither retries, and both
//!    release the connection on every exit path.
//! 3. **Classify** — sort the response into a JSON payload, a bare status
//!    code, or a structured remote error (see [`crate::response`]).
//!
//! Base URLs are upgraded to `https://` at construction; the transport
//! never speaks plain HTTP in production. [`UemClient::with_base_url`]
//! stores the base verbatim so tests can target a local mock server.
//!
//! A `UemClient` is cheap to clone and safe to share across threads: the
//! configuration is never mutated after construction, and no state is
//! carried between calls.

use std::path::Path;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Certificate, Method};

use crate::error::{Result, UemError};
use crate::request::{Body, Query, RequestOptions};
use crate::response::{check_for_error, RawResponse, ResponseValue};

/// Default per-request timeout, overridable per connection with
/// [`UemClient::with_timeout`] and per call with
/// [`RequestOptions::timeout`].
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Custom header carrying the tenant API key alongside Basic auth.
const TENANT_CODE_HEADER: HeaderName = HeaderName::from_static("aw-tenant-code");

/// TLS verification mode for a connection.
#[derive(Debug, Clone, Default)]
pub enum TlsVerify {
    /// Verify server certificates against the system trust store.
    #[default]
    Enabled,
    /// Accept any server certificate. Only for lab environments with
    /// self-signed consoles.
    Disabled,
    /// Verify against a custom CA bundle (PEM bytes).
    CaBundle(Vec<u8>),
}

/// Authenticated transport for the UEM REST API.
///
/// One instance per logical connection to a console. All fields are fixed
/// at construction; concurrent calls share them read-only.
#[derive(Clone)]
pub struct UemClient {
    base_url: String,
    apikey: String,
    username: String,
    password: String,
    tls: TlsVerify,
    timeout: Duration,
}

impl UemClient {
    /// Creates a client for the console at `env`.
    ///
    /// `env` may be given with or without the `https://` scheme and with or
    /// without a trailing slash; it is normalized once here. `apikey` is the
    /// tenant code sent with every request, `username`/`password` form the
    /// Basic credential pair.
    pub fn new(env: &str, apikey: &str, username: &str, password: &str) -> Self {
        UemClient {
            base_url: normalize_base(env),
            apikey: apikey.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            tls: TlsVerify::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a client whose base URL is stored verbatim — no HTTPS
    /// upgrade, no trailing-slash handling. Used by tests to point the full
    /// pipeline at a local mock server; production code should use
    /// [`UemClient::new`].
    pub fn with_base_url(env: &str, apikey: &str, username: &str, password: &str) -> Self {
        UemClient {
            base_url: env.to_string(),
            apikey: apikey.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            tls: TlsVerify::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the default 30-second timeout for all calls on this
    /// connection.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Verifies server certificates against the PEM bundle at `path`
    /// instead of the system trust store.
    ///
    /// The file is read and validated eagerly so a bad path fails at
    /// construction rather than on the first call.
    pub fn with_ca_bundle(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let pem = std::fs::read(path).map_err(|source| UemError::CaBundle {
            path: path.to_path_buf(),
            source,
        })?;
        Certificate::from_pem(&pem)?;
        self.tls = TlsVerify::CaBundle(pem);
        Ok(self)
    }

    /// Disables TLS certificate verification for this connection.
    pub fn danger_accept_invalid_certs(mut self) -> Self {
        self.tls = TlsVerify::Disabled;
        self
    }

    // ── Verbs ──────────────────────────────────────────────────────────

    /// Sends a GET request and classifies the response.
    pub fn get(&self, module: &str, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        let prepared = self.prepare(Method::GET, module, path, opts)?;
        check_for_error(self.execute_blocking(prepared)?)
    }

    /// Async variant of [`UemClient::get`].
    pub async fn get_async(
        &self,
        module: &str,
        path: &str,
        opts: RequestOptions,
    ) -> Result<ResponseValue> {
        let prepared = self.prepare(Method::GET, module, path, opts)?;
        check_for_error(self.execute(prepared).await?)
    }

    /// Sends a POST request and classifies the response.
    pub fn post(&self, module: &str, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        let prepared = self.prepare(Method::POST, module, path, opts)?;
        check_for_error(self.execute_blocking(prepared)?)
    }

    /// Async variant of [`UemClient::post`].
    pub async fn post_async(
        &self,
        module: &str,
        path: &str,
        opts: RequestOptions,
    ) -> Result<ResponseValue> {
        let prepared = self.prepare(Method::POST, module, path, opts)?;
        check_for_error(self.execute(prepared).await?)
    }

    /// Sends a POST request and returns the raw response without
    /// classification. For endpoints that answer with non-JSON bodies the
    /// caller wants to inspect directly.
    pub fn post_no_error_check(
        &self,
        module: &str,
        path: &str,
        opts: RequestOptions,
    ) -> Result<RawResponse> {
        let prepared = self.prepare(Method::POST, module, path, opts)?;
        self.execute_blocking(prepared)
    }

    /// Async variant of [`UemClient::post_no_error_check`].
    pub async fn post_no_error_check_async(
        &self,
        module: &str,
        path: &str,
        opts: RequestOptions,
    ) -> Result<RawResponse> {
        let prepared = self.prepare(Method::POST, module, path, opts)?;
        self.execute(prepared).await
    }

    /// Sends a PUT request and classifies the response.
    pub fn put(&self, module: &str, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        let prepared = self.prepare(Method::PUT, module, path, opts)?;
        check_for_error(self.execute_blocking(prepared)?)
    }

    /// Async variant of [`UemClient::put`].
    pub async fn put_async(
        &self,
        module: &str,
        path: &str,
        opts: RequestOptions,
    ) -> Result<ResponseValue> {
        let prepared = self.prepare(Method::PUT, module, path, opts)?;
        check_for_error(self.execute(prepared).await?)
    }

    /// Sends a PATCH request and classifies the response.
    pub fn patch(&self, module: &str, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        let prepared = self.prepare(Method::PATCH, module, path, opts)?;
        check_for_error(self.execute_blocking(prepared)?)
    }

    /// Async variant of [`UemClient::patch`].
    pub async fn patch_async(
        &self,
        module: &str,
        path: &str,
        opts: RequestOptions,
    ) -> Result<ResponseValue> {
        let prepared = self.prepare(Method::PATCH, module, path, opts)?;
        check_for_error(self.execute(prepared).await?)
    }

    /// Sends a DELETE request and classifies the response.
    pub fn delete(&self, module: &str, path: &str, opts: RequestOptions) -> Result<ResponseValue> {
        let prepared = self.prepare(Method::DELETE, module, path, opts)?;
        check_for_error(self.execute_blocking(prepared)?)
    }

    /// Async variant of [`UemClient::delete`].
    pub async fn delete_async(
        &self,
        module: &str,
        path: &str,
        opts: RequestOptions,
    ) -> Result<ResponseValue> {
        let prepared = self.prepare(Method::DELETE, module, path, opts)?;
        check_for_error(self.execute(prepared).await?)
    }

    // ── Pipeline internals ─────────────────────────────────────────────

    /// Shared preparation step: resolves the absolute URL and the merged
    /// header set. Both executors consume the result unchanged, so the
    /// sync and async paths cannot drift.
    fn prepare(
        &self,
        method: Method,
        module: &str,
        path: &str,
        opts: RequestOptions,
    ) -> Result<PreparedRequest> {
        let mut url = join_endpoint(&self.base_url, module, path, opts.version.as_deref());
        let mut query = None;
        match opts.query {
            Some(Query::Pairs(pairs)) => query = Some(pairs),
            Some(Query::Raw(raw)) => {
                url.push('?');
                url.push_str(raw.trim_start_matches('?'));
            }
            None => {}
        }

        let mut headers = build_header(&self.username, &self.password, &self.apikey, &opts.headers)?;
        if method == Method::GET {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(PreparedRequest {
            method,
            url,
            headers,
            query,
            body: opts.body,
            timeout: opts.timeout,
        })
    }

    /// Performs one async HTTP exchange over a connection scoped to this
    /// call.
    async fn execute(&self, prepared: PreparedRequest) -> Result<RawResponse> {
        tracing::debug!(method = %prepared.method, url = %prepared.url, "dispatching UEM request");
        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        match &self.tls {
            TlsVerify::Enabled => {}
            TlsVerify::Disabled => builder = builder.danger_accept_invalid_certs(true),
            TlsVerify::CaBundle(pem) => {
                builder = builder.add_root_certificate(Certificate::from_pem(pem)?)
            }
        }
        let client = builder.build()?;

        let mut request = client
            .request(prepared.method, prepared.url)
            .headers(prepared.headers);
        if let Some(pairs) = &prepared.query {
            request = request.query(pairs);
        }
        match prepared.body {
            Some(Body::Json(value)) => request = request.json(&value),
            Some(Body::Raw(bytes)) => request = request.body(bytes),
            None => {}
        }
        if let Some(timeout) = prepared.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;
        tracing::debug!(status, "UEM response received");
        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }

    /// Blocking twin of [`UemClient::execute`]. Must not be called from
    /// within an async runtime; use the `_async` verbs there.
    fn execute_blocking(&self, prepared: PreparedRequest) -> Result<RawResponse> {
        tracing::debug!(method = %prepared.method, url = %prepared.url, "dispatching UEM request");
        let mut builder = reqwest::blocking::Client::builder().timeout(self.timeout);
        match &self.tls {
            TlsVerify::Enabled => {}
            TlsVerify::Disabled => builder = builder.danger_accept_invalid_certs(true),
            TlsVerify::CaBundle(pem) => {
                builder = builder.add_root_certificate(Certificate::from_pem(pem)?)
            }
        }
        let client = builder.build()?;

        let mut request = client
            .request(prepared.method, prepared.url)
            .headers(prepared.headers);
        if let Some(pairs) = &prepared.query {
            request = request.query(pairs);
        }
        match prepared.body {
            Some(Body::Json(value)) => request = request.json(&value),
            Some(Body::Raw(bytes)) => request = request.body(bytes),
            None => {}
        }
        if let Some(timeout) = prepared.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes()?;
        tracing::debug!(status, "UEM response received");
        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

/// A fully resolved request, ready for either executor.
struct PreparedRequest {
    method: Method,
    url: String,
    headers: HeaderMap,
    query: Option<Vec<(String, String)>>,
    body: Option<Body>,
    timeout: Option<Duration>,
}

/// Normalizes a base URL: upgrades to `https://` when no such scheme is
/// present and strips exactly one trailing `/`.
fn normalize_base(base_url: &str) -> String {
    let mut base = if base_url.starts_with("https://") {
        base_url.to_string()
    } else {
        format!("https://{base_url}")
    };
    if base.ends_with('/') {
        base.pop();
    }
    base
}

/// Joins a normalized base with the module, optional version, and optional
/// path: `{base}/api[/v{version}]/{module}[/{path}]`.
///
/// An empty version omits the `v{version}` segment entirely — the two URL
/// forms address different endpoints. A path with a leading `/` is appended
/// as-is, otherwise one is inserted; an empty path leaves the URL untouched.
fn join_endpoint(base: &str, module: &str, path: &str, version: Option<&str>) -> String {
    let mut url = match version {
        Some(version) if !version.is_empty() => format!("{base}/api/v{version}/{module}"),
        _ => format!("{base}/api/{module}"),
    };
    if !path.is_empty() {
        if !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(path);
    }
    url
}

/// Builds the merged header set for one call.
///
/// Caller headers are inserted first, then `Authorization` (Basic over the
/// credential pair) and `aw-tenant-code` overwrite any caller values for
/// those keys. `Accept` defaults to `application/json` only when the caller
/// did not supply one.
fn build_header(
    username: &str,
    password: &str,
    apikey: &str,
    extra: &[(String, String)],
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in extra {
        let parsed_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| UemError::Header { name: name.clone() })?;
        let parsed_value =
            HeaderValue::from_str(value).map_err(|_| UemError::Header { name: name.clone() })?;
        headers.append(parsed_name, parsed_value);
    }

    let credentials = BASE64.encode(format!("{username}:{password}"));
    let mut authorization = HeaderValue::from_str(&format!("Basic {credentials}"))
        .map_err(|_| UemError::Header {
            name: "Authorization".to_string(),
        })?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    let tenant_code = HeaderValue::from_str(apikey).map_err(|_| UemError::Header {
        name: "aw-tenant-code".to_string(),
    })?;
    headers.insert(TENANT_CODE_HEADER, tenant_code);

    if !headers.contains_key(ACCEPT) {
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The full four-step endpoint algorithm: scheme upgrade, trailing
    /// slash strip, version segment, path join.
    fn build_endpoint(base_url: &str, module: &str, path: &str, version: Option<&str>) -> String {
        join_endpoint(&normalize_base(base_url), module, path, version)
    }

    // ── build_endpoint ───────────────────────────────────────────────

    #[test]
    fn endpoint_upgrades_scheme_and_strips_slash() {
        assert_eq!(
            build_endpoint("example.com/", "mdm", "/devices/5", Some("2")),
            "https://example.com/api/v2/mdm/devices/5"
        );
    }

    #[test]
    fn endpoint_without_version_or_path() {
        assert_eq!(
            build_endpoint("https://example.com", "system", "", None),
            "https://example.com/api/system"
        );
    }

    #[test]
    fn endpoint_inserts_missing_path_slash() {
        assert_eq!(
            build_endpoint("example.com", "mdm", "tags/7/devices", None),
            "https://example.com/api/mdm/tags/7/devices"
        );
    }

    #[test]
    fn endpoint_keeps_existing_scheme() {
        assert_eq!(
            build_endpoint("https://uem.example.com", "mam", "/apps/internal/3", None),
            "https://uem.example.com/api/mam/apps/internal/3"
        );
    }

    #[test]
    fn empty_version_is_omitted_entirely() {
        // Some("") and None are the same: no v segment. The versioned and
        // unversioned URLs are distinct endpoints, never equivalents.
        assert_eq!(
            build_endpoint("example.com", "system", "/info", Some("")),
            "https://example.com/api/system/info"
        );
    }

    #[test]
    fn endpoint_is_pure() {
        let first = build_endpoint("example.com/", "mdm", "devices", Some("3"));
        let second = build_endpoint("example.com/", "mdm", "devices", Some("3"));
        assert_eq!(first, second, "same inputs must give identical URLs");
    }

    #[test]
    fn only_one_trailing_slash_is_stripped() {
        assert_eq!(
            build_endpoint("example.com//", "system", "", None),
            "https://example.com//api/system"
        );
    }

    // ── build_header ─────────────────────────────────────────────────

    #[test]
    fn header_carries_basic_auth_and_tenant_code() {
        let headers = build_header("user", "pass", "TENANTKEY", &[]).unwrap();
        assert_eq!(
            headers.get(AUTHORIZATION).unwrap(),
            "Basic dXNlcjpwYXNz",
            "Authorization must be Basic over base64(user:pass)"
        );
        assert_eq!(headers.get("aw-tenant-code").unwrap(), "TENANTKEY");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn caller_accept_header_is_preserved() {
        let extra = vec![("Accept".to_string(), "text/plain".to_string())];
        let headers = build_header("user", "pass", "KEY", &extra).unwrap();
        assert_eq!(
            headers.get(ACCEPT).unwrap(),
            "text/plain",
            "a caller-supplied Accept must not be forced to JSON"
        );
    }

    #[test]
    fn computed_auth_overwrites_caller_values() {
        let extra = vec![
            ("Authorization".to_string(), "Bearer stolen".to_string()),
            ("aw-tenant-code".to_string(), "WRONG".to_string()),
        ];
        let headers = build_header("user", "pass", "RIGHT", &extra).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Basic dXNlcjpwYXNz");
        assert_eq!(headers.get("aw-tenant-code").unwrap(), "RIGHT");
    }

    #[test]
    fn caller_headers_are_merged_in() {
        let extra = vec![(
            "Accept".to_string(),
            "application/json;version=2".to_string(),
        )];
        let headers = build_header("user", "pass", "KEY", &extra).unwrap();
        assert_eq!(
            headers.get(ACCEPT).unwrap(),
            "application/json;version=2",
            "versioned Accept headers ride through the merge"
        );
        assert!(headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let extra = vec![("bad header\n".to_string(), "x".to_string())];
        let result = build_header("user", "pass", "KEY", &extra);
        assert!(matches!(result, Err(UemError::Header { .. })));
    }

    #[test]
    fn authorization_value_is_marked_sensitive() {
        let headers = build_header("user", "pass", "KEY", &[]).unwrap();
        assert!(
            headers.get(AUTHORIZATION).unwrap().is_sensitive(),
            "credentials must not appear in debug logging"
        );
    }

    // ── prepare ──────────────────────────────────────────────────────

    #[test]
    fn get_forces_json_content_type() {
        let client = UemClient::new("example.com", "KEY", "user", "pass");
        let prepared = client
            .prepare(Method::GET, "system", "/info", RequestOptions::new())
            .unwrap();
        assert_eq!(
            prepared.headers.get(CONTENT_TYPE).unwrap(),
            "application/json",
            "GET must always carry a JSON content type"
        );
    }

    #[test]
    fn non_get_verbs_do_not_force_content_type() {
        let client = UemClient::new("example.com", "KEY", "user", "pass");
        let prepared = client
            .prepare(Method::POST, "mdm", "/tags/1/adddevices", RequestOptions::new())
            .unwrap();
        assert!(prepared.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn raw_query_is_folded_into_the_url() {
        let client = UemClient::new("example.com", "KEY", "user", "pass");
        let prepared = client
            .prepare(
                Method::POST,
                "mdm",
                "/devices/5/commands",
                RequestOptions::new().raw_query("?command=DeviceLock"),
            )
            .unwrap();
        assert_eq!(
            prepared.url,
            "https://example.com/api/mdm/devices/5/commands?command=DeviceLock"
        );
        assert!(prepared.query.is_none(), "raw queries bypass pair encoding");
    }

    #[test]
    fn pair_query_is_deferred_to_the_http_layer() {
        let client = UemClient::new("example.com", "KEY", "user", "pass");
        let prepared = client
            .prepare(
                Method::GET,
                "mdm",
                "/devices",
                RequestOptions::new().query(&[("searchby", "Udid"), ("id", "ABC")]),
            )
            .unwrap();
        assert_eq!(prepared.url, "https://example.com/api/mdm/devices");
        assert_eq!(
            prepared.query.as_deref(),
            Some(&[("searchby".to_string(), "Udid".to_string()), ("id".to_string(), "ABC".to_string())][..])
        );
    }
}
