//! The dispatch client: URL building, parameter merging, raw invoke.
//!
//! [`Client`] orchestrates the request builder, the interceptor chain, and
//! the transport. It deliberately stops at the raw exchange: status
//! validation and JSON decoding live in the typed layer
//! ([`RiotClient`](crate::RiotClient)), keeping raw and typed dispatch
//! separable.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, Method};
use url::form_urlencoded;

use crate::ClientError;
use crate::builder::ClientBuilder;
use crate::interceptor::InterceptorChain;
use crate::transport::{ExchangeRequest, ExchangeResponse, Transport};

/// Expand a path template by literal substring replacement.
///
/// Every `{key}` occurrence for a supplied key is replaced with its value;
/// placeholders without a supplied value stay untouched in the output. No
/// escaping or validation of the values happens here.
///
/// # Example
///
/// ```
/// use riot_api_client::expand_path;
///
/// let path = expand_path("/foo/{id}/bar/{name}", &[("id", "9")]);
/// assert_eq!(path, "/foo/9/bar/{name}");
/// ```
pub fn expand_path(template: &str, params: &[(&str, &str)]) -> String {
    let mut path = template.to_owned();
    for (key, value) in params {
        path = path.replace(&format!("{{{key}}}"), value);
    }
    path
}

/// The generic dispatch client.
///
/// Holds the construction-time configuration: base URL, default headers and
/// query parameters, the transport, the interceptor chain, and an optional
/// default deadline. All of it is read-only once calls begin; the client is
/// `Clone + Send + Sync` and safe to share across concurrent calls without
/// locking.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    default_headers: HeaderMap,
    default_query: BTreeMap<String, String>,
    transport: Arc<dyn Transport>,
    interceptors: InterceptorChain,
    default_timeout: Option<Duration>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .field("default_query", &self.default_query)
            .field("interceptors", &self.interceptors)
            .field("default_timeout", &self.default_timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new [`ClientBuilder`] with the given base URL.
    pub fn builder<S: Into<String>>(base_url: S) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub(crate) fn new(
        base_url: String,
        default_headers: HeaderMap,
        default_query: BTreeMap<String, String>,
        transport: Arc<dyn Transport>,
        interceptors: InterceptorChain,
        default_timeout: Option<Duration>,
    ) -> Self {
        Self {
            base_url,
            default_headers,
            default_query,
            transport,
            interceptors,
            default_timeout,
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the default deadline, if any.
    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout
    }

    /// Return a copy of this client with the default deadline replaced.
    ///
    /// The original client is untouched, so a shared instance can be derived
    /// from concurrently with in-flight calls.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut derived = self.clone();
        derived.default_timeout = Some(timeout);
        derived
    }

    /// Build the absolute request URL.
    ///
    /// A path carrying its own scheme is used verbatim, bypassing the base
    /// URL. Query parameters start from a copy of the defaults; call-level
    /// values are appended, never replacing a default, so a key present in
    /// both becomes multi-valued. Keys are encoded in sorted order, and an
    /// empty query produces no `?` suffix.
    fn build_url(&self, path: &str, queries: &[(String, String)]) -> String {
        let mut url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_owned()
        } else {
            format!("{}{}", self.base_url, path)
        };

        let mut merged: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (key, value) in &self.default_query {
            merged.insert(key.as_str(), vec![value.as_str()]);
        }
        for (key, value) in queries {
            merged.entry(key.as_str()).or_default().push(value.as_str());
        }

        if !merged.is_empty() {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            for (key, values) in &merged {
                for value in values {
                    serializer.append_pair(key, value);
                }
            }
            url.push('?');
            url.push_str(&serializer.finish());
        }
        url
    }

    /// Dispatch one raw exchange.
    ///
    /// Resolves the URL, merges default and per-call headers (call values
    /// win on shared keys), composes the interceptor chain around the
    /// transport, and executes the exchange under the default deadline if
    /// one is set. The response comes back as-is: no status validation, no
    /// body decoding.
    ///
    /// # Errors
    ///
    /// [`ClientError::Construction`] for a malformed request,
    /// [`ClientError::Transport`] for network failures and timeouts.
    pub async fn invoke(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
        headers: &HeaderMap,
        queries: &[(String, String)],
    ) -> Result<ExchangeResponse, ClientError> {
        let url = self.build_url(path, queries);

        let mut merged_headers = self.default_headers.clone();
        for (name, value) in headers {
            merged_headers.insert(name.clone(), value.clone());
        }

        let request = ExchangeRequest::new(method, url, merged_headers, body.unwrap_or_default());

        // Composed once per call; immutable for the call's lifetime.
        let exchange = self.interceptors.wrap_transport(self.transport.clone());
        let pending = exchange(request);

        match self.default_timeout {
            Some(deadline) => tokio::time::timeout(deadline, pending)
                .await
                .map_err(|_| ClientError::Transport("request timed out".into()))?,
            None => pending.await,
        }
    }
}
