//! Construction options for the dispatch client.
//!
//! [`ClientBuilder`] is the only way to configure a [`Client`]: default
//! headers and query parameters, the interceptor list, the transport, and
//! the default deadline. Configuration is frozen at [`build`](ClientBuilder::build);
//! there is no way to mutate a client afterwards.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::ClientError;
use crate::client::Client;
use crate::interceptor::{Interceptor, InterceptorChain};
use crate::transport::{HyperTransport, Transport};

/// Builder for creating a [`Client`].
///
/// # Example
///
/// ```ignore
/// use riot_api_client::{Client, LoggingInterceptor};
///
/// let client = Client::builder("https://api.example.com")
///     .default_header("x-api-key", "secret")
///     .default_query("locale", "en_US")
///     .interceptor(LoggingInterceptor::new())
///     .build()?;
/// ```
pub struct ClientBuilder {
    /// Base URL for the service.
    base_url: String,
    /// Default headers, applied to every request. Parsed at build time so
    /// invalid names/values surface as a single construction error.
    headers: Vec<(String, String)>,
    /// Default query parameters, applied to every request.
    query: Vec<(String, String)>,
    /// Ordered interceptor list; insertion order is significant.
    interceptors: InterceptorChain,
    /// Replacement terminal transport.
    transport: Option<Arc<dyn Transport>>,
    /// Default deadline for calls.
    timeout: Option<Duration>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("query", &self.query)
            .field("interceptors", &self.interceptors)
            .field("custom_transport", &self.transport.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientBuilder {
    /// Create a new builder with the given base URL.
    ///
    /// Trailing slashes are stripped at build time, so
    /// `"https://api.example.com/"` and `"https://api.example.com"` are
    /// equivalent.
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            interceptors: InterceptorChain::new(),
            transport: None,
            timeout: None,
        }
    }

    /// Replace the base URL.
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Add a default header, overwriting a previous default with the same name.
    pub fn default_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a default query parameter, overwriting a previous default with the
    /// same key.
    pub fn default_query<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append an interceptor to the chain.
    ///
    /// Order matters: the last interceptor added becomes the outermost
    /// wrapper and sees the outbound request first.
    pub fn interceptor<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Replace the terminal transport.
    pub fn transport<T: Transport + 'static>(self, transport: T) -> Self {
        self.transport_arc(Arc::new(transport))
    }

    /// Replace the terminal transport with a shared instance.
    pub fn transport_arc(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the default deadline for calls.
    ///
    /// Applies to the whole exchange; individual calls can supersede it via
    /// [`Client::with_timeout`]. Without one, calls wait indefinitely for
    /// the transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Construction`] if a default header name or
    /// value is invalid, or if the default transport cannot be created.
    pub fn build(self) -> Result<Client, ClientError> {
        let base_url = self.base_url.trim_end_matches('/').to_owned();

        let mut default_headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name: HeaderName = name
                .parse()
                .map_err(|_| ClientError::Construction(format!("invalid header name: {name}")))?;
            let value: HeaderValue = value
                .parse()
                .map_err(|_| ClientError::Construction(format!("invalid header value: {value}")))?;
            default_headers.insert(name, value);
        }

        // Later entries overwrite earlier ones: last-write-wins.
        let mut default_query = BTreeMap::new();
        for (key, value) in self.query {
            default_query.insert(key, value);
        }

        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(HyperTransport::new()?),
        };

        Ok(Client::new(
            base_url,
            default_headers,
            default_query,
            transport,
            self.interceptors,
            self.timeout,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTransport;

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::new("http://example.com");
        assert!(builder.headers.is_empty());
        assert!(builder.query.is_empty());
        assert!(builder.interceptors.is_empty());
        assert!(builder.transport.is_none());
        assert!(builder.timeout.is_none());
    }

    #[test]
    fn test_builder_normalizes_base_url() {
        let client = ClientBuilder::new("http://example.com///")
            .transport_arc(MockTransport::new())
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://example.com");
    }

    #[test]
    fn test_builder_invalid_header_name() {
        let err = ClientBuilder::new("http://example.com")
            .transport_arc(MockTransport::new())
            .default_header("bad name", "v")
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::Construction(_)));
    }

    #[test]
    fn test_builder_invalid_header_value() {
        let err = ClientBuilder::new("http://example.com")
            .transport_arc(MockTransport::new())
            .default_header("x-ok", "bad\nvalue")
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::Construction(_)));
    }

    #[test]
    fn test_default_header_last_write_wins() {
        let transport = MockTransport::new();
        let client = ClientBuilder::new("http://example.com")
            .transport_arc(transport)
            .default_header("x-token", "first")
            .default_header("x-token", "second")
            .build()
            .unwrap();
        // Observable through a call; checked here via debug formatting of the
        // merged defaults instead of a full dispatch.
        let rendered = format!("{client:?}");
        assert!(rendered.contains("second"));
        assert!(!rendered.contains("first"));
    }

    #[test]
    fn test_builder_timeout() {
        let builder = ClientBuilder::new("http://example.com").timeout(Duration::from_secs(30));
        assert_eq!(builder.timeout, Some(Duration::from_secs(30)));
    }
}
