//! Hyper-based terminal transport.
//!
//! [`HyperTransport`] drives hyper_util's legacy client with a rustls HTTPS
//! connector: HTTP/1.1 and HTTP/2 via ALPN, native root certificates, and
//! hyper's own connection pooling. This crate adds no pooling, retry, or
//! rate-limiting logic of its own on top.

use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::{TokioExecutor, TokioTimer};

use bytes::Bytes;

use super::{BoxFuture, ExchangeRequest, ExchangeResponse, Transport};
use crate::ClientError;

/// Type alias for the hyper client with HTTPS connector.
type HyperClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// The default terminal transport, backed by hyper_util's legacy client.
///
/// Cloning is cheap and clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use riot_api_client::transport::HyperTransport;
/// use std::time::Duration;
///
/// let transport = HyperTransport::builder()
///     .pool_idle_timeout(Duration::from_secs(60))
///     .build()?;
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    client: HyperClient,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport").finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a new transport builder.
    pub fn builder() -> HyperTransportBuilder {
        HyperTransportBuilder::new()
    }

    /// Create a new transport with default settings.
    pub fn new() -> Result<Self, ClientError> {
        Self::builder().build()
    }
}

impl Transport for HyperTransport {
    fn exchange(&self, request: ExchangeRequest) -> BoxFuture<'static, Result<ExchangeResponse, ClientError>> {
        let client = self.client.clone();
        Box::pin(async move {
            let mut builder = http::Request::builder()
                .method(request.method)
                .uri(&request.url);
            if let Some(headers) = builder.headers_mut() {
                *headers = request.headers;
            }
            // An unparsable URL or header surfaces here, before any I/O.
            let req = builder
                .body(Full::new(request.body))
                .map_err(|e| ClientError::Construction(format!("failed to build request: {e}")))?;

            let response = client
                .request(req)
                .await
                .map_err(|e| ClientError::Transport(format!("request failed: {e}")))?;

            let status = response.status();
            let headers = response.headers().clone();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| ClientError::Transport(format!("failed to read response body: {e}")))?
                .to_bytes();

            Ok(ExchangeResponse::new(status, headers, body))
        })
    }
}

/// Builder for [`HyperTransport`].
pub struct HyperTransportBuilder {
    /// Connection pool idle timeout.
    pool_idle_timeout: Option<Duration>,
    /// Maximum idle connections per host.
    pool_max_idle_per_host: usize,
}

impl Default for HyperTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HyperTransportBuilder {
    /// Create a new transport builder with default settings.
    pub fn new() -> Self {
        Self {
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: 32,
        }
    }

    /// Set the connection pool idle timeout.
    ///
    /// Connections idle for longer than this are closed and removed from
    /// the pool. Default: 90 seconds.
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Set the maximum number of idle connections per host.
    ///
    /// Default: 32.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Construction`] if the system root certificate
    /// store cannot be loaded.
    pub fn build(self) -> Result<HyperTransport, ClientError> {
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| ClientError::Construction(format!("failed to load root certificates: {e}")))?
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();

        let mut builder = Client::builder(TokioExecutor::new());
        builder.pool_timer(TokioTimer::new());
        if let Some(timeout) = self.pool_idle_timeout {
            builder.pool_idle_timeout(timeout);
        }
        builder.pool_max_idle_per_host(self.pool_max_idle_per_host);

        Ok(HyperTransport {
            client: builder.build(connector),
        })
    }
}

impl std::fmt::Debug for HyperTransportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransportBuilder")
            .field("pool_idle_timeout", &self.pool_idle_timeout)
            .field("pool_max_idle_per_host", &self.pool_max_idle_per_host)
            .finish()
    }
}
