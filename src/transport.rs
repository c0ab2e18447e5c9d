//! The transport capability: one request in, one response out.
//!
//! A [`Transport`] performs a single HTTP exchange. The default implementation
//! is [`HyperTransport`], but anything that implements the trait can be plugged
//! in via [`ClientBuilder::transport`](crate::ClientBuilder::transport) —
//! including in-memory fakes for tests.
//!
//! Interceptors (see [`crate::interceptor`]) wrap a transport without knowing
//! which concrete implementation terminates the chain.

mod hyper;

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};

use crate::ClientError;

pub use futures::future::BoxFuture;
pub use hyper::{HyperTransport, HyperTransportBuilder};

/// A fully resolved outbound request.
///
/// Built per call by the dispatch client and never retained: the URL is
/// already absolute, headers and query parameters are already merged.
#[derive(Debug, Clone)]
pub struct ExchangeRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL, query string included.
    pub url: String,
    /// Merged request headers.
    pub headers: HeaderMap,
    /// Request body. Empty for body-less requests.
    pub body: Bytes,
}

impl ExchangeRequest {
    /// Create a new exchange request.
    pub fn new(method: Method, url: impl Into<String>, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            url: url.into(),
            headers,
            body,
        }
    }

    /// Get a mutable reference to the headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

/// A raw response as produced by a transport.
///
/// The body is fully collected by the terminal transport, so dropping the
/// response releases it; there is no stream left to leak. Status validation
/// and decoding are the typed dispatch layer's job, not the transport's.
#[derive(Debug, Clone)]
pub struct ExchangeResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Collected response body.
    pub body: Bytes,
}

impl ExchangeResponse {
    /// Create a new exchange response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }
}

/// The capability performing one raw request/response exchange.
///
/// Implementations must be shareable across concurrently issued calls; the
/// client holds them behind an `Arc` and never locks around them.
pub trait Transport: Send + Sync {
    /// Perform a single exchange.
    ///
    /// Network failures are returned as [`ClientError::Transport`]; a
    /// malformed request (e.g. an unparsable URL) as
    /// [`ClientError::Construction`]. A non-2xx response is NOT an error at
    /// this layer.
    fn exchange(&self, request: ExchangeRequest) -> BoxFuture<'static, Result<ExchangeResponse, ClientError>>;
}
