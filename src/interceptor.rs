//! Interceptors wrapping the transport.
//!
//! An interceptor decorates a transport: it receives the in-flight request,
//! may mutate it before forwarding to `next`, and may observe or mutate the
//! response (or error) on the way back up. Typical uses are auth headers,
//! logging, and metrics. An interceptor is free to not call `next` at all
//! and short-circuit the exchange.
//!
//! # Ordering
//!
//! Registration order is significant: each interceptor wraps everything
//! registered before it, so the LAST one registered is the outermost wrapper.
//! It sees the unmodified outbound request first and the final inbound
//! response last.
//!
//! # Example
//!
//! ```ignore
//! use riot_api_client::{HeaderInterceptor, RiotClient};
//!
//! let client = RiotClient::builder("key")
//!     .interceptor(HeaderInterceptor::new("x-request-id", "abc-123"))
//!     .build()?;
//! ```

use std::sync::Arc;

use crate::ClientError;
use crate::transport::{BoxFuture, ExchangeRequest, ExchangeResponse, Transport};

/// The signature of a single exchange.
///
/// Interceptors wrap this function to add logic before and after the call;
/// the innermost instance is the terminal transport itself.
pub type ExchangeFn = Arc<
    dyn Fn(ExchangeRequest) -> BoxFuture<'static, Result<ExchangeResponse, ClientError>>
        + Send
        + Sync,
>;

/// The "next" layer in the interceptor chain.
///
/// Call this to proceed to the next interceptor or the terminal transport.
#[derive(Clone)]
pub struct Next {
    inner: ExchangeFn,
}

impl Next {
    pub(crate) fn new(inner: ExchangeFn) -> Self {
        Self { inner }
    }

    /// Forward the request to the next layer.
    pub async fn call(self, request: ExchangeRequest) -> Result<ExchangeResponse, ClientError> {
        (self.inner)(request).await
    }
}

/// A layer wrapping a transport to observe or mutate requests and responses.
pub trait Interceptor: Send + Sync {
    /// Wrap the given exchange function, returning the decorated one.
    ///
    /// The default implementation passes through unchanged.
    fn wrap(&self, next: ExchangeFn) -> ExchangeFn {
        next
    }
}

/// An ordered sequence of interceptors, composed at dispatch time.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("count", &self.interceptors.len())
            .finish()
    }
}

impl InterceptorChain {
    /// Create a new empty interceptor chain.
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    /// Append an interceptor to the chain.
    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Get the number of interceptors in the chain.
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Compose the chain around a terminal exchange function.
    ///
    /// Folded in registration order, each interceptor wrapping the function
    /// built so far: the first interceptor registered ends up innermost
    /// (closest to the terminal transport), the last one outermost.
    pub fn wrap(&self, terminal: ExchangeFn) -> ExchangeFn {
        let mut wrapped = terminal;
        for interceptor in &self.interceptors {
            wrapped = interceptor.wrap(wrapped);
        }
        wrapped
    }

    /// Compose the chain around a terminal transport.
    ///
    /// Composition happens once per dispatch call; the resulting function is
    /// immutable for the lifetime of that call.
    pub fn wrap_transport(&self, transport: Arc<dyn Transport>) -> ExchangeFn {
        let terminal: ExchangeFn = Arc::new(move |request| transport.exchange(request));
        self.wrap(terminal)
    }
}

/// A simple interceptor that sets one header on every request.
///
/// # Example
///
/// ```ignore
/// use riot_api_client::HeaderInterceptor;
///
/// let tracking = HeaderInterceptor::new("x-request-id", "abc-123");
/// ```
#[derive(Clone)]
pub struct HeaderInterceptor {
    name: http::HeaderName,
    value: http::HeaderValue,
}

impl HeaderInterceptor {
    /// Create a new header interceptor.
    ///
    /// # Panics
    ///
    /// Panics if the header name or value is invalid. Use
    /// [`try_new`](Self::try_new) for fallible construction.
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.parse().expect("invalid header name"),
            value: value.parse().expect("invalid header value"),
        }
    }

    /// Try to create a new header interceptor.
    pub fn try_new(name: &str, value: &str) -> Result<Self, ClientError> {
        let name = name
            .parse()
            .map_err(|_| ClientError::Construction(format!("invalid header name: {name}")))?;
        let value = value
            .parse()
            .map_err(|_| ClientError::Construction(format!("invalid header value: {value}")))?;
        Ok(Self { name, value })
    }
}

impl Interceptor for HeaderInterceptor {
    fn wrap(&self, next: ExchangeFn) -> ExchangeFn {
        let name = self.name.clone();
        let value = self.value.clone();
        Arc::new(move |mut request: ExchangeRequest| {
            request.headers.insert(name.clone(), value.clone());
            next(request)
        })
    }
}

/// A function-based interceptor.
///
/// Wraps a closure receiving the request and a [`Next`] handle, which makes
/// it the quickest way to add before/after logic around an exchange.
///
/// # Example
///
/// ```ignore
/// use riot_api_client::{FnInterceptor, Next, ExchangeRequest};
///
/// let timing = FnInterceptor::new(|req: ExchangeRequest, next: Next| {
///     Box::pin(async move {
///         let started = std::time::Instant::now();
///         let result = next.call(req).await;
///         println!("call took {:?}", started.elapsed());
///         result
///     })
/// });
/// ```
pub struct FnInterceptor<F> {
    func: F,
}

impl<F> FnInterceptor<F>
where
    F: Fn(ExchangeRequest, Next) -> BoxFuture<'static, Result<ExchangeResponse, ClientError>>
        + Send
        + Sync
        + Clone
        + 'static,
{
    /// Create a new function-based interceptor.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Interceptor for FnInterceptor<F>
where
    F: Fn(ExchangeRequest, Next) -> BoxFuture<'static, Result<ExchangeResponse, ClientError>>
        + Send
        + Sync
        + Clone
        + 'static,
{
    fn wrap(&self, next: ExchangeFn) -> ExchangeFn {
        let func = self.func.clone();
        Arc::new(move |request: ExchangeRequest| {
            let func = func.clone();
            let next = Next::new(next.clone());
            func(request, next)
        })
    }
}

impl<F> Clone for FnInterceptor<F>
where
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
        }
    }
}

/// An interceptor logging each exchange through `tracing`.
///
/// Emits one `debug` event for the outbound request and one for the inbound
/// response or error. The core itself never logs; this interceptor is the
/// only place observability lives.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInterceptor;

impl LoggingInterceptor {
    /// Create a new logging interceptor.
    pub fn new() -> Self {
        Self
    }
}

impl Interceptor for LoggingInterceptor {
    fn wrap(&self, next: ExchangeFn) -> ExchangeFn {
        Arc::new(move |request: ExchangeRequest| {
            let next = next.clone();
            Box::pin(async move {
                tracing::debug!(method = %request.method, url = %request.url, "--> request");
                let result = next(request).await;
                match &result {
                    Ok(response) => tracing::debug!(status = %response.status, "<-- response"),
                    Err(err) => tracing::debug!(error = %err, "<-- error"),
                }
                result
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::capture_next;
    use bytes::Bytes;
    use http::{HeaderMap, Method, StatusCode};

    fn request() -> ExchangeRequest {
        ExchangeRequest::new(
            Method::GET,
            "https://example.com/test",
            HeaderMap::new(),
            Bytes::new(),
        )
    }

    #[test]
    fn test_chain_empty() {
        let chain = InterceptorChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_chain_push() {
        let mut chain = InterceptorChain::new();
        chain.push(Arc::new(HeaderInterceptor::new("x-test", "value")));
        assert!(!chain.is_empty());
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_header_interceptor_try_new_invalid() {
        assert!(HeaderInterceptor::try_new("bad\0name", "value").is_err());
        assert!(HeaderInterceptor::try_new("x-ok", "bad\nvalue").is_err());
    }

    #[tokio::test]
    async fn test_header_interceptor_sets_header() {
        let interceptor = HeaderInterceptor::new("x-auth", "token");
        let (next, captured) = capture_next();

        let wrapped = interceptor.wrap(next);
        wrapped(request()).await.unwrap();

        let seen = captured.lock().unwrap().take().unwrap();
        assert_eq!(seen.headers.get("x-auth").unwrap(), "token");
    }

    #[tokio::test]
    async fn test_fn_interceptor() {
        let interceptor = FnInterceptor::new(|mut req: ExchangeRequest, next: Next| {
            Box::pin(async move {
                req.headers.insert("x-modified", "true".parse().unwrap());
                next.call(req).await
            })
        });

        let (next, captured) = capture_next();
        let wrapped = interceptor.wrap(next);
        wrapped(request()).await.unwrap();

        let seen = captured.lock().unwrap().take().unwrap();
        assert_eq!(seen.headers.get("x-modified").unwrap(), "true");
    }

    /// Registered `[A, B]`: outbound order must be B, A, terminal and
    /// inbound order terminal, A, B — last registered is outermost.
    #[tokio::test]
    async fn test_chain_ordering() {
        let log = Arc::new(std::sync::Mutex::new(Vec::<&'static str>::new()));

        fn tracer(
            name: &'static str,
            log: Arc<std::sync::Mutex<Vec<&'static str>>>,
        ) -> impl Interceptor {
            struct Tracer {
                name: &'static str,
                log: Arc<std::sync::Mutex<Vec<&'static str>>>,
            }
            impl Interceptor for Tracer {
                fn wrap(&self, next: ExchangeFn) -> ExchangeFn {
                    let name = self.name;
                    let log = self.log.clone();
                    Arc::new(move |request| {
                        let next = next.clone();
                        let log = log.clone();
                        Box::pin(async move {
                            log.lock().unwrap().push(name);
                            let result = next(request).await;
                            log.lock().unwrap().push(name);
                            result
                        })
                    })
                }
            }
            Tracer { name, log }
        }

        let mut chain = InterceptorChain::new();
        chain.push(Arc::new(tracer("A", log.clone())));
        chain.push(Arc::new(tracer("B", log.clone())));

        let terminal_log = log.clone();
        let terminal: ExchangeFn = Arc::new(move |_req| {
            let log = terminal_log.clone();
            Box::pin(async move {
                log.lock().unwrap().push("terminal");
                Ok(ExchangeResponse::new(
                    StatusCode::OK,
                    HeaderMap::new(),
                    Bytes::new(),
                ))
            })
        });

        let wrapped = chain.wrap(terminal);
        wrapped(request()).await.unwrap();

        let order = log.lock().unwrap().clone();
        assert_eq!(order, vec!["B", "A", "terminal", "A", "B"]);
    }

    /// An interceptor that never calls `next` is a valid policy.
    #[tokio::test]
    async fn test_short_circuit() {
        let interceptor = FnInterceptor::new(|_req: ExchangeRequest, _next: Next| {
            Box::pin(async move {
                Ok(ExchangeResponse::new(
                    StatusCode::NO_CONTENT,
                    HeaderMap::new(),
                    Bytes::new(),
                ))
            })
        });

        let terminal: ExchangeFn = Arc::new(|_req| {
            Box::pin(async { panic!("terminal must not be reached") })
        });

        let wrapped = interceptor.wrap(terminal);
        let response = wrapped(request()).await.unwrap();
        assert_eq!(response.status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_logging_interceptor_passes_through() {
        let interceptor = LoggingInterceptor::new();
        let (next, captured) = capture_next();

        let wrapped = interceptor.wrap(next);
        let response = wrapped(request()).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert!(captured.lock().unwrap().is_some());
    }
}
