//! Shared test doubles for the transport seam.

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

use crate::ClientError;
use crate::interceptor::ExchangeFn;
use crate::transport::{BoxFuture, ExchangeRequest, ExchangeResponse, Transport};

/// A transport that records every request and replays canned responses.
///
/// Responses are popped front-to-back; once exhausted, further exchanges
/// answer `200 OK` with an empty body.
pub(crate) struct MockTransport {
    pub requests: Mutex<Vec<ExchangeRequest>>,
    responses: Mutex<Vec<Result<ExchangeResponse, ClientError>>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(Vec::new()),
        })
    }

    pub fn respond_with(self: Arc<Self>, response: Result<ExchangeResponse, ClientError>) -> Arc<Self> {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn json(self: Arc<Self>, status: StatusCode, body: &str) -> Arc<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        self.respond_with(Ok(ExchangeResponse::new(
            status,
            headers,
            Bytes::from(body.to_owned()),
        )))
    }

    pub fn last_request(&self) -> ExchangeRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }
}

impl Transport for MockTransport {
    fn exchange(&self, request: ExchangeRequest) -> BoxFuture<'static, Result<ExchangeResponse, ClientError>> {
        self.requests.lock().unwrap().push(request);
        let mut responses = self.responses.lock().unwrap();
        let next = if responses.is_empty() {
            Ok(ExchangeResponse::new(
                StatusCode::OK,
                HeaderMap::new(),
                Bytes::new(),
            ))
        } else {
            responses.remove(0)
        };
        Box::pin(async move { next })
    }
}

/// A terminal exchange function that captures the request it receives and
/// answers `200 OK` with an empty body.
pub(crate) fn capture_next() -> (ExchangeFn, Arc<Mutex<Option<ExchangeRequest>>>) {
    let captured = Arc::new(Mutex::new(None));
    let captured_clone = captured.clone();
    let next: ExchangeFn = Arc::new(move |request: ExchangeRequest| {
        let captured = captured_clone.clone();
        Box::pin(async move {
            *captured.lock().unwrap() = Some(request);
            Ok(ExchangeResponse::new(
                StatusCode::OK,
                HeaderMap::new(),
                Bytes::new(),
            ))
        })
    });
    (next, captured)
}
