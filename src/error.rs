//! Client error types.
//!
//! This module provides [`ClientError`], the error type for all client operations.

use http::StatusCode;

/// Client-side error variants.
///
/// Every fallible operation in this crate returns one of these. The variants
/// are deliberately coarse so callers can branch on the *kind* of failure:
///
/// - [`Construction`](ClientError::Construction): the outbound request could
///   not be built (invalid URL, header name, etc.). Fatal to the call.
/// - [`Transport`](ClientError::Transport): the exchange itself failed
///   (connection refused, timeout, cancellation). Surfaced unmodified; the
///   client never retries.
/// - [`Status`](ClientError::Status): the upstream responded outside
///   `[200, 300)`. The body is discarded unparsed.
/// - [`Decode`](ClientError::Decode): the response body was not the expected
///   JSON shape. Distinct from `Status` so callers can tell "upstream
///   rejected" from "upstream responded unexpectedly".
#[derive(Clone, Debug, thiserror::Error)]
pub enum ClientError {
    /// The outbound request could not be constructed.
    #[error("invalid request: {0}")]
    Construction(String),

    /// Transport-level error (connection failed, timeout, etc.).
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream API answered with a non-2xx status.
    #[error("unexpected HTTP status {status}")]
    Status { status: StatusCode },

    /// The response body could not be decoded into the expected type.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// The HTTP status carried by a [`Status`](ClientError::Status) error.
    ///
    /// Returns `None` for all other variants.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error was produced by the transport layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = ClientError::Status {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

        let err = ClientError::Transport("connection refused".into());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_is_transport() {
        assert!(ClientError::Transport("timed out".into()).is_transport());
        assert!(!ClientError::Decode("bad json".into()).is_transport());
    }

    #[test]
    fn test_display() {
        let err = ClientError::Status {
            status: StatusCode::IM_A_TEAPOT,
        };
        assert_eq!(err.to_string(), "unexpected HTTP status 418 I'm a teapot");

        let err = ClientError::Construction("bad header name".into());
        assert_eq!(err.to_string(), "invalid request: bad header name");
    }
}
