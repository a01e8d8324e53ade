//! Error types for gateway calls.

use brq::{FieldMapError, Operation, RequestError, SignatureError};
use reqwest::StatusCode;

/// Errors raised while talking to the gateway over HTTP.
///
/// The client does not interpret these; they reach the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or no response arrived.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The gateway answered with a non-success status.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },
    /// The response body could not be read.
    #[error("Failed to read response body as text: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

/// Errors returned by [`GatewayClient`](crate::GatewayClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request parameters failed validation; nothing was sent.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The request could not be signed.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// The response body is not a valid field set.
    #[error("malformed gateway response: {0}")]
    MalformedResponse(#[source] FieldMapError),

    /// The response signature does not match its contents.
    #[error("signature of the {operation} response does not match")]
    SignatureMismatch {
        /// The operation whose response failed verification.
        operation: Operation,
    },

    /// The transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl GatewayError {
    /// Returns `true` for errors the caller has to fix in its own input or
    /// configuration.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Signature(_))
    }
}
