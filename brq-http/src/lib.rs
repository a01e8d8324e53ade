#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP client for the Buckaroo NVP payment gateway.
//!
//! [`GatewayClient`] signs requests built from [`brq`] types, posts them to
//! the gateway through a [`Transport`] and verifies the signature of every
//! answer before handing back a [`brq::Response`].
//!
//! # Modules
//!
//! - [`client`] - Gateway operations
//! - [`constants`] - HTTP-level constants
//! - [`error`] - Gateway and transport error types
//! - [`transport`] - Transport abstraction and the `reqwest` implementation
//!
//! # Feature Flags
//!
//! - `telemetry` (default) - `tracing` spans for gateway calls and the
//!   request/response dumps enabled by [`brq::GatewayConfig::debug`]

pub mod client;
pub mod constants;
pub mod error;
pub mod transport;

pub use client::GatewayClient;
pub use error::{GatewayError, TransportError};
pub use transport::{BoxFuture, ReqwestTransport, Transport};
