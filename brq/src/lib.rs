#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Buckaroo NVP payment gateway.
//!
//! The gateway speaks a name-value-pair protocol: requests and responses are
//! `application/x-www-form-urlencoded` field sets whose names share the
//! `brq_` prefix. Every message carries a `brq_signature` field, a SHA-1
//! digest over the canonicalized fields followed by the merchant's shared
//! secret. This crate contains everything needed to build, sign and read those
//! messages without doing any I/O; the HTTP side lives in `brq-http`.
//!
//! # Modules
//!
//! - [`config`] - Merchant credentials, environment selection and client settings
//! - [`error`] - Error types for field sets, signing and request assembly
//! - [`fields`] - Case-insensitive field map with form encoding
//! - [`request`] - Gateway operations and typed request parameters
//! - [`response`] - Read-only view over gateway responses
//! - [`signature`] - Canonicalization, signing and verification
//! - [`status`] - Gateway status codes
//! - [`wire`] - Field names, default values and endpoint URLs

pub mod config;
pub mod error;
pub mod fields;
pub mod request;
pub mod response;
pub mod signature;
pub mod status;
pub mod wire;

pub use config::{Environment, GatewayConfig, PredicateMode, Secret};
pub use error::{FieldMapError, RequestError, SignatureError};
pub use fields::FieldMap;
pub use request::{Operation, PaymentRequest, RefundInfoRequest};
pub use response::{Response, ResponseKind};
pub use status::StatusCode;
