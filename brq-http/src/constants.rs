//! HTTP-specific constants for the NVP gateway.

use std::time::Duration;

/// Content type of request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Query parameter carrying the operation name.
pub const OPERATION_QUERY_PARAM: &str = "op";

/// Request timeout used by [`ReqwestTransport::default`](crate::ReqwestTransport).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
