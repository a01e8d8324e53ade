//! Gateway operations over a [`Transport`].
//!
//! Every call follows the same path: add the website key, sign, post to
//! `{gateway}?op={operation}`, decode the form-encoded answer and verify its
//! signature. A response whose signature does not match is an error, never a
//! value.

use std::sync::Arc;

use brq::request::status_fields;
use brq::{
    FieldMap, GatewayConfig, Operation, PaymentRequest, RefundInfoRequest, Response, signature,
    wire,
};
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::constants::OPERATION_QUERY_PARAM;
use crate::error::GatewayError;
use crate::transport::{ReqwestTransport, Transport};

/// Client for the Buckaroo NVP gateway.
///
/// Cloning is cheap; the configuration is shared.
///
/// # Example
///
/// ```no_run
/// use brq::{Environment, GatewayConfig};
/// use brq_http::GatewayClient;
///
/// # async fn run() -> Result<(), brq_http::GatewayError> {
/// let config = GatewayConfig::new("WEBSITEKEY", "SECRET")
///     .with_environment(Environment::Test);
/// let client = GatewayClient::new(config);
///
/// let response = client.status("4C1BE53E2C42412AB32A799D9316E7DD").await?;
/// println!("status: {:?}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct GatewayClient<T = ReqwestTransport> {
    /// Shared merchant configuration
    config: Arc<GatewayConfig>,
    /// Base URL requests are posted to
    gateway_url: Url,
    /// How requests reach the gateway
    transport: T,
}

impl GatewayClient<ReqwestTransport> {
    /// Creates a client that talks HTTP through a default [`ReqwestTransport`].
    #[must_use]
    pub fn new(config: impl Into<Arc<GatewayConfig>>) -> Self {
        Self::with_transport(config, ReqwestTransport::default())
    }
}

impl<T: Transport> GatewayClient<T> {
    /// Creates a client that sends requests through `transport`.
    pub fn with_transport(config: impl Into<Arc<GatewayConfig>>, transport: T) -> Self {
        let config = config.into();
        let gateway_url = config.environment.endpoint();
        Self {
            config,
            gateway_url,
            transport,
        }
    }

    /// Posts to `url` instead of the environment's endpoint.
    #[must_use]
    pub fn with_gateway_url(mut self, url: Url) -> Self {
        self.gateway_url = url;
        self
    }

    /// Returns the shared configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Returns the base URL requests are posted to.
    #[must_use]
    pub const fn gateway_url(&self) -> &Url {
        &self.gateway_url
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Full URL for `operation`.
    #[must_use]
    pub fn operation_url(&self, operation: Operation) -> Url {
        let mut url = self.gateway_url.clone();
        url.query_pairs_mut()
            .append_pair(OPERATION_QUERY_PARAM, operation.as_str());
        url
    }

    /// Signs `fields`, sends them as `operation` and returns the verified
    /// response fields.
    ///
    /// `fields` itself is left untouched; the website key and signature are
    /// added to a copy.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Signature`] if the configured secret is empty
    /// - [`GatewayError::Transport`] if the request fails
    /// - [`GatewayError::MalformedResponse`] if the body repeats a field
    /// - [`GatewayError::SignatureMismatch`] if the response signature is wrong
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "brq.gateway.execute", skip_all, fields(operation = %operation), err)
    )]
    pub async fn execute(
        &self,
        fields: &FieldMap,
        operation: Operation,
    ) -> Result<FieldMap, GatewayError> {
        let secret = self.config.secret.expose();

        let mut request = fields.clone();
        request.insert(wire::WEBSITE_KEY, self.config.website_key.as_str());
        let request = signature::signed(&request, secret)?;
        let url = self.operation_url(operation);

        log_fields(self.config.debug, "Gateway request", &request);

        let body = self.transport.post(&url, &request).await?;
        let response = FieldMap::decode_form(&body).map_err(GatewayError::MalformedResponse)?;

        log_fields(self.config.debug, "Gateway response", &response);

        if !signature::verify(&response, secret)? {
            return Err(GatewayError::SignatureMismatch { operation });
        }
        Ok(response)
    }

    /// Starts a payment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Request`] before anything is sent if the amount,
    /// invoice number or description is missing; otherwise the errors of
    /// [`GatewayClient::execute`].
    pub async fn request_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<Response, GatewayError> {
        let fields = request.to_fields(&self.config)?;
        let response = self.execute(&fields, Operation::TransactionRequest).await?;
        Ok(Response::transaction_request(response, &self.config))
    }

    /// Asks which refunds are possible for a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Request`] before anything is sent if the
    /// transaction id is missing; otherwise the errors of
    /// [`GatewayClient::execute`].
    pub async fn request_refund_info(
        &self,
        request: &RefundInfoRequest,
    ) -> Result<Response, GatewayError> {
        let fields = request.to_fields()?;
        let response = self.execute(&fields, Operation::RefundInfo).await?;
        Ok(Response::transaction_request(response, &self.config))
    }

    /// Looks up the status of a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Request`] before anything is sent if
    /// `transaction_id` is blank; otherwise the errors of
    /// [`GatewayClient::execute`].
    pub async fn status(&self, transaction_id: &str) -> Result<Response, GatewayError> {
        let fields = status_fields(transaction_id)?;
        let response = self.execute(&fields, Operation::TransactionStatus).await?;
        Ok(Response::transaction_status(response, &self.config))
    }

    /// Reads the body of a push notification the gateway posted to us.
    ///
    /// The signature is not enforced here; check [`Response::is_valid`]
    /// before acting on the notification.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MalformedResponse`] if the body repeats a field.
    pub fn push_notification(&self, body: &str) -> Result<Response, GatewayError> {
        let fields = FieldMap::decode_form(body).map_err(GatewayError::MalformedResponse)?;
        Ok(Response::push(fields, &self.config))
    }
}

/// Dumps a field set when the configuration asks for it.
#[cfg(feature = "telemetry")]
fn log_fields(debug: bool, message: &'static str, fields: &FieldMap) {
    if debug {
        tracing::info!(?fields, "{message}");
    }
}

/// Dumps a field set when the configuration asks for it.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn log_fields(_debug: bool, _message: &'static str, _fields: &FieldMap) {}
