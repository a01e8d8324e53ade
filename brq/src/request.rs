//! Gateway operations and request parameters.
//!
//! Request types validate their parameters and turn them into the unsigned
//! field set for an operation. Signing and the website key are added by the
//! client at send time.

use std::fmt;

use rust_decimal::Decimal;
use url::Url;

use crate::config::GatewayConfig;
use crate::error::RequestError;
use crate::fields::FieldMap;
use crate::wire;

/// An NVP operation, sent as the `op` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Start a payment.
    TransactionRequest,
    /// Ask what can still be refunded on a transaction.
    RefundInfo,
    /// Look up the status of a transaction.
    TransactionStatus,
}

impl Operation {
    /// Wire name of the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TransactionRequest => "transactionrequest",
            Self::RefundInfo => "refundinfo",
            Self::TransactionStatus => "transactionstatus",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a payment request.
///
/// `amount`, `invoice_number` and `description` are required; the rest fall
/// back to the configuration or to gateway defaults.
///
/// # Example
///
/// ```rust
/// use brq::{GatewayConfig, PaymentRequest};
/// use rust_decimal::Decimal;
///
/// let config = GatewayConfig::new("KEY", "SECRET");
/// let fields = PaymentRequest::new()
///     .with_amount(Decimal::new(1000, 2))
///     .with_invoice_number("INV-1")
///     .with_description("Order 1")
///     .to_fields(&config)
///     .unwrap();
///
/// assert_eq!(fields.get("brq_amount"), Some("10.00"));
/// assert_eq!(fields.get("brq_currency"), Some("EUR"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Amount to charge.
    pub amount: Option<Decimal>,
    /// Merchant invoice number.
    pub invoice_number: Option<String>,
    /// Description shown to the consumer.
    pub description: Option<String>,
    /// Return URL; overrides [`GatewayConfig::callback_url`].
    pub return_url: Option<Url>,
    /// Payment methods to offer (default: `ideal,transfer`).
    pub requested_services: Option<String>,
}

impl PaymentRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the amount.
    #[must_use]
    pub const fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the invoice number.
    #[must_use]
    pub fn with_invoice_number(mut self, invoice_number: impl Into<String>) -> Self {
        self.invoice_number = Some(invoice_number.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the return URL for this payment only.
    #[must_use]
    pub fn with_return_url(mut self, url: Url) -> Self {
        self.return_url = Some(url);
        self
    }

    /// Sets the payment methods to offer.
    #[must_use]
    pub fn with_requested_services(mut self, services: impl Into<String>) -> Self {
        self.requested_services = Some(services.into());
        self
    }

    /// Builds the unsigned `transactionrequest` fields.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingParameter`] if the amount, invoice
    /// number or description is missing, checked in that order.
    pub fn to_fields(&self, config: &GatewayConfig) -> Result<FieldMap, RequestError> {
        let amount = self.amount.ok_or(RequestError::MissingParameter("amount"))?;
        let invoice_number = required(self.invoice_number.as_deref(), "invoice_number")?;
        let description = required(self.description.as_deref(), "description")?;

        let mut fields = FieldMap::new()
            .with(wire::CURRENCY, wire::DEFAULT_CURRENCY)
            .with(
                wire::REQUESTED_SERVICES,
                self.requested_services
                    .as_deref()
                    .unwrap_or(wire::DEFAULT_REQUESTED_SERVICES),
            )
            .with(wire::CULTURE, wire::DEFAULT_CULTURE)
            .with(wire::CONTINUE_ON_INCOMPLETE, wire::REDIRECT_TO_HTML)
            .with(wire::AMOUNT, amount.to_string())
            .with(wire::INVOICE_NUMBER, invoice_number)
            .with(wire::DESCRIPTION, description);

        if let Some(push) = &config.push_url {
            fields.insert(wire::PUSH, push.as_str());
            fields.insert(wire::PUSH_FAILURE, push.as_str());
        }
        if let Some(return_url) = self.return_url.as_ref().or(config.callback_url.as_ref()) {
            fields.insert(wire::RETURN_URL, return_url.as_str());
        }

        Ok(fields)
    }
}

/// Parameters of a refund info request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefundInfoRequest {
    /// Key of the transaction to inspect.
    pub transaction_id: Option<String>,
}

impl RefundInfoRequest {
    /// Creates a request for the given transaction.
    #[must_use]
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: Some(transaction_id.into()),
        }
    }

    /// Builds the unsigned `refundinfo` fields.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingParameter`] if the transaction id is
    /// missing or blank.
    pub fn to_fields(&self) -> Result<FieldMap, RequestError> {
        transaction_fields(self.transaction_id.as_deref())
    }
}

/// Builds the unsigned `transactionstatus` fields.
///
/// # Errors
///
/// Returns [`RequestError::MissingParameter`] if `transaction_id` is blank.
pub fn status_fields(transaction_id: &str) -> Result<FieldMap, RequestError> {
    transaction_fields(Some(transaction_id))
}

fn transaction_fields(transaction_id: Option<&str>) -> Result<FieldMap, RequestError> {
    let transaction_id = required(transaction_id, "transaction_id")?;
    Ok(FieldMap::new().with(wire::TRANSACTION, transaction_id))
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, RequestError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(RequestError::MissingParameter(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> PaymentRequest {
        PaymentRequest::new()
            .with_amount(Decimal::new(1000, 2))
            .with_invoice_number("INV-1")
            .with_description("Order 1")
    }

    #[test]
    fn test_payment_defaults() {
        let fields = complete()
            .to_fields(&GatewayConfig::new("KEY", "SECRET"))
            .unwrap();
        assert_eq!(fields.get("brq_currency"), Some("EUR"));
        assert_eq!(fields.get("brq_requestedservices"), Some("ideal,transfer"));
        assert_eq!(fields.get("brq_culture"), Some("en-US"));
        assert_eq!(fields.get("brq_continue_on_incomplete"), Some("RedirectToHTML"));
        assert_eq!(fields.get("brq_amount"), Some("10.00"));
        assert_eq!(fields.get("brq_invoicenumber"), Some("INV-1"));
        assert_eq!(fields.get("brq_description"), Some("Order 1"));
        assert!(!fields.contains("brq_return"));
        assert!(!fields.contains("brq_push"));
        assert!(!fields.contains("brq_pushfailure"));
        assert!(!fields.contains("brq_websitekey"));
        assert!(!fields.contains("brq_signature"));
    }

    #[test]
    fn test_payment_uses_configured_urls() {
        let config = GatewayConfig::new("KEY", "SECRET")
            .with_callback_url("https://shop.example/return".parse().unwrap())
            .with_push_url("https://shop.example/push".parse().unwrap());
        let fields = complete().to_fields(&config).unwrap();
        assert_eq!(fields.get("brq_return"), Some("https://shop.example/return"));
        assert_eq!(fields.get("brq_push"), Some("https://shop.example/push"));
        assert_eq!(fields.get("brq_pushfailure"), Some("https://shop.example/push"));
    }

    #[test]
    fn test_payment_overrides() {
        let config = GatewayConfig::new("KEY", "SECRET")
            .with_callback_url("https://shop.example/return".parse().unwrap());
        let fields = complete()
            .with_return_url("https://shop.example/order/1".parse().unwrap())
            .with_requested_services("paypal")
            .to_fields(&config)
            .unwrap();
        assert_eq!(fields.get("brq_return"), Some("https://shop.example/order/1"));
        assert_eq!(fields.get("brq_requestedservices"), Some("paypal"));
    }

    #[test]
    fn test_payment_missing_parameters() {
        let config = GatewayConfig::new("KEY", "SECRET");
        let cases = [
            (
                PaymentRequest { amount: None, ..complete() },
                "amount",
            ),
            (
                PaymentRequest { invoice_number: None, ..complete() },
                "invoice_number",
            ),
            (
                PaymentRequest { description: Some("  ".to_owned()), ..complete() },
                "description",
            ),
        ];
        for (request, missing) in cases {
            assert_eq!(
                request.to_fields(&config),
                Err(RequestError::MissingParameter(missing))
            );
        }
        assert_eq!(
            PaymentRequest::new().to_fields(&config),
            Err(RequestError::MissingParameter("amount"))
        );
    }

    #[test]
    fn test_transaction_fields() {
        let fields = RefundInfoRequest::new("TX-1").to_fields().unwrap();
        assert_eq!(fields.get("brq_transaction"), Some("TX-1"));
        assert_eq!(fields.len(), 1);
        assert_eq!(
            RefundInfoRequest::default().to_fields(),
            Err(RequestError::MissingParameter("transaction_id"))
        );
        assert_eq!(
            status_fields(""),
            Err(RequestError::MissingParameter("transaction_id"))
        );
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::TransactionRequest.as_str(), "transactionrequest");
        assert_eq!(Operation::RefundInfo.to_string(), "refundinfo");
        assert_eq!(Operation::TransactionStatus.as_str(), "transactionstatus");
    }
}
