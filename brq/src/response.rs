//! Read-only view over gateway responses.
//!
//! Status queries, payment requests and inbound push notifications all come
//! back as the same kind of field set, so they share one [`Response`] type and
//! differ only in their [`ResponseKind`].

use serde::Serialize;

use crate::config::{GatewayConfig, PredicateMode, Secret};
use crate::fields::FieldMap;
use crate::signature;
use crate::status::StatusCode;
use crate::wire;

/// What produced a [`Response`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Answer to a `transactionstatus` call.
    TransactionStatus,
    /// Answer to a `transactionrequest` or `refundinfo` call.
    TransactionRequest,
    /// A push notification sent by the gateway.
    Push,
}

/// A gateway response with typed accessors.
///
/// Holds the secret of the configuration it was built with so
/// [`Response::is_valid`] can re-check the signature at any time.
#[derive(Debug, Clone)]
pub struct Response {
    kind: ResponseKind,
    fields: FieldMap,
    secret: Secret,
    predicates: PredicateMode,
}

impl Response {
    /// Wraps `fields` received under `config`.
    #[must_use]
    pub fn new(kind: ResponseKind, fields: FieldMap, config: &GatewayConfig) -> Self {
        Self {
            kind,
            fields,
            secret: config.secret.clone(),
            predicates: config.status_predicates,
        }
    }

    /// Wraps the answer to a status query.
    #[must_use]
    pub fn transaction_status(fields: FieldMap, config: &GatewayConfig) -> Self {
        Self::new(ResponseKind::TransactionStatus, fields, config)
    }

    /// Wraps the answer to a payment or refund info request.
    #[must_use]
    pub fn transaction_request(fields: FieldMap, config: &GatewayConfig) -> Self {
        Self::new(ResponseKind::TransactionRequest, fields, config)
    }

    /// Wraps an inbound push notification.
    #[must_use]
    pub fn push(fields: FieldMap, config: &GatewayConfig) -> Self {
        Self::new(ResponseKind::Push, fields, config)
    }

    /// What produced this response.
    #[must_use]
    pub const fn kind(&self) -> ResponseKind {
        self.kind
    }

    /// All received fields.
    #[must_use]
    pub const fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Consumes the response and returns its fields.
    #[must_use]
    pub fn into_fields(self) -> FieldMap {
        self.fields
    }

    /// `BRQ_STATUSCODE` as an integer; `None` if absent or not a number.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status_code().map(StatusCode::as_u16)
    }

    /// `BRQ_STATUSCODE` as a [`StatusCode`].
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        self.fields.get(wire::STATUS_CODE)?.parse().ok()
    }

    /// `BRQ_REDIRECTURL`: where to send the consumer to finish a payment.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        self.fields.get(wire::REDIRECT_URL)
    }

    /// `BRQ_INVOICENUMBER`.
    #[must_use]
    pub fn invoice_number(&self) -> Option<&str> {
        self.fields.get(wire::RESPONSE_INVOICE_NUMBER)
    }

    /// `BRQ_AMOUNT`, as sent by the gateway.
    #[must_use]
    pub fn amount(&self) -> Option<&str> {
        self.fields.get(wire::RESPONSE_AMOUNT)
    }

    /// `BRQ_TRANSACTIONS`.
    #[must_use]
    pub fn transaction(&self) -> Option<&str> {
        self.fields.get(wire::TRANSACTIONS)
    }

    /// Re-verifies the response signature with the configured secret.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        signature::verify(&self.fields, self.secret.expose()).unwrap_or(false)
    }

    /// Status 790.
    #[must_use]
    pub fn is_pending_input(&self) -> bool {
        self.status_is(StatusCode::PENDING_INPUT)
    }

    /// Status 791.
    #[must_use]
    pub fn is_pending_processing(&self) -> bool {
        self.status_is(StatusCode::PENDING_PROCESSING)
    }

    /// Status 792.
    #[must_use]
    pub fn is_awaiting_consumer(&self) -> bool {
        self.status_is(StatusCode::AWAITING_CONSUMER)
    }

    /// Status 793.
    #[must_use]
    pub fn is_on_hold(&self) -> bool {
        self.status_is(StatusCode::ON_HOLD)
    }

    fn status_is(&self, code: StatusCode) -> bool {
        match self.predicates {
            PredicateMode::Compare => self.status_code() == Some(code),
            // reproduces predicates that never looked at the status
            PredicateMode::LegacyAlwaysTrue => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn config() -> GatewayConfig {
        GatewayConfig::new("KEY", SECRET)
    }

    fn canned_body() -> String {
        let unsigned = FieldMap::decode_form("BRQ_STATUSCODE=190&BRQ_AMOUNT=10.00").unwrap();
        let signature = signature::sign(&unsigned, SECRET).unwrap();
        format!("BRQ_STATUSCODE=190&BRQ_AMOUNT=10.00&brq_signature={signature}")
    }

    #[test]
    fn test_canned_response() {
        let fields = FieldMap::decode_form(&canned_body()).unwrap();
        let response = Response::transaction_status(fields, &config());
        assert_eq!(response.kind(), ResponseKind::TransactionStatus);
        assert_eq!(response.status(), Some(190));
        assert_eq!(response.status_code(), Some(StatusCode::SUCCESS));
        assert_eq!(response.amount(), Some("10.00"));
        assert!(response.is_valid());
    }

    #[test]
    fn test_corrupted_signature_is_invalid() {
        let body = canned_body();
        let (head, last) = body.split_at(body.len() - 1);
        let corrupted = if last == "0" { "1" } else { "0" };
        let fields = FieldMap::decode_form(&format!("{head}{corrupted}")).unwrap();
        let response = Response::transaction_status(fields, &config());
        assert_eq!(response.status(), Some(190));
        assert!(!response.is_valid());
    }

    #[test]
    fn test_is_valid_uses_configured_secret() {
        let fields = FieldMap::decode_form(&canned_body()).unwrap();
        let response = Response::push(fields, &GatewayConfig::new("KEY", "other"));
        assert!(!response.is_valid());
    }

    #[test]
    fn test_passthrough_accessors() {
        let fields = FieldMap::new()
            .with("BRQ_REDIRECTURL", "https://checkout.buckaroo.nl/html/?x")
            .with("BRQ_INVOICENUMBER", "INV-1")
            .with("BRQ_TRANSACTIONS", "ABCDEF");
        let response = Response::transaction_request(fields, &config());
        assert_eq!(response.redirect_url(), Some("https://checkout.buckaroo.nl/html/?x"));
        assert_eq!(response.invoice_number(), Some("INV-1"));
        assert_eq!(response.transaction(), Some("ABCDEF"));
        assert_eq!(response.amount(), None);
        assert_eq!(response.status(), None);
    }

    #[test]
    fn test_unparseable_status() {
        let fields = FieldMap::new().with("BRQ_STATUSCODE", "n/a");
        let response = Response::transaction_status(fields, &config());
        assert_eq!(response.status(), None);
        assert!(!response.is_pending_input());
    }

    #[test]
    fn test_predicates_compare_status() {
        let cases = [
            ("790", [true, false, false, false]),
            ("791", [false, true, false, false]),
            ("792", [false, false, true, false]),
            ("793", [false, false, false, true]),
            ("190", [false, false, false, false]),
        ];
        for (code, expected) in cases {
            let fields = FieldMap::new().with("BRQ_STATUSCODE", code);
            let response = Response::transaction_status(fields, &config());
            let actual = [
                response.is_pending_input(),
                response.is_pending_processing(),
                response.is_awaiting_consumer(),
                response.is_on_hold(),
            ];
            assert_eq!(actual, expected, "status {code}");
        }
    }

    #[test]
    fn test_legacy_predicates_are_always_true() {
        let legacy = config().with_status_predicates(PredicateMode::LegacyAlwaysTrue);
        for code in ["190", "790", "490"] {
            let fields = FieldMap::new().with("BRQ_STATUSCODE", code);
            let response = Response::transaction_status(fields, &legacy);
            assert!(response.is_pending_input());
            assert!(response.is_pending_processing());
            assert!(response.is_awaiting_consumer());
            assert!(response.is_on_hold());
        }
    }
}
