//! Wire-level names and values of the Buckaroo NVP protocol.
//!
//! Field names are listed in the casing the gateway documents. Lookups through
//! [`FieldMap`](crate::FieldMap) ignore case, so the response names work even
//! though the gateway sends them upper-cased.

/// Live checkout endpoint.
pub const LIVE_GATEWAY_URL: &str = "https://checkout.buckaroo.nl/nvp/";

/// Test checkout endpoint.
pub const TEST_GATEWAY_URL: &str = "https://testcheckout.buckaroo.nl/nvp/";

/// Merchant website key, sent with every request.
pub const WEBSITE_KEY: &str = "brq_websitekey";

/// Message signature, sent with every request and every response.
pub const SIGNATURE: &str = "brq_signature";

/// Payment currency.
pub const CURRENCY: &str = "brq_currency";

/// Comma-separated payment methods offered to the consumer.
pub const REQUESTED_SERVICES: &str = "brq_requestedservices";

/// Locale of the hosted checkout pages.
pub const CULTURE: &str = "brq_culture";

/// What the gateway does when a payment cannot be completed in one step.
pub const CONTINUE_ON_INCOMPLETE: &str = "brq_continue_on_incomplete";

/// Push URL for successful status changes.
pub const PUSH: &str = "brq_push";

/// Push URL for failed status changes.
pub const PUSH_FAILURE: &str = "brq_pushfailure";

/// Payment amount.
pub const AMOUNT: &str = "brq_amount";

/// Merchant invoice number.
pub const INVOICE_NUMBER: &str = "brq_invoicenumber";

/// Payment description shown to the consumer.
pub const DESCRIPTION: &str = "brq_description";

/// URL the consumer returns to after checkout.
pub const RETURN_URL: &str = "brq_return";

/// Transaction key in status and refund info requests.
pub const TRANSACTION: &str = "brq_transaction";

/// Status code in responses.
pub const STATUS_CODE: &str = "BRQ_STATUSCODE";

/// Checkout redirect in transaction request responses.
pub const REDIRECT_URL: &str = "BRQ_REDIRECTURL";

/// Amount echoed in responses.
pub const RESPONSE_AMOUNT: &str = "BRQ_AMOUNT";

/// Invoice number echoed in responses.
pub const RESPONSE_INVOICE_NUMBER: &str = "BRQ_INVOICENUMBER";

/// Transaction key(s) in responses.
pub const TRANSACTIONS: &str = "BRQ_TRANSACTIONS";

/// Currency used when the caller does not pick one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Payment methods offered when the caller does not pick any.
pub const DEFAULT_REQUESTED_SERVICES: &str = "ideal,transfer";

/// Checkout locale.
pub const DEFAULT_CULTURE: &str = "en-US";

/// Incomplete payments redirect to the hosted HTML flow.
pub const REDIRECT_TO_HTML: &str = "RedirectToHTML";
