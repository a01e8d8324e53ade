//! Transport abstraction for gateway calls.
//!
//! A [`Transport`] posts a form-encoded field set to a URL and returns the raw
//! response body. [`ReqwestTransport`] is the HTTP implementation; tests and
//! applications with their own HTTP stack can plug in anything else.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use brq::FieldMap;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use url::Url;

use crate::constants::{DEFAULT_TIMEOUT, FORM_CONTENT_TYPE};
use crate::error::TransportError;

/// A boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Posts form bodies to the gateway.
pub trait Transport: Send + Sync {
    /// Sends `form` as an `application/x-www-form-urlencoded` POST to `url`
    /// and returns the response body.
    fn post<'a>(
        &'a self,
        url: &'a Url,
        form: &'a FieldMap,
    ) -> BoxFuture<'a, Result<String, TransportError>>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post<'a>(
        &'a self,
        url: &'a Url,
        form: &'a FieldMap,
    ) -> BoxFuture<'a, Result<String, TransportError>> {
        (**self).post(url, form)
    }
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    /// Shared Reqwest HTTP client
    client: Client,
    /// Optional custom headers sent with each request
    headers: HeaderMap,
    /// Optional request timeout
    timeout: Option<Duration>,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Client::new()).with_timeout(DEFAULT_TIMEOUT)
    }
}

impl ReqwestTransport {
    /// Wraps an existing client without a timeout.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Attaches custom headers to all future requests.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns any custom headers configured on the transport.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn post_form(&self, url: &Url, form: &FieldMap) -> Result<String, TransportError> {
        let context = "POST /nvp/";
        let mut req = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(form.encode_form());
        for (key, value) in &self.headers {
            req = req.header(key, value);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let http_response = req
            .send()
            .await
            .map_err(|e| TransportError::Http { context, source: e })?;

        let status = http_response.status();
        let body = http_response
            .text()
            .await
            .map_err(|e| TransportError::ResponseBodyRead { context, source: e })?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(TransportError::HttpStatus {
                context,
                status,
                body,
            })
        }
    }
}

impl Transport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        url: &'a Url,
        form: &'a FieldMap,
    ) -> BoxFuture<'a, Result<String, TransportError>> {
        Box::pin(self.post_form(url, form))
    }
}
