//! Merchant configuration.
//!
//! A [`GatewayConfig`] is built once at start-up and shared read-only by every
//! client and response. It derives [`Deserialize`] so applications can embed
//! it in their own configuration files.
//!
//! # Example
//!
//! ```rust
//! use brq::{Environment, GatewayConfig};
//!
//! let config = GatewayConfig::new("WEBSITEKEY", "SECRET")
//!     .with_environment(Environment::Test)
//!     .with_debug(true);
//!
//! assert!(config.is_test_mode());
//! assert_eq!(config.gateway_url(), "https://testcheckout.buckaroo.nl/nvp/");
//! ```

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::wire;

static LIVE_ENDPOINT: LazyLock<Url> =
    LazyLock::new(|| Url::parse(wire::LIVE_GATEWAY_URL).expect("live endpoint is a valid URL"));
static TEST_ENDPOINT: LazyLock<Url> =
    LazyLock::new(|| Url::parse(wire::TEST_GATEWAY_URL).expect("test endpoint is a valid URL"));

/// Which gateway the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Test checkout; no money moves.
    Test,
    /// Production checkout.
    #[default]
    Live,
}

impl Environment {
    /// Maps a test-mode flag to an environment.
    #[must_use]
    pub const fn from_test_mode(test_mode: bool) -> Self {
        if test_mode { Self::Test } else { Self::Live }
    }

    /// Returns `true` for [`Environment::Test`].
    #[must_use]
    pub const fn is_test(self) -> bool {
        matches!(self, Self::Test)
    }

    /// Base URL of the NVP endpoint for this environment.
    #[must_use]
    pub const fn gateway_url(self) -> &'static str {
        match self {
            Self::Test => wire::TEST_GATEWAY_URL,
            Self::Live => wire::LIVE_GATEWAY_URL,
        }
    }

    /// [`Environment::gateway_url`] as a parsed [`Url`], parsed once per
    /// process.
    #[must_use]
    pub fn endpoint(self) -> Url {
        match self {
            Self::Test => TEST_ENDPOINT.clone(),
            Self::Live => LIVE_ENDPOINT.clone(),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Test => f.write_str("test"),
            Self::Live => f.write_str("live"),
        }
    }
}

/// The shared secret used to sign messages.
///
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the secret for signing.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Secret {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for Secret {
    fn from(secret: &str) -> Self {
        Self(secret.to_owned())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// How the pending-state predicates on [`Response`](crate::Response) behave.
///
/// Earlier clients of this gateway shipped `pending_input?`-style checks that
/// never looked at the status code and were therefore always true. Code that
/// grew up around that behaviour can opt back into it; everything else should
/// keep the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateMode {
    /// Predicates compare the response status with their code.
    #[default]
    Compare,
    /// Predicates return `true` whatever the status is.
    LegacyAlwaysTrue,
}

/// Merchant credentials and client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayConfig {
    /// Website key identifying the merchant site.
    pub website_key: String,

    /// Shared signing secret.
    pub secret: Secret,

    /// Test or live gateway (default: live).
    #[serde(default)]
    pub environment: Environment,

    /// Default return URL for payment requests.
    #[serde(default)]
    pub callback_url: Option<Url>,

    /// URL the gateway pushes status changes to.
    #[serde(default)]
    pub push_url: Option<Url>,

    /// Log request and response fields of every gateway call.
    #[serde(default)]
    pub debug: bool,

    /// Behaviour of the pending-state predicates.
    #[serde(default)]
    pub status_predicates: PredicateMode,
}

impl GatewayConfig {
    /// Creates a live configuration with the given credentials.
    #[must_use]
    pub fn new(website_key: impl Into<String>, secret: impl Into<Secret>) -> Self {
        Self {
            website_key: website_key.into(),
            secret: secret.into(),
            environment: Environment::default(),
            callback_url: None,
            push_url: None,
            debug: false,
            status_predicates: PredicateMode::default(),
        }
    }

    /// Sets the environment.
    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Selects the test (`true`) or live (`false`) environment.
    #[must_use]
    pub const fn with_test_mode(self, test_mode: bool) -> Self {
        self.with_environment(Environment::from_test_mode(test_mode))
    }

    /// Sets the default return URL.
    #[must_use]
    pub fn with_callback_url(mut self, url: Url) -> Self {
        self.callback_url = Some(url);
        self
    }

    /// Sets the push notification URL.
    #[must_use]
    pub fn with_push_url(mut self, url: Url) -> Self {
        self.push_url = Some(url);
        self
    }

    /// Enables or disables request/response logging.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the pending-state predicate behaviour.
    #[must_use]
    pub const fn with_status_predicates(mut self, mode: PredicateMode) -> Self {
        self.status_predicates = mode;
        self
    }

    /// Returns `true` when talking to the test gateway.
    #[must_use]
    pub const fn is_test_mode(&self) -> bool {
        self.environment.is_test()
    }

    /// Base URL of the configured gateway.
    #[must_use]
    pub const fn gateway_url(&self) -> &'static str {
        self.environment.gateway_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_url_follows_test_flag_only() {
        let base = GatewayConfig::new("KEY", "SECRET");
        assert_eq!(base.gateway_url(), "https://checkout.buckaroo.nl/nvp/");

        let test = base.clone().with_test_mode(true);
        assert_eq!(test.gateway_url(), "https://testcheckout.buckaroo.nl/nvp/");

        let loaded = test
            .with_debug(true)
            .with_callback_url("https://shop.example/return".parse().unwrap())
            .with_status_predicates(PredicateMode::LegacyAlwaysTrue);
        assert_eq!(loaded.gateway_url(), "https://testcheckout.buckaroo.nl/nvp/");
        assert_eq!(
            loaded.with_test_mode(false).gateway_url(),
            "https://checkout.buckaroo.nl/nvp/"
        );
    }

    #[test]
    fn test_endpoint_matches_gateway_url() {
        for environment in [Environment::Test, Environment::Live] {
            assert_eq!(environment.endpoint().as_str(), environment.gateway_url());
        }
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let config = GatewayConfig::new("KEY", "hunter2");
        let printed = format!("{config:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("Secret(***)"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: GatewayConfig =
            serde_json::from_str(r#"{"website_key":"KEY","secret":"S"}"#).unwrap();
        assert_eq!(config.environment, Environment::Live);
        assert_eq!(config.secret.expose(), "S");
        assert!(config.callback_url.is_none());
        assert!(!config.debug);
        assert_eq!(config.status_predicates, PredicateMode::Compare);
    }

    #[test]
    fn test_deserialize_full() {
        let config: GatewayConfig = serde_json::from_str(
            r#"{
                "website_key": "KEY",
                "secret": "S",
                "environment": "test",
                "push_url": "https://shop.example/push",
                "status_predicates": "legacy_always_true"
            }"#,
        )
        .unwrap();
        assert!(config.is_test_mode());
        assert_eq!(
            config.push_url.as_ref().map(Url::as_str),
            Some("https://shop.example/push")
        );
        assert_eq!(config.status_predicates, PredicateMode::LegacyAlwaysTrue);
    }
}
