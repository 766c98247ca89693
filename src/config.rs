//! Runtime configuration for the checkout form.
//!
//! Every value has a default matching the local development setup, so a page
//! only has to supply the publishable key. Hosts that need something else can
//! pass a JSON document to [`CheckoutConfig::from_json`]; missing fields keep
//! their defaults.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Endpoint that creates a PaymentIntent and answers with its client secret.
pub const DEFAULT_INTENT_ENDPOINT: &str = "http://localhost:9002/create-payment-intent";
/// Where Stripe sends the customer back after off-page authentication.
pub const DEFAULT_RETURN_URL: &str = "http://localhost:9002/index.html";
/// Landing page after a successful payment.
pub const DEFAULT_REDIRECT_URL: &str = "http://localhost:9002";
/// Query parameter Stripe appends to the return URL.
pub const DEFAULT_CLIENT_SECRET_PARAM: &str = "payment_intent_client_secret";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Stripe publishable key (`pk_…`).
    pub publishable_key: String,
    pub intent_endpoint: String,
    pub return_url: String,
    pub redirect_url: String,
    pub client_secret_param: String,
    /// CSS selector the Payment Element is mounted into.
    pub mount_selector: String,
    /// Stripe Elements appearance theme.
    pub theme: String,
    /// Payment Element layout, `"tabs"` or `"accordion"`.
    pub layout: String,
    /// How long an inline status message stays visible.
    pub message_timeout_ms: u32,
    /// Delay between the success banner and the redirect.
    pub redirect_delay_ms: u32,
    /// `log` level name; unknown names fall back to `info`.
    pub log_level: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            publishable_key: String::new(),
            intent_endpoint: DEFAULT_INTENT_ENDPOINT.to_string(),
            return_url: DEFAULT_RETURN_URL.to_string(),
            redirect_url: DEFAULT_REDIRECT_URL.to_string(),
            client_secret_param: DEFAULT_CLIENT_SECRET_PARAM.to_string(),
            mount_selector: "#payment-element".to_string(),
            theme: "stripe".to_string(),
            layout: "tabs".to_string(),
            message_timeout_ms: 5000,
            redirect_delay_ms: 4000,
            log_level: "info".to_string(),
        }
    }
}

impl CheckoutConfig {
    /// Defaults plus the given publishable key.
    pub fn with_publishable_key(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_defaults_target_local_backend() {
        let config = CheckoutConfig::default();
        assert_eq!(config.intent_endpoint, "http://localhost:9002/create-payment-intent");
        assert_eq!(config.return_url, "http://localhost:9002/index.html");
        assert_eq!(config.redirect_url, "http://localhost:9002");
        assert_eq!(config.client_secret_param, "payment_intent_client_secret");
        assert_eq!(config.message_timeout_ms, 5000);
        assert_eq!(config.redirect_delay_ms, 4000);
    }

    #[rstest]
    fn test_partial_json_keeps_defaults() {
        let config = CheckoutConfig::from_json(
            r#"{"publishable_key":"pk_test_123","intent_endpoint":"https://shop.example/intent"}"#,
        )
        .unwrap();
        assert_eq!(config.publishable_key, "pk_test_123");
        assert_eq!(config.intent_endpoint, "https://shop.example/intent");
        assert_eq!(config.return_url, DEFAULT_RETURN_URL);
        assert_eq!(config.layout, "tabs");
    }

    #[rstest]
    fn test_malformed_json_is_rejected() {
        assert!(CheckoutConfig::from_json("{not json").is_err());
    }

    #[rstest]
    #[case("debug", LevelFilter::Debug)]
    #[case("WARN", LevelFilter::Warn)]
    #[case("off", LevelFilter::Off)]
    #[case("loud", LevelFilter::Info)]
    fn test_log_level_filter(#[case] name: &str, #[case] expected: LevelFilter) {
        let config = CheckoutConfig {
            log_level: name.into(),
            ..CheckoutConfig::default()
        };
        assert_eq!(config.log_level_filter(), expected);
    }
}
