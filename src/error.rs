//! Checkout error types.

use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Result type alias
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Representation of a Stripe.js error object.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Error)]
#[error("{message}")]
pub struct StripeError {
    /// Human-readable message.
    pub message: String,
    /// Stripe’s error type, e.g. `"card_error"`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Optional Stripe error code, e.g. `"card_declined"`.
    #[serde(default)]
    pub code: Option<String>,
}

impl StripeError {
    /// Error without a Stripe type, for failures raised on our side of the bridge.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: None,
            code: None,
        }
    }

    /// Whether Stripe's message is meant to be shown to the customer verbatim.
    ///
    /// Only card declines and field validation failures qualify; anything else
    /// (API, network, rate limit) is replaced by a generic message.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self.error_type.as_deref(),
            Some("card_error") | Some("validation_error")
        )
    }
}

/// Errors raised while driving the checkout form.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Email did not look like `someone@host.tld`
    #[error("email address is not valid")]
    InvalidEmail,

    /// Request to the payment-intent endpoint failed before a response arrived
    #[error("payment intent request failed: {0}")]
    Backend(String),

    /// Payment-intent endpoint answered with a non-success status
    #[error("payment intent endpoint returned {status}: {body}")]
    BackendStatus { status: u16, body: String },

    /// Stripe.js rejected a call
    #[error("stripe error: {0}")]
    Stripe(#[from] StripeError),

    /// A DOM element the form depends on is missing
    #[error("element #{0} not found")]
    MissingElement(String),

    /// A browser API threw
    #[error("javascript error: {0}")]
    Js(String),

    /// Configuration or payload could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Wrap a thrown JS value, keeping whatever text it carries.
    pub fn from_js(value: JsValue) -> Self {
        CheckoutError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<gloo_net::Error> for CheckoutError {
    fn from(err: gloo_net::Error) -> Self {
        CheckoutError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for CheckoutError {
    fn from(err: serde_json::Error) -> Self {
        CheckoutError::Serialization(err.to_string())
    }
}

impl From<CheckoutError> for JsValue {
    fn from(err: CheckoutError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("card_error"), true)]
    #[case(Some("validation_error"), true)]
    #[case(Some("api_error"), false)]
    #[case(Some("invalid_request_error"), false)]
    #[case(None, false)]
    fn test_user_facing_classification(#[case] error_type: Option<&str>, #[case] expected: bool) {
        let err = StripeError {
            message: "Your card was declined.".into(),
            error_type: error_type.map(String::from),
            code: None,
        };
        assert_eq!(err.is_user_facing(), expected);
    }

    #[rstest]
    fn test_stripe_error_deserializes_type_field() {
        let err: StripeError = serde_json::from_str(
            r#"{"type":"card_error","code":"card_declined","message":"Your card was declined.","decline_code":"generic_decline"}"#,
        )
        .unwrap();
        assert_eq!(err.error_type.as_deref(), Some("card_error"));
        assert_eq!(err.code.as_deref(), Some("card_declined"));
        assert_eq!(err.to_string(), "Your card was declined.");
    }

    #[rstest]
    fn test_stripe_error_requires_message() {
        let parsed = serde_json::from_str::<StripeError>(r#"{"type":"card_error","code":"card_declined"}"#);
        assert!(parsed.is_err());
    }

    #[rstest]
    fn test_backend_status_display() {
        let err = CheckoutError::BackendStatus {
            status: 400,
            body: "Invalid amount".into(),
        };
        assert_eq!(err.to_string(), "payment intent endpoint returned 400: Invalid amount");
    }
}
