//! course_checkout/src/client.rs
//!
//! High-level Rust API over the Stripe.js Payment Element.
//!
//! This module provides:
//! - `ElementsOptions` to configure Stripe Elements with a PaymentIntent client secret.
//! - `PaymentElementOptions` to customize the layout of the Payment Element.
//! - `ConfirmPaymentParams` for passing parameters to `stripe.confirmPayment`, such as the return URL.
//! - `mount_payment_element()` to create Elements and mount the Payment Element.
//! - `confirm_payment()` to complete the payment flow with built-in SCA/3DS redirects.
//! - `retrieve_payment_intent()` to read back the PaymentIntent after a redirect.
//! - `StripeGateway`, the [`PaymentGateway`] used by the checkout controller.
//!
//! # Example Usage
//! ```rust,ignore
//! use course_checkout::{CheckoutConfig, PaymentGateway, StripeGateway};
//!
//! let config = CheckoutConfig::with_publishable_key("pk_test_...");
//! let gateway = StripeGateway::new(&config)?;
//! let widget = gateway.mount_widget(&client_secret, "#payment-element").await?;
//! if let Err(err) = gateway.confirm_payment(&widget, &config.return_url).await {
//!     log::error!("Error: {}", err.message);
//! }
//! ```

use async_trait::async_trait;
use gloo_utils::format::JsValueSerdeExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::{Object, Reflect};

use crate::bindings::{new_stripe, JsElements, JsPaymentElement, JsStripe};
use crate::config::CheckoutConfig;
use crate::error::StripeError;
use crate::gateway::PaymentGateway;
use crate::status::PaymentStatus;

/// Configuration for `stripe.elements({ clientSecret, appearance })`.
#[derive(Serialize, Clone, Debug)]
pub struct ElementsOptions {
    /// The PaymentIntent client secret returned by your backend.
    #[serde(rename = "clientSecret")]
    pub client_secret: String,

    /// Optional Stripe Elements appearance settings.
    #[serde(rename = "appearance", skip_serializing_if = "Option::is_none")]
    pub appearance: Option<serde_json::Value>,
}

/// Optional layout/customization for the mounted Payment Element.
#[derive(Serialize, Clone, Debug)]
pub struct PaymentElementOptions {
    /// Layout mode: `"tabs"` or `"accordion"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

/// Parameters for `stripe.confirmPayment({ confirmParams, ... })`.
#[derive(Serialize, Clone, Debug, Default)]
pub struct ConfirmPaymentParams {
    /// Where Stripe sends the customer once the payment is authenticated.
    #[serde(rename = "return_url", skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

/// Minimal representation of a PaymentIntent read back from Stripe.
#[derive(Clone, Debug, Deserialize)]
pub struct PaymentIntentInfo {
    /// Stripe’s internal identifier, e.g. `pi_1Fxxxxxx`.
    #[serde(default)]
    pub id: String,
    /// Lifecycle status, e.g. `"succeeded"`.
    pub status: String,
}

/// Shape of the value `confirmPayment` resolves with when it does not redirect.
#[derive(Debug, Default, Deserialize)]
struct ConfirmOutcome {
    #[serde(default)]
    error: Option<StripeError>,
}

/// Shape of the value `retrievePaymentIntent` resolves with.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RetrieveOutcome {
    #[serde(default)]
    payment_intent: Option<PaymentIntentInfo>,
    #[serde(default)]
    error: Option<StripeError>,
}

/// Create Elements for `elements_options` and mount a PaymentElement.
///
/// # Arguments
///
/// * `stripe` – Stripe.js client created from the publishable key.
/// * `elements_options` – Must include `client_secret`.
/// * `mount_selector` – CSS selector, e.g. `"#payment-element"`.
/// * `pe_options` – Optional layout/customization.
///
/// # Returns
///
/// On success, returns `(JsElements, JsPaymentElement)`. On failure,
/// returns a `StripeError`.
pub fn mount_payment_element(
    stripe: &JsStripe,
    elements_options: &ElementsOptions,
    mount_selector: &str,
    pe_options: Option<&PaymentElementOptions>,
) -> Result<(JsElements, JsPaymentElement), StripeError> {
    // 1) Build JS args for elements()
    let opts_js = to_js(elements_options)?;
    let elements = stripe.elements(opts_js).map_err(js_to_stripe_error)?;

    // 2) Build JS args for create("payment", ...)
    let pe_opts_js = match pe_options {
        Some(opts) => to_js(opts)?,
        None => JsValue::undefined(),
    };
    let payment_element = elements
        .create_element("payment", pe_opts_js)
        .map_err(js_to_stripe_error)?;

    // 3) Mount into DOM
    payment_element
        .mount(mount_selector)
        .map_err(js_to_stripe_error)?;

    Ok((elements, payment_element))
}

/// Confirm a PaymentIntent using the mounted Payment Element.
///
/// Stripe navigates to `return_url` on success, so the returned future
/// normally only resolves when something went wrong. A resolution without an
/// `error` field is reported as `Ok(())`.
pub async fn confirm_payment(
    stripe: &JsStripe,
    elements: &JsElements,
    params: &ConfirmPaymentParams,
) -> Result<(), StripeError> {
    // Elements is a live JS object, so the options are assembled by hand.
    let opts = Object::new();
    set_property(&opts, "elements", elements.as_ref())?;
    set_property(&opts, "confirmParams", &to_js(params)?)?;

    let promise = stripe
        .confirm_payment(opts.into())
        .map_err(js_to_stripe_error)?;

    let resolved = JsFuture::from(promise).await.map_err(js_to_stripe_error)?;
    let outcome: ConfirmOutcome = if resolved.is_undefined() || resolved.is_null() {
        ConfirmOutcome::default()
    } else {
        from_value(resolved).map_err(serde_error_to_stripe_error)?
    };

    match outcome.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Read the PaymentIntent owning `client_secret`.
///
/// # Errors
///
/// Returns `Err(StripeError)` if Stripe.js rejects or reports an error.
pub async fn retrieve_payment_intent(
    stripe: &JsStripe,
    client_secret: &str,
) -> Result<PaymentIntentInfo, StripeError> {
    let promise = stripe
        .retrieve_payment_intent(client_secret)
        .map_err(js_to_stripe_error)?;
    let resolved = JsFuture::from(promise).await.map_err(js_to_stripe_error)?;

    // PaymentIntents carry nested nulls and dates; round-trip through JSON.
    let outcome: RetrieveOutcome = resolved
        .into_serde()
        .map_err(|err| StripeError::new(err.to_string()))?;

    match (outcome.payment_intent, outcome.error) {
        (_, Some(err)) => Err(err),
        (Some(intent), None) => Ok(intent),
        (None, None) => Err(StripeError::new("retrievePaymentIntent returned no paymentIntent")),
    }
}

/// Stripe.js handle set, created once per page.
#[derive(Clone, Debug)]
pub struct StripeGateway {
    stripe: JsStripe,
    appearance: serde_json::Value,
    layout: String,
}

/// Elements group the mounted Payment Element belongs to; confirming goes
/// through it.
#[derive(Clone, Debug)]
pub struct StripeWidget {
    elements: JsElements,
}

impl StripeGateway {
    /// Create the Stripe.js client. Fails when Stripe.js is not loaded.
    pub fn new(config: &CheckoutConfig) -> Result<Self, StripeError> {
        let stripe = new_stripe(&config.publishable_key).map_err(js_to_stripe_error)?;
        Ok(Self {
            stripe,
            appearance: json!({ "theme": config.theme }),
            layout: config.layout.clone(),
        })
    }
}

#[async_trait(?Send)]
impl PaymentGateway for StripeGateway {
    type Widget = StripeWidget;

    async fn mount_widget(
        &self,
        client_secret: &str,
        selector: &str,
    ) -> Result<StripeWidget, StripeError> {
        let elements_options = ElementsOptions {
            client_secret: client_secret.to_string(),
            appearance: Some(self.appearance.clone()),
        };
        let pe_options = PaymentElementOptions {
            layout: Some(self.layout.clone()),
        };
        let (elements, _) =
            mount_payment_element(&self.stripe, &elements_options, selector, Some(&pe_options))?;
        log::debug!("payment element mounted into {}", selector);
        Ok(StripeWidget { elements })
    }

    async fn confirm_payment(
        &self,
        widget: &StripeWidget,
        return_url: &str,
    ) -> Result<(), StripeError> {
        let params = ConfirmPaymentParams {
            return_url: Some(return_url.to_string()),
        };
        confirm_payment(&self.stripe, &widget.elements, &params).await
    }

    async fn retrieve_status(&self, client_secret: &str) -> Result<PaymentStatus, StripeError> {
        let intent = retrieve_payment_intent(&self.stripe, client_secret).await?;
        log::debug!("payment intent {} is {}", intent.id, intent.status);
        Ok(PaymentStatus::from(intent.status.as_str()))
    }
}

/// Serialize to a plain JS object (maps become objects, not `Map`s).
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, StripeError> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(serde_error_to_stripe_error)
}

fn set_property(target: &Object, key: &str, value: &JsValue) -> Result<(), StripeError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_to_stripe_error)
}

/// Convert any caught `JsValue` into a `StripeError` with best effort.
fn js_to_stripe_error(value: JsValue) -> StripeError {
    from_value::<StripeError>(value.clone()).unwrap_or_else(|_| {
        StripeError::new(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    })
}

/// Convert a `serde_wasm_bindgen::Error` into `StripeError`.
fn serde_error_to_stripe_error(err: serde_wasm_bindgen::Error) -> StripeError {
    StripeError::new(err.to_string())
}
