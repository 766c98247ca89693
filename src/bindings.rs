//! course_checkout/src/bindings.rs
//!
//! Low‐level wasm-bindgen bindings to Stripe.js v3.
//!
//! Exposes the raw Stripe.js handles (`JsStripe`, `JsElements`, `JsPaymentElement`)
//! and their async methods via `js_sys::Promise`.
//! Higher-level wrappers live in `client.rs`.

use wasm_bindgen::prelude::*;
use web_sys::js_sys::Promise;

#[wasm_bindgen]
extern "C" {
    //------------------------------------------------------------------------------
    // Core Types
    //------------------------------------------------------------------------------

    /// Raw Stripe.js client handle.
    #[wasm_bindgen(js_name = Stripe, js_namespace = window)]
    #[derive(Debug, Clone)]
    pub type JsStripe;

    /// Raw Elements factory handle.
    #[wasm_bindgen(js_name = Elements)]
    #[derive(Debug, Clone)]
    pub type JsElements;

    /// Raw PaymentElement UI component handle.
    #[wasm_bindgen(js_name = PaymentElement)]
    #[derive(Debug, Clone)]
    pub type JsPaymentElement;

    //------------------------------------------------------------------------------
    // Constructors
    //------------------------------------------------------------------------------

    /// Construct a new `JsStripe` from your publishable key.
    ///
    /// ```js
    ///   const stripe = Stripe("pk_test_...");
    /// ```
    ///
    /// Throws when Stripe.js has not been loaded on the page.
    #[wasm_bindgen(catch, js_name = Stripe, js_namespace = window)]
    pub fn new_stripe(publishable_key: &str) -> Result<JsStripe, JsValue>;

    //------------------------------------------------------------------------------
    // Instance Methods
    //------------------------------------------------------------------------------

    /// `stripe.elements({ clientSecret, appearance })` → `JsElements`
    #[wasm_bindgen(method, catch, js_name = elements)]
    pub fn elements(this: &JsStripe, options: JsValue) -> Result<JsElements, JsValue>;

    /// `elements.create("payment", options)` → `JsPaymentElement`
    #[wasm_bindgen(method, catch, js_name = create)]
    pub fn create_element(
        this: &JsElements,
        element_type: &str,
        options: JsValue,
    ) -> Result<JsPaymentElement, JsValue>;

    /// `paymentElement.mount(selector)` → `()`
    #[wasm_bindgen(method, catch, js_name = mount)]
    pub fn mount(this: &JsPaymentElement, selector: &str) -> Result<(), JsValue>;

    /// `stripe.confirmPayment(opts)` → JS `Promise` resolving to `{ error }`
    /// (only when no redirect happened).
    #[wasm_bindgen(method, catch, js_name = confirmPayment)]
    pub fn confirm_payment(this: &JsStripe, options: JsValue) -> Result<Promise, JsValue>;

    /// `stripe.retrievePaymentIntent(clientSecret)` → JS `Promise` resolving to
    /// `{ paymentIntent }` or `{ error }`.
    #[wasm_bindgen(method, catch, js_name = retrievePaymentIntent)]
    pub fn retrieve_payment_intent(this: &JsStripe, client_secret: &str)
        -> Result<Promise, JsValue>;
}
