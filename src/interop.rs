//! interop.rs
//!
//! Custom Yew hook to load Stripe.js v3 at runtime (no inline JS).
//!
//! # Overview
//! This hook, `use_stripejs()`, injects a single
//! `<script id="stripejs-sdk" src="https://js.stripe.com/v3/" defer>`
//! into `<head>` on first use, returns `false` until the
//! script’s `load` event fires, then returns `true`
//! on every subsequent call.
//!
//! # Usage
//! ```rust,ignore
//! use yew::prelude::*;
//! use course_checkout::use_stripejs;
//!
//! #[function_component(App)]
//! fn app() -> Html {
//!     let stripe_ready = use_stripejs();
//!     html! {
//!         if stripe_ready {
//!             <p>{"Stripe.js loaded"}</p>
//!         } else {
//!             <p>{"Loading Stripe.js..."}</p>
//!         }
//!     }
//! }
//! ```

use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::{Document, HtmlScriptElement};
use yew::functional::hook;
use yew::prelude::*;

use crate::error::{CheckoutError, Result};

pub const STRIPE_JS_URL: &str = "https://js.stripe.com/v3/";
const SCRIPT_ID: &str = "stripejs-sdk";

/// Whether `window.Stripe` is already defined.
pub fn stripe_js_present() -> bool {
    web_sys::window()
        .and_then(|win| Reflect::has(&win, &JsValue::from_str("Stripe")).ok())
        .unwrap_or(false)
}

/// Custom hook: load Stripe.js v3 exactly once and track readiness.
///
/// # Returns
/// - `false` while the `<script>` is being fetched & parsed.
/// - `true` once `window.Stripe` exists (script loaded & parsed).
#[hook]
pub fn use_stripejs() -> bool {
    let loaded = use_state(stripe_js_present);

    {
        let loaded = loaded.clone();
        use_effect_with((), move |_| {
            if !*loaded {
                if let Err(err) = inject_script(move || loaded.set(true)) {
                    log::error!("could not load Stripe.js: {}", err);
                }
            }
            // No cleanup needed
            || ()
        });
    }

    *loaded
}

/// Append the Stripe.js `<script>` unless a previous render already did.
fn inject_script(on_load: impl Fn() + 'static) -> Result<()> {
    let document: Document = web_sys::window()
        .and_then(|win| win.document())
        .ok_or_else(|| CheckoutError::Js("no document".into()))?;

    let onload_closure = Closure::wrap(Box::new(on_load) as Box<dyn Fn()>);

    // Another component already injected the script; just wait for it too.
    if let Some(existing) = document.get_element_by_id(SCRIPT_ID) {
        existing
            .add_event_listener_with_callback("load", onload_closure.as_ref().unchecked_ref())
            .map_err(CheckoutError::from_js)?;
        onload_closure.forget();
        return Ok(());
    }

    let script: HtmlScriptElement = document
        .create_element("script")
        .map_err(CheckoutError::from_js)?
        .dyn_into()
        .map_err(|_| CheckoutError::Js("created element is not a script".into()))?;

    script.set_id(SCRIPT_ID);
    script.set_src(STRIPE_JS_URL);
    script.set_defer(true);

    script.set_onload(Some(onload_closure.as_ref().unchecked_ref()));
    onload_closure.forget(); // Leak so it lives until load event

    document
        .head()
        .ok_or_else(|| CheckoutError::MissingElement("head".into()))?
        .append_child(&script)
        .map_err(CheckoutError::from_js)?;

    log::debug!("injected {}", STRIPE_JS_URL);
    Ok(())
}
