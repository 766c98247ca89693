//! Course checkout form for the browser, driving the Stripe Payment Element.
//!
//! Two ways in:
//! - the [`CheckoutForm`] Yew component renders the form and wires itself up;
//! - [`start_checkout`] binds to an existing server-rendered page that uses
//!   the element ids in [`dom::ids`].

mod backend;
mod bindings;
mod client;
mod components;
mod config;
pub mod dom;
pub mod error;
mod flow;
mod format;
mod gateway;
mod interop;
pub mod logging;
mod scheduler;
mod session;
mod status;
mod view;

use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub use backend::*;
pub use bindings::*;
pub use client::*;
pub use components::*;
pub use config::*;
pub use dom::{BrowserCheckout, DomView};
pub use error::{CheckoutError, StripeError};
pub use flow::*;
pub use format::*;
pub use gateway::*;
pub use interop::*;
pub use scheduler::*;
pub use session::*;
pub use status::*;
pub use view::*;

/// Bind a checkout controller to the current page using default settings.
///
/// Stripe.js must already be loaded by the page.
#[wasm_bindgen(js_name = startCheckout)]
pub fn start_checkout(publishable_key: &str) -> Result<(), JsValue> {
    start(CheckoutConfig::with_publishable_key(publishable_key))
}

/// Like [`start_checkout`], with a JSON configuration (see [`CheckoutConfig`]).
#[wasm_bindgen(js_name = startCheckoutWithConfig)]
pub fn start_checkout_with_config(config_json: &str) -> Result<(), JsValue> {
    start(CheckoutConfig::from_json(config_json)?)
}

fn start(config: CheckoutConfig) -> Result<(), JsValue> {
    logging::init(config.log_level_filter());
    let flow = dom::build(config)?;
    dom::attach(Rc::new(flow))?;
    Ok(())
}
