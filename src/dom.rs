//! Browser binding of the checkout controller.
//!
//! [`DomView`] renders through the element ids of the checkout page and
//! [`attach`] hooks a controller to the form's `submit` and the email field's
//! `input` events.

use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlInputElement, Window};

use crate::backend::HttpIntentBackend;
use crate::client::StripeGateway;
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};
use crate::flow::CheckoutFlow;
use crate::scheduler::TimeoutScheduler;
use crate::session::FormInputs;
use crate::status::StatusMessage;
use crate::view::CheckoutView;

/// Element ids the checkout page must provide.
pub mod ids {
    pub const PAYMENT_FORM: &str = "payment-form";
    pub const EMAIL: &str = "email";
    pub const COURSE_NAME: &str = "course_name";
    pub const COURSE_ID: &str = "course_id";
    pub const PRICE: &str = "price";
    pub const PRICE_UNFORMATTED: &str = "price-unformatted";
    pub const PAYMENT_ELEMENT: &str = "payment-element";
    pub const BUTTON_TEXT: &str = "button-text";
    pub const SUBMIT: &str = "submit";
    pub const SPINNER: &str = "spinner";
    pub const PAYMENT_MESSAGE: &str = "payment-message";
    pub const PAYMENT_MESSAGE_SUCCESS: &str = "payment-message-success";
}

const HIDDEN: &str = "hidden";
const ALERT: &str = "alert";
const ALERT_SUCCESS: &str = "alert-success";
const ALERT_DANGER: &str = "alert-danger";

/// Controller wired to the real page.
pub type BrowserCheckout = CheckoutFlow<StripeGateway, HttpIntentBackend, DomView, TimeoutScheduler>;

/// [`CheckoutView`] over the live document.
pub struct DomView {
    window: Window,
    document: Document,
}

impl DomView {
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| CheckoutError::Js("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| CheckoutError::Js("no document".into()))?;
        Ok(Self { window, document })
    }

    pub fn element(&self, id: &str) -> Result<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| CheckoutError::MissingElement(id.to_string()))
    }

    fn input(&self, id: &str) -> Result<HtmlInputElement> {
        self.element(id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| CheckoutError::MissingElement(id.to_string()))
    }

    fn input_value(&self, id: &str) -> Result<String> {
        Ok(self.input(id)?.value())
    }

    /// Apply a rendering step, logging instead of failing when the page does
    /// not have the element.
    fn render(&self, id: &str, step: impl FnOnce(&Element) -> std::result::Result<(), JsValue>) {
        let outcome = self
            .element(id)
            .and_then(|element| step(&element).map_err(CheckoutError::from_js));
        if let Err(err) = outcome {
            log::warn!("could not update #{}: {}", id, err);
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        self.render(id, |element| {
            let classes = element.class_list();
            if hidden {
                classes.add_1(HIDDEN)
            } else {
                classes.remove_1(HIDDEN)
            }
        });
    }

    fn set_button_disabled(&self, disabled: bool) {
        self.render(ids::SUBMIT, |element| {
            match element.dyn_ref::<HtmlButtonElement>() {
                Some(button) => button.set_disabled(disabled),
                None if disabled => element.set_attribute("disabled", "")?,
                None => element.remove_attribute("disabled")?,
            }
            Ok(())
        });
    }
}

impl CheckoutView for DomView {
    fn form_inputs(&self) -> Result<FormInputs> {
        Ok(FormInputs {
            email: self.input_value(ids::EMAIL)?,
            course_name: self.input_value(ids::COURSE_NAME)?,
            course_id: self.input_value(ids::COURSE_ID)?,
            price: self.input_value(ids::PRICE)?,
            price_unformatted: self.input_value(ids::PRICE_UNFORMATTED)?,
        })
    }

    fn set_unformatted_price(&self, price: &str) -> Result<()> {
        self.input(ids::PRICE_UNFORMATTED)?.set_value(price);
        Ok(())
    }

    fn set_loading(&self, loading: bool) {
        self.set_button_disabled(loading);
        self.set_hidden(ids::SPINNER, !loading);
        self.set_hidden(ids::BUTTON_TEXT, loading);
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.set_button_disabled(!enabled);
    }

    fn set_button_label(&self, label: &str) {
        self.render(ids::BUTTON_TEXT, |element| {
            element.set_text_content(Some(label));
            Ok(())
        });
    }

    fn show_message(&self, message: &StatusMessage) {
        let style = if message.is_success {
            ALERT_SUCCESS
        } else {
            ALERT_DANGER
        };
        self.render(ids::PAYMENT_MESSAGE, |element| {
            let classes = element.class_list();
            classes.remove_3(HIDDEN, ALERT_SUCCESS, ALERT_DANGER)?;
            classes.add_2(ALERT, style)?;
            element.set_text_content(Some(&message.text));
            Ok(())
        });
    }

    fn clear_message(&self) {
        self.render(ids::PAYMENT_MESSAGE, |element| {
            let classes = element.class_list();
            classes.add_1(HIDDEN)?;
            classes.remove_3(ALERT, ALERT_SUCCESS, ALERT_DANGER)?;
            element.set_text_content(Some(""));
            Ok(())
        });
    }

    fn hide_form(&self) {
        self.set_hidden(ids::PAYMENT_FORM, true);
    }

    fn show_success_banner(&self) {
        self.set_hidden(ids::PAYMENT_MESSAGE_SUCCESS, false);
    }

    fn navigate(&self, url: &str) {
        if let Err(err) = self.window.location().set_href(url) {
            log::error!("navigation to {} failed: {:?}", url, err);
        }
    }

    fn query_string(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }
}

/// Build a controller for the current page from `config`.
///
/// Stripe.js must already be loaded.
pub fn build(config: CheckoutConfig) -> Result<BrowserCheckout> {
    let gateway = StripeGateway::new(&config)?;
    let backend = HttpIntentBackend::new(config.intent_endpoint.clone());
    let view = Rc::new(DomView::from_window()?);
    Ok(CheckoutFlow::new(config, gateway, backend, view, TimeoutScheduler))
}

/// Register the form listeners and run the returning-payment check once.
///
/// The listeners keep `flow` alive for the rest of the page's life.
pub fn attach(flow: Rc<BrowserCheckout>) -> Result<()> {
    let form = flow.view().element(ids::PAYMENT_FORM)?;
    let email = flow.view().element(ids::EMAIL)?;

    let on_submit = {
        let flow = Rc::clone(&flow);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let flow = Rc::clone(&flow);
            spawn_local(async move {
                if let Err(err) = flow.handle_submit().await {
                    log::warn!("checkout submit failed: {}", err);
                }
            });
        })
    };
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(CheckoutError::from_js)?;
    on_submit.forget();

    let on_email_input = {
        let flow = Rc::clone(&flow);
        Closure::<dyn FnMut(Event)>::new(move |_: Event| flow.handle_email_input())
    };
    email
        .add_event_listener_with_callback("input", on_email_input.as_ref().unchecked_ref())
        .map_err(CheckoutError::from_js)?;
    on_email_input.forget();

    spawn_local(async move {
        if let Err(err) = flow.check_status().await {
            log::warn!("payment status check failed: {}", err);
        }
    });

    log::info!("checkout form attached");
    Ok(())
}
