//! Browser tests for the `CheckoutForm` component.
//!
//! **Run with**: `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use course_checkout::dom::ids;
use course_checkout::{CheckoutConfig, CheckoutForm, CheckoutFormProps};
use gloo_timers::future::TimeoutFuture;
use log::LevelFilter;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlFormElement, HtmlInputElement};
use yew::prelude::Children;
use yew::{AppHandle, Renderer};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

async fn render_form(log_level: &str) -> AppHandle<CheckoutForm> {
    let root = document().create_element("div").unwrap();
    document().body().unwrap().append_child(&root).unwrap();

    let config = CheckoutConfig {
        log_level: log_level.into(),
        ..CheckoutConfig::with_publishable_key("pk_test_123")
    };
    let props = CheckoutFormProps {
        config,
        course_name: "Rust for Web".into(),
        course_id: "42".into(),
        price: "$1,234.56".into(),
        success_text: "Paid".into(),
        children: Children::default(),
    };
    let app = Renderer::<CheckoutForm>::with_root_and_props(root, props).render();

    // Let the scheduler run the render and its effects.
    TimeoutFuture::new(10).await;
    app
}

#[wasm_bindgen_test]
async fn test_form_installs_console_logger_at_configured_level() {
    let _app = render_form("debug").await;

    assert_eq!(log::max_level(), LevelFilter::Debug);
}

#[wasm_bindgen_test]
async fn test_malformed_email_still_reaches_submit_listener() {
    let _app = render_form("info").await;

    let form: HtmlFormElement = document()
        .get_element_by_id(ids::PAYMENT_FORM)
        .unwrap()
        .dyn_into()
        .unwrap();
    assert!(form.has_attribute("novalidate"));

    let email: HtmlInputElement = document()
        .get_element_by_id(ids::EMAIL)
        .unwrap()
        .dyn_into()
        .unwrap();
    assert_eq!(email.type_(), "email");
    email.set_value("nope");

    let submitted = Rc::new(Cell::new(false));
    let on_submit = {
        let submitted = Rc::clone(&submitted);
        Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            submitted.set(true);
        }) as Box<dyn FnMut(Event)>)
    };
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .unwrap();

    form.request_submit().unwrap();

    assert!(submitted.get());
}
