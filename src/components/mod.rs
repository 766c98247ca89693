use std::rc::Rc;

use yew::prelude::*;

use crate::config::CheckoutConfig;
use crate::dom::{attach, build, ids};
use crate::flow::CHECK_LABEL;
use crate::interop::use_stripejs;
use crate::logging;

/// A labelled, uncontrolled form input.
///
/// The checkout controller reads and writes the value through the DOM, so
/// Yew only renders the initial value.
#[derive(Properties, PartialEq)]
pub struct FieldProps {
    /// Element id, also used for the label's `for`
    pub id: AttrValue,
    /// Label text; no label is rendered when empty
    #[prop_or_default]
    pub label: AttrValue,
    /// Input type
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    /// Initial value
    #[prop_or_default]
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub readonly: bool,
}

#[function_component(Field)]
pub fn field(props: &FieldProps) -> Html {
    html! {
        <>
            if !props.label.is_empty() {
                <label for={props.id.clone()} class="form-label">{ props.label.to_string() }</label>
            }
            <input
                id={props.id.clone()}
                name={props.id.clone()}
                type={props.input_type.clone()}
                class="form-control"
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                readonly={props.readonly}
            />
        </>
    }
}

/// Properties for the [`CheckoutForm`] component.
///
/// # Fields
///
/// * `config` – Publishable key, endpoints and timings.
/// * `course_name` / `course_id` – Sent to the backend with the email.
/// * `price` – Displayed price, e.g. `"$1,234.56"`.
/// * `success_text` – Banner shown once the payment succeeded.
/// * `children` – Extra Yew nodes (e.g. course summary) rendered above the fields.
#[derive(Properties, PartialEq, Clone)]
pub struct CheckoutFormProps {
    pub config: CheckoutConfig,
    pub course_name: AttrValue,
    pub course_id: AttrValue,
    pub price: AttrValue,
    #[prop_or(AttrValue::Static("Payment succeeded! Redirecting…"))]
    pub success_text: AttrValue,
    #[prop_or_default]
    pub children: Children,
}

/// Course checkout form.
///
/// Renders the markup the checkout controller expects, installs the console
/// logger at `config.log_level`, loads Stripe.js and, once it is ready, attaches a [`BrowserCheckout`](crate::dom::BrowserCheckout)
/// to the rendered form. From then on the controller owns the form's
/// dynamic state (button label, spinner, banners); Yew never re-renders it.
///
/// The form is `novalidate`: email format errors are the controller's to
/// handle, not the browser's.
///
/// # Example
///
/// ```rust,ignore
/// use yew::prelude::*;
/// use course_checkout::{CheckoutConfig, CheckoutForm};
///
/// #[function_component(App)]
/// fn app() -> Html {
///     html! {
///         <CheckoutForm
///             config={CheckoutConfig::with_publishable_key("pk_test_123")}
///             course_name="Rust for Web"
///             course_id="42"
///             price="$1,234.56"
///         >
///             <h2>{ "Rust for Web" }</h2>
///         </CheckoutForm>
///     }
/// }
/// ```
#[function_component(CheckoutForm)]
pub fn checkout_form(props: &CheckoutFormProps) -> Html {
    let stripe_ready = use_stripejs();
    let attached = use_mut_ref(|| false);

    {
        let level = props.config.log_level_filter();
        use_effect_with((), move |_| {
            logging::init(level);
            || ()
        });
    }

    {
        let config = props.config.clone();
        use_effect_with(stripe_ready, move |ready| {
            if *ready && !*attached.borrow() {
                match build(config).and_then(|flow| attach(Rc::new(flow))) {
                    Ok(()) => *attached.borrow_mut() = true,
                    Err(err) => log::error!("checkout form could not start: {}", err),
                }
            }
            || ()
        });
    }

    html! {
        <>
            <form id={ids::PAYMENT_FORM} class="checkout-form" novalidate={true}>
                { for props.children.iter() }
                <Field id={ids::EMAIL} label="Email" input_type="email" placeholder="you@example.com" />
                <Field id={ids::COURSE_NAME} input_type="hidden" value={props.course_name.clone()} />
                <Field id={ids::COURSE_ID} input_type="hidden" value={props.course_id.clone()} />
                <Field id={ids::PRICE} label="Price" value={props.price.clone()} readonly={true} />
                <Field id={ids::PRICE_UNFORMATTED} input_type="hidden" />
                <div id={ids::PAYMENT_ELEMENT} class="mb-3"></div>
                <button id={ids::SUBMIT} type="submit" class="btn btn-primary w-100">
                    <div id={ids::SPINNER} class="spinner hidden"></div>
                    <span id={ids::BUTTON_TEXT}>{ CHECK_LABEL }</span>
                </button>
                <div id={ids::PAYMENT_MESSAGE} class="hidden" role="alert"></div>
            </form>
            <div id={ids::PAYMENT_MESSAGE_SUCCESS} class="alert alert-success hidden" role="status">
                { props.success_text.to_string() }
            </div>
        </>
    }
}
