//! What the checkout controller needs from the page.

use crate::error::Result;
use crate::session::FormInputs;
use crate::status::StatusMessage;

/// Rendering surface of the checkout form.
///
/// Reads are fallible because they need the form fields; the rendering calls
/// are best-effort and never abort a payment step.
pub trait CheckoutView {
    fn form_inputs(&self) -> Result<FormInputs>;

    /// Write the normalized price back into the form.
    fn set_unformatted_price(&self, price: &str) -> Result<()>;

    /// Spinner on, label hidden and submit disabled while `loading`.
    fn set_loading(&self, loading: bool);

    fn set_submit_enabled(&self, enabled: bool);

    fn set_button_label(&self, label: &str);

    fn show_message(&self, message: &StatusMessage);

    fn clear_message(&self);

    fn hide_form(&self);

    fn show_success_banner(&self);

    fn navigate(&self, url: &str);

    /// Raw query string of the current location, with or without the leading `?`.
    fn query_string(&self) -> String;
}
