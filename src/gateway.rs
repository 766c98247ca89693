//! The payment provider as seen by the checkout controller.

use async_trait::async_trait;

use crate::error::StripeError;
use crate::status::PaymentStatus;

/// Hosted payment widget operations.
///
/// Implemented by [`StripeGateway`](crate::client::StripeGateway) in the
/// browser. Futures are `!Send`: everything runs on the UI thread.
#[async_trait(?Send)]
pub trait PaymentGateway {
    /// Mounted widget, needed to confirm the payment it collected.
    type Widget;

    /// Initialize the widget for `client_secret` and mount it into `selector`.
    async fn mount_widget(
        &self,
        client_secret: &str,
        selector: &str,
    ) -> Result<Self::Widget, StripeError>;

    /// Ask the provider to confirm the payment entered in `widget`.
    ///
    /// `Ok(())` means no error was reported and the provider is redirecting
    /// the customer to `return_url`.
    async fn confirm_payment(
        &self,
        widget: &Self::Widget,
        return_url: &str,
    ) -> Result<(), StripeError>;

    /// Current status of the PaymentIntent owning `client_secret`.
    async fn retrieve_status(&self, client_secret: &str) -> Result<PaymentStatus, StripeError>;
}
