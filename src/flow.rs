//! The checkout controller.
//!
//! A form goes through two submits. The first checks the email, asks the
//! backend for a PaymentIntent and mounts the payment widget; the second
//! confirms the payment through that widget. On page load the controller also
//! looks for a PaymentIntent the customer was redirected back with and
//! reports its status.
//!
//! The controller only talks to its four seams ([`PaymentGateway`],
//! [`IntentBackend`], [`CheckoutView`], [`Scheduler`]), so the whole flow runs
//! natively under test.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::IntentBackend;
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};
use crate::format::{normalize_price, validate_email_format};
use crate::gateway::PaymentGateway;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::session::{CheckoutSession, FormInputs, PaymentIntentRequest};
use crate::status::{
    PaymentStatus, StatusMessage, StatusOutcome, GENERIC_FAILURE_MESSAGE,
    UNEXPECTED_ERROR_MESSAGE,
};
use crate::view::CheckoutView;

/// Submit button label while the email has not been checked yet.
pub const CHECK_LABEL: &str = "Check";
/// Submit button label once the payment widget is mounted.
pub const PAY_LABEL: &str = "Pay Now";

/// Which submit the form is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckoutPhase {
    AwaitingValidation,
    AwaitingConfirmation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Loading,
}

/// Phase plus the data only that phase owns. The widget handle cannot be
/// reached before a session exists.
enum Stage<W> {
    AwaitingValidation,
    AwaitingConfirmation {
        session: CheckoutSession,
        widget: Rc<W>,
    },
}

struct FlowState<W, H> {
    stage: Stage<W>,
    ui: UiState,
    message_timer: Option<H>,
    redirect_timer: Option<H>,
}

/// Controller bound to one checkout form.
pub struct CheckoutFlow<G, B, V, S>
where
    G: PaymentGateway,
    S: Scheduler,
{
    config: CheckoutConfig,
    gateway: G,
    backend: B,
    view: Rc<V>,
    scheduler: S,
    state: RefCell<FlowState<G::Widget, S::Handle>>,
}

impl<G, B, V, S> CheckoutFlow<G, B, V, S>
where
    G: PaymentGateway,
    B: IntentBackend,
    V: CheckoutView + 'static,
    S: Scheduler,
{
    pub fn new(config: CheckoutConfig, gateway: G, backend: B, view: Rc<V>, scheduler: S) -> Self {
        Self {
            config,
            gateway,
            backend,
            view,
            scheduler,
            state: RefCell::new(FlowState {
                stage: Stage::AwaitingValidation,
                ui: UiState::Idle,
                message_timer: None,
                redirect_timer: None,
            }),
        }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    pub fn view(&self) -> &Rc<V> {
        &self.view
    }

    pub fn phase(&self) -> CheckoutPhase {
        match self.state.borrow().stage {
            Stage::AwaitingValidation => CheckoutPhase::AwaitingValidation,
            Stage::AwaitingConfirmation { .. } => CheckoutPhase::AwaitingConfirmation,
        }
    }

    pub fn ui_state(&self) -> UiState {
        self.state.borrow().ui
    }

    /// Session opened by the first submit, if any.
    pub fn session(&self) -> Option<CheckoutSession> {
        match &self.state.borrow().stage {
            Stage::AwaitingValidation => None,
            Stage::AwaitingConfirmation { session, .. } => Some(session.clone()),
        }
    }

    /// Form submit handler. The caller has already prevented the browser's
    /// own submission.
    ///
    /// Does nothing while a previous step is still loading.
    pub async fn handle_submit(&self) -> Result<()> {
        if self.ui_state() == UiState::Loading {
            log::debug!("submit ignored while loading");
            return Ok(());
        }

        let mut inputs = self.view.form_inputs()?;
        inputs.price_unformatted = normalize_price(&inputs.price);
        self.view.set_unformatted_price(&inputs.price_unformatted)?;

        let widget = match &self.state.borrow().stage {
            Stage::AwaitingValidation => None,
            Stage::AwaitingConfirmation { widget, .. } => Some(Rc::clone(widget)),
        };

        match widget {
            None => self.validate_email(&inputs).await.map(|_| ()),
            Some(widget) => self.confirm(&widget).await,
        }
    }

    /// First submit: check the email, open a PaymentIntent and mount the
    /// payment widget.
    ///
    /// An invalid email disables the submit button and never reaches the
    /// network. Any later failure leaves the form in the validation phase so
    /// the customer can try again.
    pub async fn validate_email(&self, inputs: &FormInputs) -> Result<CheckoutSession> {
        if !validate_email_format(&inputs.email) {
            log::debug!("email rejected, submit disabled");
            self.view.set_submit_enabled(false);
            return Err(CheckoutError::InvalidEmail);
        }

        self.set_loading(true);
        let opened = self.open_session(inputs).await;
        self.set_loading(false);

        match opened {
            Ok((session, widget)) => {
                log::info!("checkout session opened for course {}", session.course_id);
                self.state.borrow_mut().stage = Stage::AwaitingConfirmation {
                    session: session.clone(),
                    widget: Rc::new(widget),
                };
                self.view.set_button_label(PAY_LABEL);
                self.view.set_submit_enabled(true);
                Ok(session)
            }
            Err(err) => {
                log::error!("could not open checkout session: {}", err);
                self.show_message(StatusMessage::failure(UNEXPECTED_ERROR_MESSAGE));
                Err(err)
            }
        }
    }

    /// The customer edited the email: a previously rejected address no
    /// longer blocks the form.
    pub fn handle_email_input(&self) {
        if self.phase() == CheckoutPhase::AwaitingValidation && self.ui_state() == UiState::Idle {
            self.view.set_submit_enabled(true);
        }
    }

    async fn open_session(&self, inputs: &FormInputs) -> Result<(CheckoutSession, G::Widget)> {
        let request = PaymentIntentRequest::from(inputs);
        let client_secret = self.backend.create_payment_intent(&request).await?;
        let widget = self
            .gateway
            .mount_widget(&client_secret, &self.config.mount_selector)
            .await?;
        Ok((CheckoutSession::new(request, client_secret), widget))
    }

    /// Second submit: confirm through the mounted widget.
    async fn confirm(&self, widget: &G::Widget) -> Result<()> {
        self.set_loading(true);
        let confirmed = self
            .gateway
            .confirm_payment(widget, &self.config.return_url)
            .await;

        let result = match confirmed {
            Ok(()) => {
                log::info!("payment confirmation accepted, redirecting");
                Ok(())
            }
            Err(err) => {
                log::warn!(
                    "payment confirmation failed ({}): {}",
                    err.error_type.as_deref().unwrap_or("unknown"),
                    err.message
                );
                let text = if err.is_user_facing() && !err.message.is_empty() {
                    err.message.clone()
                } else {
                    UNEXPECTED_ERROR_MESSAGE.to_string()
                };
                self.show_message(StatusMessage::failure(text));
                Err(CheckoutError::Stripe(err))
            }
        };

        self.set_loading(false);
        result
    }

    /// Page-load check for a PaymentIntent the customer was sent back with.
    ///
    /// Returns `Ok(None)` when the URL carries no client secret.
    pub async fn check_status(&self) -> Result<Option<PaymentStatus>> {
        let query = self.view.query_string();
        let Some(client_secret) = query_param(&query, &self.config.client_secret_param) else {
            return Ok(None);
        };

        let status = match self.gateway.retrieve_status(&client_secret).await {
            Ok(status) => status,
            Err(err) => {
                log::error!("could not retrieve payment intent: {}", err);
                self.show_message(StatusMessage::failure(GENERIC_FAILURE_MESSAGE));
                return Err(CheckoutError::Stripe(err));
            }
        };
        log::info!("returning payment status: {}", status);

        match status.outcome() {
            StatusOutcome::Redirect => {
                self.view.hide_form();
                self.view.show_success_banner();
                let view = Rc::clone(&self.view);
                let url = self.config.redirect_url.clone();
                let handle = self.scheduler.schedule(
                    self.config.redirect_delay_ms,
                    Box::new(move || view.navigate(&url)),
                );
                let previous = self.state.borrow_mut().redirect_timer.replace(handle);
                if let Some(previous) = previous {
                    previous.cancel();
                }
            }
            StatusOutcome::Message(message) => self.show_message(message),
        }

        Ok(Some(status))
    }

    /// Show a banner and clear it after the configured timeout.
    ///
    /// A newer message cancels the pending clear of the one it replaces.
    pub fn show_message(&self, message: StatusMessage) {
        self.view.show_message(&message);

        let view = Rc::clone(&self.view);
        let handle = self
            .scheduler
            .schedule(self.config.message_timeout_ms, Box::new(move || view.clear_message()));

        let previous = self.state.borrow_mut().message_timer.replace(handle);
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.borrow_mut().ui = if loading {
            UiState::Loading
        } else {
            UiState::Idle
        };
        self.view.set_loading(loading);
    }
}

/// Non-empty value of `name` in a query string.
fn query_param(query: &str, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
