//! Client for the backend endpoint that creates PaymentIntents.

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::error::{CheckoutError, Result};
use crate::session::{PaymentIntentRequest, PaymentIntentResponse};

#[async_trait(?Send)]
pub trait IntentBackend {
    /// Create a PaymentIntent for `request` and return its client secret.
    async fn create_payment_intent(&self, request: &PaymentIntentRequest) -> Result<String>;
}

/// `POST`s the request as JSON to a fixed endpoint.
#[derive(Clone, Debug)]
pub struct HttpIntentBackend {
    endpoint: String,
}

impl HttpIntentBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl IntentBackend for HttpIntentBackend {
    async fn create_payment_intent(&self, request: &PaymentIntentRequest) -> Result<String> {
        log::debug!("requesting payment intent from {}", self.endpoint);

        let response = Request::post(&self.endpoint).json(request)?.send().await?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CheckoutError::BackendStatus { status, body });
        }

        let body: PaymentIntentResponse = response.json().await?;
        Ok(body.client_secret)
    }
}
