//! Form inputs, the checkout session built from them, and the payloads
//! exchanged with the payment-intent endpoint.

use serde::{Deserialize, Serialize};

/// Values read from the checkout form on submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub email: String,
    pub course_name: String,
    pub course_id: String,
    /// Price as displayed to the customer, e.g. `"$1,234.56"`.
    pub price: String,
    /// Plain decimal price sent to the backend, e.g. `"1234.56"`.
    pub price_unformatted: String,
}

/// Body of `POST /create-payment-intent`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    pub email: String,
    pub course_name: String,
    pub course_id: String,
    pub price: String,
}

impl From<&FormInputs> for PaymentIntentRequest {
    fn from(inputs: &FormInputs) -> Self {
        Self {
            email: inputs.email.clone(),
            course_name: inputs.course_name.clone(),
            course_id: inputs.course_id.clone(),
            price: inputs.price_unformatted.clone(),
        }
    }
}

/// Answer of the payment-intent endpoint.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PaymentIntentResponse {
    #[serde(rename = "clientSecret", alias = "client_secret")]
    pub client_secret: String,
}

/// One purchase attempt, alive from a successful email check until the page
/// navigates away.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutSession {
    pub email: String,
    pub course_name: String,
    pub course_id: String,
    pub price: String,
    /// PaymentIntent client secret issued by the backend.
    pub client_secret: String,
}

impl CheckoutSession {
    pub fn new(request: PaymentIntentRequest, client_secret: String) -> Self {
        Self {
            email: request.email,
            course_name: request.course_name,
            course_id: request.course_id,
            price: request.price,
            client_secret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_request_uses_unformatted_price() {
        let inputs = FormInputs {
            email: "student@example.com".into(),
            course_name: "Rust for Web".into(),
            course_id: "42".into(),
            price: "$1,234.56".into(),
            price_unformatted: "1234.56".into(),
        };
        let body = serde_json::to_value(PaymentIntentRequest::from(&inputs)).unwrap();
        assert_eq!(
            body,
            json!({
                "email": "student@example.com",
                "course_name": "Rust for Web",
                "course_id": "42",
                "price": "1234.56",
            })
        );
    }

    #[rstest]
    #[case(r#"{"clientSecret":"pi_1_secret_2"}"#)]
    #[case(r#"{"client_secret":"pi_1_secret_2"}"#)]
    fn test_response_accepts_both_spellings(#[case] raw: &str) {
        let response: PaymentIntentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.client_secret, "pi_1_secret_2");
    }

    #[rstest]
    fn test_response_without_secret_is_rejected() {
        assert!(serde_json::from_str::<PaymentIntentResponse>(r#"{"error":"Invalid amount"}"#).is_err());
    }
}
