//! PaymentIntent status and the messages shown for it.

use std::fmt;

pub const PROCESSING_MESSAGE: &str = "Your payment is processing.";
pub const RETRY_MESSAGE: &str = "Your payment was not successful, please try again.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Status of a PaymentIntent as reported by Stripe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentStatus {
    Succeeded,
    Processing,
    RequiresPaymentMethod,
    /// Any other status string (`canceled`, `requires_action`, …).
    Other(String),
}

impl From<&str> for PaymentStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "succeeded" => PaymentStatus::Succeeded,
            "processing" => PaymentStatus::Processing,
            "requires_payment_method" => PaymentStatus::RequiresPaymentMethod,
            other => PaymentStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Succeeded => f.write_str("succeeded"),
            PaymentStatus::Processing => f.write_str("processing"),
            PaymentStatus::RequiresPaymentMethod => f.write_str("requires_payment_method"),
            PaymentStatus::Other(raw) => f.write_str(raw),
        }
    }
}

/// Transient banner text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_success: bool,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_success: true,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_success: false,
        }
    }
}

/// What the page does for a returning PaymentIntent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusOutcome {
    /// Hide the form, show the success banner, then leave the page.
    Redirect,
    Message(StatusMessage),
}

impl PaymentStatus {
    pub fn outcome(&self) -> StatusOutcome {
        match self {
            PaymentStatus::Succeeded => StatusOutcome::Redirect,
            PaymentStatus::Processing => {
                StatusOutcome::Message(StatusMessage::success(PROCESSING_MESSAGE))
            }
            PaymentStatus::RequiresPaymentMethod => {
                StatusOutcome::Message(StatusMessage::failure(RETRY_MESSAGE))
            }
            PaymentStatus::Other(_) => {
                StatusOutcome::Message(StatusMessage::failure(GENERIC_FAILURE_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("succeeded", PaymentStatus::Succeeded)]
    #[case("processing", PaymentStatus::Processing)]
    #[case("requires_payment_method", PaymentStatus::RequiresPaymentMethod)]
    #[case("canceled", PaymentStatus::Other("canceled".into()))]
    #[case("", PaymentStatus::Other(String::new()))]
    fn test_parse_and_display(#[case] raw: &str, #[case] expected: PaymentStatus) {
        let status = PaymentStatus::from(raw);
        assert_eq!(status, expected);
        assert_eq!(status.to_string(), raw);
    }

    #[rstest]
    #[case(PaymentStatus::Processing, PROCESSING_MESSAGE, true)]
    #[case(PaymentStatus::RequiresPaymentMethod, RETRY_MESSAGE, false)]
    #[case(PaymentStatus::Other("requires_action".into()), GENERIC_FAILURE_MESSAGE, false)]
    fn test_message_outcomes(
        #[case] status: PaymentStatus,
        #[case] text: &str,
        #[case] is_success: bool,
    ) {
        assert_eq!(
            status.outcome(),
            StatusOutcome::Message(StatusMessage {
                text: text.into(),
                is_success,
            })
        );
    }

    #[rstest]
    fn test_succeeded_redirects() {
        assert_eq!(PaymentStatus::Succeeded.outcome(), StatusOutcome::Redirect);
    }
}
