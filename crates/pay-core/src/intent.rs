//! # Payment Intents
//!
//! Provider-owned objects this service creates, confirms and projects into
//! HTTP responses. Nothing here is persisted locally.

use serde::{Deserialize, Serialize};

/// Message returned to the browser when the card needs to be replaced.
pub const CARD_DENIED_MESSAGE: &str = "Your card was denied, please provide a new payment method";

/// Lifecycle status of a payment intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    /// Pre-2019 API versions
    RequiresSource,
    /// Pre-2019 API versions
    RequiresSourceAction,
    #[serde(other)]
    Unknown,
}

impl PaymentIntentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentIntentStatus::RequiresPaymentMethod => "requires_payment_method",
            PaymentIntentStatus::RequiresConfirmation => "requires_confirmation",
            PaymentIntentStatus::RequiresAction => "requires_action",
            PaymentIntentStatus::Processing => "processing",
            PaymentIntentStatus::RequiresCapture => "requires_capture",
            PaymentIntentStatus::Canceled => "canceled",
            PaymentIntentStatus::Succeeded => "succeeded",
            PaymentIntentStatus::RequiresSource => "requires_source",
            PaymentIntentStatus::RequiresSourceAction => "requires_source_action",
            PaymentIntentStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PaymentIntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a saved payment method may be reused later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupFutureUsage {
    /// Charged while the customer is present in the checkout flow
    OnSession,
    /// Charged while the customer is away
    OffSession,
    /// Any usage this crate does not model
    #[serde(other)]
    Unknown,
}

impl SetupFutureUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetupFutureUsage::OnSession => "on_session",
            SetupFutureUsage::OffSession => "off_session",
            SetupFutureUsage::Unknown => "unknown",
        }
    }
}

/// Who confirms the payment intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationMethod {
    #[default]
    Automatic,
    /// The server confirms explicitly (follow-up `/pay` calls)
    Manual,
    /// Newer methods such as `automatic_async`
    #[serde(other)]
    Unknown,
}

impl ConfirmationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationMethod::Automatic => "automatic",
            ConfirmationMethod::Manual => "manual",
            ConfirmationMethod::Unknown => "unknown",
        }
    }
}

/// Projection of a provider payment intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,

    pub status: PaymentIntentStatus,

    /// Handed to the browser so Stripe.js can finish the payment
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Smallest currency unit
    #[serde(default)]
    pub amount: i64,

    #[serde(default)]
    pub currency: String,

    #[serde(default)]
    pub customer: Option<String>,

    #[serde(default)]
    pub payment_method: Option<String>,

    #[serde(default)]
    pub setup_future_usage: Option<SetupFutureUsage>,

    #[serde(default)]
    pub confirmation_method: Option<ConfirmationMethod>,
}

impl PaymentIntent {
    /// Client secret, or empty when the provider did not return one
    pub fn client_secret_or_empty(&self) -> String {
        self.client_secret.clone().unwrap_or_default()
    }

    /// Whether the customer asked to keep the card for later payments
    pub fn saves_payment_method(&self) -> bool {
        self.setup_future_usage.is_some()
    }
}

/// Provider-side customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
}

/// Parameters for creating a payment intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentParams {
    pub amount: i64,
    pub currency: String,
    pub customer: Option<String>,
    pub payment_method: Option<String>,
    pub confirmation_method: Option<ConfirmationMethod>,
    /// Confirm in the same request as creation
    pub confirm: bool,
    pub setup_future_usage: Option<SetupFutureUsage>,
}

impl PaymentIntentParams {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            customer: None,
            payment_method: None,
            confirmation_method: None,
            confirm: false,
            setup_future_usage: None,
        }
    }

    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer = Some(customer_id.into());
        self
    }

    pub fn with_payment_method(mut self, payment_method_id: impl Into<String>) -> Self {
        self.payment_method = Some(payment_method_id.into());
        self
    }

    /// Manual confirmation, confirmed immediately on creation
    pub fn confirm_manually(mut self) -> Self {
        self.confirmation_method = Some(ConfirmationMethod::Manual);
        self.confirm = true;
        self
    }

    pub fn with_setup_future_usage(mut self, usage: SetupFutureUsage) -> Self {
        self.setup_future_usage = Some(usage);
        self
    }
}

/// What the browser should do next for a payment intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Card requires authentication (3D Secure); the client handles it and
    /// calls back with the intent id
    RequiresAction {
        payment_intent_id: String,
        client_secret: String,
    },
    /// Card was not authenticated; a new payment method is needed
    Denied,
    /// Payment complete
    Succeeded { client_secret: String },
    /// Any other status; nothing for the client to do
    Pending(PaymentIntentStatus),
}

impl PaymentOutcome {
    pub fn from_intent(intent: &PaymentIntent) -> Self {
        match intent.status {
            PaymentIntentStatus::RequiresAction | PaymentIntentStatus::RequiresSourceAction => {
                PaymentOutcome::RequiresAction {
                    payment_intent_id: intent.id.clone(),
                    client_secret: intent.client_secret_or_empty(),
                }
            }
            PaymentIntentStatus::RequiresPaymentMethod | PaymentIntentStatus::RequiresSource => {
                PaymentOutcome::Denied
            }
            PaymentIntentStatus::Succeeded => PaymentOutcome::Succeeded {
                client_secret: intent.client_secret_or_empty(),
            },
            other => PaymentOutcome::Pending(other),
        }
    }
}
