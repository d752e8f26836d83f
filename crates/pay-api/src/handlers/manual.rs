//! Handlers for the server that confirms payments synchronously.
//!
//! The browser creates a PaymentMethod with Stripe.js and posts its id to
//! `/pay`. The intent is created with manual confirmation; when the card
//! needs 3D Secure the browser authenticates and calls `/pay` again with
//! the intent id so the server can confirm it.

use super::{gateway_error, ApiError, JsonBody};
use crate::state::AppState;
use axum::{extract::State, Json};
use pay_core::{OrderItem, PaymentIntentParams, PaymentOutcome, SetupFutureUsage, CARD_DENIED_MESSAGE};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Response of `GET /stripe-key`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeKeyResponse {
    pub public_key: String,
}

/// Body of `POST /pay`. Missing and `null` fields read as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PayRequest {
    pub currency: Option<String>,
    pub is_saving_card: Option<bool>,
    pub items: Option<Vec<OrderItem>>,
    pub payment_method_id: Option<String>,
    /// Only present on follow-up calls, after client-side authentication
    pub payment_intent_id: Option<String>,
}

impl PayRequest {
    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or_default()
    }

    pub fn is_saving_card(&self) -> bool {
        self.is_saving_card.unwrap_or(false)
    }

    pub fn items(&self) -> &[OrderItem] {
        self.items.as_deref().unwrap_or_default()
    }

    pub fn payment_method_id(&self) -> Option<&str> {
        self.payment_method_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn payment_intent_id(&self) -> Option<&str> {
        self.payment_intent_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Response of `POST /pay`. Every field is always present.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayResponse {
    pub requires_action: bool,
    pub payment_intent_id: String,
    pub client_secret: String,
    pub error: String,
}

impl From<PaymentOutcome> for PayResponse {
    fn from(outcome: PaymentOutcome) -> Self {
        match outcome {
            PaymentOutcome::RequiresAction {
                payment_intent_id,
                client_secret,
            } => PayResponse {
                requires_action: true,
                payment_intent_id,
                client_secret,
                ..Default::default()
            },
            PaymentOutcome::Denied => PayResponse {
                error: CARD_DENIED_MESSAGE.to_string(),
                ..Default::default()
            },
            PaymentOutcome::Succeeded { client_secret } => PayResponse {
                client_secret,
                ..Default::default()
            },
            PaymentOutcome::Pending(_) => PayResponse::default(),
        }
    }
}

/// Publishable key for Stripe.js
pub async fn stripe_key(State(state): State<AppState>) -> Json<StripeKeyResponse> {
    Json(StripeKeyResponse {
        public_key: state.publishable_key.clone(),
    })
}

/// Create-and-confirm a payment intent, or confirm an existing one
#[instrument(skip(state, request), fields(saving_card = request.is_saving_card()))]
pub async fn pay(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<PayRequest>,
) -> Result<Json<PayResponse>, ApiError> {
    let intent = match request.payment_intent_id() {
        // Follow-up call after authentication: confirm and report
        Some(payment_intent_id) => state
            .gateway
            .confirm_payment_intent(payment_intent_id)
            .await
            .map_err(gateway_error("confirm payment intent"))?,
        None => {
            let amount = state.pricing.order_amount(request.items());
            let mut params = PaymentIntentParams::new(amount, request.currency()).confirm_manually();

            if let Some(payment_method_id) = request.payment_method_id() {
                params = params.with_payment_method(payment_method_id);
            }

            if request.is_saving_card() {
                // The card is saved against a new customer for off-session reuse
                let customer = state
                    .gateway
                    .create_customer()
                    .await
                    .map_err(gateway_error("create customer"))?;
                params = params
                    .with_customer(customer.id)
                    .with_setup_future_usage(SetupFutureUsage::OffSession);
            }

            state
                .gateway
                .create_payment_intent(&params)
                .await
                .map_err(gateway_error("create payment intent"))?
        }
    };

    info!("Payment intent {} is {}", intent.id, intent.status);

    let outcome = PaymentOutcome::from_intent(&intent);
    if matches!(outcome, PaymentOutcome::Succeeded { .. }) {
        info!("💰 Payment received!");
    }

    Ok(Json(PayResponse::from(outcome)))
}
