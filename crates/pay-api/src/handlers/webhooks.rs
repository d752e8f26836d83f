//! Handlers for the server that learns payment results through webhooks.
//!
//! The browser asks for a payment intent up front, completes the payment
//! with Stripe.js, and the server is told about the outcome asynchronously.

use super::{gateway_error, payment_error_to_response, ApiError, ErrorResponse, JsonBody};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use pay_core::{OrderItem, PaymentIntentParams};
use pay_stripe::{dispatch_webhook_event, WebhookDisposition};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Body of `POST /create-payment-intent`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePaymentIntentRequest {
    pub currency: Option<String>,
    pub items: Option<Vec<OrderItem>>,
}

/// Response of `POST /create-payment-intent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub public_key: String,
    pub client_secret: String,
    pub id: String,
}

/// Acknowledgement for events without a dedicated handler
#[derive(Debug, Serialize)]
pub struct WebhookStatusResponse {
    pub status: &'static str,
}

/// Create a customer and a payment intent attached to it
#[instrument(skip(state, request))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreatePaymentIntentRequest>,
) -> Result<Json<CreatePaymentIntentResponse>, ApiError> {
    let items = request.items.unwrap_or_default();
    let currency = request.currency.unwrap_or_default();
    let amount = state.pricing.order_amount(&items);

    info!(
        "Creating payment intent: {} items, amount={}, currency={}",
        items.len(),
        amount,
        currency
    );

    let customer = state
        .gateway
        .create_customer()
        .await
        .map_err(gateway_error("create customer"))?;

    let params = PaymentIntentParams::new(amount, currency).with_customer(customer.id);
    let intent = state
        .gateway
        .create_payment_intent(&params)
        .await
        .map_err(gateway_error("create payment intent"))?;

    Ok(Json(CreatePaymentIntentResponse {
        public_key: state.publishable_key.clone(),
        client_secret: intent.client_secret_or_empty(),
        id: intent.id,
    }))
}

/// Handle Stripe webhook
#[instrument(skip(state, headers, body))]
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    // Get signature header
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            error!("Webhook without Stripe-Signature header");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Missing Stripe-Signature header", 400)),
            )
        })?;

    // Verify and parse webhook
    let event = state
        .gateway
        .verify_webhook(&body, signature)
        .await
        .map_err(|e| {
            error!("Webhook verification failed: {}", e);
            payment_error_to_response(e)
        })?;

    info!(
        provider = %event.provider,
        livemode = event.livemode,
        "Received webhook: type={}, id={}",
        event.event_type.as_tag(),
        event.event_id
    );

    let disposition =
        dispatch_webhook_event(state.webhook_handler.as_ref(), event).map_err(|e| {
            error!("Webhook handler error: {}", e);
            payment_error_to_response(e)
        })?;

    Ok(match disposition {
        WebhookDisposition::Handled => StatusCode::OK.into_response(),
        WebhookDisposition::Unhandled => {
            Json(WebhookStatusResponse { status: "success" }).into_response()
        }
    })
}
