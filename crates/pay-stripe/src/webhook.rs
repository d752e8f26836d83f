//! # Stripe Webhook Handling
//!
//! Signature verification and event dispatch for Stripe webhooks.
//!
//! Stripe signs every delivery with a `Stripe-Signature` header of the form
//! `t=<unix seconds>,v1=<hex hmac>[,v1=...]`. The HMAC-SHA256 is computed
//! over `"<t>.<raw body>"` keyed by the endpoint's signing secret.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use pay_core::{PaymentError, PaymentIntent, PaymentResult, WebhookEvent, WebhookEventType};
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, error, info};

type HmacSha256 = Hmac<Sha256>;

/// Verify a webhook delivery and parse its envelope.
///
/// Fails with `WebhookVerificationFailed` when the header is malformed, the
/// timestamp is outside `tolerance_secs`, or no `v1` signature matches, and
/// with `WebhookParseError` when the verified body is not an event.
pub fn construct_event(
    payload: &[u8],
    signature_header: &str,
    secret: &str,
    tolerance_secs: i64,
) -> PaymentResult<WebhookEvent> {
    let sig_parts = parse_signature_header(signature_header)?;

    let now = Utc::now().timestamp();
    if (now - sig_parts.timestamp).abs() > tolerance_secs {
        return Err(PaymentError::WebhookVerificationFailed(
            "Timestamp outside tolerance".to_string(),
        ));
    }

    let mac = signing_mac(secret, sig_parts.timestamp, payload)?;

    let valid = sig_parts
        .signatures
        .iter()
        .any(|sig| signature_matches(mac.clone(), sig));

    if !valid {
        return Err(PaymentError::WebhookVerificationFailed(
            "No signatures found matching the expected signature for payload".to_string(),
        ));
    }

    let event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
        PaymentError::WebhookParseError(format!("Failed to parse webhook: {}", e))
    })?;

    debug!("Verified Stripe webhook: type={}", event.event_type);

    Ok(WebhookEvent {
        event_id: event.id,
        event_type: WebhookEventType::from_tag(&event.event_type),
        provider: "stripe".to_string(),
        api_version: event.api_version,
        livemode: event.livemode,
        raw_data: event.data.object,
        timestamp: DateTime::from_timestamp(event.created, 0).unwrap_or_else(Utc::now),
    })
}

/// Build a valid `Stripe-Signature` header for `payload`.
///
/// Used by tests and local tooling to produce deliveries the verifier accepts.
pub fn generate_test_header(payload: &[u8], secret: &str, timestamp: i64) -> PaymentResult<String> {
    let signature = compute_signature(secret, timestamp, payload)?;
    Ok(format!("t={},v1={}", timestamp, signature))
}

#[derive(Debug, Deserialize)]
struct StripeWebhookEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    created: i64,
    #[serde(default)]
    livemode: bool,
    #[serde(default)]
    api_version: Option<String>,
    data: StripeEventData,
}

#[derive(Debug, Deserialize)]
struct StripeEventData {
    object: serde_json::Value,
}

// =============================================================================
// Signature Verification
// =============================================================================

#[derive(Debug)]
struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

fn parse_signature_header(header: &str) -> PaymentResult<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse().ok(),
            "v1" => signatures.push(value.to_string()),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        PaymentError::WebhookVerificationFailed("Missing timestamp in signature".to_string())
    })?;

    if signatures.is_empty() {
        return Err(PaymentError::WebhookVerificationFailed(
            "No v1 signature found".to_string(),
        ));
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

fn signing_mac(secret: &str, timestamp: i64, payload: &[u8]) -> PaymentResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PaymentError::Configuration(format!("Invalid webhook secret: {}", e)))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac)
}

fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> PaymentResult<String> {
    let mac = signing_mac(secret, timestamp, payload)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of one hex `v1` entry
fn signature_matches(mac: HmacSha256, signature: &str) -> bool {
    match hex::decode(signature) {
        Ok(bytes) => mac.verify_slice(&bytes).is_ok(),
        Err(_) => false,
    }
}

// =============================================================================
// Event Dispatch
// =============================================================================

/// Whether an event type had a dedicated handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookDisposition {
    Handled,
    Unhandled,
}

/// Webhook event handler trait
///
/// Implement this trait to react to verified events. Every method has a
/// logging default.
#[allow(unused_variables)]
pub trait WebhookHandler: Send + Sync {
    /// A payment method was attached to a customer (card saved)
    fn on_payment_method_attached(&self, event: &WebhookEvent) -> PaymentResult<()> {
        info!("❗ PaymentMethod successfully attached to Customer");
        Ok(())
    }

    /// A payment succeeded; fulfil orders, e-mail receipts, etc.
    fn on_payment_intent_succeeded(&self, intent: PaymentIntent) -> PaymentResult<()> {
        if !intent.saves_payment_method() {
            info!("❗ Customer did not want to save the card.");
        }
        info!(payment_intent = %intent.id, "💰 Payment received!");
        Ok(())
    }

    /// A payment attempt failed
    fn on_payment_intent_failed(&self, event: &WebhookEvent) -> PaymentResult<()> {
        let reason = event
            .raw_data
            .get("last_payment_error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .unwrap_or("unknown");
        error!(reason, "❌ Payment failed.");
        Ok(())
    }

    /// Called for any other event type
    fn on_unknown_event(&self, event: &WebhookEvent) -> PaymentResult<()> {
        debug!("Unhandled webhook event: {}", event.event_type.as_tag());
        Ok(())
    }
}

/// Default webhook handler (just logs events)
pub struct LoggingWebhookHandler;

impl WebhookHandler for LoggingWebhookHandler {}

/// Dispatch a webhook event to the appropriate handler method.
///
/// `payment_intent.succeeded` payloads are decoded first; a body that is not
/// a payment intent yields `WebhookParseError`.
pub fn dispatch_webhook_event(
    handler: &dyn WebhookHandler,
    event: WebhookEvent,
) -> PaymentResult<WebhookDisposition> {
    match &event.event_type {
        WebhookEventType::PaymentMethodAttached => handler.on_payment_method_attached(&event)?,
        WebhookEventType::PaymentIntentSucceeded => {
            let intent = event.payment_intent()?;
            handler.on_payment_intent_succeeded(intent)?
        }
        WebhookEventType::PaymentIntentFailed => handler.on_payment_intent_failed(&event)?,
        WebhookEventType::Unknown(_) => {
            handler.on_unknown_event(&event)?;
            return Ok(WebhookDisposition::Unhandled);
        }
    }
    Ok(WebhookDisposition::Handled)
}
