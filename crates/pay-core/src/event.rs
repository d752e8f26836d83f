//! # Webhook Events
//!
//! Provider-agnostic view of a verified webhook notification.

use crate::error::{PaymentError, PaymentResult};
use crate::intent::PaymentIntent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Webhook event types this service reacts to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookEventType {
    /// `payment_method.attached`
    PaymentMethodAttached,
    /// `payment_intent.succeeded`
    PaymentIntentSucceeded,
    /// `payment_intent.payment_failed`
    PaymentIntentFailed,
    /// Anything else, with the raw type tag
    Unknown(String),
}

impl WebhookEventType {
    /// Map a provider type tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "payment_method.attached" => WebhookEventType::PaymentMethodAttached,
            "payment_intent.succeeded" => WebhookEventType::PaymentIntentSucceeded,
            "payment_intent.payment_failed" => WebhookEventType::PaymentIntentFailed,
            other => WebhookEventType::Unknown(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            WebhookEventType::PaymentMethodAttached => "payment_method.attached",
            WebhookEventType::PaymentIntentSucceeded => "payment_intent.succeeded",
            WebhookEventType::PaymentIntentFailed => "payment_intent.payment_failed",
            WebhookEventType::Unknown(tag) => tag,
        }
    }
}

/// A webhook event whose signature has already been verified
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Provider event ID (evt_...)
    pub event_id: String,

    pub event_type: WebhookEventType,

    /// Provider name
    pub provider: String,

    /// API version the payload was rendered with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    pub livemode: bool,

    /// The `data.object` payload, untouched
    pub raw_data: serde_json::Value,

    /// When the provider created the event
    pub timestamp: DateTime<Utc>,
}

impl WebhookEvent {
    /// Decode the embedded object as a payment intent
    pub fn payment_intent(&self) -> PaymentResult<PaymentIntent> {
        serde_json::from_value(self.raw_data.clone()).map_err(|e| {
            PaymentError::WebhookParseError(format!("Error parsing webhook JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::PaymentIntentStatus;
    use serde_json::json;

    fn event(tag: &str, raw_data: serde_json::Value) -> WebhookEvent {
        WebhookEvent {
            event_id: "evt_1".to_string(),
            event_type: WebhookEventType::from_tag(tag),
            provider: "stripe".to_string(),
            api_version: None,
            livemode: false,
            raw_data,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_event_type_tags() {
        for tag in [
            "payment_method.attached",
            "payment_intent.succeeded",
            "payment_intent.payment_failed",
            "charge.refunded",
        ] {
            assert_eq!(WebhookEventType::from_tag(tag).as_tag(), tag);
        }
        assert_eq!(
            WebhookEventType::from_tag("customer.created"),
            WebhookEventType::Unknown("customer.created".to_string())
        );
    }

    #[test]
    fn test_embedded_payment_intent() {
        let evt = event(
            "payment_intent.succeeded",
            json!({ "id": "pi_7", "status": "succeeded", "setup_future_usage": null }),
        );
        let pi = evt.payment_intent().unwrap();
        assert_eq!(pi.id, "pi_7");
        assert_eq!(pi.status, PaymentIntentStatus::Succeeded);
    }

    #[test]
    fn test_embedded_payment_intent_invalid() {
        let evt = event("payment_intent.succeeded", json!({ "status": 42 }));
        let err = evt.payment_intent().unwrap_err();
        assert!(matches!(err, PaymentError::WebhookParseError(_)));
        assert_eq!(err.status_code(), 400);
    }
}
