//! # Payment Gateway Trait
//!
//! The seam between HTTP handlers and the payment provider. Handlers only
//! ever talk to a `PaymentGateway`; the Stripe client lives in `pay-stripe`
//! and tests substitute a recording mock.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PaymentGateway (trait)                   │
//! │  ├── create_customer()                                      │
//! │  ├── create_payment_intent()                                │
//! │  ├── confirm_payment_intent()                               │
//! │  ├── verify_webhook()                                       │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                  ┌─────────┴─────────┐
//!                  │                   │
//!          ┌───────┴───────┐   ┌───────┴───────┐
//!          │ StripeClient  │   │  test mocks   │
//!          └───────────────┘   └───────────────┘
//! ```

use crate::error::PaymentResult;
use crate::event::WebhookEvent;
use crate::intent::{Customer, PaymentIntent, PaymentIntentParams};
use async_trait::async_trait;
use std::sync::Arc;

/// Operations the servers need from a payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an empty customer record so a payment method can be saved
    /// against it.
    async fn create_customer(&self) -> PaymentResult<Customer>;

    /// Create a payment intent.
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> PaymentResult<PaymentIntent>;

    /// Confirm an existing payment intent, e.g. after the customer finished
    /// 3D Secure authentication.
    async fn confirm_payment_intent(&self, payment_intent_id: &str)
        -> PaymentResult<PaymentIntent>;

    /// Verify a webhook signature and parse the event.
    ///
    /// # Arguments
    /// * `payload` - Raw webhook body bytes
    /// * `signature` - Signature header from the request
    async fn verify_webhook(&self, payload: &[u8], signature: &str)
        -> PaymentResult<WebhookEvent>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
