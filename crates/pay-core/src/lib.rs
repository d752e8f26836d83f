//! # pay-core
//!
//! Core types and traits for the saving-card payment servers.
//!
//! This crate provides:
//! - `PaymentGateway` trait for talking to a payment provider
//! - `OrderItem` and `OrderPricing` for computing the amount server-side
//! - `PaymentIntent`, `Customer` and `PaymentOutcome` for the payment flow
//! - `WebhookEvent` for verified provider notifications
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{FixedOrderPricing, OrderItem, OrderPricing, PaymentIntentParams, PaymentOutcome};
//!
//! let amount = FixedOrderPricing::default().order_amount(&[OrderItem::new("photo-subscription")]);
//!
//! let params = PaymentIntentParams::new(amount, "usd")
//!     .with_payment_method("pm_card_visa")
//!     .confirm_manually();
//!
//! let intent = gateway.create_payment_intent(&params).await?;
//! match PaymentOutcome::from_intent(&intent) {
//!     PaymentOutcome::RequiresAction { .. } => { /* hand client_secret to Stripe.js */ }
//!     _ => {}
//! }
//! ```

pub mod error;
pub mod event;
pub mod gateway;
pub mod intent;
pub mod order;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use event::{WebhookEvent, WebhookEventType};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use intent::{
    ConfirmationMethod, Customer, PaymentIntent, PaymentIntentParams, PaymentIntentStatus,
    PaymentOutcome, SetupFutureUsage, CARD_DENIED_MESSAGE,
};
pub use order::{
    BoxedOrderPricing, FixedOrderPricing, OrderItem, OrderPricing, DEFAULT_ORDER_AMOUNT,
};
