//! # pay-stripe
//!
//! Stripe payment gateway for saving-card-rs.
//!
//! This crate provides:
//!
//! 1. **StripeClient** - `PaymentGateway` over the Stripe REST API
//!    - Customers (`POST /v1/customers`)
//!    - Payment intents, create and confirm
//!    - Webhook signature verification
//!
//! 2. **Webhook utilities** - signature checks and typed dispatch
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_core::{PaymentGateway, PaymentIntentParams};
//! use pay_stripe::StripeClient;
//!
//! // Create client from environment
//! let stripe = StripeClient::from_env()?;
//!
//! let params = PaymentIntentParams::new(1400, "usd")
//!     .with_payment_method("pm_card_visa")
//!     .confirm_manually();
//! let intent = stripe.create_payment_intent(&params).await?;
//! ```
//!
//! ## Webhook Handling
//!
//! ```rust,ignore
//! use pay_stripe::{dispatch_webhook_event, WebhookHandler};
//!
//! struct MyHandler;
//!
//! impl WebhookHandler for MyHandler {
//!     fn on_payment_intent_succeeded(&self, intent: PaymentIntent) -> PaymentResult<()> {
//!         // Fulfil the order
//!         Ok(())
//!     }
//! }
//!
//! // In your webhook endpoint:
//! let event = stripe.verify_webhook(payload, signature).await?;
//! dispatch_webhook_event(&MyHandler, event)?;
//! ```

pub mod client;
pub mod config;
pub mod webhook;

// Re-exports
pub use client::StripeClient;
pub use config::StripeConfig;
pub use webhook::{
    construct_event, dispatch_webhook_event, generate_test_header, LoggingWebhookHandler,
    WebhookDisposition, WebhookHandler,
};
