//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the payment gateway, the pricing collaborator, the webhook
//! handler, and configuration. Everything is read-only after startup.

use pay_core::{
    BoxedOrderPricing, BoxedPaymentGateway, FixedOrderPricing, PaymentError, PaymentResult,
};
use pay_stripe::{LoggingWebhookHandler, StripeClient, StripeConfig, WebhookHandler};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the bundled front-end
    pub static_dir: PathBuf,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from process environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> PaymentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let static_dir = lookup("STATIC_DIR")
            .filter(|dir| !dir.is_empty())
            .ok_or_else(|| PaymentError::Configuration("STATIC_DIR not set".to_string()))?;

        let port = match lookup("PORT") {
            Some(port) => port.parse().map_err(|_| {
                PaymentError::Configuration(format!("PORT is not a valid port: {}", port))
            })?,
            None => 4242,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            static_dir: PathBuf::from(static_dir),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        })
    }

    /// Defaults with an explicit static directory
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4242,
            static_dir: static_dir.into(),
            environment: "development".to_string(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> PaymentResult<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|_| {
            PaymentError::Configuration(format!(
                "Invalid socket address: {}:{}",
                self.host, self.port
            ))
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider
    pub gateway: BoxedPaymentGateway,
    /// Computes order amounts server-side
    pub pricing: BoxedOrderPricing,
    /// Reacts to verified webhook events
    pub webhook_handler: Arc<dyn WebhookHandler>,
    /// Publishable key handed to the browser
    pub publishable_key: String,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state backed by the Stripe API
    pub fn new(config: AppConfig, stripe_config: StripeConfig) -> PaymentResult<Self> {
        let publishable_key = stripe_config.publishable_key.clone();
        let stripe = StripeClient::new(stripe_config)?;

        Ok(Self::with_gateway(config, Arc::new(stripe), publishable_key))
    }

    /// Create state around any gateway, with fixed pricing and logging
    /// webhook handling
    pub fn with_gateway(
        config: AppConfig,
        gateway: BoxedPaymentGateway,
        publishable_key: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            pricing: Arc::new(FixedOrderPricing::default()),
            webhook_handler: Arc::new(LoggingWebhookHandler),
            publishable_key: publishable_key.into(),
            config,
        }
    }

    /// Builder: replace the pricing collaborator
    pub fn with_pricing(mut self, pricing: BoxedOrderPricing) -> Self {
        self.pricing = pricing;
        self
    }

    /// Builder: replace the webhook handler
    pub fn with_webhook_handler(mut self, handler: Arc<dyn WebhookHandler>) -> Self {
        self.webhook_handler = handler;
        self
    }
}
