//! # Stripe Client
//!
//! `PaymentGateway` implementation over the Stripe REST API: customers,
//! payment intents, and webhook verification.

use crate::config::StripeConfig;
use crate::webhook::construct_event;
use async_trait::async_trait;
use pay_core::{
    Customer, PaymentError, PaymentGateway, PaymentIntent, PaymentIntentParams, PaymentResult,
    WebhookEvent,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Sent as the `User-Agent` of every API request
const USER_AGENT: &str = concat!("saving-card-rs/", env!("CARGO_PKG_VERSION"));

/// Stripe API client
///
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` pools
/// connections across requests.
pub struct StripeClient {
    config: StripeConfig,
    client: Client,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// POST form-encoded parameters and decode the JSON response
    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form_params: &[(String, String)],
    ) -> PaymentResult<T> {
        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: path={}, status={}, body={}", path, status, body);

            // Parse Stripe error
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(PaymentError::provider("stripe", error_response.error.describe()));
            }

            return Err(PaymentError::provider(
                "stripe",
                format!("HTTP {}: {}", status, body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })
    }
}

/// Form fields for `POST /v1/payment_intents`
fn payment_intent_form(params: &PaymentIntentParams) -> Vec<(String, String)> {
    let mut form_params: Vec<(String, String)> = vec![
        ("amount".to_string(), params.amount.to_string()),
        ("currency".to_string(), params.currency.clone()),
    ];

    if let Some(ref customer) = params.customer {
        form_params.push(("customer".to_string(), customer.clone()));
    }
    if let Some(ref payment_method) = params.payment_method {
        form_params.push(("payment_method".to_string(), payment_method.clone()));
    }
    if let Some(method) = params.confirmation_method {
        form_params.push(("confirmation_method".to_string(), method.as_str().to_string()));
    }
    if params.confirm {
        form_params.push(("confirm".to_string(), "true".to_string()));
    }
    if let Some(usage) = params.setup_future_usage {
        form_params.push(("setup_future_usage".to_string(), usage.as_str().to_string()));
    }

    form_params
}

#[async_trait]
impl PaymentGateway for StripeClient {
    #[instrument(skip(self))]
    async fn create_customer(&self) -> PaymentResult<Customer> {
        let customer: Customer = self.post_form("/v1/customers", &[]).await?;
        info!("Created Stripe customer: id={}", customer.id);
        Ok(customer)
    }

    #[instrument(skip(self, params), fields(amount = params.amount, currency = %params.currency))]
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> PaymentResult<PaymentIntent> {
        let form_params = payment_intent_form(params);
        debug!("Creating payment intent with {} params", form_params.len());

        let intent: PaymentIntent = self.post_form("/v1/payment_intents", &form_params).await?;
        info!(
            "Created Stripe payment intent: id={}, status={}",
            intent.id, intent.status
        );
        Ok(intent)
    }

    #[instrument(skip(self))]
    async fn confirm_payment_intent(&self, payment_intent_id: &str) -> PaymentResult<PaymentIntent> {
        let path = format!("/v1/payment_intents/{}/confirm", payment_intent_id);
        let intent: PaymentIntent = self.post_form(&path, &[]).await?;
        info!(
            "Confirmed Stripe payment intent: id={}, status={}",
            intent.id, intent.status
        );
        Ok(intent)
    }

    #[instrument(skip(self, payload, signature))]
    async fn verify_webhook(&self, payload: &[u8], signature: &str) -> PaymentResult<WebhookEvent> {
        let secret = self.config.webhook_secret()?;
        construct_event(payload, signature, secret, self.config.webhook_tolerance_secs)
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl StripeError {
    fn describe(&self) -> String {
        let message = self
            .message
            .clone()
            .or_else(|| self.code.clone())
            .or_else(|| self.error_type.clone())
            .unwrap_or_else(|| "unknown error".to_string());
        match self.code {
            Some(ref code) if !message.contains(code.as_str()) => {
                format!("{} (code: {})", message, code)
            }
            _ => message,
        }
    }
}
