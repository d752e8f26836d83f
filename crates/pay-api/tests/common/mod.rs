//! Shared fixtures: a recording gateway and a static directory.

#![allow(dead_code)]

use async_trait::async_trait;
use pay_api::{AppConfig, AppState};
use pay_core::{
    Customer, PaymentError, PaymentGateway, PaymentIntent, PaymentIntentParams,
    PaymentIntentStatus, PaymentResult, WebhookEvent,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PUBLISHABLE_KEY: &str = "pk_test_fixture";
pub const WEBHOOK_SECRET: &str = "whsec_fixture";

/// One call made against the gateway, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    CreateCustomer,
    CreatePaymentIntent(PaymentIntentParams),
    ConfirmPaymentIntent(String),
    VerifyWebhook,
}

/// Gateway that records calls and returns canned intents
pub struct MockGateway {
    calls: Mutex<Vec<GatewayCall>>,
    status: PaymentIntentStatus,
    failure: Option<String>,
}

impl MockGateway {
    pub fn new(status: PaymentIntentStatus) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            status,
            failure: None,
        }
    }

    /// Every customer/intent call fails with this provider message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(PaymentIntentStatus::Succeeded)
        }
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GatewayCall) -> PaymentResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failure {
            Some(ref message) => Err(PaymentError::provider("mock", message.clone())),
            None => Ok(()),
        }
    }

    fn intent(&self, id: &str, params: Option<&PaymentIntentParams>) -> PaymentIntent {
        PaymentIntent {
            id: id.to_string(),
            status: self.status,
            client_secret: Some(format!("{}_secret_fixture", id)),
            amount: params.map(|p| p.amount).unwrap_or(1400),
            currency: params.map(|p| p.currency.clone()).unwrap_or_else(|| "usd".to_string()),
            customer: params.and_then(|p| p.customer.clone()),
            payment_method: params.and_then(|p| p.payment_method.clone()),
            setup_future_usage: params.and_then(|p| p.setup_future_usage),
            confirmation_method: params.and_then(|p| p.confirmation_method),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_customer(&self) -> PaymentResult<Customer> {
        self.record(GatewayCall::CreateCustomer)?;
        Ok(Customer {
            id: "cus_fixture".to_string(),
        })
    }

    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> PaymentResult<PaymentIntent> {
        self.record(GatewayCall::CreatePaymentIntent(params.clone()))?;
        Ok(self.intent("pi_created", Some(params)))
    }

    async fn confirm_payment_intent(&self, payment_intent_id: &str) -> PaymentResult<PaymentIntent> {
        self.record(GatewayCall::ConfirmPaymentIntent(payment_intent_id.to_string()))?;
        Ok(self.intent(payment_intent_id, None))
    }

    async fn verify_webhook(&self, payload: &[u8], signature: &str) -> PaymentResult<WebhookEvent> {
        self.calls.lock().unwrap().push(GatewayCall::VerifyWebhook);
        pay_stripe::construct_event(payload, signature, WEBHOOK_SECRET, 300)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A fresh directory containing `index.html`
pub fn static_dir() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let dir = std::env::temp_dir().join(format!(
        "saving-card-static-{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>Saving card checkout</h1>").unwrap();
    dir
}

pub fn state(gateway: Arc<MockGateway>) -> AppState {
    AppState::with_gateway(AppConfig::new(static_dir()), gateway, PUBLISHABLE_KEY)
}
