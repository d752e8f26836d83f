//! # Stripe Configuration
//!
//! Configuration management for Stripe integration.
//! All secrets are loaded from environment variables. The binaries load
//! `.env` into the process environment first.

use pay_core::PaymentError;
use std::env;

/// Default Stripe API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// API version pinned on every request
pub const DEFAULT_API_VERSION: &str = "2020-08-27";

/// Maximum age (either direction) of a webhook signature timestamp
pub const DEFAULT_WEBHOOK_TOLERANCE_SECS: i64 = 300;

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Publishable key (pk_test_... or pk_live_...), handed to the browser
    pub publishable_key: String,

    /// Webhook signing secret (whsec_...). Only the webhook server needs it.
    pub webhook_secret: Option<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,

    /// Accepted clock skew for webhook signatures, in seconds
    pub webhook_tolerance_secs: i64,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_PUBLISHABLE_KEY`
    ///
    /// Optional:
    /// - `STRIPE_WEBHOOK_SECRET`
    pub fn from_env() -> Result<Self, PaymentError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PaymentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("STRIPE_SECRET_KEY").ok_or_else(|| {
            PaymentError::Configuration("STRIPE_SECRET_KEY not set".to_string())
        })?;

        let publishable_key = lookup("STRIPE_PUBLISHABLE_KEY").ok_or_else(|| {
            PaymentError::Configuration("STRIPE_PUBLISHABLE_KEY not set".to_string())
        })?;

        let webhook_secret = lookup("STRIPE_WEBHOOK_SECRET").filter(|s| !s.is_empty());

        // Validate key formats
        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(PaymentError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        if !publishable_key.starts_with("pk_test_") && !publishable_key.starts_with("pk_live_") {
            return Err(PaymentError::Configuration(
                "STRIPE_PUBLISHABLE_KEY must start with pk_test_ or pk_live_".to_string(),
            ));
        }

        if let Some(ref secret) = webhook_secret {
            if !secret.starts_with("whsec_") {
                return Err(PaymentError::Configuration(
                    "STRIPE_WEBHOOK_SECRET must start with whsec_".to_string(),
                ));
            }
        }

        let mut config = Self::new(secret_key, publishable_key);
        config.webhook_secret = webhook_secret;
        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>, publishable_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            publishable_key: publishable_key.into(),
            webhook_secret: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            webhook_tolerance_secs: DEFAULT_WEBHOOK_TOLERANCE_SECS,
        }
    }

    /// Webhook signing secret, or a configuration error when unset
    pub fn webhook_secret(&self) -> Result<&str, PaymentError> {
        self.webhook_secret.as_deref().ok_or_else(|| {
            PaymentError::Configuration("STRIPE_WEBHOOK_SECRET not set".to_string())
        })
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set the webhook signing secret
    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_from_lookup() {
        let config = StripeConfig::from_lookup(lookup(&[
            ("STRIPE_SECRET_KEY", "sk_test_abc123"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_xyz789"),
            ("STRIPE_WEBHOOK_SECRET", "whsec_secret"),
        ]))
        .unwrap();

        assert!(config.is_test_mode());
        assert_eq!(config.webhook_secret().unwrap(), "whsec_secret");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.webhook_tolerance_secs, 300);
    }

    #[test]
    fn test_webhook_secret_optional() {
        let config = StripeConfig::from_lookup(lookup(&[
            ("STRIPE_SECRET_KEY", "sk_live_abc123"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_live_xyz789"),
        ]))
        .unwrap();

        assert!(!config.is_test_mode());
        assert!(matches!(
            config.webhook_secret(),
            Err(PaymentError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_secret_key() {
        let err = StripeConfig::from_lookup(lookup(&[("STRIPE_PUBLISHABLE_KEY", "pk_test_x")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: STRIPE_SECRET_KEY not set");
    }

    #[test]
    fn test_key_format_validation() {
        let err = StripeConfig::from_lookup(lookup(&[
            ("STRIPE_SECRET_KEY", "pk_test_wrong"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_x"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("sk_test_ or sk_live_"));

        let err = StripeConfig::from_lookup(lookup(&[
            ("STRIPE_SECRET_KEY", "sk_test_x"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_x"),
            ("STRIPE_WEBHOOK_SECRET", "secret"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("whsec_"));
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123", "pk_test_xyz789");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }
}
