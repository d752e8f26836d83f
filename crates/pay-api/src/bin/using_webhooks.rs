//! # using-webhooks
//!
//! Creates a customer and payment intent per checkout and learns about the
//! result from Stripe webhooks.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or put them in .env)
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PUBLISHABLE_KEY=pk_test_...
//! export STRIPE_WEBHOOK_SECRET=whsec_...
//! export STATIC_DIR=../client
//!
//! # Run the server, then forward events locally
//! using-webhooks
//! stripe listen --forward-to localhost:4242/webhook
//! ```

use pay_api::{routes, telemetry, AppConfig, AppState};
use pay_stripe::StripeConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    print_banner();

    let config = AppConfig::from_env()?;
    let stripe_config = StripeConfig::from_env()?;
    // Required by POST /webhook
    stripe_config.webhook_secret()?;

    let state = AppState::new(config, stripe_config)?;
    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Serving static files from {}", state.config.static_dir.display());

    let app = routes::create_webhooks_router(state);

    info!("Listening on http://{} ...", addr);
    if !is_prod {
        info!("💳 Checkout: POST http://{}/create-payment-intent", addr);
        info!("🔔 Webhook: POST http://{}/webhook", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  💳 saving-card-rs · using-webhooks
  ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
