//! # without-webhooks
//!
//! Confirms payments synchronously: the browser posts a PaymentMethod id to
//! `/pay`, and calls again with the intent id after 3D Secure.
//!
//! ## Usage
//!
//! ```bash
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PUBLISHABLE_KEY=pk_test_...
//! export STATIC_DIR=../client
//!
//! without-webhooks
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
    let test_mode = stripe_config.is_test_mode();

    let state = AppState::new(config, stripe_config)?;
    let addr = state.config.socket_addr()?;

    info!("Environment: {}", state.config.environment);
    info!("Stripe test mode: {}", test_mode);

    let app = routes::create_manual_router(state);

    info!("Listening on http://{} ...", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  💳 saving-card-rs · without-webhooks
  ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
