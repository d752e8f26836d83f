//! # Routes
//!
//! Axum router configuration for the two servers.
//! Each exposes its JSON endpoints and falls back to the static front-end.

use crate::handlers::{self, manual, webhooks};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Router for the webhook-driven server
///
/// Routes:
///   - POST /create-payment-intent - Create customer + payment intent
///   - POST /webhook - Stripe webhook handler (raw body)
///   - GET  /health - Health check
///   - GET  /* - Static front-end from `STATIC_DIR`
pub fn create_webhooks_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/create-payment-intent", post(webhooks::create_payment_intent))
        .route("/webhook", post(webhooks::webhook))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router for the manual-confirmation server
///
/// Routes:
///   - GET  /stripe-key - Publishable key
///   - POST /pay - Create-and-confirm, or confirm, a payment intent
///   - GET  /health - Health check
///   - GET  /* - Static front-end from `STATIC_DIR`
pub fn create_manual_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/stripe-key", get(manual::stripe_key))
        .route("/pay", post(manual::pay))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
