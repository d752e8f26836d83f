//! # pay-api
//!
//! HTTP layer for saving-card-rs.
//!
//! This crate provides two Axum servers sharing one state type:
//! - **using-webhooks**: payment results arrive as signed Stripe webhooks
//! - **without-webhooks**: payments are confirmed synchronously, with
//!   optional card saving
//!
//! ## Endpoints
//!
//! | Server | Method | Path | Description |
//! |--------|--------|------|-------------|
//! | both | GET | `/` | Static front-end |
//! | both | GET | `/health` | Health check |
//! | using-webhooks | POST | `/create-payment-intent` | Create customer + intent |
//! | using-webhooks | POST | `/webhook` | Stripe webhook |
//! | without-webhooks | GET | `/stripe-key` | Publishable key |
//! | without-webhooks | POST | `/pay` | Create/confirm intent |

pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use routes::{create_manual_router, create_webhooks_router};
pub use state::{AppConfig, AppState};
