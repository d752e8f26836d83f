//! # Order Types
//!
//! What the browser sends about the cart, and how the server turns it into
//! an amount to charge.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Amount charged for every order by [`FixedOrderPricing::default`], in the
/// smallest currency unit.
pub const DEFAULT_ORDER_AMOUNT: i64 = 1400;

/// A single item passed from the client.
///
/// The id is an opaque reference to a product; the client never supplies
/// a price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub id: String,
}

impl OrderItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Computes the amount to charge for a set of items.
///
/// Always computed server-side so the client cannot change what it is
/// charged by editing the request.
pub trait OrderPricing: Send + Sync {
    /// Amount in the smallest currency unit (cents for USD)
    fn order_amount(&self, items: &[OrderItem]) -> i64;
}

/// Shared, dynamically dispatched pricing collaborator
pub type BoxedOrderPricing = Arc<dyn OrderPricing>;

/// Charges the same amount regardless of the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOrderPricing {
    pub amount: i64,
}

impl FixedOrderPricing {
    pub fn new(amount: i64) -> Self {
        Self { amount }
    }
}

impl Default for FixedOrderPricing {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_AMOUNT)
    }
}

impl OrderPricing for FixedOrderPricing {
    fn order_amount(&self, _items: &[OrderItem]) -> i64 {
        self.amount
    }
}
