//! Cancellation registry: the only per-order state the exchange keeps.
//!
//! Orders live off-record until someone settles or cancels them. A cancel
//! inserts the order's id here; from then on every settlement of an order
//! hashing to that id fails with [`MarketError::OrderCancelled`].
//!
//! Unlike a bounded replay cache, nothing is ever evicted: a cancellation
//! is permanent and there is no un-cancel path.

use std::collections::HashSet;

use openmarket_types::{MarketError, OrderId, Result};

/// Monotonic set of cancelled order ids.
#[derive(Debug, Default, Clone)]
pub struct CancellationRegistry {
    cancelled: HashSet<OrderId>,
}

impl CancellationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `order_id` as cancelled. Idempotent: returns `true` only the
    /// first time an id is inserted.
    pub fn cancel(&mut self, order_id: OrderId) -> bool {
        self.cancelled.insert(order_id)
    }

    /// Whether `order_id` has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self, order_id: &OrderId) -> bool {
        self.cancelled.contains(order_id)
    }

    /// Fail with [`MarketError::OrderCancelled`] if `order_id` is cancelled.
    pub fn ensure_open(&self, order_id: &OrderId) -> Result<()> {
        if self.is_cancelled(order_id) {
            return Err(MarketError::OrderCancelled(*order_id));
        }
        Ok(())
    }

    /// Number of cancelled ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cancelled.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cancelled.is_empty()
    }
}
