//! Full-book snapshot exchanged between the engine and a persistence port.

use serde::{Deserialize, Serialize};

use crate::{Order, OrderId};

/// Every resting order plus the id the engine will hand out next.
///
/// `orders` lists asks best-first followed by bids best-first, the same
/// order the legacy file writer used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub next_order_id: OrderId,
    pub orders: Vec<Order>,
}

impl BookSnapshot {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            next_order_id: OrderId::FIRST,
            orders: Vec::new(),
        }
    }

    /// Build a snapshot from orders alone, resuming ids after the highest one.
    ///
    /// Ids of orders that were fully filled before the snapshot was taken
    /// are not recoverable this way and may be handed out again. A resting
    /// `u64::MAX` id leaves the counter at `u64::MAX`, which validation
    /// rejects.
    #[must_use]
    pub fn from_orders(orders: Vec<Order>) -> Self {
        let next_order_id = match orders.iter().map(|o| o.id).max() {
            None => OrderId::FIRST,
            Some(max) => max.next().unwrap_or(OrderId(u64::MAX)),
        };
        Self {
            next_order_id,
            orders,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }
}

impl Default for BookSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
