//! The flat order record shared by both snapshot encodings.
//!
//! Field names and order match the legacy file: `type`, `price`,
//! `quantity`, `orderID`.

use std::collections::HashSet;

use limitbook_types::{BookSnapshot, LimitbookError, Order, OrderId, OrderSide, Result};
use serde::{Deserialize, Serialize};

/// One resting order as written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderRecord {
    #[serde(rename = "type")]
    pub side: OrderSide,
    pub price: i64,
    pub quantity: i64,
    #[serde(rename = "orderID")]
    pub order_id: u64,
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            side: order.side,
            price: order.price,
            quantity: order.quantity,
            order_id: order.id.0,
        }
    }
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Order::new(
            OrderId(record.order_id),
            record.side,
            record.price,
            record.quantity,
        )
    }
}

/// Reject snapshots that could not have been written by a healthy engine.
///
/// A crossed book is accepted; only per-record damage is refused.
pub fn validate(snapshot: &BookSnapshot) -> Result<()> {
    // 0 is never issued; u64::MAX leaves no id to issue.
    let next = snapshot.next_order_id;
    if next.0 == 0 || next.0 == u64::MAX {
        return Err(LimitbookError::corrupt(format!(
            "next_order_id {next} is outside the issuable range"
        )));
    }

    let mut seen = HashSet::with_capacity(snapshot.orders.len());
    for (index, order) in snapshot.orders.iter().enumerate() {
        if order.quantity <= 0 {
            return Err(LimitbookError::corrupt(format!(
                "record {index}: quantity must be positive, got {}",
                order.quantity
            )));
        }
        if order.price <= 0 {
            return Err(LimitbookError::corrupt(format!(
                "record {index}: price must be positive, got {}",
                order.price
            )));
        }
        if !seen.insert(order.id) {
            return Err(LimitbookError::corrupt(format!(
                "record {index}: duplicate orderID {}",
                order.id
            )));
        }
        if order.id >= snapshot.next_order_id {
            return Err(LimitbookError::corrupt(format!(
                "record {index}: orderID {} is not below next_order_id {}",
                order.id, snapshot.next_order_id
            )));
        }
    }
    Ok(())
}
