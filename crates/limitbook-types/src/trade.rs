//! Execution records produced by the matching engine.
//!
//! A [`Trade`] is emitted by the limit-crossing loop and pairs one ask with
//! one bid. A market sweep produces a [`MarketExecution`] instead, since the
//! market order itself never gets an [`OrderId`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OrderId, OrderSide, Price, Quantity, TradeId};

/// A fill between a resting ask and a resting bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub ask_order_id: OrderId,
    pub bid_order_id: OrderId,
    /// Always the ask order's price.
    pub price: Price,
    pub quantity: Quantity,
    pub executed_at: DateTime<Utc>,
}

impl Trade {
    /// Notional value = price × quantity, widened to avoid overflow.
    #[must_use]
    pub fn notional(&self) -> i128 {
        i128::from(self.price) * i128::from(self.quantity)
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Matched: Ask Order ID {} with Bid Order ID {}, Quantity {}, Price {}",
            self.ask_order_id, self.bid_order_id, self.quantity, self.price,
        )
    }
}

/// One resting order hit by a market sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub resting_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}

/// Result of a market buy or market sell.
///
/// `filled + unfilled == requested`. A non-zero `unfilled` means the
/// opposite side ran dry and the remainder was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketExecution {
    /// Side of the market order itself (`Bid` for a market buy).
    pub side: OrderSide,
    pub requested: Quantity,
    pub filled: Quantity,
    pub unfilled: Quantity,
    pub fills: Vec<Fill>,
}

impl MarketExecution {
    #[must_use]
    pub fn new(side: OrderSide, requested: Quantity) -> Self {
        Self {
            side,
            requested,
            filled: 0,
            unfilled: requested,
            fills: Vec::new(),
        }
    }

    pub fn record(&mut self, fill: Fill) {
        self.filled += fill.quantity;
        self.unfilled -= fill.quantity;
        self.fills.push(fill);
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unfilled == 0
    }
}

impl std::fmt::Display for MarketExecution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self.side {
            OrderSide::Bid => "Market buy",
            OrderSide::Ask => "Market sell",
        };
        write!(
            f,
            "{verb}: filled {} of {} across {} order(s)",
            self.filled,
            self.requested,
            self.fills.len()
        )?;
        if self.unfilled > 0 {
            write!(f, ", {} unfilled", self.unfilled)?;
        }
        Ok(())
    }
}
