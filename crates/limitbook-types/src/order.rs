//! Order types for the LimitBook matching engine.
//!
//! Prices and quantities are signed integers in the instrument's smallest
//! increment. Only `quantity` changes after creation, and only the matching
//! algorithms change it.

use serde::{Deserialize, Serialize};

use crate::OrderId;

/// Price in the smallest currency increment.
pub type Price = i64;

/// Quantity in the smallest lot increment.
pub type Quantity = i64;

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    /// Sell interest. Best = lowest price.
    Ask,
    /// Buy interest. Best = highest price.
    Bid,
}

impl OrderSide {
    /// The side a crossing order rests on.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Ask => Self::Bid,
            Self::Bid => Self::Ask,
        }
    }

    /// Wire tag used in snapshot files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ask => "ASK",
            Self::Bid => "BID",
        }
    }

    /// Parse a wire tag. Exact match only.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ASK" => Some(Self::Ask),
            "BID" => Some(Self::Bid),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resting limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: OrderSide,
    pub price: Price,
    /// Remaining (unfilled) quantity. Always > 0 while the order rests.
    pub quantity: Quantity,
}

impl Order {
    #[must_use]
    pub fn new(id: OrderId, side: OrderSide, price: Price, quantity: Quantity) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
        }
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.quantity <= 0
    }

    /// Reduce the remaining quantity by a matched amount.
    pub fn fill(&mut self, matched: Quantity) {
        debug_assert!(matched > 0 && matched <= self.quantity);
        self.quantity -= matched;
    }

    /// Whether this order would trade against a counter-order at `price`.
    #[must_use]
    pub fn crosses(&self, price: Price) -> bool {
        match self.side {
            OrderSide::Ask => self.price <= price,
            OrderSide::Bid => self.price >= price,
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}#{} {} @ {}",
            self.side, self.id, self.quantity, self.price
        )
    }
}
