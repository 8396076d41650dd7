//! One side of the order book.
//!
//! Both sides share one layout, a `BTreeMap<Price, PriceLevel>` kept in
//! ascending price order:
//! - **Asks**: best = lowest price = first key
//! - **Bids**: best = highest price = last key
//!
//! Within a level, orders are served lowest id first (see [`PriceLevel`]).

use std::collections::BTreeMap;

use limitbook_types::{LimitbookError, Order, OrderSide, Price, Quantity, Result};

use crate::price_level::PriceLevel;

/// A price-ordered collection of resting orders for one side.
#[derive(Debug, Clone)]
pub struct BookSide {
    side: OrderSide,
    /// Price levels in ascending price order.
    levels: BTreeMap<Price, PriceLevel>,
    /// Number of resting orders across all levels.
    len: usize,
}

impl BookSide {
    #[must_use]
    pub fn new(side: OrderSide) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            len: 0,
        }
    }

    #[must_use]
    pub fn side(&self) -> OrderSide {
        self.side
    }

    // =================================================================
    // Mutation
    // =================================================================

    /// Insert an order at its price. O(log L) in the number of levels.
    pub fn insert(&mut self, order: Order) {
        debug_assert_eq!(order.side, self.side, "order routed to wrong side");
        debug_assert!(order.quantity > 0, "resting orders must have quantity");

        self.levels
            .entry(order.price)
            .or_insert_with(|| PriceLevel::new(order.price))
            .insert(order);
        self.len += 1;
    }

    /// Remove and return the best-priced order.
    pub fn pop_best(&mut self) -> Result<Order> {
        let side = self.side;
        let mut entry = match side {
            OrderSide::Ask => self.levels.first_entry(),
            OrderSide::Bid => self.levels.last_entry(),
        }
        .ok_or(LimitbookError::EmptyBook { side })?;

        let order = entry
            .get_mut()
            .pop_front()
            .ok_or_else(|| LimitbookError::Internal(format!("empty {side} level left in book")))?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.len -= 1;
        Ok(order)
    }

    // =================================================================
    // Queries
    // =================================================================

    /// The best-priced order, without removing it.
    pub fn peek_best(&self) -> Result<&Order> {
        self.best_level()
            .and_then(PriceLevel::front)
            .ok_or(LimitbookError::EmptyBook { side: self.side })
    }

    /// Best price, or `None` if the side is empty.
    #[must_use]
    pub fn best_price(&self) -> Option<Price> {
        self.best_level().map(|level| level.price)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of resting orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of distinct price levels.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Total resting quantity on this side.
    #[must_use]
    pub fn total_quantity(&self) -> Quantity {
        self.levels.values().map(PriceLevel::total_quantity).sum()
    }

    // =================================================================
    // Enumeration (best first, non-destructive)
    // =================================================================

    /// Price levels from best to worst.
    pub fn levels_best_first(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            OrderSide::Ask => Box::new(self.levels.values()),
            OrderSide::Bid => Box::new(self.levels.values().rev()),
        }
    }

    /// Orders from best to worst, in matching priority.
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.levels_best_first().flat_map(PriceLevel::iter)
    }

    /// Aggregated `(price, quantity)` pairs from best to worst.
    #[must_use]
    pub fn levels(&self) -> Vec<(Price, Quantity)> {
        self.levels_best_first()
            .map(|level| (level.price, level.total_quantity()))
            .collect()
    }

    /// Owned copy of every order, best first. Leaves the side untouched.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Order> {
        self.iter().cloned().collect()
    }

    fn best_level(&self) -> Option<&PriceLevel> {
        match self.side {
            OrderSide::Ask => self.levels.values().next(),
            OrderSide::Bid => self.levels.values().next_back(),
        }
    }
}
