//! A single price level in one side of the book.
//!
//! Orders at the same price are kept sorted by `OrderId`. Ids are handed
//! out in arrival order, so the front of the level is the oldest order, and
//! a partially filled order that the matcher re-inserts lands back at the
//! front instead of losing its place.

use std::collections::VecDeque;

use limitbook_types::{Order, Price, Quantity};

/// All resting orders at one price.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// The price at this level.
    pub price: Price,
    /// Orders in ascending id order (front = highest priority).
    orders: VecDeque<Order>,
}

impl PriceLevel {
    #[must_use]
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
        }
    }

    /// Add an order at its id position. Appending is the common case.
    pub fn insert(&mut self, order: Order) {
        debug_assert_eq!(order.price, self.price);
        match self.orders.back() {
            Some(last) if last.id > order.id => {
                let pos = self.orders.partition_point(|o| o.id < order.id);
                self.orders.insert(pos, order);
            }
            _ => self.orders.push_back(order),
        }
    }

    /// Remove and return the highest-priority order.
    pub fn pop_front(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    /// Peek at the highest-priority order without removing it.
    #[must_use]
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// Total remaining quantity across all orders at this level.
    #[must_use]
    pub fn total_quantity(&self) -> Quantity {
        self.orders.iter().map(|o| o.quantity).sum()
    }

    /// Orders in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
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
