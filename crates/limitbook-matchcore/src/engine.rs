//! Continuous matching engine for a single instrument.
//!
//! The engine owns both book sides and the id counters. Placement and
//! matching are separate steps:
//!
//! ```text
//! place_ask / place_bid  ->  match_book  ->  (caller persists snapshot)
//! market_buy / market_sell  (sweep the opposite side, never rest)
//! ```
//!
//! ## Execution price
//!
//! A crossing pair always trades at the **ask** order's price, whichever
//! order arrived last.
//!
//! ## Market remainder
//!
//! When a market order exhausts the opposite side, the unmatched remainder
//! is dropped. It is reported in [`MarketExecution::unfilled`], never as an
//! error.

use std::collections::HashSet;

use chrono::Utc;
use limitbook_types::{
    BookSnapshot, Fill, LimitbookError, MarketExecution, Order, OrderId, OrderSide, Price,
    Quantity, Result, Trade, TradeId,
};

use crate::book_side::BookSide;

/// Single-instrument limit order book with continuous matching.
///
/// Not internally synchronized: every mutation takes `&mut self`.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    asks: BookSide,
    bids: BookSide,
    next_order_id: OrderId,
    next_trade_id: TradeId,
}

impl MatchingEngine {
    /// Create an engine with an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            asks: BookSide::new(OrderSide::Ask),
            bids: BookSide::new(OrderSide::Bid),
            next_order_id: OrderId::FIRST,
            next_trade_id: TradeId::FIRST,
        }
    }

    /// Rebuild an engine from a persisted snapshot.
    ///
    /// The snapshot may describe a crossed book; the next [`match_book`]
    /// clears it. Records with non-positive price or quantity, or a repeated
    /// id, reject the whole snapshot.
    ///
    /// [`match_book`]: Self::match_book
    pub fn from_snapshot(snapshot: BookSnapshot) -> Result<Self> {
        let mut engine = Self::new();
        let mut seen = HashSet::with_capacity(snapshot.orders.len());
        let mut max_id: Option<OrderId> = None;

        for order in snapshot.orders {
            if order.quantity <= 0 {
                return Err(LimitbookError::corrupt(format!(
                    "order {} has non-positive quantity {}",
                    order.id, order.quantity
                )));
            }
            if order.price <= 0 {
                return Err(LimitbookError::corrupt(format!(
                    "order {} has non-positive price {}",
                    order.id, order.price
                )));
            }
            if !seen.insert(order.id) {
                return Err(LimitbookError::corrupt(format!(
                    "order id {} appears more than once",
                    order.id
                )));
            }
            max_id = max_id.max(Some(order.id));
            engine.side_mut(order.side).insert(order);
        }

        if snapshot.next_order_id.0 == 0 {
            return Err(LimitbookError::corrupt("next_order_id 0 is never issued"));
        }
        // Never hand out an id that is already resting.
        engine.next_order_id = match max_id {
            None => snapshot.next_order_id,
            Some(max) => {
                let after_max = max.next().ok_or_else(|| {
                    LimitbookError::corrupt(format!("order id {max} leaves no id to issue"))
                })?;
                snapshot.next_order_id.max(after_max)
            }
        };

        tracing::info!(
            asks = engine.asks.len(),
            bids = engine.bids.len(),
            next_order_id = %engine.next_order_id,
            "Book restored from snapshot"
        );
        Ok(engine)
    }

    // =================================================================
    // Limit orders
    // =================================================================

    /// Rest a sell order. Does not match; call [`Self::match_book`] after.
    pub fn place_ask(&mut self, price: Price, quantity: Quantity) -> Result<OrderId> {
        self.place(OrderSide::Ask, price, quantity)
    }

    /// Rest a buy order. Does not match; call [`Self::match_book`] after.
    pub fn place_bid(&mut self, price: Price, quantity: Quantity) -> Result<OrderId> {
        self.place(OrderSide::Bid, price, quantity)
    }

    fn place(&mut self, side: OrderSide, price: Price, quantity: Quantity) -> Result<OrderId> {
        if quantity <= 0 {
            return Err(LimitbookError::invalid_order(format!(
                "quantity must be positive, got {quantity}"
            )));
        }
        if price <= 0 {
            return Err(LimitbookError::invalid_order(format!(
                "price must be positive, got {price}"
            )));
        }

        let id = self.next_order_id;
        self.next_order_id = id
            .next()
            .ok_or_else(|| LimitbookError::Internal("order id space exhausted".to_string()))?;
        self.side_mut(side).insert(Order::new(id, side, price, quantity));

        tracing::debug!(order_id = %id, %side, price, quantity, "Order placed");
        Ok(id)
    }

    // =================================================================
    // Matching
    // =================================================================

    /// Trade the top of book until it no longer crosses.
    ///
    /// Returns the trades in execution order. On return the book is not
    /// crossed: one side is empty or best ask > best bid.
    pub fn match_book(&mut self) -> Vec<Trade> {
        let mut trades = Vec::new();
        while let Some(trade) = self.cross_top() {
            tracing::info!(
                trade_id = %trade.id,
                ask_order = %trade.ask_order_id,
                bid_order = %trade.bid_order_id,
                price = trade.price,
                qty = trade.quantity,
                notional = %trade.notional(),
                "Trade matched"
            );
            trades.push(trade);
        }

        if trades.is_empty() && !self.asks.is_empty() && !self.bids.is_empty() {
            tracing::debug!("No orders eligible for matching");
        }
        trades
    }

    /// Execute one crossing pair, or `None` at the stop condition.
    fn cross_top(&mut self) -> Option<Trade> {
        let bid_price = self.bids.best_price()?;
        if !self.asks.peek_best().ok()?.crosses(bid_price) {
            return None;
        }
        let Some(following_trade_id) = self.next_trade_id.next() else {
            tracing::error!("Trade id space exhausted, book left crossed");
            return None;
        };

        let mut ask = self.asks.pop_best().ok()?;
        let mut bid = match self.bids.pop_best() {
            Ok(bid) => bid,
            Err(_) => {
                self.asks.insert(ask);
                return None;
            }
        };

        let quantity = ask.quantity.min(bid.quantity);
        ask.fill(quantity);
        bid.fill(quantity);

        let trade = Trade {
            id: self.next_trade_id,
            ask_order_id: ask.id,
            bid_order_id: bid.id,
            price: ask.price,
            quantity,
            executed_at: Utc::now(),
        };
        self.next_trade_id = following_trade_id;

        if !ask.is_filled() {
            self.asks.insert(ask);
        }
        if !bid.is_filled() {
            self.bids.insert(bid);
        }
        Some(trade)
    }

    // =================================================================
    // Market orders
    // =================================================================

    /// Buy up to `quantity` from the ask side, best price upward.
    pub fn market_buy(&mut self, quantity: Quantity) -> Result<MarketExecution> {
        self.sweep(OrderSide::Bid, quantity)
    }

    /// Sell up to `quantity` into the bid side, best price downward.
    pub fn market_sell(&mut self, quantity: Quantity) -> Result<MarketExecution> {
        self.sweep(OrderSide::Ask, quantity)
    }

    fn sweep(&mut self, taker: OrderSide, quantity: Quantity) -> Result<MarketExecution> {
        if quantity <= 0 {
            return Err(LimitbookError::invalid_order(format!(
                "market quantity must be positive, got {quantity}"
            )));
        }

        let mut execution = MarketExecution::new(taker, quantity);
        let book = self.side_mut(taker.opposite());

        while execution.unfilled != 0 && !book.is_empty() {
            let Ok(mut resting) = book.pop_best() else {
                break;
            };
            let matched = execution.unfilled.min(resting.quantity);
            resting.fill(matched);

            tracing::debug!(
                resting_order = %resting.id,
                price = resting.price,
                qty = matched,
                "Market fill"
            );
            execution.record(Fill {
                resting_order_id: resting.id,
                price: resting.price,
                quantity: matched,
            });

            if !resting.is_filled() {
                book.insert(resting);
            }
        }

        if execution.unfilled > 0 {
            tracing::warn!(
                side = %taker,
                requested = execution.requested,
                unfilled = execution.unfilled,
                "Market order exhausted the book; remainder discarded"
            );
        }
        Ok(execution)
    }

    // =================================================================
    // Queries
    // =================================================================

    #[must_use]
    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    #[must_use]
    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    /// Best (lowest) ask price, or `None` if no asks.
    #[must_use]
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Best (highest) bid price, or `None` if no bids.
    #[must_use]
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Spread = best_ask - best_bid. `None` if either side is empty.
    #[must_use]
    pub fn spread(&self) -> Option<Price> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => Some(ask - bid),
            _ => None,
        }
    }

    /// `true` when best ask <= best bid. Only possible between a placement
    /// and the following [`Self::match_book`].
    #[must_use]
    pub fn is_crossed(&self) -> bool {
        matches!((self.best_ask(), self.best_bid()), (Some(ask), Some(bid)) if ask <= bid)
    }

    /// Total number of resting orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.asks.len() + self.bids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }

    /// The id the next placement will receive.
    #[must_use]
    pub fn next_order_id(&self) -> OrderId {
        self.next_order_id
    }

    /// Asks best-first, then bids best-first. Does not modify the book.
    #[must_use]
    pub fn snapshot(&self) -> BookSnapshot {
        let mut orders = self.asks.snapshot();
        orders.extend(self.bids.iter().cloned());
        BookSnapshot {
            next_order_id: self.next_order_id,
            orders,
        }
    }

    fn side_mut(&mut self, side: OrderSide) -> &mut BookSide {
        match side {
            OrderSide::Ask => &mut self.asks,
            OrderSide::Bid => &mut self.bids,
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut engine = MatchingEngine::new();
        assert_eq!(engine.place_ask(100, 1).unwrap(), OrderId(1));
        assert_eq!(engine.place_bid(90, 1).unwrap(), OrderId(2));
        assert_eq!(engine.next_order_id(), OrderId(3));
    }

    #[test]
    fn invalid_placement_leaves_book_and_ids_untouched() {
        let mut engine = MatchingEngine::new();
        assert!(matches!(
            engine.place_ask(100, 0),
            Err(LimitbookError::InvalidOrder { .. })
        ));
        assert!(matches!(
            engine.place_bid(0, 5),
            Err(LimitbookError::InvalidOrder { .. })
        ));
        assert!(matches!(
            engine.place_bid(-3, 5),
            Err(LimitbookError::InvalidOrder { .. })
        ));
        assert!(engine.is_empty());
        assert_eq!(engine.place_bid(99, 1).unwrap(), OrderId(1));
    }

    #[test]
    fn placement_does_not_match() {
        let mut engine = MatchingEngine::new();
        engine.place_ask(100, 5).unwrap();
        engine.place_bid(105, 5).unwrap();
        assert!(engine.is_crossed());
        assert_eq!(engine.order_count(), 2);
    }

    #[test]
    fn trade_executes_at_ask_price() {
        let mut engine = MatchingEngine::new();
        engine.place_bid(105, 5).unwrap();
        engine.place_ask(100, 5).unwrap();

        let trades = engine.match_book();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].price, 100);
        assert_eq!(trades[0].quantity, 5);
        assert!(engine.is_empty());
    }

    #[test]
    fn no_crossing_produces_no_trades() {
        let mut engine = MatchingEngine::new();
        engine.place_bid(99, 1).unwrap();
        engine.place_ask(101, 1).unwrap();

        assert!(engine.match_book().is_empty());
        assert_eq!(engine.spread(), Some(2));
        assert_eq!(engine.order_count(), 2);
    }

    #[test]
    fn one_bid_sweeps_several_asks() {
        let mut engine = MatchingEngine::new();
        let a1 = engine.place_ask(100, 1).unwrap();
        let a2 = engine.place_ask(100, 1).unwrap();
        let a3 = engine.place_ask(101, 1).unwrap();
        let b = engine.place_bid(101, 3).unwrap();

        let trades = engine.match_book();
        let asks: Vec<OrderId> = trades.iter().map(|t| t.ask_order_id).collect();
        assert_eq!(asks, vec![a1, a2, a3]);
        assert!(trades.iter().all(|t| t.bid_order_id == b));
        let prices: Vec<Price> = trades.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![100, 100, 101]);
        assert!(engine.is_empty());
    }

    #[test]
    fn trade_ids_are_sequential() {
        let mut engine = MatchingEngine::new();
        engine.place_ask(100, 2).unwrap();
        engine.place_bid(100, 1).unwrap();
        let first = engine.match_book();
        engine.place_bid(100, 1).unwrap();
        let second = engine.match_book();
        assert_eq!(first[0].id, TradeId(1));
        assert_eq!(second[0].id, TradeId(2));
    }

    #[test]
    fn partial_fill_keeps_priority() {
        let mut engine = MatchingEngine::new();
        let older = engine.place_ask(100, 5).unwrap();
        let newer = engine.place_ask(100, 5).unwrap();
        engine.place_bid(100, 2).unwrap();
        engine.match_book();

        let best = engine.asks().peek_best().unwrap();
        assert_eq!(best.id, older);
        assert_eq!(best.quantity, 3);

        engine.place_bid(100, 4).unwrap();
        let trades = engine.match_book();
        assert_eq!(trades[0].ask_order_id, older);
        assert_eq!(trades[1].ask_order_id, newer);
        assert_eq!(trades[1].quantity, 1);
    }

    #[test]
    fn market_sell_walks_bids_downward() {
        let mut engine = MatchingEngine::new();
        engine.place_bid(100, 3).unwrap();
        engine.place_bid(98, 3).unwrap();
        engine.place_bid(99, 3).unwrap();

        let exec = engine.market_sell(5).unwrap();
        let prices: Vec<Price> = exec.fills.iter().map(|f| f.price).collect();
        assert_eq!(prices, vec![100, 99]);
        assert_eq!(exec.filled, 5);
        assert!(exec.is_complete());
        assert_eq!(engine.bids().levels(), vec![(99, 1), (98, 3)]);
    }

    #[test]
    fn market_remainder_is_reported_not_raised() {
        let mut engine = MatchingEngine::new();
        engine.place_ask(100, 2).unwrap();

        let exec = engine.market_buy(5).unwrap();
        assert_eq!(exec.filled, 2);
        assert_eq!(exec.unfilled, 3);
        assert!(engine.asks().is_empty());
    }

    #[test]
    fn market_orders_reject_non_positive_quantity() {
        let mut engine = MatchingEngine::new();
        engine.place_ask(100, 2).unwrap();
        assert!(engine.market_buy(0).is_err());
        assert!(engine.market_sell(-1).is_err());
        assert_eq!(engine.asks().total_quantity(), 2);
    }

    #[test]
    fn snapshot_lists_asks_then_bids_best_first() {
        let mut engine = MatchingEngine::new();
        engine.place_ask(102, 1).unwrap();
        engine.place_ask(101, 1).unwrap();
        engine.place_bid(98, 1).unwrap();
        engine.place_bid(99, 1).unwrap();

        let snap = engine.snapshot();
        let layout: Vec<(OrderSide, Price)> =
            snap.orders.iter().map(|o| (o.side, o.price)).collect();
        assert_eq!(
            layout,
            vec![
                (OrderSide::Ask, 101),
                (OrderSide::Ask, 102),
                (OrderSide::Bid, 99),
                (OrderSide::Bid, 98),
            ]
        );
        assert_eq!(snap.next_order_id, OrderId(5));
        assert_eq!(engine.order_count(), 4);
    }

    #[test]
    fn from_snapshot_restores_and_resumes_ids() {
        let snapshot = BookSnapshot {
            next_order_id: OrderId(2),
            orders: vec![
                Order::new(OrderId(7), OrderSide::Ask, 101, 5),
                Order::new(OrderId(3), OrderSide::Bid, 99, 2),
            ],
        };
        let mut engine = MatchingEngine::from_snapshot(snapshot).unwrap();
        assert_eq!(engine.best_ask(), Some(101));
        assert_eq!(engine.best_bid(), Some(99));
        assert_eq!(engine.place_bid(90, 1).unwrap(), OrderId(8));
    }

    #[test]
    fn from_snapshot_rejects_bad_records() {
        let zero_qty = BookSnapshot::from_orders(vec![Order::new(OrderId(1), OrderSide::Ask, 100, 0)]);
        assert!(matches!(
            MatchingEngine::from_snapshot(zero_qty),
            Err(LimitbookError::CorruptSnapshot { .. })
        ));

        let dup = BookSnapshot::from_orders(vec![
            Order::new(OrderId(1), OrderSide::Ask, 100, 1),
            Order::new(OrderId(1), OrderSide::Bid, 90, 1),
        ]);
        assert!(matches!(
            MatchingEngine::from_snapshot(dup),
            Err(LimitbookError::CorruptSnapshot { .. })
        ));
    }

    #[test]
    fn from_snapshot_rejects_unissuable_counters() {
        let zero = BookSnapshot {
            next_order_id: OrderId(0),
            orders: Vec::new(),
        };
        assert!(matches!(
            MatchingEngine::from_snapshot(zero),
            Err(LimitbookError::CorruptSnapshot { .. })
        ));

        let top = BookSnapshot {
            next_order_id: OrderId(5),
            orders: vec![Order::new(OrderId(u64::MAX), OrderSide::Ask, 100, 1)],
        };
        assert!(matches!(
            MatchingEngine::from_snapshot(top),
            Err(LimitbookError::CorruptSnapshot { .. })
        ));
    }

    #[test]
    fn exhausted_id_space_is_an_error_not_a_wrap() {
        let snapshot = BookSnapshot {
            next_order_id: OrderId(u64::MAX),
            orders: Vec::new(),
        };
        let mut engine = MatchingEngine::from_snapshot(snapshot).unwrap();
        assert!(matches!(
            engine.place_ask(100, 1),
            Err(LimitbookError::Internal(_))
        ));
        assert!(engine.is_empty());
        assert_eq!(engine.next_order_id(), OrderId(u64::MAX));
    }
}
