//! Two-column text rendering of the book.
//!
//! Rank *i* bid is printed next to rank *i* ask, best first, until both
//! sides run out. A side with no order at a rank leaves its cell blank.

use std::fmt::Write as _;

use limitbook_types::{DisplayConfig, Order};

use crate::MatchingEngine;

const RULE: &str = "-----------------------------------------\n";
const HEADER: &str = "\tBid\t\t\tAsk\n";
const BLANK_BID: &str = "\t\t";

/// Render the ladder for `engine`.
#[must_use]
pub fn render_ladder(engine: &MatchingEngine, config: &DisplayConfig) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push_str(HEADER);
    out.push_str(RULE);

    let mut bids = engine.bids().iter();
    let mut asks = engine.asks().iter();
    let mut rows = 0usize;

    loop {
        if config.max_rows.is_some_and(|max| rows >= max) {
            break;
        }
        let (bid, ask) = (bids.next(), asks.next());
        if bid.is_none() && ask.is_none() {
            break;
        }

        match bid {
            Some(order) => {
                push_cell(&mut out, order, &config.currency_symbol);
                out.push('\t');
            }
            None => out.push_str(BLANK_BID),
        }
        if let Some(order) = ask {
            push_cell(&mut out, order, &config.currency_symbol);
        }
        out.push('\n');
        rows += 1;
    }
    out
}

fn push_cell(out: &mut String, order: &Order, currency: &str) {
    // Writing to a String cannot fail.
    let _ = write!(out, "Price {currency}{} Size {}", order.price, order.quantity);
}
