//! # limitbook-matchcore
//!
//! **Continuous matching engine for LimitBook.**
//!
//! MatchCore holds the resting book for one instrument and executes:
//!
//! - **Limit crossing**: `match_book` trades the top of book until best ask
//!   is above best bid, at the ask's price
//! - **Market sweeps**: `market_buy` / `market_sell` walk the opposite side
//!   and never rest
//! - **Partial fills**: residual quantity goes back to its level with its
//!   original priority
//!
//! It performs no I/O. Persisting snapshots is the caller's job.

pub mod book_side;
pub mod determinism;
pub mod engine;
pub mod ladder;
pub mod price_level;

pub use book_side::BookSide;
pub use determinism::{compute_trade_root, trade_root_hex, verify_trade_root};
pub use engine::MatchingEngine;
pub use ladder::render_ladder;
pub use price_level::PriceLevel;
