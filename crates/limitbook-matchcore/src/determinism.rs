//! Trade-root digests for comparing matching runs.
//!
//! Two engines fed the same commands must emit the same trades. The
//! `trade_root` is a SHA-256 hash over the trade list that makes this
//! cheap to check (after a snapshot reload, or across replays) without
//! comparing full payloads. Timestamps are deliberately left out.

use limitbook_types::{Trade, constants::TRADE_ROOT_DOMAIN};
use sha2::{Digest, Sha256};

/// Compute the trade root hash over a set of trades.
///
/// Depends on, in order: trade ids, ask/bid order ids, prices and
/// quantities. The same trades in the same order always produce the same
/// root.
#[must_use]
pub fn compute_trade_root(trades: &[Trade]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(TRADE_ROOT_DOMAIN);
    hasher.update((trades.len() as u64).to_le_bytes());

    for trade in trades {
        hasher.update(trade.id.0.to_le_bytes());
        hasher.update(trade.ask_order_id.0.to_le_bytes());
        hasher.update(trade.bid_order_id.0.to_le_bytes());
        hasher.update(trade.price.to_le_bytes());
        hasher.update(trade.quantity.to_le_bytes());
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Hex form of [`compute_trade_root`], for logs.
#[must_use]
pub fn trade_root_hex(trades: &[Trade]) -> String {
    hex::encode(compute_trade_root(trades))
}

/// Verify that a given trade root matches the expected hash.
#[must_use]
pub fn verify_trade_root(trades: &[Trade], expected_root: &[u8; 32]) -> bool {
    compute_trade_root(trades) == *expected_root
}
