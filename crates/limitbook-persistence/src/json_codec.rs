//! Versioned JSON snapshot envelope (the default encoding).
//!
//! ```json
//! {
//!   "version": 1,
//!   "saved_at": "2026-01-01T00:00:00Z",
//!   "next_order_id": 4,
//!   "checksum": "<sha256 hex of the compact orders array>",
//!   "orders": [ { "type": "ASK", "price": 100, "quantity": 2, "orderID": 1 } ]
//! }
//! ```

use chrono::{DateTime, Utc};
use limitbook_types::{
    BookSnapshot, LimitbookError, OrderId, Result, constants::SNAPSHOT_VERSION,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::record::{OrderRecord, validate};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    version: u32,
    saved_at: DateTime<Utc>,
    next_order_id: u64,
    checksum: String,
    orders: Vec<OrderRecord>,
}

/// Encode a snapshot as pretty-printed JSON.
pub fn encode(snapshot: &BookSnapshot) -> Result<Vec<u8>> {
    let orders: Vec<OrderRecord> = snapshot.orders.iter().map(OrderRecord::from).collect();
    let envelope = Envelope {
        version: SNAPSHOT_VERSION,
        saved_at: Utc::now(),
        next_order_id: snapshot.next_order_id.0,
        checksum: checksum(&orders)?,
        orders,
    };
    let mut bytes = serde_json::to_vec_pretty(&envelope)
        .map_err(|e| LimitbookError::Serialization(e.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode and verify a snapshot. Any defect rejects the whole file.
pub fn decode(bytes: &[u8]) -> Result<BookSnapshot> {
    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|e| LimitbookError::corrupt(format!("invalid snapshot JSON: {e}")))?;

    if envelope.version != SNAPSHOT_VERSION {
        return Err(LimitbookError::corrupt(format!(
            "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
            envelope.version
        )));
    }

    let actual = checksum(&envelope.orders)?;
    if actual != envelope.checksum {
        return Err(LimitbookError::corrupt(format!(
            "checksum mismatch: expected {}, got {actual}",
            envelope.checksum
        )));
    }

    let snapshot = BookSnapshot {
        next_order_id: OrderId(envelope.next_order_id),
        orders: envelope.orders.into_iter().map(Into::into).collect(),
    };
    validate(&snapshot)?;
    Ok(snapshot)
}

/// SHA-256 over the compact JSON form of the orders array.
fn checksum(orders: &[OrderRecord]) -> Result<String> {
    let canonical =
        serde_json::to_vec(orders).map_err(|e| LimitbookError::Serialization(e.to_string()))?;
    Ok(hex::encode(Sha256::digest(&canonical)))
}
