//! Flat text encoding compatible with the legacy order book tool.
//!
//! Files look like JSON but are read by splitting, not by a JSON parser:
//!
//! ```text
//! [
//! {"type":"ASK","price":100,"quantity":2,"orderID":1},
//! {"type":"BID","price":99,"quantity":7,"orderID":3}
//! ]
//! ```
//!
//! Reading joins all lines, takes each `{...}` span, splits it on `,` and
//! then on the first `:`, and strips whitespace and `"` from keys and
//! values. There is no nesting and no escaping. The file carries no id
//! counter, so the next id is derived from the highest `orderID`.

use std::collections::HashMap;

use limitbook_types::{BookSnapshot, LimitbookError, Order, OrderId, OrderSide, Result};

use crate::record::{OrderRecord, validate};

/// Encode byte-for-byte the way the legacy writer did.
pub fn encode(snapshot: &BookSnapshot) -> Result<String> {
    let records = snapshot
        .orders
        .iter()
        .map(|order| {
            serde_json::to_string(&OrderRecord::from(order))
                .map_err(|e| LimitbookError::Serialization(e.to_string()))
        })
        .collect::<Result<Vec<String>>>()?;

    let mut out = String::from("[\n");
    out.push_str(&records.join(",\n"));
    out.push_str("\n]\n");
    Ok(out)
}

/// Decode legacy text. Empty input is an empty book; any bad record
/// rejects the whole file.
pub fn decode(text: &str) -> Result<BookSnapshot> {
    let content: String = text.lines().collect();
    if content.trim().is_empty() {
        return Ok(BookSnapshot::empty());
    }

    let mut orders = Vec::new();
    let mut rest = content.as_str();
    while let Some(open) = rest.find('{') {
        let after_open = &rest[open + 1..];
        let close = after_open.find('}').ok_or_else(|| {
            LimitbookError::corrupt(format!("record {} is missing its closing brace", orders.len()))
        })?;
        orders.push(parse_record(&after_open[..close], orders.len())?);
        rest = &after_open[close + 1..];
    }

    let snapshot = BookSnapshot::from_orders(orders);
    validate(&snapshot)?;
    Ok(snapshot)
}

fn parse_record(body: &str, index: usize) -> Result<Order> {
    let mut fields: HashMap<String, String> = HashMap::new();
    for token in body.split(',') {
        let (key, value) = token.split_once(':').unwrap_or((token, ""));
        let key = strip(key);
        if key.is_empty() {
            continue;
        }
        fields.insert(key, strip(value));
    }

    let field = |name: &str| {
        fields.get(name).map(String::as_str).ok_or_else(|| {
            LimitbookError::corrupt(format!("record {index}: missing field `{name}`"))
        })
    };
    let int = |name: &str| -> Result<i64> {
        let raw = field(name)?;
        raw.parse().map_err(|_| {
            LimitbookError::corrupt(format!("record {index}: `{name}` is not an integer: {raw:?}"))
        })
    };

    let tag = field("type")?;
    let side = OrderSide::from_tag(tag)
        .ok_or_else(|| LimitbookError::corrupt(format!("record {index}: unknown type {tag:?}")))?;
    let price = int("price")?;
    let quantity = int("quantity")?;
    let order_id = u64::try_from(int("orderID")?).map_err(|_| {
        LimitbookError::corrupt(format!("record {index}: orderID must not be negative"))
    })?;

    Ok(Order::new(OrderId(order_id), side, price, quantity))
}

fn strip(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '"')
        .collect()
}
