//! System-wide constants for the LimitBook matching engine.

/// Default snapshot file, same name the legacy tool used.
pub const DEFAULT_SNAPSHOT_PATH: &str = "orderbook_data.json";

/// Current version of the JSON snapshot envelope.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Domain tag mixed into the trade-root digest.
pub const TRADE_ROOT_DOMAIN: &[u8] = b"limitbook:trade_root:v1:";

/// Currency symbol printed in front of ladder prices.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "\u{a3}";

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "LimitBook";
