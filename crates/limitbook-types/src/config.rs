//! Configuration types for a LimitBook session.
//!
//! Every field has a default so a partial config file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitbookConfig {
    pub snapshot: SnapshotConfig,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

/// On-disk snapshot encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Versioned serde_json envelope with a checksum.
    #[default]
    Json,
    /// Flat text compatible with the legacy tool.
    Legacy,
}

impl std::fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

/// Where and how the book is persisted after each mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: PathBuf,
    pub format: SnapshotFormat,
    /// When `false` the session keeps the book in memory only.
    pub enabled: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::DEFAULT_SNAPSHOT_PATH),
            format: SnapshotFormat::default(),
            enabled: true,
        }
    }
}

/// Ladder rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    /// Cap on rendered rows. `None` renders the whole book.
    pub max_rows: Option<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: constants::DEFAULT_CURRENCY_SYMBOL.to_string(),
            max_rows: None,
        }
    }
}

/// Logging options. `RUST_LOG` takes precedence over `filter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: constants::DEFAULT_LOG_FILTER.to_string(),
            json: false,
        }
    }
}
