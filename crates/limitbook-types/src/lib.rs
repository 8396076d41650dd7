//! # limitbook-types
//!
//! Shared types, errors, and configuration for the **LimitBook** matching engine.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`OrderId`], [`TradeId`]
//! - **Order model**: [`Order`], [`OrderSide`], [`Price`], [`Quantity`]
//! - **Execution model**: [`Trade`], [`Fill`], [`MarketExecution`]
//! - **Persistence model**: [`BookSnapshot`]
//! - **Configuration**: [`LimitbookConfig`], [`SnapshotConfig`], [`DisplayConfig`], [`LogConfig`]
//! - **Errors**: [`LimitbookError`] with `LB_ERR_` prefix codes
//! - **Constants**: defaults and digest tags

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod order;
pub mod snapshot;
pub mod trade;

pub use config::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use snapshot::*;
pub use trade::*;

// Constants are accessed via `limitbook_types::constants::FOO`.
