//! # limitbook-persistence
//!
//! **Snapshot persistence for LimitBook.**
//!
//! The session writes a full-book snapshot through a [`PersistencePort`]
//! after each mutation and reads it back at startup.
//!
//! - [`FileStore`]: one file on disk, atomic replace
//! - [`MemoryStore`]: in-process, for `--no-persist` and tests
//!
//! Two encodings, picked by [`SnapshotFormat`](limitbook_types::SnapshotFormat):
//!
//! - [`json_codec`]: versioned serde_json envelope with a SHA-256 checksum
//! - [`legacy_codec`]: flat text readable and writable by the legacy tool
//!
//! Decoding is all-or-nothing: a single bad record fails the load with
//! `CorruptSnapshot`.

pub mod file_store;
pub mod json_codec;
pub mod legacy_codec;
pub mod memory_store;
pub mod port;
pub mod record;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use port::PersistencePort;
pub use record::OrderRecord;
