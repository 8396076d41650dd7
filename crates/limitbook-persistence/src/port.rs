//! The storage port the session persists the book through.

use limitbook_types::{BookSnapshot, Result};

/// Full-book snapshot storage.
///
/// Writes are synchronous and best-effort: no retry, no rollback. A failed
/// [`save`](PersistencePort::save) returns
/// [`LimitbookError::PersistenceWrite`](limitbook_types::LimitbookError::PersistenceWrite)
/// and leaves the in-memory book authoritative.
pub trait PersistencePort {
    /// Replace the stored snapshot.
    fn save(&mut self, snapshot: &BookSnapshot) -> Result<()>;

    /// Read the stored snapshot. Nothing stored yet means an empty book.
    fn load(&mut self) -> Result<BookSnapshot>;

    /// Short human-readable location, for logs.
    fn describe(&self) -> String;
}

impl<P: PersistencePort + ?Sized> PersistencePort for Box<P> {
    fn save(&mut self, snapshot: &BookSnapshot) -> Result<()> {
        (**self).save(snapshot)
    }

    fn load(&mut self) -> Result<BookSnapshot> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
