//! In-process snapshot storage, used when persistence is switched off.

use limitbook_types::{BookSnapshot, LimitbookError, Result};

use crate::port::PersistencePort;

/// [`PersistencePort`] that keeps the latest snapshot in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    latest: Option<BookSnapshot>,
    saves: usize,
    fail_writes: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a snapshot already stored.
    #[must_use]
    pub fn with_snapshot(snapshot: BookSnapshot) -> Self {
        Self {
            latest: Some(snapshot),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn latest(&self) -> Option<&BookSnapshot> {
        self.latest.as_ref()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl MemoryStore {
    /// A store whose every save fails, as a full disk would.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }
}

impl PersistencePort for MemoryStore {
    fn save(&mut self, snapshot: &BookSnapshot) -> Result<()> {
        if self.fail_writes {
            return Err(LimitbookError::PersistenceWrite {
                reason: "memory store rejects writes".to_string(),
            });
        }
        self.latest = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }

    fn load(&mut self) -> Result<BookSnapshot> {
        Ok(self.latest.clone().unwrap_or_default())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use limitbook_types::{Order, OrderId, OrderSide};

    use super::*;

    #[test]
    fn fresh_store_loads_empty() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        assert!(store.latest().is_none());
    }

    #[test]
    fn save_then_load() {
        let snap = BookSnapshot::from_orders(vec![Order::new(OrderId(1), OrderSide::Bid, 10, 1)]);
        let mut store = MemoryStore::new();
        store.save(&snap).unwrap();
        assert_eq!(store.load().unwrap(), snap);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn failing_store_reports_write_error() {
        let mut store = MemoryStore::failing();
        assert!(matches!(
            store.save(&BookSnapshot::empty()),
            Err(LimitbookError::PersistenceWrite { .. })
        ));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn preloaded_store() {
        let snap = BookSnapshot::from_orders(vec![Order::new(OrderId(3), OrderSide::Ask, 10, 1)]);
        let mut store = MemoryStore::with_snapshot(snap.clone());
        assert_eq!(store.load().unwrap(), snap);
    }
}
