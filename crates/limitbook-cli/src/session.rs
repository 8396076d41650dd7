//! One interactive session: engine + persistence port + display settings.
//!
//! Every mutating command runs `match_book`, writes a snapshot, and
//! renders the ladder. A failed write is reported but never undoes the
//! in-memory change.

use std::fmt::Write as _;

use limitbook_matchcore::{MatchingEngine, render_ladder, trade_root_hex};
use limitbook_persistence::PersistencePort;
use limitbook_types::{
    DisplayConfig, LimitbookError, MarketExecution, OrderId, OrderSide, Result, Trade,
};

use crate::command::{Command, HELP};

/// What to do when the stored snapshot is corrupt. Other load errors
/// always abort, so an unreadable snapshot is never overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Log the error and start from an empty book.
    StartEmpty,
    /// Refuse to start.
    Abort,
}

/// Everything one command produced.
#[derive(Debug, Default)]
pub struct Outcome {
    pub placed: Option<(OrderSide, OrderId)>,
    pub market: Option<MarketExecution>,
    pub trades: Vec<Trade>,
    pub persist_error: Option<LimitbookError>,
    pub ladder: Option<String>,
    pub help: bool,
    pub exit: bool,
}

impl Outcome {
    /// Text for the terminal.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.help {
            out.push_str(HELP);
        }
        if let Some((side, id)) = self.placed {
            let _ = writeln!(out, "Placed {side} order {id}");
        }
        if let Some(market) = &self.market {
            let _ = writeln!(out, "{market}");
        }
        for trade in &self.trades {
            let _ = writeln!(out, "{trade}");
        }
        if let Some(err) = &self.persist_error {
            let _ = writeln!(out, "warning: book not saved: {err}");
        }
        if let Some(ladder) = &self.ladder {
            out.push_str(ladder);
        }
        out
    }
}

pub struct Session<P: PersistencePort> {
    engine: MatchingEngine,
    port: P,
    display: DisplayConfig,
}

impl<P: PersistencePort> Session<P> {
    /// Load the stored book and clear anything it left crossed.
    pub fn open(mut port: P, display: DisplayConfig, policy: LoadPolicy) -> Result<Self> {
        let engine = match port.load().and_then(MatchingEngine::from_snapshot) {
            Ok(engine) => engine,
            Err(err @ LimitbookError::CorruptSnapshot { .. })
                if policy == LoadPolicy::StartEmpty =>
            {
                tracing::error!(
                    store = %port.describe(),
                    error = %err,
                    "Could not load snapshot, starting with an empty book"
                );
                MatchingEngine::new()
            }
            Err(err) => return Err(err),
        };

        let mut session = Self {
            engine,
            port,
            display,
        };
        let trades = session.engine.match_book();
        if !trades.is_empty() {
            tracing::warn!(trades = trades.len(), "Loaded snapshot was crossed");
            if let Err(err) = session.persist() {
                tracing::debug!(error = %err, "Matched restore not saved yet");
            }
        }
        Ok(session)
    }

    /// Apply one command. `InvalidOrder` leaves the book unchanged and is
    /// returned as an error; everything else lands in the [`Outcome`].
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        tracing::info!(?command, "Executing command");
        let mut outcome = Outcome::default();
        match command {
            Command::Bid { price, quantity } => {
                let id = self.engine.place_bid(price, quantity)?;
                outcome.placed = Some((OrderSide::Bid, id));
            }
            Command::Ask { price, quantity } => {
                let id = self.engine.place_ask(price, quantity)?;
                outcome.placed = Some((OrderSide::Ask, id));
            }
            Command::Buy { quantity } => {
                outcome.market = Some(self.engine.market_buy(quantity)?);
            }
            Command::Sell { quantity } => {
                outcome.market = Some(self.engine.market_sell(quantity)?);
            }
            Command::Show => {
                outcome.ladder = Some(self.ladder());
                return Ok(outcome);
            }
            Command::Help => {
                outcome.help = true;
                return Ok(outcome);
            }
            Command::Exit => {
                outcome.exit = true;
                return Ok(outcome);
            }
        }

        outcome.trades = self.engine.match_book();
        if !outcome.trades.is_empty() {
            tracing::info!(
                trades = outcome.trades.len(),
                trade_root = %trade_root_hex(&outcome.trades),
                "Matching round complete"
            );
        }
        outcome.persist_error = self.persist().err();
        outcome.ladder = Some(self.ladder());
        Ok(outcome)
    }

    pub fn ladder(&self) -> String {
        render_ladder(&self.engine, &self.display)
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    #[cfg(test)]
    pub fn port(&self) -> &P {
        &self.port
    }

    fn persist(&mut self) -> Result<()> {
        let snapshot = self.engine.snapshot();
        self.port.save(&snapshot).inspect_err(|err| {
            tracing::warn!(
                store = %self.port.describe(),
                error = %err,
                "Snapshot write failed; in-memory book is still authoritative"
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use limitbook_persistence::{FileStore, MemoryStore};
    use limitbook_types::{BookSnapshot, Order, SnapshotFormat};

    use super::*;

    fn session() -> Session<MemoryStore> {
        Session::open(
            MemoryStore::new(),
            DisplayConfig::default(),
            LoadPolicy::StartEmpty,
        )
        .unwrap()
    }

    #[test]
    fn limit_commands_match_and_persist() {
        let mut session = session();
        session
            .execute(Command::Ask {
                price: 100,
                quantity: 10,
            })
            .unwrap();
        session
            .execute(Command::Ask {
                price: 101,
                quantity: 5,
            })
            .unwrap();
        let outcome = session
            .execute(Command::Bid {
                price: 101,
                quantity: 8,
            })
            .unwrap();

        assert_eq!(outcome.placed, Some((OrderSide::Bid, OrderId(3))));
        assert_eq!(outcome.trades.len(), 1);
        assert_eq!(outcome.trades[0].price, 100);
        assert_eq!(session.port().save_count(), 3);
        assert_eq!(
            session.port().latest().unwrap(),
            &session.engine().snapshot()
        );
        assert!(!session.engine().is_crossed());
    }

    #[test]
    fn invalid_order_is_an_error_and_not_persisted() {
        let mut session = session();
        let err = session
            .execute(Command::Bid {
                price: 100,
                quantity: 0,
            })
            .unwrap_err();
        assert!(matches!(err, LimitbookError::InvalidOrder { .. }));
        assert!(session.engine().is_empty());
        assert_eq!(session.port().save_count(), 0);
    }

    #[test]
    fn market_buy_on_empty_book_reports_remainder() {
        let mut session = session();
        let outcome = session.execute(Command::Buy { quantity: 100 }).unwrap();
        let market = outcome.market.as_ref().unwrap();
        assert_eq!(market.unfilled, 100);
        assert!(outcome.render().contains("100 unfilled"));
        assert!(session.engine().is_empty());
    }

    #[test]
    fn failed_write_keeps_book_in_memory() {
        let mut session = Session::open(
            MemoryStore::failing(),
            DisplayConfig::default(),
            LoadPolicy::StartEmpty,
        )
        .unwrap();
        let outcome = session
            .execute(Command::Ask {
                price: 100,
                quantity: 1,
            })
            .unwrap();

        assert!(matches!(
            outcome.persist_error,
            Some(LimitbookError::PersistenceWrite { .. })
        ));
        assert!(outcome.render().contains("warning: book not saved"));
        assert_eq!(session.engine().order_count(), 1);
    }

    #[test]
    fn crossed_snapshot_is_matched_on_open() {
        let crossed = BookSnapshot::from_orders(vec![
            Order::new(OrderId(1), OrderSide::Ask, 100, 4),
            Order::new(OrderId(2), OrderSide::Bid, 101, 4),
        ]);
        let session = Session::open(
            MemoryStore::with_snapshot(crossed),
            DisplayConfig::default(),
            LoadPolicy::StartEmpty,
        )
        .unwrap();
        assert!(session.engine().is_empty());
        assert_eq!(session.port().save_count(), 1);
    }

    #[test]
    fn corrupt_snapshot_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orderbook_data.json");
        std::fs::write(&path, "[{\"type\":\"ASK\",\"price\":x}]").unwrap();

        let lenient = Session::open(
            FileStore::new(&path, SnapshotFormat::Legacy),
            DisplayConfig::default(),
            LoadPolicy::StartEmpty,
        )
        .unwrap();
        assert!(lenient.engine().is_empty());

        let strict = Session::open(
            FileStore::new(&path, SnapshotFormat::Legacy),
            DisplayConfig::default(),
            LoadPolicy::Abort,
        );
        assert!(matches!(
            strict,
            Err(LimitbookError::CorruptSnapshot { .. })
        ));
    }

    /// Port whose snapshot exists but cannot be read.
    struct UnreadableStore;

    impl PersistencePort for UnreadableStore {
        fn save(&mut self, _snapshot: &BookSnapshot) -> Result<()> {
            Ok(())
        }

        fn load(&mut self) -> Result<BookSnapshot> {
            Err(LimitbookError::Io("orderbook_data.json: permission denied".to_string()))
        }

        fn describe(&self) -> String {
            "unreadable".to_string()
        }
    }

    #[test]
    fn unreadable_snapshot_aborts_even_when_starting_empty() {
        for policy in [LoadPolicy::StartEmpty, LoadPolicy::Abort] {
            let opened = Session::open(
                UnreadableStore,
                DisplayConfig::default(),
                policy,
            );
            assert!(
                matches!(opened, Err(LimitbookError::Io(_))),
                "{policy:?} did not abort"
            );
        }
    }

    #[test]
    fn file_backed_session_resumes_after_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");
        {
            let mut first = Session::open(
                FileStore::new(&path, SnapshotFormat::Json),
                DisplayConfig::default(),
                LoadPolicy::Abort,
            )
            .unwrap();
            first
                .execute(Command::Ask {
                    price: 100,
                    quantity: 3,
                })
                .unwrap();
        }

        let mut second = Session::open(
            FileStore::new(&path, SnapshotFormat::Json),
            DisplayConfig::default(),
            LoadPolicy::Abort,
        )
        .unwrap();
        let outcome = second
            .execute(Command::Bid {
                price: 100,
                quantity: 3,
            })
            .unwrap();
        assert_eq!(outcome.placed, Some((OrderSide::Bid, OrderId(2))));
        assert_eq!(outcome.trades.len(), 1);
        assert!(second.engine().is_empty());
    }

    #[test]
    fn control_commands_do_not_write() {
        let mut session = session();
        assert!(session.execute(Command::Show).unwrap().ladder.is_some());
        assert!(session.execute(Command::Help).unwrap().render().contains("Commands:"));
        assert!(session.execute(Command::Exit).unwrap().exit);
        assert_eq!(session.port().save_count(), 0);
    }
}
