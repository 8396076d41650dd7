//! LimitBook interactive command loop.
//!
//! Usage:
//! ```bash
//! limitbook
//! limitbook --snapshot book.json --format legacy
//! limitbook --config limitbook.json --log debug --log-json
//! limitbook --no-persist
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use limitbook_persistence::{FileStore, MemoryStore, PersistencePort};
use limitbook_types::{LimitbookError, constants};

mod command;
mod logging;
mod session;
mod settings;

use session::{LoadPolicy, Session};
use settings::{FormatArg, Overrides};

/// LimitBook - single-instrument limit order book
#[derive(Parser)]
#[command(name = "limitbook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Snapshot file path
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Snapshot encoding
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Keep the book in memory only
    #[arg(long)]
    pub no_persist: bool,

    /// tracing filter directive (RUST_LOG wins when set)
    #[arg(long)]
    pub log: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Refuse to start if the snapshot cannot be loaded
    #[arg(long)]
    pub strict_load: bool,

    /// Cap on ladder rows
    #[arg(long)]
    pub max_rows: Option<usize>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            snapshot: self.snapshot.clone(),
            format: self.format,
            no_persist: self.no_persist,
            log: self.log.clone(),
            log_json: self.log_json,
            max_rows: self.max_rows,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = settings::apply(settings::load(cli.config.as_deref())?, cli.overrides());
    logging::init(&config.log)?;

    let port: Box<dyn PersistencePort> = if config.snapshot.enabled {
        Box::new(FileStore::from_config(&config.snapshot))
    } else {
        Box::new(MemoryStore::new())
    };
    tracing::info!(
        engine = constants::ENGINE_NAME,
        version = constants::VERSION,
        store = %port.describe(),
        "Starting"
    );

    let policy = if cli.strict_load {
        LoadPolicy::Abort
    } else {
        LoadPolicy::StartEmpty
    };
    let mut session = Session::open(port, config.display, policy)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{} v{}", constants::ENGINE_NAME, constants::VERSION)?;
    write!(out, "{}", command::HELP)?;
    write!(out, "{}", session.ladder())?;

    for line in io::stdin().lock().lines() {
        let line = line.map_err(LimitbookError::from)?;
        let parsed = match command::parse(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };

        match session.execute(parsed) {
            Ok(outcome) => {
                write!(out, "{}", outcome.render())?;
                if outcome.exit {
                    break;
                }
            }
            Err(err) => writeln!(out, "error: {err}")?,
        }
        out.flush()?;
    }

    tracing::info!(orders = session.engine().order_count(), "Session closed");
    Ok(())
}
