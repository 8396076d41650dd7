//! Snapshot file on local disk.
//!
//! Writes go to `<path>.tmp`, are synced, then renamed over `<path>`, so a
//! crash mid-write leaves the previous snapshot intact.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use limitbook_types::{BookSnapshot, LimitbookError, Result, SnapshotConfig, SnapshotFormat};

use crate::port::PersistencePort;
use crate::{json_codec, legacy_codec};

/// [`PersistencePort`] backed by a single file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: SnapshotFormat,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, format: SnapshotFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    #[must_use]
    pub fn from_config(config: &SnapshotConfig) -> Self {
        Self::new(config.path.clone(), config.format)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    fn encode(&self, snapshot: &BookSnapshot) -> Result<Vec<u8>> {
        match self.format {
            SnapshotFormat::Json => json_codec::encode(snapshot),
            SnapshotFormat::Legacy => legacy_codec::encode(snapshot).map(String::into_bytes),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<BookSnapshot> {
        match self.format {
            SnapshotFormat::Json => json_codec::decode(bytes),
            SnapshotFormat::Legacy => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| LimitbookError::corrupt(format!("not UTF-8 text: {e}")))?;
                legacy_codec::decode(text)
            }
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_atomic(&self, bytes: &[u8]) -> std::io::Result<()> {
        let tmp = self.tmp_path();
        let written = File::create(&tmp).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(err) = written.and_then(|()| fs::rename(&tmp, &self.path)) {
            // The target is untouched; only the partial temp file goes.
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }
        Ok(())
    }
}

impl PersistencePort for FileStore {
    fn save(&mut self, snapshot: &BookSnapshot) -> Result<()> {
        let bytes = self.encode(snapshot)?;
        self.write_atomic(&bytes)
            .map_err(|e| LimitbookError::PersistenceWrite {
                reason: format!("{}: {e}", self.path.display()),
            })?;

        tracing::debug!(
            path = %self.path.display(),
            format = %self.format,
            orders = snapshot.len(),
            bytes = bytes.len(),
            "Snapshot written"
        );
        Ok(())
    }

    fn load(&mut self) -> Result<BookSnapshot> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No snapshot found, starting empty");
                return Ok(BookSnapshot::empty());
            }
            Err(e) => {
                return Err(LimitbookError::Io(format!("{}: {e}", self.path.display())));
            }
        };

        let snapshot = self.decode(&bytes)?;
        tracing::info!(
            path = %self.path.display(),
            format = %self.format,
            orders = snapshot.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.path.display(), self.format)
    }
}
