//! Config file loading and command-line overrides.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use limitbook_types::{LimitbookConfig, LimitbookError, Result, SnapshotFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Legacy,
}

impl FormatArg {
    pub fn to_core_type(self) -> SnapshotFormat {
        match self {
            FormatArg::Json => SnapshotFormat::Json,
            FormatArg::Legacy => SnapshotFormat::Legacy,
        }
    }
}

/// Flag values that replace individual config fields when present.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub snapshot: Option<PathBuf>,
    pub format: Option<FormatArg>,
    pub no_persist: bool,
    pub log: Option<String>,
    pub log_json: bool,
    pub max_rows: Option<usize>,
}

/// Read `path` as a JSON [`LimitbookConfig`], or use defaults when `None`.
pub fn load(path: Option<&Path>) -> Result<LimitbookConfig> {
    let Some(path) = path else {
        return Ok(LimitbookConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|err| LimitbookError::Io(format!("{}: {err}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|err| LimitbookError::Configuration(format!("{}: {err}", path.display())))
}

pub fn apply(mut config: LimitbookConfig, overrides: Overrides) -> LimitbookConfig {
    if let Some(path) = overrides.snapshot {
        config.snapshot.path = path;
    }
    if let Some(format) = overrides.format {
        config.snapshot.format = format.to_core_type();
    }
    if overrides.no_persist {
        config.snapshot.enabled = false;
    }
    if let Some(filter) = overrides.log {
        config.log.filter = filter;
    }
    if overrides.log_json {
        config.log.json = true;
    }
    if overrides.max_rows.is_some() {
        config.display.max_rows = overrides.max_rows;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_means_defaults() {
        assert_eq!(load(None).unwrap(), LimitbookConfig::default());
    }

    #[test]
    fn file_is_read_and_flags_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limitbook.json");
        std::fs::write(
            &path,
            r#"{ "snapshot": { "path": "book.txt", "format": "legacy" }, "log": { "filter": "debug" } }"#,
        )
        .unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.snapshot.path, PathBuf::from("book.txt"));
        assert_eq!(config.snapshot.format, SnapshotFormat::Legacy);

        let config = apply(
            config,
            Overrides {
                format: Some(FormatArg::Json),
                no_persist: true,
                max_rows: Some(3),
                ..Overrides::default()
            },
        );
        assert_eq!(config.snapshot.path, PathBuf::from("book.txt"));
        assert_eq!(config.snapshot.format, SnapshotFormat::Json);
        assert!(!config.snapshot.enabled);
        assert_eq!(config.log.filter, "debug");
        assert_eq!(config.display.max_rows, Some(3));
    }

    #[test]
    fn bad_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load(Some(&missing)), Err(LimitbookError::Io(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, r#"{ "snapshot": { "format": "xml" } }"#).unwrap();
        let err = load(Some(&broken)).unwrap_err();
        assert!(matches!(err, LimitbookError::Configuration(_)));
        assert!(format!("{err}").starts_with("LB_ERR_902"));
    }
}
