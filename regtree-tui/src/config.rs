//! Browser configuration.

use std::path::PathBuf;

use log::LevelFilter;

use crate::paths;

/// Fallback when no platform cache directory is available.
const LOCAL_LOG_FILE: &str = "regtree-tui.log";

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Rows above the menu reserved for the path line.
    pub status_rows: u16,

    /// Most verbose level written to the log file.
    pub log_level: LevelFilter,

    /// Where the log goes.
    pub log_file: PathBuf,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            status_rows: 1,
            log_level: LevelFilter::Info,
            log_file: paths::log_file().unwrap_or_else(|| PathBuf::from(LOCAL_LOG_FILE)),
        }
    }
}

impl BrowserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    pub fn status_rows(mut self, rows: u16) -> Self {
        self.status_rows = rows;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BrowserConfig::default();
        assert_eq!(config.status_rows, 1);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(config.log_file.ends_with("latest.log") || config.log_file.ends_with(LOCAL_LOG_FILE));
    }

    #[test]
    fn test_builder_overrides() {
        let config = BrowserConfig::new()
            .log_level(LevelFilter::Trace)
            .log_file("/tmp/browse.log")
            .status_rows(2);
        assert_eq!(config.log_level, LevelFilter::Trace);
        assert_eq!(config.log_file, PathBuf::from("/tmp/browse.log"));
        assert_eq!(config.status_rows, 2);
    }
}
