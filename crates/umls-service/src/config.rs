//! Environment configuration.

use umls_loader::LoaderConfig;

/// Default archive location.
pub const DEFAULT_ARCHIVE_PATH: &str = "umls-2023AB-full.zip";
/// Default SQLite database location.
pub const DEFAULT_DB_PATH: &str = "umls.db";
/// Default number of writes per transaction.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Settings read from `UMLS_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// `UMLS_ARCHIVE_PATH`
    pub archive_path: String,
    /// `UMLS_DB_PATH`
    pub db_path: String,
    /// `UMLS_BATCH_SIZE`
    pub batch_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            archive_path: DEFAULT_ARCHIVE_PATH.to_string(),
            db_path: DEFAULT_DB_PATH.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ServiceConfig {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to the defaults for
    /// unset or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            archive_path: lookup("UMLS_ARCHIVE_PATH")
                .unwrap_or_else(|| DEFAULT_ARCHIVE_PATH.to_string()),
            db_path: lookup("UMLS_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            batch_size: lookup("UMLS_BATCH_SIZE")
                .and_then(|v| v.trim().parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_BATCH_SIZE),
        }
    }

    /// Loader configuration for these settings.
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            batch_size: self.batch_size,
            ..Default::default()
        }
    }
}
