//! Loader-specific types: errors, configuration and load statistics.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use umls_types::well_known;

/// Errors that can occur while loading a UMLS distribution or reading the store.
#[derive(Error, Debug)]
pub enum UmlsError {
    /// I/O error reading the archive.
    #[error("IO error reading UMLS archive: {0}")]
    Io(#[from] std::io::Error),

    /// RRF record reading error.
    #[error("RRF reading error: {0}")]
    Csv(#[from] csv::Error),

    /// Archive container error.
    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Terminology store error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON error in a code system definition or lookup output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A code system definition could not be used.
    #[error("Invalid code system definition for {source_abbreviation}: {reason}")]
    InvalidCodeSystem {
        /// Source abbreviation the definition was registered under.
        source_abbreviation: String,
        /// What was wrong with it.
        reason: String,
    },

    /// An archive entry arrived before a file it depends on.
    #[error("Expected to read {requires} before {file}; archive layout is not supported")]
    OutOfOrder {
        /// The file that arrived too early.
        file: RrfFile,
        /// The file that must be processed first.
        requires: RrfFile,
    },

    /// A recognized file appeared twice in the archive.
    #[error("Archive contains more than one {name}")]
    DuplicateEntry {
        /// The repeated file name.
        name: String,
    },

    /// The archive ended before all required files were processed.
    #[error("Required UMLS files not found in archive: {missing}")]
    MissingFiles {
        /// Comma separated names of the missing files.
        missing: String,
    },

    /// An attribute references a code that was not loaded from MRCONSO.
    #[error("Unknown code: {source_abbreviation}|{code}")]
    UnknownCode {
        /// Source abbreviation of the attribute.
        source_abbreviation: String,
        /// The unresolved source code.
        code: String,
    },

    /// No code system is registered under this URL.
    #[error("Code system not found: {url}")]
    UnknownSystem {
        /// The requested canonical URL.
        url: String,
    },

    /// The code system has no such code.
    #[error("Code not found: {system}|{code}")]
    UnknownCoding {
        /// The requested canonical URL.
        system: String,
        /// The requested code.
        code: String,
    },

    /// The run was cancelled between batches.
    #[error("Load cancelled")]
    Cancelled,
}

impl UmlsError {
    /// Returns true for errors caused by the caller's input rather than by
    /// the data or the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::UnknownSystem { .. } | Self::UnknownCoding { .. })
    }
}

/// Result type for UMLS operations.
pub type UmlsResult<T> = Result<T, UmlsError>;

/// The four Metathesaurus files the loader consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RrfFile {
    /// `MRCONSO.RRF`: atoms and their codes.
    Concepts,
    /// `MRDOC.RRF`: relationship label documentation.
    Explanations,
    /// `MRSAT.RRF`: attributes.
    Attributes,
    /// `MRREL.RRF`: relationships.
    Relationships,
}

impl RrfFile {
    /// All required files, in processing order.
    pub const ALL: [RrfFile; 4] = [
        RrfFile::Concepts,
        RrfFile::Explanations,
        RrfFile::Attributes,
        RrfFile::Relationships,
    ];

    /// Returns the RRF file name.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Concepts => well_known::MRCONSO,
            Self::Explanations => well_known::MRDOC,
            Self::Attributes => well_known::MRSAT,
            Self::Relationships => well_known::MRREL,
        }
    }

    /// Matches an archive entry name by suffix.
    ///
    /// The name must either be the bare file name or end in `/` followed by
    /// it, so `META/MRCONSO.RRF` matches but `OLD_MRCONSO.RRF` does not.
    pub fn from_entry_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|file| {
            let file_name = file.file_name();
            name.strip_suffix(file_name)
                .is_some_and(|prefix| prefix.is_empty() || prefix.ends_with('/'))
        })
    }

    /// Files that must be fully processed before this one.
    pub fn prerequisites(self) -> &'static [RrfFile] {
        match self {
            Self::Concepts | Self::Explanations => &[],
            Self::Attributes => &[RrfFile::Concepts],
            Self::Relationships => &[RrfFile::Concepts, RrfFile::Explanations],
        }
    }
}

impl fmt::Display for RrfFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Configuration for a load run.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Writes per transaction.
    pub batch_size: usize,
    /// The single MRCONSO language that is loaded.
    pub language: String,
    /// Raw records read and decoded together (affects memory usage).
    pub decode_chunk_size: usize,
    /// Cancellation flag, checked after each committed batch.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 500,
            language: well_known::LANGUAGE_ENGLISH.to_string(),
            decode_chunk_size: 4096,
            cancel: None,
        }
    }
}

impl LoaderConfig {
    /// Returns true if the cancellation flag is set.
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

/// Why a record was not written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// Source vocabulary is not in the catalog.
    UnknownSource,
    /// Language other than the configured one.
    Language,
    /// Row is obsolete or suppressible.
    Suppressed,
    /// Term type not accepted for the source.
    TermType,
    /// A better or equally ranked term type was already kept for the code.
    Outranked,
    /// Attribute name is not a declared property of the code system.
    UndeclaredProperty,
    /// Relationship label has no mapping and is not a parent/child link.
    UnmappedRelationship,
    /// One of the relationship's atoms was not loaded.
    MissingEndpoint,
}

impl SkipReason {
    /// Short label used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownSource => "unknown source",
            Self::Language => "language",
            Self::Suppressed => "suppressed",
            Self::TermType => "term type",
            Self::Outranked => "outranked",
            Self::UndeclaredProperty => "undeclared property",
            Self::UnmappedRelationship => "unmapped relationship",
            Self::MissingEndpoint => "missing endpoint",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistics from loading one RRF file.
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Total records read from the file.
    pub total_records: usize,
    /// Records that produced a write.
    pub written_records: usize,
    /// Records not written, by reason.
    pub skipped: BTreeMap<SkipReason, usize>,
    /// Written records broken down by a per-file key (source, property, ...).
    pub by_key: BTreeMap<String, usize>,
    /// Time taken in milliseconds.
    pub load_time_ms: u64,
}

impl LoadStats {
    /// Records a skipped record.
    pub fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_default() += 1;
    }

    /// Records a written record under a breakdown key.
    pub fn written(&mut self, key: impl Into<String>) {
        self.written_records += 1;
        *self.by_key.entry(key.into()).or_default() += 1;
    }

    /// Returns the number of records skipped for `reason`.
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Returns the total number of skipped records.
    pub fn skipped_records(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Returns the percentage of records that produced a write.
    pub fn write_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.written_records as f64 / self.total_records as f64) * 100.0
        }
    }
}

/// Outcome of a complete archive load.
#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    /// Code systems registered at the start of the run.
    pub code_systems: usize,
    /// MRCONSO statistics.
    pub concepts: LoadStats,
    /// Number of relationship label mappings read from MRDOC.
    pub relationship_mappings: usize,
    /// MRSAT statistics.
    pub attributes: LoadStats,
    /// MRREL statistics.
    pub relationships: LoadStats,
    /// Property schema rows created during the run.
    pub properties_registered: usize,
    /// Names of archive entries that were drained and skipped.
    pub skipped_entries: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_config_default() {
        let config = LoaderConfig::default();
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.language, "ENG");
        assert!(!config.is_cancelled());
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let config = LoaderConfig {
            cancel: Some(flag.clone()),
            ..Default::default()
        };
        assert!(!config.is_cancelled());
        flag.store(true, Ordering::SeqCst);
        assert!(config.is_cancelled());
    }

    #[test]
    fn test_rrf_file_from_entry_name() {
        assert_eq!(
            RrfFile::from_entry_name("2023AB/META/MRCONSO.RRF"),
            Some(RrfFile::Concepts)
        );
        assert_eq!(RrfFile::from_entry_name("MRREL.RRF"), Some(RrfFile::Relationships));
        assert_eq!(RrfFile::from_entry_name("2023AB/META/MRSAT.RRF"), Some(RrfFile::Attributes));
        assert_eq!(RrfFile::from_entry_name("2023AB/META/MRDOC.RRF"), Some(RrfFile::Explanations));
        assert_eq!(RrfFile::from_entry_name("2023AB/META/XMRCONSO.RRF"), None);
        assert_eq!(RrfFile::from_entry_name("2023AB/META/MRSTY.RRF"), None);
        assert_eq!(RrfFile::from_entry_name("2023AB/META/MRCONSO.RRF.gz"), None);
    }

    #[test]
    fn test_prerequisites() {
        assert!(RrfFile::Concepts.prerequisites().is_empty());
        assert_eq!(RrfFile::Attributes.prerequisites(), &[RrfFile::Concepts]);
        assert_eq!(
            RrfFile::Relationships.prerequisites(),
            &[RrfFile::Concepts, RrfFile::Explanations]
        );
    }

    #[test]
    fn test_load_stats() {
        let mut stats = LoadStats {
            total_records: 4,
            ..Default::default()
        };
        stats.written("LNC");
        stats.written("LNC");
        stats.skip(SkipReason::Language);
        stats.skip(SkipReason::Outranked);

        assert_eq!(stats.written_records, 2);
        assert_eq!(stats.by_key["LNC"], 2);
        assert_eq!(stats.skipped_for(SkipReason::Language), 1);
        assert_eq!(stats.skipped_for(SkipReason::Suppressed), 0);
        assert_eq!(stats.skipped_records(), 2);
        assert!((stats.write_rate() - 50.0).abs() < 0.01);
    }
}
