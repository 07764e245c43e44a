//! UMLS archive loading.
//!
//! A Metathesaurus release is a zip whose `META/` directory holds the RRF
//! files. The archive is read as a stream, one entry at a time, so entries
//! are seen in archive order and never seeked. The four files the loader
//! uses must appear in an order that satisfies their dependencies; anything
//! else in the archive is drained and skipped.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};
use zip::read::read_zipfile_from_stream;

use crate::catalog::SourceCatalog;
use crate::ingest::IngestRun;
use crate::mapper::PropertyAliases;
use crate::store::TerminologyStore;
use crate::types::{IngestSummary, LoaderConfig, RrfFile, UmlsError, UmlsResult};

/// Loads UMLS archives into a terminology store.
///
/// # Example
///
/// ```ignore
/// use umls_loader::{TerminologyStore, UmlsLoader};
///
/// let store = TerminologyStore::open("umls.db")?;
/// store.create_schema()?;
///
/// let loader = UmlsLoader::with_defaults()?;
/// let summary = loader.load_archive_path(&store, "umls-2023AB-full.zip")?;
/// println!("{} codes", summary.concepts.written_records);
/// ```
#[derive(Debug, Clone)]
pub struct UmlsLoader {
    catalog: SourceCatalog,
    aliases: PropertyAliases,
    config: LoaderConfig,
}

impl UmlsLoader {
    /// Creates a loader from explicit registries and configuration.
    pub fn new(catalog: SourceCatalog, aliases: PropertyAliases, config: LoaderConfig) -> Self {
        Self {
            catalog,
            aliases,
            config,
        }
    }

    /// Creates a loader with the bundled catalog, the standard aliases and
    /// default configuration.
    pub fn with_defaults() -> UmlsResult<Self> {
        Ok(Self::new(
            SourceCatalog::umls()?,
            PropertyAliases::umls(),
            LoaderConfig::default(),
        ))
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    /// The source catalog.
    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    /// The loader configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Opens an archive file and loads it.
    pub fn load_archive_path<P: AsRef<Path>>(
        &self,
        store: &TerminologyStore,
        path: P,
    ) -> UmlsResult<IngestSummary> {
        let path = path.as_ref();
        info!("Opening UMLS archive {}", path.display());
        let file = File::open(path)?;
        self.load_archive(store, BufReader::with_capacity(1 << 20, file))
    }

    /// Loads a streamed archive.
    ///
    /// Code systems are registered first. Entries are then processed as they
    /// arrive until all four RRF files are done; the rest of the stream is
    /// left unread.
    ///
    /// Entries must record their sizes in the local file header. An entry
    /// written with a trailing data descriptor (general purpose flag bit 3)
    /// cannot be sized from a stream and fails the load with
    /// [`UmlsError::Zip`].
    pub fn load_archive<R: Read>(
        &self,
        store: &TerminologyStore,
        mut reader: R,
    ) -> UmlsResult<IngestSummary> {
        let start = Instant::now();
        let mut run = IngestRun::new(store, &self.catalog, &self.aliases, &self.config);
        let mut summary = IngestSummary {
            code_systems: run.register_code_systems()?,
            ..Default::default()
        };
        let mut seen = BTreeSet::new();

        while seen.len() < RrfFile::ALL.len() {
            let Some(mut entry) = read_zipfile_from_stream(&mut reader)? else {
                break;
            };
            let name = entry.name().to_string();
            let file = if entry.is_dir() {
                None
            } else {
                RrfFile::from_entry_name(&name)
            };

            let Some(file) = file else {
                let drained = io::copy(&mut entry, &mut io::sink())?;
                debug!("Skipping {} ({} bytes)", name, drained);
                summary.skipped_entries.push(name);
                continue;
            };
            if !seen.insert(file) {
                return Err(UmlsError::DuplicateEntry { name });
            }
            run.check_ready(file)?;

            info!("Processing {}", name);
            match file {
                RrfFile::Concepts => summary.concepts = run.load_concepts(&mut entry)?,
                RrfFile::Explanations => {
                    summary.relationship_mappings = run.load_explanations(&mut entry)?
                }
                RrfFile::Attributes => summary.attributes = run.load_attributes(&mut entry)?,
                RrfFile::Relationships => {
                    summary.relationships = run.load_relationships(&mut entry)?
                }
            }
        }

        let missing: Vec<&str> = RrfFile::ALL
            .iter()
            .filter(|file| !seen.contains(*file))
            .map(|file| file.file_name())
            .collect();
        if !missing.is_empty() {
            return Err(UmlsError::MissingFiles {
                missing: missing.join(", "),
            });
        }

        summary.properties_registered = run.properties_registered();
        info!(
            "UMLS load complete in {} ms: {} codes, {} attribute values, {} relationships, {} properties",
            start.elapsed().as_millis(),
            run.concepts().code_count(),
            summary.attributes.written_records,
            summary.relationships.written_records,
            summary.properties_registered
        );
        Ok(summary)
    }
}
