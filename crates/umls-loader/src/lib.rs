//! # umls-loader
//!
//! Streaming loader for UMLS Metathesaurus distributions.
//!
//! Reads the RRF files of a zipped release (`MRCONSO`, `MRDOC`, `MRSAT`,
//! `MRREL`) and writes the configured source vocabularies into a SQLite
//! terminology store: one coding per code, its declared attributes and its
//! hierarchical and mapped relationships.
//!
//! ## Features
//!
//! - `parallel` (default): decode RRF records in chunks on the rayon pool.
//!
//! ## Usage
//!
//! ```ignore
//! use umls_loader::{TerminologyStore, UmlsLoader};
//!
//! let store = TerminologyStore::open("umls.db")?;
//! store.create_schema()?;
//! UmlsLoader::with_defaults()?.load_archive_path(&store, "umls-2023AB-full.zip")?;
//!
//! let result = store.lookup("http://loinc.org", "79741-5")?;
//! println!("{}", result.to_parameters());
//! ```

#![warn(missing_docs)]

pub mod attribute;
pub mod batch;
pub mod catalog;
pub mod concept;
pub mod explanation;
pub mod index;
pub mod ingest;
pub mod loader;
pub mod lookup;
pub mod mapper;
pub mod parser;
pub mod relationship;
pub mod schema;
pub mod store;
pub mod types;

// Re-export main types
pub use attribute::AttributeFilter;
pub use batch::BatchWriter;
pub use catalog::{SourceCatalog, UmlsSource};
pub use concept::ConceptFilter;
pub use index::{ConceptIndex, IndexedCode, PropertyRegistry};
pub use ingest::IngestRun;
pub use loader::UmlsLoader;
pub use lookup::{operation_outcome, LookupProperty, LookupResult};
pub use mapper::{PropertyAliases, RelationshipMapping};
pub use parser::{RrfParser, RrfRecord};
pub use relationship::RelationshipFilter;
pub use store::{StoredCodeSystem, StoredCoding, TerminologyStore};
pub use types::{
    IngestSummary, LoadStats, LoaderConfig, RrfFile, SkipReason, UmlsError, UmlsResult,
};

// Re-export umls-types for convenience
pub use umls_types;
