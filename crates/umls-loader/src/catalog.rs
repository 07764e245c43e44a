//! Source vocabulary catalog.
//!
//! The catalog lists the UMLS source vocabularies that are loaded, the term
//! types accepted for each (in priority order), and the FHIR `CodeSystem`
//! definition each source is stored under. Anything not in the catalog is
//! skipped by every stage.

use std::collections::BTreeMap;

use umls_types::{CodeSystem, CODE_SYSTEM_RESOURCE_TYPE};
use uuid::Uuid;

use crate::types::{UmlsError, UmlsResult};

const SNOMED_JSON: &str = include_str!("../resources/code-systems/snomed.json");
const ICD10PCS_JSON: &str = include_str!("../resources/code-systems/icd10pcs.json");
const ICD10CM_JSON: &str = include_str!("../resources/code-systems/icd10cm.json");
const LOINC_JSON: &str = include_str!("../resources/code-systems/loinc.json");
const CPT_JSON: &str = include_str!("../resources/code-systems/cpt.json");
const RXNORM_JSON: &str = include_str!("../resources/code-systems/rxnorm.json");
const CVX_JSON: &str = include_str!("../resources/code-systems/cvx.json");

/// One source vocabulary in the catalog.
#[derive(Debug, Clone)]
pub struct UmlsSource {
    /// UMLS source abbreviation (SAB).
    pub abbreviation: String,
    /// Stable identity of the code system, derived from its canonical URL.
    pub system_id: Uuid,
    /// Accepted term types, most preferred first.
    pub term_types: Vec<String>,
    /// Parsed code system definition.
    pub definition: CodeSystem,
    /// The definition exactly as supplied.
    pub definition_json: String,
}

impl UmlsSource {
    /// Parses a source from its code system definition.
    pub fn new(abbreviation: &str, term_types: &[&str], json: &str) -> UmlsResult<Self> {
        let invalid = |reason: String| UmlsError::InvalidCodeSystem {
            source_abbreviation: abbreviation.to_string(),
            reason,
        };

        let definition: CodeSystem =
            serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;
        if !definition.is_code_system() {
            return Err(invalid(format!(
                "expected resourceType {}, found {}",
                CODE_SYSTEM_RESOURCE_TYPE, definition.resource_type
            )));
        }
        if definition.url.is_empty() {
            return Err(invalid("missing canonical url".to_string()));
        }

        Ok(Self {
            abbreviation: abbreviation.to_string(),
            system_id: Uuid::new_v5(&Uuid::NAMESPACE_URL, definition.url.as_bytes()),
            term_types: term_types.iter().map(|tty| tty.to_string()).collect(),
            definition,
            definition_json: json.to_string(),
        })
    }

    /// Returns the position of `tty` in the priority list, or `None` if the
    /// term type is not accepted. Lower is better.
    pub fn term_type_rank(&self, tty: &str) -> Option<usize> {
        self.term_types.iter().position(|t| t == tty)
    }

    /// Canonical URL of the code system.
    pub fn url(&self) -> &str {
        &self.definition.url
    }

    /// Title of the code system.
    pub fn title(&self) -> &str {
        &self.definition.title
    }
}

/// Immutable registry of the sources to load, keyed by abbreviation.
///
/// # Example
///
/// ```
/// use umls_loader::SourceCatalog;
///
/// let catalog = SourceCatalog::umls().unwrap();
/// let loinc = catalog.get("LNC").unwrap();
/// assert_eq!(loinc.url(), "http://loinc.org");
/// assert_eq!(loinc.term_type_rank("LC"), Some(0));
/// assert_eq!(loinc.term_type_rank("OSN"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    sources: BTreeMap<String, UmlsSource>,
}

impl SourceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the default catalog from the bundled definitions.
    pub fn umls() -> UmlsResult<Self> {
        Self::new()
            .with_source("SNOMEDCT_US", &["FN", "PT", "SY"], SNOMED_JSON)?
            .with_source("ICD10PCS", &["PT", "HT"], ICD10PCS_JSON)?
            .with_source("ICD10CM", &["PT", "HT"], ICD10CM_JSON)?
            .with_source("LNC", &["LC", "LPDN", "LA", "DN", "HC", "LN", "LG"], LOINC_JSON)?
            .with_source("CPT", &["PT", "HT", "POS", "MP", "GLP"], CPT_JSON)?
            .with_source(
                "RXNORM",
                &["PSN", "MIN", "SBD", "SCD", "SBDG", "SCDG", "GPCK", "SY"],
                RXNORM_JSON,
            )?
            .with_source("CVX", &["PT"], CVX_JSON)
    }

    /// Adds a source, replacing any existing source with the same abbreviation.
    pub fn with_source(
        mut self,
        abbreviation: &str,
        term_types: &[&str],
        json: &str,
    ) -> UmlsResult<Self> {
        let source = UmlsSource::new(abbreviation, term_types, json)?;
        self.sources.insert(abbreviation.to_string(), source);
        Ok(self)
    }

    /// Looks up a source by abbreviation.
    pub fn get(&self, abbreviation: &str) -> Option<&UmlsSource> {
        self.sources.get(abbreviation)
    }

    /// Iterates sources in abbreviation order.
    pub fn iter(&self) -> impl Iterator<Item = &UmlsSource> {
        self.sources.values()
    }

    /// Returns the number of sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if the catalog has no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
