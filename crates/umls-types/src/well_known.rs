//! Well-known UMLS identifiers and labels.
//!
//! Constants for the RRF file names, source abbreviations, relationship
//! labels and FHIR property URIs the loader relies on.
//!
//! # Examples
//!
//! ```
//! use umls_types::well_known;
//!
//! assert_eq!(well_known::REL_PARENT, "PAR");
//! assert!(well_known::PARENT_PROPERTY_URI.ends_with("#parent"));
//! ```

// =============================================================================
// Metathesaurus files
// =============================================================================

/// Concept names and sources.
pub const MRCONSO: &str = "MRCONSO.RRF";

/// Documentation of abbreviations and labels.
pub const MRDOC: &str = "MRDOC.RRF";

/// Simple concept and atom attributes.
pub const MRSAT: &str = "MRSAT.RRF";

/// Related concepts.
pub const MRREL: &str = "MRREL.RRF";

/// Field delimiter used by every RRF file.
pub const RRF_DELIMITER: u8 = b'|';

// =============================================================================
// Languages and sources
// =============================================================================

/// English, the only language loaded by default.
pub const LANGUAGE_ENGLISH: &str = "ENG";

/// SNOMED CT US Edition.
pub const SNOMEDCT_US: &str = "SNOMEDCT_US";

/// LOINC.
pub const LNC: &str = "LNC";

// =============================================================================
// Relationships
// =============================================================================

/// Relationship label: second atom is a parent of the first.
pub const REL_PARENT: &str = "PAR";

/// Relationship label: second atom is a child of the first.
pub const REL_CHILD: &str = "CHD";

/// MRDOC key for relationship labels.
pub const DOCKEY_REL: &str = "REL";

/// MRDOC key for additional relationship labels.
pub const DOCKEY_RELA: &str = "RELA";

/// MRDOC explanation type pairing SNOMED CT attributes with `REL` labels.
pub const SNOMEDCT_REL_MAPPING: &str = "snomedct_rel_mapping";

/// MRDOC explanation type pairing SNOMED CT attributes with `RELA` labels.
pub const SNOMEDCT_RELA_MAPPING: &str = "snomedct_rela_mapping";

// =============================================================================
// FHIR concept properties
// =============================================================================

/// URI of the FHIR parent-link concept property.
pub const PARENT_PROPERTY_URI: &str = "http://hl7.org/fhir/concept-properties#parent";

/// URI of the FHIR child-link concept property.
pub const CHILD_PROPERTY_URI: &str = "http://hl7.org/fhir/concept-properties#child";
