//! UMLS concept (atom) type.
//!
//! This module provides the `RrfConcept` struct representing one atom row
//! from the Metathesaurus concept names and sources file (`MRCONSO.RRF`).

use crate::Suppressible;

/// One atom from `MRCONSO.RRF`.
///
/// Each row names a concept (CUI) as it appears in one source vocabulary
/// (SAB) under one term type (TTY). Several rows usually share the same
/// source code, and the loader picks one of them as the display text.
///
/// # Examples
///
/// ```
/// use umls_types::{RrfConcept, Suppressible};
///
/// let atom = RrfConcept {
///     cui: "C0011849".to_string(),
///     lat: "ENG".to_string(),
///     aui: "A0000001".to_string(),
///     sab: "SNOMEDCT_US".to_string(),
///     tty: "PT".to_string(),
///     code: "73211009".to_string(),
///     string: "Diabetes mellitus".to_string(),
///     suppress: Some(Suppressible::No),
///     ..Default::default()
/// };
///
/// assert!(!atom.is_suppressible());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RrfConcept {
    /// Concept unique identifier (CUI).
    pub cui: String,
    /// Language of the term, e.g. `ENG`.
    pub lat: String,
    /// Term status.
    pub ts: String,
    /// Term unique identifier (LUI).
    pub lui: String,
    /// String type.
    pub stt: String,
    /// String unique identifier (SUI).
    pub sui: String,
    /// Whether this atom is preferred for its string within the concept.
    pub is_preferred: bool,
    /// Atom unique identifier (AUI). Relationship rows point at atoms.
    pub aui: String,
    /// Source asserted atom identifier.
    pub saui: Option<String>,
    /// Source asserted concept identifier.
    pub scui: Option<String>,
    /// Source asserted descriptor identifier.
    pub sdui: Option<String>,
    /// Abbreviated source vocabulary name.
    pub sab: String,
    /// Term type in the source vocabulary, e.g. `PT`.
    pub tty: String,
    /// Most useful source asserted identifier.
    pub code: String,
    /// The term text.
    pub string: String,
    /// Source restriction level.
    pub srl: Option<u32>,
    /// Suppressible flag.
    pub suppress: Option<Suppressible>,
    /// Content view flag bit field.
    pub cvf: Option<u64>,
}

impl RrfConcept {
    /// Returns true unless the row is explicitly flagged not suppressible.
    ///
    /// A missing flag counts as suppressible.
    pub fn is_suppressible(&self) -> bool {
        self.suppress != Some(Suppressible::No)
    }
}
