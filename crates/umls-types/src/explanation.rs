//! UMLS documentation row type.
//!
//! This module provides the `RrfExplanation` struct representing a row from
//! the abbreviation and label documentation file (`MRDOC.RRF`).

/// One row from `MRDOC.RRF`.
///
/// The loader only reads the SNOMED CT relationship mapping rows, which
/// pair a SNOMED CT attribute identifier (`value`) with the UMLS `REL` or
/// `RELA` label (`expl`) it was inverted to.
///
/// # Examples
///
/// ```
/// use umls_types::RrfExplanation;
///
/// let row = RrfExplanation {
///     dockey: "RELA".to_string(),
///     value: "363698007".to_string(),
///     explanation_type: "snomedct_rela_mapping".to_string(),
///     expl: "has_finding_site".to_string(),
/// };
///
/// assert_eq!(row.dockey, "RELA");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RrfExplanation {
    /// Data element or attribute name, e.g. `REL`, `RELA`, `TTY`.
    pub dockey: String,
    /// Abbreviation or value being documented.
    pub value: String,
    /// Kind of explanation, e.g. `expanded_form` or `snomedct_rel_mapping`.
    pub explanation_type: String,
    /// Explanation text.
    pub expl: String,
}
