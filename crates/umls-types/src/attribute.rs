//! UMLS attribute type.
//!
//! This module provides the `RrfAttribute` struct representing a row from
//! the simple concept and atom attributes file (`MRSAT.RRF`).

use crate::Suppressible;

/// One attribute from `MRSAT.RRF`.
///
/// Attributes attach a named literal value (ATN = ATV) to a source code.
///
/// # Examples
///
/// ```
/// use umls_types::{RrfAttribute, Suppressible};
///
/// let attribute = RrfAttribute {
///     code: "79741-5".to_string(),
///     atn: "LCS".to_string(),
///     sab: "LNC".to_string(),
///     atv: "ACTIVE".to_string(),
///     suppress: Some(Suppressible::No),
///     ..Default::default()
/// };
///
/// assert!(!attribute.is_suppressible());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RrfAttribute {
    /// Concept unique identifier.
    pub cui: String,
    /// Term unique identifier; empty for relationship attributes.
    pub lui: String,
    /// String unique identifier; empty for relationship attributes.
    pub sui: String,
    /// Metathesaurus atom (`A…`) or relationship (`R…`) identifier.
    pub metaui: String,
    /// Column the attribute is attached to (AUI, CODE, CUI, RUI, SCUI, SDUI).
    pub stype: String,
    /// Source asserted code the attribute belongs to.
    pub code: String,
    /// Attribute unique identifier.
    pub atui: String,
    /// Source asserted attribute identifier.
    pub satui: String,
    /// Attribute name.
    pub atn: String,
    /// Abbreviated source vocabulary name.
    pub sab: String,
    /// Attribute value. May legitimately be empty.
    pub atv: String,
    /// Suppressible flag.
    pub suppress: Option<Suppressible>,
}

impl RrfAttribute {
    /// Returns true unless the row is explicitly flagged not suppressible.
    pub fn is_suppressible(&self) -> bool {
        self.suppress != Some(Suppressible::No)
    }
}
