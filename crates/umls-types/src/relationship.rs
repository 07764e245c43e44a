//! UMLS relationship type.
//!
//! This module provides the `RrfRelationship` struct representing a row from
//! the related concepts file (`MRREL.RRF`).

use crate::{well_known, Suppressible};

/// One relationship from `MRREL.RRF`.
///
/// `rel` describes how the second atom relates to the first: a `PAR` row
/// says `aui2` is a parent of `aui1`.
///
/// # Examples
///
/// ```
/// use umls_types::RrfRelationship;
///
/// let rel = RrfRelationship {
///     aui1: "A0000002".to_string(),
///     rel: "PAR".to_string(),
///     aui2: "A0000001".to_string(),
///     sab: "LNC".to_string(),
///     ..Default::default()
/// };
///
/// assert!(rel.is_parent());
/// assert!(!rel.is_child());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RrfRelationship {
    /// Concept unique identifier of the first concept.
    pub cui1: String,
    /// Atom unique identifier of the first atom.
    pub aui1: String,
    /// Column used to identify the first element.
    pub stype1: String,
    /// Relationship label, e.g. `PAR`, `CHD`, `RO`.
    pub rel: String,
    /// Concept unique identifier of the second concept.
    pub cui2: String,
    /// Atom unique identifier of the second atom.
    pub aui2: String,
    /// Column used to identify the second element.
    pub stype2: String,
    /// Additional relationship label. May legitimately be empty.
    pub rela: String,
    /// Relationship unique identifier.
    pub rui: String,
    /// Source asserted relationship identifier.
    pub srui: String,
    /// Abbreviated source vocabulary name.
    pub sab: String,
    /// Source of relationship labels.
    pub sl: String,
    /// Relationship group.
    pub rg: String,
    /// Source asserted directionality flag (`Y`, `N` or empty).
    pub dir: String,
    /// Suppressible flag.
    pub suppress: Option<Suppressible>,
}

impl RrfRelationship {
    /// Returns true unless the row is explicitly flagged not suppressible.
    pub fn is_suppressible(&self) -> bool {
        self.suppress != Some(Suppressible::No)
    }

    /// Returns true if the second atom is a parent of the first.
    pub fn is_parent(&self) -> bool {
        self.rel == well_known::REL_PARENT
    }

    /// Returns true if the second atom is a child of the first.
    pub fn is_child(&self) -> bool {
        self.rel == well_known::REL_CHILD
    }
}
