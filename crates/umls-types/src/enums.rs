//! UMLS and FHIR enumeration types.
//!
//! This module provides enum representations of the coded flags found in RRF
//! files (suppressibility) and of the FHIR concept property types declared by
//! code system definitions.

/// Suppressible flag carried by MRCONSO, MRSAT and MRREL rows.
///
/// Only rows flagged [`Suppressible::No`] are loaded.
///
/// # Examples
///
/// ```
/// use umls_types::Suppressible;
///
/// assert_eq!(Suppressible::from_flag("N"), Some(Suppressible::No));
/// assert_eq!(Suppressible::from_flag("O"), Some(Suppressible::Obsolete));
/// assert_eq!(Suppressible::from_flag(""), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suppressible {
    /// Obsolete content, whether obsoleted by the source or by NLM (`O`).
    Obsolete,
    /// Non-obsolete content marked suppressible by an editor (`E`).
    Editor,
    /// Non-obsolete content deemed suppressible during inversion (`Y`).
    Inversion,
    /// Not suppressible (`N`).
    No,
}

impl Suppressible {
    /// Parses the single-letter RRF flag.
    ///
    /// Only the first character is significant; returns `None` for an empty
    /// or unrecognized flag.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag.as_bytes().first()? {
            b'O' => Some(Self::Obsolete),
            b'E' => Some(Self::Editor),
            b'Y' => Some(Self::Inversion),
            b'N' => Some(Self::No),
            _ => None,
        }
    }
}

/// Semantic type of a code system property.
///
/// Mirrors the FHIR `concept-property-type` value set. The tag is stored in
/// the property schema row and tells a reader how to decode the generic text
/// value column.
///
/// # Examples
///
/// ```
/// use umls_types::PropertyType;
///
/// assert_eq!(PropertyType::from_tag("dateTime"), Some(PropertyType::DateTime));
/// assert_eq!(PropertyType::Coding.as_tag(), "Coding");
/// assert_eq!(PropertyType::Code.value_suffix(), "Code");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyType {
    /// A code from the same code system.
    #[cfg_attr(feature = "serde", serde(rename = "code"))]
    Code,
    /// A reference to a code, possibly in another code system.
    #[cfg_attr(feature = "serde", serde(rename = "Coding"))]
    Coding,
    /// Free text.
    #[cfg_attr(feature = "serde", serde(rename = "string"))]
    String,
    /// Whole number.
    #[cfg_attr(feature = "serde", serde(rename = "integer"))]
    Integer,
    /// Boolean flag.
    #[cfg_attr(feature = "serde", serde(rename = "boolean"))]
    Boolean,
    /// Date and time.
    #[cfg_attr(feature = "serde", serde(rename = "dateTime"))]
    DateTime,
    /// Decimal number.
    #[cfg_attr(feature = "serde", serde(rename = "decimal"))]
    Decimal,
}

impl PropertyType {
    /// Parses a FHIR property type tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "code" => Some(Self::Code),
            "Coding" => Some(Self::Coding),
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "dateTime" => Some(Self::DateTime),
            "decimal" => Some(Self::Decimal),
            _ => None,
        }
    }

    /// Returns the FHIR property type tag.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Coding => "Coding",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::DateTime => "dateTime",
            Self::Decimal => "decimal",
        }
    }

    /// Returns the suffix of the FHIR `value[x]` element for this type,
    /// e.g. `Code` for `valueCode`.
    pub fn value_suffix(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Coding => "Coding",
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::Decimal => "Decimal",
        }
    }
}
