//! Property value type.
//!
//! The store keeps every property value in a single text column. This module
//! provides the typed view at the boundary: writers turn a value into its
//! text form, readers decode the text according to the property's declared
//! semantic type.

use std::fmt;

use crate::PropertyType;

/// A typed property value.
///
/// # Examples
///
/// ```
/// use umls_types::{PropertyType, PropertyValue};
///
/// let value = PropertyValue::decode(PropertyType::Integer, "42");
/// assert_eq!(value, PropertyValue::Integer(42));
/// assert_eq!(value.to_text(), "42");
///
/// // Text that does not parse as the declared type is kept as a string.
/// let value = PropertyValue::decode(PropertyType::Boolean, "maybe");
/// assert_eq!(value, PropertyValue::String("maybe".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Free text.
    String(String),
    /// A code in the same code system.
    Code(String),
    /// The code of a referenced coding.
    Coding(String),
    /// Whole number.
    Integer(i64),
    /// Decimal number.
    Decimal(f64),
    /// Boolean flag.
    Boolean(bool),
    /// Date and time in its source text form.
    DateTime(String),
}

impl PropertyValue {
    /// Decodes stored text according to the declared property type.
    pub fn decode(property_type: PropertyType, text: &str) -> Self {
        match property_type {
            PropertyType::String => Self::String(text.to_string()),
            PropertyType::Code => Self::Code(text.to_string()),
            PropertyType::Coding => Self::Coding(text.to_string()),
            PropertyType::DateTime => Self::DateTime(text.to_string()),
            PropertyType::Integer => text
                .parse()
                .map(Self::Integer)
                .unwrap_or_else(|_| Self::String(text.to_string())),
            PropertyType::Decimal => text
                .parse()
                .map(Self::Decimal)
                .unwrap_or_else(|_| Self::String(text.to_string())),
            PropertyType::Boolean => match text {
                "true" | "Y" | "1" => Self::Boolean(true),
                "false" | "N" | "0" => Self::Boolean(false),
                _ => Self::String(text.to_string()),
            },
        }
    }

    /// Returns the store's text representation.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Returns the type this value was decoded as.
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::String(_) => PropertyType::String,
            Self::Code(_) => PropertyType::Code,
            Self::Coding(_) => PropertyType::Coding,
            Self::Integer(_) => PropertyType::Integer,
            Self::Decimal(_) => PropertyType::Decimal,
            Self::Boolean(_) => PropertyType::Boolean,
            Self::DateTime(_) => PropertyType::DateTime,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::Code(s) | Self::Coding(s) | Self::DateTime(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_by_type() {
        assert_eq!(
            PropertyValue::decode(PropertyType::Code, "LP408570-2"),
            PropertyValue::Code("LP408570-2".to_string())
        );
        assert_eq!(
            PropertyValue::decode(PropertyType::Coding, "73211009"),
            PropertyValue::Coding("73211009".to_string())
        );
        assert_eq!(
            PropertyValue::decode(PropertyType::Decimal, "2.5"),
            PropertyValue::Decimal(2.5)
        );
        assert_eq!(
            PropertyValue::decode(PropertyType::Boolean, "Y"),
            PropertyValue::Boolean(true)
        );
    }

    #[test]
    fn test_unparseable_number_falls_back_to_string() {
        assert_eq!(
            PropertyValue::decode(PropertyType::Integer, "n/a"),
            PropertyValue::String("n/a".to_string())
        );
    }

    #[test]
    fn test_value_reports_decoded_type() {
        assert_eq!(
            PropertyValue::decode(PropertyType::Integer, "n/a").property_type(),
            PropertyType::String
        );
        assert_eq!(PropertyValue::Boolean(false).to_text(), "false");
    }
}
