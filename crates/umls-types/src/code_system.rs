//! FHIR code system definition types.
//!
//! A source vocabulary is described by a FHIR `CodeSystem` resource: its
//! title, canonical URL and the properties its codes may carry. Only the
//! elements the loader needs are modelled; everything else in the resource
//! is kept verbatim by the catalog as an opaque JSON blob.

use crate::PropertyType;

/// Resource type tag every code system definition must carry.
pub const CODE_SYSTEM_RESOURCE_TYPE: &str = "CodeSystem";

/// The parts of a FHIR `CodeSystem` resource used during ingestion.
///
/// # Examples
///
/// ```
/// use umls_types::{CodeSystem, CodeSystemProperty, PropertyType, well_known};
///
/// let system = CodeSystem {
///     resource_type: "CodeSystem".to_string(),
///     url: "http://loinc.org".to_string(),
///     title: "LOINC Code System".to_string(),
///     hierarchy_meaning: Some("is-a".to_string()),
///     property: vec![CodeSystemProperty {
///         code: "parent".to_string(),
///         uri: Some(well_known::PARENT_PROPERTY_URI.to_string()),
///         description: None,
///         property_type: PropertyType::Code,
///     }],
/// };
///
/// assert!(system.property_by_uri(well_known::PARENT_PROPERTY_URI).is_some());
/// assert!(system.find_property("parent", None).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CodeSystem {
    /// Must be `CodeSystem`.
    pub resource_type: String,
    /// Canonical URL identifying the code system.
    pub url: String,
    /// Human readable title.
    pub title: String,
    /// Meaning of the hierarchy, e.g. `is-a`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hierarchy_meaning: Option<String>,
    /// Declared property schema.
    #[cfg_attr(feature = "serde", serde(default))]
    pub property: Vec<CodeSystemProperty>,
}

impl CodeSystem {
    /// Returns true if the resource type tag is `CodeSystem`.
    pub fn is_code_system(&self) -> bool {
        self.resource_type == CODE_SYSTEM_RESOURCE_TYPE
    }

    /// Returns the declared property with exactly this code.
    pub fn property(&self, code: &str) -> Option<&CodeSystemProperty> {
        self.property.iter().find(|p| p.code == code)
    }

    /// Returns the first declared property whose code is `name` or `alias`.
    pub fn find_property(&self, name: &str, alias: Option<&str>) -> Option<&CodeSystemProperty> {
        self.property
            .iter()
            .find(|p| p.code == name || Some(p.code.as_str()) == alias)
    }

    /// Returns the first declared property identified by this URI.
    pub fn property_by_uri(&self, uri: &str) -> Option<&CodeSystemProperty> {
        self.property.iter().find(|p| p.uri.as_deref() == Some(uri))
    }
}

/// A property declared by a code system.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeSystemProperty {
    /// Property code, unique within the code system.
    pub code: String,
    /// URI identifying the meaning of the property across code systems.
    #[cfg_attr(feature = "serde", serde(default))]
    pub uri: Option<String>,
    /// Human readable description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    /// Semantic type of values.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub property_type: PropertyType,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_property(code: &str, uri: Option<&str>) -> CodeSystemProperty {
        CodeSystemProperty {
            code: code.to_string(),
            uri: uri.map(str::to_string),
            description: None,
            property_type: PropertyType::String,
        }
    }

    fn make_system() -> CodeSystem {
        CodeSystem {
            resource_type: CODE_SYSTEM_RESOURCE_TYPE.to_string(),
            url: "http://example.org/cs".to_string(),
            title: "Example".to_string(),
            hierarchy_meaning: None,
            property: vec![
                make_property("parent", Some("http://hl7.org/fhir/concept-properties#parent")),
                make_property("COMPONENT", None),
                make_property("STATUS", None),
            ],
        }
    }

    #[test]
    fn test_find_property_by_alias() {
        let system = make_system();
        assert_eq!(
            system.find_property("LCS", Some("STATUS")).map(|p| p.code.as_str()),
            Some("STATUS")
        );
        assert_eq!(
            system.find_property("COMPONENT", None).map(|p| p.code.as_str()),
            Some("COMPONENT")
        );
        assert!(system.find_property("LCS", None).is_none());
    }

    #[test]
    fn test_property_by_uri() {
        let system = make_system();
        assert_eq!(
            system
                .property_by_uri("http://hl7.org/fhir/concept-properties#parent")
                .map(|p| p.code.as_str()),
            Some("parent")
        );
        assert!(system
            .property_by_uri("http://hl7.org/fhir/concept-properties#child")
            .is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_fhir_json() {
        let json = r#"{
            "resourceType": "CodeSystem",
            "url": "http://loinc.org",
            "title": "LOINC Code System",
            "hierarchyMeaning": "is-a",
            "status": "active",
            "property": [
                {"code": "parent", "uri": "http://hl7.org/fhir/concept-properties#parent", "type": "code"},
                {"code": "CLASS", "description": "Classification", "type": "string"}
            ]
        }"#;

        let system: CodeSystem = serde_json::from_str(json).unwrap();
        assert!(system.is_code_system());
        assert_eq!(system.property.len(), 2);
        assert_eq!(system.property[0].property_type, PropertyType::Code);
        assert_eq!(system.property[1].uri, None);
        assert_eq!(
            system.property[1].description.as_deref(),
            Some("Classification")
        );
    }
}
