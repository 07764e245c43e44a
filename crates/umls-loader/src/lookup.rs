//! Code lookup.
//!
//! Reconstructs one code's display and property values from the store and
//! renders them as a FHIR `Parameters` resource, the output of the
//! `CodeSystem/$lookup` operation.

use rusqlite::params;
use serde_json::{json, Map, Value};
use umls_types::{PropertyType, PropertyValue, RowId};

use crate::store::TerminologyStore;
use crate::types::{UmlsError, UmlsResult};

/// One property value of a looked-up code.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupProperty {
    /// Property code.
    pub code: String,
    /// Property description from the code system definition.
    pub description: Option<String>,
    /// Declared semantic type.
    pub property_type: PropertyType,
    /// Target coding for relationship properties.
    pub target: Option<RowId>,
    /// Stored value, decoded by the declared type.
    pub value: PropertyValue,
}

/// Result of a lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    /// Title of the code system.
    pub name: String,
    /// Display text of the code.
    pub display: Option<String>,
    /// Property values in the order they were loaded.
    pub properties: Vec<LookupProperty>,
}

impl TerminologyStore {
    /// Looks up a code by code system URL.
    ///
    /// Fails with [`UmlsError::UnknownSystem`] or [`UmlsError::UnknownCoding`]
    /// when either is not in the store.
    pub fn lookup(&self, system_url: &str, code: &str) -> UmlsResult<LookupResult> {
        let system = self
            .find_code_system(system_url)?
            .ok_or_else(|| UmlsError::UnknownSystem {
                url: system_url.to_string(),
            })?;
        let coding = self
            .find_coding(system.id, code)?
            .ok_or_else(|| UmlsError::UnknownCoding {
                system: system_url.to_string(),
                code: code.to_string(),
            })?;

        let mut stmt = self.connection().prepare_cached(
            r#"SELECT p.code, p.description, p.type, cp.target, cp.value
               FROM "Coding_Property" cp
               JOIN "CodeSystem_Property" p ON p.id = cp.property
               WHERE cp.coding = ?1
               ORDER BY cp.rowid"#,
        )?;
        let rows = stmt.query_map(params![coding.id], |row| {
            let tag: String = row.get(2)?;
            let value: Option<String> = row.get(4)?;
            let property_type = PropertyType::from_tag(&tag).unwrap_or(PropertyType::String);
            Ok(LookupProperty {
                code: row.get(0)?,
                description: row.get(1)?,
                property_type,
                target: row.get(3)?,
                value: PropertyValue::decode(property_type, value.as_deref().unwrap_or("")),
            })
        })?;

        Ok(LookupResult {
            name: system.title,
            display: coding.display,
            properties: rows.collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl LookupResult {
    /// Renders the result as a FHIR `Parameters` resource.
    pub fn to_parameters(&self) -> Value {
        let mut parameter = vec![json!({"name": "name", "valueString": self.name})];
        if let Some(display) = &self.display {
            parameter.push(json!({"name": "display", "valueString": display}));
        }

        for property in &self.properties {
            let mut part = vec![json!({"name": "code", "valueCode": property.code})];
            if let Some(description) = &property.description {
                part.push(json!({"name": "description", "valueString": description}));
            }
            let mut value = Map::new();
            value.insert("name".to_string(), json!("value"));
            value.insert(
                format!("value{}", property.value.property_type().value_suffix()),
                value_json(&property.value),
            );
            part.push(Value::Object(value));

            parameter.push(json!({"name": "property", "part": part}));
        }

        json!({"resourceType": "Parameters", "parameter": parameter})
    }
}

fn value_json(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Coding(code) => json!({ "code": code }),
        PropertyValue::String(s) | PropertyValue::Code(s) | PropertyValue::DateTime(s) => json!(s),
        PropertyValue::Integer(i) => json!(i),
        PropertyValue::Decimal(d) => json!(d),
        PropertyValue::Boolean(b) => json!(b),
    }
}

/// Renders an error as a FHIR `OperationOutcome` resource.
///
/// Unknown systems and codes are reported as `not-found`; everything else as
/// `exception`.
pub fn operation_outcome(error: &UmlsError) -> Value {
    let code = if error.is_input_error() {
        "not-found"
    } else {
        "exception"
    };
    json!({
        "resourceType": "OperationOutcome",
        "issue": [{
            "severity": "error",
            "code": code,
            "details": {"text": error.to_string()}
        }]
    })
}
