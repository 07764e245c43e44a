//! Property mapping tables.
//!
//! [`RelationshipMapping`] is built from `MRDOC.RRF` and names the SNOMED CT
//! attribute each `REL`/`RELA` label pair stands for. [`PropertyAliases`]
//! translates legacy LOINC attribute mnemonics to the property codes the
//! LOINC definition declares.

use std::collections::HashMap;

use umls_types::{well_known, CodeSystem, CodeSystemProperty, RrfExplanation};

use crate::types::UmlsResult;

#[derive(Debug, Default)]
struct LabelPair {
    rel: String,
    rela: String,
}

/// Relationship label mapping: `"{sab}/{rel}/{rela}"` to property code.
#[derive(Debug, Clone, Default)]
pub struct RelationshipMapping {
    properties: HashMap<String, String>,
}

impl RelationshipMapping {
    /// Builds the mapping from a stream of explanation rows.
    ///
    /// Only rows tagged `snomedct_rel_mapping` (under `REL`) or
    /// `snomedct_rela_mapping` (under `RELA`) contribute. Rows sharing a
    /// `VALUE` are paired; a value seen under only one key maps with an empty
    /// label for the other.
    pub fn from_explanations<I>(rows: I) -> UmlsResult<Self>
    where
        I: IntoIterator<Item = UmlsResult<RrfExplanation>>,
    {
        let mut pairs: HashMap<String, LabelPair> = HashMap::new();

        for row in rows {
            let row = row?;
            if row.dockey == well_known::DOCKEY_REL
                && row.explanation_type == well_known::SNOMEDCT_REL_MAPPING
            {
                pairs.entry(row.value).or_default().rel = row.expl;
            } else if row.dockey == well_known::DOCKEY_RELA
                && row.explanation_type == well_known::SNOMEDCT_RELA_MAPPING
            {
                pairs.entry(row.value).or_default().rela = row.expl;
            }
        }

        let properties = pairs
            .into_iter()
            .map(|(property, pair)| {
                (
                    mapping_key(well_known::SNOMEDCT_US, &pair.rel, &pair.rela),
                    property,
                )
            })
            .collect();

        Ok(Self { properties })
    }

    /// Returns the property code mapped to this label pair, if any.
    pub fn get(&self, sab: &str, rel: &str, rela: &str) -> Option<&str> {
        self.properties
            .get(&mapping_key(sab, rel, rela))
            .map(String::as_str)
    }

    /// Number of mapped label pairs.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

fn mapping_key(sab: &str, rel: &str, rela: &str) -> String {
    format!("{sab}/{rel}/{rela}")
}

/// Alias table from attribute names to declared property codes.
#[derive(Debug, Clone, Default)]
pub struct PropertyAliases {
    aliases: HashMap<String, String>,
}

impl PropertyAliases {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard table of LOINC legacy mnemonics.
    pub fn umls() -> Self {
        [
            ("LOINC_COMPONENT", "COMPONENT"),
            ("LOINC_METHOD_TYP", "METHOD_TYP"),
            ("LOINC_PROPERTY", "PROPERTY"),
            ("LOINC_SCALE_TYP", "SCALE_TYP"),
            ("LOINC_SYSTEM", "SYSTEM"),
            ("LOINC_TIME_ASPECT", "TIME_ASPCT"),
            ("LOR", "ORDER_OBS"),
            ("LQS", "SURVEY_QUEST_SRC"),
            ("LQT", "SURVEY_QUEST_TEXT"),
            ("LRN2", "RELATEDNAMES2"),
            ("LCL", "CLASS"),
            ("LCN", "CLASSTYPE"),
            ("LCS", "STATUS"),
            ("LCT", "CHNG_TYPE"),
            ("LEA", "EXMPL_ANSWERS"),
            ("LFO", "FORMULA"),
            ("LMP", "MAP_TO"),
            ("LUR", "UNITSREQUIRED"),
            ("LC", "LONG_COMMON_NAME"),
        ]
        .into_iter()
        .fold(Self::new(), |table, (name, code)| table.with_alias(name, code))
    }

    /// Adds an alias.
    pub fn with_alias(mut self, name: &str, code: &str) -> Self {
        self.aliases.insert(name.to_string(), code.to_string());
        self
    }

    /// Returns the canonical code for `name`, if it is an alias.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Finds the property `name` refers to in `system`, either directly or
    /// through its alias.
    pub fn find<'a>(&self, system: &'a CodeSystem, name: &str) -> Option<&'a CodeSystemProperty> {
        system.find_property(name, self.resolve(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umls_types::PropertyType;

    fn make_row(dockey: &str, value: &str, explanation_type: &str, expl: &str) -> UmlsResult<RrfExplanation> {
        Ok(RrfExplanation {
            dockey: dockey.to_string(),
            value: value.to_string(),
            explanation_type: explanation_type.to_string(),
            expl: expl.to_string(),
        })
    }

    #[test]
    fn test_pairs_rel_and_rela_by_value() {
        let rows = vec![
            make_row("REL", "363698007", "snomedct_rel_mapping", "RO"),
            make_row("RELA", "363698007", "snomedct_rela_mapping", "has_finding_site"),
            make_row("REL", "116676008", "snomedct_rel_mapping", "RO"),
            make_row("RELA", "116676008", "snomedct_rela_mapping", "has_associated_morphology"),
            make_row("REL", "CHD", "expanded_form", "has child relationship"),
            make_row("RELA", "finding_site_of", "rela_inverse", "has_finding_site"),
        ];

        let mapping = RelationshipMapping::from_explanations(rows).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(
            mapping.get("SNOMEDCT_US", "RO", "has_finding_site"),
            Some("363698007")
        );
        assert_eq!(
            mapping.get("SNOMEDCT_US", "RO", "has_associated_morphology"),
            Some("116676008")
        );
        assert_eq!(mapping.get("LNC", "RO", "has_finding_site"), None);
        assert_eq!(mapping.get("SNOMEDCT_US", "CHD", ""), None);
    }

    #[test]
    fn test_unpaired_value_uses_empty_label() {
        let rows = vec![make_row("REL", "116680003", "snomedct_rel_mapping", "PAR")];

        let mapping = RelationshipMapping::from_explanations(rows).unwrap();
        assert_eq!(mapping.get("SNOMEDCT_US", "PAR", ""), Some("116680003"));
    }

    #[test]
    fn test_read_error_propagates() {
        let rows = vec![
            make_row("REL", "1", "snomedct_rel_mapping", "RO"),
            Err(crate::types::UmlsError::Cancelled),
        ];
        assert!(RelationshipMapping::from_explanations(rows).is_err());
    }

    #[test]
    fn test_aliases() {
        let aliases = PropertyAliases::umls();
        assert_eq!(aliases.resolve("LCS"), Some("STATUS"));
        assert_eq!(aliases.resolve("LOINC_TIME_ASPECT"), Some("TIME_ASPCT"));
        assert_eq!(aliases.resolve("LC"), Some("LONG_COMMON_NAME"));
        assert_eq!(aliases.resolve("STATUS"), None);
    }

    #[test]
    fn test_find_property_in_system() {
        let system = CodeSystem {
            resource_type: "CodeSystem".to_string(),
            url: "http://loinc.org".to_string(),
            title: "LOINC".to_string(),
            hierarchy_meaning: None,
            property: vec![CodeSystemProperty {
                code: "STATUS".to_string(),
                uri: None,
                description: None,
                property_type: PropertyType::String,
            }],
        };

        let aliases = PropertyAliases::umls();
        assert_eq!(aliases.find(&system, "LCS").map(|p| p.code.as_str()), Some("STATUS"));
        assert_eq!(aliases.find(&system, "STATUS").map(|p| p.code.as_str()), Some("STATUS"));
        assert!(aliases.find(&system, "LCL").is_none());
        assert!(PropertyAliases::new().find(&system, "LCS").is_none());
    }
}
