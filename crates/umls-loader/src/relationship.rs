//! UMLS relationship file decoder.
//!
//! Decodes `MRREL.RRF` rows.

use csv::StringRecord;
use umls_types::RrfRelationship;

use crate::catalog::{SourceCatalog, UmlsSource};
use crate::parser::{parse, RrfRecord};
use crate::types::{RrfFile, SkipReason};

impl RrfRecord for RrfRelationship {
    const FILE: RrfFile = RrfFile::Relationships;
    const FIELD_COUNT: usize = 15;

    fn from_record(record: &StringRecord) -> Self {
        let mut relationship = RrfRelationship::default();
        for (n, value) in record.iter().take(Self::FIELD_COUNT).enumerate() {
            match n {
                0 => relationship.cui1 = value.to_string(),
                1 => relationship.aui1 = value.to_string(),
                2 => relationship.stype1 = value.to_string(),
                3 => relationship.rel = value.to_string(),
                4 => relationship.cui2 = value.to_string(),
                5 => relationship.aui2 = value.to_string(),
                6 => relationship.stype2 = value.to_string(),
                7 => relationship.rela = value.to_string(),
                8 => relationship.rui = value.to_string(),
                9 => relationship.srui = value.to_string(),
                10 => relationship.sab = value.to_string(),
                11 => relationship.sl = value.to_string(),
                12 => relationship.rg = value.to_string(),
                13 => relationship.dir = value.to_string(),
                _ => relationship.suppress = parse::suppressible(value),
            }
        }
        relationship
    }
}

/// Catalog filter for relationship rows.
pub trait RelationshipFilter {
    /// Returns the row's source if the row is loadable.
    fn accept<'c>(&self, catalog: &'c SourceCatalog) -> Result<&'c UmlsSource, SkipReason>;
}

impl RelationshipFilter for RrfRelationship {
    fn accept<'c>(&self, catalog: &'c SourceCatalog) -> Result<&'c UmlsSource, SkipReason> {
        let source = catalog.get(&self.sab).ok_or(SkipReason::UnknownSource)?;
        if self.is_suppressible() {
            return Err(SkipReason::Suppressed);
        }
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umls_types::Suppressible;

    fn make_record(line: &str) -> StringRecord {
        let mut record = StringRecord::new();
        for field in line.split('|') {
            record.push_field(field);
        }
        record
    }

    #[test]
    fn test_parse_relationship_record() {
        let record = make_record(
            "C4041239|A24580869|AUI|PAR|C1546829|A16136418|AUI||R145286722||LNC|LNC|||N||",
        );

        let rel = RrfRelationship::from_record(&record);
        assert_eq!(rel.aui1, "A24580869");
        assert_eq!(rel.aui2, "A16136418");
        assert_eq!(rel.rela, "");
        assert_eq!(rel.rui, "R145286722");
        assert_eq!(rel.sab, "LNC");
        assert_eq!(rel.dir, "");
        assert_eq!(rel.suppress, Some(Suppressible::No));
        assert!(rel.is_parent());
    }

    #[test]
    fn test_parse_snomed_attribute_relationship() {
        let record = make_record(
            "C0011849|A2878223|SCUI|RO|C0013604|A3066337|SCUI|has_finding_site|R123|456|SNOMEDCT_US|SNOMEDCT_US|1|Y|N||",
        );

        let rel = RrfRelationship::from_record(&record);
        assert_eq!(rel.rel, "RO");
        assert_eq!(rel.rela, "has_finding_site");
        assert_eq!(rel.rg, "1");
        assert_eq!(rel.dir, "Y");
        assert!(!rel.is_parent());
        assert!(!rel.is_child());
        assert!(!rel.is_suppressible());
    }

    #[test]
    fn test_relationship_filter() {
        let catalog = SourceCatalog::umls().unwrap();

        let rel = RrfRelationship::from_record(&make_record(
            "C1|A1|AUI|PAR|C2|A2|AUI||R1||LNC|LNC|||N||",
        ));
        assert_eq!(rel.accept(&catalog).unwrap().abbreviation, "LNC");

        let rel = RrfRelationship::from_record(&make_record(
            "C1|A1|AUI|PAR|C2|A2|AUI||R1||LNC|LNC|||E||",
        ));
        assert_eq!(rel.accept(&catalog).unwrap_err(), SkipReason::Suppressed);

        let rel = RrfRelationship::from_record(&make_record(
            "C1|A1|AUI|PAR|C2|A2|AUI||R1||MTH|MTH|||N||",
        ));
        assert_eq!(rel.accept(&catalog).unwrap_err(), SkipReason::UnknownSource);
    }
}
