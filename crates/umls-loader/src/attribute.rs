//! UMLS attribute file decoder.
//!
//! Decodes `MRSAT.RRF` rows.

use csv::StringRecord;
use umls_types::RrfAttribute;

use crate::catalog::{SourceCatalog, UmlsSource};
use crate::parser::{parse, RrfRecord};
use crate::types::{RrfFile, SkipReason};

impl RrfRecord for RrfAttribute {
    const FILE: RrfFile = RrfFile::Attributes;
    const FIELD_COUNT: usize = 12;

    fn from_record(record: &StringRecord) -> Self {
        let mut attribute = RrfAttribute::default();
        for (n, value) in record.iter().take(Self::FIELD_COUNT).enumerate() {
            match n {
                0 => attribute.cui = value.to_string(),
                1 => attribute.lui = value.to_string(),
                2 => attribute.sui = value.to_string(),
                3 => attribute.metaui = value.to_string(),
                4 => attribute.stype = value.to_string(),
                5 => attribute.code = value.to_string(),
                6 => attribute.atui = value.to_string(),
                7 => attribute.satui = value.to_string(),
                8 => attribute.atn = value.to_string(),
                9 => attribute.sab = value.to_string(),
                10 => attribute.atv = value.to_string(),
                _ => attribute.suppress = parse::suppressible(value),
            }
        }
        attribute
    }
}

/// Catalog filter for attribute rows.
pub trait AttributeFilter {
    /// Returns the row's source if the row is loadable.
    fn accept<'c>(&self, catalog: &'c SourceCatalog) -> Result<&'c UmlsSource, SkipReason>;
}

impl AttributeFilter for RrfAttribute {
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

    fn make_record(fields: &[&str]) -> StringRecord {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field);
        }
        record
    }

    #[test]
    fn test_parse_attribute_record() {
        let record = make_record(&[
            "C4041239", "L12512891", "S15188466", "A24580869", "AUI", "79741-5", "AT223361596", "",
            "LCS", "LNC", "ACTIVE", "N", "", "",
        ]);

        let attribute = RrfAttribute::from_record(&record);
        assert_eq!(attribute.cui, "C4041239");
        assert_eq!(attribute.metaui, "A24580869");
        assert_eq!(attribute.stype, "AUI");
        assert_eq!(attribute.code, "79741-5");
        assert_eq!(attribute.satui, "");
        assert_eq!(attribute.atn, "LCS");
        assert_eq!(attribute.sab, "LNC");
        assert_eq!(attribute.atv, "ACTIVE");
        assert_eq!(attribute.suppress, Some(Suppressible::No));
        assert!(!attribute.is_suppressible());
    }

    #[test]
    fn test_empty_value_is_kept() {
        let record = make_record(&[
            "C4041239", "", "", "", "CODE", "79741-5", "AT1", "", "LEA", "LNC", "", "N",
        ]);

        let attribute = RrfAttribute::from_record(&record);
        assert_eq!(attribute.atv, "");
        assert!(!attribute.is_suppressible());
    }

    #[test]
    fn test_missing_suppress_flag() {
        let record = make_record(&["C4041239", "", "", "", "CODE", "79741-5", "AT1", "", "LEA"]);

        let attribute = RrfAttribute::from_record(&record);
        assert_eq!(attribute.atn, "LEA");
        assert_eq!(attribute.sab, "");
        assert!(attribute.is_suppressible());
    }

    #[test]
    fn test_attribute_filter() {
        let catalog = SourceCatalog::umls().unwrap();
        let make = |sab: &str, suppress: &str| {
            RrfAttribute::from_record(&make_record(&[
                "C1", "", "", "A1", "AUI", "79741-5", "AT1", "", "LCS", sab, "ACTIVE", suppress,
            ]))
        };

        assert_eq!(make("LNC", "N").accept(&catalog).unwrap().abbreviation, "LNC");
        assert_eq!(make("MSH", "N").accept(&catalog).unwrap_err(), SkipReason::UnknownSource);
        assert_eq!(make("LNC", "Y").accept(&catalog).unwrap_err(), SkipReason::Suppressed);
    }
}
