//! UMLS concept file decoder.
//!
//! Decodes `MRCONSO.RRF` rows.

use csv::StringRecord;
use umls_types::RrfConcept;

use crate::catalog::{SourceCatalog, UmlsSource};
use crate::parser::{parse, RrfRecord};
use crate::types::{RrfFile, SkipReason};

impl RrfRecord for RrfConcept {
    const FILE: RrfFile = RrfFile::Concepts;
    const FIELD_COUNT: usize = 18;

    fn from_record(record: &StringRecord) -> Self {
        let mut concept = RrfConcept::default();
        for (n, value) in record.iter().take(Self::FIELD_COUNT).enumerate() {
            match n {
                0 => concept.cui = value.to_string(),
                1 => concept.lat = value.to_string(),
                2 => concept.ts = value.to_string(),
                3 => concept.lui = value.to_string(),
                4 => concept.stt = value.to_string(),
                5 => concept.sui = value.to_string(),
                6 => concept.is_preferred = parse::yes(value),
                7 => concept.aui = value.to_string(),
                8 => concept.saui = parse::optional(value),
                9 => concept.scui = parse::optional(value),
                10 => concept.sdui = parse::optional(value),
                11 => concept.sab = value.to_string(),
                12 => concept.tty = value.to_string(),
                13 => concept.code = value.to_string(),
                14 => concept.string = value.to_string(),
                15 => concept.srl = parse::number(value),
                16 => concept.suppress = parse::suppressible(value),
                _ => concept.cvf = parse::number(value),
            }
        }
        concept
    }
}

/// Catalog filter for concept rows.
pub trait ConceptFilter {
    /// Returns the row's source and term-type rank if the row is loadable.
    fn accept<'c>(
        &self,
        catalog: &'c SourceCatalog,
        language: &str,
    ) -> Result<(&'c UmlsSource, usize), SkipReason>;
}

impl ConceptFilter for RrfConcept {
    fn accept<'c>(
        &self,
        catalog: &'c SourceCatalog,
        language: &str,
    ) -> Result<(&'c UmlsSource, usize), SkipReason> {
        let source = catalog.get(&self.sab).ok_or(SkipReason::UnknownSource)?;
        if self.lat != language {
            return Err(SkipReason::Language);
        }
        if self.is_suppressible() {
            return Err(SkipReason::Suppressed);
        }
        let rank = source
            .term_type_rank(&self.tty)
            .ok_or(SkipReason::TermType)?;
        Ok((source, rank))
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
    fn test_parse_concept_record() {
        let record = make_record(
            "C0000005|ENG|P|L0000005|PF|S0007492|Y|A26634265||M0019694|D012711|MSH|PEP|D012711|(131)I-Macroaggregated Albumin|0|N|256|",
        );

        let concept = RrfConcept::from_record(&record);
        assert_eq!(concept.cui, "C0000005");
        assert_eq!(concept.lat, "ENG");
        assert!(concept.is_preferred);
        assert_eq!(concept.aui, "A26634265");
        assert_eq!(concept.saui, None);
        assert_eq!(concept.scui.as_deref(), Some("M0019694"));
        assert_eq!(concept.sdui.as_deref(), Some("D012711"));
        assert_eq!(concept.sab, "MSH");
        assert_eq!(concept.tty, "PEP");
        assert_eq!(concept.code, "D012711");
        assert_eq!(concept.string, "(131)I-Macroaggregated Albumin");
        assert_eq!(concept.srl, Some(0));
        assert_eq!(concept.suppress, Some(Suppressible::No));
        assert_eq!(concept.cvf, Some(256));
    }

    #[test]
    fn test_empty_optional_fields() {
        let record = make_record(
            "C0000039|ENG|P|L0000039|PF|S0007564|N|A0016515|||M0023172|MSH|MH|D015060|1,2-Dipalmitoylphosphatidylcholine|0|N||",
        );

        let concept = RrfConcept::from_record(&record);
        assert!(!concept.is_preferred);
        assert_eq!(concept.saui, None);
        assert_eq!(concept.scui, None);
        assert_eq!(concept.cvf, None);
    }

    #[test]
    fn test_truncated_record_is_partial() {
        let record = make_record("C0000039|ENG|P|L0000039|PF|S0007564|N|A0016515|||M0023172|MSH");

        let concept = RrfConcept::from_record(&record);
        assert_eq!(concept.sab, "MSH");
        assert_eq!(concept.tty, "");
        assert_eq!(concept.code, "");
        assert_eq!(concept.suppress, None);
        assert!(concept.is_suppressible());
    }

    #[test]
    fn test_concept_filter() {
        let catalog = SourceCatalog::umls().unwrap();
        let line = |lat: &str, sab: &str, tty: &str, suppress: &str| {
            make_record(&format!(
                "C1|{lat}|P|L1|PF|S1|Y|A1||||{sab}|{tty}|79741-5|Display|0|{suppress}||"
            ))
        };

        let accepted = RrfConcept::from_record(&line("ENG", "LNC", "LN", "N"));
        let (source, rank) = accepted.accept(&catalog, "ENG").unwrap();
        assert_eq!(source.abbreviation, "LNC");
        assert_eq!(rank, 5);

        let check = |record: StringRecord| RrfConcept::from_record(&record).accept(&catalog, "ENG").map(|(_, r)| r);
        assert_eq!(check(line("ENG", "MSH", "MH", "N")), Err(SkipReason::UnknownSource));
        assert_eq!(check(line("GER", "LNC", "LN", "N")), Err(SkipReason::Language));
        assert_eq!(check(line("ENG", "LNC", "LN", "O")), Err(SkipReason::Suppressed));
        assert_eq!(check(line("ENG", "LNC", "LN", "")), Err(SkipReason::Suppressed));
        assert_eq!(check(line("ENG", "LNC", "OSN", "N")), Err(SkipReason::TermType));
    }
}
