//! UMLS documentation file decoder.
//!
//! Decodes `MRDOC.RRF` rows.

use csv::StringRecord;
use umls_types::RrfExplanation;

use crate::parser::RrfRecord;
use crate::types::RrfFile;

impl RrfRecord for RrfExplanation {
    const FILE: RrfFile = RrfFile::Explanations;
    const FIELD_COUNT: usize = 4;

    fn from_record(record: &StringRecord) -> Self {
        let mut explanation = RrfExplanation::default();
        for (n, value) in record.iter().take(Self::FIELD_COUNT).enumerate() {
            match n {
                0 => explanation.dockey = value.to_string(),
                1 => explanation.value = value.to_string(),
                2 => explanation.explanation_type = value.to_string(),
                _ => explanation.expl = value.to_string(),
            }
        }
        explanation
    }
}
