//! Generic RRF file parser.
//!
//! Provides a streaming parser for pipe-delimited Metathesaurus (RRF) files.
//! Records are read in chunks; with the `parallel` feature each chunk is
//! decoded on the rayon pool and handed back in file order, so callers still
//! see records strictly in stream order.

use std::io::Read;
use std::marker::PhantomData;

use csv::{ByteRecord, Reader, ReaderBuilder, StringRecord};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use umls_types::well_known;

use crate::types::{RrfFile, UmlsError, UmlsResult};

/// Trait for types that can be decoded from RRF records.
///
/// Decoding is best effort: fields are assigned by position, missing
/// trailing fields leave their defaults, and extra trailing fields are
/// ignored. Callers reject incomplete records with their normal filters.
pub trait RrfRecord: Sized + Send {
    /// The file this record type is read from.
    const FILE: RrfFile;

    /// Number of leading fields that carry meaning.
    const FIELD_COUNT: usize;

    /// Decodes a record from a CSV StringRecord.
    fn from_record(record: &StringRecord) -> Self;
}

/// A streaming parser for RRF files.
///
/// This parser never loads a whole file into memory; at most one chunk of
/// raw records is held at a time.
pub struct RrfParser<R: Read, T: RrfRecord> {
    reader: Reader<R>,
    chunk_size: usize,
    pending: std::vec::IntoIter<T>,
    deferred_error: Option<UmlsError>,
    finished: bool,
    records_read: usize,
    _marker: PhantomData<T>,
}

impl<R: Read, T: RrfRecord> RrfParser<R, T> {
    /// Creates a new parser from a reader.
    ///
    /// # Arguments
    /// * `reader` - The RRF content, positioned at the first record
    /// * `chunk_size` - Records read and decoded together
    pub fn from_reader(reader: R, chunk_size: usize) -> Self {
        let csv_reader = ReaderBuilder::new()
            .delimiter(well_known::RRF_DELIMITER)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        Self {
            reader: csv_reader,
            chunk_size: chunk_size.max(1),
            pending: Vec::new().into_iter(),
            deferred_error: None,
            finished: false,
            records_read: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of records read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Reads and decodes the next chunk. Returns false at end of input.
    ///
    /// A read error stops the parser; records read before it are still
    /// emitted and the error is reported after them.
    fn fill(&mut self) -> bool {
        let mut raw = Vec::with_capacity(self.chunk_size);
        let mut record = ByteRecord::new();

        while raw.len() < self.chunk_size {
            match self.reader.read_byte_record(&mut record) {
                Ok(true) => {
                    self.records_read += 1;
                    raw.push(StringRecord::from_byte_record_lossy(std::mem::take(
                        &mut record,
                    )));
                }
                Ok(false) => {
                    self.finished = true;
                    break;
                }
                Err(e) => {
                    self.finished = true;
                    self.deferred_error = Some(e.into());
                    break;
                }
            }
        }

        if raw.is_empty() {
            return false;
        }
        self.pending = decode_chunk::<T>(raw).into_iter();
        true
    }
}

impl<R: Read, T: RrfRecord> Iterator for RrfParser<R, T> {
    type Item = UmlsResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.pending.next() {
                return Some(Ok(record));
            }
            if let Some(err) = self.deferred_error.take() {
                return Some(Err(err));
            }
            if self.finished || !self.fill() {
                return None;
            }
        }
    }
}

#[cfg(feature = "parallel")]
fn decode_chunk<T: RrfRecord>(records: Vec<StringRecord>) -> Vec<T> {
    records.par_iter().map(T::from_record).collect()
}

#[cfg(not(feature = "parallel"))]
fn decode_chunk<T: RrfRecord>(records: Vec<StringRecord>) -> Vec<T> {
    records.iter().map(T::from_record).collect()
}

/// Helper functions for decoding RRF field values.
pub mod parse {
    use umls_types::Suppressible;

    /// Returns `None` for an empty field.
    pub fn optional(value: &str) -> Option<String> {
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Parses a `Y`/`N` flag; anything but `Y` is false.
    pub fn yes(value: &str) -> bool {
        value == "Y"
    }

    /// Parses an optional unsigned number; empty or malformed values are `None`.
    pub fn number<T: std::str::FromStr>(value: &str) -> Option<T> {
        value.parse().ok()
    }

    /// Parses the suppressible flag.
    pub fn suppressible(value: &str) -> Option<Suppressible> {
        Suppressible::from_flag(value)
    }
}
