//! Per-run lookup tables.
//!
//! [`ConceptIndex`] carries the codes written by the concept stage into the
//! attribute and relationship stages. [`PropertyRegistry`] remembers which
//! property schema rows were already created in this run.

use std::collections::HashMap;

use umls_types::{CodeSystemProperty, RowId, RrfConcept};

use crate::store::TerminologyStore;
use crate::types::UmlsResult;

/// A code retained by the concept stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedCode {
    /// Source abbreviation.
    pub sab: String,
    /// Source code.
    pub code: String,
    /// Stored coding row.
    pub coding: RowId,
    /// Priority of that term type; lower is better.
    pub rank: usize,
}

/// Codes by atom identifier and by `(source, code)`.
#[derive(Debug, Default)]
pub struct ConceptIndex {
    codes: Vec<IndexedCode>,
    by_atom: HashMap<String, usize>,
    by_code: HashMap<String, HashMap<String, usize>>,
}

impl ConceptIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank of the atom currently retained for a code.
    pub fn rank_of(&self, sab: &str, code: &str) -> Option<usize> {
        self.by_code(sab, code).map(|c| c.rank)
    }

    /// Records an accepted atom and the coding row it was written to.
    ///
    /// The atom becomes resolvable by its AUI and its rank becomes the code's
    /// retained rank.
    pub fn record(&mut self, atom: &RrfConcept, rank: usize, coding: RowId) {
        let existing = self
            .by_code
            .get(&atom.sab)
            .and_then(|codes| codes.get(&atom.code))
            .copied();
        let slot = match existing {
            Some(slot) => {
                let entry = &mut self.codes[slot];
                entry.coding = coding;
                entry.rank = rank;
                slot
            }
            None => {
                let slot = self.codes.len();
                self.codes.push(IndexedCode {
                    sab: atom.sab.clone(),
                    code: atom.code.clone(),
                    coding,
                    rank,
                });
                self.by_code
                    .entry(atom.sab.clone())
                    .or_default()
                    .insert(atom.code.clone(), slot);
                slot
            }
        };
        self.by_atom.insert(atom.aui.clone(), slot);
    }

    /// Looks up a code by one of its accepted atoms.
    pub fn by_atom(&self, aui: &str) -> Option<&IndexedCode> {
        self.by_atom.get(aui).map(|&slot| &self.codes[slot])
    }

    /// Looks up a code by source and code.
    pub fn by_code(&self, sab: &str, code: &str) -> Option<&IndexedCode> {
        self.by_code
            .get(sab)
            .and_then(|codes| codes.get(code))
            .map(|&slot| &self.codes[slot])
    }

    /// Number of distinct codes.
    pub fn code_count(&self) -> usize {
        self.codes.len()
    }

    /// Number of indexed atoms.
    pub fn atom_count(&self) -> usize {
        self.by_atom.len()
    }
}

/// Get-or-create cache of property schema rows.
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    rows: HashMap<(RowId, String), RowId>,
}

impl PropertyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the schema row for `property` in `system`, inserting it on
    /// first use.
    pub fn get_or_create(
        &mut self,
        store: &TerminologyStore,
        system: RowId,
        property: &CodeSystemProperty,
    ) -> UmlsResult<RowId> {
        let key = (system, property.code.clone());
        if let Some(&id) = self.rows.get(&key) {
            return Ok(id);
        }
        let id = store.insert_property(system, property)?;
        self.rows.insert(key, id);
        Ok(id)
    }

    /// Number of rows created in this run.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no rows were created.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
