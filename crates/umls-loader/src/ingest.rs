//! Ingestion stages.
//!
//! An [`IngestRun`] owns everything one load carries between files: the code
//! system rows registered at the start, the concept index, the relationship
//! mapping and the property registry. Each `load_*` method consumes one RRF
//! stream and refuses to start until the files it depends on are done.

use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::time::Instant;

use tracing::{debug, info, warn};
use umls_types::{
    well_known, CodeSystem, CodeSystemProperty, PropertyValue, RowId, RrfAttribute, RrfConcept,
    RrfExplanation, RrfRelationship,
};

use crate::attribute::AttributeFilter;
use crate::batch::BatchWriter;
use crate::catalog::SourceCatalog;
use crate::concept::ConceptFilter;
use crate::index::{ConceptIndex, PropertyRegistry};
use crate::mapper::{PropertyAliases, RelationshipMapping};
use crate::parser::{RrfParser, RrfRecord};
use crate::relationship::RelationshipFilter;
use crate::store::TerminologyStore;
use crate::types::{LoadStats, LoaderConfig, RrfFile, SkipReason, UmlsError, UmlsResult};

/// State of one ingestion run.
pub struct IngestRun<'a> {
    store: &'a TerminologyStore,
    catalog: &'a SourceCatalog,
    aliases: &'a PropertyAliases,
    config: &'a LoaderConfig,
    systems: HashMap<String, RowId>,
    concepts: ConceptIndex,
    mapping: RelationshipMapping,
    properties: PropertyRegistry,
    completed: BTreeSet<RrfFile>,
}

impl<'a> IngestRun<'a> {
    /// Creates a run. Nothing is written until a stage is invoked.
    pub fn new(
        store: &'a TerminologyStore,
        catalog: &'a SourceCatalog,
        aliases: &'a PropertyAliases,
        config: &'a LoaderConfig,
    ) -> Self {
        Self {
            store,
            catalog,
            aliases,
            config,
            systems: HashMap::new(),
            concepts: ConceptIndex::new(),
            mapping: RelationshipMapping::default(),
            properties: PropertyRegistry::new(),
            completed: BTreeSet::new(),
        }
    }

    /// Inserts a code system row for every catalog source.
    pub fn register_code_systems(&mut self) -> UmlsResult<usize> {
        info!("Registering {} code systems", self.catalog.len());
        let mut batch = BatchWriter::begin(self.store.connection(), self.config)?;
        for source in self.catalog.iter() {
            let id = self.store.insert_code_system(source)?;
            debug!("{} -> {} (row {})", source.abbreviation, source.url(), id);
            self.systems.insert(source.abbreviation.clone(), id);
            batch.record()?;
        }
        batch.finish()?;
        Ok(self.systems.len())
    }

    /// Returns true once `file` has been fully processed.
    pub fn is_complete(&self, file: RrfFile) -> bool {
        self.completed.contains(&file)
    }

    /// Fails with [`UmlsError::OutOfOrder`] if a prerequisite of `file` is
    /// still outstanding.
    pub fn check_ready(&self, file: RrfFile) -> UmlsResult<()> {
        match file
            .prerequisites()
            .iter()
            .find(|required| !self.is_complete(**required))
        {
            Some(&requires) => Err(UmlsError::OutOfOrder { file, requires }),
            None => Ok(()),
        }
    }

    /// The concept index built so far.
    pub fn concepts(&self) -> &ConceptIndex {
        &self.concepts
    }

    /// The relationship mapping read from `MRDOC.RRF`.
    pub fn mapping(&self) -> &RelationshipMapping {
        &self.mapping
    }

    /// Number of property schema rows created in this run.
    pub fn properties_registered(&self) -> usize {
        self.properties.len()
    }

    /// Loads `MRCONSO.RRF`: one coding per (source, code), displayed by the
    /// best-ranked accepted term type.
    pub fn load_concepts<R: Read>(&mut self, reader: R) -> UmlsResult<LoadStats> {
        self.check_ready(RrfFile::Concepts)?;
        info!("Loading concepts from {}", RrfFile::Concepts);
        let start = Instant::now();
        let mut stats = LoadStats::default();
        let mut batch = BatchWriter::begin(self.store.connection(), self.config)?;

        for atom in self.parser::<_, RrfConcept>(reader) {
            let atom = atom?;
            stats.total_records += 1;

            let (source, rank) = match atom.accept(self.catalog, &self.config.language) {
                Ok(accepted) => accepted,
                Err(reason) => {
                    stats.skip(reason);
                    continue;
                }
            };
            if self
                .concepts
                .rank_of(&atom.sab, &atom.code)
                .is_some_and(|retained| rank >= retained)
            {
                stats.skip(SkipReason::Outranked);
                continue;
            }

            let system = self.system_row(&source.abbreviation)?;
            let coding = self.store.upsert_coding(system, &atom.code, &atom.string)?;
            self.concepts.record(&atom, rank, coding);
            stats.written(atom.sab.as_str());
            batch.record()?;
        }

        batch.finish()?;
        stats.load_time_ms = start.elapsed().as_millis() as u64;
        self.completed.insert(RrfFile::Concepts);

        info!(
            "Loaded {} unique codes from {} rows ({} written, {} skipped) in {} ms",
            self.concepts.code_count(),
            stats.total_records,
            stats.written_records,
            stats.skipped_records(),
            stats.load_time_ms
        );
        log_breakdown(&stats);
        Ok(stats)
    }

    /// Loads `MRDOC.RRF` into the relationship mapping.
    pub fn load_explanations<R: Read>(&mut self, reader: R) -> UmlsResult<usize> {
        self.check_ready(RrfFile::Explanations)?;
        info!("Reading relationship mappings from {}", RrfFile::Explanations);
        let parser = self.parser::<_, RrfExplanation>(reader);
        self.mapping = RelationshipMapping::from_explanations(parser)?;
        self.completed.insert(RrfFile::Explanations);
        info!("Mapped {} relationship labels", self.mapping.len());
        Ok(self.mapping.len())
    }

    /// Loads `MRSAT.RRF`: declared attributes become property values.
    ///
    /// Values are decoded by the property's declared type and stored in that
    /// type's canonical text form; values that do not parse are kept as is.
    pub fn load_attributes<R: Read>(&mut self, reader: R) -> UmlsResult<LoadStats> {
        self.check_ready(RrfFile::Attributes)?;
        info!("Loading attributes from {}", RrfFile::Attributes);
        let start = Instant::now();
        let mut stats = LoadStats::default();
        let mut batch = BatchWriter::begin(self.store.connection(), self.config)?;

        for attribute in self.parser::<_, RrfAttribute>(reader) {
            let attribute = attribute?;
            stats.total_records += 1;

            let source = match attribute.accept(self.catalog) {
                Ok(source) => source,
                Err(reason) => {
                    stats.skip(reason);
                    continue;
                }
            };
            let Some(property) = self.aliases.find(&source.definition, &attribute.atn) else {
                stats.skip(SkipReason::UndeclaredProperty);
                continue;
            };

            let system = self.system_row(&source.abbreviation)?;
            let property_row = self.properties.get_or_create(self.store, system, property)?;
            let owner = self
                .concepts
                .by_code(&attribute.sab, &attribute.code)
                .ok_or_else(|| UmlsError::UnknownCode {
                    source_abbreviation: attribute.sab.clone(),
                    code: attribute.code.clone(),
                })?;

            let value = PropertyValue::decode(property.property_type, &attribute.atv);
            self.store
                .insert_coding_property(owner.coding, property_row, None, Some(&value.to_text()))?;
            stats.written(format!("{}|{}", attribute.sab, attribute.atn));
            batch.record()?;
        }

        batch.finish()?;
        stats.load_time_ms = start.elapsed().as_millis() as u64;
        self.completed.insert(RrfFile::Attributes);

        info!(
            "Loaded {} attribute values from {} rows ({} skipped) in {} ms",
            stats.written_records,
            stats.total_records,
            stats.skipped_records(),
            stats.load_time_ms
        );
        log_breakdown(&stats);
        Ok(stats)
    }

    /// Loads `MRREL.RRF`: mapped and hierarchical relationships become
    /// property values pointing at their target coding.
    pub fn load_relationships<R: Read>(&mut self, reader: R) -> UmlsResult<LoadStats> {
        self.check_ready(RrfFile::Relationships)?;
        info!("Loading relationships from {}", RrfFile::Relationships);
        let start = Instant::now();
        let mut stats = LoadStats::default();
        let mut undeclared_mappings = 0usize;
        let mut batch = BatchWriter::begin(self.store.connection(), self.config)?;

        for relationship in self.parser::<_, RrfRelationship>(reader) {
            let relationship = relationship?;
            stats.total_records += 1;

            let source = match relationship.accept(self.catalog) {
                Ok(source) => source,
                Err(reason) => {
                    stats.skip(reason);
                    continue;
                }
            };
            let resolved = resolve_property(&relationship, &source.definition, &self.mapping);
            if resolved.mapped_undeclared {
                undeclared_mappings += 1;
            }
            let Some(property) = resolved.property else {
                stats.skip(SkipReason::UnmappedRelationship);
                continue;
            };

            let system = self.system_row(&source.abbreviation)?;
            let property_row = self.properties.get_or_create(self.store, system, property)?;
            let (Some(owner), Some(target)) = (
                self.concepts.by_atom(&relationship.aui1),
                self.concepts.by_atom(&relationship.aui2),
            ) else {
                stats.skip(SkipReason::MissingEndpoint);
                continue;
            };

            self.store.insert_coding_property(
                owner.coding,
                property_row,
                Some(target.coding),
                Some(&target.code),
            )?;
            stats.written(format!(
                "{}|{} ({}/{})",
                source.url(),
                property.code,
                relationship.rel,
                relationship.rela
            ));
            batch.record()?;
        }

        batch.finish()?;
        stats.load_time_ms = start.elapsed().as_millis() as u64;
        self.completed.insert(RrfFile::Relationships);

        if undeclared_mappings > 0 {
            warn!(
                "{} relationships mapped to properties their code system does not declare",
                undeclared_mappings
            );
        }
        info!(
            "Loaded {} relationships from {} rows ({} skipped) in {} ms",
            stats.written_records,
            stats.total_records,
            stats.skipped_records(),
            stats.load_time_ms
        );
        log_breakdown(&stats);
        Ok(stats)
    }

    fn parser<R: Read, T: RrfRecord>(&self, reader: R) -> RrfParser<R, T> {
        debug!(
            "Decoding {} in chunks of {} records",
            T::FILE,
            self.config.decode_chunk_size
        );
        RrfParser::from_reader(reader, self.config.decode_chunk_size)
    }

    fn system_row(&self, abbreviation: &str) -> UmlsResult<RowId> {
        self.systems
            .get(abbreviation)
            .copied()
            .ok_or_else(|| UmlsError::InvalidCodeSystem {
                source_abbreviation: abbreviation.to_string(),
                reason: "code system was not registered for this run".to_string(),
            })
    }
}

struct Resolution<'s> {
    property: Option<&'s CodeSystemProperty>,
    mapped_undeclared: bool,
}

/// Picks the property a relationship is stored under.
///
/// An explicit label mapping wins when the code system declares the mapped
/// property. Otherwise `PAR` and `CHD` fall back to the properties carrying
/// the FHIR parent and child URIs.
fn resolve_property<'s>(
    relationship: &RrfRelationship,
    system: &'s CodeSystem,
    mapping: &RelationshipMapping,
) -> Resolution<'s> {
    let mut mapped_undeclared = false;
    if let Some(code) = mapping.get(&relationship.sab, &relationship.rel, &relationship.rela) {
        match system.property(code) {
            Some(property) => {
                return Resolution {
                    property: Some(property),
                    mapped_undeclared,
                }
            }
            None => mapped_undeclared = true,
        }
    }

    let property = if relationship.is_parent() {
        system.property_by_uri(well_known::PARENT_PROPERTY_URI)
    } else if relationship.is_child() {
        system.property_by_uri(well_known::CHILD_PROPERTY_URI)
    } else {
        None
    };
    Resolution {
        property,
        mapped_undeclared,
    }
}

fn log_breakdown(stats: &LoadStats) {
    for (key, count) in &stats.by_key {
        debug!("  {}: {}", key, count);
    }
    for (reason, count) in &stats.skipped {
        debug!("  skipped ({}): {}", reason, count);
    }
}
