//! SQLite terminology store.
//!
//! A single connection owns the database for the whole run. Writers go
//! through the narrow methods below; statements are prepared once and cached
//! on the connection.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use umls_types::{CodeSystemProperty, RowId};

use crate::catalog::UmlsSource;
use crate::schema::SCHEMA;
use crate::types::UmlsResult;

/// A code system row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCodeSystem {
    /// Row identity.
    pub id: RowId,
    /// Title.
    pub title: String,
    /// Canonical URL.
    pub url: String,
}

/// A coding row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCoding {
    /// Row identity.
    pub id: RowId,
    /// Owning code system row.
    pub system: RowId,
    /// Source code.
    pub code: String,
    /// Display text.
    pub display: Option<String>,
}

/// The relational store terminology is loaded into.
pub struct TerminologyStore {
    conn: Connection,
}

impl std::fmt::Debug for TerminologyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminologyStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl TerminologyStore {
    /// Opens (or creates) a store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> UmlsResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;",
        )?;
        Ok(Self { conn })
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> UmlsResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Creates any missing tables, indexes and triggers.
    pub fn create_schema(&self) -> UmlsResult<()> {
        for statement in SCHEMA {
            self.conn.execute_batch(statement)?;
        }
        Ok(())
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Inserts a code system row for a catalog source.
    pub fn insert_code_system(&self, source: &UmlsSource) -> UmlsResult<RowId> {
        let id = self
            .conn
            .prepare_cached(
                r#"INSERT INTO "CodeSystem" (_id, title, url, json) VALUES (?1, ?2, ?3, ?4) RETURNING id"#,
            )?
            .query_row(
                params![
                    source.system_id.to_string(),
                    source.title(),
                    source.url(),
                    source.definition_json
                ],
                |row| row.get(0),
            )?;
        Ok(id)
    }

    /// Inserts a property schema row for a code system.
    pub fn insert_property(
        &self,
        system: RowId,
        property: &CodeSystemProperty,
    ) -> UmlsResult<RowId> {
        let id = self
            .conn
            .prepare_cached(
                r#"INSERT INTO "CodeSystem_Property" (system, code, type, uri, description)
                   VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id"#,
            )?
            .query_row(
                params![
                    system,
                    property.code,
                    property.property_type.as_tag(),
                    property.uri,
                    property.description
                ],
                |row| row.get(0),
            )?;
        Ok(id)
    }

    /// Inserts a coding, or updates the display of the existing one.
    ///
    /// Returns the row identity either way.
    pub fn upsert_coding(&self, system: RowId, code: &str, display: &str) -> UmlsResult<RowId> {
        let id = self
            .conn
            .prepare_cached(
                r#"INSERT INTO "Coding" (system, code, display) VALUES (?1, ?2, ?3)
                   ON CONFLICT (system, code) DO UPDATE SET display = excluded.display
                   RETURNING id"#,
            )?
            .query_row(params![system, code, display], |row| row.get(0))?;
        Ok(id)
    }

    /// Inserts a property value. `target` is set only for relationships.
    pub fn insert_coding_property(
        &self,
        coding: RowId,
        property: RowId,
        target: Option<RowId>,
        value: Option<&str>,
    ) -> UmlsResult<()> {
        self.conn
            .prepare_cached(
                r#"INSERT INTO "Coding_Property" (coding, property, target, value) VALUES (?1, ?2, ?3, ?4)"#,
            )?
            .execute(params![coding, property, target, value])?;
        Ok(())
    }

    /// Finds the most recently registered code system with this URL.
    pub fn find_code_system(&self, url: &str) -> UmlsResult<Option<StoredCodeSystem>> {
        let system = self
            .conn
            .prepare_cached(
                r#"SELECT id, title, url FROM "CodeSystem" WHERE url = ?1 ORDER BY id DESC LIMIT 1"#,
            )?
            .query_row(params![url], |row| {
                Ok(StoredCodeSystem {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    url: row.get(2)?,
                })
            })
            .optional()?;
        Ok(system)
    }

    /// Finds a coding by code system row and code.
    pub fn find_coding(&self, system: RowId, code: &str) -> UmlsResult<Option<StoredCoding>> {
        let coding = self
            .conn
            .prepare_cached(
                r#"SELECT id, system, code, display FROM "Coding" WHERE system = ?1 AND code = ?2"#,
            )?
            .query_row(params![system, code], |row| {
                Ok(StoredCoding {
                    id: row.get(0)?,
                    system: row.get(1)?,
                    code: row.get(2)?,
                    display: row.get(3)?,
                })
            })
            .optional()?;
        Ok(coding)
    }

    /// Searches coding displays through the full-text index.
    pub fn search_display(&self, query: &str, limit: usize) -> UmlsResult<Vec<StoredCoding>> {
        let mut stmt = self.conn.prepare_cached(
            r#"SELECT "Coding".id, "Coding".system, "Coding".code, "Coding".display
               FROM "Coding_fts_idx" JOIN "Coding" ON "Coding".id = "Coding_fts_idx".rowid
               WHERE "Coding_fts_idx" MATCH ?1 ORDER BY rank LIMIT ?2"#,
        )?;
        let rows = stmt.query_map(params![query, limit as i64], |row| {
            Ok(StoredCoding {
                id: row.get(0)?,
                system: row.get(1)?,
                code: row.get(2)?,
                display: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Number of code system rows.
    pub fn code_system_count(&self) -> UmlsResult<usize> {
        self.count(r#"SELECT COUNT(*) FROM "CodeSystem""#)
    }

    /// Number of property schema rows.
    pub fn property_count(&self) -> UmlsResult<usize> {
        self.count(r#"SELECT COUNT(*) FROM "CodeSystem_Property""#)
    }

    /// Number of coding rows.
    pub fn coding_count(&self) -> UmlsResult<usize> {
        self.count(r#"SELECT COUNT(*) FROM "Coding""#)
    }

    /// Number of property value rows.
    pub fn coding_property_count(&self) -> UmlsResult<usize> {
        self.count(r#"SELECT COUNT(*) FROM "Coding_Property""#)
    }

    /// Number of relationship-derived property value rows.
    pub fn relationship_count(&self) -> UmlsResult<usize> {
        self.count(r#"SELECT COUNT(*) FROM "Coding_Property" WHERE target IS NOT NULL"#)
    }

    fn count(&self, sql: &str) -> UmlsResult<usize> {
        let n: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umls_types::PropertyType;

    const DEFINITION: &str = r#"{"resourceType": "CodeSystem", "url": "http://loinc.org", "title": "LOINC Code System"}"#;

    fn make_store() -> TerminologyStore {
        let store = TerminologyStore::open_in_memory().unwrap();
        store.create_schema().unwrap();
        store
    }

    fn make_system(store: &TerminologyStore) -> RowId {
        let source = UmlsSource::new("LNC", &["LC"], DEFINITION).unwrap();
        store.insert_code_system(&source).unwrap()
    }

    #[test]
    fn test_create_schema_is_idempotent() {
        let store = make_store();
        store.create_schema().unwrap();
        assert_eq!(store.coding_count().unwrap(), 0);
    }

    #[test]
    fn test_insert_code_system() {
        let store = make_store();
        let id = make_system(&store);

        let stored = store.find_code_system("http://loinc.org").unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.title, "LOINC Code System");
        assert!(store.find_code_system("http://snomed.info/sct").unwrap().is_none());

        let (uuid, json): (String, String) = store
            .connection()
            .query_row(r#"SELECT _id, json FROM "CodeSystem" WHERE id = ?1"#, [id], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(uuid.len(), 36);
        assert_eq!(json, DEFINITION);
    }

    #[test]
    fn test_upsert_updates_display_only() {
        let store = make_store();
        let system = make_system(&store);

        let first = store.upsert_coding(system, "79741-5", "first").unwrap();
        let second = store.upsert_coding(system, "79741-5", "second").unwrap();
        let other = store.upsert_coding(system, "LP408570-2", "other").unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(store.coding_count().unwrap(), 2);
        let coding = store.find_coding(system, "79741-5").unwrap().unwrap();
        assert_eq!(coding.display.as_deref(), Some("second"));
    }

    #[test]
    fn test_fts_index_follows_updates() {
        let store = make_store();
        let system = make_system(&store);

        store.upsert_coding(system, "1", "Eye-related brain MRI findings").unwrap();
        store.upsert_coding(system, "2", "Hemoglobin").unwrap();
        assert_eq!(store.search_display("brain", 10).unwrap().len(), 1);

        store.upsert_coding(system, "1", "Retinal imaging").unwrap();
        assert!(store.search_display("brain", 10).unwrap().is_empty());
        let hits = store.search_display("retinal", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "1");
    }

    #[test]
    fn test_property_rows() {
        let store = make_store();
        let system = make_system(&store);
        let property = CodeSystemProperty {
            code: "parent".to_string(),
            uri: Some("http://hl7.org/fhir/concept-properties#parent".to_string()),
            description: None,
            property_type: PropertyType::Code,
        };

        let property_id = store.insert_property(system, &property).unwrap();
        let a = store.upsert_coding(system, "A", "a").unwrap();
        let b = store.upsert_coding(system, "B", "b").unwrap();
        store.insert_coding_property(a, property_id, Some(b), Some("B")).unwrap();
        store.insert_coding_property(a, property_id, None, Some("x")).unwrap();

        assert_eq!(store.property_count().unwrap(), 1);
        assert_eq!(store.coding_property_count().unwrap(), 2);
        assert_eq!(store.relationship_count().unwrap(), 1);

        let tag: String = store
            .connection()
            .query_row(r#"SELECT type FROM "CodeSystem_Property""#, [], |row| row.get(0))
            .unwrap();
        assert_eq!(tag, "code");
    }
}
