//! Terminology store schema.
//!
//! Statements are idempotent (`IF NOT EXISTS`) and run in order by
//! [`TerminologyStore::create_schema`](crate::TerminologyStore::create_schema).

/// Schema statements, in execution order.
pub const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS "CodeSystem" (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        _id     TEXT    NOT NULL,
        title   TEXT    NOT NULL,
        url     TEXT    NOT NULL,
        json    TEXT    NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Coding" (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        system  INTEGER NOT NULL, -- "CodeSystem".id
        code    TEXT    NOT NULL,
        display TEXT
    )"#,
    r#"CREATE UNIQUE INDEX IF NOT EXISTS "Coding_system_code_idx" ON "Coding" (system, code)"#,
    r#"CREATE VIRTUAL TABLE IF NOT EXISTS "Coding_fts_idx" USING fts5(
        display, tokenize = 'porter', content = 'Coding', content_rowid = 'id'
    )"#,
    r#"CREATE TRIGGER IF NOT EXISTS "Coding_postinsert" AFTER INSERT ON "Coding" BEGIN
        INSERT INTO "Coding_fts_idx" (rowid, display) VALUES (new.id, new.display);
    END"#,
    r#"CREATE TRIGGER IF NOT EXISTS "Coding_postdelete" AFTER DELETE ON "Coding" BEGIN
        INSERT INTO "Coding_fts_idx" ("Coding_fts_idx", rowid, display) VALUES ('delete', old.id, old.display);
    END"#,
    r#"CREATE TRIGGER IF NOT EXISTS "Coding_postupdate" AFTER UPDATE ON "Coding" BEGIN
        INSERT INTO "Coding_fts_idx" ("Coding_fts_idx", rowid, display) VALUES ('delete', old.id, old.display);
        INSERT INTO "Coding_fts_idx" (rowid, display) VALUES (new.id, new.display);
    END"#,
    r#"CREATE TABLE IF NOT EXISTS "CodeSystem_Property" (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        system      INTEGER NOT NULL, -- "CodeSystem".id
        code        TEXT    NOT NULL,
        type        TEXT    NOT NULL,
        uri         TEXT,
        description TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Coding_Property" (
        coding      INTEGER NOT NULL, -- "Coding".id
        property    INTEGER NOT NULL, -- "CodeSystem_Property".id
        target      INTEGER,          -- "Coding".id, relationships only
        value       TEXT
    )"#,
    r#"CREATE INDEX IF NOT EXISTS "Coding_Property_idx" ON "Coding_Property" (coding, property)"#,
    r#"CREATE INDEX IF NOT EXISTS "Coding_Property_relationship_idx" ON "Coding_Property" (coding, target, property)
        WHERE target IS NOT NULL"#,
];
