//! Store row identity type.
//!
//! Rows in the terminology store are addressed by SQLite's 64-bit integer
//! primary keys. The loader never re-derives a row identity by querying the
//! store once it has been handed one, so this alias travels through the
//! in-memory indices unchanged.

/// Generated primary key of a row in the terminology store.
///
/// # Examples
///
/// ```
/// use umls_types::RowId;
///
/// let coding: RowId = 42;
/// let property: RowId = 7;
/// assert_ne!(coding, property);
/// ```
pub type RowId = i64;
