//! # umls-types
//!
//! Type definitions for UMLS Metathesaurus records and the FHIR code system
//! definitions they are loaded into.
//!
//! This crate provides Rust types for the four Rich Release Format (RRF)
//! files the loader reads (`MRCONSO`, `MRSAT`, `MRREL`, `MRDOC`), the
//! code system definition model, and the typed property value used at the
//! store boundary.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Required to parse code system definitions from JSON.
//!
//! ## Usage
//!
//! ```rust
//! use umls_types::{PropertyType, PropertyValue, RrfConcept, Suppressible};
//! use umls_types::well_known;
//!
//! let atom = RrfConcept {
//!     lat: well_known::LANGUAGE_ENGLISH.to_string(),
//!     sab: well_known::LNC.to_string(),
//!     tty: "LC".to_string(),
//!     code: "79741-5".to_string(),
//!     string: "Eye-related brain MRI findings".to_string(),
//!     suppress: Some(Suppressible::No),
//!     ..Default::default()
//! };
//! assert!(!atom.is_suppressible());
//!
//! let value = PropertyValue::decode(PropertyType::String, "Nom");
//! assert_eq!(value.to_text(), "Nom");
//! ```

#![warn(missing_docs)]

mod attribute;
mod code_system;
mod concept;
mod enums;
mod explanation;
mod relationship;
mod row_id;
mod value;
pub mod well_known;

// Re-export all public types at crate root
pub use attribute::RrfAttribute;
pub use code_system::{CodeSystem, CodeSystemProperty, CODE_SYSTEM_RESOURCE_TYPE};
pub use concept::RrfConcept;
pub use enums::{PropertyType, Suppressible};
pub use explanation::RrfExplanation;
pub use relationship::RrfRelationship;
pub use row_id::RowId;
pub use value::PropertyValue;
