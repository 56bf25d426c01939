//! Record ↔ RDF mapping
//!
//! This module provides the bidirectional mapping between schema records and
//! RDF graphs.
//!
//! # Mapping Strategy
//!
//! ## Record → RDF
//!
//! - Declared `rdf:type` / `dc:type` → fixed type triples
//! - Scalar field → one triple, omitted when the value is falsy
//! - List field → one triple per element under the same predicate
//! - Nested record → link triple to the child subject, then the child's triples;
//!   a blank child subject already written in the same pass is given a fresh one
//!
//! ## RDF → Record
//!
//! - Subject resolved by `rdf:type` when not given
//! - Predicate objects → field values, typed by the field declaration
//! - Node objects of nested fields → child records, parsed recursively
//! - A node with none of its schema's predicates → absent

mod config;
mod deserializer;
mod serializer;

use crate::rdf::RdfError;
use thiserror::Error;

pub use config::{ConfigError, ConfigResult, MappingConfig};
pub use deserializer::{GraphDeserializer, SchemaRegistry};
pub use serializer::GraphSerializer;

/// Mapping errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    /// A schema field has no predicate mapping
    #[error("schema `{schema}` declares field `{field}` without a predicate mapping")]
    MissingPredicate {
        schema: &'static str,
        field: &'static str,
    },

    /// No subject carries the schema's `rdf:type`
    #[error("no subject of type <{rdf_type}> found for `{schema}`")]
    SubjectNotFound {
        schema: &'static str,
        rdf_type: String,
    },

    /// Subject resolution requested for a schema without a type
    #[error("schema `{0}` has no rdf:type; an explicit subject is required")]
    UntypedSchema(&'static str),

    /// Record content disagrees with the field's declared kind
    #[error("`{schema}.{field}` holds a value of the wrong kind")]
    KindMismatch {
        schema: &'static str,
        field: &'static str,
    },

    /// A record was given a field name its schema does not declare
    #[error("`{schema}` has no field `{field}`")]
    UndeclaredField { schema: &'static str, field: String },

    /// A nested field points at a literal
    #[error("`{field}` expects a node, found literal '{value}'")]
    ExpectedNode { field: &'static str, value: String },

    /// A literal that does not parse as the field's declared type
    #[error("`{field}`: cannot read '{value}' ({reason})")]
    InvalidLiteral {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Rdf(#[from] RdfError),
}

pub type MappingResult<T> = Result<T, MappingError>;
