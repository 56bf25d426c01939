//! HydroShare Models
//!
//! Typed HydroShare resource and aggregation metadata, and the engine that
//! maps it to and from RDF.
//!
//! # Architecture
//!
//! - `rdf`: terms, an indexed in-memory graph, RDF/XML and Turtle I/O
//! - `schema`: static field descriptor tables, wire records, the value and
//!   packed-value codecs
//! - `mapping`: the graph serializer and the schema-directed deserializer
//! - `models`: validated user-facing documents built on wire records
//! - `resource_map`: walker over the ORE map that lists a resource's content
//!
//! Parsing runs wire text → graph → record → validated model; serializing
//! runs the same chain backwards.
//!
//! ## Example Usage
//!
//! ```rust
//! use hydroshare_models::models::{AggregationMetadata, AggregationBase, FileSetMetadata, MetadataDocument};
//! use hydroshare_models::rdf::RdfFormat;
//!
//! let base = AggregationBase::new(
//!     "http://www.hydroshare.org/resource/abc/data/contents/asdf/asdf_resmap.xml#aggregation",
//!     "Field photos",
//! )
//! .unwrap();
//! let file_set = FileSetMetadata::new(base);
//!
//! let turtle = file_set.to_rdf_string(RdfFormat::Turtle).unwrap();
//! let parsed = AggregationMetadata::parse_str(&turtle, RdfFormat::Turtle).unwrap();
//! assert_eq!(parsed, Some(AggregationMetadata::FileSet(file_set)));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mapping;
pub mod models;
pub mod rdf;
pub mod resource_map;
pub mod schema;

// Re-export main types for convenience
pub use error::{Error, Result, ValidationError};

pub use mapping::{
    ConfigError, GraphDeserializer, GraphSerializer, MappingConfig, MappingError, SchemaRegistry,
};

pub use models::{
    AggregationMetadata, AggregationType, MetadataDocument, RecordModel, ResourceMetadata,
};

pub use rdf::{Graph, RdfFormat, RdfParser, RdfSerializer};

pub use resource_map::{AggregationEntry, ResourceMap};

pub use schema::{Record, SchemaDescriptor, Value};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
