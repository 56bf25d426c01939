//! RDF support for HydroShare metadata documents
//!
//! This module provides the triple-level plumbing the mapping engine is built on:
//! - RDF terms and triples (oxrdf wrappers)
//! - An insertion-ordered, set-semantics graph with lookup indices
//! - RDF/XML, Turtle and N-Triples parsing and serialization (rio)
//! - Vocabulary namespaces and prefix compaction
//!
//! # Example
//!
//! ```rust
//! use hydroshare_models::rdf::{Graph, Literal, RdfFormat, RdfParser, RdfPredicate, RdfSerializer, RdfSubject};
//!
//! let mut graph = Graph::new();
//! graph.add(
//!     RdfSubject::named("http://www.hydroshare.org/resource/abc").unwrap(),
//!     RdfPredicate::new("http://purl.org/dc/elements/1.1/title").unwrap(),
//!     Literal::new_simple_literal("Snow depth").into(),
//! );
//!
//! let text = RdfSerializer::serialize(&graph, RdfFormat::Turtle).unwrap();
//! let parsed = RdfParser::parse(&text, RdfFormat::Turtle).unwrap();
//! assert_eq!(parsed, graph);
//! ```

mod graph;
pub mod namespace;
mod serialization;
mod types;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple,
};

pub use graph::Graph;

pub use namespace::NamespaceManager;

pub use serialization::{
    ParseError, ParseResult, RdfFormat, RdfParser, RdfSerializer, SerializeError,
    SerializeResult,
};
