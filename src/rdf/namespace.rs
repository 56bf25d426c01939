//! RDF namespaces and prefix management
//!
//! Vocabulary bases used by HydroShare metadata documents, the macros that
//! build full predicate IRIs at compile time for the static schema tables, and
//! a prefix manager for compact, human readable triple listings.

use indexmap::IndexMap;

/// HydroShare terms vocabulary base. Also the `rdfs:isDefinedBy` target of
/// every schema annotation.
pub const HSTERMS: &str = "http://hydroshare.org/terms/";
/// Base for canonical resource URIs.
pub const HSRESOURCE: &str = "http://www.hydroshare.org/resource/";
pub const DC: &str = "http://purl.org/dc/elements/1.1/";
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const ORE: &str = "http://www.openarchives.org/ore/terms/";
pub const CITOTERMS: &str = "http://purl.org/spar/cito/";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const RDFS_IS_DEFINED_BY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";
pub const DC_TYPE: &str = "http://purl.org/dc/elements/1.1/type";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

macro_rules! hsterms {
    ($local:literal) => {
        concat!("http://hydroshare.org/terms/", $local)
    };
}

macro_rules! dc {
    ($local:literal) => {
        concat!("http://purl.org/dc/elements/1.1/", $local)
    };
}

macro_rules! dcterms {
    ($local:literal) => {
        concat!("http://purl.org/dc/terms/", $local)
    };
}

macro_rules! ore {
    ($local:literal) => {
        concat!("http://www.openarchives.org/ore/terms/", $local)
    };
}

pub(crate) use {dc, dcterms, hsterms, ore};

/// Prefix table used to print IRIs as `prefix:local` names
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Table holding the vocabularies HydroShare documents use
    pub fn new() -> Self {
        [
            ("hsterms", HSTERMS),
            ("hsresource", HSRESOURCE),
            ("dc", DC),
            ("dcterms", DCTERMS),
            ("rdf", RDF),
            ("rdfs", RDFS),
            ("xsd", XSD),
            ("ore", ORE),
            ("citoterms", CITOTERMS),
        ]
        .into_iter()
        .fold(Self { prefixes: IndexMap::new() }, |mgr, (prefix, iri)| {
            mgr.with_prefix(prefix, iri)
        })
    }

    /// Register a prefix, replacing any namespace it was bound to
    pub fn with_prefix(mut self, prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), iri.into());
        self
    }

    /// Compact an IRI using the longest matching namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, namespace_iri)| iri.starts_with(namespace_iri.as_str()))
            .max_by_key(|(_, namespace_iri)| namespace_iri.len())
            .map(|(prefix, namespace_iri)| format!("{}:{}", prefix, &iri[namespace_iri.len()..]))
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}
