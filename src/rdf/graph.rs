//! In-memory RDF graph
//!
//! Triples are kept with set semantics: inserting an existing triple is a
//! no-op. Iteration follows insertion order so serialized output is stable.

use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

use super::namespace::RDF_TYPE;
use super::types::{NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};

/// RDF graph with two indices for the lookups the mapping engine performs
///
/// - SP index: Subject -> Predicate -> Objects (field reconstruction)
/// - PO index: Predicate -> Object -> Subjects (subject resolution by type)
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// All triples (primary storage)
    triples: IndexSet<Triple>,

    /// SP index: Subject -> Predicate -> Set of Objects
    sp_index: HashMap<RdfSubject, IndexMap<RdfPredicate, IndexSet<RdfObject>>>,

    /// PO index: Predicate -> Object -> Set of Subjects
    po_index: HashMap<RdfPredicate, HashMap<RdfObject, IndexSet<RdfSubject>>>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple. Returns false when the triple was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.triples.contains(&triple) {
            return false;
        }

        self.sp_index
            .entry(triple.subject.clone())
            .or_default()
            .entry(triple.predicate.clone())
            .or_default()
            .insert(triple.object.clone());

        self.po_index
            .entry(triple.predicate.clone())
            .or_default()
            .entry(triple.object.clone())
            .or_default()
            .insert(triple.subject.clone());

        self.triples.insert(triple)
    }

    /// Insert a triple from its parts
    pub fn add(&mut self, subject: RdfSubject, predicate: RdfPredicate, object: RdfObject) -> bool {
        self.insert(Triple::new(subject, predicate, object))
    }

    /// Check if a triple exists in the graph
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Get an iterator over all triples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// All objects for (subject, predicate), in insertion order
    pub fn objects(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Vec<&RdfObject> {
        self.sp_index
            .get(subject)
            .and_then(|predicates| predicates.get(predicate))
            .map(|objects| objects.iter().collect())
            .unwrap_or_default()
    }

    /// All subjects for (predicate, object), in insertion order
    pub fn subjects(&self, predicate: &RdfPredicate, object: &RdfObject) -> Vec<&RdfSubject> {
        self.po_index
            .get(predicate)
            .and_then(|objects| objects.get(object))
            .map(|subjects| subjects.iter().collect())
            .unwrap_or_default()
    }

    /// Subjects declared with `rdf:type <type_iri>`
    pub fn subjects_of_type(&self, type_iri: &NamedNode) -> Vec<&RdfSubject> {
        match RdfPredicate::new(RDF_TYPE) {
            Ok(rdf_type) => self.subjects(&rdf_type, &RdfObject::NamedNode(type_iri.clone())),
            Err(_) => Vec::new(),
        }
    }

    /// Get triples with a specific subject
    pub fn triples_with_subject(&self, subject: &RdfSubject) -> Vec<&Triple> {
        self.triples
            .iter()
            .filter(|triple| &triple.subject == subject)
            .collect()
    }

    /// Whether any triple uses this subject
    pub fn has_subject(&self, subject: &RdfSubject) -> bool {
        self.sp_index.contains_key(subject)
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

impl PartialEq for Graph {
    /// Set equality, independent of insertion order
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.triples.iter().all(|t| other.contains(t))
    }
}

impl Eq for Graph {}
