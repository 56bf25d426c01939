//! Graph nodes owned by models
//!
//! A nested model keeps the subject it was built with or parsed from, so
//! serializing the same instance twice writes the same triples. Records a
//! document synthesizes from plain fields (its identifier, dates, sources,
//! coverages) have no model of their own; the document keeps their subjects
//! in a [`NodeTable`] keyed by what each record holds.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::rdf::{BlankNode, RdfSubject};
use crate::schema::{Record, SchemaDescriptor};

/// Subject of a nested model.
///
/// Fresh on construction, kept from the source graph on parse. Node identity
/// never takes part in model equality.
#[derive(Debug, Clone)]
pub struct NodeId(RdfSubject);

impl NodeId {
    pub fn new() -> Self {
        Self(RdfSubject::blank())
    }

    pub fn subject(&self) -> &RdfSubject {
        &self.0
    }

    /// Empty record of `schema` bound to this node
    pub(crate) fn record(&self, schema: &'static SchemaDescriptor) -> Record {
        Record::with_subject(schema, self.0.clone())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for NodeId {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl From<&Record> for NodeId {
    fn from(record: &Record) -> Self {
        Self(record.subject().clone())
    }
}

/// Subjects of a document's synthesized records, by slot
#[derive(Debug, Clone, Default)]
pub struct NodeTable(IndexMap<String, RdfSubject>);

impl NodeTable {
    pub(crate) fn remember(&mut self, slot: String, record: &Record) {
        self.0.insert(slot, record.subject().clone());
    }

    /// Subject for `slot`: the one seen on parse, else one derived from the
    /// owner and the slot so repeated serialization agrees with itself
    pub(crate) fn subject(&self, owner: &RdfSubject, slot: &str) -> RdfSubject {
        if let Some(subject) = self.0.get(slot) {
            return subject.clone();
        }
        let mut hasher = DefaultHasher::new();
        owner.hash(&mut hasher);
        slot.hash(&mut hasher);
        BlankNode::with_id(&format!("n{:016x}", hasher.finish()))
            .map(RdfSubject::from)
            .unwrap_or_else(|_| RdfSubject::blank())
    }

    /// Move a synthesized record to the subject kept for `slot`
    pub(crate) fn bind(&self, owner: &RdfSubject, slot: &str, record: Record) -> Record {
        let subject = self.subject(owner, slot);
        record.bind(subject)
    }
}

impl PartialEq for NodeTable {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

/// Slot of a record in a group keyed by one of its string fields
pub(crate) fn slot(group: &str, record: &Record, key: &str) -> String {
    format!("{}:{}", group, record.peek_string(key).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schemas::{IDENTIFIER, SOURCE};

    #[test]
    fn test_node_is_stable_and_ignored_by_equality() {
        let node = NodeId::new();
        assert_eq!(node.record(&IDENTIFIER).subject(), node.subject());
        assert_eq!(node.clone().subject(), node.subject());
        assert_eq!(NodeId::new(), node);
        assert_ne!(NodeId::new().subject(), node.subject());
    }

    #[test]
    fn test_derived_subjects() {
        let owner = RdfSubject::named("http://example.org/resource/1").unwrap();
        let other = RdfSubject::named("http://example.org/resource/2").unwrap();
        let table = NodeTable::default();

        let first = table.subject(&owner, "identifier");
        assert_eq!(first, table.subject(&owner, "identifier"));
        assert!(matches!(first, RdfSubject::BlankNode(_)));
        assert_ne!(first, table.subject(&owner, "description"));
        assert_ne!(first, table.subject(&other, "identifier"));
    }

    #[test]
    fn test_remembered_subject_wins() {
        let owner = RdfSubject::named("http://example.org/resource/1").unwrap();
        let parsed = Record::new(&IDENTIFIER);
        let mut table = NodeTable::default();
        table.remember("identifier".to_string(), &parsed);
        assert_eq!(&table.subject(&owner, "identifier"), parsed.subject());

        let rebuilt = table.bind(&owner, "identifier", Record::new(&IDENTIFIER));
        assert_eq!(rebuilt.subject(), parsed.subject());
    }

    #[test]
    fn test_slot_is_keyed_by_content() {
        let mut source = Record::new(&SOURCE);
        source.set("is_derived_from", "USGS gauge 10109000");
        assert_eq!(slot("source", &source, "is_derived_from"), "source:USGS gauge 10109000");
        assert_eq!(slot("source", &Record::new(&SOURCE), "is_derived_from"), "source:");
    }
}
