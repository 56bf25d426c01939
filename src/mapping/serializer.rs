//! Record → RDF serializer

use std::collections::HashSet;

use tracing::debug;

use super::{MappingConfig, MappingError, MappingResult};
use crate::rdf::namespace::{DC_TYPE, RDFS_IS_DEFINED_BY, RDFS_LABEL, RDF_TYPE};
use crate::rdf::{Graph, Literal, NamedNode, RdfPredicate, RdfSubject};
use crate::schema::{encode, FieldKind, Record, RegistryEntry, Value};

/// Record → RDF serializer
pub struct GraphSerializer {
    config: MappingConfig,
}

impl Default for GraphSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphSerializer {
    /// Create a serializer with the default configuration
    pub fn new() -> Self {
        Self::with_config(MappingConfig::default())
    }

    /// Create a serializer with custom configuration
    pub fn with_config(config: MappingConfig) -> Self {
        Self { config }
    }

    /// Serialize a record into a fresh graph
    pub fn to_graph(&self, record: &Record) -> MappingResult<Graph> {
        let mut graph = Graph::new();
        self.serialize(record, &mut graph)?;
        debug!(
            schema = record.schema().name,
            triples = graph.len(),
            "serialized record"
        );
        Ok(graph)
    }

    /// Add the triples of a record, and of every record nested in it, to a graph.
    ///
    /// Nothing is written when any record in the tree carries an undeclared
    /// field.
    pub fn serialize(&self, record: &Record, graph: &mut Graph) -> MappingResult<()> {
        check_declared(record)?;
        let mut written = HashSet::new();
        self.write(record, record.subject(), graph, &mut written)
    }

    fn write(
        &self,
        record: &Record,
        subject: &RdfSubject,
        graph: &mut Graph,
        written: &mut HashSet<RdfSubject>,
    ) -> MappingResult<()> {
        let schema = record.schema();

        if let Some(rdf_type) = schema.rdf_type {
            let type_node = NamedNode::new(rdf_type)?;
            graph.add(subject.clone(), RdfPredicate::new(RDF_TYPE)?, type_node.clone().into());

            let label = schema.label.filter(|_| self.config.emit_schema_annotations);
            if let Some(label) = label {
                let type_subject = RdfSubject::from(type_node);
                graph.add(
                    type_subject.clone(),
                    RdfPredicate::new(RDFS_LABEL)?,
                    Literal::new_simple_literal(label).into(),
                );
                graph.add(
                    type_subject,
                    RdfPredicate::new(RDFS_IS_DEFINED_BY)?,
                    NamedNode::new(&self.config.vocabulary_base)?.into(),
                );
            }
        }
        if let Some(dc_type) = schema.dc_type {
            graph.add(
                subject.clone(),
                RdfPredicate::new(DC_TYPE)?,
                NamedNode::new(dc_type)?.into(),
            );
        }

        for entry in schema.entries()? {
            let Some(field) = record.get(entry.name()) else {
                continue;
            };
            for value in field.values() {
                self.emit(record, subject, &entry, value, graph, written)?;
            }
        }
        Ok(())
    }

    fn emit(
        &self,
        record: &Record,
        subject: &RdfSubject,
        entry: &RegistryEntry,
        value: &Value,
        graph: &mut Graph,
        written: &mut HashSet<RdfSubject>,
    ) -> MappingResult<()> {
        let mismatch = || MappingError::KindMismatch {
            schema: record.schema().name,
            field: entry.name(),
        };

        match (entry.kind(), value) {
            (FieldKind::Nested(schema), Value::Nested(child)) => {
                if child.schema().name != schema.name {
                    return Err(mismatch());
                }
                let child_subject = claim(child, written);
                graph.add(subject.clone(), entry.predicate.clone(), child_subject.clone().into());
                self.write(child, &child_subject, graph, written)
            }
            (FieldKind::Nested(_), _) | (FieldKind::Value(_), Value::Nested(_)) => Err(mismatch()),
            (FieldKind::Value(_), value) if value.is_empty() => Ok(()),
            (FieldKind::Value(_), value) => {
                graph.add(subject.clone(), entry.predicate.clone(), encode(value)?);
                Ok(())
            }
        }
    }
}

/// Subject to write a nested record under. A blank node belongs to one
/// parent; a second occurrence in the same pass gets a fresh node.
fn claim(child: &Record, written: &mut HashSet<RdfSubject>) -> RdfSubject {
    let subject = child.subject();
    if matches!(subject, RdfSubject::BlankNode(_)) && !written.insert(subject.clone()) {
        debug!(schema = child.schema().name, "blank node already written, using a fresh one");
        return RdfSubject::blank();
    }
    subject.clone()
}

fn check_declared(record: &Record) -> MappingResult<()> {
    if let Some(field) = record.undeclared() {
        return Err(MappingError::UndeclaredField {
            schema: record.schema().name,
            field: field.to_string(),
        });
    }
    for (_, field) in record.fields() {
        for value in field.values() {
            if let Value::Nested(child) = value {
                check_declared(child)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::namespace::HSTERMS;
    use crate::rdf::RdfObject;
    use crate::schema::{FieldDescriptor, SchemaDescriptor, ValueKind};

    static PERSON: SchemaDescriptor = SchemaDescriptor {
        name: "Person",
        rdf_type: None,
        dc_type: None,
        label: None,
        fields: &[
            FieldDescriptor::scalar("name", "http://example.org/name", ValueKind::String),
            FieldDescriptor::scalar("age", "http://example.org/age", ValueKind::Integer),
        ],
    };

    static DOCUMENT: SchemaDescriptor = SchemaDescriptor {
        name: "Document",
        rdf_type: Some("http://example.org/Document"),
        dc_type: Some("http://example.org/DocumentType"),
        label: Some("Document"),
        fields: &[
            FieldDescriptor::scalar("title", "http://example.org/title", ValueKind::String),
            FieldDescriptor::list("keyword", "http://example.org/keyword", ValueKind::String),
            FieldDescriptor::nested_list("author", "http://example.org/author", &PERSON),
        ],
    };

    fn predicate(iri: &str) -> RdfPredicate {
        RdfPredicate::new(iri).unwrap()
    }

    fn document() -> Record {
        let mut record =
            Record::with_subject(&DOCUMENT, RdfSubject::named("http://example.org/doc").unwrap());
        record.set("title", "Snow depth");
        record.extend("keyword", ["snow", "depth", ""]);
        let mut author = Record::new(&PERSON);
        author.set("name", "Jane");
        author.set("age", 0i64);
        record.push("author", author);
        record
    }

    #[test]
    fn test_fixed_type_triples() {
        let graph = GraphSerializer::new().to_graph(&document()).unwrap();
        let doc = RdfSubject::named("http://example.org/doc").unwrap();
        let types = graph.objects(&doc, &predicate(RDF_TYPE));
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].lexical(), "http://example.org/Document");
        assert_eq!(graph.objects(&doc, &predicate(DC_TYPE)).len(), 1);

        let type_subject = RdfSubject::named("http://example.org/Document").unwrap();
        let defined_by = graph.objects(&type_subject, &predicate(RDFS_IS_DEFINED_BY));
        assert_eq!(defined_by[0].lexical(), HSTERMS);
    }

    #[test]
    fn test_annotations_can_be_disabled() {
        let config = MappingConfig {
            emit_schema_annotations: false,
            ..MappingConfig::default()
        };
        let graph = GraphSerializer::with_config(config).to_graph(&document()).unwrap();
        let type_subject = RdfSubject::named("http://example.org/Document").unwrap();
        assert!(!graph.has_subject(&type_subject));
    }

    #[test]
    fn test_lists_and_falsy_values() {
        let graph = GraphSerializer::new().to_graph(&document()).unwrap();
        let doc = RdfSubject::named("http://example.org/doc").unwrap();
        // the empty keyword is dropped
        assert_eq!(graph.objects(&doc, &predicate("http://example.org/keyword")).len(), 2);

        let authors = graph.objects(&doc, &predicate("http://example.org/author"));
        assert_eq!(authors.len(), 1);
        assert!(matches!(authors[0], RdfObject::BlankNode(_)));
        let author = authors[0].as_subject().unwrap();
        assert_eq!(graph.objects(&author, &predicate("http://example.org/name")).len(), 1);
        // age 0 is falsy
        assert!(graph.objects(&author, &predicate("http://example.org/age")).is_empty());
    }

    #[test]
    fn test_kind_mismatch() {
        let mut record = Record::new(&DOCUMENT);
        record.set("author", "not a record");
        let err = GraphSerializer::new().to_graph(&record).unwrap_err();
        assert_eq!(
            err,
            MappingError::KindMismatch {
                schema: "Document",
                field: "author"
            }
        );
    }

    #[test]
    fn test_type_annotations_written_once() {
        let mut second =
            Record::with_subject(&DOCUMENT, RdfSubject::named("http://example.org/doc2").unwrap());
        second.set("title", "Snow water equivalent");

        let serializer = GraphSerializer::new();
        let mut graph = Graph::new();
        serializer.serialize(&document(), &mut graph).unwrap();
        serializer.serialize(&second, &mut graph).unwrap();

        let type_subject = RdfSubject::named("http://example.org/Document").unwrap();
        assert_eq!(graph.objects(&type_subject, &predicate(RDFS_LABEL)).len(), 1);
        assert_eq!(graph.objects(&type_subject, &predicate(RDFS_IS_DEFINED_BY)).len(), 1);
        let document_type = NamedNode::new("http://example.org/Document").unwrap();
        assert_eq!(graph.subjects_of_type(&document_type).len(), 2);
    }

    #[test]
    fn test_serializing_twice_is_idempotent() {
        let record = document();
        let serializer = GraphSerializer::new();
        let mut graph = serializer.to_graph(&record).unwrap();
        let size = graph.len();
        serializer.serialize(&record, &mut graph).unwrap();
        assert_eq!(graph.len(), size);
    }

    #[test]
    fn test_shared_child_gets_its_own_node() {
        let mut record = document();
        let mut author = Record::new(&PERSON);
        author.set("name", "Joe");
        record.push("author", author.clone());
        record.push("author", author);

        let graph = GraphSerializer::new().to_graph(&record).unwrap();
        let doc = RdfSubject::named("http://example.org/doc").unwrap();
        let authors = graph.objects(&doc, &predicate("http://example.org/author"));
        assert_eq!(authors.len(), 3);
        for author in authors {
            let author = author.as_subject().unwrap();
            assert_eq!(graph.objects(&author, &predicate("http://example.org/name")).len(), 1);
        }
    }

    #[test]
    fn test_undeclared_field_is_refused() {
        let mut record = document();
        let mut author = Record::new(&PERSON);
        author.set("nmae", "Joe");
        record.push("author", author);

        let mut graph = Graph::new();
        let err = GraphSerializer::new().serialize(&record, &mut graph).unwrap_err();
        assert_eq!(
            err,
            MappingError::UndeclaredField {
                schema: "Person",
                field: "nmae".to_string()
            }
        );
        assert!(graph.is_empty());
    }
}
