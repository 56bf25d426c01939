//! RDF → Record deserializer

use tracing::{debug, info, warn};

use super::{MappingError, MappingResult};
use crate::rdf::{Graph, NamedNode, RdfSubject};
use crate::schema::{decode, FieldKind, Record, SchemaDescriptor, Value};

/// RDF → Record deserializer
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphDeserializer;

impl GraphDeserializer {
    pub fn new() -> Self {
        Self
    }

    /// Parse one instance of `schema` from a graph.
    ///
    /// Without an explicit subject the instance is found through the schema's
    /// `rdf:type`. Returns `None` when the subject carries none of the
    /// schema's predicates.
    pub fn parse(
        &self,
        graph: &Graph,
        schema: &'static SchemaDescriptor,
        subject: Option<&RdfSubject>,
    ) -> MappingResult<Option<Record>> {
        let subject = match subject {
            Some(subject) => subject.clone(),
            None => self.resolve_subject(graph, schema)?,
        };
        self.parse_node(graph, schema, subject)
    }

    /// Find the subject typed with the schema's `rdf:type`.
    ///
    /// Several candidates resolve to the lexicographically smallest one.
    pub fn resolve_subject(
        &self,
        graph: &Graph,
        schema: &'static SchemaDescriptor,
    ) -> MappingResult<RdfSubject> {
        let rdf_type = schema.rdf_type.ok_or(MappingError::UntypedSchema(schema.name))?;
        let candidates = graph.subjects_of_type(&NamedNode::new(rdf_type)?);

        let chosen = candidates
            .iter()
            .min_by_key(|subject| subject.to_string())
            .ok_or_else(|| MappingError::SubjectNotFound {
                schema: schema.name,
                rdf_type: rdf_type.to_string(),
            })?;

        if candidates.len() > 1 {
            warn!(
                schema = schema.name,
                candidates = candidates.len(),
                subject = %chosen,
                "several subjects share the schema type, using the smallest"
            );
        } else {
            debug!(schema = schema.name, subject = %chosen, "resolved subject");
        }
        Ok((*chosen).clone())
    }

    fn parse_node(
        &self,
        graph: &Graph,
        schema: &'static SchemaDescriptor,
        subject: RdfSubject,
    ) -> MappingResult<Option<Record>> {
        let mut record = Record::with_subject(schema, subject);

        for entry in schema.entries()? {
            let objects = graph.objects(record.subject(), &entry.predicate);
            if objects.is_empty() {
                continue;
            }
            if !entry.is_list() && objects.len() > 1 {
                debug!(
                    schema = schema.name,
                    field = entry.name(),
                    count = objects.len(),
                    "scalar field has several objects, keeping the first"
                );
            }

            let mut values = Vec::with_capacity(objects.len());
            for object in objects {
                match entry.kind() {
                    FieldKind::Nested(child_schema) => {
                        let child = object.as_subject().ok_or_else(|| {
                            MappingError::ExpectedNode {
                                field: entry.name(),
                                value: object.lexical().to_string(),
                            }
                        })?;
                        match self.parse_node(graph, child_schema, child)? {
                            Some(child) => values.push(Value::from(child)),
                            None => debug!(
                                schema = child_schema.name,
                                node = %object,
                                "skipping nested node without data"
                            ),
                        }
                    }
                    FieldKind::Value(kind) => values.push(decode(entry.name(), kind, object)?),
                }
                if !entry.is_list() && !values.is_empty() {
                    break;
                }
            }

            if entry.is_list() {
                record.extend(entry.name(), values);
            } else if let Some(value) = values.into_iter().next() {
                record.set(entry.name(), value);
            }
        }

        if record.is_empty() {
            return Ok(None);
        }
        Ok(Some(record))
    }
}

/// Ordered schema dispatch: the first schema whose `rdf:type` occurs in a
/// graph wins.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: Vec<&'static SchemaDescriptor>,
}

impl SchemaRegistry {
    pub fn new(schemas: impl IntoIterator<Item = &'static SchemaDescriptor>) -> Self {
        Self {
            schemas: schemas.into_iter().collect(),
        }
    }

    pub fn schemas(&self) -> &[&'static SchemaDescriptor] {
        &self.schemas
    }

    /// The first registered schema with a typed subject in the graph
    pub fn resolve(&self, graph: &Graph) -> MappingResult<Option<&'static SchemaDescriptor>> {
        for schema in &self.schemas {
            let Some(rdf_type) = schema.rdf_type else {
                continue;
            };
            if !graph.subjects_of_type(&NamedNode::new(rdf_type)?).is_empty() {
                info!(schema = schema.name, "dispatching on rdf:type");
                return Ok(Some(schema));
            }
        }
        debug!(registered = self.schemas.len(), "no registered schema matches");
        Ok(None)
    }

    /// Resolve a schema and parse its instance
    pub fn parse(&self, graph: &Graph) -> MappingResult<Option<Record>> {
        match self.resolve(graph)? {
            Some(schema) => GraphDeserializer::new().parse(graph, schema, None),
            None => Ok(None),
        }
    }
}
