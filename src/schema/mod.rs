//! Schema descriptors and the predicate registry
//!
//! Every wire schema is a static table of [`FieldDescriptor`]s. The serializer
//! and the deserializer both walk [`SchemaDescriptor::entries`], so whatever
//! one writes the other reads back with the same predicates and cardinality.

mod codec;
mod packed;
mod value;

use std::fmt;

use crate::mapping::{MappingError, MappingResult};
use crate::rdf::RdfPredicate;

pub use codec::{decode, encode, format_datetime, parse_datetime};
pub use packed::{pack, unpack, PackedFields, PackedRecord, KEY_VALUE_SEPARATOR, PAIR_SEPARATOR};
pub(crate) use packed::{datetime_text, float_text};
pub use value::{FieldValue, Record, Value};

/// Whether a field maps to one triple or to one triple per element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Scalar,
    List,
}

/// Primitive value types a literal or URI field can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    Uri,
}

/// What a field stores: a primitive value or an owned child schema instance
#[derive(Clone, Copy)]
pub enum FieldKind {
    Value(ValueKind),
    Nested(&'static SchemaDescriptor),
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Value(kind) => write!(f, "Value({:?})", kind),
            FieldKind::Nested(schema) => write!(f, "Nested({})", schema.name),
        }
    }
}

/// Static declaration of one schema field
#[derive(Debug)]
pub struct FieldDescriptor {
    pub name: &'static str,
    /// Full predicate IRI. `None` is a schema authoring defect reported by
    /// [`SchemaDescriptor::entries`].
    pub predicate: Option<&'static str>,
    pub cardinality: Cardinality,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn scalar(name: &'static str, predicate: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            predicate: Some(predicate),
            cardinality: Cardinality::Scalar,
            kind: FieldKind::Value(kind),
        }
    }

    pub const fn list(name: &'static str, predicate: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            predicate: Some(predicate),
            cardinality: Cardinality::List,
            kind: FieldKind::Value(kind),
        }
    }

    pub const fn nested(
        name: &'static str,
        predicate: &'static str,
        schema: &'static SchemaDescriptor,
    ) -> Self {
        Self {
            name,
            predicate: Some(predicate),
            cardinality: Cardinality::Scalar,
            kind: FieldKind::Nested(schema),
        }
    }

    pub const fn nested_list(
        name: &'static str,
        predicate: &'static str,
        schema: &'static SchemaDescriptor,
    ) -> Self {
        Self {
            name,
            predicate: Some(predicate),
            cardinality: Cardinality::List,
            kind: FieldKind::Nested(schema),
        }
    }

    pub fn is_list(&self) -> bool {
        self.cardinality == Cardinality::List
    }

    pub fn nested_schema(&self) -> Option<&'static SchemaDescriptor> {
        match self.kind {
            FieldKind::Nested(schema) => Some(schema),
            FieldKind::Value(_) => None,
        }
    }
}

/// Static declaration of one entity type
#[derive(Debug)]
pub struct SchemaDescriptor {
    pub name: &'static str,
    /// Fixed `rdf:type` emitted for every instance and used to find the
    /// subject of an instance in a graph when none is given.
    pub rdf_type: Option<&'static str>,
    /// Fixed secondary `dc:type` URI.
    pub dc_type: Option<&'static str>,
    /// Human-readable label attached to the type URI itself.
    pub label: Option<&'static str>,
    pub fields: &'static [FieldDescriptor],
}

/// One resolved row of the predicate registry
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub field: &'static FieldDescriptor,
    pub predicate: RdfPredicate,
}

impl RegistryEntry {
    pub fn name(&self) -> &'static str {
        self.field.name
    }

    pub fn is_list(&self) -> bool {
        self.field.is_list()
    }

    pub fn kind(&self) -> FieldKind {
        self.field.kind
    }
}

impl SchemaDescriptor {
    /// Look up a field declaration by name
    pub fn field(&'static self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The ordered predicate registry for this schema.
    ///
    /// Fails on the first field without a predicate mapping, or whose
    /// predicate is not a valid IRI.
    pub fn entries(&'static self) -> MappingResult<Vec<RegistryEntry>> {
        self.fields
            .iter()
            .map(|field| {
                let iri = field.predicate.ok_or(MappingError::MissingPredicate {
                    schema: self.name,
                    field: field.name,
                })?;
                Ok(RegistryEntry {
                    field,
                    predicate: RdfPredicate::new(iri)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static CHILD: SchemaDescriptor = SchemaDescriptor {
        name: "Child",
        rdf_type: None,
        dc_type: None,
        label: None,
        fields: &[FieldDescriptor::scalar(
            "name",
            "http://example.org/name",
            ValueKind::String,
        )],
    };

    static PARENT: SchemaDescriptor = SchemaDescriptor {
        name: "Parent",
        rdf_type: Some("http://example.org/Parent"),
        dc_type: None,
        label: Some("Parent"),
        fields: &[
            FieldDescriptor::scalar("title", "http://example.org/title", ValueKind::String),
            FieldDescriptor::list("keyword", "http://example.org/keyword", ValueKind::String),
            FieldDescriptor::nested_list("child", "http://example.org/child", &CHILD),
        ],
    };

    static UNMAPPED: SchemaDescriptor = SchemaDescriptor {
        name: "Unmapped",
        rdf_type: None,
        dc_type: None,
        label: None,
        fields: &[
            FieldDescriptor::scalar("title", "http://example.org/title", ValueKind::String),
            FieldDescriptor {
                name: "orphan",
                predicate: None,
                cardinality: Cardinality::Scalar,
                kind: FieldKind::Value(ValueKind::String),
            },
        ],
    };

    #[test]
    fn test_entries_follow_declaration_order() {
        let entries = PARENT.entries().unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["title", "keyword", "child"]);
        assert!(entries[1].is_list());
        assert_eq!(entries[2].field.nested_schema().map(|s| s.name), Some("Child"));
        assert_eq!(entries[0].predicate.as_str(), "http://example.org/title");
    }

    #[test]
    fn test_missing_predicate_fails_fast() {
        let err = UNMAPPED.entries().unwrap_err();
        assert!(matches!(
            err,
            MappingError::MissingPredicate { schema: "Unmapped", field: "orphan" }
        ));
    }

    #[test]
    fn test_field_lookup() {
        assert!(PARENT.field("keyword").is_some());
        assert!(PARENT.field("nope").is_none());
        assert_eq!(format!("{:?}", PARENT.fields[2].kind), "Nested(Child)");
    }
}
