//! Wire-level records
//!
//! A [`Record`] is one schema instance as it travels to and from a graph:
//! a subject plus named field values. Models convert themselves to and from
//! records; the mapping engine only ever sees records.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use tracing::warn;

use super::SchemaDescriptor;
use crate::error::ValidationError;
use crate::rdf::RdfSubject;

/// A single field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Uri(String),
    Nested(Box<Record>),
}

impl Value {
    pub fn uri(value: impl Into<String>) -> Self {
        Value::Uri(value.into())
    }

    /// Falsy values are omitted from serialized output
    pub fn is_empty(&self) -> bool {
        match self {
            Value::String(s) | Value::Uri(s) => s.is_empty(),
            Value::Integer(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::Boolean(b) => !b,
            Value::DateTime(_) | Value::Nested(_) => false,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::DateTime(_) => "datetime",
            Value::Uri(_) => "uri",
            Value::Nested(_) => "nested record",
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Nested(Box::new(value))
    }
}

/// A field's content: one value, or an ordered list of values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    List(Vec<Value>),
}

impl FieldValue {
    pub fn into_values(self) -> Vec<Value> {
        match self {
            FieldValue::Scalar(value) => vec![value],
            FieldValue::List(values) => values,
        }
    }

    pub fn values(&self) -> &[Value] {
        match self {
            FieldValue::Scalar(value) => std::slice::from_ref(value),
            FieldValue::List(values) => values,
        }
    }
}

/// One schema instance bound to a subject
#[derive(Debug, Clone)]
pub struct Record {
    schema: &'static SchemaDescriptor,
    subject: RdfSubject,
    fields: IndexMap<&'static str, FieldValue>,
    undeclared: Option<String>,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name == other.schema.name
            && self.subject == other.subject
            && self.fields == other.fields
    }
}

impl Record {
    /// New record with a fresh blank subject
    pub fn new(schema: &'static SchemaDescriptor) -> Self {
        Self::with_subject(schema, RdfSubject::blank())
    }

    pub fn with_subject(schema: &'static SchemaDescriptor, subject: RdfSubject) -> Self {
        Self {
            schema,
            subject,
            fields: IndexMap::new(),
            undeclared: None,
        }
    }

    /// Move the record to another subject
    pub fn bind(mut self, subject: RdfSubject) -> Self {
        self.subject = subject;
        self
    }

    pub fn schema(&self) -> &'static SchemaDescriptor {
        self.schema
    }

    pub fn subject(&self) -> &RdfSubject {
        &self.subject
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    /// First field name written that the schema does not declare.
    ///
    /// The value is dropped on write; the serializer refuses such records.
    pub fn undeclared(&self) -> Option<&str> {
        self.undeclared.as_deref()
    }

    /// Text of a string or URI field without removing it
    pub fn peek_string(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)?.values().first()? {
            Value::String(s) | Value::Uri(s) => Some(s),
            _ => None,
        }
    }

    fn resolve(&mut self, name: &str) -> Option<&'static str> {
        let resolved = self.schema.field(name).map(|field| field.name);
        if resolved.is_none() {
            warn!(schema = self.schema.name, field = name, "undeclared field");
            self.undeclared.get_or_insert_with(|| name.to_string());
        }
        resolved
    }

    /// Set a scalar field, replacing any previous content
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        if let Some(name) = self.resolve(name) {
            self.fields.insert(name, FieldValue::Scalar(value.into()));
        }
    }

    /// Set a scalar field when a value is present
    pub fn set_opt<V: Into<Value>>(&mut self, name: &str, value: Option<V>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    /// Append to a list field
    pub fn push(&mut self, name: &str, value: impl Into<Value>) {
        let Some(name) = self.resolve(name) else {
            return;
        };
        let entry = self
            .fields
            .entry(name)
            .or_insert_with(|| FieldValue::List(Vec::new()));
        if let FieldValue::Scalar(_) = entry {
            let previous = std::mem::replace(entry, FieldValue::List(Vec::new()));
            *entry = FieldValue::List(previous.into_values());
        }
        if let FieldValue::List(values) = entry {
            values.push(value.into());
        }
    }

    /// Append every value of an iterator to a list field
    pub fn extend<V, I>(&mut self, name: &str, values: I)
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        for value in values {
            self.push(name, value);
        }
    }

    /// Remove a field and return its content
    pub fn take(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.shift_remove(name)
    }

    /// All values of a field, empty when absent
    pub fn take_values(&mut self, name: &str) -> Vec<Value> {
        self.take(name).map(FieldValue::into_values).unwrap_or_default()
    }

    /// First value of a field
    pub fn take_value(&mut self, name: &str) -> Option<Value> {
        self.take_values(name).into_iter().next()
    }

    pub fn take_string(&mut self, name: &str) -> Result<Option<String>, ValidationError> {
        self.take_value(name).map(|v| expect_string(name, v)).transpose()
    }

    pub fn take_strings(&mut self, name: &str) -> Result<Vec<String>, ValidationError> {
        self.take_values(name)
            .into_iter()
            .map(|v| expect_string(name, v))
            .collect()
    }

    pub fn take_integer(&mut self, name: &str) -> Result<Option<i64>, ValidationError> {
        match self.take_value(name) {
            None => Ok(None),
            Some(Value::Integer(i)) => Ok(Some(i)),
            Some(other) => Err(mismatch(name, "integer", &other)),
        }
    }

    pub fn take_float(&mut self, name: &str) -> Result<Option<f64>, ValidationError> {
        match self.take_value(name) {
            None => Ok(None),
            Some(Value::Float(f)) => Ok(Some(f)),
            Some(Value::Integer(i)) => Ok(Some(i as f64)),
            Some(other) => Err(mismatch(name, "float", &other)),
        }
    }

    pub fn take_boolean(&mut self, name: &str) -> Result<Option<bool>, ValidationError> {
        match self.take_value(name) {
            None => Ok(None),
            Some(Value::Boolean(b)) => Ok(Some(b)),
            Some(other) => Err(mismatch(name, "boolean", &other)),
        }
    }

    pub fn take_datetime(&mut self, name: &str) -> Result<Option<NaiveDateTime>, ValidationError> {
        match self.take_value(name) {
            None => Ok(None),
            Some(Value::DateTime(dt)) => Ok(Some(dt)),
            Some(other) => Err(mismatch(name, "datetime", &other)),
        }
    }

    pub fn take_record(&mut self, name: &str) -> Result<Option<Record>, ValidationError> {
        match self.take_value(name) {
            None => Ok(None),
            Some(Value::Nested(record)) => Ok(Some(*record)),
            Some(other) => Err(mismatch(name, "nested record", &other)),
        }
    }

    pub fn take_records(&mut self, name: &str) -> Result<Vec<Record>, ValidationError> {
        self.take_values(name)
            .into_iter()
            .map(|value| match value {
                Value::Nested(record) => Ok(*record),
                other => Err(mismatch(name, "nested record", &other)),
            })
            .collect()
    }

    /// Error for a required field that was not present
    pub fn missing(&self, name: &str) -> ValidationError {
        ValidationError::MissingField {
            schema: self.schema.name.to_string(),
            field: name.to_string(),
        }
    }

    /// Take a string field that must be present
    pub fn require_string(&mut self, name: &str) -> Result<String, ValidationError> {
        self.take_string(name)?.ok_or_else(|| self.missing(name))
    }
}

fn expect_string(name: &str, value: Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) | Value::Uri(s) => Ok(s),
        other => Err(mismatch(name, "string", &other)),
    }
}

fn mismatch(name: &str, expected: &str, found: &Value) -> ValidationError {
    ValidationError::invalid(
        name,
        format!("{:?}", found),
        format!("expected {}, found {}", expected, found.type_name()),
    )
}
