//! Value codec
//!
//! Converts between field values and RDF objects. Decoding is directed by the
//! field's declared [`ValueKind`], never by the shape of the object alone.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::{Value, ValueKind};
use crate::mapping::{MappingError, MappingResult};
use crate::rdf::namespace::{XSD_DOUBLE, XSD_INTEGER};
use crate::rdf::{Literal, NamedNode, RdfObject};

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// ISO 8601 text for a timestamp, fractional seconds only when present
pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Parse the timestamp forms found in HydroShare documents.
///
/// An offset is folded into the returned naive UTC time and then discarded,
/// so `2020-07-09T12:00:00-06:00` reads as `2020-07-09T18:00:00` and is
/// written back without an offset. A bare date means midnight.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in [DATETIME_FORMAT, "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Encode a value as an RDF object. A nested record encodes as its subject.
pub fn encode(value: &Value) -> MappingResult<RdfObject> {
    let object = match value {
        Value::Uri(iri) => NamedNode::new(iri)?.into(),
        Value::String(s) => Literal::new_simple_literal(s.as_str()).into(),
        Value::Integer(i) => {
            Literal::new_typed_literal(i.to_string(), NamedNode::new(XSD_INTEGER)?).into()
        }
        Value::Float(f) => {
            Literal::new_typed_literal(f.to_string(), NamedNode::new(XSD_DOUBLE)?).into()
        }
        Value::Boolean(b) => Literal::new_simple_literal(b.to_string()).into(),
        Value::DateTime(dt) => Literal::new_simple_literal(format_datetime(dt)).into(),
        Value::Nested(record) => record.subject().clone().into(),
    };
    Ok(object)
}

/// Decode an RDF object into a value of the declared kind
pub fn decode(field: &'static str, kind: ValueKind, object: &RdfObject) -> MappingResult<Value> {
    let text = object.lexical();
    let invalid = |reason: &str| MappingError::InvalidLiteral {
        field,
        value: text.to_string(),
        reason: reason.to_string(),
    };

    match kind {
        ValueKind::String => Ok(Value::String(text.to_string())),
        ValueKind::Uri => match object {
            RdfObject::BlankNode(_) => Err(invalid("expected an IRI, found a blank node")),
            _ => Ok(Value::Uri(text.to_string())),
        },
        ValueKind::Integer => parse_integer(text)
            .map(Value::Integer)
            .ok_or_else(|| invalid("not an integer")),
        ValueKind::Float => text
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| invalid(&e.to_string())),
        ValueKind::Boolean => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Value::Boolean(true)),
            "false" | "0" => Ok(Value::Boolean(false)),
            _ => Err(invalid("not a boolean")),
        },
        ValueKind::DateTime => parse_datetime(text)
            .map(Value::DateTime)
            .ok_or_else(|| invalid("not an ISO 8601 timestamp")),
    }
}

// Accepts integral floats such as "3.0", which some producers emit for counts.
fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|f| f.fract() == 0.0 && f.is_finite())
            .map(|f| f as i64)
    })
}
