//! Packed `key=value; key=value` codec
//!
//! Coverage and spatial reference shapes travel as one literal under
//! `rdf:value`. Absent values and empty strings are left out when packing;
//! numeric zero is kept so that a point on the equator survives a round trip.

use chrono::NaiveDateTime;
use indexmap::IndexMap;

use super::codec::{format_datetime, parse_datetime};
use crate::error::ValidationError;

pub const PAIR_SEPARATOR: &str = "; ";
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Join present, non-empty values into a packed string.
///
/// Only absent and empty strings are dropped. A numeric zero such as
/// `east=0` is kept, unlike the falsy values the graph serializer omits,
/// and a point on the equator or prime meridian round-trips only because of it.
pub fn pack<I, K>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, Option<String>)>,
    K: AsRef<str>,
{
    pairs
        .into_iter()
        .filter_map(|(key, value)| match value {
            Some(value) if !value.is_empty() => Some(format!(
                "{}{}{}",
                key.as_ref(),
                KEY_VALUE_SEPARATOR,
                value
            )),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(PAIR_SEPARATOR)
}

/// Split a packed string into its key/value map.
///
/// Values may themselves contain `=`; only the first one separates.
pub fn unpack(text: &str) -> Result<PackedFields, ValidationError> {
    let mut fields = IndexMap::new();
    for segment in text.split(PAIR_SEPARATOR) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (key, value) = segment
            .split_once(KEY_VALUE_SEPARATOR)
            .ok_or_else(|| ValidationError::MalformedPackedValue(segment.to_string()))?;
        fields.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(PackedFields(fields))
}

/// Key/value pairs of an unpacked value with typed accessors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackedFields(IndexMap<String, String>);

impl PackedFields {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn string(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    pub fn required_string(&mut self, key: &str) -> Result<String, ValidationError> {
        self.string(key).ok_or_else(|| missing(key))
    }

    pub fn float(&mut self, key: &str) -> Result<Option<f64>, ValidationError> {
        self.string(key)
            .map(|value| {
                value
                    .parse::<f64>()
                    .map_err(|e| ValidationError::invalid(key, &value, e))
            })
            .transpose()
    }

    pub fn required_float(&mut self, key: &str) -> Result<f64, ValidationError> {
        self.float(key)?.ok_or_else(|| missing(key))
    }

    pub fn required_datetime(&mut self, key: &str) -> Result<NaiveDateTime, ValidationError> {
        let value = self.required_string(key)?;
        parse_datetime(&value)
            .ok_or_else(|| ValidationError::invalid(key, &value, "not an ISO 8601 timestamp"))
    }
}

fn missing(key: &str) -> ValidationError {
    ValidationError::MissingField {
        schema: "packed value".to_string(),
        field: key.to_string(),
    }
}

/// A shape carried as a packed string
pub trait PackedRecord: Sized {
    /// Ordered key/value pairs; `None` marks an absent optional value
    fn to_pairs(&self) -> Vec<(&'static str, Option<String>)>;

    /// Build and validate the shape from unpacked fields
    fn from_fields(fields: &mut PackedFields) -> Result<Self, ValidationError>;

    fn pack(&self) -> String {
        pack(self.to_pairs())
    }

    fn unpack(text: &str) -> Result<Self, ValidationError> {
        let mut fields = unpack(text)?;
        Self::from_fields(&mut fields)
    }
}

/// Packed text for an optional float
pub(crate) fn float_text(value: Option<f64>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// Packed text for a timestamp
pub(crate) fn datetime_text(value: &NaiveDateTime) -> Option<String> {
    Some(format_datetime(value))
}
