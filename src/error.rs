//! Crate-level error types
//!
//! Each layer keeps its own error enum; [`Error`] unifies them for the public
//! entry points that cross layers (parse a document, build a model from it).

use thiserror::Error;

use crate::mapping::{ConfigError, MappingError};
use crate::rdf::{ParseError, SerializeError};

/// Validation failures raised while constructing or mutating a model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field absent from the wire record or packed value
    #[error("{schema}: missing required field `{field}`")]
    MissingField { schema: String, field: String },

    /// Field present but its value does not fit the declared type
    #[error("invalid value for `{field}`: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Language is not a known ISO 639-2 three letter code
    #[error("language: '{0}' is not a valid ISO 639-2 language code")]
    InvalidLanguage(String),

    /// A required date type is absent
    #[error("dates: a `{0}` date is required")]
    MissingDate(String),

    /// A date type occurs more than once
    #[error("dates: only one `{0}` date is allowed")]
    DuplicateDate(String),

    /// Modified date precedes created date
    #[error("dates: modified date {modified} is before created date {created}")]
    ModifiedBeforeCreated { created: String, modified: String },

    /// More than one coverage of the same type
    #[error("coverages: only one `{0}` coverage is allowed")]
    DuplicateCoverage(String),

    /// Point and box spatial coverage on the same owner
    #[error("coverages: point and box spatial coverage are mutually exclusive")]
    ConflictingSpatialCoverage,

    /// Box with north limit below south limit
    #[error("northlimit {north} must be greater than or equal to southlimit {south}")]
    InvalidBoxBounds { north: f64, south: f64 },

    /// Period ending before it starts
    #[error("period: start {start} must not be after end {end}")]
    InvalidPeriod { start: String, end: String },

    /// Resource without creators
    #[error("creators: at least one creator is required")]
    EmptyCreators,

    /// Resource identifier differs from the document subject
    #[error("identifier {identifier} does not match subject {subject}")]
    IdentifierMismatch { identifier: String, subject: String },

    /// Packed value segment without a `key=value` shape
    #[error("malformed packed value segment '{0}'")]
    MalformedPackedValue(String),

    /// Discriminator value that selects no known shape
    #[error("{field}: unknown type '{value}'")]
    UnknownDiscriminator { field: String, value: String },

    /// Relation node must carry exactly one relation predicate
    #[error("relation: expected exactly one relation predicate, found {0}")]
    InvalidRelation(usize),
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, value: impl ToString, reason: impl ToString) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Any failure surfaced by the public API
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
