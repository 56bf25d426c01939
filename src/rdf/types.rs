//! RDF terms
//!
//! Wrappers around the oxrdf primitives. Subjects and objects are separate
//! enums so the mapping engine can tell a nested node from a literal value
//! without looking at strings.

use oxrdf::{BlankNode as OxBlankNode, Literal as OxLiteral, NamedNode as OxNamedNode};
use std::fmt;
use thiserror::Error;

use super::namespace::XSD_STRING;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RdfError {
    #[error("invalid IRI '{iri}': {reason}")]
    InvalidIri { iri: String, reason: String },

    #[error("invalid blank node id '{id}': {reason}")]
    InvalidBlankNode { id: String, reason: String },

    #[error("invalid language tag '{0}'")]
    InvalidLanguageTag(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// IRI term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    pub fn new(iri: &str) -> RdfResult<Self> {
        OxNamedNode::new(iri).map(Self).map_err(|e| RdfError::InvalidIri {
            iri: iri.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Anonymous node; nested records are written under fresh ones
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    /// Fresh node with a random id
    pub fn new() -> Self {
        Self::default()
    }

    /// Node with the id a parsed document gave it
    pub fn with_id(id: &str) -> RdfResult<Self> {
        OxBlankNode::new(id).map(Self).map_err(|e| RdfError::InvalidBlankNode {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(OxLiteral);

impl Literal {
    /// `xsd:string` literal, the form every text field is written in
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_simple_literal(value))
    }

    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> RdfResult<Self> {
        let language = language.into();
        OxLiteral::new_language_tagged_literal(value, language.as_str())
            .map(Self)
            .map_err(|_| RdfError::InvalidLanguageTag(language))
    }

    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self(OxLiteral::new_typed_literal(value, datatype.0))
    }

    pub fn value(&self) -> &str {
        self.0.value()
    }

    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    pub fn datatype(&self) -> NamedNode {
        NamedNode(self.0.datatype().into_owned())
    }

    /// No language tag and no datatype other than `xsd:string`
    pub fn is_plain(&self) -> bool {
        self.language().is_none() && self.0.datatype().as_str() == XSD_STRING
    }
}

/// Node a triple is about
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfSubject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl RdfSubject {
    pub fn blank() -> Self {
        RdfSubject::BlankNode(BlankNode::new())
    }

    pub fn named(iri: &str) -> RdfResult<Self> {
        NamedNode::new(iri).map(RdfSubject::NamedNode)
    }

    /// IRI of a named subject; blank subjects have none
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            RdfSubject::NamedNode(node) => Some(node.as_str()),
            RdfSubject::BlankNode(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdfPredicate(NamedNode);

impl RdfPredicate {
    pub fn new(iri: &str) -> RdfResult<Self> {
        NamedNode::new(iri).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Value of a triple: a node to descend into, or a literal to decode
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfObject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl RdfObject {
    pub fn is_named_node(&self) -> bool {
        matches!(self, RdfObject::NamedNode(_))
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfObject::BlankNode(_))
    }

    /// The IRI, the blank node id or the literal value
    pub fn lexical(&self) -> &str {
        match self {
            RdfObject::NamedNode(node) => node.as_str(),
            RdfObject::BlankNode(node) => node.as_str(),
            RdfObject::Literal(literal) => literal.value(),
        }
    }

    /// The node this object points at, if it is not a literal
    pub fn as_subject(&self) -> Option<RdfSubject> {
        match self {
            RdfObject::NamedNode(node) => Some(node.clone().into()),
            RdfObject::BlankNode(node) => Some(node.clone().into()),
            RdfObject::Literal(_) => None,
        }
    }
}

macro_rules! term_from {
    ($($source:ident => $target:ident :: $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for $target {
                fn from(term: $source) -> Self {
                    $target::$variant(term)
                }
            }
        )*
    };
}

term_from! {
    NamedNode => RdfSubject::NamedNode,
    BlankNode => RdfSubject::BlankNode,
    NamedNode => RdfObject::NamedNode,
    BlankNode => RdfObject::BlankNode,
    Literal => RdfObject::Literal,
}

impl From<NamedNode> for RdfPredicate {
    fn from(node: NamedNode) -> Self {
        RdfPredicate(node)
    }
}

impl From<RdfSubject> for RdfObject {
    fn from(subject: RdfSubject) -> Self {
        match subject {
            RdfSubject::NamedNode(node) => node.into(),
            RdfSubject::BlankNode(node) => node.into(),
        }
    }
}

// N-Triples term syntax
impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.language() {
            Some(language) => write!(f, "\"{}\"@{}", self.value(), language),
            None if self.is_plain() => write!(f, "\"{}\"", self.value()),
            None => write!(f, "\"{}\"^^{}", self.value(), self.datatype()),
        }
    }
}

impl fmt::Display for RdfSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfSubject::NamedNode(node) => write!(f, "{}", node),
            RdfSubject::BlankNode(node) => write!(f, "{}", node),
        }
    }
}

impl fmt::Display for RdfPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RdfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfObject::NamedNode(node) => write!(f, "{}", node),
            RdfObject::BlankNode(node) => write!(f, "{}", node),
            RdfObject::Literal(literal) => write!(f, "{}", literal),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: RdfSubject,
    pub predicate: RdfPredicate,
    pub object: RdfObject,
}

impl Triple {
    pub fn new(subject: RdfSubject, predicate: RdfPredicate, object: RdfObject) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}
