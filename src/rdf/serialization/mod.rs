//! RDF serialization formats
//!
//! Supports:
//! - RDF/XML (the HydroShare wire format)
//! - Turtle (TTL)
//! - N-Triples (NT)

mod turtle;
mod xml;

use super::{BlankNode, Graph, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use oxiri::Iri;
use rio_api::formatter::TriplesFormatter;
use rio_api::model as rio;
use rio_api::parser::TriplesParser;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use turtle::{
    NTriplesParserWrapper, NTriplesSerializerWrapper, TurtleParserWrapper,
    TurtleSerializerWrapper,
};
use xml::{RdfXmlParserWrapper, RdfXmlSerializerWrapper};

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RdfFormat {
    /// RDF/XML format (.rdf, .xml)
    #[default]
    RdfXml,
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
}

impl RdfFormat {
    /// Guess a format from a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xml" | "rdf" | "owl" => Some(RdfFormat::RdfXml),
            "ttl" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            _ => None,
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RdfFormat::RdfXml => "rdf-xml",
            RdfFormat::Turtle => "turtle",
            RdfFormat::NTriples => "n-triples",
        })
    }
}

impl FromStr for RdfFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rdf-xml" | "rdfxml" | "xml" => Ok(RdfFormat::RdfXml),
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            "n-triples" | "ntriples" | "nt" => Ok(RdfFormat::NTriples),
            other => Err(ParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Syntax error reported by the underlying parser
    #[error("Parse error: {0}")]
    Parse(String),

    /// Base IRI given for relative resolution is not an IRI
    #[error("Invalid base IRI {iri}: {reason}")]
    InvalidBaseIri { iri: String, reason: String },

    /// Unrecognized format name
    #[error("Unknown RDF format: {0}")]
    UnknownFormat(String),

    /// RDF-star and generalized terms are not part of the metadata model
    #[error("Unsupported term: {0}")]
    UnsupportedTerm(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat) -> ParseResult<Graph> {
        Self::parse_with_base(input, format, None)
    }

    /// Parse RDF data, resolving relative IRIs against `base_iri`
    pub fn parse_with_base(
        input: &str,
        format: RdfFormat,
        base_iri: Option<&str>,
    ) -> ParseResult<Graph> {
        let base = base_iri.map(parse_base_iri).transpose()?;
        let graph = match format {
            RdfFormat::RdfXml => RdfXmlParserWrapper::parse(input, base)?,
            RdfFormat::Turtle => TurtleParserWrapper::parse(input, base)?,
            RdfFormat::NTriples => NTriplesParserWrapper::parse(input)?,
        };
        debug!("Parsed {} triples from {} input", graph.len(), format);
        Ok(graph)
    }

    /// Parse RDF data from a file, picking the format from its extension
    /// unless one is given
    pub fn parse_file(path: &std::path::Path, format: Option<RdfFormat>) -> ParseResult<Graph> {
        let format = match format {
            Some(format) => format,
            None => path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(RdfFormat::from_extension)
                .unwrap_or_default(),
        };
        let input = std::fs::read_to_string(path)?;
        Self::parse(&input, format)
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize a graph to a string
    pub fn serialize(graph: &Graph, format: RdfFormat) -> SerializeResult<String> {
        let output = match format {
            RdfFormat::RdfXml => RdfXmlSerializerWrapper::serialize(graph)?,
            RdfFormat::Turtle => TurtleSerializerWrapper::serialize(graph)?,
            RdfFormat::NTriples => NTriplesSerializerWrapper::serialize(graph)?,
        };
        debug!("Serialized {} triples as {}", graph.len(), format);
        Ok(output)
    }
}

fn parse_base_iri(iri: &str) -> ParseResult<Iri<String>> {
    Iri::parse(iri.to_string()).map_err(|e| ParseError::InvalidBaseIri {
        iri: iri.to_string(),
        reason: e.to_string(),
    })
}

/// Drain a rio parser into a graph
fn collect_triples<P>(parser: &mut P) -> ParseResult<Graph>
where
    P: TriplesParser,
    ParseError: From<P::Error>,
{
    let mut graph = Graph::new();
    parser.parse_all(&mut |t| -> ParseResult<()> {
        graph.insert(convert_triple(t)?);
        Ok(())
    })?;
    Ok(graph)
}

/// Feed every triple of the graph to a rio formatter
fn format_graph<F>(formatter: &mut F, graph: &Graph) -> SerializeResult<()>
where
    F: TriplesFormatter,
{
    for triple in graph.iter() {
        format_triple(formatter, triple)
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
    }
    Ok(())
}

fn format_triple<F: TriplesFormatter>(formatter: &mut F, triple: &Triple) -> Result<(), F::Error> {
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => rio::Subject::NamedNode(rio::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => rio::Subject::BlankNode(rio::BlankNode { id: b.as_str() }),
    };

    let datatype;
    let object = match &triple.object {
        RdfObject::NamedNode(n) => rio::Term::NamedNode(rio::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => rio::Term::BlankNode(rio::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => {
            if let Some(language) = l.language() {
                rio::Term::Literal(rio::Literal::LanguageTaggedString {
                    value: l.value(),
                    language,
                })
            } else if l.is_plain() {
                rio::Term::Literal(rio::Literal::Simple { value: l.value() })
            } else {
                datatype = l.datatype();
                rio::Term::Literal(rio::Literal::Typed {
                    value: l.value(),
                    datatype: rio::NamedNode {
                        iri: datatype.as_str(),
                    },
                })
            }
        }
    };

    formatter.format(&rio::Triple {
        subject,
        predicate: rio::NamedNode {
            iri: triple.predicate.as_str(),
        },
        object,
    })
}

fn convert_triple(t: rio::Triple<'_>) -> ParseResult<Triple> {
    Ok(Triple::new(
        convert_subject(t.subject)?,
        convert_predicate(t.predicate)?,
        convert_object(t.object)?,
    ))
}

fn convert_subject(s: rio::Subject<'_>) -> ParseResult<RdfSubject> {
    match s {
        rio::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(
            BlankNode::with_id(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        #[allow(unreachable_patterns)]
        other => Err(ParseError::UnsupportedTerm(other.to_string())),
    }
}

fn convert_predicate(p: rio::NamedNode<'_>) -> ParseResult<RdfPredicate> {
    RdfPredicate::new(p.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_object(o: rio::Term<'_>) -> ParseResult<RdfObject> {
    match o {
        rio::Term::NamedNode(n) => Ok(RdfObject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio::Term::BlankNode(b) => Ok(RdfObject::BlankNode(
            BlankNode::with_id(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio::Term::Literal(l) => match l {
            rio::Literal::Simple { value } => {
                Ok(RdfObject::Literal(Literal::new_simple_literal(value)))
            }
            rio::Literal::LanguageTaggedString { value, language } => Ok(RdfObject::Literal(
                Literal::new_language_tagged_literal(value, language)
                    .map_err(|e| ParseError::Parse(e.to_string()))?,
            )),
            rio::Literal::Typed { value, datatype } => {
                let dt =
                    NamedNode::new(datatype.iri).map_err(|e| ParseError::Parse(e.to_string()))?;
                Ok(RdfObject::Literal(Literal::new_typed_literal(value, dt)))
            }
        },
        #[allow(unreachable_patterns)]
        other => Err(ParseError::UnsupportedTerm(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::namespace::XSD_INTEGER;

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        let subject = RdfSubject::named("http://example.org/a").unwrap();
        graph.add(
            subject.clone(),
            RdfPredicate::new("http://example.org/name").unwrap(),
            Literal::new_simple_literal("Alice").into(),
        );
        graph.add(
            subject.clone(),
            RdfPredicate::new("http://example.org/count").unwrap(),
            Literal::new_typed_literal("3", NamedNode::new(XSD_INTEGER).unwrap()).into(),
        );
        graph.add(
            subject,
            RdfPredicate::new("http://example.org/child").unwrap(),
            BlankNode::with_id("c1").unwrap().into(),
        );
        graph
    }

    #[test]
    fn test_format_names() {
        assert_eq!("turtle".parse::<RdfFormat>().unwrap(), RdfFormat::Turtle);
        assert_eq!("XML".parse::<RdfFormat>().unwrap(), RdfFormat::RdfXml);
        assert!(matches!(
            "json".parse::<RdfFormat>(),
            Err(ParseError::UnknownFormat(name)) if name == "json"
        ));
        assert_eq!(RdfFormat::from_extension("TTL"), Some(RdfFormat::Turtle));
        assert_eq!(RdfFormat::from_extension("csv"), None);
    }

    #[test]
    fn test_every_format_preserves_literals_and_datatypes() {
        let graph = sample_graph();
        for format in [RdfFormat::RdfXml, RdfFormat::Turtle, RdfFormat::NTriples] {
            let text = RdfSerializer::serialize(&graph, format).unwrap();
            let parsed = RdfParser::parse(&text, format).unwrap();
            assert_eq!(parsed.len(), graph.len(), "format {}", format);

            let count = parsed
                .iter()
                .find(|t| t.predicate.as_str() == "http://example.org/count")
                .unwrap();
            match &count.object {
                RdfObject::Literal(l) => assert_eq!(l.datatype().as_str(), XSD_INTEGER),
                other => panic!("unexpected object {}", other),
            }
        }
    }

    #[test]
    fn test_invalid_base_iri() {
        let err = RdfParser::parse_with_base("", RdfFormat::Turtle, Some("not a base")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidBaseIri { .. }));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = RdfParser::parse("<http://example.org/a> <", RdfFormat::Turtle).unwrap_err();
        assert!(matches!(err, ParseError::Parse(_)));
    }
}
