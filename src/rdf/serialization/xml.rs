//! RDF/XML format implementation

use super::{collect_triples, format_graph, ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::Graph;
use oxiri::Iri;
use rio_xml::{RdfXmlError, RdfXmlFormatter, RdfXmlParser};
use std::io::Cursor;

impl From<RdfXmlError> for ParseError {
    fn from(e: RdfXmlError) -> Self {
        ParseError::Parse(e.to_string())
    }
}

/// RDF/XML parser
pub struct RdfXmlParserWrapper;

impl RdfXmlParserWrapper {
    /// Parse an RDF/XML document into a graph
    pub fn parse(input: &str, base_iri: Option<Iri<String>>) -> ParseResult<Graph> {
        let mut parser = RdfXmlParser::new(Cursor::new(input), base_iri);
        collect_triples(&mut parser)
    }
}

/// RDF/XML serializer
pub struct RdfXmlSerializerWrapper;

impl RdfXmlSerializerWrapper {
    /// Serialize a graph to an RDF/XML document
    pub fn serialize(graph: &Graph) -> SerializeResult<String> {
        let mut output = Vec::new();
        let mut formatter = RdfXmlFormatter::with_indentation(&mut output, 2)?;
        format_graph(&mut formatter, graph)?;
        formatter.finish()?;

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}
