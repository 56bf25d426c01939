//! Turtle and N-Triples format implementation

use super::{collect_triples, format_graph, ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::Graph;
use oxiri::Iri;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleError, TurtleFormatter, TurtleParser};
use std::io::Cursor;

impl From<TurtleError> for ParseError {
    fn from(e: TurtleError) -> Self {
        ParseError::Parse(e.to_string())
    }
}

/// Turtle parser
pub struct TurtleParserWrapper;

impl TurtleParserWrapper {
    /// Parse a Turtle string into a graph
    pub fn parse(input: &str, base_iri: Option<Iri<String>>) -> ParseResult<Graph> {
        let mut parser = TurtleParser::new(Cursor::new(input), base_iri);
        collect_triples(&mut parser)
    }
}

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Serialize a graph to a Turtle string
    pub fn serialize(graph: &Graph) -> SerializeResult<String> {
        let mut output = Vec::new();
        let mut formatter = TurtleFormatter::new(&mut output);
        format_graph(&mut formatter, graph)?;
        formatter.finish()?;

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

/// N-Triples parser
pub struct NTriplesParserWrapper;

impl NTriplesParserWrapper {
    /// Parse an N-Triples string into a graph
    pub fn parse(input: &str) -> ParseResult<Graph> {
        let mut parser = NTriplesParser::new(Cursor::new(input));
        collect_triples(&mut parser)
    }
}

/// N-Triples serializer
pub struct NTriplesSerializerWrapper;

impl NTriplesSerializerWrapper {
    /// Serialize a graph to an N-Triples string
    pub fn serialize(graph: &Graph) -> SerializeResult<String> {
        let mut output = Vec::new();
        let mut formatter = NTriplesFormatter::new(&mut output);
        format_graph(&mut formatter, graph)?;
        formatter.finish()?;

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turtle_roundtrip() {
        let input = r#"<http://example.org/a> <http://example.org/b> "c" ."#;
        let graph = TurtleParserWrapper::parse(input, None).unwrap();
        assert_eq!(graph.len(), 1);
        let output = TurtleSerializerWrapper::serialize(&graph).unwrap();
        assert!(output.contains("http://example.org/a"));
    }

    #[test]
    fn test_turtle_relative_iris_use_base() {
        let input = r#"<a> <http://example.org/b> <c> ."#;
        let base = Iri::parse("http://example.org/".to_string()).unwrap();
        let graph = TurtleParserWrapper::parse(input, Some(base)).unwrap();
        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.subject.as_iri(), Some("http://example.org/a"));
    }

    #[test]
    fn test_ntriples_one_line_per_triple() {
        let input = "<http://example.org/a> <http://example.org/b> \"c\" .\n\
                     <http://example.org/a> <http://example.org/b> \"d\" .\n";
        let graph = NTriplesParserWrapper::parse(input).unwrap();
        assert_eq!(graph.len(), 2);
        let output = NTriplesSerializerWrapper::serialize(&graph).unwrap();
        assert_eq!(output.lines().count(), 2);
    }
}
