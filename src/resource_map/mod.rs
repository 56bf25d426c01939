//! ORE resource map walker
//!
//! A resource map lists the files and aggregations of a resource. The root
//! `ore:Aggregation` is the resource itself; every aggregated node that is
//! typed with a known aggregation type is reported with its own files and
//! the main file picked by the type's extension.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, ValidationError};
use crate::mapping::{GraphDeserializer, MappingError};
use crate::models::AggregationType;
use crate::rdf::namespace::{dc, ore, RDF_TYPE};
use crate::rdf::{Graph, NamedNode, RdfFormat, RdfObject, RdfParser, RdfPredicate, RdfSubject};
use crate::schema::{FieldDescriptor as Field, Record, SchemaDescriptor, ValueKind};

/// Wire schema shared by the root and by every aggregation node
pub static RESOURCE_MAP: SchemaDescriptor = SchemaDescriptor {
    name: "ResourceMap",
    rdf_type: Some(ore!("Aggregation")),
    dc_type: None,
    label: None,
    fields: &[
        Field::scalar("title", dc!("title"), ValueKind::String),
        Field::list("aggregates", ore!("aggregates"), ValueKind::Uri),
        Field::scalar("is_described_by", ore!("isDescribedBy"), ValueKind::Uri),
    ],
};

/// An aggregation listed in a resource map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationEntry {
    pub url: String,
    pub aggregation_type: AggregationType,
    pub title: Option<String>,
    pub files: Vec<String>,
    pub main_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceMap {
    pub url: String,
    pub title: Option<String>,
    pub described_by: Option<String>,
    /// Files aggregated directly by the resource
    pub files: Vec<String>,
    pub aggregations: Vec<AggregationEntry>,
}

struct Node {
    title: Option<String>,
    aggregates: Vec<String>,
    described_by: Option<String>,
}

impl Node {
    fn parse(graph: &Graph, subject: &RdfSubject) -> Result<Self> {
        let record = GraphDeserializer::new().parse(graph, &RESOURCE_MAP, Some(subject))?;
        let Some(mut record) = record else {
            return Ok(Self {
                title: None,
                aggregates: Vec::new(),
                described_by: None,
            });
        };
        Ok(Self::from_record(&mut record)?)
    }

    fn from_record(record: &mut Record) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            title: record.take_string("title")?,
            aggregates: record.take_strings("aggregates")?,
            described_by: record.take_string("is_described_by")?,
        })
    }
}

impl ResourceMap {
    pub fn parse_str(input: &str, format: RdfFormat) -> Result<Self> {
        let graph = RdfParser::parse(input, format)?;
        Self::parse(&graph)
    }

    pub fn parse(graph: &Graph) -> Result<Self> {
        let root = Self::root(graph)?;
        let node = Node::parse(graph, &root)?;

        let mut files = Vec::new();
        let mut aggregations = Vec::new();
        for member in node.aggregates {
            match aggregation_type_of(graph, &member)? {
                Some(aggregation_type) => {
                    let subject = RdfSubject::named(&member).map_err(MappingError::from)?;
                    let child = Node::parse(graph, &subject)?;
                    let main_file = main_file(aggregation_type, &child.aggregates);
                    debug!(aggregation = %member, kind = %aggregation_type, "found aggregation");
                    aggregations.push(AggregationEntry {
                        url: member,
                        aggregation_type,
                        title: child.title,
                        files: child.aggregates,
                        main_file,
                    });
                }
                None => files.push(member),
            }
        }

        Ok(Self {
            url: root
                .as_iri()
                .map(str::to_string)
                .unwrap_or_else(|| root.to_string()),
            title: node.title,
            described_by: node.described_by,
            files,
            aggregations,
        })
    }

    /// Every file of the resource, including those held by aggregations
    pub fn all_files(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .chain(self.aggregations.iter().flat_map(|a| a.files.iter()))
            .map(String::as_str)
    }

    /// The `ore:Aggregation` no other node aggregates
    fn root(graph: &Graph) -> Result<RdfSubject> {
        let aggregation_type = NamedNode::new(ore!("Aggregation")).map_err(MappingError::from)?;
        let aggregates = RdfPredicate::new(ore!("aggregates")).map_err(MappingError::from)?;

        let mut roots: Vec<&RdfSubject> = graph
            .subjects_of_type(&aggregation_type)
            .into_iter()
            .filter(|subject| {
                let object = RdfObject::from((*subject).clone());
                graph.subjects(&aggregates, &object).is_empty()
            })
            .collect();
        roots.sort_by_key(|subject| subject.to_string());

        let Some(root) = roots.first() else {
            return Err(MappingError::SubjectNotFound {
                schema: RESOURCE_MAP.name,
                rdf_type: ore!("Aggregation").to_string(),
            }
            .into());
        };
        if roots.len() > 1 {
            warn!(
                roots = roots.len(),
                root = %root,
                "several root aggregations, using the smallest"
            );
        }
        Ok((*root).clone())
    }
}

fn aggregation_type_of(graph: &Graph, member: &str) -> Result<Option<AggregationType>> {
    let Ok(subject) = RdfSubject::named(member) else {
        return Ok(None);
    };
    let rdf_type = RdfPredicate::new(RDF_TYPE).map_err(MappingError::from)?;
    Ok(graph
        .objects(&subject, &rdf_type)
        .into_iter()
        .find_map(|object| AggregationType::parse(object.lexical())))
}

fn main_file(aggregation_type: AggregationType, files: &[String]) -> Option<String> {
    let extension = aggregation_type.main_file_extension()?;
    files.iter().find(|file| file.ends_with(extension)).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOURCE_MAP_TTL: &str = r#"
@prefix ore: <http://www.openarchives.org/ore/terms/> .
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix hsterms: <http://hydroshare.org/terms/> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .

<http://www.hydroshare.org/resource/abc> a ore:Aggregation ;
    dc:title "Logan River" ;
    ore:isDescribedBy <http://www.hydroshare.org/resource/abc/data/resourcemap.xml> ;
    ore:aggregates <http://www.hydroshare.org/resource/abc/data/contents/readme.txt> ,
        <http://www.hydroshare.org/resource/abc/data/contents/logan_resmap.xml#aggregation> .

<http://www.hydroshare.org/resource/abc/data/contents/logan_resmap.xml#aggregation>
    a ore:Aggregation, hsterms:GeographicRasterAggregation ;
    dc:title "logan" ;
    ore:aggregates <http://www.hydroshare.org/resource/abc/data/contents/logan.tif> ,
        <http://www.hydroshare.org/resource/abc/data/contents/logan.vrt> .
"#;

    #[test]
    fn test_walks_root_and_aggregations() {
        let map = ResourceMap::parse_str(RESOURCE_MAP_TTL, RdfFormat::Turtle).unwrap();
        assert_eq!(map.url, "http://www.hydroshare.org/resource/abc");
        assert_eq!(map.title.as_deref(), Some("Logan River"));
        assert_eq!(
            map.files,
            vec!["http://www.hydroshare.org/resource/abc/data/contents/readme.txt".to_string()]
        );
        assert_eq!(map.aggregations.len(), 1);

        let raster = &map.aggregations[0];
        assert_eq!(raster.aggregation_type, AggregationType::GeographicRaster);
        assert_eq!(raster.title.as_deref(), Some("logan"));
        assert_eq!(
            raster.main_file.as_deref(),
            Some("http://www.hydroshare.org/resource/abc/data/contents/logan.vrt")
        );
        assert_eq!(map.all_files().count(), 3);
    }

    #[test]
    fn test_missing_root() {
        let graph = Graph::new();
        assert!(ResourceMap::parse(&graph).is_err());
    }
}
