//! HydroShare metadata models
//!
//! User-facing, validated types for a resource and its aggregations. Each
//! model converts to and from a wire [`Record`]; the provided methods of
//! [`MetadataDocument`] route that record through the mapping engine and the
//! RDF syntaxes.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hydroshare_models::models::{Creator, MetadataDocument, ResourceMetadata};
//! use hydroshare_models::rdf::RdfFormat;
//!
//! let created = NaiveDate::from_ymd_opt(2020, 7, 9).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let mut resource = ResourceMetadata::new(
//!     "http://www.hydroshare.org/resource/abc",
//!     "Logan River snow depth",
//!     vec![Creator::new("Doe, Jane")],
//!     created,
//!     created,
//! )
//! .unwrap();
//! resource.set_language("spa").unwrap();
//!
//! let xml = resource.to_rdf_string(RdfFormat::RdfXml).unwrap();
//! let parsed = ResourceMetadata::parse_str(&xml, RdfFormat::RdfXml).unwrap().unwrap();
//! assert_eq!(parsed, resource);
//! ```

mod aggregation;
mod content;
mod coverage;
mod enums;
mod fields;
mod language;
mod node;
mod party;
mod resource;
pub mod schemas;
mod timeseries;
pub mod validation;

use crate::error::{Result, ValidationError};
use crate::mapping::{GraphDeserializer, GraphSerializer, MappingConfig};
use crate::rdf::{Graph, RdfFormat, RdfParser, RdfSerializer, RdfSubject};
use crate::schema::{Record, SchemaDescriptor};

use node::{slot, NodeTable};

pub use aggregation::{
    AggregationBase, AggregationMetadata, FileSetMetadata, GeographicFeatureMetadata,
    GeographicRasterMetadata, MultidimensionalMetadata, ReferencedTimeSeriesMetadata,
    SingleFileMetadata, TimeSeriesMetadata,
};
pub use content::{
    BandInformation, CellInformation, FieldInformation, GeometryInformation,
    MultidimensionalVariable,
};
pub use coverage::{
    BoxCoverage, BoxSpatialReference, Coverage, PeriodCoverage, PointCoverage,
    PointSpatialReference, SpatialCoverage, SpatialReference,
};
pub use enums::{
    AggregationType, CoverageType, DateType, RelationType, SpatialReferenceType,
    UserIdentifierType, VariableType,
};
pub use fields::{AwardInfo, Publisher, Relation, Rights};
pub use language::{is_valid_language, validate_language, LANGUAGE_CODES};
pub use node::NodeId;
pub use party::{Contributor, Creator, Party};
pub use resource::{DateSet, ResourceMetadata};
pub use timeseries::{
    Method, ProcessingLevel, Site, TimeSeriesResult, TimeSeriesVariable, Unit,
};

/// A model with a wire schema
pub trait RecordModel: Sized {
    fn descriptor() -> &'static SchemaDescriptor;

    fn to_record(&self) -> std::result::Result<Record, ValidationError>;

    /// Build the model, running its validation pipeline
    fn from_record(record: Record) -> std::result::Result<Self, ValidationError>;
}

/// A top-level metadata document: a resource or an aggregation
pub trait MetadataDocument: RecordModel {
    /// Parse the instance typed with this document's `rdf:type`.
    ///
    /// `Ok(None)` means the graph holds no data for it.
    fn from_graph(graph: &Graph) -> Result<Option<Self>> {
        Self::from_graph_at(graph, None)
    }

    /// Parse the instance at an explicit subject, or at the typed one
    fn from_graph_at(graph: &Graph, subject: Option<&RdfSubject>) -> Result<Option<Self>> {
        match GraphDeserializer::new().parse(graph, Self::descriptor(), subject)? {
            Some(record) => Ok(Some(Self::from_record(record)?)),
            None => Ok(None),
        }
    }

    fn to_graph(&self) -> Result<Graph> {
        self.to_graph_with(&MappingConfig::default())
    }

    fn to_graph_with(&self, config: &MappingConfig) -> Result<Graph> {
        let record = self.to_record()?;
        Ok(GraphSerializer::with_config(config.clone()).to_graph(&record)?)
    }

    fn parse_str(input: &str, format: RdfFormat) -> Result<Option<Self>> {
        let graph = RdfParser::parse(input, format)?;
        Self::from_graph(&graph)
    }

    fn to_rdf_string(&self, format: RdfFormat) -> Result<String> {
        let graph = self.to_graph()?;
        Ok(RdfSerializer::serialize(&graph, format)?)
    }
}

pub(crate) fn put<T: RecordModel>(
    record: &mut Record,
    field: &str,
    model: Option<&T>,
) -> std::result::Result<(), ValidationError> {
    if let Some(model) = model {
        record.set(field, model.to_record()?);
    }
    Ok(())
}

pub(crate) fn push_all<'a, T: RecordModel + 'a>(
    record: &mut Record,
    field: &str,
    models: impl IntoIterator<Item = &'a T>,
) -> std::result::Result<(), ValidationError> {
    for model in models {
        record.push(field, model.to_record()?);
    }
    Ok(())
}

pub(crate) fn take_model<T: RecordModel>(
    record: &mut Record,
    field: &str,
) -> std::result::Result<Option<T>, ValidationError> {
    record.take_record(field)?.map(T::from_record).transpose()
}

pub(crate) fn take_models<T: RecordModel>(
    record: &mut Record,
    field: &str,
) -> std::result::Result<Vec<T>, ValidationError> {
    record
        .take_records(field)?
        .into_iter()
        .map(T::from_record)
        .collect()
}

/// Set a record the document synthesizes, at the subject kept for `field`
pub(crate) fn put_kept(record: &mut Record, nodes: &NodeTable, field: &str, child: Record) {
    let child = nodes.bind(record.subject(), field, child);
    record.set(field, child);
}

pub(crate) fn take_kept(
    record: &mut Record,
    nodes: &mut NodeTable,
    field: &str,
) -> std::result::Result<Option<Record>, ValidationError> {
    let child = record.take_record(field)?;
    if let Some(child) = &child {
        nodes.remember(field.to_string(), child);
    }
    Ok(child)
}

/// Push synthesized records, each at the subject kept for its `key` value
pub(crate) fn push_keyed(
    record: &mut Record,
    nodes: &NodeTable,
    field: &str,
    key: &str,
    children: impl IntoIterator<Item = Record>,
) {
    for child in children {
        let child = nodes.bind(record.subject(), &slot(field, &child, key), child);
        record.push(field, child);
    }
}

pub(crate) fn take_keyed(
    record: &mut Record,
    nodes: &mut NodeTable,
    field: &str,
    key: &str,
) -> std::result::Result<Vec<Record>, ValidationError> {
    let children = record.take_records(field)?;
    for child in &children {
        nodes.remember(slot(field, child, key), child);
    }
    Ok(children)
}
