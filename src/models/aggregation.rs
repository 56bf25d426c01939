//! Aggregation metadata documents
//!
//! Every aggregation shares an [`AggregationBase`]; the concrete types add the
//! content descriptions of their files. [`AggregationMetadata`] picks the
//! concrete type from the `rdf:type` found in a graph.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::node::NodeTable;
use super::resource::{put_abstract, subject_for, take_abstract, url_of, DEFAULT_LANGUAGE};
use super::schemas::{
    AGGREGATION_SCHEMAS, FILE_SET, GEOGRAPHIC_FEATURE, GEOGRAPHIC_RASTER, MULTIDIMENSIONAL,
    REFERENCED_TIME_SERIES, SINGLE_FILE, TIME_SERIES,
};
use super::validation::{
    merge_coverages, pack_additional_metadata, split_coverages, unpack_additional_metadata,
};
use super::{
    push_all, push_keyed, put, put_kept, take_keyed, take_kept, take_model, take_models,
    validate_language, AggregationType, BandInformation,
    CellInformation, Coverage, FieldInformation, GeometryInformation, MetadataDocument,
    MultidimensionalVariable, PeriodCoverage, RecordModel, Rights, SpatialCoverage,
    SpatialReference, TimeSeriesResult,
};
use crate::error::{Result, ValidationError};
use crate::mapping::SchemaRegistry;
use crate::rdf::{Graph, RdfFormat, RdfParser, RdfSerializer};
use crate::schema::{Record, SchemaDescriptor};

/// Metadata common to every aggregation type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationBase {
    url: String,
    pub title: String,
    pub subjects: Vec<String>,
    language: String,
    pub additional_metadata: BTreeMap<String, String>,
    pub rights: Option<Rights>,
    spatial_coverage: Option<SpatialCoverage>,
    period_coverage: Option<PeriodCoverage>,
    #[serde(skip)]
    nodes: NodeTable,
}

impl AggregationBase {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
    ) -> std::result::Result<Self, ValidationError> {
        let url = url.into();
        subject_for(&url)?;
        Ok(Self {
            url,
            title: title.into(),
            subjects: Vec::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            additional_metadata: BTreeMap::new(),
            rights: None,
            spatial_coverage: None,
            period_coverage: None,
            nodes: NodeTable::default(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(
        &mut self,
        language: impl Into<String>,
    ) -> std::result::Result<(), ValidationError> {
        let language = language.into();
        validate_language(&language)?;
        self.language = language;
        Ok(())
    }

    pub fn spatial_coverage(&self) -> Option<&SpatialCoverage> {
        self.spatial_coverage.as_ref()
    }

    pub fn set_spatial_coverage(
        &mut self,
        coverage: Option<SpatialCoverage>,
    ) -> std::result::Result<(), ValidationError> {
        if let Some(coverage) = &coverage {
            coverage.validate()?;
        }
        self.spatial_coverage = coverage;
        Ok(())
    }

    pub fn period_coverage(&self) -> Option<&PeriodCoverage> {
        self.period_coverage.as_ref()
    }

    pub fn set_period_coverage(
        &mut self,
        period: Option<PeriodCoverage>,
    ) -> std::result::Result<(), ValidationError> {
        if let Some(period) = &period {
            period.validate()?;
        }
        self.period_coverage = period;
        Ok(())
    }

    /// Set the coverages from wire-style entries, splitting them by type
    pub fn set_coverages(
        &mut self,
        coverages: impl IntoIterator<Item = Coverage>,
    ) -> std::result::Result<(), ValidationError> {
        // validated before either coverage is replaced
        let (spatial, period) = split_coverages(coverages)?;
        self.spatial_coverage = spatial;
        self.period_coverage = period;
        Ok(())
    }

    /// Start the record of a concrete aggregation with the shared fields
    fn to_record(
        &self,
        schema: &'static SchemaDescriptor,
    ) -> std::result::Result<Record, ValidationError> {
        let mut record = Record::with_subject(schema, subject_for(&self.url)?);
        record.set("title", self.title.as_str());
        record.extend("subjects", self.subjects.iter());
        record.set("language", self.language.as_str());
        push_keyed(
            &mut record,
            &self.nodes,
            "additional_metadata",
            "key",
            pack_additional_metadata(&self.additional_metadata),
        );
        let coverages =
            merge_coverages(self.spatial_coverage.as_ref(), self.period_coverage.as_ref())
                .iter()
                .map(Coverage::to_record)
                .collect::<std::result::Result<Vec<_>, _>>()?;
        push_keyed(&mut record, &self.nodes, "coverages", "type", coverages);
        put(&mut record, "rights", self.rights.as_ref())?;
        Ok(record)
    }

    fn put_spatial_reference(
        &self,
        record: &mut Record,
        reference: Option<&SpatialReference>,
    ) -> std::result::Result<(), ValidationError> {
        if let Some(reference) = reference {
            put_kept(record, &self.nodes, "spatial_reference", reference.to_record()?);
        }
        Ok(())
    }

    fn take_spatial_reference(
        &mut self,
        record: &mut Record,
    ) -> std::result::Result<Option<SpatialReference>, ValidationError> {
        take_kept(record, &mut self.nodes, "spatial_reference")?
            .map(SpatialReference::from_record)
            .transpose()
    }

    /// Read the shared fields, leaving the type specific ones in the record
    fn from_record(record: &mut Record) -> std::result::Result<Self, ValidationError> {
        let url = url_of(record)?;
        let mut nodes = NodeTable::default();
        let coverages = take_keyed(record, &mut nodes, "coverages", "type")?
            .into_iter()
            .map(Coverage::from_record)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let (spatial_coverage, period_coverage) = split_coverages(coverages)?;
        let additional_metadata = unpack_additional_metadata(take_keyed(
            record,
            &mut nodes,
            "additional_metadata",
            "key",
        )?)?;
        let language = record
            .take_string("language")?
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        validate_language(&language)?;
        Ok(Self {
            url,
            title: record.take_string("title")?.unwrap_or_default(),
            subjects: record.take_strings("subjects")?,
            language,
            additional_metadata,
            rights: take_model(record, "rights")?,
            spatial_coverage,
            period_coverage,
            nodes,
        })
    }
}

/// Geographic raster: a `.vrt` file with one or more GeoTIFFs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeographicRasterMetadata {
    #[serde(flatten)]
    pub base: AggregationBase,
    pub band_information: Option<BandInformation>,
    pub spatial_reference: Option<SpatialReference>,
    pub cell_information: Option<CellInformation>,
}

impl GeographicRasterMetadata {
    pub fn new(base: AggregationBase) -> Self {
        Self {
            base,
            band_information: None,
            spatial_reference: None,
            cell_information: None,
        }
    }
}

impl RecordModel for GeographicRasterMetadata {
    fn descriptor() -> &'static SchemaDescriptor {
        &GEOGRAPHIC_RASTER
    }

    fn to_record(&self) -> std::result::Result<Record, ValidationError> {
        let mut record = self.base.to_record(Self::descriptor())?;
        put(&mut record, "band_information", self.band_information.as_ref())?;
        self.base
            .put_spatial_reference(&mut record, self.spatial_reference.as_ref())?;
        put(&mut record, "cell_information", self.cell_information.as_ref())?;
        Ok(record)
    }

    fn from_record(mut record: Record) -> std::result::Result<Self, ValidationError> {
        let mut base = AggregationBase::from_record(&mut record)?;
        Ok(Self {
            band_information: take_model(&mut record, "band_information")?,
            spatial_reference: base.take_spatial_reference(&mut record)?,
            cell_information: take_model(&mut record, "cell_information")?,
            base,
        })
    }
}

/// Geographic feature: the files of one shapefile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeographicFeatureMetadata {
    #[serde(flatten)]
    pub base: AggregationBase,
    pub field_information: Vec<FieldInformation>,
    pub geometry_information: Option<GeometryInformation>,
    pub spatial_reference: Option<SpatialReference>,
}

impl GeographicFeatureMetadata {
    pub fn new(base: AggregationBase) -> Self {
        Self {
            base,
            field_information: Vec::new(),
            geometry_information: None,
            spatial_reference: None,
        }
    }
}

impl RecordModel for GeographicFeatureMetadata {
    fn descriptor() -> &'static SchemaDescriptor {
        &GEOGRAPHIC_FEATURE
    }

    fn to_record(&self) -> std::result::Result<Record, ValidationError> {
        let mut record = self.base.to_record(Self::descriptor())?;
        push_all(&mut record, "field_information", &self.field_information)?;
        put(&mut record, "geometry_information", self.geometry_information.as_ref())?;
        self.base
            .put_spatial_reference(&mut record, self.spatial_reference.as_ref())?;
        Ok(record)
    }

    fn from_record(mut record: Record) -> std::result::Result<Self, ValidationError> {
        let mut base = AggregationBase::from_record(&mut record)?;
        Ok(Self {
            field_information: take_models(&mut record, "field_information")?,
            geometry_information: take_model(&mut record, "geometry_information")?,
            spatial_reference: base.take_spatial_reference(&mut record)?,
            base,
        })
    }
}

/// Multidimensional: a NetCDF file and its header dump
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultidimensionalMetadata {
    #[serde(flatten)]
    pub base: AggregationBase,
    pub variables: Vec<MultidimensionalVariable>,
    pub spatial_reference: Option<SpatialReference>,
}

impl MultidimensionalMetadata {
    pub fn new(base: AggregationBase) -> Self {
        Self {
            base,
            variables: Vec::new(),
            spatial_reference: None,
        }
    }
}

impl RecordModel for MultidimensionalMetadata {
    fn descriptor() -> &'static SchemaDescriptor {
        &MULTIDIMENSIONAL
    }

    fn to_record(&self) -> std::result::Result<Record, ValidationError> {
        let mut record = self.base.to_record(Self::descriptor())?;
        push_all(&mut record, "variables", &self.variables)?;
        self.base
            .put_spatial_reference(&mut record, self.spatial_reference.as_ref())?;
        Ok(record)
    }

    fn from_record(mut record: Record) -> std::result::Result<Self, ValidationError> {
        let mut base = AggregationBase::from_record(&mut record)?;
        Ok(Self {
            variables: take_models(&mut record, "variables")?,
            spatial_reference: base.take_spatial_reference(&mut record)?,
            base,
        })
    }
}

/// Time series: an ODM2 SQLite file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesMetadata {
    #[serde(flatten)]
    pub base: AggregationBase,
    #[serde(rename = "abstract")]
    pub abstract_: Option<String>,
    pub time_series_results: Vec<TimeSeriesResult>,
}

impl TimeSeriesMetadata {
    pub fn new(base: AggregationBase) -> Self {
        Self {
            base,
            abstract_: None,
            time_series_results: Vec::new(),
        }
    }
}

impl RecordModel for TimeSeriesMetadata {
    fn descriptor() -> &'static SchemaDescriptor {
        &TIME_SERIES
    }

    fn to_record(&self) -> std::result::Result<Record, ValidationError> {
        let mut record = self.base.to_record(Self::descriptor())?;
        put_abstract(&mut record, &self.base.nodes, self.abstract_.as_deref());
        push_all(&mut record, "time_series_results", &self.time_series_results)?;
        Ok(record)
    }

    fn from_record(mut record: Record) -> std::result::Result<Self, ValidationError> {
        let mut base = AggregationBase::from_record(&mut record)?;
        Ok(Self {
            abstract_: take_abstract(&mut record, &mut base.nodes)?,
            time_series_results: take_models(&mut record, "time_series_results")?,
            base,
        })
    }
}

/// Aggregation types that carry only the shared metadata
macro_rules! base_only_aggregation {
    ($(#[$meta:meta])* $name:ident, $schema:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub struct $name {
            #[serde(flatten)]
            pub base: AggregationBase,
        }

        impl $name {
            pub fn new(base: AggregationBase) -> Self {
                Self { base }
            }
        }

        impl RecordModel for $name {
            fn descriptor() -> &'static SchemaDescriptor {
                &$schema
            }

            fn to_record(&self) -> std::result::Result<Record, ValidationError> {
                self.base.to_record(Self::descriptor())
            }

            fn from_record(mut record: Record) -> std::result::Result<Self, ValidationError> {
                Ok(Self {
                    base: AggregationBase::from_record(&mut record)?,
                })
            }
        }

        impl MetadataDocument for $name {}
    };
}

base_only_aggregation!(
    /// Referenced time series: a `.refts.json` file pointing at remote WaterML
    ReferencedTimeSeriesMetadata,
    REFERENCED_TIME_SERIES
);
base_only_aggregation!(
    /// File set: a folder of files sharing metadata
    FileSetMetadata,
    FILE_SET
);
base_only_aggregation!(SingleFileMetadata, SINGLE_FILE);

impl MetadataDocument for GeographicRasterMetadata {}
impl MetadataDocument for GeographicFeatureMetadata {}
impl MetadataDocument for MultidimensionalMetadata {}
impl MetadataDocument for TimeSeriesMetadata {}

/// Any aggregation metadata document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "aggregation_type")]
pub enum AggregationMetadata {
    GeographicRaster(GeographicRasterMetadata),
    GeographicFeature(GeographicFeatureMetadata),
    Multidimensional(MultidimensionalMetadata),
    TimeSeries(TimeSeriesMetadata),
    ReferencedTimeSeries(ReferencedTimeSeriesMetadata),
    FileSet(FileSetMetadata),
    SingleFile(SingleFileMetadata),
}

/// Apply the same expression to whichever document a variant holds
macro_rules! each_variant {
    ($value:expr, $doc:ident => $body:expr) => {
        match $value {
            AggregationMetadata::GeographicRaster($doc) => $body,
            AggregationMetadata::GeographicFeature($doc) => $body,
            AggregationMetadata::Multidimensional($doc) => $body,
            AggregationMetadata::TimeSeries($doc) => $body,
            AggregationMetadata::ReferencedTimeSeries($doc) => $body,
            AggregationMetadata::FileSet($doc) => $body,
            AggregationMetadata::SingleFile($doc) => $body,
        }
    };
}

impl AggregationMetadata {
    /// Find the aggregation in a graph, trying the types in registry order.
    ///
    /// `Ok(None)` means the graph holds no known aggregation, or one without
    /// any data.
    pub fn parse(graph: &Graph) -> Result<Option<Self>> {
        let registry = SchemaRegistry::new(AGGREGATION_SCHEMAS);
        match registry.parse(graph)? {
            Some(record) => Ok(Some(Self::from_record(record)?)),
            None => Ok(None),
        }
    }

    pub fn parse_str(input: &str, format: RdfFormat) -> Result<Option<Self>> {
        let graph = RdfParser::parse(input, format)?;
        Self::parse(&graph)
    }

    /// Build the concrete document named by the record's schema
    pub fn from_record(record: Record) -> std::result::Result<Self, ValidationError> {
        let schema = record.schema();
        let aggregation_type = schema
            .rdf_type
            .and_then(AggregationType::parse)
            .ok_or_else(|| ValidationError::UnknownDiscriminator {
                field: "aggregation".to_string(),
                value: schema.name.to_string(),
            })?;
        debug!(aggregation = %aggregation_type, "building aggregation document");
        Ok(match aggregation_type {
            AggregationType::GeographicRaster => {
                Self::GeographicRaster(GeographicRasterMetadata::from_record(record)?)
            }
            AggregationType::GeographicFeature => {
                Self::GeographicFeature(GeographicFeatureMetadata::from_record(record)?)
            }
            AggregationType::Multidimensional => {
                Self::Multidimensional(MultidimensionalMetadata::from_record(record)?)
            }
            AggregationType::TimeSeries => {
                Self::TimeSeries(TimeSeriesMetadata::from_record(record)?)
            }
            AggregationType::ReferencedTimeSeries => {
                Self::ReferencedTimeSeries(ReferencedTimeSeriesMetadata::from_record(record)?)
            }
            AggregationType::FileSet => Self::FileSet(FileSetMetadata::from_record(record)?),
            AggregationType::SingleFile => {
                Self::SingleFile(SingleFileMetadata::from_record(record)?)
            }
        })
    }

    pub fn aggregation_type(&self) -> AggregationType {
        match self {
            Self::GeographicRaster(_) => AggregationType::GeographicRaster,
            Self::GeographicFeature(_) => AggregationType::GeographicFeature,
            Self::Multidimensional(_) => AggregationType::Multidimensional,
            Self::TimeSeries(_) => AggregationType::TimeSeries,
            Self::ReferencedTimeSeries(_) => AggregationType::ReferencedTimeSeries,
            Self::FileSet(_) => AggregationType::FileSet,
            Self::SingleFile(_) => AggregationType::SingleFile,
        }
    }

    pub fn base(&self) -> &AggregationBase {
        each_variant!(self, doc => &doc.base)
    }

    pub fn base_mut(&mut self) -> &mut AggregationBase {
        each_variant!(self, doc => &mut doc.base)
    }

    pub fn to_record(&self) -> std::result::Result<Record, ValidationError> {
        each_variant!(self, doc => doc.to_record())
    }

    pub fn to_graph(&self) -> Result<Graph> {
        each_variant!(self, doc => doc.to_graph())
    }

    pub fn to_rdf_string(&self, format: RdfFormat) -> Result<String> {
        let graph = self.to_graph()?;
        Ok(RdfSerializer::serialize(&graph, format)?)
    }
}
