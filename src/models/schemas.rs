//! Wire schemas of HydroShare metadata documents

use crate::rdf::namespace::{dc, dcterms, hsterms, RDF_TYPE, RDF_VALUE};
use crate::schema::{FieldDescriptor as Field, SchemaDescriptor, ValueKind};

use ValueKind::{DateTime, Float, Integer, String as Text, Uri};

/// Untyped schema of a node owned by another record
macro_rules! nested_schema {
    ($schema:ident, $name:literal, [$($field:expr),+ $(,)?]) => {
        pub static $schema: SchemaDescriptor = SchemaDescriptor {
            name: $name,
            rdf_type: None,
            dc_type: None,
            label: None,
            fields: &[$($field),+],
        };
    };
}

nested_schema!(
    CREATOR,
    "Creator",
    [
        Field::scalar("creator_order", hsterms!("creatorOrder"), Integer),
        Field::scalar("name", hsterms!("name"), Text),
        Field::scalar("phone", hsterms!("phone"), Text),
        Field::scalar("address", hsterms!("address"), Text),
        Field::scalar("organization", hsterms!("organization"), Text),
        Field::scalar("email", hsterms!("email"), Text),
        Field::scalar("homepage", hsterms!("homepage"), Uri),
        Field::scalar("hydroshare_user_id", hsterms!("hydroshare_user_id"), Integer),
        Field::scalar("orcid", hsterms!("ORCID"), Uri),
        Field::scalar("google_scholar_id", hsterms!("GoogleScholarID"), Uri),
        Field::scalar("research_gate_id", hsterms!("ResearchGateID"), Uri),
    ]
);

nested_schema!(
    CONTRIBUTOR,
    "Contributor",
    [
        Field::scalar("name", hsterms!("name"), Text),
        Field::scalar("phone", hsterms!("phone"), Text),
        Field::scalar("address", hsterms!("address"), Text),
        Field::scalar("organization", hsterms!("organization"), Text),
        Field::scalar("email", hsterms!("email"), Text),
        Field::scalar("homepage", hsterms!("homepage"), Uri),
        Field::scalar("hydroshare_user_id", hsterms!("hydroshare_user_id"), Integer),
        Field::scalar("orcid", hsterms!("ORCID"), Uri),
        Field::scalar("google_scholar_id", hsterms!("GoogleScholarID"), Uri),
        Field::scalar("research_gate_id", hsterms!("ResearchGateID"), Uri),
    ]
);

nested_schema!(
    DESCRIPTION,
    "Description",
    [Field::scalar("abstract", dcterms!("abstract"), Text)]
);

nested_schema!(
    IDENTIFIER,
    "Identifier",
    [Field::scalar(
        "hydroshare_identifier",
        hsterms!("hydroShareIdentifier"),
        Uri,
    )]
);

nested_schema!(
    SOURCE,
    "Source",
    [Field::scalar("is_derived_from", hsterms!("isDerivedFrom"), Text)]
);

// one field per relation type; a relation node sets exactly one of them
nested_schema!(
    RELATION,
    "Relation",
    [
        Field::scalar("is_part_of", dcterms!("isPartOf"), Text),
        Field::scalar("has_part", dcterms!("hasPart"), Text),
        Field::scalar("is_executed_by", hsterms!("isExecutedBy"), Text),
        Field::scalar("is_created_by", hsterms!("isCreatedBy"), Text),
        Field::scalar("is_version_of", dcterms!("isVersionOf"), Text),
        Field::scalar("is_replaced_by", dcterms!("isReplacedBy"), Text),
        Field::scalar("is_described_by", hsterms!("isDescribedBy"), Text),
        Field::scalar("conforms_to", dcterms!("conformsTo"), Text),
        Field::scalar("has_format", dcterms!("hasFormat"), Text),
        Field::scalar("is_format_of", dcterms!("isFormatOf"), Text),
        Field::scalar("is_required_by", dcterms!("isRequiredBy"), Text),
        Field::scalar("requires", dcterms!("requires"), Text),
        Field::scalar("is_referenced_by", dcterms!("isReferencedBy"), Text),
        Field::scalar("references", dcterms!("references"), Text),
        Field::scalar("replaces", dcterms!("replaces"), Text),
        Field::scalar("source", dcterms!("source"), Text),
    ]
);

nested_schema!(
    EXTENDED_METADATA,
    "ExtendedMetadata",
    [
        Field::scalar("key", hsterms!("key"), Text),
        Field::scalar("value", hsterms!("value"), Text),
    ]
);

nested_schema!(
    RIGHTS,
    "Rights",
    [
        Field::scalar("statement", hsterms!("rightsStatement"), Text),
        Field::scalar("url", hsterms!("URL"), Uri),
    ]
);

nested_schema!(
    DATE,
    "Date",
    [
        Field::scalar("type", RDF_TYPE, Uri),
        Field::scalar("value", RDF_VALUE, DateTime),
    ]
);

nested_schema!(
    COVERAGE,
    "Coverage",
    [
        Field::scalar("type", RDF_TYPE, Uri),
        Field::scalar("value", RDF_VALUE, Text),
    ]
);

nested_schema!(
    SPATIAL_REFERENCE,
    "SpatialReference",
    [
        Field::scalar("type", RDF_TYPE, Uri),
        Field::scalar("value", RDF_VALUE, Text),
    ]
);

nested_schema!(
    AWARD_INFO,
    "AwardInfo",
    [
        Field::scalar("funding_agency_name", hsterms!("fundingAgencyName"), Text),
        Field::scalar("title", hsterms!("awardTitle"), Text),
        Field::scalar("number", hsterms!("awardNumber"), Text),
        Field::scalar("funding_agency_url", hsterms!("fundingAgencyURL"), Uri),
    ]
);

nested_schema!(
    PUBLISHER,
    "Publisher",
    [
        Field::scalar("name", hsterms!("publisherName"), Text),
        Field::scalar("url", hsterms!("publisherURL"), Uri),
    ]
);

nested_schema!(
    BAND_INFORMATION,
    "BandInformation",
    [
        Field::scalar("name", hsterms!("name"), Text),
        Field::scalar("variable_name", hsterms!("variableName"), Text),
        Field::scalar("variable_unit", hsterms!("variableUnit"), Text),
        Field::scalar("no_data_value", hsterms!("noDataValue"), Text),
        Field::scalar("maximum_value", hsterms!("maximumValue"), Text),
        Field::scalar("comment", hsterms!("comment"), Text),
        Field::scalar("method", hsterms!("method"), Text),
        Field::scalar("minimum_value", hsterms!("minimumValue"), Text),
    ]
);

nested_schema!(
    CELL_INFORMATION,
    "CellInformation",
    [
        Field::scalar("name", hsterms!("name"), Text),
        Field::scalar("rows", hsterms!("rows"), Integer),
        Field::scalar("columns", hsterms!("columns"), Integer),
        Field::scalar("cell_size_x_value", hsterms!("cellSizeXValue"), Float),
        Field::scalar("cell_data_type", hsterms!("cellDataType"), Text),
        Field::scalar("cell_size_y_value", hsterms!("cellSizeYValue"), Float),
    ]
);

nested_schema!(
    FIELD_INFORMATION,
    "FieldInformation",
    [
        Field::scalar("field_name", hsterms!("fieldName"), Text),
        Field::scalar("field_type", hsterms!("fieldType"), Text),
        Field::scalar("field_type_code", hsterms!("fieldTypeCode"), Text),
        Field::scalar("field_width", hsterms!("fieldWidth"), Integer),
        Field::scalar("field_precision", hsterms!("fieldPrecision"), Integer),
    ]
);

nested_schema!(
    GEOMETRY_INFORMATION,
    "GeometryInformation",
    [
        Field::scalar("feature_count", hsterms!("featureCount"), Integer),
        Field::scalar("geometry_type", hsterms!("geometryType"), Text),
    ]
);

nested_schema!(
    VARIABLE,
    "Variable",
    [
        Field::scalar("name", hsterms!("name"), Text),
        Field::scalar("unit", hsterms!("unit"), Text),
        Field::scalar("variable_type", hsterms!("type"), Text),
        Field::scalar("shape", hsterms!("shape"), Text),
        Field::scalar("descriptive_name", hsterms!("descriptive_name"), Text),
        Field::scalar("method", hsterms!("method"), Text),
        Field::scalar("missing_value", hsterms!("missing_value"), Text),
    ]
);

nested_schema!(
    UNIT,
    "Unit",
    [
        Field::scalar("unit_type", hsterms!("UnitsType"), Text),
        Field::scalar("name", hsterms!("UnitsName"), Text),
        Field::scalar("abbreviation", hsterms!("UnitsAbbreviation"), Text),
    ]
);

nested_schema!(
    SITE,
    "Site",
    [
        Field::scalar("site_code", hsterms!("SiteCode"), Text),
        Field::scalar("site_name", hsterms!("SiteName"), Text),
        Field::scalar("elevation_m", hsterms!("Elevation_m"), Float),
        Field::scalar("elevation_datum", hsterms!("ElevationDatum"), Text),
        Field::scalar("site_type", hsterms!("SiteType"), Text),
        Field::scalar("latitude", hsterms!("Latitude"), Float),
        Field::scalar("longitude", hsterms!("Longitude"), Float),
    ]
);

nested_schema!(
    TIME_SERIES_VARIABLE,
    "TimeSeriesVariable",
    [
        Field::scalar("variable_code", hsterms!("VariableCode"), Text),
        Field::scalar("variable_name", hsterms!("VariableName"), Text),
        Field::scalar("variable_type", hsterms!("VariableType"), Text),
        Field::scalar("no_data_value", hsterms!("NoDataValue"), Integer),
        Field::scalar("variable_definition", hsterms!("VariableDefinition"), Text),
        Field::scalar("speciation", hsterms!("Speciation"), Text),
    ]
);

nested_schema!(
    METHOD,
    "Method",
    [
        Field::scalar("method_code", hsterms!("MethodCode"), Text),
        Field::scalar("method_name", hsterms!("MethodName"), Text),
        Field::scalar("method_type", hsterms!("MethodType"), Text),
        Field::scalar("method_description", hsterms!("MethodDescription"), Text),
        Field::scalar("method_link", hsterms!("MethodLink"), Uri),
    ]
);

nested_schema!(
    PROCESSING_LEVEL,
    "ProcessingLevel",
    [
        Field::scalar("processing_level_code", hsterms!("ProcessingLevelCode"), Text),
        Field::scalar("definition", hsterms!("Definition"), Text),
        Field::scalar("explanation", hsterms!("Explanation"), Text),
    ]
);

nested_schema!(
    TIME_SERIES_RESULT,
    "TimeSeriesResult",
    [
        Field::scalar("series_id", hsterms!("timeSeriesResultUUID"), Text),
        Field::nested("unit", hsterms!("unit"), &UNIT),
        Field::scalar("status", hsterms!("statusCV"), Text),
        Field::scalar("sample_medium", hsterms!("sampleMediumCV"), Text),
        Field::scalar("value_count", hsterms!("valueCount"), Integer),
        Field::scalar("aggregation_statistic", hsterms!("aggregationStatisticCV"), Text),
        Field::scalar("series_label", hsterms!("seriesLabel"), Text),
        Field::nested("site", hsterms!("site"), &SITE),
        Field::nested("variable", hsterms!("variable"), &TIME_SERIES_VARIABLE),
        Field::nested("method", hsterms!("method"), &METHOD),
        Field::nested("processing_level", hsterms!("processingLevel"), &PROCESSING_LEVEL),
        Field::scalar("utc_offset", hsterms!("UTCOffSet"), Float),
    ]
);

pub static RESOURCE: SchemaDescriptor = SchemaDescriptor {
    name: "CompositeResource",
    rdf_type: Some(hsterms!("CompositeResource")),
    dc_type: Some(hsterms!("CompositeResource")),
    label: Some("Composite Resource"),
    fields: &[
        Field::scalar("title", dc!("title"), Text),
        Field::nested("description", dc!("description"), &DESCRIPTION),
        Field::scalar("language", dc!("language"), Text),
        Field::list("subjects", dc!("subject"), Text),
        Field::nested("identifier", dc!("identifier"), &IDENTIFIER),
        Field::nested_list("creators", dc!("creator"), &CREATOR),
        Field::nested_list("contributors", dc!("contributor"), &CONTRIBUTOR),
        Field::nested_list("sources", dc!("source"), &SOURCE),
        Field::nested_list("relations", dc!("relation"), &RELATION),
        Field::nested_list(
            "additional_metadata",
            hsterms!("extendedMetadata"),
            &EXTENDED_METADATA,
        ),
        Field::nested("rights", dc!("rights"), &RIGHTS),
        Field::nested_list("dates", dc!("date"), &DATE),
        Field::nested_list("awards", hsterms!("awardInfo"), &AWARD_INFO),
        Field::nested_list("coverages", dc!("coverage"), &COVERAGE),
        Field::nested("publisher", dc!("publisher"), &PUBLISHER),
        Field::scalar("citation", dcterms!("bibliographicCitation"), Text),
    ],
};

/// Aggregation schema: the fields every aggregation shares, then its own
macro_rules! aggregation_schema {
    ($schema:ident, $name:literal, $rdf_type:literal, $label:literal, [$($field:expr),* $(,)?]) => {
        pub static $schema: SchemaDescriptor = SchemaDescriptor {
            name: $name,
            rdf_type: Some(hsterms!($rdf_type)),
            dc_type: None,
            label: Some($label),
            fields: &[
                Field::scalar("title", dc!("title"), Text),
                Field::list("subjects", dc!("subject"), Text),
                Field::scalar("language", dc!("language"), Text),
                Field::nested_list(
                    "additional_metadata",
                    hsterms!("extendedMetadata"),
                    &EXTENDED_METADATA,
                ),
                Field::nested_list("coverages", dc!("coverage"), &COVERAGE),
                Field::nested("rights", dc!("rights"), &RIGHTS),
                $($field),*
            ],
        };
    };
}

aggregation_schema!(
    GEOGRAPHIC_RASTER,
    "GeographicRasterAggregation",
    "GeographicRasterAggregation",
    "Geographic Raster Content: A geographic grid represented by a virtual raster tile (.vrt) file and one or more geotiff (.tif) files",
    [
        Field::nested("band_information", hsterms!("BandInformation"), &BAND_INFORMATION),
        Field::nested("spatial_reference", hsterms!("spatialReference"), &SPATIAL_REFERENCE),
        Field::nested("cell_information", hsterms!("CellInformation"), &CELL_INFORMATION),
    ]
);

aggregation_schema!(
    GEOGRAPHIC_FEATURE,
    "GeographicFeatureAggregation",
    "GeographicFeatureAggregation",
    "Geographic Feature Content: The multiple files that are part of a geographic shapefile",
    [
        Field::nested_list("field_information", hsterms!("FieldInformation"), &FIELD_INFORMATION),
        Field::nested(
            "geometry_information",
            hsterms!("GeometryInformation"),
            &GEOMETRY_INFORMATION,
        ),
        Field::nested("spatial_reference", hsterms!("spatialReference"), &SPATIAL_REFERENCE),
    ]
);

aggregation_schema!(
    MULTIDIMENSIONAL,
    "MultidimensionalAggregation",
    "MultidimensionalAggregation",
    "Multidimensional Content: A multidimensional dataset represented by a NetCDF file (.nc) and text file giving its NetCDF header content",
    [
        Field::nested_list("variables", hsterms!("Variable"), &VARIABLE),
        Field::nested("spatial_reference", hsterms!("spatialReference"), &SPATIAL_REFERENCE),
    ]
);

aggregation_schema!(
    REFERENCED_TIME_SERIES,
    "ReferencedTimeSeriesAggregation",
    "ReferencedTimeSeriesAggregation",
    "Referenced Time Series Content: A reference to one or more time series served from HydroServers outside of HydroShare in WaterML format",
    []
);

aggregation_schema!(
    FILE_SET,
    "FileSetAggregation",
    "FileSetAggregation",
    "File Set Content: One or more files with specific metadata",
    []
);

aggregation_schema!(
    SINGLE_FILE,
    "SingleFileAggregation",
    "SingleFileAggregation",
    "Single File Content: A single file with file specific metadata",
    []
);

aggregation_schema!(
    TIME_SERIES,
    "TimeSeriesAggregation",
    "TimeSeriesAggregation",
    "Time Series Content: One or more time series held in an ODM2 format SQLite file and optional source comma separated (.csv) files",
    [
        Field::nested("description", dc!("description"), &DESCRIPTION),
        Field::nested_list(
            "time_series_results",
            hsterms!("timeSeriesResult"),
            &TIME_SERIES_RESULT,
        ),
    ]
);

/// Aggregation schemas in dispatch priority order
pub static AGGREGATION_SCHEMAS: [&SchemaDescriptor; 7] = [
    &GEOGRAPHIC_RASTER,
    &GEOGRAPHIC_FEATURE,
    &MULTIDIMENSIONAL,
    &TIME_SERIES,
    &REFERENCED_TIME_SERIES,
    &FILE_SET,
    &SINGLE_FILE,
];
