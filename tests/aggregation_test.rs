use chrono::NaiveDate;
use hydroshare_models::models::{
    AggregationBase, AggregationMetadata, AggregationType, BandInformation, BoxSpatialReference,
    CellInformation, FieldInformation, FileSetMetadata, GeographicFeatureMetadata,
    GeographicRasterMetadata, GeometryInformation, MetadataDocument, MultidimensionalMetadata,
    MultidimensionalVariable, NodeId, PeriodCoverage, PointCoverage, RecordModel,
    SingleFileMetadata, SpatialCoverage, SpatialReference, VariableType,
};
use hydroshare_models::mapping::GraphSerializer;
use hydroshare_models::rdf::{Graph, RdfFormat, RdfParser};

const CONTENTS: &str = "http://www.hydroshare.org/resource/1248abc1afc6454199e65c8f642b99a0/data/contents";

fn aggregation_url(name: &str) -> String {
    format!("{}/{}_resmap.xml#aggregation", CONTENTS, name)
}

fn base(name: &str, title: &str) -> AggregationBase {
    AggregationBase::new(aggregation_url(name), title).unwrap()
}

fn box_reference() -> SpatialReference {
    SpatialReference::Box(BoxSpatialReference {
        name: None,
        northlimit: 4_662_392.0,
        eastlimit: 461_954.0,
        southlimit: 4_612_592.0,
        westlimit: 432_404.0,
        units: "meter".to_string(),
        projection: Some("NAD83 / UTM zone 12N".to_string()),
        projection_string: Some("PROJCS[\"NAD83 / UTM zone 12N\"]".to_string()),
        projection_string_type: Some("WKT String".to_string()),
        datum: Some("North_American_Datum_1983".to_string()),
    })
}

fn raster() -> GeographicRasterMetadata {
    let mut raster = GeographicRasterMetadata::new(base("logan", "Logan DEM"));
    raster.base.subjects = vec!["DEM".to_string(), "elevation".to_string()];
    raster.band_information = Some(BandInformation {
        name: "Band_1".to_string(),
        variable_name: Some("elevation".to_string()),
        variable_unit: Some("meter".to_string()),
        no_data_value: Some("-3.4028234663852886e+38".to_string()),
        maximum_value: Some("3031.44".to_string()),
        minimum_value: Some("1358.33".to_string()),
        ..BandInformation::default()
    });
    raster.cell_information = Some(CellInformation {
        name: "logan.vrt".to_string(),
        rows: Some(1660),
        columns: Some(985),
        cell_size_x_value: Some(30.0),
        cell_size_y_value: Some(30.0),
        cell_data_type: Some("Float32".to_string()),
        ..CellInformation::default()
    });
    raster.spatial_reference = Some(box_reference());
    raster
}

#[test]
fn test_raster_turtle_round_trip() {
    let raster = raster();
    let turtle = raster.to_rdf_string(RdfFormat::Turtle).unwrap();
    let parsed = GeographicRasterMetadata::parse_str(&turtle, RdfFormat::Turtle)
        .unwrap()
        .unwrap();
    assert_eq!(parsed, raster);
    assert_eq!(parsed.base.language(), "eng");
}

#[test]
fn test_raster_serialized_twice_into_one_graph() {
    let raster = raster();
    let record = raster.to_record().unwrap();
    let serializer = GraphSerializer::new();

    let mut graph = serializer.to_graph(&record).unwrap();
    let size = graph.len();
    serializer
        .serialize(&raster.to_record().unwrap(), &mut graph)
        .unwrap();
    assert_eq!(graph.len(), size);

    let parsed = GeographicRasterMetadata::from_graph(&graph).unwrap().unwrap();
    assert_eq!(parsed, raster);
}

#[test]
fn test_parsed_raster_writes_back_onto_its_own_nodes() {
    let turtle = raster().to_rdf_string(RdfFormat::Turtle).unwrap();
    let mut graph = RdfParser::parse(&turtle, RdfFormat::Turtle).unwrap();
    let size = graph.len();

    let parsed = GeographicRasterMetadata::from_graph(&graph).unwrap().unwrap();
    GraphSerializer::new()
        .serialize(&parsed.to_record().unwrap(), &mut graph)
        .unwrap();
    assert_eq!(graph.len(), size);
}

#[test]
fn test_dispatch_picks_the_typed_aggregation() {
    let raster = raster();
    let xml = raster.to_rdf_string(RdfFormat::RdfXml).unwrap();

    let parsed = AggregationMetadata::parse_str(&xml, RdfFormat::RdfXml)
        .unwrap()
        .unwrap();
    assert_eq!(parsed.aggregation_type(), AggregationType::GeographicRaster);
    assert_eq!(parsed.base().title, "Logan DEM");
    assert_eq!(parsed, AggregationMetadata::GeographicRaster(raster));
}

#[test]
fn test_dispatch_each_type() {
    let documents = vec![
        AggregationMetadata::FileSet(FileSetMetadata::new(base("photos", "Field photos"))),
        AggregationMetadata::SingleFile(SingleFileMetadata::new(base("readme", "Readme"))),
        AggregationMetadata::Multidimensional(MultidimensionalMetadata::new(base(
            "snow", "Snow grid",
        ))),
    ];
    for document in documents {
        let graph = document.to_graph().unwrap();
        let parsed = AggregationMetadata::parse(&graph).unwrap().unwrap();
        assert_eq!(parsed.aggregation_type(), document.aggregation_type());
        assert_eq!(parsed, document);
    }
}

#[test]
fn test_empty_graph_holds_no_aggregation() {
    assert_eq!(AggregationMetadata::parse(&Graph::new()).unwrap(), None);
}

#[test]
fn test_feature_with_zero_count() {
    let mut feature = GeographicFeatureMetadata::new(base("watersheds", "Watersheds"));
    feature.geometry_information = Some(GeometryInformation {
        feature_count: 0,
        geometry_type: "MULTIPOLYGON".to_string(),
        ..GeometryInformation::default()
    });
    feature.field_information = vec![
        FieldInformation {
            field_name: "HUC8".to_string(),
            field_type: "String".to_string(),
            field_type_code: Some("4".to_string()),
            field_width: Some(8),
            field_precision: Some(0),
            ..FieldInformation::default()
        },
        FieldInformation {
            field_name: "AREA".to_string(),
            field_type: "Real".to_string(),
            field_type_code: Some("2".to_string()),
            field_width: Some(19),
            field_precision: Some(11),
            ..FieldInformation::default()
        },
    ];
    feature.base.set_spatial_coverage(Some(SpatialCoverage::Point(PointCoverage {
        name: None,
        east: 0.0,
        north: 0.0,
        units: "Decimal degrees".to_string(),
        projection: None,
    })))
    .unwrap();

    let turtle = feature.to_rdf_string(RdfFormat::Turtle).unwrap();
    // falsy values never reach the graph, the packed codec keeps zeros
    assert!(!turtle.contains("featureCount"));
    assert!(turtle.contains("east=0"));

    let parsed = GeographicFeatureMetadata::parse_str(&turtle, RdfFormat::Turtle)
        .unwrap()
        .unwrap();
    assert_eq!(parsed.geometry_information, feature.geometry_information);
    match parsed.base.spatial_coverage() {
        Some(SpatialCoverage::Point(point)) => assert_eq!(point.east, 0.0),
        other => panic!("expected point coverage, got {:?}", other),
    }

    // a zero precision is dropped and reads back as absent
    assert_eq!(parsed.field_information[0].field_precision, None);
    assert_eq!(parsed.field_information[1], feature.field_information[1]);
}

#[test]
fn test_multidimensional_variables_and_period() {
    let mut netcdf = MultidimensionalMetadata::new(base("snow", "Snow water equivalent"));
    netcdf.variables = vec![MultidimensionalVariable {
        name: "SWE".to_string(),
        unit: "m".to_string(),
        variable_type: VariableType::Float,
        shape: "time,y,x".to_string(),
        descriptive_name: Some("Snow water equivalent".to_string()),
        method: None,
        missing_value: Some("-9999".to_string()),
        node: NodeId::new(),
    }];
    let start = NaiveDate::from_ymd_opt(2008, 10, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let end = NaiveDate::from_ymd_opt(2009, 6, 30)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    netcdf
        .base
        .set_period_coverage(Some(PeriodCoverage::new(start, end).unwrap()))
        .unwrap();
    netcdf
        .base
        .additional_metadata
        .insert("model".to_string(), "UEB".to_string());

    let xml = netcdf.to_rdf_string(RdfFormat::RdfXml).unwrap();
    let parsed = AggregationMetadata::parse_str(&xml, RdfFormat::RdfXml)
        .unwrap()
        .unwrap();
    assert_eq!(parsed, AggregationMetadata::Multidimensional(netcdf));
}

#[test]
fn test_aggregation_rights_default_to_none() {
    let file_set = FileSetMetadata::new(base("photos", "Field photos"));
    assert_eq!(file_set.base.rights, None);

    let turtle = file_set.to_rdf_string(RdfFormat::Turtle).unwrap();
    assert!(!turtle.contains("rightsStatement"));
}
