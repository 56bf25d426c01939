use chrono::{NaiveDate, NaiveDateTime};
use hydroshare_models::mapping::GraphSerializer;
use hydroshare_models::models::{
    BoxCoverage, Coverage, Creator, MetadataDocument, PeriodCoverage, RecordModel, Relation,
    RelationType, ResourceMetadata, Rights, SpatialCoverage,
};
use hydroshare_models::rdf::{Graph, RdfFormat, RdfParser, RdfPredicate, RdfSubject};
use hydroshare_models::Error;

const RESOURCE_URL: &str = "http://www.hydroshare.org/resource/1248abc1afc6454199e65c8f642b99a0";

const RESOURCE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF
   xmlns:dc="http://purl.org/dc/elements/1.1/"
   xmlns:dcterms="http://purl.org/dc/terms/"
   xmlns:hsterms="http://hydroshare.org/terms/"
   xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about="http://www.hydroshare.org/resource/1248abc1afc6454199e65c8f642b99a0">
    <rdf:type rdf:resource="http://hydroshare.org/terms/CompositeResource"/>
    <dc:title>Logan River snow depth</dc:title>
    <dc:language>eng</dc:language>
    <dc:subject>snow</dc:subject>
    <dc:subject>Logan River</dc:subject>
    <dc:description>
      <rdf:Description>
        <dcterms:abstract>Daily snow depth at three SNOTEL sites.</dcterms:abstract>
      </rdf:Description>
    </dc:description>
    <dc:identifier>
      <rdf:Description>
        <hsterms:hydroShareIdentifier rdf:resource="http://www.hydroshare.org/resource/1248abc1afc6454199e65c8f642b99a0"/>
      </rdf:Description>
    </dc:identifier>
    <dc:creator>
      <rdf:Description>
        <hsterms:name>Second, Author</hsterms:name>
        <hsterms:creatorOrder rdf:datatype="http://www.w3.org/2001/XMLSchema#integer">2</hsterms:creatorOrder>
      </rdf:Description>
    </dc:creator>
    <dc:creator>
      <rdf:Description>
        <hsterms:name>First, Author</hsterms:name>
        <hsterms:email>first@example.org</hsterms:email>
        <hsterms:creatorOrder rdf:datatype="http://www.w3.org/2001/XMLSchema#integer">1</hsterms:creatorOrder>
      </rdf:Description>
    </dc:creator>
    <dc:date>
      <rdf:Description>
        <rdf:type rdf:resource="http://purl.org/dc/terms/created"/>
        <rdf:value>2020-07-09T19:12:21.354703</rdf:value>
      </rdf:Description>
    </dc:date>
    <dc:date>
      <rdf:Description>
        <rdf:type rdf:resource="http://purl.org/dc/terms/modified"/>
        <rdf:value>2020-07-10T08:00:00</rdf:value>
      </rdf:Description>
    </dc:date>
    <dc:coverage>
      <rdf:Description>
        <rdf:type rdf:resource="http://purl.org/dc/terms/box"/>
        <rdf:value>name=Logan; northlimit=42.05; eastlimit=-111.57; southlimit=41.74; westlimit=-111.85; units=Decimal degrees; projection=WGS 84 EPSG:4326</rdf:value>
      </rdf:Description>
    </dc:coverage>
    <hsterms:extendedMetadata>
      <rdf:Description>
        <hsterms:key>site_count</hsterms:key>
        <hsterms:value>3</hsterms:value>
      </rdf:Description>
    </hsterms:extendedMetadata>
    <dc:rights>
      <rdf:Description>
        <hsterms:rightsStatement>This resource is shared under the Creative Commons Attribution CC BY.</hsterms:rightsStatement>
        <hsterms:URL rdf:resource="http://creativecommons.org/licenses/by/4.0/"/>
      </rdf:Description>
    </dc:rights>
  </rdf:Description>
</rdf:RDF>
"#;

fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn sample_resource() -> ResourceMetadata {
    let mut resource = ResourceMetadata::new(
        RESOURCE_URL,
        "Logan River snow depth",
        vec![
            Creator::new("First, Author"),
            Creator::organization("Utah Water Research Laboratory"),
        ],
        datetime(2020, 7, 9),
        datetime(2020, 7, 10),
    )
    .unwrap();
    resource.abstract_ = Some("Daily snow depth at three SNOTEL sites.".to_string());
    resource.subjects = vec!["snow".to_string(), "Logan River".to_string()];
    resource.relations = vec![Relation::new(
        RelationType::IsPartOf,
        "http://www.hydroshare.org/resource/aaaa",
    )];
    resource.sources = vec!["USDA NRCS SNOTEL".to_string()];
    resource
        .additional_metadata
        .insert("site_count".to_string(), "3".to_string());
    resource
        .set_coverages(vec![
            Coverage::Box(
                BoxCoverage::new(42.05, -111.57, 41.74, -111.85, "Decimal degrees").unwrap(),
            ),
            Coverage::Period(
                PeriodCoverage::new(datetime(2019, 10, 1), datetime(2020, 6, 30)).unwrap(),
            ),
        ])
        .unwrap();
    resource
}

#[test]
fn test_parse_hydroshare_rdf_xml() {
    let resource = ResourceMetadata::parse_str(RESOURCE_XML, RdfFormat::RdfXml)
        .unwrap()
        .unwrap();

    assert_eq!(resource.url(), RESOURCE_URL);
    assert_eq!(resource.title, "Logan River snow depth");
    assert_eq!(resource.language(), "eng");
    assert_eq!(
        resource.abstract_.as_deref(),
        Some("Daily snow depth at three SNOTEL sites.")
    );
    assert_eq!(resource.subjects.len(), 2);

    // creators come back in creator order
    let names: Vec<_> = resource
        .creators()
        .iter()
        .map(|c| c.party.name.as_deref().unwrap())
        .collect();
    assert_eq!(names, vec!["First, Author", "Second, Author"]);
    assert_eq!(resource.creators()[0].creator_order, Some(1));
    assert_eq!(
        resource.creators()[0].party.email.as_deref(),
        Some("first@example.org")
    );

    assert_eq!(resource.dates().created.date(), datetime(2020, 7, 9).date());
    let modified = NaiveDate::from_ymd_opt(2020, 7, 10)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    assert_eq!(resource.dates().modified, modified);

    match resource.spatial_coverage() {
        Some(SpatialCoverage::Box(coverage)) => {
            assert_eq!(coverage.northlimit, 42.05);
            assert_eq!(coverage.westlimit, -111.85);
            assert_eq!(coverage.units, "Decimal degrees");
            assert_eq!(coverage.projection.as_deref(), Some("WGS 84 EPSG:4326"));
        }
        other => panic!("expected box coverage, got {:?}", other),
    }
    assert!(resource.period_coverage().is_none());
    assert_eq!(
        resource.additional_metadata.get("site_count").map(String::as_str),
        Some("3")
    );
    assert_eq!(resource.rights, Some(Rights::creative_commons_attribution()));
}

#[test]
fn test_rdf_xml_round_trip() {
    let resource = sample_resource();
    let xml = resource.to_rdf_string(RdfFormat::RdfXml).unwrap();
    let parsed = ResourceMetadata::parse_str(&xml, RdfFormat::RdfXml)
        .unwrap()
        .unwrap();
    assert_eq!(parsed, resource);
}

#[test]
fn test_turtle_round_trip() {
    let resource = sample_resource();
    let turtle = resource.to_rdf_string(RdfFormat::Turtle).unwrap();
    let parsed = ResourceMetadata::parse_str(&turtle, RdfFormat::Turtle)
        .unwrap()
        .unwrap();
    assert_eq!(parsed, resource);
}

#[test]
fn test_parse_at_explicit_subject() {
    let graph = RdfParser::parse(RESOURCE_XML, RdfFormat::RdfXml).unwrap();
    let subject = RdfSubject::named(RESOURCE_URL).unwrap();

    let resource = ResourceMetadata::from_graph_at(&graph, Some(&subject))
        .unwrap()
        .unwrap();
    assert_eq!(resource.url(), RESOURCE_URL);

    let elsewhere = RdfSubject::named("http://www.hydroshare.org/resource/missing").unwrap();
    assert!(ResourceMetadata::from_graph_at(&graph, Some(&elsewhere))
        .unwrap()
        .is_none());
}

#[test]
fn test_untyped_graph_has_no_resource() {
    let graph = RdfParser::parse("", RdfFormat::Turtle).unwrap();
    let err = ResourceMetadata::from_graph(&graph).unwrap_err();
    assert!(matches!(err, Error::Mapping(_)));
}

#[test]
fn test_serialized_graph_carries_identifier_and_defaults() {
    let resource = sample_resource();
    let turtle = resource.to_rdf_string(RdfFormat::Turtle).unwrap();
    assert!(turtle.contains("hydroShareIdentifier"));
    assert!(turtle.contains("CompositeResource"));
    assert!(turtle.contains("creativecommons.org/licenses/by/4.0"));
}

#[test]
fn test_serializing_twice_into_one_graph_adds_nothing() {
    let resource = sample_resource();
    let serializer = GraphSerializer::new();
    let mut graph = Graph::new();
    serializer
        .serialize(&resource.to_record().unwrap(), &mut graph)
        .unwrap();
    let size = graph.len();

    serializer
        .serialize(&resource.to_record().unwrap(), &mut graph)
        .unwrap();
    assert_eq!(graph.len(), size);
    let parsed = ResourceMetadata::from_graph(&graph).unwrap().unwrap();
    assert_eq!(parsed, resource);
}

#[test]
fn test_parsed_resource_writes_back_onto_its_own_nodes() {
    let turtle = sample_resource().to_rdf_string(RdfFormat::Turtle).unwrap();
    let mut graph = RdfParser::parse(&turtle, RdfFormat::Turtle).unwrap();
    let size = graph.len();

    let parsed = ResourceMetadata::from_graph(&graph).unwrap().unwrap();
    GraphSerializer::new()
        .serialize(&parsed.to_record().unwrap(), &mut graph)
        .unwrap();
    assert_eq!(graph.len(), size);
    assert_eq!(ResourceMetadata::from_graph(&graph).unwrap().unwrap(), parsed);
}

#[test]
fn test_parsed_creators_keep_their_nodes() {
    let graph = RdfParser::parse(RESOURCE_XML, RdfFormat::RdfXml).unwrap();
    let resource = ResourceMetadata::from_graph(&graph).unwrap().unwrap();
    let subject = RdfSubject::named(RESOURCE_URL).unwrap();
    let creator = RdfPredicate::new("http://purl.org/dc/elements/1.1/creator").unwrap();
    let creator_nodes: Vec<_> = graph
        .objects(&subject, &creator)
        .into_iter()
        .filter_map(|object| object.as_subject())
        .collect();

    assert_eq!(creator_nodes.len(), 2);
    for creator in resource.creators() {
        assert!(creator_nodes.contains(creator.node.subject()));
    }
}
