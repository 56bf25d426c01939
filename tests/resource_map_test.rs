use hydroshare_models::models::AggregationType;
use hydroshare_models::rdf::RdfFormat;
use hydroshare_models::ResourceMap;

const RESOURCE_MAP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF
   xmlns:dc="http://purl.org/dc/elements/1.1/"
   xmlns:ore="http://www.openarchives.org/ore/terms/"
   xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about="http://www.hydroshare.org/resource/abc">
    <rdf:type rdf:resource="http://www.openarchives.org/ore/terms/Aggregation"/>
    <dc:title>Bear River watersheds</dc:title>
    <ore:isDescribedBy rdf:resource="http://www.hydroshare.org/resource/abc/data/resourcemap.xml"/>
    <ore:aggregates rdf:resource="http://www.hydroshare.org/resource/abc/data/contents/notes.txt"/>
    <ore:aggregates rdf:resource="http://www.hydroshare.org/resource/abc/data/contents/huc_resmap.xml#aggregation"/>
    <ore:aggregates rdf:resource="http://www.hydroshare.org/resource/abc/data/contents/swe_resmap.xml#aggregation"/>
  </rdf:Description>
  <rdf:Description rdf:about="http://www.hydroshare.org/resource/abc/data/contents/huc_resmap.xml#aggregation">
    <rdf:type rdf:resource="http://www.openarchives.org/ore/terms/Aggregation"/>
    <rdf:type rdf:resource="http://hydroshare.org/terms/GeographicFeatureAggregation"/>
    <dc:title>huc</dc:title>
    <ore:aggregates rdf:resource="http://www.hydroshare.org/resource/abc/data/contents/huc.dbf"/>
    <ore:aggregates rdf:resource="http://www.hydroshare.org/resource/abc/data/contents/huc.shp"/>
    <ore:aggregates rdf:resource="http://www.hydroshare.org/resource/abc/data/contents/huc.shx"/>
  </rdf:Description>
  <rdf:Description rdf:about="http://www.hydroshare.org/resource/abc/data/contents/swe_resmap.xml#aggregation">
    <rdf:type rdf:resource="http://www.openarchives.org/ore/terms/Aggregation"/>
    <rdf:type rdf:resource="http://hydroshare.org/terms/FileSetAggregation"/>
    <ore:aggregates rdf:resource="http://www.hydroshare.org/resource/abc/data/contents/swe/2020.nc"/>
  </rdf:Description>
</rdf:RDF>
"#;

#[test]
fn test_resource_map_lists_files_and_aggregations() {
    let map = ResourceMap::parse_str(RESOURCE_MAP_XML, RdfFormat::RdfXml).unwrap();

    assert_eq!(map.url, "http://www.hydroshare.org/resource/abc");
    assert_eq!(map.title.as_deref(), Some("Bear River watersheds"));
    assert_eq!(
        map.described_by.as_deref(),
        Some("http://www.hydroshare.org/resource/abc/data/resourcemap.xml")
    );
    assert_eq!(
        map.files,
        vec!["http://www.hydroshare.org/resource/abc/data/contents/notes.txt".to_string()]
    );

    let types: Vec<_> = map.aggregations.iter().map(|a| a.aggregation_type).collect();
    assert_eq!(
        types,
        vec![AggregationType::GeographicFeature, AggregationType::FileSet]
    );

    let feature = &map.aggregations[0];
    assert_eq!(feature.title.as_deref(), Some("huc"));
    assert_eq!(feature.files.len(), 3);
    assert_eq!(
        feature.main_file.as_deref(),
        Some("http://www.hydroshare.org/resource/abc/data/contents/huc.shp")
    );

    // file sets have no main file
    let file_set = &map.aggregations[1];
    assert_eq!(file_set.title, None);
    assert_eq!(file_set.main_file, None);

    assert_eq!(map.all_files().count(), 5);
}

#[test]
fn test_resource_map_without_aggregation_fails() {
    let turtle = r#"
@prefix dc: <http://purl.org/dc/elements/1.1/> .
<http://www.hydroshare.org/resource/abc> dc:title "untyped" .
"#;
    assert!(ResourceMap::parse_str(turtle, RdfFormat::Turtle).is_err());
}
