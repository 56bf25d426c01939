//! Composite resource metadata

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use super::node::NodeTable;
use super::schemas::{DESCRIPTION, IDENTIFIER, RESOURCE, SOURCE};
use super::validation::{
    assign_creator_order, check_creators, check_date_order, check_identifier, date_entry,
    date_record, merge_coverages, merge_dates, pack_additional_metadata, sort_creators,
    split_coverages, split_dates, unpack_additional_metadata,
};
use super::{
    push_all, push_keyed, put, put_kept, take_keyed, take_kept, take_model, take_models,
    validate_language, AwardInfo, Contributor, Coverage, Creator, MetadataDocument,
    PeriodCoverage, Publisher, RecordModel, Relation, Rights, SpatialCoverage,
};
use crate::error::ValidationError;
use crate::rdf::RdfSubject;
use crate::schema::{Record, SchemaDescriptor, Value};

pub(crate) const DEFAULT_LANGUAGE: &str = "eng";

/// Resource dates split by type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSet {
    pub created: NaiveDateTime,
    pub modified: NaiveDateTime,
    pub published: Option<NaiveDateTime>,
    pub available: Option<NaiveDateTime>,
    pub valid: Option<NaiveDateTime>,
    pub review_started: Option<NaiveDateTime>,
}

impl DateSet {
    pub fn new(created: NaiveDateTime, modified: NaiveDateTime) -> Result<Self, ValidationError> {
        check_date_order(&created, &modified)?;
        Ok(Self {
            created,
            modified,
            published: None,
            available: None,
            valid: None,
            review_started: None,
        })
    }
}

/// Metadata document of a HydroShare composite resource.
///
/// Fields guarded by an invariant are private and change only through
/// setters that re-run the matching validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceMetadata {
    url: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_: Option<String>,
    language: String,
    pub subjects: Vec<String>,
    creators: Vec<Creator>,
    pub contributors: Vec<Contributor>,
    pub sources: Vec<String>,
    pub relations: Vec<Relation>,
    pub additional_metadata: BTreeMap<String, String>,
    pub rights: Option<Rights>,
    dates: DateSet,
    pub awards: Vec<AwardInfo>,
    spatial_coverage: Option<SpatialCoverage>,
    period_coverage: Option<PeriodCoverage>,
    pub publisher: Option<Publisher>,
    pub citation: Option<String>,
    #[serde(skip)]
    nodes: NodeTable,
}

impl ResourceMetadata {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        creators: Vec<Creator>,
        created: NaiveDateTime,
        modified: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        let url = url.into();
        subject_for(&url)?;
        let mut resource = Self {
            url,
            title: title.into(),
            abstract_: None,
            language: DEFAULT_LANGUAGE.to_string(),
            subjects: Vec::new(),
            creators: Vec::new(),
            contributors: Vec::new(),
            sources: Vec::new(),
            relations: Vec::new(),
            additional_metadata: BTreeMap::new(),
            rights: Some(Rights::creative_commons_attribution()),
            dates: DateSet::new(created, modified)?,
            awards: Vec::new(),
            spatial_coverage: None,
            period_coverage: None,
            publisher: None,
            citation: None,
            nodes: NodeTable::default(),
        };
        resource.set_creators(creators)?;
        Ok(resource)
    }

    /// Canonical resource URL, also the document subject
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) -> Result<(), ValidationError> {
        let language = language.into();
        validate_language(&language)?;
        self.language = language;
        Ok(())
    }

    pub fn creators(&self) -> &[Creator] {
        &self.creators
    }

    /// Replace the creators. Creators without an order are numbered by
    /// position; explicit orders are kept.
    pub fn set_creators(&mut self, mut creators: Vec<Creator>) -> Result<(), ValidationError> {
        check_creators(&creators)?;
        assign_creator_order(&mut creators);
        self.creators = creators;
        Ok(())
    }

    pub fn dates(&self) -> &DateSet {
        &self.dates
    }

    pub fn set_dates(&mut self, dates: DateSet) -> Result<(), ValidationError> {
        check_date_order(&dates.created, &dates.modified)?;
        self.dates = dates;
        Ok(())
    }

    pub fn set_modified(&mut self, modified: NaiveDateTime) -> Result<(), ValidationError> {
        check_date_order(&self.dates.created, &modified)?;
        self.dates.modified = modified;
        Ok(())
    }

    pub fn set_published(&mut self, published: Option<NaiveDateTime>) {
        self.dates.published = published;
    }

    pub fn spatial_coverage(&self) -> Option<&SpatialCoverage> {
        self.spatial_coverage.as_ref()
    }

    pub fn set_spatial_coverage(
        &mut self,
        coverage: Option<SpatialCoverage>,
    ) -> Result<(), ValidationError> {
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
    ) -> Result<(), ValidationError> {
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
    ) -> Result<(), ValidationError> {
        let (spatial, period) = split_coverages(coverages)?;
        self.spatial_coverage = spatial;
        self.period_coverage = period;
        Ok(())
    }
}

pub(crate) fn subject_for(url: &str) -> Result<RdfSubject, ValidationError> {
    RdfSubject::named(url).map_err(|err| ValidationError::invalid("url", url, err))
}

/// The document URL, read back from the subject it was parsed at
pub(crate) fn url_of(record: &Record) -> Result<String, ValidationError> {
    record.subject().as_iri().map(str::to_string).ok_or_else(|| {
        ValidationError::invalid("url", record.subject(), "document subject must be a URI")
    })
}

// the abstract travels inside a `dc:description` node
pub(crate) fn put_abstract(record: &mut Record, nodes: &NodeTable, abstract_: Option<&str>) {
    if let Some(abstract_) = abstract_ {
        let mut description = Record::new(&DESCRIPTION);
        description.set("abstract", abstract_);
        put_kept(record, nodes, "description", description);
    }
}

pub(crate) fn take_abstract(
    record: &mut Record,
    nodes: &mut NodeTable,
) -> Result<Option<String>, ValidationError> {
    match take_kept(record, nodes, "description")? {
        Some(mut description) => description.take_string("abstract"),
        None => Ok(None),
    }
}

impl RecordModel for ResourceMetadata {
    fn descriptor() -> &'static SchemaDescriptor {
        &RESOURCE
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = Record::with_subject(Self::descriptor(), subject_for(&self.url)?);
        record.set("title", self.title.as_str());
        put_abstract(&mut record, &self.nodes, self.abstract_.as_deref());
        record.set("language", self.language.as_str());
        record.extend("subjects", self.subjects.iter());

        let mut identifier = Record::new(&IDENTIFIER);
        identifier.set("hydroshare_identifier", Value::uri(self.url.as_str()));
        put_kept(&mut record, &self.nodes, "identifier", identifier);

        push_all(&mut record, "creators", &self.creators)?;
        push_all(&mut record, "contributors", &self.contributors)?;
        let sources = self.sources.iter().map(|source| {
            let mut node = Record::new(&SOURCE);
            node.set("is_derived_from", source.as_str());
            node
        });
        push_keyed(&mut record, &self.nodes, "sources", "is_derived_from", sources);
        push_all(&mut record, "relations", &self.relations)?;
        push_keyed(
            &mut record,
            &self.nodes,
            "additional_metadata",
            "key",
            pack_additional_metadata(&self.additional_metadata),
        );
        put(&mut record, "rights", self.rights.as_ref())?;
        let dates = merge_dates(&self.dates)
            .into_iter()
            .map(|(date_type, value)| date_record(date_type, value));
        push_keyed(&mut record, &self.nodes, "dates", "type", dates);
        push_all(&mut record, "awards", &self.awards)?;
        let coverages =
            merge_coverages(self.spatial_coverage.as_ref(), self.period_coverage.as_ref())
                .iter()
                .map(Coverage::to_record)
                .collect::<Result<Vec<_>, _>>()?;
        push_keyed(&mut record, &self.nodes, "coverages", "type", coverages);
        put(&mut record, "publisher", self.publisher.as_ref())?;
        record.set_opt("citation", self.citation.as_ref());
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        let url = url_of(&record)?;
        let mut nodes = NodeTable::default();

        // split packed unions
        let dates = take_keyed(&mut record, &mut nodes, "dates", "type")?
            .into_iter()
            .map(date_entry)
            .collect::<Result<Vec<_>, _>>()?;
        let dates = split_dates(dates)?;
        let coverages = take_keyed(&mut record, &mut nodes, "coverages", "type")?
            .into_iter()
            .map(Coverage::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        let (spatial_coverage, period_coverage) = split_coverages(coverages)?;

        let additional_metadata = unpack_additional_metadata(take_keyed(
            &mut record,
            &mut nodes,
            "additional_metadata",
            "key",
        )?)?;

        // field checks
        if let Some(mut identifier) = take_kept(&mut record, &mut nodes, "identifier")? {
            if let Some(identifier) = identifier.take_string("hydroshare_identifier")? {
                check_identifier(&identifier, &url)?;
            }
        }
        let language = record
            .take_string("language")?
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        validate_language(&language)?;

        let mut creators: Vec<Creator> = take_models(&mut record, "creators")?;
        check_creators(&creators)?;
        sort_creators(&mut creators);
        assign_creator_order(&mut creators);

        let abstract_ = take_abstract(&mut record, &mut nodes)?;
        let sources = take_keyed(&mut record, &mut nodes, "sources", "is_derived_from")?
            .into_iter()
            .map(|mut source| source.require_string("is_derived_from"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            url,
            title: record.require_string("title")?,
            abstract_,
            language,
            subjects: record.take_strings("subjects")?,
            creators,
            contributors: take_models(&mut record, "contributors")?,
            sources,
            relations: take_models(&mut record, "relations")?,
            additional_metadata,
            rights: take_model(&mut record, "rights")?,
            dates,
            awards: take_models(&mut record, "awards")?,
            spatial_coverage,
            period_coverage,
            publisher: take_model(&mut record, "publisher")?,
            citation: record.take_string("citation")?,
            nodes,
        })
    }
}

impl MetadataDocument for ResourceMetadata {}
