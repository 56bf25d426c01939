//! Root-level normalization and validation rules
//!
//! Models run these as an explicit pipeline when built from a wire record:
//! first the packed unions are split (dates, coverages), then the key/value
//! list of additional metadata becomes a map, then the field checks run.
//! Every function is pure over its inputs so the setters on the user-facing
//! models can reuse them one at a time.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use tracing::debug;

use super::schemas::{DATE, EXTENDED_METADATA};
use super::{Coverage, Creator, DateSet, DateType, PeriodCoverage, SpatialCoverage};
use crate::error::ValidationError;
use crate::schema::{format_datetime, Record};

/// Wire record of one `dc:date` entry
pub fn date_record(date_type: DateType, value: NaiveDateTime) -> Record {
    let mut record = Record::new(&DATE);
    record.set("type", date_type.to_value());
    record.set("value", value);
    record
}

/// Read one `dc:date` entry
pub fn date_entry(mut record: Record) -> Result<(DateType, NaiveDateTime), ValidationError> {
    let discriminator = record.require_string("type")?;
    let date_type =
        DateType::parse(&discriminator).ok_or_else(|| ValidationError::UnknownDiscriminator {
            field: "date".to_string(),
            value: discriminator.clone(),
        })?;
    let value = record
        .take_datetime("value")?
        .ok_or_else(|| record.missing("value"))?;
    Ok((date_type, value))
}

/// Split date entries into a [`DateSet`].
///
/// Exactly one created and one modified date are required, modified may not
/// precede created, and every other type may occur at most once.
pub fn split_dates(
    entries: impl IntoIterator<Item = (DateType, NaiveDateTime)>,
) -> Result<DateSet, ValidationError> {
    let mut by_type: BTreeMap<DateType, NaiveDateTime> = BTreeMap::new();
    for (date_type, value) in entries {
        if by_type.insert(date_type, value).is_some() {
            return Err(ValidationError::DuplicateDate(date_type.as_str().to_string()));
        }
    }

    let mut take = |date_type: DateType| by_type.remove(&date_type);
    let created = take(DateType::Created)
        .ok_or_else(|| ValidationError::MissingDate(DateType::Created.as_str().to_string()))?;
    let modified = take(DateType::Modified)
        .ok_or_else(|| ValidationError::MissingDate(DateType::Modified.as_str().to_string()))?;
    let dates = DateSet {
        created,
        modified,
        published: take(DateType::Published),
        available: take(DateType::Available),
        valid: take(DateType::Valid),
        review_started: take(DateType::ReviewStarted),
    };
    check_date_order(&dates.created, &dates.modified)?;
    Ok(dates)
}

/// Flatten a [`DateSet`] back into date entries, created and modified first
pub fn merge_dates(dates: &DateSet) -> Vec<(DateType, NaiveDateTime)> {
    let optional = [
        (DateType::Published, dates.published),
        (DateType::Available, dates.available),
        (DateType::Valid, dates.valid),
        (DateType::ReviewStarted, dates.review_started),
    ];
    let mut entries = vec![
        (DateType::Created, dates.created),
        (DateType::Modified, dates.modified),
    ];
    entries.extend(
        optional
            .into_iter()
            .filter_map(|(date_type, value)| value.map(|value| (date_type, value))),
    );
    entries
}

pub fn check_date_order(
    created: &NaiveDateTime,
    modified: &NaiveDateTime,
) -> Result<(), ValidationError> {
    if modified < created {
        return Err(ValidationError::ModifiedBeforeCreated {
            created: format_datetime(created),
            modified: format_datetime(modified),
        });
    }
    Ok(())
}

/// Split coverage entries into the spatial and the temporal coverage.
///
/// Each coverage is validated. At most one coverage of each type is allowed,
/// and a point and a box may not both be present.
pub fn split_coverages(
    coverages: impl IntoIterator<Item = Coverage>,
) -> Result<(Option<SpatialCoverage>, Option<PeriodCoverage>), ValidationError> {
    let mut point = None;
    let mut bounds = None;
    let mut period = None;
    for coverage in coverages {
        coverage.validate()?;
        let coverage_type = coverage.coverage_type();
        let duplicate = match coverage {
            Coverage::Point(value) => point.replace(value).is_some(),
            Coverage::Box(value) => bounds.replace(value).is_some(),
            Coverage::Period(value) => period.replace(value).is_some(),
        };
        if duplicate {
            return Err(ValidationError::DuplicateCoverage(
                coverage_type.as_str().to_string(),
            ));
        }
    }
    let spatial = match (point, bounds) {
        (Some(_), Some(_)) => return Err(ValidationError::ConflictingSpatialCoverage),
        (Some(point), None) => Some(SpatialCoverage::Point(point)),
        (None, Some(bounds)) => Some(SpatialCoverage::Box(bounds)),
        (None, None) => None,
    };
    Ok((spatial, period))
}

/// Inverse of [`split_coverages`]
pub fn merge_coverages(
    spatial: Option<&SpatialCoverage>,
    period: Option<&PeriodCoverage>,
) -> Vec<Coverage> {
    spatial
        .cloned()
        .map(Coverage::from)
        .into_iter()
        .chain(period.cloned().map(Coverage::Period))
        .collect()
}

/// Key/value records of an additional metadata map
pub fn pack_additional_metadata(metadata: &BTreeMap<String, String>) -> Vec<Record> {
    metadata
        .iter()
        .map(|(key, value)| {
            let mut record = Record::new(&EXTENDED_METADATA);
            record.set("key", key.as_str());
            record.set("value", value.as_str());
            record
        })
        .collect()
}

/// Collect key/value records into a map; a repeated key keeps its last value
pub fn unpack_additional_metadata(
    records: impl IntoIterator<Item = Record>,
) -> Result<BTreeMap<String, String>, ValidationError> {
    let mut metadata = BTreeMap::new();
    for mut record in records {
        let key = record.require_string("key")?;
        let value = record.take_string("value")?.unwrap_or_default();
        if let Some(previous) = metadata.insert(key.clone(), value) {
            debug!(key = %key, previous = %previous, "duplicate additional metadata key");
        }
    }
    Ok(metadata)
}

/// Number creators without an explicit order by list position, starting at 1.
///
/// Explicit orders are kept as they are.
pub fn assign_creator_order(creators: &mut [Creator]) {
    for (index, creator) in creators.iter_mut().enumerate() {
        if creator.creator_order.is_none() {
            creator.creator_order = u32::try_from(index + 1).ok();
        }
    }
}

/// Stable sort by creator order, unordered creators last
pub fn sort_creators(creators: &mut [Creator]) {
    creators.sort_by_key(|creator| (creator.creator_order.is_none(), creator.creator_order));
}

pub fn check_creators(creators: &[Creator]) -> Result<(), ValidationError> {
    if creators.is_empty() {
        return Err(ValidationError::EmptyCreators);
    }
    Ok(())
}

/// The resource identifier must name the document subject
pub fn check_identifier(identifier: &str, subject: &str) -> Result<(), ValidationError> {
    if identifier != subject {
        return Err(ValidationError::IdentifierMismatch {
            identifier: identifier.to_string(),
            subject: subject.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoxCoverage, PointCoverage};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 7, d)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    fn point() -> PointCoverage {
        PointCoverage {
            name: None,
            east: -111.8,
            north: 41.7,
            units: "Decimal degrees".into(),
            projection: None,
        }
    }

    #[test]
    fn test_modified_before_created_fails() {
        let err = split_dates([(DateType::Created, day(9)), (DateType::Modified, day(8))])
            .unwrap_err();
        assert!(matches!(err, ValidationError::ModifiedBeforeCreated { .. }));

        let dates =
            split_dates([(DateType::Created, day(9)), (DateType::Modified, day(10))]).unwrap();
        assert_eq!(dates.created, day(9));
        assert_eq!(dates.modified, day(10));
        assert_eq!(dates.published, None);
    }

    #[test]
    fn test_required_and_unique_dates() {
        assert_eq!(
            split_dates([(DateType::Created, day(9))]),
            Err(ValidationError::MissingDate(DateType::Modified.as_str().to_string()))
        );
        assert_eq!(
            split_dates([
                (DateType::Created, day(9)),
                (DateType::Modified, day(9)),
                (DateType::Created, day(10)),
            ]),
            Err(ValidationError::DuplicateDate(DateType::Created.as_str().to_string()))
        );
    }

    #[test]
    fn test_dates_merge_back() {
        let entries = vec![
            (DateType::Created, day(1)),
            (DateType::Modified, day(2)),
            (DateType::Published, day(3)),
        ];
        let dates = split_dates(entries.clone()).unwrap();
        assert_eq!(merge_dates(&dates), entries);
    }

    #[test]
    fn test_point_and_box_are_exclusive() {
        let bounds = BoxCoverage::new(20.0, 0.0, 10.0, 0.0, "Decimal degrees").unwrap();
        assert_eq!(
            split_coverages([Coverage::Point(point()), Coverage::Box(bounds.clone())]),
            Err(ValidationError::ConflictingSpatialCoverage)
        );

        let (spatial, period) = split_coverages([Coverage::Box(bounds.clone())]).unwrap();
        assert_eq!(spatial, Some(SpatialCoverage::Box(bounds)));
        assert!(period.is_none());
    }

    #[test]
    fn test_split_validates_each_coverage() {
        let inverted = BoxCoverage {
            name: None,
            northlimit: 10.0,
            eastlimit: 0.0,
            southlimit: 20.0,
            westlimit: 0.0,
            units: "Decimal degrees".into(),
            projection: None,
        };
        assert_eq!(
            split_coverages([Coverage::Box(inverted)]),
            Err(ValidationError::InvalidBoxBounds {
                north: 10.0,
                south: 20.0
            })
        );

        let backwards = PeriodCoverage {
            name: None,
            start: day(10),
            end: day(9),
            scheme: None,
        };
        assert!(matches!(
            split_coverages([Coverage::Period(backwards)]),
            Err(ValidationError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_duplicate_coverage_type() {
        assert!(matches!(
            split_coverages([Coverage::Point(point()), Coverage::Point(point())]),
            Err(ValidationError::DuplicateCoverage(_))
        ));
    }

    #[test]
    fn test_additional_metadata_round_trip() {
        let metadata: BTreeMap<String, String> = [("k1", "v1"), ("k2", "v2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let records = pack_additional_metadata(&metadata);
        assert_eq!(records.len(), 2);
        assert_eq!(unpack_additional_metadata(records).unwrap(), metadata);
    }

    #[test]
    fn test_creator_order_is_kept_once_set() {
        let mut creators = vec![Creator::new("A"), Creator::new("B")];
        assign_creator_order(&mut creators);
        assert_eq!(creators[0].creator_order, Some(1));
        assert_eq!(creators[1].creator_order, Some(2));

        creators.reverse();
        assign_creator_order(&mut creators);
        assert_eq!(creators[0].party.name.as_deref(), Some("B"));
        assert_eq!(creators[0].creator_order, Some(2));

        sort_creators(&mut creators);
        assert_eq!(creators[0].party.name.as_deref(), Some("A"));
    }

    #[test]
    fn test_identifier_and_creators() {
        assert!(check_identifier("http://a", "http://a").is_ok());
        assert!(matches!(
            check_identifier("http://a", "http://b"),
            Err(ValidationError::IdentifierMismatch { .. })
        ));
        assert_eq!(check_creators(&[]), Err(ValidationError::EmptyCreators));
    }

    #[test]
    fn test_date_record_round_trip() {
        let record = date_record(DateType::Published, day(4));
        assert_eq!(date_entry(record).unwrap(), (DateType::Published, day(4)));
    }
}
