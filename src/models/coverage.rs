//! Coverage and spatial reference shapes
//!
//! Each concrete shape travels as a packed string under `rdf:value`; the
//! sibling `rdf:type` names the shape and is read first to pick the decoder.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::schemas::{COVERAGE, SPATIAL_REFERENCE};
use super::{CoverageType, RecordModel, SpatialReferenceType};
use crate::error::ValidationError;
use crate::schema::{
    datetime_text, float_text, format_datetime, PackedFields, PackedRecord, Record,
    SchemaDescriptor, Value,
};

fn check_bounds(north: f64, south: f64) -> Result<(), ValidationError> {
    if north < south {
        return Err(ValidationError::InvalidBoxBounds { north, south });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCoverage {
    pub name: Option<String>,
    pub east: f64,
    pub north: f64,
    pub units: String,
    pub projection: Option<String>,
}

impl PackedRecord for PointCoverage {
    fn to_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("name", self.name.clone()),
            ("east", float_text(Some(self.east))),
            ("north", float_text(Some(self.north))),
            ("units", Some(self.units.clone())),
            ("projection", self.projection.clone()),
        ]
    }

    fn from_fields(fields: &mut PackedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: fields.string("name"),
            east: fields.required_float("east")?,
            north: fields.required_float("north")?,
            units: fields.required_string("units")?,
            projection: fields.string("projection"),
        })
    }
}

/// Bounding box; `northlimit` may not be below `southlimit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxCoverage {
    pub name: Option<String>,
    pub northlimit: f64,
    pub eastlimit: f64,
    pub southlimit: f64,
    pub westlimit: f64,
    pub units: String,
    pub projection: Option<String>,
}

impl BoxCoverage {
    pub fn new(
        northlimit: f64,
        eastlimit: f64,
        southlimit: f64,
        westlimit: f64,
        units: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let coverage = Self {
            name: None,
            northlimit,
            eastlimit,
            southlimit,
            westlimit,
            units: units.into(),
            projection: None,
        };
        coverage.validate()?;
        Ok(coverage)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_bounds(self.northlimit, self.southlimit)
    }
}

impl PackedRecord for BoxCoverage {
    fn to_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("name", self.name.clone()),
            ("northlimit", float_text(Some(self.northlimit))),
            ("eastlimit", float_text(Some(self.eastlimit))),
            ("southlimit", float_text(Some(self.southlimit))),
            ("westlimit", float_text(Some(self.westlimit))),
            ("units", Some(self.units.clone())),
            ("projection", self.projection.clone()),
        ]
    }

    fn from_fields(fields: &mut PackedFields) -> Result<Self, ValidationError> {
        let coverage = Self {
            name: fields.string("name"),
            northlimit: fields.required_float("northlimit")?,
            eastlimit: fields.required_float("eastlimit")?,
            southlimit: fields.required_float("southlimit")?,
            westlimit: fields.required_float("westlimit")?,
            units: fields.required_string("units")?,
            projection: fields.string("projection"),
        };
        coverage.validate()?;
        Ok(coverage)
    }
}

/// Temporal extent; `start` may not be after `end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodCoverage {
    pub name: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub scheme: Option<String>,
}

impl PeriodCoverage {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ValidationError> {
        let period = Self {
            name: None,
            start,
            end,
            scheme: None,
        };
        period.validate()?;
        Ok(period)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start > self.end {
            return Err(ValidationError::InvalidPeriod {
                start: format_datetime(&self.start),
                end: format_datetime(&self.end),
            });
        }
        Ok(())
    }
}

impl PackedRecord for PeriodCoverage {
    fn to_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("name", self.name.clone()),
            ("start", datetime_text(&self.start)),
            ("end", datetime_text(&self.end)),
            ("scheme", self.scheme.clone()),
        ]
    }

    fn from_fields(fields: &mut PackedFields) -> Result<Self, ValidationError> {
        let period = Self {
            name: fields.string("name"),
            start: fields.required_datetime("start")?,
            end: fields.required_datetime("end")?,
            scheme: fields.string("scheme"),
        };
        period.validate()?;
        Ok(period)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSpatialReference {
    pub name: Option<String>,
    pub east: f64,
    pub north: f64,
    pub units: String,
    pub projection: Option<String>,
    pub projection_string: Option<String>,
    pub projection_string_type: Option<String>,
}

impl PackedRecord for PointSpatialReference {
    fn to_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("name", self.name.clone()),
            ("east", float_text(Some(self.east))),
            ("north", float_text(Some(self.north))),
            ("units", Some(self.units.clone())),
            ("projection", self.projection.clone()),
            ("projection_string", self.projection_string.clone()),
            ("projection_string_type", self.projection_string_type.clone()),
        ]
    }

    fn from_fields(fields: &mut PackedFields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: fields.string("name"),
            east: fields.required_float("east")?,
            north: fields.required_float("north")?,
            units: fields.required_string("units")?,
            projection: fields.string("projection"),
            projection_string: fields.string("projection_string"),
            projection_string_type: fields.string("projection_string_type"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpatialReference {
    pub name: Option<String>,
    pub northlimit: f64,
    pub eastlimit: f64,
    pub southlimit: f64,
    pub westlimit: f64,
    pub units: String,
    pub projection: Option<String>,
    pub projection_string: Option<String>,
    pub projection_string_type: Option<String>,
    pub datum: Option<String>,
}

impl BoxSpatialReference {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_bounds(self.northlimit, self.southlimit)
    }
}

impl PackedRecord for BoxSpatialReference {
    fn to_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("name", self.name.clone()),
            ("northlimit", float_text(Some(self.northlimit))),
            ("eastlimit", float_text(Some(self.eastlimit))),
            ("southlimit", float_text(Some(self.southlimit))),
            ("westlimit", float_text(Some(self.westlimit))),
            ("units", Some(self.units.clone())),
            ("projection", self.projection.clone()),
            ("projection_string", self.projection_string.clone()),
            ("projection_string_type", self.projection_string_type.clone()),
            ("datum", self.datum.clone()),
        ]
    }

    fn from_fields(fields: &mut PackedFields) -> Result<Self, ValidationError> {
        let reference = Self {
            name: fields.string("name"),
            northlimit: fields.required_float("northlimit")?,
            eastlimit: fields.required_float("eastlimit")?,
            southlimit: fields.required_float("southlimit")?,
            westlimit: fields.required_float("westlimit")?,
            units: fields.required_string("units")?,
            projection: fields.string("projection"),
            projection_string: fields.string("projection_string"),
            projection_string_type: fields.string("projection_string_type"),
            datum: fields.string("datum"),
        };
        reference.validate()?;
        Ok(reference)
    }
}

/// Any coverage as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Coverage {
    Point(PointCoverage),
    Box(BoxCoverage),
    Period(PeriodCoverage),
}

impl Coverage {
    pub fn coverage_type(&self) -> CoverageType {
        match self {
            Coverage::Point(_) => CoverageType::Point,
            Coverage::Box(_) => CoverageType::Box,
            Coverage::Period(_) => CoverageType::Period,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Coverage::Point(_) => Ok(()),
            Coverage::Box(coverage) => coverage.validate(),
            Coverage::Period(period) => period.validate(),
        }
    }

    fn pack(&self) -> String {
        match self {
            Coverage::Point(point) => point.pack(),
            Coverage::Box(coverage) => coverage.pack(),
            Coverage::Period(period) => period.pack(),
        }
    }
}

impl RecordModel for Coverage {
    fn descriptor() -> &'static SchemaDescriptor {
        &COVERAGE
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        self.validate()?;
        let mut record = Record::new(Self::descriptor());
        record.set("type", self.coverage_type().to_value());
        record.set("value", Value::String(self.pack()));
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        let discriminator = record.require_string("type")?;
        let coverage_type = CoverageType::parse(&discriminator).ok_or_else(|| {
            ValidationError::UnknownDiscriminator {
                field: "coverage".to_string(),
                value: discriminator.clone(),
            }
        })?;
        let value = record.require_string("value")?;
        Ok(match coverage_type {
            CoverageType::Point => Coverage::Point(PointCoverage::unpack(&value)?),
            CoverageType::Box => Coverage::Box(BoxCoverage::unpack(&value)?),
            CoverageType::Period => Coverage::Period(PeriodCoverage::unpack(&value)?),
        })
    }
}

/// The single spatial coverage an owner may hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SpatialCoverage {
    Point(PointCoverage),
    Box(BoxCoverage),
}

impl SpatialCoverage {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            SpatialCoverage::Point(_) => Ok(()),
            SpatialCoverage::Box(coverage) => coverage.validate(),
        }
    }
}

impl From<SpatialCoverage> for Coverage {
    fn from(coverage: SpatialCoverage) -> Self {
        match coverage {
            SpatialCoverage::Point(point) => Coverage::Point(point),
            SpatialCoverage::Box(coverage) => Coverage::Box(coverage),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SpatialReference {
    Point(PointSpatialReference),
    Box(BoxSpatialReference),
}

impl SpatialReference {
    pub fn reference_type(&self) -> SpatialReferenceType {
        match self {
            SpatialReference::Point(_) => SpatialReferenceType::Point,
            SpatialReference::Box(_) => SpatialReferenceType::Box,
        }
    }
}

impl RecordModel for SpatialReference {
    fn descriptor() -> &'static SchemaDescriptor {
        &SPATIAL_REFERENCE
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let packed = match self {
            SpatialReference::Point(point) => point.pack(),
            SpatialReference::Box(reference) => {
                reference.validate()?;
                reference.pack()
            }
        };
        let mut record = Record::new(Self::descriptor());
        record.set("type", self.reference_type().to_value());
        record.set("value", Value::String(packed));
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        let discriminator = record.require_string("type")?;
        let reference_type = SpatialReferenceType::parse(&discriminator).ok_or_else(|| {
            ValidationError::UnknownDiscriminator {
                field: "spatial reference".to_string(),
                value: discriminator.clone(),
            }
        })?;
        let value = record.require_string("value")?;
        Ok(match reference_type {
            SpatialReferenceType::Point => {
                SpatialReference::Point(PointSpatialReference::unpack(&value)?)
            }
            SpatialReferenceType::Box => SpatialReference::Box(BoxSpatialReference::unpack(&value)?),
        })
    }
}
