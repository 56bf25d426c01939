//! ODM2 time series results

use serde::{Deserialize, Serialize};

use super::schemas::{
    METHOD, PROCESSING_LEVEL, SITE, TIME_SERIES_RESULT, TIME_SERIES_VARIABLE, UNIT,
};
use super::{put, take_model, NodeId, RecordModel};
use crate::error::ValidationError;
use crate::schema::{Record, SchemaDescriptor, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(rename = "type")]
    pub unit_type: String,
    pub name: String,
    pub abbreviation: String,
    #[serde(skip)]
    pub node: NodeId,
}

impl RecordModel for Unit {
    fn descriptor() -> &'static SchemaDescriptor {
        &UNIT
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("unit_type", self.unit_type.as_str());
        record.set("name", self.name.as_str());
        record.set("abbreviation", self.abbreviation.as_str());
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            unit_type: record.require_string("unit_type")?,
            name: record.require_string("name")?,
            abbreviation: record.require_string("abbreviation")?,
        })
    }
}

/// Monitoring site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub site_code: String,
    pub site_name: Option<String>,
    pub elevation_m: Option<f64>,
    pub elevation_datum: Option<String>,
    pub site_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(skip)]
    pub node: NodeId,
}

impl RecordModel for Site {
    fn descriptor() -> &'static SchemaDescriptor {
        &SITE
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("site_code", self.site_code.as_str());
        record.set_opt("site_name", self.site_name.as_ref());
        record.set_opt("elevation_m", self.elevation_m);
        record.set_opt("elevation_datum", self.elevation_datum.as_ref());
        record.set_opt("site_type", self.site_type.as_ref());
        record.set_opt("latitude", self.latitude);
        record.set_opt("longitude", self.longitude);
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            site_code: record.require_string("site_code")?,
            site_name: record.take_string("site_name")?,
            elevation_m: record.take_float("elevation_m")?,
            elevation_datum: record.take_string("elevation_datum")?,
            site_type: record.take_string("site_type")?,
            latitude: record.take_float("latitude")?,
            longitude: record.take_float("longitude")?,
        })
    }
}

/// Observed variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesVariable {
    pub variable_code: String,
    pub variable_name: String,
    pub variable_type: String,
    pub no_data_value: i64,
    pub variable_definition: Option<String>,
    pub speciation: Option<String>,
    #[serde(skip)]
    pub node: NodeId,
}

impl RecordModel for TimeSeriesVariable {
    fn descriptor() -> &'static SchemaDescriptor {
        &TIME_SERIES_VARIABLE
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("variable_code", self.variable_code.as_str());
        record.set("variable_name", self.variable_name.as_str());
        record.set("variable_type", self.variable_type.as_str());
        record.set("no_data_value", self.no_data_value);
        record.set_opt("variable_definition", self.variable_definition.as_ref());
        record.set_opt("speciation", self.speciation.as_ref());
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            variable_code: record.require_string("variable_code")?,
            variable_name: record.require_string("variable_name")?,
            variable_type: record.require_string("variable_type")?,
            no_data_value: record.take_integer("no_data_value")?.unwrap_or_default(),
            variable_definition: record.take_string("variable_definition")?,
            speciation: record.take_string("speciation")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub method_code: String,
    pub method_name: String,
    pub method_type: String,
    pub method_description: Option<String>,
    pub method_link: Option<String>,
    #[serde(skip)]
    pub node: NodeId,
}

impl RecordModel for Method {
    fn descriptor() -> &'static SchemaDescriptor {
        &METHOD
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("method_code", self.method_code.as_str());
        record.set("method_name", self.method_name.as_str());
        record.set("method_type", self.method_type.as_str());
        record.set_opt("method_description", self.method_description.as_ref());
        record.set_opt("method_link", self.method_link.clone().map(Value::Uri));
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            method_code: record.require_string("method_code")?,
            method_name: record.require_string("method_name")?,
            method_type: record.require_string("method_type")?,
            method_description: record.take_string("method_description")?,
            method_link: record.take_string("method_link")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingLevel {
    pub processing_level_code: String,
    pub definition: Option<String>,
    pub explanation: Option<String>,
    #[serde(skip)]
    pub node: NodeId,
}

impl RecordModel for ProcessingLevel {
    fn descriptor() -> &'static SchemaDescriptor {
        &PROCESSING_LEVEL
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("processing_level_code", self.processing_level_code.as_str());
        record.set_opt("definition", self.definition.as_ref());
        record.set_opt("explanation", self.explanation.as_ref());
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            processing_level_code: record.require_string("processing_level_code")?,
            definition: record.take_string("definition")?,
            explanation: record.take_string("explanation")?,
        })
    }
}

/// One series of an ODM2 SQLite file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesResult {
    pub series_id: String,
    pub unit: Option<Unit>,
    pub status: Option<String>,
    pub sample_medium: String,
    pub value_count: i64,
    pub aggregation_statistic: String,
    pub series_label: Option<String>,
    pub site: Site,
    pub variable: TimeSeriesVariable,
    pub method: Method,
    pub processing_level: ProcessingLevel,
    pub utc_offset: Option<f64>,
    #[serde(skip)]
    pub node: NodeId,
}

impl RecordModel for TimeSeriesResult {
    fn descriptor() -> &'static SchemaDescriptor {
        &TIME_SERIES_RESULT
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("series_id", self.series_id.as_str());
        put(&mut record, "unit", self.unit.as_ref())?;
        record.set_opt("status", self.status.as_ref());
        record.set("sample_medium", self.sample_medium.as_str());
        record.set("value_count", self.value_count);
        record.set("aggregation_statistic", self.aggregation_statistic.as_str());
        record.set_opt("series_label", self.series_label.as_ref());
        put(&mut record, "site", Some(&self.site))?;
        put(&mut record, "variable", Some(&self.variable))?;
        put(&mut record, "method", Some(&self.method))?;
        put(&mut record, "processing_level", Some(&self.processing_level))?;
        record.set_opt("utc_offset", self.utc_offset);
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        let site = take_model(&mut record, "site")?.ok_or_else(|| record.missing("site"))?;
        let variable =
            take_model(&mut record, "variable")?.ok_or_else(|| record.missing("variable"))?;
        let method = take_model(&mut record, "method")?.ok_or_else(|| record.missing("method"))?;
        let processing_level = take_model(&mut record, "processing_level")?
            .ok_or_else(|| record.missing("processing_level"))?;
        Ok(Self {
            node: NodeId::from(&record),
            series_id: record.require_string("series_id")?,
            unit: take_model(&mut record, "unit")?,
            status: record.take_string("status")?,
            sample_medium: record.require_string("sample_medium")?,
            value_count: record.take_integer("value_count")?.unwrap_or_default(),
            aggregation_statistic: record.require_string("aggregation_statistic")?,
            series_label: record.take_string("series_label")?,
            site,
            variable,
            method,
            processing_level,
            utc_offset: record.take_float("utc_offset")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> TimeSeriesResult {
        TimeSeriesResult {
            series_id: "2837b7d9-1ff4-11e8-bd2f-34e6d7b4e0d6".into(),
            unit: Some(Unit {
                unit_type: "Temperature".into(),
                name: "degree celsius".into(),
                abbreviation: "degC".into(),
                node: NodeId::new(),
            }),
            status: Some("Complete".into()),
            sample_medium: "Surface Water".into(),
            value_count: 1441,
            aggregation_statistic: "Average".into(),
            series_label: None,
            site: Site {
                site_code: "USU-LBR-Mendon".into(),
                site_name: Some("Little Bear River at Mendon Road".into()),
                elevation_m: Some(1345.0),
                latitude: Some(41.718473),
                longitude: Some(-111.946402),
                ..Site::default()
            },
            variable: TimeSeriesVariable {
                variable_code: "USU36".into(),
                variable_name: "Temperature".into(),
                variable_type: "Water Quality".into(),
                no_data_value: -9999,
                variable_definition: None,
                speciation: Some("Not Applicable".into()),
                node: NodeId::new(),
            },
            method: Method {
                method_code: "28".into(),
                method_name: "Quality Control Level 1 Data Series".into(),
                method_type: "Instrument deployment".into(),
                method_description: None,
                method_link: Some("http://www.example.com".into()),
                node: NodeId::new(),
            },
            processing_level: ProcessingLevel {
                processing_level_code: "1".into(),
                definition: Some("Quality controlled data".into()),
                explanation: None,
                node: NodeId::new(),
            },
            utc_offset: Some(-7.0),
            node: NodeId::new(),
        }
    }

    #[test]
    fn test_nested_result_record() {
        let result = sample_result();
        let record = result.to_record().unwrap();
        assert!(matches!(
            record.get("site").map(|f| &f.values()[0]),
            Some(Value::Nested(_))
        ));
        assert_eq!(TimeSeriesResult::from_record(record).unwrap(), result);
    }

    #[test]
    fn test_parsed_result_keeps_nested_nodes() {
        let record = sample_result().to_record().unwrap();
        let parsed = TimeSeriesResult::from_record(record.clone()).unwrap();
        assert_eq!(parsed.node.subject(), record.subject());
        assert_eq!(parsed.to_record().unwrap(), record);
    }

    #[test]
    fn test_result_requires_site() {
        let mut record = sample_result().to_record().unwrap();
        record.take("site");
        assert!(matches!(
            TimeSeriesResult::from_record(record),
            Err(ValidationError::MissingField { field, .. }) if field == "site"
        ));
    }
}
