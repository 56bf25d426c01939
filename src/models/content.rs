//! Content descriptions of geographic and multidimensional aggregations

use serde::{Deserialize, Serialize};

use super::schemas::{
    BAND_INFORMATION, CELL_INFORMATION, FIELD_INFORMATION, GEOMETRY_INFORMATION, VARIABLE,
};
use super::{NodeId, RecordModel, VariableType};
use crate::error::ValidationError;
use crate::schema::{Record, SchemaDescriptor};

/// Raster band
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandInformation {
    pub name: String,
    pub variable_name: Option<String>,
    pub variable_unit: Option<String>,
    pub no_data_value: Option<String>,
    pub maximum_value: Option<String>,
    pub comment: Option<String>,
    pub method: Option<String>,
    pub minimum_value: Option<String>,
    #[serde(skip)]
    pub node: NodeId,
}

impl RecordModel for BandInformation {
    fn descriptor() -> &'static SchemaDescriptor {
        &BAND_INFORMATION
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("name", self.name.as_str());
        record.set_opt("variable_name", self.variable_name.as_ref());
        record.set_opt("variable_unit", self.variable_unit.as_ref());
        record.set_opt("no_data_value", self.no_data_value.as_ref());
        record.set_opt("maximum_value", self.maximum_value.as_ref());
        record.set_opt("comment", self.comment.as_ref());
        record.set_opt("method", self.method.as_ref());
        record.set_opt("minimum_value", self.minimum_value.as_ref());
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            name: record.require_string("name")?,
            variable_name: record.take_string("variable_name")?,
            variable_unit: record.take_string("variable_unit")?,
            no_data_value: record.take_string("no_data_value")?,
            maximum_value: record.take_string("maximum_value")?,
            comment: record.take_string("comment")?,
            method: record.take_string("method")?,
            minimum_value: record.take_string("minimum_value")?,
        })
    }
}

/// Raster grid geometry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellInformation {
    pub name: String,
    pub rows: Option<i64>,
    pub columns: Option<i64>,
    pub cell_size_x_value: Option<f64>,
    pub cell_data_type: Option<String>,
    pub cell_size_y_value: Option<f64>,
    #[serde(skip)]
    pub node: NodeId,
}

impl RecordModel for CellInformation {
    fn descriptor() -> &'static SchemaDescriptor {
        &CELL_INFORMATION
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("name", self.name.as_str());
        record.set_opt("rows", self.rows);
        record.set_opt("columns", self.columns);
        record.set_opt("cell_size_x_value", self.cell_size_x_value);
        record.set_opt("cell_data_type", self.cell_data_type.as_ref());
        record.set_opt("cell_size_y_value", self.cell_size_y_value);
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            name: record.require_string("name")?,
            rows: record.take_integer("rows")?,
            columns: record.take_integer("columns")?,
            cell_size_x_value: record.take_float("cell_size_x_value")?,
            cell_data_type: record.take_string("cell_data_type")?,
            cell_size_y_value: record.take_float("cell_size_y_value")?,
        })
    }
}

/// Attribute column of a feature layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldInformation {
    pub field_name: String,
    pub field_type: String,
    pub field_type_code: Option<String>,
    pub field_width: Option<i64>,
    pub field_precision: Option<i64>,
    #[serde(skip)]
    pub node: NodeId,
}

impl RecordModel for FieldInformation {
    fn descriptor() -> &'static SchemaDescriptor {
        &FIELD_INFORMATION
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("field_name", self.field_name.as_str());
        record.set("field_type", self.field_type.as_str());
        record.set_opt("field_type_code", self.field_type_code.as_ref());
        record.set_opt("field_width", self.field_width);
        record.set_opt("field_precision", self.field_precision);
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            field_name: record.require_string("field_name")?,
            field_type: record.require_string("field_type")?,
            field_type_code: record.take_string("field_type_code")?,
            field_width: record.take_integer("field_width")?,
            field_precision: record.take_integer("field_precision")?,
        })
    }
}

/// Feature layer geometry summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryInformation {
    pub feature_count: i64,
    pub geometry_type: String,
    #[serde(skip)]
    pub node: NodeId,
}

impl RecordModel for GeometryInformation {
    fn descriptor() -> &'static SchemaDescriptor {
        &GEOMETRY_INFORMATION
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("feature_count", self.feature_count);
        record.set("geometry_type", self.geometry_type.as_str());
        Ok(record)
    }

    // a zero feature count is dropped on the wire, so absence reads back as 0
    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            feature_count: record.take_integer("feature_count")?.unwrap_or_default(),
            geometry_type: record.require_string("geometry_type")?,
        })
    }
}

/// Variable of a NetCDF dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultidimensionalVariable {
    pub name: String,
    pub unit: String,
    #[serde(rename = "type")]
    pub variable_type: VariableType,
    pub shape: String,
    pub descriptive_name: Option<String>,
    pub method: Option<String>,
    pub missing_value: Option<String>,
    #[serde(skip)]
    pub node: NodeId,
}

impl RecordModel for MultidimensionalVariable {
    fn descriptor() -> &'static SchemaDescriptor {
        &VARIABLE
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("name", self.name.as_str());
        record.set("unit", self.unit.as_str());
        record.set("variable_type", self.variable_type.to_value());
        record.set("shape", self.shape.as_str());
        record.set_opt("descriptive_name", self.descriptive_name.as_ref());
        record.set_opt("method", self.method.as_ref());
        record.set_opt("missing_value", self.missing_value.as_ref());
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        let type_name = record.require_string("variable_type")?;
        let variable_type = VariableType::parse(&type_name).ok_or_else(|| {
            ValidationError::UnknownDiscriminator {
                field: "variable type".to_string(),
                value: type_name.clone(),
            }
        })?;
        Ok(Self {
            node: NodeId::from(&record),
            name: record.require_string("name")?,
            unit: record.require_string("unit")?,
            variable_type,
            shape: record.require_string("shape")?,
            descriptive_name: record.take_string("descriptive_name")?,
            method: record.take_string("method")?,
            missing_value: record.take_string("missing_value")?,
        })
    }
}
