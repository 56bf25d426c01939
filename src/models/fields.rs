//! Small nested records of a resource

use serde::{Deserialize, Serialize};

use super::schemas::{AWARD_INFO, PUBLISHER, RELATION, RIGHTS};
use super::{NodeId, RecordModel, RelationType};
use crate::error::ValidationError;
use crate::schema::{Record, SchemaDescriptor, Value};

/// Rights statement and license URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rights {
    pub statement: String,
    pub url: String,
    #[serde(skip)]
    pub node: NodeId,
}

impl Rights {
    pub fn new(statement: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            url: url.into(),
            node: NodeId::new(),
        }
    }

    pub fn creative_commons_attribution() -> Self {
        Self::new(
            "This resource is shared under the Creative Commons Attribution CC BY.",
            "http://creativecommons.org/licenses/by/4.0/",
        )
    }
}

impl RecordModel for Rights {
    fn descriptor() -> &'static SchemaDescriptor {
        &RIGHTS
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("statement", self.statement.as_str());
        record.set("url", Value::uri(self.url.as_str()));
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            statement: record.require_string("statement")?,
            url: record.require_string("url")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub name: String,
    pub url: String,
    #[serde(skip)]
    pub node: NodeId,
}

impl Publisher {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            node: NodeId::new(),
        }
    }
}

impl RecordModel for Publisher {
    fn descriptor() -> &'static SchemaDescriptor {
        &PUBLISHER
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("name", self.name.as_str());
        record.set("url", Value::uri(self.url.as_str()));
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            name: record.require_string("name")?,
            url: record.require_string("url")?,
        })
    }
}

/// Funding award
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardInfo {
    pub funding_agency_name: String,
    pub title: Option<String>,
    pub number: Option<String>,
    pub funding_agency_url: Option<String>,
    #[serde(skip)]
    pub node: NodeId,
}

impl AwardInfo {
    pub fn new(funding_agency_name: impl Into<String>) -> Self {
        Self {
            funding_agency_name: funding_agency_name.into(),
            title: None,
            number: None,
            funding_agency_url: None,
            node: NodeId::new(),
        }
    }
}

impl RecordModel for AwardInfo {
    fn descriptor() -> &'static SchemaDescriptor {
        &AWARD_INFO
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set("funding_agency_name", self.funding_agency_name.as_str());
        record.set_opt("title", self.title.as_ref());
        record.set_opt("number", self.number.as_ref());
        record.set_opt("funding_agency_url", self.funding_agency_url.clone().map(Value::Uri));
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            funding_agency_name: record.require_string("funding_agency_name")?,
            title: record.take_string("title")?,
            number: record.take_string("number")?,
            funding_agency_url: record.take_string("funding_agency_url")?,
        })
    }
}

/// A typed link from the resource to another work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    pub value: String,
    #[serde(skip)]
    pub node: NodeId,
}

impl Relation {
    pub fn new(relation_type: RelationType, value: impl Into<String>) -> Self {
        Self {
            relation_type,
            value: value.into(),
            node: NodeId::new(),
        }
    }
}

impl RecordModel for Relation {
    fn descriptor() -> &'static SchemaDescriptor {
        &RELATION
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let field = RELATION
            .fields
            .iter()
            .find(|field| field.predicate == Some(self.relation_type.as_str()))
            .ok_or_else(|| {
                ValidationError::invalid("relation", self.relation_type, "no wire field")
            })?;
        let mut record = self.node.record(Self::descriptor());
        record.set(field.name, self.value.as_str());
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        if record.len() != 1 {
            return Err(ValidationError::InvalidRelation(record.len()));
        }
        let field = RELATION
            .fields
            .iter()
            .find(|field| record.get(field.name).is_some())
            .ok_or(ValidationError::InvalidRelation(0))?;
        let relation_type = field
            .predicate
            .and_then(RelationType::parse)
            .ok_or_else(|| ValidationError::invalid("relation", field.name, "unknown relation"))?;
        Ok(Self {
            node: NodeId::from(&record),
            relation_type,
            value: record.require_string(field.name)?,
        })
    }
}
