//! Creators and contributors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::schemas::{CONTRIBUTOR, CREATOR};
use super::{NodeId, RecordModel, UserIdentifierType};
use crate::error::ValidationError;
use crate::schema::{Record, SchemaDescriptor, Value};

/// A person or organization credited on a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub organization: Option<String>,
    pub email: Option<String>,
    pub homepage: Option<String>,
    pub hydroshare_user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub identifiers: BTreeMap<UserIdentifierType, String>,
}

fn identifier_field(kind: UserIdentifierType) -> &'static str {
    match kind {
        UserIdentifierType::Orcid => "orcid",
        UserIdentifierType::GoogleScholarId => "google_scholar_id",
        UserIdentifierType::ResearchGateId => "research_gate_id",
    }
}

impl Party {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    fn write(&self, record: &mut Record) {
        record.set_opt("name", self.name.as_ref());
        record.set_opt("phone", self.phone.as_ref());
        record.set_opt("address", self.address.as_ref());
        record.set_opt("organization", self.organization.as_ref());
        record.set_opt("email", self.email.as_ref());
        record.set_opt("homepage", self.homepage.clone().map(Value::Uri));
        record.set_opt("hydroshare_user_id", self.hydroshare_user_id);
        for (kind, value) in &self.identifiers {
            record.set(identifier_field(*kind), Value::uri(value.as_str()));
        }
    }

    fn read(record: &mut Record) -> Result<Self, ValidationError> {
        let mut identifiers = BTreeMap::new();
        for kind in UserIdentifierType::ALL {
            if let Some(value) = record.take_string(identifier_field(*kind))? {
                identifiers.insert(*kind, value);
            }
        }
        Ok(Self {
            name: record.take_string("name")?,
            phone: record.take_string("phone")?,
            address: record.take_string("address")?,
            organization: record.take_string("organization")?,
            email: record.take_string("email")?,
            homepage: record.take_string("homepage")?,
            hydroshare_user_id: record.take_integer("hydroshare_user_id")?,
            identifiers,
        })
    }
}

/// Resource author; `creator_order` fixes the author position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub creator_order: Option<u32>,
    #[serde(flatten)]
    pub party: Party,
    #[serde(skip)]
    pub node: NodeId,
}

impl Creator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            creator_order: None,
            party: Party::named(name),
            node: NodeId::new(),
        }
    }

    pub fn organization(organization: impl Into<String>) -> Self {
        Self {
            creator_order: None,
            party: Party {
                organization: Some(organization.into()),
                ..Party::default()
            },
            node: NodeId::new(),
        }
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.creator_order = Some(order);
        self
    }
}

impl RecordModel for Creator {
    fn descriptor() -> &'static SchemaDescriptor {
        &CREATOR
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        record.set_opt("creator_order", self.creator_order);
        self.party.write(&mut record);
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        let node = NodeId::from(&record);
        let creator_order = record
            .take_integer("creator_order")?
            .map(|order| {
                u32::try_from(order).map_err(|_| {
                    ValidationError::invalid("creator_order", order, "not a positive order")
                })
            })
            .transpose()?;
        Ok(Self {
            creator_order,
            party: Party::read(&mut record)?,
            node,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    #[serde(flatten)]
    pub party: Party,
    #[serde(skip)]
    pub node: NodeId,
}

impl Contributor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            party: Party::named(name),
            node: NodeId::new(),
        }
    }
}

impl RecordModel for Contributor {
    fn descriptor() -> &'static SchemaDescriptor {
        &CONTRIBUTOR
    }

    fn to_record(&self) -> Result<Record, ValidationError> {
        let mut record = self.node.record(Self::descriptor());
        self.party.write(&mut record);
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self, ValidationError> {
        Ok(Self {
            node: NodeId::from(&record),
            party: Party::read(&mut record)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creator_record_round_trip() {
        let mut creator = Creator::new("Doe, Jane").with_order(2);
        creator.party.email = Some("jane@example.org".into());
        creator.party.hydroshare_user_id = Some(11);
        creator
            .party
            .identifiers
            .insert(UserIdentifierType::Orcid, "https://orcid.org/0000-0002-1825-0097".into());

        let record = creator.to_record().unwrap();
        assert!(matches!(record.get("orcid").map(|f| &f.values()[0]), Some(Value::Uri(_))));
        assert_eq!(Creator::from_record(record).unwrap(), creator);
    }

    #[test]
    fn test_negative_order_rejected() {
        let mut record = Record::new(&CREATOR);
        record.set("creator_order", -1i64);
        assert!(matches!(
            Creator::from_record(record),
            Err(ValidationError::InvalidValue { field, .. }) if field == "creator_order"
        ));
    }

    #[test]
    fn test_contributor_organization_only() {
        let contributor = Contributor {
            party: Party {
                organization: Some("Utah State University".into()),
                ..Party::default()
            },
            ..Contributor::default()
        };
        let record = contributor.to_record().unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(Contributor::from_record(record).unwrap(), contributor);
    }

    #[test]
    fn test_creator_keeps_its_node() {
        let creator = Creator::new("Doe, Jane");
        let first = creator.to_record().unwrap();
        let second = creator.to_record().unwrap();
        assert_eq!(first.subject(), second.subject());

        let parsed = Creator::from_record(first.clone()).unwrap();
        assert_eq!(parsed.node.subject(), first.subject());
        assert_eq!(parsed.to_record().unwrap(), first);
    }
}
