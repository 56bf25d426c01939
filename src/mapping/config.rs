//! Mapping configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::rdf::namespace::{HSRESOURCE, HSTERMS};
use crate::rdf::{NamedNode, RdfFormat};

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config value `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Mapping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Namespace that types carrying a label are declared in
    pub vocabulary_base: String,

    /// Prefix for resource URLs built from a bare resource id
    pub resource_base: String,

    /// Base IRI for resolving relative IRIs while parsing
    pub base_iri: Option<String>,

    /// Emit `rdfs:label` / `rdfs:isDefinedBy` for labelled types
    pub emit_schema_annotations: bool,

    /// Format used when none is given or inferable
    pub default_format: RdfFormat,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            vocabulary_base: HSTERMS.to_string(),
            resource_base: HSRESOURCE.to_string(),
            base_iri: None,
            emit_schema_annotations: true,
            default_format: RdfFormat::RdfXml,
        }
    }
}

impl MappingConfig {
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let config: MappingConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Check that every IRI-valued setting is a valid IRI
    pub fn validate(&self) -> ConfigResult<()> {
        check_iri("vocabulary_base", &self.vocabulary_base)?;
        check_iri("resource_base", &self.resource_base)?;
        if let Some(base) = &self.base_iri {
            check_iri("base_iri", base)?;
        }
        Ok(())
    }

    /// URL of a resource from its id, e.g. `http://www.hydroshare.org/resource/<id>`
    pub fn resource_url(&self, id: &str) -> String {
        format!("{}{}", self.resource_base, id)
    }
}

fn check_iri(key: &'static str, value: &str) -> ConfigResult<()> {
    NamedNode::new(value)
        .map(|_| ())
        .map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
}
