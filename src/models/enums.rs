//! Controlled vocabularies
//!
//! Each enum maps to the exact wire value HydroShare uses: a vocabulary URI
//! for the URI-valued enums, a plain string for the rest.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rdf::namespace::{dcterms, hsterms};
use crate::schema::Value;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident ($wire:ident) {
            $($variant:ident => $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire value
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            /// Look up a variant by its wire value
            pub fn parse(value: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.as_str() == value)
            }

            pub fn to_value(self) -> Value {
                Value::$wire(self.as_str().to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Coverage discriminator
    CoverageType (Uri) {
        Point => dcterms!("point"),
        Box => dcterms!("box"),
        Period => dcterms!("period"),
    }
}

vocabulary! {
    /// Spatial reference discriminator
    SpatialReferenceType (Uri) {
        Point => hsterms!("point"),
        Box => hsterms!("box"),
    }
}

vocabulary! {
    DateType (Uri) {
        Created => dcterms!("created"),
        Modified => dcterms!("modified"),
        Published => dcterms!("published"),
        Available => dcterms!("available"),
        Valid => dcterms!("valid"),
        ReviewStarted => hsterms!("reviewStarted"),
    }
}

vocabulary! {
    /// Relation predicates a resource may carry
    RelationType (Uri) {
        IsPartOf => dcterms!("isPartOf"),
        HasPart => dcterms!("hasPart"),
        IsExecutedBy => hsterms!("isExecutedBy"),
        IsCreatedBy => hsterms!("isCreatedBy"),
        IsVersionOf => dcterms!("isVersionOf"),
        IsReplacedBy => dcterms!("isReplacedBy"),
        IsDescribedBy => hsterms!("isDescribedBy"),
        ConformsTo => dcterms!("conformsTo"),
        HasFormat => dcterms!("hasFormat"),
        IsFormatOf => dcterms!("isFormatOf"),
        IsRequiredBy => dcterms!("isRequiredBy"),
        Requires => dcterms!("requires"),
        IsReferencedBy => dcterms!("isReferencedBy"),
        References => dcterms!("references"),
        Replaces => dcterms!("replaces"),
        Source => dcterms!("source"),
    }
}

vocabulary! {
    /// Data type of a multidimensional variable
    VariableType (String) {
        Char => "Char",
        Byte => "Byte",
        Short => "Short",
        Int => "Int",
        Float => "Float",
        Double => "Double",
        Int64 => "Int64",
        UnsignedByte => "Unsigned Byte",
        UnsignedShort => "Unsigned Short",
        UnsignedInt => "Unsigned Integer",
        UnsignedInt64 => "Unsigned 64-bit Integer",
        String => "String",
        UserDefined => "User Defined Type",
        Unknown => "Unknown",
    }
}

vocabulary! {
    AggregationType (Uri) {
        GeographicRaster => hsterms!("GeographicRasterAggregation"),
        GeographicFeature => hsterms!("GeographicFeatureAggregation"),
        Multidimensional => hsterms!("MultidimensionalAggregation"),
        ReferencedTimeSeries => hsterms!("ReferencedTimeSeriesAggregation"),
        FileSet => hsterms!("FileSetAggregation"),
        SingleFile => hsterms!("SingleFileAggregation"),
        TimeSeries => hsterms!("TimeSeriesAggregation"),
    }
}

impl AggregationType {
    /// Extension of the file that identifies an aggregation of this type
    pub fn main_file_extension(self) -> Option<&'static str> {
        match self {
            AggregationType::GeographicRaster => Some(".vrt"),
            AggregationType::GeographicFeature => Some(".shp"),
            AggregationType::Multidimensional => Some(".nc"),
            AggregationType::TimeSeries => Some(".sqlite"),
            AggregationType::ReferencedTimeSeries => Some(".refts.json"),
            AggregationType::FileSet | AggregationType::SingleFile => None,
        }
    }
}

vocabulary! {
    /// External identifier schemes for people
    UserIdentifierType (String) {
        Orcid => "ORCID",
        GoogleScholarId => "GoogleScholarID",
        ResearchGateId => "ResearchGateID",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(CoverageType::Box.as_str(), "http://purl.org/dc/terms/box");
        assert_eq!(SpatialReferenceType::Point.as_str(), "http://hydroshare.org/terms/point");
        assert_eq!(
            DateType::ReviewStarted.as_str(),
            "http://hydroshare.org/terms/reviewStarted"
        );
        assert_eq!(RelationType::ALL.len(), 16);
        assert_eq!(VariableType::UnsignedInt.to_string(), "Unsigned Integer");
    }

    #[test]
    fn test_parse_wire_value() {
        assert_eq!(
            DateType::parse("http://purl.org/dc/terms/created"),
            Some(DateType::Created)
        );
        assert_eq!(DateType::parse("created"), None);
        assert_eq!(
            AggregationType::parse("http://hydroshare.org/terms/TimeSeriesAggregation"),
            Some(AggregationType::TimeSeries)
        );
    }

    #[test]
    fn test_uri_enums_encode_as_uri() {
        assert!(matches!(CoverageType::Period.to_value(), Value::Uri(_)));
        assert!(matches!(VariableType::Double.to_value(), Value::String(_)));
    }

    #[test]
    fn test_main_file_extensions() {
        assert_eq!(AggregationType::GeographicRaster.main_file_extension(), Some(".vrt"));
        assert_eq!(
            AggregationType::ReferencedTimeSeries.main_file_extension(),
            Some(".refts.json")
        );
        assert_eq!(AggregationType::FileSet.main_file_extension(), None);
        assert_eq!(AggregationType::SingleFile.main_file_extension(), None);
    }
}
