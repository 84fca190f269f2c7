//! # Resource Types: Closed Registry
//!
//! Defines the `ResourceType` enum: the single list of resource kinds that
//! can appear as the type token of an atom:id. Every `match` on
//! `ResourceType` must be exhaustive, so adding a kind forces the identifier
//! dispatch and the file-suffix table to be updated at compile time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MomcaError;

/// All resource kinds addressable by an atom:id.
///
/// | Token | Suffix | Stored as |
/// |-------|--------|-----------|
/// | `archive` | `.eag.xml` | EAG archive description |
/// | `fond` | `.ead.xml` | EAD fond description |
/// | `collection` | `.cei.xml` | CEI collection description |
/// | `charter` | `.cei.xml` | CEI charter |
/// | `my_collection` | `.mycollection.xml` | private user collection |
/// | `svg` | `.svg` | image annotation graphics |
/// | `annotation_image` | `.xml` | image annotation |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// An archive (holding institution).
    Archive,
    /// A fond inside an archive.
    Fond,
    /// A collection not tied to an archive.
    Collection,
    /// A single charter.
    Charter,
    /// A private collection owned by a user.
    MyCollection,
    /// SVG graphics.
    Svg,
    /// An annotation on a charter image.
    AnnotationImage,
}

/// Number of resource types.
pub const RESOURCE_TYPE_COUNT: usize = 7;

impl ResourceType {
    /// Returns every resource type in declaration order.
    pub fn all() -> &'static [ResourceType] {
        &[
            Self::Archive,
            Self::Fond,
            Self::Collection,
            Self::Charter,
            Self::MyCollection,
            Self::Svg,
            Self::AnnotationImage,
        ]
    }

    /// The lowercase token used inside atom:ids.
    ///
    /// Matches the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Fond => "fond",
            Self::Collection => "collection",
            Self::Charter => "charter",
            Self::MyCollection => "my_collection",
            Self::Svg => "svg",
            Self::AnnotationImage => "annotation_image",
        }
    }

    /// File-name suffix used when the resource is materialized in the database.
    pub fn name_suffix(&self) -> &'static str {
        match self {
            Self::Archive => ".eag.xml",
            Self::Fond => ".ead.xml",
            Self::Collection => ".cei.xml",
            Self::Charter => ".cei.xml",
            Self::MyCollection => ".mycollection.xml",
            Self::Svg => ".svg",
            Self::AnnotationImage => ".xml",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = MomcaError;

    /// Parse a resource type from its token. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "archive" => Ok(Self::Archive),
            "fond" => Ok(Self::Fond),
            "collection" => Ok(Self::Collection),
            "charter" => Ok(Self::Charter),
            "my_collection" => Ok(Self::MyCollection),
            "svg" => Ok(Self::Svg),
            "annotation_image" => Ok(Self::AnnotationImage),
            other => Err(MomcaError::malformed(other, "unknown resource type token")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_types_count() {
        assert_eq!(ResourceType::all().len(), RESOURCE_TYPE_COUNT);
    }

    #[test]
    fn tokens_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for t in ResourceType::all() {
            assert!(seen.insert(t.as_str()), "Duplicate token: {t}");
        }
    }

    #[test]
    fn token_roundtrip() {
        for t in ResourceType::all() {
            let parsed: ResourceType = t.as_str().parse().unwrap();
            assert_eq!(*t, parsed);
        }
    }

    #[test]
    fn unknown_token_is_malformed() {
        for bad in ["", "Charter", "charters", "user"] {
            match bad.parse::<ResourceType>() {
                Err(MomcaError::MalformedIdentifier { value, .. }) => assert_eq!(value, bad),
                other => panic!("expected MalformedIdentifier for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn serde_format_matches_token() {
        for t in ResourceType::all() {
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn suffixes() {
        assert_eq!(ResourceType::Archive.name_suffix(), ".eag.xml");
        assert_eq!(ResourceType::Charter.name_suffix(), ".cei.xml");
        assert!(ResourceType::all().iter().all(|t| t.name_suffix().starts_with('.')));
    }
}
