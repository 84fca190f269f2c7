//! # Typed Identifiers
//!
//! Newtype wrappers over [`AtomId`] for each [`ResourceType`]. They prevent
//! identifier confusion: a `FondId` cannot be passed where a `CharterId` is
//! expected, and every wrapper has checked its type token and segment shape
//! at construction.
//!
//! | Type | Segments after the type token |
//! |------|-------------------------------|
//! | [`ArchiveId`] | archive |
//! | [`FondId`] | archive, fond |
//! | [`CollectionId`] | collection |
//! | [`CharterId`] | archive, fond, charter **or** collection, charter |
//! | [`MyCollectionId`] | private collection |
//! | [`SvgId`] | svg |
//! | [`AnnotationImageId`] | user, annotation |
//!
//! [`ResourceId`] is the closed union of all of them, built from a generic
//! `AtomId` by an exhaustive match on its type.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::atom_id::{normalize_part, AtomId};
use crate::codec;
use crate::error::MomcaError;
use crate::resource_type::ResourceType;

/// Behaviour shared by all typed atom:ids.
pub trait TypedAtomId {
    /// The resource type this wrapper accepts.
    const RESOURCE_TYPE: ResourceType;

    /// The underlying generic identifier.
    fn atom_id(&self) -> &AtomId;

    /// The resource's own (last, decoded) identifier segment.
    fn identifier(&self) -> &str {
        self.atom_id().identifier()
    }

    /// Encoded file name under which the resource is stored.
    fn file_name(&self) -> String {
        format!(
            "{}{}",
            codec::escape_segment(self.identifier()),
            Self::RESOURCE_TYPE.name_suffix()
        )
    }
}

/// Verify type token and segment count of `id` for a typed wrapper.
fn check_shape(id: &AtomId, expected: ResourceType, segments: usize) -> Result<(), MomcaError> {
    check_type(id, expected)?;
    if id.segments().len() != segments {
        return Err(MomcaError::MalformedIdentifier {
            value: id.as_str().to_string(),
            reason: format!(
                "a {expected} identifier needs {segments} segment(s), found {}",
                id.segments().len()
            ),
        });
    }
    Ok(())
}

fn check_type(id: &AtomId, expected: ResourceType) -> Result<(), MomcaError> {
    if id.resource_type() == expected {
        Ok(())
    } else {
        Err(MomcaError::TypeMismatch {
            value: id.as_str().to_string(),
            expected,
            found: id.resource_type(),
        })
    }
}

/// Conversions every typed id shares: text parsing, display, serde.
macro_rules! typed_id_conversions {
    ($name:ident) => {
        impl FromStr for $name {
            type Err = MomcaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::try_from(AtomId::parse(s)?)
            }
        }

        impl TryFrom<String> for $name {
            type Error = MomcaError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.atom_id().as_str().to_string()
            }
        }

        impl From<$name> for AtomId {
            fn from(id: $name) -> Self {
                id.atom_id().clone()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(self.atom_id(), f)
            }
        }
    };
}

// ─── Archive ─────────────────────────────────────────────────────────

/// Identifier of an archive, e.g. `tag:www.monasterium.net,2011:/archive/CH-KAE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArchiveId(AtomId);

impl ArchiveId {
    /// Build from the archive's short name.
    pub fn new(archive: &str) -> Result<Self, MomcaError> {
        Ok(Self(AtomId::from_parts(ResourceType::Archive, &[archive])?))
    }

    /// The archive's short name.
    pub fn archive_identifier(&self) -> &str {
        &self.0.segments()[0]
    }
}

impl TypedAtomId for ArchiveId {
    const RESOURCE_TYPE: ResourceType = ResourceType::Archive;

    fn atom_id(&self) -> &AtomId {
        &self.0
    }
}

impl TryFrom<AtomId> for ArchiveId {
    type Error = MomcaError;

    fn try_from(id: AtomId) -> Result<Self, Self::Error> {
        check_shape(&id, ResourceType::Archive, 1)?;
        Ok(Self(id))
    }
}

typed_id_conversions!(ArchiveId);

// ─── Fond ────────────────────────────────────────────────────────────

/// Identifier of a fond inside an archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FondId {
    id: AtomId,
    archive: ArchiveId,
}

impl FondId {
    /// Build from archive short name and fond identifier.
    pub fn new(archive: &str, fond: &str) -> Result<Self, MomcaError> {
        Self::try_from(AtomId::from_parts(ResourceType::Fond, &[archive, fond])?)
    }

    /// The owning archive.
    pub fn archive_id(&self) -> &ArchiveId {
        &self.archive
    }

    /// The fond's own identifier.
    pub fn fond_identifier(&self) -> &str {
        &self.id.segments()[1]
    }
}

impl TypedAtomId for FondId {
    const RESOURCE_TYPE: ResourceType = ResourceType::Fond;

    fn atom_id(&self) -> &AtomId {
        &self.id
    }
}

impl TryFrom<AtomId> for FondId {
    type Error = MomcaError;

    fn try_from(id: AtomId) -> Result<Self, Self::Error> {
        check_shape(&id, ResourceType::Fond, 2)?;
        let archive = ArchiveId(AtomId::from_decoded(
            ResourceType::Archive,
            vec![id.segments()[0].clone()],
        )?);
        Ok(Self { id, archive })
    }
}

typed_id_conversions!(FondId);

// ─── Collection ──────────────────────────────────────────────────────

/// Identifier of a collection (charters grouped outside an archive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionId(AtomId);

impl CollectionId {
    /// Build from the collection's identifier.
    pub fn new(collection: &str) -> Result<Self, MomcaError> {
        Ok(Self(AtomId::from_parts(ResourceType::Collection, &[collection])?))
    }

    /// The collection's identifier.
    pub fn collection_identifier(&self) -> &str {
        &self.0.segments()[0]
    }
}

impl TypedAtomId for CollectionId {
    const RESOURCE_TYPE: ResourceType = ResourceType::Collection;

    fn atom_id(&self) -> &AtomId {
        &self.0
    }
}

impl TryFrom<AtomId> for CollectionId {
    type Error = MomcaError;

    fn try_from(id: AtomId) -> Result<Self, Self::Error> {
        check_shape(&id, ResourceType::Collection, 1)?;
        Ok(Self(id))
    }
}

typed_id_conversions!(CollectionId);

// ─── Charter ─────────────────────────────────────────────────────────

/// Which hierarchy a charter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharterShape {
    /// `charter/<archive>/<fond>/<charter>`
    ArchiveFond,
    /// `charter/<collection>/<charter>`
    Collection,
}

/// Identifier of a charter.
///
/// Exactly one of [`is_part_of_archive_fond`](Self::is_part_of_archive_fond)
/// and [`is_part_of_collection`](Self::is_part_of_collection) holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharterId {
    id: AtomId,
    shape: CharterShape,
}

impl CharterId {
    /// A charter inside an archive's fond.
    pub fn in_archive_fond(archive: &str, fond: &str, charter: &str) -> Result<Self, MomcaError> {
        Self::try_from(AtomId::from_parts(
            ResourceType::Charter,
            &[archive, fond, charter],
        )?)
    }

    /// A charter inside a collection.
    pub fn in_collection(collection: &str, charter: &str) -> Result<Self, MomcaError> {
        Self::try_from(AtomId::from_parts(ResourceType::Charter, &[collection, charter])?)
    }

    /// A charter with the same archive/fond or collection and a new charter
    /// identifier.
    ///
    /// `charter` is normalized like any constructor part; the base segments
    /// are carried over unchanged.
    pub fn with_charter_identifier(&self, charter: &str) -> Result<Self, MomcaError> {
        let mut segments = self.id.segments().to_vec();
        if let Some(last) = segments.last_mut() {
            *last = normalize_part(charter)?;
        }
        Self::try_from(AtomId::from_decoded(ResourceType::Charter, segments)?)
    }

    /// Archive/fond or collection hierarchy.
    pub fn shape(&self) -> CharterShape {
        self.shape
    }

    /// The archive, for charters in a fond.
    pub fn archive_identifier(&self) -> Option<&str> {
        match self.shape {
            CharterShape::ArchiveFond => Some(&self.id.segments()[0]),
            CharterShape::Collection => None,
        }
    }

    /// The fond, for charters in a fond.
    pub fn fond_identifier(&self) -> Option<&str> {
        match self.shape {
            CharterShape::ArchiveFond => Some(&self.id.segments()[1]),
            CharterShape::Collection => None,
        }
    }

    /// The collection, for charters in a collection.
    pub fn collection_identifier(&self) -> Option<&str> {
        match self.shape {
            CharterShape::ArchiveFond => None,
            CharterShape::Collection => Some(&self.id.segments()[0]),
        }
    }

    /// The charter's own identifier.
    pub fn charter_identifier(&self) -> &str {
        self.id.identifier()
    }

    /// `archive/fond` or `collection`, decoded.
    pub fn base_path(&self) -> String {
        let s = self.id.segments();
        match self.shape {
            CharterShape::ArchiveFond => format!("{}/{}", s[0], s[1]),
            CharterShape::Collection => s[0].clone(),
        }
    }

    /// Whether the charter sits in an archive's fond.
    pub fn is_part_of_archive_fond(&self) -> bool {
        self.shape == CharterShape::ArchiveFond
    }

    /// Whether the charter sits in a collection.
    pub fn is_part_of_collection(&self) -> bool {
        self.shape == CharterShape::Collection
    }

    /// The fond holding this charter, if it belongs to one.
    pub fn fond_id(&self) -> Option<FondId> {
        match (self.archive_identifier(), self.fond_identifier()) {
            (Some(archive), Some(fond)) => {
                let segments = vec![archive.to_string(), fond.to_string()];
                AtomId::from_decoded(ResourceType::Fond, segments)
                    .and_then(FondId::try_from)
                    .ok()
            }
            _ => None,
        }
    }

    /// The collection holding this charter, if it belongs to one.
    pub fn collection_id(&self) -> Option<CollectionId> {
        self.collection_identifier().and_then(|collection| {
            AtomId::from_decoded(ResourceType::Collection, vec![collection.to_string()])
                .map(CollectionId)
                .ok()
        })
    }
}

impl TypedAtomId for CharterId {
    const RESOURCE_TYPE: ResourceType = ResourceType::Charter;

    fn atom_id(&self) -> &AtomId {
        &self.id
    }
}

impl TryFrom<AtomId> for CharterId {
    type Error = MomcaError;

    fn try_from(id: AtomId) -> Result<Self, Self::Error> {
        check_type(&id, ResourceType::Charter)?;
        let shape = match id.segments().len() {
            2 => CharterShape::Collection,
            3 => CharterShape::ArchiveFond,
            segments => {
                return Err(MomcaError::AmbiguousShape {
                    value: id.as_str().to_string(),
                    segments,
                })
            }
        };
        Ok(Self { id, shape })
    }
}

typed_id_conversions!(CharterId);

// ─── MyCollection ────────────────────────────────────────────────────

/// Identifier of a user's private collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MyCollectionId(AtomId);

impl MyCollectionId {
    /// Build from the private collection's identifier.
    pub fn new(my_collection: &str) -> Result<Self, MomcaError> {
        Ok(Self(AtomId::from_parts(
            ResourceType::MyCollection,
            &[my_collection],
        )?))
    }
}

impl TypedAtomId for MyCollectionId {
    const RESOURCE_TYPE: ResourceType = ResourceType::MyCollection;

    fn atom_id(&self) -> &AtomId {
        &self.0
    }
}

impl TryFrom<AtomId> for MyCollectionId {
    type Error = MomcaError;

    fn try_from(id: AtomId) -> Result<Self, Self::Error> {
        check_shape(&id, ResourceType::MyCollection, 1)?;
        Ok(Self(id))
    }
}

typed_id_conversions!(MyCollectionId);

// ─── Svg ─────────────────────────────────────────────────────────────

/// Identifier of an SVG graphic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SvgId(AtomId);

impl SvgId {
    /// Build from the graphic's identifier.
    pub fn new(svg: &str) -> Result<Self, MomcaError> {
        Ok(Self(AtomId::from_parts(ResourceType::Svg, &[svg])?))
    }
}

impl TypedAtomId for SvgId {
    const RESOURCE_TYPE: ResourceType = ResourceType::Svg;

    fn atom_id(&self) -> &AtomId {
        &self.0
    }
}

impl TryFrom<AtomId> for SvgId {
    type Error = MomcaError;

    fn try_from(id: AtomId) -> Result<Self, Self::Error> {
        check_shape(&id, ResourceType::Svg, 1)?;
        Ok(Self(id))
    }
}

typed_id_conversions!(SvgId);

// ─── AnnotationImage ─────────────────────────────────────────────────

/// Identifier of an image annotation, scoped to the annotating user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnnotationImageId(AtomId);

impl AnnotationImageId {
    /// Build from the annotating user and the annotation identifier.
    pub fn new(user: &str, annotation: &str) -> Result<Self, MomcaError> {
        Ok(Self(AtomId::from_parts(
            ResourceType::AnnotationImage,
            &[user, annotation],
        )?))
    }

    /// The user who owns the annotation.
    pub fn user_identifier(&self) -> &str {
        &self.0.segments()[0]
    }

    /// The annotation's own identifier.
    pub fn annotation_identifier(&self) -> &str {
        &self.0.segments()[1]
    }
}

impl TypedAtomId for AnnotationImageId {
    const RESOURCE_TYPE: ResourceType = ResourceType::AnnotationImage;

    fn atom_id(&self) -> &AtomId {
        &self.0
    }
}

impl TryFrom<AtomId> for AnnotationImageId {
    type Error = MomcaError;

    fn try_from(id: AtomId) -> Result<Self, Self::Error> {
        check_shape(&id, ResourceType::AnnotationImage, 2)?;
        Ok(Self(id))
    }
}

typed_id_conversions!(AnnotationImageId);

// ─── User ────────────────────────────────────────────────────────────

/// A MOM-CA user, identified by the account name (usually an e-mail address).
///
/// Used as the creator of atom resources and as the owner of private charters.
/// Not an atom:id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate a user identifier. Blank identifiers are rejected.
    pub fn new(identifier: impl Into<String>) -> Result<Self, MomcaError> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(MomcaError::malformed(identifier, "empty user identifier"));
        }
        Ok(Self(identifier))
    }

    /// The account name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = MomcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = MomcaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(user: UserId) -> Self {
        user.0
    }
}

// ─── Union ───────────────────────────────────────────────────────────

/// Any typed atom:id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResourceId {
    Archive(ArchiveId),
    Fond(FondId),
    Collection(CollectionId),
    Charter(CharterId),
    MyCollection(MyCollectionId),
    Svg(SvgId),
    AnnotationImage(AnnotationImageId),
}

impl ResourceId {
    /// The underlying generic identifier.
    pub fn atom_id(&self) -> &AtomId {
        match self {
            Self::Archive(id) => id.atom_id(),
            Self::Fond(id) => id.atom_id(),
            Self::Collection(id) => id.atom_id(),
            Self::Charter(id) => id.atom_id(),
            Self::MyCollection(id) => id.atom_id(),
            Self::Svg(id) => id.atom_id(),
            Self::AnnotationImage(id) => id.atom_id(),
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.atom_id().resource_type()
    }

    /// The resource's own identifier segment.
    pub fn identifier(&self) -> &str {
        self.atom_id().identifier()
    }

    /// Encoded file name under which the resource is stored.
    pub fn file_name(&self) -> String {
        match self {
            Self::Archive(id) => id.file_name(),
            Self::Fond(id) => id.file_name(),
            Self::Collection(id) => id.file_name(),
            Self::Charter(id) => id.file_name(),
            Self::MyCollection(id) => id.file_name(),
            Self::Svg(id) => id.file_name(),
            Self::AnnotationImage(id) => id.file_name(),
        }
    }

    /// The charter id, if this is one.
    pub fn as_charter(&self) -> Option<&CharterId> {
        match self {
            Self::Charter(id) => Some(id),
            _ => None,
        }
    }
}

impl TryFrom<AtomId> for ResourceId {
    type Error = MomcaError;

    fn try_from(id: AtomId) -> Result<Self, Self::Error> {
        Ok(match id.resource_type() {
            ResourceType::Archive => Self::Archive(ArchiveId::try_from(id)?),
            ResourceType::Fond => Self::Fond(FondId::try_from(id)?),
            ResourceType::Collection => Self::Collection(CollectionId::try_from(id)?),
            ResourceType::Charter => Self::Charter(CharterId::try_from(id)?),
            ResourceType::MyCollection => Self::MyCollection(MyCollectionId::try_from(id)?),
            ResourceType::Svg => Self::Svg(SvgId::try_from(id)?),
            ResourceType::AnnotationImage => {
                Self::AnnotationImage(AnnotationImageId::try_from(id)?)
            }
        })
    }
}

impl FromStr for ResourceId {
    type Err = MomcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(AtomId::parse(s)?)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = MomcaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.atom_id().as_str().to_string()
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.atom_id(), f)
    }
}

macro_rules! resource_id_from {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for ResourceId {
            fn from(id: $ty) -> Self {
                Self::$variant(id)
            }
        }
    };
}

resource_id_from!(Archive, ArchiveId);
resource_id_from!(Fond, FondId);
resource_id_from!(Collection, CollectionId);
resource_id_from!(Charter, CharterId);
resource_id_from!(MyCollection, MyCollectionId);
resource_id_from!(Svg, SvgId);
resource_id_from!(AnnotationImage, AnnotationImageId);

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION_CHARTER_ATOM_ID: &str =
        "tag:www.monasterium.net,2011:/charter/MedDocBulgEmp/1192-02-02_sic%21_Ioan_Kaliman";
    const FOND_CHARTER_ATOM_ID: &str =
        "tag:www.monasterium.net,2011:/charter/RS-IAGNS/Charters/IAGNS_F-.150_6605%7C193232";

    #[test]
    fn archive_from_parts_and_text() {
        let a = ArchiveId::new("CH-KAE").unwrap();
        assert_eq!(a.to_string(), "tag:www.monasterium.net,2011:/archive/CH-KAE");
        assert_eq!(
            a,
            "tag:www.monasterium.net,2011:/archive/CH-KAE"
                .parse::<ArchiveId>()
                .unwrap()
        );
        assert_eq!(a.archive_identifier(), "CH-KAE");
        assert_eq!(a.file_name(), "CH-KAE.eag.xml");
    }

    #[test]
    fn fond_exposes_archive() {
        let f: FondId = "tag:www.monasterium.net,2011:/fond/CH-KAE/Urkunden".parse().unwrap();
        assert_eq!(f.archive_id(), &ArchiveId::new("CH-KAE").unwrap());
        assert_eq!(f.fond_identifier(), "Urkunden");
        assert_eq!(f.identifier(), "Urkunden");
        assert_eq!(f, FondId::new("CH-KAE", "Urkunden").unwrap());
    }

    #[test]
    fn fond_rejects_archive_text() {
        let result: Result<FondId, _> = "tag:www.monasterium.net,2011:/archive/CH-KAE".parse();
        assert!(matches!(
            result,
            Err(MomcaError::TypeMismatch {
                expected: ResourceType::Fond,
                found: ResourceType::Archive,
                ..
            })
        ));
    }

    #[test]
    fn fond_rejects_wrong_segment_count() {
        let short = AtomId::parse("tag:www.monasterium.net,2011:/fond/CH-KAE").unwrap();
        assert!(matches!(
            FondId::try_from(short),
            Err(MomcaError::MalformedIdentifier { .. })
        ));
        let long = AtomId::parse("tag:www.monasterium.net,2011:/fond/a/b/c").unwrap();
        assert!(matches!(
            FondId::try_from(long),
            Err(MomcaError::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn charter_in_archive_fond() {
        let id: CharterId = FOND_CHARTER_ATOM_ID.parse().unwrap();
        assert_eq!(id.shape(), CharterShape::ArchiveFond);
        assert_eq!(id.archive_identifier(), Some("RS-IAGNS"));
        assert_eq!(id.fond_identifier(), Some("Charters"));
        assert_eq!(id.collection_identifier(), None);
        assert_eq!(id.charter_identifier(), "IAGNS_F-.150_6605|193232");
        assert_eq!(id.base_path(), "RS-IAGNS/Charters");
        assert!(id.is_part_of_archive_fond());
        assert!(!id.is_part_of_collection());
        assert_eq!(
            id,
            CharterId::in_archive_fond("RS-IAGNS", "Charters", "IAGNS_F-.150_6605|193232").unwrap()
        );
        assert_eq!(id.fond_id(), Some(FondId::new("RS-IAGNS", "Charters").unwrap()));
        assert_eq!(id.collection_id(), None);
    }

    #[test]
    fn charter_in_collection() {
        let id = CharterId::in_collection("MedDocBulgEmp", "1192-02-02_sic!_Ioan_Kaliman").unwrap();
        assert_eq!(id.to_string(), COLLECTION_CHARTER_ATOM_ID);
        assert_eq!(id.collection_identifier(), Some("MedDocBulgEmp"));
        assert_eq!(id.archive_identifier(), None);
        assert_eq!(id.fond_identifier(), None);
        assert_eq!(id.base_path(), "MedDocBulgEmp");
        assert!(id.is_part_of_collection());
        assert!(!id.is_part_of_archive_fond());
        assert_eq!(id.collection_id(), Some(CollectionId::new("MedDocBulgEmp").unwrap()));
    }

    #[test]
    fn charter_with_one_segment_is_ambiguous() {
        let id = AtomId::parse("tag:www.monasterium.net,2011:/charter/lonely").unwrap();
        assert!(matches!(
            CharterId::try_from(id),
            Err(MomcaError::AmbiguousShape { segments: 1, .. })
        ));
    }

    #[test]
    fn charter_rejects_plain_text() {
        assert!("ThisIsNotACharter".parse::<CharterId>().is_err());
    }

    #[test]
    fn charter_rename_keeps_base() {
        let id = CharterId::in_archive_fond("A", "F", "old").unwrap();
        let renamed = id.with_charter_identifier("new").unwrap();
        assert_eq!(renamed, CharterId::in_archive_fond("A", "F", "new").unwrap());
        let id = CharterId::in_collection("C", "old").unwrap();
        assert_eq!(
            id.with_charter_identifier("new").unwrap(),
            CharterId::in_collection("C", "new").unwrap()
        );
    }

    #[test]
    fn derived_ids_keep_literal_percent() {
        let fond: FondId = "tag:www.monasterium.net,2011:/fond/100%2525/F".parse().unwrap();
        assert_eq!(fond.atom_id().segments()[0], "100%25");
        assert_eq!(fond.archive_id().archive_identifier(), "100%25");
        assert_eq!(
            fond.archive_id().to_string(),
            "tag:www.monasterium.net,2011:/archive/100%2525"
        );

        let charter: CharterId = "tag:www.monasterium.net,2011:/charter/a%257Cb/c1"
            .parse()
            .unwrap();
        let renamed = charter.with_charter_identifier("c2").unwrap();
        assert_eq!(renamed.collection_identifier(), Some("a%7Cb"));
        assert_eq!(
            renamed.to_string(),
            "tag:www.monasterium.net,2011:/charter/a%257Cb/c2"
        );
        assert_eq!(
            renamed.collection_id().unwrap().collection_identifier(),
            "a%7Cb"
        );

        let in_fond: CharterId = "tag:www.monasterium.net,2011:/charter/100%2525/F%2541/1"
            .parse()
            .unwrap();
        let fond = in_fond.fond_id().unwrap();
        assert_eq!(fond.archive_id().archive_identifier(), "100%25");
        assert_eq!(fond.fond_identifier(), "F%41");
    }

    #[test]
    fn renamed_charter_identifier_is_normalized() {
        let id = CharterId::in_collection("C", "old").unwrap();
        assert_eq!(
            id.with_charter_identifier("a%7Cb").unwrap(),
            id.with_charter_identifier("a|b").unwrap()
        );
        assert!(id.with_charter_identifier("").is_err());
    }

    #[test]
    fn charter_file_name_is_encoded() {
        let id = CharterId::in_collection("C", "a|b").unwrap();
        assert_eq!(id.file_name(), "a%7Cb.cei.xml");
        let percent: CharterId = "tag:www.monasterium.net,2011:/charter/C/50%2525"
            .parse()
            .unwrap();
        assert_eq!(percent.file_name(), "50%2525.cei.xml");
    }

    #[test]
    fn annotation_image_parts() {
        let id = AnnotationImageId::new("user@example.com", "anno1").unwrap();
        assert_eq!(id.user_identifier(), "user@example.com");
        assert_eq!(id.annotation_identifier(), "anno1");
        assert_eq!(
            id.to_string(),
            "tag:www.monasterium.net,2011:/annotation_image/user%40example.com/anno1"
        );
    }

    #[test]
    fn user_id_rejects_blank() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
        assert_eq!(UserId::new("admin").unwrap().as_str(), "admin");
    }

    #[test]
    fn resource_id_dispatches_by_type() {
        let cases = [
            ("tag:www.monasterium.net,2011:/archive/A", ResourceType::Archive),
            ("tag:www.monasterium.net,2011:/fond/A/F", ResourceType::Fond),
            ("tag:www.monasterium.net,2011:/collection/C", ResourceType::Collection),
            ("tag:www.monasterium.net,2011:/charter/C/1", ResourceType::Charter),
            ("tag:www.monasterium.net,2011:/my_collection/m", ResourceType::MyCollection),
            ("tag:www.monasterium.net,2011:/svg/s", ResourceType::Svg),
            ("tag:www.monasterium.net,2011:/annotation_image/u/a", ResourceType::AnnotationImage),
        ];
        for (text, expected) in cases {
            let id: ResourceId = text.parse().unwrap();
            assert_eq!(id.resource_type(), expected);
            assert_eq!(id.to_string(), text);
        }
    }

    #[test]
    fn resource_id_propagates_shape_errors() {
        assert!("tag:www.monasterium.net,2011:/archive/A/B".parse::<ResourceId>().is_err());
        assert!("tag:www.monasterium.net,2011:/charter/A".parse::<ResourceId>().is_err());
    }

    #[test]
    fn typed_ids_serialize_as_text() {
        let id = CharterId::in_collection("C", "1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"tag:www.monasterium.net,2011:/charter/C/1\"");
        let any: ResourceId = serde_json::from_str(&json).unwrap();
        assert_eq!(any.as_charter(), Some(&id));
        assert!(serde_json::from_str::<FondId>(&json).is_err());
    }
}
