//! # Charter Status & Location
//!
//! A charter's lifecycle status is not stored in its content. It is a
//! function of where the charter lives, and conversely the status decides
//! where it is written:
//!
//! | Status | Parent collection | File name |
//! |--------|-------------------|-----------|
//! | Public | `metadata.charter.public/<base>` | `<charter>.cei.xml` |
//! | Imported | `metadata.charter.import/<base>` | `<charter>.cei.xml` |
//! | Private | `xrx.user/<owner>/metadata.charter/<base>` | `<charter>.charter.xml` |
//! | Saved | `metadata.charter.saved` | encoded atom:id with `/` → `#`, `.xml` |
//!
//! `<base>` is the charter's base path (`archive/fond` or `collection`).
//! Saved charters share one flat collection across all users, so the
//! whole atom:id goes into the file name.
//!
//! All paths here are relative to the database root; see
//! [`StoreLayout`](crate::layout::StoreLayout) for absolute URIs.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::codec;
use crate::error::MomcaError;
use crate::ids::{CharterId, CharterShape, TypedAtomId, UserId};
use crate::layout::{ResourceRoot, StoreLayout, PRIVATE_CHARTER_COLLECTION};

/// Suffix of charters in public and import collections.
pub const CEI_SUFFIX: &str = ".cei.xml";
/// Suffix of private charters in a user's collection.
pub const PRIVATE_SUFFIX: &str = ".charter.xml";
/// Suffix of saved charters.
pub const SAVED_SUFFIX: &str = ".xml";
/// Replaces `/` in the atom:id of a saved charter's file name.
pub const SAVED_SEPARATOR: char = '#';

/// Lifecycle status of a charter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharterStatus {
    /// Imported, awaiting publication.
    Imported,
    /// In a user's private collection.
    Private,
    /// Checked out for editing.
    Saved,
    /// Published.
    Public,
}

impl CharterStatus {
    pub fn all() -> &'static [CharterStatus] {
        &[Self::Imported, Self::Private, Self::Saved, Self::Public]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Imported => "imported",
            Self::Private => "private",
            Self::Saved => "saved",
            Self::Public => "public",
        }
    }

    /// Derive the status from the parent collection a charter was read from.
    ///
    /// Checks, in order, whether the path contains the import collection,
    /// the user collection, or the saved collection; anything else is public.
    /// This is a substring test, not a segment match: a collection whose
    /// name merely contains one of the markers is classified by that marker.
    pub fn detect(parent_path: &str) -> Self {
        if parent_path.contains(ResourceRoot::ImportedCharters.collection_name()) {
            Self::Imported
        } else if parent_path.contains(ResourceRoot::Users.collection_name()) {
            Self::Private
        } else if parent_path.contains(ResourceRoot::SavedCharters.collection_name()) {
            Self::Saved
        } else {
            Self::Public
        }
    }
}

impl std::fmt::Display for CharterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharterStatus {
    type Err = MomcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| MomcaError::UnknownStatus(s.to_string()))
    }
}

/// Storage location of a charter: encoded parent collection and file name,
/// relative to the database root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharterLocation {
    parent_path: String,
    file_name: String,
}

impl CharterLocation {
    /// Compute where a charter with this id and status is stored.
    ///
    /// `owner` is only consulted for [`CharterStatus::Private`].
    ///
    /// # Errors
    ///
    /// `MissingOwner` if the status is private and no owner is given.
    pub fn resolve(
        id: &CharterId,
        status: CharterStatus,
        owner: Option<&UserId>,
    ) -> Result<Self, MomcaError> {
        let charter = codec::escape_segment(id.charter_identifier());
        let location = match status {
            CharterStatus::Public => Self {
                parent_path: format!(
                    "{}/{}",
                    ResourceRoot::PublicCharters.collection_name(),
                    encoded_base_path(id)
                ),
                file_name: format!("{charter}{CEI_SUFFIX}"),
            },
            CharterStatus::Imported => Self {
                parent_path: format!(
                    "{}/{}",
                    ResourceRoot::ImportedCharters.collection_name(),
                    encoded_base_path(id)
                ),
                file_name: format!("{charter}{CEI_SUFFIX}"),
            },
            CharterStatus::Private => {
                let owner = owner.ok_or_else(|| MomcaError::MissingOwner(id.to_string()))?;
                Self {
                    parent_path: format!(
                        "{}/{}/{}/{}",
                        ResourceRoot::Users.collection_name(),
                        codec::escape_segment(owner.as_str()),
                        PRIVATE_CHARTER_COLLECTION,
                        encoded_base_path(id)
                    ),
                    file_name: format!("{charter}{PRIVATE_SUFFIX}"),
                }
            }
            CharterStatus::Saved => Self {
                parent_path: ResourceRoot::SavedCharters.collection_name().to_string(),
                file_name: saved_file_name(id),
            },
        };
        Ok(location)
    }

    /// Encoded parent collection, relative to the database root.
    pub fn parent_path(&self) -> &str {
        &self.parent_path
    }

    /// Encoded file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Absolute parent collection URI.
    pub fn absolute_parent(&self, layout: &StoreLayout) -> String {
        layout.absolute(&self.parent_path)
    }

    /// Absolute resource URI.
    pub fn uri(&self, layout: &StoreLayout) -> String {
        format!("{}/{}", self.absolute_parent(layout), self.file_name)
    }
}

/// File name of a saved charter: the canonical atom:id with `/` replaced by
/// `#`, percent-encoded once as a whole, plus `.xml`.
///
/// Canonical text never contains a literal `#` and the encoding is not
/// preceded by a decode, so distinct ids give distinct names.
pub fn saved_file_name(id: &CharterId) -> String {
    let flattened = id.atom_id().as_str().replace('/', &SAVED_SEPARATOR.to_string());
    format!("{}{SAVED_SUFFIX}", codec::escape_segment(&flattened))
}

fn encoded_base_path(id: &CharterId) -> String {
    let segments = id.atom_id().segments();
    match id.shape() {
        CharterShape::ArchiveFond => format!(
            "{}/{}",
            codec::escape_segment(&segments[0]),
            codec::escape_segment(&segments[1])
        ),
        CharterShape::Collection => codec::escape_segment(&segments[0]),
    }
}
