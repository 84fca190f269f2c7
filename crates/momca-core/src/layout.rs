//! # Storage Layout
//!
//! Where MOM-CA keeps its collections inside the XML database. The
//! collection names are fixed by the MOM-CA application; only the
//! database root varies between installations and is configurable.

use serde::{Deserialize, Serialize};

/// Database root used by a stock MOM-CA installation.
pub const DEFAULT_DATABASE_ROOT: &str = "/db/mom-data";

/// Well-known top-level collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceRoot {
    /// Published archive descriptions.
    Archives,
    /// Published fond descriptions.
    Fonds,
    /// Published collection descriptions.
    Collections,
    /// Published charters.
    PublicCharters,
    /// Charters imported but not yet published.
    ImportedCharters,
    /// Charters checked out for editing by a user.
    SavedCharters,
    /// Per-user data (private charters live below it).
    Users,
    /// Published private collections.
    MyCollections,
    /// Portal-wide data (countries, subdivisions).
    Portal,
}

impl ResourceRoot {
    /// The collection name below the database root.
    pub fn collection_name(&self) -> &'static str {
        match self {
            Self::Archives => "metadata.archive.public",
            Self::Fonds => "metadata.fond.public",
            Self::Collections => "metadata.collection.public",
            Self::PublicCharters => "metadata.charter.public",
            Self::ImportedCharters => "metadata.charter.import",
            Self::SavedCharters => "metadata.charter.saved",
            Self::Users => "xrx.user",
            Self::MyCollections => "metadata.mycollection.public",
            Self::Portal => "metadata.portal.public",
        }
    }
}

impl std::fmt::Display for ResourceRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection_name())
    }
}

/// Name of the per-user collection holding a user's private charters.
pub const PRIVATE_CHARTER_COLLECTION: &str = "metadata.charter";

/// Installation-specific storage configuration.
///
/// Loaded from YAML, e.g.
///
/// ```yaml
/// database_root: /db/mom-data
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLayout {
    /// Absolute path of the MOM-CA data collection, without trailing `/`.
    #[serde(default = "default_database_root")]
    pub database_root: String,
}

fn default_database_root() -> String {
    DEFAULT_DATABASE_ROOT.to_string()
}

impl Default for StoreLayout {
    fn default() -> Self {
        Self {
            database_root: default_database_root(),
        }
    }
}

impl StoreLayout {
    /// Parse a layout from YAML. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let mut layout: Self = serde_yaml::from_str(yaml)?;
        let trimmed = layout.database_root.trim_end_matches('/').len();
        layout.database_root.truncate(trimmed);
        Ok(layout)
    }

    /// Absolute path of a path relative to the database root.
    pub fn absolute(&self, relative: &str) -> String {
        format!("{}/{}", self.database_root, relative.trim_start_matches('/'))
    }

    /// Absolute path of a well-known root collection.
    pub fn root_uri(&self, root: ResourceRoot) -> String {
        self.absolute(root.collection_name())
    }
}
