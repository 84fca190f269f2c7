//! # Charters
//!
//! A [`Charter`] is an atom resource with a [`CharterId`] and a
//! [`CharterStatus`]. Where it lives is a pure function of id, status and
//! creator; every change to one of those recomputes the location and moves
//! the backing resource along with it.

use tracing::debug;

use momca_core::{
    CharterId, CharterLocation, CharterStatus, MomcaError, ResourceId, StoreLayout, TypedAtomId,
    UserId,
};

use crate::atom::AtomResource;
use crate::error::ResourceError;
use crate::exist::ExistResource;

/// A charter document and its lifecycle status.
#[derive(Debug)]
pub struct Charter {
    atom: AtomResource,
    id: CharterId,
    status: CharterStatus,
    layout: StoreLayout,
}

impl Charter {
    /// Wrap a stored charter. The status is inferred from the parent path.
    ///
    /// # Errors
    ///
    /// `Identity(TypeMismatch)` if the embedded id is not a charter id.
    pub fn from_resource(
        resource: ExistResource,
        layout: StoreLayout,
    ) -> Result<Self, ResourceError> {
        let status = CharterStatus::detect(resource.parent_path());
        let atom = AtomResource::from_resource(resource)?;
        let id = match atom.id() {
            ResourceId::Charter(id) => id.clone(),
            other => {
                return Err(MomcaError::TypeMismatch {
                    value: other.to_string(),
                    expected: CharterId::RESOURCE_TYPE,
                    found: other.resource_type(),
                }
                .into())
            }
        };
        debug!(id = %id, status = %status, "read charter");
        Ok(Self {
            atom,
            id,
            status,
            layout,
        })
    }

    /// Create a new charter at the location its id and status dictate.
    ///
    /// # Errors
    ///
    /// `Identity(MissingOwner)` for a private charter without creator.
    pub fn new(
        id: CharterId,
        status: CharterStatus,
        creator: Option<UserId>,
        layout: StoreLayout,
    ) -> Result<Self, ResourceError> {
        let location = CharterLocation::resolve(&id, status, creator.as_ref())?;
        let mut atom = AtomResource::create(
            id.clone().into(),
            creator,
            &location.absolute_parent(&layout),
        )?;
        atom.relocate(location.file_name(), &location.absolute_parent(&layout));
        debug!(id = %id, status = %status, uri = %atom.resource().uri(), "created charter");
        Ok(Self {
            atom,
            id,
            status,
            layout,
        })
    }

    pub fn id(&self) -> &CharterId {
        &self.id
    }

    pub fn status(&self) -> CharterStatus {
        self.status
    }

    pub fn creator(&self) -> Option<&UserId> {
        self.atom.creator()
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn atom(&self) -> &AtomResource {
        &self.atom
    }

    pub fn resource(&self) -> &ExistResource {
        self.atom.resource()
    }

    /// Location derived from the current id, status and creator.
    pub fn location(&self) -> Result<CharterLocation, MomcaError> {
        CharterLocation::resolve(&self.id, self.status, self.atom.creator())
    }

    /// Move the charter to another status.
    pub fn set_status(&mut self, status: CharterStatus) -> Result<(), ResourceError> {
        let location = CharterLocation::resolve(&self.id, status, self.atom.creator())?;
        debug!(id = %self.id, from = %self.status, to = %status, "changing charter status");
        self.status = status;
        self.move_to(&location);
        Ok(())
    }

    /// Rename the charter, keeping its archive/fond or collection.
    pub fn set_identifier(&mut self, identifier: &str) -> Result<(), ResourceError> {
        let id = self.id.with_charter_identifier(identifier)?;
        let location = CharterLocation::resolve(&id, self.status, self.atom.creator())?;
        self.atom.set_id(id.clone().into())?;
        self.id = id;
        self.move_to(&location);
        Ok(())
    }

    /// Change the creator. Private charters move to the new owner's space.
    pub fn set_creator(&mut self, creator: Option<UserId>) -> Result<(), ResourceError> {
        let location = CharterLocation::resolve(&self.id, self.status, creator.as_ref())?;
        self.atom.set_creator(creator)?;
        self.move_to(&location);
        Ok(())
    }

    /// Give up the charter view, keeping the relocated resource.
    pub fn into_resource(self) -> ExistResource {
        self.atom.into_resource()
    }

    fn move_to(&mut self, location: &CharterLocation) {
        self.atom
            .relocate(location.file_name(), &location.absolute_parent(&self.layout));
    }
}
