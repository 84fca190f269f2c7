//! # Atom Resources
//!
//! An [`AtomResource`] is an [`ExistResource`] whose content embeds an
//! `atom:id`. The typed identifier is read from the content once, at
//! construction, and from then on the two are kept in lockstep.
//!
//! ## Invariants
//!
//! - Construction fails unless the content carries a parseable `atom:id`
//!   of a known resource type with the right number of segments.
//! - After construction the embedded `atom:id` text is the canonical text
//!   of the typed id.
//! - [`AtomResource::update`] is the only way to change the id or creator.
//!   It rewrites the document first and commits the new entry only when the
//!   rewrite succeeded, so the in-memory entry never disagrees with the
//!   content.

use chrono::{SecondsFormat, Utc};
use sxd_document::dom;
use tracing::debug;

use momca_core::{AtomId, ResourceId, UserId};

use crate::error::ResourceError;
use crate::exist::{root_element, select_elements, ExistResource};
use crate::query::{Namespace, XpathQuery};

/// Skeleton of a freshly created entry.
const ENTRY_TEMPLATE: &str = r#"<atom:entry xmlns:atom="http://www.w3.org/2005/Atom" xmlns:app="http://www.w3.org/2007/app">
  <atom:id/>
  <atom:title/>
  <atom:published/>
  <atom:updated/>
  <atom:author>
    <atom:email/>
  </atom:author>
  <app:control>
    <app:draft>no</app:draft>
  </app:control>
  <atom:content type="application/xml"/>
</atom:entry>"#;

/// Identity fields of an atom entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomEntry {
    pub id: ResourceId,
    /// Taken from `atom:author/atom:email`; absent or blank means none.
    pub creator: Option<UserId>,
}

/// An XML resource with an embedded, typed `atom:id`.
#[derive(Debug)]
pub struct AtomResource {
    resource: ExistResource,
    entry: AtomEntry,
}

impl AtomResource {
    /// Wrap a parsed resource, reading its identity from the content.
    ///
    /// Non-canonical id text (unencoded segments, surrounding whitespace) is
    /// accepted and rewritten in the content to the canonical form.
    ///
    /// # Errors
    ///
    /// `ContentValidation` if the document has no `atom:id` text,
    /// `MultipleResults` if it has several, `Identity` if the text is not a
    /// valid typed id.
    pub fn from_resource(mut resource: ExistResource) -> Result<Self, ResourceError> {
        let text = resource
            .query_unique(&XpathQuery::atom_id())?
            .ok_or_else(|| {
                ResourceError::ContentValidation(format!(
                    "no atom:id in resource {}",
                    resource.uri()
                ))
            })?;
        let id = ResourceId::try_from(AtomId::parse(text.trim())?)?;
        if text != id.atom_id().as_str() {
            debug!(embedded = %text, canonical = %id, "canonicalizing embedded atom:id");
            resource.edit(|document| write_atom_id(document, &id))?;
        }
        let creator = resource
            .query_unique(&XpathQuery::atom_email())?
            .map(|email| UserId::new(email.trim()))
            .transpose()?;
        debug!(id = %id, uri = %resource.uri(), "read atom resource");
        Ok(Self {
            resource,
            entry: AtomEntry { id, creator },
        })
    }

    /// Create a new entry for `id` in `parent_path`, named after the id's
    /// file name.
    pub fn create(
        id: ResourceId,
        creator: Option<UserId>,
        parent_path: &str,
    ) -> Result<Self, ResourceError> {
        let mut resource = ExistResource::new(&id.file_name(), parent_path, ENTRY_TEMPLATE)?;
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let published = XpathQuery::new("/*/atom:published", &[Namespace::Atom]);
        let entry = AtomEntry { id, creator };
        resource.edit(|document| {
            write_entry(document, &entry)?;
            for element in select_elements(document, &published)? {
                element.set_text(&now);
            }
            Ok(())
        })?;
        debug!(id = %entry.id, uri = %resource.uri(), "created atom resource");
        Ok(Self { resource, entry })
    }

    /// Apply `change` to a copy of the entry and write the result into the
    /// content. On any error the resource is left as it was.
    pub fn update<F>(&mut self, change: F) -> Result<(), ResourceError>
    where
        F: FnOnce(&mut AtomEntry) -> Result<(), ResourceError>,
    {
        let mut entry = self.entry.clone();
        change(&mut entry)?;
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.resource.edit(|document| {
            write_entry(document, &entry)?;
            for element in select_elements(document, &XpathQuery::atom_updated_element())? {
                element.set_text(&now);
            }
            Ok(())
        })?;
        debug!(id = %entry.id, uri = %self.resource.uri(), "updated atom entry");
        self.entry = entry;
        Ok(())
    }

    pub fn set_creator(&mut self, creator: Option<UserId>) -> Result<(), ResourceError> {
        self.update(|entry| {
            entry.creator = creator;
            Ok(())
        })
    }

    pub fn set_id(&mut self, id: ResourceId) -> Result<(), ResourceError> {
        self.update(|entry| {
            entry.id = id;
            Ok(())
        })
    }

    pub fn entry(&self) -> &AtomEntry {
        &self.entry
    }

    pub fn id(&self) -> &ResourceId {
        &self.entry.id
    }

    pub fn creator(&self) -> Option<&UserId> {
        self.entry.creator.as_ref()
    }

    /// The backing XML resource.
    pub fn resource(&self) -> &ExistResource {
        &self.resource
    }

    pub fn relocate(&mut self, name: &str, parent_path: &str) {
        self.resource.relocate(name, parent_path);
    }

    pub fn into_resource(self) -> ExistResource {
        self.resource
    }
}

/// Write id and creator into the document.
fn write_entry(document: &dom::Document<'_>, entry: &AtomEntry) -> Result<(), ResourceError> {
    write_atom_id(document, &entry.id)?;
    let email = author_email(document)?;
    email.set_text(entry.creator.as_ref().map(UserId::as_str).unwrap_or_default());
    Ok(())
}

/// Set the text of the single `atom:id` element.
fn write_atom_id(document: &dom::Document<'_>, id: &ResourceId) -> Result<(), ResourceError> {
    let ids = select_elements(document, &XpathQuery::atom_id_element())?;
    match ids.as_slice() {
        [element] => {
            element.set_text(id.atom_id().as_str());
            Ok(())
        }
        [] => Err(ResourceError::ContentValidation(
            "no atom:id element to update".to_string(),
        )),
        many => Err(ResourceError::MultipleResults {
            query: XpathQuery::atom_id_element().query().to_string(),
            count: many.len(),
        }),
    }
}

/// The entry's `atom:author/atom:email`, created if missing.
fn author_email<'d>(document: &dom::Document<'d>) -> Result<dom::Element<'d>, ResourceError> {
    let authors = select_elements(document, &XpathQuery::atom_author_element())?;
    let author = match authors.as_slice() {
        [author] => *author,
        [] => {
            let author = atom_element(document, "author");
            root_element(document)?.append_child(author);
            author
        }
        many => {
            return Err(ResourceError::MultipleResults {
                query: XpathQuery::atom_author_element().query().to_string(),
                count: many.len(),
            })
        }
    };

    let existing = author
        .children()
        .into_iter()
        .filter_map(|child| child.element())
        .find(|element| {
            let name = element.name();
            name.local_part() == "email" && name.namespace_uri() == Some(Namespace::Atom.uri())
        });
    Ok(match existing {
        Some(email) => email,
        None => {
            let email = atom_element(document, "email");
            author.append_child(email);
            email
        }
    })
}

fn atom_element<'d>(document: &dom::Document<'d>, local: &str) -> dom::Element<'d> {
    let element = document.create_element((Namespace::Atom.uri(), local));
    element.set_preferred_prefix(Some(Namespace::Atom.prefix()));
    element
}
