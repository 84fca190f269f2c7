//! # momca-core: Identity & Addressing for MOM-CA Resources
//!
//! Every document in a MOM-CA database is addressed twice: by its
//! hierarchical location (`archive/fond/charter`) and by the `atom:id`
//! embedded in its content. This crate owns the lossless mapping between
//! the two.
//!
//! ## Key Design Principles
//!
//! 1. **Typed identifiers.** `ArchiveId`, `FondId`, `CharterId`, … wrap a
//!    validated [`AtomId`]. No bare strings for identifiers.
//!
//! 2. **Canonical text only.** An `AtomId` always holds the canonical,
//!    segment-encoded text; equality is text equality.
//!
//! 3. **Single `ResourceType` enum.** Exhaustive `match` everywhere, so a
//!    new resource kind forces every dispatch site to handle it.
//!
//! 4. **Locations are pure functions.** A charter's storage location is
//!    computed from `(CharterId, CharterStatus)`; nothing here performs I/O.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `momca-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod atom_id;
pub mod charter;
pub mod codec;
pub mod error;
pub mod ids;
pub mod layout;
pub mod resource_type;

// Re-export primary types for ergonomic imports.
pub use atom_id::{AtomId, DEFAULT_PREFIX};
pub use charter::{CharterLocation, CharterStatus};
pub use error::MomcaError;
pub use ids::{
    AnnotationImageId, ArchiveId, CharterId, CharterShape, CollectionId, FondId, MyCollectionId,
    ResourceId, SvgId, TypedAtomId, UserId,
};
pub use layout::{ResourceRoot, StoreLayout};
pub use resource_type::ResourceType;
