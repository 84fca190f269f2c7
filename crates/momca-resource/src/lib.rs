//! # momca-resource: XML Resources with Embedded Identity
//!
//! Wraps the documents of a MOM-CA database. Three layers, each adding one
//! guarantee:
//!
//! - [`ExistResource`]: well-formed XML at an encoded address, queryable
//!   with namespace-aware XPath.
//! - [`AtomResource`]: additionally carries a typed `atom:id`, read once
//!   from the content and kept in sync with it on every update.
//! - [`Charter`]: additionally has a lifecycle status, and its address
//!   follows from id, status and creator.
//!
//! ## Crate Policy
//!
//! - Depends only on `momca-core` among workspace crates.
//! - No I/O. Loading and storing `(name, parent, content)` triples is the
//!   caller's business.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod atom;
pub mod charter;
pub mod error;
pub mod exist;
pub mod query;

pub use atom::{AtomEntry, AtomResource};
pub use charter::Charter;
pub use error::ResourceError;
pub use exist::ExistResource;
pub use query::{Namespace, XpathQuery};
