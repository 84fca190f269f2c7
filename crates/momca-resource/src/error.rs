//! # Resource Errors
//!
//! Failures while turning raw `(name, parent, content)` triples into
//! resources, querying them, or rewriting their content. A resource that
//! fails any check during construction does not come into existence.

use thiserror::Error;

use momca_core::MomcaError;

/// Error in resource construction, querying or mutation.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The content is not well-formed XML or lacks a required element.
    #[error("content validation failed: {0}")]
    ContentValidation(String),

    /// A query expected to yield at most one value yielded more.
    #[error("more than one result ({count}) for query '{query}'")]
    MultipleResults {
        /// The query text.
        query: String,
        /// Number of results returned.
        count: usize,
    },

    /// The query could not be compiled or evaluated.
    #[error("query '{query}' failed: {reason}")]
    Query {
        /// The query text.
        query: String,
        /// Compiler or evaluator message.
        reason: String,
    },

    /// A namespace prefix outside the known set.
    #[error("unknown namespace prefix '{0}'")]
    UnknownNamespace(String),

    /// Writing the document back to text failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] std::io::Error),

    /// The embedded identifier or a derived location is invalid.
    #[error("identity error: {0}")]
    Identity(#[from] MomcaError),
}
