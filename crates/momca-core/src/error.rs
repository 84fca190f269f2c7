//! # Error Types: Identity & Addressing Failures
//!
//! Defines the error type used by every identity primitive in this crate.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Identifier errors carry the offending input verbatim so that the
//!   caller can report which stored document is broken.
//! - Nothing here is retried or coerced. A malformed identifier is a
//!   data-integrity problem upstream and is surfaced immediately.

use thiserror::Error;

use crate::resource_type::ResourceType;

/// Top-level error type for identity and addressing operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MomcaError {
    /// The identifier text or its parts do not form a valid atom:id
    /// (wrong segment count, unknown type token, empty segment, bad encoding).
    #[error("malformed identifier {value:?}: {reason}")]
    MalformedIdentifier {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The identifier names a different resource type than the one requested.
    #[error("'{value}' identifies a '{found}', not a '{expected}'")]
    TypeMismatch {
        /// The rejected identifier.
        value: String,
        /// Type required by the caller.
        expected: ResourceType,
        /// Type found in the identifier.
        found: ResourceType,
    },

    /// A charter identifier whose segment count matches neither charter shape.
    #[error("'{value}' is not a valid charter identifier: {segments} segments match neither archive/fond/charter nor collection/charter")]
    AmbiguousShape {
        /// The rejected identifier.
        value: String,
        /// Number of segments following the type token.
        segments: usize,
    },

    /// A string used as a database URI that has no `/` separator.
    #[error("'{0}' is probably not a valid uri, it doesn't contain '/'")]
    InvalidUri(String),

    /// A private charter location was requested without an owning user.
    #[error("charter '{0}' cannot be stored privately without an owner")]
    MissingOwner(String),

    /// Text that names no charter status.
    #[error("unknown charter status '{0}'; expected one of imported, private, saved, public")]
    UnknownStatus(String),
}

impl MomcaError {
    /// Shorthand for a [`MomcaError::MalformedIdentifier`].
    pub(crate) fn malformed(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_message_names_both_types() {
        let err = MomcaError::TypeMismatch {
            value: "tag:www.monasterium.net,2011:/archive/CH-KAE".to_string(),
            expected: ResourceType::Fond,
            found: ResourceType::Archive,
        };
        let msg = err.to_string();
        assert!(msg.contains("'archive'"));
        assert!(msg.contains("'fond'"));
    }

    #[test]
    fn invalid_uri_message() {
        let err = MomcaError::InvalidUri("admin.xml".to_string());
        assert_eq!(
            err.to_string(),
            "'admin.xml' is probably not a valid uri, it doesn't contain '/'"
        );
    }
}
