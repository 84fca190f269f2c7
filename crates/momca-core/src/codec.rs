//! # Path Codec: Segment-wise Percent-Encoding
//!
//! Database paths and atom:ids are `/`-separated sequences of individually
//! percent-encoded segments. This module is the only place where segments
//! are encoded or decoded.
//!
//! ## Invariants
//!
//! - `encode` is idempotent: `encode(encode(s)) == encode(s)`. Every segment
//!   is decoded before it is re-encoded, so already-encoded input is
//!   normalized instead of double-encoded.
//! - `decode(encode(s)) == decode(s)`.
//! - The literal [`DEFAULT_PREFIX`] segment is never encoded, otherwise the
//!   `:` and `,` inside it would be escaped.
//! - [`escape_segment`] is for values that are already decoded. It never
//!   decodes first, so it is injective: a literal `%41` stays distinct from
//!   `A`. Canonical ids and derived storage names go through it.
//!
//! Encoding keeps the RFC 3986 unreserved set (`A-Z a-z 0-9 - _ . ~`) and
//! escapes everything else as `%XX` over UTF-8 bytes.

use std::borrow::Cow;

use crate::atom_id::DEFAULT_PREFIX;
use crate::error::MomcaError;

/// Percent-encode every segment of a `/`-separated path.
pub fn encode(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment == DEFAULT_PREFIX {
                Cow::Borrowed(segment)
            } else {
                Cow::Owned(encode_segment(segment))
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Percent-decode every segment of a `/`-separated path.
///
/// # Errors
///
/// Returns `MalformedIdentifier` if a segment decodes to invalid UTF-8.
pub fn decode(path: &str) -> Result<String, MomcaError> {
    let segments = path
        .split('/')
        .map(decode_segment)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(segments.join("/"))
}

/// Normalize and encode a single segment.
///
/// A `/` inside `raw` is escaped as `%2F`, so the result never contains a
/// path separator.
pub fn encode_segment(raw: &str) -> String {
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    let normalized = String::from_utf8_lossy(&bytes);
    urlencoding::encode(&normalized).into_owned()
}

/// Encode a decoded segment verbatim.
///
/// Every `%` is escaped, so `decode_segment(&escape_segment(s)) == s` for
/// any `s` and distinct inputs never collide.
pub fn escape_segment(decoded: &str) -> String {
    urlencoding::encode(decoded).into_owned()
}

/// Decode a single segment.
///
/// # Errors
///
/// Returns `MalformedIdentifier` if the escapes decode to invalid UTF-8.
pub fn decode_segment(segment: &str) -> Result<String, MomcaError> {
    urlencoding::decode(segment)
        .map(Cow::into_owned)
        .map_err(|e| MomcaError::malformed(segment, format!("invalid percent-encoding: {e}")))
}

/// The last element of a database URI.
///
/// `/db/mom-data/xrx.user/admin.xml` gives `admin.xml`.
pub fn last_uri_part(uri: &str) -> Result<&str, MomcaError> {
    uri.rsplit_once('/')
        .map(|(_, last)| last)
        .ok_or_else(|| MomcaError::InvalidUri(uri.to_string()))
}

/// Everything before the last element of a database URI.
///
/// `/db/mom-data/xrx.user/admin.xml` gives `/db/mom-data/xrx.user`.
pub fn parent_uri(uri: &str) -> Result<&str, MomcaError> {
    uri.rsplit_once('/')
        .map(|(parent, _)| parent)
        .ok_or_else(|| MomcaError::InvalidUri(uri.to_string()))
}
