//! # Atom Identifier: Canonical atom:id Strings
//!
//! Every MOM-CA document carries an `atom:id` such as
//!
//! ```text
//! tag:www.monasterium.net,2011:/charter/RS-IAGNS/Charters/IAGNS_F-.150_6605%7C193232
//! ```
//!
//! made of the fixed [`DEFAULT_PREFIX`], a [`ResourceType`] token, and one to
//! three individually percent-encoded segments positioning the document in
//! the content hierarchy.
//!
//! ## Invariants
//!
//! - The stored text is always canonical: segments are re-encoded on
//!   construction, so `CH|KAE` and `CH%7CKAE` produce the same `AtomId`.
//! - Segments are kept decoded and escaped verbatim into the text, so
//!   parsing the text yields exactly the stored segments, `%` included.
//! - Equality and hashing use the canonical text only.
//! - An `AtomId` is never mutated after construction.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::codec;
use crate::error::MomcaError;
use crate::resource_type::ResourceType;

/// Scheme prefix shared by every MOM-CA atom:id.
pub const DEFAULT_PREFIX: &str = "tag:www.monasterium.net,2011:";

/// Smallest number of segments after the type token.
pub const MIN_SEGMENTS: usize = 1;

/// Largest number of segments after the type token.
pub const MAX_SEGMENTS: usize = 3;

/// A parsed, canonical atom:id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AtomId {
    text: String,
    resource_type: ResourceType,
    segments: Vec<String>,
}

impl AtomId {
    /// Parse a full atom:id string.
    ///
    /// # Errors
    ///
    /// `MalformedIdentifier` if the prefix is missing, the type token is
    /// unknown, the segment count is outside `1..=3`, or a segment is empty
    /// or not decodable.
    pub fn parse(text: &str) -> Result<Self, MomcaError> {
        let rest = text
            .strip_prefix(DEFAULT_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| {
                MomcaError::malformed(text, format!("does not start with '{DEFAULT_PREFIX}/'"))
            })?;

        let mut tokens = rest.split('/');
        let type_token = tokens.next().unwrap_or_default();
        let resource_type: ResourceType = type_token.parse().map_err(|_| {
            MomcaError::malformed(text, format!("unknown resource type '{type_token}'"))
        })?;

        let raw: Vec<&str> = tokens.collect();
        check_segment_count(text, raw.len())?;

        let segments = raw
            .iter()
            .map(|segment| {
                if segment.is_empty() {
                    return Err(MomcaError::malformed(text, "empty segment"));
                }
                codec::decode_segment(segment)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::assemble(resource_type, segments))
    }

    /// Compose an atom:id from a type and its unencoded segments.
    ///
    /// Segments that are already percent-encoded are normalized, not
    /// double-encoded.
    ///
    /// # Errors
    ///
    /// `MalformedIdentifier` if the count is outside `1..=3`, a segment is
    /// empty, or a segment is itself a full atom:id.
    pub fn from_parts<S: AsRef<str>>(
        resource_type: ResourceType,
        parts: &[S],
    ) -> Result<Self, MomcaError> {
        let joined = || {
            parts
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(", ")
        };

        if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&parts.len()) {
            return Err(MomcaError::malformed(
                format!("[{}]", joined()),
                "wrong amount of parts, probably not a valid identifier",
            ));
        }

        let segments = parts
            .iter()
            .map(|part| normalize_part(part.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::assemble(resource_type, segments))
    }

    /// Compose an atom:id from segments that are already decoded.
    ///
    /// Unlike [`from_parts`](Self::from_parts) nothing is normalized, so a
    /// segment holding a literal `%XX` survives unchanged. Used when deriving
    /// one id from another.
    pub(crate) fn from_decoded(
        resource_type: ResourceType,
        segments: Vec<String>,
    ) -> Result<Self, MomcaError> {
        if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&segments.len()) {
            return Err(MomcaError::malformed(
                format!("[{}]", segments.join(", ")),
                "wrong amount of parts, probably not a valid identifier",
            ));
        }
        if segments.iter().any(String::is_empty) {
            return Err(MomcaError::malformed(
                format!("[{}]", segments.join(", ")),
                "empty part",
            ));
        }
        Ok(Self::assemble(resource_type, segments))
    }

    fn assemble(resource_type: ResourceType, segments: Vec<String>) -> Self {
        let mut text = format!("{DEFAULT_PREFIX}/{}", resource_type.as_str());
        for segment in &segments {
            text.push('/');
            text.push_str(&codec::escape_segment(segment));
        }
        Self {
            text,
            resource_type,
            segments,
        }
    }

    /// The canonical atom:id text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The scheme prefix. Always [`DEFAULT_PREFIX`].
    pub fn prefix(&self) -> &'static str {
        DEFAULT_PREFIX
    }

    /// The resource type named by the type token.
    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// The decoded segments after the type token, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last decoded segment, i.e. the resource's own identifier.
    pub fn identifier(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

/// Validate one caller-supplied part and return its decoded form.
///
/// Parts may arrive encoded or not; both normalize to the same segment.
pub(crate) fn normalize_part(part: &str) -> Result<String, MomcaError> {
    if part.is_empty() {
        return Err(MomcaError::malformed(part, "empty part"));
    }
    if part.starts_with(DEFAULT_PREFIX) {
        return Err(MomcaError::malformed(
            part,
            "a full identifier cannot be used as an identifier part",
        ));
    }
    codec::decode_segment(&codec::encode_segment(part))
}

fn check_segment_count(text: &str, count: usize) -> Result<(), MomcaError> {
    if (MIN_SEGMENTS..=MAX_SEGMENTS).contains(&count) {
        Ok(())
    } else {
        Err(MomcaError::malformed(
            text,
            format!("{count} segments, wrong amount of parts, probably not a valid identifier"),
        ))
    }
}

impl PartialEq for AtomId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for AtomId {}

impl Hash for AtomId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl std::fmt::Display for AtomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for AtomId {
    type Err = MomcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AtomId {
    type Error = MomcaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AtomId> for String {
    fn from(id: AtomId) -> Self {
        id.text
    }
}

impl AsRef<str> for AtomId {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOND_CHARTER: &str =
        "tag:www.monasterium.net,2011:/charter/RS-IAGNS/Charters/IAGNS_F-.150_6605%7C193232";

    #[test]
    fn parse_reads_type_and_segments() {
        let id = AtomId::parse(FOND_CHARTER).unwrap();
        assert_eq!(id.resource_type(), ResourceType::Charter);
        assert_eq!(id.prefix(), DEFAULT_PREFIX);
        assert_eq!(
            id.segments(),
            &["RS-IAGNS", "Charters", "IAGNS_F-.150_6605|193232"]
        );
        assert_eq!(id.identifier(), "IAGNS_F-.150_6605|193232");
        assert_eq!(id.as_str(), FOND_CHARTER);
    }

    #[test]
    fn from_parts_encodes_segments() {
        let id = AtomId::from_parts(
            ResourceType::Charter,
            &["RS-IAGNS", "Charters", "IAGNS_F-.150_6605|193232"],
        )
        .unwrap();
        assert_eq!(id.as_str(), FOND_CHARTER);
        assert_eq!(id, AtomId::parse(FOND_CHARTER).unwrap());
    }

    #[test]
    fn parse_canonicalizes_unencoded_input() {
        let raw = AtomId::parse("tag:www.monasterium.net,2011:/fond/CH|KAE/Ur|kunden").unwrap();
        assert_eq!(
            raw.as_str(),
            "tag:www.monasterium.net,2011:/fond/CH%7CKAE/Ur%7Ckunden"
        );
        assert_eq!(
            raw,
            AtomId::parse("tag:www.monasterium.net,2011:/fond/CH%7CKAE/Ur%7Ckunden").unwrap()
        );
    }

    #[test]
    fn from_parts_accepts_already_encoded_parts() {
        let a = AtomId::from_parts(ResourceType::Fond, &["CH|KAE", "Urkunden"]).unwrap();
        let b = AtomId::from_parts(ResourceType::Fond, &["CH%7CKAE", "Urkunden"]).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.segments()[0], "CH|KAE");
    }

    #[test]
    fn literal_percent_survives_parse() {
        let id = AtomId::parse("tag:www.monasterium.net,2011:/fond/100%2525/F").unwrap();
        assert_eq!(id.segments(), &["100%25", "F"]);
        assert_eq!(id.as_str(), "tag:www.monasterium.net,2011:/fond/100%2525/F");
        let derived =
            AtomId::from_decoded(ResourceType::Archive, vec!["100%25".to_string()]).unwrap();
        assert_eq!(derived.as_str(), "tag:www.monasterium.net,2011:/archive/100%2525");
        assert_eq!(derived.identifier(), "100%25");
    }

    #[test]
    fn segment_count_bounds() {
        let cases: [&[&str]; 3] = [&[], &["a", "b", "c", "d"], &["a", "b", "c", "d", "e"]];
        for parts in cases {
            assert!(matches!(
                AtomId::from_parts(ResourceType::Charter, parts),
                Err(MomcaError::MalformedIdentifier { .. })
            ));
        }
        assert!(AtomId::from_parts(ResourceType::Archive, &["a"]).is_ok());
        assert!(AtomId::from_parts(ResourceType::Charter, &["a", "b", "c"]).is_ok());
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for bad in [
            "",
            "ThisIsNotACharter",
            "tag:www.monasterium.net,2011:",
            "tag:www.monasterium.net,2011:/charter",
            "tag:www.monasterium.net,2011:/charters/a/b",
            "tag:www.monasterium.net,2011:/charter/a//b",
            "tag:www.monasterium.net,2011:/charter/a/b/c/d",
            "tag:example.org,2011:/archive/a",
        ] {
            assert!(
                matches!(AtomId::parse(bad), Err(MomcaError::MalformedIdentifier { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_part_is_rejected() {
        assert!(AtomId::from_parts(ResourceType::Fond, &["", "Urkunden"]).is_err());
        assert!(AtomId::from_parts(ResourceType::Fond, &["CH-KAE", ""]).is_err());
    }

    #[test]
    fn full_identifier_as_part_is_rejected() {
        let result = AtomId::from_parts(
            ResourceType::Fond,
            &["CH-KAE", "tag:www.monasterium.net,2011:/fond/CH-KAE/Urkunden"],
        );
        assert!(matches!(result, Err(MomcaError::MalformedIdentifier { .. })));
    }

    #[test]
    fn equal_ids_hash_equal() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(AtomId::parse("tag:www.monasterium.net,2011:/archive/A%7CB").unwrap());
        assert!(set.contains(&AtomId::from_parts(ResourceType::Archive, &["A|B"]).unwrap()));
    }

    #[test]
    fn serde_as_string() {
        let id = AtomId::parse(FOND_CHARTER).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{FOND_CHARTER}\""));
        let back: AtomId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<AtomId>("\"not an id\"").is_err());
    }
}
