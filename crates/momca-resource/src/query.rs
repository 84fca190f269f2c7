//! # Namespaces & Queries
//!
//! Declarative XPath query descriptors. A query carries the namespace
//! bindings it needs, so evaluating it never depends on the prefixes a
//! particular document happens to declare.

use std::str::FromStr;

use crate::error::ResourceError;

/// XML namespaces used in MOM-CA documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Atom syndication format.
    Atom,
    /// Atom publishing protocol.
    App,
    /// Charters Encoding Initiative.
    Cei,
    /// MOM-CA configuration.
    Config,
    /// European Archival Portal hierarchy.
    Eap,
    /// XRX application data (users, bookmarks).
    Xrx,
}

impl Namespace {
    pub fn all() -> &'static [Namespace] {
        &[
            Self::Atom,
            Self::App,
            Self::Cei,
            Self::Config,
            Self::Eap,
            Self::Xrx,
        ]
    }

    /// Conventional prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Atom => "atom",
            Self::App => "app",
            Self::Cei => "cei",
            Self::Config => "config",
            Self::Eap => "eap",
            Self::Xrx => "xrx",
        }
    }

    pub fn uri(&self) -> &'static str {
        match self {
            Self::Atom => "http://www.w3.org/2005/Atom",
            Self::App => "http://www.w3.org/2007/app",
            Self::Cei => "http://www.monasterium.net/NS/cei",
            Self::Config => "http://www.monasterium.net/NS/config",
            Self::Eap => "http://www.monasterium.net/NS/eap",
            Self::Xrx => "http://www.monasterium.net/NS/xrx",
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Namespace {
    type Err = ResourceError;

    /// Parse a namespace from its conventional prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|ns| ns.prefix() == s)
            .ok_or_else(|| ResourceError::UnknownNamespace(s.to_string()))
    }
}

/// An XPath expression plus the namespace bindings it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpathQuery {
    query: String,
    namespaces: Vec<Namespace>,
}

impl XpathQuery {
    pub fn new(query: impl Into<String>, namespaces: &[Namespace]) -> Self {
        Self {
            query: query.into(),
            namespaces: namespaces.to_vec(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// Text of the resource's `atom:id`.
    pub fn atom_id() -> Self {
        Self::new("//atom:id/text()", &[Namespace::Atom])
    }

    /// The `atom:id` elements.
    pub fn atom_id_element() -> Self {
        Self::new("//atom:id", &[Namespace::Atom])
    }

    /// E-mail of the resource's creator.
    pub fn atom_email() -> Self {
        Self::new("//atom:author/atom:email/text()", &[Namespace::Atom])
    }

    /// The document element's `atom:author` children.
    pub fn atom_author_element() -> Self {
        Self::new("/*/atom:author", &[Namespace::Atom])
    }

    /// The document element's `atom:updated` children.
    pub fn atom_updated_element() -> Self {
        Self::new("/*/atom:updated", &[Namespace::Atom])
    }

    /// E-mail stored in a user document.
    pub fn xrx_email() -> Self {
        Self::new("//xrx:email/text()", &[Namespace::Xrx])
    }

    /// Display name stored in a user document.
    pub fn xrx_name() -> Self {
        Self::new("//xrx:name/text()", &[Namespace::Xrx])
    }

    /// Atom ids of the charters a user has saved for editing.
    pub fn xrx_saved_ids() -> Self {
        Self::new("//xrx:saved/xrx:id/text()", &[Namespace::Xrx])
    }
}

impl std::fmt::Display for XpathQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_round_trip() {
        for ns in Namespace::all() {
            assert_eq!(ns.prefix().parse::<Namespace>().unwrap(), *ns);
        }
        assert!(matches!(
            "dc".parse::<Namespace>(),
            Err(ResourceError::UnknownNamespace(prefix)) if prefix == "dc"
        ));
    }

    #[test]
    fn atom_id_query_binds_atom() {
        let q = XpathQuery::atom_id();
        assert_eq!(q.query(), "//atom:id/text()");
        assert_eq!(q.namespaces(), &[Namespace::Atom]);
        assert_eq!(q.to_string(), "//atom:id/text()");
    }
}
