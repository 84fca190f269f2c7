//! # eXist Resources
//!
//! An [`ExistResource`] is one XML document as stored in the database:
//! an encoded file name, an encoded parent collection, and the parsed
//! content. The content is parsed exactly once at construction; a document
//! that does not parse never becomes a resource.
//!
//! ## Ownership
//!
//! The resource exclusively owns its document. The DOM is arena-allocated,
//! so a resource is `!Send`: threads that work on the same logical document
//! each build their own resource from the raw triple.

use sxd_document::{dom, parser, writer, Package};
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value};
use tracing::debug;

use momca_core::codec;

use crate::error::ResourceError;
use crate::query::XpathQuery;

/// A parsed XML document addressed by `parent_path/name`.
pub struct ExistResource {
    name: String,
    parent_path: String,
    content: String,
    package: Package,
}

impl ExistResource {
    /// Build a resource from its raw database triple.
    ///
    /// `name` and `parent_path` are percent-encoded segment by segment;
    /// already encoded input is kept as is.
    ///
    /// # Errors
    ///
    /// `ContentValidation` if `content` is not well-formed XML.
    pub fn new(name: &str, parent_path: &str, content: &str) -> Result<Self, ResourceError> {
        let package = parse_xml(content)?;
        let resource = Self {
            name: codec::encode(name),
            parent_path: codec::encode(parent_path),
            content: content.to_string(),
            package,
        };
        debug!(uri = %resource.uri(), "parsed resource");
        Ok(resource)
    }

    /// Encoded file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encoded parent collection.
    pub fn parent_path(&self) -> &str {
        &self.parent_path
    }

    /// `parent_path/name`.
    pub fn uri(&self) -> String {
        format!("{}/{}", self.parent_path, self.name)
    }

    /// Current serialized content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The parsed document.
    pub fn document(&self) -> dom::Document<'_> {
        self.package.as_document()
    }

    /// Evaluate a query and return the string value of every result.
    pub fn query(&self, query: &XpathQuery) -> Result<Vec<String>, ResourceError> {
        let document = self.document();
        let value = evaluate(&document, query)?;
        Ok(match value {
            Value::Nodeset(nodes) => nodes
                .document_order()
                .into_iter()
                .map(|node| node.string_value())
                .collect(),
            Value::String(s) => vec![s],
            Value::Number(n) => vec![n.to_string()],
            Value::Boolean(b) => vec![b.to_string()],
        })
    }

    /// Evaluate a query expected to yield at most one non-empty value.
    ///
    /// # Errors
    ///
    /// `MultipleResults` if more than one value is found.
    pub fn query_unique(&self, query: &XpathQuery) -> Result<Option<String>, ResourceError> {
        let mut results = self.query(query)?;
        match results.len() {
            0 => Ok(None),
            1 => Ok(results.pop().filter(|value| !value.trim().is_empty())),
            count => Err(ResourceError::MultipleResults {
                query: query.query().to_string(),
                count,
            }),
        }
    }

    /// Move the resource to a new name and parent collection.
    ///
    /// Only the address changes; the content is untouched.
    pub fn relocate(&mut self, name: &str, parent_path: &str) {
        let name = codec::encode(name);
        let parent_path = codec::encode(parent_path);
        debug!(from = %self.uri(), to = %format!("{parent_path}/{name}"), "relocating resource");
        self.name = name;
        self.parent_path = parent_path;
    }

    /// Mutate the document and re-serialize it.
    ///
    /// `mutate` works on a fresh copy of the document. The resource only
    /// takes the new document and content when both mutation and
    /// serialization succeed, so a failed edit leaves it unchanged.
    pub fn edit<F>(&mut self, mutate: F) -> Result<(), ResourceError>
    where
        F: FnOnce(&dom::Document<'_>) -> Result<(), ResourceError>,
    {
        let package = parse_xml(&self.content)?;
        mutate(&package.as_document())?;
        let content = serialize(&package.as_document())?;
        debug!(uri = %self.uri(), "rewrote resource content");
        self.package = package;
        self.content = content;
        Ok(())
    }
}

impl std::fmt::Debug for ExistResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExistResource")
            .field("name", &self.name)
            .field("parent_path", &self.parent_path)
            .field("content", &self.content)
            .finish()
    }
}

/// Elements selected by `query`, in document order.
pub(crate) fn select_elements<'d>(
    document: &dom::Document<'d>,
    query: &XpathQuery,
) -> Result<Vec<dom::Element<'d>>, ResourceError> {
    match evaluate(document, query)? {
        Value::Nodeset(nodes) => Ok(nodes
            .document_order()
            .into_iter()
            .filter_map(|node| match node {
                Node::Element(element) => Some(element),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// The document element.
pub(crate) fn root_element<'d>(
    document: &dom::Document<'d>,
) -> Result<dom::Element<'d>, ResourceError> {
    document
        .root()
        .children()
        .into_iter()
        .find_map(|child| child.element())
        .ok_or_else(|| ResourceError::ContentValidation("document has no root element".to_string()))
}

fn evaluate<'d>(
    document: &dom::Document<'d>,
    query: &XpathQuery,
) -> Result<Value<'d>, ResourceError> {
    let failed = |reason: String| ResourceError::Query {
        query: query.query().to_string(),
        reason,
    };

    let xpath = Factory::new()
        .build(query.query())
        .map_err(|e| failed(e.to_string()))?
        .ok_or_else(|| failed("empty query".to_string()))?;

    let mut context = Context::new();
    for namespace in query.namespaces() {
        context.set_namespace(namespace.prefix(), namespace.uri());
    }

    xpath
        .evaluate(&context, document.root())
        .map_err(|e| failed(e.to_string()))
}

fn parse_xml(content: &str) -> Result<Package, ResourceError> {
    parser::parse(content)
        .map_err(|e| ResourceError::ContentValidation(format!("failed to parse xml: {e:?}")))
}

fn serialize(document: &dom::Document<'_>) -> Result<String, ResourceError> {
    let mut buffer = Vec::new();
    writer::format_document(document, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ResourceError::ContentValidation(e.to_string()))
}
