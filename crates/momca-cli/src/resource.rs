//! # Resource Subcommand
//!
//! Inspect a stored XML document: its embedded identity and, for charters,
//! whether it sits where its id and status say it should.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use serde::Serialize;

use momca_core::{CharterStatus, ResourceType, StoreLayout};
use momca_resource::{AtomResource, Charter, ExistResource, Namespace, XpathQuery};

use crate::{emit, OutputFormat};

/// Arguments for the resource subcommand.
#[derive(Args, Debug)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub command: ResourceCommand,
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommand {
    /// Read a document and report its identity.
    Inspect {
        /// XML file to read.
        file: PathBuf,

        /// Database collection the document is stored in.
        #[arg(long)]
        parent: String,

        /// Stored name; defaults to the file's name.
        #[arg(long)]
        name: Option<String>,

        /// Additional XPath query to evaluate.
        #[arg(long)]
        query: Option<String>,

        /// Namespace prefixes bound for --query.
        #[arg(long = "namespace", value_delimiter = ',')]
        namespaces: Vec<Namespace>,
    },
}

/// Identity of an inspected document.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct InspectReport {
    pub uri: String,
    pub atom_id: String,
    pub resource_type: ResourceType,
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charter: Option<CharterReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_results: Option<Vec<String>>,
}

/// Status and expected location of an inspected charter.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CharterReport {
    pub status: CharterStatus,
    /// Unknown when a private charter has no creator.
    pub expected_uri: Option<String>,
    pub location_matches: bool,
}

/// Build the report for one stored document.
pub fn inspect(
    resource: ExistResource,
    layout: &StoreLayout,
    query: Option<&XpathQuery>,
) -> anyhow::Result<InspectReport> {
    let query_results = query.map(|q| resource.query(q)).transpose()?;
    let atom = AtomResource::from_resource(resource)?;
    let uri = atom.resource().uri();
    let atom_id = atom.id().to_string();
    let resource_type = atom.id().resource_type();
    let creator = atom.creator().map(|c| c.as_str().to_string());

    let charter = match resource_type {
        ResourceType::Charter => {
            let charter = Charter::from_resource(atom.into_resource(), layout.clone())?;
            let expected_uri = charter
                .location()
                .ok()
                .map(|location| location.uri(layout));
            Some(CharterReport {
                status: charter.status(),
                location_matches: expected_uri.as_deref() == Some(uri.as_str()),
                expected_uri,
            })
        }
        _ => None,
    };

    Ok(InspectReport {
        uri,
        atom_id,
        resource_type,
        creator,
        charter,
        query_results,
    })
}

pub fn run(
    args: &ResourceArgs,
    layout: &StoreLayout,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match &args.command {
        ResourceCommand::Inspect {
            file,
            parent,
            name,
            query,
            namespaces,
        } => {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let name = match name {
                Some(name) => name.clone(),
                None => file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .with_context(|| format!("{} has no file name", file.display()))?,
            };
            let resource = ExistResource::new(&name, parent, &content)?;
            let query = query.as_ref().map(|q| XpathQuery::new(q.as_str(), namespaces));
            emit(&inspect(resource, layout, query.as_ref())?, format, out)
        }
    }
}
