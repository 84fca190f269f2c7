//! # Id Subcommand
//!
//! Parse atom:ids and run the path codec.

use std::io::Write;

use clap::{Args, Subcommand};
use serde::Serialize;

use momca_core::{codec, ResourceId, ResourceType};

use crate::{emit, OutputFormat};

/// Arguments for the id subcommand.
#[derive(Args, Debug)]
pub struct IdArgs {
    #[command(subcommand)]
    pub command: IdCommand,
}

#[derive(Subcommand, Debug)]
pub enum IdCommand {
    /// Parse an atom:id and show its typed parts.
    Parse {
        /// Full atom:id text.
        atom_id: ResourceId,
    },
    /// Percent-encode each segment of a path.
    Encode { path: String },
    /// Decode each segment of a path.
    Decode { path: String },
}

/// Parsed atom:id as shown to the user.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct IdReport {
    pub atom_id: String,
    pub resource_type: ResourceType,
    pub segments: Vec<String>,
    pub identifier: String,
    pub file_name: String,
}

impl From<&ResourceId> for IdReport {
    fn from(id: &ResourceId) -> Self {
        Self {
            atom_id: id.to_string(),
            resource_type: id.resource_type(),
            segments: id.atom_id().segments().to_vec(),
            identifier: id.identifier().to_string(),
            file_name: id.file_name(),
        }
    }
}

pub fn run(args: &IdArgs, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    match &args.command {
        IdCommand::Parse { atom_id } => emit(&IdReport::from(atom_id), format, out),
        IdCommand::Encode { path } => {
            writeln!(out, "{}", codec::encode(path))?;
            Ok(())
        }
        IdCommand::Decode { path } => {
            writeln!(out, "{}", codec::decode(path)?)?;
            Ok(())
        }
    }
}
