//! # Charter Subcommand
//!
//! Compute storage locations of charters.

use std::io::Write;

use clap::{Args, Subcommand};
use serde::Serialize;

use momca_core::{CharterId, CharterLocation, CharterStatus, StoreLayout, UserId};

use crate::{emit, OutputFormat};

/// Arguments for the charter subcommand.
#[derive(Args, Debug)]
pub struct CharterArgs {
    #[command(subcommand)]
    pub command: CharterCommand,
}

#[derive(Subcommand, Debug)]
pub enum CharterCommand {
    /// Show where a charter is stored in a given status.
    Locate {
        /// Charter atom:id.
        atom_id: CharterId,

        /// imported, private, saved or public. All statuses if omitted.
        #[arg(long)]
        status: Option<CharterStatus>,

        /// Owning user, required for private charters.
        #[arg(long)]
        owner: Option<UserId>,
    },
}

/// One resolved location.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LocationReport {
    pub status: CharterStatus,
    pub parent_path: String,
    pub file_name: String,
    pub uri: String,
}

impl LocationReport {
    fn new(status: CharterStatus, location: &CharterLocation, layout: &StoreLayout) -> Self {
        Self {
            status,
            parent_path: location.absolute_parent(layout),
            file_name: location.file_name().to_string(),
            uri: location.uri(layout),
        }
    }
}

pub fn run(
    args: &CharterArgs,
    layout: &StoreLayout,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match &args.command {
        CharterCommand::Locate {
            atom_id,
            status,
            owner,
        } => {
            let statuses = match status {
                Some(status) => vec![*status],
                None => CharterStatus::all()
                    .iter()
                    .copied()
                    .filter(|s| *s != CharterStatus::Private || owner.is_some())
                    .collect(),
            };
            let reports = statuses
                .into_iter()
                .map(|status| {
                    let location = CharterLocation::resolve(atom_id, status, owner.as_ref())?;
                    Ok(LocationReport::new(status, &location, layout))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            emit(&reports, format, out)
        }
    }
}
