//! # momca-cli: MOM-CA Identity Diagnostics
//!
//! A small clap-based front end over `momca-core` and `momca-resource` for
//! inspecting identifiers and stored documents from a shell.
//!
//! ## Subcommands
//!
//! - `id`: parse, encode and decode atom:ids and paths
//! - `charter`: compute where a charter is stored for a given status
//! - `resource`: inspect an XML document and its embedded identity
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates and write reports to a
//!   caller-supplied writer.

pub mod charter;
pub mod id;
pub mod resource;

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use momca_core::StoreLayout;

/// Report format.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Load a store layout from a YAML file, or the default layout.
pub fn load_layout(path: Option<&Path>) -> anyhow::Result<StoreLayout> {
    let Some(path) = path else {
        return Ok(StoreLayout::default());
    };
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read layout {}", path.display()))?;
    let layout = StoreLayout::from_yaml_str(&yaml)
        .with_context(|| format!("invalid layout {}", path.display()))?;
    tracing::debug!(root = %layout.database_root, "loaded store layout");
    Ok(layout)
}

/// Write a report in the requested format.
pub fn emit<T: Serialize>(
    report: &T,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *out, report)?,
    }
    Ok(())
}
