//! # momca CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::path::PathBuf;

use clap::Parser;

use momca_cli::OutputFormat;

/// MOM-CA identity diagnostics.
///
/// Parses and encodes atom:ids, computes charter storage locations, and
/// inspects stored XML resources.
#[derive(Parser, Debug)]
#[command(name = "momca", version, about)]
struct Cli {
    /// YAML store layout; defaults to a database root of /db/mom-data.
    #[arg(long, global = true)]
    layout: Option<PathBuf>,

    /// Report format.
    #[arg(long, global = true, value_enum, default_value_t)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Parse, encode and decode identifiers.
    Id(momca_cli::id::IdArgs),
    /// Charter location operations.
    Charter(momca_cli::charter::CharterArgs),
    /// Stored resource inspection.
    Resource(momca_cli::resource::ResourceArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let layout = momca_cli::load_layout(cli.layout.as_deref())?;
    let mut out = std::io::stdout().lock();

    match &cli.command {
        Commands::Id(args) => momca_cli::id::run(args, cli.format, &mut out),
        Commands::Charter(args) => momca_cli::charter::run(args, &layout, cli.format, &mut out),
        Commands::Resource(args) => momca_cli::resource::run(args, &layout, cli.format, &mut out),
    }
}
