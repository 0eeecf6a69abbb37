//! # zapp CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zapp_cli::registry::{run_registry, RegistryArgs};
use zapp_cli::validate::{run_validate, ValidateArgs};
use zapp_cli::{load_catalog, OutputFormat};

/// Exit code for failures to read inputs, as opposed to validation failures.
const EXIT_OPERATIONAL_ERROR: u8 = 2;

/// zapp: app bundle validator
///
/// Checks an app bundle's manifest, requirements, and templates against the
/// platform's rules before upload.
#[derive(Parser, Debug)]
#[command(name = "zapp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML message catalog layered over the built-in English messages.
    #[arg(long, value_name = "FILE", global = true)]
    messages: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate one or more app bundle directories.
    Validate(ValidateArgs),

    /// Print products, locations, framework versions, and requirement types.
    Registry(RegistryArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "zapp CLI starting");

    if let Err(e) = zapp_core::verify_registry() {
        tracing::error!("reference data is inconsistent: {e}");
        return ExitCode::from(EXIT_OPERATIONAL_ERROR);
    }

    let result = match cli.command {
        Commands::Validate(args) => load_catalog(cli.messages.as_deref())
            .and_then(|catalog| run_validate(&args, cli.format, &catalog)),
        Commands::Registry(args) => run_registry(&args, cli.format),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_OPERATIONAL_ERROR)
        }
    }
}
