//! validateHound - validator and light viewer for RustHound-CE outputs.

mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use validatehound_loader::Bundle;
use validatehound_schema::SchemaRegistry;

#[derive(Parser)]
#[command(name = "validatehound")]
#[command(
    author,
    version,
    about = "Validator and light viewer for RustHound-CE outputs"
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a short summary of the files in a bundle
    Summary {
        /// Directory or .zip produced by RustHound-CE
        path: PathBuf,
    },

    /// Validate every record against the schema for its file
    Validate {
        /// Directory or .zip to validate
        path: PathBuf,

        /// Example errors shown per file
        #[arg(long, short = 'n', default_value = "5")]
        max_errors: usize,

        /// Exit with an error if any record is invalid
        #[arg(long, short)]
        strict: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show sample records from one file
    Inspect {
        /// Directory or .zip to inspect
        path: PathBuf,

        /// JSON file to inspect (e.g. users.json)
        #[arg(long, short)]
        file: Option<String>,

        /// How many records to show
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Fixed-width table
    Text,
    /// Pretty-printed report
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Summary { path } => {
            let bundle = load_bundle(&path)?;
            print!("{}", report::render_summary(&bundle));
        }

        Commands::Validate {
            path,
            max_errors,
            strict,
            format,
        } => {
            let bundle = load_bundle(&path)?;
            let registry =
                SchemaRegistry::builtin().context("Failed to compile built-in schemas")?;

            let result = validatehound_schema::validate(&bundle, &registry);
            info!(
                "Validated {} files: {} valid, {} invalid records",
                result.len(),
                result.total_valid(),
                result.total_invalid()
            );

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => print!("{}", report::render_validation(&result, max_errors)),
            }

            if strict && !result.is_clean() {
                bail!("Strict mode: {} invalid records", result.total_invalid());
            }
        }

        Commands::Inspect { path, file, limit } => {
            let bundle = load_bundle(&path)?;

            match file {
                None => print!("{}", report::render_file_list(&bundle)),
                Some(name) => {
                    let content = bundle.get(&name).with_context(|| {
                        let available: Vec<_> = bundle.names().collect();
                        format!(
                            "File {} not found in bundle (available: {})",
                            name,
                            available.join(", ")
                        )
                    })?;
                    println!("{}", report::render_samples(&name, content, limit)?);
                }
            }
        }
    }

    Ok(())
}

fn load_bundle(path: &Path) -> Result<Bundle> {
    info!("Loading bundle: {:?}", path);
    validatehound_loader::load(path)
        .with_context(|| format!("Failed to load bundle from {:?}", path))
}
