//! Command-line interface for opdesc
//!
//! # Usage Examples
//!
//! ## Build operations
//! ```bash
//! # Build every descriptor in a JSON Lines file
//! opdesc build --input ops.jsonl
//!
//! # Read from stdin, JSON-encode floats and maps, report every failure
//! cat ops.jsonl | opdesc build --input - --serializer json --continue-on-error
//!
//! # Take settings from a config file
//! opdesc build --input ops.jsonl --config opdesc.toml
//! ```
//!
//! ## Descriptor format
//! One JSON object per line, e.g.
//! `{"op": 1012, "bin": "tags", "index": 0, "count": 3}`

use anyhow::Context;
use clap::{Parser, Subcommand};
use opdesc::stream::build_stream;
use opdesc::{BuildConfig, SerializerKind};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "opdesc")]
#[command(about = "Build typed operations from loosely-typed operation descriptors")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build operations from a JSON Lines file of descriptors
    Build {
        /// Input file, or "-" for stdin
        #[arg(long, default_value = "-")]
        input: PathBuf,

        /// TOML config file
        #[arg(long, env = "OPDESC_CONFIG")]
        config: Option<PathBuf>,

        /// Serializer for floats, maps and other opaque values (overrides config)
        #[arg(long, value_enum, env = "OPDESC_SERIALIZER")]
        serializer: Option<SerializerKind>,

        /// Keep building after a descriptor fails (overrides config)
        #[arg(long)]
        continue_on_error: bool,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            config,
            serializer,
            continue_on_error,
        } => {
            let mut build_config = if let Some(config_path) = config {
                BuildConfig::from_file(&config_path).with_context(|| {
                    format!("Failed to load config from {config_path:?}")
                })?
            } else {
                BuildConfig::default()
            };
            if let Some(serializer) = serializer {
                build_config.serializer = serializer;
            }
            if continue_on_error {
                build_config.continue_on_error = true;
            }

            let stdout = io::stdout().lock();
            let summary = if input.as_os_str() == "-" {
                build_stream(io::stdin().lock(), stdout, &build_config)?
            } else {
                let file = File::open(&input)
                    .with_context(|| format!("Failed to open input {input:?}"))?;
                build_stream(BufReader::new(file), stdout, &build_config)?
            };

            for failure in &summary.failures {
                eprintln!("line {}: {}", failure.line, failure.message);
            }
            if !summary.is_success() {
                anyhow::bail!(
                    "{} of {} descriptors failed to build",
                    summary.failures.len(),
                    summary.built + summary.failures.len()
                );
            }
        }
    }

    Ok(())
}
