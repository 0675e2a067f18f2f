//! translint - package metadata lint CLI
//!
//! Scans a metadata tree (`<vendor>/<name>/<language>.yaml`), validates each
//! file, and exits non-zero on the first failure.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use translint_core::{
    FileValidator, LintRunner, RegistryCache, RunOutcome, SchemaValidator, SpellChecker,
    discover_metadata_files,
};

mod ui;

#[derive(Parser)]
#[command(name = "translint")]
#[command(author, version, about = "Lint localized package metadata")]
struct Cli {
    /// Root of the metadata tree (vendor/name/<language>.yaml)
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// JSON Schema applied to each per-language record
    #[arg(
        long,
        overrides_with = "schema",
        default_value = "resources/metadata.schema.json"
    )]
    schema: PathBuf,

    /// Directory of spellcheck whitelists (global.txt plus <language>.txt)
    #[arg(long, default_value = "resources/whitelists")]
    whitelists: PathBuf,

    /// Base dictionary of acceptable words, one per line
    #[arg(long, default_value = "resources/dictionary.txt")]
    dictionary: PathBuf,

    /// Package registry consulted for public/private status
    #[arg(
        long,
        env = "TRANSLINT_REGISTRY_URL",
        default_value = "https://packagist.org"
    )]
    registry_url: String,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let output = ui::Output::new(cli.quiet);
    output.banner("Checking package metadata");

    let schema = SchemaValidator::from_file(&cli.schema)
        .with_context(|| format!("loading schema from {}", cli.schema.display()))?;
    let spellchecker = SpellChecker::load(&cli.dictionary, &cli.whitelists)
        .with_context(|| format!("loading whitelists from {}", cli.whitelists.display()))?;
    let registry = RegistryCache::new(&cli.registry_url)
        .with_context(|| format!("building registry client for {}", cli.registry_url))?;

    let files = discover_metadata_files(&cli.root)
        .with_context(|| format!("scanning metadata tree at {}", cli.root.display()))?;
    tracing::debug!(count = files.len(), "discovered metadata files");

    let mut runner = LintRunner::new(FileValidator::new(registry, schema, spellchecker));

    match runner.run(&files).await? {
        RunOutcome::Passed { checked } => {
            output.success(&format!("All {checked} metadata files are valid"));
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Failed(failure) => {
            output.failure(&failure.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}
