use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use concord_models::ConcordConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "config/concord.toml";

#[derive(Parser, Debug)]
#[command(
    name = "concord",
    about = "Combine independent agent assessments into per-instrument consensus"
)]
struct Cli {
    /// Path to configuration file (defaults to config/concord.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read an assessment document from a file instead of stdin (repeatable)
    #[arg(short, long)]
    input: Vec<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if cli.pretty {
        config.output.pretty = true;
    }

    if cli.input.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        let report = concord::evaluate(&buf, &config)?;
        println!("{}", concord::render(&report, &config.output)?);
        return Ok(());
    }

    // Fan out one blocking worker per input file
    let mut handles = Vec::new();
    for path in cli.input {
        let config = config.clone();
        handles.push((
            path.clone(),
            tokio::task::spawn_blocking(move || -> Result<String> {
                let document = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read input: {}", path.display()))?;
                let report = concord::evaluate(&document, &config)?;
                Ok(concord::render(&report, &config.output)?)
            }),
        ));
    }

    // Collect results in input order (graceful degradation)
    let total = handles.len();
    let mut failed = 0;
    for (path, handle) in handles {
        match handle.await {
            Ok(Ok(output)) => {
                info!(input = %path.display(), "Input analyzed");
                println!("{output}");
            }
            Ok(Err(e)) => {
                failed += 1;
                error!(input = %path.display(), error = %format!("{e:#}"), "Input failed");
            }
            Err(e) => {
                failed += 1;
                error!(input = %path.display(), error = %e, "Analysis task panicked");
            }
        }
    }

    if failed == total {
        anyhow::bail!("All {total} inputs failed");
    }
    Ok(())
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<ConcordConfig> {
    match explicit {
        Some(path) => concord::load_config(path)?
            .with_context(|| format!("Config not found: {}", path.display())),
        None => Ok(concord::load_config(std::path::Path::new(DEFAULT_CONFIG))?.unwrap_or_default()),
    }
}
