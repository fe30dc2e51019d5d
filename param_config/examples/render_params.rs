//! Renders a document from a JSON file of parameters.
//!
//! The file holds a single object mapping parameter keys to their raw string
//! values, standing in for a parameter store:
//!
//! ```text
//! cargo run --example render_params -- --params params.json --prefix /app/schema --pretty
//! ```
//!
//! Set `RUST_LOG=param_config=debug` to trace the build.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use param_config::{BuildArgs, BuildOptions, ConfigBuilder, FetchContext, MemoryStore};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "render-params", about = "Assemble parameters into JSON or YAML")]
struct Cli {
    /// JSON object of parameter keys to raw values.
    #[arg(long, value_name = "FILE")]
    params: PathBuf,

    #[command(flatten)]
    build: BuildArgs,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let raw = std::fs::read_to_string(&cli.params)
        .with_context(|| format!("reading {}", cli.params.display()))?;
    let pairs: BTreeMap<String, String> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", cli.params.display()))?;

    let builder = ConfigBuilder::new(MemoryStore::from_pairs(pairs));
    let options = BuildOptions::from(cli.build);
    let bytes = builder.build_from_prefixes(&FetchContext::new(), &options)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
