//! Pandoc filter entry point: `pandoc --filter pandoc-dendron-links`.
//!
//! Pandoc runs filters as `<filter> <output-format>` with the JSON AST on
//! stdin, so this takes no flags. Link settings come from the usual config
//! file (`WIKIFMT_CONFIG` overrides its location).

use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;
use wikifmt_core::config::ConfigLoader;
use wikifmt_core::pandoc::run_filter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!(e))?;

    let format = std::env::args().nth(1).unwrap_or_default();
    let config_path = std::env::var_os("WIKIFMT_CONFIG").map(PathBuf::from);
    let rc = ConfigLoader::load(config_path.as_deref()).wrap_err("failed to load configuration")?;

    let rule = rc.links.rule();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_filter(BufReader::new(stdin.lock()), BufWriter::new(stdout.lock()), &format, &rule)
        .wrap_err("link filter failed")
}
