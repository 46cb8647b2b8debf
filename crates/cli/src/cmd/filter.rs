use std::io::{self, BufReader, BufWriter};

use color_eyre::eyre::WrapErr;
use tracing::debug;
use wikifmt_core::config::ResolvedConfig;
use wikifmt_core::pandoc::run_filter;

use crate::FilterArgs;

pub fn run(rc: &ResolvedConfig, args: FilterArgs) -> color_eyre::Result<()> {
    let mut links = rc.links.clone();
    if let Some(prefix) = args.prefix {
        links.prefix = prefix;
    }
    if let Some(extension) = args.extension {
        links.extension = extension;
    }
    if let Some(label) = args.label {
        links.label = label.into();
    }

    let format = args.format.unwrap_or_default();
    debug!(
        format = %format,
        prefix = %links.prefix,
        extension = %links.extension,
        "running link filter"
    );

    let rule = links.rule();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_filter(BufReader::new(stdin.lock()), BufWriter::new(stdout.lock()), &format, &rule)
        .wrap_err("link filter failed")
}
