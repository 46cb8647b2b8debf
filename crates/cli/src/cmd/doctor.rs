use std::path::Path;

use wikifmt_core::config::{ConfigError, ResolvedConfig, default_config_path};
use wikifmt_core::frontmatter::RuleKind;

pub fn run(
    config_path: Option<&Path>,
    loaded: Result<ResolvedConfig, ConfigError>,
) -> color_eyre::Result<()> {
    match loaded {
        Ok(rc) => {
            println!("OK   wikifmt doctor");
            println!("core: {}", wikifmt_core::version());
            match rc.source {
                Some(ref path) => println!("path: {}", path.display()),
                None => {
                    println!("path: (defaults, no file at {})", default_config_path().display());
                }
            }

            let fm = &rc.frontmatter;
            println!("frontmatter.delimiter: {}", fm.delimiter);
            println!("frontmatter.key_order: {}", fm.key_order.join(", "));
            println!("frontmatter.bibliography: {}", fm.bibliography.join(", "));
            println!("frontmatter.filters: {}", fm.filters.join(", "));
            let rules: Vec<&str> = fm.rules.iter().copied().map(RuleKind::as_str).collect();
            println!("frontmatter.rules: {}", rules.join(", "));

            println!("links.prefix: {}", rc.links.prefix);
            println!("links.extension: {}", rc.links.extension);
            println!("links.label: {}", rc.links.label.as_str());

            println!("logging.level: {}", rc.logging.level);
            if let Some(ref file) = rc.logging.file {
                println!("logging.file: {}", file.display());
            }
            Ok(())
        }
        Err(e) => {
            println!("FAIL wikifmt doctor");
            println!("{e}");
            if config_path.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
