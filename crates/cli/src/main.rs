mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::WrapErr;
use std::path::PathBuf;
use wikifmt_core::config::{ConfigError, ConfigLoader, LabelStyle, ResolvedConfig};
use wikifmt_core::frontmatter::RuleKind;

#[derive(Debug, Parser)]
#[command(
    name = "wikifmt",
    version,
    about = "Rewrite Dendron wiki-links for pandoc and normalize note frontmatter"
)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/wikifmt/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Pandoc JSON filter: read an AST on stdin, write it back with [[links]] rewritten
    Filter(FilterArgs),

    /// Merge default fields into the frontmatter of every .md file in a directory
    Update(UpdateArgs),

    /// Validate configuration and print resolved settings
    Doctor,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Output format, as passed by pandoc to its filters
    pub format: Option<String>,

    /// Prepended to every rewritten link target
    #[arg(long)]
    pub prefix: Option<String>,

    /// Extension appended to every rewritten link target
    #[arg(long)]
    pub extension: Option<String>,

    /// How link text is derived from the target
    #[arg(long, value_enum)]
    pub label: Option<LabelArg>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Directory whose .md files are updated (not recursive)
    pub dir: PathBuf,

    /// Merge rule to apply; repeat for several (default: from config)
    #[arg(long = "rule", value_enum)]
    pub rules: Vec<RuleArg>,

    /// Report files that would change without writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LabelArg {
    /// Last dot-separated segment of the target
    LastSegment,
    /// The whole target
    Full,
}

impl From<LabelArg> for LabelStyle {
    fn from(arg: LabelArg) -> Self {
        match arg {
            LabelArg::LastSegment => LabelStyle::LastSegment,
            LabelArg::Full => LabelStyle::Full,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RuleArg {
    /// Ensure `bibliography` lists the configured reference files
    Bibliography,
    /// Ensure `__defaults__.filters` lists the configured filters
    Filters,
}

impl From<RuleArg> for RuleKind {
    fn from(arg: RuleArg) -> Self {
        match arg {
            RuleArg::Bibliography => RuleKind::Bibliography,
            RuleArg::Filters => RuleKind::Filters,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let loaded = ConfigLoader::load(cli.config.as_deref());
    let result = match cli.command {
        Commands::Doctor => cmd::doctor::run(cli.config.as_deref(), loaded),
        Commands::Filter(args) => setup(loaded).and_then(|rc| cmd::filter::run(&rc, args)),
        Commands::Update(args) => setup(loaded).and_then(|rc| cmd::update::run(&rc, args)),
    };
    logging::shutdown();
    result
}

fn setup(loaded: Result<ResolvedConfig, ConfigError>) -> color_eyre::Result<ResolvedConfig> {
    let rc = loaded.wrap_err("failed to load configuration")?;
    logging::init(&rc.logging)?;
    Ok(rc)
}
