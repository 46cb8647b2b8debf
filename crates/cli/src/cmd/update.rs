use color_eyre::eyre::WrapErr;
use wikifmt_core::batch::{FileOutcome, FrontmatterBatch};
use wikifmt_core::config::ResolvedConfig;
use wikifmt_core::frontmatter::RuleKind;

use crate::UpdateArgs;

pub fn run(rc: &ResolvedConfig, args: UpdateArgs) -> color_eyre::Result<()> {
    let kinds: Vec<RuleKind> = args.rules.into_iter().map(Into::into).collect();
    let rules = rc.frontmatter.merge_rules(&kinds);

    let report = FrontmatterBatch::new(rules)
        .with_document(rc.frontmatter.document())
        .with_dry_run(args.dry_run)
        .run(&args.dir)
        .wrap_err_with(|| format!("failed to update notes in {}", args.dir.display()))?;

    for (path, outcome) in &report.files {
        match outcome {
            FileOutcome::Updated => println!("updated {}", path.display()),
            FileOutcome::WouldUpdate => println!("would update {}", path.display()),
            FileOutcome::Unchanged => {}
        }
    }

    let changed = report.changed().count();
    if args.dry_run {
        println!("{changed} of {} note(s) would change", report.len());
    } else {
        println!("{changed} of {} note(s) updated", report.len());
    }
    Ok(())
}
