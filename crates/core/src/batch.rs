//! Batch frontmatter update over one directory of notes.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::frontmatter::{FrontmatterDocument, FrontmatterError, MergeRule};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("failed to list directory {0}: {1}")]
    Walk(String, #[source] walkdir::Error),

    #[error("failed to read {0}: {1}")]
    Read(String, #[source] std::io::Error),

    #[error("failed to write {0}: {1}")]
    Write(String, #[source] std::io::Error),

    #[error("{0}: {1}")]
    Document(String, #[source] FrontmatterError),
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Rewritten on disk.
    Updated,
    /// Already normalized; left alone.
    Unchanged,
    /// Would be rewritten, but this is a dry run.
    WouldUpdate,
}

/// Per-file outcomes of a batch run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl BatchReport {
    /// Files that were (or would be) rewritten.
    pub fn changed(&self) -> impl Iterator<Item = &Path> {
        self.files
            .iter()
            .filter(|(_, outcome)| *outcome != FileOutcome::Unchanged)
            .map(|(path, _)| path.as_path())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Applies merge rules to the frontmatter of every `.md` file in a directory.
///
/// Only direct children are visited. Files are handled one at a time, each
/// read whole and written whole; the first failure stops the run.
#[derive(Debug, Clone)]
pub struct FrontmatterBatch {
    template: FrontmatterDocument,
    rules: Vec<MergeRule>,
    dry_run: bool,
}

impl FrontmatterBatch {
    pub fn new(rules: Vec<MergeRule>) -> Self {
        Self { template: FrontmatterDocument::new(), rules, dry_run: false }
    }

    /// Use the delimiter, key order and codec of `template` for every file.
    pub fn with_document(mut self, template: FrontmatterDocument) -> Self {
        self.template = template;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run(&self, dir: &Path) -> Result<BatchReport, BatchError> {
        let mut report = BatchReport::default();
        for path in markdown_files(dir)? {
            let outcome = self.update_file(&path)?;
            report.files.push((path, outcome));
        }

        info!(
            dir = %dir.display(),
            files = report.len(),
            changed = report.changed().count(),
            dry_run = self.dry_run,
            "frontmatter batch finished"
        );
        Ok(report)
    }

    pub fn update_file(&self, path: &Path) -> Result<FileOutcome, BatchError> {
        let original = fs::read_to_string(path)
            .map_err(|e| BatchError::Read(path.display().to_string(), e))?;

        let rendered = self
            .render(&original)
            .map_err(|e| BatchError::Document(path.display().to_string(), e))?;

        let outcome = if rendered == original {
            FileOutcome::Unchanged
        } else if self.dry_run {
            FileOutcome::WouldUpdate
        } else {
            fs::write(path, &rendered)
                .map_err(|e| BatchError::Write(path.display().to_string(), e))?;
            FileOutcome::Updated
        };

        debug!(path = %path.display(), ?outcome, "processed note");
        Ok(outcome)
    }

    /// The normalized form of one document's text.
    pub fn render(&self, text: &str) -> Result<String, FrontmatterError> {
        let mut doc = self.template.clone();
        doc.load(text)?;
        doc.apply(&self.rules)?;
        doc.dumps()
    }
}

/// Regular files directly inside `dir` whose name ends in `.md`, by name.
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::NotADirectory(dir.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name()
    {
        let entry = entry.map_err(|e| BatchError::Walk(dir.display().to_string(), e))?;
        let is_markdown = entry.file_name().to_string_lossy().ends_with(".md");
        if entry.file_type().is_file() && is_markdown {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
