//! Header synchronizer: one template, many pages, one pass.
//!
//! The template is loaded once before any page is touched. Each target is then
//! handled independently, in list order: missing pages are skipped, existing
//! pages have their first header region replaced and are rewritten in place.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use masthead_core::{FailurePolicy, SiteManifest};

use crate::error::{io_err, SyncError};
use crate::pattern::replace_first_header;
use crate::template::Template;
use crate::writer::{write_in_place, WriteResult};

// ---------------------------------------------------------------------------
// Options and outcomes
// ---------------------------------------------------------------------------

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Read and substitute, but write nothing.
    pub dry_run: bool,
    pub policy: FailurePolicy,
}

/// Terminal outcome for one target page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The page was rewritten. `header_replaced` is false when the page had
    /// no header region and was written back unchanged.
    Updated { path: PathBuf, header_replaced: bool },
    /// Dry run: the page would have been rewritten.
    WouldUpdate { path: PathBuf, header_replaced: bool },
    /// The page does not exist and was left absent.
    Skipped { path: PathBuf },
    /// The page exists but could not be read or written (keep-going only).
    Failed { path: PathBuf, error: String },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Updated { path, .. }
            | Self::WouldUpdate { path, .. }
            | Self::Skipped { path }
            | Self::Failed { path, .. } => path,
        }
    }
}

/// Everything a finished run produced, in target order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub template: PathBuf,
    pub outcomes: Vec<FileOutcome>,
}

impl SyncReport {
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Updated { .. } | FileOutcome::WouldUpdate { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

// ---------------------------------------------------------------------------
// HeaderSynchronizer
// ---------------------------------------------------------------------------

/// Replaces the header region of each target page with one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSynchronizer {
    template: PathBuf,
    targets: Vec<PathBuf>,
}

impl HeaderSynchronizer {
    /// Build a synchronizer over an explicit, ordered target list.
    ///
    /// Repeated targets are dropped after their first occurrence so that no
    /// page is rewritten twice in a run. The template itself is never a target.
    /// Existing paths are compared after resolving `..` and symlinks; paths
    /// that do not exist yet are compared as written.
    pub fn new(template: impl Into<PathBuf>, targets: impl IntoIterator<Item = PathBuf>) -> Self {
        let template = template.into();
        let template_key = file_identity(&template);
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for target in targets {
            let key = file_identity(&target);
            if key == template_key {
                tracing::warn!("template listed as a target, ignored: {}", target.display());
            } else if seen.insert(key) {
                unique.push(target);
            } else {
                tracing::warn!("duplicate target ignored: {}", target.display());
            }
        }
        Self {
            template,
            targets: unique,
        }
    }

    /// Resolve a manifest's paths against `root`.
    pub fn from_manifest(manifest: &SiteManifest, root: &Path) -> Self {
        Self::new(manifest.template_path(root), manifest.target_paths(root))
    }

    pub fn template_path(&self) -> &Path {
        &self.template
    }

    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    /// Load the template and process every target.
    pub fn run(&self, options: SyncOptions) -> Result<SyncReport, SyncError> {
        self.run_with(options, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_outcome` as soon as each target's
    /// outcome is known.
    ///
    /// Under [`FailurePolicy::FailFast`] the first failing target's error is
    /// returned and later targets are not visited; outcomes already passed to
    /// `on_outcome` stand.
    pub fn run_with(
        &self,
        options: SyncOptions,
        mut on_outcome: impl FnMut(&FileOutcome),
    ) -> Result<SyncReport, SyncError> {
        let template = Template::load(&self.template)?;

        let mut outcomes = Vec::with_capacity(self.targets.len());
        for path in &self.targets {
            let outcome = match sync_file(path, &template, options.dry_run) {
                Ok(outcome) => outcome,
                Err(err) => match options.policy {
                    FailurePolicy::FailFast => return Err(err),
                    FailurePolicy::KeepGoing => {
                        tracing::warn!("failed: {}: {err}", path.display());
                        FileOutcome::Failed {
                            path: path.clone(),
                            error: err.to_string(),
                        }
                    }
                },
            };
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        Ok(SyncReport {
            template: self.template.clone(),
            outcomes,
        })
    }
}

/// Read, substitute and rewrite one page.
fn sync_file(path: &Path, template: &Template, dry_run: bool) -> Result<FileOutcome, SyncError> {
    let Some(content) = read_existing(path)? else {
        tracing::debug!("skipped (not found): {}", path.display());
        return Ok(FileOutcome::Skipped {
            path: path.to_path_buf(),
        });
    };

    let substitution = replace_first_header(&content, template.content());
    let header_replaced = substitution.header_replaced();
    if !header_replaced {
        tracing::debug!("no header region: {}", path.display());
    }

    let outcome = match write_in_place(path, &substitution.content, dry_run)? {
        WriteResult::Written { path } => FileOutcome::Updated {
            path,
            header_replaced,
        },
        WriteResult::WouldWrite { path } => FileOutcome::WouldUpdate {
            path,
            header_replaced,
        },
    };
    Ok(outcome)
}

/// The real file behind `path`, or `path` itself when it cannot be resolved.
fn file_identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Page content, or `None` when the page does not exist.
pub(crate) fn read_existing(path: &Path) -> Result<Option<String>, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
