//! Unified diffs of what a sync would change, for `masthead diff`.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use crate::{
    pattern::replace_first_header, synchronizer::read_existing, HeaderSynchronizer, SyncError,
    Template,
};

/// A single page diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Diffs for every target that a sync would change, in target order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    pub diffs: Vec<FileDiff>,
}

/// Substitute the template into each existing target and diff the result
/// against what is on disk.
///
/// No files are written. Missing targets and targets that would not change
/// produce no entry. `root` only shortens the `a/` and `b/` header paths.
pub fn diff_targets(sync: &HeaderSynchronizer, root: &Path) -> Result<DiffReport, SyncError> {
    let template = Template::load(sync.template_path())?;

    let mut diffs = Vec::new();
    for path in sync.targets() {
        let Some(existing) = read_existing(path)? else {
            continue;
        };
        let rendered = replace_first_header(&existing, template.content()).content;
        if existing == rendered {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path.as_path());
        let old_header = format!("a/{}", relative.display());
        let new_header = format!("b/{}", relative.display());
        let unified = TextDiff::from_lines(&existing, &rendered)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            path: path.clone(),
            unified_diff: unified,
        });
    }

    Ok(DiffReport { diffs })
}
