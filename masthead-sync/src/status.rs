//! Per-page header status for `masthead status`.
//!
//! Classification, per target:
//! 1. `Missing` (page does not exist)
//! 2. `NoHeader` (page has no header region)
//! 3. `Current` (first header region equals the template byte-for-byte)
//! 4. `Stale` (anything else)

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::{
    error::io_err, pattern::find_header, synchronizer::read_existing, template::sha256_hex,
    HeaderSynchronizer, SyncError, Template,
};

/// Header classification for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStatus {
    Current,
    Stale,
    NoHeader,
    Missing,
}

impl HeaderStatus {
    /// Whether a sync would change this page's header.
    pub fn needs_sync(self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Status of one target page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetStatus {
    pub path: PathBuf,
    pub status: HeaderStatus,
    /// SHA-256 of the page's first header region, if it has one.
    pub header_sha256: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// Status of every target, in target order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub template: PathBuf,
    pub template_sha256: String,
    pub targets: Vec<TargetStatus>,
}

impl StatusReport {
    pub fn count(&self, status: HeaderStatus) -> usize {
        self.targets.iter().filter(|t| t.status == status).count()
    }
}

/// Classify every target against the template without writing anything.
pub fn check_status(sync: &HeaderSynchronizer) -> Result<StatusReport, SyncError> {
    let template = Template::load(sync.template_path())?;

    let mut targets = Vec::with_capacity(sync.targets().len());
    for path in sync.targets() {
        targets.push(check_target(path, &template)?);
    }

    Ok(StatusReport {
        template: sync.template_path().to_path_buf(),
        template_sha256: template.digest(),
        targets,
    })
}

fn check_target(path: &Path, template: &Template) -> Result<TargetStatus, SyncError> {
    let Some(content) = read_existing(path)? else {
        return Ok(TargetStatus {
            path: path.to_path_buf(),
            status: HeaderStatus::Missing,
            header_sha256: None,
            modified_at: None,
        });
    };

    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| io_err(path, e))?;

    let (status, header_sha256) = match find_header(&content) {
        None => (HeaderStatus::NoHeader, None),
        Some(range) => {
            let region = &content[range];
            let status = if region == template.content() {
                HeaderStatus::Current
            } else {
                HeaderStatus::Stale
            };
            (status, Some(sha256_hex(region)))
        }
    };

    Ok(TargetStatus {
        path: path.to_path_buf(),
        status,
        header_sha256,
        modified_at: Some(DateTime::<Utc>::from(modified)),
    })
}

/// Compact age of a timestamp, e.g. `42s`, `5m`, `3h`, `2d`.
pub fn format_datetime_age(timestamp: DateTime<Utc>) -> String {
    let age = Utc::now().signed_duration_since(timestamp).num_seconds().max(0) as u64;
    format_seconds(age)
}

fn format_seconds(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }
    if seconds < 60 * 60 {
        return format!("{}m", seconds / 60);
    }
    if seconds < 60 * 60 * 24 {
        return format!("{}h", seconds / (60 * 60));
    }
    format!("{}d", seconds / (60 * 60 * 24))
}
