//! Domain types for a masthead site.
//!
//! All path fields use `PathBuf`. Relative paths are resolved against a site
//! root at use time; absolute paths are kept as written.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Template location used when no manifest overrides it.
pub const DEFAULT_TEMPLATE: &str = "/tmp/header_template.html";

/// Pages updated when no manifest overrides the list. `index.html` is the
/// page the template is taken from, so it is not a target.
pub const DEFAULT_TARGETS: &[&str] = &[
    "about.html",
    "services.html",
    "news.html",
    "article.html",
    "online-services.html",
    "notary-request.html",
    "contact.html",
    "privacy.html",
    "disclaimer.html",
];

// ---------------------------------------------------------------------------
// FailurePolicy
// ---------------------------------------------------------------------------

/// What a run does when a target file exists but cannot be read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing target and return its error.
    #[default]
    FailFast,
    /// Record the failure against that target and carry on with the rest.
    KeepGoing,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FailFast => "fail_fast",
            Self::KeepGoing => "keep_going",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// SiteManifest
// ---------------------------------------------------------------------------

/// Contents of `masthead.yaml`: the header template and the pages it is
/// propagated to, in reporting order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteManifest {
    pub template: PathBuf,
    pub targets: Vec<PathBuf>,
    #[serde(default)]
    pub on_error: FailurePolicy,
}

impl Default for SiteManifest {
    fn default() -> Self {
        Self {
            template: PathBuf::from(DEFAULT_TEMPLATE),
            targets: DEFAULT_TARGETS.iter().map(PathBuf::from).collect(),
            on_error: FailurePolicy::default(),
        }
    }
}

impl SiteManifest {
    /// Template path resolved against `root`.
    pub fn template_path(&self, root: &Path) -> PathBuf {
        root.join(&self.template)
    }

    /// Target paths resolved against `root`, in manifest order.
    pub fn target_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.targets.iter().map(|t| root.join(t)).collect()
    }
}
