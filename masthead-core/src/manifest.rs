//! `masthead.yaml` persistence.
//!
//! # Storage layout
//!
//! ```text
//! <site root>/
//!   masthead.yaml      (template path, target list, failure policy)
//!   about.html
//!   ...
//! ```
//!
//! Every function takes the site root explicitly so tests can point it at a
//! `TempDir`. A missing manifest is not an error for [`load_or_default_at`]:
//! the built-in [`SiteManifest::default`] applies.

use std::path::{Path, PathBuf};

use crate::error::{io_err, ManifestError};
use crate::types::SiteManifest;

/// File name of the manifest inside a site root.
pub const MANIFEST_FILE: &str = "masthead.yaml";

/// Page the template is lifted from; never a target of its own header.
const TEMPLATE_SOURCE_PAGE: &str = "index.html";

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<root>/masthead.yaml` — pure, no I/O.
pub fn manifest_path_at(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load a manifest from an explicit file path.
///
/// Returns `ManifestError::NotFound` if absent,
/// `ManifestError::Parse` (with path + line context) if malformed YAML.
pub fn load_file(path: &Path) -> Result<SiteManifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load `<root>/masthead.yaml`.
pub fn load_at(root: &Path) -> Result<SiteManifest, ManifestError> {
    load_file(&manifest_path_at(root))
}

/// Load `<root>/masthead.yaml`, falling back to the built-in defaults when
/// the file does not exist. Malformed manifests are still an error.
pub fn load_or_default_at(root: &Path) -> Result<SiteManifest, ManifestError> {
    match load_at(root) {
        Err(ManifestError::NotFound { path }) => {
            tracing::debug!("no manifest at {}, using built-in defaults", path.display());
            Ok(SiteManifest::default())
        }
        other => other,
    }
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save `manifest` to `<root>/masthead.yaml`.
///
/// Write flow: serialize → `masthead.yaml.tmp` sibling → `rename`.
pub fn save_at(root: &Path, manifest: &SiteManifest) -> Result<(), ManifestError> {
    std::fs::create_dir_all(root).map_err(|e| io_err(root, e))?;
    let path = manifest_path_at(root);
    let tmp_path = path.with_file_name(format!("{MANIFEST_FILE}.tmp"));

    let yaml = serde_yaml::to_string(manifest)?;
    std::fs::write(&tmp_path, yaml).map_err(|e| io_err(&tmp_path, e))?;
    if let Err(e) = std::fs::rename(&tmp_path, &path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// 4. Init
// ---------------------------------------------------------------------------

/// Every `*.html` file directly inside `root`, sorted by name, excluding
/// `index.html`.
pub fn scan_targets_at(root: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    let mut names: Vec<String> = std::fs::read_dir(root)
        .map_err(|e| io_err(root, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".html") && name != TEMPLATE_SOURCE_PAGE)
        .collect();
    names.sort();
    Ok(names.into_iter().map(PathBuf::from).collect())
}

/// Write a manifest for the site at `root`.
///
/// `template` and `targets` override the defaults when given; `scan` replaces
/// the target list with [`scan_targets_at`]. Idempotent: if the manifest
/// already exists it is loaded and returned unchanged.
pub fn init_at(
    root: &Path,
    template: Option<PathBuf>,
    targets: Vec<PathBuf>,
    scan: bool,
) -> Result<SiteManifest, ManifestError> {
    let path = manifest_path_at(root);
    if path.exists() {
        return load_file(&path);
    }

    let mut manifest = SiteManifest::default();
    if let Some(template) = template {
        manifest.template = template;
    }
    if scan {
        manifest.targets = scan_targets_at(root)?;
    } else if !targets.is_empty() {
        manifest.targets = targets;
    }

    save_at(root, &manifest)?;
    tracing::info!("wrote manifest: {}", path.display());
    Ok(manifest)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
