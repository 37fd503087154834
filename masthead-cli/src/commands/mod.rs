pub mod diff;
pub mod init;
pub mod status;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use masthead_core::{manifest, SiteManifest};
use masthead_sync::HeaderSynchronizer;

use crate::SiteArgs;

/// A loaded manifest and the root its relative paths resolve against.
pub struct Site {
    pub root: PathBuf,
    pub manifest: SiteManifest,
}

impl Site {
    pub fn load(args: &SiteArgs) -> Result<Self> {
        if let Some(path) = args.manifest.as_ref() {
            let manifest = manifest::load_file(path)
                .with_context(|| format!("failed to load manifest '{}'", path.display()))?;
            let root = match args.root.clone() {
                Some(root) => root,
                None => match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                    _ => current_dir()?,
                },
            };
            return Ok(Self { root, manifest });
        }

        let root = site_root(args)?;
        let manifest = manifest::load_or_default_at(&root)
            .with_context(|| format!("failed to load manifest in '{}'", root.display()))?;
        Ok(Self { root, manifest })
    }

    pub fn synchronizer(&self) -> HeaderSynchronizer {
        HeaderSynchronizer::from_manifest(&self.manifest, &self.root)
    }

    /// `path` as it should appear in console output: relative to the root
    /// when it lives under it.
    pub fn display<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
        path.strip_prefix(&self.root).unwrap_or(path).display()
    }
}

/// `--root`, or the current directory.
pub fn site_root(args: &SiteArgs) -> Result<PathBuf> {
    match args.root.clone() {
        Some(root) => Ok(root),
        None => current_dir(),
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("could not determine current directory")
}
