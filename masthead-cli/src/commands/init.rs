//! `masthead init [--template <path>] [--target <path>]... [--scan]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use masthead_core::manifest;

use super::site_root;
use crate::SiteArgs;

/// Write `<root>/masthead.yaml`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Header template path (default: /tmp/header_template.html).
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Target page, relative to the site root. Repeat for each page; order is kept.
    #[arg(long = "target", value_name = "PATH", conflicts_with = "scan")]
    pub targets: Vec<PathBuf>,

    /// List every *.html page in the site root except index.html.
    #[arg(long)]
    pub scan: bool,
}

impl InitArgs {
    pub fn run(self, site_args: &SiteArgs) -> Result<()> {
        let root = site_root(site_args)?;
        let path = manifest::manifest_path_at(&root);
        let existed = path.exists();

        let written = manifest::init_at(&root, self.template, self.targets, self.scan)
            .with_context(|| format!("failed to init manifest in '{}'", root.display()))?;

        if existed {
            println!("✓ Manifest already present at {}", path.display());
        } else {
            println!("✓ Wrote {}", path.display());
        }
        println!("  template: {}", written.template.display());
        println!("  targets:  {}", written.targets.len());
        Ok(())
    }
}
