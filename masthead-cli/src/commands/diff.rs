//! `masthead diff` — show unified diffs for what sync would write.

use anyhow::{Context, Result};
use clap::Args;

use masthead_sync::diff_targets;

use super::Site;
use crate::SiteArgs;

/// Arguments for `masthead diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {}

impl DiffArgs {
    pub fn run(self, site_args: &SiteArgs) -> Result<()> {
        let site = Site::load(site_args)?;
        let result = diff_targets(&site.synchronizer(), &site.root).context("diff failed")?;

        if result.diffs.is_empty() {
            println!("No differences.");
            return Ok(());
        }

        for diff in result.diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
