//! `masthead sync` — replace the header of every target page.

use anyhow::{bail, Context, Result};
use clap::Args;

use masthead_core::FailurePolicy;
use masthead_sync::{FileOutcome, SyncOptions};

use super::Site;
use crate::SiteArgs;

/// Arguments for `masthead sync`.
#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Report unreadable or unwritable pages and carry on with the rest.
    #[arg(long)]
    pub keep_going: bool,
}

impl SyncArgs {
    pub fn run(self, site_args: &SiteArgs) -> Result<()> {
        let site = Site::load(site_args)?;
        let sync = site.synchronizer();

        let policy = if self.keep_going {
            FailurePolicy::KeepGoing
        } else {
            site.manifest.on_error
        };
        let options = SyncOptions {
            dry_run: self.dry_run,
            policy,
        };

        let report = sync
            .run_with(options, |outcome| print_outcome(&site, outcome))
            .context("sync failed")?;

        println!();
        if report.failed() > 0 {
            println!(
                "Finished with {} failure(s): {} updated, {} skipped.",
                report.failed(),
                report.updated(),
                report.skipped()
            );
            bail!("{} target(s) could not be updated", report.failed());
        }
        if self.dry_run {
            println!("[dry-run] No files were written.");
        } else {
            let name = report
                .template
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| site.display(&report.template).to_string());
            println!("All headers replaced with {name} header!");
        }
        Ok(())
    }
}

fn print_outcome(site: &Site, outcome: &FileOutcome) {
    let name = site.display(outcome.path());
    match outcome {
        FileOutcome::Updated { .. } => println!("✓ Updated {name}"),
        FileOutcome::WouldUpdate { .. } => println!("[dry-run] ~ Would update {name}"),
        FileOutcome::Skipped { .. } => println!("Skipping {name} (not found)"),
        FileOutcome::Failed { error, .. } => println!("✗ Failed {name}: {error}"),
    }
}
