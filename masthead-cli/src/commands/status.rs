//! `masthead status` — header freshness per target page.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use masthead_sync::{
    check_status,
    status::{format_datetime_age, HeaderStatus, StatusReport},
};

use super::Site;
use crate::SiteArgs;

/// Arguments for `masthead status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self, site_args: &SiteArgs) -> Result<()> {
        let site = Site::load(site_args)?;
        let report = check_status(&site.synchronizer()).context("status check failed")?;

        if self.json {
            print_json(&site, report)?;
            return Ok(());
        }

        print_table(&site, report);
        Ok(())
    }
}

#[derive(Serialize)]
struct StatusReportJson {
    template: String,
    template_sha256: String,
    summary: StatusSummaryJson,
    targets: Vec<TargetStatusJson>,
}

#[derive(Serialize)]
struct StatusSummaryJson {
    targets: usize,
    current: usize,
    stale: usize,
    no_header: usize,
    missing: usize,
}

#[derive(Serialize)]
struct TargetStatusJson {
    path: String,
    status: String,
    header_sha256: Option<String>,
    modified_at: Option<String>,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "page")]
    page: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "header")]
    header: String,
    #[tabled(rename = "modified")]
    modified: String,
}

fn print_json(site: &Site, report: StatusReport) -> Result<()> {
    let payload = StatusReportJson {
        template: site.display(&report.template).to_string(),
        template_sha256: report.template_sha256.clone(),
        summary: StatusSummaryJson {
            targets: report.targets.len(),
            current: report.count(HeaderStatus::Current),
            stale: report.count(HeaderStatus::Stale),
            no_header: report.count(HeaderStatus::NoHeader),
            missing: report.count(HeaderStatus::Missing),
        },
        targets: report
            .targets
            .iter()
            .map(|t| TargetStatusJson {
                path: site.display(&t.path).to_string(),
                status: status_key(t.status).to_string(),
                header_sha256: t.header_sha256.clone(),
                modified_at: t.modified_at.map(|m| m.to_rfc3339()),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(site: &Site, report: StatusReport) {
    println!(
        "Masthead v{} | template {} ({}) | {} pages | {} stale",
        env!("CARGO_PKG_VERSION"),
        site.display(&report.template),
        short_digest(&report.template_sha256),
        report.targets.len(),
        report.count(HeaderStatus::Stale),
    );

    if report.targets.is_empty() {
        println!("No target pages listed.");
        return;
    }

    let separator = "■".repeat(60).bright_black().to_string();
    println!("{separator}");
    println!(
        "Indicators: {} CURRENT  {} STALE  {} NO HEADER  {} MISSING",
        status_indicator(HeaderStatus::Current),
        status_indicator(HeaderStatus::Stale),
        status_indicator(HeaderStatus::NoHeader),
        status_indicator(HeaderStatus::Missing),
    );
    println!("{separator}");

    let rows: Vec<StatusTableRow> = report
        .targets
        .iter()
        .map(|t| StatusTableRow {
            page: site.display(&t.path).to_string(),
            status: format!("{} {}", status_indicator(t.status), status_label(t.status)),
            header: t
                .header_sha256
                .as_deref()
                .map(short_digest)
                .unwrap_or("-")
                .to_string(),
            modified: t
                .modified_at
                .map(|m| format!("{} ago", format_datetime_age(m)))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if report.targets.iter().any(|t| t.status.needs_sync()) {
        println!("Run 'masthead sync' to update stale pages.");
    }
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

fn status_key(status: HeaderStatus) -> &'static str {
    match status {
        HeaderStatus::Current => "current",
        HeaderStatus::Stale => "stale",
        HeaderStatus::NoHeader => "no_header",
        HeaderStatus::Missing => "missing",
    }
}

fn status_label(status: HeaderStatus) -> &'static str {
    match status {
        HeaderStatus::Current => "CURRENT",
        HeaderStatus::Stale => "STALE",
        HeaderStatus::NoHeader => "NO HEADER",
        HeaderStatus::Missing => "MISSING",
    }
}

fn status_indicator(status: HeaderStatus) -> String {
    match status {
        HeaderStatus::Current => "■".green().bold().to_string(),
        HeaderStatus::Stale => "■".yellow().bold().to_string(),
        HeaderStatus::NoHeader => "■".magenta().bold().to_string(),
        HeaderStatus::Missing => "■".bright_black().bold().to_string(),
    }
}
