//! `addonkit mirror` — clone the repository and refresh every destination.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use addonkit_mirror::{
    mirror, DestinationReport, DestinationStatus, GitCli, MirrorOptions, MirrorReport,
};

use super::load_config;

/// Arguments for `addonkit mirror`.
#[derive(Args, Debug)]
pub struct MirrorArgs {
    /// Config file to use instead of ~/.addonkit/mirror.yaml.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Clone and report what would change without touching any destination.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the run report as JSON.
    #[arg(long, conflicts_with = "table")]
    pub json: bool,

    /// Render the per-destination results as a table.
    #[arg(long)]
    pub table: bool,
}

impl MirrorArgs {
    pub fn run(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;
        let fetcher = GitCli::new(config.git.clone());

        if !self.json {
            println!("Cloning {} ...", config.source_url);
        }
        let report = mirror(
            &config,
            &fetcher,
            MirrorOptions {
                dry_run: self.dry_run,
            },
        )
        .with_context(|| format!("mirror of '{}' aborted", config.source_url))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if self.table {
            print_table(&report);
        } else {
            print_report(&report);
        }
        Ok(())
    }
}

fn print_report(report: &MirrorReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    for d in &report.destinations {
        print_destination(prefix, d);
    }
    print_summary(prefix, report);
}

fn print_destination(prefix: &str, d: &DestinationReport) {
    let target = d.target.display();
    match &d.status {
        DestinationStatus::Mirrored => println!(
            "{prefix}{} {target} ({} removed, {} copied)",
            "✓".green(),
            d.removed,
            d.copied
        ),
        DestinationStatus::Partial => {
            println!(
                "{prefix}{} {target} ({} removed, {} copied, {} failed)",
                "!".yellow(),
                d.removed,
                d.copied,
                d.failures.len()
            );
            for f in &d.failures {
                println!("    {}: {}", f.path.display(), f.message);
            }
        }
        DestinationStatus::Skipped { reason } => {
            println!("{prefix}{} {target} — skipped: {reason}", "✗".red())
        }
        DestinationStatus::Planned => println!(
            "{prefix}~ {target} (would remove {}, copy {})",
            d.removed, d.copied
        ),
    }
}

fn print_summary(prefix: &str, report: &MirrorReport) {
    if report.destinations.is_empty() {
        println!("{prefix}No destinations configured. Run `addonkit config init` to create a config.");
        return;
    }
    let ok = report.count(|s| matches!(s, DestinationStatus::Mirrored | DestinationStatus::Planned));
    let partial = report.count(|s| matches!(s, DestinationStatus::Partial));
    let skipped = report.count(|s| matches!(s, DestinationStatus::Skipped { .. }));
    let line = format!(
        "{prefix}'{}' → {} destination(s): {ok} ok, {partial} partial, {skipped} skipped",
        report.subdir,
        report.destinations.len()
    );
    if report.is_clean() {
        println!("{}", line.green());
    } else {
        println!("{}", line.yellow());
    }
}

#[derive(Tabled)]
struct DestinationRow {
    #[tabled(rename = "target")]
    target: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "removed")]
    removed: usize,
    #[tabled(rename = "copied")]
    copied: usize,
    #[tabled(rename = "failures")]
    failures: usize,
}

fn status_label(status: &DestinationStatus) -> String {
    match status {
        DestinationStatus::Mirrored => "mirrored".to_string(),
        DestinationStatus::Partial => "partial".to_string(),
        DestinationStatus::Skipped { reason } => format!("skipped: {reason}"),
        DestinationStatus::Planned => "planned".to_string(),
    }
}

fn print_table(report: &MirrorReport) {
    let rows: Vec<DestinationRow> = report
        .destinations
        .iter()
        .map(|d| DestinationRow {
            target: d.target.display().to_string(),
            status: status_label(&d.status),
            removed: d.removed,
            copied: d.copied,
            failures: d.failures.len(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
