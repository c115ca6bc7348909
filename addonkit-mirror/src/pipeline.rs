//! Mirror pipeline entrypoint used by the CLI.

use std::path::Path;

use chrono::Utc;

use addonkit_core::MirrorConfig;

use crate::clean::{clean_target, plan_clean, CleanOutcome};
use crate::copy::{copy_tree, plan_copy};
use crate::error::MirrorError;
use crate::fetch::RepoFetcher;
use crate::report::{DestinationReport, DestinationStatus, MirrorReport};
use crate::scratch::Scratch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorOptions {
    /// Clone and inspect, but leave every destination untouched.
    pub dry_run: bool,
}

/// Clone `config.source_url` and mirror it into every destination.
///
/// Only a failed clone (or an invalid config) returns `Err`. The scratch
/// clone is gone by the time this function returns, on every path.
pub fn mirror(
    config: &MirrorConfig,
    fetcher: &dyn RepoFetcher,
    options: MirrorOptions,
) -> Result<MirrorReport, MirrorError> {
    config.validate()?;
    let started_at = Utc::now();
    let subdir = config.resolved_subdir();

    let scratch = Scratch::acquire(fetcher, &config.source_url).map_err(|e| {
        tracing::error!(error = %e, "could not acquire repository");
        e
    })?;

    let mut destinations = Vec::with_capacity(config.destinations.len());
    for (root, target) in config.targets() {
        let report = if options.dry_run {
            plan_destination(scratch.path(), &root, &target, &config.exclude)
        } else {
            mirror_destination(scratch.path(), &root, &target, &config.exclude)
        };
        destinations.push(report);
    }
    drop(scratch);

    Ok(MirrorReport {
        source_url: config.source_url.clone(),
        subdir,
        dry_run: options.dry_run,
        started_at,
        finished_at: Utc::now(),
        destinations,
    })
}

fn mirror_destination(
    scratch: &Path,
    root: &Path,
    target: &Path,
    exclude: &[String],
) -> DestinationReport {
    if let Err(e) = std::fs::create_dir_all(target) {
        tracing::error!(target = %target.display(), error = %e, "cannot create target; skipping");
        return DestinationReport::new(
            root,
            target,
            DestinationStatus::Skipped {
                reason: format!("cannot create {}: {e}", target.display()),
            },
        );
    }

    let mut report = DestinationReport::new(root, target, DestinationStatus::Mirrored);

    match clean_target(target, exclude) {
        CleanOutcome::Cleaned { removed } => report.removed = removed,
        CleanOutcome::Abandoned { removed, failure } => {
            tracing::warn!(
                path = %failure.path.display(),
                error = %failure.message,
                "permission denied; skipping deletion of remaining files"
            );
            report.removed = removed;
            report.failures.push(failure);
        }
        CleanOutcome::Failed { removed, failure } => {
            tracing::error!(
                target = %target.display(),
                error = %failure.message,
                "error cleaning target; skipping"
            );
            report.removed = removed;
            report.status = DestinationStatus::Skipped {
                reason: format!("cleanup failed at {}: {}", failure.path.display(), failure.message),
            };
            report.failures.push(failure);
            return report;
        }
    }

    let summary = copy_tree(scratch, target, exclude);
    report.copied = summary.copied;
    report.failures.extend(summary.failures);
    if !report.failures.is_empty() {
        report.status = DestinationStatus::Partial;
    }

    tracing::info!(
        target = %target.display(),
        removed = report.removed,
        copied = report.copied,
        failures = report.failures.len(),
        "destination mirrored"
    );
    report
}

fn plan_destination(
    scratch: &Path,
    root: &Path,
    target: &Path,
    exclude: &[String],
) -> DestinationReport {
    let mut report = DestinationReport::new(root, target, DestinationStatus::Planned);
    report.removed = plan_clean(target, exclude);
    report.copied = plan_copy(scratch, exclude);
    tracing::info!(
        target = %target.display(),
        removed = report.removed,
        copied = report.copied,
        "[dry-run] would mirror"
    );
    report
}
