//! Footer injection command.

use std::path::Path;

use anyhow::{Context, Result};
use pagefoot_inject::{Injector, PartialPolicy};

use crate::commands::resolve_targets;
use crate::config::ConfigFile;
use crate::Targets;

/// Command-line switches that override `[write]` settings.
#[derive(Debug, Default)]
pub struct Flags {
    pub atomic: bool,
    pub allow_partial: bool,
    pub dry_run: bool,
}

/// Run the inject command.
///
/// Per-page failures are reported in the log; they do not fail the command.
pub fn run(config_path: &Path, targets: Targets, flags: Flags) -> Result<()> {
    let config = ConfigFile::load(config_path)?;
    let fragment = config.fragment()?;

    let mut options = config.inject_options();
    options.atomic |= flags.atomic;
    options.dry_run = flags.dry_run;
    if flags.allow_partial {
        options.partial = PartialPolicy::Allow;
    }

    let (dir, pages) = resolve_targets(targets, &config)?;

    tracing::info!("Injecting footer into {} pages in {}", pages.len(), dir.display());

    let injector = Injector::new(fragment, options).context("Invalid [write] settings")?;
    let summary = injector.run(&dir, &pages);

    if flags.dry_run {
        tracing::info!(
            "Dry run: {}/{} files would be modified",
            summary.count(&pagefoot_inject::PageStatus::WouldModify),
            summary.total
        );
    } else {
        tracing::info!("Footer addition complete in {}ms", summary.duration_ms);
        tracing::info!("Modified files: {}/{}", summary.modified, summary.total);
    }

    Ok(())
}
