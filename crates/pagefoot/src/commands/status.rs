//! Status command: report what `inject` would do.

use std::path::Path;

use anyhow::{Context, Result};
use pagefoot_inject::{Injector, PageStatus};

use crate::commands::resolve_targets;
use crate::config::ConfigFile;
use crate::Targets;

/// Run the status command.
pub fn run(config_path: &Path, targets: Targets) -> Result<()> {
    let config = ConfigFile::load(config_path)?;
    let fragment = config.fragment()?;

    let mut options = config.inject_options();
    options.dry_run = true;

    let (dir, pages) = resolve_targets(targets, &config)?;
    let injector = Injector::new(fragment, options).context("Invalid [write] settings")?;
    let summary = injector.run(&dir, &pages);

    tracing::info!(
        "{} with footer, {} pending, {} missing, {} failing (of {})",
        summary.count(&PageStatus::AlreadyPresent),
        summary.count(&PageStatus::WouldModify),
        summary.count(&PageStatus::NotFound),
        summary.count(&PageStatus::Failed(String::new())),
        summary.total
    );

    Ok(())
}
