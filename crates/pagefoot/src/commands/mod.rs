//! CLI commands.

pub mod init;
pub mod inject;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use pagefoot_inject::discover_pages;

use crate::config::ConfigFile;
use crate::Targets;

/// Site directory and page list for a run, after applying CLI overrides.
pub(crate) fn resolve_targets(
    targets: Targets,
    config: &ConfigFile,
) -> Result<(PathBuf, Vec<String>)> {
    let dir = targets.dir.unwrap_or_else(|| config.site.dir.clone());

    let pages = if !targets.pages.is_empty() {
        targets.pages
    } else if targets.all {
        discover_pages(&dir, targets.recursive)
            .with_context(|| format!("Failed to list pages in {}", dir.display()))?
    } else {
        config.site.pages.clone()
    };

    Ok((dir, pages))
}
