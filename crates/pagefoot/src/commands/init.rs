//! Write a default configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'pagefoot inject' to add the footer.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# pagefoot configuration

[site]
# Directory the page names are resolved against
dir = "public"

# Pages to process, in order
pages = [
    "dashboard.html",
    "canvas-v4-hybrid.html",
    "digital-twin.html",
    "digital-twin-pro.html",
    "canvas-v3.html",
    "projects.html",
    "account.html",
    "admin.html",
    "analytics-dashboard.html",
    "workflow.html",
    "workflow-tools.html",
    "budget.html",
    "landing.html",
    "index.html",
]

[footer]
# Pages containing this text are skipped
sentinel = "museflow-footer"

# Replace the built-in blocks with file contents
# style = "footer/style.html"
# markup = "footer/markup.html"

# Minify the CSS in the style block
minify = false

[write]
# Appended to a page's file name for its backup copy
backup_suffix = ".backup-footer"

# Write through a temporary file and rename over the page
atomic = false

# Inject whatever fits when a page lacks </head> or </body>
allow_partial = false
"#;
