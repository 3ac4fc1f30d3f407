//! Configuration file structure (pagefoot.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pagefoot_inject::{
    Fragment, InjectOptions, PartialPolicy, DEFAULT_BACKUP_SUFFIX, DEFAULT_SENTINEL,
};
use serde::Deserialize;

/// Pages processed when no list is configured.
pub const DEFAULT_PAGES: &[&str] = &[
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
];

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub site: SiteConfig,
    pub footer: FooterConfig,
    pub write: WriteConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory the page names are resolved against
    pub dir: PathBuf,
    pub pages: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public"),
            pages: DEFAULT_PAGES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub sentinel: String,
    /// File replacing the built-in style block
    pub style: Option<PathBuf>,
    /// File replacing the built-in footer markup
    pub markup: Option<PathBuf>,
    pub minify: bool,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            style: None,
            markup: None,
            minify: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WriteConfig {
    pub backup_suffix: String,
    pub atomic: bool,
    pub allow_partial: bool,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            atomic: false,
            allow_partial: false,
        }
    }
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Build the footer fragment described by the `[footer]` section.
    pub fn fragment(&self) -> Result<Fragment> {
        let fragment = Fragment::from_files(
            self.footer.style.as_deref(),
            self.footer.markup.as_deref(),
            &self.footer.sentinel,
        )
        .context("Failed to prepare footer fragment")?;

        Ok(if self.footer.minify {
            fragment.minified()
        } else {
            fragment
        })
    }

    /// Injector options from the `[write]` section.
    pub fn inject_options(&self) -> InjectOptions {
        InjectOptions {
            backup_suffix: self.write.backup_suffix.clone(),
            atomic: self.write.atomic,
            partial: if self.write.allow_partial {
                PartialPolicy::Allow
            } else {
                PartialPolicy::Reject
            },
            dry_run: false,
        }
    }
}
