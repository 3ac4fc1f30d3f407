//! Footer injector.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::fragment::Fragment;
use crate::splice::{splice, PartialPolicy, SpliceError};

/// Suffix appended to a page's file name to form its backup path.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".backup-footer";

/// Suffix of the sibling file used for atomic writes.
const TEMP_SUFFIX: &str = ".pagefoot-tmp";

/// Options controlling how pages are written.
#[derive(Debug, Clone)]
pub struct InjectOptions {
    /// Appended to the file name to form the backup path
    pub backup_suffix: String,

    /// Write through a temporary sibling and rename over the original
    pub atomic: bool,

    /// Handling of documents missing a closing tag
    pub partial: PartialPolicy,

    /// Report what would change without writing anything
    pub dry_run: bool,
}

impl Default for InjectOptions {
    fn default() -> Self {
        Self {
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            atomic: false,
            partial: PartialPolicy::Reject,
            dry_run: false,
        }
    }
}

/// Outcome of processing a single existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Sentinel found, file left alone
    AlreadyPresent,

    /// Backup written and footer injected
    Modified,

    /// Dry run: the footer would have been injected
    WouldModify,
}

/// Final classification of one page in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    AlreadyPresent,
    Modified,
    WouldModify,
    NotFound,
    Failed(String),
}

impl From<FileOutcome> for PageStatus {
    fn from(outcome: FileOutcome) -> Self {
        match outcome {
            FileOutcome::AlreadyPresent => PageStatus::AlreadyPresent,
            FileOutcome::Modified => PageStatus::Modified,
            FileOutcome::WouldModify => PageStatus::WouldModify,
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageStatus::AlreadyPresent => write!(f, "already has footer"),
            PageStatus::Modified => write!(f, "footer added"),
            PageStatus::WouldModify => write!(f, "would add footer"),
            PageStatus::NotFound => write!(f, "not found"),
            PageStatus::Failed(message) => write!(f, "error: {}", message),
        }
    }
}

/// Status of one page, in list order.
#[derive(Debug, Clone)]
pub struct PageReport {
    /// Page name as given in the list
    pub page: String,

    /// Resolved path under the base directory
    pub path: PathBuf,

    pub status: PageStatus,
}

/// Result of a run over a page list.
#[derive(Debug)]
pub struct RunSummary {
    /// One entry per candidate page
    pub reports: Vec<PageReport>,

    /// Pages that received the footer
    pub modified: usize,

    /// Candidate pages, including ones missing on disk
    pub total: usize,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

impl RunSummary {
    /// Number of pages with the given status.
    pub fn count(&self, status: &PageStatus) -> usize {
        self.reports
            .iter()
            .filter(|r| match (&r.status, status) {
                (PageStatus::Failed(_), PageStatus::Failed(_)) => true,
                (a, b) => a == b,
            })
            .count()
    }
}

/// Errors that can occur while injecting a single file.
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to write backup {path}: {message}")]
    Backup { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },

    #[error("{path}: {source}")]
    Splice { path: String, source: SpliceError },
}

/// Errors in injector options.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("Invalid backup suffix '{suffix}': {reason}")]
    InvalidBackupSuffix { suffix: String, reason: &'static str },
}

fn validate_backup_suffix(suffix: &str) -> Result<(), OptionsError> {
    let reason = if suffix.is_empty() {
        "backup would overwrite the page"
    } else if suffix == TEMP_SUFFIX {
        "backup would be replaced by the atomic write temp file"
    } else if suffix.chars().any(std::path::is_separator) {
        "suffix must not contain a path separator"
    } else {
        return Ok(());
    };

    Err(OptionsError::InvalidBackupSuffix {
        suffix: suffix.to_string(),
        reason,
    })
}

/// Injects a footer fragment into HTML files.
pub struct Injector {
    fragment: Fragment,
    options: InjectOptions,
}

impl Injector {
    /// Create a new injector.
    ///
    /// Fails if the backup suffix would make the backup path collide with the
    /// page itself, its temp file, or a path outside the page's directory.
    pub fn new(fragment: Fragment, options: InjectOptions) -> Result<Self, OptionsError> {
        validate_backup_suffix(&options.backup_suffix)?;
        Ok(Self { fragment, options })
    }

    /// Backup path for a page: the same path with the backup suffix appended
    /// to its file name.
    pub fn backup_path(&self, path: &Path) -> PathBuf {
        with_suffix(path, &self.options.backup_suffix)
    }

    /// Inject the footer into one existing file.
    ///
    /// The whole new document is built in memory before anything is written.
    /// The backup is written before the page; if it cannot be written the page
    /// is left untouched.
    pub fn inject_file(&self, path: &Path) -> Result<FileOutcome, InjectError> {
        let content = fs::read_to_string(path).map_err(|e| InjectError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        if self.fragment.is_present_in(&content) {
            return Ok(FileOutcome::AlreadyPresent);
        }

        let spliced =
            splice(&content, &self.fragment, self.options.partial).map_err(|source| {
                InjectError::Splice {
                    path: path.display().to_string(),
                    source,
                }
            })?;

        if !spliced.style_inserted || !spliced.markup_inserted {
            tracing::warn!(
                "Partial injection into {} (style: {}, markup: {})",
                path.display(),
                spliced.style_inserted,
                spliced.markup_inserted
            );
        }

        if self.options.dry_run {
            return Ok(FileOutcome::WouldModify);
        }

        let backup = self.backup_path(path);
        fs::write(&backup, &content).map_err(|e| InjectError::Backup {
            path: backup.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!("Wrote backup {}", backup.display());

        if self.options.atomic {
            write_atomic(path, &spliced.content)?;
        } else {
            fs::write(path, &spliced.content).map_err(|e| InjectError::Write {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        Ok(FileOutcome::Modified)
    }

    /// Process every page under `base_dir`, in list order.
    ///
    /// Per-page failures are logged and recorded; they never stop the run.
    pub fn run<S: AsRef<str>>(&self, base_dir: &Path, pages: &[S]) -> RunSummary {
        let start = Instant::now();
        let mut reports = Vec::with_capacity(pages.len());
        let mut modified = 0;

        for page in pages {
            let page = page.as_ref();
            let path = base_dir.join(page);

            let status = if !path.exists() {
                tracing::warn!("{} not found", page);
                PageStatus::NotFound
            } else {
                match self.inject_file(&path) {
                    Ok(outcome) => {
                        match outcome {
                            FileOutcome::AlreadyPresent => {
                                tracing::info!("{} already has footer, skipping", page)
                            }
                            FileOutcome::Modified => tracing::info!("Footer added to {}", page),
                            FileOutcome::WouldModify => {
                                tracing::info!("Would add footer to {}", page)
                            }
                        }
                        outcome.into()
                    }
                    Err(e) => {
                        tracing::error!("Error processing {}: {}", page, e);
                        PageStatus::Failed(e.to_string())
                    }
                }
            };

            if status == PageStatus::Modified {
                modified += 1;
            }

            reports.push(PageReport {
                page: page.to_string(),
                path,
                status,
            });
        }

        RunSummary {
            reports,
            modified,
            total: pages.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Write `content` to a sibling temp file, then rename it over `path`.
fn write_atomic(path: &Path, content: &str) -> Result<(), InjectError> {
    let temp = with_suffix(path, TEMP_SUFFIX);
    let write_err = |e: std::io::Error| InjectError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    fs::write(&temp, content).map_err(write_err)?;
    tracing::debug!("Wrote {}", temp.display());

    if let Err(e) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(write_err(e));
    }

    Ok(())
}
