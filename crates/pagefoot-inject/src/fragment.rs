//! Footer fragment: the style block, the markup block and the sentinel that
//! marks a page as already carrying them.

use std::fs;
use std::path::Path;

/// Substring whose presence means a page already has the footer.
///
/// It appears in both blocks, so a page that only received the style block is
/// still recognized on later runs.
pub const DEFAULT_SENTINEL: &str = "museflow-footer";

/// Style block inserted before `</head>`.
pub const FOOTER_STYLE: &str = r#"
    <style>
        /* MuseFlow Footer Styles */
        .museflow-footer {
            position: fixed;
            bottom: 0;
            left: 0;
            right: 0;
            height: 40px;
            background: linear-gradient(135deg, #1a1a1a 0%, #2d2d2d 100%);
            color: #e5e5e5;
            display: flex;
            align-items: center;
            justify-content: center;
            border-top: 1px solid rgba(255, 255, 255, 0.1);
            z-index: 999999;
            font-size: 0.75rem;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
        }

        .museflow-footer-content {
            display: flex;
            align-items: center;
            gap: 1.5rem;
        }

        .museflow-footer-logo {
            display: flex;
            align-items: center;
            gap: 0.5rem;
            font-weight: 700;
            color: #8B5CF6;
        }

        .museflow-footer-divider {
            width: 1px;
            height: 16px;
            background: rgba(255, 255, 255, 0.2);
        }

        .museflow-footer-text {
            color: #e5e5e5;
        }

        .museflow-footer-version {
            font-weight: 600;
            color: #60A5FA;
        }

        /* Adjust body padding to prevent content overlap */
        body {
            padding-bottom: 40px !important;
        }
    </style>
"#;

/// Footer markup inserted before `</body>`.
pub const FOOTER_MARKUP: &str = r#"
    <!-- MuseFlow Footer -->
    <footer class="museflow-footer">
        <div class="museflow-footer-content">
            <div class="museflow-footer-logo">
                ✨ MuseFlow
            </div>
            <div class="museflow-footer-divider"></div>
            <div class="museflow-footer-text">
                Copyright © 2026, Imageroot
            </div>
            <div class="museflow-footer-divider"></div>
            <div class="museflow-footer-text">
                Made by Hyun Woo Nam Professor
            </div>
            <div class="museflow-footer-divider"></div>
            <div class="museflow-footer-version">
                V4.0
            </div>
        </div>
    </footer>
"#;

/// The pair of blocks injected into every page, plus the sentinel used to
/// detect a previous injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Inserted immediately before the first `</head>`
    pub style: String,

    /// Inserted immediately before the first `</body>`
    pub markup: String,

    /// Marker checked before touching a file
    pub sentinel: String,
}

impl Default for Fragment {
    fn default() -> Self {
        Self {
            style: FOOTER_STYLE.to_string(),
            markup: FOOTER_MARKUP.to_string(),
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}

impl Fragment {
    /// Build a fragment from explicit blocks.
    ///
    /// The sentinel has to occur in at least one block, otherwise reruns could
    /// never tell that a page was already processed.
    pub fn new(
        style: impl Into<String>,
        markup: impl Into<String>,
        sentinel: impl Into<String>,
    ) -> Result<Self, FragmentError> {
        let fragment = Self {
            style: style.into(),
            markup: markup.into(),
            sentinel: sentinel.into(),
        };

        if fragment.sentinel.is_empty()
            || !(fragment.style.contains(&fragment.sentinel)
                || fragment.markup.contains(&fragment.sentinel))
        {
            return Err(FragmentError::MissingSentinel(fragment.sentinel));
        }

        Ok(fragment)
    }

    /// Load replacement blocks from disk. Either path may be omitted, in which
    /// case the built-in block is kept.
    pub fn from_files(
        style: Option<&Path>,
        markup: Option<&Path>,
        sentinel: &str,
    ) -> Result<Self, FragmentError> {
        let style = match style {
            Some(path) => read_block(path)?,
            None => FOOTER_STYLE.to_string(),
        };
        let markup = match markup {
            Some(path) => read_block(path)?,
            None => FOOTER_MARKUP.to_string(),
        };

        Self::new(style, markup, sentinel)
    }

    /// Whether `content` already carries this footer.
    pub fn is_present_in(&self, content: &str) -> bool {
        content.contains(&self.sentinel)
    }

    /// Return a copy whose style block has its CSS minified.
    ///
    /// The markup block is left alone. If the CSS cannot be parsed, or the
    /// minified block would lose the sentinel, the original block is kept.
    pub fn minified(&self) -> Self {
        let mut fragment = self.clone();

        match minify_style_block(&self.style) {
            Ok(style) if style.contains(&self.sentinel) || self.markup.contains(&self.sentinel) => {
                fragment.style = style;
            }
            Ok(_) => {
                tracing::warn!("Minified style block lost the sentinel, keeping original");
            }
            Err(e) => {
                tracing::warn!("Failed to minify footer style: {}", e);
            }
        }

        fragment
    }
}

fn read_block(path: &Path) -> Result<String, FragmentError> {
    fs::read_to_string(path).map_err(|e| FragmentError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Minify the CSS between `<style>` and `</style>`, keeping the surrounding
/// whitespace of the block.
fn minify_style_block(block: &str) -> Result<String, FragmentError> {
    use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

    let open = block
        .find("<style>")
        .ok_or_else(|| FragmentError::Minify("no <style> tag".to_string()))?;
    let body_start = open + "<style>".len();
    let close = block[body_start..]
        .find("</style>")
        .map(|i| body_start + i)
        .ok_or_else(|| FragmentError::Minify("no </style> tag".to_string()))?;

    let stylesheet = StyleSheet::parse(&block[body_start..close], ParserOptions::default())
        .map_err(|e| FragmentError::Minify(format!("CSS parse error: {}", e)))?;

    let minified = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| FragmentError::Minify(format!("CSS minify error: {}", e)))?;

    Ok(format!(
        "{}{}{}",
        &block[..body_start],
        minified.code,
        &block[close..]
    ))
}

/// Errors that can occur when preparing a fragment.
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    #[error("Failed to read fragment file: {path}: {message}")]
    Read { path: String, message: String },

    #[error("Sentinel '{0}' does not occur in the style or markup block")]
    MissingSentinel(String),

    #[error("Failed to minify style block: {0}")]
    Minify(String),
}
