//! Page discovery for runs without an explicit page list.

use std::path::Path;

use walkdir::WalkDir;

/// Find HTML pages under `dir`.
///
/// Returns paths relative to `dir`, sorted so runs are deterministic. Only
/// files with an `html` extension are listed, which leaves backup and temp
/// files out.
pub fn discover_pages(dir: &Path, recursive: bool) -> Result<Vec<String>, DiscoverError> {
    if !dir.is_dir() {
        return Err(DiscoverError::DirectoryNotFound(dir.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut pages = Vec::new();

    for entry in WalkDir::new(dir)
        .max_depth(max_depth)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ext.eq_ignore_ascii_case("html") {
            continue;
        }

        let relative = path.strip_prefix(dir).unwrap_or(path);
        pages.push(relative.to_string_lossy().into_owned());
    }

    pages.sort();
    tracing::debug!("Discovered {} pages in {}", pages.len(), dir.display());

    Ok(pages)
}

/// Errors that can occur during discovery.
#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn lists_html_files_sorted() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("landing.html"), "").unwrap();
        fs::write(temp.path().join("account.html"), "").unwrap();
        fs::write(temp.path().join("account.html.backup-footer"), "").unwrap();
        fs::write(temp.path().join("app.js"), "").unwrap();

        let pages = discover_pages(temp.path(), false).unwrap();

        assert_eq!(pages, vec!["account.html", "landing.html"]);
    }

    #[test]
    fn recursion_is_opt_in() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("static")).unwrap();
        fs::write(temp.path().join("index.html"), "").unwrap();
        fs::write(temp.path().join("static").join("about.html"), "").unwrap();

        let flat = discover_pages(temp.path(), false).unwrap();
        let deep = discover_pages(temp.path(), true).unwrap();

        assert_eq!(flat, vec!["index.html"]);
        assert_eq!(deep.len(), 2);
        assert!(deep.iter().any(|p| p.ends_with("about.html")));
    }

    #[test]
    fn errors_on_missing_directory() {
        let temp = tempdir().unwrap();

        let result = discover_pages(&temp.path().join("missing"), false);

        assert!(matches!(result, Err(DiscoverError::DirectoryNotFound(_))));
    }
}
