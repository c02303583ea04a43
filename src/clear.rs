//! Removal of generated output.
//!
//! Deletes every `*.html` file directly under the web root plus the
//! `config/`, `data/`, `fonts/` and `images/` directories. Anything else in
//! the web root (hand-written assets, `js/`, the logo) is left alone. Paths
//! that do not exist are skipped, so clearing twice is harmless.

use crate::site::SitePaths;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ClearError {
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to list {path}: {source}")]
    List {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn html_pages(paths: &SitePaths) -> Result<Vec<PathBuf>, ClearError> {
    let entries = match fs::read_dir(&paths.web_root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ClearError::List {
                path: paths.web_root.clone(),
                source,
            });
        }
    };
    let mut pages: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "html"))
        .collect();
    pages.sort();
    Ok(pages)
}

/// Remove generated output; returns the paths that were removed.
pub fn clear(paths: &SitePaths) -> Result<Vec<PathBuf>, ClearError> {
    let mut removed = Vec::new();

    for page in html_pages(paths)? {
        fs::remove_file(&page).map_err(|source| ClearError::Remove {
            path: page.clone(),
            source,
        })?;
        info!(path = %page.display(), "cleared");
        removed.push(page);
    }

    for dir in [
        paths.config_dir(),
        paths.data_dir(),
        paths.fonts_dir(),
        paths.images_dir(),
    ] {
        if !dir.exists() {
            continue;
        }
        fs::remove_dir_all(&dir).map_err(|source| ClearError::Remove {
            path: dir.clone(),
            source,
        })?;
        info!(path = %dir.display(), "cleared");
        removed.push(dir);
    }

    Ok(removed)
}
