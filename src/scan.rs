//! Filesystem enumeration for the build.
//!
//! The photos root holds one directory per album:
//!
//! ```text
//! photos/
//! ├── 汕头/
//! │   ├── meta.json        # optional, created on first run
//! │   ├── content.md       # optional, created on first run
//! │   ├── harbour.jpg
//! │   └── market.JPG
//! └── Shantou-2023/
//!     └── ...
//! ```
//!
//! Only immediate children are considered: nested directories inside an
//! album are ignored, and plain files at the photos root are skipped. Both
//! listings are sorted by file name so repeated runs see the same order.
//! Symlinked albums and images are followed. A directory that cannot be read
//! is an error rather than an empty listing.

use crate::config::SiteConfig;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// An album directory found under the photos root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumDir {
    pub path: PathBuf,
    /// Directory name as written on disk (may contain CJK characters).
    pub name: String,
}

fn children(dir: &Path) -> Result<Vec<walkdir::DirEntry>, walkdir::Error> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .collect()
}

/// Immediate subdirectories of `photos_root`, in file-name order.
pub fn album_dirs(photos_root: &Path) -> Result<Vec<AlbumDir>, walkdir::Error> {
    let albums = children(photos_root)?
        .into_iter()
        .filter(|e| {
            let is_dir = e.file_type().is_dir();
            if !is_dir {
                debug!(path = %e.path().display(), "skipping non-directory");
            }
            is_dir
        })
        .map(|e| AlbumDir {
            name: e.file_name().to_string_lossy().into_owned(),
            path: e.into_path(),
        })
        .collect();
    Ok(albums)
}

/// Supported image files directly inside `album_dir`, in file-name order.
pub fn image_files(
    album_dir: &Path,
    config: &SiteConfig,
) -> Result<Vec<PathBuf>, walkdir::Error> {
    let files = children(album_dir)?
        .into_iter()
        .filter(|e| e.file_type().is_file() && config.is_supported(e.path()))
        .map(|e| e.into_path())
        .collect();
    Ok(files)
}
