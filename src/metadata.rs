//! Album metadata resolution.
//!
//! Every album directory may carry a `meta.json` sidecar:
//!
//! ```json
//! {
//!   "id": "shan-tou",
//!   "title": "汕头",
//!   "author": "Lin",
//!   "cover": "images/shan-tou/large_harbour.jpg",
//!   "description": ["First paragraph.", "Second paragraph."]
//! }
//! ```
//!
//! ## Resolution
//!
//! - **Sidecar present**: parsed as-is. A sidecar that fails to parse is
//!   logged and treated as an empty object, so the album still builds with
//!   fallbacks.
//! - **Sidecar absent**: metadata is synthesized from the directory name and
//!   the configured defaults, then written back so the operator can edit it
//!   before the next run. A failed write is logged and ignored.
//!
//! The resolved id and title fall back to the directory name when the loaded
//! metadata leaves them out. An id that is not a single path component
//! (`a/b`, `..`) is replaced by the id derived from the directory name. The first run writes a romanized id, so later
//! runs read back exactly what was synthesized.

use crate::config::SiteConfig;
use crate::naming;
use crate::types::AlbumMeta;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

pub const META_FILE: &str = "meta.json";

/// Where an album's metadata came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaSource {
    /// Parsed from an existing `meta.json`.
    Loaded,
    /// `meta.json` exists but could not be read or parsed.
    Unreadable,
    /// No sidecar existed; defaults were synthesized (and written back if possible).
    Synthesized,
}

/// Metadata for one album with its id and title resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMeta {
    pub id: String,
    pub title: String,
    pub meta: AlbumMeta,
    pub source: MetaSource,
}

impl ResolvedMeta {
    /// Author credited on each image record.
    pub fn image_author(&self) -> String {
        resolve(&[self.meta.author.as_deref()]).unwrap_or_else(|| "Unknown".to_string())
    }

    /// Author credited on the album itself.
    pub fn album_author(&self, config: &SiteConfig) -> String {
        resolve(&[self.meta.author.as_deref(), Some(&config.default_author)]).unwrap_or_default()
    }
}

/// Resolve a metadata field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// one that is not blank, as written.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
}

/// Whether `id` can be used as a single file name under the web root.
pub fn is_safe_id(id: &str) -> bool {
    !id.contains(['/', '\\']) && id != "." && id != ".."
}

fn resolve_id(meta: &AlbumMeta, dir_name: &str) -> String {
    let id =
        resolve(&[meta.id.as_deref(), Some(dir_name)]).unwrap_or_else(|| dir_name.to_string());
    if is_safe_id(&id) {
        return id;
    }
    let derived = naming::album_id(dir_name);
    warn!(album = dir_name, id = %id, "unusable album id in {META_FILE}, using {derived}");
    derived
}

/// Default metadata for an album that has no sidecar yet.
pub fn synthesize_meta(dir_name: &str, config: &SiteConfig) -> AlbumMeta {
    AlbumMeta {
        id: Some(naming::album_id(dir_name)),
        title: Some(dir_name.to_string()),
        author: Some(config.default_author.clone()),
        cover: None,
        description: Some(config.default_description.clone()),
    }
}

/// Load or synthesize the metadata of the album in `album_dir`.
pub fn resolve_meta(album_dir: &Path, dir_name: &str, config: &SiteConfig) -> ResolvedMeta {
    let meta_path = album_dir.join(META_FILE);

    let (meta, source) = if meta_path.exists() {
        match read_meta(&meta_path) {
            Ok(meta) => (meta, MetaSource::Loaded),
            Err(e) => {
                error!(album = dir_name, path = %meta_path.display(), "failed to read {META_FILE}: {e}");
                (AlbumMeta::default(), MetaSource::Unreadable)
            }
        }
    } else {
        info!(album = dir_name, "{META_FILE} not found, creating default");
        let meta = synthesize_meta(dir_name, config);
        if let Err(e) = write_meta(&meta_path, &meta) {
            error!(album = dir_name, path = %meta_path.display(), "failed to write default {META_FILE}: {e}");
        }
        (meta, MetaSource::Synthesized)
    };

    ResolvedMeta {
        id: resolve_id(&meta, dir_name),
        title: resolve(&[meta.title.as_deref(), Some(dir_name)])
            .unwrap_or_else(|| dir_name.to_string()),
        meta,
        source,
    }
}

#[derive(Debug, thiserror::Error)]
enum SidecarError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

fn read_meta(path: &Path) -> Result<AlbumMeta, SidecarError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_meta(path: &Path, meta: &AlbumMeta) -> Result<(), SidecarError> {
    let json = serde_json::to_string_pretty(meta)?;
    fs::write(path, json)?;
    Ok(())
}
