//! Album assembly.
//!
//! Combines the resolved metadata, the processed images and the rendered
//! content into the persisted album record and its page:
//!
//! ```text
//! web/
//! ├── data/<id>.json    # AlbumData, pretty-printed
//! └── <id>.html         # album page
//! ```
//!
//! The returned [`NavEntry`] is upserted into the navigation manifest by the
//! site build.

use crate::config::SiteConfig;
use crate::content::AlbumContent;
use crate::font::GlyphText;
use crate::generate::{PageContext, render_album_page};
use crate::metadata::ResolvedMeta;
use crate::types::{AlbumData, ImageRecord, NavEntry};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build the album record.
///
/// The cover falls back to the first image, then to `""`; a missing
/// description becomes an empty string.
pub fn build_album_data(
    meta: &ResolvedMeta,
    images: Vec<ImageRecord>,
    config: &SiteConfig,
) -> AlbumData {
    let cover = meta
        .meta
        .cover
        .clone()
        .filter(|c| !c.trim().is_empty())
        .or_else(|| images.first().map(|i| i.src.clone()))
        .unwrap_or_default();

    AlbumData {
        id: meta.id.clone(),
        title: meta.title.clone(),
        author: meta.album_author(config),
        cover,
        description: meta.meta.description.clone().unwrap_or_default(),
        images,
    }
}

/// Persist the album record and render its page under `web_root`.
///
/// `data/` must already exist.
pub fn assemble(
    album: &AlbumData,
    content: &AlbumContent,
    web_root: &Path,
    ctx: &PageContext,
) -> Result<NavEntry, AssembleError> {
    let data_path = web_root.join("data").join(format!("{}.json", album.id));
    fs::write(&data_path, serde_json::to_string_pretty(album)?)?;
    info!(album = %album.id, path = %data_path.display(), "wrote album data");

    let page = render_album_page(album, &content.html, ctx)?;
    let page_path = web_root.join(format!("{}.html", album.id));
    fs::write(&page_path, page.into_string())?;
    info!(album = %album.id, path = %page_path.display(), "generated album page");

    Ok(NavEntry::for_album(&album.id, &album.title))
}

/// Text on the album page that the subset font must cover.
pub fn glyph_text(album: &AlbumData, content: &AlbumContent) -> GlyphText {
    let mut text = GlyphText::new();
    text.push(&album.title);
    text.push(&album.author);
    text.push(&album.description.joined());
    text.push(&content.raw_markdown);
    text
}
