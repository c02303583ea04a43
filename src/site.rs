//! Site build: every album, then the site-wide steps.
//!
//! ```text
//! photos/<album>/ ──► metadata ──► content ──► images ──► album page + data
//!                                                              │
//!                                  config/nav.json ◄── upsert ─┘
//!                                         │
//!                                         ├──► index.html (redirect to first entry)
//!                                         └──► fonts/<font> (subset of all page text)
//! ```
//!
//! Albums are processed one at a time in directory-name order. An error that
//! escapes an album (an output directory that cannot be created, a page that
//! cannot be written) aborts the run; a single unreadable image does not.
//!
//! [`init`] runs only the metadata and content resolvers so the sidecars can
//! be reviewed before the first full build. It writes nothing under the web
//! root and never touches the manifest.

use crate::album::{self, AssembleError};
use crate::config::{SiteConfig, generate_font_css};
use crate::content::resolve_content;
use crate::font::{FontError, FontOutcome, FontSubsetter, GlyphText, subset_font};
use crate::generate::{PageContext, render_redirect_page};
use crate::imaging::ImageBackend;
use crate::metadata::{MetaSource, resolve_meta};
use crate::nav::{NavManifest, Upsert};
use crate::process::{ProcessError, process_album_images};
use crate::scan::{self, AlbumDir};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("photos root not found: {0}")]
    PhotosRootMissing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to list albums: {0}")]
    Scan(#[from] walkdir::Error),
    #[error("image processing failed: {0}")]
    Process(#[from] ProcessError),
    #[error("album assembly failed: {0}")]
    Assemble(#[from] AssembleError),
    #[error("font subsetting failed: {0}")]
    Font(#[from] FontError),
}

/// Input and output locations of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    pub photos_root: PathBuf,
    pub web_root: PathBuf,
}

impl SitePaths {
    pub fn new(photos_root: impl Into<PathBuf>, web_root: impl Into<PathBuf>) -> Self {
        Self {
            photos_root: photos_root.into(),
            web_root: web_root.into(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.photos_root, &config.web_root)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.web_root.join("data")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.web_root.join("images")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.web_root.join("config")
    }

    pub fn fonts_dir(&self) -> PathBuf {
        self.web_root.join("fonts")
    }

    pub fn nav_manifest(&self) -> PathBuf {
        self.config_dir().join("nav.json")
    }

    pub fn index_page(&self) -> PathBuf {
        self.web_root.join("index.html")
    }

    pub fn album_images_dir(&self, album_id: &str) -> PathBuf {
        self.images_dir().join(album_id)
    }

    /// Create the output directories a build writes into.
    fn bootstrap(&self) -> std::io::Result<()> {
        for dir in [
            self.data_dir(),
            self.images_dir(),
            self.config_dir(),
            self.fonts_dir(),
        ] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Summary of one album in a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumReport {
    pub dir_name: String,
    pub id: String,
    pub title: String,
    pub images: usize,
    pub generated: usize,
    pub existing: usize,
    pub failed: Vec<String>,
    pub manifest: Upsert,
}

/// Summary of a full build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub albums: Vec<AlbumReport>,
    pub nav_entries: usize,
    /// Where `index.html` redirects; `""` when the manifest is empty.
    pub redirect_target: String,
    pub font: FontOutcome,
    /// The text the subset font was built from.
    pub glyph_text: GlyphText,
}

/// Summary of one album in an init run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitEntry {
    pub dir_name: String,
    pub id: String,
    pub title: String,
    pub meta_source: MetaSource,
    pub has_content: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub albums: Vec<InitEntry>,
}

fn album_dirs(paths: &SitePaths) -> Result<Vec<AlbumDir>, SiteError> {
    if !paths.photos_root.is_dir() {
        return Err(SiteError::PhotosRootMissing(paths.photos_root.clone()));
    }
    Ok(scan::album_dirs(&paths.photos_root)?)
}

/// Text every page shows regardless of album.
fn site_text(config: &SiteConfig) -> GlyphText {
    let mut text = GlyphText::new();
    text.push(&config.site.url);
    text.push(&config.site.nav_brand);
    text.push(&config.default_author);
    text
}

fn font_file_name(config: &SiteConfig) -> String {
    config
        .source_font()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Run the full pipeline.
///
/// `year` is the copyright year printed in page footers.
pub fn build(
    paths: &SitePaths,
    config: &SiteConfig,
    backend: &impl ImageBackend,
    subsetter: &impl FontSubsetter,
    year: i32,
) -> Result<BuildReport, SiteError> {
    let albums = album_dirs(paths)?;
    paths.bootstrap()?;

    let ctx = PageContext {
        site: &config.site,
        year,
        font_css: generate_font_css(&font_file_name(config)),
    };
    let mut text = site_text(config);
    let mut manifest = NavManifest::load(&paths.nav_manifest());
    let mut reports = Vec::new();

    for album_dir in &albums {
        let (report, album_text) =
            process_album(paths, config, backend, &ctx, &mut manifest, album_dir)?;
        text.absorb(album_text);
        reports.push(report);
    }

    manifest.save(&paths.nav_manifest())?;
    info!(entries = manifest.len(), "navigation manifest updated");
    for title in manifest.titles() {
        text.push(title);
    }

    let target = manifest.redirect_target().to_string();
    fs::write(
        paths.index_page(),
        render_redirect_page(&target, &ctx).into_string(),
    )?;
    info!(target = %target, "generated index.html");

    let font = subset_font(subsetter, &config.source_font(), &paths.fonts_dir(), &text)?;

    Ok(BuildReport {
        albums: reports,
        nav_entries: manifest.len(),
        redirect_target: target,
        font,
        glyph_text: text,
    })
}

fn process_album(
    paths: &SitePaths,
    config: &SiteConfig,
    backend: &impl ImageBackend,
    ctx: &PageContext,
    manifest: &mut NavManifest,
    album_dir: &AlbumDir,
) -> Result<(AlbumReport, GlyphText), SiteError> {
    info!(album = %album_dir.name, "processing album");
    let meta = resolve_meta(&album_dir.path, &album_dir.name, config);
    let content = resolve_content(&album_dir.path);

    let images = process_album_images(
        backend,
        &album_dir.path,
        &paths.album_images_dir(&meta.id),
        &meta,
        config,
    )?;
    let data = album::build_album_data(&meta, images.images, config);
    let text = album::glyph_text(&data, &content);
    let entry = album::assemble(&data, &content, &paths.web_root, ctx)?;

    let report = AlbumReport {
        dir_name: album_dir.name.clone(),
        id: data.id,
        title: data.title,
        images: data.images.len(),
        generated: images.generated,
        existing: images.existing,
        failed: images.failed,
        manifest: manifest.upsert(entry),
    };
    Ok((report, text))
}

/// Resolve (and create where missing) the sidecars of every album.
pub fn init(paths: &SitePaths, config: &SiteConfig) -> Result<InitReport, SiteError> {
    let mut report = InitReport::default();
    for album_dir in album_dirs(paths)? {
        info!(album = %album_dir.name, "initializing album");
        let meta = resolve_meta(&album_dir.path, &album_dir.name, config);
        let content = resolve_content(&album_dir.path);
        report.albums.push(InitEntry {
            dir_name: album_dir.name,
            id: meta.id,
            title: meta.title,
            meta_source: meta.source,
            has_content: !content.raw_markdown.trim().is_empty(),
        });
    }
    Ok(report)
}
