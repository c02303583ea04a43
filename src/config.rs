//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The stock defaults
//! are serialized into a TOML table and the user's file is merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! photos_root = "photos"
//! web_root = "web"
//! supported_extensions = [".jpg", ".jpeg", ".png", ".webp", ".tif", ".tiff"]
//! default_author = "Anonymous"
//! default_description = []
//!
//! [thumbnail]
//! width = 300
//! height = 300
//! fit = "cover"
//! quality = 80
//!
//! [large]
//! max_size = 3000
//! fit = "inside"
//! quality = 90
//!
//! [site]
//! url = "photos.example.com"
//! nav_brand = "Gallery"
//! logo = "logo.svg"
//! font = "fonts/SourceHanSerifCN-Regular.otf"
//!
//! [font_subset]
//! tool = "pyftsubset"
//! hinting = false
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::Description;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding one subdirectory per album.
    pub photos_root: String,
    /// Root of the generated site.
    pub web_root: String,
    /// Image file extensions picked up from album directories.
    pub supported_extensions: Vec<String>,
    /// Author used when an album's metadata names none.
    pub default_author: String,
    /// Description written into freshly synthesized `meta.json` files.
    pub default_description: Description,
    pub thumbnail: ThumbnailSettings,
    pub large: LargeSettings,
    pub site: SiteSection,
    pub font_subset: FontSubsetSettings,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            photos_root: "photos".to_string(),
            web_root: "web".to_string(),
            supported_extensions: [".jpg", ".jpeg", ".png", ".webp", ".tif", ".tiff"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            default_author: "Anonymous".to_string(),
            default_description: Description::Paragraphs(Vec::new()),
            thumbnail: ThumbnailSettings::default(),
            large: LargeSettings::default(),
            site: SiteSection::default(),
            font_subset: FontSubsetSettings::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.thumbnail.quality) {
            return Err(ConfigError::Validation(
                "thumbnail.quality must be 1-100".into(),
            ));
        }
        if !(1..=100).contains(&self.large.quality) {
            return Err(ConfigError::Validation(
                "large.quality must be 1-100".into(),
            ));
        }
        if self.thumbnail.width == 0 || self.thumbnail.height == 0 {
            return Err(ConfigError::Validation(
                "thumbnail.width and thumbnail.height must be non-zero".into(),
            ));
        }
        if self.large.max_size == 0 {
            return Err(ConfigError::Validation(
                "large.max_size must be non-zero".into(),
            ));
        }
        if self.supported_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "supported_extensions must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Whether `path` has one of the configured image extensions.
    ///
    /// Matching is case-insensitive and tolerates entries written with or
    /// without the leading dot (`".jpg"` and `"jpg"` are equivalent).
    pub fn is_supported(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.supported_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Path of the source font used for subsetting.
    pub fn source_font(&self) -> PathBuf {
        PathBuf::from(&self.site.font)
    }
}

/// How an image is fitted into a target box.
///
/// Mirrors the fit vocabulary of common image pipelines:
///
/// | Fit | Result |
/// |-----|--------|
/// | `cover` | scaled to cover the box, center-cropped to exactly the box |
/// | `contain` | scaled to fit inside the box, padded to exactly the box |
/// | `fill` | stretched to exactly the box, aspect ratio ignored |
/// | `inside` | scaled to fit inside the box, no crop or padding |
/// | `outside` | scaled so both sides are at least the box |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    Cover,
    Contain,
    Fill,
    Inside,
    Outside,
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailSettings {
    pub width: u32,
    pub height: u32,
    pub fit: Fit,
    /// JPEG quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            fit: Fit::Cover,
            quality: 80,
        }
    }
}

/// Settings for the size-capped "large" rendition shown in the lightbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LargeSettings {
    /// Longest allowed edge in pixels. Smaller images are never enlarged.
    pub max_size: u32,
    pub fit: Fit,
    pub quality: u32,
}

impl Default for LargeSettings {
    fn default() -> Self {
        Self {
            max_size: 3000,
            fit: Fit::Inside,
            quality: 90,
        }
    }
}

/// Site branding shown on every generated page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Public URL of the site, also used as the page title suffix.
    pub url: String,
    pub nav_brand: String,
    /// Logo path relative to the web root.
    pub logo: String,
    /// Source font to subset, relative to the working directory.
    pub font: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            url: "photos.example.com".to_string(),
            nav_brand: "Gallery".to_string(),
            logo: "logo.svg".to_string(),
            font: "fonts/SourceHanSerifCN-Regular.otf".to_string(),
        }
    }
}

/// External font subsetting program settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontSubsetSettings {
    /// Program invoked to subset the font (fonttools' `pyftsubset` CLI).
    pub tool: String,
    /// Keep TrueType hinting instructions in the subset.
    pub hinting: bool,
}

impl Default for FontSubsetSettings {
    fn default() -> Self {
        Self {
            tool: "pyftsubset".to_string(),
            hinting: false,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path`.
///
/// A missing file yields the stock defaults. A file that exists but contains
/// invalid TOML, unknown keys, or out-of-range values is an error.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using stock defaults");
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# shutterpage configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Directory holding one subdirectory per album.
photos_root = "photos"

# Root of the generated site (pages, data, images, fonts).
web_root = "web"

# Image files picked up from album directories (case-insensitive).
supported_extensions = [".jpg", ".jpeg", ".png", ".webp", ".tif", ".tiff"]

# Author used when an album's meta.json names none.
default_author = "Anonymous"

# Description written into newly created meta.json files.
# Either a string or a list of paragraphs.
default_description = []

# ---------------------------------------------------------------------------
# Thumbnails: thumb_<name>.jpg
# ---------------------------------------------------------------------------
[thumbnail]
width = 300
height = 300
# cover | contain | fill | inside | outside
fit = "cover"
quality = 80

# ---------------------------------------------------------------------------
# Large renditions: large_<name>.jpg
# ---------------------------------------------------------------------------
[large]
# Images with either side above this are scaled down; smaller ones are
# re-encoded at their own size.
max_size = 3000
fit = "inside"
quality = 90

# ---------------------------------------------------------------------------
# Site branding
# ---------------------------------------------------------------------------
[site]
url = "photos.example.com"
nav_brand = "Gallery"
logo = "logo.svg"
# Source font; a subset containing only the glyphs the site uses is written
# to <web_root>/fonts/ under the same file name.
font = "fonts/SourceHanSerifCN-Regular.otf"

# ---------------------------------------------------------------------------
# Font subsetting
# ---------------------------------------------------------------------------
[font_subset]
# External program (fonttools). Must accept --text-file and --output-file.
tool = "pyftsubset"
hinting = false
"##
}

/// `@font-face` rule for the subset font, served from `fonts/`.
pub fn generate_font_css(font_file: &str) -> String {
    format!(
        r#"@font-face {{
    font-family: "SiteSubset";
    src: url("fonts/{font_file}");
    font-display: swap;
}}

:root {{
    --font-site: "SiteSubset", serif;
}}"#
    )
}
