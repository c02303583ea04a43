//! Shared types persisted between runs.
//!
//! `AlbumMeta` lives in each album's `meta.json`; `AlbumData` is written to
//! `data/<id>.json` for the client gallery; `NavEntry` lists make up
//! `config/nav.json`. Field names are the on-disk JSON keys.

use serde::{Deserialize, Serialize};

/// Album description: a single string or an ordered list of paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Paragraphs(Vec<String>),
}

impl Description {
    /// All text of the description concatenated without separators.
    pub fn joined(&self) -> String {
        match self {
            Description::Text(text) => text.clone(),
            Description::Paragraphs(paragraphs) => paragraphs.concat(),
        }
    }

    /// Non-empty paragraphs in display order.
    pub fn paragraphs(&self) -> Vec<&str> {
        match self {
            Description::Text(text) => vec![text.as_str()],
            Description::Paragraphs(paragraphs) => {
                paragraphs.iter().map(String::as_str).collect()
            }
        }
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect()
    }
}

impl Default for Description {
    fn default() -> Self {
        Description::Text(String::new())
    }
}

/// Per-album metadata from the `meta.json` sidecar.
///
/// Every field is optional on read: hand-edited sidecars may omit keys, and a
/// sidecar that fails to parse is treated as an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
}

/// One processed image as listed in the album data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Large rendition, relative to the web root.
    pub src: String,
    pub thumbnail: String,
    /// Measured from the large rendition, not the source.
    pub width: u32,
    pub height: u32,
    pub alt: String,
    pub author: String,
}

/// The persisted per-album data artifact (`data/<id>.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumData {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover: String,
    pub description: Description,
    pub images: Vec<ImageRecord>,
}

/// Navigation manifest entry, one per album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub id: String,
    pub title: String,
    pub link: String,
}

impl NavEntry {
    pub fn for_album(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            link: format!("{id}.html"),
        }
    }
}
