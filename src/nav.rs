//! Navigation manifest (`config/nav.json`).
//!
//! A JSON array of `{id, title, link}` entries, one per album, read by the
//! client script to build the menu and by the build to pick the landing page.
//!
//! The manifest accumulates across runs: each build upserts the albums it
//! processed and leaves every other entry alone, so an album whose directory
//! was removed keeps its menu entry until the file is cleared.

use crate::types::NavEntry;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Result of an [`NavManifest::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

/// The in-memory manifest, ordered as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavManifest {
    entries: Vec<NavEntry>,
}

impl NavManifest {
    /// Load the manifest at `path`.
    ///
    /// A missing or unparseable file yields an empty manifest.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no navigation manifest yet");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), "failed to read navigation manifest, starting empty: {e}");
                return Self::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(entries) => Self { entries },
            Err(e) => {
                warn!(path = %path.display(), "corrupt navigation manifest, starting empty: {e}");
                Self::default()
            }
        }
    }

    /// Replace the entry with the same id in place, or append.
    pub fn upsert(&mut self, entry: NavEntry) -> Upsert {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => {
                *existing = entry;
                Upsert::Updated
            }
            None => {
                self.entries.push(entry);
                Upsert::Inserted
            }
        }
    }

    /// Write the whole manifest to `path`, pretty-printed.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json)
    }

    /// Link of the first entry, or `""` when the manifest is empty.
    pub fn redirect_target(&self) -> &str {
        self.entries.first().map(|e| e.link.as_str()).unwrap_or("")
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let manifest = NavManifest::load(&tmp.path().join("nav.json"));
        assert!(manifest.is_empty());
        assert_eq!(manifest.redirect_target(), "");
    }

    #[test]
    fn corrupt_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nav.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(NavManifest::load(&path).is_empty());
    }

    #[test]
    fn wrong_shape_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nav.json");
        fs::write(&path, r#"{"id": "a"}"#).unwrap();
        assert!(NavManifest::load(&path).is_empty());
    }

    #[test]
    fn upsert_same_id_updates_in_place() {
        let mut manifest = NavManifest::default();
        assert_eq!(
            manifest.upsert(NavEntry::for_album("a", "First")),
            Upsert::Inserted
        );
        manifest.upsert(NavEntry::for_album("b", "Second"));
        assert_eq!(
            manifest.upsert(NavEntry::for_album("a", "Renamed")),
            Upsert::Updated
        );

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.titles().collect::<Vec<_>>(), vec!["Renamed", "Second"]);
    }

    #[test]
    fn save_and_load_preserves_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nav.json");
        let mut manifest = NavManifest::default();
        manifest.upsert(NavEntry::for_album("shan-tou", "汕头"));
        manifest.upsert(NavEntry::for_album("Harbour", "Harbour"));
        manifest.save(&path).unwrap();

        let loaded = NavManifest::load(&path);
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.redirect_target(), "shan-tou.html");
    }

    #[test]
    fn persisted_format_is_array_of_entries() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nav.json");
        let mut manifest = NavManifest::default();
        manifest.upsert(NavEntry::for_album("a", "A"));
        manifest.save(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"id": "a", "title": "A", "link": "a.html"}])
        );
    }

    #[test]
    fn entries_absent_from_later_runs_survive() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nav.json");
        let mut first = NavManifest::default();
        first.upsert(NavEntry::for_album("old", "Old"));
        first.upsert(NavEntry::for_album("kept", "Kept"));
        first.save(&path).unwrap();

        let mut second = NavManifest::load(&path);
        second.upsert(NavEntry::for_album("kept", "Kept again"));
        second.save(&path).unwrap();

        let ids: Vec<String> = NavManifest::load(&path)
            .entries()
            .iter()
            .map(|e| e.id.clone())
            .collect();
        assert_eq!(ids, vec!["old", "kept"]);
    }
}
