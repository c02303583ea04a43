//! # Shutterpage
//!
//! A static photo-gallery generator. Every directory under the photos root is
//! an album; the build resizes its images, renders one page per album, keeps a
//! navigation manifest across runs, and subsets the site font to the glyphs
//! the pages actually use.
//!
//! # Pipeline
//!
//! ```text
//! for each album directory (name order):
//!     metadata   meta.json   → id, title, author, cover, description
//!     content    content.md  → sanitized HTML
//!     process    images      → thumb_<name>.jpg + large_<name>.jpg
//!     album      record      → data/<id>.json + <id>.html
//! then:
//!     nav        upsert      → config/nav.json
//!     generate   redirect    → index.html
//!     font       subset      → fonts/<font>
//! ```
//!
//! `init` runs the first two steps only, so the sidecar files can be edited
//! before the first full build.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Persisted records: `AlbumMeta`, `AlbumData`, `ImageRecord`, `NavEntry` |
//! | [`naming`] | Album id romanization and output file naming |
//! | [`metadata`] | Read-or-synthesize the `meta.json` sidecar |
//! | [`content`] | Read-or-create `content.md`, markdown rendering and sanitizing |
//! | [`imaging`] | Pure-Rust image operations behind the `ImageBackend` trait |
//! | [`process`] | Per-album image loop with idempotent outputs |
//! | [`scan`] | Album and image enumeration |
//! | [`album`] | Album record assembly and page output |
//! | [`generate`] | Maud templates for album and redirect pages |
//! | [`nav`] | The navigation manifest |
//! | [`font`] | Glyph accumulation and font subsetting |
//! | [`site`] | Full build and init runs |
//! | [`clear`] | Removal of generated output |
//! | [`output`] | CLI summaries |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Existence Checks as the Cache
//!
//! A thumbnail or large image that exists on disk is never recomputed, and
//! recorded dimensions are always read back from the large file. Reruns over
//! large photo sets only pay for new images; `clear` is the way to force a
//! rebuild.
//!
//! ## Accumulated Manifest
//!
//! The navigation manifest is merged, not replaced: albums are upserted by id
//! and entries for albums missing from the current scan are kept.
//!
//! ## Explicit Glyph Accumulator
//!
//! Each album returns the text it contributes as a [`font::GlyphText`] value
//! which the site build folds together; there is no process-wide buffer.

pub mod album;
pub mod clear;
pub mod config;
pub mod content;
pub mod font;
pub mod generate;
pub mod imaging;
pub mod logging;
pub mod metadata;
pub mod naming;
pub mod nav;
pub mod output;
pub mod process;
pub mod scan;
pub mod site;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
