//! CLI output formatting for the build, init and clear commands.
//!
//! Diagnostics go through `tracing` to stderr; the summaries here go to
//! stdout so they can be piped or diffed.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! 001 汕头 → shan-tou.html (12 photos)
//!     Images: 4 generated, 20 existing
//!     Failed: broken.jpg
//! 002 Harbour → Harbour.html (3 photos, updated)
//!     Images: 0 generated, 6 existing
//!
//! Navigation: 5 entries, index.html → shan-tou.html
//! Font: fonts/SourceHanSerifCN-Regular.otf (412 glyphs)
//! ```
//!
//! ## Init
//!
//! ```text
//! 001 汕头 → shan-tou
//!     meta.json: created
//!     content.md: empty
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::font::FontOutcome;
use crate::metadata::MetaSource;
use crate::nav::Upsert;
use crate::site::{BuildReport, InitReport};
use std::path::{Path, PathBuf};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn photos(n: usize) -> String {
    if n == 1 {
        "1 photo".to_string()
    } else {
        format!("{n} photos")
    }
}

/// Show `path` relative to `base` when it lies inside it.
fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport, web_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, album) in report.albums.iter().enumerate() {
        let status = match album.manifest {
            Upsert::Inserted => String::new(),
            Upsert::Updated => ", updated".to_string(),
        };
        lines.push(format!(
            "{} {} → {}.html ({}{})",
            format_index(i + 1),
            album.title,
            album.id,
            photos(album.images),
            status
        ));
        lines.push(format!(
            "{}Images: {} generated, {} existing",
            indent(1),
            album.generated,
            album.existing
        ));
        if !album.failed.is_empty() {
            lines.push(format!("{}Failed: {}", indent(1), album.failed.join(", ")));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }

    let target = if report.redirect_target.is_empty() {
        "(no albums)"
    } else {
        report.redirect_target.as_str()
    };
    lines.push(format!(
        "Navigation: {} entries, index.html → {}",
        report.nav_entries, target
    ));

    lines.push(match &report.font {
        FontOutcome::Subset { output, glyphs } => {
            format!("Font: {} ({} glyphs)", display_path(output, web_root), glyphs)
        }
        FontOutcome::SkippedMissingSource(source) => {
            format!("Font: skipped, {} not found", source.display())
        }
    });

    lines
}

pub fn print_build_output(report: &BuildReport, web_root: &Path) {
    for line in format_build_output(report, web_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Init
// ============================================================================

pub fn format_init_output(report: &InitReport) -> Vec<String> {
    if report.albums.is_empty() {
        return vec!["No albums found".to_string()];
    }

    let mut lines = Vec::new();
    for (i, album) in report.albums.iter().enumerate() {
        lines.push(format!("{} {} → {}", format_index(i + 1), album.title, album.id));
        let meta = match album.meta_source {
            MetaSource::Loaded => "loaded",
            MetaSource::Unreadable => "unreadable, using defaults",
            MetaSource::Synthesized => "created",
        };
        lines.push(format!("{}meta.json: {}", indent(1), meta));
        let content = if album.has_content { "present" } else { "empty" };
        lines.push(format!("{}content.md: {}", indent(1), content));
    }
    lines
}

pub fn print_init_output(report: &InitReport) {
    for line in format_init_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Clear
// ============================================================================

pub fn format_clear_output(removed: &[PathBuf], web_root: &Path) -> Vec<String> {
    let mut lines: Vec<String> = removed
        .iter()
        .map(|p| format!("Clear {}", display_path(p, web_root)))
        .collect();
    lines.push("Clear done.".to_string());
    lines
}

pub fn print_clear_output(removed: &[PathBuf], web_root: &Path) {
    for line in format_clear_output(removed, web_root) {
        println!("{}", line);
    }
}
