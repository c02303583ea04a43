//! Font subsetting.
//!
//! The site font (typically a full CJK face of 20+ MB) is reduced to the
//! glyphs the generated pages actually show. Text is collected while albums
//! are built into a [`GlyphText`] accumulator; each album returns its own and
//! the site build folds them together before calling [`subset_font`] once.
//!
//! Subsetting itself is delegated to an external program behind the
//! [`FontSubsetter`] trait. [`ExternalSubsetter`] drives fonttools'
//! `pyftsubset`:
//!
//! ```text
//! pyftsubset <source> --text-file=<glyphs> --output-file=<web>/fonts/<source name> [--no-hinting]
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum FontError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("source font path has no file name: {0}")]
    InvalidSource(PathBuf),
}

/// Accumulated human-readable text whose glyphs the subset must contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphText {
    text: String,
}

impl GlyphText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Fold another accumulator into this one.
    pub fn absorb(&mut self, other: GlyphText) {
        self.text.push_str(&other.text);
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Distinct non-control characters in first-seen order.
    pub fn charset(&self) -> String {
        let mut seen = HashSet::new();
        self.text
            .chars()
            .filter(|c| !c.is_control())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

impl Extend<GlyphText> for GlyphText {
    fn extend<I: IntoIterator<Item = GlyphText>>(&mut self, iter: I) {
        for other in iter {
            self.absorb(other);
        }
    }
}

/// Produces a font file containing only the given characters.
pub trait FontSubsetter {
    fn subset(&self, source: &Path, output: &Path, text: &str) -> Result<(), FontError>;
}

/// Runs an external fonttools-compatible subsetting program.
#[derive(Debug, Clone)]
pub struct ExternalSubsetter {
    pub program: String,
    pub hinting: bool,
}

impl ExternalSubsetter {
    pub fn new(program: impl Into<String>, hinting: bool) -> Self {
        Self {
            program: program.into(),
            hinting,
        }
    }

    fn args(&self, source: &Path, output: &Path, text_file: &Path) -> Vec<String> {
        let mut args = vec![
            source.display().to_string(),
            format!("--text-file={}", text_file.display()),
            format!("--output-file={}", output.display()),
        ];
        if !self.hinting {
            args.push("--no-hinting".to_string());
        }
        args
    }
}

impl FontSubsetter for ExternalSubsetter {
    fn subset(&self, source: &Path, output: &Path, text: &str) -> Result<(), FontError> {
        let text_file = glyph_file_path(output);
        fs::write(&text_file, text)?;

        let result = Command::new(&self.program)
            .args(self.args(source, output, &text_file))
            .output();

        if let Err(e) = fs::remove_file(&text_file) {
            debug!(path = %text_file.display(), "could not remove glyph list: {e}");
        }

        let out = result.map_err(|source| FontError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        if !out.status.success() {
            return Err(FontError::ToolFailed {
                program: self.program.clone(),
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

fn glyph_file_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!(".{name}.glyphs.txt"))
}

/// What the font step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontOutcome {
    Subset { output: PathBuf, glyphs: usize },
    SkippedMissingSource(PathBuf),
}

/// Subset `source` to the characters of `text`, writing into `fonts_dir`
/// under the source's file name.
///
/// A missing source font is not an error: the step is skipped with a warning.
pub fn subset_font(
    subsetter: &impl FontSubsetter,
    source: &Path,
    fonts_dir: &Path,
    text: &GlyphText,
) -> Result<FontOutcome, FontError> {
    if !source.is_file() {
        warn!(path = %source.display(), "source font not found, skipping subset generation");
        return Ok(FontOutcome::SkippedMissingSource(source.to_path_buf()));
    }
    let file_name = source
        .file_name()
        .ok_or_else(|| FontError::InvalidSource(source.to_path_buf()))?;
    let output = fonts_dir.join(file_name);
    let charset = text.charset();

    info!(glyphs = charset.chars().count(), "generating font subset");
    subsetter.subset(source, &output, &charset)?;
    info!(path = %output.display(), "font subset generated");

    Ok(FontOutcome::Subset {
        glyphs: charset.chars().count(),
        output,
    })
}
