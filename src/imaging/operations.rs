//! High-level image operations.
//!
//! These functions combine calculations with backend execution. They take the
//! configured settings, decide whether any work is needed, compute parameters,
//! and call the backend. An output file that already exists is never touched.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_large_bounds;
use super::params::{Quality, ResizeParams, ThumbnailParams};
use crate::config::{LargeSettings, ThumbnailSettings};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Whether a variant was produced by this call or found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantStatus {
    Generated,
    Existing,
}

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Create the thumbnail for `source` at `output` unless it already exists.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    settings: &ThumbnailSettings,
) -> Result<VariantStatus> {
    if output.exists() {
        return Ok(VariantStatus::Existing);
    }
    backend.thumbnail(&ThumbnailParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width: settings.width,
        height: settings.height,
        fit: settings.fit,
        quality: Quality::new(settings.quality),
    })?;
    Ok(VariantStatus::Generated)
}

/// Create the large rendition for `source` at `output` unless it already exists.
///
/// Sources with a side above `max_size` are scaled down; anything else is
/// re-encoded at its own size.
pub fn create_large(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    settings: &LargeSettings,
) -> Result<VariantStatus> {
    if output.exists() {
        return Ok(VariantStatus::Existing);
    }
    let dims = get_dimensions(backend, source)?;
    backend.resize(&ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        bounds: calculate_large_bounds(dims, settings.max_size),
        fit: settings.fit,
        quality: Quality::new(settings.quality),
    })?;
    Ok(VariantStatus::Generated)
}
