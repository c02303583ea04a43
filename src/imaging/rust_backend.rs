//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate decoders |
//! | EXIF orientation | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Crop / pad | `image::imageops::overlay` onto a fresh canvas |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{FitPlan, center_offset, plan_fit};
use super::params::{ResizeParams, ThumbnailParams};
use crate::config::Fit;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Pure Rust backend using the `image` crate ecosystem.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, e: image::ImageError) -> BackendError {
    BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
}

/// Whether an orientation swaps width and height.
fn swaps_axes(orientation: Orientation) -> bool {
    matches!(
        orientation,
        Orientation::Rotate90
            | Orientation::Rotate270
            | Orientation::Rotate90FlipH
            | Orientation::Rotate270FlipH
    )
}

/// Load an image from disk with its EXIF orientation applied.
fn load_oriented(path: &Path) -> Result<DynamicImage, BackendError> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()
        .map_err(|e| decode_error(path, e))?;
    let orientation = decoder
        .orientation()
        .unwrap_or(Orientation::NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(path, e))?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Apply a fit plan: scale, then center on the canvas (crop or pad with black).
fn apply_fit(img: &DynamicImage, target: (u32, u32), fit: Fit) -> RgbImage {
    let FitPlan { resize, canvas } = plan_fit((img.width(), img.height()), target, fit);
    let scaled = image::imageops::resize(&img.to_rgb8(), resize.0, resize.1, FilterType::Lanczos3);
    if resize == canvas {
        return scaled;
    }
    let mut out = RgbImage::new(canvas.0, canvas.1);
    image::imageops::overlay(
        &mut out,
        &scaled,
        center_offset(canvas.0, resize.0),
        center_offset(canvas.1, resize.1),
    );
    out
}

/// Sibling path the encoder writes to before the output is moved into place.
fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}

fn write_jpeg(img: &RgbImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let mut writer = BufWriter::new(File::create(path)?);
    JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100) as u8)
        .encode_image(img)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

/// Encode as baseline JPEG at the given quality.
///
/// The image is written to a `.partial` sibling and renamed over `path` only
/// once fully flushed, so `path` either does not exist or is complete.
fn save_jpeg(img: &RgbImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let partial = partial_path(path);
    write_jpeg(img, &partial, quality)
        .and_then(|()| fs::rename(&partial, path).map_err(BackendError::from))
        .inspect_err(|_| {
            let _ = fs::remove_file(&partial);
        })
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let mut decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()
            .map_err(|e| decode_error(path, e))?;
        let (width, height) = decoder.dimensions();
        let orientation = decoder
            .orientation()
            .unwrap_or(Orientation::NoTransforms);
        if swaps_axes(orientation) {
            Ok(Dimensions {
                width: height,
                height: width,
            })
        } else {
            Ok(Dimensions { width, height })
        }
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        let img = load_oriented(&params.source)?;
        let out = apply_fit(&img, (params.width, params.height), params.fit);
        save_jpeg(&out, &params.output, params.quality.value())
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_oriented(&params.source)?;
        let out = match params.bounds {
            Some(bounds) => apply_fit(&img, bounds, params.fit),
            None => img.to_rgb8(),
        };
        save_jpeg(&out, &params.output, params.quality.value())
    }
}
