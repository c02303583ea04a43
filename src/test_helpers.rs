//! Shared test utilities.
//!
//! Synthetic images are generated in-process with the `image` crate so tests
//! need no binary fixtures.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let album = add_album(tmp.path(), "汕头", &["harbour.jpg", "market.jpg"]);
//! ```

use crate::config::{Fit, LargeSettings, SiteConfig, ThumbnailSettings};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Write a gradient JPEG of the given size.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let file = std::fs::File::create(path).unwrap();
    JpegEncoder::new_with_quality(file, 85)
        .encode_image(&img)
        .unwrap();
}

/// Write a JPEG that is red on the left half and blue on the right, tagged
/// with the given EXIF orientation (6 = rotate 90° clockwise for display).
pub fn create_oriented_test_jpeg(path: &Path, width: u32, height: u32, orientation: u16) {
    let img = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([220, 20, 20])
        } else {
            Rgb([20, 20, 220])
        }
    });
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, 95)
        .encode_image(&img)
        .unwrap();

    // Big-endian TIFF header with a single IFD0 entry: Orientation (0x0112), SHORT, 1 value
    let mut tiff = b"MM\x00\x2a\x00\x00\x00\x08".to_vec();
    tiff.extend_from_slice(b"\x00\x01\x01\x12\x00\x03\x00\x00\x00\x01");
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
    let mut app1 = b"Exif\x00\x00".to_vec();
    app1.extend_from_slice(&tiff);

    let mut jpeg = encoded[..2].to_vec();
    jpeg.extend_from_slice(&[0xFF, 0xE1]);
    jpeg.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
    jpeg.extend_from_slice(&app1);
    jpeg.extend_from_slice(&encoded[2..]);
    std::fs::write(path, jpeg).unwrap();
}

/// Whether the pixel reads as the red half of [`create_oriented_test_jpeg`].
pub fn is_red(pixel: Rgb<u8>) -> bool {
    pixel[0] > 150 && pixel[2] < 100
}

/// Whether the pixel reads as the blue half of [`create_oriented_test_jpeg`].
pub fn is_blue(pixel: Rgb<u8>) -> bool {
    pixel[2] > 150 && pixel[0] < 100
}

/// Write a half-transparent PNG of the given size.
pub fn create_test_png_rgba(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, _| Rgba([200, 40, 40, (x % 256) as u8]));
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Config with tiny output sizes so real encoding stays fast.
pub fn small_config() -> SiteConfig {
    SiteConfig {
        thumbnail: ThumbnailSettings {
            width: 40,
            height: 40,
            fit: Fit::Cover,
            quality: 80,
        },
        large: LargeSettings {
            max_size: 100,
            fit: Fit::Inside,
            quality: 90,
        },
        ..SiteConfig::default()
    }
}

/// Create `photos_root/<name>` holding one small JPEG per file name.
pub fn add_album(photos_root: &Path, name: &str, images: &[&str]) -> PathBuf {
    let dir = photos_root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    for image in images {
        create_test_jpeg(&dir.join(image), 120, 80);
    }
    dir
}
