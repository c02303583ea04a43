//! Image processing for one album.
//!
//! For each supported source image `<name>.<ext>` in the album directory:
//!
//! ```text
//! web/images/<id>/
//! ├── thumb_<name>.jpg    # fixed box, configured fit (cover by default)
//! └── large_<name>.jpg    # capped at max_size, never enlarged
//! ```
//!
//! ## Incremental reruns
//!
//! An output file that already exists is never regenerated; delete it (or run
//! `clear`) to force a rebuild. The width and height recorded for each image
//! are read back from the large file on disk, so they always describe the
//! delivered asset, whether it was written by this run or an earlier one.
//!
//! ## Failures
//!
//! A file that fails to decode or encode is logged and listed in
//! [`AlbumImages::failed`]; the rest of the album is still processed.

use crate::config::SiteConfig;
use crate::imaging::{
    BackendError, ImageBackend, VariantStatus, create_large, create_thumbnail, get_dimensions,
};
use crate::metadata::ResolvedMeta;
use crate::naming;
use crate::scan;
use crate::types::ImageRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Failed to list album images: {0}")]
    Scan(#[from] walkdir::Error),
    #[error("Unusable image file name: {0}")]
    InvalidFileName(PathBuf),
}

/// Outcome of processing every image in an album.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumImages {
    /// Records for the images that made it through, in file-name order.
    pub images: Vec<ImageRecord>,
    /// Variants (thumbnails and large renditions) written by this run.
    pub generated: usize,
    /// Variants found on disk and left untouched.
    pub existing: usize,
    /// File names of sources that could not be processed.
    pub failed: Vec<String>,
}

impl AlbumImages {
    fn count(&mut self, status: VariantStatus) {
        match status {
            VariantStatus::Generated => self.generated += 1,
            VariantStatus::Existing => self.existing += 1,
        }
    }
}

/// Produce thumbnails and large renditions for every image in `album_dir`.
///
/// Outputs go to `images_out_dir` (created if missing). Failing to create
/// that directory or to list the album is returned as an error; per-file
/// failures are collected in the result.
pub fn process_album_images(
    backend: &impl ImageBackend,
    album_dir: &Path,
    images_out_dir: &Path,
    meta: &ResolvedMeta,
    config: &SiteConfig,
) -> Result<AlbumImages, ProcessError> {
    let sources = scan::image_files(album_dir, config)?;
    std::fs::create_dir_all(images_out_dir)?;

    let author = meta.image_author();
    let mut result = AlbumImages::default();

    for source in sources {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match process_image(backend, &source, images_out_dir, &meta.id, &author, config) {
            Ok((record, thumb, large)) => {
                debug!(album = %meta.id, file = %file_name, ?thumb, ?large, "image processed");
                result.count(thumb);
                result.count(large);
                result.images.push(record);
            }
            Err(e) => {
                error!(album = %meta.id, file = %file_name, "failed to process image: {e}");
                result.failed.push(file_name);
            }
        }
    }

    info!(
        album = %meta.id,
        images = result.images.len(),
        generated = result.generated,
        existing = result.existing,
        failed = result.failed.len(),
        "album images done"
    );
    Ok(result)
}

fn process_image(
    backend: &impl ImageBackend,
    source: &Path,
    out_dir: &Path,
    album_id: &str,
    author: &str,
    config: &SiteConfig,
) -> Result<(ImageRecord, VariantStatus, VariantStatus), ProcessError> {
    let stem =
        naming::image_stem(source).ok_or_else(|| ProcessError::InvalidFileName(source.into()))?;
    let thumb_name = naming::thumbnail_file_name(stem);
    let large_name = naming::large_file_name(stem);
    let thumb_path = out_dir.join(&thumb_name);
    let large_path = out_dir.join(&large_name);

    let thumb = create_thumbnail(backend, source, &thumb_path, &config.thumbnail)?;
    let large = create_large(backend, source, &large_path, &config.large)?;
    let (width, height) = get_dimensions(backend, &large_path)?;

    let record = ImageRecord {
        src: naming::web_image_path(album_id, &large_name),
        thumbnail: naming::web_image_path(album_id, &thumb_name),
        width,
        height,
        alt: stem.to_string(),
        author: author.to_string(),
    };
    Ok((record, thumb, large))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RustBackend;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::metadata::MetaSource;
    use crate::test_helpers::{create_test_jpeg, small_config};
    use crate::types::AlbumMeta;
    use std::fs;
    use tempfile::TempDir;

    fn meta(id: &str, author: Option<&str>) -> ResolvedMeta {
        ResolvedMeta {
            id: id.to_string(),
            title: id.to_string(),
            meta: AlbumMeta {
                author: author.map(String::from),
                ..AlbumMeta::default()
            },
            source: MetaSource::Loaded,
        }
    }

    fn setup(names: &[&str]) -> (TempDir, PathBuf, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let album = tmp.path().join("album");
        let out = tmp.path().join("web/images/harbour");
        fs::create_dir_all(&album).unwrap();
        for name in names {
            fs::write(album.join(name), "").unwrap();
        }
        (tmp, album, out)
    }

    #[test]
    fn records_paths_alt_and_author() {
        let (_tmp, album, out) = setup(&["dawn.jpg"]);
        let backend = MockBackend::new();
        backend.set_dimensions(album.join("dawn.jpg"), 4000, 3000);
        backend.set_dimensions(out.join("large_dawn.jpg"), 3000, 2250);

        let result = process_album_images(
            &backend,
            &album,
            &out,
            &meta("harbour", Some("Lin")),
            &SiteConfig::default(),
        )
        .unwrap();

        assert_eq!(
            result.images,
            vec![ImageRecord {
                src: "images/harbour/large_dawn.jpg".to_string(),
                thumbnail: "images/harbour/thumb_dawn.jpg".to_string(),
                width: 3000,
                height: 2250,
                alt: "dawn".to_string(),
                author: "Lin".to_string(),
            }]
        );
        assert_eq!(result.generated, 2);
        assert_eq!(result.existing, 0);
    }

    #[test]
    fn author_defaults_to_unknown() {
        let (_tmp, album, out) = setup(&["a.jpg"]);
        let backend = MockBackend::new();
        backend.set_dimensions(album.join("a.jpg"), 10, 10);
        backend.set_dimensions(out.join("large_a.jpg"), 10, 10);

        let result =
            process_album_images(&backend, &album, &out, &meta("x", None), &SiteConfig::default())
                .unwrap();
        assert_eq!(result.images[0].author, "Unknown");
    }

    #[test]
    fn skips_unsupported_files_and_keeps_order() {
        let (_tmp, album, out) = setup(&["c.png", "a.JPG", "notes.txt", "b.jpeg"]);
        let backend = MockBackend::new();
        for (src, large) in [("a.JPG", "large_a.jpg"), ("b.jpeg", "large_b.jpg"), ("c.png", "large_c.jpg")] {
            backend.set_dimensions(album.join(src), 100, 100);
            backend.set_dimensions(out.join(large), 100, 100);
        }

        let result =
            process_album_images(&backend, &album, &out, &meta("x", None), &SiteConfig::default())
                .unwrap();
        let alts: Vec<&str> = result.images.iter().map(|i| i.alt.as_str()).collect();
        assert_eq!(alts, vec!["a", "b", "c"]);
    }

    #[test]
    fn rerun_only_reads_back_large_dimensions() {
        let (_tmp, album, out) = setup(&["dawn.jpg"]);
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("thumb_dawn.jpg"), "").unwrap();
        fs::write(out.join("large_dawn.jpg"), "").unwrap();

        let backend = MockBackend::new();
        backend.set_dimensions(out.join("large_dawn.jpg"), 1200, 800);

        let result = process_album_images(
            &backend,
            &album,
            &out,
            &meta("harbour", None),
            &SiteConfig::default(),
        )
        .unwrap();

        assert_eq!(result.generated, 0);
        assert_eq!(result.existing, 2);
        assert_eq!((result.images[0].width, result.images[0].height), (1200, 800));
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Identify(
                out.join("large_dawn.jpg").to_string_lossy().to_string()
            )]
        );
    }

    #[test]
    fn failing_file_is_isolated() {
        let (_tmp, album, out) = setup(&["a.jpg", "broken.jpg", "c.jpg"]);
        let backend = MockBackend::new();
        for stem in ["a", "c"] {
            backend.set_dimensions(album.join(format!("{stem}.jpg")), 50, 50);
            backend.set_dimensions(out.join(format!("large_{stem}.jpg")), 50, 50);
        }
        backend.fail_on(album.join("broken.jpg"));

        let result =
            process_album_images(&backend, &album, &out, &meta("x", None), &SiteConfig::default())
                .unwrap();

        let alts: Vec<&str> = result.images.iter().map(|i| i.alt.as_str()).collect();
        assert_eq!(alts, vec!["a", "c"]);
        assert_eq!(result.failed, vec!["broken.jpg".to_string()]);
    }

    #[test]
    fn empty_album_yields_no_records() {
        let (_tmp, album, out) = setup(&[]);
        let result = process_album_images(
            &MockBackend::new(),
            &album,
            &out,
            &meta("x", None),
            &SiteConfig::default(),
        )
        .unwrap();
        assert!(result.images.is_empty());
        assert!(out.is_dir());
    }

    #[test]
    fn unlistable_album_is_an_error() {
        let (tmp, _album, out) = setup(&[]);
        let result = process_album_images(
            &MockBackend::new(),
            &tmp.path().join("vanished"),
            &out,
            &meta("x", None),
            &SiteConfig::default(),
        );
        assert!(matches!(result, Err(ProcessError::Scan(_))));
        assert!(!out.exists());
    }

    // =========================================================================
    // Real backend
    // =========================================================================

    #[test]
    fn large_is_capped_and_thumbnail_is_boxed() {
        let (_tmp, album, out) = setup(&[]);
        create_test_jpeg(&album.join("wide.jpg"), 240, 160);

        let result = process_album_images(
            &RustBackend::new(),
            &album,
            &out,
            &meta("x", None),
            &small_config(),
        )
        .unwrap();

        let record = &result.images[0];
        assert_eq!((record.width, record.height), (100, 67));
        assert_eq!(
            image::image_dimensions(out.join("thumb_wide.jpg")).unwrap(),
            (40, 40)
        );
    }

    #[test]
    fn small_image_is_not_upscaled() {
        let (_tmp, album, out) = setup(&[]);
        create_test_jpeg(&album.join("small.jpg"), 80, 60);

        let result = process_album_images(
            &RustBackend::new(),
            &album,
            &out,
            &meta("x", None),
            &small_config(),
        )
        .unwrap();

        assert_eq!((result.images[0].width, result.images[0].height), (80, 60));
    }

    #[test]
    fn rerun_with_real_files_writes_nothing() {
        let (_tmp, album, out) = setup(&[]);
        create_test_jpeg(&album.join("a.jpg"), 240, 160);
        let backend = RustBackend::new();
        let config = small_config();

        let first = process_album_images(&backend, &album, &out, &meta("x", None), &config).unwrap();
        let large = out.join("large_a.jpg");
        let modified = fs::metadata(&large).unwrap().modified().unwrap();

        let second =
            process_album_images(&backend, &album, &out, &meta("x", None), &config).unwrap();

        assert_eq!(first.images, second.images);
        assert_eq!(second.generated, 0);
        assert_eq!(fs::metadata(&large).unwrap().modified().unwrap(), modified);
    }

    #[test]
    fn corrupt_real_file_does_not_stop_album() {
        let (_tmp, album, out) = setup(&[]);
        create_test_jpeg(&album.join("a.jpg"), 50, 40);
        fs::write(album.join("b.jpg"), b"not a jpeg").unwrap();

        let result = process_album_images(
            &RustBackend::new(),
            &album,
            &out,
            &meta("x", None),
            &small_config(),
        )
        .unwrap();

        assert_eq!(result.images.len(), 1);
        assert_eq!(result.failed, vec!["b.jpg".to_string()]);
    }
}
