//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the pipeline
//! needs: identify, thumbnail, and resize. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use the recording
//! `MockBackend` below.

use super::params::{ResizeParams, ThumbnailParams};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions as displayed, i.e. after EXIF orientation.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Orient, fit into the box, encode as JPEG.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;

    /// Orient, optionally fit into the bounds, encode as JPEG.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::config::Fit;
    use crate::imaging::Quality;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Mock backend that records operations without doing pixel work.
    ///
    /// Identify answers come from a per-path table first, then from a LIFO
    /// queue. Thumbnail and resize touch an empty file at the output path
    /// (when its directory exists) so existence checks see the result.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: Mutex<Vec<Dimensions>>,
        pub dimensions_by_path: Mutex<HashMap<PathBuf, Dimensions>>,
        pub failing_sources: Mutex<Vec<PathBuf>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Thumbnail {
            source: String,
            output: String,
            width: u32,
            height: u32,
            fit: Fit,
            quality: u32,
        },
        Resize {
            source: String,
            output: String,
            bounds: Option<(u32, u32)>,
            fit: Fit,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: Mutex::new(dims),
                ..Self::default()
            }
        }

        /// Answer identify for `path` with fixed dimensions.
        pub fn set_dimensions(&self, path: impl Into<PathBuf>, width: u32, height: u32) {
            self.dimensions_by_path
                .lock()
                .unwrap()
                .insert(path.into(), Dimensions { width, height });
        }

        /// Make every operation on `source` fail.
        pub fn fail_on(&self, source: impl Into<PathBuf>) {
            self.failing_sources.lock().unwrap().push(source.into());
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn check_failure(&self, path: &Path) -> Result<(), BackendError> {
            if self.failing_sources.lock().unwrap().iter().any(|p| p == path) {
                return Err(BackendError::ProcessingFailed(format!(
                    "Failed to decode {}: corrupt",
                    path.display()
                )));
            }
            Ok(())
        }
    }

    fn touch(path: &Path) {
        let _ = std::fs::write(path, b"");
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));
            self.check_failure(path)?;

            if let Some(dims) = self.dimensions_by_path.lock().unwrap().get(path) {
                return Ok(*dims);
            }
            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::ProcessingFailed("No mock dimensions".to_string()))
        }

        fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Thumbnail {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                width: params.width,
                height: params.height,
                fit: params.fit,
                quality: params.quality.value(),
            });
            self.check_failure(&params.source)?;
            touch(&params.output);
            Ok(())
        }

        fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                source: params.source.to_string_lossy().to_string(),
                output: params.output.to_string_lossy().to_string(),
                bounds: params.bounds,
                fit: params.fit,
                quality: params.quality.value(),
            });
            self.check_failure(&params.source)?;
            touch(&params.output);
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_prefers_path_table() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 1,
            height: 1,
        }]);
        backend.set_dimensions("/a.jpg", 640, 480);
        let dims = backend.identify(Path::new("/a.jpg")).unwrap();
        assert_eq!((dims.width, dims.height), (640, 480));
    }

    #[test]
    fn mock_records_resize() {
        let backend = MockBackend::new();

        backend
            .resize(&ResizeParams {
                source: "/source.jpg".into(),
                output: "/nonexistent-dir/large_source.jpg".into(),
                bounds: Some((3000, 2000)),
                fit: Fit::Inside,
                quality: Quality::new(90),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                bounds: Some((3000, 2000)),
                fit: Fit::Inside,
                quality: 90,
                ..
            }
        ));
    }

    #[test]
    fn mock_failure_is_reported() {
        let backend = MockBackend::new();
        backend.fail_on("/bad.jpg");
        let result = backend.thumbnail(&ThumbnailParams {
            source: "/bad.jpg".into(),
            output: "/nonexistent-dir/thumb_bad.jpg".into(),
            width: 300,
            height: 300,
            fit: Fit::Cover,
            quality: Quality::new(80),
        });
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }
}
