//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify, decode, and encode_jpeg.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the mock in [`tests`] to script encoded sizes without
//! touching a real codec.

use super::params::{Quality, SourceImage};
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
///
/// `decode` is the decode boundary: everything after it works on an
/// in-memory raster. `encode_jpeg` must be a pure transform with no I/O.
pub trait ImageBackend: Sync {
    /// Get image dimensions without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Read and decode an image file into an RGB8 raster.
    fn decode(&self, path: &Path) -> Result<SourceImage, BackendError>;

    /// Encode a raster as JPEG at the given quality.
    fn encode_jpeg(&self, image: &SourceImage, quality: Quality) -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    type SizeCurve = Box<dyn Fn(u8) -> usize + Send + Sync>;

    /// Mock backend that records encodes and returns zero-filled buffers
    /// whose length follows a scripted quality → size curve.
    /// Uses Mutex (not RefCell) so it stays Sync.
    pub struct MockBackend {
        size_curve: SizeCurve,
        fail_encode: bool,
        pub identify_results: Mutex<Vec<Dimensions>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Decode(String),
        Encode { quality: u8 },
    }

    impl MockBackend {
        /// Encoded size is `f(quality)` bytes.
        pub fn with_size_curve(f: impl Fn(u8) -> usize + Send + Sync + 'static) -> Self {
            Self {
                size_curve: Box::new(f),
                fail_encode: false,
                identify_results: Mutex::new(Vec::new()),
                operations: Mutex::new(Vec::new()),
            }
        }

        /// Linear curve: `base + quality * per_step` bytes.
        pub fn linear(base: usize, per_step: usize) -> Self {
            Self::with_size_curve(move |q| base + q as usize * per_step)
        }

        /// Every encode fails as a codec would on a corrupt raster.
        pub fn failing() -> Self {
            Self {
                fail_encode: true,
                ..Self::linear(0, 0)
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        /// Qualities passed to `encode_jpeg`, in call order.
        pub fn encoded_qualities(&self) -> Vec<u8> {
            self.get_operations()
                .into_iter()
                .filter_map(|op| match op {
                    RecordedOp::Encode { quality } => Some(quality),
                    _ => None,
                })
                .collect()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| {
                    BackendError::ProcessingFailed("No mock dimensions".to_string())
                })
        }

        fn decode(&self, path: &Path) -> Result<SourceImage, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode(path.to_string_lossy().to_string()));
            Ok(SourceImage::from_rgb8(2, 2, vec![128; 12]).unwrap())
        }

        fn encode_jpeg(
            &self,
            _image: &SourceImage,
            quality: Quality,
        ) -> Result<Vec<u8>, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                quality: quality.value(),
            });
            if self.fail_encode {
                return Err(BackendError::ProcessingFailed(
                    "mock codec rejected raster".to_string(),
                ));
            }
            Ok(vec![0; (self.size_curve)(quality.value())])
        }
    }

    fn tiny_image() -> SourceImage {
        SourceImage::from_rgb8(1, 1, vec![0, 0, 0]).unwrap()
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::linear(0, 1);
        backend.identify_results.lock().unwrap().push(Dimensions {
            width: 800,
            height: 600,
        });

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_encode_follows_size_curve() {
        let backend = MockBackend::linear(100, 10);

        let bytes = backend.encode_jpeg(&tiny_image(), Quality::new(90)).unwrap();
        assert_eq!(bytes.len(), 1000);
        assert_eq!(backend.encoded_qualities(), vec![90]);
    }

    #[test]
    fn failing_mock_errors_but_still_records() {
        let backend = MockBackend::failing();
        let result = backend.encode_jpeg(&tiny_image(), Quality::new(50));
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
        assert_eq!(backend.encoded_qualities(), vec![50]);
    }
}
