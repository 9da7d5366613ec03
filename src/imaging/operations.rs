//! High-level image operations.
//!
//! Thin helpers the CLI calls around the backend: dimension reads, source
//! file sizes, and loading a source image for compression.

use super::backend::{BackendError, ImageBackend};
use super::params::SourceImage;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Size of a file on disk, in bytes.
pub fn file_size(path: &Path) -> Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}

/// Decode a source image, rejecting rasters with no pixels.
pub fn load_source(backend: &impl ImageBackend, path: &Path) -> Result<SourceImage> {
    let image = backend.decode(path)?;
    if image.is_empty() {
        return Err(BackendError::ProcessingFailed(format!(
            "{} decoded to an empty image",
            path.display()
        )));
    }
    Ok(image)
}
