//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Decode** | `image::ImageReader` with format sniffing |
//! | **Encode → JPEG** | `image::codecs::jpeg::JpegEncoder` |
//!
//! The module is split into:
//! - **Parameters**: [`Quality`] and the [`SourceImage`] raster
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: small helpers combining the backend with file I/O

pub mod backend;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{file_size, get_dimensions, load_source};
pub use params::{Quality, SourceImage};
pub use rust_backend::{RustBackend, is_supported_input, supported_input_extensions};
