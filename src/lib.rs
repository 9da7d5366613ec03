//! # squeeze
//!
//! Shrink a photo to a fixed JPEG quality or under a target file size, then
//! save it into a gallery directory.
//!
//! # Pipeline
//!
//! ```text
//! 1. Decode    photo.png       →  SourceImage        (imaging backend)
//! 2. Compress  SourceImage     →  CompressionResult  (fixed or target size)
//! 3. Publish   result bytes    →  Pictures/name.jpg  (never overwrites)
//! ```
//!
//! Only step 2 makes decisions. Steps 1 and 3 are plumbing around it, kept
//! out of the engine so it stays a pure, synchronous function from raster
//! and policy to bytes.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`compress`] | Compression engine: policies, target-size search, results |
//! | [`imaging`] | Decode boundary and JPEG codec behind the `ImageBackend` trait |
//! | [`gallery`] | Publishing encoded bytes into a directory with collision-safe names |
//! | [`naming`] | `name (N).ext` parsing used by the gallery |
//! | [`config`] | `squeeze.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Linear Quality Search
//!
//! Encoded size is not an invertible function of JPEG quality; it depends on
//! how much detail the image carries. The target-size policy therefore tries
//! qualities 100, 95, 90, … and keeps the first encoding that fits. That is at
//! most 20 encodes, which is fine for one image per user action.
//!
//! ## Best Effort, Not Failure
//!
//! If even the lowest attempted quality is too large, the smallest encoding
//! is returned with `target_met() == false`. Callers that need a hard limit
//! check that flag; the CLI prints a warning line.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding and encoding use the `image` crate only, so the binary has no
//! system library dependencies.

pub mod compress;
pub mod config;
pub mod gallery;
pub mod imaging;
pub mod naming;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
