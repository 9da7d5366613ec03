//! JPEG re-encoding under a compression policy.
//!
//! Two policies exist:
//!
//! - **Fixed**: encode once at the given quality (clamped to 0–100).
//! - **Target size**: search downward from quality 100 in steps of 5,
//!   re-encoding each time, until the output fits in `max_bytes` or the
//!   quality floor is reached.
//!
//! ## Search shape
//!
//! ```text
//! quality = 100
//! loop:
//!     encode at quality, measure size
//!     quality -= 5
//!     stop unless size > max_bytes and quality > 0
//! ```
//!
//! The floor check runs after the decrement, so the body always runs at least
//! once and the last quality attempted is 5. Worst case is 20 encodes.
//!
//! ## Best effort at the floor
//!
//! A target that cannot be met is **not** an error. The engine returns the
//! encoding from the last attempt with [`CompressionResult::target_met`] set
//! to `false`. Callers needing a hard size guarantee must check it.
//!
//! Encoding is a pure transform: no file I/O happens here. The engine holds
//! no state between calls, so callers can run it on any thread. Progress is
//! reported through an optional channel of [`SearchEvent`]s, one per encode.

use crate::imaging::{BackendError, ImageBackend, Quality, SourceImage};
use serde::Serialize;
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Quality the target-size search starts from.
pub const SEARCH_START: Quality = Quality::MAX;

/// Amount quality drops between attempts.
pub const SEARCH_STEP: u8 = 5;

/// Upper bound on encodes for one target-size search.
pub const MAX_SEARCH_ATTEMPTS: u32 = 100_u32.div_ceil(SEARCH_STEP as u32);

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Encode failed: {0}")]
    EncodeFailure(String),
}

impl From<BackendError> for CompressError {
    fn from(err: BackendError) -> Self {
        CompressError::EncodeFailure(err.to_string())
    }
}

/// How to pick the output quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionPolicy {
    /// Encode once at this quality. Values above 100 are clamped.
    Fixed(u32),
    /// Lower quality until the output is at most `max_bytes`.
    TargetSize { max_bytes: u64 },
}

impl CompressionPolicy {
    /// Target-size policy from a kilobyte budget (1 KB = 1024 bytes).
    pub fn target_kb(kb: u64) -> Self {
        CompressionPolicy::TargetSize {
            max_bytes: kb.saturating_mul(1024),
        }
    }
}

/// Encoded output of one compression call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionResult {
    bytes: Vec<u8>,
    quality: Quality,
    attempts: u32,
    target_met: bool,
}

impl CompressionResult {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Quality of the returned encoding.
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Number of encodes performed.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Whether the size target was met. Always `true` for fixed quality.
    pub fn target_met(&self) -> bool {
        self.target_met
    }
}

/// One encode attempt during compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchEvent {
    /// 1-based attempt number.
    pub attempt: u32,
    pub quality: u8,
    pub size: u64,
}

/// Compress `image` under `policy`.
pub fn compress(
    backend: &impl ImageBackend,
    image: &SourceImage,
    policy: CompressionPolicy,
) -> Result<CompressionResult, CompressError> {
    compress_with_events(backend, image, policy, None)
}

/// Compress `image` under `policy`, reporting each encode to `events`.
///
/// A disconnected receiver is ignored; the search always runs to completion.
pub fn compress_with_events(
    backend: &impl ImageBackend,
    image: &SourceImage,
    policy: CompressionPolicy,
    events: Option<Sender<SearchEvent>>,
) -> Result<CompressionResult, CompressError> {
    if image.is_empty() {
        return Err(CompressError::InvalidInput(format!(
            "image has no pixels ({}x{})",
            image.width(),
            image.height()
        )));
    }

    let encode = |attempt: u32, quality: Quality| -> Result<Vec<u8>, CompressError> {
        let bytes = backend.encode_jpeg(image, quality)?;
        if let Some(tx) = &events {
            tx.send(SearchEvent {
                attempt,
                quality: quality.value(),
                size: bytes.len() as u64,
            })
            .ok();
        }
        Ok(bytes)
    };

    match policy {
        CompressionPolicy::Fixed(value) => {
            let quality = Quality::new(value);
            let bytes = encode(1, quality)?;
            Ok(CompressionResult {
                bytes,
                quality,
                attempts: 1,
                target_met: true,
            })
        }
        CompressionPolicy::TargetSize { max_bytes: 0 } => Err(CompressError::InvalidInput(
            "target size must be greater than zero".into(),
        )),
        CompressionPolicy::TargetSize { max_bytes } => {
            let mut quality = SEARCH_START.value();
            let mut attempts = 0;
            loop {
                attempts += 1;
                let used = Quality::new(quality as u32);
                let bytes = encode(attempts, used)?;
                let size = bytes.len() as u64;
                quality = quality.saturating_sub(SEARCH_STEP);
                if size <= max_bytes || quality == 0 {
                    return Ok(CompressionResult {
                        bytes,
                        quality: used,
                        attempts,
                        target_met: size <= max_bytes,
                    });
                }
            }
        }
    }
}
