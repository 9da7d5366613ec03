//! Saving compressed images into a gallery directory.
//!
//! The gallery is a plain directory (by default `Pictures/`). Publishing
//! never overwrites: when the requested name is taken, the next free
//! `name (N).ext` is used, as a device media store would. Files are opened
//! with `create_new`, so two publishers racing for the same name cannot
//! clobber each other. A failed write removes the partial file.
//!
//! The engine in [`compress`](crate::compress) hands over finished bytes; all
//! naming, MIME tagging, and disk I/O happen here.

use crate::naming::{ParsedName, parse_display_name, validate_display_name};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// MIME type recorded for every published image.
pub const JPEG_MIME: &str = "image/jpeg";

/// Give up after this many taken names.
const MAX_NAME_ATTEMPTS: u32 = 10_000;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid file name: {0}")]
    InvalidName(String),
}

/// Reference to an image saved into the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedImage {
    pub path: PathBuf,
    pub display_name: String,
    pub mime_type: &'static str,
    pub size: u64,
}

/// A directory that receives published images.
#[derive(Debug, Clone)]
pub struct Gallery {
    root: PathBuf,
}

impl Gallery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `bytes` under `file_name`, or the next free variant of it.
    pub fn publish(&self, bytes: &[u8], file_name: &str) -> Result<PublishedImage, GalleryError> {
        validate_display_name(file_name).map_err(GalleryError::InvalidName)?;
        fs::create_dir_all(&self.root)?;

        let parsed = parse_display_name(file_name);
        let mut copy = parsed.copy;
        for _ in 0..MAX_NAME_ATTEMPTS {
            let display_name = parsed.render(copy);
            let path = self.root.join(&display_name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_or_remove(file, &path, bytes)?;
                    return Ok(PublishedImage {
                        path,
                        display_name,
                        mime_type: JPEG_MIME,
                        size: bytes.len() as u64,
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    copy = Some(ParsedName::next_copy(copy));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(GalleryError::InvalidName(format!(
            "no free name for {file_name} after {MAX_NAME_ATTEMPTS} attempts"
        )))
    }
}

fn write_or_remove(mut file: fs::File, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let result = file.write_all(bytes).and_then(|()| file.sync_all());
    if result.is_err() {
        drop(file);
        fs::remove_file(path).ok();
    }
    result
}
