//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Compress
//!
//! ```text
//! Source
//!     photo.png (4000x3000, 11.21 MB)
//! Search (target 500 KB)
//!     001 q100: 3.34 MB
//!     002 q95: 2.74 MB
//!     ...
//! Result
//!     Quality: 50
//!     Size: 469 KB (4.1% of source)
//!     Attempts: 11
//! Saved
//!     Pictures/compressed_image.jpg (image/jpeg)
//! ```
//!
//! When the target cannot be met the result block says so:
//!
//! ```text
//!     Target: not reached, kept smallest attempt
//! ```
//!
//! ## Info
//!
//! ```text
//! photo.png
//!     Dimensions: 4000x3000
//!     Size: 11.21 MB
//! ```
//!
//! # Architecture
//!
//! Each block has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects. `--json` bypasses the text
//! format and prints a [`CompressReport`] instead.

use crate::compress::{CompressionPolicy, CompressionResult, SearchEvent};
use crate::gallery::PublishedImage;
use serde::Serialize;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: u32) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable byte count using 1024-based units.
///
/// Whole kilobytes up to 1000 KB, megabytes with two decimals above that.
///
/// ```text
/// 512        → 512 B
/// 2048       → 2 KB
/// 1_024_000  → 1000 KB
/// 3_500_000  → 3.34 MB
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let kb = bytes as f64 / KB;
    if kb > 1000.0 {
        format!("{:.2} MB", kb / KB)
    } else if bytes >= 1024 {
        format!("{:.0} KB", kb)
    } else {
        format!("{} B", bytes)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Compress
// ============================================================================

/// What the CLI knows about the input before compressing.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub size: u64,
}

pub fn format_source(source: &SourceSummary) -> Vec<String> {
    vec![
        "Source".to_string(),
        format!(
            "{}{} ({}x{}, {})",
            indent(1),
            file_label(Path::new(&source.path)),
            source.width,
            source.height,
            format_bytes(source.size)
        ),
    ]
}

/// Header printed before search events stream in.
pub fn format_search_header(policy: &CompressionPolicy) -> String {
    match policy {
        CompressionPolicy::Fixed(q) => format!("Search (fixed quality {})", (*q).min(100)),
        CompressionPolicy::TargetSize { max_bytes } => {
            format!("Search (target {})", format_bytes(*max_bytes))
        }
    }
}

pub fn format_search_event(event: &SearchEvent) -> String {
    format!(
        "{}{} q{}: {}",
        indent(1),
        format_index(event.attempt),
        event.quality,
        format_bytes(event.size)
    )
}

pub fn format_result(result: &CompressionResult, source_size: u64) -> Vec<String> {
    let mut lines = vec![
        "Result".to_string(),
        format!("{}Quality: {}", indent(1), result.quality()),
    ];
    if source_size > 0 {
        let pct = result.size() as f64 / source_size as f64 * 100.0;
        lines.push(format!(
            "{}Size: {} ({:.1}% of source)",
            indent(1),
            format_bytes(result.size()),
            pct
        ));
    } else {
        lines.push(format!(
            "{}Size: {}",
            indent(1),
            format_bytes(result.size())
        ));
    }
    lines.push(format!("{}Attempts: {}", indent(1), result.attempts()));
    if !result.target_met() {
        lines.push(format!(
            "{}Target: not reached, kept smallest attempt",
            indent(1)
        ));
    }
    lines
}

pub fn format_published(published: Option<&PublishedImage>) -> Vec<String> {
    match published {
        Some(p) => vec![
            "Saved".to_string(),
            format!("{}{} ({})", indent(1), p.path.display(), p.mime_type),
        ],
        None => vec![
            "Saved".to_string(),
            format!("{}nothing (dry run)", indent(1)),
        ],
    }
}

/// Machine-readable summary printed with `--json`.
#[derive(Debug, Serialize)]
pub struct CompressReport {
    pub source: SourceSummary,
    pub quality: u8,
    pub size: u64,
    pub attempts: u32,
    pub target_met: bool,
    pub events: Vec<SearchEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<PublishedImage>,
}

impl CompressReport {
    pub fn new(
        source: SourceSummary,
        result: &CompressionResult,
        events: Vec<SearchEvent>,
        published: Option<PublishedImage>,
    ) -> Self {
        Self {
            source,
            quality: result.quality().value(),
            size: result.size(),
            attempts: result.attempts(),
            target_met: result.target_met(),
            events,
            published,
        }
    }
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Info
// ============================================================================

pub fn format_info(path: &Path, dimensions: (u32, u32), size: u64) -> Vec<String> {
    vec![
        path.display().to_string(),
        format!("{}Dimensions: {}x{}", indent(1), dimensions.0, dimensions.1),
        format!("{}Size: {}", indent(1), format_bytes(size)),
    ]
}

pub fn print_info(path: &Path, dimensions: (u32, u32), size: u64) {
    print_lines(&format_info(path, dimensions, size));
}
