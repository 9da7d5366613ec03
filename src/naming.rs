//! Filename handling for the `name (N).ext` collision convention.
//!
//! Media galleries never overwrite: saving `photo.jpg` twice yields
//! `photo.jpg` and then `photo (1).jpg`, `photo (2).jpg`, and so on. This
//! module parses display names into their parts and renders the next free
//! candidate. It is pure; the filesystem checks live in
//! [`gallery`](crate::gallery).
//!
//! ## Extensions
//!
//! Output is always JPEG, so a name without an extension gets `.jpg`. Any
//! other extension the caller chose is kept as given.

/// Result of parsing a display name like `holiday (2).jpg`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Name without copy suffix or extension (e.g. `holiday`).
    pub base: String,
    /// Copy number from a trailing ` (N)`, if present.
    pub copy: Option<u32>,
    /// Extension without the dot. `jpg` when the input had none.
    pub extension: String,
}

impl ParsedName {
    /// Render with the given copy number (`None` = plain name).
    pub fn render(&self, copy: Option<u32>) -> String {
        match copy {
            Some(n) => format!("{} ({}).{}", self.base, n, self.extension),
            None => format!("{}.{}", self.base, self.extension),
        }
    }

    /// Copy number to try after `self.copy` is taken.
    pub fn next_copy(copy: Option<u32>) -> u32 {
        copy.map_or(1, |n| n.saturating_add(1))
    }
}

/// Reject names that are empty or would escape the gallery directory.
pub fn validate_display_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("file name is empty".into());
    }
    if name.contains('/') || name.contains('\\') {
        return Err(format!(
            "file name must not contain path separators: {name}"
        ));
    }
    if name == "." || name == ".." {
        return Err(format!("file name is not a file: {name}"));
    }
    Ok(())
}

/// Parse a display name following the `name (N).ext` convention.
///
/// Handles these patterns:
/// - `"photo.jpg"` → base="photo", copy=None, extension="jpg"
/// - `"photo (3).jpg"` → base="photo", copy=Some(3), extension="jpg"
/// - `"photo"` → base="photo", copy=None, extension="jpg"
/// - `"my.trip.jpeg"` → base="my.trip", copy=None, extension="jpeg"
/// - `"photo (x).jpg"` → base="photo (x)", copy=None (not a number)
/// - `".hidden"` → base=".hidden", copy=None, extension="jpg"
pub fn parse_display_name(name: &str) -> ParsedName {
    let (stem, extension) = match name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < name.len() => (&name[..dot], &name[dot + 1..]),
        _ => (name, "jpg"),
    };

    if let Some(open) = stem.rfind(" (")
        && let Some(inner) = stem[open + 2..].strip_suffix(')')
        && let Ok(n) = inner.parse::<u32>()
    {
        return ParsedName {
            base: stem[..open].to_string(),
            copy: Some(n),
            extension: extension.to_string(),
        };
    }

    ParsedName {
        base: stem.to_string(),
        copy: None,
        extension: extension.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_with_extension() {
        let p = parse_display_name("compressed_image.jpg");
        assert_eq!(p.base, "compressed_image");
        assert_eq!(p.copy, None);
        assert_eq!(p.extension, "jpg");
    }

    #[test]
    fn name_with_copy_suffix() {
        let p = parse_display_name("photo (3).jpg");
        assert_eq!(p.base, "photo");
        assert_eq!(p.copy, Some(3));
        assert_eq!(p.extension, "jpg");
    }

    #[test]
    fn missing_extension_defaults_to_jpg() {
        let p = parse_display_name("photo");
        assert_eq!(p.base, "photo");
        assert_eq!(p.extension, "jpg");
    }

    #[test]
    fn trailing_dot_defaults_to_jpg() {
        let p = parse_display_name("photo.");
        assert_eq!(p.base, "photo.");
        assert_eq!(p.extension, "jpg");
    }

    #[test]
    fn only_last_dot_splits_extension() {
        let p = parse_display_name("my.trip.jpeg");
        assert_eq!(p.base, "my.trip");
        assert_eq!(p.extension, "jpeg");
    }

    #[test]
    fn non_numeric_parens_stay_in_base() {
        let p = parse_display_name("photo (x).jpg");
        assert_eq!(p.base, "photo (x)");
        assert_eq!(p.copy, None);
    }

    #[test]
    fn dotfile_is_not_an_extension() {
        let p = parse_display_name(".hidden");
        assert_eq!(p.base, ".hidden");
        assert_eq!(p.extension, "jpg");
    }

    #[test]
    fn render_round_trips() {
        let p = parse_display_name("photo (3).jpg");
        assert_eq!(p.render(p.copy), "photo (3).jpg");
        assert_eq!(p.render(None), "photo.jpg");
        assert_eq!(p.render(Some(4)), "photo (4).jpg");
    }

    #[test]
    fn next_copy_starts_at_one() {
        assert_eq!(ParsedName::next_copy(None), 1);
        assert_eq!(ParsedName::next_copy(Some(1)), 2);
        assert_eq!(ParsedName::next_copy(Some(u32::MAX)), u32::MAX);
    }

    #[test]
    fn validate_rejects_separators_and_dots() {
        assert!(validate_display_name("ok.jpg").is_ok());
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name("   ").is_err());
        assert!(validate_display_name("../escape.jpg").is_err());
        assert!(validate_display_name("dir\\file.jpg").is_err());
        assert!(validate_display_name("..").is_err());
    }
}
