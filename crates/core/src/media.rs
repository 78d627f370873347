//! Media library rules: accepted upload types, size limits, storage keys and
//! header-only image dimension extraction.

use std::io::Cursor;

use crate::error::CoreError;
use crate::slug::slugify;
use crate::types::Timestamp;

/// Default maximum upload size (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Upload MIME types with their canonical file extension.
pub const ALLOWED_UPLOAD_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/avif", "avif"),
    ("image/gif", "gif"),
    ("application/pdf", "pdf"),
];

/// Top-level prefix for media objects in the storage backend.
pub const MEDIA_PREFIX: &str = "media";

/// Return the canonical extension for an accepted MIME type.
pub fn extension_for(mime: &str) -> Result<&'static str, CoreError> {
    let mime = mime.trim().to_ascii_lowercase();
    ALLOWED_UPLOAD_TYPES
        .iter()
        .find(|(m, _)| *m == mime)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| CoreError::Validation(format!("File type '{mime}' is not allowed")))
}

pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Validate an upload's declared type and size.
pub fn validate_upload(mime: &str, size: usize, max_bytes: usize) -> Result<(), CoreError> {
    extension_for(mime)?;
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size > max_bytes {
        return Err(CoreError::Validation(format!(
            "File is too large ({size} bytes); maximum is {max_bytes} bytes"
        )));
    }
    Ok(())
}

/// Build the storage key for a new upload:
/// `media/<yyyy>/<mm>/<unique>-<slugified stem>.<ext>`.
pub fn storage_key(
    original_filename: &str,
    mime: &str,
    unique: &str,
    now: Timestamp,
) -> Result<String, CoreError> {
    let ext = extension_for(mime)?;
    let stem = original_filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(original_filename);
    let stem = slugify(stem);
    let stem = if stem.is_empty() { "file".to_string() } else { stem };
    Ok(format!(
        "{MEDIA_PREFIX}/{}/{unique}-{stem}.{ext}",
        now.format("%Y/%m")
    ))
}

/// Read image dimensions from the file header without decoding pixels.
///
/// Returns `None` for non-image content or when the format cannot be
/// sniffed; dimensions are informational only.
pub fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    /// A complete 2x3 RGB PNG.
    const PNG_2X3: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x03, 0x08, 0x02, 0x00, 0x00,
        0x00, 0x36, 0x88, 0x49, 0xD6, 0x00, 0x00, 0x00, 0x10, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x44, 0x0C, 0x28, 0x14, 0x00, 0x44, 0xD0, 0x05,
        0xFB, 0xA4, 0xCF, 0xDE, 0x80, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
        0x42, 0x60, 0x82,
    ];

    #[test]
    fn extensions() {
        assert_eq!(extension_for("image/jpeg").unwrap(), "jpg");
        assert_eq!(extension_for("Application/PDF").unwrap(), "pdf");
        assert_matches!(extension_for("image/svg+xml"), Err(CoreError::Validation(_)));
        assert_matches!(
            extension_for("application/x-msdownload"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn upload_size_limits() {
        assert!(validate_upload("image/png", 1024, DEFAULT_MAX_UPLOAD_BYTES).is_ok());
        assert!(validate_upload("image/png", 0, DEFAULT_MAX_UPLOAD_BYTES).is_err());
        assert!(validate_upload("image/png", 11, 10).is_err());
        assert!(validate_upload("text/html", 10, 100).is_err());
    }

    #[test]
    fn storage_key_layout() {
        let now = chrono::Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap();
        let key = storage_key("Affiche Été 2025.JPG", "image/jpeg", "abc123", now).unwrap();
        assert_eq!(key, "media/2025/03/abc123-affiche-ete-2025.jpg");

        let key = storage_key("???", "application/pdf", "u1", now).unwrap();
        assert_eq!(key, "media/2025/03/u1-file.pdf");
    }

    #[test]
    fn reads_png_dimensions_from_header() {
        assert_eq!(image_dimensions(PNG_2X3), Some((2, 3)));
    }

    #[test]
    fn non_image_has_no_dimensions() {
        assert_eq!(image_dimensions(b"%PDF-1.7 not an image"), None);
    }
}
