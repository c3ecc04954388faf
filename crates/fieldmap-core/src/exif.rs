//! Conversions for EXIF-derived photo metadata.

use chrono::NaiveDateTime;

use crate::error::{FieldmapError, Result};

/// MIME types whose EXIF block is read for GPS tags.
pub const GPS_CAPABLE_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/tiff"];

/// EXIF `DateTime` layout, e.g. `2024:03:18 14:05:09`.
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Convert degrees/minutes/seconds plus a hemisphere reference to signed
/// decimal degrees.
///
/// Only the exact references `"S"` and `"W"` negate the result.
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64, reference: &str) -> f64 {
    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
    if reference == "S" || reference == "W" {
        -decimal
    } else {
        decimal
    }
}

/// Whether GPS tags are extracted for files of this MIME type.
pub fn supports_gps(mime_type: &str) -> bool {
    GPS_CAPABLE_MIME_TYPES.contains(&mime_type)
}

/// Largest file accepted into a batch.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// MIME types accepted into a batch. PNG is accepted but carries no GPS.
pub const UPLOAD_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/tiff"];

/// Check that a file may join a batch at all.
pub fn validate_upload(filename: &str, mime_type: &str, size: u64) -> Result<()> {
    if !UPLOAD_MIME_TYPES.contains(&mime_type) {
        return Err(FieldmapError::Metadata {
            filename: filename.to_string(),
            reason: format!("File type '{}' is not allowed; use JPEG, PNG or TIFF", mime_type),
        });
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(FieldmapError::Metadata {
            filename: filename.to_string(),
            reason: format!("File is {} bytes, larger than the {} byte limit", size, MAX_UPLOAD_BYTES),
        });
    }
    Ok(())
}

/// Parse an EXIF `DateTime` string. Returns `None` for anything that is not
/// in the `YYYY:MM:DD HH:MM:SS` layout.
pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), EXIF_DATETIME_FORMAT).ok()
}
