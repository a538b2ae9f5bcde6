//! MIME type inference for message attachments.

use std::path::Path;

/// Used when the extension is missing or unrecognized.
pub const FALLBACK_MIME: &str = "image/*";

/// Infer an attachment MIME type from the file extension (case-insensitive).
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("mp4") => "video/mp4",
        Some("3gp") => "video/3gp",
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        _ => FALLBACK_MIME,
    }
}
