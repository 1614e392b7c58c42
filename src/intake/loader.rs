/// Image file loader
///
/// Files are never decoded or resized here. The bytes go to the backend
/// untouched, and the GUI decodes them on its own when drawing a preview.
use image::ImageFormat;
use std::io;
use std::path::{Path, PathBuf};

/// Sent when the file name doesn't map to a known image format
const FALLBACK_MIME: &str = "application/octet-stream";

/// Extensions offered by the file picker filter
pub const PICKER_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "ico", "avif",
];

/// Check whether a path names an image file, judging by its extension
pub fn is_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

/// MIME type for the multipart `image` part
pub fn mime_type(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}

/// Display name for a selected file (the last path component)
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Pick the file to use from a drag-drop
///
/// Non-image files are ignored without any feedback.
pub fn accept_drop(path: PathBuf) -> Option<PathBuf> {
    if is_image(&path) {
        Some(path)
    } else {
        tracing::debug!(path = %path.display(), "ignoring dropped non-image file");
        None
    }
}

/// Read the whole file in the background
pub async fn read_bytes(path: PathBuf) -> io::Result<Vec<u8>> {
    tokio::fs::read(&path).await
}
