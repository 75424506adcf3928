//! MIME type detection and size formatting for file-backed resources.

use std::path::Path;

/// MIME type for a file, derived from its extension.
///
/// Unmapped extensions fall back to `application/octet-stream`, which the
/// reader treats as binary.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        // Text types
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("csv") => "text/csv",
        Some("xml") => "text/xml",

        // Application types
        Some("json") => "application/json",
        Some("js") => "application/javascript",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",

        // Image types
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",

        // Code types (treated as text)
        Some("rs") => "text/x-rust",
        Some("py") => "text/x-python",
        Some("ts") => "text/typescript",
        Some("go") => "text/x-go",
        Some("java") => "text/x-java",
        Some("c") | Some("h") => "text/x-c",
        Some("cpp") | Some("cc") | Some("cxx") => "text/x-c++",
        Some("sh") => "text/x-shellscript",
        Some("yaml") | Some("yml") => "text/yaml",

        _ => "application/octet-stream",
    }
}

/// Whether a MIME type is served as UTF-8 text rather than raw bytes.
///
/// SVG is XML-based text despite the `image/` prefix.
pub fn is_text_mime(mime_type: &str) -> bool {
    mime_type.starts_with("text/")
        || mime_type == "application/json"
        || mime_type == "application/javascript"
        || mime_type == "image/svg+xml"
}

/// Human-readable size with binary unit suffixes and one decimal place.
pub fn format_file_size(size: u64) -> String {
    const SUFFIXES: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = size as f64;
    let mut counter = 0;
    while value >= 1024.0 && counter < SUFFIXES.len() - 1 {
        value /= 1024.0;
        counter += 1;
    }

    format!("{:.1} {}", value, SUFFIXES[counter])
}
