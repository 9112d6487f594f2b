//! File-type policy for the layer that collects files before embedding.
//!
//! The embedder itself accepts any bytes under any name; these helpers are
//! what a front end (such as the bundled CLI) uses to vet its inputs.

use std::path::Path;

/// Extensions accepted for attachments, lowercase and without the dot.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    "pdf", "txt", "csv", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "jpg",
    "jpeg", "png", "gif", "bmp", "svg",
];

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Returns `true` when `name` ends in one of [`ACCEPTED_EXTENSIONS`]
/// (case-insensitive).
pub fn is_accepted_extension(name: &str) -> bool {
    extension_of(name).is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Returns `true` when `name` has a `.pdf` suffix (case-insensitive), the
/// requirement for a base document.
pub fn is_pdf_filename(name: &str) -> bool {
    extension_of(name).is_some_and(|ext| ext == "pdf")
}

/// MIME type recorded as `/Subtype` on an embedded file stream.
pub fn mime_type_for(name: &str) -> Option<&'static str> {
    let mime = match extension_of(name)?.as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "odt" => "application/vnd.oasis.opendocument.text",
        "ods" => "application/vnd.oasis.opendocument.spreadsheet",
        "odp" => "application/vnd.oasis.opendocument.presentation",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "xml" => "application/xml",
        _ => return None,
    };
    Some(mime)
}
