use crate::local::resolver::base_name;

/// Extension used when a file link carries none.
pub const DEFAULT_EXTENSION: &str = "zip";

/// Keeps the final path component and drops every character outside
/// `[A-Za-z0-9._-]`.
pub fn sanitize_name(raw: &str) -> String {
    base_name(raw)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}

/// Object name for a spreadsheet row: sanitized `Name` plus the extension
/// of the linked file.
pub fn remote_object_name(row_name: &str, extension: &str, row_index: usize) -> String {
    let base = match sanitize_name(row_name) {
        base if base.is_empty() => format!("file_{row_index}"),
        base => base,
    };
    let extension = match sanitize_name(extension) {
        ext if ext.is_empty() => DEFAULT_EXTENSION.to_string(),
        ext => ext,
    };
    format!("{base}.{extension}")
}

pub fn artifact_object_name(file_name: &str, fallback: &str) -> String {
    match sanitize_name(file_name) {
        name if name.is_empty() => fallback.to_string(),
        name => name,
    }
}

pub fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "tif" | "tiff" => "image/tiff",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}
