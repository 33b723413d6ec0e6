/// Extraction strategy for one picked file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// Word document: text comes from the document extractor.
    WordDocument,
    /// Plain text: bytes are decoded as UTF-8.
    PlainText,
    /// Everything else (images, PDF, unknown): bytes are base64-encoded.
    Binary,
}

const WORD_MIME_TYPES: [&str; 2] = [
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Picks the extraction strategy. Precedence: Word extension or MIME
/// type first, then plain text, then binary as the catch-all.
pub fn classify(file_name: &str, declared_mime: &str) -> FileClass {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".docx")
        || lower.ends_with(".doc")
        || WORD_MIME_TYPES.contains(&declared_mime)
    {
        return FileClass::WordDocument;
    }
    if declared_mime == "text/plain" || lower.ends_with(".txt") || lower.ends_with(".md") {
        return FileClass::PlainText;
    }
    FileClass::Binary
}

/// Declared MIME type for a filename, by extension. The stand-in for
/// what a file picker would report; unknown extensions map to the
/// generic binary type.
pub fn declared_mime_type(file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    };
    mime.to_string()
}
