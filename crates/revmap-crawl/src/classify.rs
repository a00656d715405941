//! Extension-based file classification and lightweight text sniffing.
//! Classification is a pure function of the lowercased extension alone, so
//! re-classifying an already-classified file always yields the same result.

use revmap_core::{FileClassification, TextEncoding};

const SOURCE_EXTS: &[&str] = &[
    "cs", "vb", "cpp", "c", "h", "hpp", "java", "js", "ts", "py", "sql", "ps1", "psm1", "bat", "cmd",
    "lsp", "dcl",
];

const CONFIG_EXTS: &[&str] =
    &["config", "xml", "json", "yaml", "yml", "ini", "properties", "settings", "resx", "csproj"];

const DOC_EXTS: &[&str] = &["md", "txt", "html", "htm", "rtf", "adoc"];

const BINARY_EXTS: &[&str] = &["dll", "exe", "so", "dylib", "pdb", "obj"];

const ARCHIVE_EXTS: &[&str] = &["zip", "7z", "tar", "gz", "rar"];

/// Classify by lowercased extension (without the leading dot).
pub fn classify(extension: &str) -> FileClassification {
    let ext = extension.to_ascii_lowercase();
    if SOURCE_EXTS.contains(&ext.as_str()) {
        FileClassification::Source
    } else if CONFIG_EXTS.contains(&ext.as_str()) {
        FileClassification::Configuration
    } else if DOC_EXTS.contains(&ext.as_str()) {
        FileClassification::Documentation
    } else if BINARY_EXTS.contains(&ext.as_str()) {
        FileClassification::Binary
    } else if ARCHIVE_EXTS.contains(&ext.as_str()) {
        FileClassification::Archive
    } else if ext.is_empty() {
        FileClassification::Unknown
    } else {
        FileClassification::Unknown
    }
}

/// Sniff a byte-order mark. Falls back to UTF-8 when none is present.
pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        TextEncoding::Utf8
    } else if bytes.starts_with(&[0xFF, 0xFE]) {
        TextEncoding::Utf16Le
    } else if bytes.starts_with(&[0xFE, 0xFF]) {
        TextEncoding::Utf16Be
    } else {
        TextEncoding::Utf8
    }
}

/// Count newline-separated lines, the same way regardless of trailing
/// newline presence.
pub fn count_lines(bytes: &[u8]) -> u64 {
    if bytes.is_empty() {
        return 0;
    }
    let mut count = bytes.iter().filter(|&&b| b == b'\n').count() as u64;
    if bytes.last() != Some(&b'\n') {
        count += 1;
    }
    count
}
