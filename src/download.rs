//! Buffer export
//!
//! Maps a language identifier to the MIME type and file extension used when
//! the edit buffer is downloaded. The mapping is data in the language
//! registry; identifiers outside it fall back to a generic binary type.

use crate::languages::find_language;

/// Base file name used when the caller does not configure one
pub const DEFAULT_BASENAME: &str = "file";

/// MIME type for languages without an explicit mapping
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Extension for languages without an explicit mapping
pub const FALLBACK_EXTENSION: &str = "txt";

/// MIME type and extension for a language
pub fn file_type(language: &str) -> (&'static str, &'static str) {
    match find_language(language) {
        Some(lang) => (lang.mime_type, lang.extension),
        None => (FALLBACK_MIME_TYPE, FALLBACK_EXTENSION),
    }
}

/// A downloadable file built from the edit buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    /// File name including extension (e.g. `file.py`)
    pub file_name: String,
    /// MIME type of the content
    pub mime_type: &'static str,
    /// File contents
    pub content: String,
}

impl DownloadArtifact {
    /// Size of the content in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Build a downloadable artifact named `filename.<extension>`
pub fn format(content: &str, filename: &str, language: &str) -> DownloadArtifact {
    let (mime_type, extension) = file_type(language);
    DownloadArtifact {
        file_name: format!("{}.{}", filename, extension),
        mime_type,
        content: content.to_string(),
    }
}
