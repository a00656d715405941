//! Options controlling symbol extraction.

use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct SymbolOptions {
    /// Lowercased extensions to extract; empty means "everything the
    /// roster supports".
    pub supported_languages: HashSet<String>,
    pub max_file_bytes: u64,
    pub include_private: bool,
    pub extract_doc: bool,
    pub compute_metrics: bool,
}

impl Default for SymbolOptions {
    fn default() -> Self {
        SymbolOptions {
            supported_languages: HashSet::new(),
            max_file_bytes: 20 * 1024 * 1024,
            include_private: true,
            extract_doc: false,
            compute_metrics: true,
        }
    }
}

impl SymbolOptions {
    pub fn accepts(&self, extension: &str) -> bool {
        self.supported_languages.is_empty() || self.supported_languages.contains(extension)
    }
}
