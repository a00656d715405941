//! Crawl options and their documented defaults.

/// Default byte limit per file: 100 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 100 * 1024 * 1024;

/// Default maximum recursion depth.
pub const DEFAULT_MAX_DEPTH: u32 = 50;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub max_depth: u32,
    pub max_file_bytes: u64,
    pub follow_symlinks: bool,
    pub compute_hash: bool,
    pub extract_metadata: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        CrawlOptions {
            include: vec!["*.*".to_string()],
            exclude: vec!["bin/*".to_string(), "obj/*".to_string(), "*.tmp".to_string()],
            max_depth: DEFAULT_MAX_DEPTH,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            follow_symlinks: false,
            compute_hash: false,
            extract_metadata: true,
        }
    }
}
