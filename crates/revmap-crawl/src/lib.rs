//! revmap-crawl — filesystem crawl and classification (first stage of
//! the reverse-engineering pipeline).

pub mod classify;
pub mod options;
pub mod tree;
pub mod walker;

pub use classify::{classify, count_lines, detect_encoding};
pub use options::{CrawlOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_FILE_BYTES};
pub use tree::{DirectoryNode, FileSystemAnalysis};
pub use walker::{crawl, crawl_stream};
