//! Aggregated crawl output: a directory tree with running totals, plus
//! the flat classification buckets the downstream stages consume.

use std::collections::HashMap;
use std::path::PathBuf;

use revmap_core::{FileClassification, FileRecord};
use serde::{Deserialize, Serialize};

/// One directory in the crawled tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DirectoryNode {
    pub name: String,
    pub relative_path: PathBuf,
    pub files: Vec<FileRecord>,
    pub subdirectories: Vec<DirectoryNode>,
    /// Count of files contained anywhere under this node, inclusive.
    pub total_file_count: u64,
    /// Sum of `size_bytes` for every file contained anywhere under this node.
    pub total_size_bytes: u64,
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>, relative_path: PathBuf) -> Self {
        DirectoryNode {
            name: name.into(),
            relative_path,
            files: Vec::new(),
            subdirectories: Vec::new(),
            total_file_count: 0,
            total_size_bytes: 0,
        }
    }

    /// Recomputes `total_file_count`/`total_size_bytes` from the current
    /// `files` and `subdirectories`, bottom-up.
    pub fn recompute_totals(&mut self) {
        for child in &mut self.subdirectories {
            child.recompute_totals();
        }
        self.total_file_count =
            self.files.len() as u64 + self.subdirectories.iter().map(|d| d.total_file_count).sum::<u64>();
        self.total_size_bytes = self.files.iter().map(|f| f.size_bytes).sum::<u64>()
            + self.subdirectories.iter().map(|d| d.total_size_bytes).sum::<u64>();
    }
}

/// The complete output of a crawl: the directory tree plus flat buckets
/// keyed by classification, and an extension histogram over every file
/// seen regardless of bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FileSystemAnalysis {
    pub root: Option<DirectoryNode>,
    pub source_files: Vec<FileRecord>,
    pub configuration_files: Vec<FileRecord>,
    pub resource_files: Vec<FileRecord>,
    pub documentation_files: Vec<FileRecord>,
    pub extension_histogram: HashMap<String, u64>,
    pub total_files: u64,
    pub total_bytes: u64,
}

impl FileSystemAnalysis {
    pub fn record(&mut self, file: FileRecord) {
        *self.extension_histogram.entry(file.extension.clone()).or_insert(0) += 1;
        self.total_files += 1;
        self.total_bytes += file.size_bytes;
        match file.classification {
            FileClassification::Source => self.source_files.push(file),
            FileClassification::Configuration => self.configuration_files.push(file),
            FileClassification::Resource => self.resource_files.push(file),
            FileClassification::Documentation => self.documentation_files.push(file),
            FileClassification::Binary | FileClassification::Archive | FileClassification::Unknown => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64, classification: FileClassification) -> FileRecord {
        FileRecord {
            absolute_path: PathBuf::from(name),
            relative_path: PathBuf::from(name),
            name: name.to_string(),
            extension: name.rsplit('.').next().unwrap_or("").to_string(),
            size_bytes: size,
            created: chrono::Utc::now(),
            modified: chrono::Utc::now(),
            classification,
            encoding: None,
            line_count: None,
            content_hash: None,
        }
    }

    #[test]
    fn empty_tree_has_all_zero_totals() {
        let mut dir = DirectoryNode::new("root", PathBuf::from(""));
        dir.recompute_totals();
        assert_eq!(dir.total_file_count, 0);
        assert_eq!(dir.total_size_bytes, 0);
    }

    #[test]
    fn totals_roll_up_from_nested_subdirectories() {
        let mut child = DirectoryNode::new("sub", PathBuf::from("sub"));
        child.files.push(file("sub/a.cs", 100, FileClassification::Source));
        let mut root = DirectoryNode::new("root", PathBuf::from(""));
        root.files.push(file("b.cs", 50, FileClassification::Source));
        root.subdirectories.push(child);
        root.recompute_totals();
        assert_eq!(root.total_file_count, 2);
        assert_eq!(root.total_size_bytes, 150);
    }

    #[test]
    fn analysis_buckets_by_classification_and_tracks_histogram() {
        let mut analysis = FileSystemAnalysis::default();
        analysis.record(file("a.cs", 10, FileClassification::Source));
        analysis.record(file("b.json", 20, FileClassification::Configuration));
        analysis.record(file("c.dll", 30, FileClassification::Binary));
        assert_eq!(analysis.source_files.len(), 1);
        assert_eq!(analysis.configuration_files.len(), 1);
        assert_eq!(analysis.total_files, 3);
        assert_eq!(analysis.total_bytes, 60);
        assert_eq!(analysis.extension_histogram.get("cs"), Some(&1));
    }
}
