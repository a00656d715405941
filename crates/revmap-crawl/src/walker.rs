//! Depth-first filesystem crawl. Directory errors are
//! absorbed as diagnostics so that one unreadable sibling never aborts
//! the whole crawl; invariant violations are the only thing that
//! surfaces as a `PipelineError`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use globset::{Glob, GlobSet, GlobSetBuilder};
use revmap_core::{
    CancellationToken, Diagnostic, FileRecord, Outcome, PipelineError, Progress, ProgressReporter,
};

use crate::classify::{classify, count_lines, detect_encoding};
use crate::options::CrawlOptions;
use crate::tree::{DirectoryNode, FileSystemAnalysis};

struct CompiledGlobs {
    include: GlobSet,
    exclude: GlobSet,
}

fn compile_globs(options: &CrawlOptions) -> Result<CompiledGlobs, PipelineError> {
    let build = |patterns: &[String]| -> Result<GlobSet, PipelineError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(&pattern.to_ascii_lowercase()).map_err(|e| PipelineError::InvalidInput {
                stage: "crawl",
                reason: format!("invalid glob pattern '{pattern}': {e}"),
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| PipelineError::InvalidInput {
            stage: "crawl",
            reason: format!("failed to compile glob set: {e}"),
        })
    };
    Ok(CompiledGlobs { include: build(&options.include)?, exclude: build(&options.exclude)? })
}

/// Exclude wins: a path matching both include and exclude is excluded.
/// Matching is case-insensitive against the slash-separated relative path.
fn path_is_selected(relative: &Path, globs: &CompiledGlobs) -> bool {
    let normalized = relative.to_string_lossy().replace('\\', "/").to_ascii_lowercase();
    if globs.exclude.is_match(&normalized) {
        return false;
    }
    globs.include.is_match(&normalized)
}

fn build_file_record(
    absolute: &Path,
    relative: &Path,
    metadata: &fs::Metadata,
    options: &CrawlOptions,
) -> FileRecord {
    let name = absolute.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    let extension =
        absolute.extension().map(|e| e.to_string_lossy().to_ascii_lowercase()).unwrap_or_default();
    // Birth time is unavailable on plenty of real filesystems (tmpfs, many
    // ext4 mounts, network shares); falling back to independent `now()`
    // calls for `created` and `modified` could otherwise put `created`
    // after a genuinely old `modified`, violating `created <= modified`.
    // Each missing timestamp instead falls back to the other one first.
    let created_raw = metadata.created().ok().map(chrono::DateTime::<chrono::Utc>::from);
    let modified_raw = metadata.modified().ok().map(chrono::DateTime::<chrono::Utc>::from);
    let created = created_raw.or(modified_raw).unwrap_or_else(chrono::Utc::now);
    let modified = modified_raw.or(created_raw).unwrap_or_else(chrono::Utc::now);
    let classification = classify(&extension);

    let (encoding, line_count, content_hash) = if options.extract_metadata {
        match fs::read(absolute) {
            Ok(bytes) => {
                let encoding = Some(detect_encoding(&bytes));
                let line_count = Some(count_lines(&bytes));
                let hash = if options.compute_hash { Some(hash_bytes(&bytes)) } else { None };
                (encoding, line_count, hash)
            }
            Err(_) => (None, None, None),
        }
    } else {
        (None, None, None)
    };

    FileRecord {
        absolute_path: absolute.to_path_buf(),
        relative_path: relative.to_path_buf(),
        name,
        extension,
        size_bytes: metadata.len(),
        created,
        modified,
        classification,
        encoding,
        line_count,
        content_hash,
    }
}

fn hash_bytes(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[allow(clippy::too_many_arguments)]
fn walk_dir(
    absolute_dir: &Path,
    relative_dir: &Path,
    depth: u32,
    root: &Path,
    options: &CrawlOptions,
    globs: &CompiledGlobs,
    cancel: &CancellationToken,
    reporter: &ProgressReporter,
    analysis: &mut FileSystemAnalysis,
    diagnostics: &mut Vec<Diagnostic>,
    progress: &mut Progress,
) -> Option<DirectoryNode> {
    if cancel.is_cancelled() {
        return None;
    }
    if depth > options.max_depth {
        diagnostics.push(Diagnostic::new(
            absolute_dir,
            format!("max depth {} exceeded, skipping subtree", options.max_depth),
        ));
        return None;
    }

    let name = absolute_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.to_string_lossy().to_string());
    let mut node = DirectoryNode::new(name, relative_dir.to_path_buf());

    let entries = match fs::read_dir(absolute_dir) {
        Ok(entries) => entries,
        Err(e) => {
            diagnostics.push(Diagnostic::new(absolute_dir, format!("cannot read directory: {e}")));
            return Some(node);
        }
    };

    progress.directories_seen += 1;
    progress.current_path = Some(absolute_dir.to_string_lossy().to_string());
    reporter(progress);

    let mut children: Vec<fs::DirEntry> = entries.filter_map(|e| e.ok()).collect();
    children.sort_by_key(|e| e.file_name());

    for entry in children {
        if cancel.is_cancelled() {
            break;
        }
        let absolute_child = entry.path();
        let relative_child = relative_dir.join(entry.file_name());

        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(e) => {
                diagnostics.push(Diagnostic::new(&absolute_child, format!("cannot stat entry: {e}")));
                continue;
            }
        };

        if file_type.is_symlink() && !options.follow_symlinks {
            diagnostics.push(Diagnostic::new(&absolute_child, "symlink skipped (follow_symlinks disabled)"));
            continue;
        }

        let is_dir = if file_type.is_symlink() {
            fs::metadata(&absolute_child).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            file_type.is_dir()
        };

        if is_dir {
            if let Some(child_node) = walk_dir(
                &absolute_child,
                &relative_child,
                depth + 1,
                root,
                options,
                globs,
                cancel,
                reporter,
                analysis,
                diagnostics,
                progress,
            ) {
                node.subdirectories.push(child_node);
            }
            continue;
        }

        if !path_is_selected(&relative_child, globs) {
            continue;
        }

        let metadata = match fs::metadata(&absolute_child) {
            Ok(m) => m,
            Err(e) => {
                diagnostics.push(Diagnostic::new(&absolute_child, format!("cannot stat file: {e}")));
                continue;
            }
        };

        if metadata.len() > options.max_file_bytes {
            diagnostics.push(Diagnostic::new(
                &absolute_child,
                format!("file exceeds max_file_bytes ({} > {})", metadata.len(), options.max_file_bytes),
            ));
            continue;
        }

        let record = build_file_record(&absolute_child, &relative_child, &metadata, options);
        progress.files_seen += 1;
        progress.bytes_seen += record.size_bytes;
        reporter(progress);

        node.files.push(record.clone());
        analysis.record(record);
    }

    Some(node)
}

/// Crawls `root`, returning the full directory tree plus the flat
/// classification buckets. Per-file/per-directory failures are absorbed
/// as diagnostics; only an invalid root or cancellation surfaces as an
/// error.
pub fn crawl(
    root: &Path,
    options: &CrawlOptions,
    cancel: &CancellationToken,
    reporter: &ProgressReporter,
) -> Result<Outcome<FileSystemAnalysis>, PipelineError> {
    if !root.exists() {
        return Err(PipelineError::InvalidInput {
            stage: "crawl",
            reason: format!("root path does not exist: {}", root.display()),
        });
    }
    if !root.is_dir() {
        return Err(PipelineError::InvalidInput {
            stage: "crawl",
            reason: format!("root path is not a directory: {}", root.display()),
        });
    }

    let globs = compile_globs(options)?;
    let mut analysis = FileSystemAnalysis::default();
    let mut diagnostics = Vec::new();
    let mut progress = Progress::new("crawl");

    let tree = walk_dir(
        root,
        Path::new(""),
        0,
        root,
        options,
        &globs,
        cancel,
        reporter,
        &mut analysis,
        &mut diagnostics,
        &mut progress,
    );

    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled { stage: "crawl" });
    }

    if let Some(mut tree) = tree {
        tree.recompute_totals();
        analysis.root = Some(tree);
    }

    Ok(Outcome::with_diagnostics(analysis, diagnostics))
}

/// Streams `FileRecord`s one at a time without materializing the
/// directory tree, for callers that only need the flat sequence (e.g. a
/// downstream stage that consumes files incrementally). Runs the crawl
/// on a background thread and funnels results through a channel.
pub fn crawl_stream(
    root: PathBuf,
    options: CrawlOptions,
    cancel: CancellationToken,
) -> mpsc::Receiver<FileRecord> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let reporter: ProgressReporter = revmap_core::silent_reporter();
        if let Ok(globs) = compile_globs(&options) {
            let mut analysis = FileSystemAnalysis::default();
            let mut diagnostics = Vec::new();
            let mut progress = Progress::new("crawl");
            stream_dir(&root, Path::new(""), 0, &root, &options, &globs, &cancel, &reporter, &tx, &mut analysis, &mut diagnostics, &mut progress);
        }
    });
    rx
}

#[allow(clippy::too_many_arguments)]
fn stream_dir(
    absolute_dir: &Path,
    relative_dir: &Path,
    depth: u32,
    root: &Path,
    options: &CrawlOptions,
    globs: &CompiledGlobs,
    cancel: &CancellationToken,
    reporter: &ProgressReporter,
    tx: &mpsc::Sender<FileRecord>,
    analysis: &mut FileSystemAnalysis,
    diagnostics: &mut Vec<Diagnostic>,
    progress: &mut Progress,
) {
    if cancel.is_cancelled() || depth > options.max_depth {
        return;
    }
    let entries = match fs::read_dir(absolute_dir) {
        Ok(e) => e,
        Err(e) => {
            diagnostics.push(Diagnostic::new(absolute_dir, format!("cannot read directory: {e}")));
            return;
        }
    };
    progress.directories_seen += 1;
    reporter(progress);

    let mut children: Vec<fs::DirEntry> = entries.filter_map(|e| e.ok()).collect();
    children.sort_by_key(|e| e.file_name());

    for entry in children {
        if cancel.is_cancelled() {
            break;
        }
        let absolute_child = entry.path();
        let relative_child = relative_dir.join(entry.file_name());
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };
        if file_type.is_symlink() && !options.follow_symlinks {
            continue;
        }
        let is_dir = if file_type.is_symlink() {
            fs::metadata(&absolute_child).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            file_type.is_dir()
        };
        if is_dir {
            stream_dir(&absolute_child, &relative_child, depth + 1, root, options, globs, cancel, reporter, tx, analysis, diagnostics, progress);
            continue;
        }
        if !path_is_selected(&relative_child, globs) {
            continue;
        }
        let metadata = match fs::metadata(&absolute_child) {
            Ok(m) => m,
            Err(_) => continue,
        };
        if metadata.len() > options.max_file_bytes {
            continue;
        }
        let record = build_file_record(&absolute_child, &relative_child, &metadata, options);
        progress.files_seen += 1;
        reporter(progress);
        let _ = tx.send(record);
    }
}
