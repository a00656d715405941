//! CLI command implementations: crawl, scan, check.
//!
//! All three share the same pipeline (crawl -> symbols -> dependencies ->
//! architecture -> relationships -> visualization) and the same
//! cancellation/progress plumbing; they differ only in what they do with
//! the result.

use std::path::{Path, PathBuf};

use revmap_core::{CancellationToken, Diagnostic, FileRecord, ProgressReporter, Severity};

use crate::config::PipelineConfig;

pub enum Status {
    Clean,
    IssuesFound,
}

fn logging_reporter() -> ProgressReporter {
    std::sync::Arc::new(|progress: &revmap_core::Progress| {
        tracing::debug!(
            stage = progress.stage,
            files = progress.files_seen,
            dirs = progress.directories_seen,
            "progress"
        );
    })
}

fn crawl_options_from_config(config: &PipelineConfig) -> revmap_crawl::CrawlOptions {
    let mut options = revmap_crawl::CrawlOptions::default();
    if !config.include.is_empty() {
        options.include = config.include.clone();
    }
    if !config.exclude.is_empty() {
        options.exclude = config.exclude.clone();
    }
    options.max_depth = config.max_depth;
    options.max_file_bytes = config.max_file_bytes;
    options
}

fn report_diagnostics(stage: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        tracing::warn!(stage, path = %diagnostic.path.display(), "{}", diagnostic.message);
    }
}

/// Files that can plausibly carry symbols, manifests, or SQL: the source
/// and configuration buckets. Resource/documentation/binary/archive files
/// never feed extraction or dependency resolution.
fn relevant_files(analysis: &revmap_crawl::FileSystemAnalysis) -> Vec<FileRecord> {
    let mut files = analysis.source_files.clone();
    files.extend(analysis.configuration_files.iter().cloned());
    files
}

struct PipelineResult {
    symbols: revmap_symbols::CodeAnalysis,
    dependencies: revmap_deps::DependencyAnalysis,
    architecture: revmap_arch::ArchitectureAnalysis,
    relationships: revmap_relate::RelationshipMapping,
}

fn run_pipeline(root: &Path, config: &PipelineConfig, cancel: &CancellationToken) -> anyhow::Result<PipelineResult> {
    let reporter = logging_reporter();

    tracing::info!("crawling {}", root.display());
    let crawl_outcome = revmap_crawl::crawl(root, &crawl_options_from_config(config), cancel, &reporter)?;
    report_diagnostics("crawl", &crawl_outcome.diagnostics);
    let crawl = crawl_outcome.value;
    tracing::info!(files = crawl.total_files, bytes = crawl.total_bytes, "crawl complete");

    let files = relevant_files(&crawl);

    tracing::info!("extracting symbols from {} candidate files", files.len());
    let mut symbol_options = revmap_symbols::SymbolOptions::default();
    symbol_options.compute_metrics = config.compute_metrics;
    let symbols_outcome = revmap_symbols::extract(&files, &symbol_options, cancel, &reporter)?;
    report_diagnostics("symbols", &symbols_outcome.diagnostics);
    let symbols = symbols_outcome.value;
    tracing::info!(symbols = symbols.symbols.len(), "symbol extraction complete");

    tracing::info!("resolving dependencies");
    let deps_outcome = revmap_deps::resolve(
        &symbols.symbols,
        &files,
        &revmap_deps::DependencyOptions::default(),
        cancel,
        &reporter,
    )?;
    report_diagnostics("dependencies", &deps_outcome.diagnostics);
    let dependencies = deps_outcome.value;
    tracing::info!(
        static_edges = dependencies.static_edges.len(),
        cycles = dependencies.cycles.len(),
        "dependency resolution complete"
    );

    tracing::info!("analyzing architecture");
    let arch_outcome = revmap_arch::analyze(
        &symbols.symbols,
        &dependencies.static_edges,
        &revmap_arch::ArchitectureOptions::default(),
        cancel,
    )?;
    let architecture = arch_outcome.value;
    tracing::info!(
        components = architecture.components.len(),
        violations = architecture.violations.len(),
        "architecture analysis complete"
    );

    tracing::info!("mapping relationships");
    let relate_outcome = revmap_relate::map(
        &symbols.symbols,
        &dependencies.static_edges,
        &architecture.components,
        &architecture.layers,
        &revmap_relate::RelationshipOptions::default(),
        cancel,
    )?;
    let relationships = relate_outcome.value;
    tracing::info!(relationships = relationships.statistics.total_relationships, "relationship mapping complete");

    Ok(PipelineResult { symbols, dependencies, architecture, relationships })
}

fn has_issues(result: &PipelineResult) -> bool {
    !result.dependencies.cycles.is_empty()
        || result.architecture.violations.iter().any(|v| v.severity == Severity::High)
}

pub fn crawl(root: &Path) -> anyhow::Result<Status> {
    let config = PipelineConfig::load(root)?;
    let cancel = CancellationToken::new();
    let reporter = logging_reporter();
    let outcome = revmap_crawl::crawl(root, &crawl_options_from_config(&config), &cancel, &reporter)?;
    report_diagnostics("crawl", &outcome.diagnostics);
    let analysis = outcome.value;
    println!("files: {}", analysis.total_files);
    println!("bytes: {}", analysis.total_bytes);
    println!("source files: {}", analysis.source_files.len());
    println!("configuration files: {}", analysis.configuration_files.len());
    let mut extensions: Vec<(&String, &u64)> = analysis.extension_histogram.iter().collect();
    extensions.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (extension, count) in extensions.into_iter().take(15) {
        println!("  .{extension}: {count}");
    }
    Ok(Status::Clean)
}

pub fn scan(root: &Path, output_override: Option<PathBuf>) -> anyhow::Result<Status> {
    let config = PipelineConfig::load(root)?;
    let cancel = CancellationToken::new();
    let result = run_pipeline(root, &config, &cancel)?;

    tracing::info!("building visualization package");
    let viz_outcome = revmap_viz::build(
        &result.symbols.symbols,
        &result.dependencies.static_edges,
        &result.architecture,
        &result.relationships,
        &revmap_viz::VisualizationOptions::default(),
        &cancel,
    )?;

    let output_dir = output_override.unwrap_or_else(|| config.output_dir.clone());
    let output_dir = if output_dir.is_absolute() { output_dir } else { root.join(output_dir) };
    revmap_viz::package::write_package(&viz_outcome.value, &output_dir)?;
    tracing::info!("wrote visualization package to {}", output_dir.display());

    println!("symbols: {}", result.symbols.symbols.len());
    println!("static edges: {}", result.dependencies.static_edges.len());
    println!("cycles: {}", result.dependencies.cycles.len());
    println!("components: {}", result.architecture.components.len());
    println!("violations: {}", result.architecture.violations.len());
    println!("output: {}", output_dir.display());

    Ok(if has_issues(&result) { Status::IssuesFound } else { Status::Clean })
}

/// Parses a single C# file and prints its tree-sitter AST as JSON, for
/// inspecting what the symbol extractor actually sees.
pub fn dump_ast(path: &Path) -> anyhow::Result<Status> {
    use revmap_symbols::parser_pool::{create_parser_pool, tree_to_json, FileType, ParseRequest};

    let file_type = FileType::from_path(&path.to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("{}: no tree-sitter grammar for this extension", path.display()))?;
    let content = std::fs::read_to_string(path)?;
    let pool = create_parser_pool();
    let result = pool.parse_blocking(ParseRequest { file_type, content: content.clone(), path: path.to_path_buf() })?;
    println!("{}", tree_to_json(&result.tree.root_node(), &content));
    Ok(Status::Clean)
}

pub fn check(root: &Path) -> anyhow::Result<Status> {
    let config = PipelineConfig::load(root)?;
    let cancel = CancellationToken::new();
    let result = run_pipeline(root, &config, &cancel)?;

    for cycle in &result.dependencies.cycles {
        eprintln!("circular dependency: {}", cycle.cycle.join(" -> "));
    }
    for violation in &result.architecture.violations {
        eprintln!("{:?} [{:?}] {}: {}", violation.kind, violation.severity, violation.location, violation.description);
    }

    Ok(if has_issues(&result) { Status::IssuesFound } else { Status::Clean })
}
