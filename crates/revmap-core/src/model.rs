//! Data model shared by every pipeline stage: crawl results, extracted
//! symbols, resolved dependencies, inferred architecture, and mapped
//! relationships. Every type here is a plain, `serde`-derived value — no
//! trait-object hierarchy — using tagged enum variants instead of a class
//! hierarchy to represent the legacy language's symbol kinds.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ───────────────────────── Crawl (FileRecord) ─────────────────────────

/// Classification bucket a crawled file falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileClassification {
    Source,
    Configuration,
    Resource,
    Documentation,
    Binary,
    Archive,
    Unknown,
}

/// Text encoding inferred from a byte-order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

/// One file discovered by the crawler. Immutable once created; never
/// mutated after the crawl stage publishes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileRecord {
    pub absolute_path: PathBuf,
    pub relative_path: PathBuf,
    pub name: String,
    /// Lowercased extension, without the leading dot (empty if none).
    pub extension: String,
    pub size_bytes: u64,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub classification: FileClassification,
    pub encoding: Option<TextEncoding>,
    pub line_count: Option<u64>,
    /// Hex-encoded SHA-256 digest, present only when hashing was requested.
    pub content_hash: Option<String>,
}

// ───────────────────────── Symbols (Symbol) ─────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Namespace,
    Class,
    Interface,
    Struct,
    Enum,
    Method,
    Property,
    Field,
    Event,
    Delegate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Protected,
    Internal,
    ProtectedInternal,
    Private,
}

/// A declaration extracted from exactly one file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Symbol {
    pub name: String,
    /// Dot-separated: namespace segments, then enclosing type names, then
    /// the symbol's own name. Unique within a single analysis.
    pub fqn: String,
    pub kind: SymbolKind,
    pub file_path: PathBuf,
    /// 1-based source line.
    pub line: u32,
    pub visibility: Visibility,
    pub modifiers: Vec<String>,
    pub attributes: Vec<String>,
    /// Present only on `Method` symbols: one entry per formal parameter.
    pub parameters: Vec<Symbol>,
    /// Free-form: base-type names (`BaseTypes`), source language tag
    /// (`Language`), reflective-call target (`ReflectionTarget`), etc.
    pub metadata: HashMap<String, String>,
}

impl Symbol {
    /// The namespace portion of the FQN (everything before the last
    /// segment contributed by an enclosing type or the symbol itself),
    /// or `"Default"` when the symbol belongs to no namespace.
    pub fn namespace(&self) -> String {
        match self.metadata.get("Namespace") {
            Some(ns) if !ns.is_empty() => ns.clone(),
            _ => "Default".to_string(),
        }
    }

    pub fn base_types(&self) -> Vec<String> {
        self.metadata
            .get("BaseTypes")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.iter().any(|m| m.eq_ignore_ascii_case("abstract"))
    }
}

/// Joins namespace + enclosing-type chain + leaf name the same way FQNs are
/// synthesized during extraction — used by tests asserting that splitting
/// and rejoining an FQN's segments recomposes the original string.
pub fn join_fqn(segments: &[&str]) -> String {
    segments.iter().filter(|s| !s.is_empty()).cloned().collect::<Vec<_>>().join(".")
}

// ─────────────────────── Dependencies (Dependency) ───────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    Import,
    Inheritance,
    MethodCall,
    PropertyAccess,
    Other,
}

/// A directed static or dynamic edge between two symbols (or a symbol and
/// a namespace prefix).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dependency {
    pub kind: DependencyKind,
    /// FQN of the origin symbol, or a file path for file-scoped edges
    /// (e.g. a `Using`/`Import` edge from a file to a namespace).
    pub origin: String,
    pub target: String,
    pub source_file: PathBuf,
    pub source_line: u32,
    /// Present for reflective/late-bound edges.
    pub reflective_target: Option<String>,
    pub conditional: bool,
}

/// A package-manager-declared library consumed by the code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalDependency {
    pub package_name: String,
    pub version: String,
    pub ecosystem: String,
    pub referenced_by: Vec<PathBuf>,
}

/// A database referenced via connection string or raw SQL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DatabaseDependency {
    pub database_name: String,
    pub connection_string: Option<String>,
    pub tables: Vec<String>,
    pub views: Vec<String>,
    pub procedures: Vec<String>,
}

// ───────────────────── Dependency graph (DependencyGraph) ────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepNodeKind {
    Class,
    Method,
    Assembly,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepGraphNode {
    /// Short display name (last FQN segment).
    pub label: String,
    pub fqn: String,
    pub kind: DepNodeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepEdgeKind {
    Dependency,
    Inheritance,
    MethodCall,
    Association,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DepGraphEdge {
    pub kind: Option<DepEdgeKind>,
    pub attributes: HashMap<String, String>,
}

/// A cycle found in the dependency graph: `node_ids.first() == node_ids.last()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CircularDependency {
    pub cycle: Vec<String>,
}

// ────────────────────── Architecture (Component, Layer, …) ───────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    UserInterface,
    BusinessLogic,
    DataAccess,
    Service,
    Utility,
    Infrastructure,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Component {
    pub name: String,
    pub component_type: ComponentType,
    pub classes: Vec<String>,
    pub interfaces: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layer {
    pub name: String,
    pub level: u32,
    pub components: Vec<String>,
    pub outbound_dependencies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DesignPatternKind {
    Singleton,
    Factory,
    Observer,
    Strategy,
    Decorator,
    Adapter,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignPatternMatch {
    pub pattern: DesignPatternKind,
    pub confidence: f64,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    LayerViolation,
    GodClass,
    FeatureEnvy,
    DataClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchitecturalViolation {
    pub kind: ViolationKind,
    pub location: String,
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchitecturalPattern {
    Mvc,
    Mvp,
    MvvM,
    Layered,
    Repository,
    ServiceOriented,
    Unknown,
}

/// Groups components belonging to one deployable assembly/namespace root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub name: String,
    pub components: Vec<String>,
}

// ───────────────────── Relationships (Relationship, …) ───────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    Inheritance,
    MethodCall,
    PropertyAccess,
    Using,
    ComponentMembership,
    LayerMembership,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Outbound,
    Inbound,
    Bidirectional,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
    /// Always within `[0, 1]`.
    pub strength: f64,
    pub direction: Direction,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RelationshipMatrix {
    pub relationships: Vec<Relationship>,
    pub sources: Vec<String>,
    pub targets: Vec<String>,
    pub kinds: Vec<RelationshipKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallHierarchyNode {
    pub method_fqn: String,
    pub owning_class_fqn: String,
    pub callees: Vec<String>,
    pub callers: Vec<String>,
    pub complexity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InheritanceNode {
    pub class_fqn: String,
    pub bases: Vec<String>,
    pub derived: Vec<String>,
    pub depth: u32,
    pub is_abstract: bool,
    pub is_interface: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fqn_round_trips_through_split_and_join() {
        let fqn = "N.M.C.F";
        let parts: Vec<&str> = fqn.split('.').collect();
        assert_eq!(join_fqn(&parts), fqn);
    }

    #[test]
    fn symbol_with_no_namespace_metadata_goes_to_default() {
        let s = Symbol {
            name: "C".into(),
            fqn: "C".into(),
            kind: SymbolKind::Class,
            file_path: PathBuf::from("a.cs"),
            line: 1,
            visibility: Visibility::Internal,
            modifiers: vec![],
            attributes: vec![],
            parameters: vec![],
            metadata: HashMap::new(),
        };
        assert_eq!(s.namespace(), "Default");
    }
}
