//! External package detection: namespace-prefix heuristics plus manifest
//! XML parsing, both feeding the same `ExternalDependency` list.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use revmap_core::{Diagnostic, ExternalDependency, FileRecord, Symbol};
use revmap_symbols::xmlutil;

const KNOWN_FIRST_SEGMENTS: &[&str] = &[
    "System", "Microsoft", "Newtonsoft", "Autodesk", "Oracle", "Npgsql", "MySql", "Dapper", "NUnit", "Moq", "Serilog",
];

pub fn from_namespaces(symbols: &[Symbol]) -> Vec<ExternalDependency> {
    let mut by_segment: HashMap<&'static str, HashSet<std::path::PathBuf>> = HashMap::new();
    for symbol in symbols {
        let namespace = symbol.namespace();
        let Some(first) = namespace.split('.').next() else { continue };
        if let Some(known) = KNOWN_FIRST_SEGMENTS.iter().find(|k| **k == first) {
            by_segment.entry(known).or_default().insert(symbol.file_path.clone());
        }
    }
    by_segment
        .into_iter()
        .map(|(package_name, files)| ExternalDependency {
            package_name: package_name.to_string(),
            version: "Unknown".to_string(),
            ecosystem: "NuGet-like".to_string(),
            referenced_by: files.into_iter().collect(),
        })
        .collect()
}

pub fn from_manifests(manifest_files: &[FileRecord], diagnostics: &mut Vec<Diagnostic>) -> Vec<ExternalDependency> {
    let mut results = Vec::new();
    for file in manifest_files {
        let content = match std::fs::read_to_string(&file.absolute_path) {
            Ok(c) => c,
            Err(e) => {
                diagnostics.push(Diagnostic::new(&file.absolute_path, format!("cannot read manifest: {e}")));
                continue;
            }
        };
        match parse_manifest(&content, &file.absolute_path) {
            Ok(deps) => results.extend(deps),
            Err(e) => diagnostics.push(Diagnostic::new(&file.absolute_path, format!("manifest parse failed: {e}"))),
        }
    }
    results
}

fn parse_manifest(content: &str, path: &Path) -> Result<Vec<ExternalDependency>, quick_xml::Error> {
    let root = xmlutil::parse(content)?;
    let mut deps = Vec::new();
    collect_package_references(&root, path, &mut deps);
    collect_packages_config_entries(&root, path, &mut deps);
    Ok(deps)
}

fn collect_package_references(element: &xmlutil::XmlElement, path: &Path, out: &mut Vec<ExternalDependency>) {
    if element.name.eq_ignore_ascii_case("PackageReference") {
        if let Some(name) = element.attributes.get("Include") {
            let version = element.attributes.get("Version").cloned().unwrap_or_else(|| "Unknown".to_string());
            out.push(ExternalDependency {
                package_name: name.clone(),
                version,
                ecosystem: "NuGet".to_string(),
                referenced_by: vec![path.to_path_buf()],
            });
        }
    }
    for child in &element.children {
        collect_package_references(child, path, out);
    }
}

fn collect_packages_config_entries(element: &xmlutil::XmlElement, path: &Path, out: &mut Vec<ExternalDependency>) {
    if element.name.eq_ignore_ascii_case("package") {
        if let Some(id) = element.attributes.get("id") {
            let version = element.attributes.get("version").cloned().unwrap_or_else(|| "Unknown".to_string());
            out.push(ExternalDependency {
                package_name: id.clone(),
                version,
                ecosystem: "NuGet".to_string(),
                referenced_by: vec![path.to_path_buf()],
            });
        }
    }
    for child in &element.children {
        collect_packages_config_entries(child, path, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_package_reference_entries() {
        let doc = r#"<Project><ItemGroup><PackageReference Include="X" Version="1.0" /><PackageReference Include="Y" Version="2.3" /></ItemGroup></Project>"#;
        let deps = parse_manifest(doc, Path::new("proj.csproj")).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].package_name, "X");
        assert_eq!(deps[0].referenced_by, vec![std::path::PathBuf::from("proj.csproj")]);
    }

    #[test]
    fn parses_packages_config_entries() {
        let doc = r#"<packages><package id="X" version="1.0" /></packages>"#;
        let deps = parse_manifest(doc, Path::new("packages.config")).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].package_name, "X");
    }
}
