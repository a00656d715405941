//! Architecture-analysis options.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ArchitectureOptions {
    pub detect_pattern: bool,
    pub infer_layers: bool,
    pub infer_components: bool,
    pub detect_design_patterns: bool,
    pub detect_violations: bool,
    /// Additional layer name -> indicator words, scored alongside the
    /// built-in four layers.
    pub custom_layers: HashMap<String, Vec<String>>,
}

impl Default for ArchitectureOptions {
    fn default() -> Self {
        ArchitectureOptions {
            detect_pattern: true,
            infer_layers: true,
            infer_components: true,
            detect_design_patterns: true,
            detect_violations: true,
            custom_layers: HashMap::new(),
        }
    }
}
