//! Resolver options.

#[derive(Debug, Clone)]
pub struct DependencyOptions {
    pub resolve_static: bool,
    pub resolve_dynamic: bool,
    pub resolve_external: bool,
    pub resolve_database: bool,
    pub detect_cycles: bool,
}

impl Default for DependencyOptions {
    fn default() -> Self {
        DependencyOptions {
            resolve_static: true,
            resolve_dynamic: true,
            resolve_external: true,
            resolve_database: true,
            detect_cycles: true,
        }
    }
}
