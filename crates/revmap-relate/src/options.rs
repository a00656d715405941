//! RelationshipMapper options: six independent build flags.

#[derive(Debug, Clone)]
pub struct RelationshipOptions {
    pub build_matrix: bool,
    pub map_components: bool,
    pub map_layers: bool,
    pub build_dependency_matrix: bool,
    pub build_call_hierarchy: bool,
    pub build_inheritance_tree: bool,
}

impl Default for RelationshipOptions {
    fn default() -> Self {
        RelationshipOptions {
            build_matrix: true,
            map_components: true,
            map_layers: true,
            build_dependency_matrix: true,
            build_call_hierarchy: true,
            build_inheritance_tree: true,
        }
    }
}
