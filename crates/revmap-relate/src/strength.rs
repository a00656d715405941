//! Fixed relationship-strength table.

use revmap_core::{DependencyKind, RelationshipKind};

pub fn kind_for(dependency_kind: DependencyKind) -> RelationshipKind {
    match dependency_kind {
        DependencyKind::Inheritance => RelationshipKind::Inheritance,
        DependencyKind::MethodCall => RelationshipKind::MethodCall,
        DependencyKind::PropertyAccess => RelationshipKind::PropertyAccess,
        DependencyKind::Import => RelationshipKind::Using,
        DependencyKind::Other => RelationshipKind::Unknown,
    }
}

pub fn strength_for(kind: RelationshipKind) -> f64 {
    match kind {
        RelationshipKind::Inheritance => 1.0,
        RelationshipKind::MethodCall => 0.8,
        RelationshipKind::PropertyAccess => 0.6,
        RelationshipKind::Using => 0.2,
        RelationshipKind::ComponentMembership | RelationshipKind::LayerMembership => 1.0,
        RelationshipKind::Unknown => 0.1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_table_matches_fixed_values() {
        assert_eq!(strength_for(RelationshipKind::Inheritance), 1.0);
        assert_eq!(strength_for(RelationshipKind::MethodCall), 0.8);
        assert_eq!(strength_for(RelationshipKind::PropertyAccess), 0.6);
        assert_eq!(strength_for(RelationshipKind::Using), 0.2);
        assert_eq!(strength_for(RelationshipKind::Unknown), 0.1);
    }
}
