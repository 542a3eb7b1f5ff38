//! Type-alias collector.

use ngmeta_core::{TypeAliasRecord, TypeComposition};
use tree_sitter::Node;

use crate::context::FileContext;
use crate::resolve::resolve_type;
use crate::syntax::type_parameter_names;

/// Collects a `type_alias_declaration`.
pub fn collect_type_alias(ctx: &mut FileContext<'_>, node: Node<'_>) -> TypeAliasRecord {
    TypeAliasRecord {
        identifier: node
            .child_by_field_name("name")
            .map(|name| ctx.text(name).to_owned())
            .unwrap_or_default(),
        filepath: ctx.path.to_path_buf(),
        type_parameters: type_parameter_names(node, ctx.source),
        ty: node
            .child_by_field_name("value")
            .map_or_else(TypeComposition::unknown, |value| resolve_type(ctx, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{find_first, Harness};
    use ngmeta_core::TypeKind;

    fn collect(source: &str) -> TypeAliasRecord {
        Harness::new(source)
            .run(|ctx, root| {
                collect_type_alias(ctx, find_first(root, "type_alias_declaration").unwrap())
            })
            .0
    }

    #[test]
    fn map_of_set_keeps_nesting() {
        let record = collect("type Foo = Map<string, Set<number>>;");
        assert_eq!(record.identifier, "Foo");
        assert_eq!(
            record.ty,
            TypeComposition::composite(
                TypeKind::Map,
                vec![
                    TypeComposition::leaf(TypeKind::String),
                    TypeComposition::composite(
                        TypeKind::Set,
                        vec![TypeComposition::leaf(TypeKind::Number)]
                    ),
                ],
            )
        );
    }

    #[test]
    fn generic_alias_lists_parameters() {
        let record = collect("export type Pair<A, B> = [A, B];");
        assert_eq!(record.type_parameters, ["A", "B"]);
        assert_eq!(record.ty.kind, TypeKind::Tuple);
        assert_eq!(record.ty.args().len(), 2);
    }
}
