//! Class collector: the base record shared by every class-shaped declaration.

use ngmeta_core::{ClassRecord, TypeComposition, TypeKind};
use tree_sitter::Node;

use crate::context::FileContext;
use crate::decorators::decorator_names;
use crate::members::{distribute, Members};
use crate::resolve::resolve_type;
use crate::syntax::{children_of_kind, named_children, type_parameter_names};

/// Identifier recorded for `class {}` expressions without a name.
pub const ANONYMOUS_CLASS: &str = "(anonymous)";

/// Collects the base record for a `class_declaration`,
/// `abstract_class_declaration` or `class` node.
pub fn collect_class(ctx: &mut FileContext<'_>, node: Node<'_>) -> ClassRecord {
    let identifier = node
        .child_by_field_name("name")
        .map_or_else(|| ANONYMOUS_CLASS.to_owned(), |name| ctx.text(name).to_owned());

    let (extends, implements) = heritage(ctx, node);
    let Members {
        constructor_parameters,
        properties,
        methods,
        getters,
        setters,
    } = node
        .child_by_field_name("body")
        .map(|body| distribute(ctx, body))
        .unwrap_or_default();

    ClassRecord {
        identifier,
        filepath: ctx.path.to_path_buf(),
        type_parameters: type_parameter_names(node, ctx.source),
        extends,
        implements,
        decorators: decorator_names(ctx, node),
        constructor_parameters,
        properties,
        methods,
        getters,
        setters,
    }
}

fn heritage(
    ctx: &mut FileContext<'_>,
    node: Node<'_>,
) -> (Option<TypeComposition>, Vec<TypeComposition>) {
    let mut extends = None;
    let mut implements = Vec::new();
    for clause in children_of_kind(node, "class_heritage")
        .into_iter()
        .flat_map(named_children)
    {
        match clause.kind() {
            "extends_clause" => extends = extends_target(ctx, clause),
            "implements_clause" => implements.extend(
                named_children(clause)
                    .into_iter()
                    .map(|ty| resolve_type(ctx, ty)),
            ),
            _ => {}
        }
    }
    (extends, implements)
}

/// `extends Base<T>`: the target is an expression with optional type
/// arguments, not a type node.
fn extends_target(ctx: &mut FileContext<'_>, clause: Node<'_>) -> Option<TypeComposition> {
    let value = clause.child_by_field_name("value")?;
    let kind = match value.kind() {
        "identifier" | "member_expression" => TypeKind::reference(ctx.text(value)),
        _ => TypeKind::Unknown,
    };
    let args: Vec<_> = clause
        .child_by_field_name("type_arguments")
        .map(|arguments| {
            named_children(arguments)
                .into_iter()
                .map(|argument| resolve_type(ctx, argument))
                .collect()
        })
        .unwrap_or_default();
    Some(if args.is_empty() {
        TypeComposition::leaf(kind)
    } else {
        TypeComposition::composite(kind, args)
    })
}
