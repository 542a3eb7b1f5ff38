//! Expression resolver: value-expression node → [`ExpressionMetadata`].

use ngmeta_core::{
    CallMetadata, DiagnosticKind, ExpressionMetadata, NewMetadata, PropertyAccessMetadata,
    StructureMember, StructureMetadata, TypeComposition, TypeKind,
};
use tree_sitter::Node;

use super::types::resolve_type_at;
use crate::context::FileContext;
use crate::syntax::{named_children, parse_int_prefix, strip_quotes};

/// Kind tag recorded when the depth limit cuts resolution short.
pub const DEPTH_LIMIT_KIND: &str = "depth-limit";

/// Resolves a value expression.
///
/// Never fails: node kinds outside the dispatch table resolve to
/// `unknown: <kind>` and raise NGM001.
pub fn resolve_expression(ctx: &mut FileContext<'_>, node: Node<'_>) -> ExpressionMetadata {
    resolve_at(ctx, node, 0)
}

fn resolve_at(ctx: &mut FileContext<'_>, node: Node<'_>, depth: usize) -> ExpressionMetadata {
    if depth > ctx.max_depth() {
        let message = format!("expression nesting deeper than {}", ctx.max_depth());
        ctx.report(DiagnosticKind::DepthLimit, node, message);
        return ExpressionMetadata::unknown(DEPTH_LIMIT_KIND);
    }

    match node.kind() {
        "array" => ExpressionMetadata::Structure(StructureMetadata {
            kind: TypeKind::Array,
            members: named_children(node)
                .into_iter()
                .map(|element| StructureMember::element(resolve_at(ctx, element, depth + 1)))
                .collect(),
        }),
        "object" => ExpressionMetadata::Structure(StructureMetadata {
            kind: TypeKind::Object,
            members: object_pairs(ctx, node)
                .into_iter()
                .map(|(key, value)| StructureMember::property(&key, resolve_at(ctx, value, depth + 1)))
                .collect(),
        }),
        "as_expression" | "type_assertion" => ExpressionMetadata::Type(
            TypeComposition::literal(TypeKind::CastAs, ctx.text(node)),
        ),
        "call_expression" => call(ctx, node, depth),
        "new_expression" => construct(ctx, node, depth),
        "member_expression" => property_access(ctx, node),
        "true" => ExpressionMetadata::boolean(true),
        "false" => ExpressionMetadata::boolean(false),
        "number" => number(ctx, node),
        "string" | "template_string" => ExpressionMetadata::string(ctx.text(node)),
        "identifier" => ExpressionMetadata::identifier(ctx.text(node)),
        "null" => ExpressionMetadata::Type(TypeComposition::leaf(TypeKind::Null)),
        "undefined" => ExpressionMetadata::Type(TypeComposition::leaf(TypeKind::Undefined)),
        "this" => ExpressionMetadata::Type(TypeComposition::leaf(TypeKind::This)),
        other => {
            ctx.report(
                DiagnosticKind::UnknownExpression,
                node,
                format!("unrecognized expression `{other}`"),
            );
            ExpressionMetadata::unknown(other)
        }
    }
}

fn call(ctx: &mut FileContext<'_>, node: Node<'_>, depth: usize) -> ExpressionMetadata {
    let callee = match node.child_by_field_name("function") {
        Some(function) => resolve_at(ctx, function, depth + 1),
        None => ExpressionMetadata::unknown(node.kind()),
    };
    let args = arguments(ctx, node, depth);
    ExpressionMetadata::Call(CallMetadata {
        callee: Box::new(callee),
        args,
    })
}

fn construct(ctx: &mut FileContext<'_>, node: Node<'_>, depth: usize) -> ExpressionMetadata {
    let constructor = match node.child_by_field_name("constructor") {
        Some(name) if name.kind() == "identifier" => {
            TypeComposition::leaf(TypeKind::reference(ctx.text(name).trim()))
        }
        _ => TypeComposition::unknown(),
    };
    let type_args = node
        .child_by_field_name("type_arguments")
        .map(|arguments| {
            named_children(arguments)
                .into_iter()
                .map(|argument| resolve_type_at(ctx, argument, depth + 1))
                .collect()
        })
        .unwrap_or_default();
    let args = arguments(ctx, node, depth);
    ExpressionMetadata::New(NewMetadata {
        constructor,
        type_args,
        args,
    })
}

fn arguments(ctx: &mut FileContext<'_>, node: Node<'_>, depth: usize) -> Vec<ExpressionMetadata> {
    node.child_by_field_name("arguments")
        .map(|arguments| {
            named_children(arguments)
                .into_iter()
                .map(|argument| resolve_at(ctx, argument, depth + 1))
                .collect()
        })
        .unwrap_or_default()
}

fn property_access(ctx: &FileContext<'_>, node: Node<'_>) -> ExpressionMetadata {
    let expression = node
        .child_by_field_name("object")
        .map(|object| ctx.text(object).to_owned())
        .unwrap_or_default();
    let name = node
        .child_by_field_name("property")
        .map(|property| ctx.text(property).to_owned())
        .unwrap_or_default();
    ExpressionMetadata::PropertyAccess(PropertyAccessMetadata { expression, name })
}

fn number(ctx: &mut FileContext<'_>, node: Node<'_>) -> ExpressionMetadata {
    let raw = ctx.text(node);
    match parse_int_prefix(raw) {
        Some(value) => ExpressionMetadata::Type(TypeComposition::literal(TypeKind::Number, value)),
        None => {
            ctx.report(
                DiagnosticKind::UnparsableNumber,
                node,
                format!("`{raw}` has no base-10 integer prefix"),
            );
            ExpressionMetadata::Type(TypeComposition::leaf(TypeKind::Number))
        }
    }
}

/// `key: value` members of an object literal, in source order.
///
/// Shorthand properties, spreads and methods are skipped with NGM003.
pub(crate) fn object_pairs<'t>(
    ctx: &mut FileContext<'_>,
    object: Node<'t>,
) -> Vec<(String, Node<'t>)> {
    let mut pairs = Vec::new();
    for member in named_children(object) {
        if member.kind() != "pair" {
            let message = format!("object member `{}` is not a key/value pair", member.kind());
            ctx.report(DiagnosticKind::SkippedObjectMember, member, message);
            continue;
        }
        let (Some(key), Some(value)) = (
            member.child_by_field_name("key"),
            member.child_by_field_name("value"),
        ) else {
            continue;
        };
        pairs.push((strip_quotes(ctx.text(key)).to_owned(), value));
    }
    pairs
}
