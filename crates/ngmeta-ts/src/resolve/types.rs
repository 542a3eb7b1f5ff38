//! Type resolver: type-expression node → [`TypeComposition`].
//!
//! Classification runs in three tiers, first match wins:
//!
//! 1. basic tags (`predefined_type`, function, union, intersection,
//!    literal and parenthesized types)
//! 2. structural tags (array, object and tuple types)
//! 3. named references (`generic_type`, `type_identifier`,
//!    `nested_type_identifier`), with `Set`/`Map` canonicalized
//!
//! Anything else resolves to the `unknown` sentinel and raises NGM002.

use ngmeta_core::{DiagnosticKind, TypeComposition, TypeKind};
use tree_sitter::Node;

use crate::context::FileContext;
use crate::syntax::{first_named_child, named_children};

/// Resolves a type node (or a `type_annotation` wrapping one).
pub fn resolve_type(ctx: &mut FileContext<'_>, node: Node<'_>) -> TypeComposition {
    resolve_type_at(ctx, node, 0)
}

pub(crate) fn resolve_type_at(
    ctx: &mut FileContext<'_>,
    node: Node<'_>,
    depth: usize,
) -> TypeComposition {
    if depth > ctx.max_depth() {
        let message = format!("type nesting deeper than {}", ctx.max_depth());
        ctx.report(DiagnosticKind::DepthLimit, node, message);
        return TypeComposition::unknown();
    }

    let node = unwrap_annotation(node);
    if let Some(composition) = basic(ctx, node, depth) {
        return composition;
    }
    if let Some(composition) = structural(ctx, node, depth) {
        return composition;
    }
    if let Some(composition) = reference(ctx, node, depth) {
        return composition;
    }

    let message = format!("unrecognized type node `{}`", node.kind());
    ctx.report(DiagnosticKind::UnknownType, node, message);
    TypeComposition::unknown()
}

fn unwrap_annotation(node: Node<'_>) -> Node<'_> {
    match node.kind() {
        "type_annotation" | "opting_type_annotation" => first_named_child(node).unwrap_or(node),
        _ => node,
    }
}

fn basic(ctx: &mut FileContext<'_>, node: Node<'_>, depth: usize) -> Option<TypeComposition> {
    let composition = match node.kind() {
        "predefined_type" => TypeComposition::leaf(predefined(ctx.text(node))?),
        "function_type" | "constructor_type" => TypeComposition::leaf(TypeKind::Function),
        "this_type" => TypeComposition::leaf(TypeKind::This),
        "union_type" => TypeComposition::composite(
            TypeKind::Union,
            resolve_all(ctx, &flatten(node, "union_type"), depth),
        ),
        "intersection_type" => TypeComposition::composite(
            TypeKind::Intersection,
            resolve_all(ctx, &flatten(node, "intersection_type"), depth),
        ),
        "parenthesized_type" => TypeComposition::composite(
            TypeKind::Parenthesized,
            resolve_all(ctx, &named_children(node), depth),
        ),
        "literal_type" => literal(ctx, node),
        _ => return None,
    };
    Some(composition)
}

fn predefined(keyword: &str) -> Option<TypeKind> {
    let kind = match keyword {
        "any" => TypeKind::Any,
        "boolean" => TypeKind::Boolean,
        "number" => TypeKind::Number,
        "string" => TypeKind::String,
        "void" => TypeKind::Void,
        "never" => TypeKind::Never,
        "undefined" => TypeKind::Undefined,
        "unknown" => TypeKind::UnknownKeyword,
        "symbol" | "unique symbol" => TypeKind::Symbol,
        "bigint" => TypeKind::BigInt,
        "object" => TypeKind::Object,
        _ => return None,
    };
    Some(kind)
}

fn literal(ctx: &FileContext<'_>, node: Node<'_>) -> TypeComposition {
    match first_named_child(node).map(|inner| inner.kind()) {
        Some("null") => TypeComposition::leaf(TypeKind::Null),
        Some("undefined") => TypeComposition::leaf(TypeKind::Undefined),
        _ => TypeComposition::literal(TypeKind::Literal, ctx.text(node)),
    }
}

fn structural(ctx: &mut FileContext<'_>, node: Node<'_>, depth: usize) -> Option<TypeComposition> {
    let composition = match node.kind() {
        "array_type" => TypeComposition::composite(
            TypeKind::Array,
            resolve_all(ctx, &named_children(node), depth),
        ),
        "object_type" => TypeComposition::leaf(TypeKind::Object),
        "tuple_type" => {
            let elements: Vec<_> = named_children(node)
                .into_iter()
                .map(tuple_element)
                .collect();
            TypeComposition::composite(TypeKind::Tuple, resolve_all(ctx, &elements, depth))
        }
        _ => return None,
    };
    Some(composition)
}

/// `[a: string, b?: number, ...rest: T[]]` members resolve to their types.
fn tuple_element(node: Node<'_>) -> Node<'_> {
    match node.kind() {
        "required_parameter" | "optional_parameter" => {
            node.child_by_field_name("type").unwrap_or(node)
        }
        "optional_type" | "rest_type" => first_named_child(node).unwrap_or(node),
        _ => node,
    }
}

fn reference(ctx: &mut FileContext<'_>, node: Node<'_>, depth: usize) -> Option<TypeComposition> {
    let composition = match node.kind() {
        "type_identifier" | "nested_type_identifier" | "identifier" => {
            TypeComposition::leaf(TypeKind::reference(ctx.text(node)))
        }
        "generic_type" => {
            let name = node.child_by_field_name("name")?;
            let kind = TypeKind::reference(ctx.text(name));
            let args = node
                .child_by_field_name("type_arguments")
                .map(|arguments| resolve_all(ctx, &named_children(arguments), depth))
                .unwrap_or_default();
            TypeComposition::composite(kind, args)
        }
        _ => return None,
    };
    Some(composition)
}

fn resolve_all(ctx: &mut FileContext<'_>, nodes: &[Node<'_>], depth: usize) -> Vec<TypeComposition> {
    nodes
        .iter()
        .map(|node| resolve_type_at(ctx, *node, depth + 1))
        .collect()
}

/// Operands of a left-nested `A | B | C` chain, in source order.
fn flatten<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut operands = Vec::new();
    let mut pending = vec![node];
    while let Some(current) = pending.pop() {
        if current.kind() == kind {
            pending.extend(named_children(current).into_iter().rev());
        } else {
            operands.push(current);
        }
    }
    operands
}
