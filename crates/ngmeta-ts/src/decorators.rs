//! Decorator locator.
//!
//! Decorators written before `export` attach to the enclosing
//! `export_statement` in the grammar, so both places are searched, the
//! export statement's decorators first.

use ngmeta_core::DecoratorKind;
use std::collections::HashMap;
use tree_sitter::Node;

use crate::context::FileContext;
use crate::syntax::{children_of_kind, first_named_child, named_children};

/// Decorator nodes attached to a declaration, in source order.
pub fn decorator_nodes(node: Node<'_>) -> Vec<Node<'_>> {
    let mut decorators = node
        .parent()
        .filter(|parent| parent.kind() == "export_statement")
        .map(|parent| children_of_kind(parent, "decorator"))
        .unwrap_or_default();
    decorators.extend(children_of_kind(node, "decorator"));
    decorators
}

/// Call-target name of a decorator: `@Foo`, `@Foo()` and `@ns.Foo()` all
/// yield `Foo`.
pub fn decorator_name(ctx: &FileContext<'_>, decorator: Node<'_>) -> Option<String> {
    let expression = first_named_child(decorator)?;
    let target = match expression.kind() {
        "call_expression" => expression.child_by_field_name("function")?,
        _ => expression,
    };
    let name = match target.kind() {
        "identifier" => target,
        "member_expression" => target.child_by_field_name("property")?,
        _ => return None,
    };
    Some(ctx.text(name).to_owned())
}

/// Maps decorator name to its node.
///
/// When a name appears more than once, the later decorator in source
/// order wins.
pub fn locate<'t>(ctx: &FileContext<'_>, node: Node<'t>) -> HashMap<String, Node<'t>> {
    decorator_nodes(node)
        .into_iter()
        .filter_map(|decorator| Some((decorator_name(ctx, decorator)?, decorator)))
        .collect()
}

/// Names of every decorator on a declaration, in source order.
pub fn decorator_names(ctx: &FileContext<'_>, node: Node<'_>) -> Vec<String> {
    decorator_nodes(node)
        .into_iter()
        .filter_map(|decorator| decorator_name(ctx, decorator))
        .collect()
}

/// Finds the framework decorator that decides how a class is classified.
///
/// Kinds are tried in [`DecoratorKind::PRIORITY`] order. For each kind the
/// canonical name is checked first, then configured aliases (latest in
/// source order).
pub fn framework_decorator<'t>(
    ctx: &FileContext<'_>,
    node: Node<'t>,
) -> Option<(DecoratorKind, Node<'t>)> {
    DecoratorKind::PRIORITY
        .into_iter()
        .find_map(|kind| Some((kind, decorator_of_kind(ctx, node, kind)?)))
}

/// The decorator of one framework kind on a declaration: the canonical
/// name if present, otherwise the latest configured alias for the kind.
pub fn decorator_of_kind<'t>(
    ctx: &FileContext<'_>,
    node: Node<'t>,
    kind: DecoratorKind,
) -> Option<Node<'t>> {
    if let Some(decorator) = locate(ctx, node).remove(kind.canonical_name()) {
        return Some(decorator);
    }
    decorator_nodes(node).into_iter().rev().find(|decorator| {
        decorator_name(ctx, *decorator)
            .and_then(|name| ctx.config.decorators.get(&name).copied())
            == Some(kind)
    })
}

/// The object literal passed as a decorator's first argument, if any.
pub fn config_object(decorator: Node<'_>) -> Option<Node<'_>> {
    let call = first_named_child(decorator).filter(|e| e.kind() == "call_expression")?;
    let arguments = call.child_by_field_name("arguments")?;
    named_children(arguments)
        .into_iter()
        .next()
        .filter(|argument| argument.kind() == "object")
}

/// First argument of a decorator call, whatever its kind.
pub fn first_argument(decorator: Node<'_>) -> Option<Node<'_>> {
    let call = first_named_child(decorator).filter(|e| e.kind() == "call_expression")?;
    let arguments = call.child_by_field_name("arguments")?;
    named_children(arguments).into_iter().next()
}
