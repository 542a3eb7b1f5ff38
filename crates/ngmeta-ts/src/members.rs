//! Declaration member distributor: buckets a class body's members.

use ngmeta_core::{AccessorMember, DiagnosticKind, MethodMember, Parameter, PropertyMember};
use tree_sitter::Node;

use crate::context::FileContext;
use crate::decorators::{decorator_name, decorator_names};
use crate::resolve::{resolve_expression, resolve_type};
use crate::syntax::{has_token, member_name, named_children};

/// Class-body members sorted into buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Members {
    /// Parameters of the `constructor` implementation.
    pub constructor_parameters: Vec<Parameter>,
    /// Fields.
    pub properties: Vec<PropertyMember>,
    /// Methods (including abstract methods).
    pub methods: Vec<MethodMember>,
    /// `get` accessors.
    pub getters: Vec<AccessorMember>,
    /// `set` accessors.
    pub setters: Vec<AccessorMember>,
}

/// Distributes the members of a `class_body` node.
///
/// Method decorators precede their method as siblings in the body; field
/// decorators are children of the field. Overload signatures, index
/// signatures and static blocks are skipped with NGM007.
pub fn distribute(ctx: &mut FileContext<'_>, body: Node<'_>) -> Members {
    let mut members = Members::default();
    let mut pending: Vec<String> = Vec::new();

    for child in named_children(body) {
        match child.kind() {
            "decorator" => pending.extend(decorator_name(ctx, child)),
            "method_definition" => {
                let decorators = std::mem::take(&mut pending);
                method(ctx, child, decorators, &mut members);
            }
            "abstract_method_signature" => {
                let decorators = std::mem::take(&mut pending);
                let mut record = method_record(ctx, child);
                record.decorators = decorators;
                members.methods.push(record);
            }
            "public_field_definition" => {
                pending.clear();
                members.properties.push(property(ctx, child));
            }
            other => {
                pending.clear();
                let message = format!("class member `{other}` is not bucketed");
                ctx.report(DiagnosticKind::SkippedMember, child, message);
            }
        }
    }
    members
}

fn method(ctx: &mut FileContext<'_>, node: Node<'_>, decorators: Vec<String>, members: &mut Members) {
    let name = member_name(node, ctx.source).unwrap_or_default();
    let is_static = has_token(node, "static");

    if has_token(node, "get") {
        let ty = node
            .child_by_field_name("return_type")
            .map(|annotation| resolve_type(ctx, annotation));
        members.getters.push(AccessorMember {
            name,
            ty,
            is_static,
            decorators,
        });
    } else if has_token(node, "set") {
        let ty = node
            .child_by_field_name("parameters")
            .and_then(|params| parameters(ctx, params).into_iter().next())
            .and_then(|param| param.ty);
        members.setters.push(AccessorMember {
            name,
            ty,
            is_static,
            decorators,
        });
    } else if name == "constructor" {
        members.constructor_parameters = node
            .child_by_field_name("parameters")
            .map(|params| parameters(ctx, params))
            .unwrap_or_default();
    } else {
        let mut record = method_record(ctx, node);
        record.decorators = decorators;
        members.methods.push(record);
    }
}

fn method_record(ctx: &mut FileContext<'_>, node: Node<'_>) -> MethodMember {
    MethodMember {
        name: member_name(node, ctx.source).unwrap_or_default(),
        parameters: node
            .child_by_field_name("parameters")
            .map(|params| parameters(ctx, params))
            .unwrap_or_default(),
        return_type: node
            .child_by_field_name("return_type")
            .map(|annotation| resolve_type(ctx, annotation)),
        is_static: has_token(node, "static"),
        decorators: Vec::new(),
    }
}

fn property(ctx: &mut FileContext<'_>, node: Node<'_>) -> PropertyMember {
    PropertyMember {
        name: member_name(node, ctx.source).unwrap_or_default(),
        ty: node
            .child_by_field_name("type")
            .map(|annotation| resolve_type(ctx, annotation)),
        optional: has_token(node, "?"),
        is_static: has_token(node, "static"),
        initializer: node
            .child_by_field_name("value")
            .map(|value| resolve_expression(ctx, value)),
        decorators: decorator_names(ctx, node),
    }
}

/// Parameters of a `formal_parameters` node.
pub fn parameters(ctx: &mut FileContext<'_>, params: Node<'_>) -> Vec<Parameter> {
    named_children(params)
        .into_iter()
        .filter(|p| matches!(p.kind(), "required_parameter" | "optional_parameter"))
        .map(|p| Parameter {
            identifier: p
                .child_by_field_name("pattern")
                .map(|pattern| ctx.text(pattern).to_owned())
                .unwrap_or_default(),
            ty: p
                .child_by_field_name("type")
                .map(|annotation| resolve_type(ctx, annotation)),
            optional: p.kind() == "optional_parameter" || p.child_by_field_name("value").is_some(),
            decorators: decorator_names_of(ctx, p),
        })
        .collect()
}

/// Parameter decorators are direct children; an enclosing export does not
/// apply.
fn decorator_names_of(ctx: &FileContext<'_>, node: Node<'_>) -> Vec<String> {
    crate::syntax::children_of_kind(node, "decorator")
        .into_iter()
        .filter_map(|decorator| decorator_name(ctx, decorator))
        .collect()
}
