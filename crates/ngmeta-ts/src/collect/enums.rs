//! Enum collector.

use ngmeta_core::{EnumMember, EnumRecord};
use tree_sitter::Node;

use crate::context::FileContext;
use crate::resolve::resolve_expression;
use crate::syntax::{first_named_child, has_token, named_children, strip_quotes};

/// Collects an `enum_declaration`.
pub fn collect_enum(ctx: &mut FileContext<'_>, node: Node<'_>) -> EnumRecord {
    let identifier = node
        .child_by_field_name("name")
        .map(|name| ctx.text(name).to_owned())
        .unwrap_or_default();

    let members = node
        .child_by_field_name("body")
        .map(|body| {
            named_children(body)
                .into_iter()
                .filter_map(|member| enum_member(ctx, member))
                .collect()
        })
        .unwrap_or_default();

    EnumRecord {
        identifier,
        filepath: ctx.path.to_path_buf(),
        is_const: has_token(node, "const"),
        members,
    }
}

/// `A`, `'b'` or `C = expr`.
fn enum_member(ctx: &mut FileContext<'_>, member: Node<'_>) -> Option<EnumMember> {
    match member.kind() {
        "enum_assignment" => {
            let name = first_named_child(member)?;
            let value = member
                .child_by_field_name("value")
                .map(|value| resolve_expression(ctx, value));
            Some(EnumMember {
                name: strip_quotes(ctx.text(name)).to_owned(),
                value,
            })
        }
        "property_identifier" | "string" | "number" => Some(EnumMember {
            name: strip_quotes(ctx.text(member)).to_owned(),
            value: None,
        }),
        _ => None,
    }
}
