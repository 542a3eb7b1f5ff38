//! Interface collector.

use ngmeta_core::{DiagnosticKind, InterfaceFunction, InterfaceProperty, InterfaceRecord};
use tree_sitter::Node;

use crate::context::FileContext;
use crate::members::parameters;
use crate::resolve::resolve_type;
use crate::syntax::{
    children_of_kind, first_named_child, has_token, member_name, named_children,
    type_parameter_names,
};

/// Collects an `interface_declaration`.
///
/// Properties typed with a function type land in `functions` alongside
/// method signatures. Call, construct and index signatures are skipped.
pub fn collect_interface(ctx: &mut FileContext<'_>, node: Node<'_>) -> InterfaceRecord {
    let mut record = InterfaceRecord {
        identifier: node
            .child_by_field_name("name")
            .map(|name| ctx.text(name).to_owned())
            .unwrap_or_default(),
        filepath: ctx.path.to_path_buf(),
        type_parameters: type_parameter_names(node, ctx.source),
        ..InterfaceRecord::default()
    };

    record.extends = children_of_kind(node, "extends_type_clause")
        .into_iter()
        .flat_map(named_children)
        .map(|ty| resolve_type(ctx, ty))
        .collect();

    let Some(body) = node.child_by_field_name("body") else {
        return record;
    };
    for member in named_children(body) {
        match member.kind() {
            "property_signature" => property_signature(ctx, member, &mut record),
            "method_signature" => {
                let function = function_entry(ctx, member, member);
                record.functions.push(function);
            }
            other => {
                let message = format!("interface member `{other}` is not recorded");
                ctx.report(DiagnosticKind::SkippedMember, member, message);
            }
        }
    }
    record
}

fn property_signature(ctx: &mut FileContext<'_>, member: Node<'_>, record: &mut InterfaceRecord) {
    let annotation = member.child_by_field_name("type");
    let function_type = annotation
        .and_then(first_named_child)
        .filter(|ty| ty.kind() == "function_type");

    if let Some(function_type) = function_type {
        let function = function_entry(ctx, member, function_type);
        record.functions.push(function);
        return;
    }

    let property = InterfaceProperty {
        name: member_name(member, ctx.source).unwrap_or_default(),
        ty: annotation.map(|annotation| resolve_type(ctx, annotation)),
        readonly: has_token(member, "readonly"),
    };
    if has_token(member, "?") {
        record.optional_properties.push(property);
    } else {
        record.properties.push(property);
    }
}

/// Builds a function entry named after `member`, with the signature read
/// from `signature` (the member itself or its function type).
fn function_entry(
    ctx: &mut FileContext<'_>,
    member: Node<'_>,
    signature: Node<'_>,
) -> InterfaceFunction {
    InterfaceFunction {
        name: member_name(member, ctx.source).unwrap_or_default(),
        parameters: signature
            .child_by_field_name("parameters")
            .map(|params| parameters(ctx, params))
            .unwrap_or_default(),
        return_type: signature
            .child_by_field_name("return_type")
            .map(|ty| resolve_type(ctx, ty)),
        optional: has_token(member, "?"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{find_first, Harness};
    use ngmeta_core::{TypeComposition, TypeKind};

    fn collect(source: &str) -> (InterfaceRecord, Vec<DiagnosticKind>) {
        Harness::new(source).run(|ctx, root| {
            collect_interface(ctx, find_first(root, "interface_declaration").unwrap())
        })
    }

    #[test]
    fn splits_required_optional_and_functions() {
        let (record, diagnostics) = collect(
            "export interface User { id: number; name?: string; greet(): void; onSave: (v: string) => boolean; }",
        );
        assert!(diagnostics.is_empty());
        assert_eq!(record.identifier, "User");

        let required: Vec<_> = record.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(required, ["id"]);
        assert_eq!(record.properties[0].ty, Some(TypeComposition::leaf(TypeKind::Number)));
        let optional: Vec<_> = record.optional_properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(optional, ["name"]);

        let functions: Vec<_> = record.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(functions, ["greet", "onSave"]);
        assert_eq!(record.functions[0].return_type, Some(TypeComposition::leaf(TypeKind::Void)));
        let on_save = &record.functions[1];
        assert_eq!(on_save.parameters[0].identifier, "v");
        assert_eq!(on_save.return_type, Some(TypeComposition::leaf(TypeKind::Boolean)));
    }

    #[test]
    fn extends_and_type_parameters() {
        let (record, _) = collect("interface Page<T> extends Base, Paged<T> { readonly items: T[]; }");
        assert_eq!(record.type_parameters, ["T"]);
        let extends: Vec<_> = record.extends.iter().map(|t| t.kind.to_string()).collect();
        assert_eq!(extends, ["Base", "Paged"]);
        assert!(record.properties[0].readonly);
    }

    #[test]
    fn optional_method_is_flagged() {
        let (record, _) = collect("interface Hooks { ngOnDestroy?(): void; }");
        assert!(record.functions[0].optional);
    }

    #[test]
    fn index_signature_is_skipped() {
        let (record, diagnostics) = collect("interface Dict { [key: string]: number; }");
        assert!(record.properties.is_empty());
        assert_eq!(diagnostics, [DiagnosticKind::SkippedMember]);
    }
}
