//! Source-file collector: the file-level record with its import and export
//! statements.

use ngmeta_core::{BindingName, ExportRecord, ImportRecord, SourceFileRecord};
use tree_sitter::Node;

use crate::context::FileContext;
use crate::syntax::{children_of_kind, has_token, named_children, strip_quotes};

/// Collects the `program` node.
///
/// Only top-level statements are read; imports and exports nested in
/// namespaces are ignored.
pub fn collect_source_file(ctx: &mut FileContext<'_>, node: Node<'_>) -> SourceFileRecord {
    let mut record = SourceFileRecord {
        identifier: ctx.file_name(),
        filepath: ctx.path.to_path_buf(),
        ..SourceFileRecord::default()
    };
    for statement in named_children(node) {
        match statement.kind() {
            "import_statement" => record.imports.push(import(ctx, statement)),
            "export_statement" => record.exports.push(export(ctx, statement)),
            _ => {}
        }
    }
    record
}

fn module_source(ctx: &FileContext<'_>, statement: Node<'_>) -> Option<String> {
    let source = statement.child_by_field_name("source")?;
    Some(strip_quotes(ctx.text(source)).to_owned())
}

fn import(ctx: &FileContext<'_>, statement: Node<'_>) -> ImportRecord {
    let mut record = ImportRecord {
        source: module_source(ctx, statement).unwrap_or_default(),
        type_only: has_token(statement, "type"),
        ..ImportRecord::default()
    };

    for clause in children_of_kind(statement, "import_clause") {
        for part in named_children(clause) {
            match part.kind() {
                "identifier" => record.default_import = Some(ctx.text(part).to_owned()),
                "namespace_import" => {
                    record.namespace = named_children(part)
                        .into_iter()
                        .next()
                        .map(|name| ctx.text(name).to_owned());
                }
                "named_imports" => record.names.extend(bindings(ctx, part, "import_specifier")),
                _ => {}
            }
        }
    }
    record
}

fn export(ctx: &FileContext<'_>, statement: Node<'_>) -> ExportRecord {
    let mut record = ExportRecord {
        source: module_source(ctx, statement),
        is_default: has_token(statement, "default"),
        ..ExportRecord::default()
    };

    if let Some(declaration) = statement.child_by_field_name("declaration") {
        match declaration.child_by_field_name("name") {
            Some(name) => record.declaration = Some(ctx.text(name).to_owned()),
            // `export const a = 1, b = 2;`
            None => record.names.extend(
                children_of_kind(declaration, "variable_declarator")
                    .into_iter()
                    .filter_map(|declarator| declarator.child_by_field_name("name"))
                    .map(|name| BindingName {
                        name: ctx.text(name).to_owned(),
                        alias: None,
                    }),
            ),
        }
    } else if let Some(value) = statement.child_by_field_name("value") {
        record.declaration = Some(ctx.text(value).to_owned());
    }

    for part in named_children(statement) {
        match part.kind() {
            "export_clause" => record.names.extend(bindings(ctx, part, "export_specifier")),
            "namespace_export" => {
                record.namespace = named_children(part)
                    .into_iter()
                    .next()
                    .map(|name| strip_quotes(ctx.text(name)).to_owned());
            }
            _ => {}
        }
    }
    record.wildcard =
        record.source.is_some() && record.namespace.is_none() && has_token(statement, "*");
    record
}

/// `name` / `name as alias` specifiers of an import or export clause.
fn bindings(ctx: &FileContext<'_>, clause: Node<'_>, specifier: &str) -> Vec<BindingName> {
    children_of_kind(clause, specifier)
        .into_iter()
        .filter_map(|spec| {
            let name = spec.child_by_field_name("name")?;
            Some(BindingName {
                name: strip_quotes(ctx.text(name)).to_owned(),
                alias: spec
                    .child_by_field_name("alias")
                    .map(|alias| strip_quotes(ctx.text(alias)).to_owned()),
            })
        })
        .collect()
}
