//! Integration test: fixture files classified end-to-end.
//!
//! Each fixture under `tests/fixtures/` is parsed, classified with the
//! default configuration, and checked against the records it should
//! produce.

use ngmeta_core::{
    Category, ChangeDetectionStrategy, Config, DeclarationRecord, ExpressionMetadata,
    RootMetadataModel, Severity, TypeKind,
};
use ngmeta_ts::{classify_file, parse_typescript, FileOutput};
use std::path::{Path, PathBuf};

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Classifies a fixture under the logical path `src/<name>`.
fn classify_fixture(name: &str) -> FileOutput {
    let source = std::fs::read_to_string(fixture_root().join(name)).expect("fixture should exist");
    let tree = parse_typescript(&source).expect("fixture should parse");
    classify_file(
        &Path::new("src").join(name),
        &source,
        &tree,
        &Config::default(),
    )
}

fn only<'a>(output: &'a FileOutput, category: Category) -> &'a DeclarationRecord {
    let mut matching = output.records.iter().filter(|r| r.category() == category);
    let record = matching.next().expect("one record of the category");
    assert!(matching.next().is_none(), "more than one {category} record");
    record
}

// ── Scenarios ──

#[test]
fn component_with_selector_and_styles() {
    let output = classify_fixture("foo-bar.component.ts");
    let DeclarationRecord::Component(component) = only(&output, Category::Components) else {
        panic!("expected a component record");
    };

    assert_eq!(component.base.identifier, "FooBarComponent");
    let metadata = &component.metadata;
    assert_eq!(metadata.directive.selector.as_deref(), Some("foo-bar"));
    assert_eq!(
        metadata.styles,
        Some(vec!["a{}".to_owned(), "b{}".to_owned()])
    );
    assert_eq!(metadata.change_detection, Some(ChangeDetectionStrategy::OnPush));
    assert_eq!(metadata.directive.constructor_attributes[0].attribute_name, "role");
    assert_eq!(metadata.directive.constructor_references[0].ty, "ElementRef");

    let json = serde_json::to_value(component).unwrap();
    assert_eq!(json["selector"], "foo-bar");
    assert_eq!(json["styles"], serde_json::json!(["a{}", "b{}"]));
    assert_eq!(json["providers"]["structure"]["kind"], "array");
    assert_eq!(json["properties"][0]["name"], "label");
    assert_eq!(json["getters"][0]["name"], "width");
}

#[test]
fn undecorated_class_with_accessors() {
    let output = classify_fixture("store.ts");
    let DeclarationRecord::Class(class) = only(&output, Category::Classes) else {
        panic!("expected a class record");
    };
    let json = serde_json::to_value(class).unwrap();
    let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["filepath", "getters", "identifier", "setters"]);
    assert_eq!(json["identifier"], "Store");
    assert_eq!(json["filepath"], "src/store.ts");
}

#[test]
fn interface_members_are_distributed() {
    let output = classify_fixture("user.ts");
    let DeclarationRecord::Interface(interface) = only(&output, Category::Interfaces) else {
        panic!("expected an interface record");
    };
    assert_eq!(interface.properties.len(), 1);
    assert_eq!(interface.properties[0].name, "id");
    assert_eq!(interface.optional_properties.len(), 1);
    assert_eq!(interface.optional_properties[0].name, "nickname");
    assert_eq!(interface.functions.len(), 1);
    assert_eq!(interface.functions[0].name, "reset");
    assert!(interface.functions[0].parameters.is_empty());
}

#[test]
fn nested_generic_alias() {
    let output = classify_fixture("types.ts");
    let DeclarationRecord::TypeAlias(alias) = only(&output, Category::TypeAliases) else {
        panic!("expected a type alias record");
    };
    insta::assert_yaml_snapshot!(alias, @r###"
    ---
    identifier: Foo
    filepath: src/types.ts
    type:
      kind: Map
      args:
        - kind: string
        - kind: Set
          args:
            - kind: number
    "###);
}

// ── Whole-file behavior ──

#[test]
fn module_file_routes_every_flavor() {
    let output = classify_fixture("app.module.ts");
    let found: Vec<_> = output
        .records
        .iter()
        .map(|r| (r.category(), r.identifier()))
        .collect();
    assert_eq!(
        found,
        [
            (Category::SourceFiles, "app.module.ts"),
            (Category::Enums, "Mode"),
            (Category::Injectables, "Settings"),
            (Category::Pipes, "ModePipe"),
            (Category::Directives, "FocusDirective"),
            (Category::Modules, "AppModule"),
        ]
    );
    assert!(!output.timed_out());
    assert!(output.diagnostics.iter().all(|d| d.severity != Severity::Error));
}

#[test]
fn module_metadata_keeps_expressions() {
    let output = classify_fixture("app.module.ts");
    let DeclarationRecord::Module(module) = only(&output, Category::Modules) else {
        panic!("expected a module record");
    };
    let Some(ExpressionMetadata::Structure(imports)) = &module.metadata.imports else {
        panic!("imports should be an array structure");
    };
    assert_eq!(imports.kind, TypeKind::Array);
    assert_eq!(
        imports.members[0].value,
        ExpressionMetadata::identifier("BrowserModule")
    );
}

#[test]
fn source_file_lists_imports() {
    let output = classify_fixture("app.module.ts");
    let DeclarationRecord::SourceFile(file) = only(&output, Category::SourceFiles) else {
        panic!("expected a source file record");
    };
    let sources: Vec<_> = file.imports.iter().map(|i| i.source.as_str()).collect();
    assert_eq!(sources, ["@angular/core", "@angular/platform-browser"]);
    assert_eq!(file.exports.len(), 5);
}

#[test]
fn enum_snapshot() {
    let output = classify_fixture("app.module.ts");
    let DeclarationRecord::Enum(record) = only(&output, Category::Enums) else {
        panic!("expected an enum record");
    };
    insta::assert_yaml_snapshot!(record, @r###"
    ---
    identifier: Mode
    filepath: src/app.module.ts
    members:
      - name: Dev
        value:
          type:
            kind: number
            literal: 0
      - name: Prod
    "###);
}

#[test]
fn classification_is_deterministic() {
    let first = classify_fixture("foo-bar.component.ts");
    let second = classify_fixture("foo-bar.component.ts");
    assert_eq!(first, second);

    let mut a = RootMetadataModel::new();
    a.extend(first.records);
    let mut b = RootMetadataModel::new();
    b.extend(second.records);
    assert_eq!(a.to_json_pretty().unwrap(), b.to_json_pretty().unwrap());
}
