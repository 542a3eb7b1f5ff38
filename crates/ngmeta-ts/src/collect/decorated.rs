//! Decorator-specific collectors.
//!
//! Each collector builds the base [`ClassRecord`], reads the recognized
//! keys of its decorator's configuration object and merges the two with
//! [`Decorated::merge`]. A missing decorator or a non-object argument leaves
//! every decorator field unset.

use ngmeta_core::{
    AttributeParameter, ChangeDetectionStrategy, ComponentMetadata, ComponentRecord,
    Decorated, DecoratorKind, DiagnosticKind, DirectiveMetadata, DirectiveRecord,
    ExpressionMetadata, InjectableMetadata, InjectableRecord, ModuleMetadata, ModuleRecord,
    PipeMetadata, PipeRecord, ReferenceParameter, ViewEncapsulation,
};
use std::collections::HashMap;
use tree_sitter::Node;

use super::class::collect_class;
use crate::context::FileContext;
use crate::decorators::{config_object, decorator_name, decorator_of_kind, first_argument};
use crate::resolve::{object_pairs, resolve_expression};
use crate::syntax::{children_of_kind, first_named_child, named_children, strip_quotes};

/// Constructor parameter types recorded as reference handles.
pub const REFERENCE_TYPES: [&str; 7] = [
    "ChangeDetectorRef",
    "ComponentRef",
    "EmbeddedViewRef",
    "ElementRef",
    "TemplateRef",
    "ViewRef",
    "ViewContainerRef",
];

/// Collects a `@Component` class.
pub fn collect_component(ctx: &mut FileContext<'_>, node: Node<'_>) -> ComponentRecord {
    let base = collect_class(ctx, node);
    let fields = Fields::read(ctx, node, DecoratorKind::Component);
    let metadata = ComponentMetadata {
        directive: directive_metadata(ctx, &fields, node),
        change_detection: fields.enum_member(
            ctx,
            "changeDetection",
            "ChangeDetectionStrategy",
            ChangeDetectionStrategy::from_member,
        ),
        encapsulation: fields.enum_member(
            ctx,
            "encapsulation",
            "ViewEncapsulation",
            ViewEncapsulation::from_member,
        ),
        module_id: fields.enum_member(ctx, "moduleId", "module", |m| Some(m.to_owned())),
        preserve_whitespaces: fields.boolean(ctx, "preserveWhitespaces"),
        styles: fields.strings(ctx, "styles"),
        style_urls: fields.strings(ctx, "styleUrls"),
        template: fields.string(ctx, "template"),
        template_url: fields.string(ctx, "templateUrl"),
        view_providers: fields.expression(ctx, "viewProviders"),
        imports: fields.expression(ctx, "imports"),
        animations: fields.expression(ctx, "animations"),
    };
    Decorated::merge(base, metadata)
}

/// Collects a `@Directive` class.
pub fn collect_directive(ctx: &mut FileContext<'_>, node: Node<'_>) -> DirectiveRecord {
    let base = collect_class(ctx, node);
    let fields = Fields::read(ctx, node, DecoratorKind::Directive);
    let metadata = directive_metadata(ctx, &fields, node);
    Decorated::merge(base, metadata)
}

/// Collects an `@Injectable` class.
pub fn collect_injectable(ctx: &mut FileContext<'_>, node: Node<'_>) -> InjectableRecord {
    let base = collect_class(ctx, node);
    let fields = Fields::read(ctx, node, DecoratorKind::Injectable);
    let metadata = InjectableMetadata {
        provided_in: fields.expression(ctx, "providedIn"),
    };
    Decorated::merge(base, metadata)
}

/// Collects an `@NgModule` class.
pub fn collect_module(ctx: &mut FileContext<'_>, node: Node<'_>) -> ModuleRecord {
    let base = collect_class(ctx, node);
    let fields = Fields::read(ctx, node, DecoratorKind::Module);
    let metadata = ModuleMetadata {
        id: fields.string(ctx, "id"),
        bootstrap: fields.expression(ctx, "bootstrap"),
        declarations: fields.expression(ctx, "declarations"),
        entry_components: fields.expression(ctx, "entryComponents"),
        exports: fields.expression(ctx, "exports"),
        imports: fields.expression(ctx, "imports"),
        providers: fields.expression(ctx, "providers"),
        schemas: fields.expression(ctx, "schemas"),
    };
    Decorated::merge(base, metadata)
}

/// Collects a `@Pipe` class.
pub fn collect_pipe(ctx: &mut FileContext<'_>, node: Node<'_>) -> PipeRecord {
    let base = collect_class(ctx, node);
    let fields = Fields::read(ctx, node, DecoratorKind::Pipe);
    let metadata = PipeMetadata {
        name: fields.string(ctx, "name"),
        pure: fields.boolean(ctx, "pure"),
        standalone: fields.boolean(ctx, "standalone"),
    };
    Decorated::merge(base, metadata)
}

fn directive_metadata(
    ctx: &mut FileContext<'_>,
    fields: &Fields<'_>,
    node: Node<'_>,
) -> DirectiveMetadata {
    let (constructor_attributes, constructor_references) = constructor_metadata(ctx, node);
    DirectiveMetadata {
        selector: fields.string(ctx, "selector"),
        host: fields.expression(ctx, "host"),
        inputs: fields.strings(ctx, "inputs"),
        outputs: fields.strings(ctx, "outputs"),
        providers: fields.expression(ctx, "providers"),
        queries: fields.expression(ctx, "queries"),
        export_as: fields.string(ctx, "exportAs"),
        standalone: fields.boolean(ctx, "standalone"),
        constructor_attributes,
        constructor_references,
    }
}

/// Name → value node map of a decorator's configuration object.
struct Fields<'t> {
    values: HashMap<String, Node<'t>>,
}

impl<'t> Fields<'t> {
    fn read(ctx: &mut FileContext<'_>, node: Node<'t>, kind: DecoratorKind) -> Self {
        let values = decorator_of_kind(ctx, node, kind)
            .and_then(config_object)
            .map(|object| object_pairs(ctx, object).into_iter().collect())
            .unwrap_or_default();
        Self { values }
    }

    fn unset(ctx: &mut FileContext<'_>, key: &str, expected: &str, value: Node<'_>) {
        let message = format!("`{key}` expects {expected}, found `{}`", value.kind());
        ctx.report(DiagnosticKind::UnsetDecoratorField, value, message);
    }

    /// String or template literal, quotes stripped.
    fn string(&self, ctx: &mut FileContext<'_>, key: &str) -> Option<String> {
        let value = *self.values.get(key)?;
        match value.kind() {
            "string" | "template_string" => Some(strip_quotes(ctx.text(value)).to_owned()),
            _ => {
                Self::unset(ctx, key, "a string literal", value);
                None
            }
        }
    }

    /// Array literal, each element quote-stripped.
    fn strings(&self, ctx: &mut FileContext<'_>, key: &str) -> Option<Vec<String>> {
        let value = *self.values.get(key)?;
        if value.kind() != "array" {
            Self::unset(ctx, key, "an array literal", value);
            return None;
        }
        Some(
            named_children(value)
                .into_iter()
                .map(|element| strip_quotes(ctx.text(element)).to_owned())
                .collect(),
        )
    }

    fn boolean(&self, ctx: &mut FileContext<'_>, key: &str) -> Option<bool> {
        let value = *self.values.get(key)?;
        match value.kind() {
            "true" => Some(true),
            "false" => Some(false),
            _ => {
                Self::unset(ctx, key, "`true` or `false`", value);
                None
            }
        }
    }

    /// `Namespace.Member`, parsed by `parse`.
    fn enum_member<T>(
        &self,
        ctx: &mut FileContext<'_>,
        key: &str,
        namespace: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let value = *self.values.get(key)?;
        let member = (value.kind() == "member_expression")
            .then(|| {
                let object = value.child_by_field_name("object")?;
                let property = value.child_by_field_name("property")?;
                (ctx.text(object) == namespace).then(|| ctx.text(property))
            })
            .flatten()
            .and_then(parse);
        if member.is_none() {
            Self::unset(ctx, key, &format!("`{namespace}.<member>`"), value);
        }
        member
    }

    fn expression(&self, ctx: &mut FileContext<'_>, key: &str) -> Option<ExpressionMetadata> {
        let value = *self.values.get(key)?;
        Some(resolve_expression(ctx, value))
    }
}

/// `@Attribute('name')` parameters and reference-handle parameters of the
/// class constructor.
fn constructor_metadata(
    ctx: &FileContext<'_>,
    node: Node<'_>,
) -> (Vec<AttributeParameter>, Vec<ReferenceParameter>) {
    let mut attributes = Vec::new();
    let mut references = Vec::new();
    let Some(params) = constructor_parameters(ctx, node) else {
        return (attributes, references);
    };

    for param in named_children(params) {
        let Some(identifier) = param
            .child_by_field_name("pattern")
            .map(|pattern| ctx.text(pattern).to_owned())
        else {
            continue;
        };
        let attribute = children_of_kind(param, "decorator")
            .into_iter()
            .filter(|d| decorator_name(ctx, *d).as_deref() == Some("Attribute"))
            .filter_map(first_argument)
            .last();
        if let Some(argument) = attribute {
            attributes.push(AttributeParameter {
                identifier: identifier.clone(),
                attribute_name: strip_quotes(ctx.text(argument)).to_owned(),
            });
        }
        if let Some(ty) = reference_type(ctx, param) {
            references.push(ReferenceParameter { identifier, ty });
        }
    }
    (attributes, references)
}

fn constructor_parameters<'t>(ctx: &FileContext<'_>, node: Node<'t>) -> Option<Node<'t>> {
    let body = node.child_by_field_name("body")?;
    named_children(body)
        .into_iter()
        .filter(|member| member.kind() == "method_definition")
        .find(|member| {
            member
                .child_by_field_name("name")
                .is_some_and(|name| ctx.text(name) == "constructor")
        })?
        .child_by_field_name("parameters")
}

/// Declared type name, bare or generic, when it is a reference handle.
fn reference_type(ctx: &FileContext<'_>, param: Node<'_>) -> Option<String> {
    let annotation = param.child_by_field_name("type")?;
    let ty = first_named_child(annotation)?;
    let name = match ty.kind() {
        "type_identifier" => ty,
        "generic_type" => ty.child_by_field_name("name")?,
        _ => return None,
    };
    let name = ctx.text(name);
    REFERENCE_TYPES.contains(&name).then(|| name.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{find_first, Harness};
    use ngmeta_core::{StructureMetadata, TypeKind};

    fn run<T>(source: &str, collect: fn(&mut FileContext<'_>, Node<'_>) -> T) -> (T, Vec<DiagnosticKind>) {
        Harness::new(source).run(|ctx, root| collect(ctx, find_first(root, "class_declaration").unwrap()))
    }

    #[test]
    fn component_reads_selector_and_styles() {
        let source = "@Component({ selector: 'foo-bar', styles: ['a{}','b{}'] })\nexport class FooBar {}";
        let (record, diagnostics) = run(source, collect_component);
        assert!(diagnostics.is_empty());
        assert_eq!(record.base.identifier, "FooBar");
        assert_eq!(record.metadata.directive.selector.as_deref(), Some("foo-bar"));
        assert_eq!(
            record.metadata.styles,
            Some(vec!["a{}".to_owned(), "b{}".to_owned()])
        );
        assert_eq!(record.base.decorators, ["Component"]);
    }

    #[test]
    fn component_enum_like_keys() {
        let source = r"
@Component({
  moduleId: module.id,
  changeDetection: ChangeDetectionStrategy.OnPush,
  encapsulation: ViewEncapsulation.ShadowDom,
  preserveWhitespaces: false,
  templateUrl: './a.html',
})
class A {}";
        let (record, diagnostics) = run(source, collect_component);
        assert!(diagnostics.is_empty());
        let m = &record.metadata;
        assert_eq!(m.module_id.as_deref(), Some("id"));
        assert_eq!(m.change_detection, Some(ChangeDetectionStrategy::OnPush));
        assert_eq!(m.encapsulation, Some(ViewEncapsulation::ShadowDom));
        assert_eq!(m.preserve_whitespaces, Some(false));
        assert_eq!(m.template_url.as_deref(), Some("./a.html"));
    }

    #[test]
    fn wrong_shapes_leave_fields_unset() {
        let source = r"
@Component({
  selector: SELECTOR,
  styles: 'a{}',
  changeDetection: Strategy.OnPush,
  preserveWhitespaces: 'yes',
})
class A {}";
        let (record, diagnostics) = run(source, collect_component);
        let m = &record.metadata;
        assert!(m.directive.selector.is_none());
        assert!(m.styles.is_none());
        assert!(m.change_detection.is_none());
        assert!(m.preserve_whitespaces.is_none());
        assert_eq!(diagnostics, [DiagnosticKind::UnsetDecoratorField; 4]);
    }

    #[test]
    fn template_literal_is_accepted_as_string() {
        let (record, _) = run("@Component({ template: `<p>hi</p>` }) class A {}", collect_component);
        assert_eq!(record.metadata.template.as_deref(), Some("<p>hi</p>"));
    }

    #[test]
    fn quotes_inside_strings_are_kept() {
        let source = r#"@Component({ template: 'Say "hi"', styles: ["a::after{content:'x'}"] }) class A {}"#;
        let (record, _) = run(source, collect_component);
        assert_eq!(record.metadata.template.as_deref(), Some(r#"Say "hi""#));
        assert_eq!(
            record.metadata.styles,
            Some(vec!["a::after{content:'x'}".to_owned()])
        );
    }

    #[test]
    fn constructor_attributes_and_references() {
        let source = r"
@Directive({ selector: '[appTooltip]', exportAs: 'tooltip', inputs: ['text'] })
class Tooltip {
  constructor(
    @Attribute('role') role: string,
    private host: ElementRef<HTMLElement>,
    private tpl: TemplateRef<unknown>,
    private http: HttpClient,
  ) {}
}";
        let (record, _) = run(source, collect_directive);
        let m = &record.metadata;
        assert_eq!(m.selector.as_deref(), Some("[appTooltip]"));
        assert_eq!(m.export_as.as_deref(), Some("tooltip"));
        assert_eq!(m.inputs, Some(vec!["text".to_owned()]));
        assert_eq!(
            m.constructor_attributes,
            [AttributeParameter {
                identifier: "role".into(),
                attribute_name: "role".into()
            }]
        );
        let refs: Vec<_> = m
            .constructor_references
            .iter()
            .map(|r| (r.identifier.as_str(), r.ty.as_str()))
            .collect();
        assert_eq!(refs, [("host", "ElementRef"), ("tpl", "TemplateRef")]);
        assert_eq!(record.base.constructor_parameters.len(), 4);
    }

    #[test]
    fn injectable_resolves_provided_in() {
        let (record, _) = run("@Injectable({ providedIn: 'root' }) class S {}", collect_injectable);
        assert_eq!(
            record.metadata.provided_in,
            Some(ExpressionMetadata::string("'root'"))
        );
    }

    #[test]
    fn injectable_without_arguments_is_unset() {
        let (record, diagnostics) = run("@Injectable() class S {}", collect_injectable);
        assert_eq!(record.metadata, InjectableMetadata::default());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn module_keeps_full_expressions() {
        let source = "@NgModule({ id: 'app', declarations: [A, B], imports: [CommonModule] }) class M {}";
        let (record, _) = run(source, collect_module);
        assert_eq!(record.metadata.id.as_deref(), Some("app"));
        let Some(ExpressionMetadata::Structure(StructureMetadata { kind, members })) =
            &record.metadata.declarations
        else {
            panic!("expected array structure");
        };
        assert_eq!(*kind, TypeKind::Array);
        assert_eq!(members.len(), 2);
        assert!(record.metadata.imports.is_some());
        assert!(record.metadata.bootstrap.is_none());
    }

    #[test]
    fn providers_named_like_builtin_tags_round_trip() {
        let source = "@NgModule({ providers: [Map, Set, array, object, any, literal] }) class M {}";
        let (record, diagnostics) = run(source, collect_module);
        assert!(diagnostics.is_empty());
        let json = serde_json::to_string(&record).unwrap();
        let back: ModuleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn pipe_reads_name_and_purity() {
        let (record, _) = run("@Pipe({ name: 'upper', pure: false, standalone: true }) class P {}", collect_pipe);
        assert_eq!(
            record.metadata,
            PipeMetadata {
                name: Some("upper".into()),
                pure: Some(false),
                standalone: Some(true),
            }
        );
    }

    #[test]
    fn duplicate_decorator_uses_later_configuration() {
        let source = "@Pipe({ name: 'first' })\n@Pipe({ name: 'second' })\nclass P {}";
        let (record, _) = run(source, collect_pipe);
        assert_eq!(record.metadata.name.as_deref(), Some("second"));
    }

    #[test]
    fn aliased_decorator_is_read() {
        let harness = Harness::new("@AppPipe({ name: 'x' }) class P {}").alias("AppPipe", DecoratorKind::Pipe);
        let (record, _) = harness.run(|ctx, root| {
            collect_pipe(ctx, find_first(root, "class_declaration").unwrap())
        });
        assert_eq!(record.metadata.name.as_deref(), Some("x"));
    }
}
