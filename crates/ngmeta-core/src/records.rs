//! Declaration records produced by the collectors.
//!
//! Every record carries an `identifier` and a `filepath`. The five
//! decorator-driven flavors are [`Decorated`] records: the base
//! [`ClassRecord`] merged with decorator-specific metadata.

use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::accumulator::Category;
use crate::model::{ExpressionMetadata, TypeComposition};

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// A function or constructor parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Binding name (source text for destructuring patterns).
    pub identifier: String,
    /// Declared type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeComposition>,
    /// `name?: T` or a parameter with a default value.
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    /// Decorator names attached to the parameter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<String>,
}

/// A class field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMember {
    /// Field name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeComposition>,
    /// Declared with `?`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    /// Declared `static`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_static: bool,
    /// Resolved initializer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<ExpressionMetadata>,
    /// Decorator names attached to the field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<String>,
}

/// A class method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodMember {
    /// Method name.
    pub name: String,
    /// Parameters in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Declared return type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeComposition>,
    /// Declared `static`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_static: bool,
    /// Decorator names attached to the method.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<String>,
}

/// A `get` or `set` accessor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorMember {
    /// Accessor name.
    pub name: String,
    /// Getter return type, or setter parameter type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeComposition>,
    /// Declared `static`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_static: bool,
    /// Decorator names attached to the accessor.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<String>,
}

/// Base record for every class-shaped declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    /// Class name.
    pub identifier: String,
    /// File the class was found in.
    pub filepath: PathBuf,
    /// Generic parameter names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    /// `extends` target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<TypeComposition>,
    /// `implements` targets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<TypeComposition>,
    /// Names of the decorators on the class, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<String>,
    /// Constructor parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructor_parameters: Vec<Parameter>,
    /// Fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyMember>,
    /// Methods.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodMember>,
    /// `get` accessors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub getters: Vec<AccessorMember>,
    /// `set` accessors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub setters: Vec<AccessorMember>,
}

/// A class record merged with decorator-specific metadata.
///
/// Merge contract: decorator-derived fields act as defaults and base fields
/// are authoritative. When both sides serialize the same key, only the base
/// value is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Decorated<M> {
    /// Base class fields.
    #[serde(flatten)]
    pub base: ClassRecord,
    /// Fields read from the decorator's configuration object.
    #[serde(flatten)]
    pub metadata: M,
}

impl<M> Decorated<M> {
    /// Merges a base record with decorator metadata.
    #[must_use]
    pub fn merge(base: ClassRecord, metadata: M) -> Self {
        Self { base, metadata }
    }
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(serde_json::Error::custom(format!(
            "expected a record object, found {other}"
        ))),
    }
}

impl<M: Serialize> Serialize for Decorated<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let base = to_object(&self.base).map_err(S::Error::custom)?;
        let metadata = to_object(&self.metadata).map_err(S::Error::custom)?;

        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &base {
            map.serialize_entry(key, value)?;
        }
        for (key, value) in metadata.iter().filter(|(k, _)| !base.contains_key(*k)) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// `ChangeDetectionStrategy.X`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeDetectionStrategy {
    /// `ChangeDetectionStrategy.Default`
    Default,
    /// `ChangeDetectionStrategy.OnPush`
    OnPush,
}

impl ChangeDetectionStrategy {
    /// Parses the accessed member name.
    #[must_use]
    pub fn from_member(name: &str) -> Option<Self> {
        match name {
            "Default" => Some(Self::Default),
            "OnPush" => Some(Self::OnPush),
            _ => None,
        }
    }
}

/// `ViewEncapsulation.X`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEncapsulation {
    /// `ViewEncapsulation.Emulated`
    Emulated,
    /// `ViewEncapsulation.Native` (legacy)
    Native,
    /// `ViewEncapsulation.None`
    None,
    /// `ViewEncapsulation.ShadowDom`
    ShadowDom,
}

impl ViewEncapsulation {
    /// Parses the accessed member name.
    #[must_use]
    pub fn from_member(name: &str) -> Option<Self> {
        match name {
            "Emulated" => Some(Self::Emulated),
            "Native" => Some(Self::Native),
            "None" => Some(Self::None),
            "ShadowDom" => Some(Self::ShadowDom),
            _ => None,
        }
    }
}

/// Constructor parameter annotated with `@Attribute('name')`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeParameter {
    /// Parameter name.
    pub identifier: String,
    /// Host attribute being injected.
    pub attribute_name: String,
}

/// Constructor parameter typed as a framework reference handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceParameter {
    /// Parameter name.
    pub identifier: String,
    /// Handle type name (`ElementRef`, `TemplateRef`, ...).
    #[serde(rename = "type")]
    pub ty: String,
}

/// Fields recognized in `@Directive({...})`, shared with components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveMetadata {
    /// CSS selector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Host bindings object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<ExpressionMetadata>,
    /// Input property names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<String>>,
    /// Output property names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,
    /// Providers list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providers: Option<ExpressionMetadata>,
    /// Queries object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<ExpressionMetadata>,
    /// Template reference name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_as: Option<String>,
    /// Standalone flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standalone: Option<bool>,
    /// Constructor parameters injected via `@Attribute`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructor_attributes: Vec<AttributeParameter>,
    /// Constructor parameters typed as reference handles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructor_references: Vec<ReferenceParameter>,
}

/// Fields recognized in `@Component({...})`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    /// Fields shared with directives.
    #[serde(flatten)]
    pub directive: DirectiveMetadata,
    /// Change detection strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_detection: Option<ChangeDetectionStrategy>,
    /// View encapsulation mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encapsulation: Option<ViewEncapsulation>,
    /// Member of `module` used as the module id (normally `id`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    /// Whitespace preservation flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_whitespaces: Option<bool>,
    /// Inline styles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<String>>,
    /// Style sheet URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_urls: Option<Vec<String>>,
    /// Inline template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Template URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,
    /// View providers list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_providers: Option<ExpressionMetadata>,
    /// Standalone imports list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<ExpressionMetadata>,
    /// Animation triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations: Option<ExpressionMetadata>,
}

/// Fields recognized in `@Injectable({...})`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectableMetadata {
    /// Injector scope (`'root'`, a module reference, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provided_in: Option<ExpressionMetadata>,
}

/// Fields recognized in `@NgModule({...})`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleMetadata {
    /// Module id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Bootstrap components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<ExpressionMetadata>,
    /// Declared components, directives, and pipes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declarations: Option<ExpressionMetadata>,
    /// Entry components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_components: Option<ExpressionMetadata>,
    /// Exported declarations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<ExpressionMetadata>,
    /// Imported modules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<ExpressionMetadata>,
    /// Providers list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providers: Option<ExpressionMetadata>,
    /// Element schemas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<ExpressionMetadata>,
}

/// Fields recognized in `@Pipe({...})`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeMetadata {
    /// Template name of the pipe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Purity flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pure: Option<bool>,
    /// Standalone flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standalone: Option<bool>,
}

/// `@Component` class.
pub type ComponentRecord = Decorated<ComponentMetadata>;
/// `@Directive` class.
pub type DirectiveRecord = Decorated<DirectiveMetadata>;
/// `@Injectable` class.
pub type InjectableRecord = Decorated<InjectableMetadata>;
/// `@NgModule` class.
pub type ModuleRecord = Decorated<ModuleMetadata>;
/// `@Pipe` class.
pub type PipeRecord = Decorated<PipeMetadata>;

/// One enum member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    /// Member name.
    pub name: String,
    /// Resolved initializer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ExpressionMetadata>,
}

/// `enum` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumRecord {
    /// Enum name.
    pub identifier: String,
    /// Source file.
    pub filepath: PathBuf,
    /// Declared `const enum`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_const: bool,
    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<EnumMember>,
}

/// A non-function interface property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceProperty {
    /// Property name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeComposition>,
    /// Declared `readonly`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub readonly: bool,
}

/// A function-shaped interface member: a method signature or a property
/// whose type is a function type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceFunction {
    /// Member name.
    pub name: String,
    /// Parameters in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Declared return type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeComposition>,
    /// Declared with `?`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
}

/// `interface` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceRecord {
    /// Interface name.
    pub identifier: String,
    /// Source file.
    pub filepath: PathBuf,
    /// Generic parameter names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    /// Extended interfaces.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<TypeComposition>,
    /// Required properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<InterfaceProperty>,
    /// Properties declared with `?`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional_properties: Vec<InterfaceProperty>,
    /// Function-shaped members.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<InterfaceFunction>,
}

/// `type X = ...` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAliasRecord {
    /// Alias name.
    pub identifier: String,
    /// Source file.
    pub filepath: PathBuf,
    /// Generic parameter names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    /// Aliased type.
    #[serde(rename = "type")]
    pub ty: TypeComposition,
}

/// `name` or `name as alias` inside an import/export clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingName {
    /// Name in the source module.
    pub name: String,
    /// Local (import) or exported (export) alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// One `import` statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    /// Module specifier, quotes stripped.
    pub source: String,
    /// `import x from ...`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_import: Option<String>,
    /// `import * as ns from ...`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// `import { a, b as c } from ...`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<BindingName>,
    /// `import type ...`
    #[serde(default, skip_serializing_if = "is_false")]
    pub type_only: bool,
}

/// One `export` statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    /// Re-export source module, quotes stripped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// `export { a, b as c }`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<BindingName>,
    /// `export * as ns from ...`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Name of an exported declaration (`export class Foo`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration: Option<String>,
    /// `export default ...`
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_default: bool,
    /// `export * from ...`
    #[serde(default, skip_serializing_if = "is_false")]
    pub wildcard: bool,
}

/// File-level record: imports and exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileRecord {
    /// File name.
    pub identifier: String,
    /// Source file.
    pub filepath: PathBuf,
    /// Import statements in source order.
    #[serde(default)]
    pub imports: Vec<ImportRecord>,
    /// Export statements in source order.
    #[serde(default)]
    pub exports: Vec<ExportRecord>,
}

/// Any record a collector can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationRecord {
    /// Undecorated class.
    Class(ClassRecord),
    /// `@Component` class.
    Component(ComponentRecord),
    /// `@Directive` class.
    Directive(DirectiveRecord),
    /// `@Injectable` class.
    Injectable(InjectableRecord),
    /// `@NgModule` class.
    Module(ModuleRecord),
    /// `@Pipe` class.
    Pipe(PipeRecord),
    /// `enum`
    Enum(EnumRecord),
    /// `interface`
    Interface(InterfaceRecord),
    /// `type` alias.
    TypeAlias(TypeAliasRecord),
    /// Whole file.
    SourceFile(SourceFileRecord),
}

impl DeclarationRecord {
    /// Category this record is accumulated under.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::Class(_) => Category::Classes,
            Self::Component(_) => Category::Components,
            Self::Directive(_) => Category::Directives,
            Self::Injectable(_) => Category::Injectables,
            Self::Module(_) => Category::Modules,
            Self::Pipe(_) => Category::Pipes,
            Self::Enum(_) => Category::Enums,
            Self::Interface(_) => Category::Interfaces,
            Self::TypeAlias(_) => Category::TypeAliases,
            Self::SourceFile(_) => Category::SourceFiles,
        }
    }

    /// Declared name.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Class(r) => &r.identifier,
            Self::Component(r) => &r.base.identifier,
            Self::Directive(r) => &r.base.identifier,
            Self::Injectable(r) => &r.base.identifier,
            Self::Module(r) => &r.base.identifier,
            Self::Pipe(r) => &r.base.identifier,
            Self::Enum(r) => &r.identifier,
            Self::Interface(r) => &r.identifier,
            Self::TypeAlias(r) => &r.identifier,
            Self::SourceFile(r) => &r.identifier,
        }
    }

    /// File the record was produced from.
    #[must_use]
    pub fn filepath(&self) -> &Path {
        match self {
            Self::Class(r) => &r.filepath,
            Self::Component(r) => &r.base.filepath,
            Self::Directive(r) => &r.base.filepath,
            Self::Injectable(r) => &r.base.filepath,
            Self::Module(r) => &r.base.filepath,
            Self::Pipe(r) => &r.base.filepath,
            Self::Enum(r) => &r.filepath,
            Self::Interface(r) => &r.filepath,
            Self::TypeAlias(r) => &r.filepath,
            Self::SourceFile(r) => &r.filepath,
        }
    }
}

macro_rules! impl_from_record {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for DeclarationRecord {
                fn from(record: $ty) -> Self {
                    Self::$variant(record)
                }
            }
        )*
    };
}

impl_from_record! {
    ClassRecord => Class,
    ComponentRecord => Component,
    DirectiveRecord => Directive,
    InjectableRecord => Injectable,
    ModuleRecord => Module,
    PipeRecord => Pipe,
    EnumRecord => Enum,
    InterfaceRecord => Interface,
    TypeAliasRecord => TypeAlias,
    SourceFileRecord => SourceFile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeKind;
    use std::collections::HashSet;

    fn base() -> ClassRecord {
        ClassRecord {
            identifier: "FooComponent".into(),
            filepath: PathBuf::from("src/foo.component.ts"),
            decorators: vec!["Component".into()],
            ..ClassRecord::default()
        }
    }

    fn keys(value: &Value) -> Vec<String> {
        value
            .as_object()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn decorated_record_flattens_base_and_metadata() {
        let record = ComponentRecord::merge(
            base(),
            ComponentMetadata {
                directive: DirectiveMetadata {
                    selector: Some("foo-bar".into()),
                    ..DirectiveMetadata::default()
                },
                styles: Some(vec!["a{}".into()]),
                ..ComponentMetadata::default()
            },
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["identifier"], "FooComponent");
        assert_eq!(value["selector"], "foo-bar");
        assert_eq!(value["styles"][0], "a{}");
    }

    #[test]
    fn decorated_record_round_trips() {
        let record = ModuleRecord::merge(
            base(),
            ModuleMetadata {
                id: Some("app".into()),
                imports: Some(ExpressionMetadata::identifier("CommonModule")),
                ..ModuleMetadata::default()
            },
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: ModuleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn base_fields_win_on_key_collision() {
        #[derive(Serialize)]
        struct Colliding {
            identifier: &'static str,
            extra: bool,
        }

        let record = Decorated::merge(
            base(),
            Colliding {
                identifier: "ignored",
                extra: true,
            },
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["identifier"], "FooComponent");
        assert_eq!(value["extra"], true);
    }

    #[test]
    fn component_and_class_key_sets_are_disjoint() {
        let class_keys: HashSet<String> = keys(
            &serde_json::to_value(ClassRecord {
                type_parameters: vec!["T".into()],
                extends: Some(TypeComposition::leaf(TypeKind::Named("Base".into()))),
                implements: vec![TypeComposition::leaf(TypeKind::Named("OnInit".into()))],
                constructor_parameters: vec![Parameter::default()],
                properties: vec![PropertyMember::default()],
                methods: vec![MethodMember::default()],
                getters: vec![AccessorMember::default()],
                setters: vec![AccessorMember::default()],
                ..base()
            })
            .unwrap(),
        )
        .into_iter()
        .collect();

        let any = || Some(ExpressionMetadata::boolean(true));
        let component = ComponentMetadata {
            directive: DirectiveMetadata {
                selector: Some(String::new()),
                host: any(),
                inputs: Some(vec![]),
                outputs: Some(vec![]),
                providers: any(),
                queries: any(),
                export_as: Some(String::new()),
                standalone: Some(true),
                constructor_attributes: vec![AttributeParameter {
                    identifier: "a".into(),
                    attribute_name: "b".into(),
                }],
                constructor_references: vec![ReferenceParameter {
                    identifier: "el".into(),
                    ty: "ElementRef".into(),
                }],
            },
            change_detection: Some(ChangeDetectionStrategy::OnPush),
            encapsulation: Some(ViewEncapsulation::None),
            module_id: Some("id".into()),
            preserve_whitespaces: Some(false),
            styles: Some(vec![]),
            style_urls: Some(vec![]),
            template: Some(String::new()),
            template_url: Some(String::new()),
            view_providers: any(),
            imports: any(),
            animations: any(),
        };
        let component_keys = keys(&serde_json::to_value(&component).unwrap());

        assert_eq!(component_keys.len(), 21);
        for key in component_keys {
            assert!(!class_keys.contains(&key), "collision on {key}");
        }
    }

    #[test]
    fn record_exposes_category_and_identity() {
        let record = DeclarationRecord::from(PipeRecord::merge(base(), PipeMetadata::default()));
        assert_eq!(record.category(), Category::Pipes);
        assert_eq!(record.identifier(), "FooComponent");
        assert_eq!(record.filepath(), Path::new("src/foo.component.ts"));
    }
}
