//! # ngmeta-core
//!
//! Serializable metadata model for decorator-driven TypeScript declarations.
//!
//! This crate holds everything that does not depend on a parser:
//!
//! - [`TypeComposition`] and [`ExpressionMetadata`], the normalized shapes
//!   of type annotations and value expressions
//! - the declaration records ([`ClassRecord`], [`ComponentRecord`], ...)
//! - [`RootMetadataModel`], the category-keyed aggregate of a run
//! - [`Diagnostic`] for constructs that were skipped or degraded
//! - [`Config`] loaded from `ngmeta.toml`
//!
//! ## Example
//!
//! ```
//! use ngmeta_core::{Category, RootMetadataModel};
//!
//! let model = RootMetadataModel::new();
//! assert_eq!(model.len(Category::Components), 0);
//! let json = model.to_json_pretty().unwrap();
//! assert!(json.contains("\"typeAliases\": []"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod accumulator;
mod config;
mod diagnostic;
mod model;
mod records;

pub use accumulator::{Category, ModelError, RecordSink, RootMetadataModel};
pub use config::{Config, ConfigError, DecoratorKind, ExtractorConfig};
pub use diagnostic::{
    count_by_severity, Diagnostic, DiagnosticKind, DiagnosticReport, Location, Severity,
};
pub use model::{
    CallMetadata, ExpressionMetadata, LiteralValue, NewMetadata, PropertyAccessMetadata,
    StructureMember, StructureMetadata, TypeComposition, TypeKind,
};
pub use records::{
    AccessorMember, AttributeParameter, BindingName, ChangeDetectionStrategy, ClassRecord,
    ComponentMetadata, ComponentRecord, Decorated, DeclarationRecord, DirectiveMetadata,
    DirectiveRecord, EnumMember, EnumRecord, ExportRecord, ImportRecord, InjectableMetadata,
    InjectableRecord, InterfaceFunction, InterfaceProperty, InterfaceRecord, MethodMember,
    ModuleMetadata, ModuleRecord, Parameter, PipeMetadata, PipeRecord, PropertyMember,
    ReferenceParameter, SourceFileRecord, TypeAliasRecord, ViewEncapsulation,
};
