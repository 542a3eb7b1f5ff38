//! Root metadata model: the category-keyed aggregate of a run.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::records::{
    ClassRecord, ComponentRecord, DeclarationRecord, DirectiveRecord, EnumRecord,
    InjectableRecord, InterfaceRecord, ModuleRecord, PipeRecord, SourceFileRecord,
    TypeAliasRecord,
};

/// Declaration category; one list per category in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Undecorated classes.
    Classes,
    /// `@Component` classes.
    Components,
    /// `@Directive` classes.
    Directives,
    /// `@Injectable` classes.
    Injectables,
    /// `@NgModule` classes.
    Modules,
    /// `@Pipe` classes.
    Pipes,
    /// Enums.
    Enums,
    /// Interfaces.
    Interfaces,
    /// Type aliases.
    TypeAliases,
    /// Whole files.
    SourceFiles,
}

impl Category {
    /// Every category, in serialization order.
    pub const ALL: [Category; 10] = [
        Self::Classes,
        Self::Components,
        Self::Directives,
        Self::Injectables,
        Self::Modules,
        Self::Pipes,
        Self::Enums,
        Self::Interfaces,
        Self::TypeAliases,
        Self::SourceFiles,
    ];

    /// Serialized key of this category.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Classes => "classes",
            Self::Components => "components",
            Self::Directives => "directives",
            Self::Injectables => "injectables",
            Self::Modules => "modules",
            Self::Pipes => "pipes",
            Self::Enums => "enums",
            Self::Interfaces => "interfaces",
            Self::TypeAliases => "typeAliases",
            Self::SourceFiles => "sourceFiles",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors serializing or deserializing a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// JSON encoding or decoding failed.
    #[error("metadata model JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for records produced while classifying a file.
pub trait RecordSink {
    /// Appends one record under its category.
    fn append(&mut self, record: DeclarationRecord);
}

impl RecordSink for Vec<DeclarationRecord> {
    fn append(&mut self, record: DeclarationRecord) {
        self.push(record);
    }
}

/// Aggregate of every record produced by a run.
///
/// Every category list exists from construction, so the serialized form
/// always carries all ten keys. Lists keep discovery order and are never
/// deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootMetadataModel {
    /// Undecorated classes.
    #[serde(default)]
    pub classes: Vec<ClassRecord>,
    /// `@Component` classes.
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
    /// `@Directive` classes.
    #[serde(default)]
    pub directives: Vec<DirectiveRecord>,
    /// `@Injectable` classes.
    #[serde(default)]
    pub injectables: Vec<InjectableRecord>,
    /// `@NgModule` classes.
    #[serde(default)]
    pub modules: Vec<ModuleRecord>,
    /// `@Pipe` classes.
    #[serde(default)]
    pub pipes: Vec<PipeRecord>,
    /// Enums.
    #[serde(default)]
    pub enums: Vec<EnumRecord>,
    /// Interfaces.
    #[serde(default)]
    pub interfaces: Vec<InterfaceRecord>,
    /// Type aliases.
    #[serde(default)]
    pub type_aliases: Vec<TypeAliasRecord>,
    /// Whole files.
    #[serde(default)]
    pub source_files: Vec<SourceFileRecord>,
}

impl RootMetadataModel {
    /// Creates an empty model with every category seeded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a category.
    #[must_use]
    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Classes => self.classes.len(),
            Category::Components => self.components.len(),
            Category::Directives => self.directives.len(),
            Category::Injectables => self.injectables.len(),
            Category::Modules => self.modules.len(),
            Category::Pipes => self.pipes.len(),
            Category::Enums => self.enums.len(),
            Category::Interfaces => self.interfaces.len(),
            Category::TypeAliases => self.type_aliases.len(),
            Category::SourceFiles => self.source_files.len(),
        }
    }

    /// Total number of records across categories.
    #[must_use]
    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.len(*c)).sum()
    }

    /// Returns true when no category holds a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Identifiers of a category's records, in discovery order.
    #[must_use]
    pub fn identifiers(&self, category: Category) -> Vec<&str> {
        fn ids<T>(records: &[T], id: impl Fn(&T) -> &str) -> Vec<&str> {
            records.iter().map(id).collect()
        }
        match category {
            Category::Classes => ids(&self.classes, |r| &r.identifier),
            Category::Components => ids(&self.components, |r| &r.base.identifier),
            Category::Directives => ids(&self.directives, |r| &r.base.identifier),
            Category::Injectables => ids(&self.injectables, |r| &r.base.identifier),
            Category::Modules => ids(&self.modules, |r| &r.base.identifier),
            Category::Pipes => ids(&self.pipes, |r| &r.base.identifier),
            Category::Enums => ids(&self.enums, |r| &r.identifier),
            Category::Interfaces => ids(&self.interfaces, |r| &r.identifier),
            Category::TypeAliases => ids(&self.type_aliases, |r| &r.identifier),
            Category::SourceFiles => ids(&self.source_files, |r| &r.identifier),
        }
    }

    /// Records of one category as owned [`DeclarationRecord`]s.
    #[must_use]
    pub fn records(&self, category: Category) -> Vec<DeclarationRecord> {
        fn wrap<T: Clone + Into<DeclarationRecord>>(records: &[T]) -> Vec<DeclarationRecord> {
            records.iter().cloned().map(Into::into).collect()
        }
        match category {
            Category::Classes => wrap(&self.classes),
            Category::Components => wrap(&self.components),
            Category::Directives => wrap(&self.directives),
            Category::Injectables => wrap(&self.injectables),
            Category::Modules => wrap(&self.modules),
            Category::Pipes => wrap(&self.pipes),
            Category::Enums => wrap(&self.enums),
            Category::Interfaces => wrap(&self.interfaces),
            Category::TypeAliases => wrap(&self.type_aliases),
            Category::SourceFiles => wrap(&self.source_files),
        }
    }

    /// Folds another model (typically one file's shard) into this one,
    /// preserving the order within each category.
    pub fn merge(&mut self, other: Self) {
        self.classes.extend(other.classes);
        self.components.extend(other.components);
        self.directives.extend(other.directives);
        self.injectables.extend(other.injectables);
        self.modules.extend(other.modules);
        self.pipes.extend(other.pipes);
        self.enums.extend(other.enums);
        self.interfaces.extend(other.interfaces);
        self.type_aliases.extend(other.type_aliases);
        self.source_files.extend(other.source_files);
    }

    /// Serializes with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be encoded.
    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a model previously written by [`Self::to_json_pretty`].
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a model.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl RecordSink for RootMetadataModel {
    fn append(&mut self, record: DeclarationRecord) {
        match record {
            DeclarationRecord::Class(r) => self.classes.push(r),
            DeclarationRecord::Component(r) => self.components.push(r),
            DeclarationRecord::Directive(r) => self.directives.push(r),
            DeclarationRecord::Injectable(r) => self.injectables.push(r),
            DeclarationRecord::Module(r) => self.modules.push(r),
            DeclarationRecord::Pipe(r) => self.pipes.push(r),
            DeclarationRecord::Enum(r) => self.enums.push(r),
            DeclarationRecord::Interface(r) => self.interfaces.push(r),
            DeclarationRecord::TypeAlias(r) => self.type_aliases.push(r),
            DeclarationRecord::SourceFile(r) => self.source_files.push(r),
        }
    }
}

impl Extend<DeclarationRecord> for RootMetadataModel {
    fn extend<I: IntoIterator<Item = DeclarationRecord>>(&mut self, iter: I) {
        for record in iter {
            self.append(record);
        }
    }
}
