//! Normalized shapes for type expressions and value expressions.
//!
//! [`TypeComposition`] describes a type annotation as a kind tag plus
//! recursively resolved arguments or a literal value. [`ExpressionMetadata`]
//! describes a value expression (decorator arguments, initializers).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying the shape of a [`TypeComposition`].
///
/// Serialized as a plain string tag. Unrecognized value expressions are
/// tagged `unknown: <node kind>`; referenced type and identifier names are
/// carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeKind {
    /// `any`
    Any,
    /// `boolean`
    Boolean,
    /// Function type (`(a: string) => void`).
    Function,
    /// `A & B`
    Intersection,
    /// Literal type (`'a'`, `42`, `true`).
    Literal,
    /// `null`
    Null,
    /// `number`
    Number,
    /// `(A)`
    Parenthesized,
    /// `string`
    String,
    /// `undefined`
    Undefined,
    /// `A | B`
    Union,
    /// `void`
    Void,
    /// `never`
    Never,
    /// `symbol`
    Symbol,
    /// `bigint`
    BigInt,
    /// Inline structural object type or object literal.
    Object,
    /// Array type or array literal.
    Array,
    /// Tuple type.
    Tuple,
    /// Built-in `Set` container.
    Set,
    /// Built-in `Map` container.
    Map,
    /// `x as T` / `<T>x` cast, kept as raw text.
    CastAs,
    /// `this`
    This,
    /// The `unknown` keyword type.
    UnknownKeyword,
    /// Sentinel for a type node no tier recognizes.
    Unknown,
    /// Sentinel for an unrecognized value expression, carrying its node kind.
    UnknownExpression(String),
    /// Referenced type name or bare identifier, verbatim.
    Named(String),
}

const UNKNOWN_EXPRESSION_PREFIX: &str = "unknown: ";

impl TypeKind {
    /// Returns the bare tag; `unknown: <kind>` sentinels report `unknown`.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Any => "any",
            Self::Boolean => "boolean",
            Self::Function => "function",
            Self::Intersection => "intersection",
            Self::Literal => "literal",
            Self::Null => "null",
            Self::Number => "number",
            Self::Parenthesized => "parenthesized",
            Self::String => "string",
            Self::Undefined => "undefined",
            Self::Union => "union",
            Self::Void => "void",
            Self::Never => "never",
            Self::Symbol => "symbol",
            Self::BigInt => "bigint",
            Self::Object => "object",
            Self::Array => "array",
            Self::Tuple => "tuple",
            Self::Set => "Set",
            Self::Map => "Map",
            Self::CastAs => "castAs",
            Self::This => "this",
            Self::UnknownKeyword => "unknownKeyword",
            Self::Unknown | Self::UnknownExpression(_) => "unknown",
            Self::Named(name) => name,
        }
    }

    /// Maps a referenced type or identifier name onto its kind.
    ///
    /// `Set` and `Map` become [`TypeKind::Set`] / [`TypeKind::Map`]. A name
    /// that spells another built-in tag (`array`, `object`, ...) maps onto
    /// that tag, so the value equals what its serialized form reads back
    /// as. Every other name passes through as [`TypeKind::Named`].
    #[must_use]
    pub fn reference(name: &str) -> Self {
        Self::from(name.to_owned())
    }

    /// Returns true for either unknown sentinel. The `unknown` keyword type
    /// ([`TypeKind::UnknownKeyword`]) is a resolved type, not a sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown | Self::UnknownExpression(_))
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownExpression(kind) => write!(f, "{UNKNOWN_EXPRESSION_PREFIX}{kind}"),
            other => f.write_str(other.tag()),
        }
    }
}

impl From<TypeKind> for String {
    fn from(kind: TypeKind) -> Self {
        kind.to_string()
    }
}

impl From<String> for TypeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "any" => Self::Any,
            "boolean" => Self::Boolean,
            "function" => Self::Function,
            "intersection" => Self::Intersection,
            "literal" => Self::Literal,
            "null" => Self::Null,
            "number" => Self::Number,
            "parenthesized" => Self::Parenthesized,
            "string" => Self::String,
            "undefined" => Self::Undefined,
            "union" => Self::Union,
            "void" => Self::Void,
            "never" => Self::Never,
            "symbol" => Self::Symbol,
            "bigint" => Self::BigInt,
            "object" => Self::Object,
            "array" => Self::Array,
            "tuple" => Self::Tuple,
            "Set" => Self::Set,
            "Map" => Self::Map,
            "castAs" => Self::CastAs,
            "this" => Self::This,
            "unknownKeyword" => Self::UnknownKeyword,
            "unknown" => Self::Unknown,
            _ => match tag.strip_prefix(UNKNOWN_EXPRESSION_PREFIX) {
                Some(kind) => Self::UnknownExpression(kind.to_owned()),
                None => Self::Named(tag),
            },
        }
    }
}

/// Scalar carried by literal records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// `true` / `false`
    Boolean(bool),
    /// Base-10 integer.
    Integer(i64),
    /// Raw source text (quotes preserved).
    Text(String),
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Normalized representation of a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeComposition {
    /// Shape tag.
    pub kind: TypeKind,
    /// Recursively resolved nested types, for composite kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<TypeComposition>>,
    /// Literal value, for literal types and literal expressions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<LiteralValue>,
}

impl TypeComposition {
    /// A leaf composition with neither args nor literal.
    #[must_use]
    pub fn leaf(kind: TypeKind) -> Self {
        Self {
            kind,
            args: None,
            literal: None,
        }
    }

    /// A composite composition carrying resolved arguments.
    #[must_use]
    pub fn composite(kind: TypeKind, args: Vec<TypeComposition>) -> Self {
        Self {
            kind,
            args: Some(args),
            literal: None,
        }
    }

    /// A composition carrying a literal value.
    #[must_use]
    pub fn literal(kind: TypeKind, value: impl Into<LiteralValue>) -> Self {
        Self {
            kind,
            args: None,
            literal: Some(value.into()),
        }
    }

    /// The `unknown` sentinel.
    #[must_use]
    pub fn unknown() -> Self {
        Self::leaf(TypeKind::Unknown)
    }

    /// Nested arguments, empty for leaves.
    #[must_use]
    pub fn args(&self) -> &[TypeComposition] {
        self.args.as_deref().unwrap_or_default()
    }
}

/// Normalized representation of a value expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpressionMetadata {
    /// Literal or type-only record (identifiers, keywords, casts, sentinels).
    Type(TypeComposition),
    /// Array or object literal.
    Structure(StructureMetadata),
    /// `callee(args)`
    Call(CallMetadata),
    /// `new Ctor<T>(args)`
    New(NewMetadata),
    /// `left.name`
    PropertyAccess(PropertyAccessMetadata),
}

impl ExpressionMetadata {
    /// Sentinel for an unrecognized expression node kind.
    #[must_use]
    pub fn unknown(kind: &str) -> Self {
        Self::Type(TypeComposition::leaf(TypeKind::UnknownExpression(
            kind.to_owned(),
        )))
    }

    /// Boolean literal.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::Type(TypeComposition::literal(TypeKind::Boolean, value))
    }

    /// String literal carrying raw source text.
    #[must_use]
    pub fn string(raw: &str) -> Self {
        Self::Type(TypeComposition::literal(TypeKind::String, raw))
    }

    /// Type-only record tagged with an identifier name.
    #[must_use]
    pub fn identifier(name: &str) -> Self {
        Self::Type(TypeComposition::leaf(TypeKind::reference(name.trim())))
    }

    /// Returns the inner composition for `Type` records.
    #[must_use]
    pub fn as_type(&self) -> Option<&TypeComposition> {
        match self {
            Self::Type(t) => Some(t),
            _ => None,
        }
    }

    /// Returns true for the unknown-expression sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.as_type().is_some_and(|t| t.kind.is_unknown())
    }
}

/// Array or object literal: a structural tag plus its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureMetadata {
    /// [`TypeKind::Array`] or [`TypeKind::Object`].
    pub kind: TypeKind,
    /// Elements (arrays, no key) or key/value pairs (objects).
    #[serde(default)]
    pub members: Vec<StructureMember>,
}

/// One element of a [`StructureMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureMember {
    /// Property name as a string literal composition; absent for array elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<TypeComposition>,
    /// Resolved value.
    pub value: ExpressionMetadata,
}

impl StructureMember {
    /// An array element.
    #[must_use]
    pub fn element(value: ExpressionMetadata) -> Self {
        Self { key: None, value }
    }

    /// An object property `name: value`.
    #[must_use]
    pub fn property(name: &str, value: ExpressionMetadata) -> Self {
        Self {
            key: Some(TypeComposition::literal(TypeKind::String, name)),
            value,
        }
    }

    /// Property name, for object members.
    #[must_use]
    pub fn key_name(&self) -> Option<&str> {
        match self.key.as_ref()?.literal.as_ref()? {
            LiteralValue::Text(name) => Some(name),
            _ => None,
        }
    }
}

/// Call expression record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallMetadata {
    /// Resolved callee.
    pub callee: Box<ExpressionMetadata>,
    /// Resolved call arguments.
    #[serde(default)]
    pub args: Vec<ExpressionMetadata>,
}

/// Constructor (`new`) expression record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMetadata {
    /// Constructor name; `unknown` unless a simple identifier.
    pub constructor: TypeComposition,
    /// Resolved constructor type arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_args: Vec<TypeComposition>,
    /// Resolved call arguments.
    #[serde(default)]
    pub args: Vec<ExpressionMetadata>,
}

/// Property access record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAccessMetadata {
    /// Source text of the left-hand operand.
    pub expression: String,
    /// Accessed member name.
    pub name: String,
}
