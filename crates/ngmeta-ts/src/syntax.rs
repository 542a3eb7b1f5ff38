//! Tree-sitter helpers shared by the resolvers and collectors.

use tree_sitter::{Language, Node, Parser, Tree};

/// Errors from [`parse_typescript`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load the TypeScript grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser returned no tree.
    #[error("tree-sitter returned no tree")]
    NoTree,
}

/// The TypeScript grammar.
#[must_use]
pub fn typescript() -> Language {
    tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
}

/// Parses TypeScript source into a tree.
///
/// Extraction itself never parses text; this exists so callers and tests
/// can produce trees without wiring the grammar by hand.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded or parsing yields no tree.
pub fn parse_typescript(source: &str) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&typescript())?;
    parser.parse(source, None).ok_or(ParseError::NoTree)
}

/// Source text of a node.
pub(crate) fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Named children, skipping comments.
pub(crate) fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

/// First named, non-comment child.
pub(crate) fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    first
}

/// Children of a given kind, named or anonymous.
pub(crate) fn children_of_kind<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node
        .children(&mut cursor)
        .filter(|child| child.kind() == kind)
        .collect();
    children
}

/// Whether the node has a direct child token of the given kind
/// (e.g. `static`, `get`, `?`).
pub(crate) fn has_token(node: Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == kind);
    found
}

/// Strips one matching pair of delimiting quotes (`'`, `"`, `` ` ``).
///
/// Quote characters inside the delimiters are content and are kept. Text
/// without a matching pair is returned unchanged.
#[must_use]
pub fn strip_quotes(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(&open), Some(&close))
            if bytes.len() >= 2 && open == close && matches!(open, b'\'' | b'"' | b'`') =>
        {
            &raw[1..raw.len() - 1]
        }
        _ => raw,
    }
}

/// Parses the base-10 integer prefix of a numeric literal.
///
/// Mirrors `parseInt(text, 10)`: leading whitespace and one sign are
/// accepted, parsing stops at the first non-digit, and `None` is returned
/// when no digit precedes it or the value does not fit an `i64`.
#[must_use]
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Names of the generic parameters declared on a node.
pub(crate) fn type_parameter_names(node: Node<'_>, source: &str) -> Vec<String> {
    let Some(params) = node.child_by_field_name("type_parameters") else {
        return Vec::new();
    };
    named_children(params)
        .into_iter()
        .filter(|p| p.kind() == "type_parameter")
        .filter_map(|p| p.child_by_field_name("name"))
        .map(|name| text(name, source).to_owned())
        .collect()
}

/// Name of a member (`foo`, `'foo'`, `#foo`), quotes stripped.
pub(crate) fn member_name(node: Node<'_>, source: &str) -> Option<String> {
    let name = node.child_by_field_name("name")?;
    Some(strip_quotes(text(name, source)).to_owned())
}
