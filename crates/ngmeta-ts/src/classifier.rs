//! Node classifier: walks a tree once and routes each declaration node to
//! its collector.

use ngmeta_core::{Config, DeclarationRecord, Diagnostic, DiagnosticKind, RecordSink};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Tree};

use crate::collect::{
    collect_class, collect_decorated, collect_enum, collect_interface, collect_source_file,
    collect_type_alias,
};
use crate::context::FileContext;
use crate::decorators::framework_decorator;

/// Errors that abort classification of a file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// The per-file deadline passed before the walk finished.
    #[error("{path}: classification exceeded the per-file timeout after {visited} nodes")]
    Timeout {
        /// File being classified.
        path: String,
        /// Nodes visited before the deadline was noticed.
        visited: usize,
    },
}

/// Walks `root` in pre-order and appends one record per declaration to
/// `sink`.
///
/// The walk uses a [`tree_sitter::TreeCursor`] rather than recursion, so
/// deeply nested sources cannot exhaust the stack. The context deadline is
/// checked before every node.
///
/// # Errors
///
/// Returns [`ClassifyError::Timeout`] when the deadline passes. Records
/// appended before that point stay in `sink`.
pub fn classify(
    ctx: &mut FileContext<'_>,
    root: Node<'_>,
    sink: &mut impl RecordSink,
) -> Result<(), ClassifyError> {
    let mut cursor = root.walk();
    let mut visited = 0usize;
    loop {
        if ctx.is_expired() {
            return Err(ClassifyError::Timeout {
                path: ctx.path.display().to_string(),
                visited,
            });
        }
        visited += 1;
        if let Some(record) = visit(ctx, cursor.node()) {
            sink.append(record);
        }

        if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return Ok(());
            }
        }
    }
}

fn visit(ctx: &mut FileContext<'_>, node: Node<'_>) -> Option<DeclarationRecord> {
    let record = match node.kind() {
        "program" => collect_source_file(ctx, node).into(),
        "class_declaration" | "abstract_class_declaration" => class_like(ctx, node),
        // The `class` keyword token shares the expression's kind name.
        "class" if node.is_named() => class_like(ctx, node),
        "interface_declaration" => collect_interface(ctx, node).into(),
        "enum_declaration" => collect_enum(ctx, node).into(),
        "type_alias_declaration" => collect_type_alias(ctx, node).into(),
        _ => return None,
    };
    Some(record)
}

fn class_like(ctx: &mut FileContext<'_>, node: Node<'_>) -> DeclarationRecord {
    match framework_decorator(ctx, node) {
        Some((kind, _)) => collect_decorated(ctx, node, kind),
        None => collect_class(ctx, node).into(),
    }
}

/// Records and diagnostics produced for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutput {
    /// File the output belongs to.
    pub path: PathBuf,
    /// Records in discovery order. Empty when the file timed out.
    pub records: Vec<DeclarationRecord>,
    /// Diagnostics raised while classifying.
    pub diagnostics: Vec<Diagnostic>,
    /// Set when the per-file deadline cut the walk short.
    pub timeout: Option<ClassifyError>,
}

impl FileOutput {
    /// Returns true if the file timed out.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.timeout.is_some()
    }
}

/// Classifies one parsed file into its own buffer.
///
/// A tree containing syntax errors is still classified (tree-sitter recovers
/// locally) and raises NGM009. A file that times out keeps none of its
/// records and raises NGM005.
#[must_use]
pub fn classify_file(path: &Path, source: &str, tree: &Tree, config: &Config) -> FileOutput {
    let root = tree.root_node();
    let mut ctx = FileContext::new(path, source, config);
    if root.has_error() {
        ctx.report(
            DiagnosticKind::ParseError,
            first_error(root),
            "source contains syntax errors; records may be incomplete",
        );
    }

    let mut records = Vec::new();
    let timeout = classify(&mut ctx, root, &mut records).err();
    if let Some(err) = &timeout {
        records.clear();
        ctx.report(DiagnosticKind::FileTimeout, root, err.to_string());
    }

    tracing::debug!(
        file = %path.display(),
        records = records.len(),
        timed_out = timeout.is_some(),
        "classified file"
    );
    FileOutput {
        path: path.to_path_buf(),
        records,
        diagnostics: ctx.into_diagnostics(),
        timeout,
    }
}

/// First `ERROR` or missing node in pre-order, falling back to `root`.
fn first_error(root: Node<'_>) -> Node<'_> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return node;
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return root;
            }
        }
    }
}
