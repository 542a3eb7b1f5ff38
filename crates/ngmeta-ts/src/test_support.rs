//! Parsing harness for unit tests.

use ngmeta_core::{Config, DecoratorKind, DiagnosticKind};
use std::path::PathBuf;
use tree_sitter::Node;

use crate::context::FileContext;
use crate::syntax::parse_typescript;

pub(crate) struct Harness {
    source: String,
    path: PathBuf,
    config: Config,
}

impl Harness {
    pub(crate) fn new(source: &str) -> Self {
        Self {
            source: source.to_owned(),
            path: PathBuf::from("src/app/test.ts"),
            config: Config::default(),
        }
    }

    pub(crate) fn max_depth(mut self, depth: usize) -> Self {
        self.config.extractor.max_depth = depth;
        self
    }

    pub(crate) fn alias(mut self, name: &str, kind: DecoratorKind) -> Self {
        self.config.decorators.insert(name.to_owned(), kind);
        self
    }

    /// Parses the source and runs `f` against a fresh context, returning its
    /// result and the kinds of the diagnostics it raised.
    pub(crate) fn run<T>(
        &self,
        f: impl FnOnce(&mut FileContext<'_>, Node<'_>) -> T,
    ) -> (T, Vec<DiagnosticKind>) {
        let tree = parse_typescript(&self.source).unwrap();
        let mut ctx = FileContext::new(&self.path, &self.source, &self.config);
        let output = f(&mut ctx, tree.root_node());
        let kinds = ctx.diagnostics().iter().map(|d| d.kind).collect();
        (output, kinds)
    }
}

/// First node of `kind` in pre-order.
pub(crate) fn find_first<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    if node.kind() == kind {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(|child| find_first(child, kind))
}
