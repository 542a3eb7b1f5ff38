//! Per-file extraction context.

use ngmeta_core::{Config, Diagnostic, DiagnosticKind, Location, Severity};
use std::path::Path;
use std::time::Instant;
use tree_sitter::Node;

use crate::syntax;

/// State shared by every resolver and collector while one file is classified.
///
/// Holds the file's identity and source, the active configuration, the
/// per-file deadline, and the diagnostics raised so far.
#[derive(Debug)]
pub struct FileContext<'a> {
    /// Path of the file as supplied by the caller.
    pub path: &'a Path,
    /// File contents.
    pub source: &'a str,
    /// Active configuration.
    pub config: &'a Config,
    deadline: Option<Instant>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> FileContext<'a> {
    /// Creates a context whose deadline starts now, per
    /// `extractor.file_timeout_ms`.
    #[must_use]
    pub fn new(path: &'a Path, source: &'a str, config: &'a Config) -> Self {
        let deadline = config
            .extractor
            .file_timeout()
            .and_then(|timeout| Instant::now().checked_add(timeout));
        Self {
            path,
            source,
            config,
            deadline,
            diagnostics: Vec::new(),
        }
    }

    /// Overrides the deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Returns true once the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Maximum resolver nesting.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.config.extractor.max_depth
    }

    /// File name used as the source-file record identifier.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// Source text of a node.
    #[must_use]
    pub fn text(&self, node: Node<'_>) -> &'a str {
        syntax::text(node, self.source)
    }

    /// Location of a node in this file.
    #[must_use]
    pub fn location(&self, node: Node<'_>) -> Location {
        let start = node.start_position();
        Location::new(self.path.to_path_buf(), start.row + 1, start.column + 1)
            .with_span(node.start_byte(), node.end_byte() - node.start_byte())
    }

    /// Records a diagnostic at `node` and logs it.
    pub fn report(&mut self, kind: DiagnosticKind, node: Node<'_>, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(kind, self.location(node), message);
        match diagnostic.severity {
            Severity::Info => tracing::debug!(
                code = diagnostic.code(),
                file = %diagnostic.location.file.display(),
                line = diagnostic.location.line,
                "{}",
                diagnostic.message
            ),
            Severity::Warning | Severity::Error => tracing::warn!(
                code = diagnostic.code(),
                file = %diagnostic.location.file.display(),
                line = diagnostic.location.line,
                "{}",
                diagnostic.message
            ),
        }
        self.diagnostics.push(diagnostic);
    }

    /// Diagnostics raised so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the context, returning its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
