//! Diagnostics raised while extracting metadata.
//!
//! Extraction never fails on an unrecognized construct. It records a
//! sentinel value and pushes a [`Diagnostic`] describing what was skipped.

use miette::SourceSpan;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Expected degradation, nothing lost that was recognizable.
    Info,
    /// A construct was not understood and replaced by a sentinel.
    Warning,
    /// A file's output was dropped.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// What went wrong. Each kind has a fixed code, rule name and severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Expression node kind with no resolver entry.
    UnknownExpression,
    /// Type node kind no resolver tier recognizes.
    UnknownType,
    /// Object literal member that is not a `key: value` pair.
    SkippedObjectMember,
    /// Nesting exceeded the configured depth.
    DepthLimit,
    /// The per-file deadline expired.
    FileTimeout,
    /// Decorator field whose value had the wrong shape.
    UnsetDecoratorField,
    /// Class or interface member that is not bucketed.
    SkippedMember,
    /// Numeric literal without a base-10 integer prefix.
    UnparsableNumber,
    /// The tree contains syntax errors.
    ParseError,
}

impl DiagnosticKind {
    /// Every kind, in code order.
    pub const ALL: [DiagnosticKind; 9] = [
        Self::UnknownExpression,
        Self::UnknownType,
        Self::SkippedObjectMember,
        Self::DepthLimit,
        Self::FileTimeout,
        Self::UnsetDecoratorField,
        Self::SkippedMember,
        Self::UnparsableNumber,
        Self::ParseError,
    ];

    /// Stable code (e.g., "NGM004").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::UnknownExpression => "NGM001",
            Self::UnknownType => "NGM002",
            Self::SkippedObjectMember => "NGM003",
            Self::DepthLimit => "NGM004",
            Self::FileTimeout => "NGM005",
            Self::UnsetDecoratorField => "NGM006",
            Self::SkippedMember => "NGM007",
            Self::UnparsableNumber => "NGM008",
            Self::ParseError => "NGM009",
        }
    }

    /// Rule name (e.g., "depth-limit").
    #[must_use]
    pub fn rule(self) -> &'static str {
        match self {
            Self::UnknownExpression => "unknown-expression",
            Self::UnknownType => "unknown-type",
            Self::SkippedObjectMember => "skipped-object-member",
            Self::DepthLimit => "depth-limit",
            Self::FileTimeout => "file-timeout",
            Self::UnsetDecoratorField => "unset-decorator-field",
            Self::SkippedMember => "skipped-member",
            Self::UnparsableNumber => "unparsable-number",
            Self::ParseError => "parse-error",
        }
    }

    /// Fixed severity of this kind.
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::SkippedObjectMember
            | Self::UnsetDecoratorField
            | Self::SkippedMember
            | Self::UnparsableNumber => Severity::Info,
            Self::UnknownExpression | Self::UnknownType | Self::DepthLimit => Severity::Warning,
            Self::FileTimeout | Self::ParseError => Severity::Error,
        }
    }

    fn help(self) -> Option<&'static str> {
        match self {
            Self::DepthLimit => Some("raise `extractor.max_depth` in ngmeta.toml"),
            Self::FileTimeout => Some("raise or remove `extractor.file_timeout_ms` in ngmeta.toml"),
            Self::UnsetDecoratorField => Some("use a literal value for this decorator field"),
            _ => None,
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as supplied by the caller.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A degradation recorded during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Where it happened.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic with the kind's default severity.
    #[must_use]
    pub fn new(kind: DiagnosticKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            location,
            message: message.into(),
        }
    }

    /// Stable code of this diagnostic.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Rule name of this diagnostic.
    #[must_use]
    pub fn rule(&self) -> &'static str {
        self.kind.rule()
    }

    /// Formats the diagnostic for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code(),
            self.rule(),
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(help) = self.kind.help() {
            let _ = writeln!(output, "  = help: {help}");
        }
        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code(),
            self.message
        )
    }
}

/// Converts a [`Diagnostic`] to a miette diagnostic for rich error display.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
pub struct DiagnosticReport {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Diagnostic> for DiagnosticReport {
    fn from(d: &Diagnostic) -> Self {
        Self {
            message: format!("[{}] {}", d.code(), d.message),
            help: d.kind.help().map(str::to_owned),
            span: SourceSpan::from((d.location.offset, d.location.length)),
            label_message: d.rule().to_owned(),
        }
    }
}

/// Counts diagnostics as `(errors, warnings, infos)`.
#[must_use]
pub fn count_by_severity(diagnostics: &[Diagnostic]) -> (usize, usize, usize) {
    diagnostics
        .iter()
        .fold((0, 0, 0), |(e, w, i), d| match d.severity {
            Severity::Error => (e + 1, w, i),
            Severity::Warning => (e, w + 1, i),
            Severity::Info => (e, w, i + 1),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic as _;

    fn make(kind: DiagnosticKind) -> Diagnostic {
        Diagnostic::new(
            kind,
            Location::new(PathBuf::from("src/app.component.ts"), 12, 5).with_span(210, 14),
            "nesting deeper than 256",
        )
    }

    #[test]
    fn codes_are_sequential_and_unique() {
        let codes: Vec<_> = DiagnosticKind::ALL.iter().map(|k| k.code()).collect();
        let expected: Vec<_> = (1..=9).map(|n| format!("NGM{n:03}")).collect();
        assert_eq!(codes, expected);
    }

    #[test]
    fn new_takes_severity_from_kind() {
        assert_eq!(make(DiagnosticKind::DepthLimit).severity, Severity::Warning);
        assert_eq!(make(DiagnosticKind::FileTimeout).severity, Severity::Error);
        assert_eq!(make(DiagnosticKind::SkippedMember).severity, Severity::Info);
    }

    #[test]
    fn display_is_single_line() {
        let display = make(DiagnosticKind::DepthLimit).to_string();
        assert_eq!(
            display,
            "src/app.component.ts:12:5: warning [NGM004] nesting deeper than 256"
        );
    }

    #[test]
    fn format_includes_help_when_kind_has_one() {
        let formatted = make(DiagnosticKind::DepthLimit).format();
        assert!(formatted.starts_with("NGM004 depth-limit at src/app.component.ts:12:5\n"));
        assert!(formatted.contains("= help: raise `extractor.max_depth`"));

        let formatted = make(DiagnosticKind::UnknownType).format();
        assert!(!formatted.contains("help:"));
    }

    #[test]
    fn report_carries_code_and_span() {
        let report = DiagnosticReport::from(&make(DiagnosticKind::DepthLimit));
        assert_eq!(report.to_string(), "[NGM004] nesting deeper than 256");
        let labels: Vec<_> = report.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 210);
        assert_eq!(labels[0].len(), 14);
        assert_eq!(labels[0].label(), Some("depth-limit"));
    }

    #[test]
    fn kind_serializes_as_rule_name() {
        let json = serde_json::to_value(make(DiagnosticKind::UnsetDecoratorField)).unwrap();
        assert_eq!(json["kind"], "unset-decorator-field");
        assert_eq!(json["severity"], "info");
    }

    #[test]
    fn counts_by_severity() {
        let diagnostics = vec![
            make(DiagnosticKind::FileTimeout),
            make(DiagnosticKind::UnknownExpression),
            make(DiagnosticKind::UnknownType),
            make(DiagnosticKind::SkippedMember),
        ];
        assert_eq!(count_by_severity(&diagnostics), (1, 2, 1));
    }
}
