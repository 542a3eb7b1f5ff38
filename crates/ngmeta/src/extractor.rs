//! Multi-file extraction runner.

use ngmeta_core::{
    count_by_severity, Config, ConfigError, Diagnostic, DiagnosticReport, RootMetadataModel,
    Severity,
};
use ngmeta_ts::{classify_file, parse_typescript, ClassifyError, ParseError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use tree_sitter::Tree;

use crate::discovery::load_config;

/// Errors that can occur during extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Source text could not be turned into a tree.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parser error.
        source: ParseError,
    },

    /// A file exceeded its timeout and the extractor was told to fail on it.
    #[error(transparent)]
    Timeout(#[from] ClassifyError),
}

/// One input file: its path, its text and the tree parsed from that text.
#[derive(Debug)]
pub struct SourceUnit {
    /// Path recorded on every record from this file.
    pub path: PathBuf,
    /// File contents.
    pub source: String,
    /// Tree parsed from `source`.
    pub tree: Tree,
}

impl SourceUnit {
    /// Wraps an already parsed tree.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>, tree: Tree) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            tree,
        }
    }

    /// Parses `source` with the TypeScript grammar.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Parse`] if the grammar cannot be loaded or no
    /// tree is produced.
    pub fn parse(
        path: impl Into<PathBuf>,
        source: impl Into<String>,
    ) -> Result<Self, ExtractError> {
        let path = path.into();
        let source = source.into();
        let tree = parse_typescript(&source).map_err(|source| ExtractError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, source, tree })
    }
}

/// Builder for configuring an [`Extractor`].
#[derive(Debug, Default)]
pub struct ExtractorBuilder {
    root: Option<PathBuf>,
    config_path: Option<PathBuf>,
    config: Option<Config>,
    max_depth: Option<usize>,
    file_timeout: Option<Duration>,
    fail_on_timeout: bool,
}

impl ExtractorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory searched for `ngmeta.toml` / `.ngmeta.toml`.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Explicit config file, resolved against the root when relative.
    #[must_use]
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Sets the configuration directly, skipping discovery.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides `extractor.max_depth`.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Overrides `extractor.file_timeout_ms`.
    #[must_use]
    pub fn file_timeout(mut self, timeout: Duration) -> Self {
        self.file_timeout = Some(timeout);
        self
    }

    /// Sets whether a timed-out file aborts the run (default: false).
    #[must_use]
    pub fn fail_on_timeout(mut self, fail: bool) -> Self {
        self.fail_on_timeout = fail;
        self
    }

    /// Builds the extractor.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be loaded or the final
    /// configuration is invalid.
    pub fn build(self) -> Result<Extractor, ExtractError> {
        let mut config = match self.config {
            Some(config) => config,
            None if self.root.is_some() || self.config_path.is_some() => {
                let root = self.root.unwrap_or_else(|| PathBuf::from("."));
                load_config(&root, self.config_path.as_deref())?
            }
            None => Config::default(),
        };

        if let Some(depth) = self.max_depth {
            config.extractor.max_depth = depth;
        }
        if let Some(timeout) = self.file_timeout {
            let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            config.extractor.file_timeout_ms = Some(millis);
        }
        config.validate()?;

        Ok(Extractor {
            config,
            fail_on_timeout: self.fail_on_timeout,
        })
    }
}

/// Runs the classifier over a set of files and folds their records into one
/// [`RootMetadataModel`].
///
/// Use [`Extractor::builder()`] to construct an instance.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: Config,
    fail_on_timeout: bool,
}

impl Extractor {
    /// Creates a new builder for configuring an extractor.
    #[must_use]
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extracts every unit, in input order.
    ///
    /// Each file is classified into its own buffer and merged only when it
    /// completes, so a timed-out file contributes diagnostics but no records.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Timeout`] when a file times out and
    /// [`ExtractorBuilder::fail_on_timeout`] is set.
    pub fn extract(&self, units: &[SourceUnit]) -> Result<ExtractionResult, ExtractError> {
        info!("Starting extraction of {} files", units.len());
        let mut result = ExtractionResult::new();

        for unit in units {
            debug!("Extracting: {}", unit.path.display());
            let output = classify_file(&unit.path, &unit.source, &unit.tree, &self.config);
            result.diagnostics.extend(output.diagnostics);

            if let Some(timeout) = output.timeout {
                warn!("Timed out: {}", unit.path.display());
                result.files_failed += 1;
                if self.fail_on_timeout {
                    return Err(timeout.into());
                }
                continue;
            }

            result.model.extend(output.records);
            result.files_processed += 1;
        }

        info!(
            "Extraction complete: {} records from {} files ({} failed), {} diagnostics",
            result.model.total(),
            result.files_processed,
            result.files_failed,
            result.diagnostics.len()
        );
        Ok(result)
    }

    /// Parses and extracts `(path, source)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed, or as
    /// [`Extractor::extract`].
    pub fn extract_sources<I, P, S>(&self, sources: I) -> Result<ExtractionResult, ExtractError>
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: Into<String>,
    {
        let units = sources
            .into_iter()
            .map(|(path, source)| SourceUnit::parse(path, source))
            .collect::<Result<Vec<_>, _>>()?;
        self.extract(&units)
    }

    /// Reads and extracts files from disk.
    ///
    /// A file that cannot be read is logged and counted in
    /// [`ExtractionResult::files_failed`].
    ///
    /// # Errors
    ///
    /// As [`Extractor::extract_sources`].
    pub fn extract_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<ExtractionResult, ExtractError> {
        let mut unreadable = 0;
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            match std::fs::read_to_string(path) {
                Ok(source) => sources.push((path.to_path_buf(), source)),
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    unreadable += 1;
                }
            }
        }
        let mut result = self.extract_sources(sources)?;
        result.files_failed += unreadable;
        Ok(result)
    }
}

/// Outcome of an extraction run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionResult {
    /// Records from every completed file.
    pub model: RootMetadataModel,
    /// Diagnostics from every file, in input order.
    pub diagnostics: Vec<Diagnostic>,
    /// Files whose records were merged.
    pub files_processed: usize,
    /// Files that timed out or could not be read.
    pub files_failed: usize,
}

impl ExtractionResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns true if any diagnostic is a warning or an error.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity >= Severity::Warning)
    }

    /// Diagnostics of one severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    /// Diagnostics at or above `severity` as miette reports.
    #[must_use]
    pub fn reports(&self, severity: Severity) -> Vec<DiagnosticReport> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity >= severity)
            .map(DiagnosticReport::from)
            .collect()
    }

    /// Formats diagnostics at or above `min_severity` with a summary line.
    #[must_use]
    pub fn format_report(&self, min_severity: Severity) -> String {
        use std::fmt::Write;

        let (errors, warnings, infos) = count_by_severity(&self.diagnostics);
        let mut output = String::new();
        for diagnostic in self.diagnostics.iter().filter(|d| d.severity >= min_severity) {
            output.push_str(&diagnostic.format());
        }
        let _ = writeln!(
            output,
            "ngmeta: {} records from {} files ({} failed); {} error(s), {} warning(s), {} info(s)",
            self.model.total(),
            self.files_processed,
            self.files_failed,
            errors,
            warnings,
            infos
        );
        output
    }
}
