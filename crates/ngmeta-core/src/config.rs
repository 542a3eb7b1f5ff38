//! Configuration types for ngmeta.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::accumulator::Category;

/// Top-level configuration, loaded from `ngmeta.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Extractor limits.
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Extra decorator names treated as a framework decorator kind.
    #[serde(default)]
    pub decorators: HashMap<String, DecoratorKind>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `max_depth` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extractor.max_depth == 0 {
            return Err(ConfigError::Invalid {
                key: "extractor.max_depth".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Resolves a decorator name to a framework kind, checking canonical
    /// names before configured aliases.
    #[must_use]
    pub fn decorator_kind(&self, name: &str) -> Option<DecoratorKind> {
        DecoratorKind::from_canonical(name).or_else(|| self.decorators.get(name).copied())
    }
}

/// Extractor-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum nesting the type and expression resolvers descend into.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Per-file time limit in milliseconds; unlimited when absent.
    #[serde(default)]
    pub file_timeout_ms: Option<u64>,
}

impl ExtractorConfig {
    /// Per-file time limit as a [`Duration`].
    #[must_use]
    pub fn file_timeout(&self) -> Option<Duration> {
        self.file_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            file_timeout_ms: None,
        }
    }
}

fn default_max_depth() -> usize {
    256
}

/// Framework decorator kinds recognized on classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoratorKind {
    /// `@Component`
    Component,
    /// `@Directive`
    Directive,
    /// `@Injectable`
    Injectable,
    /// `@NgModule`
    Module,
    /// `@Pipe`
    Pipe,
}

impl DecoratorKind {
    /// Kinds in the order a class with several decorators is classified.
    pub const PRIORITY: [DecoratorKind; 5] = [
        Self::Component,
        Self::Directive,
        Self::Pipe,
        Self::Module,
        Self::Injectable,
    ];

    /// Decorator name as written in source.
    #[must_use]
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Component => "Component",
            Self::Directive => "Directive",
            Self::Injectable => "Injectable",
            Self::Module => "NgModule",
            Self::Pipe => "Pipe",
        }
    }

    /// Parses a canonical decorator name.
    #[must_use]
    pub fn from_canonical(name: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|kind| kind.canonical_name() == name)
    }

    /// Model category records of this kind are stored under.
    #[must_use]
    pub fn category(self) -> Category {
        match self {
            Self::Component => Category::Components,
            Self::Directive => Category::Directives,
            Self::Injectable => Category::Injectables,
            Self::Module => Category::Modules,
            Self::Pipe => Category::Pipes,
        }
    }
}

impl std::fmt::Display for DecoratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A value parsed but is out of range.
    #[error("Invalid config value for {key}: {message}")]
    Invalid {
        /// Dotted key of the offending value.
        key: String,
        /// What is wrong with it.
        message: String,
    },
}
