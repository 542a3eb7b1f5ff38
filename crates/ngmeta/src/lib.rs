//! # ngmeta
//!
//! Declaration metadata extraction for Angular-style TypeScript sources.
//!
//! This is the facade crate: it re-exports the model from `ngmeta-core` and
//! the tree-sitter front end from `ngmeta-ts`, and adds the multi-file
//! [`Extractor`] and config discovery.
//!
//! ## Programmatic Usage
//!
//! ```
//! use ngmeta::{Category, Extractor};
//!
//! let extractor = Extractor::builder().build()?;
//! let result = extractor.extract_sources([(
//!     "src/app/foo-bar.component.ts",
//!     "@Component({ selector: 'foo-bar' }) export class FooBarComponent {}",
//! )])?;
//!
//! assert_eq!(result.model.identifiers(Category::Components), ["FooBarComponent"]);
//! let json = result.model.to_json_pretty()?;
//! assert!(json.contains("\"selector\": \"foo-bar\""));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration
//!
//! `ngmeta.toml` (or `.ngmeta.toml`) in the directory passed to
//! [`ExtractorBuilder::root`]:
//!
//! ```toml
//! [extractor]
//! max_depth = 256
//! file_timeout_ms = 2000
//!
//! [decorators]
//! AppComponent = "component"
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod discovery;
mod extractor;

pub use discovery::{find_config, load_config, CONFIG_CANDIDATES};
pub use extractor::{ExtractError, ExtractionResult, Extractor, ExtractorBuilder, SourceUnit};

// Re-export the model and the tree-sitter front end
pub use ngmeta_core::*;
pub use ngmeta_ts::{
    classify, classify_file, parse_typescript, resolve_expression, resolve_type, ClassifyError,
    FileContext, FileOutput, ParseError,
};

/// Collectors, one per declaration category.
pub mod collect {
    pub use ngmeta_ts::collect::*;
}
