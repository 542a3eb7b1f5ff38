//! # ngmeta-ts
//!
//! Tree-sitter front end for ngmeta.
//!
//! Takes parsed TypeScript trees and turns every declaration into an
//! `ngmeta-core` record:
//!
//! - [`classify`] / [`classify_file`], the single pre-order walk that routes
//!   declaration nodes to their collectors
//! - the collectors in [`collect`], one per category
//! - [`resolve_type`] and [`resolve_expression`], which normalize type
//!   annotations and value expressions
//! - [`decorators`], the decorator locator
//! - [`FileContext`], which carries the file identity, configuration,
//!   deadline and diagnostics through a run
//!
//! ## Example
//!
//! ```
//! use ngmeta_core::{Category, Config};
//! use ngmeta_ts::{classify_file, parse_typescript};
//! use std::path::Path;
//!
//! let source = "@Pipe({ name: 'upper' }) export class UpperPipe {}";
//! let tree = parse_typescript(source).unwrap();
//! let output = classify_file(Path::new("upper.pipe.ts"), source, &tree, &Config::default());
//! let categories: Vec<_> = output.records.iter().map(|r| r.category()).collect();
//! assert_eq!(categories, [Category::SourceFiles, Category::Pipes]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod classifier;
pub mod collect;
mod context;
pub mod decorators;
mod members;
mod resolve;
mod syntax;

#[cfg(test)]
mod test_support;

pub use classifier::{classify, classify_file, ClassifyError, FileOutput};
pub use context::FileContext;
pub use members::{distribute, parameters, Members};
pub use resolve::{resolve_expression, resolve_type, DEPTH_LIMIT_KIND};
pub use syntax::{parse_int_prefix, parse_typescript, strip_quotes, typescript, ParseError};
