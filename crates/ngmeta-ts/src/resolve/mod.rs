//! Resolvers turning type and value expression nodes into model shapes.
//!
//! Both resolvers recurse through nested nodes and stop at
//! `extractor.max_depth`, returning a sentinel and raising NGM004.

mod expressions;
mod types;

pub use expressions::{resolve_expression, DEPTH_LIMIT_KIND};
pub use types::resolve_type;

pub(crate) use expressions::object_pairs;
