//! Collectors: one per declaration category.
//!
//! Each collector takes the declaration node and returns a finished record.
//! Collectors never fail; unsupported sub-constructs degrade to sentinels
//! and diagnostics on the [`FileContext`].

mod class;
mod decorated;
mod enums;
mod interface;
mod source_file;
mod type_alias;

pub use class::{collect_class, ANONYMOUS_CLASS};
pub use decorated::{
    collect_component, collect_directive, collect_injectable, collect_module, collect_pipe,
    REFERENCE_TYPES,
};
pub use enums::collect_enum;
pub use interface::collect_interface;
pub use source_file::collect_source_file;
pub use type_alias::collect_type_alias;

use ngmeta_core::{DeclarationRecord, DecoratorKind};
use tree_sitter::Node;

use crate::context::FileContext;

/// Runs the collector for a framework decorator kind.
pub fn collect_decorated(
    ctx: &mut FileContext<'_>,
    node: Node<'_>,
    kind: DecoratorKind,
) -> DeclarationRecord {
    match kind {
        DecoratorKind::Component => collect_component(ctx, node).into(),
        DecoratorKind::Directive => collect_directive(ctx, node).into(),
        DecoratorKind::Injectable => collect_injectable(ctx, node).into(),
        DecoratorKind::Module => collect_module(ctx, node).into(),
        DecoratorKind::Pipe => collect_pipe(ctx, node).into(),
    }
}
