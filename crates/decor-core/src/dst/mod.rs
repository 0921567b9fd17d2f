//! Decorated syntax tree
//!
//! The decorated tree mirrors the plain Go syntax tree but carries no
//! positions. Layout lives in the decoration struct of each node: spacing
//! hints around the node and comment/line-break lists in named slots between
//! its tokens. Nodes own their children, so any subtree can be cloned,
//! moved or dropped freely before the tree is restored.

mod decl;
mod decorations;
mod expr;
mod stmt;
mod visit;

pub use decl::*;
pub use decorations::*;
pub use expr::*;
pub use stmt::*;
pub use visit::{NodeRef, dump, inspect};

pub use decor_syntax::ast::ChanDir;
