//! Decor Syntax
//!
//! Go tokens, position tables and plain syntax trees.
//!
//! This crate is the interface the decoration engine shares with a Go
//! parser and printer: a parser produces an [`ast::File`] together with a
//! [`position::FileSet`], and a printer consumes the same pair. The trees
//! in [`ast`] carry absolute positions; the line tables in [`position`]
//! translate them into lines and columns.

pub mod ast;
pub mod position;
pub mod token;

pub use ast::{Node, NodeKind};
pub use position::{File as PositionFile, FileSet, Position, PositionError};
pub use token::{Pos, Token};
