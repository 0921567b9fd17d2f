//! Turning plain trees into decorated trees
//!
//! Decoration runs in three passes over one file:
//!
//! 1. [`fragment`] flattens the plain tree, its comments and its line table
//!    into a sequence of fragments sorted by offset;
//! 2. [`link`] assigns every comment and line break to a decoration slot;
//! 3. the converter rebuilds the tree as a [`dst`] tree, moving the linked
//!    decorations into the slots of each node and resolving identifiers
//!    that refer to other packages.
//!
//! ```ignore
//! let decorator = Decorator::new(&fset).with_resolver(GuessRefResolver);
//! let file = decorator.decorate_file(&plain)?;
//! ```

mod convert;
pub mod fragment;
pub mod link;

use decor_syntax::ast::{self, Node};
use decor_syntax::{FileSet, NodeKind, PositionError, PositionFile};
use indexmap::IndexMap;

use crate::config::DecoratorOptions;
use crate::dst::{self, Decorations, Slot};
use crate::resolver::{NoRefResolver, RefResolver};
use crate::result::Result;
use convert::Converter;

/// Identity of a plain node for the duration of a pass
///
/// Two nodes of different kinds may share an address (a statement and the
/// declaration it starts with), so the kind is part of the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    kind: NodeKind,
    addr: usize,
}

impl NodeId {
    pub fn of(node: Node<'_>) -> Self {
        Self {
            kind: node.kind(),
            addr: node.addr(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }
}

/// Linked decorations, keyed by node and slot, in link order
pub type DecorationMap = IndexMap<(NodeId, Slot), Decorations>;

/// Converts plain files of one [`FileSet`] into decorated files
pub struct Decorator<'f> {
    fset: &'f FileSet,
    resolver: Box<dyn RefResolver>,
    options: DecoratorOptions,
}

impl<'f> Decorator<'f> {
    /// A decorator that leaves every identifier local
    pub fn new(fset: &'f FileSet) -> Self {
        Self {
            fset,
            resolver: Box::new(NoRefResolver),
            options: DecoratorOptions::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: impl RefResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_options(mut self, options: DecoratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DecoratorOptions {
        &self.options
    }

    /// Decorate a single file
    ///
    /// The file's positions must belong to a file of the decorator's
    /// [`FileSet`]. With strict resolution the first resolver failure is
    /// returned once the whole file has been converted.
    pub fn decorate_file(&self, file: &ast::File) -> Result<dst::File> {
        let position = self.position_file(file)?;
        tracing::debug!("Decorating '{}'", position.name());

        let fragments = fragment::fragment_file(file, position);
        let map = link::link(&fragments)?;
        let linked = map.len();

        let mut converter = Converter::new(
            file,
            self.resolver.as_ref(),
            self.options.strict_resolution,
            map,
        );
        let decorated = converter.convert_file(file);
        let remote = converter.remote_idents();
        converter.finish()?;

        tracing::debug!(
            "Decorated '{}': {} slots filled, {} remote identifiers",
            position.name(),
            linked,
            remote
        );
        Ok(decorated)
    }

    /// Decorate every file of a package
    pub fn decorate_package(&self, package: &ast::Package) -> Result<dst::Package> {
        let mut decorated = dst::Package {
            name: package.name.clone(),
            ..Default::default()
        };
        for (name, file) in &package.files {
            decorated
                .files
                .insert(name.clone(), self.decorate_file(file)?);
        }
        tracing::debug!(
            "Decorated package '{}' ({} files)",
            package.name,
            decorated.files.len()
        );
        Ok(decorated)
    }

    fn position_file(&self, file: &ast::File) -> Result<&'f PositionFile> {
        self.fset.file(file.package).ok_or_else(|| {
            PositionError::OutOfFile {
                file: file.name.name.clone(),
                pos: file.package.get(),
                base: self.fset.base(),
                size: 0,
            }
            .into()
        })
    }
}
