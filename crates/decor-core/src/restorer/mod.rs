//! Turning decorated trees back into plain trees
//!
//! The restorer walks a decorated file in the same per-kind order the
//! decorator reads plain files. It synthesizes a position for every token,
//! writes decorations as comments and line breaks, and registers the line
//! table of the result in its own [`FileSet`]. A printer can then lay out
//! the plain tree with its comments where they were.
//!
//! Remote identifiers are printed qualified with the name of their package.
//! With [`RestorerOptions::manage_imports`] the import block is rewritten to
//! match the packages the file refers to.

mod cursor;
mod imports;
mod nodes;

use decor_syntax::ast;
use decor_syntax::FileSet;

use crate::config::RestorerOptions;
use crate::dst;
use crate::resolver::{GuessPackageResolver, PackageResolver};
use crate::result::Result;
use imports::Naming;
use nodes::Restore;

/// Converts decorated files into plain files positioned in one [`FileSet`]
pub struct Restorer {
    fset: FileSet,
    resolver: Box<dyn PackageResolver>,
    options: RestorerOptions,
}

impl Default for Restorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Restorer {
    /// A restorer with an empty file set that guesses package names
    pub fn new() -> Self {
        Self {
            fset: FileSet::new(),
            resolver: Box::new(GuessPackageResolver),
            options: RestorerOptions::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: impl PackageResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_options(mut self, options: RestorerOptions) -> Self {
        self.options = options;
        self
    }

    /// Restore into an existing file set
    pub fn with_fset(mut self, fset: FileSet) -> Self {
        self.fset = fset;
        self
    }

    pub fn options(&self) -> &RestorerOptions {
        &self.options
    }

    /// File set holding the line tables of every restored file
    pub fn fset(&self) -> &FileSet {
        &self.fset
    }

    pub fn into_fset(self) -> FileSet {
        self.fset
    }

    /// Restore a single file and register it as `name`
    pub fn restore_file(&mut self, name: &str, file: &dst::File) -> Result<ast::File> {
        tracing::debug!("Restoring '{}'", name);
        let paths = imports::remote_paths(file);
        let naming = Naming::new(self.resolver.as_ref(), &self.options);

        let managed;
        let (file, names) = if self.options.manage_imports {
            let (edited, names) = naming.manage(file, &paths)?;
            managed = edited;
            (&managed, names)
        } else {
            (file, naming.printed(file, &paths)?)
        };

        let mut restore = Restore::new(self.fset.base(), &names);
        let mut restored = restore.file(file);
        let (comments, position) = restore.finish(name);
        restored.comments = comments;

        let position = self.fset.add(position)?;
        tracing::debug!(
            "Restored '{}': {} bytes, {} lines, {} comment groups, {} packages referenced",
            name,
            position.size(),
            position.line_count(),
            restored.comments.len(),
            names.len()
        );
        Ok(restored)
    }

    /// Restore every file of a package, in file name order
    pub fn restore_package(&mut self, package: &dst::Package) -> Result<ast::Package> {
        let mut restored = ast::Package {
            name: package.name.clone(),
            ..Default::default()
        };
        for (name, file) in &package.files {
            let file = self.restore_file(name, file)?;
            restored.files.insert(name.clone(), file);
        }
        tracing::debug!(
            "Restored package '{}' ({} files)",
            package.name,
            restored.files.len()
        );
        Ok(restored)
    }
}
