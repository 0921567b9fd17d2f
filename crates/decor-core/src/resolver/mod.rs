//! Identifier and package resolution
//!
//! Two seams decide how qualified identifiers cross the boundary between
//! plain and decorated trees:
//!
//! - a [`RefResolver`] tells the decorator which package an identifier
//!   refers to, so `fmt.Println` can become a single identifier carrying the
//!   import path `fmt`;
//! - a [`PackageResolver`] tells the restorer which name a package declares,
//!   so the identifier can be printed qualified again.

mod guess;
mod types;

use decor_syntax::ast;
use thiserror::Error;

pub use guess::{GuessPackageResolver, GuessRefResolver};
pub use types::{MapPackageResolver, TypeInfoRefResolver};

/// Errors raised by resolvers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("package not found: {0}")]
    NotFound(String),

    #[error("ambiguous reference: {0}")]
    Ambiguous(String),

    #[error("identifier '{0}' may refer to a dot-imported package")]
    UnsupportedDotImport(String),

    #[error("{0}")]
    Other(String),
}

impl ResolveError {
    /// Whether the resolver simply does not know the subject
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound(_))
    }
}

/// Maps identifiers of a plain tree to the import path of the package that
/// declares them
pub trait RefResolver {
    /// Import path of the package `ident` refers to, or an empty string for
    /// local identifiers
    ///
    /// `parent` is the node holding the identifier and `field` the name of
    /// the child position it occupies (`"X"` for a selector operand).
    fn resolve_ident(
        &self,
        file: &ast::File,
        parent: ast::Node<'_>,
        field: &str,
        ident: &ast::Ident,
    ) -> Result<String, ResolveError>;
}

/// Maps import paths to the names their packages declare
pub trait PackageResolver {
    fn resolve_package(&self, path: &str) -> Result<String, ResolveError>;
}

/// Never resolves anything; every identifier stays local
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRefResolver;

impl RefResolver for NoRefResolver {
    fn resolve_ident(
        &self,
        _file: &ast::File,
        _parent: ast::Node<'_>,
        _field: &str,
        _ident: &ast::Ident,
    ) -> Result<String, ResolveError> {
        Ok(String::new())
    }
}

impl<R: RefResolver + ?Sized> RefResolver for Box<R> {
    fn resolve_ident(
        &self,
        file: &ast::File,
        parent: ast::Node<'_>,
        field: &str,
        ident: &ast::Ident,
    ) -> Result<String, ResolveError> {
        (**self).resolve_ident(file, parent, field, ident)
    }
}

impl<R: PackageResolver + ?Sized> PackageResolver for Box<R> {
    fn resolve_package(&self, path: &str) -> Result<String, ResolveError> {
        (**self).resolve_package(path)
    }
}

/// Best guess at the name declared by the package at `path`
///
/// Uses the last path element. A major version element (`/v2`) defers to the
/// element before it; `.vN` suffixes, a `go-` prefix and a `-go` suffix are
/// dropped and remaining `-` or `.` become `_`.
pub fn guess_package_name(path: &str) -> String {
    let mut segments = path.trim_end_matches('/').rsplit('/');
    let mut name = segments.next().unwrap_or_default();
    if is_major_version(name) {
        if let Some(previous) = segments.next() {
            name = previous;
        }
    }

    if let Some((stem, version)) = name.rsplit_once('.') {
        if is_major_version(version) {
            name = stem;
        }
    }
    let name = name.strip_prefix("go-").unwrap_or(name);
    let name = name.strip_suffix("-go").unwrap_or(name);

    name.chars()
        .map(|c| if c == '-' || c == '.' { '_' } else { c })
        .collect()
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
