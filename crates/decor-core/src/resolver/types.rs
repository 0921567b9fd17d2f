//! Resolution backed by externally supplied knowledge

use std::collections::HashMap;

use decor_syntax::{Pos, ast};

use super::{PackageResolver, RefResolver, ResolveError};

/// Resolves identifiers from type-checker output
///
/// `uses` maps the position of every identifier that refers to a
/// package-level object (a package name or a symbol reached through a dot
/// import) to the import path of the declaring package. References into the
/// package being decorated stay local.
#[derive(Debug, Clone, Default)]
pub struct TypeInfoRefResolver {
    uses: HashMap<Pos, String>,
    local_path: String,
}

impl TypeInfoRefResolver {
    pub fn new(local_path: impl Into<String>) -> Self {
        Self {
            uses: HashMap::new(),
            local_path: local_path.into(),
        }
    }

    /// Record that the identifier at `pos` refers into the package at `path`
    pub fn with_use(mut self, pos: Pos, path: impl Into<String>) -> Self {
        self.insert(pos, path);
        self
    }

    pub fn insert(&mut self, pos: Pos, path: impl Into<String>) {
        self.uses.insert(pos, path.into());
    }
}

impl RefResolver for TypeInfoRefResolver {
    fn resolve_ident(
        &self,
        _file: &ast::File,
        _parent: ast::Node<'_>,
        _field: &str,
        ident: &ast::Ident,
    ) -> Result<String, ResolveError> {
        match self.uses.get(&ident.pos()) {
            Some(path) if *path != self.local_path => Ok(path.clone()),
            _ => Ok(String::new()),
        }
    }
}

/// Package names from a fixed table
#[derive(Debug, Clone, Default)]
pub struct MapPackageResolver {
    names: HashMap<String, String>,
}

impl MapPackageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(path.into(), name.into());
        self
    }
}

impl<P: Into<String>, N: Into<String>> FromIterator<(P, N)> for MapPackageResolver {
    fn from_iter<I: IntoIterator<Item = (P, N)>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(path, name)| (path.into(), name.into()))
                .collect(),
        }
    }
}

impl PackageResolver for MapPackageResolver {
    fn resolve_package(&self, path: &str) -> Result<String, ResolveError> {
        self.names
            .get(path)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(path.to_string()))
    }
}
