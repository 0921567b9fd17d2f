//! Resolution by inspecting the imports of a file

use decor_syntax::ast;

use super::{PackageResolver, RefResolver, ResolveError, guess_package_name};

/// Resolves selector operands against the imports of the file
///
/// An operand matches an import when it equals the explicit import name, or,
/// for imports without one, the name guessed from the import path. Without
/// type information a bare identifier cannot be told apart from a symbol of a
/// dot-imported package, so exported bare identifiers in a file with dot
/// imports are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuessRefResolver;

impl GuessRefResolver {
    fn resolve_operand(file: &ast::File, name: &str) -> Result<String, ResolveError> {
        let explicit: Vec<_> = file
            .imports()
            .filter(|spec| spec.name.as_ref().is_some_and(|n| n.name == name))
            .collect();
        match explicit.as_slice() {
            [spec] => return Ok(spec.path_value().to_string()),
            [_, _, ..] => return Err(ResolveError::Ambiguous(name.to_string())),
            [] => {}
        }

        let guessed: Vec<_> = file
            .imports()
            .filter(|spec| spec.name.is_none() && guess_package_name(spec.path_value()) == name)
            .collect();
        match guessed.as_slice() {
            [spec] => Ok(spec.path_value().to_string()),
            [_, _, ..] => Err(ResolveError::Ambiguous(name.to_string())),
            [] => Ok(String::new()),
        }
    }
}

impl RefResolver for GuessRefResolver {
    fn resolve_ident(
        &self,
        file: &ast::File,
        parent: ast::Node<'_>,
        field: &str,
        ident: &ast::Ident,
    ) -> Result<String, ResolveError> {
        match parent {
            ast::Node::SelectorExpr(_) if field == "X" => Self::resolve_operand(file, &ident.name),
            ast::Node::KeyValueExpr(_) if field == "Key" => Ok(String::new()),
            _ => {
                let dot_import = file
                    .imports()
                    .any(|spec| spec.name.as_ref().is_some_and(|n| n.name == "."));
                if dot_import && ident.is_exported() {
                    return Err(ResolveError::UnsupportedDotImport(ident.name.clone()));
                }
                Ok(String::new())
            }
        }
    }
}

/// Guesses the package name from the import path
#[derive(Debug, Clone, Copy, Default)]
pub struct GuessPackageResolver;

impl PackageResolver for GuessPackageResolver {
    fn resolve_package(&self, path: &str) -> Result<String, ResolveError> {
        let name = guess_package_name(path);
        if name.is_empty() {
            return Err(ResolveError::NotFound(path.to_string()));
        }
        Ok(name)
    }
}
