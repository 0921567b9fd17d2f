//! Package names of remote identifiers and import block management

use std::collections::{BTreeMap, BTreeSet};

use decor_syntax::Token;

use crate::config::RestorerOptions;
use crate::dst::{self, Decl, DecorationSet, NodeRef, SpaceType, Spec};
use crate::error::DecorError;
use crate::resolver::{PackageResolver, guess_package_name};
use crate::result::Result;

/// Printed package names, keyed by import path
pub(super) type PackageNames = BTreeMap<String, String>;

/// Import paths referenced by remote identifiers of `file`
pub(super) fn remote_paths(file: &dst::File) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    dst::inspect(NodeRef::File(file), &mut |node| {
        if let NodeRef::Ident(ident) = node {
            if ident.is_remote() {
                paths.insert(ident.path.clone());
            }
        }
        true
    });
    paths
}

/// How the package at one path is referred to
struct Choice {
    name: String,
    /// Whether the import spec must spell the name out
    explicit: bool,
}

/// Decides which name every referenced package is printed with
pub(super) struct Naming<'r> {
    resolver: &'r dyn PackageResolver,
    options: &'r RestorerOptions,
}

impl<'r> Naming<'r> {
    pub(super) fn new(resolver: &'r dyn PackageResolver, options: &'r RestorerOptions) -> Self {
        Self { resolver, options }
    }

    /// Name the package at `path` declares
    fn package_name(&self, path: &str) -> Result<String> {
        match self.resolver.resolve_package(path) {
            Ok(name) if !name.is_empty() => Ok(name),
            Ok(_) => Err(DecorError::package_name(path, "resolver returned an empty name")),
            Err(err) if err.is_not_found() && self.options.guess_unknown_packages => {
                let guess = guess_package_name(path);
                if guess.is_empty() {
                    return Err(DecorError::package_name(path, err.to_string()));
                }
                tracing::trace!("Guessed package name '{}' for '{}'", guess, path);
                Ok(guess)
            }
            Err(err) => Err(DecorError::package_name(path, err.to_string())),
        }
    }

    /// Name forced by configuration or by an explicit import name
    fn fixed_choice(&self, file: &dst::File, path: &str) -> Result<Option<Choice>> {
        if let Some(alias) = self.options.aliases.get(path) {
            let explicit = self
                .package_name(path)
                .map_or(true, |package| package != *alias);
            return Ok(Some(Choice {
                name: alias.clone(),
                explicit,
            }));
        }
        Ok(explicit_name(file, path).map(|name| Choice {
            name: name.to_string(),
            explicit: true,
        }))
    }

    /// Printed names for `paths`, leaving the file untouched
    pub(super) fn printed(&self, file: &dst::File, paths: &BTreeSet<String>) -> Result<PackageNames> {
        let mut names = PackageNames::new();
        for path in paths {
            let name = match self.fixed_choice(file, path)? {
                Some(choice) => choice.name,
                None => self.package_name(path)?,
            };
            names.insert(path.clone(), name);
        }
        Ok(names)
    }

    /// Rewrite the import declarations of a copy of `file` so they match
    /// `paths`, returning the copy and the printed names
    pub(super) fn manage(
        &self,
        file: &dst::File,
        paths: &BTreeSet<String>,
    ) -> Result<(dst::File, PackageNames)> {
        let mut file = file.clone();
        remove_unused(&mut file, paths);

        let mut choices = BTreeMap::new();
        let mut taken = BTreeSet::new();
        let mut open = Vec::new();
        for path in paths {
            match self.fixed_choice(&file, path)? {
                Some(choice) => {
                    if choice.name != "." {
                        taken.insert(choice.name.clone());
                    }
                    choices.insert(path.clone(), choice);
                }
                None => open.push(path),
            }
        }
        for path in open {
            let package = self.package_name(path)?;
            let mut name = package.clone();
            let mut suffix = 2;
            while taken.contains(&name) {
                name = format!("{package}{suffix}");
                suffix += 1;
            }
            if name != package {
                tracing::trace!("Renamed '{}' to '{}' to avoid a conflict", path, name);
            }
            taken.insert(name.clone());
            let explicit = name != package;
            choices.insert(path.clone(), Choice { name, explicit });
        }

        let mut missing = Vec::new();
        for (path, choice) in &choices {
            let wanted = choice.explicit.then_some(choice.name.as_str());
            match import_spec_mut(&mut file, path) {
                Some(spec) => {
                    if spec.local_name() != wanted {
                        tracing::trace!("Setting import name of '{}' to {:?}", path, wanted);
                        spec.name = wanted.map(dst::Ident::new);
                    }
                }
                None => missing.push(dst::ImportSpec::new(wanted, path)),
            }
        }
        add_imports(&mut file, missing);

        let names = choices
            .into_iter()
            .map(|(path, choice)| (path, choice.name))
            .collect();
        Ok((file, names))
    }
}

/// Explicit import name of `path`, blank imports excluded
fn explicit_name<'f>(file: &'f dst::File, path: &str) -> Option<&'f str> {
    file.imports()
        .filter(|spec| spec.path_value() == path)
        .find_map(|spec| spec.local_name().filter(|name| *name != "_"))
}

fn is_side_effect(spec: &dst::ImportSpec) -> bool {
    matches!(spec.local_name(), Some("_") | Some("."))
}

fn import_decls_mut(file: &mut dst::File) -> impl Iterator<Item = &mut dst::GenDecl> {
    file.decls.iter_mut().filter_map(|decl| match decl {
        Decl::Gen(gen_decl) if gen_decl.tok == Token::Import => Some(gen_decl.as_mut()),
        _ => None,
    })
}

/// Import spec of `path` that identifiers can refer through; blank imports
/// never qualify
fn import_spec_mut<'f>(file: &'f mut dst::File, path: &str) -> Option<&'f mut dst::ImportSpec> {
    import_decls_mut(file)
        .flat_map(|decl| decl.specs.iter_mut())
        .find_map(|spec| match spec {
            Spec::Import(import)
                if import.path_value() == path && import.local_name() != Some("_") =>
            {
                Some(import.as_mut())
            }
            _ => None,
        })
}

/// Drop imports nothing refers to; blank and dot imports stay
fn remove_unused(file: &mut dst::File, paths: &BTreeSet<String>) {
    for decl in import_decls_mut(file) {
        decl.specs.retain(|spec| match spec {
            Spec::Import(import) => {
                let keep = is_side_effect(import) || paths.contains(import.path_value());
                if !keep {
                    tracing::trace!("Removing unused import '{}'", import.path_value());
                }
                keep
            }
            _ => true,
        });
    }
    file.decls.retain(|decl| match decl {
        Decl::Gen(gen_decl) => gen_decl.tok != Token::Import || !gen_decl.specs.is_empty(),
        _ => true,
    });
}

/// Append `specs` to the first import declaration, creating one when the
/// file has none
fn add_imports(file: &mut dst::File, specs: Vec<dst::ImportSpec>) {
    if specs.is_empty() {
        return;
    }
    for spec in &specs {
        tracing::trace!("Adding import '{}'", spec.path_value());
    }

    let Some(decl) = import_decls_mut(file).next() else {
        let mut decl = dst::GenDecl::new(
            Token::Import,
            specs.into_iter().map(|spec| Spec::Import(Box::new(spec))).collect(),
        );
        if decl.specs.len() > 1 {
            parenthesize(&mut decl);
        }
        decl.decs.before = SpaceType::EmptyLine;
        decl.decs.after = SpaceType::EmptyLine;
        file.decls.insert(0, Decl::Gen(Box::new(decl)));
        return;
    };

    decl.specs
        .extend(specs.into_iter().map(|spec| Spec::Import(Box::new(spec))));
    parenthesize(decl);
}

/// Group the specs of `decl` in parentheses, one per line
fn parenthesize(decl: &mut dst::GenDecl) {
    decl.lparen = true;
    for spec in &mut decl.specs {
        let decs = spec.decs_mut();
        if decs.before() == SpaceType::None {
            decs.set_before(SpaceType::NewLine);
        }
        if decs.after() == SpaceType::None {
            decs.set_after(SpaceType::NewLine);
        }
    }
}
