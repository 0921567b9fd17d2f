//! Decorated declarations, fields, files and packages

use std::collections::BTreeMap;

use decor_syntax::ast::unquote;
use decor_syntax::Token;

use super::decorations::*;
use super::{BasicLit, BlockStmt, Expr, FuncType, Ident};

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Bad(Box<BadDecl>),
    Gen(Box<GenDecl>),
    Func(Box<FuncDecl>),
}

impl Decl {
    pub fn decs(&self) -> &dyn DecorationSet {
        match self {
            Decl::Bad(d) => &d.decs,
            Decl::Gen(d) => &d.decs,
            Decl::Func(d) => &d.decs,
        }
    }

    pub fn decs_mut(&mut self) -> &mut dyn DecorationSet {
        match self {
            Decl::Bad(d) => &mut d.decs,
            Decl::Gen(d) => &mut d.decs,
            Decl::Func(d) => &mut d.decs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BadDecl {
    pub length: usize,
    pub decs: BadDeclDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub tok: Token,
    /// Whether the specs are grouped in parentheses
    pub lparen: bool,
    pub specs: Vec<Spec>,
    pub decs: GenDeclDecs,
}

impl GenDecl {
    pub fn new(tok: Token, specs: Vec<Spec>) -> Self {
        Self {
            tok,
            lparen: false,
            specs,
            decs: GenDeclDecs::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub recv: Option<FieldList>,
    pub name: Ident,
    /// Signature; its own decorations are not printed
    pub typ: FuncType,
    pub body: Option<BlockStmt>,
    pub decs: FuncDeclDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Import(Box<ImportSpec>),
    Value(Box<ValueSpec>),
    Type(Box<TypeSpec>),
}

impl Spec {
    pub fn decs(&self) -> &dyn DecorationSet {
        match self {
            Spec::Import(s) => &s.decs,
            Spec::Value(s) => &s.decs,
            Spec::Type(s) => &s.decs,
        }
    }

    pub fn decs_mut(&mut self) -> &mut dyn DecorationSet {
        match self {
            Spec::Import(s) => &mut s.decs,
            Spec::Value(s) => &mut s.decs,
            Spec::Type(s) => &mut s.decs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportSpec {
    pub name: Option<Ident>,
    pub path: BasicLit,
    pub decs: ImportSpecDecs,
}

impl ImportSpec {
    pub fn new(name: Option<&str>, path: &str) -> Self {
        Self {
            name: name.map(Ident::new),
            path: BasicLit::string(path),
            decs: ImportSpecDecs::default(),
        }
    }

    /// Import path with its quotes removed
    pub fn path_value(&self) -> &str {
        unquote(&self.path.value)
    }

    /// Explicit local name, if any
    pub fn local_name(&self) -> Option<&str> {
        self.name.as_ref().map(|name| name.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub typ: Option<Expr>,
    pub values: Vec<Expr>,
    pub decs: ValueSpecDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Ident,
    pub type_params: Option<FieldList>,
    /// Alias declaration, `type A = B`
    pub assign: bool,
    pub typ: Expr,
    pub decs: TypeSpecDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub names: Vec<Ident>,
    pub typ: Expr,
    pub tag: Option<BasicLit>,
    pub decs: FieldDecs,
}

impl Field {
    pub fn new(names: Vec<Ident>, typ: impl Into<Expr>) -> Self {
        Self {
            names,
            typ: typ.into(),
            tag: None,
            decs: FieldDecs::default(),
        }
    }
}

/// Fields with optional enclosing brackets
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    pub opening: bool,
    pub list: Vec<Field>,
    pub closing: bool,
    pub decs: FieldListDecs,
}

impl FieldList {
    /// A bracketed list
    pub fn new(list: Vec<Field>) -> Self {
        Self {
            opening: true,
            list,
            closing: true,
            decs: FieldListDecs::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub name: Ident,
    pub decls: Vec<Decl>,
    pub decs: FileDecs,
}

impl File {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Ident::new(name),
            decls: Vec::new(),
            decs: FileDecs::default(),
        }
    }

    /// Import specs of every import declaration, in order
    pub fn imports(&self) -> impl Iterator<Item = &ImportSpec> {
        self.decls
            .iter()
            .filter_map(|decl| match decl {
                Decl::Gen(gen_decl) if gen_decl.tok == Token::Import => Some(&gen_decl.specs),
                _ => None,
            })
            .flatten()
            .filter_map(|spec| match spec {
                Spec::Import(import) => Some(import.as_ref()),
                _ => None,
            })
    }
}

/// Decorated files of one package, keyed by file name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Package {
    pub name: String,
    pub files: BTreeMap<String, File>,
}
