//! Declarations and specifications

use super::{BasicLit, BlockStmt, Expr, FieldList, FuncType, Ident};
use crate::token::{Pos, Token};

/// Top-level declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Bad(BadDecl),
    Gen(Box<GenDecl>),
    Func(Box<FuncDecl>),
}

impl Decl {
    pub fn pos(&self) -> Pos {
        match self {
            Decl::Bad(d) => d.from,
            Decl::Gen(d) => d.tok_pos,
            Decl::Func(d) => d.pos(),
        }
    }

    pub fn end(&self) -> Pos {
        match self {
            Decl::Bad(d) => d.to,
            Decl::Gen(d) => d.end(),
            Decl::Func(d) => d.end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BadDecl {
    pub from: Pos,
    pub to: Pos,
}

/// `import`, `const`, `type` or `var` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub tok_pos: Pos,
    pub tok: Token,
    /// Position of `(` for grouped declarations
    pub lparen: Pos,
    pub specs: Vec<Spec>,
    pub rparen: Pos,
}

impl GenDecl {
    pub fn end(&self) -> Pos {
        if self.rparen.is_valid() {
            return self.rparen.offset(1);
        }
        match self.specs.first() {
            Some(spec) => spec.end(),
            None => self.tok_pos.offset(self.tok.width()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub recv: Option<FieldList>,
    pub name: Ident,
    /// Signature; its `func` position is the keyword of the declaration
    pub typ: FuncType,
    pub body: Option<BlockStmt>,
}

impl FuncDecl {
    pub fn pos(&self) -> Pos {
        self.typ.pos()
    }

    pub fn end(&self) -> Pos {
        match &self.body {
            Some(body) => body.end(),
            None => self.typ.end(),
        }
    }
}

/// Specification inside a [`GenDecl`]
#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Import(Box<ImportSpec>),
    Value(Box<ValueSpec>),
    Type(Box<TypeSpec>),
}

impl Spec {
    pub fn pos(&self) -> Pos {
        match self {
            Spec::Import(s) => s.pos(),
            Spec::Value(s) => s.names.first().map_or(Pos::NONE, Ident::pos),
            Spec::Type(s) => s.name.pos(),
        }
    }

    pub fn end(&self) -> Pos {
        match self {
            Spec::Import(s) => s.end(),
            Spec::Value(s) => s.end(),
            Spec::Type(s) => s.typ.end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    /// Local name, `.` or `_`
    pub name: Option<Ident>,
    pub path: BasicLit,
    pub end_pos: Pos,
}

impl ImportSpec {
    pub fn pos(&self) -> Pos {
        match &self.name {
            Some(name) => name.pos(),
            None => self.path.pos(),
        }
    }

    pub fn end(&self) -> Pos {
        if self.end_pos.is_valid() {
            self.end_pos
        } else {
            self.path.end()
        }
    }

    /// Import path with its quotes removed
    pub fn path_value(&self) -> &str {
        unquote(&self.path.value)
    }
}

/// `const` or `var` specification
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub typ: Option<Expr>,
    pub values: Vec<Expr>,
}

impl ValueSpec {
    pub fn end(&self) -> Pos {
        if let Some(value) = self.values.last() {
            return value.end();
        }
        if let Some(typ) = &self.typ {
            return typ.end();
        }
        self.names.last().map_or(Pos::NONE, Ident::end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Ident,
    pub type_params: Option<FieldList>,
    /// Position of `=` for alias declarations
    pub assign: Pos,
    pub typ: Expr,
}

/// Strip the quotes of an interpreted or raw string literal
pub fn unquote(literal: &str) -> &str {
    let trimmed = literal.strip_prefix('"').and_then(|s| s.strip_suffix('"'));
    let trimmed = trimmed.or_else(|| literal.strip_prefix('`').and_then(|s| s.strip_suffix('`')));
    trimmed.unwrap_or(literal)
}
