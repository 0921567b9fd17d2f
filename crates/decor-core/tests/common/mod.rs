//! Shared helpers for the decor-core integration tests
//!
//! Plain trees are built by hand against a source text, so every position
//! is the offset of a snippet of that text.

#![allow(dead_code)]

use decor_core::dst;
use decor_core::{Decorator, GuessRefResolver, Restorer};
use decor_syntax::ast;
use decor_syntax::{FileSet, Pos, PositionFile, Token};

/// Source text of a plain tree built in a test
pub struct Source {
    pub name: &'static str,
    pub text: &'static str,
    pub base: usize,
}

impl Source {
    /// Source registered first in a fresh file set
    pub fn new(name: &'static str, text: &'static str) -> Self {
        Self::at(name, text, 1)
    }

    pub fn at(name: &'static str, text: &'static str, base: usize) -> Self {
        Self { name, text, base }
    }

    /// Position of the first occurrence of `needle`
    pub fn pos(&self, needle: &str) -> Pos {
        let index = self
            .text
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} not found in {}", self.name));
        Pos::new(self.base + index)
    }

    /// Identifier `name` at the first occurrence of `needle`
    pub fn ident(&self, needle: &str, name: &str) -> ast::Ident {
        ast::Ident::at(self.pos(needle), name)
    }

    /// String literal at the first occurrence of its quoted text
    pub fn string(&self, quoted: &str) -> ast::BasicLit {
        ast::BasicLit {
            value_pos: self.pos(quoted),
            kind: Token::String,
            value: quoted.to_string(),
        }
    }

    /// Comment group holding `texts`, each at its first occurrence
    pub fn group(&self, texts: &[&str]) -> ast::CommentGroup {
        ast::CommentGroup {
            list: texts
                .iter()
                .map(|text| ast::Comment::new(self.pos(text), *text))
                .collect(),
        }
    }

    /// A file set holding this source alone
    pub fn fset(&self) -> FileSet {
        let mut fset = FileSet::new();
        self.register(&mut fset);
        fset
    }

    /// Add the line table of this source to `fset`
    pub fn register(&self, fset: &mut FileSet) {
        assert_eq!(fset.base(), self.base, "{} registered out of order", self.name);
        fset.add(PositionFile::from_source(self.name, self.base, self.text))
            .unwrap();
    }

    /// `func <name>() { ... }` at the first `func <name>(` of the source
    pub fn func(&self, name: &str, body: ast::BlockStmt) -> ast::Decl {
        let func = self.pos(&format!("func {name}("));
        let name = ast::Ident::at(func.offset(5), name);
        let lparen = name.end();
        ast::Decl::Func(Box::new(ast::FuncDecl {
            recv: None,
            name,
            typ: ast::FuncType {
                func,
                type_params: None,
                params: ast::FieldList {
                    opening: lparen,
                    list: vec![],
                    closing: lparen.offset(1),
                },
                results: None,
            },
            body: Some(body),
        }))
    }

    /// `<name>()` as an expression statement, at the first `<name>()`
    pub fn call_stmt(&self, name: &str) -> ast::Stmt {
        let fun = self.ident(&format!("{name}()"), name);
        let lparen = fun.end();
        ast::Stmt::Expr(Box::new(ast::ExprStmt {
            x: ast::Expr::Call(Box::new(ast::CallExpr {
                fun: fun.into(),
                lparen,
                args: vec![],
                ellipsis: Pos::NONE,
                rparen: lparen.offset(1),
            })),
        }))
    }

    /// File opening with `package <name>`
    pub fn file(
        &self,
        package: &str,
        decls: Vec<ast::Decl>,
        comments: Vec<ast::CommentGroup>,
    ) -> ast::File {
        let keyword = self.pos("package ");
        ast::File {
            package: keyword,
            name: ast::Ident::at(keyword.offset(8), package),
            decls,
            comments,
        }
    }

    /// `{ ... }` spanning from the first `{` after `from` to the last `}`
    pub fn block(&self, from: &str, list: Vec<ast::Stmt>) -> ast::BlockStmt {
        let start = self.pos(from).get() - self.base;
        let lbrace = start + self.text[start..].find('{').unwrap();
        let rbrace = self.text.rfind('}').unwrap();
        ast::BlockStmt {
            lbrace: Pos::new(self.base + lbrace),
            list,
            rbrace: Pos::new(self.base + rbrace),
        }
    }
}

/// Decorate with import-based reference resolution
pub fn decorate(fset: &FileSet, file: &ast::File) -> dst::File {
    Decorator::new(fset)
        .with_resolver(GuessRefResolver)
        .decorate_file(file)
        .unwrap()
}

/// Restore into a fresh file set
pub fn restore(file: &dst::File) -> (ast::File, FileSet) {
    let mut restorer = Restorer::new();
    let restored = restorer.restore_file("main.go", file).unwrap();
    (restored, restorer.into_fset())
}

/// Restore, then decorate the result again
pub fn round_trip(file: &dst::File) -> dst::File {
    let (plain, fset) = restore(file);
    decorate(&fset, &plain)
}

/// Comment texts of a plain file in position order
pub fn comment_texts(file: &ast::File) -> Vec<String> {
    file.comments
        .iter()
        .flat_map(|group| &group.list)
        .map(|comment| comment.text.clone())
        .collect()
}

/// Line of `pos` in the only file of `fset`
pub fn line(fset: &FileSet, pos: Pos) -> usize {
    fset.position(pos).line
}

pub fn func_body(file: &dst::File, index: usize) -> &dst::BlockStmt {
    match &file.decls[index] {
        dst::Decl::Func(func) => func.body.as_ref().unwrap(),
        other => panic!("expected function declaration, got {other:?}"),
    }
}

pub fn func_body_mut(file: &mut dst::File, index: usize) -> &mut dst::BlockStmt {
    match &mut file.decls[index] {
        dst::Decl::Func(func) => func.body.as_mut().unwrap(),
        other => panic!("expected function declaration, got {other:?}"),
    }
}

pub fn plain_func_body(file: &ast::File, index: usize) -> &ast::BlockStmt {
    match &file.decls[index] {
        ast::Decl::Func(func) => func.body.as_ref().unwrap(),
        other => panic!("expected function declaration, got {other:?}"),
    }
}
