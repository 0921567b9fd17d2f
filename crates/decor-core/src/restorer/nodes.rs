//! Per-kind restoration of decorated nodes
//!
//! Every kind is written in the same order the fragmenter reads it, so a
//! restored file decorates back into the tree it came from.

use decor_syntax::ast::{self, ChanDir, CommentGroup};
use decor_syntax::{Pos, PositionFile, Token};

use super::cursor::Cursor;
use super::imports::PackageNames;
use crate::dst::{self, DecorationSet, Decorations};
use crate::resolver::guess_package_name;

pub(super) struct Restore<'n> {
    cursor: Cursor,
    names: &'n PackageNames,
}

impl<'n> Restore<'n> {
    pub(super) fn new(base: usize, names: &'n PackageNames) -> Self {
        Self {
            cursor: Cursor::new(base),
            names,
        }
    }

    /// Comment groups and line table of everything restored so far
    pub(super) fn finish(self, name: &str) -> (Vec<CommentGroup>, PositionFile) {
        self.cursor.finish(name)
    }

    fn open(&mut self, decs: &dyn DecorationSet) {
        self.cursor.ensure(decs.before().newlines());
        self.cursor.decorations(decs.start());
    }

    fn close(&mut self, decs: &dyn DecorationSet) {
        self.cursor.decorations(decs.end());
        self.cursor.ensure(decs.after().newlines());
    }

    fn slot(&mut self, decorations: &Decorations) {
        self.cursor.decorations(decorations);
    }

    /// Restore a file; its comment list is filled in by [`Restore::finish`]
    pub(super) fn file(&mut self, n: &dst::File) -> ast::File {
        self.open(&n.decs);
        let package = self.cursor.token(Token::Package);
        self.slot(&n.decs.package);
        let name = self.ident(&n.name);
        self.slot(&n.decs.name);
        let decls = n.decls.iter().map(|decl| self.decl(decl)).collect();
        self.close(&n.decs);
        ast::File {
            package,
            name,
            decls,
            comments: Vec::new(),
        }
    }

    /// Identifier in a name position
    fn ident(&mut self, n: &dst::Ident) -> ast::Ident {
        self.open(&n.decs);
        let pos = self.cursor.text(&n.name);
        self.slot(&n.decs.x);
        self.close(&n.decs);
        ast::Ident::at(pos, n.name.clone())
    }

    fn idents(&mut self, list: &[dst::Ident]) -> Vec<ast::Ident> {
        list.iter().map(|ident| self.ident(ident)).collect()
    }

    /// Identifier in an expression position, qualified when remote
    fn expr_ident(&mut self, n: &dst::Ident) -> ast::Expr {
        if !n.is_remote() {
            return ast::Expr::Ident(self.ident(n));
        }
        let package = self
            .names
            .get(&n.path)
            .cloned()
            .unwrap_or_else(|| guess_package_name(&n.path));
        if package == "." {
            return ast::Expr::Ident(self.ident(n));
        }

        self.open(&n.decs);
        let x = self.cursor.text(&package);
        self.slot(&n.decs.x);
        self.cursor.skip(Token::Period);
        let sel = self.cursor.text(&n.name);
        self.close(&n.decs);
        ast::Expr::Selector(Box::new(ast::SelectorExpr {
            x: ast::Expr::Ident(ast::Ident::at(x, package)),
            sel: ast::Ident::at(sel, n.name.clone()),
        }))
    }

    fn basic_lit(&mut self, n: &dst::BasicLit) -> ast::BasicLit {
        self.open(&n.decs);
        let value_pos = self.cursor.text(&n.value);
        self.close(&n.decs);
        ast::BasicLit {
            value_pos,
            kind: n.kind,
            value: n.value.clone(),
        }
    }

    /// Raw span of a bad node
    fn bad(&mut self, decs: &dyn DecorationSet, length: usize) -> (Pos, Pos) {
        self.open(decs);
        let span = self.cursor.span(length);
        self.close(decs);
        span
    }

    fn exprs(&mut self, list: &[dst::Expr]) -> Vec<ast::Expr> {
        list.iter().map(|expr| self.expr(expr)).collect()
    }

    /// Optional expression followed by its slot when present
    fn opt_expr(&mut self, expr: Option<&dst::Expr>, slot: &Decorations) -> Option<ast::Expr> {
        let expr = self.expr(expr?);
        self.slot(slot);
        Some(expr)
    }

    fn expr(&mut self, expr: &dst::Expr) -> ast::Expr {
        match expr {
            dst::Expr::Bad(n) => {
                let (from, to) = self.bad(&n.decs, n.length);
                ast::Expr::Bad(ast::BadExpr { from, to })
            }
            dst::Expr::Ident(n) => self.expr_ident(n),
            dst::Expr::Ellipsis(n) => {
                self.open(&n.decs);
                let ellipsis = self.cursor.token(Token::Ellipsis);
                self.slot(&n.decs.ellipsis);
                let elt = n.elt.as_ref().map(|elt| self.expr(elt));
                self.close(&n.decs);
                ast::Expr::Ellipsis(Box::new(ast::Ellipsis { ellipsis, elt }))
            }
            dst::Expr::BasicLit(n) => ast::Expr::BasicLit(self.basic_lit(n)),
            dst::Expr::FuncLit(n) => {
                self.open(&n.decs);
                let typ = self.func_type(&n.typ);
                self.slot(&n.decs.typ);
                let body = self.block(&n.body);
                self.close(&n.decs);
                ast::Expr::FuncLit(Box::new(ast::FuncLit { typ, body }))
            }
            dst::Expr::CompositeLit(n) => {
                self.open(&n.decs);
                let typ = self.opt_expr(n.typ.as_ref(), &n.decs.typ);
                let lbrace = self.cursor.token(Token::LBrace);
                self.slot(&n.decs.lbrace);
                let elts = self.exprs(&n.elts);
                let rbrace = self.cursor.token(Token::RBrace);
                self.close(&n.decs);
                ast::Expr::CompositeLit(Box::new(ast::CompositeLit {
                    typ,
                    lbrace,
                    elts,
                    rbrace,
                    incomplete: n.incomplete,
                }))
            }
            dst::Expr::Paren(n) => {
                self.open(&n.decs);
                let lparen = self.cursor.token(Token::LParen);
                self.slot(&n.decs.lparen);
                let x = self.expr(&n.x);
                self.slot(&n.decs.x);
                let rparen = self.cursor.token(Token::RParen);
                self.close(&n.decs);
                ast::Expr::Paren(Box::new(ast::ParenExpr { lparen, x, rparen }))
            }
            dst::Expr::Selector(n) => {
                self.open(&n.decs);
                let x = self.expr(&n.x);
                self.slot(&n.decs.x);
                self.cursor.skip(Token::Period);
                let sel = self.ident(&n.sel);
                self.close(&n.decs);
                ast::Expr::Selector(Box::new(ast::SelectorExpr { x, sel }))
            }
            dst::Expr::Index(n) => {
                self.open(&n.decs);
                let x = self.expr(&n.x);
                self.slot(&n.decs.x);
                let lbrack = self.cursor.token(Token::LBrack);
                self.slot(&n.decs.lbrack);
                let index = self.expr(&n.index);
                self.slot(&n.decs.index);
                let rbrack = self.cursor.token(Token::RBrack);
                self.close(&n.decs);
                ast::Expr::Index(Box::new(ast::IndexExpr {
                    x,
                    lbrack,
                    index,
                    rbrack,
                }))
            }
            dst::Expr::IndexList(n) => {
                self.open(&n.decs);
                let x = self.expr(&n.x);
                self.slot(&n.decs.x);
                let lbrack = self.cursor.token(Token::LBrack);
                self.slot(&n.decs.lbrack);
                let indices = self.exprs(&n.indices);
                self.slot(&n.decs.indices);
                let rbrack = self.cursor.token(Token::RBrack);
                self.close(&n.decs);
                ast::Expr::IndexList(Box::new(ast::IndexListExpr {
                    x,
                    lbrack,
                    indices,
                    rbrack,
                }))
            }
            dst::Expr::Slice(n) => {
                self.open(&n.decs);
                let x = self.expr(&n.x);
                self.slot(&n.decs.x);
                let lbrack = self.cursor.token(Token::LBrack);
                self.slot(&n.decs.lbrack);
                let low = self.opt_expr(n.low.as_ref(), &n.decs.low);
                self.cursor.skip(Token::Colon);
                let high = self.opt_expr(n.high.as_ref(), &n.decs.high);
                if n.slice3 {
                    self.cursor.skip(Token::Colon);
                }
                let max = self.opt_expr(n.max.as_ref(), &n.decs.max);
                let rbrack = self.cursor.token(Token::RBrack);
                self.close(&n.decs);
                ast::Expr::Slice(Box::new(ast::SliceExpr {
                    x,
                    lbrack,
                    low,
                    high,
                    max,
                    slice3: n.slice3,
                    rbrack,
                }))
            }
            dst::Expr::TypeAssert(n) => {
                self.open(&n.decs);
                let x = self.expr(&n.x);
                self.slot(&n.decs.x);
                self.cursor.skip(Token::Period);
                let lparen = self.cursor.token(Token::LParen);
                self.slot(&n.decs.lparen);
                let typ = match &n.typ {
                    Some(typ) => Some(self.expr(typ)),
                    None => {
                        self.cursor.skip(Token::Type);
                        None
                    }
                };
                self.slot(&n.decs.typ);
                let rparen = self.cursor.token(Token::RParen);
                self.close(&n.decs);
                ast::Expr::TypeAssert(Box::new(ast::TypeAssertExpr {
                    x,
                    lparen,
                    typ,
                    rparen,
                }))
            }
            dst::Expr::Call(n) => ast::Expr::Call(Box::new(self.call(n))),
            dst::Expr::Star(n) => {
                self.open(&n.decs);
                let star = self.cursor.token(Token::Mul);
                self.slot(&n.decs.star);
                let x = self.expr(&n.x);
                self.close(&n.decs);
                ast::Expr::Star(Box::new(ast::StarExpr { star, x }))
            }
            dst::Expr::Unary(n) => {
                self.open(&n.decs);
                let op_pos = self.cursor.token(n.op);
                self.slot(&n.decs.op);
                let x = self.expr(&n.x);
                self.close(&n.decs);
                ast::Expr::Unary(Box::new(ast::UnaryExpr {
                    op_pos,
                    op: n.op,
                    x,
                }))
            }
            dst::Expr::Binary(n) => {
                self.open(&n.decs);
                let x = self.expr(&n.x);
                self.slot(&n.decs.x);
                let op_pos = self.cursor.token(n.op);
                self.slot(&n.decs.op);
                let y = self.expr(&n.y);
                self.close(&n.decs);
                ast::Expr::Binary(Box::new(ast::BinaryExpr {
                    x,
                    op_pos,
                    op: n.op,
                    y,
                }))
            }
            dst::Expr::KeyValue(n) => {
                self.open(&n.decs);
                let key = self.expr(&n.key);
                self.slot(&n.decs.key);
                let colon = self.cursor.token(Token::Colon);
                self.slot(&n.decs.colon);
                let value = self.expr(&n.value);
                self.close(&n.decs);
                ast::Expr::KeyValue(Box::new(ast::KeyValueExpr { key, colon, value }))
            }
            dst::Expr::ArrayType(n) => {
                self.open(&n.decs);
                let lbrack = self.cursor.token(Token::LBrack);
                self.slot(&n.decs.lbrack);
                let len = n.len.as_ref().map(|len| self.expr(len));
                self.cursor.skip(Token::RBrack);
                self.slot(&n.decs.len);
                let elt = self.expr(&n.elt);
                self.close(&n.decs);
                ast::Expr::ArrayType(Box::new(ast::ArrayType { lbrack, len, elt }))
            }
            dst::Expr::StructType(n) => {
                self.open(&n.decs);
                let struct_pos = self.cursor.token(Token::Struct);
                self.slot(&n.decs.struct_);
                let fields = self.field_list(&n.fields, Token::LBrace, Token::RBrace);
                self.close(&n.decs);
                ast::Expr::StructType(Box::new(ast::StructType {
                    struct_pos,
                    fields,
                    incomplete: n.incomplete,
                }))
            }
            dst::Expr::FuncType(n) => ast::Expr::FuncType(Box::new(self.func_type(n))),
            dst::Expr::InterfaceType(n) => {
                self.open(&n.decs);
                let interface = self.cursor.token(Token::Interface);
                self.slot(&n.decs.interface);
                let methods = self.field_list(&n.methods, Token::LBrace, Token::RBrace);
                self.close(&n.decs);
                ast::Expr::InterfaceType(Box::new(ast::InterfaceType {
                    interface,
                    methods,
                    incomplete: n.incomplete,
                }))
            }
            dst::Expr::MapType(n) => {
                self.open(&n.decs);
                let map = self.cursor.token(Token::Map);
                self.cursor.skip(Token::LBrack);
                self.slot(&n.decs.map);
                let key = self.expr(&n.key);
                self.cursor.skip(Token::RBrack);
                self.slot(&n.decs.key);
                let value = self.expr(&n.value);
                self.close(&n.decs);
                ast::Expr::MapType(Box::new(ast::MapType { map, key, value }))
            }
            dst::Expr::ChanType(n) => {
                self.open(&n.decs);
                let (begin, mut arrow) = if n.dir == ChanDir::Recv {
                    let begin = self.cursor.token(Token::Arrow);
                    self.cursor.skip(Token::Chan);
                    (begin, begin)
                } else {
                    (self.cursor.token(Token::Chan), Pos::NONE)
                };
                self.slot(&n.decs.begin);
                if n.dir == ChanDir::Send {
                    arrow = self.cursor.token(Token::Arrow);
                    self.slot(&n.decs.arrow);
                }
                let value = self.expr(&n.value);
                self.close(&n.decs);
                ast::Expr::ChanType(Box::new(ast::ChanType {
                    begin,
                    arrow,
                    dir: n.dir,
                    value,
                }))
            }
        }
    }

    fn call(&mut self, n: &dst::CallExpr) -> ast::CallExpr {
        self.open(&n.decs);
        let fun = self.expr(&n.fun);
        self.slot(&n.decs.fun);
        let lparen = self.cursor.token(Token::LParen);
        self.slot(&n.decs.lparen);
        let args = self.exprs(&n.args);
        let ellipsis = if n.ellipsis {
            let pos = self.cursor.token(Token::Ellipsis);
            self.slot(&n.decs.ellipsis);
            pos
        } else {
            Pos::NONE
        };
        let rparen = self.cursor.token(Token::RParen);
        self.close(&n.decs);
        ast::CallExpr {
            fun,
            lparen,
            args,
            ellipsis,
            rparen,
        }
    }

    fn func_type(&mut self, n: &dst::FuncType) -> ast::FuncType {
        self.open(&n.decs);
        let func = if n.func {
            let pos = self.cursor.token(Token::Func);
            self.slot(&n.decs.func);
            pos
        } else {
            Pos::NONE
        };
        let type_params = n.type_params.as_ref().map(|list| {
            let list = self.field_list(list, Token::LBrack, Token::RBrack);
            self.slot(&n.decs.type_params);
            list
        });
        let params = self.field_list(&n.params, Token::LParen, Token::RParen);
        self.slot(&n.decs.params);
        let results = n
            .results
            .as_ref()
            .map(|list| self.field_list(list, Token::LParen, Token::RParen));
        self.close(&n.decs);
        ast::FuncType {
            func,
            type_params,
            params,
            results,
        }
    }

    fn field_list(&mut self, n: &dst::FieldList, open: Token, close: Token) -> ast::FieldList {
        self.open(&n.decs);
        let opening = if n.opening {
            let pos = self.cursor.token(open);
            self.slot(&n.decs.opening);
            pos
        } else {
            Pos::NONE
        };
        let list = n.list.iter().map(|field| self.field(field)).collect();
        let closing = if n.closing {
            self.cursor.token(close)
        } else {
            Pos::NONE
        };
        self.close(&n.decs);
        ast::FieldList {
            opening,
            list,
            closing,
        }
    }

    fn field(&mut self, n: &dst::Field) -> ast::Field {
        self.open(&n.decs);
        let names = self.idents(&n.names);
        let typ = self.expr(&n.typ);
        let tag = n.tag.as_ref().map(|tag| {
            self.slot(&n.decs.typ);
            self.basic_lit(tag)
        });
        self.close(&n.decs);
        ast::Field { names, typ, tag }
    }

    fn block(&mut self, n: &dst::BlockStmt) -> ast::BlockStmt {
        self.open(&n.decs);
        let lbrace = self.cursor.token(Token::LBrace);
        self.slot(&n.decs.lbrace);
        let list = self.stmts(&n.list);
        let rbrace = self.cursor.token(Token::RBrace);
        self.close(&n.decs);
        ast::BlockStmt {
            lbrace,
            list,
            rbrace,
        }
    }

    fn stmts(&mut self, list: &[dst::Stmt]) -> Vec<ast::Stmt> {
        list.iter().map(|stmt| self.stmt(stmt)).collect()
    }

    /// Init statement of an `if` or `switch` header
    fn init(&mut self, init: Option<&dst::Stmt>, slot: &Decorations) -> Option<ast::Stmt> {
        let init = self.stmt(init?);
        self.cursor.skip(Token::Semicolon);
        self.slot(slot);
        Some(init)
    }

    fn stmt(&mut self, stmt: &dst::Stmt) -> ast::Stmt {
        match stmt {
            dst::Stmt::Bad(n) => {
                let (from, to) = self.bad(&n.decs, n.length);
                ast::Stmt::Bad(ast::BadStmt { from, to })
            }
            dst::Stmt::Decl(n) => {
                self.open(&n.decs);
                let decl = self.gen_decl(&n.decl);
                self.close(&n.decs);
                ast::Stmt::Decl(Box::new(ast::DeclStmt { decl }))
            }
            dst::Stmt::Empty(n) => {
                self.open(&n.decs);
                let semicolon = if n.implicit {
                    self.cursor.pos()
                } else {
                    self.cursor.token(Token::Semicolon)
                };
                self.close(&n.decs);
                ast::Stmt::Empty(ast::EmptyStmt {
                    semicolon,
                    implicit: n.implicit,
                })
            }
            dst::Stmt::Labeled(n) => {
                self.open(&n.decs);
                let label = self.ident(&n.label);
                self.slot(&n.decs.label);
                let colon = self.cursor.token(Token::Colon);
                self.slot(&n.decs.colon);
                let stmt = self.stmt(&n.stmt);
                self.close(&n.decs);
                ast::Stmt::Labeled(Box::new(ast::LabeledStmt { label, colon, stmt }))
            }
            dst::Stmt::Expr(n) => {
                self.open(&n.decs);
                let x = self.expr(&n.x);
                self.close(&n.decs);
                ast::Stmt::Expr(Box::new(ast::ExprStmt { x }))
            }
            dst::Stmt::Send(n) => {
                self.open(&n.decs);
                let chan = self.expr(&n.chan);
                self.slot(&n.decs.chan);
                let arrow = self.cursor.token(Token::Arrow);
                self.slot(&n.decs.arrow);
                let value = self.expr(&n.value);
                self.close(&n.decs);
                ast::Stmt::Send(Box::new(ast::SendStmt { chan, arrow, value }))
            }
            dst::Stmt::IncDec(n) => {
                self.open(&n.decs);
                let x = self.expr(&n.x);
                self.slot(&n.decs.x);
                let tok_pos = self.cursor.token(n.tok);
                self.close(&n.decs);
                ast::Stmt::IncDec(Box::new(ast::IncDecStmt {
                    x,
                    tok_pos,
                    tok: n.tok,
                }))
            }
            dst::Stmt::Assign(n) => {
                self.open(&n.decs);
                let lhs = self.exprs(&n.lhs);
                self.slot(&n.decs.lhs);
                let tok_pos = self.cursor.token(n.tok);
                self.slot(&n.decs.tok);
                let rhs = self.exprs(&n.rhs);
                self.close(&n.decs);
                ast::Stmt::Assign(Box::new(ast::AssignStmt {
                    lhs,
                    tok_pos,
                    tok: n.tok,
                    rhs,
                }))
            }
            dst::Stmt::Go(n) => {
                self.open(&n.decs);
                let go = self.cursor.token(Token::Go);
                self.slot(&n.decs.go);
                let call = self.call(&n.call);
                self.close(&n.decs);
                ast::Stmt::Go(Box::new(ast::GoStmt { go, call }))
            }
            dst::Stmt::Defer(n) => {
                self.open(&n.decs);
                let defer = self.cursor.token(Token::Defer);
                self.slot(&n.decs.defer);
                let call = self.call(&n.call);
                self.close(&n.decs);
                ast::Stmt::Defer(Box::new(ast::DeferStmt { defer, call }))
            }
            dst::Stmt::Return(n) => {
                self.open(&n.decs);
                let return_pos = self.cursor.token(Token::Return);
                self.slot(&n.decs.return_);
                let results = self.exprs(&n.results);
                self.close(&n.decs);
                ast::Stmt::Return(Box::new(ast::ReturnStmt {
                    return_pos,
                    results,
                }))
            }
            dst::Stmt::Branch(n) => {
                self.open(&n.decs);
                let tok_pos = self.cursor.token(n.tok);
                self.slot(&n.decs.tok);
                let label = n.label.as_ref().map(|label| self.ident(label));
                self.close(&n.decs);
                ast::Stmt::Branch(Box::new(ast::BranchStmt {
                    tok_pos,
                    tok: n.tok,
                    label,
                }))
            }
            dst::Stmt::Block(n) => ast::Stmt::Block(Box::new(self.block(n))),
            dst::Stmt::If(n) => {
                self.open(&n.decs);
                let if_pos = self.cursor.token(Token::If);
                self.slot(&n.decs.if_);
                let init = self.init(n.init.as_ref(), &n.decs.init);
                let cond = self.expr(&n.cond);
                self.slot(&n.decs.cond);
                let body = self.block(&n.body);
                let els = n.els.as_ref().map(|els| {
                    self.cursor.skip(Token::Else);
                    self.slot(&n.decs.els);
                    self.stmt(els)
                });
                self.close(&n.decs);
                ast::Stmt::If(Box::new(ast::IfStmt {
                    if_pos,
                    init,
                    cond,
                    body,
                    els,
                }))
            }
            dst::Stmt::CaseClause(n) => {
                self.open(&n.decs);
                let keyword = if n.list.is_empty() {
                    Token::Default
                } else {
                    Token::Case
                };
                let case = self.cursor.token(keyword);
                self.slot(&n.decs.case);
                let list = self.exprs(&n.list);
                let colon = self.cursor.token(Token::Colon);
                self.slot(&n.decs.colon);
                let body = self.stmts(&n.body);
                self.close(&n.decs);
                ast::Stmt::CaseClause(Box::new(ast::CaseClause {
                    case,
                    list,
                    colon,
                    body,
                }))
            }
            dst::Stmt::Switch(n) => {
                self.open(&n.decs);
                let switch = self.cursor.token(Token::Switch);
                self.slot(&n.decs.switch);
                let init = self.init(n.init.as_ref(), &n.decs.init);
                let tag = self.opt_expr(n.tag.as_ref(), &n.decs.tag);
                let body = self.block(&n.body);
                self.close(&n.decs);
                ast::Stmt::Switch(Box::new(ast::SwitchStmt {
                    switch,
                    init,
                    tag,
                    body,
                }))
            }
            dst::Stmt::TypeSwitch(n) => {
                self.open(&n.decs);
                let switch = self.cursor.token(Token::Switch);
                self.slot(&n.decs.switch);
                let init = self.init(n.init.as_ref(), &n.decs.init);
                let assign = self.stmt(&n.assign);
                self.slot(&n.decs.assign);
                let body = self.block(&n.body);
                self.close(&n.decs);
                ast::Stmt::TypeSwitch(Box::new(ast::TypeSwitchStmt {
                    switch,
                    init,
                    assign,
                    body,
                }))
            }
            dst::Stmt::CommClause(n) => {
                self.open(&n.decs);
                let keyword = if n.comm.is_none() {
                    Token::Default
                } else {
                    Token::Case
                };
                let case = self.cursor.token(keyword);
                self.slot(&n.decs.case);
                let comm = n.comm.as_ref().map(|comm| {
                    let comm = self.stmt(comm);
                    self.slot(&n.decs.comm);
                    comm
                });
                let colon = self.cursor.token(Token::Colon);
                self.slot(&n.decs.colon);
                let body = self.stmts(&n.body);
                self.close(&n.decs);
                ast::Stmt::CommClause(Box::new(ast::CommClause {
                    case,
                    comm,
                    colon,
                    body,
                }))
            }
            dst::Stmt::Select(n) => {
                self.open(&n.decs);
                let select = self.cursor.token(Token::Select);
                self.slot(&n.decs.select);
                let body = self.block(&n.body);
                self.close(&n.decs);
                ast::Stmt::Select(Box::new(ast::SelectStmt { select, body }))
            }
            dst::Stmt::For(n) => {
                self.open(&n.decs);
                let for_pos = self.cursor.token(Token::For);
                self.slot(&n.decs.for_);
                let clauses = n.init.is_some() || n.post.is_some();
                let init = n.init.as_ref().map(|init| self.stmt(init));
                if clauses {
                    self.cursor.skip(Token::Semicolon);
                }
                if init.is_some() {
                    self.slot(&n.decs.init);
                }
                let cond = n.cond.as_ref().map(|cond| self.expr(cond));
                if clauses {
                    self.cursor.skip(Token::Semicolon);
                }
                if cond.is_some() {
                    self.slot(&n.decs.cond);
                }
                let post = n.post.as_ref().map(|post| {
                    let post = self.stmt(post);
                    self.slot(&n.decs.post);
                    post
                });
                let body = self.block(&n.body);
                self.close(&n.decs);
                ast::Stmt::For(Box::new(ast::ForStmt {
                    for_pos,
                    init,
                    cond,
                    post,
                    body,
                }))
            }
            dst::Stmt::Range(n) => {
                self.open(&n.decs);
                let for_pos = self.cursor.token(Token::For);
                self.slot(&n.decs.for_);
                let key = self.opt_expr(n.key.as_ref(), &n.decs.key);
                if n.value.is_some() {
                    self.cursor.skip(Token::Comma);
                }
                let value = self.opt_expr(n.value.as_ref(), &n.decs.value);
                let tok_pos = if n.tok == Token::Illegal {
                    Pos::NONE
                } else {
                    self.cursor.token(n.tok)
                };
                let range = self.cursor.token(Token::Range);
                self.slot(&n.decs.range);
                let x = self.expr(&n.x);
                self.slot(&n.decs.x);
                let body = self.block(&n.body);
                self.close(&n.decs);
                ast::Stmt::Range(Box::new(ast::RangeStmt {
                    for_pos,
                    key,
                    value,
                    tok_pos,
                    tok: n.tok,
                    range,
                    x,
                    body,
                }))
            }
        }
    }

    fn decl(&mut self, decl: &dst::Decl) -> ast::Decl {
        match decl {
            dst::Decl::Bad(n) => {
                let (from, to) = self.bad(&n.decs, n.length);
                ast::Decl::Bad(ast::BadDecl { from, to })
            }
            dst::Decl::Gen(n) => ast::Decl::Gen(Box::new(self.gen_decl(n))),
            dst::Decl::Func(n) => ast::Decl::Func(Box::new(self.func_decl(n))),
        }
    }

    fn gen_decl(&mut self, n: &dst::GenDecl) -> ast::GenDecl {
        self.open(&n.decs);
        let tok_pos = self.cursor.token(n.tok);
        self.slot(&n.decs.tok);
        let lparen = if n.lparen {
            let pos = self.cursor.token(Token::LParen);
            self.slot(&n.decs.lparen);
            pos
        } else {
            Pos::NONE
        };
        let specs = n.specs.iter().map(|spec| self.spec(spec)).collect();
        let rparen = if n.lparen {
            self.cursor.token(Token::RParen)
        } else {
            Pos::NONE
        };
        self.close(&n.decs);
        ast::GenDecl {
            tok_pos,
            tok: n.tok,
            lparen,
            specs,
            rparen,
        }
    }

    /// Function declaration; the signature's own decorations are not written
    fn func_decl(&mut self, n: &dst::FuncDecl) -> ast::FuncDecl {
        self.open(&n.decs);
        let func = self.cursor.token(Token::Func);
        self.slot(&n.decs.func);
        let recv = n.recv.as_ref().map(|recv| {
            let recv = self.field_list(recv, Token::LParen, Token::RParen);
            self.slot(&n.decs.recv);
            recv
        });
        let name = self.ident(&n.name);
        self.slot(&n.decs.name);
        let type_params = n.typ.type_params.as_ref().map(|list| {
            let list = self.field_list(list, Token::LBrack, Token::RBrack);
            self.slot(&n.decs.type_params);
            list
        });
        let params = self.field_list(&n.typ.params, Token::LParen, Token::RParen);
        self.slot(&n.decs.params);
        let results = n.typ.results.as_ref().map(|list| {
            let list = self.field_list(list, Token::LParen, Token::RParen);
            self.slot(&n.decs.results);
            list
        });
        let body = n.body.as_ref().map(|body| self.block(body));
        self.close(&n.decs);
        ast::FuncDecl {
            recv,
            name,
            typ: ast::FuncType {
                func,
                type_params,
                params,
                results,
            },
            body,
        }
    }

    fn spec(&mut self, spec: &dst::Spec) -> ast::Spec {
        match spec {
            dst::Spec::Import(n) => {
                self.open(&n.decs);
                let name = n.name.as_ref().map(|name| {
                    let name = self.ident(name);
                    self.slot(&n.decs.name);
                    name
                });
                let path = self.basic_lit(&n.path);
                self.close(&n.decs);
                ast::Spec::Import(Box::new(ast::ImportSpec {
                    name,
                    path,
                    end_pos: Pos::NONE,
                }))
            }
            dst::Spec::Value(n) => {
                self.open(&n.decs);
                let names = self.idents(&n.names);
                let typ = n.typ.as_ref().map(|typ| self.expr(typ));
                if !n.values.is_empty() {
                    self.cursor.skip(Token::Assign);
                    self.slot(&n.decs.assign);
                }
                let values = self.exprs(&n.values);
                self.close(&n.decs);
                ast::Spec::Value(Box::new(ast::ValueSpec {
                    names,
                    typ,
                    values,
                }))
            }
            dst::Spec::Type(n) => {
                self.open(&n.decs);
                let name = self.ident(&n.name);
                self.slot(&n.decs.name);
                let type_params = n.type_params.as_ref().map(|list| {
                    let list = self.field_list(list, Token::LBrack, Token::RBrack);
                    self.slot(&n.decs.type_params);
                    list
                });
                let assign = if n.assign {
                    let pos = self.cursor.token(Token::Assign);
                    self.slot(&n.decs.assign);
                    pos
                } else {
                    Pos::NONE
                };
                let typ = self.expr(&n.typ);
                self.close(&n.decs);
                ast::Spec::Type(Box::new(ast::TypeSpec {
                    name,
                    type_params,
                    assign,
                    typ,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dst::SpaceType;

    fn names() -> PackageNames {
        PackageNames::from([("fmt".to_string(), "fmt".to_string())])
    }

    #[test]
    fn test_remote_ident_restores_as_selector() {
        let names = names();
        let mut restore = Restore::new(1, &names);
        let mut ident = dst::Ident::remote("fmt", "Println");
        ident.decs.x.push("/* x */");

        let ast::Expr::Selector(sel) = restore.expr(&dst::Expr::from(ident)) else {
            panic!("expected selector");
        };
        let ast::Expr::Ident(x) = &sel.x else {
            panic!("expected package identifier");
        };
        assert_eq!(x.name, "fmt");
        assert_eq!(x.name_pos, Pos::new(1));
        assert_eq!(sel.sel.name, "Println");
        assert_eq!(sel.sel.name_pos, Pos::new(12));

        let (groups, _) = restore.finish("a.go");
        assert_eq!(groups[0].list[0].slash, Pos::new(4));
    }

    #[test]
    fn test_dot_import_restores_bare_ident() {
        let names = PackageNames::from([("strings".to_string(), ".".to_string())]);
        let mut restore = Restore::new(1, &names);
        let expr = restore.expr(&dst::Expr::from(dst::Ident::remote("strings", "ToUpper")));
        assert!(matches!(expr, ast::Expr::Ident(ref ident) if ident.name == "ToUpper"));
    }

    #[test]
    fn test_spacing_hints_write_line_breaks() {
        let names = names();
        let mut restore = Restore::new(1, &names);
        let mut first = dst::ExprStmt::new(dst::Ident::new("a"));
        first.decs.after = SpaceType::NewLine;
        let mut second = dst::ExprStmt::new(dst::Ident::new("b"));
        second.decs.before = SpaceType::EmptyLine;
        second.decs.start.append(["// b", "\n"]);

        restore.stmt(&dst::Stmt::from(first));
        let ast::Stmt::Expr(stmt) = restore.stmt(&dst::Stmt::from(second)) else {
            panic!("expected expression statement");
        };
        assert_eq!(stmt.x.pos(), Pos::new(9));

        let (groups, file) = restore.finish("a.go");
        assert_eq!(file.lines(), &[0, 2, 3, 8]);
        assert_eq!(groups[0].list[0].slash, Pos::new(4));
    }

    #[test]
    fn test_positionless_tokens_reserve_space() {
        let names = names();
        let mut restore = Restore::new(1, &names);
        let array = dst::Expr::ArrayType(Box::new(dst::ArrayType {
            len: None,
            elt: dst::Ident::new("int").into(),
            decs: Default::default(),
        }));
        let ast::Expr::ArrayType(array) = restore.expr(&array) else {
            panic!("expected array type");
        };
        assert_eq!(array.lbrack, Pos::new(1));
        assert_eq!(array.elt.pos(), Pos::new(3));
    }

    #[test]
    fn test_implicit_semicolon_takes_no_space() {
        let names = names();
        let mut restore = Restore::new(5, &names);
        let ast::Stmt::Empty(stmt) = restore.stmt(&dst::Stmt::Empty(Box::new(dst::EmptyStmt {
            implicit: true,
            decs: Default::default(),
        }))) else {
            panic!("expected empty statement");
        };
        assert_eq!(stmt.semicolon, Pos::new(5));
        assert!(stmt.implicit);
    }
}
