//! Flattening a plain tree into an offset-ordered fragment sequence
//!
//! The fragmenter walks the tree in the fixed per-kind order and records
//! every positioned token, every literal and every decoration slot at the
//! byte offset it occupies. Comments and line breaks of the source are added
//! afterwards and the whole sequence is sorted by offset, which lets the
//! linker decide which slot each comment or line break belongs to.

use decor_syntax::ast::{self, ChanDir, Node};
use decor_syntax::{Pos, PositionFile, Token};

use super::NodeId;
use crate::dst::Slot;

/// One element of the flattened source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    Token {
        node: NodeId,
        token: Token,
        offset: usize,
    },
    /// Identifier name, literal value or the raw span of a bad node
    String {
        node: NodeId,
        text: &'a str,
        offset: usize,
    },
    Comment {
        text: &'a str,
        offset: usize,
    },
    /// Line break at `offset`
    Newline {
        offset: usize,
    },
    Decoration {
        node: NodeId,
        slot: Slot,
        offset: usize,
    },
}

impl Fragment<'_> {
    pub fn offset(&self) -> usize {
        match *self {
            Fragment::Token { offset, .. }
            | Fragment::String { offset, .. }
            | Fragment::Comment { offset, .. }
            | Fragment::Newline { offset }
            | Fragment::Decoration { offset, .. } => offset,
        }
    }

    /// Whether the fragment is a token or a literal
    pub fn is_code(&self) -> bool {
        matches!(self, Fragment::Token { .. } | Fragment::String { .. })
    }
}

/// Fragment sequence of `file`, sorted by offset
pub fn fragment_file<'a>(file: &'a ast::File, position: &PositionFile) -> Vec<Fragment<'a>> {
    let mut fragmenter = Fragmenter {
        fragments: Vec::new(),
        cursor: position.base(),
        opaque: Vec::new(),
    };
    fragmenter.node(Node::File(file));
    let tree_fragments = fragmenter.fragments.len();

    for comment in file.comments.iter().flat_map(|group| &group.list) {
        if !comment.slash.is_valid() {
            continue;
        }
        let offset = comment.slash.get();
        fragmenter.fragments.push(Fragment::Comment {
            text: &comment.text,
            offset,
        });
        if comment.text.contains('\n') {
            fragmenter.opaque.push((offset, offset + comment.text.len()));
        }
    }

    let mut opaque = std::mem::take(&mut fragmenter.opaque);
    opaque.sort_unstable();
    let mut spans = opaque.iter().peekable();
    for &line in position.lines().iter().skip(1) {
        let offset = position.base() + line - 1;
        while spans.next_if(|&&(_, end)| end <= offset).is_some() {}
        if spans.peek().is_some_and(|&&(start, _)| start <= offset) {
            continue;
        }
        fragmenter.fragments.push(Fragment::Newline { offset });
    }

    let mut fragments = fragmenter.fragments;
    fragments.sort_by_key(Fragment::offset);
    tracing::debug!(
        "Fragmented file '{}': {} tree fragments, {} total",
        position.name(),
        tree_fragments,
        fragments.len()
    );
    fragments
}

struct Fragmenter<'a> {
    fragments: Vec<Fragment<'a>>,
    cursor: usize,
    /// Spans whose line breaks belong to a comment, literal or bad node
    opaque: Vec<(usize, usize)>,
}

impl<'a> Fragmenter<'a> {
    fn token(&mut self, node: NodeId, token: Token, pos: Pos) {
        if !pos.is_valid() {
            return;
        }
        self.fragments.push(Fragment::Token {
            node,
            token,
            offset: pos.get(),
        });
        self.cursor = pos.get() + token.width();
    }

    /// Step over a token the plain tree does not record
    fn skip(&mut self, token: Token) {
        self.cursor += token.width();
    }

    fn string(&mut self, node: NodeId, text: &'a str, pos: Pos) {
        if !pos.is_valid() {
            return;
        }
        let offset = pos.get();
        self.fragments.push(Fragment::String { node, text, offset });
        if text.contains('\n') {
            self.opaque.push((offset, offset + text.len()));
        }
        self.cursor = offset + text.len();
    }

    fn bad(&mut self, node: NodeId, from: Pos, to: Pos) {
        if !from.is_valid() {
            return;
        }
        self.fragments.push(Fragment::String {
            node,
            text: "",
            offset: from.get(),
        });
        let to = to.get().max(from.get());
        self.opaque.push((from.get(), to));
        self.cursor = to;
    }

    fn slot(&mut self, node: NodeId, slot: Slot) {
        self.fragments.push(Fragment::Decoration {
            node,
            slot,
            offset: self.cursor,
        });
    }

    fn node(&mut self, node: Node<'a>) {
        let id = NodeId::of(node);
        self.open(node, id);
        self.body(node, id);
        self.close(node, id);
    }

    fn open(&mut self, node: Node<'a>, id: NodeId) {
        let pos = node.pos();
        let offset = if pos.is_valid() { pos.get() } else { self.cursor };
        self.fragments.push(Fragment::Decoration {
            node: id,
            slot: Slot::Start,
            offset,
        });
    }

    fn close(&mut self, node: Node<'a>, id: NodeId) {
        let end = node.end();
        let offset = if end.is_valid() { end.get() } else { self.cursor };
        self.fragments.push(Fragment::Decoration {
            node: id,
            slot: Slot::End,
            offset,
        });
        self.cursor = self.cursor.max(offset);
    }

    fn expr(&mut self, expr: &'a ast::Expr) {
        self.node(Node::expr(expr));
    }

    fn exprs(&mut self, list: &'a [ast::Expr]) {
        for expr in list {
            self.expr(expr);
        }
    }

    /// Fragment an optional expression followed by `slot` when present
    fn opt_expr(&mut self, id: NodeId, expr: Option<&'a ast::Expr>, slot: Slot) {
        if let Some(expr) = expr {
            self.expr(expr);
            self.slot(id, slot);
        }
    }

    fn stmt(&mut self, stmt: &'a ast::Stmt) {
        self.node(Node::stmt(stmt));
    }

    fn stmts(&mut self, list: &'a [ast::Stmt]) {
        for stmt in list {
            self.stmt(stmt);
        }
    }

    fn opt_stmt(&mut self, id: NodeId, stmt: Option<&'a ast::Stmt>, slot: Slot) {
        if let Some(stmt) = stmt {
            self.stmt(stmt);
            self.slot(id, slot);
        }
    }

    /// Init statement of an `if` or `switch` header
    fn init(&mut self, id: NodeId, init: Option<&'a ast::Stmt>) {
        if let Some(init) = init {
            self.stmt(init);
            self.skip(Token::Semicolon);
            self.slot(id, Slot::Init);
        }
    }

    fn ident(&mut self, ident: &'a ast::Ident) {
        self.node(Node::Ident(ident));
    }

    fn field_list(&mut self, list: &'a ast::FieldList, open: Token, close: Token) {
        let node = Node::FieldList(list);
        let id = NodeId::of(node);
        self.open(node, id);
        self.field_list_body(list, id, open, close);
        self.close(node, id);
    }

    fn field_list_body(&mut self, list: &'a ast::FieldList, id: NodeId, open: Token, close: Token) {
        if list.opening.is_valid() {
            self.token(id, open, list.opening);
            self.slot(id, Slot::Opening);
        }
        for field in &list.list {
            self.node(Node::Field(field));
        }
        self.token(id, close, list.closing);
    }

    fn func_type_body(&mut self, typ: &'a ast::FuncType, id: NodeId) {
        if typ.func.is_valid() {
            self.token(id, Token::Func, typ.func);
            self.slot(id, Slot::Func);
        }
        if let Some(type_params) = &typ.type_params {
            self.field_list(type_params, Token::LBrack, Token::RBrack);
            self.slot(id, Slot::TypeParams);
        }
        self.field_list(&typ.params, Token::LParen, Token::RParen);
        self.slot(id, Slot::Params);
        if let Some(results) = &typ.results {
            self.field_list(results, Token::LParen, Token::RParen);
        }
    }

    fn body(&mut self, node: Node<'a>, id: NodeId) {
        match node {
            Node::BadExpr(n) => self.bad(id, n.from, n.to),
            Node::Ident(n) => self.string(id, &n.name, n.name_pos),
            Node::Ellipsis(n) => {
                self.token(id, Token::Ellipsis, n.ellipsis);
                self.slot(id, Slot::Ellipsis);
                if let Some(elt) = &n.elt {
                    self.expr(elt);
                }
            }
            Node::BasicLit(n) => self.string(id, &n.value, n.value_pos),
            Node::FuncLit(n) => {
                self.node(Node::FuncType(&n.typ));
                self.slot(id, Slot::Type);
                self.node(Node::BlockStmt(&n.body));
            }
            Node::CompositeLit(n) => {
                self.opt_expr(id, n.typ.as_ref(), Slot::Type);
                self.token(id, Token::LBrace, n.lbrace);
                self.slot(id, Slot::Lbrace);
                self.exprs(&n.elts);
                self.token(id, Token::RBrace, n.rbrace);
            }
            Node::ParenExpr(n) => {
                self.token(id, Token::LParen, n.lparen);
                self.slot(id, Slot::Lparen);
                self.expr(&n.x);
                self.slot(id, Slot::X);
                self.token(id, Token::RParen, n.rparen);
            }
            Node::SelectorExpr(n) => {
                self.expr(&n.x);
                self.slot(id, Slot::X);
                self.skip(Token::Period);
                self.ident(&n.sel);
            }
            Node::IndexExpr(n) => {
                self.expr(&n.x);
                self.slot(id, Slot::X);
                self.token(id, Token::LBrack, n.lbrack);
                self.slot(id, Slot::Lbrack);
                self.expr(&n.index);
                self.slot(id, Slot::Index);
                self.token(id, Token::RBrack, n.rbrack);
            }
            Node::IndexListExpr(n) => {
                self.expr(&n.x);
                self.slot(id, Slot::X);
                self.token(id, Token::LBrack, n.lbrack);
                self.slot(id, Slot::Lbrack);
                self.exprs(&n.indices);
                self.slot(id, Slot::Indices);
                self.token(id, Token::RBrack, n.rbrack);
            }
            Node::SliceExpr(n) => {
                self.expr(&n.x);
                self.slot(id, Slot::X);
                self.token(id, Token::LBrack, n.lbrack);
                self.slot(id, Slot::Lbrack);
                self.opt_expr(id, n.low.as_ref(), Slot::Low);
                self.skip(Token::Colon);
                self.opt_expr(id, n.high.as_ref(), Slot::High);
                if n.slice3 {
                    self.skip(Token::Colon);
                }
                self.opt_expr(id, n.max.as_ref(), Slot::Max);
                self.token(id, Token::RBrack, n.rbrack);
            }
            Node::TypeAssertExpr(n) => {
                self.expr(&n.x);
                self.slot(id, Slot::X);
                self.skip(Token::Period);
                self.token(id, Token::LParen, n.lparen);
                self.slot(id, Slot::Lparen);
                match &n.typ {
                    Some(typ) => self.expr(typ),
                    None => self.skip(Token::Type),
                }
                self.slot(id, Slot::Type);
                self.token(id, Token::RParen, n.rparen);
            }
            Node::CallExpr(n) => {
                self.expr(&n.fun);
                self.slot(id, Slot::Fun);
                self.token(id, Token::LParen, n.lparen);
                self.slot(id, Slot::Lparen);
                self.exprs(&n.args);
                if n.ellipsis.is_valid() {
                    self.token(id, Token::Ellipsis, n.ellipsis);
                    self.slot(id, Slot::Ellipsis);
                }
                self.token(id, Token::RParen, n.rparen);
            }
            Node::StarExpr(n) => {
                self.token(id, Token::Mul, n.star);
                self.slot(id, Slot::Star);
                self.expr(&n.x);
            }
            Node::UnaryExpr(n) => {
                self.token(id, n.op, n.op_pos);
                self.slot(id, Slot::Op);
                self.expr(&n.x);
            }
            Node::BinaryExpr(n) => {
                self.expr(&n.x);
                self.slot(id, Slot::X);
                self.token(id, n.op, n.op_pos);
                self.slot(id, Slot::Op);
                self.expr(&n.y);
            }
            Node::KeyValueExpr(n) => {
                self.expr(&n.key);
                self.slot(id, Slot::Key);
                self.token(id, Token::Colon, n.colon);
                self.slot(id, Slot::Colon);
                self.expr(&n.value);
            }
            Node::ArrayType(n) => {
                self.token(id, Token::LBrack, n.lbrack);
                self.slot(id, Slot::Lbrack);
                if let Some(len) = &n.len {
                    self.expr(len);
                }
                self.skip(Token::RBrack);
                self.slot(id, Slot::Len);
                self.expr(&n.elt);
            }
            Node::StructType(n) => {
                self.token(id, Token::Struct, n.struct_pos);
                self.slot(id, Slot::Struct);
                self.field_list(&n.fields, Token::LBrace, Token::RBrace);
            }
            Node::FuncType(n) => self.func_type_body(n, id),
            Node::InterfaceType(n) => {
                self.token(id, Token::Interface, n.interface);
                self.slot(id, Slot::Interface);
                self.field_list(&n.methods, Token::LBrace, Token::RBrace);
            }
            Node::MapType(n) => {
                self.token(id, Token::Map, n.map);
                self.skip(Token::LBrack);
                self.slot(id, Slot::Map);
                self.expr(&n.key);
                self.skip(Token::RBrack);
                self.slot(id, Slot::Key);
                self.expr(&n.value);
            }
            Node::ChanType(n) => {
                if n.dir == ChanDir::Recv {
                    self.token(id, Token::Arrow, n.begin);
                    self.skip(Token::Chan);
                } else {
                    self.token(id, Token::Chan, n.begin);
                }
                self.slot(id, Slot::Begin);
                if n.dir == ChanDir::Send {
                    self.token(id, Token::Arrow, n.arrow);
                    self.slot(id, Slot::Arrow);
                }
                self.expr(&n.value);
            }
            Node::BadStmt(n) => self.bad(id, n.from, n.to),
            Node::DeclStmt(n) => self.node(Node::GenDecl(&n.decl)),
            Node::EmptyStmt(n) => {
                if !n.implicit {
                    self.token(id, Token::Semicolon, n.semicolon);
                }
            }
            Node::LabeledStmt(n) => {
                self.ident(&n.label);
                self.slot(id, Slot::Label);
                self.token(id, Token::Colon, n.colon);
                self.slot(id, Slot::Colon);
                self.stmt(&n.stmt);
            }
            Node::ExprStmt(n) => self.expr(&n.x),
            Node::SendStmt(n) => {
                self.expr(&n.chan);
                self.slot(id, Slot::Chan);
                self.token(id, Token::Arrow, n.arrow);
                self.slot(id, Slot::Arrow);
                self.expr(&n.value);
            }
            Node::IncDecStmt(n) => {
                self.expr(&n.x);
                self.slot(id, Slot::X);
                self.token(id, n.tok, n.tok_pos);
            }
            Node::AssignStmt(n) => {
                self.exprs(&n.lhs);
                self.slot(id, Slot::Lhs);
                self.token(id, n.tok, n.tok_pos);
                self.slot(id, Slot::Tok);
                self.exprs(&n.rhs);
            }
            Node::GoStmt(n) => {
                self.token(id, Token::Go, n.go);
                self.slot(id, Slot::Go);
                self.node(Node::CallExpr(&n.call));
            }
            Node::DeferStmt(n) => {
                self.token(id, Token::Defer, n.defer);
                self.slot(id, Slot::Defer);
                self.node(Node::CallExpr(&n.call));
            }
            Node::ReturnStmt(n) => {
                self.token(id, Token::Return, n.return_pos);
                self.slot(id, Slot::Return);
                self.exprs(&n.results);
            }
            Node::BranchStmt(n) => {
                self.token(id, n.tok, n.tok_pos);
                self.slot(id, Slot::Tok);
                if let Some(label) = &n.label {
                    self.ident(label);
                }
            }
            Node::BlockStmt(n) => {
                self.token(id, Token::LBrace, n.lbrace);
                self.slot(id, Slot::Lbrace);
                self.stmts(&n.list);
                self.token(id, Token::RBrace, n.rbrace);
            }
            Node::IfStmt(n) => {
                self.token(id, Token::If, n.if_pos);
                self.slot(id, Slot::If);
                self.init(id, n.init.as_ref());
                self.expr(&n.cond);
                self.slot(id, Slot::Cond);
                self.node(Node::BlockStmt(&n.body));
                if let Some(els) = &n.els {
                    self.skip(Token::Else);
                    self.slot(id, Slot::Else);
                    self.stmt(els);
                }
            }
            Node::CaseClause(n) => {
                let keyword = if n.list.is_empty() { Token::Default } else { Token::Case };
                self.token(id, keyword, n.case);
                self.slot(id, Slot::Case);
                self.exprs(&n.list);
                self.token(id, Token::Colon, n.colon);
                self.slot(id, Slot::Colon);
                self.stmts(&n.body);
            }
            Node::SwitchStmt(n) => {
                self.token(id, Token::Switch, n.switch);
                self.slot(id, Slot::Switch);
                self.init(id, n.init.as_ref());
                self.opt_expr(id, n.tag.as_ref(), Slot::Tag);
                self.node(Node::BlockStmt(&n.body));
            }
            Node::TypeSwitchStmt(n) => {
                self.token(id, Token::Switch, n.switch);
                self.slot(id, Slot::Switch);
                self.init(id, n.init.as_ref());
                self.stmt(&n.assign);
                self.slot(id, Slot::Assign);
                self.node(Node::BlockStmt(&n.body));
            }
            Node::CommClause(n) => {
                let keyword = if n.comm.is_none() { Token::Default } else { Token::Case };
                self.token(id, keyword, n.case);
                self.slot(id, Slot::Case);
                self.opt_stmt(id, n.comm.as_ref(), Slot::Comm);
                self.token(id, Token::Colon, n.colon);
                self.slot(id, Slot::Colon);
                self.stmts(&n.body);
            }
            Node::SelectStmt(n) => {
                self.token(id, Token::Select, n.select);
                self.slot(id, Slot::Select);
                self.node(Node::BlockStmt(&n.body));
            }
            Node::ForStmt(n) => {
                self.token(id, Token::For, n.for_pos);
                self.slot(id, Slot::For);
                let clauses = n.init.is_some() || n.post.is_some();
                if let Some(init) = &n.init {
                    self.stmt(init);
                }
                if clauses {
                    self.skip(Token::Semicolon);
                }
                if n.init.is_some() {
                    self.slot(id, Slot::Init);
                }
                if let Some(cond) = &n.cond {
                    self.expr(cond);
                }
                if clauses {
                    self.skip(Token::Semicolon);
                }
                if n.cond.is_some() {
                    self.slot(id, Slot::Cond);
                }
                self.opt_stmt(id, n.post.as_ref(), Slot::Post);
                self.node(Node::BlockStmt(&n.body));
            }
            Node::RangeStmt(n) => {
                self.token(id, Token::For, n.for_pos);
                self.slot(id, Slot::For);
                self.opt_expr(id, n.key.as_ref(), Slot::Key);
                if n.value.is_some() {
                    self.skip(Token::Comma);
                }
                self.opt_expr(id, n.value.as_ref(), Slot::Value);
                if n.tok != Token::Illegal {
                    self.token(id, n.tok, n.tok_pos);
                }
                self.token(id, Token::Range, n.range);
                self.slot(id, Slot::Range);
                self.expr(&n.x);
                self.slot(id, Slot::X);
                self.node(Node::BlockStmt(&n.body));
            }
            Node::ImportSpec(n) => {
                if let Some(name) = &n.name {
                    self.ident(name);
                    self.slot(id, Slot::Name);
                }
                self.node(Node::BasicLit(&n.path));
            }
            Node::ValueSpec(n) => {
                for name in &n.names {
                    self.ident(name);
                }
                if let Some(typ) = &n.typ {
                    self.expr(typ);
                }
                if !n.values.is_empty() {
                    self.skip(Token::Assign);
                    self.slot(id, Slot::Assign);
                }
                self.exprs(&n.values);
            }
            Node::TypeSpec(n) => {
                self.ident(&n.name);
                self.slot(id, Slot::Name);
                if let Some(type_params) = &n.type_params {
                    self.field_list(type_params, Token::LBrack, Token::RBrack);
                    self.slot(id, Slot::TypeParams);
                }
                if n.assign.is_valid() {
                    self.token(id, Token::Assign, n.assign);
                    self.slot(id, Slot::Assign);
                }
                self.expr(&n.typ);
            }
            Node::BadDecl(n) => self.bad(id, n.from, n.to),
            Node::GenDecl(n) => {
                self.token(id, n.tok, n.tok_pos);
                self.slot(id, Slot::Tok);
                if n.lparen.is_valid() {
                    self.token(id, Token::LParen, n.lparen);
                    self.slot(id, Slot::Lparen);
                }
                for spec in &n.specs {
                    self.node(Node::spec(spec));
                }
                self.token(id, Token::RParen, n.rparen);
            }
            Node::FuncDecl(n) => {
                self.token(id, Token::Func, n.typ.func);
                self.slot(id, Slot::Func);
                if let Some(recv) = &n.recv {
                    self.field_list(recv, Token::LParen, Token::RParen);
                    self.slot(id, Slot::Recv);
                }
                self.ident(&n.name);
                self.slot(id, Slot::Name);
                if let Some(type_params) = &n.typ.type_params {
                    self.field_list(type_params, Token::LBrack, Token::RBrack);
                    self.slot(id, Slot::TypeParams);
                }
                self.field_list(&n.typ.params, Token::LParen, Token::RParen);
                self.slot(id, Slot::Params);
                if let Some(results) = &n.typ.results {
                    self.field_list(results, Token::LParen, Token::RParen);
                    self.slot(id, Slot::Results);
                }
                if let Some(body) = &n.body {
                    self.node(Node::BlockStmt(body));
                }
            }
            Node::Field(n) => {
                for name in &n.names {
                    self.ident(name);
                }
                self.expr(&n.typ);
                if let Some(tag) = &n.tag {
                    self.slot(id, Slot::Type);
                    self.node(Node::BasicLit(tag));
                }
            }
            Node::FieldList(n) => self.field_list_body(n, id, Token::LParen, Token::RParen),
            Node::File(n) => {
                self.token(id, Token::Package, n.package);
                self.slot(id, Slot::Package);
                self.ident(&n.name);
                self.slot(id, Slot::Name);
                for decl in &n.decls {
                    self.node(Node::decl(decl));
                }
            }
            Node::Package(_) => {}
        }
    }
}
