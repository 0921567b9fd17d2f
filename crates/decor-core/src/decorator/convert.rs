//! Rebuilding a plain tree as a decorated tree

use decor_syntax::ast::{self, Node};

use super::{DecorationMap, NodeId};
use crate::dst::{self, DecorationSet, IdentDecs, KindSlots};
use crate::error::DecorError;
use crate::resolver::RefResolver;
use crate::result::{Result, ResultExt};

/// Converts the nodes of one file, consuming the linked decorations
pub(super) struct Converter<'a> {
    file: &'a ast::File,
    resolver: &'a dyn RefResolver,
    strict: bool,
    map: DecorationMap,
    failure: Option<DecorError>,
    remote: usize,
}

impl<'a> Converter<'a> {
    pub(super) fn new(
        file: &'a ast::File,
        resolver: &'a dyn RefResolver,
        strict: bool,
        map: DecorationMap,
    ) -> Self {
        Self {
            file,
            resolver,
            strict,
            map,
            failure: None,
            remote: 0,
        }
    }

    pub(super) fn remote_idents(&self) -> usize {
        self.remote
    }

    /// Report decorations no node claimed and the first strict failure
    pub(super) fn finish(self) -> Result<()> {
        for ((node, slot), decorations) in &self.map {
            tracing::warn!(
                "Dropping {} unclaimed decorations of {}.{}",
                decorations.len(),
                node.kind(),
                slot
            );
        }
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Move the linked decorations of `node` into a fresh decoration struct
    fn take<D: DecorationSet + Default>(&mut self, node: Node<'_>) -> D {
        let id = NodeId::of(node);
        let mut decs = D::default();
        for &slot in id.kind().slots() {
            if let Some(found) = self.map.swap_remove(&(id, slot)) {
                if let Some(target) = decs.slot_mut(slot) {
                    *target = found;
                }
            }
        }
        decs
    }

    /// Like [`Converter::take`], with outer line breaks turned into hints
    fn decs<D: DecorationSet + Default>(&mut self, node: Node<'_>) -> D {
        let mut decs: D = self.take(node);
        decs.normalize();
        decs
    }

    /// Import path `ident` refers to; failures leave it local
    fn resolve(&mut self, parent: Node<'_>, field: &str, ident: &ast::Ident) -> String {
        let resolved = self
            .resolver
            .resolve_ident(self.file, parent, field, ident)
            .map_err(|err| DecorError::resolve_error(ident.name.clone(), err));
        if !self.strict {
            return resolved.log_and_continue().unwrap_or_default();
        }
        resolved.unwrap_or_else(|err| {
            if self.failure.is_none() {
                self.failure = Some(err);
            }
            String::new()
        })
    }

    pub(super) fn convert_file(&mut self, file: &ast::File) -> dst::File {
        let node = Node::File(file);
        dst::File {
            name: self.ident(&file.name),
            decls: file.decls.iter().map(|decl| self.decl(decl)).collect(),
            decs: self.decs(node),
        }
    }

    /// Identifier in a name position; never resolved
    fn ident(&mut self, ident: &ast::Ident) -> dst::Ident {
        dst::Ident {
            name: ident.name.clone(),
            path: String::new(),
            decs: self.decs(Node::Ident(ident)),
        }
    }

    fn opt_ident(&mut self, ident: Option<&ast::Ident>) -> Option<dst::Ident> {
        ident.map(|ident| self.ident(ident))
    }

    fn idents(&mut self, idents: &[ast::Ident]) -> Vec<dst::Ident> {
        idents.iter().map(|ident| self.ident(ident)).collect()
    }

    fn basic_lit(&mut self, lit: &ast::BasicLit) -> dst::BasicLit {
        dst::BasicLit {
            kind: lit.kind,
            value: lit.value.clone(),
            decs: self.decs(Node::BasicLit(lit)),
        }
    }

    fn exprs(&mut self, list: &[ast::Expr], parent: Node<'_>, field: &str) -> Vec<dst::Expr> {
        list.iter().map(|expr| self.expr(expr, parent, field)).collect()
    }

    fn opt_expr(
        &mut self,
        expr: Option<&ast::Expr>,
        parent: Node<'_>,
        field: &str,
    ) -> Option<dst::Expr> {
        expr.map(|expr| self.expr(expr, parent, field))
    }

    /// Convert the expression held in `field` of `parent`
    fn expr(&mut self, expr: &ast::Expr, parent: Node<'_>, field: &str) -> dst::Expr {
        match expr {
            ast::Expr::Bad(n) => dst::Expr::Bad(Box::new(dst::BadExpr {
                length: span(n.from, n.to),
                decs: self.decs(Node::BadExpr(n)),
            })),
            ast::Expr::Ident(n) => {
                let path = self.resolve(parent, field, n);
                if !path.is_empty() {
                    self.remote += 1;
                }
                dst::Expr::Ident(Box::new(dst::Ident {
                    name: n.name.clone(),
                    path,
                    decs: self.decs(Node::Ident(n)),
                }))
            }
            ast::Expr::Ellipsis(n) => {
                let node = Node::Ellipsis(n);
                dst::Expr::Ellipsis(Box::new(dst::Ellipsis {
                    elt: self.opt_expr(n.elt.as_ref(), node, "Elt"),
                    decs: self.decs(node),
                }))
            }
            ast::Expr::BasicLit(n) => dst::Expr::BasicLit(Box::new(self.basic_lit(n))),
            ast::Expr::FuncLit(n) => {
                let node = Node::FuncLit(n);
                dst::Expr::FuncLit(Box::new(dst::FuncLit {
                    typ: self.func_type(&n.typ),
                    body: self.block(&n.body),
                    decs: self.decs(node),
                }))
            }
            ast::Expr::CompositeLit(n) => {
                let node = Node::CompositeLit(n);
                dst::Expr::CompositeLit(Box::new(dst::CompositeLit {
                    typ: self.opt_expr(n.typ.as_ref(), node, "Type"),
                    elts: self.exprs(&n.elts, node, "Elts"),
                    incomplete: n.incomplete,
                    decs: self.decs(node),
                }))
            }
            ast::Expr::Paren(n) => {
                let node = Node::ParenExpr(n);
                dst::Expr::Paren(Box::new(dst::ParenExpr {
                    x: self.expr(&n.x, node, "X"),
                    decs: self.decs(node),
                }))
            }
            ast::Expr::Selector(n) => self.selector(n),
            ast::Expr::Index(n) => {
                let node = Node::IndexExpr(n);
                dst::Expr::Index(Box::new(dst::IndexExpr {
                    x: self.expr(&n.x, node, "X"),
                    index: self.expr(&n.index, node, "Index"),
                    decs: self.decs(node),
                }))
            }
            ast::Expr::IndexList(n) => {
                let node = Node::IndexListExpr(n);
                dst::Expr::IndexList(Box::new(dst::IndexListExpr {
                    x: self.expr(&n.x, node, "X"),
                    indices: self.exprs(&n.indices, node, "Indices"),
                    decs: self.decs(node),
                }))
            }
            ast::Expr::Slice(n) => {
                let node = Node::SliceExpr(n);
                dst::Expr::Slice(Box::new(dst::SliceExpr {
                    x: self.expr(&n.x, node, "X"),
                    low: self.opt_expr(n.low.as_ref(), node, "Low"),
                    high: self.opt_expr(n.high.as_ref(), node, "High"),
                    max: self.opt_expr(n.max.as_ref(), node, "Max"),
                    slice3: n.slice3,
                    decs: self.decs(node),
                }))
            }
            ast::Expr::TypeAssert(n) => {
                let node = Node::TypeAssertExpr(n);
                dst::Expr::TypeAssert(Box::new(dst::TypeAssertExpr {
                    x: self.expr(&n.x, node, "X"),
                    typ: self.opt_expr(n.typ.as_ref(), node, "Type"),
                    decs: self.decs(node),
                }))
            }
            ast::Expr::Call(n) => dst::Expr::Call(Box::new(self.call(n))),
            ast::Expr::Star(n) => {
                let node = Node::StarExpr(n);
                dst::Expr::Star(Box::new(dst::StarExpr {
                    x: self.expr(&n.x, node, "X"),
                    decs: self.decs(node),
                }))
            }
            ast::Expr::Unary(n) => {
                let node = Node::UnaryExpr(n);
                dst::Expr::Unary(Box::new(dst::UnaryExpr {
                    op: n.op,
                    x: self.expr(&n.x, node, "X"),
                    decs: self.decs(node),
                }))
            }
            ast::Expr::Binary(n) => {
                let node = Node::BinaryExpr(n);
                dst::Expr::Binary(Box::new(dst::BinaryExpr {
                    x: self.expr(&n.x, node, "X"),
                    op: n.op,
                    y: self.expr(&n.y, node, "Y"),
                    decs: self.decs(node),
                }))
            }
            ast::Expr::KeyValue(n) => {
                let node = Node::KeyValueExpr(n);
                dst::Expr::KeyValue(Box::new(dst::KeyValueExpr {
                    key: self.expr(&n.key, node, "Key"),
                    value: self.expr(&n.value, node, "Value"),
                    decs: self.decs(node),
                }))
            }
            ast::Expr::ArrayType(n) => {
                let node = Node::ArrayType(n);
                dst::Expr::ArrayType(Box::new(dst::ArrayType {
                    len: self.opt_expr(n.len.as_ref(), node, "Len"),
                    elt: self.expr(&n.elt, node, "Elt"),
                    decs: self.decs(node),
                }))
            }
            ast::Expr::StructType(n) => {
                let node = Node::StructType(n);
                dst::Expr::StructType(Box::new(dst::StructType {
                    fields: self.field_list(&n.fields),
                    incomplete: n.incomplete,
                    decs: self.decs(node),
                }))
            }
            ast::Expr::FuncType(n) => dst::Expr::FuncType(Box::new(self.func_type(n))),
            ast::Expr::InterfaceType(n) => {
                let node = Node::InterfaceType(n);
                dst::Expr::InterfaceType(Box::new(dst::InterfaceType {
                    methods: self.field_list(&n.methods),
                    incomplete: n.incomplete,
                    decs: self.decs(node),
                }))
            }
            ast::Expr::MapType(n) => {
                let node = Node::MapType(n);
                dst::Expr::MapType(Box::new(dst::MapType {
                    key: self.expr(&n.key, node, "Key"),
                    value: self.expr(&n.value, node, "Value"),
                    decs: self.decs(node),
                }))
            }
            ast::Expr::ChanType(n) => {
                let node = Node::ChanType(n);
                dst::Expr::ChanType(Box::new(dst::ChanType {
                    dir: n.dir,
                    value: self.expr(&n.value, node, "Value"),
                    decs: self.decs(node),
                }))
            }
        }
    }

    /// Selector, or a single remote identifier when the operand names a
    /// package
    fn selector(&mut self, n: &ast::SelectorExpr) -> dst::Expr {
        let node = Node::SelectorExpr(n);
        let ast::Expr::Ident(operand) = &n.x else {
            return dst::Expr::Selector(Box::new(dst::SelectorExpr {
                x: self.expr(&n.x, node, "X"),
                sel: self.ident(&n.sel),
                decs: self.decs(node),
            }));
        };

        let path = self.resolve(node, "X", operand);
        if path.is_empty() {
            return dst::Expr::Selector(Box::new(dst::SelectorExpr {
                x: dst::Expr::Ident(Box::new(self.ident(operand))),
                sel: self.ident(&n.sel),
                decs: self.decs(node),
            }));
        }

        let outer: dst::SelectorExprDecs = self.take(node);
        let package: IdentDecs = self.take(Node::Ident(operand));
        let name: IdentDecs = self.take(Node::Ident(&n.sel));

        let mut decs = IdentDecs::default();
        decs.start.append(outer.start);
        decs.start.append(package.start);
        decs.x.append(package.end);
        decs.x.append(outer.x);
        decs.x.append(name.start);
        decs.end.append(name.end);
        decs.end.append(outer.end);
        decs.normalize();

        tracing::trace!(
            "Merged {}.{} into a remote identifier of '{}'",
            operand.name,
            n.sel.name,
            path
        );
        self.remote += 1;
        dst::Expr::Ident(Box::new(dst::Ident {
            name: n.sel.name.clone(),
            path,
            decs,
        }))
    }

    fn call(&mut self, n: &ast::CallExpr) -> dst::CallExpr {
        let node = Node::CallExpr(n);
        dst::CallExpr {
            fun: self.expr(&n.fun, node, "Fun"),
            args: self.exprs(&n.args, node, "Args"),
            ellipsis: n.ellipsis.is_valid(),
            decs: self.decs(node),
        }
    }

    fn func_type(&mut self, n: &ast::FuncType) -> dst::FuncType {
        dst::FuncType {
            func: n.func.is_valid(),
            type_params: n.type_params.as_ref().map(|list| self.field_list(list)),
            params: self.field_list(&n.params),
            results: n.results.as_ref().map(|list| self.field_list(list)),
            decs: self.decs(Node::FuncType(n)),
        }
    }

    fn field_list(&mut self, n: &ast::FieldList) -> dst::FieldList {
        dst::FieldList {
            opening: n.opening.is_valid(),
            list: n.list.iter().map(|field| self.field(field)).collect(),
            closing: n.closing.is_valid(),
            decs: self.decs(Node::FieldList(n)),
        }
    }

    fn field(&mut self, n: &ast::Field) -> dst::Field {
        let node = Node::Field(n);
        dst::Field {
            names: self.idents(&n.names),
            typ: self.expr(&n.typ, node, "Type"),
            tag: n.tag.as_ref().map(|tag| self.basic_lit(tag)),
            decs: self.decs(node),
        }
    }

    fn block(&mut self, n: &ast::BlockStmt) -> dst::BlockStmt {
        dst::BlockStmt {
            list: self.stmts(&n.list),
            decs: self.decs(Node::BlockStmt(n)),
        }
    }

    fn stmts(&mut self, list: &[ast::Stmt]) -> Vec<dst::Stmt> {
        list.iter().map(|stmt| self.stmt(stmt)).collect()
    }

    fn opt_stmt(&mut self, stmt: Option<&ast::Stmt>) -> Option<dst::Stmt> {
        stmt.map(|stmt| self.stmt(stmt))
    }

    fn stmt(&mut self, stmt: &ast::Stmt) -> dst::Stmt {
        match stmt {
            ast::Stmt::Bad(n) => dst::Stmt::Bad(Box::new(dst::BadStmt {
                length: span(n.from, n.to),
                decs: self.decs(Node::BadStmt(n)),
            })),
            ast::Stmt::Decl(n) => dst::Stmt::Decl(Box::new(dst::DeclStmt {
                decl: self.gen_decl(&n.decl),
                decs: self.decs(Node::DeclStmt(n)),
            })),
            ast::Stmt::Empty(n) => dst::Stmt::Empty(Box::new(dst::EmptyStmt {
                implicit: n.implicit,
                decs: self.decs(Node::EmptyStmt(n)),
            })),
            ast::Stmt::Labeled(n) => dst::Stmt::Labeled(Box::new(dst::LabeledStmt {
                label: self.ident(&n.label),
                stmt: self.stmt(&n.stmt),
                decs: self.decs(Node::LabeledStmt(n)),
            })),
            ast::Stmt::Expr(n) => {
                let node = Node::ExprStmt(n);
                dst::Stmt::Expr(Box::new(dst::ExprStmt {
                    x: self.expr(&n.x, node, "X"),
                    decs: self.decs(node),
                }))
            }
            ast::Stmt::Send(n) => {
                let node = Node::SendStmt(n);
                dst::Stmt::Send(Box::new(dst::SendStmt {
                    chan: self.expr(&n.chan, node, "Chan"),
                    value: self.expr(&n.value, node, "Value"),
                    decs: self.decs(node),
                }))
            }
            ast::Stmt::IncDec(n) => {
                let node = Node::IncDecStmt(n);
                dst::Stmt::IncDec(Box::new(dst::IncDecStmt {
                    x: self.expr(&n.x, node, "X"),
                    tok: n.tok,
                    decs: self.decs(node),
                }))
            }
            ast::Stmt::Assign(n) => {
                let node = Node::AssignStmt(n);
                dst::Stmt::Assign(Box::new(dst::AssignStmt {
                    lhs: self.exprs(&n.lhs, node, "Lhs"),
                    tok: n.tok,
                    rhs: self.exprs(&n.rhs, node, "Rhs"),
                    decs: self.decs(node),
                }))
            }
            ast::Stmt::Go(n) => dst::Stmt::Go(Box::new(dst::GoStmt {
                call: self.call(&n.call),
                decs: self.decs(Node::GoStmt(n)),
            })),
            ast::Stmt::Defer(n) => dst::Stmt::Defer(Box::new(dst::DeferStmt {
                call: self.call(&n.call),
                decs: self.decs(Node::DeferStmt(n)),
            })),
            ast::Stmt::Return(n) => {
                let node = Node::ReturnStmt(n);
                dst::Stmt::Return(Box::new(dst::ReturnStmt {
                    results: self.exprs(&n.results, node, "Results"),
                    decs: self.decs(node),
                }))
            }
            ast::Stmt::Branch(n) => dst::Stmt::Branch(Box::new(dst::BranchStmt {
                tok: n.tok,
                label: self.opt_ident(n.label.as_ref()),
                decs: self.decs(Node::BranchStmt(n)),
            })),
            ast::Stmt::Block(n) => dst::Stmt::Block(Box::new(self.block(n))),
            ast::Stmt::If(n) => {
                let node = Node::IfStmt(n);
                dst::Stmt::If(Box::new(dst::IfStmt {
                    init: self.opt_stmt(n.init.as_ref()),
                    cond: self.expr(&n.cond, node, "Cond"),
                    body: self.block(&n.body),
                    els: self.opt_stmt(n.els.as_ref()),
                    decs: self.decs(node),
                }))
            }
            ast::Stmt::CaseClause(n) => {
                let node = Node::CaseClause(n);
                dst::Stmt::CaseClause(Box::new(dst::CaseClause {
                    list: self.exprs(&n.list, node, "List"),
                    body: self.stmts(&n.body),
                    decs: self.decs(node),
                }))
            }
            ast::Stmt::Switch(n) => {
                let node = Node::SwitchStmt(n);
                dst::Stmt::Switch(Box::new(dst::SwitchStmt {
                    init: self.opt_stmt(n.init.as_ref()),
                    tag: self.opt_expr(n.tag.as_ref(), node, "Tag"),
                    body: self.block(&n.body),
                    decs: self.decs(node),
                }))
            }
            ast::Stmt::TypeSwitch(n) => dst::Stmt::TypeSwitch(Box::new(dst::TypeSwitchStmt {
                init: self.opt_stmt(n.init.as_ref()),
                assign: self.stmt(&n.assign),
                body: self.block(&n.body),
                decs: self.decs(Node::TypeSwitchStmt(n)),
            })),
            ast::Stmt::CommClause(n) => dst::Stmt::CommClause(Box::new(dst::CommClause {
                comm: self.opt_stmt(n.comm.as_ref()),
                body: self.stmts(&n.body),
                decs: self.decs(Node::CommClause(n)),
            })),
            ast::Stmt::Select(n) => dst::Stmt::Select(Box::new(dst::SelectStmt {
                body: self.block(&n.body),
                decs: self.decs(Node::SelectStmt(n)),
            })),
            ast::Stmt::For(n) => {
                let node = Node::ForStmt(n);
                dst::Stmt::For(Box::new(dst::ForStmt {
                    init: self.opt_stmt(n.init.as_ref()),
                    cond: self.opt_expr(n.cond.as_ref(), node, "Cond"),
                    post: self.opt_stmt(n.post.as_ref()),
                    body: self.block(&n.body),
                    decs: self.decs(node),
                }))
            }
            ast::Stmt::Range(n) => {
                let node = Node::RangeStmt(n);
                dst::Stmt::Range(Box::new(dst::RangeStmt {
                    key: self.opt_expr(n.key.as_ref(), node, "Key"),
                    value: self.opt_expr(n.value.as_ref(), node, "Value"),
                    tok: n.tok,
                    x: self.expr(&n.x, node, "X"),
                    body: self.block(&n.body),
                    decs: self.decs(node),
                }))
            }
        }
    }

    fn decl(&mut self, decl: &ast::Decl) -> dst::Decl {
        match decl {
            ast::Decl::Bad(n) => dst::Decl::Bad(Box::new(dst::BadDecl {
                length: span(n.from, n.to),
                decs: self.decs(Node::BadDecl(n)),
            })),
            ast::Decl::Gen(n) => dst::Decl::Gen(Box::new(self.gen_decl(n))),
            ast::Decl::Func(n) => {
                let mut typ = self.func_type(&n.typ);
                typ.func = true;
                dst::Decl::Func(Box::new(dst::FuncDecl {
                    recv: n.recv.as_ref().map(|recv| self.field_list(recv)),
                    name: self.ident(&n.name),
                    typ,
                    body: n.body.as_ref().map(|body| self.block(body)),
                    decs: self.decs(Node::FuncDecl(n)),
                }))
            }
        }
    }

    fn gen_decl(&mut self, n: &ast::GenDecl) -> dst::GenDecl {
        dst::GenDecl {
            tok: n.tok,
            lparen: n.lparen.is_valid(),
            specs: n.specs.iter().map(|spec| self.spec(spec)).collect(),
            decs: self.decs(Node::GenDecl(n)),
        }
    }

    fn spec(&mut self, spec: &ast::Spec) -> dst::Spec {
        match spec {
            ast::Spec::Import(n) => dst::Spec::Import(Box::new(dst::ImportSpec {
                name: self.opt_ident(n.name.as_ref()),
                path: self.basic_lit(&n.path),
                decs: self.decs(Node::ImportSpec(n)),
            })),
            ast::Spec::Value(n) => {
                let node = Node::ValueSpec(n);
                dst::Spec::Value(Box::new(dst::ValueSpec {
                    names: self.idents(&n.names),
                    typ: self.opt_expr(n.typ.as_ref(), node, "Type"),
                    values: self.exprs(&n.values, node, "Values"),
                    decs: self.decs(node),
                }))
            }
            ast::Spec::Type(n) => {
                let node = Node::TypeSpec(n);
                dst::Spec::Type(Box::new(dst::TypeSpec {
                    name: self.ident(&n.name),
                    type_params: n.type_params.as_ref().map(|list| self.field_list(list)),
                    assign: n.assign.is_valid(),
                    typ: self.expr(&n.typ, node, "Type"),
                    decs: self.decs(node),
                }))
            }
        }
    }
}

/// Byte length of a bad node
fn span(from: decor_syntax::Pos, to: decor_syntax::Pos) -> usize {
    if from.is_valid() && to.is_valid() {
        to.get().saturating_sub(from.get())
    } else {
        0
    }
}
