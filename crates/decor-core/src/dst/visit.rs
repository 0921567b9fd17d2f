//! Walking and dumping decorated trees

use decor_syntax::NodeKind;

use super::decorations::{DecorationSet, KindSlots, SpaceType};
use super::*;

/// Borrowed reference to a decorated node of any kind
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    BadExpr(&'a BadExpr),
    Ident(&'a Ident),
    Ellipsis(&'a Ellipsis),
    BasicLit(&'a BasicLit),
    FuncLit(&'a FuncLit),
    CompositeLit(&'a CompositeLit),
    ParenExpr(&'a ParenExpr),
    SelectorExpr(&'a SelectorExpr),
    IndexExpr(&'a IndexExpr),
    IndexListExpr(&'a IndexListExpr),
    SliceExpr(&'a SliceExpr),
    TypeAssertExpr(&'a TypeAssertExpr),
    CallExpr(&'a CallExpr),
    StarExpr(&'a StarExpr),
    UnaryExpr(&'a UnaryExpr),
    BinaryExpr(&'a BinaryExpr),
    KeyValueExpr(&'a KeyValueExpr),
    ArrayType(&'a ArrayType),
    StructType(&'a StructType),
    FuncType(&'a FuncType),
    InterfaceType(&'a InterfaceType),
    MapType(&'a MapType),
    ChanType(&'a ChanType),
    BadStmt(&'a BadStmt),
    DeclStmt(&'a DeclStmt),
    EmptyStmt(&'a EmptyStmt),
    LabeledStmt(&'a LabeledStmt),
    ExprStmt(&'a ExprStmt),
    SendStmt(&'a SendStmt),
    IncDecStmt(&'a IncDecStmt),
    AssignStmt(&'a AssignStmt),
    GoStmt(&'a GoStmt),
    DeferStmt(&'a DeferStmt),
    ReturnStmt(&'a ReturnStmt),
    BranchStmt(&'a BranchStmt),
    BlockStmt(&'a BlockStmt),
    IfStmt(&'a IfStmt),
    CaseClause(&'a CaseClause),
    SwitchStmt(&'a SwitchStmt),
    TypeSwitchStmt(&'a TypeSwitchStmt),
    CommClause(&'a CommClause),
    SelectStmt(&'a SelectStmt),
    ForStmt(&'a ForStmt),
    RangeStmt(&'a RangeStmt),
    ImportSpec(&'a ImportSpec),
    ValueSpec(&'a ValueSpec),
    TypeSpec(&'a TypeSpec),
    BadDecl(&'a BadDecl),
    GenDecl(&'a GenDecl),
    FuncDecl(&'a FuncDecl),
    Field(&'a Field),
    FieldList(&'a FieldList),
    File(&'a File),
    Package(&'a Package),
}

impl<'a> NodeRef<'a> {
    pub fn expr(expr: &'a Expr) -> Self {
        match expr {
            Expr::Bad(x) => NodeRef::BadExpr(x),
            Expr::Ident(x) => NodeRef::Ident(x),
            Expr::Ellipsis(x) => NodeRef::Ellipsis(x),
            Expr::BasicLit(x) => NodeRef::BasicLit(x),
            Expr::FuncLit(x) => NodeRef::FuncLit(x),
            Expr::CompositeLit(x) => NodeRef::CompositeLit(x),
            Expr::Paren(x) => NodeRef::ParenExpr(x),
            Expr::Selector(x) => NodeRef::SelectorExpr(x),
            Expr::Index(x) => NodeRef::IndexExpr(x),
            Expr::IndexList(x) => NodeRef::IndexListExpr(x),
            Expr::Slice(x) => NodeRef::SliceExpr(x),
            Expr::TypeAssert(x) => NodeRef::TypeAssertExpr(x),
            Expr::Call(x) => NodeRef::CallExpr(x),
            Expr::Star(x) => NodeRef::StarExpr(x),
            Expr::Unary(x) => NodeRef::UnaryExpr(x),
            Expr::Binary(x) => NodeRef::BinaryExpr(x),
            Expr::KeyValue(x) => NodeRef::KeyValueExpr(x),
            Expr::ArrayType(x) => NodeRef::ArrayType(x),
            Expr::StructType(x) => NodeRef::StructType(x),
            Expr::FuncType(x) => NodeRef::FuncType(x),
            Expr::InterfaceType(x) => NodeRef::InterfaceType(x),
            Expr::MapType(x) => NodeRef::MapType(x),
            Expr::ChanType(x) => NodeRef::ChanType(x),
        }
    }

    pub fn stmt(stmt: &'a Stmt) -> Self {
        match stmt {
            Stmt::Bad(s) => NodeRef::BadStmt(s),
            Stmt::Decl(s) => NodeRef::DeclStmt(s),
            Stmt::Empty(s) => NodeRef::EmptyStmt(s),
            Stmt::Labeled(s) => NodeRef::LabeledStmt(s),
            Stmt::Expr(s) => NodeRef::ExprStmt(s),
            Stmt::Send(s) => NodeRef::SendStmt(s),
            Stmt::IncDec(s) => NodeRef::IncDecStmt(s),
            Stmt::Assign(s) => NodeRef::AssignStmt(s),
            Stmt::Go(s) => NodeRef::GoStmt(s),
            Stmt::Defer(s) => NodeRef::DeferStmt(s),
            Stmt::Return(s) => NodeRef::ReturnStmt(s),
            Stmt::Branch(s) => NodeRef::BranchStmt(s),
            Stmt::Block(s) => NodeRef::BlockStmt(s),
            Stmt::If(s) => NodeRef::IfStmt(s),
            Stmt::CaseClause(s) => NodeRef::CaseClause(s),
            Stmt::Switch(s) => NodeRef::SwitchStmt(s),
            Stmt::TypeSwitch(s) => NodeRef::TypeSwitchStmt(s),
            Stmt::CommClause(s) => NodeRef::CommClause(s),
            Stmt::Select(s) => NodeRef::SelectStmt(s),
            Stmt::For(s) => NodeRef::ForStmt(s),
            Stmt::Range(s) => NodeRef::RangeStmt(s),
        }
    }

    pub fn decl(decl: &'a Decl) -> Self {
        match decl {
            Decl::Bad(d) => NodeRef::BadDecl(d),
            Decl::Gen(d) => NodeRef::GenDecl(d),
            Decl::Func(d) => NodeRef::FuncDecl(d),
        }
    }

    pub fn spec(spec: &'a Spec) -> Self {
        match spec {
            Spec::Import(s) => NodeRef::ImportSpec(s),
            Spec::Value(s) => NodeRef::ValueSpec(s),
            Spec::Type(s) => NodeRef::TypeSpec(s),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.decs() {
            Some(decs) => decs.kind(),
            None => NodeKind::Package,
        }
    }

    /// Decoration struct of the node; packages have none
    pub fn decs(&self) -> Option<&'a dyn DecorationSet> {
        let decs: &'a dyn DecorationSet = match *self {
            NodeRef::BadExpr(n) => &n.decs,
            NodeRef::Ident(n) => &n.decs,
            NodeRef::Ellipsis(n) => &n.decs,
            NodeRef::BasicLit(n) => &n.decs,
            NodeRef::FuncLit(n) => &n.decs,
            NodeRef::CompositeLit(n) => &n.decs,
            NodeRef::ParenExpr(n) => &n.decs,
            NodeRef::SelectorExpr(n) => &n.decs,
            NodeRef::IndexExpr(n) => &n.decs,
            NodeRef::IndexListExpr(n) => &n.decs,
            NodeRef::SliceExpr(n) => &n.decs,
            NodeRef::TypeAssertExpr(n) => &n.decs,
            NodeRef::CallExpr(n) => &n.decs,
            NodeRef::StarExpr(n) => &n.decs,
            NodeRef::UnaryExpr(n) => &n.decs,
            NodeRef::BinaryExpr(n) => &n.decs,
            NodeRef::KeyValueExpr(n) => &n.decs,
            NodeRef::ArrayType(n) => &n.decs,
            NodeRef::StructType(n) => &n.decs,
            NodeRef::FuncType(n) => &n.decs,
            NodeRef::InterfaceType(n) => &n.decs,
            NodeRef::MapType(n) => &n.decs,
            NodeRef::ChanType(n) => &n.decs,
            NodeRef::BadStmt(n) => &n.decs,
            NodeRef::DeclStmt(n) => &n.decs,
            NodeRef::EmptyStmt(n) => &n.decs,
            NodeRef::LabeledStmt(n) => &n.decs,
            NodeRef::ExprStmt(n) => &n.decs,
            NodeRef::SendStmt(n) => &n.decs,
            NodeRef::IncDecStmt(n) => &n.decs,
            NodeRef::AssignStmt(n) => &n.decs,
            NodeRef::GoStmt(n) => &n.decs,
            NodeRef::DeferStmt(n) => &n.decs,
            NodeRef::ReturnStmt(n) => &n.decs,
            NodeRef::BranchStmt(n) => &n.decs,
            NodeRef::BlockStmt(n) => &n.decs,
            NodeRef::IfStmt(n) => &n.decs,
            NodeRef::CaseClause(n) => &n.decs,
            NodeRef::SwitchStmt(n) => &n.decs,
            NodeRef::TypeSwitchStmt(n) => &n.decs,
            NodeRef::CommClause(n) => &n.decs,
            NodeRef::SelectStmt(n) => &n.decs,
            NodeRef::ForStmt(n) => &n.decs,
            NodeRef::RangeStmt(n) => &n.decs,
            NodeRef::ImportSpec(n) => &n.decs,
            NodeRef::ValueSpec(n) => &n.decs,
            NodeRef::TypeSpec(n) => &n.decs,
            NodeRef::BadDecl(n) => &n.decs,
            NodeRef::GenDecl(n) => &n.decs,
            NodeRef::FuncDecl(n) => &n.decs,
            NodeRef::Field(n) => &n.decs,
            NodeRef::FieldList(n) => &n.decs,
            NodeRef::File(n) => &n.decs,
            NodeRef::Package(_) => return None,
        };
        Some(decs)
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        let exprs = |out: &mut Vec<NodeRef<'a>>, list: &'a [Expr]| {
            out.extend(list.iter().map(NodeRef::expr));
        };
        let stmts = |out: &mut Vec<NodeRef<'a>>, list: &'a [Stmt]| {
            out.extend(list.iter().map(NodeRef::stmt));
        };
        let idents = |out: &mut Vec<NodeRef<'a>>, list: &'a [Ident]| {
            out.extend(list.iter().map(NodeRef::Ident));
        };

        match *self {
            NodeRef::BadExpr(_)
            | NodeRef::Ident(_)
            | NodeRef::BasicLit(_)
            | NodeRef::BadStmt(_)
            | NodeRef::EmptyStmt(_)
            | NodeRef::BadDecl(_) => {}
            NodeRef::Ellipsis(n) => out.extend(n.elt.as_ref().map(NodeRef::expr)),
            NodeRef::FuncLit(n) => {
                out.push(NodeRef::FuncType(&n.typ));
                out.push(NodeRef::BlockStmt(&n.body));
            }
            NodeRef::CompositeLit(n) => {
                out.extend(n.typ.as_ref().map(NodeRef::expr));
                exprs(&mut out, &n.elts);
            }
            NodeRef::ParenExpr(n) => out.push(NodeRef::expr(&n.x)),
            NodeRef::SelectorExpr(n) => {
                out.push(NodeRef::expr(&n.x));
                out.push(NodeRef::Ident(&n.sel));
            }
            NodeRef::IndexExpr(n) => {
                out.push(NodeRef::expr(&n.x));
                out.push(NodeRef::expr(&n.index));
            }
            NodeRef::IndexListExpr(n) => {
                out.push(NodeRef::expr(&n.x));
                exprs(&mut out, &n.indices);
            }
            NodeRef::SliceExpr(n) => {
                out.push(NodeRef::expr(&n.x));
                out.extend(n.low.as_ref().map(NodeRef::expr));
                out.extend(n.high.as_ref().map(NodeRef::expr));
                out.extend(n.max.as_ref().map(NodeRef::expr));
            }
            NodeRef::TypeAssertExpr(n) => {
                out.push(NodeRef::expr(&n.x));
                out.extend(n.typ.as_ref().map(NodeRef::expr));
            }
            NodeRef::CallExpr(n) => {
                out.push(NodeRef::expr(&n.fun));
                exprs(&mut out, &n.args);
            }
            NodeRef::StarExpr(n) => out.push(NodeRef::expr(&n.x)),
            NodeRef::UnaryExpr(n) => out.push(NodeRef::expr(&n.x)),
            NodeRef::BinaryExpr(n) => {
                out.push(NodeRef::expr(&n.x));
                out.push(NodeRef::expr(&n.y));
            }
            NodeRef::KeyValueExpr(n) => {
                out.push(NodeRef::expr(&n.key));
                out.push(NodeRef::expr(&n.value));
            }
            NodeRef::ArrayType(n) => {
                out.extend(n.len.as_ref().map(NodeRef::expr));
                out.push(NodeRef::expr(&n.elt));
            }
            NodeRef::StructType(n) => out.push(NodeRef::FieldList(&n.fields)),
            NodeRef::FuncType(n) => {
                out.extend(n.type_params.as_ref().map(NodeRef::FieldList));
                out.push(NodeRef::FieldList(&n.params));
                out.extend(n.results.as_ref().map(NodeRef::FieldList));
            }
            NodeRef::InterfaceType(n) => out.push(NodeRef::FieldList(&n.methods)),
            NodeRef::MapType(n) => {
                out.push(NodeRef::expr(&n.key));
                out.push(NodeRef::expr(&n.value));
            }
            NodeRef::ChanType(n) => out.push(NodeRef::expr(&n.value)),
            NodeRef::DeclStmt(n) => out.push(NodeRef::GenDecl(&n.decl)),
            NodeRef::LabeledStmt(n) => {
                out.push(NodeRef::Ident(&n.label));
                out.push(NodeRef::stmt(&n.stmt));
            }
            NodeRef::ExprStmt(n) => out.push(NodeRef::expr(&n.x)),
            NodeRef::SendStmt(n) => {
                out.push(NodeRef::expr(&n.chan));
                out.push(NodeRef::expr(&n.value));
            }
            NodeRef::IncDecStmt(n) => out.push(NodeRef::expr(&n.x)),
            NodeRef::AssignStmt(n) => {
                exprs(&mut out, &n.lhs);
                exprs(&mut out, &n.rhs);
            }
            NodeRef::GoStmt(n) => out.push(NodeRef::CallExpr(&n.call)),
            NodeRef::DeferStmt(n) => out.push(NodeRef::CallExpr(&n.call)),
            NodeRef::ReturnStmt(n) => exprs(&mut out, &n.results),
            NodeRef::BranchStmt(n) => out.extend(n.label.as_ref().map(NodeRef::Ident)),
            NodeRef::BlockStmt(n) => stmts(&mut out, &n.list),
            NodeRef::IfStmt(n) => {
                out.extend(n.init.as_ref().map(NodeRef::stmt));
                out.push(NodeRef::expr(&n.cond));
                out.push(NodeRef::BlockStmt(&n.body));
                out.extend(n.els.as_ref().map(NodeRef::stmt));
            }
            NodeRef::CaseClause(n) => {
                exprs(&mut out, &n.list);
                stmts(&mut out, &n.body);
            }
            NodeRef::SwitchStmt(n) => {
                out.extend(n.init.as_ref().map(NodeRef::stmt));
                out.extend(n.tag.as_ref().map(NodeRef::expr));
                out.push(NodeRef::BlockStmt(&n.body));
            }
            NodeRef::TypeSwitchStmt(n) => {
                out.extend(n.init.as_ref().map(NodeRef::stmt));
                out.push(NodeRef::stmt(&n.assign));
                out.push(NodeRef::BlockStmt(&n.body));
            }
            NodeRef::CommClause(n) => {
                out.extend(n.comm.as_ref().map(NodeRef::stmt));
                stmts(&mut out, &n.body);
            }
            NodeRef::SelectStmt(n) => out.push(NodeRef::BlockStmt(&n.body)),
            NodeRef::ForStmt(n) => {
                out.extend(n.init.as_ref().map(NodeRef::stmt));
                out.extend(n.cond.as_ref().map(NodeRef::expr));
                out.extend(n.post.as_ref().map(NodeRef::stmt));
                out.push(NodeRef::BlockStmt(&n.body));
            }
            NodeRef::RangeStmt(n) => {
                out.extend(n.key.as_ref().map(NodeRef::expr));
                out.extend(n.value.as_ref().map(NodeRef::expr));
                out.push(NodeRef::expr(&n.x));
                out.push(NodeRef::BlockStmt(&n.body));
            }
            NodeRef::ImportSpec(n) => {
                out.extend(n.name.as_ref().map(NodeRef::Ident));
                out.push(NodeRef::BasicLit(&n.path));
            }
            NodeRef::ValueSpec(n) => {
                idents(&mut out, &n.names);
                out.extend(n.typ.as_ref().map(NodeRef::expr));
                exprs(&mut out, &n.values);
            }
            NodeRef::TypeSpec(n) => {
                out.push(NodeRef::Ident(&n.name));
                out.extend(n.type_params.as_ref().map(NodeRef::FieldList));
                out.push(NodeRef::expr(&n.typ));
            }
            NodeRef::GenDecl(n) => out.extend(n.specs.iter().map(NodeRef::spec)),
            NodeRef::FuncDecl(n) => {
                out.extend(n.recv.as_ref().map(NodeRef::FieldList));
                out.push(NodeRef::Ident(&n.name));
                out.push(NodeRef::FuncType(&n.typ));
                out.extend(n.body.as_ref().map(NodeRef::BlockStmt));
            }
            NodeRef::Field(n) => {
                idents(&mut out, &n.names);
                out.push(NodeRef::expr(&n.typ));
                out.extend(n.tag.as_ref().map(NodeRef::BasicLit));
            }
            NodeRef::FieldList(n) => out.extend(n.list.iter().map(NodeRef::Field)),
            NodeRef::File(n) => {
                out.push(NodeRef::Ident(&n.name));
                out.extend(n.decls.iter().map(NodeRef::decl));
            }
            NodeRef::Package(n) => out.extend(n.files.values().map(NodeRef::File)),
        }
        out
    }
}

/// Pre-order walk; `visit` returns false to skip the children of a node
pub fn inspect<'a, F>(node: NodeRef<'a>, visit: &mut F)
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    if visit(node) {
        for child in node.children() {
            inspect(child, visit);
        }
    }
}

/// Render the tree with its spacing hints and non-empty slots, one node per
/// line
pub fn dump(node: NodeRef<'_>) -> String {
    let mut out = String::new();
    dump_into(node, 0, &mut out);
    out
}

fn dump_into(node: NodeRef<'_>, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&node.kind().to_string());
    match node {
        NodeRef::Ident(ident) => {
            out.push_str(&format!(" {:?}", ident.name));
            if ident.is_remote() {
                out.push_str(&format!(" path={:?}", ident.path));
            }
        }
        NodeRef::BasicLit(lit) => out.push_str(&format!(" {}", lit.value)),
        NodeRef::Package(pkg) => out.push_str(&format!(" {:?}", pkg.name)),
        _ => {}
    }
    if let Some(decs) = node.decs() {
        if decs.before() != SpaceType::None {
            out.push_str(&format!(" before={}", decs.before()));
        }
        for slot in decs.kind().slots() {
            if let Some(list) = decs.slot(*slot).filter(|list| !list.is_empty()) {
                out.push_str(&format!(" {slot}={:?}", list.all()));
            }
        }
        if decs.after() != SpaceType::None {
            out.push_str(&format!(" after={}", decs.after()));
        }
    }
    out.push('\n');
    for child in node.children() {
        dump_into(child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decor_syntax::Token;

    fn sample() -> File {
        let mut call = CallExpr::new(Ident::remote("fmt", "Println"), vec![BasicLit::string("hi").into()]);
        call.decs.end.push("// greet");
        let mut stmt = ExprStmt::new(call);
        stmt.decs.before = SpaceType::NewLine;
        stmt.decs.after = SpaceType::NewLine;

        let mut file = File::new("main");
        file.decls.push(Decl::Func(Box::new(FuncDecl {
            recv: None,
            name: Ident::new("main"),
            typ: FuncType {
                func: true,
                params: FieldList::new(vec![]),
                ..Default::default()
            },
            body: Some(BlockStmt::new(vec![stmt.into()])),
            decs: Default::default(),
        })));
        file
    }

    #[test]
    fn test_inspect_visits_in_source_order() {
        let file = sample();
        let mut kinds = Vec::new();
        inspect(NodeRef::File(&file), &mut |node| {
            kinds.push(node.kind());
            true
        });
        assert_eq!(
            kinds,
            vec![
                NodeKind::File,
                NodeKind::Ident,
                NodeKind::FuncDecl,
                NodeKind::Ident,
                NodeKind::FuncType,
                NodeKind::FieldList,
                NodeKind::BlockStmt,
                NodeKind::ExprStmt,
                NodeKind::CallExpr,
                NodeKind::Ident,
                NodeKind::BasicLit,
            ]
        );
    }

    #[test]
    fn test_inspect_can_prune() {
        let file = sample();
        let mut count = 0;
        inspect(NodeRef::File(&file), &mut |node| {
            count += 1;
            node.kind() != NodeKind::FuncDecl
        });
        assert_eq!(count, 3);
    }

    #[test]
    fn test_dump() {
        let file = sample();
        insta::assert_snapshot!(dump(NodeRef::File(&file)), @r#"
        File
          Ident "main"
          FuncDecl
            Ident "main"
            FuncType
              FieldList
            BlockStmt
              ExprStmt before=NewLine after=NewLine
                CallExpr End=["// greet"]
                  Ident "Println" path="fmt"
                  BasicLit "hi"
        "#);
    }

    #[test]
    fn test_kind_of_package() {
        let pkg = Package::default();
        assert_eq!(NodeRef::Package(&pkg).kind(), NodeKind::Package);
        assert!(NodeRef::Package(&pkg).decs().is_none());
        let lit = BasicLit::new(Token::Int, "1");
        assert_eq!(NodeRef::BasicLit(&lit).kind(), NodeKind::BasicLit);
    }
}
