//! Plain Go syntax trees
//!
//! These trees carry absolute [`Pos`] values for every node and for the
//! tokens whose position the Go grammar records. Comments are not attached
//! to nodes: every comment of a file lives in [`File::comments`], sorted by
//! position.
//!
//! [`Node`] is a borrowed view over any node kind. It is what resolvers and
//! the decoration engine use to refer to a node without knowing its type.

mod decl;
mod expr;
mod stmt;

use std::collections::BTreeMap;
use std::fmt;

pub use decl::*;
pub use expr::*;
pub use stmt::*;

use crate::token::{Pos, Token};

/// Identifier
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ident {
    pub name_pos: Pos,
    pub name: String,
}

impl Ident {
    /// An identifier without position
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name_pos: Pos::NONE,
            name: name.into(),
        }
    }

    pub fn at(name_pos: Pos, name: impl Into<String>) -> Self {
        Self {
            name_pos,
            name: name.into(),
        }
    }

    pub fn pos(&self) -> Pos {
        self.name_pos
    }

    pub fn end(&self) -> Pos {
        self.name_pos.offset(self.name.len())
    }

    /// Whether the identifier starts with an upper-case letter
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

/// Literal of basic type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicLit {
    pub value_pos: Pos,
    /// `Int`, `Float`, `Imag`, `Char` or `String`
    pub kind: Token,
    /// Literal source text, quotes included
    pub value: String,
}

impl BasicLit {
    pub fn new(kind: Token, value: impl Into<String>) -> Self {
        Self {
            value_pos: Pos::NONE,
            kind,
            value: value.into(),
        }
    }

    pub fn pos(&self) -> Pos {
        self.value_pos
    }

    pub fn end(&self) -> Pos {
        self.value_pos.offset(self.value.len())
    }
}

/// A single `//` or `/* */` comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub slash: Pos,
    /// Comment text, markers included
    pub text: String,
}

impl Comment {
    pub fn new(slash: Pos, text: impl Into<String>) -> Self {
        Self {
            slash,
            text: text.into(),
        }
    }

    pub fn pos(&self) -> Pos {
        self.slash
    }

    pub fn end(&self) -> Pos {
        self.slash.offset(self.text.len())
    }

    pub fn is_line(&self) -> bool {
        self.text.starts_with("//")
    }
}

/// Sequence of comments with no tokens and no empty lines between them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    pub fn pos(&self) -> Pos {
        self.list.first().map_or(Pos::NONE, Comment::pos)
    }

    pub fn end(&self) -> Pos {
        self.list.last().map_or(Pos::NONE, Comment::end)
    }
}

/// A parameter, result, struct field or interface element
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub names: Vec<Ident>,
    pub typ: Expr,
    pub tag: Option<BasicLit>,
}

impl Field {
    pub fn pos(&self) -> Pos {
        match self.names.first() {
            Some(name) => name.pos(),
            None => self.typ.pos(),
        }
    }

    pub fn end(&self) -> Pos {
        match &self.tag {
            Some(tag) => tag.end(),
            None => self.typ.end(),
        }
    }
}

/// Fields enclosed in parentheses, brackets or braces
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    pub opening: Pos,
    pub list: Vec<Field>,
    pub closing: Pos,
}

impl FieldList {
    pub fn pos(&self) -> Pos {
        if self.opening.is_valid() {
            return self.opening;
        }
        self.list.first().map_or(Pos::NONE, Field::pos)
    }

    pub fn end(&self) -> Pos {
        if self.closing.is_valid() {
            return self.closing.offset(1);
        }
        self.list.last().map_or(Pos::NONE, Field::end)
    }

    /// Number of parameters or fields, counting every name
    pub fn num_fields(&self) -> usize {
        self.list.iter().map(|field| field.names.len().max(1)).sum()
    }
}

/// A Go source file
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub package: Pos,
    pub name: Ident,
    pub decls: Vec<Decl>,
    pub comments: Vec<CommentGroup>,
}

impl File {
    pub fn pos(&self) -> Pos {
        self.package
    }

    pub fn end(&self) -> Pos {
        match self.decls.last() {
            Some(decl) => decl.end(),
            None => self.name.end(),
        }
    }

    /// Import specs of every import declaration, in source order
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

/// Files of one package, keyed by file name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Package {
    pub name: String,
    pub files: BTreeMap<String, File>,
}

/// Kinds of syntax nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    BadExpr,
    Ident,
    Ellipsis,
    BasicLit,
    FuncLit,
    CompositeLit,
    ParenExpr,
    SelectorExpr,
    IndexExpr,
    IndexListExpr,
    SliceExpr,
    TypeAssertExpr,
    CallExpr,
    StarExpr,
    UnaryExpr,
    BinaryExpr,
    KeyValueExpr,
    ArrayType,
    StructType,
    FuncType,
    InterfaceType,
    MapType,
    ChanType,
    BadStmt,
    DeclStmt,
    EmptyStmt,
    LabeledStmt,
    ExprStmt,
    SendStmt,
    IncDecStmt,
    AssignStmt,
    GoStmt,
    DeferStmt,
    ReturnStmt,
    BranchStmt,
    BlockStmt,
    IfStmt,
    CaseClause,
    SwitchStmt,
    TypeSwitchStmt,
    CommClause,
    SelectStmt,
    ForStmt,
    RangeStmt,
    ImportSpec,
    ValueSpec,
    TypeSpec,
    BadDecl,
    GenDecl,
    FuncDecl,
    Field,
    FieldList,
    File,
    Package,
}

impl NodeKind {
    /// Every node kind, in declaration order
    pub const ALL: [NodeKind; 54] = [
        NodeKind::BadExpr,
        NodeKind::Ident,
        NodeKind::Ellipsis,
        NodeKind::BasicLit,
        NodeKind::FuncLit,
        NodeKind::CompositeLit,
        NodeKind::ParenExpr,
        NodeKind::SelectorExpr,
        NodeKind::IndexExpr,
        NodeKind::IndexListExpr,
        NodeKind::SliceExpr,
        NodeKind::TypeAssertExpr,
        NodeKind::CallExpr,
        NodeKind::StarExpr,
        NodeKind::UnaryExpr,
        NodeKind::BinaryExpr,
        NodeKind::KeyValueExpr,
        NodeKind::ArrayType,
        NodeKind::StructType,
        NodeKind::FuncType,
        NodeKind::InterfaceType,
        NodeKind::MapType,
        NodeKind::ChanType,
        NodeKind::BadStmt,
        NodeKind::DeclStmt,
        NodeKind::EmptyStmt,
        NodeKind::LabeledStmt,
        NodeKind::ExprStmt,
        NodeKind::SendStmt,
        NodeKind::IncDecStmt,
        NodeKind::AssignStmt,
        NodeKind::GoStmt,
        NodeKind::DeferStmt,
        NodeKind::ReturnStmt,
        NodeKind::BranchStmt,
        NodeKind::BlockStmt,
        NodeKind::IfStmt,
        NodeKind::CaseClause,
        NodeKind::SwitchStmt,
        NodeKind::TypeSwitchStmt,
        NodeKind::CommClause,
        NodeKind::SelectStmt,
        NodeKind::ForStmt,
        NodeKind::RangeStmt,
        NodeKind::ImportSpec,
        NodeKind::ValueSpec,
        NodeKind::TypeSpec,
        NodeKind::BadDecl,
        NodeKind::GenDecl,
        NodeKind::FuncDecl,
        NodeKind::Field,
        NodeKind::FieldList,
        NodeKind::File,
        NodeKind::Package,
    ];
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Borrowed reference to a node of any kind
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
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

/// Apply `$body` to the reference held by any [`Node`] variant
macro_rules! with_node {
    ($node:expr, $n:ident => $body:expr) => {
        match $node {
            Node::BadExpr($n) => $body,
            Node::Ident($n) => $body,
            Node::Ellipsis($n) => $body,
            Node::BasicLit($n) => $body,
            Node::FuncLit($n) => $body,
            Node::CompositeLit($n) => $body,
            Node::ParenExpr($n) => $body,
            Node::SelectorExpr($n) => $body,
            Node::IndexExpr($n) => $body,
            Node::IndexListExpr($n) => $body,
            Node::SliceExpr($n) => $body,
            Node::TypeAssertExpr($n) => $body,
            Node::CallExpr($n) => $body,
            Node::StarExpr($n) => $body,
            Node::UnaryExpr($n) => $body,
            Node::BinaryExpr($n) => $body,
            Node::KeyValueExpr($n) => $body,
            Node::ArrayType($n) => $body,
            Node::StructType($n) => $body,
            Node::FuncType($n) => $body,
            Node::InterfaceType($n) => $body,
            Node::MapType($n) => $body,
            Node::ChanType($n) => $body,
            Node::BadStmt($n) => $body,
            Node::DeclStmt($n) => $body,
            Node::EmptyStmt($n) => $body,
            Node::LabeledStmt($n) => $body,
            Node::ExprStmt($n) => $body,
            Node::SendStmt($n) => $body,
            Node::IncDecStmt($n) => $body,
            Node::AssignStmt($n) => $body,
            Node::GoStmt($n) => $body,
            Node::DeferStmt($n) => $body,
            Node::ReturnStmt($n) => $body,
            Node::BranchStmt($n) => $body,
            Node::BlockStmt($n) => $body,
            Node::IfStmt($n) => $body,
            Node::CaseClause($n) => $body,
            Node::SwitchStmt($n) => $body,
            Node::TypeSwitchStmt($n) => $body,
            Node::CommClause($n) => $body,
            Node::SelectStmt($n) => $body,
            Node::ForStmt($n) => $body,
            Node::RangeStmt($n) => $body,
            Node::ImportSpec($n) => $body,
            Node::ValueSpec($n) => $body,
            Node::TypeSpec($n) => $body,
            Node::BadDecl($n) => $body,
            Node::GenDecl($n) => $body,
            Node::FuncDecl($n) => $body,
            Node::Field($n) => $body,
            Node::FieldList($n) => $body,
            Node::File($n) => $body,
            Node::Package($n) => $body,
        }
    };
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::BadExpr(_) => NodeKind::BadExpr,
            Node::Ident(_) => NodeKind::Ident,
            Node::Ellipsis(_) => NodeKind::Ellipsis,
            Node::BasicLit(_) => NodeKind::BasicLit,
            Node::FuncLit(_) => NodeKind::FuncLit,
            Node::CompositeLit(_) => NodeKind::CompositeLit,
            Node::ParenExpr(_) => NodeKind::ParenExpr,
            Node::SelectorExpr(_) => NodeKind::SelectorExpr,
            Node::IndexExpr(_) => NodeKind::IndexExpr,
            Node::IndexListExpr(_) => NodeKind::IndexListExpr,
            Node::SliceExpr(_) => NodeKind::SliceExpr,
            Node::TypeAssertExpr(_) => NodeKind::TypeAssertExpr,
            Node::CallExpr(_) => NodeKind::CallExpr,
            Node::StarExpr(_) => NodeKind::StarExpr,
            Node::UnaryExpr(_) => NodeKind::UnaryExpr,
            Node::BinaryExpr(_) => NodeKind::BinaryExpr,
            Node::KeyValueExpr(_) => NodeKind::KeyValueExpr,
            Node::ArrayType(_) => NodeKind::ArrayType,
            Node::StructType(_) => NodeKind::StructType,
            Node::FuncType(_) => NodeKind::FuncType,
            Node::InterfaceType(_) => NodeKind::InterfaceType,
            Node::MapType(_) => NodeKind::MapType,
            Node::ChanType(_) => NodeKind::ChanType,
            Node::BadStmt(_) => NodeKind::BadStmt,
            Node::DeclStmt(_) => NodeKind::DeclStmt,
            Node::EmptyStmt(_) => NodeKind::EmptyStmt,
            Node::LabeledStmt(_) => NodeKind::LabeledStmt,
            Node::ExprStmt(_) => NodeKind::ExprStmt,
            Node::SendStmt(_) => NodeKind::SendStmt,
            Node::IncDecStmt(_) => NodeKind::IncDecStmt,
            Node::AssignStmt(_) => NodeKind::AssignStmt,
            Node::GoStmt(_) => NodeKind::GoStmt,
            Node::DeferStmt(_) => NodeKind::DeferStmt,
            Node::ReturnStmt(_) => NodeKind::ReturnStmt,
            Node::BranchStmt(_) => NodeKind::BranchStmt,
            Node::BlockStmt(_) => NodeKind::BlockStmt,
            Node::IfStmt(_) => NodeKind::IfStmt,
            Node::CaseClause(_) => NodeKind::CaseClause,
            Node::SwitchStmt(_) => NodeKind::SwitchStmt,
            Node::TypeSwitchStmt(_) => NodeKind::TypeSwitchStmt,
            Node::CommClause(_) => NodeKind::CommClause,
            Node::SelectStmt(_) => NodeKind::SelectStmt,
            Node::ForStmt(_) => NodeKind::ForStmt,
            Node::RangeStmt(_) => NodeKind::RangeStmt,
            Node::ImportSpec(_) => NodeKind::ImportSpec,
            Node::ValueSpec(_) => NodeKind::ValueSpec,
            Node::TypeSpec(_) => NodeKind::TypeSpec,
            Node::BadDecl(_) => NodeKind::BadDecl,
            Node::GenDecl(_) => NodeKind::GenDecl,
            Node::FuncDecl(_) => NodeKind::FuncDecl,
            Node::Field(_) => NodeKind::Field,
            Node::FieldList(_) => NodeKind::FieldList,
            Node::File(_) => NodeKind::File,
            Node::Package(_) => NodeKind::Package,
        }
    }

    /// Address of the referenced node
    ///
    /// Together with [`Node::kind`] this identifies a node for as long as
    /// the tree is borrowed.
    pub fn addr(&self) -> usize {
        with_node!(self, n => std::ptr::from_ref(*n) as *const () as usize)
    }

    pub fn pos(&self) -> Pos {
        match *self {
            Node::BadExpr(n) => n.from,
            Node::Ident(n) => n.pos(),
            Node::Ellipsis(n) => n.ellipsis,
            Node::BasicLit(n) => n.pos(),
            Node::FuncLit(n) => n.typ.pos(),
            Node::CompositeLit(n) => n.pos(),
            Node::ParenExpr(n) => n.lparen,
            Node::SelectorExpr(n) => n.x.pos(),
            Node::IndexExpr(n) => n.x.pos(),
            Node::IndexListExpr(n) => n.x.pos(),
            Node::SliceExpr(n) => n.x.pos(),
            Node::TypeAssertExpr(n) => n.x.pos(),
            Node::CallExpr(n) => n.pos(),
            Node::StarExpr(n) => n.star,
            Node::UnaryExpr(n) => n.op_pos,
            Node::BinaryExpr(n) => n.x.pos(),
            Node::KeyValueExpr(n) => n.key.pos(),
            Node::ArrayType(n) => n.lbrack,
            Node::StructType(n) => n.struct_pos,
            Node::FuncType(n) => n.pos(),
            Node::InterfaceType(n) => n.interface,
            Node::MapType(n) => n.map,
            Node::ChanType(n) => n.begin,
            Node::BadStmt(n) => n.from,
            Node::DeclStmt(n) => n.decl.tok_pos,
            Node::EmptyStmt(n) => n.semicolon,
            Node::LabeledStmt(n) => n.label.pos(),
            Node::ExprStmt(n) => n.x.pos(),
            Node::SendStmt(n) => n.chan.pos(),
            Node::IncDecStmt(n) => n.x.pos(),
            Node::AssignStmt(n) => n.lhs.first().map_or(n.tok_pos, Expr::pos),
            Node::GoStmt(n) => n.go,
            Node::DeferStmt(n) => n.defer,
            Node::ReturnStmt(n) => n.return_pos,
            Node::BranchStmt(n) => n.tok_pos,
            Node::BlockStmt(n) => n.pos(),
            Node::IfStmt(n) => n.if_pos,
            Node::CaseClause(n) => n.case,
            Node::SwitchStmt(n) => n.switch,
            Node::TypeSwitchStmt(n) => n.switch,
            Node::CommClause(n) => n.case,
            Node::SelectStmt(n) => n.select,
            Node::ForStmt(n) => n.for_pos,
            Node::RangeStmt(n) => n.for_pos,
            Node::ImportSpec(n) => n.pos(),
            Node::ValueSpec(n) => n.names.first().map_or(Pos::NONE, Ident::pos),
            Node::TypeSpec(n) => n.name.pos(),
            Node::BadDecl(n) => n.from,
            Node::GenDecl(n) => n.tok_pos,
            Node::FuncDecl(n) => n.pos(),
            Node::Field(n) => n.pos(),
            Node::FieldList(n) => n.pos(),
            Node::File(n) => n.pos(),
            Node::Package(_) => Pos::NONE,
        }
    }

    pub fn end(&self) -> Pos {
        match *self {
            Node::Ident(n) => n.end(),
            Node::BasicLit(n) => n.end(),
            Node::Ellipsis(n) => n.end(),
            Node::CallExpr(n) => n.end(),
            Node::FuncType(n) => n.end(),
            Node::BlockStmt(n) => n.end(),
            Node::ImportSpec(n) => n.end(),
            Node::ValueSpec(n) => n.end(),
            Node::TypeSpec(n) => n.typ.end(),
            Node::GenDecl(n) => n.end(),
            Node::FuncDecl(n) => n.end(),
            Node::BadDecl(n) => n.to,
            Node::Field(n) => n.end(),
            Node::FieldList(n) => n.end(),
            Node::File(n) => n.end(),
            Node::Package(_) => Pos::NONE,
            Node::BadExpr(n) => n.to,
            Node::FuncLit(n) => n.body.end(),
            Node::CompositeLit(n) => n.rbrace.offset(1),
            Node::ParenExpr(n) => n.rparen.offset(1),
            Node::SelectorExpr(n) => n.sel.end(),
            Node::IndexExpr(n) => n.rbrack.offset(1),
            Node::IndexListExpr(n) => n.rbrack.offset(1),
            Node::SliceExpr(n) => n.rbrack.offset(1),
            Node::TypeAssertExpr(n) => n.rparen.offset(1),
            Node::StarExpr(n) => n.x.end(),
            Node::UnaryExpr(n) => n.x.end(),
            Node::BinaryExpr(n) => n.y.end(),
            Node::KeyValueExpr(n) => n.value.end(),
            Node::ArrayType(n) => n.elt.end(),
            Node::StructType(n) => n.fields.end(),
            Node::InterfaceType(n) => n.methods.end(),
            Node::MapType(n) => n.value.end(),
            Node::ChanType(n) => n.value.end(),
            Node::BadStmt(n) => n.to,
            Node::DeclStmt(n) => n.decl.end(),
            Node::EmptyStmt(n) => {
                if n.implicit {
                    n.semicolon
                } else {
                    n.semicolon.offset(1)
                }
            }
            Node::LabeledStmt(n) => n.stmt.end(),
            Node::ExprStmt(n) => n.x.end(),
            Node::SendStmt(n) => n.value.end(),
            Node::IncDecStmt(n) => n.tok_pos.offset(2),
            Node::AssignStmt(n) => n
                .rhs
                .last()
                .map_or(n.tok_pos.offset(n.tok.width()), Expr::end),
            Node::GoStmt(n) => n.call.end(),
            Node::DeferStmt(n) => n.call.end(),
            Node::ReturnStmt(n) => match n.results.last() {
                Some(last) => last.end(),
                None => n.return_pos.offset(Token::Return.width()),
            },
            Node::BranchStmt(n) => match &n.label {
                Some(label) => label.end(),
                None => n.tok_pos.offset(n.tok.width()),
            },
            Node::IfStmt(n) => match &n.els {
                Some(els) => els.end(),
                None => n.body.end(),
            },
            Node::CaseClause(n) => n.body.last().map_or(n.colon.offset(1), Stmt::end),
            Node::SwitchStmt(n) => n.body.end(),
            Node::TypeSwitchStmt(n) => n.body.end(),
            Node::CommClause(n) => n.body.last().map_or(n.colon.offset(1), Stmt::end),
            Node::SelectStmt(n) => n.body.end(),
            Node::ForStmt(n) => n.body.end(),
            Node::RangeStmt(n) => n.body.end(),
        }
    }

    /// View over the concrete node held by an expression
    pub fn expr(expr: &'a Expr) -> Self {
        match expr {
            Expr::Bad(x) => Node::BadExpr(x),
            Expr::Ident(x) => Node::Ident(x),
            Expr::Ellipsis(x) => Node::Ellipsis(x),
            Expr::BasicLit(x) => Node::BasicLit(x),
            Expr::FuncLit(x) => Node::FuncLit(x),
            Expr::CompositeLit(x) => Node::CompositeLit(x),
            Expr::Paren(x) => Node::ParenExpr(x),
            Expr::Selector(x) => Node::SelectorExpr(x),
            Expr::Index(x) => Node::IndexExpr(x),
            Expr::IndexList(x) => Node::IndexListExpr(x),
            Expr::Slice(x) => Node::SliceExpr(x),
            Expr::TypeAssert(x) => Node::TypeAssertExpr(x),
            Expr::Call(x) => Node::CallExpr(x),
            Expr::Star(x) => Node::StarExpr(x),
            Expr::Unary(x) => Node::UnaryExpr(x),
            Expr::Binary(x) => Node::BinaryExpr(x),
            Expr::KeyValue(x) => Node::KeyValueExpr(x),
            Expr::ArrayType(x) => Node::ArrayType(x),
            Expr::StructType(x) => Node::StructType(x),
            Expr::FuncType(x) => Node::FuncType(x),
            Expr::InterfaceType(x) => Node::InterfaceType(x),
            Expr::MapType(x) => Node::MapType(x),
            Expr::ChanType(x) => Node::ChanType(x),
        }
    }

    /// View over the concrete node held by a statement
    pub fn stmt(stmt: &'a Stmt) -> Self {
        match stmt {
            Stmt::Bad(s) => Node::BadStmt(s),
            Stmt::Decl(s) => Node::DeclStmt(s),
            Stmt::Empty(s) => Node::EmptyStmt(s),
            Stmt::Labeled(s) => Node::LabeledStmt(s),
            Stmt::Expr(s) => Node::ExprStmt(s),
            Stmt::Send(s) => Node::SendStmt(s),
            Stmt::IncDec(s) => Node::IncDecStmt(s),
            Stmt::Assign(s) => Node::AssignStmt(s),
            Stmt::Go(s) => Node::GoStmt(s),
            Stmt::Defer(s) => Node::DeferStmt(s),
            Stmt::Return(s) => Node::ReturnStmt(s),
            Stmt::Branch(s) => Node::BranchStmt(s),
            Stmt::Block(s) => Node::BlockStmt(s),
            Stmt::If(s) => Node::IfStmt(s),
            Stmt::CaseClause(s) => Node::CaseClause(s),
            Stmt::Switch(s) => Node::SwitchStmt(s),
            Stmt::TypeSwitch(s) => Node::TypeSwitchStmt(s),
            Stmt::CommClause(s) => Node::CommClause(s),
            Stmt::Select(s) => Node::SelectStmt(s),
            Stmt::For(s) => Node::ForStmt(s),
            Stmt::Range(s) => Node::RangeStmt(s),
        }
    }

    pub fn decl(decl: &'a Decl) -> Self {
        match decl {
            Decl::Bad(d) => Node::BadDecl(d),
            Decl::Gen(d) => Node::GenDecl(d),
            Decl::Func(d) => Node::FuncDecl(d),
        }
    }

    pub fn spec(spec: &'a Spec) -> Self {
        match spec {
            Spec::Import(s) => Node::ImportSpec(s),
            Spec::Value(s) => Node::ValueSpec(s),
            Spec::Type(s) => Node::TypeSpec(s),
        }
    }

    /// Whether both views refer to the same node
    pub fn same(&self, other: &Node<'_>) -> bool {
        self.kind() == other.kind() && self.addr() == other.addr()
    }
}
