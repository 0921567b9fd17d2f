//! Statement nodes

use super::{CallExpr, Expr, GenDecl, Ident, Node};
use crate::token::{Pos, Token};

/// Any statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Bad(BadStmt),
    Decl(Box<DeclStmt>),
    Empty(EmptyStmt),
    Labeled(Box<LabeledStmt>),
    Expr(Box<ExprStmt>),
    Send(Box<SendStmt>),
    IncDec(Box<IncDecStmt>),
    Assign(Box<AssignStmt>),
    Go(Box<GoStmt>),
    Defer(Box<DeferStmt>),
    Return(Box<ReturnStmt>),
    Branch(Box<BranchStmt>),
    Block(Box<BlockStmt>),
    If(Box<IfStmt>),
    CaseClause(Box<CaseClause>),
    Switch(Box<SwitchStmt>),
    TypeSwitch(Box<TypeSwitchStmt>),
    CommClause(Box<CommClause>),
    Select(Box<SelectStmt>),
    For(Box<ForStmt>),
    Range(Box<RangeStmt>),
}

impl Stmt {
    pub fn pos(&self) -> Pos {
        Node::stmt(self).pos()
    }

    pub fn end(&self) -> Pos {
        Node::stmt(self).end()
    }
}

impl From<ExprStmt> for Stmt {
    fn from(stmt: ExprStmt) -> Self {
        Stmt::Expr(Box::new(stmt))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BadStmt {
    pub from: Pos,
    pub to: Pos,
}

/// A declaration in statement position
#[derive(Debug, Clone, PartialEq)]
pub struct DeclStmt {
    pub decl: GenDecl,
}

/// An explicit `;` or one inserted by the scanner
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyStmt {
    pub semicolon: Pos,
    pub implicit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStmt {
    pub label: Ident,
    pub colon: Pos,
    pub stmt: Stmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub x: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendStmt {
    pub chan: Expr,
    pub arrow: Pos,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncDecStmt {
    pub x: Expr,
    pub tok_pos: Pos,
    /// `Inc` or `Dec`
    pub tok: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub lhs: Vec<Expr>,
    pub tok_pos: Pos,
    pub tok: Token,
    pub rhs: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoStmt {
    pub go: Pos,
    pub call: CallExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeferStmt {
    pub defer: Pos,
    pub call: CallExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub return_pos: Pos,
    pub results: Vec<Expr>,
}

/// `break`, `continue`, `goto` or `fallthrough`
#[derive(Debug, Clone, PartialEq)]
pub struct BranchStmt {
    pub tok_pos: Pos,
    pub tok: Token,
    pub label: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub lbrace: Pos,
    pub list: Vec<Stmt>,
    pub rbrace: Pos,
}

impl BlockStmt {
    pub fn pos(&self) -> Pos {
        self.lbrace
    }

    pub fn end(&self) -> Pos {
        self.rbrace.offset(1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub if_pos: Pos,
    pub init: Option<Stmt>,
    pub cond: Expr,
    pub body: BlockStmt,
    /// Either another `IfStmt` or a `BlockStmt`
    pub els: Option<Stmt>,
}

/// A `case` or `default` clause of an expression or type switch
#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub case: Pos,
    /// Empty for `default`
    pub list: Vec<Expr>,
    pub colon: Pos,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub switch: Pos,
    pub init: Option<Stmt>,
    pub tag: Option<Expr>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSwitchStmt {
    pub switch: Pos,
    pub init: Option<Stmt>,
    /// `x := y.(type)` or `y.(type)`
    pub assign: Stmt,
    pub body: BlockStmt,
}

/// A `case` or `default` clause of a select statement
#[derive(Debug, Clone, PartialEq)]
pub struct CommClause {
    pub case: Pos,
    /// Send or receive statement; absent for `default`
    pub comm: Option<Stmt>,
    pub colon: Pos,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    pub select: Pos,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub for_pos: Pos,
    pub init: Option<Stmt>,
    pub cond: Option<Expr>,
    pub post: Option<Stmt>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeStmt {
    pub for_pos: Pos,
    pub key: Option<Expr>,
    pub value: Option<Expr>,
    pub tok_pos: Pos,
    /// `Illegal` when there is no key, else `Define` or `Assign`
    pub tok: Token,
    pub range: Pos,
    pub x: Expr,
    pub body: BlockStmt,
}
