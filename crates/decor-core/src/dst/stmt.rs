//! Decorated statements

use decor_syntax::Token;

use super::decorations::*;
use super::{CallExpr, Expr, GenDecl, Ident};

/// Any decorated statement
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Bad(Box<BadStmt>),
    Decl(Box<DeclStmt>),
    Empty(Box<EmptyStmt>),
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
    /// Decorations of the node held by this statement
    pub fn decs(&self) -> &dyn DecorationSet {
        match self {
            Stmt::Bad(s) => &s.decs,
            Stmt::Decl(s) => &s.decs,
            Stmt::Empty(s) => &s.decs,
            Stmt::Labeled(s) => &s.decs,
            Stmt::Expr(s) => &s.decs,
            Stmt::Send(s) => &s.decs,
            Stmt::IncDec(s) => &s.decs,
            Stmt::Assign(s) => &s.decs,
            Stmt::Go(s) => &s.decs,
            Stmt::Defer(s) => &s.decs,
            Stmt::Return(s) => &s.decs,
            Stmt::Branch(s) => &s.decs,
            Stmt::Block(s) => &s.decs,
            Stmt::If(s) => &s.decs,
            Stmt::CaseClause(s) => &s.decs,
            Stmt::Switch(s) => &s.decs,
            Stmt::TypeSwitch(s) => &s.decs,
            Stmt::CommClause(s) => &s.decs,
            Stmt::Select(s) => &s.decs,
            Stmt::For(s) => &s.decs,
            Stmt::Range(s) => &s.decs,
        }
    }

    pub fn decs_mut(&mut self) -> &mut dyn DecorationSet {
        match self {
            Stmt::Bad(s) => &mut s.decs,
            Stmt::Decl(s) => &mut s.decs,
            Stmt::Empty(s) => &mut s.decs,
            Stmt::Labeled(s) => &mut s.decs,
            Stmt::Expr(s) => &mut s.decs,
            Stmt::Send(s) => &mut s.decs,
            Stmt::IncDec(s) => &mut s.decs,
            Stmt::Assign(s) => &mut s.decs,
            Stmt::Go(s) => &mut s.decs,
            Stmt::Defer(s) => &mut s.decs,
            Stmt::Return(s) => &mut s.decs,
            Stmt::Branch(s) => &mut s.decs,
            Stmt::Block(s) => &mut s.decs,
            Stmt::If(s) => &mut s.decs,
            Stmt::CaseClause(s) => &mut s.decs,
            Stmt::Switch(s) => &mut s.decs,
            Stmt::TypeSwitch(s) => &mut s.decs,
            Stmt::CommClause(s) => &mut s.decs,
            Stmt::Select(s) => &mut s.decs,
            Stmt::For(s) => &mut s.decs,
            Stmt::Range(s) => &mut s.decs,
        }
    }
}

impl From<ExprStmt> for Stmt {
    fn from(stmt: ExprStmt) -> Self {
        Stmt::Expr(Box::new(stmt))
    }
}

impl From<AssignStmt> for Stmt {
    fn from(stmt: AssignStmt) -> Self {
        Stmt::Assign(Box::new(stmt))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BadStmt {
    pub length: usize,
    pub decs: BadStmtDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclStmt {
    pub decl: GenDecl,
    pub decs: DeclStmtDecs,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmptyStmt {
    /// Semicolon inserted by the scanner rather than written
    pub implicit: bool,
    pub decs: EmptyStmtDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStmt {
    pub label: Ident,
    pub stmt: Stmt,
    pub decs: LabeledStmtDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub x: Expr,
    pub decs: ExprStmtDecs,
}

impl ExprStmt {
    pub fn new(x: impl Into<Expr>) -> Self {
        Self {
            x: x.into(),
            decs: ExprStmtDecs::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendStmt {
    pub chan: Expr,
    pub value: Expr,
    pub decs: SendStmtDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncDecStmt {
    pub x: Expr,
    pub tok: Token,
    pub decs: IncDecStmtDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub lhs: Vec<Expr>,
    pub tok: Token,
    pub rhs: Vec<Expr>,
    pub decs: AssignStmtDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoStmt {
    pub call: CallExpr,
    pub decs: GoStmtDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeferStmt {
    pub call: CallExpr,
    pub decs: DeferStmtDecs,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReturnStmt {
    pub results: Vec<Expr>,
    pub decs: ReturnStmtDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchStmt {
    pub tok: Token,
    pub label: Option<Ident>,
    pub decs: BranchStmtDecs,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub list: Vec<Stmt>,
    pub decs: BlockStmtDecs,
}

impl BlockStmt {
    pub fn new(list: Vec<Stmt>) -> Self {
        Self {
            list,
            decs: BlockStmtDecs::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub init: Option<Stmt>,
    pub cond: Expr,
    pub body: BlockStmt,
    pub els: Option<Stmt>,
    pub decs: IfStmtDecs,
}

/// `case` clause; an empty list prints as `default`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaseClause {
    pub list: Vec<Expr>,
    pub body: Vec<Stmt>,
    pub decs: CaseClauseDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub init: Option<Stmt>,
    pub tag: Option<Expr>,
    pub body: BlockStmt,
    pub decs: SwitchStmtDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSwitchStmt {
    pub init: Option<Stmt>,
    pub assign: Stmt,
    pub body: BlockStmt,
    pub decs: TypeSwitchStmtDecs,
}

/// `case` clause of a select; a missing communication prints as `default`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommClause {
    pub comm: Option<Stmt>,
    pub body: Vec<Stmt>,
    pub decs: CommClauseDecs,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStmt {
    pub body: BlockStmt,
    pub decs: SelectStmtDecs,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForStmt {
    pub init: Option<Stmt>,
    pub cond: Option<Expr>,
    pub post: Option<Stmt>,
    pub body: BlockStmt,
    pub decs: ForStmtDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeStmt {
    pub key: Option<Expr>,
    pub value: Option<Expr>,
    /// `Illegal` when no key is declared
    pub tok: Token,
    pub x: Expr,
    pub body: BlockStmt,
    pub decs: RangeStmtDecs,
}
