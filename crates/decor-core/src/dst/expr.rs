//! Decorated expressions and types

use decor_syntax::ast::ChanDir;
use decor_syntax::Token;

use super::decorations::*;
use super::{BlockStmt, FieldList};

/// Any decorated expression or type expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Bad(Box<BadExpr>),
    Ident(Box<Ident>),
    Ellipsis(Box<Ellipsis>),
    BasicLit(Box<BasicLit>),
    FuncLit(Box<FuncLit>),
    CompositeLit(Box<CompositeLit>),
    Paren(Box<ParenExpr>),
    Selector(Box<SelectorExpr>),
    Index(Box<IndexExpr>),
    IndexList(Box<IndexListExpr>),
    Slice(Box<SliceExpr>),
    TypeAssert(Box<TypeAssertExpr>),
    Call(Box<CallExpr>),
    Star(Box<StarExpr>),
    Unary(Box<UnaryExpr>),
    Binary(Box<BinaryExpr>),
    KeyValue(Box<KeyValueExpr>),
    ArrayType(Box<ArrayType>),
    StructType(Box<StructType>),
    FuncType(Box<FuncType>),
    InterfaceType(Box<InterfaceType>),
    MapType(Box<MapType>),
    ChanType(Box<ChanType>),
}

impl Expr {
    /// Decorations of the node held by this expression
    pub fn decs(&self) -> &dyn DecorationSet {
        match self {
            Expr::Bad(x) => &x.decs,
            Expr::Ident(x) => &x.decs,
            Expr::Ellipsis(x) => &x.decs,
            Expr::BasicLit(x) => &x.decs,
            Expr::FuncLit(x) => &x.decs,
            Expr::CompositeLit(x) => &x.decs,
            Expr::Paren(x) => &x.decs,
            Expr::Selector(x) => &x.decs,
            Expr::Index(x) => &x.decs,
            Expr::IndexList(x) => &x.decs,
            Expr::Slice(x) => &x.decs,
            Expr::TypeAssert(x) => &x.decs,
            Expr::Call(x) => &x.decs,
            Expr::Star(x) => &x.decs,
            Expr::Unary(x) => &x.decs,
            Expr::Binary(x) => &x.decs,
            Expr::KeyValue(x) => &x.decs,
            Expr::ArrayType(x) => &x.decs,
            Expr::StructType(x) => &x.decs,
            Expr::FuncType(x) => &x.decs,
            Expr::InterfaceType(x) => &x.decs,
            Expr::MapType(x) => &x.decs,
            Expr::ChanType(x) => &x.decs,
        }
    }

    pub fn decs_mut(&mut self) -> &mut dyn DecorationSet {
        match self {
            Expr::Bad(x) => &mut x.decs,
            Expr::Ident(x) => &mut x.decs,
            Expr::Ellipsis(x) => &mut x.decs,
            Expr::BasicLit(x) => &mut x.decs,
            Expr::FuncLit(x) => &mut x.decs,
            Expr::CompositeLit(x) => &mut x.decs,
            Expr::Paren(x) => &mut x.decs,
            Expr::Selector(x) => &mut x.decs,
            Expr::Index(x) => &mut x.decs,
            Expr::IndexList(x) => &mut x.decs,
            Expr::Slice(x) => &mut x.decs,
            Expr::TypeAssert(x) => &mut x.decs,
            Expr::Call(x) => &mut x.decs,
            Expr::Star(x) => &mut x.decs,
            Expr::Unary(x) => &mut x.decs,
            Expr::Binary(x) => &mut x.decs,
            Expr::KeyValue(x) => &mut x.decs,
            Expr::ArrayType(x) => &mut x.decs,
            Expr::StructType(x) => &mut x.decs,
            Expr::FuncType(x) => &mut x.decs,
            Expr::InterfaceType(x) => &mut x.decs,
            Expr::MapType(x) => &mut x.decs,
            Expr::ChanType(x) => &mut x.decs,
        }
    }

    /// The identifier, if this expression is one
    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Expr::Ident(ident) => Some(ident),
            _ => None,
        }
    }
}

impl From<Ident> for Expr {
    fn from(ident: Ident) -> Self {
        Expr::Ident(Box::new(ident))
    }
}

impl From<BasicLit> for Expr {
    fn from(lit: BasicLit) -> Self {
        Expr::BasicLit(Box::new(lit))
    }
}

impl From<CallExpr> for Expr {
    fn from(call: CallExpr) -> Self {
        Expr::Call(Box::new(call))
    }
}

impl From<SelectorExpr> for Expr {
    fn from(sel: SelectorExpr) -> Self {
        Expr::Selector(Box::new(sel))
    }
}

/// Raw text that failed to parse, `length` bytes long
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BadExpr {
    pub length: usize,
    pub decs: BadExprDecs,
}

/// Identifier
///
/// A non-empty `path` marks a reference to a symbol declared in the package
/// with that import path. The restorer prints such identifiers qualified with
/// the package name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ident {
    pub name: String,
    pub path: String,
    pub decs: IdentDecs,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Reference to `name` in the package at `path`
    pub fn remote(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn is_remote(&self) -> bool {
        !self.path.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsis {
    pub elt: Option<Expr>,
    pub decs: EllipsisDecs,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BasicLit {
    pub kind: Token,
    pub value: String,
    pub decs: BasicLitDecs,
}

impl BasicLit {
    pub fn new(kind: Token, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            decs: BasicLitDecs::default(),
        }
    }

    /// Interpreted string literal for `text`
    pub fn string(text: &str) -> Self {
        Self::new(Token::String, format!("{text:?}"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncLit {
    pub typ: FuncType,
    pub body: BlockStmt,
    pub decs: FuncLitDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLit {
    pub typ: Option<Expr>,
    pub elts: Vec<Expr>,
    pub incomplete: bool,
    pub decs: CompositeLitDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub x: Expr,
    pub decs: ParenExprDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorExpr {
    pub x: Expr,
    pub sel: Ident,
    pub decs: SelectorExprDecs,
}

impl SelectorExpr {
    pub fn new(x: impl Into<Expr>, sel: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            sel: Ident::new(sel),
            decs: SelectorExprDecs::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub x: Expr,
    pub index: Expr,
    pub decs: IndexExprDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexListExpr {
    pub x: Expr,
    pub indices: Vec<Expr>,
    pub decs: IndexListExprDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliceExpr {
    pub x: Expr,
    pub low: Option<Expr>,
    pub high: Option<Expr>,
    pub max: Option<Expr>,
    pub slice3: bool,
    pub decs: SliceExprDecs,
}

/// `x.(T)`; a missing type stands for the `type` keyword of a type switch
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAssertExpr {
    pub x: Expr,
    pub typ: Option<Expr>,
    pub decs: TypeAssertExprDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub fun: Expr,
    pub args: Vec<Expr>,
    /// Trailing `...` after the last argument
    pub ellipsis: bool,
    pub decs: CallExprDecs,
}

impl CallExpr {
    pub fn new(fun: impl Into<Expr>, args: Vec<Expr>) -> Self {
        Self {
            fun: fun.into(),
            args,
            ellipsis: false,
            decs: CallExprDecs::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StarExpr {
    pub x: Expr,
    pub decs: StarExprDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: Token,
    pub x: Expr,
    pub decs: UnaryExprDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub x: Expr,
    pub op: Token,
    pub y: Expr,
    pub decs: BinaryExprDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueExpr {
    pub key: Expr,
    pub value: Expr,
    pub decs: KeyValueExprDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub len: Option<Expr>,
    pub elt: Expr,
    pub decs: ArrayTypeDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub fields: FieldList,
    pub incomplete: bool,
    pub decs: StructTypeDecs,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FuncType {
    /// Whether the `func` keyword is printed
    pub func: bool,
    pub type_params: Option<FieldList>,
    pub params: FieldList,
    pub results: Option<FieldList>,
    pub decs: FuncTypeDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub methods: FieldList,
    pub incomplete: bool,
    pub decs: InterfaceTypeDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub key: Expr,
    pub value: Expr,
    pub decs: MapTypeDecs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChanType {
    pub dir: ChanDir,
    pub value: Expr,
    pub decs: ChanTypeDecs,
}
