//! Expression and type nodes

use super::{BasicLit, BlockStmt, FieldList, Ident, Node};
use crate::token::{Pos, Token};

/// Any expression or type expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Bad(BadExpr),
    Ident(Ident),
    Ellipsis(Box<Ellipsis>),
    BasicLit(BasicLit),
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
    pub fn pos(&self) -> Pos {
        Node::expr(self).pos()
    }

    pub fn end(&self) -> Pos {
        Node::expr(self).end()
    }
}

impl From<Ident> for Expr {
    fn from(ident: Ident) -> Self {
        Expr::Ident(ident)
    }
}

impl From<BasicLit> for Expr {
    fn from(lit: BasicLit) -> Self {
        Expr::BasicLit(lit)
    }
}

/// Placeholder for an expression that failed to parse
#[derive(Debug, Clone, PartialEq)]
pub struct BadExpr {
    pub from: Pos,
    pub to: Pos,
}

/// `...` in parameter lists and array types
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsis {
    pub ellipsis: Pos,
    pub elt: Option<Expr>,
}

impl Ellipsis {
    pub fn end(&self) -> Pos {
        match &self.elt {
            Some(elt) => elt.end(),
            None => self.ellipsis.offset(3),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncLit {
    pub typ: FuncType,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLit {
    pub typ: Option<Expr>,
    pub lbrace: Pos,
    pub elts: Vec<Expr>,
    pub rbrace: Pos,
    pub incomplete: bool,
}

impl CompositeLit {
    pub fn pos(&self) -> Pos {
        match &self.typ {
            Some(typ) => typ.pos(),
            None => self.lbrace,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub lparen: Pos,
    pub x: Expr,
    pub rparen: Pos,
}

/// `x.sel`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorExpr {
    pub x: Expr,
    pub sel: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub x: Expr,
    pub lbrack: Pos,
    pub index: Expr,
    pub rbrack: Pos,
}

/// Instantiation with several type arguments, `x[A, B]`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexListExpr {
    pub x: Expr,
    pub lbrack: Pos,
    pub indices: Vec<Expr>,
    pub rbrack: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliceExpr {
    pub x: Expr,
    pub lbrack: Pos,
    pub low: Option<Expr>,
    pub high: Option<Expr>,
    pub max: Option<Expr>,
    /// Three-index form `x[a:b:c]`
    pub slice3: bool,
    pub rbrack: Pos,
}

/// `x.(T)`, or `x.(type)` in a type switch when `typ` is absent
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAssertExpr {
    pub x: Expr,
    pub lparen: Pos,
    pub typ: Option<Expr>,
    pub rparen: Pos,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub fun: Expr,
    pub lparen: Pos,
    pub args: Vec<Expr>,
    /// Position of a trailing `...`, if any
    pub ellipsis: Pos,
    pub rparen: Pos,
}

impl CallExpr {
    pub fn pos(&self) -> Pos {
        self.fun.pos()
    }

    pub fn end(&self) -> Pos {
        self.rparen.offset(1)
    }
}

/// Pointer type or dereference
#[derive(Debug, Clone, PartialEq)]
pub struct StarExpr {
    pub star: Pos,
    pub x: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op_pos: Pos,
    pub op: Token,
    pub x: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub x: Expr,
    pub op_pos: Pos,
    pub op: Token,
    pub y: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueExpr {
    pub key: Expr,
    pub colon: Pos,
    pub value: Expr,
}

/// Array or slice type; slices have no length
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub lbrack: Pos,
    pub len: Option<Expr>,
    pub elt: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub struct_pos: Pos,
    pub fields: FieldList,
    pub incomplete: bool,
}

/// Function signature
///
/// `func` is absent for method signatures inside interfaces and for the
/// signature of a function declaration restored without its keyword.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FuncType {
    pub func: Pos,
    pub type_params: Option<FieldList>,
    pub params: FieldList,
    pub results: Option<FieldList>,
}

impl FuncType {
    pub fn pos(&self) -> Pos {
        if self.func.is_valid() {
            self.func
        } else {
            self.params.pos()
        }
    }

    pub fn end(&self) -> Pos {
        match &self.results {
            Some(results) => results.end(),
            None => self.params.end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub interface: Pos,
    pub methods: FieldList,
    pub incomplete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub map: Pos,
    pub key: Expr,
    pub value: Expr,
}

/// Channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChanType {
    /// Position of `chan`, or of `<-` for receive-only channels
    pub begin: Pos,
    /// Position of `<-` for directional channels
    pub arrow: Pos,
    pub dir: ChanDir,
    pub value: Expr,
}
