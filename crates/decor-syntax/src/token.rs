//! Go lexical tokens and source positions
//!
//! Mirrors the token set of the Go language. Only the parts the decoration
//! engine relies on are modeled: the printed text of every operator and
//! keyword (used to compute how many bytes a token occupies) and a compact
//! position type.

use std::fmt;

/// A position in a [`FileSet`](crate::position::FileSet).
///
/// A `Pos` is an absolute byte offset biased by the base of the file it
/// belongs to. The zero value is reserved for "no position".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(usize);

impl Pos {
    /// The absent position
    pub const NONE: Pos = Pos(0);

    /// Create a position from its raw value
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Raw value of this position
    pub const fn get(self) -> usize {
        self.0
    }

    /// Whether this position denotes an actual location
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// The position `n` bytes after this one
    ///
    /// Invalid positions stay invalid.
    pub const fn offset(self, n: usize) -> Self {
        if self.is_valid() { Self(self.0 + n) } else { self }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("-")
        }
    }
}

/// Go token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Token {
    #[default]
    Illegal,
    Eof,
    Comment,

    // Literals
    Ident,
    Int,
    Float,
    Imag,
    Char,
    String,

    // Operators and delimiters
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
    LAnd,
    LOr,
    Arrow,
    Inc,
    Dec,
    Eql,
    Lss,
    Gtr,
    Assign,
    Not,
    Neq,
    Leq,
    Geq,
    Define,
    Ellipsis,
    LParen,
    LBrack,
    LBrace,
    Comma,
    Period,
    RParen,
    RBrack,
    RBrace,
    Semicolon,
    Colon,
    Tilde,

    // Keywords
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

const KEYWORDS: &[Token] = &[
    Token::Break,
    Token::Case,
    Token::Chan,
    Token::Const,
    Token::Continue,
    Token::Default,
    Token::Defer,
    Token::Else,
    Token::Fallthrough,
    Token::For,
    Token::Func,
    Token::Go,
    Token::Goto,
    Token::If,
    Token::Import,
    Token::Interface,
    Token::Map,
    Token::Package,
    Token::Range,
    Token::Return,
    Token::Select,
    Token::Struct,
    Token::Switch,
    Token::Type,
    Token::Var,
];

impl Token {
    /// Source text of the token
    ///
    /// Literal classes return their class name, as there is no fixed text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Token::Illegal => "ILLEGAL",
            Token::Eof => "EOF",
            Token::Comment => "COMMENT",
            Token::Ident => "IDENT",
            Token::Int => "INT",
            Token::Float => "FLOAT",
            Token::Imag => "IMAG",
            Token::Char => "CHAR",
            Token::String => "STRING",
            Token::Add => "+",
            Token::Sub => "-",
            Token::Mul => "*",
            Token::Quo => "/",
            Token::Rem => "%",
            Token::And => "&",
            Token::Or => "|",
            Token::Xor => "^",
            Token::Shl => "<<",
            Token::Shr => ">>",
            Token::AndNot => "&^",
            Token::AddAssign => "+=",
            Token::SubAssign => "-=",
            Token::MulAssign => "*=",
            Token::QuoAssign => "/=",
            Token::RemAssign => "%=",
            Token::AndAssign => "&=",
            Token::OrAssign => "|=",
            Token::XorAssign => "^=",
            Token::ShlAssign => "<<=",
            Token::ShrAssign => ">>=",
            Token::AndNotAssign => "&^=",
            Token::LAnd => "&&",
            Token::LOr => "||",
            Token::Arrow => "<-",
            Token::Inc => "++",
            Token::Dec => "--",
            Token::Eql => "==",
            Token::Lss => "<",
            Token::Gtr => ">",
            Token::Assign => "=",
            Token::Not => "!",
            Token::Neq => "!=",
            Token::Leq => "<=",
            Token::Geq => ">=",
            Token::Define => ":=",
            Token::Ellipsis => "...",
            Token::LParen => "(",
            Token::LBrack => "[",
            Token::LBrace => "{",
            Token::Comma => ",",
            Token::Period => ".",
            Token::RParen => ")",
            Token::RBrack => "]",
            Token::RBrace => "}",
            Token::Semicolon => ";",
            Token::Colon => ":",
            Token::Tilde => "~",
            Token::Break => "break",
            Token::Case => "case",
            Token::Chan => "chan",
            Token::Const => "const",
            Token::Continue => "continue",
            Token::Default => "default",
            Token::Defer => "defer",
            Token::Else => "else",
            Token::Fallthrough => "fallthrough",
            Token::For => "for",
            Token::Func => "func",
            Token::Go => "go",
            Token::Goto => "goto",
            Token::If => "if",
            Token::Import => "import",
            Token::Interface => "interface",
            Token::Map => "map",
            Token::Package => "package",
            Token::Range => "range",
            Token::Return => "return",
            Token::Select => "select",
            Token::Struct => "struct",
            Token::Switch => "switch",
            Token::Type => "type",
            Token::Var => "var",
        }
    }

    /// Number of bytes the token occupies when printed
    ///
    /// Literal classes have no fixed width and report zero; their width is
    /// the length of the literal text.
    pub const fn width(self) -> usize {
        if self.is_literal() || matches!(self, Token::Illegal | Token::Eof | Token::Comment) {
            0
        } else {
            self.as_str().len()
        }
    }

    /// Whether the token is an identifier or basic literal class
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Token::Ident | Token::Int | Token::Float | Token::Imag | Token::Char | Token::String
        )
    }

    /// Whether the token is an operator or delimiter
    pub const fn is_operator(self) -> bool {
        (self as u8) >= (Token::Add as u8) && (self as u8) <= (Token::Tilde as u8)
    }

    /// Whether the token is a keyword
    pub const fn is_keyword(self) -> bool {
        (self as u8) >= (Token::Break as u8)
    }

    /// Map an identifier to its keyword token, if it is one
    pub fn lookup(ident: &str) -> Token {
        KEYWORDS
            .iter()
            .copied()
            .find(|kw| kw.as_str() == ident)
            .unwrap_or(Token::Ident)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_widths() {
        assert_eq!(Token::Package.width(), 7);
        assert_eq!(Token::Define.width(), 2);
        assert_eq!(Token::AndNotAssign.width(), 3);
        assert_eq!(Token::Ellipsis.width(), 3);
        assert_eq!(Token::Ident.width(), 0);
        assert_eq!(Token::String.width(), 0);
    }

    #[test]
    fn test_token_classes() {
        assert!(Token::Add.is_operator());
        assert!(Token::Tilde.is_operator());
        assert!(!Token::Break.is_operator());
        assert!(Token::Var.is_keyword());
        assert!(!Token::Colon.is_keyword());
        assert!(Token::Char.is_literal());
    }

    #[test]
    fn test_lookup_keywords() {
        assert_eq!(Token::lookup("range"), Token::Range);
        assert_eq!(Token::lookup("fallthrough"), Token::Fallthrough);
        assert_eq!(Token::lookup("ranger"), Token::Ident);
    }

    #[test]
    fn test_pos_offset_keeps_invalid() {
        assert_eq!(Pos::NONE.offset(3), Pos::NONE);
        assert_eq!(Pos::new(10).offset(3), Pos::new(13));
        assert_eq!(Pos::NONE.to_string(), "-");
    }
}
