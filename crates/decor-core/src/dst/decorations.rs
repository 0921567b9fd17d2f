//! Decoration lists, spacing hints and per-kind decoration slots
//!
//! Every decorated node owns one decoration struct. The struct holds a
//! `before` and `after` spacing hint plus one [`Decorations`] list per slot.
//! The slot set of a kind is fixed: it is declared once in the table at the
//! bottom of this module, which generates both the structs and the
//! [`KindSlots`] lookup so the two can never disagree.

use std::fmt;

use decor_syntax::NodeKind;

/// Decoration entry that stands for a line break
pub const NEWLINE: &str = "\n";

/// Coarse spacing around a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpaceType {
    #[default]
    None,
    NewLine,
    EmptyLine,
}

impl SpaceType {
    /// Number of line breaks this hint stands for
    pub fn newlines(self) -> usize {
        match self {
            SpaceType::None => 0,
            SpaceType::NewLine => 1,
            SpaceType::EmptyLine => 2,
        }
    }

    /// Hint for a run of `count` line breaks
    pub fn from_newlines(count: usize) -> Self {
        match count {
            0 => SpaceType::None,
            1 => SpaceType::NewLine,
            _ => SpaceType::EmptyLine,
        }
    }
}

impl fmt::Display for SpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Ordered decorations of one slot
///
/// Each entry is either [`NEWLINE`], a `//` line comment or a `/* */` block
/// comment, which may span several lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Decorations(Vec<String>);

impl Decorations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append one entry
    pub fn push(&mut self, decoration: impl Into<String>) {
        self.0.push(decoration.into());
    }

    /// Append several entries
    pub fn append<I, S>(&mut self, decorations: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(decorations.into_iter().map(Into::into));
    }

    /// Insert several entries in front of the existing ones
    pub fn prepend<I, S>(&mut self, decorations: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut front: Vec<String> = decorations.into_iter().map(Into::into).collect();
        front.append(&mut self.0);
        self.0 = front;
    }

    /// Replace all entries
    pub fn replace<I, S>(&mut self, decorations: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0 = decorations.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn all(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any entry is a comment
    pub fn has_comments(&self) -> bool {
        self.0.iter().any(|d| d != NEWLINE)
    }

    /// Remove the line breaks at the front and return how many there were
    pub fn take_leading_newlines(&mut self) -> usize {
        let count = self.0.iter().take_while(|d| *d == NEWLINE).count();
        self.0.drain(..count);
        count
    }

    /// Remove the line breaks at the back and return how many there were
    pub fn take_trailing_newlines(&mut self) -> usize {
        let count = self.0.iter().rev().take_while(|d| *d == NEWLINE).count();
        self.0.truncate(self.0.len() - count);
        count
    }
}

impl From<Vec<String>> for Decorations {
    fn from(decorations: Vec<String>) -> Self {
        Self(decorations)
    }
}

impl<const N: usize> From<[&str; N]> for Decorations {
    fn from(decorations: [&str; N]) -> Self {
        Self(decorations.iter().map(|d| (*d).to_string()).collect())
    }
}

impl FromIterator<String> for Decorations {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Decorations {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Decorations {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Named decoration slots
///
/// `Start` sits before the first token of a node and `End` after its last
/// one; every other slot sits after the token or child it is named after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Start,
    End,
    Arrow,
    Assign,
    Begin,
    Case,
    Chan,
    Colon,
    Comm,
    Cond,
    Defer,
    Ellipsis,
    Else,
    For,
    Fun,
    Func,
    Go,
    High,
    If,
    Index,
    Indices,
    Init,
    Interface,
    Key,
    Label,
    Lbrace,
    Lbrack,
    Len,
    Lhs,
    Low,
    Lparen,
    Map,
    Max,
    Name,
    Op,
    Opening,
    Package,
    Params,
    Post,
    Range,
    Recv,
    Results,
    Return,
    Select,
    Star,
    Struct,
    Switch,
    Tag,
    Tok,
    Type,
    TypeParams,
    Value,
    X,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Static slot table
pub trait KindSlots {
    /// Declared slots in emission order, `Start` first and `End` last
    fn slots(self) -> &'static [Slot];

    fn has_slot(self, slot: Slot) -> bool;
}

/// Uniform access to the decoration struct of any kind
pub trait DecorationSet {
    fn kind(&self) -> NodeKind;

    fn before(&self) -> SpaceType;
    fn set_before(&mut self, space: SpaceType);
    fn after(&self) -> SpaceType;
    fn set_after(&mut self, space: SpaceType);

    fn start(&self) -> &Decorations;
    fn start_mut(&mut self) -> &mut Decorations;
    fn end(&self) -> &Decorations;
    fn end_mut(&mut self) -> &mut Decorations;

    /// Decorations of `slot`, or `None` when the kind has no such slot
    fn slot(&self, slot: Slot) -> Option<&Decorations>;
    fn slot_mut(&mut self, slot: Slot) -> Option<&mut Decorations>;

    /// Whether no slot holds anything and both hints are `None`
    fn is_empty(&self) -> bool {
        self.before() == SpaceType::None
            && self.after() == SpaceType::None
            && self
                .kind()
                .slots()
                .iter()
                .all(|slot| self.slot(*slot).is_none_or(Decorations::is_empty))
    }

    /// Empty every slot and reset both hints
    fn clear(&mut self) {
        self.set_before(SpaceType::None);
        self.set_after(SpaceType::None);
        for slot in self.kind().slots() {
            if let Some(decorations) = self.slot_mut(*slot) {
                decorations.clear();
            }
        }
    }

    /// Move leading line breaks of `start` into `before` and trailing line
    /// breaks of `end` into `after`
    fn normalize(&mut self) {
        let leading = self.start_mut().take_leading_newlines();
        if leading > 0 {
            self.set_before(SpaceType::from_newlines(leading));
        }
        let trailing = self.end_mut().take_trailing_newlines();
        if trailing > 0 {
            self.set_after(SpaceType::from_newlines(trailing));
        }
    }
}

macro_rules! decorations {
    ($($(#[$meta:meta])* $name:ident => $kind:ident { $($field:ident: $slot:ident),* $(,)? })*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Default)]
            pub struct $name {
                pub before: SpaceType,
                pub start: Decorations,
                $(pub $field: Decorations,)*
                pub end: Decorations,
                pub after: SpaceType,
            }

            impl DecorationSet for $name {
                fn kind(&self) -> NodeKind {
                    NodeKind::$kind
                }

                fn before(&self) -> SpaceType {
                    self.before
                }

                fn set_before(&mut self, space: SpaceType) {
                    self.before = space;
                }

                fn after(&self) -> SpaceType {
                    self.after
                }

                fn set_after(&mut self, space: SpaceType) {
                    self.after = space;
                }

                fn start(&self) -> &Decorations {
                    &self.start
                }

                fn start_mut(&mut self) -> &mut Decorations {
                    &mut self.start
                }

                fn end(&self) -> &Decorations {
                    &self.end
                }

                fn end_mut(&mut self) -> &mut Decorations {
                    &mut self.end
                }

                fn slot(&self, slot: Slot) -> Option<&Decorations> {
                    match slot {
                        Slot::Start => Some(&self.start),
                        $(Slot::$slot => Some(&self.$field),)*
                        Slot::End => Some(&self.end),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn slot_mut(&mut self, slot: Slot) -> Option<&mut Decorations> {
                    match slot {
                        Slot::Start => Some(&mut self.start),
                        $(Slot::$slot => Some(&mut self.$field),)*
                        Slot::End => Some(&mut self.end),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )*

        impl KindSlots for NodeKind {
            fn slots(self) -> &'static [Slot] {
                match self {
                    $(NodeKind::$kind => &[Slot::Start, $(Slot::$slot,)* Slot::End],)*
                    NodeKind::Package => &[],
                }
            }

            fn has_slot(self, slot: Slot) -> bool {
                self.slots().contains(&slot)
            }
        }
    };
}

decorations! {
    /// `X` holds decorations between the package name and the period of a
    /// remote identifier
    IdentDecs => Ident { x: X }
    BadExprDecs => BadExpr {}
    EllipsisDecs => Ellipsis { ellipsis: Ellipsis }
    BasicLitDecs => BasicLit {}
    FuncLitDecs => FuncLit { typ: Type }
    CompositeLitDecs => CompositeLit { typ: Type, lbrace: Lbrace }
    ParenExprDecs => ParenExpr { lparen: Lparen, x: X }
    SelectorExprDecs => SelectorExpr { x: X }
    IndexExprDecs => IndexExpr { x: X, lbrack: Lbrack, index: Index }
    IndexListExprDecs => IndexListExpr { x: X, lbrack: Lbrack, indices: Indices }
    SliceExprDecs => SliceExpr { x: X, lbrack: Lbrack, low: Low, high: High, max: Max }
    TypeAssertExprDecs => TypeAssertExpr { x: X, lparen: Lparen, typ: Type }
    CallExprDecs => CallExpr { fun: Fun, lparen: Lparen, ellipsis: Ellipsis }
    StarExprDecs => StarExpr { star: Star }
    UnaryExprDecs => UnaryExpr { op: Op }
    BinaryExprDecs => BinaryExpr { x: X, op: Op }
    KeyValueExprDecs => KeyValueExpr { key: Key, colon: Colon }
    ArrayTypeDecs => ArrayType { lbrack: Lbrack, len: Len }
    StructTypeDecs => StructType { struct_: Struct }
    FuncTypeDecs => FuncType { func: Func, type_params: TypeParams, params: Params }
    InterfaceTypeDecs => InterfaceType { interface: Interface }
    MapTypeDecs => MapType { map: Map, key: Key }
    ChanTypeDecs => ChanType { begin: Begin, arrow: Arrow }
    BadStmtDecs => BadStmt {}
    DeclStmtDecs => DeclStmt {}
    EmptyStmtDecs => EmptyStmt {}
    LabeledStmtDecs => LabeledStmt { label: Label, colon: Colon }
    ExprStmtDecs => ExprStmt {}
    SendStmtDecs => SendStmt { chan: Chan, arrow: Arrow }
    IncDecStmtDecs => IncDecStmt { x: X }
    AssignStmtDecs => AssignStmt { lhs: Lhs, tok: Tok }
    GoStmtDecs => GoStmt { go: Go }
    DeferStmtDecs => DeferStmt { defer: Defer }
    ReturnStmtDecs => ReturnStmt { return_: Return }
    BranchStmtDecs => BranchStmt { tok: Tok }
    BlockStmtDecs => BlockStmt { lbrace: Lbrace }
    IfStmtDecs => IfStmt { if_: If, init: Init, cond: Cond, els: Else }
    CaseClauseDecs => CaseClause { case: Case, colon: Colon }
    SwitchStmtDecs => SwitchStmt { switch: Switch, init: Init, tag: Tag }
    TypeSwitchStmtDecs => TypeSwitchStmt { switch: Switch, init: Init, assign: Assign }
    CommClauseDecs => CommClause { case: Case, comm: Comm, colon: Colon }
    SelectStmtDecs => SelectStmt { select: Select }
    ForStmtDecs => ForStmt { for_: For, init: Init, cond: Cond, post: Post }
    RangeStmtDecs => RangeStmt { for_: For, key: Key, value: Value, range: Range, x: X }
    ImportSpecDecs => ImportSpec { name: Name }
    ValueSpecDecs => ValueSpec { assign: Assign }
    TypeSpecDecs => TypeSpec { name: Name, type_params: TypeParams, assign: Assign }
    BadDeclDecs => BadDecl {}
    GenDeclDecs => GenDecl { tok: Tok, lparen: Lparen }
    /// The signature of a function declaration has no slots of its own;
    /// its tokens are decorated here
    FuncDeclDecs => FuncDecl {
        func: Func,
        recv: Recv,
        name: Name,
        type_params: TypeParams,
        params: Params,
        results: Results,
    }
    FieldDecs => Field { typ: Type }
    FieldListDecs => FieldList { opening: Opening }
    FileDecs => File { package: Package, name: Name }
}
