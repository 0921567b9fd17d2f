//! Round-trip validation for decorated trees
//!
//! A decorated tree whose decorations sit in the slots the decorator would
//! choose must come back unchanged from restoring it and decorating the
//! result. The fixture below covers most node kinds:
//!
//! ```go
//! package main
//!
//! import (
//!     "fmt"
//!     "strings"
//! )
//!
//! type Pair[K comparable, V any] struct {
//!     Key   K `json:"key"`
//!     Value V
//! }
//!
//! func (p *Pair[K, V]) Swap(items ...int) (int, error) {
//!     m := map[string][]int{"a": {1}} // build
//!     var ch <-chan int
//!     if n := len(items); n > 0 /* positive */ {
//!         return n, nil
//!     } else {
//!         p.Key = p.Key
//!     }
//!     // loop
//!     for i := 0; i < 3; i++ {
//!         defer fmt.Println(/* args */ items[i], m)
//!     }
//!     for k, v := range m {
//!         go func() { _ = len(k) + len(v) }()
//!     }
//!     switch x := interface{}(p).(type) {
//!     case nil:
//!         break
//!     default:
//!         _ = x
//!     }
//!     select {
//!     case v := <-ch:
//!         _ = -v
//!     }
//!     s := strings /* pkg */ .ToUpper("x")[1:2:3]
//! label:
//!     ch2 := make(chan<- int)
//!     ch2 <- 1
//!     return (0), nil
//! }
//! ```

mod common;

use common::{comment_texts, func_body, func_body_mut, restore, round_trip};
use decor_core::Restorer;
use decor_core::dst::{
    self, ChanDir, DecorationSet, Decorations, KindSlots, NodeRef, Slot, SpaceType,
};
use decor_syntax::Token;

fn ident(name: &str) -> dst::Expr {
    dst::Ident::new(name).into()
}

fn int(value: &str) -> dst::Expr {
    dst::BasicLit::new(Token::Int, value).into()
}

fn call(fun: impl Into<dst::Expr>, args: Vec<dst::Expr>) -> dst::Expr {
    dst::CallExpr::new(fun, args).into()
}

fn binary(x: dst::Expr, op: Token, y: dst::Expr) -> dst::Expr {
    dst::Expr::Binary(Box::new(dst::BinaryExpr {
        x,
        op,
        y,
        decs: Default::default(),
    }))
}

fn unary(op: Token, x: dst::Expr) -> dst::Expr {
    dst::Expr::Unary(Box::new(dst::UnaryExpr {
        op,
        x,
        decs: Default::default(),
    }))
}

fn assign(lhs: Vec<dst::Expr>, tok: Token, rhs: Vec<dst::Expr>) -> dst::AssignStmt {
    dst::AssignStmt {
        lhs,
        tok,
        rhs,
        decs: Default::default(),
    }
}

/// Statement followed by a line break
fn line(stmt: impl Into<dst::Stmt>) -> dst::Stmt {
    let mut stmt = stmt.into();
    stmt.decs_mut().set_after(SpaceType::NewLine);
    stmt
}

/// Block whose statements each sit on their own line
fn block(list: Vec<dst::Stmt>) -> dst::BlockStmt {
    let mut block = dst::BlockStmt::new(list.into_iter().map(line).collect());
    block.decs.lbrace.push("\n");
    block
}

fn chan(dir: ChanDir, value: dst::Expr) -> dst::Expr {
    dst::Expr::ChanType(Box::new(dst::ChanType {
        dir,
        value,
        decs: Default::default(),
    }))
}

/// Clause whose body statements each sit on their own line
fn case(list: Vec<dst::Expr>, body: Vec<dst::Stmt>) -> dst::Stmt {
    let mut clause = dst::CaseClause {
        list,
        body: own_lines(body),
        decs: Default::default(),
    };
    clause.decs.colon.push("\n");
    clause.decs.after = SpaceType::NewLine;
    dst::Stmt::CaseClause(Box::new(clause))
}

/// Line breaks between statements of a clause; the one after the last
/// statement belongs to the clause
fn own_lines(body: Vec<dst::Stmt>) -> Vec<dst::Stmt> {
    let count = body.len();
    body.into_iter()
        .enumerate()
        .map(|(index, stmt)| if index + 1 < count { line(stmt) } else { stmt })
        .collect()
}

fn field(names: &[&str], typ: dst::Expr) -> dst::Field {
    dst::Field::new(names.iter().map(|name| dst::Ident::new(*name)).collect(), typ)
}

fn imports() -> dst::Decl {
    let specs = ["fmt", "strings"]
        .into_iter()
        .map(|path| {
            let mut spec = dst::ImportSpec::new(None, path);
            spec.decs.after = SpaceType::NewLine;
            dst::Spec::Import(Box::new(spec))
        })
        .collect();
    let mut decl = dst::GenDecl::new(Token::Import, specs);
    decl.lparen = true;
    decl.decs.lparen.push("\n");
    decl.decs.after = SpaceType::EmptyLine;
    dst::Decl::Gen(Box::new(decl))
}

fn pair_type() -> dst::Decl {
    let mut key = field(&["Key"], ident("K"));
    key.tag = Some(dst::BasicLit::new(Token::String, "`json:\"key\"`"));
    let mut fields = dst::FieldList::new(vec![key, field(&["Value"], ident("V"))]);
    fields.decs.opening.push("\n");
    for field in &mut fields.list {
        field.decs.after = SpaceType::NewLine;
    }

    let spec = dst::TypeSpec {
        name: dst::Ident::new("Pair"),
        type_params: Some(dst::FieldList::new(vec![
            field(&["K"], ident("comparable")),
            field(&["V"], ident("any")),
        ])),
        assign: false,
        typ: dst::Expr::StructType(Box::new(dst::StructType {
            fields,
            incomplete: false,
            decs: Default::default(),
        })),
        decs: Default::default(),
    };
    let mut decl = dst::GenDecl::new(Token::Type, vec![dst::Spec::Type(Box::new(spec))]);
    decl.decs.after = SpaceType::EmptyLine;
    dst::Decl::Gen(Box::new(decl))
}

fn swap_body() -> Vec<dst::Stmt> {
    let map_lit = dst::Expr::CompositeLit(Box::new(dst::CompositeLit {
        typ: Some(dst::Expr::MapType(Box::new(dst::MapType {
            key: ident("string"),
            value: dst::Expr::ArrayType(Box::new(dst::ArrayType {
                len: None,
                elt: ident("int"),
                decs: Default::default(),
            })),
            decs: Default::default(),
        }))),
        elts: vec![dst::Expr::KeyValue(Box::new(dst::KeyValueExpr {
            key: dst::BasicLit::string("a").into(),
            value: dst::Expr::CompositeLit(Box::new(dst::CompositeLit {
                typ: None,
                elts: vec![int("1")],
                incomplete: false,
                decs: Default::default(),
            })),
            decs: Default::default(),
        }))],
        incomplete: false,
        decs: Default::default(),
    }));
    let mut build = assign(vec![ident("m")], Token::Define, vec![map_lit]);
    build.decs.end.push("// build");

    let channel = dst::Stmt::Decl(Box::new(dst::DeclStmt {
        decl: dst::GenDecl::new(
            Token::Var,
            vec![dst::Spec::Value(Box::new(dst::ValueSpec {
                names: vec![dst::Ident::new("ch")],
                typ: Some(chan(ChanDir::Recv, ident("int"))),
                values: vec![],
                decs: Default::default(),
            }))],
        ),
        decs: Default::default(),
    }));

    let mut branch = dst::IfStmt {
        init: Some(
            assign(
                vec![ident("n")],
                Token::Define,
                vec![call(dst::Ident::new("len"), vec![ident("items")])],
            )
            .into(),
        ),
        cond: binary(ident("n"), Token::Gtr, int("0")),
        body: block(vec![dst::Stmt::Return(Box::new(dst::ReturnStmt {
            results: vec![ident("n"), ident("nil")],
            decs: Default::default(),
        }))]),
        els: Some(dst::Stmt::Block(Box::new(block(vec![
            assign(
                vec![dst::SelectorExpr::new(ident("p"), "Key").into()],
                Token::Assign,
                vec![dst::SelectorExpr::new(ident("p"), "Key").into()],
            )
            .into(),
        ])))),
        decs: Default::default(),
    };
    branch.decs.cond.push("/* positive */");

    let mut println = dst::CallExpr::new(
        dst::Ident::remote("fmt", "Println"),
        vec![
            dst::Expr::Index(Box::new(dst::IndexExpr {
                x: ident("items"),
                index: ident("i"),
                decs: Default::default(),
            })),
            ident("m"),
        ],
    );
    println.decs.lparen.push("/* args */");
    let mut counted = dst::ForStmt {
        init: Some(assign(vec![ident("i")], Token::Define, vec![int("0")]).into()),
        cond: Some(binary(ident("i"), Token::Lss, int("3"))),
        post: Some(dst::Stmt::IncDec(Box::new(dst::IncDecStmt {
            x: ident("i"),
            tok: Token::Inc,
            decs: Default::default(),
        }))),
        body: block(vec![dst::Stmt::Defer(Box::new(dst::DeferStmt {
            call: println,
            decs: Default::default(),
        }))]),
        decs: Default::default(),
    };
    counted.decs.start.append(["// loop", "\n"]);

    let closure = dst::Expr::FuncLit(Box::new(dst::FuncLit {
        typ: dst::FuncType {
            func: true,
            params: dst::FieldList::new(vec![]),
            ..Default::default()
        },
        body: dst::BlockStmt::new(vec![
            assign(
                vec![ident("_")],
                Token::Assign,
                vec![binary(
                    call(dst::Ident::new("len"), vec![ident("k")]),
                    Token::Add,
                    call(dst::Ident::new("len"), vec![ident("v")]),
                )],
            )
            .into(),
        ]),
        decs: Default::default(),
    }));
    let ranged = dst::RangeStmt {
        key: Some(ident("k")),
        value: Some(ident("v")),
        tok: Token::Define,
        x: ident("m"),
        body: block(vec![dst::Stmt::Go(Box::new(dst::GoStmt {
            call: dst::CallExpr::new(closure, vec![]),
            decs: Default::default(),
        }))]),
        decs: Default::default(),
    };

    let empty_interface = dst::Expr::InterfaceType(Box::new(dst::InterfaceType {
        methods: dst::FieldList::new(vec![]),
        incomplete: false,
        decs: Default::default(),
    }));
    let type_switch = dst::TypeSwitchStmt {
        init: None,
        assign: assign(
            vec![ident("x")],
            Token::Define,
            vec![dst::Expr::TypeAssert(Box::new(dst::TypeAssertExpr {
                x: call(empty_interface, vec![ident("p")]),
                typ: None,
                decs: Default::default(),
            }))],
        )
        .into(),
        body: dst::BlockStmt {
            list: vec![
                case(
                    vec![ident("nil")],
                    vec![dst::Stmt::Branch(Box::new(dst::BranchStmt {
                        tok: Token::Break,
                        label: None,
                        decs: Default::default(),
                    }))],
                ),
                case(
                    vec![],
                    vec![assign(vec![ident("_")], Token::Assign, vec![ident("x")]).into()],
                ),
            ],
            decs: lbrace_on_own_line(),
        },
        decs: Default::default(),
    };

    let mut receive = dst::CommClause {
        comm: Some(
            assign(
                vec![ident("v")],
                Token::Define,
                vec![unary(Token::Arrow, ident("ch"))],
            )
            .into(),
        ),
        body: vec![
            assign(
                vec![ident("_")],
                Token::Assign,
                vec![unary(Token::Sub, ident("v"))],
            )
            .into(),
        ],
        decs: Default::default(),
    };
    receive.decs.colon.push("\n");
    receive.decs.after = SpaceType::NewLine;
    let select = dst::SelectStmt {
        body: dst::BlockStmt {
            list: vec![dst::Stmt::CommClause(Box::new(receive))],
            decs: lbrace_on_own_line(),
        },
        decs: Default::default(),
    };

    let mut upper = dst::Ident::remote("strings", "ToUpper");
    upper.decs.x.push("/* pkg */");
    let sliced = dst::Expr::Slice(Box::new(dst::SliceExpr {
        x: call(upper, vec![dst::BasicLit::string("x").into()]),
        low: Some(int("1")),
        high: Some(int("2")),
        max: Some(int("3")),
        slice3: true,
        decs: Default::default(),
    }));

    let mut labeled = dst::LabeledStmt {
        label: dst::Ident::new("label"),
        stmt: assign(
            vec![ident("ch2")],
            Token::Define,
            vec![call(dst::Ident::new("make"), vec![chan(ChanDir::Send, ident("int"))])],
        )
        .into(),
        decs: Default::default(),
    };
    labeled.decs.colon.push("\n");

    let send = dst::SendStmt {
        chan: ident("ch2"),
        value: int("1"),
        decs: Default::default(),
    };
    let finish = dst::ReturnStmt {
        results: vec![
            dst::Expr::Paren(Box::new(dst::ParenExpr {
                x: int("0"),
                decs: Default::default(),
            })),
            ident("nil"),
        ],
        decs: Default::default(),
    };

    vec![
        build.into(),
        channel,
        dst::Stmt::If(Box::new(branch)),
        dst::Stmt::For(Box::new(counted)),
        dst::Stmt::Range(Box::new(ranged)),
        dst::Stmt::TypeSwitch(Box::new(type_switch)),
        dst::Stmt::Select(Box::new(select)),
        assign(vec![ident("s")], Token::Define, vec![sliced]).into(),
        dst::Stmt::Labeled(Box::new(labeled)),
        dst::Stmt::Send(Box::new(send)),
        dst::Stmt::Return(Box::new(finish)),
    ]
}

fn lbrace_on_own_line() -> dst::BlockStmtDecs {
    let mut decs = dst::BlockStmtDecs::default();
    decs.lbrace.push("\n");
    decs
}

fn swap_func() -> dst::Decl {
    let receiver = field(
        &["p"],
        dst::Expr::Star(Box::new(dst::StarExpr {
            x: dst::Expr::IndexList(Box::new(dst::IndexListExpr {
                x: ident("Pair"),
                indices: vec![ident("K"), ident("V")],
                decs: Default::default(),
            })),
            decs: Default::default(),
        })),
    );
    let variadic = dst::Expr::Ellipsis(Box::new(dst::Ellipsis {
        elt: Some(ident("int")),
        decs: Default::default(),
    }));
    dst::Decl::Func(Box::new(dst::FuncDecl {
        recv: Some(dst::FieldList::new(vec![receiver])),
        name: dst::Ident::new("Swap"),
        typ: dst::FuncType {
            func: true,
            params: dst::FieldList::new(vec![field(&["items"], variadic)]),
            results: Some(dst::FieldList::new(vec![
                field(&[], ident("int")),
                field(&[], ident("error")),
            ])),
            ..Default::default()
        },
        body: Some(block(swap_body())),
        decs: Default::default(),
    }))
}

fn fixture() -> dst::File {
    let mut file = dst::File::new("main");
    file.decs.name.append(["\n", "\n"]);
    file.decls = vec![imports(), pair_type(), swap_func()];
    file
}

fn swap_body_mut(file: &mut dst::File) -> &mut dst::BlockStmt {
    func_body_mut(file, 2)
}

/// Restoring and decorating again reproduces the tree
#[test]
fn test_fixture_round_trip() {
    let file = fixture();
    assert_eq!(round_trip(&file), file);
}

/// Line breaks are preserved per node, whatever the tree shape
#[test]
fn test_spacing_round_trip() {
    let mut file = fixture();
    file.decls[1].decs_mut().set_after(SpaceType::NewLine);
    let body = swap_body_mut(&mut file);
    body.list[1].decs_mut().set_after(SpaceType::EmptyLine);
    body.list[2].decs_mut().set_after(SpaceType::EmptyLine);

    let decorated = round_trip(&file);
    assert_eq!(decorated, file);
    assert_eq!(decorated.decls[1].decs().after(), SpaceType::NewLine);
}

/// Comments come back in the order they were written
#[test]
fn test_comment_order() {
    let (restored, fset) = restore(&fixture());
    assert_eq!(
        comment_texts(&restored),
        vec!["// build", "/* positive */", "// loop", "/* args */", "/* pkg */"]
    );

    let slashes: Vec<_> = restored
        .comments
        .iter()
        .flat_map(|group| &group.list)
        .map(|comment| comment.slash)
        .collect();
    assert!(slashes.windows(2).all(|w| w[0] < w[1]));
    assert!(slashes.iter().all(|slash| fset.file(*slash).is_some()));
}

/// Restoring the same tree twice yields the same plain tree and line table
#[test]
fn test_restore_is_deterministic() {
    let file = fixture();
    let (first, first_fset) = restore(&file);
    let (second, second_fset) = restore(&file);

    assert_eq!(first, second);
    assert_eq!(
        first_fset.file_by_name("main.go"),
        second_fset.file_by_name("main.go")
    );
}

/// Restoring never edits its input
#[test]
fn test_restore_leaves_input_untouched() {
    let file = fixture();
    let before = file.clone();
    let mut restorer = Restorer::new();
    restorer.restore_file("main.go", &file).unwrap();
    restorer.restore_file("other.go", &file).unwrap();
    assert_eq!(file, before);
    assert_eq!(restorer.fset().files().count(), 2);
}

/// Decorations of a clone are independent from the original
#[test]
fn test_clone_independence() {
    let mut file = fixture();
    let body = swap_body_mut(&mut file);
    let original = body.list[0].clone();
    let mut copy = original.clone();
    copy.decs_mut().end_mut().replace(["// copy"]);
    body.list.insert(1, copy);

    assert_eq!(body.list[0], original);
    assert_eq!(body.list[0].decs().end().all(), &["// build"]);
    assert_eq!(body.list[1].decs().end().all(), &["// copy"]);

    let (restored, _) = restore(&file);
    let texts = comment_texts(&restored);
    assert_eq!(&texts[..2], &["// build", "// copy"]);
    assert_eq!(round_trip(&file), file);
}

/// Editing a decoration changes only the comment it names
#[test]
fn test_edit_changes_only_target() {
    let mut file = fixture();
    let body = swap_body_mut(&mut file);
    let dst::Stmt::If(branch) = &mut body.list[2] else {
        panic!("expected if statement");
    };
    branch.decs.cond.replace(["/* non-zero */"]);

    let (restored, _) = restore(&file);
    assert_eq!(
        comment_texts(&restored),
        vec!["// build", "/* non-zero */", "// loop", "/* args */", "/* pkg */"]
    );
    assert_eq!(round_trip(&file), file);
}

/// Fill every slot of `decs` except `skip` with a comment naming it
fn fill(decs: &mut dyn DecorationSet, skip: &[Slot]) -> Vec<String> {
    let kind = decs.kind();
    let mut written = Vec::new();
    for slot in kind.slots() {
        if skip.contains(slot) {
            continue;
        }
        let text = format!("/* {kind}.{slot} */");
        if let Some(decorations) = decs.slot_mut(*slot) {
            *decorations = Decorations::from([text.as_str()]);
            written.push(text);
        }
    }
    written
}

/// Every slot whose token or child is present is written out
#[test]
fn test_every_present_slot_is_restored() {
    let mut file = fixture();
    let mut expected = fill(&mut file.decs, &[]);
    expected.extend(fill(file.decls[0].decs_mut(), &[]));
    if let dst::Decl::Func(func) = &mut file.decls[2] {
        expected.extend(fill(&mut func.decs, &[Slot::TypeParams]));
    }

    let body = swap_body_mut(&mut file);
    let statements: [(usize, &[Slot]); 6] = [
        (2, &[]),
        (3, &[]),
        (4, &[]),
        (5, &[Slot::Init]),
        (8, &[]),
        (9, &[]),
    ];
    for (index, skip) in statements {
        expected.extend(fill(body.list[index].decs_mut(), skip));
    }
    if let dst::Stmt::Assign(sliced) = &mut body.list[7] {
        if let dst::Expr::Slice(slice) = &mut sliced.rhs[0] {
            expected.extend(fill(&mut slice.decs, &[]));
            if let dst::Expr::Call(call) = &mut slice.x {
                expected.extend(fill(&mut call.decs, &[Slot::Ellipsis]));
            }
        }
    }

    let (restored, _) = restore(&file);
    let mut texts = comment_texts(&restored);
    texts.retain(|text| text.starts_with("/* ") && text.contains('.'));
    let mut missing: Vec<_> = expected.iter().filter(|text| !texts.contains(text)).collect();
    missing.sort();
    assert!(missing.is_empty(), "slots not restored: {missing:?}");
    assert_eq!(texts.len(), expected.len());
}

/// Slice expression of `s := strings.ToUpper("x")[1:2:3]`
fn sliced(body: &mut dst::BlockStmt) -> &mut dst::SliceExpr {
    let dst::Stmt::Assign(assign) = &mut body.list[7] else {
        panic!("expected assignment");
    };
    let dst::Expr::Slice(slice) = &mut assign.rhs[0] else {
        panic!("expected slice expression");
    };
    slice
}

fn assert_same_slots(expected: &dyn DecorationSet, actual: &dyn DecorationSet) {
    assert_eq!(expected.kind(), actual.kind());
    for slot in expected.kind().slots() {
        assert_eq!(
            expected.slot(*slot),
            actual.slot(*slot),
            "{}.{slot} moved",
            expected.kind()
        );
    }
}

/// Comments in slots between two tokens decorate back into the same slot
#[test]
fn test_interior_slots_keep_their_identity() {
    let edges = [Slot::Start, Slot::End];
    let mut file = fixture();
    let body = swap_body_mut(&mut file);
    for index in [2, 3] {
        fill(body.list[index].decs_mut(), &edges);
    }
    let slice = sliced(body);
    fill(&mut slice.decs, &edges);
    let dst::Expr::Call(call) = &mut slice.x else {
        panic!("expected call");
    };
    fill(&mut call.decs, &[Slot::Start, Slot::Ellipsis, Slot::End]);

    let mut again = round_trip(&file);
    let expected = swap_body_mut(&mut file);
    let actual = swap_body_mut(&mut again);
    for index in [2, 3] {
        assert_same_slots(expected.list[index].decs(), actual.list[index].decs());
    }
    let (expected, actual) = (sliced(expected), sliced(actual));
    assert_same_slots(&expected.decs, &actual.decs);
    assert_same_slots(expected.x.decs(), actual.x.decs());
    assert_eq!(again, file);
}

/// Slots reported for every node of the fixture belong to its kind
#[test]
fn test_slots_belong_to_their_kind() {
    let file = round_trip(&fixture());
    let mut checked = 0;
    dst::inspect(NodeRef::File(&file), &mut |node| {
        if let Some(decs) = node.decs() {
            assert_eq!(decs.kind(), node.kind());
            for slot in node.kind().slots() {
                assert!(decs.slot(*slot).is_some(), "{} lacks {slot}", node.kind());
            }
            checked += 1;
        }
        true
    });
    assert!(checked > 50);
}

/// The fixture prints one statement per line
#[test]
fn test_statements_start_on_own_lines() {
    let file = fixture();
    let (restored, fset) = restore(&file);
    let decorated = func_body(&file, 2);
    let plain = common::plain_func_body(&restored, 2);
    assert_eq!(plain.list.len(), decorated.list.len());

    let lines: Vec<_> = plain
        .list
        .iter()
        .map(|stmt| common::line(&fset, stmt.pos()))
        .collect();
    assert!(lines.windows(2).all(|w| w[0] < w[1]), "{lines:?}");
}
