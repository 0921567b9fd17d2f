//! Identifier resolution and import management across a decorate/restore
//! cycle

mod common;

use common::{Source, func_body, plain_func_body};
use decor_core::dst;
use decor_core::{
    Decorator, DecoratorOptions, ErrorKind, GuessRefResolver, MapPackageResolver, NoRefResolver,
    Restorer, RestorerOptions, TypeInfoRefResolver,
};
use decor_syntax::ast;
use decor_syntax::{Pos, Token};

const BARE_CALL: &str = "package main\n\nfunc f() {\n\tPrintln()\n}\n";

fn bare_call() -> (Source, ast::File) {
    let src = Source::new("main.go", BARE_CALL);
    let body = src.block("func f(", vec![src.call_stmt("Println")]);
    let file = src.file("main", vec![src.func("f", body)], vec![]);
    (src, file)
}

const DOT_IMPORT: &str = "package main\n\nimport . \"fmt\"\n\nfunc f() {\n\tPrintln()\n}\n";

fn dot_import() -> (Source, ast::File) {
    let src = Source::new("main.go", DOT_IMPORT);
    let import = ast::GenDecl {
        tok_pos: src.pos("import"),
        tok: Token::Import,
        lparen: Pos::NONE,
        specs: vec![ast::Spec::Import(Box::new(ast::ImportSpec {
            name: Some(src.ident(". ", ".")),
            path: src.string("\"fmt\""),
            end_pos: Pos::NONE,
        }))],
        rparen: Pos::NONE,
    };
    let body = src.block("func f(", vec![src.call_stmt("Println")]);
    let decls = vec![ast::Decl::Gen(Box::new(import)), src.func("f", body)];
    let file = src.file("main", decls, vec![]);
    (src, file)
}

/// Function identifier of the only call statement of function `index`
fn callee(file: &dst::File, index: usize) -> &dst::Ident {
    let dst::Stmt::Expr(stmt) = &func_body(file, index).list[0] else {
        panic!("expected expression statement");
    };
    let dst::Expr::Call(call) = &stmt.x else {
        panic!("expected call");
    };
    call.fun.as_ident().expect("expected identifier")
}

/// Type information turns a bare identifier into a remote one
#[test]
fn test_type_info_marks_remote_identifiers() {
    let (src, file) = bare_call();
    let fset = src.fset();
    let resolver =
        TypeInfoRefResolver::new("example.com/me").with_use(src.pos("Println()"), "fmt");
    let decorated = Decorator::new(&fset)
        .with_resolver(resolver)
        .decorate_file(&file)
        .unwrap();

    let fun = callee(&decorated, 0);
    assert_eq!(fun.name, "Println");
    assert_eq!(fun.path, "fmt");
}

/// References into the package being decorated stay local
#[test]
fn test_type_info_keeps_local_package_local() {
    let (src, file) = bare_call();
    let fset = src.fset();
    let resolver = TypeInfoRefResolver::new("example.com/me")
        .with_use(src.pos("Println()"), "example.com/me");
    let decorated = Decorator::new(&fset)
        .with_resolver(resolver)
        .decorate_file(&file)
        .unwrap();
    assert!(!callee(&decorated, 0).is_remote());
}

/// Managed imports add the import a remote identifier needs and qualify it
#[test]
fn test_managed_imports_qualify_remote_identifier() {
    let (src, file) = bare_call();
    let fset = src.fset();
    let resolver =
        TypeInfoRefResolver::new("example.com/me").with_use(src.pos("Println()"), "fmt");
    let decorated = Decorator::new(&fset)
        .with_resolver(resolver)
        .decorate_file(&file)
        .unwrap();

    let mut restorer =
        Restorer::new().with_options(RestorerOptions::default().with_manage_imports(true));
    let restored = restorer.restore_file("main.go", &decorated).unwrap();

    let paths: Vec<_> = restored.imports().map(ast::ImportSpec::path_value).collect();
    assert_eq!(paths, vec!["fmt"]);
    let ast::Stmt::Expr(stmt) = &plain_func_body(&restored, 1).list[0] else {
        panic!("expected expression statement");
    };
    let ast::Expr::Call(call) = &stmt.x else {
        panic!("expected call");
    };
    let ast::Expr::Selector(selector) = &call.fun else {
        panic!("expected qualified identifier");
    };
    let ast::Expr::Ident(package) = &selector.x else {
        panic!("expected package name");
    };
    assert_eq!(package.name, "fmt");
    assert_eq!(selector.sel.name, "Println");
    assert!(selector.x.pos() < selector.sel.pos());

    let spec = restored.imports().next().unwrap();
    assert!(spec.path.value_pos < call.fun.pos());
}

/// Without type information an exported bare identifier next to a dot
/// import is ambiguous
#[test]
fn test_dot_import_is_rejected_in_strict_mode() {
    let (src, file) = dot_import();
    let fset = src.fset();
    let err = Decorator::new(&fset)
        .with_resolver(GuessRefResolver)
        .with_options(DecoratorOptions {
            strict_resolution: true,
        })
        .decorate_file(&file)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resolve);
    assert!(err.is_recoverable());
    assert!(err.to_string().contains("Println"), "{err}");
}

/// Outside strict mode the identifier stays local
#[test]
fn test_dot_import_stays_local_when_lenient() {
    let (src, file) = dot_import();
    let fset = src.fset();
    let decorated = Decorator::new(&fset)
        .with_resolver(GuessRefResolver)
        .decorate_file(&file)
        .unwrap();
    assert!(!callee(&decorated, 1).is_remote());

    let import = decorated.imports().next().unwrap();
    assert_eq!(import.local_name(), Some("."));
}

/// Remote identifiers of a dot-imported package print unqualified
#[test]
fn test_dot_imported_remote_identifier_prints_bare() {
    let (src, file) = dot_import();
    let fset = src.fset();
    let resolver =
        TypeInfoRefResolver::new("example.com/me").with_use(src.pos("Println()"), "fmt");
    let decorated = Decorator::new(&fset)
        .with_resolver(resolver)
        .decorate_file(&file)
        .unwrap();
    assert!(callee(&decorated, 1).is_remote());

    let mut restorer = Restorer::new();
    let restored = restorer.restore_file("main.go", &decorated).unwrap();
    let ast::Stmt::Expr(stmt) = &plain_func_body(&restored, 1).list[0] else {
        panic!("expected expression statement");
    };
    let ast::Expr::Call(call) = &stmt.x else {
        panic!("expected call");
    };
    let ast::Expr::Ident(fun) = &call.fun else {
        panic!("expected bare identifier, got {:?}", call.fun);
    };
    assert_eq!(fun.name, "Println");
}

/// Managed imports reuse a dot import rather than adding the path again
#[test]
fn test_managed_imports_keep_single_dot_import() {
    let (src, file) = dot_import();
    let fset = src.fset();
    let resolver =
        TypeInfoRefResolver::new("example.com/me").with_use(src.pos("Println()"), "fmt");
    let decorated = Decorator::new(&fset)
        .with_resolver(resolver)
        .decorate_file(&file)
        .unwrap();

    let mut restorer =
        Restorer::new().with_options(RestorerOptions::default().with_manage_imports(true));
    let restored = restorer.restore_file("main.go", &decorated).unwrap();

    assert_eq!(
        import_names(&restored),
        vec![(Some(".".to_string()), "fmt".to_string())]
    );
    assert_eq!(callees(&restored, 1), vec!["Println"]);
}

/// Without a reference resolver nothing becomes remote
#[test]
fn test_no_resolver_keeps_selectors() {
    let (src, file) = common_selector();
    let fset = src.fset();
    let decorated = Decorator::new(&fset)
        .with_resolver(NoRefResolver)
        .decorate_file(&file)
        .unwrap();

    let dst::Stmt::Expr(stmt) = &func_body(&decorated, 1).list[0] else {
        panic!("expected expression statement");
    };
    let dst::Expr::Call(call) = &stmt.x else {
        panic!("expected call");
    };
    let dst::Expr::Selector(selector) = &call.fun else {
        panic!("expected selector, got {:?}", call.fun);
    };
    assert_eq!(selector.sel.name, "Println");
    assert_eq!(selector.x.as_ident().map(|x| x.name.as_str()), Some("fmt"));
}

const SELECTOR: &str = "package main\n\nimport \"fmt\"\n\nfunc f() {\n\tfmt.Println()\n}\n";

fn common_selector() -> (Source, ast::File) {
    let src = Source::new("main.go", SELECTOR);
    let import = ast::GenDecl {
        tok_pos: src.pos("import"),
        tok: Token::Import,
        lparen: Pos::NONE,
        specs: vec![ast::Spec::Import(Box::new(ast::ImportSpec {
            name: None,
            path: src.string("\"fmt\""),
            end_pos: Pos::NONE,
        }))],
        rparen: Pos::NONE,
    };
    let lparen = src.pos("Println()").offset(7);
    let call = ast::CallExpr {
        fun: ast::Expr::Selector(Box::new(ast::SelectorExpr {
            x: src.ident("fmt.", "fmt").into(),
            sel: src.ident("Println()", "Println"),
        })),
        lparen,
        args: vec![],
        ellipsis: Pos::NONE,
        rparen: lparen.offset(1),
    };
    let stmt = ast::Stmt::Expr(Box::new(ast::ExprStmt {
        x: ast::Expr::Call(Box::new(call)),
    }));
    let body = src.block("func f(", vec![stmt]);
    let decls = vec![ast::Decl::Gen(Box::new(import)), src.func("f", body)];
    let file = src.file("main", decls, vec![]);
    (src, file)
}

/// Managed imports drop imports nothing refers to any more
#[test]
fn test_managed_imports_drop_unused() {
    let (src, file) = common_selector();
    let mut decorated = common::decorate(&src.fset(), &file);
    common::func_body_mut(&mut decorated, 1).list.clear();

    let mut restorer =
        Restorer::new().with_options(RestorerOptions::default().with_manage_imports(true));
    let restored = restorer.restore_file("main.go", &decorated).unwrap();
    assert_eq!(restored.imports().count(), 0);
    assert_eq!(restored.decls.len(), 1);
}

/// File of package main whose function `f` calls each identifier in turn
fn calling(imports: Vec<dst::ImportSpec>, targets: Vec<dst::Ident>) -> dst::File {
    let mut file = dst::File::new("main");
    if !imports.is_empty() {
        let specs = imports
            .into_iter()
            .map(|spec| dst::Spec::Import(Box::new(spec)))
            .collect();
        file.decls
            .push(dst::Decl::Gen(Box::new(dst::GenDecl::new(Token::Import, specs))));
    }
    let calls: Vec<dst::Stmt> = targets
        .into_iter()
        .map(|callee| {
            let mut stmt = dst::ExprStmt::new(dst::CallExpr::new(callee, vec![]));
            stmt.decs.after = dst::SpaceType::NewLine;
            dst::Stmt::from(stmt)
        })
        .collect();
    file.decls.push(dst::Decl::Func(Box::new(dst::FuncDecl {
        recv: None,
        name: dst::Ident::new("f"),
        typ: dst::FuncType {
            func: true,
            params: dst::FieldList::new(vec![]),
            ..Default::default()
        },
        body: Some(dst::BlockStmt::new(calls)),
        decs: Default::default(),
    })));
    file
}

/// Printed form of each call's function in function `index`
fn callees(file: &ast::File, index: usize) -> Vec<String> {
    plain_func_body(file, index)
        .list
        .iter()
        .map(|stmt| {
            let ast::Stmt::Expr(stmt) = stmt else {
                panic!("expected expression statement");
            };
            let ast::Expr::Call(call) = &stmt.x else {
                panic!("expected call");
            };
            match &call.fun {
                ast::Expr::Ident(ident) => ident.name.clone(),
                ast::Expr::Selector(selector) => {
                    let ast::Expr::Ident(x) = &selector.x else {
                        panic!("expected package name");
                    };
                    format!("{}.{}", x.name, selector.sel.name)
                }
                other => panic!("unexpected callee {other:?}"),
            }
        })
        .collect()
}

fn import_names(file: &ast::File) -> Vec<(Option<String>, String)> {
    file.imports()
        .map(|spec| {
            (
                spec.name.as_ref().map(|name| name.name.clone()),
                spec.path_value().to_string(),
            )
        })
        .collect()
}

/// Package names from a table win over guesses, and conflicting names are
/// made unique
#[test]
fn test_managed_imports_resolve_conflicts() {
    let file = calling(
        vec![],
        vec![
            dst::Ident::remote("example.com/a/util", "A"),
            dst::Ident::remote("example.com/b/util", "B"),
            dst::Ident::remote("example.com/c/go-thing", "C"),
        ],
    );

    let resolver = MapPackageResolver::new()
        .with("example.com/a/util", "util")
        .with("example.com/b/util", "util");
    let mut restorer = Restorer::new()
        .with_resolver(resolver)
        .with_options(RestorerOptions::default().with_manage_imports(true));
    let restored = restorer.restore_file("main.go", &file).unwrap();

    assert_eq!(
        import_names(&restored),
        vec![
            (None, "example.com/a/util".to_string()),
            (Some("util2".to_string()), "example.com/b/util".to_string()),
            (None, "example.com/c/go-thing".to_string()),
        ]
    );
    assert_eq!(
        callees(&restored, 1),
        vec!["util.A", "util2.B", "thing.C"]
    );
}

/// Blank, dot and named imports survive management side by side
#[test]
fn test_managed_imports_mix_blank_dot_and_named() {
    let file = calling(
        vec![
            dst::ImportSpec::new(Some("_"), "embed"),
            dst::ImportSpec::new(Some("."), "strings"),
            dst::ImportSpec::new(Some("j"), "encoding/json"),
            dst::ImportSpec::new(None, "os"),
        ],
        vec![
            dst::Ident::remote("strings", "ToUpper"),
            dst::Ident::remote("encoding/json", "Marshal"),
            dst::Ident::remote("embed", "FS"),
        ],
    );

    let mut restorer =
        Restorer::new().with_options(RestorerOptions::default().with_manage_imports(true));
    let restored = restorer.restore_file("main.go", &file).unwrap();

    let named = |name: &str, path: &str| (Some(name.to_string()), path.to_string());
    assert_eq!(
        import_names(&restored),
        vec![
            named("_", "embed"),
            named(".", "strings"),
            named("j", "encoding/json"),
            (None, "embed".to_string()),
        ]
    );
    assert_eq!(
        callees(&restored, 1),
        vec!["ToUpper", "j.Marshal", "embed.FS"]
    );
}
