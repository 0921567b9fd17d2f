//! Multi-file packages, position errors and configuration driven restores

mod common;

use std::fs;

use common::{Source, comment_texts, func_body};
use decor_core::dst;
use decor_core::{ConfigLoader, Decorator, ErrorKind, GuessRefResolver, Restorer};
use decor_syntax::ast;
use decor_syntax::{FileSet, Token};
use tempfile::TempDir;

const CALLER: &str = "package demo\n\nfunc a() {\n\tb()\n}\n";
const CALLEE: &str = "package demo\n\n// b is called by a\nfunc b() {\n}\n";

/// Both files of a package sharing one file set
fn demo_package() -> (FileSet, ast::Package) {
    let mut fset = FileSet::new();

    let a = Source::new("a.go", CALLER);
    a.register(&mut fset);
    let body = a.block("func a(", vec![a.call_stmt("b")]);
    let a_file = a.file("demo", vec![a.func("a", body)], vec![]);

    let b = Source::at("b.go", CALLEE, fset.base());
    b.register(&mut fset);
    let body = b.block("func b(", vec![]);
    let b_file = b.file(
        "demo",
        vec![b.func("b", body)],
        vec![b.group(&["// b is called by a"])],
    );

    let package = ast::Package {
        name: "demo".to_string(),
        files: [("a.go".to_string(), a_file), ("b.go".to_string(), b_file)]
            .into_iter()
            .collect(),
    };
    (fset, package)
}

fn decorate_package(fset: &FileSet, package: &ast::Package) -> dst::Package {
    Decorator::new(fset)
        .with_resolver(GuessRefResolver)
        .decorate_package(package)
        .unwrap()
}

/// Test decorating every file of a package against one file set
#[test]
fn test_decorate_package() {
    let (fset, package) = demo_package();
    let decorated = decorate_package(&fset, &package);

    assert_eq!(decorated.name, "demo");
    assert_eq!(decorated.files.len(), 2);

    let a = &decorated.files["a.go"];
    assert_eq!(func_body(a, 0).list.len(), 1);

    let dst::Decl::Func(b) = &decorated.files["b.go"].decls[0] else {
        panic!("expected function declaration");
    };
    assert_eq!(b.decs.start.all()[0], "// b is called by a");
}

/// Test restoring a package registers its files one after another
#[test]
fn test_restore_package() {
    let (fset, package) = demo_package();
    let decorated = decorate_package(&fset, &package);

    let mut restorer = Restorer::new();
    let restored = restorer.restore_package(&decorated).unwrap();
    assert_eq!(restored.name, "demo");
    assert_eq!(restored.files.len(), 2);
    assert!(comment_texts(&restored.files["a.go"]).is_empty());
    assert_eq!(
        comment_texts(&restored.files["b.go"]),
        vec!["// b is called by a"]
    );

    let fset = restorer.into_fset();
    assert_eq!(fset.files().count(), 2);
    let a = fset.file_by_name("a.go").unwrap();
    let b = fset.file_by_name("b.go").unwrap();
    assert!(b.base() > a.base() + a.size());

    let b_file = &restored.files["b.go"];
    assert_eq!(fset.file(b_file.package).map(|file| file.name()), Some("b.go"));
}

/// Test a restored package decorates back to the same tree
#[test]
fn test_package_round_trip() {
    let (fset, package) = demo_package();
    let decorated = decorate_package(&fset, &package);

    let mut restorer = Restorer::new();
    let restored = restorer.restore_package(&decorated).unwrap();
    let again = decorate_package(restorer.fset(), &restored);
    assert_eq!(again, decorated);
}

/// Test decorating a file the file set does not know
#[test]
fn test_unregistered_file_is_a_position_error() {
    let src = Source::new("a.go", CALLER);
    let body = src.block("func a(", vec![src.call_stmt("b")]);
    let file = src.file("demo", vec![src.func("a", body)], vec![]);

    let fset = FileSet::new();
    let err = Decorator::new(&fset).decorate_file(&file).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Position);
    assert!(!err.is_recoverable());
}

/// Test restorer options loaded from a discovered config file
#[test]
fn test_config_file_drives_import_management() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("decor.toml"),
        r#"
[restorer]
manageImports = true

[restorer.aliases]
"example.com/mod/pkg" = "p"
"#,
    )
    .unwrap();
    let config = ConfigLoader::load(None, Some(dir.path())).unwrap();
    assert!(config.restorer.manage_imports);

    let mut stmt = dst::ExprStmt::new(dst::CallExpr::new(
        dst::Ident::remote("example.com/mod/pkg", "Func"),
        vec![],
    ));
    stmt.decs.after = dst::SpaceType::NewLine;
    let mut file = dst::File::new("main");
    file.decls.push(dst::Decl::Func(Box::new(dst::FuncDecl {
        recv: None,
        name: dst::Ident::new("main"),
        typ: dst::FuncType {
            func: true,
            params: dst::FieldList::new(vec![]),
            ..Default::default()
        },
        body: Some(dst::BlockStmt::new(vec![stmt.into()])),
        decs: Default::default(),
    })));

    let mut restorer = Restorer::new().with_options(config.restorer);
    let restored = restorer.restore_file("main.go", &file).unwrap();

    let ast::Decl::Gen(import) = &restored.decls[0] else {
        panic!("expected import declaration");
    };
    assert_eq!(import.tok, Token::Import);
    let spec = restored.imports().next().unwrap();
    assert_eq!(spec.path_value(), "example.com/mod/pkg");
    assert_eq!(spec.name.as_ref().map(|name| name.name.as_str()), Some("p"));

    let ast::Decl::Func(func) = &restored.decls[1] else {
        panic!("expected function declaration");
    };
    let ast::Stmt::Expr(stmt) = &func.body.as_ref().unwrap().list[0] else {
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
    assert_eq!(package.name, "p");
    assert_eq!(selector.sel.name, "Func");
}

/// Test an explicit config path that does not exist
#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let err = ConfigLoader::load(Some(&dir.path().join("absent.toml")), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

/// Test restoring into a file set that already holds the original files
#[test]
fn test_restore_into_existing_file_set() {
    let (fset, package) = demo_package();
    let decorated = decorate_package(&fset, &package);
    let end = fset.base();

    let mut restorer = Restorer::new().with_fset(fset);
    let restored = restorer
        .restore_file("a_copy.go", &decorated.files["a.go"])
        .unwrap();

    let fset = restorer.fset();
    assert_eq!(fset.files().count(), 3);
    let copy = fset.file(restored.package).unwrap();
    assert_eq!(copy.name(), "a_copy.go");
    assert_eq!(copy.base(), end);
}
