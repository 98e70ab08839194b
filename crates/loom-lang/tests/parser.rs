use loom_lang::{parse_module, Expr, Literal, LoomError, Stmt};

#[test]
fn parses_simple_assignment() {
    let module = parse_module("x = 1\n").expect("should parse");
    assert_eq!(module.body.len(), 1);
    match &module.body[0] {
        Stmt::Assign { targets, value } => {
            assert_eq!(targets, &[Expr::Name("x".to_owned())]);
            assert_eq!(value, &Expr::Constant(Literal::Int(1)));
        }
        other => panic!("expected Assign, got {other:?}"),
    }
}

#[test]
fn parses_chained_assignment() {
    let module = parse_module("a = b = 1\n").expect("should parse");
    match &module.body[0] {
        Stmt::Assign { targets, .. } => assert_eq!(targets.len(), 2),
        other => panic!("expected Assign, got {other:?}"),
    }
}

#[test]
fn rejects_chained_comparison() {
    assert!(parse_module("x = 1 < 2 < 3\n").is_err());
}

#[test]
fn parses_function_def_with_decorator() {
    let source = "@wraps\ndef f(x):\n    return x\n";
    let module = parse_module(source).expect("should parse");
    match &module.body[0] {
        Stmt::FunctionDef(def) => {
            assert_eq!(def.name, "f");
            assert_eq!(def.params, vec!["x".to_owned()]);
            assert_eq!(def.decorators.len(), 1);
        }
        other => panic!("expected FunctionDef, got {other:?}"),
    }
}

#[test]
fn parses_if_elif_else() {
    let source = "if a:\n    pass\nelif b:\n    pass\nelse:\n    pass\n";
    let module = parse_module(source).expect("should parse");
    match &module.body[0] {
        Stmt::If { orelse, .. } => {
            assert_eq!(orelse.len(), 1);
            assert!(matches!(orelse[0], Stmt::If { .. }));
        }
        other => panic!("expected If, got {other:?}"),
    }
}

#[test]
fn parses_single_line_if() {
    let module = parse_module("if a: pass\n").expect("should parse");
    assert!(matches!(module.body[0], Stmt::If { .. }));
}

#[test]
fn parses_augmented_assignment() {
    let module = parse_module("x += 1\n").expect("should parse");
    assert!(matches!(module.body[0], Stmt::AugAssign { .. }));
}

#[test]
fn rejects_augmented_assignment_to_expression() {
    assert!(parse_module("1 + 2 += 1\n").is_err());
}

#[test]
fn parses_from_import_star() {
    let module = parse_module("from utils import *\n").expect("should parse");
    assert!(matches!(
        module.body[0],
        Stmt::ImportFrom { ref module, .. } if module == "utils"
    ));
}

#[test]
fn parses_nested_subscript_and_attribute() {
    let module = parse_module("a.b[0].c\n").expect("should parse");
    assert!(matches!(module.body[0], Stmt::ExprStmt(Expr::Attribute(_, _))));
}

#[test]
fn error_reports_line_and_column() {
    let err = parse_module("x = \n").unwrap_err();
    match err {
        LoomError::Parse(parse_err) => assert_eq!(parse_err.location.line, 1),
        other => panic!("expected a ParseError, got {other:?}"),
    }
}
