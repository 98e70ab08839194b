use loom_lang::{interpret, LoomError};

fn run(source: &str) -> LoomError {
    interpret(source).expect_err("source should fail")
}

#[test]
fn undefined_name_is_a_name_error() {
    let err = run("print(undefined_name)\n");
    match err {
        LoomError::Interpreter(e) => assert_eq!(e.kind, loom_lang::InterpreterErrorKind::Name),
        other => panic!("expected an InterpreterError, got {other:?}"),
    }
}

#[test]
fn division_by_zero_is_a_zero_division_error() {
    let err = run("x = 1 / 0\n");
    match err {
        LoomError::Interpreter(e) => assert_eq!(e.kind, loom_lang::InterpreterErrorKind::ZeroDivision),
        other => panic!("expected an InterpreterError, got {other:?}"),
    }
}

#[test]
fn mismatched_types_are_a_type_error() {
    let err = run("x = 1 + 'a'\n");
    match err {
        LoomError::Interpreter(e) => assert_eq!(e.kind, loom_lang::InterpreterErrorKind::Type),
        other => panic!("expected an InterpreterError, got {other:?}"),
    }
}

#[test]
fn list_index_out_of_range_is_an_index_error() {
    let err = run("x = [1, 2][5]\n");
    match err {
        LoomError::Interpreter(e) => assert_eq!(e.kind, loom_lang::InterpreterErrorKind::Index),
        other => panic!("expected an InterpreterError, got {other:?}"),
    }
}

#[test]
fn missing_dict_key_is_a_key_error() {
    let err = run("x = {'a': 1}['b']\n");
    match err {
        LoomError::Interpreter(e) => assert_eq!(e.kind, loom_lang::InterpreterErrorKind::Key),
        other => panic!("expected an InterpreterError, got {other:?}"),
    }
}

#[test]
fn tokenize_error_display_has_location() {
    let err = run("x = 'unterminated\n");
    assert!(matches!(err, LoomError::Tokenize(_)));
    assert!(err.to_string().starts_with("Tokenize Error at"));
}

#[test]
fn parse_error_display_has_location() {
    let err = run("x = \n");
    assert!(matches!(err, LoomError::Parse(_)));
    assert!(err.to_string().starts_with("Parse Error at"));
}

#[test]
fn interpreter_error_display_has_no_location() {
    let err = run("x = 1 / 0\n");
    assert_eq!(err.to_string(), "ZeroDivisionError: division by zero");
}
