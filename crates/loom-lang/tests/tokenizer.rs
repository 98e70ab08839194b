use loom_lang::{tokenize, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).expect("tokenize should succeed").iter().map(|t| t.kind).collect()
}

#[test]
fn simple_assignment_has_no_indent_tokens() {
    let kinds = kinds("x = 1\n");
    assert_eq!(kinds, vec![TokenKind::Name, TokenKind::Op, TokenKind::Number, TokenKind::Newline]);
}

#[test]
fn indented_block_emits_indent_and_dedent() {
    let source = "if x:\n    y = 1\nz = 2\n";
    let tokens = tokenize(source).expect("tokenize should succeed");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert!(kinds.contains(&TokenKind::Indent));
    assert!(kinds.contains(&TokenKind::Dedent));
}

#[test]
fn brackets_suppress_newlines() {
    let source = "x = [\n1,\n2,\n]\n";
    let tokens = tokenize(source).expect("tokenize should succeed");
    let newline_count = tokens.iter().filter(|t| t.kind == TokenKind::Newline).count();
    assert_eq!(newline_count, 1);
}

#[test]
fn double_star_is_one_token() {
    let tokens = tokenize("2 ** 3\n").expect("tokenize should succeed");
    assert_eq!(tokens[1].lexeme, "**");
}

#[test]
fn floor_div_is_one_token() {
    let tokens = tokenize("7 // 2\n").expect("tokenize should succeed");
    assert_eq!(tokens[1].lexeme, "//");
}

#[test]
fn unterminated_string_is_an_error() {
    assert!(tokenize("x = 'abc\n").is_err());
}

#[test]
fn inconsistent_dedent_is_an_error() {
    let source = "if x:\n    y = 1\n   z = 2\n";
    assert!(tokenize(source).is_err());
}

#[test]
fn byte_string_prefix_is_scanned_as_one_string_token() {
    let tokens = tokenize("b'abc'\n").expect("tokenize should succeed");
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "b'abc'");
}

#[test]
fn multi_byte_source_keeps_spans_aligned() {
    let source = "x = '\u{2603}'\n";
    let tokens = tokenize(source).expect("tokenize should succeed");
    let string_token = tokens.iter().find(|t| t.kind == TokenKind::String).expect("has a string token");
    assert_eq!(&source[string_token.start..=string_token.end], "'\u{2603}'");
}

#[test]
fn comments_are_discarded() {
    let kinds = kinds("x = 1 # a comment\n");
    assert_eq!(kinds, vec![TokenKind::Name, TokenKind::Op, TokenKind::Number, TokenKind::Newline]);
}
