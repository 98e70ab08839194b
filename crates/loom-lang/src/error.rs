//! Staged error types for the tokenizer, parser, and evaluator, plus the
//! top-level [`LoomError`] that `interpret` returns.
//!
//! Each stage owns its error taxonomy (spec.md §7); `LoomError` only exists
//! to let `?` cross stage boundaries and to centralize the diagnostic
//! `Display` format the CLI prints to stderr.

use std::fmt;

/// A 1-based (line, column) pair, the unit every diagnostic is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Converts a byte offset into the source into a 1-based (line, column).
///
/// Offsets past the end of `source` clamp to the last position, since both
/// the tokenizer and parser can raise at EOF.
pub fn locate(source: &str, offset: usize) -> SourceLocation {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut column = 1;
    for ch in source[..offset].chars() {
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    SourceLocation { line, column }
}

/// Tags for [`TokenizeError`], matching spec.md §7 exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeErrorKind {
    UnknownChar(char),
    UnknownEscape(String),
    UnterminatedString,
    BadIndent(String),
}

impl fmt::Display for TokenizeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownChar(ch) => write!(f, "Unknown character found: {ch:?}"),
            Self::UnknownEscape(seq) => write!(f, "Unknown escape sequence: {seq:?}"),
            Self::UnterminatedString => write!(f, "Unterminated string"),
            Self::BadIndent(msg) => write!(f, "{msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeError {
    pub kind: TokenizeErrorKind,
    pub location: SourceLocation,
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tokenize Error at {} - {}", self.location, self.kind)
    }
}

impl std::error::Error for TokenizeError {}

/// Tags for [`ParseError`], matching spec.md §7 exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Expected a particular token kind or lexeme, found something else.
    Expected(String),
    UnexpectedKeyword(String),
    InvalidAssignTarget(String),
    /// A grammar production this interpreter doesn't implement.
    Unimplemented(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected(msg) => write!(f, "{msg}"),
            Self::UnexpectedKeyword(word) => write!(f, "Unexpected keyword: {word}"),
            Self::InvalidAssignTarget(node) => write!(f, "Cannot assign to a {node}"),
            Self::Unimplemented(what) => {
                write!(f, "The loom syntax parser does not yet support {what}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse Error at {} - {}", self.location, self.kind)
    }
}

impl std::error::Error for ParseError {}

/// Tags for [`InterpreterError`], matching spec.md §7 exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterErrorKind {
    Name,
    Type,
    Arity,
    Attribute,
    Index,
    Key,
    Value,
    ZeroDivision,
    Import,
    Recursion,
}

impl InterpreterErrorKind {
    /// The Python-style exception class name this tag renders as.
    fn label(self) -> &'static str {
        match self {
            Self::Name => "NameError",
            Self::Type => "TypeError",
            Self::Arity => "ArityError",
            Self::Attribute => "AttributeError",
            Self::Index => "IndexError",
            Self::Key => "KeyError",
            Self::Value => "ValueError",
            Self::ZeroDivision => "ZeroDivisionError",
            Self::Import => "ImportError",
            Self::Recursion => "RecursionError",
        }
    }
}

/// A runtime error raised while walking the AST.
///
/// Unlike [`TokenizeError`]/[`ParseError`], this carries no source location
/// (spec.md §4.3's failure model stops at `<kind>: <msg>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterError {
    pub kind: InterpreterErrorKind,
    pub message: String,
}

impl InterpreterError {
    pub fn new(kind: InterpreterErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn name(message: impl Into<String>) -> Self {
        Self::new(InterpreterErrorKind::Name, message)
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(InterpreterErrorKind::Type, message)
    }

    pub fn arity(message: impl Into<String>) -> Self {
        Self::new(InterpreterErrorKind::Arity, message)
    }

    pub fn attribute(message: impl Into<String>) -> Self {
        Self::new(InterpreterErrorKind::Attribute, message)
    }

    pub fn index(message: impl Into<String>) -> Self {
        Self::new(InterpreterErrorKind::Index, message)
    }

    pub fn key(message: impl Into<String>) -> Self {
        Self::new(InterpreterErrorKind::Key, message)
    }

    pub fn value(message: impl Into<String>) -> Self {
        Self::new(InterpreterErrorKind::Value, message)
    }

    pub fn zero_division(message: impl Into<String>) -> Self {
        Self::new(InterpreterErrorKind::ZeroDivision, message)
    }

    pub fn import(message: impl Into<String>) -> Self {
        Self::new(InterpreterErrorKind::Import, message)
    }

    pub fn recursion() -> Self {
        Self::new(InterpreterErrorKind::Recursion, "maximum recursion depth exceeded")
    }
}

impl fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.message)
    }
}

impl std::error::Error for InterpreterError {}

/// Top-level error returned by [`crate::interpret`], uniting all three stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoomError {
    Tokenize(TokenizeError),
    Parse(ParseError),
    Interpreter(InterpreterError),
}

impl fmt::Display for LoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tokenize(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "{err}"),
            Self::Interpreter(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LoomError {}

impl From<TokenizeError> for LoomError {
    fn from(err: TokenizeError) -> Self {
        Self::Tokenize(err)
    }
}

impl From<ParseError> for LoomError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<InterpreterError> for LoomError {
    fn from(err: InterpreterError) -> Self {
        Self::Interpreter(err)
    }
}
