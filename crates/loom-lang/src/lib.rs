//! loom: a tree-walking interpreter for a small, indentation-structured,
//! dynamically-typed scripting language.
//!
//! The pipeline is tokenizer ([`lexer`]) -> parser ([`parser`]) -> evaluator
//! ([`interpreter`]), the same three stages spec.md lays out. [`interpret`]
//! drives all three and is the only entry point most callers need; the
//! individual stages are public for anything that wants to inspect tokens or
//! an AST directly (tooling, tests).

mod ast;
mod builtins;
mod error;
mod function;
mod interpreter;
mod lexer;
mod literal;
mod methods;
mod modules;
mod numeric;
mod parser;
mod repr;
mod scope;
mod token;
mod value;

use std::path::PathBuf;

pub use ast::{Expr, Literal, Module, Stmt};
pub use error::{
    InterpreterError, InterpreterErrorKind, LoomError, ParseError, ParseErrorKind, SourceLocation, TokenizeError,
    TokenizeErrorKind,
};
pub use interpreter::{EvalLimits, Interpreter};
pub use token::{Token, TokenKind};
pub use value::Value;

/// Runs a loom program to completion, executing top-level statements for
/// their side effects. Imports resolve relative to the current working
/// directory (spec.md §6.2's non-goal on a real module search path).
pub fn interpret(source: &str) -> Result<(), LoomError> {
    interpret_with_limits(source, EvalLimits::default())
}

/// As [`interpret`], with caller-chosen resource limits (spec.md §10.2).
pub fn interpret_with_limits(source: &str, limits: EvalLimits) -> Result<(), LoomError> {
    let module = parse_module(source)?;
    let interpreter = Interpreter::new(limits);
    interpreter.run(&module)?;
    Ok(())
}

/// As [`interpret`], but resolves imports relative to a caller-chosen
/// `base_dir` instead of calling [`std::env::current_dir`] itself. The CLI
/// still passes the process's current working directory here (spec.md §4.3);
/// this exists so tests can point imports at a temporary directory without
/// touching the real working directory.
pub fn interpret_in_dir(source: &str, base_dir: PathBuf, limits: EvalLimits) -> Result<(), LoomError> {
    let module = parse_module(source)?;
    let interpreter = Interpreter::with_base_dir(limits, base_dir);
    interpreter.run(&module)?;
    Ok(())
}

/// Runs just the tokenizer and parser, useful for tooling that wants the AST
/// without executing it.
pub fn parse_module(source: &str) -> Result<Module, LoomError> {
    let tokens = lexer::tokenize(source)?;
    let module = parser::parse(source, tokens)?;
    Ok(module)
}

/// Runs just the tokenizer, exposed for tooling and tests that want the raw
/// token stream.
pub fn tokenize(source: &str) -> Result<Vec<Token>, TokenizeError> {
    lexer::tokenize(source)
}
