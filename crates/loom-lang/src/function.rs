//! Function construction and decorator application (spec.md §5.7).
//!
//! Decorators are applied nearest-to-`def` first: `@a @b def f` builds
//! `a(b(f))`, so `b` wraps the raw function and `a` wraps `b`'s result.
//! Source order lists `a` before `b`, so application walks the decorator
//! list in reverse.

use std::rc::Rc;

use crate::ast::FunctionDef;
use crate::error::InterpreterError;
use crate::scope::Scope;
use crate::value::{UserFunction, Value};

pub fn make_function(definition: Rc<FunctionDef>, defining_scope: Scope, defining_globals: Scope) -> Value {
    Value::Function(Rc::new(UserFunction { definition, defining_scope, defining_globals }))
}

/// Builds the raw function value, then folds the decorator expressions over
/// it nearest-to-`def` first. `call` is the evaluator's call entry point,
/// threaded in to avoid a circular module dependency on `interpreter.rs`.
pub fn define_and_decorate(
    definition: Rc<FunctionDef>,
    defining_scope: Scope,
    defining_globals: Scope,
    decorators: &[Value],
    call: impl Fn(&Value, &[Value]) -> Result<Value, InterpreterError>,
) -> Result<Value, InterpreterError> {
    let mut value = make_function(definition, defining_scope, defining_globals);
    for decorator in decorators.iter().rev() {
        value = call(decorator, std::slice::from_ref(&value))?;
    }
    Ok(value)
}

pub fn check_arity(function: &UserFunction, args: &[Value]) -> Result<(), InterpreterError> {
    let expected = function.definition.params.len();
    if args.len() != expected {
        return Err(InterpreterError::arity(format!(
            "{}() takes {} argument{} but {} {} given",
            function.definition.name,
            expected,
            if expected == 1 { "" } else { "s" },
            args.len(),
            if args.len() == 1 { "was" } else { "were" },
        )));
    }
    Ok(())
}
