//! `enumerate(iterable)` / `enumerate(iterable, start)`. Eagerly materializes
//! to a list of `(index, value)` tuples, matching every other loom builtin's
//! no-lazy-iterator stance.

use std::rc::Rc;

use crate::error::InterpreterError;
use crate::interpreter::materialize;
use crate::value::Value;

pub fn enumerate(args: &[Value]) -> Result<Value, InterpreterError> {
    let iterable = args.first().ok_or_else(|| InterpreterError::arity("enumerate() missing required argument"))?;
    let start = match args.get(1) {
        Some(Value::Int(n)) => *n,
        Some(_) => return Err(InterpreterError::type_error("enumerate() start must be an int")),
        None => 0,
    };

    let items = materialize(iterable)?;
    let pairs = items
        .into_iter()
        .enumerate()
        .map(|(i, value)| Value::Tuple(Rc::new(vec![Value::Int(start + i as i64), value])))
        .collect();
    Ok(Value::list(pairs))
}
