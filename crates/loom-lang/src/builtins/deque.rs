//! `deque()` / `deque(iterable)`, the one non-literal container constructor
//! loom exposes (spec.md §11's `collections.deque` supplement).

use std::collections::VecDeque;

use crate::error::InterpreterError;
use crate::interpreter::materialize;
use crate::value::Value;

pub fn deque(args: &[Value]) -> Result<Value, InterpreterError> {
    match args.first() {
        None => Ok(Value::deque(VecDeque::new())),
        Some(iterable) => Ok(Value::deque(materialize(iterable)?.into_iter().collect())),
    }
}
