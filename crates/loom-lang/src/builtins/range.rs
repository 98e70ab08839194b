//! `range(stop)` / `range(start, stop)` / `range(start, stop, step)`.

use std::rc::Rc;

use crate::error::InterpreterError;
use crate::value::{RangeValue, Value};

pub fn range(args: &[Value]) -> Result<Value, InterpreterError> {
    let as_int = |v: &Value| match v {
        Value::Int(n) => Ok(*n),
        other => Err(InterpreterError::type_error(format!(
            "'{}' object cannot be interpreted as an integer",
            other.type_name()
        ))),
    };

    let (start, stop, step) = match args {
        [stop] => (0, as_int(stop)?, 1),
        [start, stop] => (as_int(start)?, as_int(stop)?, 1),
        [start, stop, step] => (as_int(start)?, as_int(stop)?, as_int(step)?),
        _ => return Err(InterpreterError::arity("range() takes 1 to 3 arguments")),
    };

    if step == 0 {
        return Err(InterpreterError::value("range() arg 3 must not be zero"));
    }

    Ok(Value::Range(Rc::new(RangeValue { start, stop, step })))
}
