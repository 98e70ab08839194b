//! Type-conversion builtins: `int`, `float`, `str`, `bool`, `list`, `tuple`,
//! `dict` (spec.md §5.9). Each accepts zero or one argument, matching
//! Python's constructor-call conversion protocol without `__init__` hooks.

use std::rc::Rc;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::error::InterpreterError;
use crate::repr;
use crate::value::Value;

pub fn int(args: &[Value]) -> Result<Value, InterpreterError> {
    match args.first() {
        None => Ok(Value::Int(0)),
        Some(Value::Int(n)) => Ok(Value::Int(*n)),
        Some(Value::BigInt(n)) => Ok(Value::BigInt(Rc::clone(n))),
        Some(Value::Bool(b)) => Ok(Value::Int(*b as i64)),
        Some(Value::Float(f)) => int_from_f64(*f),
        Some(Value::Str(s)) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .or_else(|_| s.trim().parse::<BigInt>().map(|n| Value::BigInt(Rc::new(n))))
            .map_err(|_| InterpreterError::value(format!("invalid literal for int(): '{s}'"))),
        Some(other) => Err(InterpreterError::type_error(format!(
            "int() argument must be a string or a number, not '{}'",
            other.type_name()
        ))),
    }
}

fn int_from_f64(f: f64) -> Result<Value, InterpreterError> {
    if !f.is_finite() {
        return Err(InterpreterError::value("cannot convert float infinity or NaN to integer"));
    }
    let big = BigInt::from(f.trunc() as i128);
    Ok(big.to_i64().map_or_else(|| Value::BigInt(Rc::new(big)), Value::Int))
}

pub fn float(args: &[Value]) -> Result<Value, InterpreterError> {
    match args.first() {
        None => Ok(Value::Float(0.0)),
        Some(Value::Float(f)) => Ok(Value::Float(*f)),
        Some(Value::Int(n)) => Ok(Value::Float(*n as f64)),
        Some(Value::Bool(b)) => Ok(Value::Float(*b as i64 as f64)),
        Some(Value::Str(s)) => {
            s.trim().parse::<f64>().map(Value::Float).map_err(|_| InterpreterError::value(format!("could not convert string to float: '{s}'")))
        }
        Some(other) => Err(InterpreterError::type_error(format!(
            "float() argument must be a string or a number, not '{}'",
            other.type_name()
        ))),
    }
}

pub fn str(args: &[Value]) -> Result<Value, InterpreterError> {
    Ok(Value::str(args.first().map(repr::display).unwrap_or_default()))
}

pub fn bool_(args: &[Value]) -> Result<Value, InterpreterError> {
    Ok(Value::Bool(args.first().map(Value::is_truthy).unwrap_or(false)))
}

pub fn list(args: &[Value]) -> Result<Value, InterpreterError> {
    match args.first() {
        None => Ok(Value::list(Vec::new())),
        Some(value) => Ok(Value::list(crate::interpreter::materialize(value)?)),
    }
}

pub fn tuple(args: &[Value]) -> Result<Value, InterpreterError> {
    match args.first() {
        None => Ok(Value::Tuple(Rc::new(Vec::new()))),
        Some(value) => Ok(Value::Tuple(Rc::new(crate::interpreter::materialize(value)?))),
    }
}

pub fn dict(args: &[Value]) -> Result<Value, InterpreterError> {
    match args.first() {
        None => Ok(Value::dict(indexmap::IndexMap::new())),
        Some(Value::Dict(entries)) => Ok(Value::dict(entries.borrow().clone())),
        Some(other) => Err(InterpreterError::type_error(format!(
            "dict() argument must be a dict, not '{}'",
            other.type_name()
        ))),
    }
}
