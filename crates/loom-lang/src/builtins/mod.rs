//! The fixed builtin library (spec.md §5.9): installed once into the global
//! scope at interpreter construction. No builtin is user-redefinable through
//! any mechanism this language exposes, so a plain table is enough.

mod convert;
mod deque;
mod enumerate;
mod print;
mod range;

use std::rc::Rc;

use crate::error::InterpreterError;
use crate::repr;
use crate::scope::Scope;
use crate::value::{BuiltinFn, BuiltinFunction, Value};

const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("print", print::print),
    ("len", len),
    ("range", range::range),
    ("enumerate", enumerate::enumerate),
    ("deque", deque::deque),
    ("int", convert::int),
    ("float", convert::float),
    ("str", convert::str),
    ("bool", convert::bool_),
    ("list", convert::list),
    ("tuple", convert::tuple),
    ("dict", convert::dict),
    ("abs", abs),
    ("min", min),
    ("max", max),
    ("sum", sum),
    ("sorted", sorted),
    ("type", type_of),
];

pub fn install(globals: &Scope) {
    for (name, func) in BUILTINS {
        globals.define(*name, Value::Builtin(Rc::new(BuiltinFunction { name, func: *func })));
    }
}

fn len(args: &[Value]) -> Result<Value, InterpreterError> {
    let value = args.first().ok_or_else(|| InterpreterError::arity("len() missing required argument"))?;
    repr::value_len(value)
        .map(|n| Value::Int(n as i64))
        .ok_or_else(|| InterpreterError::type_error(format!("object of type '{}' has no len()", value.type_name())))
}

fn abs(args: &[Value]) -> Result<Value, InterpreterError> {
    let value = args.first().ok_or_else(|| InterpreterError::arity("abs() missing required argument"))?;
    match value {
        Value::Int(n) => Ok(Value::Int(n.wrapping_abs())),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        Value::BigInt(n) => {
            use num_traits::Signed;
            Ok(Value::BigInt(Rc::new(n.as_ref().abs())))
        }
        Value::Bool(b) => Ok(Value::Int(*b as i64)),
        other => Err(InterpreterError::type_error(format!(
            "bad operand type for abs(): '{}'",
            other.type_name()
        ))),
    }
}

fn min(args: &[Value]) -> Result<Value, InterpreterError> {
    extreme(args, "min", |ordering| ordering.is_lt())
}

fn max(args: &[Value]) -> Result<Value, InterpreterError> {
    extreme(args, "max", |ordering| ordering.is_gt())
}

fn extreme(args: &[Value], name: &str, keep_left: impl Fn(std::cmp::Ordering) -> bool) -> Result<Value, InterpreterError> {
    let items: Vec<Value> = if args.len() == 1 {
        crate::interpreter::materialize(&args[0])?
    } else {
        args.to_vec()
    };
    let mut items = items.into_iter();
    let mut best = items.next().ok_or_else(|| InterpreterError::value(format!("{name}() arg is an empty sequence")))?;
    for item in items {
        let ordering = value_cmp(&item, &best)?;
        if keep_left(ordering) {
            best = item;
        }
    }
    Ok(best)
}

fn value_cmp(a: &Value, b: &Value) -> Result<std::cmp::Ordering, InterpreterError> {
    if let (Value::Str(x), Value::Str(y)) = (a, b) {
        return Ok(x.cmp(y));
    }
    crate::numeric::compare(a, b).ok_or_else(|| {
        InterpreterError::type_error(format!("'<' not supported between instances of '{}' and '{}'", a.type_name(), b.type_name()))
    })
}

fn sum(args: &[Value]) -> Result<Value, InterpreterError> {
    let iterable = args.first().ok_or_else(|| InterpreterError::arity("sum() missing required argument"))?;
    let items = crate::interpreter::materialize(iterable)?;
    let mut total = args.get(1).cloned().unwrap_or(Value::Int(0));
    for item in items {
        total = crate::numeric::add(&total, &item)
            .unwrap_or_else(|| Err(InterpreterError::type_error(format!("unsupported operand type(s) for +: '{}' and '{}'", total.type_name(), item.type_name()))))?;
    }
    Ok(total)
}

fn sorted(args: &[Value]) -> Result<Value, InterpreterError> {
    let iterable = args.first().ok_or_else(|| InterpreterError::arity("sorted() missing required argument"))?;
    let mut items = crate::interpreter::materialize(iterable)?;
    let mut err = None;
    items.sort_by(|a, b| match value_cmp(a, b) {
        Ok(ordering) => ordering,
        Err(e) => {
            err = Some(e);
            std::cmp::Ordering::Equal
        }
    });
    if let Some(e) = err {
        return Err(e);
    }
    Ok(Value::list(items))
}

fn type_of(args: &[Value]) -> Result<Value, InterpreterError> {
    let value = args.first().ok_or_else(|| InterpreterError::arity("type() missing required argument"))?;
    Ok(Value::str(value.type_name()))
}
