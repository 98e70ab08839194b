//! Arithmetic on the `Int`/`BigInt`/`Float`/`Bool` numeric tower (spec.md
//! §11): `i64` is the fast path, promoted to [`BigInt`] the moment a
//! checked operation overflows. `Bool` participates as 0/1, matching
//! Python's `bool` being an `int` subtype.

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::error::InterpreterError;
use crate::value::Value;

enum Num {
    Int(i64),
    Big(BigInt),
    Float(f64),
}

fn classify(value: &Value) -> Option<Num> {
    match value {
        Value::Bool(b) => Some(Num::Int(*b as i64)),
        Value::Int(n) => Some(Num::Int(*n)),
        Value::BigInt(n) => Some(Num::Big(n.as_ref().clone())),
        Value::Float(f) => Some(Num::Float(*f)),
        _ => None,
    }
}

fn normalize(big: BigInt) -> Value {
    match big.to_i64() {
        Some(n) => Value::Int(n),
        None => Value::BigInt(std::rc::Rc::new(big)),
    }
}

fn as_f64(num: &Num) -> f64 {
    match num {
        Num::Int(n) => *n as f64,
        Num::Big(n) => n.to_f64().unwrap_or(f64::NAN),
        Num::Float(f) => *f,
    }
}

fn as_big(num: &Num) -> BigInt {
    match num {
        Num::Int(n) => BigInt::from(*n),
        Num::Big(n) => n.clone(),
        Num::Float(f) => BigInt::from(*f as i64),
    }
}

fn is_float(a: &Num, b: &Num) -> bool {
    matches!(a, Num::Float(_)) || matches!(b, Num::Float(_))
}

pub fn add(a: &Value, b: &Value) -> Option<Result<Value, InterpreterError>> {
    binary(a, b, |a, b| a.checked_add(b), |a, b| a + b, |a, b| a + b)
}

pub fn sub(a: &Value, b: &Value) -> Option<Result<Value, InterpreterError>> {
    binary(a, b, |a, b| a.checked_sub(b), |a, b| a - b, |a, b| a - b)
}

pub fn mul(a: &Value, b: &Value) -> Option<Result<Value, InterpreterError>> {
    binary(a, b, |a, b| a.checked_mul(b), |a, b| a * b, |a, b| a * b)
}

fn binary(
    a: &Value,
    b: &Value,
    fast: impl Fn(i64, i64) -> Option<i64>,
    big_op: impl Fn(BigInt, BigInt) -> BigInt,
    float_op: impl Fn(f64, f64) -> f64,
) -> Option<Result<Value, InterpreterError>> {
    let (na, nb) = (classify(a)?, classify(b)?);
    if is_float(&na, &nb) {
        return Some(Ok(Value::Float(float_op(as_f64(&na), as_f64(&nb)))));
    }
    if let (Num::Int(x), Num::Int(y)) = (&na, &nb) {
        if let Some(result) = fast(*x, *y) {
            return Some(Ok(Value::Int(result)));
        }
    }
    Some(Ok(normalize(big_op(as_big(&na), as_big(&nb)))))
}

pub fn div(a: &Value, b: &Value) -> Option<Result<Value, InterpreterError>> {
    let (na, nb) = (classify(a)?, classify(b)?);
    let denom = as_f64(&nb);
    if denom == 0.0 {
        return Some(Err(InterpreterError::zero_division("division by zero")));
    }
    Some(Ok(Value::Float(as_f64(&na) / denom)))
}

pub fn floordiv(a: &Value, b: &Value) -> Option<Result<Value, InterpreterError>> {
    let (na, nb) = (classify(a)?, classify(b)?);
    if is_float(&na, &nb) {
        let denom = as_f64(&nb);
        if denom == 0.0 {
            return Some(Err(InterpreterError::zero_division("float floor division by zero")));
        }
        return Some(Ok(Value::Float((as_f64(&na) / denom).floor())));
    }
    let (x, y) = (as_big(&na), as_big(&nb));
    if y.is_zero() {
        return Some(Err(InterpreterError::zero_division("integer division or modulo by zero")));
    }
    Some(Ok(normalize(floor_div_big(x, y))))
}

pub fn modulo(a: &Value, b: &Value) -> Option<Result<Value, InterpreterError>> {
    let (na, nb) = (classify(a)?, classify(b)?);
    if is_float(&na, &nb) {
        let denom = as_f64(&nb);
        if denom == 0.0 {
            return Some(Err(InterpreterError::zero_division("float modulo")));
        }
        let x = as_f64(&na);
        return Some(Ok(Value::Float(x - denom * (x / denom).floor())));
    }
    let (x, y) = (as_big(&na), as_big(&nb));
    if y.is_zero() {
        return Some(Err(InterpreterError::zero_division("integer division or modulo by zero")));
    }
    let rem = &x - floor_div_big(x.clone(), y.clone()) * &y;
    Some(Ok(normalize(rem)))
}

fn floor_div_big(a: BigInt, b: BigInt) -> BigInt {
    let (quotient, remainder) = (&a / &b, &a % &b);
    if !remainder.is_zero() && (remainder.clone() < BigInt::from(0)) != (b < BigInt::from(0)) {
        quotient - 1
    } else {
        quotient
    }
}

pub fn pow(a: &Value, b: &Value) -> Option<Result<Value, InterpreterError>> {
    let (na, nb) = (classify(a)?, classify(b)?);
    if is_float(&na, &nb) {
        return Some(Ok(Value::Float(as_f64(&na).powf(as_f64(&nb)))));
    }
    if let Num::Int(exp) = nb {
        if exp < 0 {
            return Some(Ok(Value::Float(as_f64(&na).powf(exp as f64))));
        }
        let base = as_big(&na);
        return Some(Ok(normalize(pow_big(base, exp as u64))));
    }
    Some(Ok(Value::Float(as_f64(&na).powf(as_f64(&nb)))))
}

fn pow_big(base: BigInt, mut exp: u64) -> BigInt {
    let mut result = BigInt::from(1);
    let mut base = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result *= &base;
        }
        base = &base * &base;
        exp >>= 1;
    }
    result
}

pub fn is_numeric(value: &Value) -> bool {
    classify(value).is_some()
}

pub fn negate(value: &Value) -> Option<Value> {
    match classify(value)? {
        Num::Int(n) => match n.checked_neg() {
            Some(result) => Some(Value::Int(result)),
            None => Some(normalize(-BigInt::from(n))),
        },
        Num::Big(n) => Some(normalize(-n)),
        Num::Float(f) => Some(Value::Float(-f)),
    }
}

/// Three-way numeric comparison, used by every `CompareOp` that isn't
/// identity- or membership-based.
pub fn compare(a: &Value, b: &Value) -> Option<std::cmp::Ordering> {
    let (na, nb) = (classify(a)?, classify(b)?);
    if is_float(&na, &nb) {
        return as_f64(&na).partial_cmp(&as_f64(&nb));
    }
    Some(as_big(&na).cmp(&as_big(&nb)))
}
