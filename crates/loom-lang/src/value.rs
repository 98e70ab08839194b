//! The runtime value model (spec.md §5): a tagged union over every kind of
//! object a loom program can hold, plus `str`/`repr` formatting and the
//! manual `Eq`/`Hash` needed to use values as `Dict` keys.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;
use num_bigint::BigInt;

use crate::ast::FunctionDef;
use crate::scope::Scope;

/// A shared, mutable loom value. Containers hold `Rc<RefCell<..>>` so that
/// aliasing (`a = []; b = a; b.append(1)`) is visible through both names,
/// matching reference semantics for mutable containers.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    /// Present only once an `Int` operation overflows `i64` (spec.md §11).
    BigInt(Rc<BigInt>),
    Float(f64),
    Str(Rc<String>),
    Bytes(Rc<Vec<u8>>),
    List(Rc<RefCell<Vec<Value>>>),
    Tuple(Rc<Vec<Value>>),
    Dict(Rc<RefCell<IndexMap<Value, Value>>>),
    Deque(Rc<RefCell<VecDeque<Value>>>),
    Range(Rc<RangeValue>),
    Function(Rc<UserFunction>),
    Builtin(Rc<BuiltinFunction>),
    BoundMethod(Rc<BoundMethod>),
    Module(Rc<ModuleValue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeValue {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

/// A user-defined function: its AST plus the two scopes it closes over.
///
/// `defining_scope` is the lexical scope the `def` executed in (enables
/// closures); `defining_globals` is that module's top-level scope, which
/// `global`-free name lookup still needs for fallback at call time.
pub struct UserFunction {
    pub definition: Rc<FunctionDef>,
    pub defining_scope: Scope,
    pub defining_globals: Scope,
}

/// A builtin implemented in Rust. `name` exists purely for `repr`/error text.
pub struct BuiltinFunction {
    pub name: &'static str,
    pub func: BuiltinFn,
}

pub type BuiltinFn = fn(&[Value]) -> Result<Value, crate::error::InterpreterError>;

/// A builtin or user function bound to a receiver (`"abc".upper`, `d.items`).
pub struct BoundMethod {
    pub receiver: Value,
    pub name: Rc<str>,
}

/// A loaded module's namespace, keyed by the path it was imported from so
/// re-imports of the same file are memoized (spec.md §6.2).
pub struct ModuleValue {
    pub name: String,
    pub scope: Scope,
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(Rc::new(s.into()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn dict(entries: IndexMap<Value, Value>) -> Self {
        Value::Dict(Rc::new(RefCell::new(entries)))
    }

    pub fn deque(items: VecDeque<Value>) -> Self {
        Value::Deque(Rc::new(RefCell::new(items)))
    }

    /// Truthiness per spec.md §5: `None`, `False`, `0`, `0.0`, and empty
    /// containers are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::BigInt(n) => !n.as_ref().eq(&BigInt::from(0)),
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bytes(b) => !b.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Tuple(items) => !items.is_empty(),
            Value::Dict(entries) => !entries.borrow().is_empty(),
            Value::Deque(items) => !items.borrow().is_empty(),
            Value::Range(range) => range_len(range) > 0,
            Value::Function(_) | Value::Builtin(_) | Value::BoundMethod(_) | Value::Module(_) => true,
        }
    }

    /// The Python-style type name used in error messages and `type()`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::BigInt(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Dict(_) => "dict",
            Value::Deque(_) => "deque",
            Value::Range(_) => "range",
            Value::Function(_) | Value::Builtin(_) | Value::BoundMethod(_) => "function",
            Value::Module(_) => "module",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}

pub fn range_len(range: &RangeValue) -> i64 {
    if range.step > 0 {
        ((range.stop - range.start).max(0) + range.step - 1) / range.step
    } else if range.step < 0 {
        ((range.start - range.stop).max(0) + (-range.step) - 1) / (-range.step)
    } else {
        0
    }
}

/// Structural equality, matching Python's `==` closely enough for this
/// language's scope: numeric towers compare by value across `Int`/`BigInt`/
/// `Float`, containers compare element-wise, everything else compares by
/// identity of kind and payload.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::List(a), Value::List(b)) => *a.borrow() == *b.borrow(),
            (Value::Dict(a), Value::Dict(b)) => *a.borrow() == *b.borrow(),
            (Value::Deque(a), Value::Deque(b)) => *a.borrow() == *b.borrow(),
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::Module(a), Value::Module(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            _ if self.is_numeric() && other.is_numeric() => numeric_eq(self, other),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::BigInt(_) | Value::Float(_) | Value::Bool(_))
    }
}

fn numeric_eq(a: &Value, b: &Value) -> bool {
    fn as_f64(v: &Value) -> f64 {
        match v {
            Value::Bool(b) => *b as i64 as f64,
            Value::Int(n) => *n as f64,
            Value::BigInt(n) => big_to_f64(n),
            Value::Float(f) => *f,
            _ => f64::NAN,
        }
    }
    match (a, b) {
        (Value::BigInt(x), Value::BigInt(y)) => x == y,
        (Value::Float(_), _) | (_, Value::Float(_)) => as_f64(a) == as_f64(b),
        _ => as_f64(a) == as_f64(b),
    }
}

fn big_to_f64(n: &BigInt) -> f64 {
    use num_traits::ToPrimitive;
    n.to_f64().unwrap_or(f64::NAN)
}

/// Hashing is only sound for the value kinds the evaluator allows as dict
/// keys (spec.md §5.4); mutable containers panicking here would be a
/// programmer error in `methods.rs`, not a condition to recover from.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::None => 0u8.hash(state),
            Value::Bool(b) => {
                1u8.hash(state);
                (*b as i64 as f64).to_bits().hash(state);
            }
            Value::Int(n) => {
                1u8.hash(state);
                (*n as f64).to_bits().hash(state);
            }
            Value::BigInt(n) => {
                1u8.hash(state);
                big_to_f64(n).to_bits().hash(state);
            }
            Value::Float(f) => {
                1u8.hash(state);
                f.to_bits().hash(state);
            }
            Value::Str(s) => {
                2u8.hash(state);
                s.hash(state);
            }
            Value::Bytes(b) => {
                3u8.hash(state);
                b.hash(state);
            }
            Value::Tuple(items) => {
                4u8.hash(state);
                items.hash(state);
            }
            Value::Range(range) => {
                5u8.hash(state);
                range.hash(state);
            }
            unhashable => panic!("{} is not hashable", unhashable.type_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::repr::repr(self))
    }
}
