//! Subscripting (`[]`/`[:]`) and the fixed set of container/string instance
//! methods (spec.md §5.8): `list.append`, `dict.items`, `str.upper`, and so
//! on. Each method is resolved to a [`Value::BoundMethod`] by
//! `eval_attribute` and dispatched here when called.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::InterpreterError;
use crate::interpreter::range_values;
use crate::repr;
use crate::value::Value;

pub fn has_method(receiver: &Value, name: &str) -> bool {
    method_names(receiver).contains(&name)
}

fn method_names(receiver: &Value) -> &'static [&'static str] {
    match receiver {
        Value::List(_) => &["append", "pop", "extend", "insert", "remove", "index", "count", "sort", "reverse", "copy"],
        Value::Dict(_) => &["get", "keys", "values", "items", "pop", "update"],
        Value::Deque(_) => &["append", "appendleft", "pop", "popleft", "extend", "extendleft"],
        Value::Str(_) => &[
            "upper",
            "lower",
            "strip",
            "lstrip",
            "rstrip",
            "split",
            "join",
            "startswith",
            "endswith",
            "replace",
            "isdigit",
            "isalpha",
            "isalnum",
            "isspace",
            "find",
            "encode",
        ],
        Value::Bytes(_) => &["decode"],
        _ => &[],
    }
}

pub fn call_method(receiver: &Value, name: &str, args: &[Value]) -> Result<Value, InterpreterError> {
    match receiver {
        Value::List(list) => list_method(list, name, args),
        Value::Dict(dict) => dict_method(dict, name, args),
        Value::Deque(deque) => deque_method(deque, name, args),
        Value::Str(s) => str_method(s, name, args),
        Value::Bytes(b) => bytes_method(b, name, args),
        other => Err(InterpreterError::attribute(format!("'{}' object has no attribute '{name}'", other.type_name()))),
    }
}

fn arg0<'a>(args: &'a [Value], method: &str) -> Result<&'a Value, InterpreterError> {
    args.first().ok_or_else(|| InterpreterError::arity(format!("{method}() missing required argument")))
}

// ---- list --------------------------------------------------------------

fn list_method(list: &Rc<RefCell<Vec<Value>>>, name: &str, args: &[Value]) -> Result<Value, InterpreterError> {
    match name {
        "append" => {
            list.borrow_mut().push(arg0(args, "append")?.clone());
            Ok(Value::None)
        }
        "pop" => {
            let index = match args.first() {
                Some(Value::Int(n)) => resolve_index(*n, list.borrow().len())?,
                Some(_) => return Err(InterpreterError::type_error("pop() index must be an int")),
                None => list.borrow().len().checked_sub(1).ok_or_else(|| InterpreterError::index("pop from empty list"))?,
            };
            let mut items = list.borrow_mut();
            if index >= items.len() {
                return Err(InterpreterError::index("pop index out of range"));
            }
            Ok(items.remove(index))
        }
        "extend" => {
            let extra = collect_iterable(arg0(args, "extend")?)?;
            list.borrow_mut().extend(extra);
            Ok(Value::None)
        }
        "insert" => {
            let Value::Int(index) = args.first().ok_or_else(|| InterpreterError::arity("insert() missing arguments"))? else {
                return Err(InterpreterError::type_error("insert() index must be an int"));
            };
            let value = args.get(1).ok_or_else(|| InterpreterError::arity("insert() missing value argument"))?.clone();
            let mut items = list.borrow_mut();
            let at = (*index).clamp(0, items.len() as i64) as usize;
            items.insert(at, value);
            Ok(Value::None)
        }
        "remove" => {
            let target = arg0(args, "remove")?;
            let mut items = list.borrow_mut();
            let position = items.iter().position(|item| item == target).ok_or_else(|| InterpreterError::value("list.remove(x): x not in list"))?;
            items.remove(position);
            Ok(Value::None)
        }
        "index" => {
            let target = arg0(args, "index")?;
            let items = list.borrow();
            items
                .iter()
                .position(|item| item == target)
                .map(|i| Value::Int(i as i64))
                .ok_or_else(|| InterpreterError::value(format!("{} is not in list", repr::repr(target))))
        }
        "count" => {
            let target = arg0(args, "count")?;
            Ok(Value::Int(list.borrow().iter().filter(|item| *item == target).count() as i64))
        }
        "sort" => {
            list.borrow_mut().sort_by(value_cmp);
            Ok(Value::None)
        }
        "reverse" => {
            list.borrow_mut().reverse();
            Ok(Value::None)
        }
        "copy" => Ok(Value::list(list.borrow().clone())),
        other => Err(InterpreterError::attribute(format!("'list' object has no attribute '{other}'"))),
    }
}

fn value_cmp(a: &Value, b: &Value) -> Ordering {
    if let (Value::Str(x), Value::Str(y)) = (a, b) {
        return x.cmp(y);
    }
    crate::numeric::compare(a, b).unwrap_or(Ordering::Equal)
}

fn resolve_index(index: i64, len: usize) -> Result<usize, InterpreterError> {
    let normalized = if index < 0 { index + len as i64 } else { index };
    if normalized < 0 || normalized as usize >= len {
        return Err(InterpreterError::index("index out of range"));
    }
    Ok(normalized as usize)
}

fn collect_iterable(value: &Value) -> Result<Vec<Value>, InterpreterError> {
    match value {
        Value::List(items) => Ok(items.borrow().clone()),
        Value::Tuple(items) => Ok(items.as_ref().clone()),
        Value::Deque(items) => Ok(items.borrow().iter().cloned().collect()),
        Value::Str(s) => Ok(s.chars().map(|c| Value::str(c.to_string())).collect()),
        Value::Range(range) => Ok(range_values(range)),
        other => Err(InterpreterError::type_error(format!("'{}' object is not iterable", other.type_name()))),
    }
}

// ---- dict ----------------------------------------------------------------

fn dict_method(dict: &Rc<RefCell<IndexMap<Value, Value>>>, name: &str, args: &[Value]) -> Result<Value, InterpreterError> {
    match name {
        "get" => {
            let key = arg0(args, "get")?;
            Ok(dict.borrow().get(key).cloned().unwrap_or_else(|| args.get(1).cloned().unwrap_or(Value::None)))
        }
        "keys" => Ok(Value::list(dict.borrow().keys().cloned().collect())),
        "values" => Ok(Value::list(dict.borrow().values().cloned().collect())),
        "items" => {
            let pairs = dict.borrow().iter().map(|(k, v)| Value::Tuple(Rc::new(vec![k.clone(), v.clone()]))).collect();
            Ok(Value::list(pairs))
        }
        "pop" => {
            let key = arg0(args, "pop")?;
            match dict.borrow_mut().shift_remove(key) {
                Some(value) => Ok(value),
                None => args.get(1).cloned().ok_or_else(|| InterpreterError::key(repr::repr(key))),
            }
        }
        "update" => {
            let Value::Dict(other) = arg0(args, "update")? else {
                return Err(InterpreterError::type_error("update() argument must be a dict"));
            };
            for (k, v) in other.borrow().iter() {
                dict.borrow_mut().insert(k.clone(), v.clone());
            }
            Ok(Value::None)
        }
        other => Err(InterpreterError::attribute(format!("'dict' object has no attribute '{other}'"))),
    }
}

// ---- deque ---------------------------------------------------------------

fn deque_method(deque: &Rc<RefCell<std::collections::VecDeque<Value>>>, name: &str, args: &[Value]) -> Result<Value, InterpreterError> {
    match name {
        "append" => {
            deque.borrow_mut().push_back(arg0(args, "append")?.clone());
            Ok(Value::None)
        }
        "appendleft" => {
            deque.borrow_mut().push_front(arg0(args, "appendleft")?.clone());
            Ok(Value::None)
        }
        "pop" => deque.borrow_mut().pop_back().ok_or_else(|| InterpreterError::index("pop from an empty deque")),
        "popleft" => deque.borrow_mut().pop_front().ok_or_else(|| InterpreterError::index("pop from an empty deque")),
        "extend" => {
            for item in collect_iterable(arg0(args, "extend")?)? {
                deque.borrow_mut().push_back(item);
            }
            Ok(Value::None)
        }
        "extendleft" => {
            for item in collect_iterable(arg0(args, "extendleft")?)? {
                deque.borrow_mut().push_front(item);
            }
            Ok(Value::None)
        }
        other => Err(InterpreterError::attribute(format!("'deque' object has no attribute '{other}'"))),
    }
}

// ---- str -------------------------------------------------------------------

fn str_method(s: &Rc<String>, name: &str, args: &[Value]) -> Result<Value, InterpreterError> {
    match name {
        "upper" => Ok(Value::str(s.to_uppercase())),
        "lower" => Ok(Value::str(s.to_lowercase())),
        "strip" => Ok(Value::str(s.trim().to_owned())),
        "lstrip" => Ok(Value::str(s.trim_start().to_owned())),
        "rstrip" => Ok(Value::str(s.trim_end().to_owned())),
        "split" => {
            let parts: Vec<Value> = match args.first() {
                Some(Value::Str(sep)) => s.split(sep.as_str()).map(Value::str).collect(),
                _ => s.split_whitespace().map(Value::str).collect(),
            };
            Ok(Value::list(parts))
        }
        "join" => {
            let parts = collect_iterable(arg0(args, "join")?)?;
            let strings = parts
                .iter()
                .map(|v| match v {
                    Value::Str(piece) => Ok(piece.as_ref().clone()),
                    other => Err(InterpreterError::type_error(format!(
                        "sequence item: expected str instance, {} found",
                        other.type_name()
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::str(strings.join(s.as_str())))
        }
        "startswith" => {
            let Value::Str(prefix) = arg0(args, "startswith")? else {
                return Err(InterpreterError::type_error("startswith() argument must be str"));
            };
            Ok(Value::Bool(s.starts_with(prefix.as_str())))
        }
        "endswith" => {
            let Value::Str(suffix) = arg0(args, "endswith")? else {
                return Err(InterpreterError::type_error("endswith() argument must be str"));
            };
            Ok(Value::Bool(s.ends_with(suffix.as_str())))
        }
        "replace" => {
            let (Some(Value::Str(from)), Some(Value::Str(to))) = (args.first(), args.get(1)) else {
                return Err(InterpreterError::type_error("replace() arguments must be str"));
            };
            Ok(Value::str(s.replace(from.as_str(), to)))
        }
        "find" => {
            let Value::Str(needle) = arg0(args, "find")? else {
                return Err(InterpreterError::type_error("find() argument must be str"));
            };
            Ok(Value::Int(s.find(needle.as_str()).map_or(-1, |byte| s[..byte].chars().count() as i64)))
        }
        "isdigit" => Ok(Value::Bool(!s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))),
        "isalpha" => Ok(Value::Bool(!s.is_empty() && s.chars().all(char::is_alphabetic))),
        "isalnum" => Ok(Value::Bool(!s.is_empty() && s.chars().all(char::is_alphanumeric))),
        "isspace" => Ok(Value::Bool(!s.is_empty() && s.chars().all(char::is_whitespace))),
        "encode" => Ok(Value::Bytes(Rc::new(s.as_bytes().to_vec()))),
        other => Err(InterpreterError::attribute(format!("'str' object has no attribute '{other}'"))),
    }
}

fn bytes_method(b: &Rc<Vec<u8>>, name: &str, _args: &[Value]) -> Result<Value, InterpreterError> {
    match name {
        "decode" => match String::from_utf8(b.as_ref().clone()) {
            Ok(s) => Ok(Value::str(s)),
            Err(_) => Err(InterpreterError::value("invalid utf-8 in bytes.decode()")),
        },
        other => Err(InterpreterError::attribute(format!("'bytes' object has no attribute '{other}'"))),
    }
}

// ---- subscripting ----------------------------------------------------------

pub fn get_item(base: &Value, key: &Value) -> Result<Value, InterpreterError> {
    match base {
        Value::List(items) => {
            let Value::Int(index) = key else { return Err(InterpreterError::type_error("list indices must be integers")) };
            Ok(items.borrow()[resolve_index(*index, items.borrow().len())?].clone())
        }
        Value::Tuple(items) => {
            let Value::Int(index) = key else { return Err(InterpreterError::type_error("tuple indices must be integers")) };
            Ok(items[resolve_index(*index, items.len())?].clone())
        }
        Value::Str(s) => {
            let Value::Int(index) = key else { return Err(InterpreterError::type_error("string indices must be integers")) };
            let chars: Vec<char> = s.chars().collect();
            Ok(Value::str(chars[resolve_index(*index, chars.len())?].to_string()))
        }
        Value::Bytes(bytes) => {
            let Value::Int(index) = key else { return Err(InterpreterError::type_error("bytes indices must be integers")) };
            Ok(Value::Int(bytes[resolve_index(*index, bytes.len())?] as i64))
        }
        Value::Deque(items) => {
            let Value::Int(index) = key else { return Err(InterpreterError::type_error("deque indices must be integers")) };
            Ok(items.borrow()[resolve_index(*index, items.borrow().len())?].clone())
        }
        Value::Dict(entries) => entries.borrow().get(key).cloned().ok_or_else(|| InterpreterError::key(repr::repr(key))),
        Value::Range(range) => {
            let Value::Int(index) = key else { return Err(InterpreterError::type_error("range indices must be integers")) };
            let values = range_values(range);
            Ok(values[resolve_index(*index, values.len())?].clone())
        }
        other => Err(InterpreterError::type_error(format!("'{}' object is not subscriptable", other.type_name()))),
    }
}

pub fn set_item(base: &Value, key: &Value, value: Value) -> Result<(), InterpreterError> {
    match base {
        Value::List(items) => {
            let Value::Int(index) = key else { return Err(InterpreterError::type_error("list indices must be integers")) };
            let position = resolve_index(*index, items.borrow().len())?;
            items.borrow_mut()[position] = value;
            Ok(())
        }
        Value::Deque(items) => {
            let Value::Int(index) = key else { return Err(InterpreterError::type_error("deque indices must be integers")) };
            let position = resolve_index(*index, items.borrow().len())?;
            items.borrow_mut()[position] = value;
            Ok(())
        }
        Value::Dict(entries) => {
            entries.borrow_mut().insert(key.clone(), value);
            Ok(())
        }
        other => Err(InterpreterError::type_error(format!("'{}' object does not support item assignment", other.type_name()))),
    }
}

pub fn get_slice(base: &Value, start: &Value, stop: &Value) -> Result<Value, InterpreterError> {
    let len = repr::value_len(base).ok_or_else(|| InterpreterError::type_error(format!("'{}' object is not sliceable", base.type_name())))?;
    let start = slice_bound(start, len, 0)?;
    let stop = slice_bound(stop, len, len)?;
    let (start, stop) = (start.min(len), stop.min(len));

    match base {
        Value::List(items) => {
            let items = items.borrow();
            Ok(Value::list(if start < stop { items[start..stop].to_vec() } else { Vec::new() }))
        }
        Value::Tuple(items) => Ok(Value::Tuple(Rc::new(if start < stop { items[start..stop].to_vec() } else { Vec::new() }))),
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            Ok(Value::str(if start < stop { chars[start..stop].iter().collect::<String>() } else { String::new() }))
        }
        Value::Bytes(bytes) => Ok(Value::Bytes(Rc::new(if start < stop { bytes[start..stop].to_vec() } else { Vec::new() }))),
        other => Err(InterpreterError::type_error(format!("'{}' object is not sliceable", other.type_name()))),
    }
}

fn slice_bound(value: &Value, len: usize, default: usize) -> Result<usize, InterpreterError> {
    match value {
        Value::None => Ok(default),
        Value::Int(n) => {
            let normalized = if *n < 0 { *n + len as i64 } else { *n };
            Ok(normalized.clamp(0, len as i64) as usize)
        }
        _ => Err(InterpreterError::type_error("slice indices must be integers")),
    }
}
