//! `str()`/`repr()` formatting (spec.md §5.6, Open Question (a)): top-level
//! `print`/`str()` arguments use `str`-semantics, but elements nested inside
//! a container always render with `repr`-semantics, matching Python.

use crate::value::{range_len, Value};

/// The informal, human-facing rendering: strings print without quotes,
/// everything else falls back to `repr`.
pub fn display(value: &Value) -> String {
    match value {
        Value::Str(s) => s.as_ref().clone(),
        other => repr(other),
    }
}

/// The unambiguous rendering used for nested container elements and for
/// `repr()` itself: strings are quoted and escaped, bytes get a `b` prefix.
pub fn repr(value: &Value) -> String {
    match value {
        Value::None => "None".to_owned(),
        Value::Bool(true) => "True".to_owned(),
        Value::Bool(false) => "False".to_owned(),
        Value::Int(n) => n.to_string(),
        Value::BigInt(n) => n.to_string(),
        Value::Float(f) => format_float(*f),
        Value::Str(s) => repr_str(s),
        Value::Bytes(b) => repr_bytes(b),
        Value::List(items) => format!("[{}]", join_repr(items.borrow().iter())),
        Value::Tuple(items) => format_tuple(items),
        Value::Dict(entries) => {
            let entries = entries.borrow();
            let body = entries.iter().map(|(k, v)| format!("{}: {}", repr(k), repr(v))).collect::<Vec<_>>().join(", ");
            format!("{{{body}}}")
        }
        Value::Deque(items) => format!("deque([{}])", join_repr(items.borrow().iter())),
        Value::Range(range) => {
            if range.step == 1 {
                format!("range({}, {})", range.start, range.stop)
            } else {
                format!("range({}, {}, {})", range.start, range.stop, range.step)
            }
        }
        Value::Function(f) => format!("<function {} at 0x{:012x}>", f.definition.name, rc_addr(f)),
        Value::Builtin(f) => format!("<built-in function {}>", f.name),
        Value::BoundMethod(m) => format!("<bound method {} of {}>", m.name, repr(&m.receiver)),
        Value::Module(m) => format!("<module '{}'>", m.name),
    }
}

fn rc_addr<T>(rc: &std::rc::Rc<T>) -> usize {
    std::rc::Rc::as_ptr(rc) as usize
}

fn join_repr<'a>(items: impl Iterator<Item = &'a Value>) -> String {
    items.map(repr).collect::<Vec<_>>().join(", ")
}

fn format_tuple(items: &[Value]) -> String {
    if items.len() == 1 {
        format!("({},)", repr(&items[0]))
    } else {
        format!("({})", join_repr(items.iter()))
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_owned();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf".to_owned() } else { "-inf".to_owned() };
    }
    if f == f.trunc() && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

fn repr_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn repr_bytes(bytes: &[u8]) -> String {
    let mut out = String::from("b'");
    for &byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\x{byte:02x}")),
        }
    }
    out.push('\'');
    out
}

pub fn value_len(value: &Value) -> Option<usize> {
    match value {
        Value::Str(s) => Some(s.chars().count()),
        Value::Bytes(b) => Some(b.len()),
        Value::List(items) => Some(items.borrow().len()),
        Value::Tuple(items) => Some(items.len()),
        Value::Dict(entries) => Some(entries.borrow().len()),
        Value::Deque(items) => Some(items.borrow().len()),
        Value::Range(range) => Some(range_len(range).max(0) as usize),
        _ => None,
    }
}
