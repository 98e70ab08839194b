//! Lexically-nested, reference-counted scopes (spec.md §5.5). Sharing a
//! `Scope` by `Rc` is what gives closures their extended lifetime: a
//! function captures its defining scope and keeps it alive past the block
//! that created it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

#[derive(Clone)]
pub struct Scope(Rc<RefCell<ScopeData>>);

struct ScopeData {
    vars: HashMap<String, Value>,
    parent: Option<Scope>,
}

impl Scope {
    pub fn new(parent: Option<Scope>) -> Self {
        Scope(Rc::new(RefCell::new(ScopeData { vars: HashMap::new(), parent })))
    }

    /// Looks up `name` in this scope, then its ancestors.
    pub fn get(&self, name: &str) -> Option<Value> {
        let data = self.0.borrow();
        if let Some(value) = data.vars.get(name) {
            return Some(value.clone());
        }
        data.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Binds `name` in this scope, shadowing any ancestor binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().vars.insert(name.into(), value);
    }

    /// Assignment always writes to this scope (spec.md §3): with no
    /// `global`/`nonlocal` declaration in this language (an explicit
    /// non-goal), a plain `x = ...` inside a function can never reach past
    /// its own call scope to mutate a same-named binding in an enclosing
    /// closure or the module globals — it shadows it locally, exactly like
    /// `define`. The two methods stay distinct in name because they answer
    /// different questions at the call sites that use them (`define` for a
    /// fresh binding such as a parameter or a `def`, `assign` for a target
    /// of `=`), even though today they do the same thing.
    pub fn assign(&self, name: &str, value: Value) {
        self.define(name, value);
    }

    pub fn ptr_eq(a: &Scope, b: &Scope) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Every name bound directly in this scope (not ancestors), for
    /// `from module import *`.
    pub fn exported(&self) -> Vec<(String, Value)> {
        self.0.borrow().vars.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}
