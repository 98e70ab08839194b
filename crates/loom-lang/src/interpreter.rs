//! The tree-walking evaluator (spec.md §5): statement and expression
//! visitors over the AST, using [`Flow`] to model non-local exits
//! (`break`/`continue`/`return`) without Rust-level exceptions.

use std::path::PathBuf;
use std::rc::Rc;

use crate::ast::{BinOpKind, BoolOpKind, CompareOp, Expr, Literal, Module, Stmt, UnaryOpKind};
use crate::builtins;
use crate::error::InterpreterError;
use crate::function;
use crate::methods;
use crate::modules::ModuleLoader;
use crate::numeric;
use crate::repr;
use crate::scope::Scope;
use crate::value::{BoundMethod, RangeValue, UserFunction, Value};

/// Resource limits for a single run (spec.md §10.2). The only knob today is
/// the call-stack depth the evaluator will tolerate before raising a
/// `RecursionError`, mirroring a guard rail every tree-walker needs once
/// recursive functions are expressible.
#[derive(Debug, Clone, Copy)]
pub struct EvalLimits {
    pub max_call_depth: usize,
}

impl Default for EvalLimits {
    fn default() -> Self {
        Self { max_call_depth: 1000 }
    }
}

/// The result of executing a statement or block: either control fell off
/// the end normally, or it's unwinding toward a `break`/`continue`/`return`.
enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

pub struct Interpreter {
    pub globals: Scope,
    limits: EvalLimits,
    call_depth: std::cell::Cell<usize>,
    loader: ModuleLoader,
}

impl Interpreter {
    pub fn new(limits: EvalLimits) -> Self {
        let globals = Scope::new(None);
        builtins::install(&globals);
        Self { globals, limits, call_depth: std::cell::Cell::new(0), loader: ModuleLoader::new(PathBuf::from(".")) }
    }

    pub fn with_base_dir(limits: EvalLimits, base_dir: PathBuf) -> Self {
        let globals = Scope::new(None);
        builtins::install(&globals);
        Self { globals, limits, call_depth: std::cell::Cell::new(0), loader: ModuleLoader::new(base_dir) }
    }

    pub fn run(&self, module: &Module) -> Result<(), InterpreterError> {
        self.exec_block(&module.body, &self.globals, &self.globals)?;
        Ok(())
    }

    /// Executes an imported module's body into its own freshly created
    /// scope, used by [`crate::modules::ModuleLoader`] to populate the
    /// namespace a `Value::Module` exposes.
    pub(crate) fn exec_module(&self, module: &Module, scope: &Scope) -> Result<(), InterpreterError> {
        self.exec_block(&module.body, scope, scope)?;
        Ok(())
    }

    // ---- statements ------------------------------------------------------

    fn exec_block(&self, stmts: &[Stmt], scope: &Scope, globals: &Scope) -> Result<Flow, InterpreterError> {
        for stmt in stmts {
            match self.exec_stmt(stmt, scope, globals)? {
                Flow::Normal => continue,
                other => return Ok(other),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&self, stmt: &Stmt, scope: &Scope, globals: &Scope) -> Result<Flow, InterpreterError> {
        match stmt {
            Stmt::ExprStmt(expr) => {
                self.eval(expr, scope, globals)?;
                Ok(Flow::Normal)
            }
            Stmt::Assign { targets, value } => {
                let value = self.eval(value, scope, globals)?;
                for target in targets {
                    self.assign_target(target, value.clone(), scope, globals)?;
                }
                Ok(Flow::Normal)
            }
            Stmt::AugAssign { target, op, value } => {
                let current = self.eval(target, scope, globals)?;
                let rhs = self.eval(value, scope, globals)?;
                let result = self.apply_binop(*op, &current, &rhs)?;
                self.assign_target(target, result, scope, globals)?;
                Ok(Flow::Normal)
            }
            Stmt::If { condition, body, orelse } => {
                if self.eval(condition, scope, globals)?.is_truthy() {
                    self.exec_block(body, scope, globals)
                } else {
                    self.exec_block(orelse, scope, globals)
                }
            }
            Stmt::While { condition, body, orelse } => self.exec_while(condition, body, orelse, scope, globals),
            Stmt::For { targets, iterables, body, orelse } => {
                self.exec_for(targets, iterables, body, orelse, scope, globals)
            }
            Stmt::FunctionDef(def) => {
                let decorators = def
                    .decorators
                    .iter()
                    .map(|expr| self.eval(expr, scope, globals))
                    .collect::<Result<Vec<_>, _>>()?;
                let call = |f: &Value, args: &[Value]| self.call(f, args);
                let value =
                    function::define_and_decorate(Rc::clone(def), scope.clone(), globals.clone(), &decorators, call)?;
                scope.define(def.name.clone(), value);
                Ok(Flow::Normal)
            }
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval(expr, scope, globals)?,
                    None => Value::None,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Pass => Ok(Flow::Normal),
            Stmt::Break => Ok(Flow::Break),
            Stmt::Continue => Ok(Flow::Continue),
            Stmt::Import(aliases) => {
                for alias in aliases {
                    let module = self.loader.load(&alias.name, self)?;
                    // `import a.b.c` with no `as` binds under `c`, the last
                    // dotted component, not the full dotted path (spec.md §4.3).
                    let bind_name = alias
                        .asname
                        .clone()
                        .unwrap_or_else(|| alias.name.rsplit('.').next().unwrap_or(&alias.name).to_owned());
                    scope.define(bind_name, module);
                }
                Ok(Flow::Normal)
            }
            Stmt::ImportFrom { module, names } => {
                let loaded = self.loader.load(module, self)?;
                let Value::Module(module_value) = &loaded else {
                    unreachable!("ModuleLoader::load always returns Value::Module");
                };
                match names {
                    crate::ast::ImportFromNames::Star => {
                        for (name, value) in module_value.scope.exported() {
                            scope.define(name, value);
                        }
                    }
                    crate::ast::ImportFromNames::Named(aliases) => {
                        for alias in aliases {
                            let value = module_value.scope.get(&alias.name).ok_or_else(|| {
                                InterpreterError::import(format!(
                                    "cannot import name '{}' from '{}'",
                                    alias.name, module
                                ))
                            })?;
                            let bind_name = alias.asname.clone().unwrap_or_else(|| alias.name.clone());
                            scope.define(bind_name, value);
                        }
                    }
                }
                Ok(Flow::Normal)
            }
        }
    }

    fn exec_while(
        &self,
        condition: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
        scope: &Scope,
        globals: &Scope,
    ) -> Result<Flow, InterpreterError> {
        while self.eval(condition, scope, globals)?.is_truthy() {
            match self.exec_block(body, scope, globals)? {
                Flow::Normal | Flow::Continue => continue,
                Flow::Break => return Ok(Flow::Normal),
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }
        self.exec_block(orelse, scope, globals)
    }

    fn exec_for(
        &self,
        targets: &[Expr],
        iterables: &[Expr],
        body: &[Stmt],
        orelse: &[Stmt],
        scope: &Scope,
        globals: &Scope,
    ) -> Result<Flow, InterpreterError> {
        let sequences = iterables
            .iter()
            .map(|expr| {
                let value = self.eval(expr, scope, globals)?;
                self.iterate(&value)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let steps = sequences.iter().map(Vec::len).min().unwrap_or(0);
        for step in 0..steps {
            let elements: Vec<Value> = sequences.iter().map(|seq| seq[step].clone()).collect();
            self.bind_for_targets(targets, elements, scope, globals)?;
            match self.exec_block(body, scope, globals)? {
                Flow::Normal | Flow::Continue => continue,
                Flow::Break => return Ok(Flow::Normal),
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }
        self.exec_block(orelse, scope, globals)
    }

    fn bind_for_targets(
        &self,
        targets: &[Expr],
        mut elements: Vec<Value>,
        scope: &Scope,
        globals: &Scope,
    ) -> Result<(), InterpreterError> {
        if targets.len() == 1 {
            let bound = if elements.len() == 1 { elements.remove(0) } else { Value::Tuple(Rc::new(elements)) };
            return self.assign_target(&targets[0], bound, scope, globals);
        }
        let unpacked = if elements.len() == 1 { self.iterate(&elements[0])? } else { elements };
        if unpacked.len() != targets.len() {
            return Err(InterpreterError::value(format!(
                "too {} values to unpack (expected {})",
                if unpacked.len() > targets.len() { "many" } else { "few" },
                targets.len()
            )));
        }
        for (target, value) in targets.iter().zip(unpacked) {
            self.assign_target(target, value, scope, globals)?;
        }
        Ok(())
    }

    fn assign_target(&self, target: &Expr, value: Value, scope: &Scope, globals: &Scope) -> Result<(), InterpreterError> {
        match target {
            Expr::Name(name) => {
                scope.assign(name, value);
                Ok(())
            }
            Expr::Subscript(base, key) => {
                let base = self.eval(base, scope, globals)?;
                let key = self.eval(key, scope, globals)?;
                methods::set_item(&base, &key, value)
            }
            Expr::Tuple(items) => {
                let unpacked = self.iterate(&value)?;
                if unpacked.len() != items.len() {
                    return Err(InterpreterError::value(format!(
                        "too {} values to unpack (expected {})",
                        if unpacked.len() > items.len() { "many" } else { "few" },
                        items.len()
                    )));
                }
                for (item, v) in items.iter().zip(unpacked) {
                    self.assign_target(item, v, scope, globals)?;
                }
                Ok(())
            }
            other => Err(InterpreterError::value(format!("cannot assign to {other:?}"))),
        }
    }

    /// Materializes any iterable value into a plain `Vec`. loom has no lazy
    /// generators (a stated non-goal), so eager collection is always safe.
    fn iterate(&self, value: &Value) -> Result<Vec<Value>, InterpreterError> {
        materialize(value)
    }

    // ---- expressions -------------------------------------------------------

    fn eval(&self, expr: &Expr, scope: &Scope, globals: &Scope) -> Result<Value, InterpreterError> {
        match expr {
            Expr::Constant(lit) => Ok(literal_value(lit)),
            Expr::Name(name) => scope
                .get(name)
                .or_else(|| globals.get(name))
                .ok_or_else(|| InterpreterError::name(format!("name '{name}' is not defined"))),
            Expr::List(items) => {
                let values = items.iter().map(|e| self.eval(e, scope, globals)).collect::<Result<_, _>>()?;
                Ok(Value::list(values))
            }
            Expr::Tuple(items) => {
                let values = items.iter().map(|e| self.eval(e, scope, globals)).collect::<Result<_, _>>()?;
                Ok(Value::Tuple(Rc::new(values)))
            }
            Expr::Dict(keys, values) => {
                let mut map = indexmap::IndexMap::with_capacity(keys.len());
                for (k, v) in keys.iter().zip(values) {
                    let key = self.eval(k, scope, globals)?;
                    let value = self.eval(v, scope, globals)?;
                    map.insert(key, value);
                }
                Ok(Value::dict(map))
            }
            Expr::Attribute(base, name) => {
                let base = self.eval(base, scope, globals)?;
                self.eval_attribute(base, name)
            }
            Expr::Subscript(base, key) => {
                let base = self.eval(base, scope, globals)?;
                if let Expr::Slice(start, stop) = key.as_ref() {
                    let start = self.eval(start, scope, globals)?;
                    let stop = self.eval(stop, scope, globals)?;
                    methods::get_slice(&base, &start, &stop)
                } else {
                    let key = self.eval(key, scope, globals)?;
                    methods::get_item(&base, &key)
                }
            }
            Expr::Slice(_, _) => unreachable!("Slice only appears nested in Subscript"),
            Expr::Call(callee, args) => {
                let function = self.eval(callee, scope, globals)?;
                let args = args.iter().map(|e| self.eval(e, scope, globals)).collect::<Result<Vec<_>, _>>()?;
                self.call(&function, &args)
            }
            Expr::BinOp(left, op, right) => {
                let left = self.eval(left, scope, globals)?;
                let right = self.eval(right, scope, globals)?;
                self.apply_binop(*op, &left, &right)
            }
            Expr::BoolOp(left, op, right) => {
                let left_value = self.eval(left, scope, globals)?;
                match op {
                    BoolOpKind::And => {
                        if left_value.is_truthy() {
                            self.eval(right, scope, globals)
                        } else {
                            Ok(left_value)
                        }
                    }
                    BoolOpKind::Or => {
                        if left_value.is_truthy() {
                            Ok(left_value)
                        } else {
                            self.eval(right, scope, globals)
                        }
                    }
                }
            }
            Expr::UnaryOp(op, operand) => {
                let value = self.eval(operand, scope, globals)?;
                self.apply_unary(*op, value)
            }
            Expr::Compare(left, op, right) => {
                let left = self.eval(left, scope, globals)?;
                let right = self.eval(right, scope, globals)?;
                self.apply_compare(*op, &left, &right)
            }
        }
    }

    fn eval_attribute(&self, base: Value, name: &str) -> Result<Value, InterpreterError> {
        if let Value::Module(module) = &base {
            return module
                .scope
                .get(name)
                .ok_or_else(|| InterpreterError::attribute(format!("module '{}' has no attribute '{name}'", module.name)));
        }
        if methods::has_method(&base, name) {
            return Ok(Value::BoundMethod(Rc::new(BoundMethod { receiver: base, name: Rc::from(name) })));
        }
        Err(InterpreterError::attribute(format!("'{}' object has no attribute '{name}'", base.type_name())))
    }

    pub fn call(&self, function: &Value, args: &[Value]) -> Result<Value, InterpreterError> {
        match function {
            Value::Builtin(builtin) => (builtin.func)(args),
            Value::BoundMethod(bound) => methods::call_method(&bound.receiver, &bound.name, args),
            Value::Function(user) => self.call_user_function(user, args),
            other => Err(InterpreterError::type_error(format!("'{}' object is not callable", other.type_name()))),
        }
    }

    fn call_user_function(&self, function: &Rc<UserFunction>, args: &[Value]) -> Result<Value, InterpreterError> {
        if self.call_depth.get() >= self.limits.max_call_depth {
            return Err(InterpreterError::recursion());
        }
        crate::function::check_arity(function, args)?;

        let call_scope = Scope::new(Some(function.defining_scope.clone()));
        for (param, arg) in function.definition.params.iter().zip(args) {
            call_scope.define(param.clone(), arg.clone());
        }

        self.call_depth.set(self.call_depth.get() + 1);
        let result = self.exec_block(&function.definition.body, &call_scope, &function.defining_globals);
        self.call_depth.set(self.call_depth.get() - 1);

        match result? {
            Flow::Return(value) => Ok(value),
            _ => Ok(Value::None),
        }
    }

    fn apply_binop(&self, op: BinOpKind, left: &Value, right: &Value) -> Result<Value, InterpreterError> {
        use BinOpKind::*;
        match op {
            Add => self.apply_add(left, right),
            Sub => numeric::sub(left, right).unwrap_or_else(|| Err(type_error_for("-", left, right))),
            Mul => self.apply_mul(left, right),
            Div => numeric::div(left, right).unwrap_or_else(|| Err(type_error_for("/", left, right))),
            FloorDiv => numeric::floordiv(left, right).unwrap_or_else(|| Err(type_error_for("//", left, right))),
            Mod => numeric::modulo(left, right).unwrap_or_else(|| Err(type_error_for("%", left, right))),
            MatMul => Err(InterpreterError::type_error(format!(
                "unsupported operand type(s) for @: '{}' and '{}'",
                left.type_name(),
                right.type_name()
            ))),
            Pow => numeric::pow(left, right).unwrap_or_else(|| Err(type_error_for("**", left, right))),
        }
    }

    fn apply_add(&self, left: &Value, right: &Value) -> Result<Value, InterpreterError> {
        match (left, right) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::str(format!("{a}{b}"))),
            (Value::Bytes(a), Value::Bytes(b)) => {
                let mut combined = a.as_ref().clone();
                combined.extend_from_slice(b);
                Ok(Value::Bytes(Rc::new(combined)))
            }
            (Value::List(a), Value::List(b)) => {
                let mut combined = a.borrow().clone();
                combined.extend(b.borrow().iter().cloned());
                Ok(Value::list(combined))
            }
            (Value::Tuple(a), Value::Tuple(b)) => {
                let mut combined = a.as_ref().clone();
                combined.extend(b.iter().cloned());
                Ok(Value::Tuple(Rc::new(combined)))
            }
            _ => numeric::add(left, right).unwrap_or_else(|| Err(type_error_for("+", left, right))),
        }
    }

    fn apply_mul(&self, left: &Value, right: &Value) -> Result<Value, InterpreterError> {
        match (left, right) {
            (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
                Ok(Value::str(s.repeat((*n).max(0) as usize)))
            }
            (Value::List(items), Value::Int(n)) | (Value::Int(n), Value::List(items)) => {
                let base = items.borrow();
                let mut repeated = Vec::with_capacity(base.len() * (*n).max(0) as usize);
                for _ in 0..(*n).max(0) {
                    repeated.extend(base.iter().cloned());
                }
                Ok(Value::list(repeated))
            }
            (Value::Bytes(bytes), Value::Int(n)) | (Value::Int(n), Value::Bytes(bytes)) => {
                let mut repeated = Vec::with_capacity(bytes.len() * (*n).max(0) as usize);
                for _ in 0..(*n).max(0) {
                    repeated.extend_from_slice(bytes);
                }
                Ok(Value::Bytes(Rc::new(repeated)))
            }
            _ => numeric::mul(left, right).unwrap_or_else(|| Err(type_error_for("*", left, right))),
        }
    }

    fn apply_unary(&self, op: UnaryOpKind, value: Value) -> Result<Value, InterpreterError> {
        match op {
            UnaryOpKind::Not => Ok(Value::Bool(!value.is_truthy())),
            UnaryOpKind::Plus => {
                if numeric::is_numeric(&value) {
                    Ok(value)
                } else {
                    Err(InterpreterError::type_error(format!("bad operand type for unary +: '{}'", value.type_name())))
                }
            }
            UnaryOpKind::Minus => numeric::negate(&value)
                .ok_or_else(|| InterpreterError::type_error(format!("bad operand type for unary -: '{}'", value.type_name()))),
            UnaryOpKind::Invert => match value {
                Value::Int(n) => Ok(Value::Int(!n)),
                Value::Bool(b) => Ok(Value::Int(!(b as i64))),
                other => Err(InterpreterError::type_error(format!(
                    "bad operand type for unary ~: '{}'",
                    other.type_name()
                ))),
            },
        }
    }

    fn apply_compare(&self, op: CompareOp, left: &Value, right: &Value) -> Result<Value, InterpreterError> {
        match op {
            CompareOp::Eq => Ok(Value::Bool(left == right)),
            CompareOp::NotEq => Ok(Value::Bool(left != right)),
            CompareOp::Is => Ok(Value::Bool(is_same(left, right))),
            CompareOp::IsNot => Ok(Value::Bool(!is_same(left, right))),
            CompareOp::In => Ok(Value::Bool(self.contains(right, left)?)),
            CompareOp::NotIn => Ok(Value::Bool(!self.contains(right, left)?)),
            CompareOp::Lt | CompareOp::Gt | CompareOp::Le | CompareOp::Ge => {
                let ordering = self.ordering(left, right)?;
                let result = match op {
                    CompareOp::Lt => ordering.is_lt(),
                    CompareOp::Gt => ordering.is_gt(),
                    CompareOp::Le => ordering.is_le(),
                    CompareOp::Ge => ordering.is_ge(),
                    _ => unreachable!(),
                };
                Ok(Value::Bool(result))
            }
        }
    }

    fn ordering(&self, left: &Value, right: &Value) -> Result<std::cmp::Ordering, InterpreterError> {
        if let (Value::Str(a), Value::Str(b)) = (left, right) {
            return Ok(a.cmp(b));
        }
        if let (Value::Bytes(a), Value::Bytes(b)) = (left, right) {
            return Ok(a.cmp(b));
        }
        if let (Value::List(a), Value::List(b)) = (left, right) {
            return self.ordering_sequence(&a.borrow(), &b.borrow());
        }
        if let (Value::Tuple(a), Value::Tuple(b)) = (left, right) {
            return self.ordering_sequence(a, b);
        }
        if let Some(ordering) = numeric::compare(left, right) {
            return Ok(ordering);
        }
        Err(InterpreterError::type_error(format!(
            "'<' not supported between instances of '{}' and '{}'",
            left.type_name(),
            right.type_name()
        )))
    }

    /// Lexicographic comparison: first unequal pair decides, else the shorter
    /// sequence sorts first (spec.md §4.3's sequence-comparison rule).
    fn ordering_sequence(&self, left: &[Value], right: &[Value]) -> Result<std::cmp::Ordering, InterpreterError> {
        for (a, b) in left.iter().zip(right.iter()) {
            if a == b {
                continue;
            }
            return self.ordering(a, b);
        }
        Ok(left.len().cmp(&right.len()))
    }

    fn contains(&self, container: &Value, needle: &Value) -> Result<bool, InterpreterError> {
        match container {
            Value::Str(s) => match needle {
                Value::Str(n) => Ok(s.contains(n.as_str())),
                _ => Err(InterpreterError::type_error("'in <string>' requires string as left operand")),
            },
            Value::Bytes(b) => match needle {
                Value::Int(n) => Ok(b.contains(&(*n as u8))),
                _ => Err(InterpreterError::type_error("'in <bytes>' requires int as left operand")),
            },
            _ => Ok(self.iterate(container)?.iter().any(|item| item == needle)),
        }
    }
}

fn is_same(left: &Value, right: &Value) -> bool {
    use Value::*;
    match (left, right) {
        (None, None) => true,
        (Bool(a), Bool(b)) => a == b,
        (Int(a), Int(b)) => a == b,
        (Str(a), Str(b)) => Rc::ptr_eq(a, b) || a == b,
        (List(a), List(b)) => Rc::ptr_eq(a, b),
        (Dict(a), Dict(b)) => Rc::ptr_eq(a, b),
        (Deque(a), Deque(b)) => Rc::ptr_eq(a, b),
        (Tuple(a), Tuple(b)) => Rc::ptr_eq(a, b),
        (Function(a), Function(b)) => Rc::ptr_eq(a, b),
        (Builtin(a), Builtin(b)) => Rc::ptr_eq(a, b),
        (Module(a), Module(b)) => Rc::ptr_eq(a, b),
        _ => left == right,
    }
}

fn type_error_for(op: &str, left: &Value, right: &Value) -> InterpreterError {
    InterpreterError::type_error(format!(
        "unsupported operand type(s) for {op}: '{}' and '{}'",
        left.type_name(),
        right.type_name()
    ))
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Int(n) => Value::Int(*n),
        Literal::BigInt(n) => Value::BigInt(Rc::new(n.clone())),
        Literal::Float(f) => Value::Float(*f),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Str(s) => Value::str(s.clone()),
        Literal::Bytes(b) => Value::Bytes(Rc::new(b.clone())),
        Literal::None => Value::None,
    }
}

pub fn range_values(range: &RangeValue) -> Vec<Value> {
    let mut values = Vec::new();
    let mut current = range.start;
    if range.step > 0 {
        while current < range.stop {
            values.push(Value::Int(current));
            current += range.step;
        }
    } else if range.step < 0 {
        while current > range.stop {
            values.push(Value::Int(current));
            current += range.step;
        }
    }
    values
}

pub fn make_str_repr(value: &Value) -> String {
    repr::display(value)
}

/// Materializes any iterable value into a plain `Vec`. Shared by the
/// evaluator's `for`/unpacking paths and the `list()`/`tuple()` builtins.
pub fn materialize(value: &Value) -> Result<Vec<Value>, InterpreterError> {
    match value {
        Value::List(items) => Ok(items.borrow().clone()),
        Value::Tuple(items) => Ok(items.as_ref().clone()),
        Value::Deque(items) => Ok(items.borrow().iter().cloned().collect()),
        Value::Dict(entries) => Ok(entries.borrow().keys().cloned().collect()),
        Value::Range(range) => Ok(range_values(range)),
        Value::Str(s) => Ok(s.chars().map(|c| Value::str(c.to_string())).collect()),
        Value::Bytes(bytes) => Ok(bytes.iter().map(|&b| Value::Int(b as i64)).collect()),
        other => Err(InterpreterError::type_error(format!("'{}' object is not iterable", other.type_name()))),
    }
}
