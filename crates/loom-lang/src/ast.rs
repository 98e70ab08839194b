//! AST node definitions (spec.md §3): two disjoint families, statements and
//! expressions, plus `Module` and the small helper nodes (`Alias`, `Slice`).

use std::rc::Rc;

/// A literal value baked into the AST by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    /// An integer literal too large for `i64` (spec.md §3's arbitrary-range `Int`).
    BigInt(num_bigint::BigInt),
    Float(f64),
    Bool(bool),
    Str(String),
    Bytes(Vec<u8>),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    MatMul,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOpKind {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Plus,
    Minus,
    Invert,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    NotEq,
    In,
    NotIn,
    Is,
    IsNot,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(Literal),
    Name(String),
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    Dict(Vec<Expr>, Vec<Expr>),
    Attribute(Box<Expr>, String),
    Subscript(Box<Expr>, Box<Expr>),
    /// Only ever appears as a `Subscript` key. Missing bounds lower to `Constant(None)`.
    Slice(Box<Expr>, Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
    BinOp(Box<Expr>, BinOpKind, Box<Expr>),
    BoolOp(Box<Expr>, BoolOpKind, Box<Expr>),
    UnaryOp(UnaryOpKind, Box<Expr>),
    Compare(Box<Expr>, CompareOp, Box<Expr>),
}

/// One `name [as alias]` entry in an `import`/`from ... import` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub name: String,
    pub asname: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub decorators: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    ExprStmt(Expr),
    Assign { targets: Vec<Expr>, value: Expr },
    AugAssign { target: Expr, op: BinOpKind, value: Expr },
    If { condition: Expr, body: Vec<Stmt>, orelse: Vec<Stmt> },
    While { condition: Expr, body: Vec<Stmt>, orelse: Vec<Stmt> },
    For { targets: Vec<Expr>, iterables: Vec<Expr>, body: Vec<Stmt>, orelse: Vec<Stmt> },
    /// Wrapped in `Rc` so a `UserFunction` can cheaply share its definition
    /// across every call without cloning the body.
    FunctionDef(Rc<FunctionDef>),
    Return(Option<Expr>),
    Pass,
    Break,
    Continue,
    Import(Vec<Alias>),
    ImportFrom { module: String, names: ImportFromNames },
}

/// `from m import *` vs `from m import a, b as c`.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportFromNames {
    Star,
    Named(Vec<Alias>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub body: Vec<Stmt>,
}
