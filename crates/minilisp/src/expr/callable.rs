//! Callable value types: closures and builtins

use std::fmt;
use std::rc::Rc;

use super::Expr;
use crate::environment::Env;

/// Type alias for builtin function pointers to reduce complexity
pub type BuiltinFnPtr = Rc<dyn Fn(&[Expr]) -> Result<Expr, String>>;

/// How many arguments a callable accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` arguments
    Exactly(usize),

    /// `n` or more arguments
    AtLeast(usize),

    /// Between `min` and `max` arguments, inclusive
    Range(usize, usize),
}

impl Arity {
    /// Does a call with `n` arguments satisfy this arity?
    pub fn accepts(&self, n: usize) -> bool {
        match *self {
            Arity::Exactly(expected) => n == expected,
            Arity::AtLeast(min) => n >= min,
            Arity::Range(min, max) => (min..=max).contains(&n),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::Range(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

/// A lambda or macro body together with the environment it closes over.
///
/// The environment is captured by reference when the `lambda`/`macro` form
/// is evaluated, so the closure keeps its defining scope alive.
pub struct Closure {
    /// Parameter list as written (a list of symbols, possibly using `&rest`)
    pub params: Expr,

    /// Body expression; multi-expression bodies are wrapped in `begin`
    pub body: Expr,

    /// The defining environment
    pub env: Env,
}

impl Closure {
    /// Create a new closure.
    pub fn new(params: Expr, body: Expr, env: Env) -> Self {
        Self { params, body, env }
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Closure {{ params: {}, body: {} }}", self.params, self.body)
    }
}

/// A built-in native function.
///
/// These are Rust functions exposed to the interpreter.
#[derive(Clone)]
pub struct Builtin {
    /// Function name (for display/debugging)
    pub name: String,

    /// Accepted argument counts, checked before `func` runs
    pub arity: Arity,

    /// The actual function pointer
    pub func: BuiltinFnPtr,
}

impl Builtin {
    /// Wrap a native function.
    pub fn new<F>(name: impl Into<String>, arity: Arity, func: F) -> Self
    where
        F: Fn(&[Expr]) -> Result<Expr, String> + 'static,
    {
        Self {
            name: name.into(),
            arity,
            func: Rc::new(func),
        }
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}
