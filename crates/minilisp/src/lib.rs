//! # minilisp
//!
//! A small Lisp interpreter: an S-expression reader, a lexically scoped
//! tree-walking evaluator with closures and non-hygienic macros, and a
//! printer that is the inverse of the reader.
//!
//! ## Architecture
//!
//! - **Reader**: source text to [`Expr`] trees ([`read`], [`read_all`])
//! - **Environment**: chained scopes of name bindings ([`Environment`])
//! - **Evaluator**: macro expansion, special forms and application
//!   ([`Evaluate`], [`eval_str`])
//! - **Printer**: [`Expr`] back to text ([`print`])
//!
//! Code and data share one representation, so a macro is simply a function
//! from unevaluated [`Expr`] arguments to the [`Expr`] that replaces the
//! call.
//!
//! ## Example
//!
//! ```
//! use minilisp::{eval_str, Environment, EvalContext, Expr};
//!
//! let ctx = EvalContext::new();
//! let env = Environment::with_prelude(&ctx).unwrap();
//!
//! eval_str("(defn square (x) (* x x))", &env, &ctx).unwrap();
//! let value = eval_str("(square 7)", &env, &ctx).unwrap();
//! assert_eq!(value, Expr::from(49));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builtins;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod expr;
pub mod reader;
pub mod stack;

// Re-export main types
pub use context::{DepthGuard, EvalContext, FsLoader, MemoryLoader, SourceLoader};
pub use environment::{Env, Environment};
pub use error::{
    type_name, ArityProblem, EnvironmentError, EvalError, LoadError, Result, SourceLocation,
    SyntaxError, SyntaxErrorKind,
};
pub use eval::{apply, eval_all, eval_expr, eval_str, expand, expand_once, Evaluate, SpecialForm};
pub use expr::{print, Arity, Builtin, BuiltinFnPtr, Closure, Expr, HashRef, ListIter, Pair};
pub use reader::{read, read_all, Reader};

/// minilisp version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
