//! Native functions bound in every standard environment
//!
//! Builtins receive evaluated arguments. Their argument count is checked
//! against the declared [`Arity`] before they run; any other failure is
//! reported as a message string, which the evaluator wraps in
//! [`EvalError::Builtin`](crate::EvalError::Builtin) with the builtin's
//! name.

mod arithmetic;
mod hashes;
mod http;
mod io;
mod json;
mod lists;
mod strings;
mod types;

use crate::environment::Environment;
use crate::error::type_name;
use crate::expr::{Arity, Builtin, Expr};

pub use strings::display_text;

/// Bind every builtin in `env`.
pub fn register(env: &Environment) {
    arithmetic::register(env);
    lists::register(env);
    strings::register(env);
    hashes::register(env);
    json::register(env);
    http::register(env);
    types::register(env);
    io::register(env);
}

// ═══════════════════════════════════════════════════════════════════════
// Argument Helpers
// ═══════════════════════════════════════════════════════════════════════

fn define(env: &Environment, name: &str, arity: Arity, func: fn(&[Expr]) -> Result<Expr, String>) {
    env.define_builtin(Builtin::new(name, arity, func));
}

fn expected(what: &str, got: &Expr) -> String {
    format!("expected {}, got {}", what, type_name(got))
}

fn number(arg: &Expr) -> Result<i64, String> {
    arg.as_number().ok_or_else(|| expected("number", arg))
}

fn string(arg: &Expr) -> Result<&str, String> {
    arg.as_str().ok_or_else(|| expected("string", arg))
}

/// Predicates answer `true` or `nil`, since `nil` is the only false value.
fn truth(value: bool) -> Expr {
    if value {
        Expr::Bool(true)
    } else {
        Expr::Nil
    }
}

/// The elements of a proper list argument.
fn list_arg(arg: &Expr) -> Result<Vec<Expr>, String> {
    let mut iter = arg.iter();
    let items: Vec<Expr> = iter.by_ref().cloned().collect();
    if iter.rest().is_nil() {
        Ok(items)
    } else {
        Err(format!("expected a proper list, got {}", arg))
    }
}
