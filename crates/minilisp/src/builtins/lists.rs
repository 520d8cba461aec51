//! Pair and list operations

use super::{define, expected, list_arg, truth};
use crate::environment::Environment;
use crate::expr::{Arity, Expr};

pub(super) fn register(env: &Environment) {
    define(env, "pair", Arity::Exactly(2), cons);
    define(env, "cons", Arity::Exactly(2), cons);
    define(env, "head", Arity::Exactly(1), head);
    define(env, "tail", Arity::Exactly(1), tail);
    define(env, "list", Arity::AtLeast(0), |args| Ok(Expr::list(args.iter().cloned())));
    define(env, "length", Arity::Exactly(1), length);
    define(env, "append", Arity::AtLeast(0), append);
    define(env, "reverse", Arity::Exactly(1), reverse);
    define(env, "nth", Arity::Exactly(2), nth);
    define(env, "null?", Arity::Exactly(1), |args| Ok(truth(args[0].is_nil())));
    define(env, "pair?", Arity::Exactly(1), |args| Ok(truth(args[0].is_pair())));
    define(env, "list?", Arity::Exactly(1), |args| Ok(truth(args[0].is_list())));
}

fn cons(args: &[Expr]) -> Result<Expr, String> {
    Ok(Expr::cons(args[0].clone(), args[1].clone()))
}

/// `(head nil)` is `nil`.
fn head(args: &[Expr]) -> Result<Expr, String> {
    match &args[0] {
        Expr::Nil => Ok(Expr::Nil),
        Expr::Pair(pair) => Ok(pair.head.clone()),
        other => Err(expected("pair", other)),
    }
}

/// `(tail nil)` is `nil`.
fn tail(args: &[Expr]) -> Result<Expr, String> {
    match &args[0] {
        Expr::Nil => Ok(Expr::Nil),
        Expr::Pair(pair) => Ok(pair.tail.clone()),
        other => Err(expected("pair", other)),
    }
}

fn length(args: &[Expr]) -> Result<Expr, String> {
    let len = list_arg(&args[0])?.len();
    i64::try_from(len)
        .map(Expr::Number)
        .map_err(|_| "list too long".to_string())
}

/// Concatenate lists. The last argument is shared, not copied, and may be
/// any value (giving an improper list).
fn append(args: &[Expr]) -> Result<Expr, String> {
    let Some((last, init)) = args.split_last() else {
        return Ok(Expr::Nil);
    };
    let mut items = Vec::new();
    for arg in init {
        items.extend(list_arg(arg)?);
    }
    Ok(Expr::list_with_tail(items, last.clone()))
}

fn reverse(args: &[Expr]) -> Result<Expr, String> {
    let mut items = list_arg(&args[0])?;
    items.reverse();
    Ok(Expr::list(items))
}

/// Zero-based index; `nil` past the end.
fn nth(args: &[Expr]) -> Result<Expr, String> {
    let index = args[1]
        .as_number()
        .ok_or_else(|| expected("number", &args[1]))?;
    let index = usize::try_from(index).map_err(|_| format!("negative index {}", index))?;
    Ok(list_arg(&args[0])?.into_iter().nth(index).unwrap_or(Expr::Nil))
}
