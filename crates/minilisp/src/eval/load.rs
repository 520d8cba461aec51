//! The `load` special form

use crate::environment::Env;
use crate::error::{type_name, EvalError, LoadError};
use crate::expr::Expr;
use crate::reader::read_all;
use crate::EvalContext;

use super::{eval_all, Evaluate};

/// `(load path)`: evaluate `path`, then read and evaluate that file.
pub fn eval_load(args: &[Expr], env: &Env, ctx: &EvalContext) -> Result<Expr, EvalError> {
    let [path] = args else {
        return Err(EvalError::bad_form(
            "load",
            format!("expected 1 operand(s), got {}", args.len()),
        ));
    };

    let path = path.eval(env, ctx)?;
    let path = path.as_str().ok_or_else(|| LoadError::NotAString {
        found: type_name(&path),
    })?;
    load_file(path, env, ctx)
}

/// Read `path` through the context's source loader and evaluate every form
/// in `env`, returning the last value (`Nil` for an empty file).
///
/// The whole file is read before anything is evaluated, so a syntax error
/// leaves `env` untouched.
pub fn load_file(path: &str, env: &Env, ctx: &EvalContext) -> Result<Expr, EvalError> {
    let text = ctx
        .loader()
        .read_source(path)
        .map_err(|source| LoadError::Read {
            path: path.to_string(),
            source,
        })?;

    let forms = read_all(&text).map_err(|source| LoadError::Parse {
        path: path.to_string(),
        source,
    })?;

    tracing::debug!(path, forms = forms.len(), "loading");
    eval_all(&forms, env, ctx)
}
