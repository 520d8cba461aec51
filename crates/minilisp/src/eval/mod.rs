//! Expression evaluation
//!
//! Evaluation of a compound form proceeds in three steps:
//!
//! 1. Macro expansion: while the head symbol names a macro, replace the form
//!    with the macro's expansion.
//! 2. Special forms: `quote`, `if`, `define`, `begin`, `lambda`, `macro`
//!    and `load` are recognised by the head symbol's name.
//! 3. Application: evaluate the head and then each argument, and call.

pub mod apply;
pub mod expand;
pub mod load;
pub mod special;

use crate::environment::Env;
use crate::error::EvalError;
use crate::expr::Expr;
use crate::reader::read_all;
use crate::stack::ensure_sufficient_stack;
use crate::EvalContext;

pub use apply::{apply, bind_params};
pub use expand::{expand, expand_once};
pub use special::SpecialForm;

/// Trait for evaluating expressions to values.
///
/// This is the core abstraction for the tree-walking interpreter.
pub trait Evaluate {
    /// Evaluate this expression in the given environment.
    fn eval(&self, env: &Env, ctx: &EvalContext) -> Result<Expr, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expr {
    fn eval(&self, env: &Env, ctx: &EvalContext) -> Result<Expr, EvalError> {
        let _depth = ctx.enter()?;
        ensure_sufficient_stack(|| eval_inner(self, env, ctx))
    }
}

fn eval_inner(expr: &Expr, env: &Env, ctx: &EvalContext) -> Result<Expr, EvalError> {
    match expr {
        // Self-evaluating
        Expr::Nil | Expr::Bool(_) | Expr::Number(_) | Expr::String(_) => Ok(expr.clone()),
        Expr::Hash(_) | Expr::Builtin(_) | Expr::Lambda(_) | Expr::Macro(_) => Ok(expr.clone()),

        Expr::Symbol(name) => Ok(env.lookup(name)?),

        Expr::Pair(_) => eval_compound(expr, env, ctx),
    }
}

fn eval_compound(form: &Expr, env: &Env, ctx: &EvalContext) -> Result<Expr, EvalError> {
    let form = expand(form, env, ctx)?;

    // A macro may expand to an atom
    let Expr::Pair(pair) = &form else {
        return form.eval(env, ctx);
    };

    if let Some(special) = pair.head.as_symbol().and_then(SpecialForm::from_name) {
        return special::eval_special(special, &pair.tail, env, ctx);
    }

    apply::eval_application(&pair.head, &pair.tail, env, ctx)
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate an expression (convenience wrapper).
pub fn eval_expr(expr: &Expr, env: &Env, ctx: &EvalContext) -> Result<Expr, EvalError> {
    expr.eval(env, ctx)
}

/// Evaluate each expression in order, returning the last result (`Nil`
/// when there are none).
pub fn eval_all<'a>(
    exprs: impl IntoIterator<Item = &'a Expr>,
    env: &Env,
    ctx: &EvalContext,
) -> Result<Expr, EvalError> {
    let mut result = Expr::Nil;
    for expr in exprs {
        result = expr.eval(env, ctx)?;
    }
    Ok(result)
}

/// Read all of `src`, then evaluate the forms in order.
///
/// Nothing is evaluated if the source has a syntax error.
pub fn eval_str(src: &str, env: &Env, ctx: &EvalContext) -> Result<Expr, EvalError> {
    let forms = read_all(src)?;
    eval_all(&forms, env, ctx)
}

/// Collect the elements of a proper list, failing on a dotted tail.
pub(crate) fn list_items(list: &Expr) -> Result<Vec<Expr>, EvalError> {
    let mut iter = list.iter();
    let items: Vec<Expr> = iter.by_ref().cloned().collect();
    if iter.rest().is_nil() {
        Ok(items)
    } else {
        Err(EvalError::ImproperList {
            printed: list.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read;
    use crate::Environment;

    #[test]
    fn test_self_evaluating_atoms() {
        let env = Environment::new();
        let ctx = EvalContext::new();
        for src in ["nil", "true", "false", "42", "\"hi\""] {
            let expr = read(src).unwrap();
            assert_eq!(expr.eval(&env, &ctx).unwrap(), expr);
        }
    }

    #[test]
    fn test_depth_released_after_error() {
        let env = Environment::new();
        let ctx = EvalContext::new();
        assert!(eval_str("(missing 1 2)", &env, &ctx).is_err());
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_list_items_rejects_dotted() {
        let dotted = Expr::cons(Expr::from(1), Expr::from(2));
        assert!(matches!(
            list_items(&dotted),
            Err(EvalError::ImproperList { .. })
        ));
        assert_eq!(list_items(&Expr::Nil).unwrap(), Vec::<Expr>::new());
    }
}
