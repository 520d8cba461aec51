//! Macro expansion
//!
//! Macros are non-hygienic: the expansion is spliced in place of the call
//! and evaluated in the caller's environment, so any symbols it introduces
//! resolve there.

use crate::environment::{Env, Environment};
use crate::error::EvalError;
use crate::expr::Expr;
use crate::EvalContext;

use super::{bind_params, list_items, Evaluate};

/// Expand `form` once if its head symbol is bound to a macro.
///
/// Returns `None` when `form` is not a macro call. Otherwise the unevaluated
/// operands are bound to the macro's parameters in a fresh scope under the
/// macro's defining environment, and the macro body's value is the
/// expansion.
pub fn expand_once(form: &Expr, env: &Env, ctx: &EvalContext) -> Result<Option<Expr>, EvalError> {
    let Expr::Pair(pair) = form else {
        return Ok(None);
    };
    let Some(name) = pair.head.as_symbol() else {
        return Ok(None);
    };
    let Some(Expr::Macro(mac)) = env.get(name) else {
        return Ok(None);
    };

    let args = list_items(&pair.tail)?;
    let frame = Environment::child(&mac.env);
    bind_params(&mac.params, args, &frame, name)?;

    let expansion = mac.body.eval(&frame, ctx)?;
    tracing::trace!(macro_name = name, expansion = %expansion, "expanded");
    Ok(Some(expansion))
}

/// Expand `form` repeatedly until its head is no longer a macro.
///
/// Only the outermost form is expanded; macro calls nested inside the
/// result are expanded when they are themselves evaluated.
pub fn expand(form: &Expr, env: &Env, ctx: &EvalContext) -> Result<Expr, EvalError> {
    let mut current = form.clone();
    while let Some(next) = expand_once(&current, env, ctx)? {
        current = next;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::eval_str;
    use crate::reader::read;

    #[test]
    fn test_non_macro_forms_are_left_alone() {
        let env = Environment::new();
        let ctx = EvalContext::new();
        env.define("f", Expr::from(1));
        for src in ["42", "x", "(f 1 2)", "((g) 1)"] {
            assert_eq!(expand_once(&read(src).unwrap(), &env, &ctx).unwrap(), None);
        }
    }

    #[test]
    fn test_expand_runs_to_fixed_point() {
        let env = Environment::new();
        let ctx = EvalContext::new();
        eval_str(
            "(define inner (macro (x) x))
             (define outer (macro (x) (quote (inner 5))))",
            &env,
            &ctx,
        )
        .unwrap();

        let form = read("(outer 1)").unwrap();
        assert_eq!(
            expand_once(&form, &env, &ctx).unwrap().unwrap().to_string(),
            "(inner 5)"
        );
        assert_eq!(expand(&form, &env, &ctx).unwrap(), Expr::from(5));
    }
}
