//! Function application and parameter binding

use crate::environment::{Env, Environment};
use crate::error::{type_name, ArityProblem, EvalError};
use crate::expr::{Arity, Builtin, Closure, Expr};
use crate::EvalContext;

use super::{list_items, Evaluate};

/// Marks the parameter that collects all remaining arguments.
pub const REST_MARKER: &str = "&rest";

/// Label used for callees that were not named by a symbol.
const ANONYMOUS: &str = "<anonymous>";

/// Evaluate `(head operands...)` as a call.
///
/// The head is evaluated first, then the operands left to right; only then
/// is the callee checked to be a function.
pub fn eval_application(
    head: &Expr,
    operands: &Expr,
    env: &Env,
    ctx: &EvalContext,
) -> Result<Expr, EvalError> {
    let callee = head.eval(env, ctx)?;

    let args = list_items(operands)?
        .iter()
        .map(|arg| arg.eval(env, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    call_value(&callee, args, ctx, head.as_symbol().unwrap_or(ANONYMOUS))
}

/// Call a function value with already-evaluated arguments.
///
/// # Errors
///
/// Returns `NotAFunction` if `callee` is not a builtin or lambda, and
/// `ArityMismatch` if the arguments don't fit its parameters.
pub fn apply(callee: &Expr, args: Vec<Expr>, ctx: &EvalContext) -> Result<Expr, EvalError> {
    call_value(callee, args, ctx, ANONYMOUS)
}

fn call_value(
    callee: &Expr,
    args: Vec<Expr>,
    ctx: &EvalContext,
    name: &str,
) -> Result<Expr, EvalError> {
    match callee {
        Expr::Builtin(builtin) => call_builtin(builtin, &args),
        Expr::Lambda(closure) => call_closure(closure, args, ctx, name),
        other => Err(EvalError::NotAFunction {
            found: type_name(other),
            printed: other.to_string(),
        }),
    }
}

fn call_builtin(builtin: &Builtin, args: &[Expr]) -> Result<Expr, EvalError> {
    if !builtin.arity.accepts(args.len()) {
        return Err(EvalError::ArityMismatch {
            callee: builtin.name.clone(),
            problem: ArityProblem::Count {
                expected: builtin.arity,
                got: args.len(),
            },
        });
    }

    (builtin.func)(args).map_err(|message| EvalError::Builtin {
        name: builtin.name.clone(),
        message,
    })
}

fn call_closure(
    closure: &Closure,
    args: Vec<Expr>,
    ctx: &EvalContext,
    name: &str,
) -> Result<Expr, EvalError> {
    let frame = Environment::child(&closure.env);
    bind_params(&closure.params, args, &frame, name)?;
    tracing::trace!(callee = name, depth = ctx.depth(), "calling lambda");
    closure.body.eval(&frame, ctx)
}

// ═══════════════════════════════════════════════════════════════════════
// Parameter Binding
// ═══════════════════════════════════════════════════════════════════════

/// A parsed parameter list.
struct Params<'a> {
    positional: Vec<&'a str>,
    rest: Option<&'a str>,
}

impl Params<'_> {
    fn arity(&self) -> Arity {
        match self.rest {
            Some(_) => Arity::AtLeast(self.positional.len()),
            None => Arity::Exactly(self.positional.len()),
        }
    }
}

/// Bind `args` to `params` in `frame`.
///
/// Shared by lambda calls and macro expansion. `params` must be a proper
/// list of symbols; `&rest name` may appear once, last, and binds the
/// remaining arguments as a list (`Nil` when there are none).
///
/// # Errors
///
/// Returns `ArityMismatch` naming `callee` when the parameter list is
/// malformed or the argument count doesn't fit.
pub fn bind_params(
    params: &Expr,
    args: Vec<Expr>,
    frame: &Environment,
    callee: &str,
) -> Result<(), EvalError> {
    let mismatch = |problem| EvalError::ArityMismatch {
        callee: callee.to_string(),
        problem,
    };

    let params = parse_params(params)
        .map_err(|reason| mismatch(ArityProblem::MalformedParams(reason)))?;

    let expected = params.arity();
    if !expected.accepts(args.len()) {
        return Err(mismatch(ArityProblem::Count {
            expected,
            got: args.len(),
        }));
    }

    let mut args = args.into_iter();
    for (name, value) in params.positional.iter().zip(args.by_ref()) {
        frame.define(*name, value);
    }
    if let Some(rest) = params.rest {
        frame.define(rest, Expr::list(args));
    }
    Ok(())
}

fn parse_params(params: &Expr) -> Result<Params<'_>, &'static str> {
    let mut positional = Vec::new();
    let mut items = params.iter();

    while let Some(item) = items.next() {
        let name = item.as_symbol().ok_or("parameters must be symbols")?;
        if name != REST_MARKER {
            positional.push(name);
            continue;
        }

        let rest = items
            .next()
            .and_then(Expr::as_symbol)
            .filter(|rest| *rest != REST_MARKER)
            .ok_or("`&rest` must be followed by a parameter name")?;
        if items.next().is_some() || !items.rest().is_nil() {
            return Err("`&rest` parameter must come last");
        }
        return Ok(Params {
            positional,
            rest: Some(rest),
        });
    }

    if !items.rest().is_nil() {
        return Err("parameter list must be a proper list");
    }
    Ok(Params {
        positional,
        rest: None,
    })
}
