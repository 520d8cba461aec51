//! Special forms: `quote`, `if`, `define`, `begin`, `lambda`, `macro`, `load`

use std::rc::Rc;

use crate::environment::Env;
use crate::error::{type_name, EvalError};
use crate::expr::{Closure, Expr};
use crate::EvalContext;

use super::{eval_all, list_items, load, Evaluate};

/// The forms evaluated by their own rules instead of by application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    /// `(quote x)`: return `x` unevaluated
    Quote,
    /// `(if test then [else])`
    If,
    /// `(define name value)`
    Define,
    /// `(begin expr...)`
    Begin,
    /// `(lambda params body...)`
    Lambda,
    /// `(macro params body...)`
    Macro,
    /// `(load path)`
    Load,
}

impl SpecialForm {
    /// Every special form, in documentation order.
    pub const ALL: [SpecialForm; 7] = [
        SpecialForm::Quote,
        SpecialForm::If,
        SpecialForm::Define,
        SpecialForm::Begin,
        SpecialForm::Lambda,
        SpecialForm::Macro,
        SpecialForm::Load,
    ];

    /// Recognise a special form by its head symbol.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "quote" => SpecialForm::Quote,
            "if" => SpecialForm::If,
            "define" => SpecialForm::Define,
            "begin" => SpecialForm::Begin,
            "lambda" => SpecialForm::Lambda,
            "macro" => SpecialForm::Macro,
            "load" => SpecialForm::Load,
            _ => return None,
        })
    }

    /// The keyword naming this form.
    pub fn name(self) -> &'static str {
        match self {
            SpecialForm::Quote => "quote",
            SpecialForm::If => "if",
            SpecialForm::Define => "define",
            SpecialForm::Begin => "begin",
            SpecialForm::Lambda => "lambda",
            SpecialForm::Macro => "macro",
            SpecialForm::Load => "load",
        }
    }
}

/// Evaluate a special form given its (unevaluated) operand list.
pub fn eval_special(
    form: SpecialForm,
    operands: &Expr,
    env: &Env,
    ctx: &EvalContext,
) -> Result<Expr, EvalError> {
    let args = list_items(operands)?;
    match form {
        SpecialForm::Quote => eval_quote(&args),
        SpecialForm::If => eval_if(&args, env, ctx),
        SpecialForm::Define => eval_define(&args, env, ctx),
        SpecialForm::Begin => eval_all(&args, env, ctx),
        SpecialForm::Lambda => make_closure(form, &args, env).map(Expr::Lambda),
        SpecialForm::Macro => make_closure(form, &args, env).map(Expr::Macro),
        SpecialForm::Load => load::eval_load(&args, env, ctx),
    }
}

fn expect_operands(
    form: SpecialForm,
    args: &[Expr],
    expected: &str,
    ok: bool,
) -> Result<(), EvalError> {
    if ok {
        Ok(())
    } else {
        Err(EvalError::bad_form(
            form.name(),
            format!("expected {} operand(s), got {}", expected, args.len()),
        ))
    }
}

fn eval_quote(args: &[Expr]) -> Result<Expr, EvalError> {
    expect_operands(SpecialForm::Quote, args, "1", args.len() == 1)?;
    Ok(args[0].clone())
}

fn eval_if(args: &[Expr], env: &Env, ctx: &EvalContext) -> Result<Expr, EvalError> {
    expect_operands(SpecialForm::If, args, "2 or 3", matches!(args.len(), 2 | 3))?;

    if args[0].eval(env, ctx)?.is_truthy() {
        args[1].eval(env, ctx)
    } else {
        match args.get(2) {
            Some(alternative) => alternative.eval(env, ctx),
            None => Ok(Expr::Nil),
        }
    }
}

fn eval_define(args: &[Expr], env: &Env, ctx: &EvalContext) -> Result<Expr, EvalError> {
    expect_operands(SpecialForm::Define, args, "2", args.len() == 2)?;

    let name = args[0].as_symbol().ok_or_else(|| {
        EvalError::bad_form(
            "define",
            format!("expected a symbol to bind, got {}", type_name(&args[0])),
        )
    })?;

    let value = args[1].eval(env, ctx)?;
    tracing::trace!(name, "define");
    env.define(name, value.clone());
    Ok(value)
}

/// Capture `env` together with the parameter list and body.
///
/// Parameters are validated when the closure is called, not here.
fn make_closure(form: SpecialForm, args: &[Expr], env: &Env) -> Result<Rc<Closure>, EvalError> {
    let (params, body) = match args {
        [params, body] => (params.clone(), body.clone()),
        [params, body @ ..] if !body.is_empty() => {
            let begin = Expr::symbol(SpecialForm::Begin.name());
            (params.clone(), Expr::cons(begin, Expr::list(body.iter().cloned())))
        }
        _ => {
            return Err(EvalError::bad_form(
                form.name(),
                "expected a parameter list and at least one body expression",
            ))
        }
    };
    Ok(Rc::new(Closure::new(params, body, Rc::clone(env))))
}
