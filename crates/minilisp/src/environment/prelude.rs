//! Standard prelude: builtins, `defmacro`, and the std macros

use std::rc::Rc;

use super::{Env, Environment};
use crate::builtins;
use crate::error::EvalError;
use crate::eval::eval_str;
use crate::expr::{Arity, Builtin, Closure, Expr};
use crate::reader::read;
use crate::EvalContext;

/// Source of the macros every prelude environment starts with.
pub const PRELUDE_SOURCE: &str = include_str!("../../std/prelude.lisp");

const DEFMACRO_PARAMS: &str = "(name params &rest body)";

// (defmacro name params body...) => (define name (macro params body...))
const DEFMACRO_BODY: &str =
    "(pair 'define (pair name (pair (pair 'macro (pair params body)) nil)))";

impl Environment {
    /// Create a root environment with builtins, `defmacro`, and the std
    /// macros (`defn`, `when`, `unless`, `cond`, `let`, `->`, `->>`).
    pub fn with_prelude(ctx: &EvalContext) -> Result<Env, EvalError> {
        let env = Self::with_builtins()?;
        env.load_prelude(ctx)?;
        Ok(env)
    }

    /// Create a root environment with builtins and `defmacro` only.
    pub fn with_builtins() -> Result<Env, EvalError> {
        let env = Self::new();
        builtins::register(&env);
        env.bootstrap_defmacro()?;
        Ok(env)
    }

    /// Evaluate the std macro definitions in this environment.
    ///
    /// Requires the builtins and `defmacro` to be bound already.
    pub fn load_prelude(self: &Rc<Self>, ctx: &EvalContext) -> Result<(), EvalError> {
        eval_str(PRELUDE_SOURCE, self, ctx)?;
        tracing::debug!(bindings = self.len(), "prelude loaded");
        Ok(())
    }

    /// Bind `defmacro` in this environment.
    ///
    /// `defmacro` is itself a macro. It closes over a private scope holding
    /// its own `pair` builtin, so it keeps working if user code rebinds
    /// `pair`.
    pub fn bootstrap_defmacro(self: &Rc<Self>) -> Result<(), EvalError> {
        let scope = Self::new();
        scope.define_builtin(Builtin::new("pair", Arity::Exactly(2), |args| {
            Ok(Expr::cons(args[0].clone(), args[1].clone()))
        }));

        let defmacro = Closure::new(read(DEFMACRO_PARAMS)?, read(DEFMACRO_BODY)?, scope);
        self.define("defmacro", Expr::Macro(Rc::new(defmacro)));
        Ok(())
    }
}
