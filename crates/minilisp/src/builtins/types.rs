//! Type predicates

use super::{define, truth};
use crate::environment::Environment;
use crate::error::type_name;
use crate::expr::{Arity, Expr};

pub(super) fn register(env: &Environment) {
    define(env, "number?", Arity::Exactly(1), |args| {
        Ok(truth(matches!(args[0], Expr::Number(_))))
    });
    define(env, "string?", Arity::Exactly(1), |args| {
        Ok(truth(matches!(args[0], Expr::String(_))))
    });
    define(env, "symbol?", Arity::Exactly(1), |args| {
        Ok(truth(matches!(args[0], Expr::Symbol(_))))
    });
    define(env, "bool?", Arity::Exactly(1), |args| {
        Ok(truth(matches!(args[0], Expr::Bool(_))))
    });
    define(env, "hash?", Arity::Exactly(1), |args| {
        Ok(truth(matches!(args[0], Expr::Hash(_))))
    });
    define(env, "procedure?", Arity::Exactly(1), |args| {
        Ok(truth(matches!(args[0], Expr::Builtin(_) | Expr::Lambda(_))))
    });
    define(env, "macro?", Arity::Exactly(1), |args| {
        Ok(truth(matches!(args[0], Expr::Macro(_))))
    });
    define(env, "type-of", Arity::Exactly(1), |args| {
        Ok(Expr::string(type_name(&args[0])))
    });
}
