//! String and symbol operations

use super::{define, expected, string};
use crate::environment::Environment;
use crate::expr::{Arity, Expr};

pub(super) fn register(env: &Environment) {
    define(env, "string-append", Arity::AtLeast(0), string_append);
    define(env, "string-length", Arity::Exactly(1), string_length);
    define(env, "to-string", Arity::Exactly(1), |args| {
        Ok(Expr::string(display_text(&args[0])))
    });
    define(env, "symbol->string", Arity::Exactly(1), |args| {
        let name = args[0]
            .as_symbol()
            .ok_or_else(|| expected("symbol", &args[0]))?;
        Ok(Expr::string(name))
    });
    define(env, "string->symbol", Arity::Exactly(1), |args| {
        Ok(Expr::symbol(string(&args[0])?))
    });
}

/// Text for output: strings without quotes, everything else as printed.
pub fn display_text(expr: &Expr) -> String {
    match expr {
        Expr::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

fn string_append(args: &[Expr]) -> Result<Expr, String> {
    let mut out = String::new();
    for arg in args {
        out.push_str(string(arg)?);
    }
    Ok(Expr::string(out))
}

/// Length in characters, not bytes.
fn string_length(args: &[Expr]) -> Result<Expr, String> {
    let len = string(&args[0])?.chars().count();
    i64::try_from(len)
        .map(Expr::Number)
        .map_err(|_| "string too long".to_string())
}
