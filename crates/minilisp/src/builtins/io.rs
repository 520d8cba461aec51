//! Output, diagnostics and assertions

use std::io::Write;

use super::{define, display_text};
use crate::environment::Environment;
use crate::expr::{Arity, Expr};

pub(super) fn register(env: &Environment) {
    define(env, "print", Arity::AtLeast(0), |args| write_stdout(args, false));
    define(env, "println", Arity::AtLeast(0), |args| write_stdout(args, true));
    define(env, "dbg", Arity::Exactly(1), |args| {
        eprintln!("[dbg] {}", args[0]);
        Ok(args[0].clone())
    });
    define(env, "error", Arity::AtLeast(0), |args| Err(join(args)));
    define(env, "assert", Arity::Range(1, 2), assert_truthy);
    define(env, "assert-eq", Arity::Exactly(2), assert_equal);
}

/// Arguments separated by spaces, strings unquoted.
fn join(args: &[Expr]) -> String {
    args.iter().map(display_text).collect::<Vec<_>>().join(" ")
}

fn write_stdout(args: &[Expr], newline: bool) -> Result<Expr, String> {
    let mut out = std::io::stdout().lock();
    let text = join(args);
    let written = if newline {
        writeln!(out, "{}", text)
    } else {
        write!(out, "{}", text).and_then(|()| out.flush())
    };
    written.map_err(|err| err.to_string())?;
    Ok(Expr::Nil)
}

/// `(assert test [message])`
fn assert_truthy(args: &[Expr]) -> Result<Expr, String> {
    if args[0].is_truthy() {
        return Ok(Expr::Nil);
    }
    Err(match args.get(1) {
        Some(message) => format!("assertion failed: {}", display_text(message)),
        None => "assertion failed".to_string(),
    })
}

fn assert_equal(args: &[Expr]) -> Result<Expr, String> {
    if args[0] == args[1] {
        Ok(Expr::Nil)
    } else {
        Err(format!("assertion failed: `{}` != `{}`", args[0], args[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_unquotes_strings() {
        let args = [Expr::string("x ="), Expr::from(3), Expr::string("ok")];
        assert_eq!(join(&args), "x = 3 ok");
    }

    #[test]
    fn test_assertions() {
        assert_eq!(assert_truthy(&[Expr::Bool(false)]).unwrap(), Expr::Nil);
        assert_eq!(assert_truthy(&[Expr::Nil]).unwrap_err(), "assertion failed");
        assert_eq!(
            assert_truthy(&[Expr::Nil, Expr::string("boom")]).unwrap_err(),
            "assertion failed: boom"
        );
        assert!(assert_equal(&[Expr::from(1), Expr::from(1)]).is_ok());
        assert_eq!(
            assert_equal(&[Expr::from(1), Expr::string("1")]).unwrap_err(),
            "assertion failed: `1` != `\"1\"`"
        );
    }
}
