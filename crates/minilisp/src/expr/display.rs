//! Printer: Display and Debug implementations for Expr
//!
//! The printed form of atoms and proper lists reads back to an equal value.
//! Callables print as opaque placeholders and are not readable.

use std::fmt;

use super::Expr;
use crate::stack::ensure_sufficient_stack;

/// Render an expression as text.
pub fn print(expr: &Expr) -> String {
    expr.to_string()
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self, &mut Vec::new())
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// `open` holds the hashes currently being printed, so a hash that
/// contains itself prints as `{...}` instead of recursing forever.
fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, open: &mut Vec<*const ()>) -> fmt::Result {
    match expr {
        Expr::Nil => write!(f, "nil"),
        Expr::Bool(true) => write!(f, "true"),
        Expr::Bool(false) => write!(f, "false"),
        Expr::Number(n) => write!(f, "{}", n),
        Expr::String(s) => write!(f, "\"{}\"", s),
        Expr::Symbol(s) => write!(f, "{}", s),
        Expr::Builtin(_) => write!(f, "<builtin>"),
        Expr::Lambda(_) => write!(f, "<lambda>"),
        Expr::Macro(_) => write!(f, "<macro>"),

        Expr::Pair(_) => {
            write!(f, "(")?;
            let mut items = expr.iter();
            for (i, item) in items.by_ref().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                ensure_sufficient_stack(|| write_expr(f, item, open))?;
            }
            let rest = items.rest();
            if !rest.is_nil() {
                write!(f, " . ")?;
                write_expr(f, rest, open)?;
            }
            write!(f, ")")
        }

        Expr::Hash(table) => {
            let id = std::rc::Rc::as_ptr(table) as *const ();
            if open.contains(&id) {
                return write!(f, "{{...}}");
            }
            open.push(id);
            write!(f, "{{")?;
            for (i, (key, value)) in table.borrow().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "\"{}\": ", key)?;
                write_expr(f, value, open)?;
            }
            open.pop();
            write!(f, "}}")
        }
    }
}
