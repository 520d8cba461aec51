//! Expr trait implementations: From traits, PartialEq

use std::rc::Rc;

use super::*;
use crate::stack::ensure_sufficient_stack;

// ═══════════════════════════════════════════════════════════════════
// From Traits
// ═══════════════════════════════════════════════════════════════════

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::Number(n)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Bool(b)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::string(s)
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::String(Rc::from(s))
    }
}

impl From<Vec<Expr>> for Expr {
    fn from(items: Vec<Expr>) -> Self {
        Expr::list(items)
    }
}

impl From<Builtin> for Expr {
    fn from(b: Builtin) -> Self {
        Expr::Builtin(b)
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq
// ═══════════════════════════════════════════════════════════════════

/// Data compares structurally; hashes and callables compare by identity.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self, other);
        // Walk list spines in a loop; only heads recurse.
        loop {
            match (a, b) {
                (Expr::Pair(x), Expr::Pair(y)) => {
                    if Rc::ptr_eq(x, y) {
                        return true;
                    }
                    if !ensure_sufficient_stack(|| x.head == y.head) {
                        return false;
                    }
                    a = &x.tail;
                    b = &y.tail;
                }
                _ => return atom_eq(a, b),
            }
        }
    }
}

fn atom_eq(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (Expr::Nil, Expr::Nil) => true,
        (Expr::Bool(x), Expr::Bool(y)) => x == y,
        (Expr::Number(x), Expr::Number(y)) => x == y,
        (Expr::String(x), Expr::String(y)) => x == y,
        (Expr::Symbol(x), Expr::Symbol(y)) => x == y,
        (Expr::Hash(x), Expr::Hash(y)) => Rc::ptr_eq(x, y),
        (Expr::Builtin(x), Expr::Builtin(y)) => Rc::ptr_eq(&x.func, &y.func),
        (Expr::Lambda(x), Expr::Lambda(y)) => Rc::ptr_eq(x, y),
        (Expr::Macro(x), Expr::Macro(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_compare_structurally() {
        let a = Expr::list(vec![Expr::from(1), Expr::list(vec![Expr::symbol("x")])]);
        let b = Expr::list(vec![Expr::from(1), Expr::list(vec![Expr::symbol("x")])]);
        assert_eq!(a, b);
        assert_ne!(a, Expr::list(vec![Expr::from(1)]));
    }

    #[test]
    fn test_string_and_symbol_differ() {
        assert_ne!(Expr::string("x"), Expr::symbol("x"));
    }

    #[test]
    fn test_hashes_compare_by_identity() {
        let h1 = Expr::hash();
        let h2 = Expr::hash();
        assert_eq!(h1, h1.clone());
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_bool_false_is_not_nil() {
        assert_ne!(Expr::Bool(false), Expr::Nil);
    }
}
