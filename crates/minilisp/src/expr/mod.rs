//! The expression data model
//!
//! `Expr` is the single value type of the language: source code read by the
//! reader and the values produced by evaluation are both `Expr` trees.

mod callable;
mod display;
mod impls;

pub use callable::{Arity, Builtin, BuiltinFnPtr, Closure};
pub use display::print;

use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared, mutable string-keyed table backing `Expr::Hash`.
pub type HashRef = Rc<RefCell<IndexMap<String, Expr>>>;

/// A runtime value (and, equally, a piece of code).
///
/// Values fall into three groups:
/// - Atoms: `Nil`, `Bool`, `Number`, `String`, `Symbol`
/// - Compound data: `Pair` (immutable) and `Hash` (shared and mutable)
/// - Callables: `Builtin`, `Lambda`, `Macro`
///
/// `Nil`, `Bool(true)` and `Bool(false)` carry no payload, so every
/// occurrence of them is the same value.
#[derive(Clone)]
pub enum Expr {
    // ═══════════════════════════════════════════════════════════════════
    // Atoms
    // ═══════════════════════════════════════════════════════════════════
    /// The empty list, and the only falsy value
    Nil,

    /// `true` or `false`
    Bool(bool),

    /// Fixed-width signed integer
    Number(i64),

    /// UTF-8 text
    String(Rc<str>),

    /// A name, resolved through the environment when evaluated
    Symbol(Rc<str>),

    // ═══════════════════════════════════════════════════════════════════
    // Compound Data
    // ═══════════════════════════════════════════════════════════════════
    /// A head/tail cell; proper lists are chains ending in `Nil`
    Pair(Rc<Pair>),

    /// String-keyed table with reference semantics
    Hash(HashRef),

    // ═══════════════════════════════════════════════════════════════════
    // Callables
    // ═══════════════════════════════════════════════════════════════════
    /// Native function
    Builtin(Builtin),

    /// User function; arguments are evaluated before the call
    Lambda(Rc<Closure>),

    /// User macro; receives its arguments unevaluated and returns code
    Macro(Rc<Closure>),
}

/// A cons cell.
pub struct Pair {
    /// First element
    pub head: Expr,

    /// Rest of the list (or the dotted terminal value)
    pub tail: Expr,
}

impl Drop for Pair {
    // Uniquely owned pairs reachable through either field are unlinked onto
    // a worklist, so neither a long list nor deep nesting recurses per level.
    fn drop(&mut self) {
        if !self.head.is_pair() && !self.tail.is_pair() {
            return;
        }

        let mut pending = vec![
            std::mem::replace(&mut self.head, Expr::Nil),
            std::mem::replace(&mut self.tail, Expr::Nil),
        ];
        while let Some(expr) = pending.pop() {
            if let Expr::Pair(rc) = expr {
                if let Ok(mut pair) = Rc::try_unwrap(rc) {
                    pending.push(std::mem::replace(&mut pair.head, Expr::Nil));
                    pending.push(std::mem::replace(&mut pair.tail, Expr::Nil));
                }
            }
        }
    }
}

impl Expr {
    // ═══════════════════════════════════════════════════════════════════
    // Constructors
    // ═══════════════════════════════════════════════════════════════════

    /// Create a symbol.
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Expr::Symbol(Rc::from(name.as_ref()))
    }

    /// Create a string.
    pub fn string(s: impl AsRef<str>) -> Self {
        Expr::String(Rc::from(s.as_ref()))
    }

    /// Create a pair. `tail` need not be a list.
    pub fn cons(head: Expr, tail: Expr) -> Self {
        Expr::Pair(Rc::new(Pair { head, tail }))
    }

    /// Build a proper list from the given items (`Nil` when empty).
    pub fn list(items: impl IntoIterator<Item = Expr>) -> Self {
        Self::list_with_tail(items, Expr::Nil)
    }

    /// Build a list whose last tail is `tail` instead of `Nil`.
    pub fn list_with_tail(items: impl IntoIterator<Item = Expr>, tail: Expr) -> Self {
        let items: Vec<Expr> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(tail, |acc, item| Expr::cons(item, acc))
    }

    /// Create an empty hash.
    pub fn hash() -> Self {
        Expr::Hash(Rc::new(RefCell::new(IndexMap::new())))
    }

    /// Create a hash from key/value entries.
    pub fn hash_from(entries: impl IntoIterator<Item = (String, Expr)>) -> Self {
        Expr::Hash(Rc::new(RefCell::new(entries.into_iter().collect())))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Is this the `Nil` singleton?
    pub fn is_nil(&self) -> bool {
        matches!(self, Expr::Nil)
    }

    /// Truthiness used by `if`: everything except `Nil` is true.
    pub fn is_truthy(&self) -> bool {
        !self.is_nil()
    }

    /// Is this a pair?
    pub fn is_pair(&self) -> bool {
        matches!(self, Expr::Pair(_))
    }

    /// Is this a proper list (a pair chain ending in `Nil`, or `Nil` itself)?
    pub fn is_list(&self) -> bool {
        let mut iter = self.iter();
        for _ in iter.by_ref() {}
        iter.rest().is_nil()
    }

    /// The integer payload, if this is a number.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expr::String(s) => Some(s),
            _ => None,
        }
    }

    /// The name, if this is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// The pair's head, if this is a pair.
    pub fn head(&self) -> Option<&Expr> {
        match self {
            Expr::Pair(p) => Some(&p.head),
            _ => None,
        }
    }

    /// The pair's tail, if this is a pair.
    pub fn tail(&self) -> Option<&Expr> {
        match self {
            Expr::Pair(p) => Some(&p.tail),
            _ => None,
        }
    }

    /// Iterate over the heads of a pair chain.
    ///
    /// Iteration stops at the first tail that is not a pair; use
    /// [`ListIter::rest`] to see what terminated the chain.
    pub fn iter(&self) -> ListIter<'_> {
        ListIter { cur: self }
    }

    /// Number of elements in the pair chain (improper tails not counted).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Is this an empty list?
    pub fn is_empty(&self) -> bool {
        self.is_nil()
    }
}

/// Iterator over list elements. Never follows a non-pair tail.
#[derive(Clone)]
pub struct ListIter<'a> {
    cur: &'a Expr,
}

impl<'a> ListIter<'a> {
    /// What remains of the chain: `Nil` for an exhausted proper list,
    /// the dotted terminal for an improper one.
    pub fn rest(&self) -> &'a Expr {
        self.cur
    }
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        match self.cur {
            Expr::Pair(p) => {
                self.cur = &p.tail;
                Some(&p.head)
            }
            _ => None,
        }
    }
}
