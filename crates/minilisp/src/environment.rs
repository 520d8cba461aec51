//! Runtime environment managing symbol bindings

mod prelude;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::EnvironmentError;
use crate::expr::{Builtin, Expr};

/// Shared handle to an environment frame.
///
/// Frames are reference counted: a frame stays alive as long as any child
/// frame or closure still refers to it.
pub type Env = Rc<Environment>;

/// One lexical scope: a table of bindings plus a link to the enclosing scope.
///
/// `define` only ever touches this frame, so an inner binding can shadow an
/// outer one but never overwrite it. Lookup walks parent links outward.
///
/// # Example
///
/// ```
/// use minilisp::{Environment, Expr};
///
/// let global = Environment::new();
/// global.define("x", Expr::from(1));
///
/// // Enter a new scope
/// let local = Environment::child(&global);
/// local.define("y", Expr::from(2));
/// local.define("x", Expr::from(10)); // Shadows outer x
///
/// assert_eq!(local.get("x"), Some(Expr::from(10)));
/// assert_eq!(local.get("y"), Some(Expr::from(2)));
///
/// assert_eq!(global.get("x"), Some(Expr::from(1))); // Outer x untouched
/// assert_eq!(global.get("y"), None);
/// ```
pub struct Environment {
    /// Bindings of this frame only
    bindings: RefCell<HashMap<String, Expr>>,

    /// Enclosing scope (`None` for the root)
    parent: Option<Env>,
}

impl Environment {
    /// Create a new root environment.
    pub fn new() -> Env {
        Rc::new(Self {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Create a new scope whose lookups fall back to `parent`.
    pub fn child(parent: &Env) -> Env {
        Rc::new(Self {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// The enclosing scope, if any.
    pub fn parent(&self) -> Option<&Env> {
        self.parent.as_ref()
    }

    /// Number of frames from this one up to the root (the root has depth 1).
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut cur = self.parent.as_ref();
        while let Some(env) = cur {
            depth += 1;
            cur = env.parent.as_ref();
        }
        depth
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Definition
    // ═══════════════════════════════════════════════════════════════════

    /// Bind `name` in this frame, replacing any existing binding here.
    pub fn define(&self, name: impl Into<String>, value: Expr) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Register a built-in function under its own name.
    pub fn define_builtin(&self, builtin: Builtin) {
        let name = builtin.name.clone();
        self.define(name, Expr::Builtin(builtin));
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Resolve `name`, innermost scope first.
    pub fn lookup(&self, name: &str) -> Result<Expr, EnvironmentError> {
        self.get(name).ok_or_else(|| EnvironmentError::NotFound {
            name: name.to_string(),
        })
    }

    /// Resolve `name`, returning `None` when unbound.
    pub fn get(&self, name: &str) -> Option<Expr> {
        let mut env = self;
        loop {
            if let Some(value) = env.bindings.borrow().get(name) {
                return Some(value.clone());
            }
            env = env.parent.as_deref()?;
        }
    }

    /// Check if a binding exists in this scope or any ancestor.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Check if a binding exists in this frame only.
    pub fn contains_in_current_scope(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Iteration and Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Get all binding names in this frame, sorted.
    pub fn names_in_current_scope(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Get all visible binding names, sorted and deduplicated (for completion).
    pub fn all_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut cur = Some(self);
        while let Some(env) = cur {
            names.extend(env.bindings.borrow().keys().cloned());
            cur = env.parent.as_deref();
        }
        names.sort();
        names.dedup();
        names
    }

    /// Number of bindings in this frame.
    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    /// Check if this frame has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }
}

impl fmt::Debug for Environment {
    // Values are left out: closures point back at environments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.names_in_current_scope())
            .field("depth", &self.depth())
            .finish()
    }
}
