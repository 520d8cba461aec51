//! Evaluation context configuration

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::rc::Rc;

use crate::error::EvalError;

/// Default limit on nested evaluations.
///
/// A non-tail lambda call nests about three evaluations, so this allows
/// roughly 30 000 pending user calls.
pub const DEFAULT_MAX_EVAL_DEPTH: usize = 100_000;

/// Supplies source text to the `load` special form.
///
/// The evaluator never touches the filesystem directly; embedders choose
/// where `(load "path")` reads from.
pub trait SourceLoader {
    /// Read the full text named by `path`.
    fn read_source(&self, path: &str) -> io::Result<String>;
}

/// Reads sources from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn read_source(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Serves sources from an in-memory table of path to text.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<String, String>,
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file, builder style.
    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Add (or replace) a file.
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl SourceLoader for MemoryLoader {
    fn read_source(&self, path: &str) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {}", path))
        })
    }
}

/// Configuration and state for evaluation.
///
/// This is passed through all evaluation calls and controls
/// behavior like recursion limits and where `load` reads from.
#[derive(Clone)]
pub struct EvalContext {
    /// Maximum nesting of `eval` calls (stack overflow protection)
    pub max_eval_depth: usize,

    /// Where `load` gets file contents
    loader: Rc<dyn SourceLoader>,

    /// Current nesting of `eval` calls
    depth: Cell<usize>,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_eval_depth: DEFAULT_MAX_EVAL_DEPTH,
            loader: Rc::new(FsLoader),
            depth: Cell::new(0),
        }
    }
}

impl fmt::Debug for EvalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalContext")
            .field("max_eval_depth", &self.max_eval_depth)
            .field("depth", &self.depth.get())
            .finish_non_exhaustive()
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom depth limit.
    pub fn with_max_eval_depth(max_depth: usize) -> Self {
        Self {
            max_eval_depth: max_depth,
            ..Default::default()
        }
    }

    /// Create a context whose `load` reads through `loader`.
    pub fn with_loader(loader: impl SourceLoader + 'static) -> Self {
        Self {
            loader: Rc::new(loader),
            ..Default::default()
        }
    }

    /// The configured source loader.
    pub fn loader(&self) -> &dyn SourceLoader {
        self.loader.as_ref()
    }

    /// Current evaluation depth.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Enter one level of evaluation. Returns error if max depth exceeded.
    ///
    /// The level is released when the returned guard is dropped, including
    /// when evaluation fails.
    pub fn enter(&self) -> Result<DepthGuard<'_>, EvalError> {
        let depth = self.depth.get();
        if depth >= self.max_eval_depth {
            return Err(EvalError::StackOverflow {
                depth,
                max: self.max_eval_depth,
            });
        }
        self.depth.set(depth + 1);
        Ok(DepthGuard { ctx: self })
    }
}

/// RAII guard that releases one level of evaluation depth when dropped.
pub struct DepthGuard<'a> {
    ctx: &'a EvalContext,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.ctx.depth.set(self.ctx.depth.get().saturating_sub(1));
    }
}
