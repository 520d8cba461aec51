//! Error types for reading and evaluation

use std::fmt;

use thiserror::Error;

use crate::expr::{Arity, Expr};

/// Source code location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed, in characters)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// What went wrong while reading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Input ended inside a list, after a quote, or before any expression
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A `)` with no matching `(`
    #[error("unexpected `)`")]
    UnexpectedCloseParen,

    /// A `"` with no closing `"`
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A numeric-looking token that is not a valid 64-bit integer
    #[error("invalid integer literal `{0}`")]
    InvalidNumber(String),
}

/// Error produced by the reader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("syntax error at {location}: {kind}")]
pub struct SyntaxError {
    /// The kind of failure
    pub kind: SyntaxErrorKind,

    /// Where it was detected
    pub location: SourceLocation,
}

impl SyntaxError {
    /// Create a new syntax error.
    pub fn new(kind: SyntaxErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    /// True when more input could complete the expression (used by the
    /// REPL to decide whether to keep reading lines).
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self.kind,
            SyntaxErrorKind::UnexpectedEof | SyntaxErrorKind::UnterminatedString
        )
    }
}

/// Failure of the `load` special form.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The path argument did not evaluate to a string
    #[error("load expects a string path, got {found}")]
    NotAString {
        /// Type of the value received
        found: &'static str,
    },

    /// The source loader could not read the file
    #[error("cannot read `{path}`: {source}")]
    Read {
        /// Requested path
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The file's text is not valid source
    #[error("cannot parse `{path}`: {source}")]
    Parse {
        /// Requested path
        path: String,
        /// Reader failure
        #[source]
        source: SyntaxError,
    },
}

/// Why a call's arguments could not be bound.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArityProblem {
    /// Wrong number of arguments
    #[error("expected {expected} argument(s), got {got}")]
    Count {
        /// Accepted counts
        expected: Arity,
        /// Actual count
        got: usize,
    },

    /// The parameter list itself is unusable (e.g. `&rest` misuse)
    #[error("malformed parameter list: {0}")]
    MalformedParams(&'static str),
}

/// Error raised during evaluation.
///
/// None of these are caught by the evaluator; each aborts the current
/// top-level evaluation and is returned to the caller.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Reader failure
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Symbol not bound in any enclosing scope
    #[error("unbound symbol: {name}")]
    UnboundSymbol {
        /// The symbol's name
        name: String,
    },

    /// Call head is not a builtin or lambda
    #[error("not a function: {printed} ({found})")]
    NotAFunction {
        /// Type of the value in call position
        found: &'static str,
        /// Printed form of that value
        printed: String,
    },

    /// Argument binding failed
    #[error("arity mismatch in `{callee}`: {problem}")]
    ArityMismatch {
        /// Name of the function or macro being called
        callee: String,
        /// What was wrong
        problem: ArityProblem,
    },

    /// A special form used with the wrong shape
    #[error("malformed `{form}`: {reason}")]
    BadSpecialForm {
        /// Which special form
        form: &'static str,
        /// What was wrong
        reason: String,
    },

    /// A dotted list in a position that must be a proper list
    #[error("improper list where a proper list is required: {printed}")]
    ImproperList {
        /// Printed form of the offending list
        printed: String,
    },

    /// `load` failed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A builtin reported a failure
    #[error("{name}: {message}")]
    Builtin {
        /// Builtin name
        name: String,
        /// Builtin-specific message
        message: String,
    },

    /// Evaluation nested deeper than the configured limit
    #[error("stack overflow: evaluation depth {depth} exceeds limit of {max}")]
    StackOverflow {
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },
}

impl EvalError {
    /// Create a `BadSpecialForm` error.
    pub fn bad_form(form: &'static str, reason: impl Into<String>) -> Self {
        EvalError::BadSpecialForm {
            form,
            reason: reason.into(),
        }
    }
}

/// Errors from environment operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    /// No binding for the name in this scope or any ancestor
    #[error("not found: {name}")]
    NotFound {
        /// The name looked up
        name: String,
    },
}

impl From<EnvironmentError> for EvalError {
    fn from(err: EnvironmentError) -> Self {
        match err {
            EnvironmentError::NotFound { name } => EvalError::UnboundSymbol { name },
        }
    }
}

/// Result type alias for evaluation
pub type Result<T> = std::result::Result<T, EvalError>;

/// Get a human-readable name for a value's type.
pub fn type_name(expr: &Expr) -> &'static str {
    match expr {
        Expr::Nil => "nil",
        Expr::Bool(_) => "bool",
        Expr::Number(_) => "number",
        Expr::String(_) => "string",
        Expr::Symbol(_) => "symbol",
        Expr::Pair(_) => "pair",
        Expr::Hash(_) => "hash",
        Expr::Builtin(_) => "builtin",
        Expr::Lambda(_) => "lambda",
        Expr::Macro(_) => "macro",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err =
            SyntaxError::new(SyntaxErrorKind::UnexpectedCloseParen, SourceLocation::new(2, 5));
        assert_eq!(err.to_string(), "syntax error at 2:5: unexpected `)`");
    }

    #[test]
    fn test_incomplete_kinds() {
        let loc = SourceLocation::new(1, 1);
        assert!(SyntaxError::new(SyntaxErrorKind::UnexpectedEof, loc).is_incomplete());
        assert!(SyntaxError::new(SyntaxErrorKind::UnterminatedString, loc).is_incomplete());
        assert!(!SyntaxError::new(SyntaxErrorKind::UnexpectedCloseParen, loc).is_incomplete());
    }

    #[test]
    fn test_not_found_becomes_unbound_symbol() {
        let err: EvalError = EnvironmentError::NotFound { name: "x".into() }.into();
        assert!(matches!(err, EvalError::UnboundSymbol { ref name } if name == "x"));
    }

    #[test]
    fn test_arity_mismatch_display() {
        let err = EvalError::ArityMismatch {
            callee: "add".into(),
            problem: ArityProblem::Count {
                expected: Arity::Exactly(2),
                got: 3,
            },
        };
        assert_eq!(
            err.to_string(),
            "arity mismatch in `add`: expected 2 argument(s), got 3"
        );
    }
}
