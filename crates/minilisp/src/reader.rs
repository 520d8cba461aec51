//! Reader: source text to expression trees
//!
//! A recursive-descent reader over a character stream. The grammar:
//!
//! ```text
//! expr    := list | quoted | string | number | symbol
//! list    := '(' expr* ')'
//! quoted  := '\'' expr                    ; becomes (quote expr)
//! string  := '"' <any char but '"'>* '"'  ; no escape sequences
//! number  := '-'? digit <token chars>*    ; must fit in an i64
//! symbol  := <token chars>+               ; nil/true/false are literals
//! ```
//!
//! Whitespace and `;` line comments separate tokens.

use crate::error::{SourceLocation, SyntaxError, SyntaxErrorKind};
use crate::expr::Expr;
use crate::stack::ensure_sufficient_stack;

/// Read the first expression in `src`. Anything after it is ignored.
pub fn read(src: &str) -> Result<Expr, SyntaxError> {
    Reader::new(src).read_expr()
}

/// Read every top-level expression in `src`, in order.
///
/// Empty input, or input holding only whitespace and comments, yields an
/// empty vector.
pub fn read_all(src: &str) -> Result<Vec<Expr>, SyntaxError> {
    Reader::new(src).collect()
}

/// Character-stream reader with line/column tracking.
///
/// Iterating a `Reader` yields top-level expressions until the input is
/// exhausted or the first syntax error, which is yielded once.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    src: &'a str,
    /// Byte offset of the next character
    pos: usize,
    line: usize,
    column: usize,
    failed: bool,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the start of `src`.
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
            failed: false,
        }
    }

    /// Current position in the input.
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// Skip whitespace and comments; true if nothing but those remained.
    pub fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.src.len()
    }

    /// Read one expression.
    pub fn read_expr(&mut self) -> Result<Expr, SyntaxError> {
        ensure_sufficient_stack(|| self.read_expr_inner())
    }

    fn read_expr_inner(&mut self) -> Result<Expr, SyntaxError> {
        self.skip_whitespace();
        let start = self.location();

        match self.peek() {
            None => Err(SyntaxError::new(SyntaxErrorKind::UnexpectedEof, start)),
            Some('(') => {
                self.bump();
                self.read_list(start)
            }
            Some(')') => Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedCloseParen,
                start,
            )),
            Some('\'') => {
                self.bump();
                let quoted = self.read_expr()?;
                Ok(Expr::list(vec![Expr::symbol("quote"), quoted]))
            }
            Some('"') => self.read_string(start),
            Some(_) => self.read_atom(start),
        }
    }

    /// Elements up to the matching `)`; the `(` is already consumed.
    fn read_list(&mut self, open: SourceLocation) -> Result<Expr, SyntaxError> {
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => {
                    return Err(SyntaxError::new(SyntaxErrorKind::UnexpectedEof, open));
                }
                Some(')') => {
                    self.bump();
                    return Ok(Expr::list(items));
                }
                Some(_) => items.push(self.read_expr()?),
            }
        }
    }

    fn read_string(&mut self, open: SourceLocation) -> Result<Expr, SyntaxError> {
        self.bump(); // opening quote
        let start = self.pos;
        loop {
            match self.peek() {
                None => {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::UnterminatedString,
                        open,
                    ));
                }
                Some('"') => {
                    let text = &self.src[start..self.pos];
                    self.bump();
                    return Ok(Expr::string(text));
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn read_atom(&mut self, start: SourceLocation) -> Result<Expr, SyntaxError> {
        let begin = self.pos;
        while let Some(ch) = self.peek() {
            if is_delimiter(ch) {
                break;
            }
            self.bump();
        }
        let token = &self.src[begin..self.pos];

        if looks_numeric(token) {
            return token.parse::<i64>().map(Expr::Number).map_err(|_| {
                SyntaxError::new(SyntaxErrorKind::InvalidNumber(token.to_string()), start)
            });
        }

        Ok(match token {
            "nil" => Expr::Nil,
            "true" => Expr::Bool(true),
            "false" => Expr::Bool(false),
            _ => Expr::symbol(token),
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Character Stream
    // ═══════════════════════════════════════════════════════════════════

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.bump();
            } else if ch == ';' {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else {
                break;
            }
        }
    }
}

impl Iterator for Reader<'_> {
    type Item = Result<Expr, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.at_end() {
            return None;
        }
        let result = self.read_expr();
        self.failed = result.is_err();
        Some(result)
    }
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | '"' | ';')
}

/// A digit, or `-` followed by a digit.
fn looks_numeric(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}
