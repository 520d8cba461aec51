//! Tests for the reader: text to expression trees

use minilisp::*;
use pretty_assertions::assert_eq;

fn sym(name: &str) -> Expr {
    Expr::symbol(name)
}

fn num(n: i64) -> Expr {
    Expr::Number(n)
}

// ═══════════════════════════════════════════════════════════════════════
// Atoms
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_read_integers() {
    assert_eq!(read("42").unwrap(), num(42));
    assert_eq!(read("-17").unwrap(), num(-17));
    assert_eq!(read("0").unwrap(), num(0));
    assert_eq!(read("9223372036854775807").unwrap(), num(i64::MAX));
    assert_eq!(read("-9223372036854775808").unwrap(), num(i64::MIN));
}

#[test]
fn test_read_symbols() {
    assert_eq!(read("foo").unwrap(), sym("foo"));
    assert_eq!(read("-").unwrap(), sym("-"));
    assert_eq!(read("-x").unwrap(), sym("-x"));
    assert_eq!(read("string->symbol").unwrap(), sym("string->symbol"));
    assert_eq!(read("&rest").unwrap(), sym("&rest"));
    assert_eq!(read("null?").unwrap(), sym("null?"));
}

#[test]
fn test_read_literal_singletons() {
    assert_eq!(read("nil").unwrap(), Expr::Nil);
    assert_eq!(read("true").unwrap(), Expr::Bool(true));
    assert_eq!(read("false").unwrap(), Expr::Bool(false));
}

#[test]
fn test_read_string_is_verbatim() {
    assert_eq!(read("\"hello world\"").unwrap(), Expr::string("hello world"));
    assert_eq!(read("\"\"").unwrap(), Expr::string(""));
    // no escape processing: the backslash is kept
    assert_eq!(read(r#""a\nb""#).unwrap(), Expr::string("a\\nb"));
    assert_eq!(
        read("\"(not a list) ; nor a comment\"").unwrap(),
        Expr::string("(not a list) ; nor a comment")
    );
}

#[test]
fn test_read_invalid_number() {
    let err = read("12abc").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::InvalidNumber("12abc".to_string()));

    let err = read("99999999999999999999").unwrap_err();
    assert!(matches!(err.kind, SyntaxErrorKind::InvalidNumber(_)));
}

// ═══════════════════════════════════════════════════════════════════════
// Lists and Quote
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_read_empty_list_is_nil() {
    assert_eq!(read("()").unwrap(), Expr::Nil);
    assert_eq!(read("(  )").unwrap(), Expr::Nil);
}

#[test]
fn test_read_nested_list() {
    let expected = Expr::list(vec![
        sym("+"),
        num(1),
        Expr::list(vec![sym("*"), num(2), num(3)]),
    ]);
    assert_eq!(read("(+ 1 (* 2 3))").unwrap(), expected);
}

#[test]
fn test_read_list_containing_nil() {
    let list = read("(())").unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.head(), Some(&Expr::Nil));
}

#[test]
fn test_quote_expands_to_quote_form() {
    assert_eq!(
        read("'x").unwrap(),
        Expr::list(vec![sym("quote"), sym("x")])
    );
    assert_eq!(
        read("'(1 2)").unwrap(),
        Expr::list(vec![sym("quote"), Expr::list(vec![num(1), num(2)])])
    );
    assert_eq!(print(&read("''a").unwrap()), "(quote (quote a))");
}

#[test]
fn test_tokens_split_on_parens_and_quotes() {
    assert_eq!(print(&read("(a(b)c)").unwrap()), "(a (b) c)");
    assert_eq!(print(&read("(f\"s\"g)").unwrap()), "(f \"s\" g)");
}

// ═══════════════════════════════════════════════════════════════════════
// Whitespace, Comments, read_all
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_comments_are_skipped() {
    let src = "; leading comment\n(+ 1 ; inline\n 2) ; trailing";
    assert_eq!(print(&read(src).unwrap()), "(+ 1 2)");
}

#[test]
fn test_read_takes_first_expression() {
    assert_eq!(read("1 2 3").unwrap(), num(1));
}

#[test]
fn test_read_all_in_order() {
    let forms = read_all("(define x 1)\n(define y 2)\nx").unwrap();
    let printed: Vec<String> = forms.iter().map(print).collect();
    assert_eq!(printed, vec!["(define x 1)", "(define y 2)", "x"]);
}

#[test]
fn test_read_all_tolerates_trailing_whitespace_and_comments() {
    assert_eq!(read_all("1   \n\t ; done\n").unwrap(), vec![num(1)]);
    assert_eq!(read_all("").unwrap(), Vec::<Expr>::new());
    assert_eq!(read_all("  ; only a comment").unwrap(), Vec::<Expr>::new());
}

#[test]
fn test_reader_iterator() {
    let exprs: Vec<Expr> = Reader::new("a b").map(|r| r.unwrap()).collect();
    assert_eq!(exprs, vec![sym("a"), sym("b")]);
}

// ═══════════════════════════════════════════════════════════════════════
// Syntax Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_unmatched_close_paren() {
    let err = read(")").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedCloseParen);
    assert!(!err.is_incomplete());

    let err = read_all("(+ 1 2))").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedCloseParen);
    assert_eq!(err.location, SourceLocation::new(1, 8));
}

#[test]
fn test_unclosed_list() {
    let err = read("(+ 1\n  (* 2 3)").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedEof);
    // reported at the opening paren
    assert_eq!(err.location, SourceLocation::new(1, 1));
    assert!(err.is_incomplete());
}

#[test]
fn test_unterminated_string() {
    let err = read("(print \"oops)").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnterminatedString);
    assert_eq!(err.location, SourceLocation::new(1, 8));
    assert!(err.is_incomplete());
}

#[test]
fn test_empty_input() {
    assert_eq!(read("").unwrap_err().kind, SyntaxErrorKind::UnexpectedEof);
    assert_eq!(read("   ; nothing").unwrap_err().kind, SyntaxErrorKind::UnexpectedEof);
}

#[test]
fn test_quote_at_end_of_input() {
    assert_eq!(read("'").unwrap_err().kind, SyntaxErrorKind::UnexpectedEof);
}
