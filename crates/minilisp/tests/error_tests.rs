//! Tests for error reporting and propagation

use minilisp::*;
use pretty_assertions::assert_eq;

fn setup() -> (Env, EvalContext) {
    let ctx = EvalContext::default();
    let env = Environment::with_prelude(&ctx).expect("prelude failed");
    (env, ctx)
}

fn error_message(src: &str) -> String {
    let (env, ctx) = setup();
    eval_str(src, &env, &ctx).unwrap_err().to_string()
}

// ═══════════════════════════════════════════════════════════════════════
// Messages
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_error_messages() {
    assert_eq!(error_message("nope"), "unbound symbol: nope");
    assert_eq!(error_message("(1 2)"), "not a function: 1 (number)");
    assert_eq!(
        error_message("((lambda (a b) a) 1)"),
        "arity mismatch in `<anonymous>`: expected 2 argument(s), got 1"
    );
    assert_eq!(
        error_message("(defn f (x) x) (f)"),
        "arity mismatch in `f`: expected 1 argument(s), got 0"
    );
    assert_eq!(
        error_message("(head 1 2)"),
        "arity mismatch in `head`: expected 1 argument(s), got 2"
    );
    assert_eq!(error_message("(/ 1 0)"), "/: division by zero");
    assert_eq!(
        error_message("(if)"),
        "malformed `if`: expected 2 or 3 operand(s), got 0"
    );
    assert_eq!(
        error_message("(load 5)"),
        "load expects a string path, got number"
    );
    assert_eq!(error_message("(+ 1"), "syntax error at 1:1: unexpected end of input");
}

#[test]
fn test_rest_arity_message() {
    assert_eq!(
        error_message("(defn f (a b &rest c) a) (f 1)"),
        "arity mismatch in `f`: expected at least 2 argument(s), got 1"
    );
}

#[test]
fn test_load_error_chain() {
    use std::error::Error as _;

    let ctx = EvalContext::with_loader(MemoryLoader::new());
    let env = Environment::with_builtins().unwrap();
    let err = eval_str("(load \"missing.lisp\")", &env, &ctx).unwrap_err();
    assert!(err.to_string().starts_with("cannot read `missing.lisp`"));
    assert!(err.source().is_some());
}

// ═══════════════════════════════════════════════════════════════════════
// Propagation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_syntax_error_evaluates_nothing() {
    let (env, ctx) = setup();
    let err = eval_str("(define a 1) (define b", &env, &ctx).unwrap_err();
    assert!(matches!(err, EvalError::Syntax(_)));
    assert!(!env.contains("a"));
}

#[test]
fn test_failed_top_level_form_leaves_others_intact() {
    let (env, ctx) = setup();
    let forms = read_all("(define a 1) (define b (undefined)) (define c 3)").unwrap();

    let results: Vec<bool> = forms.iter().map(|f| f.eval(&env, &ctx).is_ok()).collect();
    assert_eq!(results, vec![true, false, true]);
    assert_eq!(env.get("a"), Some(Expr::from(1)));
    assert_eq!(env.get("b"), None);
    assert_eq!(env.get("c"), Some(Expr::from(3)));
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn test_error_inside_nested_call_propagates() {
    let (env, ctx) = setup();
    eval_str(
        "(defn inner (x) (error \"inner failed on\" x))
         (defn outer (x) (+ 1 (inner x)))",
        &env,
        &ctx,
    )
    .unwrap();
    let err = eval_str("(outer 5)", &env, &ctx).unwrap_err();
    assert!(matches!(
        err,
        EvalError::Builtin { ref name, ref message }
            if name == "error" && message == "inner failed on 5"
    ));
}

#[test]
fn test_stack_overflow_is_recoverable() {
    let ctx = EvalContext::with_max_eval_depth(300);
    let env = Environment::with_prelude(&ctx).unwrap();
    eval_str("(defn down (n) (+ 1 (down n)))", &env, &ctx).unwrap();

    let err = eval_str("(down 0)", &env, &ctx).unwrap_err();
    assert_eq!(
        err.to_string(),
        "stack overflow: evaluation depth 300 exceeds limit of 300"
    );
    // the same context keeps working
    assert_eq!(eval_str("(+ 1 2)", &env, &ctx).unwrap(), Expr::from(3));
}

#[test]
fn test_type_name() {
    assert_eq!(type_name(&Expr::Nil), "nil");
    assert_eq!(type_name(&Expr::hash()), "hash");
    assert_eq!(type_name(&Expr::list(vec![Expr::Nil])), "pair");
}
