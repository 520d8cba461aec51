//! Integer arithmetic and comparison
//!
//! All arithmetic is checked: overflow and division by zero are errors,
//! never wrapped results or panics.

use super::{define, number, truth};
use crate::environment::Environment;
use crate::expr::{Arity, Expr};

pub(super) fn register(env: &Environment) {
    define(env, "+", Arity::AtLeast(0), add);
    define(env, "-", Arity::AtLeast(1), sub);
    define(env, "*", Arity::AtLeast(0), mul);
    define(env, "/", Arity::AtLeast(2), div);
    define(env, "mod", Arity::Exactly(2), modulo);

    define(env, "=", Arity::Exactly(2), |args| Ok(truth(args[0] == args[1])));
    define(env, "<", Arity::Exactly(2), |args| compare(args, |a, b| a < b));
    define(env, ">", Arity::Exactly(2), |args| compare(args, |a, b| a > b));
    define(env, "<=", Arity::Exactly(2), |args| compare(args, |a, b| a <= b));
    define(env, ">=", Arity::Exactly(2), |args| compare(args, |a, b| a >= b));
}

fn overflow() -> String {
    "integer overflow".to_string()
}

fn fold(
    init: i64,
    args: &[Expr],
    op: fn(i64, i64) -> Option<i64>,
) -> Result<Expr, String> {
    args.iter()
        .try_fold(init, |acc, arg| -> Result<i64, String> {
            op(acc, number(arg)?).ok_or_else(overflow)
        })
        .map(Expr::Number)
}

fn add(args: &[Expr]) -> Result<Expr, String> {
    fold(0, args, i64::checked_add)
}

fn mul(args: &[Expr]) -> Result<Expr, String> {
    fold(1, args, i64::checked_mul)
}

/// `(- x)` negates; `(- x y...)` subtracts left to right.
fn sub(args: &[Expr]) -> Result<Expr, String> {
    let first = number(&args[0])?;
    if args.len() == 1 {
        return first.checked_neg().map(Expr::Number).ok_or_else(overflow);
    }
    fold(first, &args[1..], i64::checked_sub)
}

/// Truncating division, left to right.
fn div(args: &[Expr]) -> Result<Expr, String> {
    let mut acc = number(&args[0])?;
    for arg in &args[1..] {
        let divisor = number(arg)?;
        if divisor == 0 {
            return Err("division by zero".to_string());
        }
        acc = acc.checked_div(divisor).ok_or_else(overflow)?;
    }
    Ok(Expr::Number(acc))
}

/// Euclidean remainder: never negative for a nonzero divisor.
fn modulo(args: &[Expr]) -> Result<Expr, String> {
    let (a, b) = (number(&args[0])?, number(&args[1])?);
    if b == 0 {
        return Err("division by zero".to_string());
    }
    a.checked_rem_euclid(b).map(Expr::Number).ok_or_else(overflow)
}

fn compare(args: &[Expr], op: fn(i64, i64) -> bool) -> Result<Expr, String> {
    Ok(truth(op(number(&args[0])?, number(&args[1])?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(values: &[i64]) -> Vec<Expr> {
        values.iter().copied().map(Expr::from).collect()
    }

    #[test]
    fn test_add_and_mul_identities() {
        assert_eq!(add(&[]).unwrap(), Expr::from(0));
        assert_eq!(mul(&[]).unwrap(), Expr::from(1));
        assert_eq!(add(&nums(&[1, 2, 3])).unwrap(), Expr::from(6));
    }

    #[test]
    fn test_sub_negates_single_argument() {
        assert_eq!(sub(&nums(&[5])).unwrap(), Expr::from(-5));
        assert_eq!(sub(&nums(&[10, 3, 2])).unwrap(), Expr::from(5));
    }

    #[test]
    fn test_division() {
        assert_eq!(div(&nums(&[7, 2])).unwrap(), Expr::from(3));
        assert_eq!(div(&nums(&[1, 0])).unwrap_err(), "division by zero");
        assert_eq!(div(&nums(&[i64::MIN, -1])).unwrap_err(), "integer overflow");
        assert_eq!(modulo(&nums(&[-7, 3])).unwrap(), Expr::from(2));
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert_eq!(add(&nums(&[i64::MAX, 1])).unwrap_err(), "integer overflow");
        assert_eq!(sub(&nums(&[i64::MIN])).unwrap_err(), "integer overflow");
    }

    #[test]
    fn test_type_errors() {
        let err = add(&[Expr::from(1), Expr::string("2")]).unwrap_err();
        assert_eq!(err, "expected number, got string");
    }
}
