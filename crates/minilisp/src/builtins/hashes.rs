//! Hash tables
//!
//! Hashes are shared by reference: `hash-set` and `hash-remove` mutate the
//! table in place, and every binding holding it sees the change.

use super::{define, expected, string, truth};
use crate::environment::Environment;
use crate::expr::{Arity, Expr, HashRef};

pub(super) fn register(env: &Environment) {
    define(env, "hash", Arity::AtLeast(0), make_hash);
    define(env, "hash-get", Arity::Exactly(2), |args| {
        let key = string(&args[1])?;
        Ok(hash(&args[0])?.borrow().get(key).cloned().unwrap_or(Expr::Nil))
    });
    define(env, "hash-set", Arity::Exactly(3), |args| {
        let key = string(&args[1])?;
        hash(&args[0])?
            .borrow_mut()
            .insert(key.to_string(), args[2].clone());
        Ok(args[0].clone())
    });
    define(env, "hash-has?", Arity::Exactly(2), |args| {
        let key = string(&args[1])?;
        Ok(truth(hash(&args[0])?.borrow().contains_key(key)))
    });
    define(env, "hash-remove", Arity::Exactly(2), |args| {
        let key = string(&args[1])?;
        Ok(hash(&args[0])?.borrow_mut().shift_remove(key).unwrap_or(Expr::Nil))
    });
    define(env, "hash-keys", Arity::Exactly(1), |args| {
        let keys: Vec<Expr> = hash(&args[0])?.borrow().keys().map(Expr::string).collect();
        Ok(Expr::list(keys))
    });
}

fn hash(arg: &Expr) -> Result<&HashRef, String> {
    match arg {
        Expr::Hash(table) => Ok(table),
        other => Err(expected("hash", other)),
    }
}

/// `(hash "k1" v1 "k2" v2 ...)`
fn make_hash(args: &[Expr]) -> Result<Expr, String> {
    if args.len() % 2 != 0 {
        return Err(format!(
            "expected key/value pairs, got {} argument(s)",
            args.len()
        ));
    }
    let entries = args
        .chunks_exact(2)
        .map(|kv| -> Result<(String, Expr), String> {
            Ok((string(&kv[0])?.to_string(), kv[1].clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Expr::hash_from(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_hash() {
        let h = make_hash(&[Expr::string("a"), Expr::from(1)]).unwrap();
        assert_eq!(h.to_string(), "{\"a\": 1}");
        assert!(make_hash(&[Expr::string("a")]).is_err());
        assert_eq!(
            make_hash(&[Expr::from(1), Expr::from(2)]).unwrap_err(),
            "expected string, got number"
        );
    }
}
