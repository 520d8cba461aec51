//! JSON conversion
//!
//! | Expr            | JSON             |
//! |-----------------|------------------|
//! | `nil`           | `null`           |
//! | bool            | boolean          |
//! | number          | integer          |
//! | string, symbol  | string           |
//! | proper list     | array            |
//! | hash            | object           |
//!
//! Callables, improper lists and structures nested deeper than
//! [`MAX_DEPTH`] cannot be encoded. Decoding maps `null`
//! back to `nil` (so an empty array also decodes to `nil`) and rejects
//! numbers that are not 64-bit integers.

use serde_json::{Map, Value};

use super::{define, list_arg, string};
use crate::environment::Environment;
use crate::error::type_name;
use crate::expr::{Arity, Expr};

/// Deepest nesting of arrays and objects `json-encode` accepts. Matches the
/// recursion limit `serde_json` applies when decoding.
pub const MAX_DEPTH: usize = 128;

pub(super) fn register(env: &Environment) {
    define(env, "json-encode", Arity::Exactly(1), |args| {
        let value = to_json(&args[0], 0, &mut Vec::new())?;
        serde_json::to_string(&value)
            .map(Expr::string)
            .map_err(|err| err.to_string())
    });
    define(env, "json-decode", Arity::Exactly(1), |args| {
        let value: Value = serde_json::from_str(string(&args[0])?)
            .map_err(|err| format!("invalid JSON: {}", err))?;
        from_json(value)
    });
}

/// `depth` counts the enclosing arrays and objects; `open` holds the hashes
/// currently being encoded, to reject cycles.
fn to_json(expr: &Expr, depth: usize, open: &mut Vec<*const ()>) -> Result<Value, String> {
    if depth >= MAX_DEPTH && matches!(expr, Expr::Pair(_) | Expr::Hash(_)) {
        return Err("nesting too deep to encode as JSON".to_string());
    }

    Ok(match expr {
        Expr::Nil => Value::Null,
        Expr::Bool(b) => Value::Bool(*b),
        Expr::Number(n) => Value::from(*n),
        Expr::String(s) | Expr::Symbol(s) => Value::String(s.to_string()),
        Expr::Pair(_) => Value::Array(
            list_arg(expr)?
                .iter()
                .map(|item| to_json(item, depth + 1, open))
                .collect::<Result<_, _>>()?,
        ),
        Expr::Hash(table) => {
            let id = std::rc::Rc::as_ptr(table) as *const ();
            if open.contains(&id) {
                return Err("cannot encode a hash that contains itself".to_string());
            }
            open.push(id);
            let object = table
                .borrow()
                .iter()
                .map(|(key, value)| -> Result<(String, Value), String> {
                    Ok((key.clone(), to_json(value, depth + 1, open)?))
                })
                .collect::<Result<Map<_, _>, _>>();
            open.pop();
            Value::Object(object?)
        }
        Expr::Builtin(_) | Expr::Lambda(_) | Expr::Macro(_) => {
            return Err(format!("cannot encode {} as JSON", type_name(expr)))
        }
    })
}

fn from_json(value: Value) -> Result<Expr, String> {
    Ok(match value {
        Value::Null => Expr::Nil,
        Value::Bool(b) => Expr::Bool(b),
        Value::Number(n) => Expr::Number(
            n.as_i64()
                .ok_or_else(|| format!("number {} is not a 64-bit integer", n))?,
        ),
        Value::String(s) => Expr::string(s),
        Value::Array(items) => Expr::list(
            items
                .into_iter()
                .map(from_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(entries) => Expr::hash_from(
            entries
                .into_iter()
                .map(|(key, value)| -> Result<(String, Expr), String> {
                    Ok((key, from_json(value)?))
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encode(expr: &Expr) -> Result<String, String> {
        to_json(expr, 0, &mut Vec::new()).map(|v| v.to_string())
    }

    fn nested(depth: usize) -> Expr {
        let mut expr = Expr::from(1);
        for _ in 0..depth {
            expr = Expr::list(vec![expr]);
        }
        expr
    }

    #[test]
    fn test_encode_nested() {
        let expr = Expr::hash_from(vec![(
            "xs".to_string(),
            Expr::list(vec![Expr::from(1), Expr::Nil, Expr::string("a")]),
        )]);
        assert_eq!(encode(&expr).unwrap(), r#"{"xs":[1,null,"a"]}"#);
    }

    #[test]
    fn test_encode_rejects_cycles_and_callables() {
        let h = Expr::hash();
        if let Expr::Hash(table) = &h {
            table.borrow_mut().insert("me".to_string(), h.clone());
        }
        assert!(encode(&h).unwrap_err().contains("contains itself"));
        // break the cycle so the table is freed
        if let Expr::Hash(table) = &h {
            table.borrow_mut().clear();
        }

        let builtin = Expr::Builtin(crate::expr::Builtin::new("f", Arity::Exactly(0), |_| {
            Ok(Expr::Nil)
        }));
        assert_eq!(
            encode(&Expr::list(vec![builtin])).unwrap_err(),
            "cannot encode builtin as JSON"
        );
    }

    #[test]
    fn test_encode_depth_limit() {
        let ok = encode(&nested(MAX_DEPTH)).unwrap();
        assert!(ok.starts_with("[[") && ok.contains("1"));

        for depth in [MAX_DEPTH + 1, 5_000] {
            assert_eq!(
                encode(&nested(depth)).unwrap_err(),
                "nesting too deep to encode as JSON"
            );
        }
    }

    #[test]
    fn test_decode() {
        let value: Value = serde_json::from_str(r#"{"a": [1, 2], "b": true}"#).unwrap();
        let expr = from_json(value).unwrap();
        assert_eq!(expr.to_string(), r#"{"a": (1 2), "b": true}"#);

        let value: Value = serde_json::from_str("1.5").unwrap();
        assert!(from_json(value).is_err());
    }
}
