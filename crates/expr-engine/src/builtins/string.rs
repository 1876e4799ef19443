//! String builtins. Every argument is taken by its string representation,
//! so `upper(5)` is `"5"` and `len(null)` is `4`.

use super::{number_arg, string_arg, Arity, BuiltinDefinition};
use crate::error::EvalError;
use crate::value::Value;

fn len(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::from(string_arg(args, 0).chars().count()))
}

fn upper(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::String(string_arg(args, 0).to_uppercase()))
}

fn lower(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::String(string_arg(args, 0).to_lowercase()))
}

fn trim(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::String(string_arg(args, 0).trim().to_string()))
}

/// `substr(s, start, length?)`, counted in characters. `start` is clamped to
/// the string and the slice never runs past its end.
fn substr(args: &[Value]) -> Result<Value, EvalError> {
    let chars: Vec<char> = string_arg(args, 0).chars().collect();
    let total = chars.len();
    let start = clamp_offset(number_arg("substr", args, 1)?, total);
    let count = match args.get(2) {
        Some(_) => clamp_offset(number_arg("substr", args, 2)?, total),
        None => total - start,
    };
    let end = start.saturating_add(count).min(total);
    Ok(Value::String(chars[start..end].iter().collect()))
}

/// Truncates toward zero and clamps into `0..=limit`; NaN reads as 0.
fn clamp_offset(n: f64, limit: usize) -> usize {
    if n.is_nan() || n <= 0.0 {
        0
    } else {
        (n.trunc() as usize).min(limit)
    }
}

pub const BUILTINS: &[BuiltinDefinition] = &[
    BuiltinDefinition {
        name: "len",
        arity: Arity::Fixed(1),
        eval_fn: len,
    },
    BuiltinDefinition {
        name: "upper",
        arity: Arity::Fixed(1),
        eval_fn: upper,
    },
    BuiltinDefinition {
        name: "lower",
        arity: Arity::Fixed(1),
        eval_fn: lower,
    },
    BuiltinDefinition {
        name: "trim",
        arity: Arity::Fixed(1),
        eval_fn: trim,
    },
    BuiltinDefinition {
        name: "substr",
        arity: Arity::Range(2, 3),
        eval_fn: substr,
    },
];
