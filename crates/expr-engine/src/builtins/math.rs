//! Numeric builtins.

use super::{number_arg, Arity, BuiltinDefinition};
use crate::error::EvalError;
use crate::value::Value;

fn unary(name: &str, args: &[Value], f: fn(f64) -> f64) -> Result<Value, EvalError> {
    Ok(Value::Number(f(number_arg(name, args, 0)?)))
}

fn abs(args: &[Value]) -> Result<Value, EvalError> {
    unary("abs", args, f64::abs)
}

fn ceil(args: &[Value]) -> Result<Value, EvalError> {
    unary("ceil", args, f64::ceil)
}

fn floor(args: &[Value]) -> Result<Value, EvalError> {
    unary("floor", args, f64::floor)
}

/// Rounds half-way cases toward positive infinity: `round(2.5) == 3`,
/// `round(-2.5) == -2`.
fn round_half_up(n: f64) -> f64 {
    let floor = n.floor();
    if n - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

fn round(args: &[Value]) -> Result<Value, EvalError> {
    unary("round", args, round_half_up)
}

fn sqrt(args: &[Value]) -> Result<Value, EvalError> {
    unary("sqrt", args, f64::sqrt)
}

fn pow(args: &[Value]) -> Result<Value, EvalError> {
    let base = number_arg("pow", args, 0)?;
    let exponent = number_arg("pow", args, 1)?;
    Ok(Value::Number(base.powf(exponent)))
}

fn fold(name: &str, args: &[Value], pick: fn(f64, f64) -> f64) -> Result<Value, EvalError> {
    let mut acc: Option<f64> = None;
    for i in 0..args.len() {
        let n = number_arg(name, args, i)?;
        acc = Some(acc.map_or(n, |a| pick(a, n)));
    }
    Ok(acc.map(Value::Number).unwrap_or(Value::Null))
}

fn max(args: &[Value]) -> Result<Value, EvalError> {
    fold("max", args, f64::max)
}

fn min(args: &[Value]) -> Result<Value, EvalError> {
    fold("min", args, f64::min)
}

pub const BUILTINS: &[BuiltinDefinition] = &[
    BuiltinDefinition {
        name: "abs",
        arity: Arity::Fixed(1),
        eval_fn: abs,
    },
    BuiltinDefinition {
        name: "ceil",
        arity: Arity::Fixed(1),
        eval_fn: ceil,
    },
    BuiltinDefinition {
        name: "floor",
        arity: Arity::Fixed(1),
        eval_fn: floor,
    },
    BuiltinDefinition {
        name: "round",
        arity: Arity::Fixed(1),
        eval_fn: round,
    },
    BuiltinDefinition {
        name: "sqrt",
        arity: Arity::Fixed(1),
        eval_fn: sqrt,
    },
    BuiltinDefinition {
        name: "max",
        arity: Arity::Any,
        eval_fn: max,
    },
    BuiltinDefinition {
        name: "min",
        arity: Arity::Any,
        eval_fn: min,
    },
    BuiltinDefinition {
        name: "pow",
        arity: Arity::Fixed(2),
        eval_fn: pow,
    },
];
