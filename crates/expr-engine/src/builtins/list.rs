//! List builtins, including the higher-order ones taking a predicate or
//! mapper function. A first argument that is not a list reads as empty.

use super::{function_arg, list_arg, Arity, BuiltinDefinition};
use crate::error::EvalError;
use crate::value::{Function, Value};
use std::slice;

fn count(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::from(list_arg(args, 0).len()))
}

fn numeric_sum(items: &[Value]) -> f64 {
    items.iter().filter_map(Value::as_number).sum()
}

fn sum(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(numeric_sum(list_arg(args, 0))))
}

fn avg(args: &[Value]) -> Result<Value, EvalError> {
    let items = list_arg(args, 0);
    if items.is_empty() {
        return Ok(Value::Number(0.0));
    }
    Ok(Value::Number(numeric_sum(items) / items.len() as f64))
}

fn accepts(predicate: &Function, item: &Value) -> Result<bool, EvalError> {
    Ok(predicate.call(slice::from_ref(item))?.is_truthy())
}

fn count_if(args: &[Value]) -> Result<Value, EvalError> {
    let predicate = function_arg("countIf", args, 1)?;
    let mut matched = 0usize;
    for item in list_arg(args, 0) {
        if accepts(predicate, item)? {
            matched += 1;
        }
    }
    Ok(Value::from(matched))
}

fn filter(args: &[Value]) -> Result<Value, EvalError> {
    let predicate = function_arg("filter", args, 1)?;
    let mut kept = Vec::new();
    for item in list_arg(args, 0) {
        if accepts(predicate, item)? {
            kept.push(item.clone());
        }
    }
    Ok(Value::List(kept))
}

fn some(args: &[Value]) -> Result<Value, EvalError> {
    let predicate = function_arg("some", args, 1)?;
    for item in list_arg(args, 0) {
        if accepts(predicate, item)? {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

fn every(args: &[Value]) -> Result<Value, EvalError> {
    let predicate = function_arg("every", args, 1)?;
    for item in list_arg(args, 0) {
        if !accepts(predicate, item)? {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn map(args: &[Value]) -> Result<Value, EvalError> {
    let mapper = function_arg("map", args, 1)?;
    list_arg(args, 0)
        .iter()
        .map(|item| mapper.call(slice::from_ref(item)))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

pub const BUILTINS: &[BuiltinDefinition] = &[
    BuiltinDefinition {
        name: "count",
        arity: Arity::Fixed(1),
        eval_fn: count,
    },
    BuiltinDefinition {
        name: "sum",
        arity: Arity::Fixed(1),
        eval_fn: sum,
    },
    BuiltinDefinition {
        name: "avg",
        arity: Arity::Fixed(1),
        eval_fn: avg,
    },
    BuiltinDefinition {
        name: "countIf",
        arity: Arity::Fixed(2),
        eval_fn: count_if,
    },
    BuiltinDefinition {
        name: "filter",
        arity: Arity::Fixed(2),
        eval_fn: filter,
    },
    BuiltinDefinition {
        name: "some",
        arity: Arity::Fixed(2),
        eval_fn: some,
    },
    BuiltinDefinition {
        name: "every",
        arity: Arity::Fixed(2),
        eval_fn: every,
    },
    BuiltinDefinition {
        name: "map",
        arity: Arity::Fixed(2),
        eval_fn: map,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalErrorKind;
    use serde_json::json;

    fn list(v: serde_json::Value) -> Value {
        Value::from(v)
    }

    fn gt(limit: f64) -> Value {
        Value::Function(Function::new(move |args| {
            Ok(Value::Bool(
                args.first().and_then(Value::as_number).unwrap_or(0.0) > limit,
            ))
        }))
    }

    #[test]
    fn aggregates() {
        let arr = list(json!([1, 2, 3, 4, 5]));
        assert_eq!(count(&[arr.clone()]).unwrap(), Value::Number(5.0));
        assert_eq!(sum(&[arr.clone()]).unwrap(), Value::Number(15.0));
        assert_eq!(avg(&[arr]).unwrap(), Value::Number(3.0));
    }

    #[test]
    fn aggregates_tolerate_bad_input() {
        assert_eq!(count(&[Value::from("abc")]).unwrap(), Value::Number(0.0));
        assert_eq!(
            sum(&[list(json!([1, "x", null, 2]))]).unwrap(),
            Value::Number(3.0)
        );
        assert_eq!(avg(&[list(json!([]))]).unwrap(), Value::Number(0.0));
        assert_eq!(avg(&[list(json!([2, "x"]))]).unwrap(), Value::Number(1.0));
        assert_eq!(sum(&[Value::Null]).unwrap(), Value::Number(0.0));
    }

    #[test]
    fn predicates() {
        let arr = list(json!([1, 2, 3, 4, 5]));
        assert_eq!(
            count_if(&[arr.clone(), gt(3.0)]).unwrap(),
            Value::Number(2.0)
        );
        assert_eq!(
            filter(&[arr.clone(), gt(3.0)]).unwrap(),
            list(json!([4, 5]))
        );
        assert_eq!(some(&[arr.clone(), gt(4.0)]).unwrap(), Value::Bool(true));
        assert_eq!(some(&[arr.clone(), gt(10.0)]).unwrap(), Value::Bool(false));
        assert_eq!(every(&[arr.clone(), gt(0.0)]).unwrap(), Value::Bool(true));
        assert_eq!(every(&[arr, gt(3.0)]).unwrap(), Value::Bool(false));
    }

    #[test]
    fn non_list_reads_as_empty() {
        assert_eq!(
            count_if(&[Value::Null, gt(0.0)]).unwrap(),
            Value::Number(0.0)
        );
        assert_eq!(
            filter(&[Value::Null, gt(0.0)]).unwrap(),
            Value::List(vec![])
        );
        assert_eq!(some(&[Value::Null, gt(0.0)]).unwrap(), Value::Bool(false));
        assert_eq!(every(&[Value::Null, gt(0.0)]).unwrap(), Value::Bool(true));
        assert_eq!(map(&[Value::Null, gt(0.0)]).unwrap(), Value::List(vec![]));
    }

    #[test]
    fn mapper_results_are_collected() {
        let double = Value::Function(Function::new(|args| {
            Ok(Value::Number(args[0].as_number().unwrap_or(0.0) * 2.0))
        }));
        assert_eq!(
            map(&[list(json!([1, 2, 3])), double]).unwrap(),
            list(json!([2, 4, 6]))
        );
    }

    #[test]
    fn predicate_must_be_a_function() {
        let err = filter(&[list(json!([1])), Value::from(1)]).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::TypeMismatch);
        assert!(err.message.contains("\"filter\" expects a function"));
    }

    #[test]
    fn predicate_errors_propagate() {
        let failing = Value::Function(Function::new(|_| Err(EvalError::type_mismatch("boom"))));
        assert_eq!(
            some(&[list(json!([1])), failing]).unwrap_err().message,
            "boom"
        );
    }
}
