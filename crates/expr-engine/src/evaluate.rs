//! Tree-walking evaluator.

use crate::ast::{BinaryOp, Expr, PathSegment, Reference, UnaryOp};
use crate::builtins;
use crate::context::{Context, Scope};
use crate::error::{EvalError, EvalErrorKind};
use crate::options::DEFAULT_MAX_DEPTH;
use crate::value::{Function, Value};
use log::warn;
use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicUsize};
use std::sync::Arc;

/// Execution state threaded through evaluation: the current scope, the
/// recursion limit, and the depth of the innermost call in progress.
#[derive(Clone)]
pub struct EvalCtx {
    scope: Scope,
    max_depth: usize,
    call_depth: Arc<AtomicUsize>,
}

impl EvalCtx {
    pub fn new(context: &Context) -> Self {
        EvalCtx {
            scope: Scope::new(context.clone()),
            max_depth: DEFAULT_MAX_DEPTH,
            call_depth: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn bind(&self, name: &str, value: Value) -> EvalCtx {
        EvalCtx {
            scope: self.scope.bind(name, value),
            max_depth: self.max_depth,
            call_depth: self.call_depth.clone(),
        }
    }
}

/// Evaluates `expr` against `ctx`. Unresolvable references produce
/// `Value::Null`; only type mismatches and unknown functions (plus arity and
/// depth violations) are errors.
pub fn evaluate(expr: &Expr, ctx: &EvalCtx) -> Result<Value, EvalError> {
    eval_node(expr, ctx, 0)
}

fn eval_node(expr: &Expr, ctx: &EvalCtx, depth: usize) -> Result<Value, EvalError> {
    if depth >= ctx.max_depth {
        warn!("evaluation exceeded depth limit {}", ctx.max_depth);
        return Err(EvalError::new(
            EvalErrorKind::DepthExceeded,
            format!("Evaluation nested deeper than {} levels", ctx.max_depth),
        ));
    }
    let depth = depth + 1;

    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::String(s) => Ok(Value::String(s.clone())),
        Expr::Reference(reference) => resolve_reference(reference, ctx, depth),
        Expr::Unary { op, operand } => {
            let value = eval_node(operand, ctx, depth)?;
            match op {
                UnaryOp::Neg => match value {
                    Value::Number(n) => Ok(Value::Number(-n)),
                    other => Err(EvalError::type_mismatch(format!(
                        "Operator '-' expects a number, got {}",
                        other.type_name()
                    ))),
                },
                UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
            }
        }
        Expr::Binary { op, left, right } => {
            // Both sides are always evaluated, `&&` and `||` included.
            let left = eval_node(left, ctx, depth)?;
            let right = eval_node(right, ctx, depth)?;
            apply_binary(*op, &left, &right)
        }
        Expr::Ternary {
            condition,
            then_branch,
            else_branch,
        } => {
            if eval_node(condition, ctx, depth)?.is_truthy() {
                eval_node(then_branch, ctx, depth)
            } else {
                eval_node(else_branch, ctx, depth)
            }
        }
        Expr::Call { name, args } => call(name, args, ctx, depth),
        Expr::Lambda { param, body } => Ok(make_closure(param, body, ctx)),
    }
}

fn resolve_reference(
    reference: &Reference,
    ctx: &EvalCtx,
    depth: usize,
) -> Result<Value, EvalError> {
    let Some(mut current) = ctx.scope.lookup(&reference.root) else {
        return Ok(Value::Null);
    };

    for segment in &reference.segments {
        let next = match segment {
            PathSegment::Property(name) => current.as_map().and_then(|map| map.get(name)),
            PathSegment::Index(index) => {
                let index = eval_node(index, ctx, depth)?;
                match (current, list_index(&index)) {
                    (Value::List(items), Some(i)) => items.get(i),
                    _ => None,
                }
            }
        };
        match next {
            Some(value) => current = value,
            None => return Ok(Value::Null),
        }
    }

    Ok(current.clone())
}

/// A numeric index truncated toward zero; negative or non-numeric is `None`.
fn list_index(index: &Value) -> Option<usize> {
    let n = index.as_number()?.trunc();
    if n.is_finite() && n >= 0.0 {
        Some(n as usize)
    } else {
        None
    }
}

fn apply_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let result = match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            let (Value::Number(a), Value::Number(b)) = (left, right) else {
                return Err(EvalError::type_mismatch(format!(
                    "Operator '{}' expects numbers, got {} and {}",
                    op.symbol(),
                    left.type_name(),
                    right.type_name()
                )));
            };
            Value::Number(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
                _ => a % b,
            })
        }
        BinaryOp::Lt => Value::Bool(left.compare(right) == Ordering::Less),
        BinaryOp::Gt => Value::Bool(left.compare(right) == Ordering::Greater),
        BinaryOp::Le => Value::Bool(left.compare(right) != Ordering::Greater),
        BinaryOp::Ge => Value::Bool(left.compare(right) != Ordering::Less),
        BinaryOp::Eq => Value::Bool(left.loose_equals(right)),
        BinaryOp::Ne => Value::Bool(!left.loose_equals(right)),
        BinaryOp::StrictEq => Value::Bool(left.strict_equals(right)),
        BinaryOp::StrictNe => Value::Bool(!left.strict_equals(right)),
        BinaryOp::And => Value::Bool(left.is_truthy() && right.is_truthy()),
        BinaryOp::Or => Value::Bool(left.is_truthy() || right.is_truthy()),
    };
    Ok(result)
}

enum Callee<'a> {
    Builtin(&'static builtins::BuiltinDefinition),
    Function(&'a Function),
}

fn call(name: &str, args: &[Expr], ctx: &EvalCtx, depth: usize) -> Result<Value, EvalError> {
    let callee = match builtins::lookup(name) {
        Some(def) => Callee::Builtin(def),
        None => match ctx.scope.lookup(name) {
            Some(Value::Function(f)) => Callee::Function(f),
            Some(other) => {
                return Err(EvalError::new(
                    EvalErrorKind::UndefinedFunction,
                    format!("{} is not a function (found {})", name, other.type_name()),
                ));
            }
            None => return Err(EvalError::undefined_function(name)),
        },
    };

    let values = args
        .iter()
        .map(|arg| eval_node(arg, ctx, depth))
        .collect::<Result<Vec<_>, _>>()?;

    // Closures invoked by the callee, directly or through a builtin such as
    // `map`, continue from this depth.
    let outer = ctx.call_depth.swap(depth, atomic::Ordering::Relaxed);
    let result = match callee {
        Callee::Builtin(def) => def.call(&values),
        Callee::Function(f) => f.call(&values),
    };
    ctx.call_depth.store(outer, atomic::Ordering::Relaxed);
    result
}

/// Captures the current scope; invoking the closure binds its first argument
/// (or null) to `param` in a fresh child scope.
///
/// The body is evaluated at the depth of the call that invoked it, so
/// recursion through lambdas (`f => f(f)`) runs into the depth limit.
fn make_closure(param: &str, body: &Expr, ctx: &EvalCtx) -> Value {
    let param = param.to_string();
    let body = Arc::new(body.clone());
    let ctx = ctx.clone();
    Value::Function(Function::new(move |args| {
        let arg = args.first().cloned().unwrap_or_default();
        let depth = ctx.call_depth.load(atomic::Ordering::Relaxed);
        eval_node(&body, &ctx.bind(&param, arg), depth)
    }))
}
