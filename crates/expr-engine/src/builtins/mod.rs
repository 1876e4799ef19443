//! The fixed builtin function table.
//!
//! Builtins are plain `fn` pointers in `static` slices: there is nothing to
//! initialize, lock, or tear down, and they cannot be shadowed by context
//! values.

pub mod list;
pub mod math;
pub mod string;

use crate::error::{EvalError, EvalErrorKind};
use crate::value::{Function, Value};

pub type BuiltinFn = fn(&[Value]) -> Result<Value, EvalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` arguments.
    Fixed(usize),
    /// Between `min` and `max` arguments, inclusive.
    Range(usize, usize),
    /// Any number of arguments, including none.
    Any,
}

impl Arity {
    pub fn check(self, name: &str, given: usize) -> Result<(), EvalError> {
        let expected = match self {
            Arity::Any => return Ok(()),
            Arity::Fixed(n) if given == n => return Ok(()),
            Arity::Range(min, max) if (min..=max).contains(&given) => return Ok(()),
            Arity::Fixed(1) => "1 argument".to_string(),
            Arity::Fixed(n) => format!("{} arguments", n),
            Arity::Range(min, max) => format!("{} to {} arguments", min, max),
        };
        Err(EvalError::new(
            EvalErrorKind::Arity,
            format!("\"{}\" expects {}, got {}.", name, expected, given),
        ))
    }
}

pub struct BuiltinDefinition {
    pub name: &'static str,
    pub arity: Arity,
    pub eval_fn: BuiltinFn,
}

impl BuiltinDefinition {
    pub fn call(&self, args: &[Value]) -> Result<Value, EvalError> {
        self.arity.check(self.name, args.len())?;
        (self.eval_fn)(args)
    }
}

static TABLES: [&[BuiltinDefinition]; 3] = [math::BUILTINS, string::BUILTINS, list::BUILTINS];

/// Finds a builtin by exact name.
pub fn lookup(name: &str) -> Option<&'static BuiltinDefinition> {
    TABLES
        .iter()
        .flat_map(|table| table.iter())
        .find(|def| def.name == name)
}

// ------------------------------------------------------------ Argument helpers

pub(crate) fn number_arg(name: &str, args: &[Value], index: usize) -> Result<f64, EvalError> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        other => Err(EvalError::type_mismatch(format!(
            "\"{}\" expects a number as argument {}, got {}",
            name,
            index + 1,
            other.map(Value::type_name).unwrap_or("nothing")
        ))),
    }
}

pub(crate) fn function_arg<'a>(
    name: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a Function, EvalError> {
    match args.get(index) {
        Some(Value::Function(f)) => Ok(f),
        other => Err(EvalError::type_mismatch(format!(
            "\"{}\" expects a function as argument {}, got {}",
            name,
            index + 1,
            other.map(Value::type_name).unwrap_or("nothing")
        ))),
    }
}

/// The argument as a list; anything else reads as an empty list.
pub(crate) fn list_arg(args: &[Value], index: usize) -> &[Value] {
    args.get(index).and_then(Value::as_list).unwrap_or(&[])
}

/// String representation of the argument.
pub(crate) fn string_arg(args: &[Value], index: usize) -> String {
    args.get(index).map(Value::to_string).unwrap_or_default()
}
