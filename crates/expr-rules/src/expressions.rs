//! Helpers for form tooling: syntax checks, batch evaluation, and
//! conditional visibility.

use crate::error::RuleError;
use expr_engine::{exec, parse, Context, Value};
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

/// Checks that `source` is a non-blank, syntactically valid expression.
pub fn check_syntax(source: &str) -> Result<(), RuleError> {
    if source.trim().is_empty() {
        return Err(RuleError::Empty);
    }
    parse(source)?;
    Ok(())
}

/// Outcome of evaluating one named expression. Exactly one of `value` and
/// `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionResult {
    pub value: Option<Value>,
    pub error: Option<String>,
}

impl ExpressionResult {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Evaluates each named expression independently against `context`. One
/// failing expression does not affect the others.
pub fn evaluate_all<'a, I>(
    expressions: I,
    context: &Context,
) -> IndexMap<String, ExpressionResult>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    expressions
        .into_iter()
        .map(|(name, source)| {
            let result = match exec(source, context) {
                Ok(value) => ExpressionResult {
                    value: Some(value),
                    error: None,
                },
                Err(e) => {
                    debug!("expression {:?} failed: {}", name, e);
                    ExpressionResult {
                        value: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            (name.to_string(), result)
        })
        .collect()
}

/// Whether a field guarded by the condition `source` should be shown: the
/// truthiness of its value, or `false` if it cannot be evaluated.
pub fn is_visible(source: &str, context: &Context) -> bool {
    match exec(source, context) {
        Ok(value) => value.is_truthy(),
        Err(e) => {
            debug!("visibility condition {:?} failed: {}", source, e);
            false
        }
    }
}
