use expr_engine::ParseError;
use thiserror::Error;

/// Why an expression cannot be used as a rule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("expression is empty")]
    Empty,

    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),
}
