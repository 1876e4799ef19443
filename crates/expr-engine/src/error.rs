use thiserror::Error;

/// A character that starts none of the recognized token classes.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} (pos={position})")]
pub struct LexError {
    pub message: String,
    /// Zero-based character offset into the source.
    pub position: usize,
}

impl LexError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        LexError {
            message: message.into(),
            position,
        }
    }
}

/// Grammar violation, or input left over after a complete expression.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} (pos={position})")]
pub struct ParseError {
    pub message: String,
    /// Zero-based character offset into the source.
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        ParseError {
            message: message.into(),
            position,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError {
            message: e.message,
            position: e.position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalErrorKind {
    /// An operand or argument has the wrong runtime type.
    TypeMismatch,
    /// No builtin or context function has the called name.
    UndefinedFunction,
    /// A builtin was called with an unsupported number of arguments.
    Arity,
    /// Evaluation nested deeper than `EngineOptions::max_depth`.
    DepthExceeded,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
        }
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::TypeMismatch, message)
    }

    pub fn undefined_function(name: &str) -> Self {
        Self::new(
            EvalErrorKind::UndefinedFunction,
            format!("Undefined function: {}", name),
        )
    }
}

/// Either failure of [`exec`](crate::exec).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_converts_to_parse_error_at_same_position() {
        let err: ParseError = LexError::new("Unexpected character '#'", 4).into();
        assert_eq!(err.position, 4);
        assert_eq!(err.to_string(), "Unexpected character '#' (pos=4)");
    }

    #[test]
    fn eval_error_displays_message_only() {
        let err = EvalError::undefined_function("nope");
        assert_eq!(err.kind, EvalErrorKind::UndefinedFunction);
        assert_eq!(err.to_string(), "Undefined function: nope");
    }
}
