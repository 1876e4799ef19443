//! Embeddable expression language with JavaScript-flavoured syntax.
//!
//! # Overview
//!
//! Source text such as `countIf(items, x => x.price > 10) > 2` goes through
//! three stages:
//!
//! 1. [`lexer`] turns it into [`Token`]s,
//! 2. [`parser`] builds an [`Expr`] tree with operator precedence,
//! 3. [`evaluate`](mod@evaluate) walks the tree against a [`Context`] of
//!    caller-supplied bindings and produces a [`Value`].
//!
//! Evaluation never mutates the context and never performs I/O. Missing
//! variables and paths resolve to [`Value::Null`]; only type mismatches,
//! unknown functions, arity violations and runaway recursion are errors.
//!
//! # Example
//!
//! ```
//! use expr_engine::{exec, Context, Value};
//! use serde_json::json;
//!
//! let ctx = Context::try_from(json!({
//!     "items": [1, 2, 3, 4, 5],
//!     "user": { "name": "Alice" }
//! }))
//! .unwrap();
//!
//! assert_eq!(exec("countIf(items, x => x > 3)", &ctx).unwrap(), Value::Number(2.0));
//! assert_eq!(exec("upper(user.name)", &ctx).unwrap(), Value::from("ALICE"));
//! assert_eq!(exec("user.missing.deep", &ctx).unwrap(), Value::Null);
//! ```

pub mod ast;
pub mod builtins;
pub mod context;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod util;
pub mod value;

pub use ast::{Ast, BinaryOp, Expr, PathSegment, Reference, UnaryOp};
pub use context::Context;
pub use engine::Engine;
pub use error::{Error, EvalError, EvalErrorKind, LexError, ParseError};
pub use evaluate::EvalCtx;
pub use lexer::{Lexer, Token, TokenKind};
pub use options::{EngineOptions, DEFAULT_MAX_DEPTH};
pub use parser::Parser;
pub use value::{Function, NativeFn, Value};

/// Tokenizes `source` with default options.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    Engine::default().tokenize(source)
}

/// Parses `source` with default options.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    Engine::default().parse(source)
}

/// Evaluates a parsed expression with default options.
pub fn evaluate(expr: &Expr, context: &Context) -> Result<Value, EvalError> {
    Engine::default().evaluate(expr, context)
}

/// Parses and evaluates `source` with default options.
pub fn exec(source: &str, context: &Context) -> Result<Value, Error> {
    Engine::default().exec(source, context)
}
