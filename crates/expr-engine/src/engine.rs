use crate::ast::Expr;
use crate::context::Context;
use crate::error::{Error, EvalError, ParseError};
use crate::evaluate::{evaluate, EvalCtx};
use crate::lexer::{Lexer, Token};
use crate::options::EngineOptions;
use crate::parser::Parser;
use crate::value::Value;
use log::{debug, trace};

/// Stateless front door over the lexer, parser and evaluator.
///
/// An `Engine` only carries its [`EngineOptions`]; it is `Copy`, and a single
/// instance may be shared freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Engine { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, ParseError> {
        Lexer::new(source)
            .strict_strings(self.options.strict_strings)
            .tokenize()
            .map_err(ParseError::from)
    }

    pub fn parse(&self, source: &str) -> Result<Expr, ParseError> {
        trace!(
            "parsing {} chars (max_depth={})",
            source.chars().count(),
            self.options.max_depth
        );
        let result = self.tokenize(source).and_then(|tokens| {
            Parser::new(tokens)
                .with_max_depth(self.options.max_depth)
                .parse()
        });
        if let Err(e) = &result {
            debug!("failed to parse {:?}: {}", source, e);
        }
        result
    }

    pub fn evaluate(&self, expr: &Expr, context: &Context) -> Result<Value, EvalError> {
        trace!("evaluating {} (max_depth={})", expr, self.options.max_depth);
        let ctx = EvalCtx::new(context).with_max_depth(self.options.max_depth);
        let result = evaluate(expr, &ctx);
        if let Err(e) = &result {
            debug!("evaluation of {} failed: {}", expr, e);
        }
        result
    }

    /// Parses and evaluates `source` in one step.
    pub fn exec(&self, source: &str, context: &Context) -> Result<Value, Error> {
        let expr = self.parse(source)?;
        Ok(self.evaluate(&expr, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalErrorKind;

    #[test]
    fn exec_combines_parse_and_evaluate() {
        let engine = Engine::default();
        let ctx = Context::new().with("x", 4);
        assert_eq!(engine.exec("x * 2", &ctx).unwrap(), Value::Number(8.0));
    }

    #[test]
    fn parsed_expression_is_reusable() {
        let engine = Engine::default();
        let expr = engine.parse("a + 1").unwrap();
        for a in 0..3 {
            let ctx = Context::new().with("a", a);
            assert_eq!(
                engine.evaluate(&expr, &ctx).unwrap(),
                Value::Number(a as f64 + 1.0)
            );
        }
    }

    #[test]
    fn errors_keep_their_category() {
        let engine = Engine::default();
        assert!(matches!(
            engine.exec("1 +", &Context::new()),
            Err(Error::Parse(_))
        ));
        match engine.exec("nope()", &Context::new()) {
            Err(Error::Eval(e)) => assert_eq!(e.kind, EvalErrorKind::UndefinedFunction),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn strict_strings_option() {
        let lenient = Engine::default();
        assert_eq!(
            lenient.exec("'abc", &Context::new()).unwrap(),
            Value::from("abc")
        );
        let strict = Engine::new(EngineOptions::default().with_strict_strings(true));
        let err = strict.parse("'abc").unwrap_err();
        assert_eq!(err.position, 0);
    }

    #[test]
    fn max_depth_option_applies_to_parsing() {
        let engine = Engine::new(EngineOptions::default().with_max_depth(4));
        assert!(engine.parse("((((((1))))))").is_err());
        assert!(engine.parse("(1)").is_ok());
    }
}
