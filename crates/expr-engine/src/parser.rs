//! Recursive-descent, precedence-climbing parser.
//!
//! ```text
//! expression := binary(0) ('?' expression ':' expression)?
//! binary(min) := primary (op[prec >= min] binary(prec + 1))*
//! primary     := number | string | identifierForm | '(' expression ')'
//!              | ('-' | '!') primary
//! ```

use crate::ast::{Ast, BinaryOp, Expr, PathSegment, Reference, UnaryOp};
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::options::DEFAULT_MAX_DEPTH;

/// Consumes a token sequence produced by the [lexer](crate::lexer).
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfInput) {
            let end = tokens
                .last()
                .map(|t| t.position + t.text.chars().count())
                .unwrap_or(0);
            tokens.push(Token {
                kind: TokenKind::EndOfInput,
                text: String::new(),
                position: end,
            });
        }
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses one complete expression; trailing tokens are an error.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        let tok = self.current();
        if tok.kind != TokenKind::EndOfInput {
            return Err(ParseError::new(
                format!("Unexpected token '{}'", tok.text),
                tok.position,
            ));
        }
        Ok(expr)
    }

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.nested(|p| {
            let condition = p.parse_binary(0)?;
            if !p.current().is_op("?") {
                return Ok(condition);
            }
            p.advance();
            let then_branch = p.parse_expression()?;
            if !p.current().is_op(":") {
                return Err(p.error_here("Expected ':' in ternary expression"));
            }
            p.advance();
            let else_branch = p.parse_expression()?;
            Ok(Ast::ternary(condition, then_branch, else_branch))
        })
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_primary()?;

        loop {
            let tok = self.current();
            if tok.kind != TokenKind::Operator {
                break;
            }
            let Some(op) = BinaryOp::from_symbol(&tok.text) else {
                break;
            };
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let right = self.parse_binary(prec + 1)?;
            left = Ast::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::Number => {
                self.advance();
                let value = tok.text.parse::<f64>().map_err(|_| {
                    ParseError::new(format!("Invalid number '{}'", tok.text), tok.position)
                })?;
                Ok(Expr::Number(value))
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::String(tok.text))
            }
            TokenKind::Identifier => {
                self.advance();
                self.parse_identifier_form(tok.text)
            }
            TokenKind::Punctuation if tok.is_punct('(') => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_punct(')')?;
                Ok(expr)
            }
            TokenKind::Operator if tok.is_op("-") || tok.is_op("!") => {
                self.advance();
                let op = if tok.is_op("-") {
                    UnaryOp::Neg
                } else {
                    UnaryOp::Not
                };
                let operand = self.nested(|p| p.parse_primary())?;
                Ok(Ast::unary(op, operand))
            }
            TokenKind::EndOfInput => Err(ParseError::new("Unexpected end of input", tok.position)),
            _ => Err(ParseError::new(
                format!("Unexpected token '{}'", tok.text),
                tok.position,
            )),
        }
    }

    /// Lambda, boolean literal, reference path, or call, decided by what
    /// follows the identifier.
    fn parse_identifier_form(&mut self, name: String) -> Result<Expr, ParseError> {
        if self.current().is_op("=>") {
            self.advance();
            let body = self.parse_expression()?;
            return Ok(Ast::lambda(name, body));
        }

        if name == "true" || name == "false" {
            let next = self.current();
            if !(next.is_punct('.') || next.is_punct('[') || next.is_punct('(')) {
                return Ok(Expr::Number(if name == "true" { 1.0 } else { 0.0 }));
            }
        }

        let mut reference = Reference::new(name);
        loop {
            let tok = self.current();
            if tok.is_punct('(') {
                self.advance();
                let args = self.parse_arguments()?;
                return Ok(Ast::call(reference.path(), args));
            } else if tok.is_punct('.') {
                self.advance();
                let prop = self.current();
                if prop.kind != TokenKind::Identifier {
                    return Err(self.error_here("Expected property name after '.'"));
                }
                reference.segments.push(PathSegment::Property(prop.text.clone()));
                self.advance();
            } else if tok.is_punct('[') {
                self.advance();
                let index = self.parse_expression()?;
                self.expect_punct(']')?;
                reference.segments.push(PathSegment::Index(Box::new(index)));
            } else {
                break;
            }
        }

        Ok(Expr::Reference(reference))
    }

    /// Comma-separated arguments after an opening `(`, through the `)`.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.current().is_punct(')') {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if self.current().is_punct(',') {
                self.advance();
                continue;
            }
            break;
        }
        self.expect_punct(')')?;
        Ok(args)
    }

    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(self.error_here("Expression nested too deeply"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn current(&self) -> &Token {
        // `new` guarantees a trailing EndOfInput and `advance` never moves past it.
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn expect_punct(&mut self, ch: char) -> Result<(), ParseError> {
        if self.current().is_punct(ch) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(&format!("Expected '{}'", ch)))
        }
    }

    fn error_here(&self, message: &str) -> ParseError {
        ParseError::new(message, self.current().position)
    }
}
