//! Tokenizer for the expression grammar.

use crate::error::LexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    String,
    Identifier,
    Operator,
    Punctuation,
    EndOfInput,
}

/// A lexical token. `text` holds the decoded contents for strings and the
/// verbatim source slice for everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Zero-based character offset of the first character of the token.
    pub position: usize,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    /// True for an operator token with exactly this text.
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }

    /// True for a punctuation token with exactly this character.
    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punctuation && self.text.len() == 1 && self.text.starts_with(ch)
    }
}

const THREE_CHAR_OPERATORS: [&str; 2] = ["===", "!=="];
const TWO_CHAR_OPERATORS: [&str; 7] = ["&&", "||", "==", "!=", ">=", "<=", "=>"];
const ONE_CHAR_OPERATORS: &str = "+-*/%<>?:=!";
const PUNCTUATION: &str = "(),[].";

/// Character-level scanner. Positions are counted in characters, not bytes.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    strict_strings: bool,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
            strict_strings: false,
            tokens: Vec::new(),
        }
    }

    /// Makes an unterminated string literal a [`LexError`].
    pub fn strict_strings(mut self, strict: bool) -> Self {
        self.strict_strings = strict;
        self
    }

    /// Scans the whole input. The last token is always `EndOfInput`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(ch) = self.peek() {
            if matches!(ch, ' ' | '\t' | '\r' | '\n') {
                self.pos += 1;
                continue;
            }

            if ch.is_ascii_digit()
                || (ch == '.' && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()))
            {
                self.scan_number();
                continue;
            }

            if ch == '"' || ch == '\'' {
                self.scan_string(ch)?;
                continue;
            }

            if ch.is_ascii_alphabetic() || ch == '_' {
                self.scan_identifier();
                continue;
            }

            if self.scan_operator_or_punctuation() {
                continue;
            }

            return Err(LexError::new(format!("Unexpected character '{}'", ch), self.pos));
        }

        self.tokens.push(Token::new(TokenKind::EndOfInput, "", self.pos));
        Ok(self.tokens)
    }

    fn scan_number(&mut self) {
        let start = self.pos;
        let mut seen_dot = false;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.pos += 1;
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = self.slice(start, self.pos);
        self.tokens.push(Token::new(TokenKind::Number, text, start));
    }

    fn scan_string(&mut self, quote: char) -> Result<(), LexError> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        let mut terminated = false;

        while let Some(ch) = self.peek() {
            if ch == '\\' {
                if let Some(escaped) = self.peek_at(1) {
                    out.push(escaped);
                    self.pos += 2;
                    continue;
                }
                out.push(ch);
                self.pos += 1;
            } else if ch == quote {
                self.pos += 1;
                terminated = true;
                break;
            } else {
                out.push(ch);
                self.pos += 1;
            }
        }

        if !terminated && self.strict_strings {
            return Err(LexError::new("Unterminated string literal", start));
        }

        self.tokens.push(Token::new(TokenKind::String, out, start));
        Ok(())
    }

    fn scan_identifier(&mut self) {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        let text = self.slice(start, self.pos);
        self.tokens.push(Token::new(TokenKind::Identifier, text, start));
    }

    fn scan_operator_or_punctuation(&mut self) -> bool {
        let start = self.pos;

        for (width, candidates) in [
            (3, &THREE_CHAR_OPERATORS[..]),
            (2, &TWO_CHAR_OPERATORS[..]),
        ] {
            if start + width <= self.chars.len() {
                let text = self.slice(start, start + width);
                if candidates.contains(&text.as_str()) {
                    self.pos += width;
                    self.tokens.push(Token::new(TokenKind::Operator, text, start));
                    return true;
                }
            }
        }

        let Some(ch) = self.peek() else {
            return false;
        };
        let kind = if ONE_CHAR_OPERATORS.contains(ch) {
            TokenKind::Operator
        } else if PUNCTUATION.contains(ch) {
            TokenKind::Punctuation
        } else {
            return false;
        };
        self.pos += 1;
        self.tokens.push(Token::new(kind, ch.to_string(), start));
        true
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }
}

/// Tokenizes `input` with lenient string handling.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(TokenKind, String)> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn numbers_with_optional_fraction() {
        let toks = kinds("42 3.14 .5");
        assert_eq!(toks[0], (TokenKind::Number, "42".to_string()));
        assert_eq!(toks[1], (TokenKind::Number, "3.14".to_string()));
        assert_eq!(toks[2], (TokenKind::Number, ".5".to_string()));
        assert_eq!(toks[3].0, TokenKind::EndOfInput);
    }

    #[test]
    fn number_takes_a_single_dot() {
        let toks = kinds("1.2.3");
        assert_eq!(toks[0], (TokenKind::Number, "1.2".to_string()));
        assert_eq!(toks[1], (TokenKind::Number, ".3".to_string()));
    }

    #[test]
    fn minus_is_never_part_of_a_number() {
        let toks = kinds("-5");
        assert_eq!(toks[0], (TokenKind::Operator, "-".to_string()));
        assert_eq!(toks[1], (TokenKind::Number, "5".to_string()));
    }

    #[test]
    fn strings_with_both_quotes_and_escapes() {
        let toks = kinds(r#"'it\'s' "a\"b" "x\ny""#);
        assert_eq!(toks[0], (TokenKind::String, "it's".to_string()));
        assert_eq!(toks[1], (TokenKind::String, "a\"b".to_string()));
        // Escapes are literal: `\n` is just `n`.
        assert_eq!(toks[2], (TokenKind::String, "xny".to_string()));
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let toks = kinds("'abc");
        assert_eq!(toks[0], (TokenKind::String, "abc".to_string()));
        assert_eq!(toks[1].0, TokenKind::EndOfInput);
    }

    #[test]
    fn strict_mode_rejects_unterminated_string() {
        let err = Lexer::new("1 + 'abc")
            .strict_strings(true)
            .tokenize()
            .unwrap_err();
        assert_eq!(err.position, 4);
    }

    #[test]
    fn operators_match_longest_first() {
        let toks = kinds("a === b !== c => d <= e = f");
        let ops: Vec<_> = toks
            .iter()
            .filter(|(k, _)| *k == TokenKind::Operator)
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(ops, vec!["===", "!==", "=>", "<=", "="]);
    }

    #[test]
    fn true_and_false_are_identifiers() {
        let toks = kinds("true false _x1");
        assert!(toks[..3].iter().all(|(k, _)| *k == TokenKind::Identifier));
    }

    #[test]
    fn punctuation() {
        let toks = kinds("f(a[0], b.c)");
        let puncts: String = toks
            .iter()
            .filter(|(k, _)| *k == TokenKind::Punctuation)
            .map(|(_, t)| t.as_str())
            .collect();
        assert_eq!(puncts, "([],.)");
    }

    #[test]
    fn positions_are_character_offsets() {
        let toks = tokenize("'é' + x").unwrap();
        assert_eq!(toks[1].position, 4);
        assert_eq!(toks[2].position, 6);
        assert_eq!(toks[3].position, 7);
    }

    #[test]
    fn unknown_character_is_an_error() {
        let err = tokenize("1 # 2").unwrap_err();
        assert_eq!(err.position, 2);
        let err = tokenize("a & b").unwrap_err();
        assert_eq!(err.position, 2);
    }
}
