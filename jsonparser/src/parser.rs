// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent parser from a token sequence to a [`Value`] tree.
//!
//! Every `parse_*` recognizer takes a cursor into the token sequence and
//! returns `Ok(Some((next, value)))` when its construct starts there,
//! `Ok(None)` when it does not (the cursor is left where it was, so the
//! caller may try the next alternative), or `Err` for a fatal error which
//! aborts the whole parse.

use log::{debug, trace};

use crate::limits::Limits;
use crate::parse_error::{Container, ErrorKind, ParseError};
use crate::token::{Symbol, Token, TokenKind};
use crate::value::{Map, Value};

type Recognized = Result<Option<(usize, Value)>, ParseError>;

/// Arguments are the cursor and the nesting depth of the enclosing structure.
type Recognizer = fn(&Parser, usize, usize) -> Recognized;

/// Tried in order wherever a value is expected.
const VALUE_RECOGNIZERS: [Recognizer; 7] = [
    Parser::parse_array,
    Parser::parse_boolean,
    Parser::parse_float,
    Parser::parse_integer,
    Parser::parse_null,
    Parser::parse_string,
    Parser::parse_object,
];

/// What follows an element inside an array or object.
enum Step {
    /// A `,` was consumed; the next element starts at the cursor.
    Next(usize),
    /// The closing symbol was consumed; the structure ends before the cursor.
    Close(usize),
}

/// Parses `tokens` as one complete document with default [`Limits`].
pub fn parse(tokens: Vec<Token>) -> Result<Value, ParseError> {
    Parser::new(tokens).parse()
}

/// Owns a token sequence and parses it into a [`Value`].
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    limits: Limits,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_limits(tokens, Limits::default())
    }

    pub fn with_limits(tokens: Vec<Token>, limits: Limits) -> Self {
        Parser { tokens, limits }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parses the whole token sequence as a single value.
    ///
    /// Fails with [`ErrorKind::TrailingTokens`] if anything remains after
    /// the top-level value. No partial value is ever returned.
    pub fn parse(&self) -> Result<Value, ParseError> {
        let (cursor, value) = self.expect_value(0, 0)?;
        if let Some(extra) = self.tokens.get(cursor) {
            return ParseError::at(ErrorKind::TrailingTokens, extra);
        }
        debug!(
            "parsed {} from {} tokens",
            value.kind_name(),
            self.tokens.len()
        );
        Ok(value)
    }

    fn expect_token(&self, cursor: usize) -> Result<&Token, ParseError> {
        match self.tokens.get(cursor) {
            Some(token) => Ok(token),
            None => ParseError::end_of_input(),
        }
    }

    fn token_of_kind(&self, cursor: usize, kind: TokenKind) -> Option<&Token> {
        self.tokens.get(cursor).filter(|t| t.kind() == kind)
    }

    fn symbol_at(&self, cursor: usize, symbol: Symbol) -> Option<&Token> {
        self.tokens.get(cursor).filter(|t| t.is_symbol(symbol))
    }

    /// Tries every value recognizer at `cursor`.
    fn parse_value(&self, cursor: usize, depth: usize) -> Recognized {
        for recognize in VALUE_RECOGNIZERS {
            if let Some(hit) = recognize(self, cursor, depth)? {
                return Ok(Some(hit));
            }
        }
        Ok(None)
    }

    /// Like `parse_value`, but a missing value is fatal.
    ///
    /// A closing symbol where the document should start has nothing to
    /// close and is reported as an unbalanced structure.
    fn expect_value(&self, cursor: usize, depth: usize) -> Result<(usize, Value), ParseError> {
        let token = self.expect_token(cursor)?;
        trace!("value expected at {:?}", token.value());
        if let Some(hit) = self.parse_value(cursor, depth)? {
            return Ok(hit);
        }
        match token.symbol().and_then(Container::closed_by) {
            Some(container) if depth == 0 => {
                ParseError::at(ErrorKind::ExpectedSeparatorOrClose(container), token)
            }
            _ => ParseError::at(ErrorKind::ExpectedValue, token),
        }
    }

    /// Depth of a structure opened by `open` inside one at `depth`.
    fn enter(&self, open: &Token, depth: usize) -> Result<usize, ParseError> {
        let depth = depth + 1;
        if depth > self.limits.max_nesting_depth {
            return ParseError::at(ErrorKind::NestingTooDeep, open);
        }
        Ok(depth)
    }

    /// Consumes the `,` or closing symbol after an element at `cursor`.
    ///
    /// A comma must be followed by something that can start the next
    /// element, so `[1,]`, `[1,,2]` and `{"a":1,}` are rejected here.
    fn separator(&self, cursor: usize, container: Container) -> Result<Step, ParseError> {
        let token = self.expect_token(cursor)?;
        match token.symbol() {
            Some(Symbol::Comma) => {
                let following = self.expect_token(cursor + 1)?;
                match following.symbol() {
                    Some(symbol) if !symbol.opens_value() => ParseError::at(
                        ErrorKind::UnexpectedTokenAfterSeparator(container),
                        following,
                    ),
                    _ => Ok(Step::Next(cursor + 1)),
                }
            }
            Some(symbol) if symbol == container.close_symbol() => Ok(Step::Close(cursor + 1)),
            _ => ParseError::at(ErrorKind::ExpectedSeparatorOrClose(container), token),
        }
    }

    fn parse_array(&self, cursor: usize, depth: usize) -> Recognized {
        let Some(open) = self.symbol_at(cursor, Symbol::LeftBracket) else {
            return Ok(None);
        };
        let depth = self.enter(open, depth)?;
        let mut items = Vec::new();
        let mut idx = cursor + 1;
        if self.symbol_at(idx, Symbol::RightBracket).is_some() {
            return Ok(Some((idx + 1, Value::Array(items))));
        }
        loop {
            let token = self.expect_token(idx)?;
            let Some((next, item)) = self.parse_value(idx, depth)? else {
                let kind = ErrorKind::ExpectedSeparatorOrClose(Container::Array);
                return ParseError::at(kind, token);
            };
            items.push(item);
            match self.separator(next, Container::Array)? {
                Step::Next(after) => idx = after,
                Step::Close(after) => return Ok(Some((after, Value::Array(items)))),
            }
        }
    }

    fn parse_object(&self, cursor: usize, depth: usize) -> Recognized {
        let Some(open) = self.symbol_at(cursor, Symbol::LeftBrace) else {
            return Ok(None);
        };
        let depth = self.enter(open, depth)?;
        let mut members = Map::new();
        let mut idx = cursor + 1;
        if self.symbol_at(idx, Symbol::RightBrace).is_some() {
            return Ok(Some((idx + 1, Value::Object(members))));
        }
        loop {
            let key = self.expect_token(idx)?;
            if key.symbol().and_then(Container::closed_by).is_some() {
                // `{]`: the object is closed by the wrong symbol
                let kind = ErrorKind::ExpectedSeparatorOrClose(Container::Object);
                return ParseError::at(kind, key);
            }
            if key.kind() != TokenKind::String {
                return ParseError::at(ErrorKind::InvalidObjectKey, key);
            }
            let colon = self.expect_token(idx + 1)?;
            if !colon.is_symbol(Symbol::Colon) {
                return ParseError::at(ErrorKind::MissingColon, colon);
            }
            let (next, value) = self.expect_value(idx + 2, depth)?;
            // Last write wins; the key keeps its first position
            members.insert(key.value().to_string(), value);
            match self.separator(next, Container::Object)? {
                Step::Next(after) => idx = after,
                Step::Close(after) => return Ok(Some((after, Value::Object(members)))),
            }
        }
    }

    fn parse_boolean(&self, cursor: usize, _depth: usize) -> Recognized {
        let value = match self.token_of_kind(cursor, TokenKind::Boolean).map(Token::value) {
            Some("true") => true,
            Some("false") => false,
            _ => return Ok(None),
        };
        Ok(Some((cursor + 1, Value::Boolean(value))))
    }

    fn parse_float(&self, cursor: usize, _depth: usize) -> Recognized {
        let Some(token) = self.token_of_kind(cursor, TokenKind::Float) else {
            return Ok(None);
        };
        match token.value().parse::<f64>() {
            Ok(n) => Ok(Some((cursor + 1, Value::Float(n)))),
            Err(_) => ParseError::at(ErrorKind::InvalidNumber, token),
        }
    }

    fn parse_integer(&self, cursor: usize, _depth: usize) -> Recognized {
        let Some(token) = self.token_of_kind(cursor, TokenKind::Integer) else {
            return Ok(None);
        };
        match token.value().parse::<i64>() {
            Ok(n) => Ok(Some((cursor + 1, Value::Integer(n)))),
            Err(_) => ParseError::at(ErrorKind::InvalidNumber, token),
        }
    }

    fn parse_null(&self, cursor: usize, _depth: usize) -> Recognized {
        match self.token_of_kind(cursor, TokenKind::Null) {
            Some(_) => Ok(Some((cursor + 1, Value::Null))),
            None => Ok(None),
        }
    }

    fn parse_string(&self, cursor: usize, _depth: usize) -> Recognized {
        match self.token_of_kind(cursor, TokenKind::String) {
            Some(token) => Ok(Some((cursor + 1, Value::String(token.value().to_string())))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use test_log::test;

    fn parse_str(text: &str) -> Result<Value, ParseError> {
        parse(tokenize(text)?)
    }

    fn error_kind(text: &str) -> ErrorKind {
        parse_str(text).unwrap_err().kind()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse_str("42"), Ok(Value::Integer(42)));
        assert_eq!(parse_str("-3.25"), Ok(Value::Float(-3.25)));
        assert_eq!(parse_str("true"), Ok(Value::Boolean(true)));
        assert_eq!(parse_str("false"), Ok(Value::Boolean(false)));
        assert_eq!(parse_str("null"), Ok(Value::Null));
        assert_eq!(parse_str(r#""x y""#), Ok(Value::String("x y".to_string())));
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(parse_str("[]"), Ok(Value::Array(vec![])));
        assert_eq!(parse_str("{}"), Ok(Value::Object(Map::new())));
        assert_eq!(parse_str(" [ ] "), Ok(Value::Array(vec![])));
    }

    #[test]
    fn test_array_elements() {
        assert_eq!(
            parse_str(r#"[1, 2.5, "s", null, [], {}]"#),
            Ok(Value::Array(vec![
                Value::Integer(1),
                Value::Float(2.5),
                Value::String("s".to_string()),
                Value::Null,
                Value::Array(vec![]),
                Value::Object(Map::new()),
            ]))
        );
    }

    #[test]
    fn test_comma_may_precede_nested_structure() {
        let value = parse_str(r#"[1,[2],{"a":3}]"#).unwrap();
        assert_eq!(value.get_index(1), Some(&Value::Array(vec![Value::Integer(2)])));
        assert_eq!(
            value.get_index(2).and_then(|v| v.get("a")),
            Some(&Value::Integer(3))
        );
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let value = parse_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        let members = value.as_object().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members["a"], Value::Integer(3));
        let keys: Vec<&str> = members.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn test_object_keeps_insertion_order() {
        let value = parse_str(r#"{"z":0,"a":1,"m":2}"#).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_trailing_separator() {
        assert_eq!(
            error_kind("[1,]"),
            ErrorKind::UnexpectedTokenAfterSeparator(Container::Array)
        );
        assert_eq!(
            error_kind("[1,,2]"),
            ErrorKind::UnexpectedTokenAfterSeparator(Container::Array)
        );
        assert_eq!(
            error_kind(r#"{"a":1,}"#),
            ErrorKind::UnexpectedTokenAfterSeparator(Container::Object)
        );
    }

    #[test]
    fn test_separator_error_points_at_symbol_after_comma() {
        let err = parse_str("[1,\n ]").unwrap_err();
        let location = err.location().unwrap();
        assert_eq!(location.literal, "]");
        assert_eq!((location.line, location.column), (2, 2));
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            error_kind("[1 2]"),
            ErrorKind::ExpectedSeparatorOrClose(Container::Array)
        );
        assert_eq!(
            error_kind(r#"{"a":1 "b":2}"#),
            ErrorKind::ExpectedSeparatorOrClose(Container::Object)
        );
        assert_eq!(
            error_kind(r#"{"a":[1}"#),
            ErrorKind::ExpectedSeparatorOrClose(Container::Array)
        );
        assert_eq!(
            error_kind("[}"),
            ErrorKind::ExpectedSeparatorOrClose(Container::Array)
        );
    }

    #[test]
    fn test_unexpected_end_of_input() {
        for text in ["", "[", "[1", "[1,", "{", r#"{"a""#, r#"{"a":"#, r#"{"a":1"#] {
            let err = parse_str(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput, "{text:?}");
            assert_eq!(err.location(), None);
        }
    }

    #[test]
    fn test_object_key_errors() {
        assert_eq!(error_kind("{1:2}"), ErrorKind::InvalidObjectKey);
        assert_eq!(error_kind("{null:2}"), ErrorKind::InvalidObjectKey);
        assert_eq!(error_kind("{,}"), ErrorKind::InvalidObjectKey);
        assert_eq!(error_kind(r#"{"a" 1}"#), ErrorKind::MissingColon);
        assert_eq!(error_kind(r#"{"a":}"#), ErrorKind::ExpectedValue);
        assert_eq!(error_kind(r#"{"a":1,[}"#), ErrorKind::InvalidObjectKey);
    }

    #[test]
    fn test_value_errors() {
        assert_eq!(error_kind(":"), ErrorKind::ExpectedValue);
        assert_eq!(error_kind(","), ErrorKind::ExpectedValue);
        assert_eq!(error_kind(r#"{"a":]"#), ErrorKind::ExpectedValue);
    }

    #[test]
    fn test_stray_closing_symbols() {
        assert_eq!(
            error_kind("]"),
            ErrorKind::ExpectedSeparatorOrClose(Container::Array)
        );
        assert_eq!(
            error_kind("}"),
            ErrorKind::ExpectedSeparatorOrClose(Container::Object)
        );
        assert_eq!(
            error_kind("{]"),
            ErrorKind::ExpectedSeparatorOrClose(Container::Object)
        );
        assert_eq!(
            error_kind("[}"),
            ErrorKind::ExpectedSeparatorOrClose(Container::Array)
        );

        let err = parse_str("
  }").unwrap_err();
        let location = err.location().unwrap();
        assert_eq!(location.literal, "}");
        assert_eq!((location.line, location.column), (2, 3));

        // A closer after a complete document is extra content
        assert_eq!(error_kind("[1]]"), ErrorKind::TrailingTokens);
    }

    #[test]
    fn test_trailing_tokens() {
        let err = parse_str("123 456").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TrailingTokens);
        assert_eq!(err.location().unwrap().literal, "456");
        assert_eq!(error_kind("[1]]"), ErrorKind::TrailingTokens);
        assert_eq!(error_kind("{} {}"), ErrorKind::TrailingTokens);
    }

    #[test]
    fn test_integer_out_of_range() {
        assert_eq!(
            parse_str("9223372036854775807"),
            Ok(Value::Integer(i64::MAX))
        );
        assert_eq!(
            parse_str("-9223372036854775808"),
            Ok(Value::Integer(i64::MIN))
        );
        assert_eq!(error_kind("9223372036854775808"), ErrorKind::InvalidNumber);
    }

    #[test]
    fn test_nesting_limit() {
        let limits = Limits::new().with_max_nesting_depth(3);
        let within = Parser::with_limits(tokenize("[[[1]]]").unwrap(), limits);
        assert!(within.parse().is_ok());

        let beyond = Parser::with_limits(tokenize(r#"[[{"a":[]}]]"#).unwrap(), limits);
        let err = beyond.parse().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
        assert_eq!(err.location().unwrap().literal, "[");
        assert_eq!(err.column(), Some(8));
    }

    #[test]
    fn test_default_limit_allows_moderate_depth() {
        let depth = 100;
        let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        assert!(parse_str(&text).is_ok());

        let too_deep = 200;
        let text = format!("{}{}", "[".repeat(too_deep), "]".repeat(too_deep));
        assert_eq!(error_kind(&text), ErrorKind::NestingTooDeep);
    }

    #[test]
    fn test_recognizer_no_match_leaves_cursor() {
        let parser = Parser::new(tokenize(r#""s""#).unwrap());
        assert_eq!(parser.parse_array(0, 0), Ok(None));
        assert_eq!(parser.parse_integer(0, 0), Ok(None));
        assert_eq!(parser.parse_object(0, 0), Ok(None));
        assert_eq!(
            parser.parse_string(0, 0),
            Ok(Some((1, Value::String("s".to_string()))))
        );
        // Past the end is a plain no-match, not an error
        assert_eq!(parser.parse_value(1, 0), Ok(None));
    }
}
