// SPDX-License-Identifier: Apache-2.0

use crate::token::{Symbol, Token};

/// The kind of structure a separator error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Array,
    Object,
}

impl Container {
    fn element(self) -> &'static str {
        match self {
            Container::Array => "array element",
            Container::Object => "object property",
        }
    }

    /// The symbol that ends this kind of structure.
    pub fn close_symbol(self) -> Symbol {
        match self {
            Container::Array => Symbol::RightBracket,
            Container::Object => Symbol::RightBrace,
        }
    }

    /// The kind of structure `symbol` would close, if it is a closing symbol.
    pub fn closed_by(symbol: Symbol) -> Option<Self> {
        match symbol {
            Symbol::RightBracket => Some(Container::Array),
            Symbol::RightBrace => Some(Container::Object),
            _ => None,
        }
    }
}

/// Every way tokenizing or parsing a document can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A string literal has no closing quote.
    UnterminatedString,
    /// A `.` in a number is not followed by a digit.
    MalformedFloat,
    /// A `-` is not followed by a digit.
    MissingNumberAfterMinus,
    /// No token starts at this character.
    UnexpectedCharacter,
    /// A `,` is directly followed by a symbol that cannot start a value.
    UnexpectedTokenAfterSeparator(Container),
    /// An element is followed by something other than `,` or the closing
    /// symbol, or a closing symbol appears with no matching opener.
    ExpectedSeparatorOrClose(Container),
    /// An object key is not a string.
    InvalidObjectKey,
    /// An object key is not followed by `:`.
    MissingColon,
    /// A value was required but the token does not start one.
    ExpectedValue,
    /// A number literal could not be converted, e.g. an integer outside i64.
    InvalidNumber,
    /// Arrays and objects are nested deeper than the configured limit.
    NestingTooDeep,
    /// Tokens ran out in the middle of a structure.
    UnexpectedEndOfInput,
    /// A complete value was parsed but tokens remain after it.
    TrailingTokens,
}

impl ErrorKind {
    /// Human readable description, never empty.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ErrorKind::UnterminatedString => f.write_str("unterminated string"),
            ErrorKind::MalformedFloat => f.write_str("expected digit after decimal point"),
            ErrorKind::MissingNumberAfterMinus => f.write_str("no number after '-'"),
            ErrorKind::UnexpectedCharacter => f.write_str("unexpected character"),
            ErrorKind::UnexpectedTokenAfterSeparator(c) => {
                write!(f, "unexpected symbol after {} in JSON", c.element())
            }
            ErrorKind::ExpectedSeparatorOrClose(c) => write!(
                f,
                "expected ',' or '{}' after {} in JSON",
                c.close_symbol().as_char(),
                c.element()
            ),
            ErrorKind::InvalidObjectKey => f.write_str("expected string as object key in JSON"),
            ErrorKind::MissingColon => f.write_str("expected ':' before property value in JSON"),
            ErrorKind::ExpectedValue => f.write_str("expected JSON value"),
            ErrorKind::InvalidNumber => f.write_str("number literal out of range"),
            ErrorKind::NestingTooDeep => f.write_str("maximum nesting depth exceeded"),
            ErrorKind::UnexpectedEndOfInput => {
                f.write_str("failed to parse JSON: unexpected end of input")
            }
            ErrorKind::TrailingTokens => f.write_str("unexpected content after JSON value"),
        }
    }
}

/// Where in the source an error was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// The offending literal text (token value or character).
    pub literal: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

/// A fatal tokenize or parse failure.
///
/// All kinds except [`ErrorKind::UnexpectedEndOfInput`] carry a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ErrorKind,
    location: Option<Location>,
}

impl ParseError {
    /// Error located at an arbitrary source position.
    pub fn new<T>(
        kind: ErrorKind,
        literal: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Result<T, Self> {
        Err(Self::located(kind, literal, line, column))
    }

    /// Error located at `token`.
    pub fn at<T>(kind: ErrorKind, token: &Token) -> Result<T, Self> {
        Err(Self::at_token(kind, token))
    }

    /// The tokens ran out before the document was complete.
    pub fn end_of_input<T>() -> Result<T, Self> {
        Err(Self {
            kind: ErrorKind::UnexpectedEndOfInput,
            location: None,
        })
    }

    pub(crate) fn at_token(kind: ErrorKind, token: &Token) -> Self {
        Self::located(kind, token.value(), token.line(), token.column())
    }

    fn located(kind: ErrorKind, literal: impl Into<String>, line: usize, column: usize) -> Self {
        let error = Self {
            kind,
            location: Some(Location {
                literal: literal.into(),
                line,
                column,
            }),
        };
        log::debug!("{error}");
        error
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn message(&self) -> String {
        self.kind.message()
    }

    pub fn line(&self) -> Option<usize> {
        self.location.as_ref().map(|l| l.line)
    }

    pub fn column(&self) -> Option<usize> {
        self.location.as_ref().map(|l| l.column)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.location {
            Some(loc) => write!(
                f,
                "{} at [ {} ] (line {}, column {})",
                self.kind, loc.literal, loc.line, loc.column
            ),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for ParseError {}
