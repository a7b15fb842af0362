// SPDX-License-Identifier: Apache-2.0

//! A two-stage JSON parser.
//!
//! [`tokenize`] turns text into located [`Token`]s, and [`parse`] walks them
//! with a recursive-descent parser to build a [`Value`]. Both stages fail
//! with a [`ParseError`] that carries the offending literal and its 1-based
//! line and column.
//!
//! ```
//! use jsonparser::{from_str, Value};
//!
//! let value = from_str(r#"{"a": [1, {"b": [true, null, "x"]}]}"#).unwrap();
//! assert_eq!(value.get("a").and_then(|a| a.get_index(0)), Some(&Value::Integer(1)));
//! ```
//!
//! Not supported: string escape decoding (string bodies are kept verbatim),
//! exponent notation, comments and trailing commas.

mod lexer;
pub use lexer::{tokenize, Lexer};

mod limits;
pub use limits::{Limits, DEFAULT_MAX_NESTING_DEPTH};

mod parse_error;
pub use parse_error::{Container, ErrorKind, Location, ParseError};

mod parser;
pub use parser::{parse, Parser};

mod token;
pub use token::{Symbol, Token, TokenKind};

mod value;
pub use value::{Map, Value};

/// Tokenizes and parses `text` with default [`Limits`].
pub fn from_str(text: &str) -> Result<Value, ParseError> {
    from_str_with_limits(text, Limits::default())
}

/// Tokenizes and parses `text` with the given [`Limits`].
pub fn from_str_with_limits(text: &str, limits: Limits) -> Result<Value, ParseError> {
    let tokens = tokenize(text)?;
    Parser::with_limits(tokens, limits).parse()
}
