// SPDX-License-Identifier: Apache-2.0

//! Character-level scanner turning source text into [`Token`]s.
//!
//! The lexer makes a single forward pass over the code points of the input.
//! At each position it tries a fixed list of recognizers; a recognizer either
//! returns the token it matched together with the advanced cursor, or `None`
//! and leaves the cursor untouched so the next recognizer can try.

use log::{debug, trace};

use crate::parse_error::{ErrorKind, ParseError};
use crate::token::{Symbol, Token, TokenKind};

/// Result of trying one recognizer at a cursor.
///
/// `Ok(None)` is the no-match signal and has no side effects.
type Recognized = Result<Option<(usize, Token)>, ParseError>;

type Recognizer = fn(&Lexer, usize) -> Recognized;

/// Tried in order at every position; the first match wins.
const RECOGNIZERS: [Recognizer; 5] = [
    Lexer::make_symbol,
    Lexer::make_string,
    Lexer::make_number,
    Lexer::make_boolean,
    Lexer::make_null,
];

/// Tokenizes `text` completely, or fails on the first malformed fragment.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(text).tokenize()
}

/// Owns the decoded source for the duration of one tokenize call.
pub struct Lexer {
    source: Vec<char>,
    line: usize,
    /// Index of the first character of the current line
    line_start: usize,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        Lexer {
            source: text.chars().collect(),
            line: 1,
            line_start: 0,
        }
    }

    /// Consumes the lexer and returns every token in source order.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        let mut cursor = 0;

        'scan: while cursor < self.source.len() {
            if let Some(next) = self.consume_line_return(cursor) {
                cursor = next;
                continue;
            }
            if self.source[cursor].is_whitespace() {
                cursor += 1;
                continue;
            }
            for recognize in RECOGNIZERS {
                if let Some((next, token)) = recognize(&self, cursor)? {
                    trace!(
                        "{:?} {:?} at {}:{}",
                        token.kind(),
                        token.value(),
                        token.line(),
                        token.column()
                    );
                    // Strings are the only tokens that may span lines
                    if token.kind() == TokenKind::String {
                        self.track_line_returns(cursor, next);
                    }
                    tokens.push(token);
                    cursor = next;
                    continue 'scan;
                }
            }
            return ParseError::new(
                ErrorKind::UnexpectedCharacter,
                self.source[cursor],
                self.line,
                self.column(cursor),
            );
        }

        debug!("tokenized {} chars into {} tokens", self.source.len(), tokens.len());
        Ok(tokens)
    }

    fn at(&self, cursor: usize) -> Option<char> {
        self.source.get(cursor).copied()
    }

    fn is_digit_at(&self, cursor: usize) -> bool {
        self.at(cursor).is_some_and(|c| c.is_ascii_digit())
    }

    fn column(&self, cursor: usize) -> usize {
        cursor - self.line_start + 1
    }

    fn token(&self, kind: TokenKind, value: String, start: usize) -> Token {
        Token::new(kind, value, self.line, self.column(start))
    }

    /// Advances past a `\n` or `\r` and starts a new line. Each of the two
    /// characters counts on its own, so `\r\n` advances two lines.
    fn consume_line_return(&mut self, cursor: usize) -> Option<usize> {
        match self.at(cursor)? {
            '\n' | '\r' => {
                let next = cursor + 1;
                self.line += 1;
                self.line_start = next;
                Some(next)
            }
            _ => None,
        }
    }

    fn track_line_returns(&mut self, start: usize, end: usize) {
        let mut cursor = start;
        while cursor < end {
            cursor = self.consume_line_return(cursor).unwrap_or(cursor + 1);
        }
    }

    fn make_symbol(&self, cursor: usize) -> Recognized {
        let Some(symbol) = self.at(cursor).and_then(Symbol::from_char) else {
            return Ok(None);
        };
        let token = self.token(TokenKind::Symbol(symbol), symbol.as_char().to_string(), cursor);
        Ok(Some((cursor + 1, token)))
    }

    /// Scans to the next quote not preceded by a backslash. The body is kept
    /// verbatim; escape sequences are not decoded.
    fn make_string(&self, cursor: usize) -> Recognized {
        if self.at(cursor) != Some('"') {
            return Ok(None);
        }
        let mut end = cursor + 1;
        loop {
            match self.at(end) {
                None => {
                    return ParseError::new(
                        ErrorKind::UnterminatedString,
                        '"',
                        self.line,
                        self.column(cursor),
                    )
                }
                Some('"') => break,
                Some('\\') => end += 2,
                Some(_) => end += 1,
            }
        }
        let body: String = self.source[cursor + 1..end].iter().collect();
        Ok(Some((end + 1, self.token(TokenKind::String, body, cursor))))
    }

    /// `-?[0-9]+(\.[0-9]+)?`; no exponent, leading zeros accepted.
    fn make_number(&self, cursor: usize) -> Recognized {
        let negative = self.at(cursor) == Some('-');
        let digits_start = if negative { cursor + 1 } else { cursor };
        let mut end = digits_start;
        while self.is_digit_at(end) {
            end += 1;
        }
        if end == digits_start {
            if negative {
                return ParseError::new(
                    ErrorKind::MissingNumberAfterMinus,
                    '-',
                    self.line,
                    self.column(cursor),
                );
            }
            return Ok(None);
        }

        let mut kind = TokenKind::Integer;
        if self.at(end) == Some('.') {
            if !self.is_digit_at(end + 1) {
                let literal: String = self.source[cursor..=end].iter().collect();
                return ParseError::new(
                    ErrorKind::MalformedFloat,
                    literal,
                    self.line,
                    self.column(cursor),
                );
            }
            kind = TokenKind::Float;
            end += 1;
            while self.is_digit_at(end) {
                end += 1;
            }
        }
        let text: String = self.source[cursor..end].iter().collect();
        Ok(Some((end, self.token(kind, text, cursor))))
    }

    /// The full run of letters starting at `cursor`.
    fn word(&self, cursor: usize) -> (usize, String) {
        let mut end = cursor;
        while self.at(end).is_some_and(char::is_alphabetic) {
            end += 1;
        }
        (end, self.source[cursor..end].iter().collect())
    }

    fn make_boolean(&self, cursor: usize) -> Recognized {
        match self.word(cursor) {
            (end, word) if word == "true" || word == "false" => {
                Ok(Some((end, self.token(TokenKind::Boolean, word, cursor))))
            }
            _ => Ok(None),
        }
    }

    fn make_null(&self, cursor: usize) -> Recognized {
        match self.word(cursor) {
            (end, word) if word == "null" => {
                Ok(Some((end, self.token(TokenKind::Null, word, cursor))))
            }
            _ => Ok(None),
        }
    }
}
