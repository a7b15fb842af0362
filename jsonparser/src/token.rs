// SPDX-License-Identifier: Apache-2.0

/// Classification of a lexed fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A quoted string; the token value is the text between the quotes.
    String,
    /// A number without a fractional part, e.g. `-42`.
    Integer,
    /// A number with a fractional part, e.g. `3.25`.
    Float,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
    /// One of `[ ] { } : ,`.
    Symbol(Symbol),
    /// Reserved for consumers that want an explicit terminator; the lexer
    /// itself signals end of input by the end of the token sequence.
    EndOfFile,
}

/// The six structural characters of JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Colon,
    Comma,
}

impl Symbol {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '[' => Some(Symbol::LeftBracket),
            ']' => Some(Symbol::RightBracket),
            '{' => Some(Symbol::LeftBrace),
            '}' => Some(Symbol::RightBrace),
            ':' => Some(Symbol::Colon),
            ',' => Some(Symbol::Comma),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::LeftBracket => '[',
            Symbol::RightBracket => ']',
            Symbol::LeftBrace => '{',
            Symbol::RightBrace => '}',
            Symbol::Colon => ':',
            Symbol::Comma => ',',
        }
    }

    /// True for `[` and `{`, the symbols that begin a value.
    pub fn opens_value(self) -> bool {
        matches!(self, Symbol::LeftBracket | Symbol::LeftBrace)
    }
}

/// A classified, located fragment of source text.
///
/// Tokens are produced once by [`tokenize`](crate::tokenize) and never mutated.
/// `line` and `column` are 1-based and point at the first character of the
/// fragment (the opening quote, for strings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    value: String,
    line: usize,
    column: usize,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, value: String, line: usize, column: usize) -> Self {
        Self {
            kind,
            value,
            line,
            column,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The literal text: the symbol character, the number or keyword as
    /// written, or the body of a string without its quotes.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// The structural symbol this token holds, if it is a symbol token.
    pub fn symbol(&self) -> Option<Symbol> {
        match self.kind {
            TokenKind::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        self.symbol() == Some(symbol)
    }
}
