//! Parse error type.

use std::fmt;

use crate::token::TokenKind;

/// The first fault recorded during a parse.
///
/// Lexical faults (an `Error` token pulled from the tokenizer) and grammar
/// violations both collapse into this one type; whichever happens first wins
/// and no further input is consumed. `line`/`column` point at the offending
/// token, `token_kind`/`lexeme` describe it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub token_kind: TokenKind,
    pub lexeme: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {}, col {}] {} (got {:?} '{}')",
            self.line, self.column, self.message, self.token_kind, self.lexeme
        )
    }
}

impl std::error::Error for ParseError {}
