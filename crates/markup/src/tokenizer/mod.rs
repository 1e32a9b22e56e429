//! Mode-tracking pull tokenizer.
//!
//! One token per `next_token` call. The tokenizer has exactly two pieces of
//! persistent state: the cursor (byte offset plus line/column) and the
//! lexical mode.
//!
//! Invariants:
//! - Free-running letter/digit/hyphen runs are context-dependent: `Text`
//!   outside a tag, `AttrName` inside one. The tokenizer never guesses: the
//!   parser flips the mode via `set_mode` exactly when it consumes
//!   `OpenTagStart`/`CloseTagStart` (enter a tag) and `Gt`/`SelfClose`
//!   (leave it).
//! - Malformed input surfaces as `Error` tokens; `next_token` never panics.
//! - After `Eof`, every further pull returns `Eof` again.

use memchr::{memchr, memmem};

use crate::token::{Token, TokenKind};

/// Lexical mode. See the module docs for who flips it and when.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LexMode {
    /// Expecting text or a `<`-led tag start.
    #[default]
    OutsideTag,
    /// Expecting attribute grammar, `>` or `/>`.
    InsideTag,
}

pub struct Tokenizer<'a> {
    source: &'a str,
    cursor: usize,
    line: u32,
    column: u32,
    mode: LexMode,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: 0,
            line: 1,
            column: 1,
            mode: LexMode::OutsideTag,
        }
    }

    pub fn mode(&self) -> LexMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: LexMode) {
        self.mode = mode;
    }

    /// Produce the next token from the current read position.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "markup.tokenizer",
            "{:?} {:?} @{}:{}",
            token.kind,
            token.lexeme,
            token.line,
            token.column
        );
        token
    }

    fn scan_token(&mut self) -> Token {
        self.skip_insignificant();
        let (line, column) = (self.line, self.column);
        if self.at_end() {
            return Token::new(TokenKind::Eof, "", line, column);
        }
        match self.mode {
            LexMode::InsideTag => self.scan_inside_tag(line, column),
            LexMode::OutsideTag => self.scan_outside_tag(line, column),
        }
    }

    /// Skip whitespace runs and `<!--...-->` comments, in either mode.
    ///
    /// Comments are consumed non-greedily up to the first `-->`. An
    /// unterminated comment silently consumes to end of input; no error is
    /// emitted for it.
    fn skip_insignificant(&mut self) {
        loop {
            match self.peek_byte() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.bump_ascii(),
                Some(b'<') if self.source[self.cursor..].starts_with("<!--") => {
                    let body_start = self.cursor + 4;
                    let end = match memmem::find(&self.source.as_bytes()[body_start..], b"-->") {
                        Some(found) => body_start + found + 3,
                        None => self.source.len(),
                    };
                    self.advance_to(end);
                }
                _ => return,
            }
        }
    }

    fn scan_inside_tag(&mut self, line: u32, column: u32) -> Token {
        match self.peek_byte() {
            Some(b'>') => {
                self.bump_ascii();
                Token::new(TokenKind::Gt, ">", line, column)
            }
            Some(b'=') => {
                self.bump_ascii();
                Token::new(TokenKind::AttrEquals, "=", line, column)
            }
            Some(b'/') => {
                if self.peek_byte_at(1) == Some(b'>') {
                    self.advance_to(self.cursor + 2);
                    Token::new(TokenKind::SelfClose, "/>", line, column)
                } else {
                    Token::new(TokenKind::Error, "unexpected '/'", line, column)
                }
            }
            Some(quote @ (b'"' | b'\'')) => {
                self.bump_ascii();
                let start = self.cursor;
                match memchr(quote, &self.source.as_bytes()[start..]) {
                    Some(found) => {
                        let end = start + found;
                        self.advance_to(end);
                        let lexeme = self.source[start..end].to_string();
                        self.bump_ascii(); // closing quote
                        Token::new(TokenKind::AttrValue, lexeme, line, column)
                    }
                    None => {
                        self.advance_to(self.source.len());
                        Token::new(TokenKind::Error, "unterminated string literal", line, column)
                    }
                }
            }
            Some(b) if b.is_ascii_alphabetic() => {
                let name = self.scan_name();
                Token::new(TokenKind::AttrName, name, line, column)
            }
            _ => Token::new(
                TokenKind::Error,
                "unexpected character inside tag",
                line,
                column,
            ),
        }
    }

    fn scan_outside_tag(&mut self, line: u32, column: u32) -> Token {
        if self.peek_byte() == Some(b'<') {
            return match self.peek_byte_at(1) {
                Some(b'/') => {
                    if self.peek_byte_at(2).is_some_and(|b| b.is_ascii_alphabetic()) {
                        self.advance_to(self.cursor + 2);
                        let name = self.scan_name();
                        Token::new(TokenKind::CloseTagStart, name, line, column)
                    } else {
                        Token::new(TokenKind::Error, "invalid tag syntax", line, column)
                    }
                }
                Some(b) if b.is_ascii_alphabetic() => {
                    self.bump_ascii();
                    let name = self.scan_name();
                    Token::new(TokenKind::OpenTagStart, name, line, column)
                }
                _ => Token::new(TokenKind::Error, "invalid tag syntax", line, column),
            };
        }

        // Literal text runs to the next `<` or end of input. `<` is ASCII and
        // cannot appear in UTF-8 continuation bytes, so the byte search cuts
        // on a char boundary.
        let start = self.cursor;
        let end = match memchr(b'<', &self.source.as_bytes()[start..]) {
            Some(found) => start + found,
            None => self.source.len(),
        };
        self.advance_to(end);
        Token::new(
            TokenKind::Text,
            self.source[start..end].to_string(),
            line,
            column,
        )
    }

    /// Scan a tag or attribute name: `[A-Za-z0-9-]*`. The caller has already
    /// checked that the first byte is an ASCII letter.
    fn scan_name(&mut self) -> String {
        let start = self.cursor;
        while let Some(b) = self.peek_byte() {
            if b.is_ascii_alphanumeric() || b == b'-' {
                self.bump_ascii();
            } else {
                break;
            }
        }
        self.source[start..self.cursor].to_string()
    }

    fn at_end(&self) -> bool {
        self.cursor >= self.source.len()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.source.as_bytes().get(self.cursor).copied()
    }

    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.cursor + offset).copied()
    }

    /// Move the cursor forward to `end` (a char boundary), updating the
    /// line/column counters over everything consumed. Columns count
    /// characters, not bytes.
    fn advance_to(&mut self, end: usize) {
        debug_assert!(self.cursor <= end && end <= self.source.len());
        debug_assert!(self.source.is_char_boundary(end));
        for ch in self.source[self.cursor..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.cursor = end;
    }

    /// Consume one byte known to be ASCII.
    fn bump_ascii(&mut self) {
        debug_assert!(self.peek_byte().is_some_and(|b| b.is_ascii()));
        self.advance_to(self.cursor + 1);
    }
}

#[cfg(test)]
mod tests;
