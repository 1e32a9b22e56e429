//! Token consumer that builds the document tree.
//!
//! The grammar is the classic recursive-descent one (sequence / node /
//! element / attributes) driven with a 1-token lookahead, but element
//! nesting is handled with an explicit open-element stack instead of native
//! recursion, so input nested tens of thousands of levels deep costs heap,
//! not call stack.
//!
//! Every step returns `Result` and the drive loop short-circuits with `?`:
//! the first fault, whether an `Error` token pulled from the tokenizer or a
//! grammar violation, is the one reported; no further input is consumed
//! and the partially built arena is dropped before returning. No partial
//! tree ever reaches the caller.

use crate::dom::{Document, NodeId, is_void_tag};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};
use crate::tokenizer::{LexMode, Tokenizer};

/// Parse a whole source string into a document tree.
///
/// The source is borrowed read-only for the duration of the call; each call
/// starts fresh tokenizer/parser state, so parsing is deterministic for a
/// given input.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    Parser::new(source)?.parse_document()
}

/// An element whose closing tag is still outstanding.
struct OpenElement {
    node: NodeId,
    tag: String,
}

struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    current: Token,
    previous: Token,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut tokenizer = Tokenizer::new(source);
        let current = tokenizer.next_token();
        let parser = Self {
            tokenizer,
            current,
            previous: Token::new(TokenKind::Eof, "", 0, 0),
        };
        // The very first token can already be a lexical fault.
        parser.check_lex()?;
        Ok(parser)
    }

    fn parse_document(mut self) -> Result<Document, ParseError> {
        let mut doc = Document::new();
        let mut open_elements: Vec<OpenElement> = Vec::new();

        loop {
            match self.current.kind {
                TokenKind::Eof => {
                    if let Some(frame) = open_elements.last() {
                        return Err(
                            self.error_at_current(format!("missing closing tag for <{}>", frame.tag))
                        );
                    }
                    break;
                }
                TokenKind::Text => {
                    let parent = open_elements.last().map_or(doc.root(), |f| f.node);
                    let lexeme = std::mem::take(&mut self.current.lexeme);
                    let text = doc.create_text(lexeme);
                    doc.append_child(parent, text);
                    self.advance()?;
                }
                TokenKind::OpenTagStart => {
                    self.parse_element_open(&mut doc, &mut open_elements)?;
                }
                TokenKind::CloseTagStart => {
                    let Some(frame) = open_elements.last() else {
                        // A closing tag with nothing open terminates the
                        // document sequence; trailing input stays unconsumed.
                        break;
                    };
                    if self.current.lexeme != frame.tag {
                        return Err(self.error_at_current(format!(
                            "mismatched closing tag: expected </{}> but got </{}>",
                            frame.tag, self.current.lexeme
                        )));
                    }
                    self.advance()?;
                    self.expect(TokenKind::Gt, "expected '>' after closing tag name")?;
                    let closed = open_elements.pop();
                    debug_assert!(closed.is_some());
                }
                _ => {
                    return Err(
                        self.error_at_current("unexpected token while parsing children")
                    );
                }
            }
        }

        Ok(doc)
    }

    /// Consume an `OpenTagStart` and everything through the `>` or `/>`
    /// that finishes the open tag. Elements that can still have children are
    /// pushed onto the open stack; void tags and explicitly self-closed ones
    /// are complete immediately.
    fn parse_element_open(
        &mut self,
        doc: &mut Document,
        open_elements: &mut Vec<OpenElement>,
    ) -> Result<(), ParseError> {
        debug_assert_eq!(self.current.kind, TokenKind::OpenTagStart);
        let tag = std::mem::take(&mut self.current.lexeme);
        self.advance()?;

        let parent = open_elements.last().map_or(doc.root(), |f| f.node);
        let node = doc.create_element(tag.clone());
        doc.append_child(parent, node);
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(target: "markup.parser", "open <{tag}>");

        self.parse_attributes(doc, node)?;

        match self.current.kind {
            TokenKind::SelfClose => {
                self.advance()?;
            }
            TokenKind::Gt => {
                self.advance()?;
                // Void tags are childless regardless of an explicit slash,
                // so they never go on the open stack.
                if !is_void_tag(&tag) {
                    open_elements.push(OpenElement { node, tag });
                }
            }
            _ => {
                return Err(
                    self.error_at_current("expected '>' or '/>' after tag attributes")
                );
            }
        }
        Ok(())
    }

    /// `name`, `name="value"`, `name='value'`; a bare name defaults to the
    /// literal value `"true"` (boolean-attribute convention). Duplicates are
    /// appended in encounter order, never merged.
    fn parse_attributes(&mut self, doc: &mut Document, element: NodeId) -> Result<(), ParseError> {
        while self.current.kind == TokenKind::AttrName {
            let name = std::mem::take(&mut self.current.lexeme);
            self.advance()?;

            let value = if self.current.kind == TokenKind::AttrEquals {
                self.advance()?;
                self.expect(TokenKind::AttrValue, "expected attribute value")?;
                // The value token was just consumed; its lexeme is on `previous`.
                std::mem::take(&mut self.previous.lexeme)
            } else {
                String::from("true")
            };

            doc.append_attribute(element, name, value);
        }
        Ok(())
    }

    /// Consume the current token and pull the next one, flipping the
    /// tokenizer's lexical mode according to what was consumed: into a tag
    /// on `OpenTagStart`/`CloseTagStart`, out of it on `Gt`/`SelfClose`.
    fn advance(&mut self) -> Result<(), ParseError> {
        match self.current.kind {
            TokenKind::OpenTagStart | TokenKind::CloseTagStart => {
                self.tokenizer.set_mode(LexMode::InsideTag);
            }
            TokenKind::Gt | TokenKind::SelfClose => {
                self.tokenizer.set_mode(LexMode::OutsideTag);
            }
            _ => {}
        }
        self.previous = std::mem::replace(&mut self.current, self.tokenizer.next_token());
        self.check_lex()
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<(), ParseError> {
        if self.current.kind == kind {
            self.advance()
        } else {
            Err(self.error_at_current(message))
        }
    }

    /// Turn a lexical `Error` token into the latched parse error.
    fn check_lex(&self) -> Result<(), ParseError> {
        if self.current.kind == TokenKind::Error {
            Err(self.error_at_current(self.current.lexeme.clone()))
        } else {
            Ok(())
        }
    }

    fn error_at_current(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: self.current.line,
            column: self.current.column,
            message: message.into(),
            token_kind: self.current.kind,
            lexeme: self.current.lexeme.clone(),
        }
    }
}
