//! Lexical token model.

/// Token kinds produced by the tokenizer.
///
/// `Error` is a token, not a panic: its lexeme holds a diagnostic message
/// instead of source text, and the parser turns it into the latched
/// `ParseError` when it pulls it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `<tag`: lexeme is the tag name.
    OpenTagStart,
    /// `</tag`: lexeme is the tag name. `</` excluded.
    CloseTagStart,
    /// `/>`
    SelfClose,
    /// `>`
    Gt,
    /// Attribute name inside a tag.
    AttrName,
    /// `=`
    AttrEquals,
    /// Quoted attribute value: lexeme excludes the quotes.
    AttrValue,
    /// Literal character data outside a tag.
    Text,
    /// Lexical fault: lexeme is the diagnostic message.
    Error,
    /// End of input. Repeated pulls keep returning this.
    Eof,
}

/// Minimal lexical unit with a kind, decoded text, and source position.
///
/// The lexeme is always an owned copy taken out of the source at scan time,
/// never a window into it, so tokens are free to outlive the scan position.
/// Positions are 1-based and point at the first character of the lexeme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }
}
