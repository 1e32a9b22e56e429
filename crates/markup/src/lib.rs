//! Parser for a restricted markup dialect.
//!
//! Source text goes through a mode-tracking pull tokenizer into a
//! recursive-descent token consumer that builds an arena-backed tree.
//! Parsing is "parse fully or report one fault": the first lexical or
//! grammar error is returned and no partial tree ever reaches the caller.
//!
//! ```
//! let doc = markup::parse("<p id=\"x\">Hello</p>").unwrap();
//! let p = doc.children(doc.root())[0];
//! assert_eq!(doc.tag_name(p), Some("p"));
//! ```

mod dom;
mod error;
mod parser;
pub mod print;
mod token;
mod tokenizer;

pub use crate::dom::{Document, NodeId, NodeKind, ROOT_TAG, is_void_tag};
pub use crate::error::ParseError;
pub use crate::parser::parse;
pub use crate::token::{Token, TokenKind};
pub use crate::tokenizer::{LexMode, Tokenizer};
