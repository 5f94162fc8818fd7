//! `shallow_xml` is a shallow (lexical) XML tokenizer.
//!
//! Input is split into a lazy sequence of [`Token`]s without building a tree
//! and without checking well-formedness. Unmodified tokens keep the exact
//! text they were lexed from, so concatenating the tokens of any input gives
//! the input back. Mutating a token marks it dirty, and its markup is
//! rebuilt from the parsed fields the next time it is serialized.
//!
//! ```
//! use shallow_xml::{concatenate, tokenize, Token};
//!
//! let tokens = tokenize(r#"<p class='a'>Hi <br/> there</p>"#).map(|mut token| {
//!     if let Token::StartTag(tag) = &mut token {
//!         if tag.name() == "p" {
//!             tag.set_attribute("id", "greeting");
//!         }
//!     }
//!
//!     token
//! });
//!
//! assert_eq!(
//!     concatenate(tokens, None),
//!     r#"<p class="a" id="greeting">Hi <br/> there</p>"#
//! );
//! ```

#[macro_use]
mod debug_trace;

mod base;
mod lexer;
mod rewritable_units;
mod transform_stream;

pub use self::lexer::{Lexeme, Lexer, MarkupDiagnostic, TokenKind, TokenKinds};
pub use self::rewritable_units::{
    display_limit, reset_templates, set_display_limit, set_template, template, Attribute,
    Attributes, Cdata, Comment, Doctype, EndTag, HasAttributes, HasName, Malformed,
    ProcessingInstruction, StartTag, Text, Token,
};
pub use self::transform_stream::{
    accumulate, concatenate, expand_empty_tags, find_all_contexts, tokenize, wellformedness_check,
    Accumulate, DiagnosticHandler, ExpandEmptyTags, Serialize, Settings, Tokenizer,
    WellformednessCheck,
};

/// Error types returned by the crate.
pub mod errors {
    pub use super::rewritable_units::{TemplateError, TokenError};
    pub use super::transform_stream::{AccumulationError, WellformednessError};
}

pub use self::errors::*;
