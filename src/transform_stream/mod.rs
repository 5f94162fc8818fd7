//! Token streams.
//!
//! A [`Tokenizer`] turns a complete input text into a lazy sequence of
//! [`Token`]s. Filters are ordinary iterator adapters: each token travels
//! through the whole chain before the next one is lexed. [`concatenate`] and
//! [`accumulate`] consume a stream.

mod accumulate;
mod filters;
mod serialize;
mod settings;
mod token_factory;

use crate::lexer::{Lexer, MarkupDiagnostic, TokenKind};
use crate::rewritable_units::Token;
use std::fmt::{self, Debug};

pub use self::accumulate::{accumulate, Accumulate, AccumulationError};
pub use self::filters::{
    expand_empty_tags, find_all_contexts, wellformedness_check, ExpandEmptyTags,
    WellformednessCheck, WellformednessError,
};
pub use self::serialize::{concatenate, Serialize};
pub use self::settings::{DiagnosticHandler, Settings};

/// Lazy sequence of the tokens of an input text.
///
/// ```
/// use shallow_xml::{tokenize, TokenKind};
///
/// let kinds: Vec<_> = tokenize("<p>Some <i text.</p>").map(|t| t.kind()).collect();
///
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::Start,
///         TokenKind::Text,
///         TokenKind::Malformed,
///         TokenKind::Text,
///         TokenKind::End,
///     ]
/// );
/// ```
pub struct Tokenizer<'i, 'h> {
    lexer: Lexer<'i>,
    settings: Settings<'h>,
}

impl<'i, 'h> Tokenizer<'i, 'h> {
    #[inline]
    pub fn new(input: &'i str, settings: Settings<'h>) -> Self {
        Tokenizer {
            lexer: Lexer::new(input),
            settings,
        }
    }

    #[inline]
    pub fn input(&self) -> &'i str {
        self.lexer.input()
    }

    /// Byte offset the next token starts at.
    #[inline]
    pub fn position(&self) -> usize {
        self.lexer.position()
    }
}

impl<'i> Iterator for Tokenizer<'i, '_> {
    type Item = Token<'i>;

    fn next(&mut self) -> Option<Token<'i>> {
        let lexeme = self.lexer.next()?;

        if lexeme.kind == TokenKind::Malformed {
            if let Some(handler) = self.settings.diagnostic_handler.as_mut() {
                handler(&MarkupDiagnostic::new(
                    self.lexer.input(),
                    lexeme.span.clone(),
                ));
            }
        }

        Some(Token::from(lexeme))
    }
}

impl std::iter::FusedIterator for Tokenizer<'_, '_> {}

impl Debug for Tokenizer<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("position", &self.position())
            .field("diagnostics", &self.settings.diagnostic_handler.is_some())
            .finish()
    }
}

/// Tokenizes `input` without reporting diagnostics.
#[inline]
pub fn tokenize(input: &str) -> Tokenizer<'_, 'static> {
    Tokenizer::new(input, Settings::default())
}
