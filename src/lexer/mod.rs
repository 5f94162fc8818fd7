//! Shallow lexer.
//!
//! Splits text into markup and text spans using the REX shallow parsing
//! expression without checking well-formedness. Every input byte ends up in
//! exactly one lexeme, so the lexemes always concatenate back to the input.

mod diagnostics;
pub(crate) mod grammar;
mod lexeme;

use crate::base::ceil_char_boundary;

pub use self::diagnostics::MarkupDiagnostic;
pub use self::lexeme::{Lexeme, TokenKind, TokenKinds};

/// Iterator over the [`Lexeme`]s of a complete input text.
///
/// The lexer never mutates or buffers the input. Cloning it, or creating a
/// new one, restarts the scan.
#[derive(Debug, Clone)]
pub struct Lexer<'i> {
    input: &'i str,
    pos: usize,
}

impl<'i> Lexer<'i> {
    #[inline]
    pub fn new(input: &'i str) -> Self {
        Lexer { input, pos: 0 }
    }

    #[inline]
    pub fn input(&self) -> &'i str {
        self.input
    }

    /// Byte offset the next lexeme starts at.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'i> Iterator for Lexer<'i> {
    type Item = Lexeme<'i>;

    fn next(&mut self) -> Option<Lexeme<'i>> {
        let bytes = self.input.as_bytes();
        let start = self.pos;

        if start >= bytes.len() {
            return None;
        }

        let end = if bytes[start] == b'<' {
            grammar::markup(bytes, start)
        } else {
            grammar::text(bytes, start)
        };

        // NOTE: every grammar rule ends on an ASCII byte or at the end of a
        // name, so this is a no-op for any input the rules can produce.
        let end = ceil_char_boundary(self.input, end);
        let raw = &self.input[start..end];

        self.pos = end;

        let lexeme = Lexeme {
            kind: classify(raw),
            span: start..end,
            raw,
        };

        trace!(@lexeme lexeme);

        Some(lexeme)
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Classifies a single span matched by the shallow parsing expression.
pub(crate) fn classify(raw: &str) -> TokenKind {
    let bytes = raw.as_bytes();

    if bytes.first() != Some(&b'<') {
        return TokenKind::Text;
    }

    if bytes.len() < 2 || bytes[bytes.len() - 1] != b'>' {
        return TokenKind::Malformed;
    }

    match bytes[1] {
        b'/' => TokenKind::End,
        b'!' if raw.starts_with("<!--") => TokenKind::Comment,
        b'!' if raw.starts_with("<![") => TokenKind::Cdata,
        b'!' if raw.starts_with("<!DOCTYPE") => TokenKind::Doctype,
        b'!' => TokenKind::Malformed,
        b'?' => {
            let target_end = grammar::name(bytes, 2).unwrap_or(2);

            if &raw[2..target_end] == "xml" {
                TokenKind::XmlDecl
            } else {
                TokenKind::Pi
            }
        }
        _ if bytes[bytes.len() - 2] == b'/' => TokenKind::Empty,
        _ => TokenKind::Start,
    }
}

/// Lexes `markup` and returns its only lexeme if the whole string is one
/// lexeme of an accepted kind.
pub(crate) fn single_lexeme(markup: &str, accepted: TokenKinds) -> Option<Lexeme<'_>> {
    let mut lexer = Lexer::new(markup);
    let lexeme = lexer.next()?;

    if lexer.next().is_none() && accepted.contains(lexeme.kind.into()) {
        Some(lexeme)
    } else {
        None
    }
}
