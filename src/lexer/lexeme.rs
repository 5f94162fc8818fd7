use bitflags::bitflags;
use std::fmt::{self, Display};
use std::ops::Range;

/// Lexical class of a piece of input.
///
/// The set is closed: every lexeme and every token is exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of characters that doesn't contain `<`.
    Text,
    /// `<name attr="value">`
    Start,
    /// `<name attr="value"/>`
    Empty,
    /// `</name>`
    End,
    /// `<!--content-->`
    Comment,
    /// `<?target instruction?>`
    Pi,
    /// `<?xml version="1.0"?>`
    XmlDecl,
    /// `<!DOCTYPE ...>`
    Doctype,
    /// `<![CDATA[content]]>`
    Cdata,
    /// Markup that starts with `<` but never reaches its closing `>`.
    Malformed,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Text => "text",
            TokenKind::Start => "start tag",
            TokenKind::Empty => "empty tag",
            TokenKind::End => "end tag",
            TokenKind::Comment => "comment",
            TokenKind::Pi => "processing instruction",
            TokenKind::XmlDecl => "XML declaration",
            TokenKind::Doctype => "DOCTYPE declaration",
            TokenKind::Cdata => "CDATA section",
            TokenKind::Malformed => "malformed markup",
        })
    }
}

bitflags! {
    /// A set of [`TokenKind`]s, used to select tokens in filters and in
    /// [`concatenate`](crate::concatenate).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenKinds: u16 {
        const TEXT = 0b0000_0000_0001;
        const START = 0b0000_0000_0010;
        const EMPTY = 0b0000_0000_0100;
        const END = 0b0000_0000_1000;
        const COMMENT = 0b0000_0001_0000;
        const PI = 0b0000_0010_0000;
        const XML_DECL = 0b0000_0100_0000;
        const DOCTYPE = 0b0000_1000_0000;
        const CDATA = 0b0001_0000_0000;
        const MALFORMED = 0b0010_0000_0000;

        const START_OR_EMPTY = Self::START.bits() | Self::EMPTY.bits();
        const TAGS = Self::START_OR_EMPTY.bits() | Self::END.bits();
        const PROCESSING_INSTRUCTIONS = Self::PI.bits() | Self::XML_DECL.bits();
    }
}

impl From<TokenKind> for TokenKinds {
    #[inline]
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Text => TokenKinds::TEXT,
            TokenKind::Start => TokenKinds::START,
            TokenKind::Empty => TokenKinds::EMPTY,
            TokenKind::End => TokenKinds::END,
            TokenKind::Comment => TokenKinds::COMMENT,
            TokenKind::Pi => TokenKinds::PI,
            TokenKind::XmlDecl => TokenKinds::XML_DECL,
            TokenKind::Doctype => TokenKinds::DOCTYPE,
            TokenKind::Cdata => TokenKinds::CDATA,
            TokenKind::Malformed => TokenKinds::MALFORMED,
        }
    }
}

/// One classified span of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<'i> {
    pub kind: TokenKind,
    /// Byte offsets of the lexeme in the input.
    pub span: Range<usize>,
    pub raw: &'i str,
}
