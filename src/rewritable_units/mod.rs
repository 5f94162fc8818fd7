//! Tokens: typed, mutable views of lexemes.
//!
//! A token borrows its markup from the input. Changing a field drops the
//! borrowed markup and marks the token dirty; the markup is rebuilt from the
//! fields and the kind's template the next time it's read. Tokens that were
//! never changed always reproduce their input byte for byte.

use crate::lexer::{single_lexeme, TokenKind, TokenKinds};
use crate::transform_stream::Serialize;
use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

pub use self::template::{reset_templates, set_template, template, TemplateError};
pub use self::tokens::*;

macro_rules! impl_serialize {
    ($Token:ident) => {
        impl<'i> $Token<'i> {
            /// `true` if a field changed since the markup was last built.
            #[inline]
            pub fn is_dirty(&self) -> bool {
                self.raw.is_none()
            }

            /// Rebuilds the markup from the fields and the current template,
            /// even if nothing changed. Rebuilding twice gives the same
            /// markup.
            #[inline]
            pub fn reserialize(&mut self) {
                self.raw = Some(Cow::Owned(self.render_from_parts()));
            }

            /// Rebuilds the markup only if the token is dirty.
            #[inline]
            pub fn ensure_fresh(&mut self) {
                if self.is_dirty() {
                    self.reserialize();
                }
            }

            /// The markup of the token, rebuilt first if it's dirty.
            pub fn xml(&mut self) -> &str {
                let raw = match self.raw.take() {
                    Some(raw) => raw,
                    None => Cow::Owned(self.render_from_parts()),
                };

                self.raw.insert(raw)
            }

            fn render_from_parts(&self) -> String {
                let mut xml = String::new();

                self.serialize_from_parts(&mut |c| xml.push_str(c));

                trace!(@rebuild self.kind(), xml);

                xml
            }
        }

        impl crate::transform_stream::Serialize for $Token<'_> {
            #[inline]
            fn to_xml(&self, output_handler: &mut dyn FnMut(&str)) {
                match &self.raw {
                    Some(raw) => output_handler(raw),
                    None => self.serialize_from_parts(output_handler),
                }
            }
        }
    };
}

mod template;
mod tokens;

const DEFAULT_DISPLAY_LIMIT: usize = 60;
const UNLIMITED: usize = usize::MAX;

static DISPLAY_LIMIT: AtomicUsize = AtomicUsize::new(DEFAULT_DISPLAY_LIMIT);

/// Sets how many characters of markup the `Debug` output of a [`Token`]
/// shows before cutting it off with `...`. `None` shows everything.
///
/// The setting is process-wide. The default is `Some(60)`.
#[inline]
pub fn set_display_limit(limit: Option<usize>) {
    DISPLAY_LIMIT.store(limit.unwrap_or(UNLIMITED), Ordering::Relaxed);
}

#[inline]
pub fn display_limit() -> Option<usize> {
    match DISPLAY_LIMIT.load(Ordering::Relaxed) {
        UNLIMITED => None,
        limit => Some(limit),
    }
}

/// An error that occurs when markup handed to a token constructor isn't
/// exactly one token of the expected kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Expected a single token of kind {expected:?}, got `{markup}`.")]
    UnexpectedMarkup { expected: TokenKinds, markup: String },
}

impl TokenError {
    #[inline]
    pub(crate) fn unexpected(expected: TokenKinds, markup: &str) -> Self {
        TokenError::UnexpectedMarkup {
            expected,
            markup: markup.to_owned(),
        }
    }
}

/// Tokens with a qualified name: start, empty and end tags.
pub trait HasName {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: &str);
    fn namespace_prefix(&self) -> &str;
    fn set_namespace_prefix(&mut self, prefix: &str);
    fn local_name(&self) -> &str;
}

/// Tokens with `name="value"` pairs: the attributes of start and empty tags,
/// and the pseudo-attributes of processing instructions.
pub trait HasAttributes {
    fn get_attribute(&self, name: &str) -> Option<&str>;

    #[inline]
    fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    fn set_attribute(&mut self, name: &str, value: &str);

    /// Deletes the attribute if present. Returns whether it was.
    fn remove_attribute(&mut self, name: &str) -> bool;
}

/// A token of any kind.
#[derive(Clone, PartialEq, Eq)]
pub enum Token<'i> {
    Text(Text<'i>),
    /// Start or empty tag.
    StartTag(StartTag<'i>),
    EndTag(EndTag<'i>),
    Comment(Comment<'i>),
    /// Processing instruction or XML declaration.
    Pi(ProcessingInstruction<'i>),
    Doctype(Doctype<'i>),
    Cdata(Cdata<'i>),
    Malformed(Malformed<'i>),
}

macro_rules! impl_from {
    ($($Type:ident => $Variant:ident),+) => {
        $(
            impl<'i> From<$Type<'i>> for Token<'i> {
                #[inline]
                fn from(token: $Type<'i>) -> Self {
                    Token::$Variant(token)
                }
            }
        )+
    };
}

impl_from!(
    Text => Text,
    StartTag => StartTag,
    EndTag => EndTag,
    Comment => Comment,
    ProcessingInstruction => Pi,
    Doctype => Doctype,
    Cdata => Cdata,
    Malformed => Malformed
);

macro_rules! dispatch {
    ($token:expr, $t:ident => $body:expr) => {
        match $token {
            Token::Text($t) => $body,
            Token::StartTag($t) => $body,
            Token::EndTag($t) => $body,
            Token::Comment($t) => $body,
            Token::Pi($t) => $body,
            Token::Doctype($t) => $body,
            Token::Cdata($t) => $body,
            Token::Malformed($t) => $body,
        }
    };
}

impl<'i> Token<'i> {
    /// Parses `markup` that must consist of exactly one lexeme, of any kind.
    pub fn parse(markup: &'i str) -> Result<Self, TokenError> {
        single_lexeme(markup, TokenKinds::all())
            .map(Token::from)
            .ok_or_else(|| TokenError::unexpected(TokenKinds::all(), markup))
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        dispatch!(self, t => t.kind())
    }

    /// `true` if the token's kind is in `kinds` and, when `names` isn't
    /// empty, its tag name or instruction target is one of `names`. Other
    /// kinds ignore `names`.
    ///
    /// ```
    /// use shallow_xml::{Token, TokenKinds};
    ///
    /// let token = Token::parse("<p/>").unwrap();
    ///
    /// assert!(token.is_a(TokenKinds::START_OR_EMPTY, &[]));
    /// assert!(token.is_a(TokenKinds::EMPTY, &["br", "p"]));
    /// assert!(!token.is_a(TokenKinds::START, &[]));
    /// ```
    pub fn is_a(&self, kinds: TokenKinds, names: &[&str]) -> bool {
        if !kinds.contains(self.kind().into()) {
            return false;
        }

        match self {
            _ if names.is_empty() => true,
            Token::StartTag(t) => names.contains(&t.name()),
            Token::EndTag(t) => names.contains(&t.name()),
            Token::Pi(t) => names.contains(&t.target()),
            _ => true,
        }
    }

    /// The tag name of start, empty and end tags.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.as_named().map(HasName::name)
    }

    #[inline]
    pub fn as_named(&self) -> Option<&dyn HasName> {
        match self {
            Token::StartTag(t) => Some(t),
            Token::EndTag(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_named_mut(&mut self) -> Option<&mut dyn HasName> {
        match self {
            Token::StartTag(t) => Some(t),
            Token::EndTag(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_attributes(&self) -> Option<&dyn HasAttributes> {
        match self {
            Token::StartTag(t) => Some(t),
            Token::Pi(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_attributes_mut(&mut self) -> Option<&mut dyn HasAttributes> {
        match self {
            Token::StartTag(t) => Some(t),
            Token::Pi(t) => Some(t),
            _ => None,
        }
    }

    /// The markup of the token, rebuilt first if it's dirty.
    #[inline]
    pub fn xml(&mut self) -> &str {
        dispatch!(self, t => t.xml())
    }

    /// Always `false` for text and malformed markup, which are emitted as
    /// stored.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        dispatch!(self, t => t.is_dirty())
    }

    pub fn reserialize(&mut self) {
        match self {
            Token::StartTag(t) => t.reserialize(),
            Token::EndTag(t) => t.reserialize(),
            Token::Comment(t) => t.reserialize(),
            Token::Pi(t) => t.reserialize(),
            Token::Doctype(t) => t.reserialize(),
            Token::Cdata(t) => t.reserialize(),
            Token::Text(_) | Token::Malformed(_) => (),
        }
    }

    #[inline]
    pub fn ensure_fresh(&mut self) {
        if self.is_dirty() {
            self.reserialize();
        }
    }

    // NOTE: not a `ToOwned` implementation due to the `Borrow` constraint
    // of the `Owned` associated type.
    pub fn into_owned(self) -> Token<'static> {
        match self {
            Token::Text(t) => Token::Text(t.into_owned()),
            Token::StartTag(t) => Token::StartTag(t.into_owned()),
            Token::EndTag(t) => Token::EndTag(t.into_owned()),
            Token::Comment(t) => Token::Comment(t.into_owned()),
            Token::Pi(t) => Token::Pi(t.into_owned()),
            Token::Doctype(t) => Token::Doctype(t.into_owned()),
            Token::Cdata(t) => Token::Cdata(t.into_owned()),
            Token::Malformed(t) => Token::Malformed(t.into_owned()),
        }
    }
}

impl Serialize for Token<'_> {
    #[inline]
    fn to_xml(&self, output_handler: &mut dyn FnMut(&str)) {
        dispatch!(self, t => t.to_xml(output_handler))
    }
}

/// Renders as `Kind("markup")`, e.g. `Start("<p>")`, with the markup cut to
/// the [`display_limit`].
impl Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml_string();

        let shown = match display_limit().and_then(|limit| xml.char_indices().nth(limit)) {
            Some((idx, _)) => Cow::Owned(format!("{}...", &xml[..idx])),
            None => Cow::Borrowed(xml.as_str()),
        };

        write!(f, "{:?}({:?})", self.kind(), shown)
    }
}
