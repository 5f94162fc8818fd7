use crate::lexer::{single_lexeme, TokenKind, TokenKinds};
use crate::rewritable_units::template::{self, Field};
use crate::rewritable_units::TokenError;
use std::borrow::Cow;
use std::fmt::{self, Debug};

/// A comment: `<!-- content -->`.
#[derive(Clone, PartialEq, Eq)]
pub struct Comment<'i> {
    content: Cow<'i, str>,
    raw: Option<Cow<'i, str>>,
}

impl<'i> Comment<'i> {
    pub(crate) fn from_markup(raw: &'i str) -> Self {
        Comment {
            content: Cow::Borrowed(&raw[4..raw.len() - 3]),
            raw: Some(Cow::Borrowed(raw)),
        }
    }

    pub fn parse(markup: &'i str) -> Result<Self, TokenError> {
        single_lexeme(markup, TokenKinds::COMMENT)
            .map(|lexeme| Self::from_markup(lexeme.raw))
            .ok_or_else(|| TokenError::unexpected(TokenKinds::COMMENT, markup))
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        TokenKind::Comment
    }

    /// Everything between `<!--` and `-->`, whitespace included.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    // NOTE: the content isn't checked for `--`. A rebuilt comment holding
    // one lexes as malformed markup again.
    #[inline]
    pub fn set_content(&mut self, content: &str) {
        self.content = Cow::Owned(content.to_owned());
        self.raw = None;
    }

    pub fn into_owned(self) -> Comment<'static> {
        Comment {
            content: Cow::Owned(self.content.into_owned()),
            raw: self.raw.map(|raw| Cow::Owned(raw.into_owned())),
        }
    }

    fn serialize_from_parts(&self, output_handler: &mut dyn FnMut(&str)) {
        template::render(
            TokenKind::Comment,
            &mut |field, output| {
                if field == Field::Content {
                    output(&self.content);
                }
            },
            output_handler,
        );
    }
}

impl_serialize!(Comment);

impl Debug for Comment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comment")
            .field("content", &self.content())
            .finish()
    }
}
