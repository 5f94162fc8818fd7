use super::Text;
use crate::base::replace_char2;
use crate::lexer::{single_lexeme, TokenKind, TokenKinds};
use crate::rewritable_units::template::{self, Field};
use crate::rewritable_units::TokenError;
use std::borrow::Cow;
use std::fmt::{self, Debug};

/// A CDATA section: `<![CDATA[content]]>`.
#[derive(Clone, PartialEq, Eq)]
pub struct Cdata<'i> {
    content: Cow<'i, str>,
    raw: Option<Cow<'i, str>>,
}

impl<'i> Cdata<'i> {
    pub(crate) fn from_markup(raw: &'i str) -> Self {
        Cdata {
            content: Cow::Borrowed(&raw[9..raw.len() - 3]),
            raw: Some(Cow::Borrowed(raw)),
        }
    }

    pub fn parse(markup: &'i str) -> Result<Self, TokenError> {
        single_lexeme(markup, TokenKinds::CDATA)
            .map(|lexeme| Self::from_markup(lexeme.raw))
            .ok_or_else(|| TokenError::unexpected(TokenKinds::CDATA, markup))
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        TokenKind::Cdata
    }

    /// The literal content between `<![CDATA[` and `]]>`.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    pub fn set_content(&mut self, content: &str) {
        self.content = Cow::Owned(content.to_owned());
        self.raw = None;
    }

    /// The content with `&` and `<` escaped, so it can stand as text.
    pub fn escaped_content(&self) -> String {
        let mut escaped = String::with_capacity(self.content.len());

        replace_char2(
            &self.content,
            (b'&', "&amp;"),
            (b'<', "&lt;"),
            &mut |c| escaped.push_str(c),
        );

        escaped
    }

    /// Replaces the section with a text token holding the escaped content.
    #[inline]
    pub fn to_text_token(&self) -> Text<'static> {
        Text::new(self.escaped_content())
    }

    pub fn into_owned(self) -> Cdata<'static> {
        Cdata {
            content: Cow::Owned(self.content.into_owned()),
            raw: self.raw.map(|raw| Cow::Owned(raw.into_owned())),
        }
    }

    fn serialize_from_parts(&self, output_handler: &mut dyn FnMut(&str)) {
        template::render(
            TokenKind::Cdata,
            &mut |field, output| {
                if field == Field::Content {
                    output(&self.content);
                }
            },
            output_handler,
        );
    }
}

impl_serialize!(Cdata);

impl Debug for Cdata<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cdata")
            .field("content", &self.content())
            .finish()
    }
}
