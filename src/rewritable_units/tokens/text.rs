use crate::lexer::TokenKind;
use crate::transform_stream::Serialize;
use std::borrow::Cow;
use std::fmt::{self, Debug};

/// A run of character data that doesn't contain `<`.
///
/// Text is emitted as is: there's no template and no dirty state, the stored
/// text is the markup.
#[derive(Clone, PartialEq, Eq)]
pub struct Text<'i> {
    text: Cow<'i, str>,
}

impl<'i> Text<'i> {
    #[inline]
    pub fn new(text: impl Into<Cow<'i, str>>) -> Self {
        Text { text: text.into() }
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        TokenKind::Text
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn set_text(&mut self, text: &str) {
        self.text = Cow::Owned(text.to_owned());
    }

    /// `true` if the text is non-empty and consists of whitespace only.
    #[inline]
    pub fn is_whitespace(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_whitespace)
    }

    #[inline]
    pub fn xml(&mut self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        false
    }

    #[inline]
    pub fn into_owned(self) -> Text<'static> {
        Text {
            text: Cow::Owned(self.text.into_owned()),
        }
    }
}

impl Serialize for Text<'_> {
    #[inline]
    fn to_xml(&self, output_handler: &mut dyn FnMut(&str)) {
        output_handler(&self.text);
    }
}

impl Debug for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Text").field("text", &self.as_str()).finish()
    }
}
