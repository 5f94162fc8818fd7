use crate::lexer::TokenKind;
use crate::transform_stream::Serialize;
use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::ops::Range;

/// Markup that starts with `<` but was never closed by `>`.
///
/// It's passed through verbatim. `span` is where it was found in the input.
#[derive(Clone, PartialEq, Eq)]
pub struct Malformed<'i> {
    markup: Cow<'i, str>,
    span: Range<usize>,
}

impl<'i> Malformed<'i> {
    #[inline]
    pub fn new(markup: impl Into<Cow<'i, str>>, span: Range<usize>) -> Self {
        Malformed {
            markup: markup.into(),
            span,
        }
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        TokenKind::Malformed
    }

    /// Byte offsets of the markup in the tokenized input.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.markup
    }

    /// Replaces the markup, e.g. with a repaired version. The span keeps
    /// pointing at the original input.
    #[inline]
    pub fn set_markup(&mut self, markup: &str) {
        self.markup = Cow::Owned(markup.to_owned());
    }

    #[inline]
    pub fn xml(&mut self) -> &str {
        &self.markup
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        false
    }

    #[inline]
    pub fn into_owned(self) -> Malformed<'static> {
        Malformed {
            markup: Cow::Owned(self.markup.into_owned()),
            span: self.span,
        }
    }
}

impl Serialize for Malformed<'_> {
    #[inline]
    fn to_xml(&self, output_handler: &mut dyn FnMut(&str)) {
        output_handler(&self.markup);
    }
}

impl Debug for Malformed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Malformed")
            .field("markup", &self.as_str())
            .field("span", &self.span)
            .finish()
    }
}
