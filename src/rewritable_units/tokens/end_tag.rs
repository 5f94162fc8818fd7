use crate::lexer::{single_lexeme, TokenKind, TokenKinds};
use crate::rewritable_units::template::{self, Field};
use crate::rewritable_units::TokenError;
use std::borrow::Cow;
use std::fmt::{self, Debug};

/// An end tag: `</p>`.
#[derive(Clone, PartialEq, Eq)]
pub struct EndTag<'i> {
    name: Cow<'i, str>,
    raw: Option<Cow<'i, str>>,
}

impl<'i> EndTag<'i> {
    pub(crate) fn from_markup(raw: &'i str) -> Self {
        EndTag {
            name: Cow::Borrowed(raw[2..raw.len() - 1].trim()),
            raw: Some(Cow::Borrowed(raw)),
        }
    }

    /// Parses `markup` that must consist of exactly one end tag.
    pub fn parse(markup: &'i str) -> Result<Self, TokenError> {
        single_lexeme(markup, TokenKinds::END)
            .map(|lexeme| Self::from_markup(lexeme.raw))
            .ok_or_else(|| TokenError::unexpected(TokenKinds::END, markup))
    }

    /// Builds an end tag for `name`. It starts out dirty.
    pub fn new(name: &str) -> Self {
        EndTag {
            name: Cow::Owned(name.to_owned()),
            raw: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        TokenKind::End
    }

    pub fn into_owned(self) -> EndTag<'static> {
        EndTag {
            name: Cow::Owned(self.name.into_owned()),
            raw: self.raw.map(|raw| Cow::Owned(raw.into_owned())),
        }
    }

    fn serialize_from_parts(&self, output_handler: &mut dyn FnMut(&str)) {
        template::render(
            TokenKind::End,
            &mut |field, output| {
                if field == Field::Name {
                    output(&self.name);
                }
            },
            output_handler,
        );
    }
}

impl_name_api!(EndTag);
impl_serialize!(EndTag);

impl Debug for EndTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndTag")
            .field("name", &self.name())
            .finish()
    }
}
