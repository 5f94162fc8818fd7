use super::Attributes;
use crate::lexer::{grammar, single_lexeme, TokenKind, TokenKinds};
use crate::rewritable_units::template::{self, Field};
use crate::rewritable_units::{HasAttributes, TokenError};
use std::borrow::Cow;
use std::fmt::{self, Debug};

/// A start tag (`<p id="x">`) or an empty tag (`<br/>`).
///
/// Both kinds share the type; [`self_closing`](Self::self_closing) tells them
/// apart and [`kind`](Self::kind) reports [`TokenKind::Start`] or
/// [`TokenKind::Empty`] accordingly.
#[derive(Clone, PartialEq, Eq)]
pub struct StartTag<'i> {
    name: Cow<'i, str>,
    attributes: Attributes<'i>,
    self_closing: bool,
    raw: Option<Cow<'i, str>>,
}

impl<'i> StartTag<'i> {
    pub(crate) fn from_markup(raw: &'i str, self_closing: bool) -> Self {
        let name_end = grammar::name(raw.as_bytes(), 1).unwrap_or(1);

        StartTag {
            name: Cow::Borrowed(&raw[1..name_end]),
            attributes: Attributes::parse_tag_attributes(raw, name_end),
            self_closing,
            raw: Some(Cow::Borrowed(raw)),
        }
    }

    /// Parses `markup` that must consist of exactly one start or empty tag.
    pub fn parse(markup: &'i str) -> Result<Self, TokenError> {
        match single_lexeme(markup, TokenKinds::START_OR_EMPTY) {
            Some(lexeme) => Ok(Self::from_markup(
                lexeme.raw,
                lexeme.kind == TokenKind::Empty,
            )),
            None => Err(TokenError::unexpected(TokenKinds::START_OR_EMPTY, markup)),
        }
    }

    /// Builds a tag from its parts. It has no markup yet, so it starts out
    /// dirty.
    pub fn new(name: &str, attributes: Attributes<'i>, self_closing: bool) -> Self {
        StartTag {
            name: Cow::Owned(name.to_owned()),
            attributes,
            self_closing,
            raw: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        if self.self_closing {
            TokenKind::Empty
        } else {
            TokenKind::Start
        }
    }

    #[inline]
    pub fn self_closing(&self) -> bool {
        self.self_closing
    }

    /// Switches between `<name>` and `<name/>`.
    #[inline]
    pub fn set_self_closing(&mut self, self_closing: bool) {
        if self.self_closing != self_closing {
            self.self_closing = self_closing;
            self.raw = None;
        }
    }

    #[inline]
    pub fn attributes(&self) -> &Attributes<'i> {
        &self.attributes
    }

    /// Mutable access to the attributes. The tag is marked dirty up front.
    #[inline]
    pub fn attributes_mut(&mut self) -> &mut Attributes<'i> {
        self.raw = None;

        &mut self.attributes
    }

    #[inline]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    #[inline]
    pub fn get_attribute_ignore_case(&self, name: &str) -> Option<&str> {
        self.attributes.get_ignore_case(name)
    }

    #[inline]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    #[inline]
    pub fn has_attribute_ignore_case(&self, name: &str) -> bool {
        self.attributes.contains_ignore_case(name)
    }

    #[inline]
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.set(name, value.to_owned());
        self.raw = None;
    }

    /// Removes the attribute if it's present. Returns `false` and leaves the
    /// tag clean otherwise.
    #[inline]
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let removed = self.attributes.remove(name).is_some();

        if removed {
            self.raw = None;
        }

        removed
    }

    /// See [`Attributes::set_order`].
    #[inline]
    pub fn set_attribute_order(&mut self, priority: &[&str], sort: bool) {
        self.attributes.set_order(priority, sort);
        self.raw = None;
    }

    pub fn into_owned(self) -> StartTag<'static> {
        StartTag {
            name: Cow::Owned(self.name.into_owned()),
            attributes: self.attributes.into_owned(),
            self_closing: self.self_closing,
            raw: self.raw.map(|raw| Cow::Owned(raw.into_owned())),
        }
    }

    fn serialize_from_parts(&self, output_handler: &mut dyn FnMut(&str)) {
        template::render(
            self.kind(),
            &mut |field, output| match field {
                Field::Name => output(&self.name),
                Field::Attributes => self.attributes.to_xml(output),
                _ => (),
            },
            output_handler,
        );
    }
}

impl_name_api!(StartTag);
impl_serialize!(StartTag);

impl HasAttributes for StartTag<'_> {
    #[inline]
    fn get_attribute(&self, name: &str) -> Option<&str> {
        Self::get_attribute(self, name)
    }

    #[inline]
    fn set_attribute(&mut self, name: &str, value: &str) {
        Self::set_attribute(self, name, value)
    }

    #[inline]
    fn remove_attribute(&mut self, name: &str) -> bool {
        Self::remove_attribute(self, name)
    }
}

impl Debug for StartTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartTag")
            .field("name", &self.name())
            .field("attributes", &self.attributes)
            .field("self_closing", &self.self_closing)
            .finish()
    }
}
