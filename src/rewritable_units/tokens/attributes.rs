use crate::base::replace_char;
use crate::lexer::grammar::{self, AttributeOutline};
use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::{iter, slice};

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Finds the attribute-like pairs in free-form text, yielding each match with
/// the offset its leading whitespace starts at. The first pair may start the
/// text without whitespace.
pub(crate) fn pseudo_attribute_outlines(
    text: &str,
) -> impl Iterator<Item = (usize, AttributeOutline)> + '_ {
    let bytes = text.as_bytes();
    let mut pos = 0;

    iter::from_fn(move || {
        while pos < bytes.len() {
            let start = pos;

            match grammar::attribute_outline(bytes, pos, pos > 0) {
                Some(outline) => {
                    pos = outline.end;

                    return Some((start, outline));
                }
                None => pos += text[pos..].chars().next().map_or(1, char::len_utf8),
            }
        }

        None
    })
}

/// A single `name="value"` pair.
///
/// The value is stored exactly as written between the quotes. Entity and
/// character references are not decoded.
#[derive(Clone, PartialEq, Eq)]
pub struct Attribute<'i> {
    name: Cow<'i, str>,
    value: Cow<'i, str>,
}

impl<'i> Attribute<'i> {
    #[inline]
    pub fn new(name: impl Into<Cow<'i, str>>, value: impl Into<Cow<'i, str>>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn into_owned(self) -> Attribute<'static> {
        Attribute {
            name: Cow::Owned(self.name.into_owned()),
            value: Cow::Owned(self.value.into_owned()),
        }
    }

    /// Writes ` name="value"`, escaping `"` in the value.
    #[inline]
    pub fn to_xml(&self, output_handler: &mut dyn FnMut(&str)) {
        output_handler(" ");
        output_handler(&self.name);
        output_handler("=\"");
        replace_char(&self.value, (b'"', "&quot;"), output_handler);
        output_handler("\"");
    }
}

impl Debug for Attribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name())
            .field("value", &self.value())
            .finish()
    }
}

/// Ordered attribute collection of a start tag, or the pseudo-attributes of a
/// processing instruction.
///
/// Order is the document order. Setting an existing attribute keeps its
/// position, new attributes are appended.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Attributes<'i> {
    items: Vec<Attribute<'i>>,
}

impl<'i> Attributes<'i> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the attribute section of a start tag: a contiguous run of
    /// whitespace-prefixed attributes starting at `pos`.
    pub(crate) fn parse_tag_attributes(markup: &'i str, mut pos: usize) -> Self {
        let bytes = markup.as_bytes();
        let mut attributes = Attributes::new();

        while let Some(outline) = grammar::attribute_outline(bytes, pos, true) {
            attributes.insert(
                Cow::Borrowed(&markup[outline.name.clone()]),
                Cow::Borrowed(&markup[outline.value.clone()]),
            );

            pos = outline.end;
        }

        attributes
    }

    /// Collects every `name="value"` pair found anywhere in `text`. Runs of
    /// text that don't form an attribute are skipped.
    pub(crate) fn scan_pseudo_attributes(text: &'i str) -> Self {
        let mut attributes = Attributes::new();

        for (_, outline) in pseudo_attribute_outlines(text) {
            attributes.insert(
                Cow::Borrowed(&text[outline.name]),
                Cow::Borrowed(&text[outline.value]),
            );
        }

        attributes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Attribute<'i>> {
        self.items.iter()
    }

    #[inline]
    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|a| a.name() == name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Like [`contains`](Self::contains), but compares names after Unicode
    /// lowercasing.
    #[inline]
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.items.iter().any(|a| eq_ignore_case(a.name(), name))
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.items[idx].value())
    }

    #[inline]
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|a| eq_ignore_case(a.name(), name))
            .map(Attribute::value)
    }

    fn insert(&mut self, name: Cow<'i, str>, value: Cow<'i, str>) {
        match self.position(&name) {
            Some(idx) => self.items[idx].value = value,
            None => self.items.push(Attribute { name, value }),
        }
    }

    /// Sets the value of `name`, appending the attribute if it's new.
    #[inline]
    pub fn set(&mut self, name: &str, value: impl Into<Cow<'i, str>>) {
        match self.position(name) {
            Some(idx) => self.items[idx].value = value.into(),
            None => self.items.push(Attribute {
                name: Cow::Owned(name.to_owned()),
                value: value.into(),
            }),
        }
    }

    /// Removes `name` and returns its value, if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Cow<'i, str>> {
        self.position(name)
            .map(|idx| self.items.remove(idx).value)
    }

    /// Reorders the attributes: names in `priority` come first in that order,
    /// the rest keep their relative order, or are sorted by lowercased name
    /// if `sort` is set. Names in `priority` that aren't present are ignored.
    pub fn set_order(&mut self, priority: &[&str], sort: bool) {
        let mut rest = std::mem::take(&mut self.items);
        let mut ordered = Vec::with_capacity(rest.len());

        for name in priority {
            if let Some(idx) = rest.iter().position(|a| a.name() == *name) {
                ordered.push(rest.remove(idx));
            }
        }

        if sort {
            rest.sort_by_cached_key(|a| a.name().to_lowercase());
        }

        ordered.extend(rest);

        self.items = ordered;
    }

    #[inline]
    pub fn to_xml(&self, output_handler: &mut dyn FnMut(&str)) {
        for attribute in &self.items {
            attribute.to_xml(output_handler);
        }
    }

    pub fn into_owned(self) -> Attributes<'static> {
        Attributes {
            items: self.items.into_iter().map(Attribute::into_owned).collect(),
        }
    }
}

impl<'a, 'i> IntoIterator for &'a Attributes<'i> {
    type Item = &'a Attribute<'i>;
    type IntoIter = slice::Iter<'a, Attribute<'i>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'i> FromIterator<Attribute<'i>> for Attributes<'i> {
    fn from_iter<T: IntoIterator<Item = Attribute<'i>>>(iter: T) -> Self {
        let mut attributes = Attributes::new();

        for Attribute { name, value } in iter {
            attributes.insert(name, value);
        }

        attributes
    }
}

impl Debug for Attributes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.items.iter().map(|a| (a.name(), a.value())))
            .finish()
    }
}
