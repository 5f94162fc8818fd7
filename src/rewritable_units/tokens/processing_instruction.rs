use super::attributes::pseudo_attribute_outlines;
use super::{Attribute, Attributes};
use crate::lexer::{grammar, single_lexeme, TokenKind, TokenKinds};
use crate::rewritable_units::template::{self, Field};
use crate::rewritable_units::{HasAttributes, TokenError};
use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::ops::Range;

/// A processing instruction, `<?target instruction?>`, or an XML
/// declaration, `<?xml version="1.0"?>`.
///
/// The XML declaration is the instruction whose target was exactly `xml`
/// when it was lexed. [`kind`](Self::kind) reports which one the token is,
/// and each kind has its own rebuild template.
///
/// Instructions often carry `name="value"` pairs (e.g. `<?xml-stylesheet
/// href="a.xsl"?>`). These pseudo-attributes are parsed from the instruction
/// on every read and can be set or removed in place.
#[derive(Clone, PartialEq, Eq)]
pub struct ProcessingInstruction<'i> {
    target: Cow<'i, str>,
    instruction: Cow<'i, str>,
    kind: TokenKind,
    raw: Option<Cow<'i, str>>,
}

impl<'i> ProcessingInstruction<'i> {
    pub(crate) fn from_markup(raw: &'i str, kind: TokenKind) -> Self {
        let end = if raw.ends_with("?>") {
            raw.len() - 2
        } else {
            raw.len() - 1
        };

        let body = &raw[2..end];

        let (target, instruction) = match body
            .as_bytes()
            .iter()
            .position(|&b| grammar::is_whitespace(b))
        {
            Some(idx) => (&body[..idx], &body[idx..]),
            None => (body, ""),
        };

        ProcessingInstruction {
            target: Cow::Borrowed(target.trim()),
            instruction: Cow::Borrowed(instruction.trim()),
            kind,
            raw: Some(Cow::Borrowed(raw)),
        }
    }

    /// Parses `markup` that must consist of exactly one processing
    /// instruction or XML declaration.
    pub fn parse(markup: &'i str) -> Result<Self, TokenError> {
        single_lexeme(markup, TokenKinds::PROCESSING_INSTRUCTIONS)
            .map(|lexeme| Self::from_markup(lexeme.raw, lexeme.kind))
            .ok_or_else(|| TokenError::unexpected(TokenKinds::PROCESSING_INSTRUCTIONS, markup))
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    #[inline]
    pub fn is_xml_decl(&self) -> bool {
        self.kind == TokenKind::XmlDecl
    }

    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[inline]
    pub fn set_target(&mut self, target: &str) {
        self.target = Cow::Owned(target.to_owned());
        self.raw = None;
    }

    #[inline]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    #[inline]
    pub fn set_instruction(&mut self, instruction: &str) {
        self.instruction = Cow::Owned(instruction.to_owned());
        self.raw = None;
    }

    /// The pseudo-attributes found in the instruction. Later duplicates win.
    #[inline]
    pub fn pseudo_attributes(&self) -> Attributes<'_> {
        Attributes::scan_pseudo_attributes(&self.instruction)
    }

    pub fn get_pseudo_attribute(&self, name: &str) -> Option<&str> {
        let instruction: &str = &self.instruction;

        pseudo_attribute_outlines(instruction)
            .filter(|(_, outline)| &instruction[outline.name.clone()] == name)
            .last()
            .map(|(_, outline)| &instruction[outline.value])
    }

    #[inline]
    pub fn has_pseudo_attribute(&self, name: &str) -> bool {
        self.pseudo_attribute_span(name).is_some()
    }

    /// Rewrites the pair in place, or appends ` name="value"` to the
    /// instruction if there's none.
    pub fn set_pseudo_attribute(&mut self, name: &str, value: &str) {
        let mut rendered = String::new();

        Attribute::new(name, value).to_xml(&mut |c| rendered.push_str(c));

        let mut instruction = self.instruction.to_string();

        match self.pseudo_attribute_span(name) {
            Some(span) => instruction.replace_range(span, &rendered),
            None => instruction.push_str(&rendered),
        }

        self.replace_instruction(instruction);
    }

    /// Cuts the pair, with its leading whitespace, out of the instruction.
    pub fn remove_pseudo_attribute(&mut self, name: &str) -> bool {
        let Some(span) = self.pseudo_attribute_span(name) else {
            return false;
        };

        let mut instruction = self.instruction.to_string();

        instruction.replace_range(span, "");
        self.replace_instruction(instruction);

        true
    }

    fn pseudo_attribute_span(&self, name: &str) -> Option<Range<usize>> {
        let instruction: &str = &self.instruction;

        pseudo_attribute_outlines(instruction)
            .filter(|(_, outline)| &instruction[outline.name.clone()] == name)
            .last()
            .map(|(start, outline)| start..outline.end)
    }

    fn replace_instruction(&mut self, instruction: String) {
        let trimmed = instruction.trim_start();

        self.instruction = if trimmed.len() == instruction.len() {
            Cow::Owned(instruction)
        } else {
            Cow::Owned(trimmed.to_owned())
        };

        self.raw = None;
    }

    pub fn into_owned(self) -> ProcessingInstruction<'static> {
        ProcessingInstruction {
            target: Cow::Owned(self.target.into_owned()),
            instruction: Cow::Owned(self.instruction.into_owned()),
            kind: self.kind,
            raw: self.raw.map(|raw| Cow::Owned(raw.into_owned())),
        }
    }

    fn serialize_from_parts(&self, output_handler: &mut dyn FnMut(&str)) {
        let instruction = self.instruction.trim_start();

        template::render(
            self.kind,
            &mut |field, output| match field {
                Field::Target => output(&self.target),
                Field::Space if !instruction.is_empty() => output(" "),
                Field::Instruction => output(instruction),
                _ => (),
            },
            output_handler,
        );
    }
}

impl_serialize!(ProcessingInstruction);

impl HasAttributes for ProcessingInstruction<'_> {
    #[inline]
    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.get_pseudo_attribute(name)
    }

    #[inline]
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.set_pseudo_attribute(name, value)
    }

    #[inline]
    fn remove_attribute(&mut self, name: &str) -> bool {
        self.remove_pseudo_attribute(name)
    }
}

impl Debug for ProcessingInstruction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessingInstruction")
            .field("kind", &self.kind)
            .field("target", &self.target())
            .field("instruction", &self.instruction())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_into_target_and_instruction() {
        let pi = ProcessingInstruction::parse("<?php  echo 1; ?>").unwrap();

        assert_eq!(pi.kind(), TokenKind::Pi);
        assert_eq!(pi.target(), "php");
        assert_eq!(pi.instruction(), "echo 1;");

        let pi = ProcessingInstruction::parse("<?bare?>").unwrap();

        assert_eq!(pi.target(), "bare");
        assert_eq!(pi.instruction(), "");
    }

    #[test]
    fn xml_declaration() {
        let decl =
            ProcessingInstruction::parse(r#"<?xml version="1.0" encoding='utf-8'?>"#).unwrap();

        assert!(decl.is_xml_decl());
        assert_eq!(decl.kind(), TokenKind::XmlDecl);
        assert_eq!(decl.get_pseudo_attribute("encoding"), Some("utf-8"));
        assert_eq!(decl.get_pseudo_attribute("standalone"), None);
    }

    #[test]
    fn pseudo_attributes_are_read_from_the_instruction() {
        let pi = ProcessingInstruction::parse(
            r#"<?xml-stylesheet type="text/xsl" href="style.xsl"?>"#,
        )
        .unwrap();

        let attributes = pi.pseudo_attributes();
        let names: Vec<_> = attributes.iter().map(Attribute::name).collect();

        assert_eq!(names, ["type", "href"]);
        assert!(pi.has_pseudo_attribute("href"));
        assert!(!pi.has_pseudo_attribute("media"));
    }

    #[test]
    fn set_existing_pseudo_attribute_in_place() {
        let mut pi =
            ProcessingInstruction::parse(r#"<?pi keep a='1' this b="2"?>"#).unwrap();

        pi.set_pseudo_attribute("a", "x");

        assert_eq!(pi.instruction(), r#"keep a="x" this b="2""#);
        assert_eq!(pi.xml(), r#"<?pi keep a="x" this b="2"?>"#);
    }

    #[test]
    fn set_new_pseudo_attribute_appends() {
        let mut pi = ProcessingInstruction::parse("<?pi?>").unwrap();

        pi.set_pseudo_attribute("href", "a.css");
        assert_eq!(pi.xml(), r#"<?pi href="a.css"?>"#);

        pi.set_pseudo_attribute("type", "text/css");
        assert_eq!(pi.xml(), r#"<?pi href="a.css" type="text/css"?>"#);
    }

    #[test]
    fn remove_pseudo_attribute() {
        let mut decl =
            ProcessingInstruction::parse(r#"<?xml version="1.0" standalone="yes"?>"#).unwrap();

        assert!(!decl.remove_pseudo_attribute("encoding"));
        assert!(!decl.is_dirty());

        assert!(decl.remove_pseudo_attribute("version"));
        assert_eq!(decl.xml(), r#"<?xml standalone="yes"?>"#);

        assert!(decl.remove_pseudo_attribute("standalone"));
        assert_eq!(decl.xml(), "<?xml?>");
    }

    #[test]
    fn space_separates_non_empty_instruction() {
        let mut pi = ProcessingInstruction::parse("<?a b?>").unwrap();

        pi.set_instruction("  c");
        assert_eq!(pi.xml(), "<?a c?>");

        pi.set_instruction("");
        pi.set_target("t");
        assert_eq!(pi.xml(), "<?t?>");
    }

    #[test]
    fn rejects_other_markup() {
        assert!(ProcessingInstruction::parse("<? pi?>").is_err());
        assert!(ProcessingInstruction::parse("<p>").is_err());
    }
}
