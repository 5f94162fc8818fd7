//! Rebuild templates.
//!
//! Every structured token kind rebuilds its markup from one template, e.g.
//! `<{name}{attrs}/>` for empty tags. Templates are process-wide: overriding
//! one changes how every token of that kind is rebuilt from then on, in every
//! thread. Tokens that weren't mutated keep their original markup and are not
//! affected.

use crate::lexer::TokenKind;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use thiserror::Error;

/// An error that occurs when a template override is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Text and malformed markup tokens are never rebuilt.
    #[error("{0} tokens are not rebuilt from a template.")]
    NotTemplated(TokenKind),

    /// The template refers to a field the token kind doesn't have.
    #[error("{kind} templates have no `{{{field}}}` field.")]
    UnknownField { kind: TokenKind, field: String },

    /// A `{` without a matching `}`, or a lone `}`. Literal braces are
    /// written as `{{` and `}}`.
    #[error("Unbalanced brace in template `{0}`.")]
    UnbalancedBrace(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Name,
    Attributes,
    Content,
    Target,
    Space,
    Instruction,
    DocumentElement,
    ExternalId,
    InternalSubset,
}

impl Field {
    fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Attributes => "attrs",
            Field::Content => "content",
            Field::Target => "target",
            Field::Space => "space",
            Field::Instruction => "instruction",
            Field::DocumentElement => "document_element",
            Field::ExternalId => "external_id",
            Field::InternalSubset => "internal_subset",
        }
    }

    fn available_for(kind: TokenKind) -> &'static [Field] {
        match kind {
            TokenKind::Start | TokenKind::Empty => &[Field::Name, Field::Attributes],
            TokenKind::End => &[Field::Name],
            TokenKind::Comment | TokenKind::Cdata => &[Field::Content],
            TokenKind::Pi | TokenKind::XmlDecl => {
                &[Field::Target, Field::Space, Field::Instruction]
            }
            TokenKind::Doctype => &[
                Field::DocumentElement,
                Field::ExternalId,
                Field::InternalSubset,
            ],
            TokenKind::Text | TokenKind::Malformed => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template {
    segments: Vec<Segment>,
}

impl Template {
    fn from_segments(segments: &[(&str, Option<Field>)]) -> Self {
        let segments = segments
            .iter()
            .flat_map(|&(literal, field)| {
                let literal = (!literal.is_empty()).then(|| Segment::Literal(literal.to_owned()));

                literal.into_iter().chain(field.map(Segment::Field))
            })
            .collect();

        Template { segments }
    }

    fn parse(kind: TokenKind, source: &str) -> Result<Self, TemplateError> {
        let fields = Field::available_for(kind);

        if fields.is_empty() {
            return Err(TemplateError::NotTemplated(kind));
        }

        let unbalanced = || TemplateError::UnbalancedBrace(source.to_owned());
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();

                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => return Err(unbalanced()),
                            Some(ch) => name.push(ch),
                        }
                    }

                    let field = fields
                        .iter()
                        .copied()
                        .find(|f| f.as_str() == name)
                        .ok_or_else(|| TemplateError::UnknownField {
                            kind,
                            field: name.clone(),
                        })?;

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }

                    segments.push(Segment::Field(field));
                }
                '}' => return Err(unbalanced()),
                ch => literal.push(ch),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Template { segments })
    }

    fn source(&self) -> String {
        let mut source = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => {
                    source.push_str(&literal.replace('{', "{{").replace('}', "}}"));
                }
                Segment::Field(field) => {
                    source.push('{');
                    source.push_str(field.as_str());
                    source.push('}');
                }
            }
        }

        source
    }

    pub(crate) fn render(
        &self,
        fields: &mut dyn FnMut(Field, &mut dyn FnMut(&str)),
        output_handler: &mut dyn FnMut(&str),
    ) {
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => output_handler(literal),
                Segment::Field(field) => fields(*field, output_handler),
            }
        }
    }
}

struct Templates {
    start: Arc<Template>,
    empty: Arc<Template>,
    end: Arc<Template>,
    comment: Arc<Template>,
    pi: Arc<Template>,
    xml_decl: Arc<Template>,
    doctype: Arc<Template>,
    cdata: Arc<Template>,
}

impl Default for Templates {
    fn default() -> Self {
        let pi = Arc::new(Template::from_segments(&[
            ("<?", Some(Field::Target)),
            ("", Some(Field::Space)),
            ("", Some(Field::Instruction)),
            ("?>", None),
        ]));

        Templates {
            start: Arc::new(Template::from_segments(&[
                ("<", Some(Field::Name)),
                ("", Some(Field::Attributes)),
                (">", None),
            ])),
            empty: Arc::new(Template::from_segments(&[
                ("<", Some(Field::Name)),
                ("", Some(Field::Attributes)),
                ("/>", None),
            ])),
            end: Arc::new(Template::from_segments(&[
                ("</", Some(Field::Name)),
                (">", None),
            ])),
            comment: Arc::new(Template::from_segments(&[
                ("<!--", Some(Field::Content)),
                ("-->", None),
            ])),
            xml_decl: Arc::clone(&pi),
            pi,
            doctype: Arc::new(Template::from_segments(&[
                ("<!DOCTYPE ", Some(Field::DocumentElement)),
                ("", Some(Field::ExternalId)),
                ("", Some(Field::InternalSubset)),
                (">", None),
            ])),
            cdata: Arc::new(Template::from_segments(&[
                ("<![CDATA[", Some(Field::Content)),
                ("]]>", None),
            ])),
        }
    }
}

impl Templates {
    fn slot(&mut self, kind: TokenKind) -> Option<&mut Arc<Template>> {
        match kind {
            TokenKind::Start => Some(&mut self.start),
            TokenKind::Empty => Some(&mut self.empty),
            TokenKind::End => Some(&mut self.end),
            TokenKind::Comment => Some(&mut self.comment),
            TokenKind::Pi => Some(&mut self.pi),
            TokenKind::XmlDecl => Some(&mut self.xml_decl),
            TokenKind::Doctype => Some(&mut self.doctype),
            TokenKind::Cdata => Some(&mut self.cdata),
            TokenKind::Text | TokenKind::Malformed => None,
        }
    }

    fn get(&self, kind: TokenKind) -> Option<&Arc<Template>> {
        match kind {
            TokenKind::Start => Some(&self.start),
            TokenKind::Empty => Some(&self.empty),
            TokenKind::End => Some(&self.end),
            TokenKind::Comment => Some(&self.comment),
            TokenKind::Pi => Some(&self.pi),
            TokenKind::XmlDecl => Some(&self.xml_decl),
            TokenKind::Doctype => Some(&self.doctype),
            TokenKind::Cdata => Some(&self.cdata),
            TokenKind::Text | TokenKind::Malformed => None,
        }
    }
}

static TEMPLATES: LazyLock<RwLock<Templates>> = LazyLock::new(Default::default);

/// Overrides the rebuild template of `kind` for the whole process.
///
/// Placeholders are written in braces and depend on the kind:
///
/// | Kind | Placeholders | Default |
/// |---|---|---|
/// | Start | `name`, `attrs` | `<{name}{attrs}>` |
/// | Empty | `name`, `attrs` | `<{name}{attrs}/>` |
/// | End | `name` | `</{name}>` |
/// | Comment | `content` | `<!--{content}-->` |
/// | Pi, XmlDecl | `target`, `space`, `instruction` | `<?{target}{space}{instruction}?>` |
/// | Doctype | `document_element`, `external_id`, `internal_subset` | `<!DOCTYPE {document_element}{external_id}{internal_subset}>` |
/// | Cdata | `content` | `<![CDATA[{content}]]>` |
///
/// `attrs` renders each attribute as ` name="value"`, `space` is a single
/// space when the instruction isn't empty, `external_id` is
/// ` TYPE "value"` and `internal_subset` is ` [subset]` (each empty when
/// absent).
///
/// # Example
///
/// ```
/// use shallow_xml::{set_template, reset_templates, StartTag, TokenKind};
///
/// set_template(TokenKind::Empty, "<{name}{attrs} />").unwrap();
///
/// let mut br = StartTag::parse("<br/>").unwrap();
/// br.set_attribute("class", "x");
/// assert_eq!(br.xml(), r#"<br class="x" />"#);
///
/// reset_templates();
/// ```
pub fn set_template(kind: TokenKind, template: &str) -> Result<(), TemplateError> {
    let template = Arc::new(Template::parse(kind, template)?);
    let mut templates = TEMPLATES.write().unwrap_or_else(PoisonError::into_inner);

    if let Some(slot) = templates.slot(kind) {
        *slot = template;
    }

    Ok(())
}

/// Restores the default template of every token kind.
pub fn reset_templates() {
    *TEMPLATES.write().unwrap_or_else(PoisonError::into_inner) = Templates::default();
}

/// Returns the current template source of `kind`, or `None` for kinds that
/// aren't rebuilt from a template.
pub fn template(kind: TokenKind) -> Option<String> {
    TEMPLATES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(kind)
        .map(|t| t.source())
}

/// Renders a token of `kind` with its current template. `fields` writes the
/// value of one placeholder.
pub(crate) fn render(
    kind: TokenKind,
    fields: &mut dyn FnMut(Field, &mut dyn FnMut(&str)),
    output_handler: &mut dyn FnMut(&str),
) {
    // NOTE: the lock is released before rendering, so output handlers are
    // free to override templates themselves.
    let template = TEMPLATES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(kind)
        .cloned();

    if let Some(template) = template {
        template.render(fields, output_handler);
    }
}
