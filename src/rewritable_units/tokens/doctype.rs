use crate::lexer::{grammar, single_lexeme, TokenKind, TokenKinds};
use crate::rewritable_units::template::{self, Field};
use crate::rewritable_units::TokenError;
use std::borrow::Cow;
use std::fmt::{self, Debug};

const OPENING: &str = "<!DOCTYPE";

/// Offset of the first `[` that isn't inside a quoted literal.
fn subset_start(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut quote = None;

    for (idx, &b) in bytes.iter().enumerate() {
        match (quote, b) {
            (None, b'"' | b'\'') => quote = Some(b),
            (Some(q), b) if q == b => quote = None,
            (None, b'[') => return Some(idx),
            _ => (),
        }
    }

    None
}

/// A document type declaration:
///
/// ```text
/// <!DOCTYPE x:body SYSTEM "/S:/xml/dtd/xhtml1-strict-prefixed.dtd" [<!ENTITY abc "xyz">]>
/// ```
///
/// splits into the document element `x:body`, the identifier type `SYSTEM`,
/// the identifier value `/S:/xml/dtd/xhtml1-strict-prefixed.dtd` and the
/// internal subset `<!ENTITY abc "xyz">`. Absent parts are empty strings.
///
/// The identifier value spans from the first quote to the last matching
/// quote before the internal subset, so both literals of a `PUBLIC`
/// identifier end up in it (`-//W3C//DTD X//EN" "x.dtd`) and survive a
/// rebuild. A rebuild reuses the quote the identifier was written with.
#[derive(Clone, PartialEq, Eq)]
pub struct Doctype<'i> {
    document_element: Cow<'i, str>,
    id_type: Cow<'i, str>,
    id_value: Cow<'i, str>,
    id_quote: char,
    internal_subset: Cow<'i, str>,
    raw: Option<Cow<'i, str>>,
}

impl<'i> Doctype<'i> {
    pub(crate) fn from_markup(raw: &'i str) -> Self {
        let body = &raw[OPENING.len()..raw.len() - 1];
        let element_start = grammar::opt_whitespace(body.as_bytes(), 0);
        let element_end = grammar::name(body.as_bytes(), element_start).unwrap_or(element_start);
        let document_element = &body[element_start..element_end];

        let mut rest = body[element_end..].trim_start();
        let mut id_type = "";

        for keyword in ["SYSTEM", "PUBLIC"] {
            if let Some(tail) = rest.strip_prefix(keyword) {
                if tail.is_empty() || !grammar::is_name_char(tail.as_bytes()[0]) {
                    id_type = keyword;
                    rest = tail.trim_start();
                    break;
                }
            }
        }

        let (external_id, subset) = match subset_start(rest) {
            Some(idx) => (rest[..idx].trim_end(), Some(&rest[idx + 1..])),
            None => (rest.trim_end(), None),
        };

        let (id_value, id_quote) = match external_id.as_bytes() {
            [quote @ (b'"' | b'\''), .., last] if last == quote => {
                (&external_id[1..external_id.len() - 1], char::from(*quote))
            }
            _ => ("", '"'),
        };

        let internal_subset = subset
            .and_then(|subset| subset.rfind(']').map(|end| &subset[..end]))
            .unwrap_or("");

        Doctype {
            document_element: Cow::Borrowed(document_element),
            id_type: Cow::Borrowed(id_type),
            id_value: Cow::Borrowed(id_value),
            id_quote,
            internal_subset: Cow::Borrowed(internal_subset),
            raw: Some(Cow::Borrowed(raw)),
        }
    }

    pub fn parse(markup: &'i str) -> Result<Self, TokenError> {
        single_lexeme(markup, TokenKinds::DOCTYPE)
            .map(|lexeme| Self::from_markup(lexeme.raw))
            .ok_or_else(|| TokenError::unexpected(TokenKinds::DOCTYPE, markup))
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        TokenKind::Doctype
    }

    #[inline]
    pub fn document_element(&self) -> &str {
        &self.document_element
    }

    #[inline]
    pub fn set_document_element(&mut self, document_element: &str) {
        self.document_element = Cow::Owned(document_element.to_owned());
        self.raw = None;
    }

    /// `SYSTEM`, `PUBLIC` or `""`.
    #[inline]
    pub fn id_type(&self) -> &str {
        &self.id_type
    }

    #[inline]
    pub fn set_id_type(&mut self, id_type: &str) {
        self.id_type = Cow::Owned(id_type.to_owned());
        self.raw = None;
    }

    /// The public identifier or system path, without its outer quotes.
    #[inline]
    pub fn id_value(&self) -> &str {
        &self.id_value
    }

    /// Switches the enclosing quote when `id_value` contains the current one.
    pub fn set_id_value(&mut self, id_value: &str) {
        if id_value.contains(self.id_quote) {
            self.id_quote = if self.id_quote == '"' { '\'' } else { '"' };
        }

        self.id_value = Cow::Owned(id_value.to_owned());
        self.raw = None;
    }

    /// The declarations between `[` and `]`.
    #[inline]
    pub fn internal_subset(&self) -> &str {
        &self.internal_subset
    }

    #[inline]
    pub fn set_internal_subset(&mut self, internal_subset: &str) {
        self.internal_subset = Cow::Owned(internal_subset.to_owned());
        self.raw = None;
    }

    pub fn into_owned(self) -> Doctype<'static> {
        Doctype {
            document_element: Cow::Owned(self.document_element.into_owned()),
            id_type: Cow::Owned(self.id_type.into_owned()),
            id_value: Cow::Owned(self.id_value.into_owned()),
            id_quote: self.id_quote,
            internal_subset: Cow::Owned(self.internal_subset.into_owned()),
            raw: self.raw.map(|raw| Cow::Owned(raw.into_owned())),
        }
    }

    fn serialize_from_parts(&self, output_handler: &mut dyn FnMut(&str)) {
        template::render(
            TokenKind::Doctype,
            &mut |field, output| match field {
                Field::DocumentElement => output(&self.document_element),
                Field::ExternalId => {
                    if !self.id_type.is_empty() {
                        output(" ");
                        output(&self.id_type);
                    }

                    if !self.id_value.is_empty() {
                        let mut quote = [0; 4];
                        let quote = self.id_quote.encode_utf8(&mut quote);

                        output(" ");
                        output(quote);
                        output(&self.id_value);
                        output(quote);
                    }
                }
                Field::InternalSubset if !self.internal_subset.is_empty() => {
                    output(" [");
                    output(&self.internal_subset);
                    output("]");
                }
                _ => (),
            },
            output_handler,
        );
    }
}

impl_serialize!(Doctype);

impl Debug for Doctype<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Doctype")
            .field("document_element", &self.document_element())
            .field("id_type", &self.id_type())
            .field("id_value", &self.id_value())
            .field("internal_subset", &self.internal_subset())
            .finish()
    }
}
