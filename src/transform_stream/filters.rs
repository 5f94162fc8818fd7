use crate::rewritable_units::{EndTag, Token};
use crate::transform_stream::Serialize;
use hashbrown::HashSet;
use std::borrow::Borrow;
use std::ops::Range;
use thiserror::Error;

/// Filter returned by [`expand_empty_tags`].
#[derive(Debug)]
pub struct ExpandEmptyTags<'i, I> {
    tokens: I,
    keep_minimized: HashSet<String>,
    pending_end_tag: Option<Token<'i>>,
}

/// Rewrites every empty tag (`<e/>`) to a start and end tag pair
/// (`<e></e>`), except for the names in `keep_minimized`.
///
/// ```
/// use shallow_xml::{concatenate, expand_empty_tags, tokenize};
///
/// let tokens = expand_empty_tags(tokenize(r#"<p><a id="x"/><br/></p>"#), &["br"]);
///
/// assert_eq!(concatenate(tokens, None), r#"<p><a id="x"></a><br/></p>"#);
/// ```
pub fn expand_empty_tags<'i, I>(tokens: I, keep_minimized: &[&str]) -> ExpandEmptyTags<'i, I::IntoIter>
where
    I: IntoIterator<Item = Token<'i>>,
{
    ExpandEmptyTags {
        tokens: tokens.into_iter(),
        keep_minimized: keep_minimized.iter().map(|&name| name.to_owned()).collect(),
        pending_end_tag: None,
    }
}

impl<'i, I> Iterator for ExpandEmptyTags<'i, I>
where
    I: Iterator<Item = Token<'i>>,
{
    type Item = Token<'i>;

    fn next(&mut self) -> Option<Token<'i>> {
        if let Some(end_tag) = self.pending_end_tag.take() {
            return Some(end_tag);
        }

        let mut token = self.tokens.next()?;

        if let Token::StartTag(tag) = &mut token {
            if tag.self_closing() && !self.keep_minimized.contains(tag.name()) {
                tag.set_self_closing(false);
                self.pending_end_tag = Some(EndTag::new(tag.name()).into());
            }
        }

        Some(token)
    }
}

/// An error that occurs when [`wellformedness_check`] finds markup that
/// doesn't nest or doesn't lex.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WellformednessError {
    #[error("Extra end tag found: `{0}`.")]
    ExtraEndTag(String),

    #[error("`{start}` is closed by `{end}`.")]
    MismatchedEndTag { start: String, end: String },

    #[error("Malformed markup `{markup}` at {span:?}.")]
    Markup { markup: String, span: Range<usize> },
}

/// Filter returned by [`wellformedness_check`].
#[derive(Debug)]
pub struct WellformednessCheck<'i, I> {
    tokens: I,
    open_tags: Vec<Token<'i>>,
    failed: bool,
}

/// Passes tokens through while checking that tags nest properly and no
/// malformed markup occurs. The first problem is yielded as an error and
/// ends the sequence.
///
/// ```
/// use shallow_xml::{tokenize, wellformedness_check, WellformednessError};
///
/// let result: Result<Vec<_>, _> = wellformedness_check(tokenize("<a><b></a>")).collect();
///
/// assert_eq!(
///     result.unwrap_err(),
///     WellformednessError::MismatchedEndTag {
///         start: "<b>".into(),
///         end: "</a>".into()
///     }
/// );
/// ```
pub fn wellformedness_check<'i, I>(tokens: I) -> WellformednessCheck<'i, I::IntoIter>
where
    I: IntoIterator<Item = Token<'i>>,
{
    WellformednessCheck {
        tokens: tokens.into_iter(),
        open_tags: Vec::new(),
        failed: false,
    }
}

impl<'i, I> WellformednessCheck<'i, I> {
    fn check(&mut self, token: &Token<'i>) -> Result<(), WellformednessError> {
        match token {
            Token::StartTag(tag) if !tag.self_closing() => {
                self.open_tags.push(token.clone());
            }
            Token::EndTag(end) => match self.open_tags.pop() {
                Some(start) if start.name() == Some(end.name()) => (),
                Some(start) => {
                    return Err(WellformednessError::MismatchedEndTag {
                        start: start.to_xml_string(),
                        end: token.to_xml_string(),
                    })
                }
                None => return Err(WellformednessError::ExtraEndTag(token.to_xml_string())),
            },
            Token::Malformed(malformed) => {
                return Err(WellformednessError::Markup {
                    markup: malformed.as_str().to_owned(),
                    span: malformed.span(),
                })
            }
            _ => (),
        }

        Ok(())
    }
}

impl<'i, I> Iterator for WellformednessCheck<'i, I>
where
    I: Iterator<Item = Token<'i>>,
{
    type Item = Result<Token<'i>, WellformednessError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let token = self.tokens.next()?;

        match self.check(&token) {
            Ok(()) => Some(Ok(token)),
            Err(e) => {
                self.failed = true;

                Some(Err(e))
            }
        }
    }
}

/// Collects the distinct element paths (`doc`, `doc/p`, ...) in the order
/// they first occur. Empty tags add a path and close at once.
///
/// ```
/// use shallow_xml::{find_all_contexts, tokenize};
///
/// assert_eq!(
///     find_all_contexts(tokenize("<a><b/><c><b/></c><b/></a>")),
///     ["a", "a/b", "a/c", "a/c/b"]
/// );
/// ```
pub fn find_all_contexts<'i, I>(tokens: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Borrow<Token<'i>>,
{
    let mut stack: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    let mut contexts = Vec::new();

    for token in tokens {
        match token.borrow() {
            Token::StartTag(tag) => {
                stack.push(tag.name().to_owned());

                let path = stack.join("/");

                if seen.insert(path.clone()) {
                    contexts.push(path);
                }

                if tag.self_closing() {
                    stack.pop();
                }
            }
            Token::EndTag(_) => {
                stack.pop();
            }
            _ => (),
        }
    }

    contexts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform_stream::{concatenate, tokenize};

    #[test]
    fn expands_empty_tags_with_attributes() {
        let tokens = expand_empty_tags(tokenize(r#"<img src='a.png' /><hr/>"#), &[]);

        assert_eq!(
            concatenate(tokens, None),
            r#"<img src="a.png"></img><hr></hr>"#
        );
    }

    #[test]
    fn expansion_is_lazy() {
        let mut tokens = expand_empty_tags(tokenize("<a/><b/>"), &[]);

        assert_eq!(tokens.next().map(|t| t.to_xml_string()).as_deref(), Some("<a>"));
        assert_eq!(tokens.next().map(|t| t.to_xml_string()).as_deref(), Some("</a>"));
        assert_eq!(tokens.next().map(|t| t.to_xml_string()).as_deref(), Some("<b>"));
    }

    #[test]
    fn well_formed_input_passes_through() {
        let input = "<?xml version='1.0'?><a><b/><c>t</c></a>";
        let tokens: Result<Vec<_>, _> = wellformedness_check(tokenize(input)).collect();

        assert_eq!(concatenate(tokens.unwrap(), None), input);
    }

    #[test]
    fn extra_end_tag() {
        let mut tokens = wellformedness_check(tokenize("<a></a></b><c>"));

        assert!(tokens.next().unwrap().is_ok());
        assert!(tokens.next().unwrap().is_ok());
        assert_eq!(
            tokens.next(),
            Some(Err(WellformednessError::ExtraEndTag("</b>".into())))
        );
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn malformed_markup() {
        let result: Result<Vec<_>, _> = wellformedness_check(tokenize("<p>Some <i text.</p>")).collect();

        assert_eq!(
            result.unwrap_err(),
            WellformednessError::Markup {
                markup: "<i ".into(),
                span: 8..11
            }
        );
    }

    #[test]
    fn contexts_tolerate_stray_end_tags() {
        assert_eq!(
            find_all_contexts(tokenize("</x><a>t</a><a><b/></a>")),
            ["a", "a/b"]
        );
    }
}
