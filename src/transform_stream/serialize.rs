use crate::lexer::TokenKinds;
use crate::rewritable_units::Token;
use std::borrow::Borrow;

/// Rendering of tokens back to markup.
///
/// Clean tokens write their original markup. Dirty tokens are rendered from
/// their fields without caching the result; use the tokens' `xml` method to
/// rebuild and keep it.
pub trait Serialize {
    fn to_xml(&self, output_handler: &mut dyn FnMut(&str));

    #[inline]
    fn to_xml_string(&self) -> String {
        let mut xml = String::new();

        self.to_xml(&mut |c| xml.push_str(c));

        xml
    }
}

impl<T: Serialize> Serialize for [T] {
    #[inline]
    fn to_xml(&self, output_handler: &mut dyn FnMut(&str)) {
        for item in self {
            item.to_xml(output_handler);
        }
    }
}

impl<T: Serialize> Serialize for Vec<T> {
    #[inline]
    fn to_xml(&self, output_handler: &mut dyn FnMut(&str)) {
        self.as_slice().to_xml(output_handler);
    }
}

/// Drains `tokens` and joins their markup. With `include_only`, tokens of
/// other kinds are still pulled from the sequence but left out of the
/// result.
///
/// Works with owned tokens as well as references:
///
/// ```
/// use shallow_xml::{concatenate, tokenize, Token, TokenKinds};
///
/// let tokens: Vec<Token<'_>> = tokenize("<p>Hello, <b>world</b></p>").collect();
///
/// assert_eq!(concatenate(&tokens, None), "<p>Hello, <b>world</b></p>");
/// assert_eq!(concatenate(tokens, Some(TokenKinds::TEXT)), "Hello, world");
/// ```
pub fn concatenate<'i, I>(tokens: I, include_only: Option<TokenKinds>) -> String
where
    I: IntoIterator,
    I::Item: Borrow<Token<'i>>,
{
    let mut xml = String::new();

    for token in tokens {
        let token = token.borrow();

        if include_only.map_or(true, |kinds| kinds.contains(token.kind().into())) {
            token.to_xml(&mut |c| xml.push_str(c));
        }
    }

    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform_stream::tokenize;

    #[test]
    fn reproduces_the_input() {
        let input = "<a x='1'>t<!-- c --><?p i?></a><b";

        assert_eq!(concatenate(tokenize(input), None), input);
    }

    #[test]
    fn filters_by_kind_but_consumes_everything() {
        let mut pulled = 0;

        let tags = concatenate(
            tokenize("<a>t</a>").inspect(|_| pulled += 1),
            Some(TokenKinds::TAGS),
        );

        assert_eq!(tags, "<a></a>");
        assert_eq!(pulled, 3);
    }

    #[test]
    fn renders_dirty_tokens() {
        let mut tokens: Vec<_> = tokenize("<a>t</a>").collect();

        if let Token::StartTag(tag) = &mut tokens[0] {
            tag.set_name("b");
        }

        assert_eq!(concatenate(&tokens, None), "<b>t</a>");
        assert_eq!(tokens.to_xml_string(), "<b>t</a>");
    }
}
