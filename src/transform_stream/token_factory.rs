use crate::lexer::{Lexeme, TokenKind};
use crate::rewritable_units::*;

impl<'i> From<Lexeme<'i>> for Token<'i> {
    /// Builds the token for a lexeme produced by the lexer.
    ///
    /// The token parsers rely on the shape the lexer guarantees for each
    /// kind (e.g. a comment lexeme always starts with `<!--` and ends with
    /// `-->`), so lexemes must not be assembled by hand.
    fn from(lexeme: Lexeme<'i>) -> Self {
        let Lexeme { kind, span, raw } = lexeme;

        debug_assert_eq!(crate::lexer::classify(raw), kind);

        match kind {
            TokenKind::Text => Text::new(raw).into(),
            TokenKind::Start => StartTag::from_markup(raw, false).into(),
            TokenKind::Empty => StartTag::from_markup(raw, true).into(),
            TokenKind::End => EndTag::from_markup(raw).into(),
            TokenKind::Comment => Comment::from_markup(raw).into(),
            TokenKind::Pi | TokenKind::XmlDecl => {
                ProcessingInstruction::from_markup(raw, kind).into()
            }
            TokenKind::Doctype => Doctype::from_markup(raw).into(),
            TokenKind::Cdata => Cdata::from_markup(raw).into(),
            TokenKind::Malformed => Malformed::new(raw, span).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        Lexer::new(input).map(Token::from).collect()
    }

    #[test]
    fn one_token_per_lexeme() {
        let input = r#"<?xml version="1.0"?><!DOCTYPE d><d a="1"><![CDATA[x]]><?t i?><e/></d><!--c-->"#;
        let kinds: Vec<_> = tokens(input).iter().map(Token::kind).collect();

        assert_eq!(
            kinds,
            [
                TokenKind::XmlDecl,
                TokenKind::Doctype,
                TokenKind::Start,
                TokenKind::Cdata,
                TokenKind::Pi,
                TokenKind::Empty,
                TokenKind::End,
                TokenKind::Comment,
            ]
        );
    }

    #[test]
    fn malformed_keeps_its_span() {
        let tokens = tokens("<p>Some <i text.</p>");

        match &tokens[2] {
            Token::Malformed(m) => {
                assert_eq!(m.as_str(), "<i ");
                assert_eq!(m.span(), 8..11);
            }
            other => panic!("unexpected token: {other:?}"),
        }
    }
}
