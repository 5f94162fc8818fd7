use crate::lexer::TokenKind;
use crate::rewritable_units::Token;
use thiserror::Error;

/// An error that occurs when [`accumulate`] is started from a token that
/// doesn't open a subtree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulationError {
    #[error("Only start and empty tags open a subtree, got a {0} token.")]
    InvalidAccumulationRoot(TokenKind),
}

/// The subtree opened by a start tag. See [`accumulate`].
#[derive(Debug)]
pub struct Accumulate<'i, I> {
    start: Option<Token<'i>>,
    name: String,
    depth: usize,
    tokens: I,
}

/// Yields `start` and then pulls tokens from `tokens` up to and including
/// the end tag that closes `start`.
///
/// Nesting is tracked by exact name: start tags named like `start` open a
/// level, end tags named like it close one. An empty tag is a subtree of its
/// own and yields nothing else. If `tokens` runs out first, everything left
/// is yielded.
///
/// Pass `tokens.by_ref()` to keep using the source afterwards:
///
/// ```
/// use shallow_xml::{accumulate, concatenate, tokenize, TokenKinds};
///
/// let mut tokens = tokenize(r##"<v>And <a href="#Seth">Seth</a> text</v> tail"##);
/// let start = tokens.next().unwrap();
/// let subtree: Vec<_> = accumulate(start, tokens.by_ref()).unwrap().collect();
///
/// assert_eq!(concatenate(&subtree, Some(TokenKinds::TEXT)), "And Seth text");
/// assert_eq!(concatenate(tokens, None), " tail");
/// ```
pub fn accumulate<'i, I>(
    start: Token<'i>,
    tokens: I,
) -> Result<Accumulate<'i, I::IntoIter>, AccumulationError>
where
    I: IntoIterator<Item = Token<'i>>,
{
    let (name, depth) = match &start {
        Token::StartTag(tag) => (tag.name().to_owned(), usize::from(!tag.self_closing())),
        other => return Err(AccumulationError::InvalidAccumulationRoot(other.kind())),
    };

    Ok(Accumulate {
        start: Some(start),
        name,
        depth,
        tokens: tokens.into_iter(),
    })
}

impl<'i, I> Iterator for Accumulate<'i, I>
where
    I: Iterator<Item = Token<'i>>,
{
    type Item = Token<'i>;

    fn next(&mut self) -> Option<Token<'i>> {
        if let Some(start) = self.start.take() {
            return Some(start);
        }

        if self.depth == 0 {
            return None;
        }

        let token = self.tokens.next()?;

        match &token {
            Token::StartTag(tag) if !tag.self_closing() && tag.name() == self.name => {
                self.depth += 1;
                trace!(@accumulate self.name, self.depth);
            }
            Token::EndTag(tag) if tag.name() == self.name => {
                self.depth -= 1;
                trace!(@accumulate self.name, self.depth);
            }
            _ => (),
        }

        Some(token)
    }
}
