use crate::base::ceil_char_boundary;
use std::fmt::{self, Display, Write};
use std::ops::Range;

const CONTEXT_SIZE: usize = 30;

/// Report for a run of malformed markup, pointing at the offending span.
///
/// The [`Display`] implementation renders a caret-annotated excerpt:
///
/// ```text
/// syntax error in markup at 8..11:
///     <p>Some <i text.</p>
///             ^^^
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupDiagnostic<'i> {
    input: &'i str,
    span: Range<usize>,
}

impl<'i> MarkupDiagnostic<'i> {
    #[inline]
    pub(crate) fn new(input: &'i str, span: Range<usize>) -> Self {
        MarkupDiagnostic { input, span }
    }

    /// Byte offsets of the malformed markup in the input.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The malformed markup itself.
    #[inline]
    pub fn markup(&self) -> &'i str {
        &self.input[self.span.clone()]
    }
}

fn context_start(input: &str, pos: usize) -> usize {
    input[..pos]
        .char_indices()
        .rev()
        .nth(CONTEXT_SIZE - 1)
        .map_or(0, |(idx, _)| idx)
}

fn context_end(input: &str, pos: usize) -> usize {
    input[pos..]
        .char_indices()
        .nth(CONTEXT_SIZE)
        .map_or(input.len(), |(idx, _)| pos + idx)
}

fn push_escaped(out: &mut String, text: &str) -> usize {
    let mut width = 0;

    for ch in text.chars() {
        for escaped in ch.escape_debug() {
            out.push(escaped);
            width += 1;
        }
    }

    width
}

impl Display for MarkupDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = self.input;
        let span_start = ceil_char_boundary(input, self.span.start);
        let span_end = ceil_char_boundary(input, self.span.end.max(span_start));
        let start = context_start(input, span_start);
        let end = context_end(input, span_end);

        let mut excerpt = String::new();
        let mut offset = 0;

        if start > 0 {
            excerpt.push_str("...");
            offset += 3;
        }

        offset += push_escaped(&mut excerpt, &input[start..span_start]);

        let marked = push_escaped(&mut excerpt, &input[span_start..span_end]);

        push_escaped(&mut excerpt, &input[span_end..end]);

        if end < input.len() {
            excerpt.push_str("...");
        }

        writeln!(f, "syntax error in markup at {}..{}:", self.span.start, self.span.end)?;
        writeln!(f, "    {excerpt}")?;

        f.write_str("    ")?;

        for _ in 0..offset {
            f.write_char(' ')?;
        }

        for _ in 0..marked.max(1) {
            f.write_char('^')?;
        }

        f.write_char('\n')
    }
}
