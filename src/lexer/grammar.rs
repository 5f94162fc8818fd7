//! Hand-written matchers for the REX shallow parsing expression.
//!
//! Every matcher takes the whole input and a start position and returns the
//! end position of the match, or `None` if the construct can't start there.
//! Optional parts of the expression are matched greedily, and a repetition
//! that fails halfway is rolled back to where the iteration began, which is
//! exactly what a backtracking regex engine settles on for this grammar.

use memchr::memmem;
use std::ops::Range;

#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\t' | b'\r')
}

// NOTE: bytes >= 0x80 belong to multi-byte UTF-8 sequences. All of them
// count as name characters, so a name never ends inside a character.
#[inline]
pub(crate) fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b':' || b >= 0x80
}

#[inline]
pub(crate) fn is_name_char(b: u8) -> bool {
    is_name_start(b) || b.is_ascii_digit() || b == b'.' || b == b'-'
}

#[inline]
fn byte_at(input: &[u8], pos: usize, expected: u8) -> Option<usize> {
    (input.get(pos) == Some(&expected)).then_some(pos + 1)
}

#[inline]
fn literal(input: &[u8], pos: usize, expected: &[u8]) -> Option<usize> {
    input
        .get(pos..)
        .filter(|tail| tail.starts_with(expected))
        .map(|_| pos + expected.len())
}

#[inline]
fn find(input: &[u8], pos: usize, needle: &[u8]) -> Option<usize> {
    input
        .get(pos..)
        .and_then(|tail| memmem::find(tail, needle))
        .map(|idx| pos + idx + needle.len())
}

/// `S`: one or more whitespace characters.
#[inline]
pub(crate) fn whitespace(input: &[u8], pos: usize) -> Option<usize> {
    let end = opt_whitespace(input, pos);

    (end > pos).then_some(end)
}

#[inline]
pub(crate) fn opt_whitespace(input: &[u8], mut pos: usize) -> usize {
    while input.get(pos).copied().is_some_and(is_whitespace) {
        pos += 1;
    }

    pos
}

/// `Name`.
#[inline]
pub(crate) fn name(input: &[u8], pos: usize) -> Option<usize> {
    if !input.get(pos).copied().is_some_and(is_name_start) {
        return None;
    }

    let mut end = pos + 1;

    while input.get(end).copied().is_some_and(is_name_char) {
        end += 1;
    }

    Some(end)
}

/// `QuoteSE`: a single- or double-quoted literal.
fn quoted(input: &[u8], pos: usize) -> Option<usize> {
    let quote = *input.get(pos)?;

    if quote != b'"' && quote != b'\'' {
        return None;
    }

    memchr::memchr(quote, input.get(pos + 1..)?).map(|idx| pos + idx + 2)
}

/// `AttValSE`: a quoted attribute value that doesn't contain `<`.
pub(crate) fn attribute_value(input: &[u8], pos: usize) -> Option<usize> {
    let quote = *input.get(pos)?;

    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let tail = input.get(pos + 1..)?;

    match memchr::memchr2(quote, b'<', tail) {
        Some(idx) if tail[idx] == quote => Some(pos + idx + 2),
        _ => None,
    }
}

/// Byte ranges of a matched attribute. `value` excludes the quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttributeOutline {
    pub name: Range<usize>,
    pub value: Range<usize>,
    pub end: usize,
}

/// `Name S? = S? AttValSE`, preceded by whitespace if `leading_whitespace`
/// is required.
pub(crate) fn attribute_outline(
    input: &[u8],
    pos: usize,
    leading_whitespace: bool,
) -> Option<AttributeOutline> {
    let name_start = if leading_whitespace {
        whitespace(input, pos)?
    } else {
        opt_whitespace(input, pos)
    };

    let name_end = name(input, name_start)?;
    let pos = opt_whitespace(input, name_end);
    let pos = byte_at(input, pos, b'=')?;
    let value_start = opt_whitespace(input, pos);
    let end = attribute_value(input, value_start)?;

    Some(AttributeOutline {
        name: name_start..name_end,
        value: value_start + 1..end - 1,
        end,
    })
}

/// `S Name S? = S? AttValSE`: one attribute including its leading whitespace.
#[inline]
pub(crate) fn attribute(input: &[u8], pos: usize) -> Option<usize> {
    attribute_outline(input, pos, true).map(|a| a.end)
}

/// `Until2Hyphens`: everything up to and including the first `--`.
#[inline]
fn until_two_hyphens(input: &[u8], pos: usize) -> Option<usize> {
    find(input, pos, b"--")
}

/// `PI_Tail`: either `?>` right away or a whitespace character followed by
/// everything up to the first `?>`.
fn pi_tail(input: &[u8], pos: usize) -> Option<usize> {
    literal(input, pos, b"?>").or_else(|| {
        if input.get(pos).copied().is_some_and(is_whitespace) {
            find(input, pos + 1, b"?>")
        } else {
            None
        }
    })
}

/// `MarkupDeclCE`: runs of ordinary characters and quoted literals closed by `>`.
fn markup_decl_ce(input: &[u8], mut pos: usize) -> Option<usize> {
    loop {
        match *input.get(pos)? {
            b'>' => return Some(pos + 1),
            b'"' | b'\'' => pos = quoted(input, pos)?,
            b']' | b'<' => return None,
            _ => pos += 1,
        }
    }
}

/// `DT_ItemSE`: one item of a DOCTYPE internal subset.
fn doctype_item(input: &[u8], pos: usize) -> Option<usize> {
    match *input.get(pos)? {
        b'<' => match *input.get(pos + 1)? {
            b'!' => {
                if let Some(after_dashes) = literal(input, pos + 2, b"--") {
                    let end = until_two_hyphens(input, after_dashes)?;

                    byte_at(input, end, b'>')
                } else if *input.get(pos + 2)? != b'-' {
                    // `[^-]` takes any single character that isn't a hyphen.
                    markup_decl_ce(input, pos + 3)
                } else {
                    None
                }
            }
            b'?' => {
                let end = name(input, pos + 2)?;

                pi_tail(input, end)
            }
            _ => None,
        },
        b'%' => {
            let end = name(input, pos + 1)?;

            byte_at(input, end, b';')
        }
        _ => whitespace(input, pos),
    }
}

/// `DocTypeCE`: everything after `<!DOCTYPE`.
fn doctype_ce(input: &[u8], pos: usize) -> Option<usize> {
    let pos = whitespace(input, pos)?;
    let mut pos = name(input, pos)?;

    loop {
        let item = whitespace(input, pos)
            .and_then(|p| name(input, p).or_else(|| quoted(input, p)));

        match item {
            Some(end) => pos = end,
            None => break,
        }
    }

    pos = opt_whitespace(input, pos);

    if let Some(mut subset_pos) = byte_at(input, pos, b'[') {
        while let Some(end) = doctype_item(input, subset_pos) {
            subset_pos = end;
        }

        if let Some(end) = byte_at(input, subset_pos, b']') {
            pos = opt_whitespace(input, end);
        }
    }

    Some(byte_at(input, pos, b'>').unwrap_or(pos))
}

/// `DeclCE` (after `<!`). Falls back to the bare `<!` when nothing fits.
fn declaration(input: &[u8], pos: usize) -> usize {
    if let Some(pos) = literal(input, pos, b"--") {
        match until_two_hyphens(input, pos) {
            Some(end) => byte_at(input, end, b'>').unwrap_or(end),
            None => pos,
        }
    } else if let Some(pos) = literal(input, pos, b"[CDATA[") {
        find(input, pos, b"]]>").unwrap_or(pos)
    } else if let Some(pos) = literal(input, pos, b"DOCTYPE") {
        doctype_ce(input, pos).unwrap_or(pos)
    } else {
        pos
    }
}

/// `PI_CE` (after `<?`).
fn processing_instruction(input: &[u8], pos: usize) -> usize {
    match name(input, pos) {
        Some(end) => pi_tail(input, end).unwrap_or(end),
        None => pos,
    }
}

/// `EndTagCE` (after `</`).
fn end_tag(input: &[u8], pos: usize) -> usize {
    match name(input, pos) {
        Some(end) => {
            let end = opt_whitespace(input, end);

            byte_at(input, end, b'>').unwrap_or(end)
        }
        None => pos,
    }
}

/// `ElemTagCE` (after `<`).
fn element_tag(input: &[u8], pos: usize) -> usize {
    let Some(mut pos) = name(input, pos) else {
        return pos;
    };

    while let Some(end) = attribute(input, pos) {
        pos = end;
    }

    pos = opt_whitespace(input, pos);
    pos = byte_at(input, pos, b'/').unwrap_or(pos);

    byte_at(input, pos, b'>').unwrap_or(pos)
}

/// `MarkupSPE`: the longest prefix of markup starting with the `<` at `pos`.
///
/// Always consumes at least the `<` itself.
pub(crate) fn markup(input: &[u8], pos: usize) -> usize {
    debug_assert_eq!(input.get(pos), Some(&b'<'));

    let pos = pos + 1;

    match input.get(pos) {
        Some(b'!') => declaration(input, pos + 1),
        Some(b'?') => processing_instruction(input, pos + 1),
        Some(b'/') => end_tag(input, pos + 1),
        _ => element_tag(input, pos),
    }
}

/// `TextSE`: a maximal run of characters other than `<`.
#[inline]
pub(crate) fn text(input: &[u8], pos: usize) -> usize {
    match input.get(pos..).and_then(|tail| memchr::memchr(b'<', tail)) {
        Some(idx) => pos + idx,
        None => input.len(),
    }
}
