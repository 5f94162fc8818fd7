use memchr::{memchr, memchr2};

macro_rules! impl_replace_char {
    ($text:ident, $output_handler:ident, $impls:ident) => {
        let mut tail: &str = $text;

        loop {
            match $impls!(@find tail) {
                Some(pos) => {
                    let replacement = $impls!(@get_replacement tail, pos);

                    if pos > 0 {
                        $output_handler(&tail[..pos]);
                    }

                    $output_handler(replacement);
                    tail = &tail[pos + 1..];
                }
                None => {
                    if !tail.is_empty() {
                        $output_handler(tail);
                    }
                    break;
                }
            }
        }
    };
}

// NOTE: needles are ASCII, so every match position is a char boundary
// and the slices around it stay valid UTF-8.
#[inline]
pub(crate) fn replace_char(
    text: &str,
    (needle, repl): (u8, &str),
    output_handler: &mut dyn FnMut(&str),
) {
    debug_assert!(needle.is_ascii());

    macro_rules! impls {
        (@find $tail:ident) => {
            memchr(needle, $tail.as_bytes())
        };

        (@get_replacement $tail:ident, $pos:ident) => {
            repl
        };
    }

    impl_replace_char!(text, output_handler, impls);
}

#[inline]
pub(crate) fn replace_char2(
    text: &str,
    (needle1, repl1): (u8, &str),
    (needle2, repl2): (u8, &str),
    output_handler: &mut dyn FnMut(&str),
) {
    debug_assert!(needle1.is_ascii() && needle2.is_ascii());

    macro_rules! impls {
        (@find $tail:ident) => {
            memchr2(needle1, needle2, $tail.as_bytes())
        };

        (@get_replacement $tail:ident, $pos:ident) => {
            if $tail.as_bytes()[$pos] == needle1 {
                repl1
            } else {
                repl2
            }
        };
    }

    impl_replace_char!(text, output_handler, impls);
}

#[inline]
pub(crate) fn ceil_char_boundary(text: &str, mut pos: usize) -> usize {
    while pos < text.len() && !text.is_char_boundary(pos) {
        pos += 1;
    }

    pos.min(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replaced(text: &str, f: impl Fn(&str, &mut dyn FnMut(&str))) -> String {
        let mut out = String::new();

        f(text, &mut |c| out.push_str(c));

        out
    }

    #[test]
    fn replaces_every_occurrence() {
        let out = replaced(r#"a "b" c"#, |t, h| replace_char(t, (b'"', "&quot;"), h));

        assert_eq!(out, "a &quot;b&quot; c");
    }

    #[test]
    fn replaces_two_needles() {
        let out = replaced("<a> & <b/>", |t, h| {
            replace_char2(t, (b'&', "&amp;"), (b'<', "&lt;"), h)
        });

        assert_eq!(out, "&lt;a> &amp; &lt;b/>");
    }

    #[test]
    fn keeps_multibyte_text_intact() {
        let out = replaced("ü\"ß", |t, h| replace_char(t, (b'"', "'"), h));

        assert_eq!(out, "ü'ß");
    }

    #[test]
    fn no_output_for_empty_input() {
        let mut called = false;

        replace_char("", (b'"', "&quot;"), &mut |_| called = true);

        assert!(!called);
    }

    #[test]
    fn char_boundary_rounds_up() {
        let text = "aü";

        assert_eq!(ceil_char_boundary(text, 2), 3);
        assert_eq!(ceil_char_boundary(text, 1), 1);
        assert_eq!(ceil_char_boundary(text, 10), 3);
    }
}
