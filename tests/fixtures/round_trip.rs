use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shallow_xml::*;

const PIECES: &[&str] = &[
    "<", ">", "/", "!", "?", "-", "--", "[", "]", "]]>", "'", "\"", "=", " ", "\n", "a", "b:c",
    "\u{e9}", "\u{1f600}", "&amp;", "xml", "CDATA[", "DOCTYPE", "<p>", "</p>", "<br/>", "<!--",
    "-->", "<?", "?>",
];

fn random_input(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..48);

    (0..len)
        .map(|_| PIECES[rng.gen_range(0..PIECES.len())])
        .join("")
}

#[test]
fn concatenation_reproduces_any_input() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..2000 {
        let input = random_input(&mut rng);

        assert_eq!(concatenate(tokenize(&input), None), input);
    }
}

#[test]
fn spans_tile_the_input() {
    let mut rng = StdRng::seed_from_u64(0xface);

    for _ in 0..500 {
        let input = random_input(&mut rng);
        let spans = Lexer::new(&input).map(|l| l.span).collect_vec();

        for (prev, next) in spans.iter().tuple_windows() {
            assert_eq!(prev.end, next.start, "{input:?}");
        }

        assert!(spans.iter().all(|s| s.start < s.end), "{input:?}");
        assert_eq!(spans.first().map_or(0, |s| s.start), 0);
        assert_eq!(spans.last().map_or(0, |s| s.end), input.len());
    }
}

#[test]
fn text_never_contains_lt() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..500 {
        let input = random_input(&mut rng);

        for token in tokenize(&input) {
            if let Token::Text(text) = &token {
                assert!(!text.as_str().contains('<'), "{input:?}");
            }
        }
    }
}

#[test]
fn owned_tokens_serialize_the_same() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let input = random_input(&mut rng);
        let owned: Vec<Token<'static>> = tokenize(&input).map(Token::into_owned).collect();

        assert_eq!(concatenate(&owned, None), input);
    }
}
