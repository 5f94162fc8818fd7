use itertools::Itertools;
use serde_derive::Deserialize;
use shallow_xml::{concatenate, tokenize, Lexer};

/// One data-driven lexer case: the input and the `[kind, raw]` pairs it
/// must lex to, in order.
#[derive(Deserialize, Debug)]
pub struct LexerTest {
    pub description: String,
    pub input: String,
    pub output: Vec<(String, String)>,
}

impl LexerTest {
    fn actual(&self) -> Vec<(String, String)> {
        Lexer::new(&self.input)
            .map(|l| (format!("{:?}", l.kind), l.raw.to_owned()))
            .collect()
    }

    pub fn run(&self) {
        let actual = self.actual();

        assert_eq!(
            actual,
            self.output,
            "\n{}\ninput: {:?}\nactual: {}\n",
            self.description,
            self.input,
            actual.iter().map(|(kind, raw)| format!("{kind}({raw:?})")).join(" ")
        );

        let token_kinds = tokenize(&self.input)
            .map(|t| format!("{:?}", t.kind()))
            .collect_vec();

        itertools::assert_equal(
            token_kinds.iter().map(String::as_str),
            self.output.iter().map(|(kind, _)| kind.as_str()),
        );

        assert_eq!(
            concatenate(tokenize(&self.input), None),
            self.input,
            "{}: round trip",
            self.description
        );
    }
}
