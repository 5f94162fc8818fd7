use serde_derive::Deserialize;
use serde_json::from_reader;
use std::fs::File;
use std::io::BufReader;

mod lexer_test;

pub use self::lexer_test::LexerTest;

#[derive(Deserialize)]
struct Suite {
    #[serde(default)]
    tests: Vec<LexerTest>,
}

macro_rules! read_tests {
    ($path:expr) => {
        glob::glob(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/", $path))
            .unwrap()
            .map(|path| {
                let path = path.unwrap();
                let file = BufReader::new(File::open(&path).unwrap());

                (path, file)
            })
    };
}

pub fn get_lexer_tests() -> Vec<LexerTest> {
    let mut tests = Vec::new();

    for (path, file) in read_tests!("lexer/*.json") {
        let suite: Suite = from_reader(file)
            .unwrap_or_else(|e| panic!("invalid fixture file {}: {e}", path.display()));

        tests.extend(suite.tests);
    }

    assert!(!tests.is_empty(), "no lexer fixtures found");

    tests
}
