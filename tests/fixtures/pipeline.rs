use shallow_xml::*;
use std::cell::RefCell;

const VERSE: &str = r##"<v>And <a href="#Seth">Seth</a> text</v>"##;

#[test]
fn balanced_accumulation() {
    let mut tokens = tokenize(VERSE);
    let start = tokens.next().unwrap();
    let subtree: Vec<_> = accumulate(start, tokens.by_ref()).unwrap().collect();

    assert_eq!(concatenate(&subtree, Some(TokenKinds::TEXT)), "And Seth text");
    assert_eq!(concatenate(&subtree, None), VERSE);
    assert!(tokens.next().is_none());
}

#[test]
fn accumulating_each_verse() {
    let input = "<doc><v n='1'>a<v>b</v></v><v n='2'>c</v></doc>";
    let mut tokens = tokenize(input);
    let mut verses = Vec::new();

    while let Some(token) = tokens.next() {
        if token.is_a(TokenKinds::START, &["v"]) {
            let verse = accumulate(token, tokens.by_ref()).unwrap();

            verses.push(concatenate(verse, Some(TokenKinds::TEXT)));
        }
    }

    assert_eq!(verses, ["ab", "c"]);
}

#[test]
fn filters_run_depth_first() {
    let log = RefCell::new(Vec::new());

    let tokens = tokenize("<a/><b>t</b>")
        .inspect(|t| log.borrow_mut().push(format!("lex {}", t.to_xml_string())))
        .filter(|t| !t.is_a(TokenKinds::TEXT, &[]))
        .inspect(|t| log.borrow_mut().push(format!("out {}", t.to_xml_string())));

    let output = concatenate(expand_empty_tags(tokens, &[]), None);

    assert_eq!(output, "<a></a><b></b>");
    assert_eq!(
        log.into_inner(),
        [
            "lex <a/>",
            "out <a/>",
            "lex <b>",
            "out <b>",
            "lex t",
            "lex </b>",
            "out </b>",
        ]
    );
}

#[test]
fn skipped_tokens_are_still_pulled() {
    let mut seen = 0;
    let tokens = tokenize("<p>x<!--c-->y</p>").inspect(|_| seen += 1);

    assert_eq!(concatenate(tokens, Some(TokenKinds::COMMENT)), "<!--c-->");
    assert_eq!(seen, 5);
}

#[test]
fn check_then_collect_contexts() {
    let input = "<doc><sec><p/><p>x</p></sec><sec/></doc>";
    let checked: Result<Vec<_>, _> = wellformedness_check(tokenize(input)).collect();

    assert_eq!(
        find_all_contexts(checked.unwrap()),
        ["doc", "doc/sec", "doc/sec/p"]
    );
}

#[test]
fn check_stops_at_first_error() {
    let results: Vec<_> = wellformedness_check(tokenize("<a></b><c/>")).collect();

    assert_eq!(results.len(), 2);
    assert_eq!(
        results[1],
        Err(WellformednessError::MismatchedEndTag {
            start: "<a>".into(),
            end: "</b>".into()
        })
    );
}

#[test]
fn diagnostics_go_to_the_configured_writer() {
    let mut sink = Vec::new();

    {
        let settings = Settings::new().diagnostics_to(&mut sink);
        let output = concatenate(Tokenizer::new("<p>Some <i text.</p>", settings), None);

        assert_eq!(output, "<p>Some <i text.</p>");
    }

    let report = String::from_utf8(sink).unwrap();

    assert!(report.contains("8..11"), "{report}");
    assert!(report.contains('^'), "{report}");
}

#[test]
fn well_formed_input_reports_nothing() {
    let mut count = 0;

    {
        let settings = Settings::new().diagnostics(|_| count += 1);

        Tokenizer::new("<a></a>", settings).for_each(drop);
    }

    assert_eq!(count, 0);
}

#[test]
fn malformed_input_without_a_handler() {
    let input = "<p>Some <i text.</p>";
    let mut tokens = Tokenizer::new(input, Settings::new());

    assert!(format!("{tokens:?}").contains("diagnostics: false"));

    let malformed: Vec<_> = tokens
        .by_ref()
        .filter(|t| t.is_a(TokenKinds::MALFORMED, &[]))
        .map(|t| t.to_xml_string())
        .collect();

    assert_eq!(malformed, ["<i "]);
    assert_eq!(concatenate(tokenize(input), None), input);
}
