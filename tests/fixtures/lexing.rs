use crate::harness::get_lexer_tests;

#[test]
fn lexer_fixtures() {
    for test in get_lexer_tests() {
        test.run();
    }
}
